use crate::{pages::Navigation, AuthSlice, AuthState, RootState, Route};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthView {
    pub heading: &'static str,
    pub is_loading: bool,
    /// Server-provided message of the last failed attempt, shown inline.
    pub error: Option<String>,
}

/// Leave the credential pages as soon as a token is held.
fn on_state(auth: &AuthState) -> Navigation {
    if auth.is_authenticated() {
        Navigation::To(Route::Dashboard)
    } else {
        Navigation::Stay
    }
}

fn view(heading: &'static str, state: &RootState) -> AuthView {
    AuthView {
        heading,
        is_loading: state.auth.is_loading,
        error: state.auth.error.clone(),
    }
}

#[derive(Clone)]
pub struct LoginPage {
    auth: AuthSlice,
    pub email: String,
    pub password: String,
}

impl LoginPage {
    pub fn new(auth: AuthSlice) -> Self {
        Self {
            auth,
            email: String::new(),
            password: String::new(),
        }
    }

    #[must_use]
    pub fn on_state(&self, state: &RootState) -> Navigation {
        on_state(&state.auth)
    }

    /// A rejected login stays on the page; the message is in [`AuthView::error`].
    pub async fn submit(&self) -> Navigation {
        match self.auth.login(&self.email, &self.password).await {
            Ok(_) => Navigation::To(Route::Dashboard),
            Err(_) => Navigation::Stay,
        }
    }

    #[must_use]
    pub fn view(&self, state: &RootState) -> AuthView {
        view("Sign In", state)
    }
}

#[derive(Clone)]
pub struct RegisterPage {
    auth: AuthSlice,
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterPage {
    pub fn new(auth: AuthSlice) -> Self {
        Self {
            auth,
            full_name: String::new(),
            email: String::new(),
            password: String::new(),
        }
    }

    #[must_use]
    pub fn on_state(&self, state: &RootState) -> Navigation {
        on_state(&state.auth)
    }

    pub async fn submit(&self) -> Navigation {
        match self
            .auth
            .register(&self.email, &self.password, &self.full_name)
            .await
        {
            Ok(_) => Navigation::To(Route::Dashboard),
            Err(_) => Navigation::Stay,
        }
    }

    #[must_use]
    pub fn view(&self, state: &RootState) -> AuthView {
        view("Sign Up", state)
    }
}
