use crate::{Action, Store, StoreResult};
use scrummate_client::{ApiError, ApiResult, AuthResponse, AuthService, Session, TokenStore};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub email: String,
    pub full_name: String,
}

/// Authentication slice. A present token means authenticated; the token
/// is never verified client-side, the backend re-validates it on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    /// Unknown after a restart until the next login.
    pub user: Option<UserProfile>,
    pub token: Option<String>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    #[must_use]
    pub fn from_token(token: Option<String>) -> Self {
        Self {
            token: token.filter(|token| !token.is_empty()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub fn session(&self) -> Option<Session> {
        let user = self.user.as_ref()?;
        let token = self.token.as_ref()?;
        Some(Session {
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            token: token.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    Pending,
    Authenticated(Session),
    Rejected(String),
    LoggedOut,
    ClearError,
}

impl AuthAction {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "auth/pending",
            Self::Authenticated(_) => "auth/fulfilled",
            Self::Rejected(_) => "auth/rejected",
            Self::LoggedOut => "auth/logout",
            Self::ClearError => "auth/clearError",
        }
    }
}

pub fn reduce(state: &mut AuthState, action: AuthAction) {
    match action {
        AuthAction::Pending => {
            state.is_loading = true;
            state.error = None;
        }
        AuthAction::Authenticated(session) => {
            state.user = Some(UserProfile {
                email: session.email,
                full_name: session.full_name,
            });
            state.token = Some(session.token);
            state.is_loading = false;
            state.error = None;
        }
        AuthAction::Rejected(message) => {
            state.is_loading = false;
            state.error = Some(message);
        }
        AuthAction::LoggedOut => {
            state.user = None;
            state.token = None;
            state.is_loading = false;
            state.error = None;
        }
        AuthAction::ClearError => state.error = None,
    }
}

/// Operations of the auth slice.
#[derive(Clone)]
pub struct AuthSlice {
    store: Store,
    api: AuthService,
    tokens: Arc<dyn TokenStore>,
}

impl AuthSlice {
    pub fn new(store: Store, api: AuthService, tokens: Arc<dyn TokenStore>) -> Self {
        Self { store, api, tokens }
    }

    /// On failure the error message is recorded and any prior session is
    /// left as it was. Concurrent logins are not deduplicated.
    pub async fn login(&self, email: &str, password: &str) -> StoreResult<Session> {
        let request = async {
            let response = self.api.login(email, password).await?;
            Ok::<_, ApiError>(self.persist(response))
        };
        self.settle("login", request).await
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> StoreResult<Session> {
        let request = async {
            let response = self.api.register(email, password, full_name).await?;
            Ok::<_, ApiError>(self.persist(response))
        };
        self.settle("register", request).await
    }

    /// Clear the session and the persisted token. Idempotent.
    pub fn logout(&self) {
        if let Err(err) = self.tokens.clear() {
            warn!("failed to clear persisted token: {err}");
        }
        self.store.dispatch(AuthAction::LoggedOut);
        info!("logged out");
    }

    pub fn clear_error(&self) {
        self.store.dispatch(AuthAction::ClearError);
    }

    async fn settle<F>(&self, operation: &'static str, request: F) -> StoreResult<Session>
    where
        F: std::future::Future<Output = ApiResult<Session>>,
    {
        self.store
            .run(
                "auth",
                operation,
                AuthAction::Pending.into(),
                request,
                |session| Action::Auth(AuthAction::Authenticated(session.clone())),
                |message| Action::Auth(AuthAction::Rejected(message)),
            )
            .await
    }

    /// The token is written before the session is published so that
    /// requests issued on the state change already find it.
    fn persist(&self, response: AuthResponse) -> Session {
        if let Err(err) = self.tokens.save(&response.token) {
            warn!("failed to persist auth token, the session will not survive a restart: {err}");
        }
        info!(email = %response.email, "authenticated");
        Session::from(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(token: &str) -> Session {
        Session {
            email: "a@b.c".to_string(),
            full_name: "A B".to_string(),
            token: token.to_string(),
        }
    }

    #[test]
    fn empty_persisted_token_is_unauthenticated() {
        assert!(!AuthState::from_token(Some(String::new())).is_authenticated());
        assert!(!AuthState::from_token(None).is_authenticated());
        assert!(AuthState::from_token(Some("t".to_string())).is_authenticated());
    }

    #[test]
    fn rejection_keeps_prior_session() {
        let mut state = AuthState::default();
        reduce(&mut state, AuthAction::Authenticated(session("first")));
        reduce(&mut state, AuthAction::Pending);
        reduce(&mut state, AuthAction::Rejected("Invalid credentials".to_string()));

        assert_eq!(state.session(), Some(session("first")));
        assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
        assert!(!state.is_loading);
    }

    #[test]
    fn logout_twice_is_harmless() {
        let mut state = AuthState::default();
        reduce(&mut state, AuthAction::Authenticated(session("t")));
        reduce(&mut state, AuthAction::LoggedOut);
        let once = state.clone();
        reduce(&mut state, AuthAction::LoggedOut);

        assert_eq!(state, once);
        assert!(!state.is_authenticated());
    }
}
