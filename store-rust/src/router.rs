use crate::AuthState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Entries,
    Reports,
}

impl Route {
    pub const ALL: [Self; 5] = [
        Self::Login,
        Self::Register,
        Self::Dashboard,
        Self::Entries,
        Self::Reports,
    ];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/",
            Self::Entries => "/entries",
            Self::Reports => "/reports",
        }
    }

    /// Match a location. Query string, fragment and trailing slash are
    /// ignored.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');
        let path = if path.is_empty() { "/" } else { path };
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Protected routes render only with a token present.
    #[must_use]
    pub fn is_protected(self) -> bool {
        !matches!(self, Self::Login | Self::Register)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(Route),
    NotFound,
}

/// Route guard. Token presence alone counts as authenticated; an invalid
/// token is only discovered when an API call fails.
#[must_use]
pub fn resolve(path: &str, auth: &AuthState) -> Resolution {
    let Some(route) = Route::from_path(path) else {
        return Resolution::NotFound;
    };

    match (route.is_protected(), auth.is_authenticated()) {
        (true, false) => Resolution::Redirect(Route::Login),
        (false, true) => Resolution::Redirect(Route::Dashboard),
        _ => Resolution::Render(route),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticated() -> AuthState {
        AuthState::from_token(Some("whatever-even-expired".to_string()))
    }

    #[test]
    fn protected_paths_redirect_to_login_without_token() {
        let auth = AuthState::default();
        for path in ["/", "/entries", "/reports", "/reports/"] {
            assert_eq!(
                resolve(path, &auth),
                Resolution::Redirect(Route::Login),
                "{path}"
            );
        }
        assert_eq!(resolve("/login", &auth), Resolution::Render(Route::Login));
        assert_eq!(
            resolve("/register", &auth),
            Resolution::Render(Route::Register)
        );
    }

    #[test]
    fn any_token_renders_protected_area() {
        let auth = authenticated();
        assert_eq!(
            resolve("/entries?tab=1", &auth),
            Resolution::Render(Route::Entries)
        );
        assert_eq!(resolve("/", &auth), Resolution::Render(Route::Dashboard));
        assert_eq!(
            resolve("/login", &auth),
            Resolution::Redirect(Route::Dashboard)
        );
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(resolve("/admin", &authenticated()), Resolution::NotFound);
        assert_eq!(resolve("/admin", &AuthState::default()), Resolution::NotFound);
    }
}
