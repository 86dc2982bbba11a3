use crate::{pages::Navigation, AuthSlice, RootState, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub route: Route,
}

pub const MENU: [MenuItem; 3] = [
    MenuItem {
        label: "Dashboard",
        route: Route::Dashboard,
    },
    MenuItem {
        label: "Daily Entries",
        route: Route::Entries,
    },
    MenuItem {
        label: "Reports",
        route: Route::Reports,
    },
];

/// Frame shared by the protected pages: navigation menu, current user and
/// logout.
#[derive(Clone)]
pub struct Layout {
    auth: AuthSlice,
}

impl Layout {
    pub fn new(auth: AuthSlice) -> Self {
        Self { auth }
    }

    #[must_use]
    pub fn menu(&self) -> &'static [MenuItem] {
        &MENU
    }

    /// Display name of the signed-in user, unknown after a restart.
    #[must_use]
    pub fn user_label(&self, state: &RootState) -> Option<String> {
        state.auth.user.as_ref().map(|user| user.full_name.clone())
    }

    pub fn logout(&self) -> Navigation {
        self.auth.logout();
        Navigation::To(Route::Login)
    }
}
