use crate::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardCard {
    pub title: &'static str,
    pub description: &'static str,
    pub action: &'static str,
    pub route: Route,
}

/// Navigation hub. Reads nothing from the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardPage;

impl DashboardPage {
    pub const TITLE: &'static str = "Welcome to ScrumMate";

    #[must_use]
    pub fn cards(self) -> [DashboardCard; 2] {
        [
            DashboardCard {
                title: "Daily Entries",
                description: "Record what you did yesterday, what you plan today and any blockers.",
                action: "Go to Entries",
                route: Route::Entries,
            },
            DashboardCard {
                title: "Reports",
                description: "Generate and review weekly summaries and monthly reports.",
                action: "View Reports",
                route: Route::Reports,
            },
        ]
    }
}
