//! Per-screen controllers. Each page reads the state it renders from a
//! [`RootState`](crate::RootState) snapshot and dispatches store operations
//! in response to user actions; form state stays local to the page.

mod auth;
mod dashboard;
mod entries;
mod layout;
mod reports;

pub use auth::{AuthView, LoginPage, RegisterPage};
pub use dashboard::{DashboardCard, DashboardPage};
pub use entries::{DialogMode, EntriesPage, EntriesView, EntryDraft, EntryRow};
pub use layout::{Layout, MenuItem};
pub use reports::{MonthlyRow, ReportsPage, ReportsTab, ReportsView, WeeklyRow};

use crate::Route;

/// Where the application should go once a page action settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    To(Route),
}

/// Interactive yes/no prompt shown before destructive actions.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}
