use crate::{RootState, StoreResult, SummariesSlice};
use chrono::{Month, NaiveDate};
use scrummate_client::{MonthlyReport, WeeklySummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportsTab {
    #[default]
    Weekly,
    Monthly,
}

impl ReportsTab {
    /// Tab index as shown left to right. Out-of-range indices select nothing.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Weekly),
            1 => Some(Self::Monthly),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Weekly => "Weekly Summaries",
            Self::Monthly => "Monthly Reports",
        }
    }

    #[must_use]
    pub fn generate_label(self) -> &'static str {
        match self {
            Self::Weekly => "Generate This Week",
            Self::Monthly => "Generate This Month",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyRow {
    pub id: String,
    pub heading: String,
    pub generated: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyRow {
    pub id: String,
    pub heading: String,
    pub generated: Option<String>,
    pub total_weeks: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportsView {
    Weekly {
        rows: Vec<WeeklyRow>,
        is_loading: bool,
        error: Option<String>,
    },
    Monthly {
        rows: Vec<MonthlyRow>,
        is_loading: bool,
        error: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct ReportsPage {
    summaries: SummariesSlice,
    tab: ReportsTab,
}

impl ReportsPage {
    pub fn new(summaries: SummariesSlice) -> Self {
        Self {
            summaries,
            tab: ReportsTab::Weekly,
        }
    }

    #[must_use]
    pub fn tab(&self) -> ReportsTab {
        self.tab
    }

    pub fn select_tab(&mut self, index: usize) {
        if let Some(tab) = ReportsTab::from_index(index) {
            self.tab = tab;
        }
    }

    /// Both lists are requested together; each settles independently.
    pub async fn on_mount(
        &self,
    ) -> (StoreResult<Vec<WeeklySummary>>, StoreResult<Vec<MonthlyReport>>) {
        futures::join!(self.summaries.fetch_weekly(), self.summaries.fetch_monthly())
    }

    pub async fn generate_weekly(&self, today: NaiveDate) -> StoreResult<WeeklySummary> {
        self.summaries.generate_current_week(today).await
    }

    pub async fn generate_monthly(&self, today: NaiveDate) -> StoreResult<MonthlyReport> {
        self.summaries.generate_current_month(today).await
    }

    #[must_use]
    pub fn view(&self, state: &RootState) -> ReportsView {
        let slice = &state.summaries;
        match self.tab {
            ReportsTab::Weekly => ReportsView::Weekly {
                rows: slice.weekly_summaries.iter().map(weekly_row).collect(),
                is_loading: slice.is_loading,
                error: slice.error.clone(),
            },
            ReportsTab::Monthly => ReportsView::Monthly {
                rows: slice.monthly_reports.iter().map(monthly_row).collect(),
                is_loading: slice.is_loading,
                error: slice.error.clone(),
            },
        }
    }
}

fn weekly_row(summary: &WeeklySummary) -> WeeklyRow {
    WeeklyRow {
        id: summary.id.clone(),
        heading: format!("Week of {} to {}", summary.week_start, summary.week_end),
        generated: summary
            .generated_at
            .map(|at| at.date().format("%Y-%m-%d").to_string()),
        text: summary.summary_text.clone(),
    }
}

fn monthly_row(report: &MonthlyReport) -> MonthlyRow {
    let month = u8::try_from(report.month)
        .ok()
        .and_then(|month| Month::try_from(month).ok());
    let heading = match month {
        Some(month) => format!("{} {}", month.name(), report.year),
        None => format!("{}/{}", report.month, report.year),
    };

    MonthlyRow {
        id: report.id.clone(),
        heading,
        generated: report
            .generated_at
            .map(|at| at.date().format("%Y-%m-%d").to_string()),
        total_weeks: report.total_weeks(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_index_maps_to_views() {
        assert_eq!(ReportsTab::from_index(0), Some(ReportsTab::Weekly));
        assert_eq!(ReportsTab::from_index(1), Some(ReportsTab::Monthly));
        assert_eq!(ReportsTab::from_index(2), None);
    }

    #[test]
    fn monthly_heading_uses_month_name() {
        let report = MonthlyReport {
            id: "m".to_string(),
            month: 3,
            year: 2024,
            report_data: None,
            generated_at: None,
        };
        let row = monthly_row(&report);
        assert_eq!(row.heading, "March 2024");
        assert_eq!(row.total_weeks, 0);
    }
}
