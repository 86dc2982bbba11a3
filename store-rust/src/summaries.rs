use crate::{calendar, Action, Store, StoreResult};
use chrono::NaiveDate;
use scrummate_client::{MonthlyReport, SummariesService, WeeklySummary};
use serde_json::Value;

/// Weekly summaries and monthly reports. Append-only from the client's
/// side: records are generated or listed, never edited or removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummariesState {
    pub weekly_summaries: Vec<WeeklySummary>,
    pub monthly_reports: Vec<MonthlyReport>,
    pub is_loading: bool,
    /// Recorded on rejection. Rendering it is up to the consuming view.
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SummariesAction {
    Pending,
    WeeklyLoaded(Vec<WeeklySummary>),
    WeeklyGenerated(WeeklySummary),
    MonthlyLoaded(Vec<MonthlyReport>),
    MonthlyGenerated(MonthlyReport),
    Rejected(String),
    ClearError,
}

impl SummariesAction {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "summaries/pending",
            Self::WeeklyLoaded(_) => "summaries/fetchWeeklySummaries/fulfilled",
            Self::WeeklyGenerated(_) => "summaries/generateWeeklySummary/fulfilled",
            Self::MonthlyLoaded(_) => "summaries/fetchMonthlyReports/fulfilled",
            Self::MonthlyGenerated(_) => "summaries/generateMonthlyReport/fulfilled",
            Self::Rejected(_) => "summaries/rejected",
            Self::ClearError => "summaries/clearError",
        }
    }
}

pub fn reduce(state: &mut SummariesState, action: SummariesAction) {
    match action {
        SummariesAction::Pending => {
            state.is_loading = true;
            state.error = None;
        }
        SummariesAction::WeeklyLoaded(summaries) => {
            state.weekly_summaries = summaries;
            state.is_loading = false;
        }
        // Generated records are prepended even when the same period is
        // already held; duplicates are the backend's call.
        SummariesAction::WeeklyGenerated(summary) => {
            state.weekly_summaries.insert(0, summary);
            state.is_loading = false;
        }
        SummariesAction::MonthlyLoaded(reports) => {
            state.monthly_reports = reports;
            state.is_loading = false;
        }
        SummariesAction::MonthlyGenerated(report) => {
            state.monthly_reports.insert(0, report);
            state.is_loading = false;
        }
        SummariesAction::Rejected(message) => {
            state.is_loading = false;
            state.error = Some(message);
        }
        SummariesAction::ClearError => state.error = None,
    }
}

#[derive(Debug, Clone)]
pub struct SummariesSlice {
    store: Store,
    api: SummariesService,
}

impl SummariesSlice {
    pub fn new(store: Store, api: SummariesService) -> Self {
        Self { store, api }
    }

    pub async fn fetch_weekly(&self) -> StoreResult<Vec<WeeklySummary>> {
        self.store
            .run(
                "summaries",
                "fetchWeeklySummaries",
                SummariesAction::Pending.into(),
                self.api.list_weekly(),
                |summaries| Action::Summaries(SummariesAction::WeeklyLoaded(summaries.clone())),
                rejected,
            )
            .await
    }

    /// Ask the backend to summarize the week starting on `week_start`.
    /// Use [`SummariesSlice::generate_current_week`] to anchor on a Monday.
    pub async fn generate_weekly(&self, week_start: NaiveDate) -> StoreResult<WeeklySummary> {
        self.store
            .run(
                "summaries",
                "generateWeeklySummary",
                SummariesAction::Pending.into(),
                self.api.generate_weekly(week_start),
                |summary| Action::Summaries(SummariesAction::WeeklyGenerated(summary.clone())),
                rejected,
            )
            .await
    }

    pub async fn generate_current_week(&self, today: NaiveDate) -> StoreResult<WeeklySummary> {
        self.generate_weekly(calendar::week_start(today)).await
    }

    pub async fn fetch_monthly(&self) -> StoreResult<Vec<MonthlyReport>> {
        self.store
            .run(
                "summaries",
                "fetchMonthlyReports",
                SummariesAction::Pending.into(),
                self.api.list_monthly(),
                |reports| Action::Summaries(SummariesAction::MonthlyLoaded(reports.clone())),
                rejected,
            )
            .await
    }

    pub async fn generate_monthly(&self, month: u32, year: i32) -> StoreResult<MonthlyReport> {
        self.store
            .run(
                "summaries",
                "generateMonthlyReport",
                SummariesAction::Pending.into(),
                self.api.generate_monthly(month, year),
                |report| Action::Summaries(SummariesAction::MonthlyGenerated(report.clone())),
                rejected,
            )
            .await
    }

    pub async fn generate_current_month(&self, today: NaiveDate) -> StoreResult<MonthlyReport> {
        let (month, year) = calendar::current_month(today);
        self.generate_monthly(month, year).await
    }

    /// Export payload of a monthly report. The slice is left untouched.
    pub async fn export_monthly(&self, id: &str) -> StoreResult<Value> {
        Ok(self.api.export_monthly(id).await?)
    }

    pub fn clear_error(&self) {
        self.store.dispatch(SummariesAction::ClearError);
    }
}

fn rejected(message: String) -> Action {
    Action::Summaries(SummariesAction::Rejected(message))
}
