use crate::{ApiClient, ApiRequest, ApiResult, MonthlyReport, WeeklySummary};
use chrono::NaiveDate;
use serde_json::Value;

/// Weekly summaries and monthly reports. Generation is not idempotent on
/// the client side: each call asks the backend for a new record.
#[derive(Debug, Clone)]
pub struct SummariesService {
    client: ApiClient,
}

impl SummariesService {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_weekly(&self) -> ApiResult<Vec<WeeklySummary>> {
        self.client
            .fetch_list(ApiRequest::get("/summaries/weekly"))
            .await
    }

    pub async fn generate_weekly(&self, week_start: NaiveDate) -> ApiResult<WeeklySummary> {
        self.client
            .fetch_json(
                ApiRequest::post("/summaries/weekly/generate")
                    .query("weekStart", week_start.format("%Y-%m-%d")),
            )
            .await
    }

    pub async fn list_monthly(&self) -> ApiResult<Vec<MonthlyReport>> {
        self.client
            .fetch_list(ApiRequest::get("/reports/monthly"))
            .await
    }

    pub async fn generate_monthly(&self, month: u32, year: i32) -> ApiResult<MonthlyReport> {
        self.client
            .fetch_json(
                ApiRequest::post("/reports/monthly/generate")
                    .query("month", month)
                    .query("year", year),
            )
            .await
    }

    pub async fn export_monthly(&self, id: &str) -> ApiResult<Value> {
        self.client
            .fetch_json(ApiRequest::get(format!("/reports/monthly/{id}/export")))
            .await
    }
}
