use crate::{ApiClient, ApiRequest, ApiResult, DailyEntry, EntryFields, EntryPatch};
use chrono::NaiveDate;

/// `/entries` resource. Every call is authenticated.
#[derive(Debug, Clone)]
pub struct EntriesService {
    client: ApiClient,
}

impl EntriesService {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<Vec<DailyEntry>> {
        self.client.fetch_list(ApiRequest::get("/entries")).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<DailyEntry> {
        self.client
            .fetch_json(ApiRequest::get(format!("/entries/{id}")))
            .await
    }

    pub async fn create(&self, fields: &EntryFields) -> ApiResult<DailyEntry> {
        self.client
            .fetch_json(ApiRequest::post("/entries").json(fields)?)
            .await
    }

    pub async fn update(&self, id: &str, patch: &EntryPatch) -> ApiResult<DailyEntry> {
        self.client
            .fetch_json(ApiRequest::put(format!("/entries/{id}")).json(patch)?)
            .await
    }

    /// The backend answers `204 No Content`; any body is ignored.
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client
            .send_authenticated(ApiRequest::delete(format!("/entries/{id}")))
            .await?;
        Ok(())
    }

    /// Full-text search over the entry fields.
    pub async fn search(&self, query: &str) -> ApiResult<Vec<DailyEntry>> {
        self.client
            .fetch_list(ApiRequest::get("/entries/search").query("query", query))
            .await
    }

    /// Entries whose date lies within `start..=end`.
    pub async fn filter(&self, start: NaiveDate, end: NaiveDate) -> ApiResult<Vec<DailyEntry>> {
        self.client
            .fetch_list(
                ApiRequest::get("/entries/filter")
                    .query("startDate", start)
                    .query("endDate", end),
            )
            .await
    }
}
