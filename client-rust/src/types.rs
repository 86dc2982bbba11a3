use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Body returned by both `/auth/login` and `/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub full_name: String,
}

/// An authenticated user as held by the client. Exists only while a token
/// is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub email: String,
    pub full_name: String,
    pub token: String,
}

impl From<AuthResponse> for Session {
    fn from(response: AuthResponse) -> Self {
        Self {
            email: response.email,
            full_name: response.full_name,
            token: response.token,
        }
    }
}

/// A user's work log for a single day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyEntry {
    pub id: String,
    pub entry_date: NaiveDate,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub yesterday_work: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub today_plan: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub blockers: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl DailyEntry {
    /// The user-editable part of the entry.
    #[must_use]
    pub fn fields(&self) -> EntryFields {
        EntryFields {
            entry_date: self.entry_date,
            yesterday_work: self.yesterday_work.clone(),
            today_plan: self.today_plan.clone(),
            blockers: self.blockers.clone(),
        }
    }
}

/// Body of `POST /entries`. The server assigns id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EntryFields {
    pub entry_date: NaiveDate,
    pub yesterday_work: String,
    pub today_plan: String,
    pub blockers: String,
}

/// Body of `PUT /entries/{id}`. Absent fields are not sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EntryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yesterday_work: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today_plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockers: Option<String>,
}

impl From<EntryFields> for EntryPatch {
    fn from(fields: EntryFields) -> Self {
        Self {
            entry_date: Some(fields.entry_date),
            yesterday_work: Some(fields.yesterday_work),
            today_plan: Some(fields.today_plan),
            blockers: Some(fields.blockers),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub id: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub id: String,
    pub month: u32,
    pub year: i32,
    /// Aggregated report payload. Its shape is owned by the backend.
    #[serde(default)]
    pub report_data: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<NaiveDateTime>,
}

impl MonthlyReport {
    #[must_use]
    pub fn total_weeks(&self) -> u64 {
        self.report_data
            .as_ref()
            .and_then(|data| data.get("totalWeeks"))
            .and_then(Value::as_u64)
            .unwrap_or(0)
    }
}

/// List endpoints answer either with a bare array or with a paginated
/// envelope. The envelope's `content` wins when present.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Page { content: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Page { content } | Self::Bare(content) => content,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl HealthStatus {
    #[must_use]
    pub fn is_up(&self) -> bool {
        matches!(self.status.as_str(), "UP" | "READY" | "ALIVE")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_response_prefers_content_envelope() {
        let paged: ListResponse<u32> =
            serde_json::from_value(json!({ "content": [1, 2], "totalElements": 2 })).unwrap();
        assert_eq!(paged.into_items(), vec![1, 2]);

        let bare: ListResponse<u32> = serde_json::from_value(json!([3])).unwrap();
        assert_eq!(bare.into_items(), vec![3]);
    }

    #[test]
    fn daily_entry_decodes_null_text_as_empty() {
        let entry: DailyEntry = serde_json::from_value(json!({
            "id": "a1",
            "entryDate": "2024-01-15",
            "yesterdayWork": null,
            "todayPlan": "B",
            "createdAt": "2024-01-15T09:30:00.123456",
            "updatedAt": "2024-01-15T09:30:00"
        }))
        .unwrap();

        assert_eq!(entry.yesterday_work, "");
        assert_eq!(entry.today_plan, "B");
        assert_eq!(entry.blockers, "");
        assert!(entry.created_at.is_some());
    }

    #[test]
    fn entry_patch_omits_absent_fields() {
        let patch = EntryPatch {
            blockers: Some("none".to_string()),
            ..EntryPatch::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "blockers": "none" }));
    }

    #[test]
    fn monthly_report_total_weeks_defaults_to_zero() {
        let report: MonthlyReport = serde_json::from_value(json!({
            "id": "r1",
            "month": 3,
            "year": 2024,
            "reportData": null
        }))
        .unwrap();
        assert_eq!(report.total_weeks(), 0);

        let report: MonthlyReport = serde_json::from_value(json!({
            "id": "r2",
            "month": 3,
            "year": 2024,
            "reportData": { "totalWeeks": 4 }
        }))
        .unwrap();
        assert_eq!(report.total_weeks(), 4);
    }
}
