use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::NaiveDate;
use scrummate_client::{ApiClient, ApiError, HttpTransport, MemoryTokenStore, TokenStore};
use serde::Deserialize;
use serde_json::{json, Value};
use std::{collections::HashMap, sync::Arc};

const TOKEN: &str = "jwt-token";

fn entry_json(id: &str) -> Value {
    json!({
        "id": id,
        "entryDate": "2024-01-15",
        "yesterdayWork": "A",
        "todayPlan": "B",
        "blockers": "none",
        "createdAt": "2024-01-15T09:00:00",
        "updatedAt": "2024-01-15T09:00:00"
    })
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {TOKEN}"))
}

#[derive(Deserialize)]
struct Credentials {
    email: String,
    password: String,
}

async fn login(Json(credentials): Json<Credentials>) -> impl IntoResponse {
    if credentials.password == "password123" {
        (
            StatusCode::OK,
            Json(json!({ "token": TOKEN, "email": credentials.email, "fullName": "Test User" })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "status": 401,
                "error": "Unauthorized",
                "message": "Invalid credentials"
            })),
        )
    }
}

async fn list_entries(headers: HeaderMap) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::FORBIDDEN, Json(json!({ "error": "Forbidden" })));
    }
    (
        StatusCode::OK,
        Json(json!({ "content": [entry_json("1"), entry_json("2")], "totalElements": 2 })),
    )
}

async fn delete_entry(headers: HeaderMap, Path(_id): Path<String>) -> StatusCode {
    if authorized(&headers) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::FORBIDDEN
    }
}

async fn generate_weekly(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let week_start = params.get("weekStart").cloned().unwrap_or_default();
    Json(json!({
        "id": "w1",
        "weekStart": week_start,
        "weekEnd": "2024-01-21",
        "summaryText": "Summary",
        "generatedAt": "2024-01-19T17:00:00"
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "UP", "database": "UP", "timestamp": 1_700_000_000_000_i64 }))
}

async fn spawn_server() -> String {
    let app = Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/entries", get(list_entries))
        .route("/api/v1/entries/{id}", delete(delete_entry))
        .route("/api/v1/summaries/weekly/generate", post(generate_weekly))
        .route("/health", get(health));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind random port");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn client() -> ApiClient {
    let base_url = spawn_server().await;
    ApiClient::new(
        Arc::new(HttpTransport::new(base_url)),
        Arc::new(MemoryTokenStore::new()),
    )
}

#[tokio::test]
async fn login_returns_token_and_profile() {
    let client = client().await;
    let auth = client
        .auth()
        .login("user1@test.com", "password123")
        .await
        .expect("login succeeds");

    assert_eq!(auth.token, TOKEN);
    assert_eq!(auth.email, "user1@test.com");
    assert_eq!(auth.full_name, "Test User");
}

#[tokio::test]
async fn login_failure_carries_server_message() {
    let client = client().await;
    let err = client
        .auth()
        .login("user1@test.com", "wrong")
        .await
        .expect_err("login fails");

    match &err {
        ApiError::StatusCode(status, message) => {
            assert_eq!(*status, StatusCode::UNAUTHORIZED);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.user_message(), "Invalid credentials");
}

#[tokio::test]
async fn authenticated_list_sends_bearer_and_unwraps_page() {
    let client = client().await;
    client.tokens().save(TOKEN).unwrap();

    let entries = client.entries().list().await.expect("list succeeds");
    let ids: Vec<_> = entries.iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(
        entries[0].entry_date,
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    );
}

#[tokio::test]
async fn wrong_token_surfaces_status_error() {
    let client = client().await;
    client.tokens().save("expired").unwrap();

    let err = client.entries().list().await.expect_err("forbidden");
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    assert_eq!(err.user_message(), "Forbidden");
}

#[tokio::test]
async fn missing_token_fails_before_sending() {
    let client = client().await;
    let err = client.entries().list().await.expect_err("no token");
    assert!(matches!(err, ApiError::Unauthenticated));
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let client = client().await;
    client.tokens().save(TOKEN).unwrap();
    client
        .entries()
        .delete("42")
        .await
        .expect("204 is a success");
}

#[tokio::test]
async fn generate_weekly_sends_iso_week_start() {
    let client = client().await;
    client.tokens().save(TOKEN).unwrap();

    let summary = client
        .summaries()
        .generate_weekly(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        .await
        .expect("generate succeeds");
    assert_eq!(
        summary.week_start,
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    );
}

#[tokio::test]
async fn health_check_is_outside_api_prefix() {
    let client = client().await;
    let status = client.health().health().await.expect("health succeeds");
    assert!(status.is_up());
    assert_eq!(status.database.as_deref(), Some("UP"));
}
