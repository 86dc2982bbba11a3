use async_trait::async_trait;
use scrummate_client::{
    ApiError, ApiRequest, ApiResponse, ApiResult, MemoryTokenStore, StatusCode, TokenStore,
    Transport,
};
use scrummate_store::App;
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::sync::oneshot;

/// Transport holding each request until the test releases its response.
/// Requests are matched to their gate by the `email` of the body.
#[derive(Default)]
struct GatedTransport {
    gates: Mutex<HashMap<String, oneshot::Receiver<Value>>>,
    in_flight: Mutex<usize>,
}

impl GatedTransport {
    fn gate(&self, email: &str) -> oneshot::Sender<Value> {
        let (sender, receiver) = oneshot::channel();
        self.gates
            .lock()
            .unwrap()
            .insert(email.to_string(), receiver);
        sender
    }

    fn in_flight(&self) -> usize {
        *self.in_flight.lock().unwrap()
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let email = request
            .body
            .as_ref()
            .and_then(|body| body["email"].as_str())
            .unwrap_or_default()
            .to_string();
        let gate = self.gates.lock().unwrap().remove(&email);
        let gate = gate.ok_or_else(|| ApiError::Decode(format!("no gate for {email}")))?;
        *self.in_flight.lock().unwrap() += 1;

        let body = gate
            .await
            .map_err(|_| ApiError::Decode("gate dropped".to_string()))?;
        Ok(ApiResponse {
            status: StatusCode::OK,
            body,
            elapsed: Duration::ZERO,
        })
    }
}

fn auth_body(token: &str, email: &str) -> Value {
    json!({ "token": token, "email": email, "fullName": email })
}

#[tokio::test]
async fn later_settling_login_wins_over_later_request() {
    let transport = Arc::new(GatedTransport::default());
    let tokens = Arc::new(MemoryTokenStore::new());
    let app = App::with_parts(transport.clone(), tokens.clone());

    let release_a = transport.gate("a@example.com");
    let release_b = transport.gate("b@example.com");

    let first = app.auth().login("a@example.com", "pw");
    let second = app.auth().login("b@example.com", "pw");
    let release = async {
        while transport.in_flight() < 2 {
            tokio::task::yield_now().await;
        }
        release_b.send(auth_body("tb", "b@example.com")).unwrap();
        while app.store().state().auth.token.as_deref() != Some("tb") {
            tokio::task::yield_now().await;
        }
        release_a.send(auth_body("ta", "a@example.com")).unwrap();
    };

    let (first, second, ()) = tokio::join!(first, second, release);
    assert_eq!(first.unwrap().token, "ta");
    assert_eq!(second.unwrap().token, "tb");

    let state = app.store().state();
    assert_eq!(state.auth.token.as_deref(), Some("ta"));
    assert_eq!(
        state.auth.user.map(|user| user.email).as_deref(),
        Some("a@example.com")
    );
    assert!(!state.auth.is_loading);
    assert_eq!(tokens.load().unwrap().as_deref(), Some("ta"));
}
