use std::{collections::VecDeque, sync::Mutex, time::Duration};

use reqwest::StatusCode;
use serde_json::Value;

use crate::{ApiError, ApiRequest, ApiResponse, ApiResult, Transport};

/// Result for a mocked `send` call.
/// It can either be a response to return or an error.
pub enum MockResult {
    Response(ApiResponse),
    Error(ApiError),
}

impl MockResult {
    /// A `200 OK` response carrying the given JSON body.
    pub fn json(body: Value) -> Self {
        Self::with_status(StatusCode::OK, body)
    }

    /// A successful response with an explicit status.
    pub fn with_status(status: StatusCode, body: Value) -> Self {
        Self::Response(ApiResponse {
            status,
            body,
            elapsed: Duration::ZERO,
        })
    }

    /// A `204 No Content` response.
    pub fn no_content() -> Self {
        Self::with_status(StatusCode::NO_CONTENT, Value::Null)
    }

    /// A non-2xx answer carrying the server message.
    pub fn status_error(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Error(ApiError::StatusCode(status, message.into()))
    }

    /// Construct a result that yields the provided error.
    pub fn error(error: ApiError) -> Self {
        Self::Error(error)
    }
}

impl From<ApiResponse> for MockResult {
    fn from(response: ApiResponse) -> Self {
        Self::Response(response)
    }
}

impl From<ApiError> for MockResult {
    fn from(error: ApiError) -> Self {
        Self::Error(error)
    }
}

#[derive(Default)]
struct MockTransportState {
    mocked_results: VecDeque<MockResult>,
    tracked_requests: Vec<ApiRequest>,
}

/// A mock transport for testing that tracks requests and yields predefined
/// results in FIFO order.
#[derive(Default)]
pub struct MockTransport {
    state: Mutex<MockTransportState>,
}

impl MockTransport {
    /// Construct a new mock transport instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue one or more mocked results.
    pub fn enqueue_results<I>(&self, results: I) -> &Self
    where
        I: IntoIterator<Item = MockResult>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_results.extend(results);
        drop(state);
        self
    }

    /// Convenience to enqueue a single mocked result.
    pub fn enqueue<R>(&self, result: R) -> &Self
    where
        R: Into<MockResult>,
    {
        self.enqueue_results(std::iter::once(result.into()))
    }

    /// Retrieve the tracked requests accumulated so far.
    pub fn tracked_requests(&self) -> Vec<ApiRequest> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_requests.clone()
    }

    /// Number of enqueued results not consumed yet.
    pub fn pending_results(&self) -> usize {
        let state = self.state.lock().expect("mock state poisoned");
        state.mocked_results.len()
    }

    /// Clear both tracked requests and enqueued results.
    pub fn restore(&self) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_results.clear();
        state.tracked_requests.clear();
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_requests.push(request);

        let result = state
            .mocked_results
            .pop_front()
            .ok_or_else(|| ApiError::Decode("no mocked results available".into()))?;

        match result {
            MockResult::Response(response) => Ok(response),
            MockResult::Error(error) => Err(error),
        }
    }
}
