use crate::{
    client_utils::{build_request, read_json},
    opentelemetry::RequestSpan,
    ApiError, ApiRequest, ApiResponse, ApiResult, Transport,
};
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, warn};

/// [`Transport`] backed by reqwest. No timeout is configured beyond the
/// reqwest defaults.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    /// `base_url` is the backend origin, e.g. `http://localhost:8080`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let span = RequestSpan::new(&request);
        let started = Instant::now();

        let result = span
            .instrument_future(async {
                debug!(method = %request.method, path = %request.full_path(), "sending request");
                let response = build_request(&self.client, &self.base_url, &request)
                    .send()
                    .await?;
                let (status, body) = read_json(response).await?;
                Ok::<_, ApiError>(ApiResponse {
                    status,
                    body,
                    elapsed: started.elapsed(),
                })
            })
            .await;

        match &result {
            Ok(response) => span.on_response(response),
            Err(error) => {
                warn!(
                    method = %request.method,
                    path = %request.full_path(),
                    "request failed: {error}"
                );
                span.on_error(error);
            }
        }

        result
    }
}
