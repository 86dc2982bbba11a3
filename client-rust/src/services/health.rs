use crate::{ApiClient, ApiRequest, ApiResult, HealthStatus};
use reqwest::Method;

/// Unauthenticated health checks served outside the API prefix.
#[derive(Debug, Clone)]
pub struct HealthService {
    client: ApiClient,
}

impl HealthService {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn health(&self) -> ApiResult<HealthStatus> {
        self.check("/health").await
    }

    pub async fn ready(&self) -> ApiResult<HealthStatus> {
        self.check("/health/ready").await
    }

    pub async fn live(&self) -> ApiResult<HealthStatus> {
        self.check("/health/live").await
    }

    async fn check(&self, path: &str) -> ApiResult<HealthStatus> {
        self.client
            .send_public(ApiRequest::root(Method::GET, path))
            .await?
            .decode()
    }
}
