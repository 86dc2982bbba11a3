mod auth;
mod entries;
mod health;
mod summaries;

pub use auth::AuthService;
pub use entries::EntriesService;
pub use health::HealthService;
pub use summaries::SummariesService;

use crate::{ApiError, ApiRequest, ApiResponse, ApiResult, ListResponse, TokenStore, Transport};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Shared handle over the transport and the persisted token slot. Cloning
/// is cheap; all services built from one client see the same token.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { transport, tokens }
    }

    #[must_use]
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    #[must_use]
    pub fn auth(&self) -> AuthService {
        AuthService::new(self.clone())
    }

    #[must_use]
    pub fn entries(&self) -> EntriesService {
        EntriesService::new(self.clone())
    }

    #[must_use]
    pub fn summaries(&self) -> SummariesService {
        SummariesService::new(self.clone())
    }

    #[must_use]
    pub fn health(&self) -> HealthService {
        HealthService::new(self.clone())
    }

    /// Send without credentials.
    pub(crate) async fn send_public(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        self.transport.send(request).await
    }

    /// Send with the bearer token read from the token store at call time.
    pub(crate) async fn send_authenticated(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let token = self.tokens.load()?.ok_or(ApiError::Unauthenticated)?;
        self.transport.send(request.bearer(token)).await
    }

    pub(crate) async fn fetch_json<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> ApiResult<R> {
        self.send_authenticated(request).await?.decode()
    }

    pub(crate) async fn fetch_list<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> ApiResult<Vec<R>> {
        let list: ListResponse<R> = self.send_authenticated(request).await?.decode()?;
        Ok(list.into_items())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}
