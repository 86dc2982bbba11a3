use crate::ApiResult;
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Path prefix of every REST resource on the backend.
pub const API_PREFIX: &str = "/api/v1";

/// A request against the backend, independent of the HTTP implementation.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API prefix, or to the origin when `rooted`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Bearer token to send in the `Authorization` header.
    pub bearer: Option<String>,
    /// The path is not under [`API_PREFIX`] (health checks).
    pub rooted: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
            rooted: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// A request whose path is taken from the origin rather than the API
    /// prefix.
    pub fn root(method: Method, path: impl Into<String>) -> Self {
        Self {
            rooted: true,
            ..Self::new(method, path)
        }
    }

    #[must_use]
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> ApiResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    #[must_use]
    pub fn bearer(mut self, token: String) -> Self {
        self.bearer = Some(token);
        self
    }

    /// Full path as sent on the wire, prefix included.
    #[must_use]
    pub fn full_path(&self) -> String {
        if self.rooted {
            self.path.clone()
        } else {
            format!("{API_PREFIX}{}", self.path)
        }
    }
}

/// A successful (2xx) response. Empty bodies are represented as JSON `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
    pub elapsed: Duration,
}

impl ApiResponse {
    pub fn decode<R: DeserializeOwned>(self) -> ApiResult<R> {
        Ok(serde_json::from_value(self.body)?)
    }
}

/// Sends requests to the backend. Implementations must map non-2xx
/// responses to [`crate::ApiError::StatusCode`].
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse>;
}
