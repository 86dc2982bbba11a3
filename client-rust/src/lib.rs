mod client_utils;
pub mod config;
mod errors;
mod http;
pub mod load_test;
mod opentelemetry;
pub mod scrummate_client_test;
mod services;
mod token_store;
mod transport;
mod types;

pub use config::{ClientConfig, ConfigError};
pub use errors::*;
pub use http::HttpTransport;
pub use services::{ApiClient, AuthService, EntriesService, HealthService, SummariesService};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use transport::{ApiRequest, ApiResponse, Transport, API_PREFIX};
pub use types::*;

pub use reqwest::{Method, StatusCode};
