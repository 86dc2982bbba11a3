//! Client configuration loaded from the environment.
//!
//! A `.env` file in the working directory is honoured outside of tests.

use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TOKEN_PATH: &str = ".scrummate/token.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin of the backend, without the `/api/v1` prefix.
    pub base_url: String,
    /// Where the auth token is persisted between runs.
    pub token_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        Self::from_vars(
            std::env::var("SCRUMMATE_BASE_URL").ok(),
            std::env::var("SCRUMMATE_TOKEN_PATH").ok(),
        )
    }

    fn from_vars(
        base_url: Option<String>,
        token_path: Option<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue(
                "SCRUMMATE_BASE_URL".to_string(),
                format!("'{base_url}' must start with http:// or https://"),
            ));
        }

        let token_path = token_path
            .filter(|path| !path.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_TOKEN_PATH), PathBuf::from);

        Ok(Self {
            base_url,
            token_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = ClientConfig::from_vars(None, None).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn base_url_is_trimmed_and_validated() {
        let config =
            ClientConfig::from_vars(Some("https://scrum.example.com/".to_string()), None).unwrap();
        assert_eq!(config.base_url, "https://scrum.example.com");

        let err = ClientConfig::from_vars(Some("scrum.example.com".to_string()), None)
            .expect_err("scheme is required");
        assert!(matches!(err, ConfigError::InvalidValue(name, _) if name == "SCRUMMATE_BASE_URL"));
    }
}
