use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request could not be sent or the response body could not be
    /// read.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-2xx status. The message is the one
    /// provided by the server when the body carries one.
    #[error("{1} (Status {0})")]
    StatusCode(reqwest::StatusCode, String),
    /// A 2xx body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),
    /// An authenticated endpoint was called while no token is persisted.
    #[error("No authentication token is available")]
    Unauthenticated,
    /// The persisted token slot could not be read or written.
    #[error("Token storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// The human readable message to surface to a user. For status errors
    /// this is the server-provided message verbatim.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::StatusCode(_, message) => message.clone(),
            other => other.to_string(),
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::StatusCode(status, _) => Some(*status),
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
