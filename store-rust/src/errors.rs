use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("API error: {0}")]
    Api(#[from] scrummate_client::ApiError),
}

impl StoreError {
    /// Message recorded in a slice's `error` field when the operation is
    /// rejected.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
