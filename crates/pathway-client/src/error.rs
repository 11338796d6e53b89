use pathway_core::BackendError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid base url: {0}")]
    BaseUrl(String),

    /// Transport-level failure: DNS, connect, timeout, body read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; `message` comes from the `{ message }` error body
    /// when the server sent one, else the status line.
    #[error("{message}")]
    Api { status: u16, message: String },
}

impl From<ApiError> for BackendError {
    fn from(e: ApiError) -> Self {
        BackendError::new(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
