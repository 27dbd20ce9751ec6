pub use log::{debug, error, info, trace, warn};

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("HTTP request timed out")]
    Timeout,
    #[error("Server responded with {status}: {body:?}")]
    Status { status: StatusCode, body: String },
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Server reported failure: {}", .reason.as_deref().unwrap_or("no reason given"))]
    Unsuccessful { reason: Option<String> },
    #[error("No plan named {0:?}")]
    PlanNotFound(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else {
            Error::Transport(err)
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
