use serde::Deserialize;
use thiserror::Error;

/// Result type alias for platform calls
pub type Result<T> = std::result::Result<T, AppwriteError>;

/// Appwrite Client Error Types
#[derive(Error, Debug)]
pub enum AppwriteError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Appwrite API error ({code} {kind}): {message}")]
    Api {
        code: u16,
        kind: String,
        message: String,
    },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error body returned by the platform on non-2xx responses
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
    pub code: u16,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl AppwriteError {
    /// HTTP status code carried by the error, if the platform answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { code, .. } => Some(*code),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// No session, or the session cannot access the resource
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status_code(), Some(401))
    }

    /// Transient failure: worth retrying by the caller
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Api { code, .. } => matches!(code, 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }
}
