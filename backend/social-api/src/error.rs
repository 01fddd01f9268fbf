/// Error types for social-api
use appwrite_client::AppwriteError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Backend error: {0}")]
    Backend(AppwriteError),

    #[error("No active session")]
    Unauthenticated,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<AppwriteError> for ServiceError {
    fn from(err: AppwriteError) -> Self {
        if err.is_unauthorized() {
            return ServiceError::Unauthenticated;
        }
        match err {
            AppwriteError::Api { code: 404, message, .. } => ServiceError::NotFound(message),
            AppwriteError::Config(msg) => ServiceError::Config(msg),
            other => ServiceError::Backend(other),
        }
    }
}

impl ServiceError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::Backend(e) if e.is_retryable())
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
