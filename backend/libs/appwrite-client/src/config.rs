/// Platform connection configuration
use serde::{Deserialize, Serialize};

use crate::error::{AppwriteError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppwriteConfig {
    /// API endpoint, including the `/v1` suffix
    pub endpoint: String,
    /// Project the client acts on
    pub project_id: String,
    /// Locale forwarded with every request
    pub locale: Option<String>,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl AppwriteConfig {
    pub fn new(endpoint: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            project_id: project_id.into(),
            locale: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let endpoint = std::env::var("APPWRITE_ENDPOINT")
            .map_err(|_| AppwriteError::Config("APPWRITE_ENDPOINT not set".to_string()))?;
        let project_id = std::env::var("APPWRITE_PROJECT_ID")
            .map_err(|_| AppwriteError::Config("APPWRITE_PROJECT_ID not set".to_string()))?;

        Ok(Self {
            endpoint,
            project_id,
            locale: std::env::var("APPWRITE_LOCALE").ok(),
            timeout_secs: std::env::var("APPWRITE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_timeout_secs),
        })
    }

    /// Endpoint without trailing slash
    pub fn base_url(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        std::env::set_var("APPWRITE_ENDPOINT", "https://cloud.appwrite.io/v1");
        std::env::set_var("APPWRITE_PROJECT_ID", "snap");
        std::env::remove_var("APPWRITE_LOCALE");
        std::env::remove_var("APPWRITE_TIMEOUT_SECS");

        let config = AppwriteConfig::from_env().unwrap();

        assert_eq!(config.endpoint, "https://cloud.appwrite.io/v1");
        assert_eq!(config.project_id, "snap");
        assert_eq!(config.locale, None);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    #[serial]
    fn test_from_env_missing_project() {
        std::env::set_var("APPWRITE_ENDPOINT", "https://cloud.appwrite.io/v1");
        std::env::remove_var("APPWRITE_PROJECT_ID");

        let err = AppwriteConfig::from_env().unwrap_err();
        assert!(matches!(err, AppwriteError::Config(_)));
    }

    #[test]
    fn test_base_url_trims_slash() {
        let config = AppwriteConfig::new("http://localhost/v1/", "p");
        assert_eq!(config.base_url(), "http://localhost/v1");
    }
}
