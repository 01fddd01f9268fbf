/// Configuration management for the social data layer
///
/// Loads configuration from environment variables.
use anyhow::{Context, Result};
use appwrite_client::{AppwriteConfig, PreviewOptions};
use serde::{Deserialize, Serialize};

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Platform endpoint and project
    pub appwrite: AppwriteConfig,
    /// Database, collection and bucket ids
    pub collections: CollectionsConfig,
    /// Page sizes and preview settings
    #[serde(default)]
    pub paging: PagingConfig,
}

/// Ids of the database objects the app reads and writes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionsConfig {
    pub database_id: String,
    pub user_collection_id: String,
    pub post_collection_id: String,
    pub saves_collection_id: String,
    /// Storage bucket for post images and avatars
    pub storage_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagingConfig {
    /// Size of the home feed
    #[serde(default = "default_recent_limit")]
    pub recent_limit: u32,
    /// Size of one infinite-scroll page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Size of the people listing
    #[serde(default = "default_users_limit")]
    pub users_limit: u32,
    #[serde(default)]
    pub preview: PreviewOptions,
}

// Default values
fn default_recent_limit() -> u32 {
    20
}

fn default_page_size() -> u32 {
    10
}

fn default_users_limit() -> u32 {
    10
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
            page_size: default_page_size(),
            users_limit: default_users_limit(),
            preview: PreviewOptions::default(),
        }
    }
}

impl CollectionsConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_id: required("APPWRITE_DATABASE_ID")?,
            user_collection_id: required("APPWRITE_USER_COLLECTION_ID")?,
            post_collection_id: required("APPWRITE_POST_COLLECTION_ID")?,
            saves_collection_id: required("APPWRITE_SAVES_COLLECTION_ID")?,
            storage_id: required("APPWRITE_STORAGE_ID")?,
        })
    }
}

impl PagingConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            recent_limit: parsed("RECENT_POSTS_LIMIT").unwrap_or(defaults.recent_limit),
            page_size: parsed("POSTS_PAGE_SIZE").unwrap_or(defaults.page_size),
            users_limit: parsed("USERS_LIMIT").unwrap_or(defaults.users_limit),
            preview: defaults.preview,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let appwrite =
            AppwriteConfig::from_env().context("failed to load Appwrite connection settings")?;

        Ok(Config {
            appwrite,
            collections: CollectionsConfig::from_env()?,
            paging: PagingConfig::from_env(),
        })
    }
}

fn required(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("{} environment variable not set", key))
}

fn parsed(key: &str) -> Option<u32> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}
