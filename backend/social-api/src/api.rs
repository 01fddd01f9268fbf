//! Entry point bundling every service over one backend

use anyhow::{Context, Result};
use appwrite_client::AppwriteClient;
use std::sync::Arc;

use crate::backend::Backend;
use crate::config::{CollectionsConfig, Config, PagingConfig};
use crate::services::{AccountService, FileService, PostService, SaveService, UserService};

#[derive(Clone)]
pub struct SocialApi {
    pub accounts: AccountService,
    pub users: UserService,
    pub files: FileService,
    pub posts: PostService,
    pub saves: SaveService,
}

impl SocialApi {
    pub fn new(
        backend: Arc<dyn Backend>,
        collections: CollectionsConfig,
        paging: PagingConfig,
    ) -> Self {
        let collections = Arc::new(collections);
        let files = FileService::new(
            backend.clone(),
            collections.storage_id.clone(),
            paging.preview.clone(),
        );

        Self {
            accounts: AccountService::new(backend.clone(), collections.clone()),
            users: UserService::new(
                backend.clone(),
                collections.clone(),
                paging.clone(),
                files.clone(),
            ),
            posts: PostService::new(backend.clone(), collections.clone(), paging, files.clone()),
            saves: SaveService::new(backend, collections),
            files,
        }
    }

    /// Connect to the platform described by `config`
    pub fn connect(config: Config) -> Result<Self> {
        let client = AppwriteClient::new(config.appwrite).context("failed to build Appwrite client")?;
        Ok(Self::new(Arc::new(client), config.collections, config.paging))
    }

    /// Load configuration from the environment and connect
    pub fn from_env() -> Result<Self> {
        Self::connect(Config::from_env()?)
    }
}
