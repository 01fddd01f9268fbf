#![allow(dead_code)]

pub mod mock_backend;

use appwrite_client::InputFile;
use social_api::{CollectionsConfig, PagingConfig, SocialApi};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub use mock_backend::MockBackend;

pub fn collections() -> CollectionsConfig {
    CollectionsConfig {
        database_id: "db".to_string(),
        user_collection_id: "users".to_string(),
        post_collection_id: "posts".to_string(),
        saves_collection_id: "saves".to_string(),
        storage_id: "media".to_string(),
    }
}

pub fn paging() -> PagingConfig {
    PagingConfig {
        page_size: 2,
        ..PagingConfig::default()
    }
}

/// Route service logs to the test output; `RUST_LOG=social_api=debug` to see them
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// API wired to a fresh in-memory backend
pub fn setup() -> (SocialApi, MockBackend) {
    init_tracing();
    let backend = MockBackend::new();
    let api = SocialApi::new(Arc::new(backend.clone()), collections(), paging());
    (api, backend)
}

pub fn image(name: &str) -> InputFile {
    InputFile::new(name, vec![0x89u8, b'P', b'N', b'G'], mime::IMAGE_PNG)
}
