/// Appwrite Client Library
///
/// Typed REST client for the backend-as-a-service platform the social app is
/// built on. Covers the slice of the platform the app uses:
/// - Account registration, email/password sessions, logout
/// - Document CRUD and filtered / sorted / cursor-paginated listing
/// - File upload (chunked above 5 MiB), preview URLs, deletion
/// - Initials avatars
///
/// Every call returns [`Result`] with a typed [`AppwriteError`].

pub mod client;
pub mod config;
pub mod error;
pub mod id;
pub mod models;
pub mod query;

pub use client::{AppwriteClient, CHUNK_SIZE};
pub use config::AppwriteConfig;
pub use error::{AppwriteError, Result};
pub use id::Id;
pub use models::{
    Account, Document, DocumentData, DocumentList, File, Gravity, InputFile, PreviewOptions,
    Session,
};
pub use query::Query;
