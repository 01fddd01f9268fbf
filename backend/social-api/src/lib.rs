//! Social data-access layer
//!
//! Account, profile, post, file and save/like operations for the social app,
//! each a short sequence of calls against the Appwrite platform. The only
//! logic of its own is tag parsing, cursor pagination and the compensating
//! file deletes in the post and profile workflows.
//!
//! ```no_run
//! use social_api::SocialApi;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let api = SocialApi::from_env()?;
//! api.accounts.sign_in_account("ada@example.com", "secret123").await?;
//! let feed = api.posts.get_recent_posts().await?;
//! println!("{} posts", feed.total);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod backend;
pub mod config;
pub mod domain;
pub mod error;
pub mod pagination;
pub mod services;

pub use api::SocialApi;
pub use backend::Backend;
pub use config::{CollectionsConfig, Config, PagingConfig};
pub use domain::*;
pub use error::{ServiceError, ServiceResult};
pub use pagination::{next_cursor, page_queries, Page};
