/// Likes and saves
///
/// Likes live on the post document as a list of user ids. Saves are join
/// records in their own collection, at most one per (post, user) pair.
use appwrite_client::{Document, DocumentList, Id, Query};
use std::sync::Arc;
use tracing::{debug, info};

use crate::backend::Backend;
use crate::config::CollectionsConfig;
use crate::domain::{Post, SaveRecord, SavedPost, Status};
use crate::error::{ServiceError, ServiceResult};

#[derive(Clone)]
pub struct SaveService {
    backend: Arc<dyn Backend>,
    collections: Arc<CollectionsConfig>,
}

impl SaveService {
    pub fn new(backend: Arc<dyn Backend>, collections: Arc<CollectionsConfig>) -> Self {
        Self {
            backend,
            collections,
        }
    }

    /// Replace the like list of a post
    pub async fn like_post(
        &self,
        post_id: &str,
        likes: Vec<String>,
    ) -> ServiceResult<Document<Post>> {
        if post_id.is_empty() {
            return Err(ServiceError::InvalidInput("post id is required".to_string()));
        }

        let like_count = likes.len();
        let doc = self
            .backend
            .update_document(
                &self.collections.database_id,
                &self.collections.post_collection_id,
                post_id,
                serde_json::json!({ "likes": likes }),
            )
            .await?;

        info!(%post_id, like_count, "Updated post likes");
        Ok(doc.decode()?)
    }

    pub async fn save_post(
        &self,
        user_id: &str,
        post_id: &str,
    ) -> ServiceResult<Document<SavedPost>> {
        if user_id.is_empty() || post_id.is_empty() {
            return Err(ServiceError::InvalidInput(
                "user id and post id are required".to_string(),
            ));
        }

        if let Some(existing) = self
            .get_saved_post_by_id(post_id, user_id)
            .await?
            .documents
            .into_iter()
            .next()
        {
            debug!(%user_id, %post_id, save_id = %existing.id, "Post already saved");
            return Ok(existing);
        }

        let record = SaveRecord {
            users: user_id.to_string(),
            posts: post_id.to_string(),
        };
        let doc = self
            .backend
            .create_document(
                &self.collections.database_id,
                &self.collections.saves_collection_id,
                &Id::unique(),
                serde_json::to_value(&record)?,
            )
            .await?;

        info!(%user_id, %post_id, save_id = %doc.id, "Saved post");
        Ok(doc.decode()?)
    }

    /// Save records linking `user_id` to `post_id`
    pub async fn get_saved_post_by_id(
        &self,
        post_id: &str,
        user_id: &str,
    ) -> ServiceResult<DocumentList<SavedPost>> {
        let list = self
            .backend
            .list_documents(
                &self.collections.database_id,
                &self.collections.saves_collection_id,
                vec![Query::equal("posts", post_id), Query::equal("users", user_id)],
            )
            .await?;
        Ok(list.decode()?)
    }

    /// Remove every save linking `user_id` to `post_id`
    ///
    /// Succeeds when there is nothing to remove, including records that
    /// disappear between the lookup and the delete.
    pub async fn delete_saved_post(&self, post_id: &str, user_id: &str) -> ServiceResult<Status> {
        let saves = self.get_saved_post_by_id(post_id, user_id).await?;
        if saves.is_empty() {
            debug!(%user_id, %post_id, "No saved post to remove");
        }

        for record in &saves.documents {
            match self
                .backend
                .delete_document(
                    &self.collections.database_id,
                    &self.collections.saves_collection_id,
                    &record.id,
                )
                .await
                .map_err(ServiceError::from)
            {
                Ok(()) => info!(%user_id, %post_id, save_id = %record.id, "Removed saved post"),
                Err(ServiceError::NotFound(_)) => {
                    debug!(save_id = %record.id, "Saved post already removed")
                }
                Err(err) => return Err(err),
            }
        }

        Ok(Status::ok())
    }
}
