/// User service - profile listing, lookup and editing
use appwrite_client::{Document, DocumentList, Query};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::backend::Backend;
use crate::config::{CollectionsConfig, PagingConfig};
use crate::domain::{UpdateUser, User, UserChanges};
use crate::error::{ServiceError, ServiceResult};
use crate::services::FileService;

#[derive(Clone)]
pub struct UserService {
    backend: Arc<dyn Backend>,
    collections: Arc<CollectionsConfig>,
    paging: PagingConfig,
    files: FileService,
}

impl UserService {
    pub fn new(
        backend: Arc<dyn Backend>,
        collections: Arc<CollectionsConfig>,
        paging: PagingConfig,
        files: FileService,
    ) -> Self {
        Self {
            backend,
            collections,
            paging,
            files,
        }
    }

    /// Newest profiles first; `limit` defaults to the configured page size
    pub async fn get_users(&self, limit: Option<u32>) -> ServiceResult<DocumentList<User>> {
        let list = self
            .backend
            .list_documents(
                &self.collections.database_id,
                &self.collections.user_collection_id,
                vec![
                    Query::order_desc("$createdAt"),
                    Query::limit(limit.unwrap_or(self.paging.users_limit)),
                ],
            )
            .await?;
        Ok(list.decode()?)
    }

    pub async fn get_user_by_id(&self, user_id: &str) -> ServiceResult<Document<User>> {
        if user_id.is_empty() {
            return Err(ServiceError::InvalidInput("user id is required".to_string()));
        }

        let doc = self
            .backend
            .get_document(
                &self.collections.database_id,
                &self.collections.user_collection_id,
                user_id,
            )
            .await?;
        Ok(doc.decode()?)
    }

    /// Update profile fields, optionally replacing the avatar
    ///
    /// A new avatar is uploaded first and deleted again if the profile write
    /// fails. After a successful write the previous uploaded avatar is removed.
    #[instrument(skip(self, user), fields(user_id = %user.user_id))]
    pub async fn update_user(&self, user: UpdateUser) -> ServiceResult<Document<User>> {
        let replacement = match user.file {
            Some(file) => Some(self.files.upload_with_preview(file).await?),
            None => None,
        };

        let (imageurl, imageid) = match &replacement {
            Some(uploaded) => (Some(uploaded.preview_url.clone()), Some(uploaded.id.clone())),
            None => (user.image_url, user.image_id.clone()),
        };

        let changes = UserChanges {
            name: user.name,
            bio: user.bio,
            imageurl,
            imageid,
        };

        let written = async {
            let data = serde_json::to_value(&changes)?;
            let doc = self
                .backend
                .update_document(
                    &self.collections.database_id,
                    &self.collections.user_collection_id,
                    &user.user_id,
                    data,
                )
                .await?;
            Ok::<_, ServiceError>(doc)
        }
        .await;

        let updated = match written {
            Ok(doc) => doc,
            Err(err) => {
                if let Some(uploaded) = &replacement {
                    self.files.discard(&uploaded.id).await;
                }
                return Err(err);
            }
        };

        if replacement.is_some() {
            if let Some(previous) = user.image_id.as_deref().filter(|id| !id.is_empty()) {
                self.files.discard(previous).await;
            }
        }

        info!(user_id = %updated.id, "Updated user profile");
        Ok(updated.decode()?)
    }
}
