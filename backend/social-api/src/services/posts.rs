/// Post service - handles post creation, retrieval, and management
use appwrite_client::{Document, DocumentList, Id, Query};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::backend::Backend;
use crate::config::{CollectionsConfig, PagingConfig};
use crate::domain::{parse_tags, NewPost, Post, PostChanges, PostRecord, Status, UpdatePost};
use crate::error::{ServiceError, ServiceResult};
use crate::pagination::{page_queries, Page};
use crate::services::FileService;

#[derive(Clone)]
pub struct PostService {
    backend: Arc<dyn Backend>,
    collections: Arc<CollectionsConfig>,
    paging: PagingConfig,
    files: FileService,
}

impl PostService {
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

    /// Create a new post
    ///
    /// Uploads the image, derives its preview URL and writes the post. If the
    /// write fails the uploaded image is deleted before the error is returned.
    #[instrument(skip(self, post), fields(user_id = %post.user_id))]
    pub async fn create_post(&self, post: NewPost) -> ServiceResult<Document<Post>> {
        if post.user_id.is_empty() {
            return Err(ServiceError::InvalidInput("post has no creator".to_string()));
        }

        let uploaded = self.files.upload_with_preview(post.file).await?;

        let record = PostRecord {
            users: post.user_id,
            caption: post.caption,
            image_url: uploaded.preview_url,
            image_id: uploaded.id.clone(),
            location: post.location,
            tags: parse_tags(post.tags.as_deref()),
        };

        let created = match self.write_post(None, &record).await {
            Ok(doc) => doc,
            Err(err) => {
                self.files.discard(&uploaded.id).await;
                return Err(err);
            }
        };

        info!(post_id = %created.id, image_id = %uploaded.id, "Created post");

        // The post is stored even when its echo does not decode
        let written = created.clone();
        match created.decode() {
            Ok(doc) => Ok(doc),
            Err(err) => {
                warn!(post_id = %written.id, error = %err, "Created post did not decode, returning written fields");
                Ok(written.with_data(Post::from(record)))
            }
        }
    }

    /// Update an existing post
    ///
    /// With a replacement file the new image goes through the same
    /// upload / preview / compensate sequence as [`create_post`](Self::create_post),
    /// and the replaced image is deleted once the write succeeded.
    #[instrument(skip(self, post), fields(post_id = %post.post_id))]
    pub async fn update_post(&self, post: UpdatePost) -> ServiceResult<Document<Post>> {
        let replacement = match post.file {
            Some(file) => Some(self.files.upload_with_preview(file).await?),
            None => None,
        };

        let (image_url, image_id) = match &replacement {
            Some(uploaded) => (uploaded.preview_url.clone(), uploaded.id.clone()),
            None => (post.image_url, post.image_id.clone()),
        };

        let changes = PostChanges {
            caption: post.caption,
            image_url,
            image_id,
            location: post.location,
            tags: parse_tags(post.tags.as_deref()),
        };

        let updated = match self.write_post(Some(&post.post_id), &changes).await {
            Ok(doc) => doc,
            Err(err) => {
                if let Some(uploaded) = &replacement {
                    self.files.discard(&uploaded.id).await;
                }
                return Err(err);
            }
        };

        if replacement.is_some() && !post.image_id.is_empty() {
            self.files.discard(&post.image_id).await;
        }

        info!(post_id = %updated.id, "Updated post");
        Ok(updated.decode()?)
    }

    /// Delete a post and its image
    #[instrument(skip(self))]
    pub async fn delete_post(&self, post_id: &str, image_id: &str) -> ServiceResult<Status> {
        if post_id.is_empty() || image_id.is_empty() {
            return Err(ServiceError::InvalidInput(
                "post id and image id are required".to_string(),
            ));
        }

        self.backend
            .delete_document(
                &self.collections.database_id,
                &self.collections.post_collection_id,
                post_id,
            )
            .await?;

        self.files.discard(image_id).await;

        info!(%post_id, "Deleted post");
        Ok(Status::ok())
    }

    /// Get a post by ID
    pub async fn get_post_by_id(&self, post_id: &str) -> ServiceResult<Document<Post>> {
        if post_id.is_empty() {
            return Err(ServiceError::InvalidInput("post id is required".to_string()));
        }

        let doc = self
            .backend
            .get_document(
                &self.collections.database_id,
                &self.collections.post_collection_id,
                post_id,
            )
            .await?;
        Ok(doc.decode()?)
    }

    /// Newest posts for the home feed
    pub async fn get_recent_posts(&self) -> ServiceResult<DocumentList<Post>> {
        self.list(vec![
            Query::order_desc("$createdAt"),
            Query::limit(self.paging.recent_limit),
        ])
        .await
    }

    /// One page of the explore feed, most recently updated first
    pub async fn get_infinite_posts(&self, cursor: Option<&str>) -> ServiceResult<Page<Post>> {
        let queries = page_queries(
            vec![
                Query::order_desc("$updatedAt"),
                Query::limit(self.paging.page_size),
            ],
            cursor,
        );
        debug!(?cursor, "Fetching posts page");

        let list = self.list(queries).await?;
        Ok(Page::from_list(list, self.paging.page_size))
    }

    /// Full-text search over captions
    pub async fn search_posts(&self, term: &str) -> ServiceResult<DocumentList<Post>> {
        self.list(vec![Query::search("caption", term)]).await
    }

    /// Posts created by one user, newest first
    pub async fn get_user_posts(&self, user_id: &str) -> ServiceResult<DocumentList<Post>> {
        if user_id.is_empty() {
            return Err(ServiceError::InvalidInput("user id is required".to_string()));
        }

        self.list(vec![
            Query::equal("users", user_id),
            Query::order_desc("$createdAt"),
        ])
        .await
    }

    async fn list(&self, queries: Vec<Query>) -> ServiceResult<DocumentList<Post>> {
        let list = self
            .backend
            .list_documents(
                &self.collections.database_id,
                &self.collections.post_collection_id,
                queries,
            )
            .await?;
        Ok(list.decode()?)
    }

    /// Create (`post_id == None`) or patch a post document
    async fn write_post<D: Serialize>(
        &self,
        post_id: Option<&str>,
        data: &D,
    ) -> ServiceResult<Document> {
        let data = serde_json::to_value(data)?;
        let doc = match post_id {
            None => {
                self.backend
                    .create_document(
                        &self.collections.database_id,
                        &self.collections.post_collection_id,
                        &Id::unique(),
                        data,
                    )
                    .await?
            }
            Some(post_id) => {
                self.backend
                    .update_document(
                        &self.collections.database_id,
                        &self.collections.post_collection_id,
                        post_id,
                        data,
                    )
                    .await?
            }
        };
        Ok(doc)
    }
}
