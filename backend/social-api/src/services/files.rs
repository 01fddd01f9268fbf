/// File service - uploads, preview URLs and deletion in the media bucket
use appwrite_client::{File, Id, InputFile, PreviewOptions};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::backend::Backend;
use crate::domain::{Status, UploadedFile};
use crate::error::{ServiceError, ServiceResult};

#[derive(Clone)]
pub struct FileService {
    backend: Arc<dyn Backend>,
    bucket_id: String,
    preview: PreviewOptions,
}

impl FileService {
    pub fn new(backend: Arc<dyn Backend>, bucket_id: impl Into<String>, preview: PreviewOptions) -> Self {
        Self {
            backend,
            bucket_id: bucket_id.into(),
            preview,
        }
    }

    /// Upload a file under a platform-allocated id
    pub async fn upload_file(&self, file: InputFile) -> ServiceResult<File> {
        if file.is_empty() {
            return Err(ServiceError::InvalidInput(format!(
                "file {:?} is empty",
                file.name
            )));
        }

        let name = file.name.clone();
        let uploaded = self
            .backend
            .create_file(&self.bucket_id, &Id::unique(), file)
            .await?;

        info!(file_id = %uploaded.id, name = %name, size = uploaded.size_original, "Uploaded file");
        Ok(uploaded)
    }

    /// Preview URL for an uploaded image
    pub fn get_file_preview(&self, file_id: &str) -> ServiceResult<String> {
        let url = self
            .backend
            .file_preview_url(&self.bucket_id, file_id, &self.preview)?;
        Ok(url.to_string())
    }

    pub async fn delete_file(&self, file_id: &str) -> ServiceResult<Status> {
        self.backend.delete_file(&self.bucket_id, file_id).await?;
        info!(%file_id, "Deleted file");
        Ok(Status::ok())
    }

    /// Upload then derive the preview URL
    ///
    /// If the preview cannot be built the uploaded file is removed again.
    pub async fn upload_with_preview(&self, file: InputFile) -> ServiceResult<UploadedFile> {
        let uploaded = self.upload_file(file).await?;

        match self.get_file_preview(&uploaded.id) {
            Ok(preview_url) => Ok(UploadedFile {
                id: uploaded.id,
                preview_url,
            }),
            Err(err) => {
                self.discard(&uploaded.id).await;
                Err(err)
            }
        }
    }

    /// Best-effort delete of a file nothing references any more
    ///
    /// Failures are logged only; callers are already reporting another error
    /// or have nothing to roll back.
    pub async fn discard(&self, file_id: &str) {
        debug!(%file_id, "Discarding file");
        if let Err(err) = self.backend.delete_file(&self.bucket_id, file_id).await {
            warn!(%file_id, error = %err, "Failed to delete orphaned file");
        }
    }
}
