//! Seam between the data layer and the platform SDK
//!
//! Services talk to [`Backend`] only, so workflows can run against the real
//! [`AppwriteClient`] or an in-memory fake.

use appwrite_client::{
    Account, AppwriteClient, Document, DocumentList, File, InputFile, PreviewOptions, Query,
    Result, Session,
};
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

#[async_trait]
pub trait Backend: Send + Sync {
    async fn create_account(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Account>;

    async fn create_email_session(&self, email: &str, password: &str) -> Result<Session>;

    async fn get_account(&self) -> Result<Account>;

    async fn delete_session(&self, session_id: &str) -> Result<()>;

    async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> Result<Document>;

    async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<Document>;

    async fn update_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> Result<Document>;

    async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<()>;

    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: Vec<Query>,
    ) -> Result<DocumentList>;

    async fn create_file(&self, bucket_id: &str, file_id: &str, file: InputFile) -> Result<File>;

    fn file_preview_url(
        &self,
        bucket_id: &str,
        file_id: &str,
        options: &PreviewOptions,
    ) -> Result<Url>;

    async fn delete_file(&self, bucket_id: &str, file_id: &str) -> Result<()>;

    fn avatar_initials_url(&self, name: &str) -> Result<Url>;
}

#[async_trait]
impl Backend for AppwriteClient {
    async fn create_account(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Account> {
        AppwriteClient::create_account(self, user_id, email, password, Some(name)).await
    }

    async fn create_email_session(&self, email: &str, password: &str) -> Result<Session> {
        self.create_email_password_session(email, password).await
    }

    async fn get_account(&self) -> Result<Account> {
        AppwriteClient::get_account(self).await
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        AppwriteClient::delete_session(self, session_id).await
    }

    async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> Result<Document> {
        AppwriteClient::create_document(self, database_id, collection_id, document_id, &data, None)
            .await
    }

    async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<Document> {
        AppwriteClient::get_document(self, database_id, collection_id, document_id).await
    }

    async fn update_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> Result<Document> {
        AppwriteClient::update_document(self, database_id, collection_id, document_id, &data).await
    }

    async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<()> {
        AppwriteClient::delete_document(self, database_id, collection_id, document_id).await
    }

    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: Vec<Query>,
    ) -> Result<DocumentList> {
        AppwriteClient::list_documents(self, database_id, collection_id, &queries).await
    }

    async fn create_file(&self, bucket_id: &str, file_id: &str, file: InputFile) -> Result<File> {
        AppwriteClient::create_file(self, bucket_id, file_id, &file).await
    }

    fn file_preview_url(
        &self,
        bucket_id: &str,
        file_id: &str,
        options: &PreviewOptions,
    ) -> Result<Url> {
        AppwriteClient::file_preview_url(self, bucket_id, file_id, options)
    }

    async fn delete_file(&self, bucket_id: &str, file_id: &str) -> Result<()> {
        AppwriteClient::delete_file(self, bucket_id, file_id).await
    }

    fn avatar_initials_url(&self, name: &str) -> Result<Url> {
        self.initials_url(name)
    }
}
