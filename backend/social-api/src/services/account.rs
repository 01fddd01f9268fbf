/// Account service - sign-up, sign-in, session lookup and sign-out
use appwrite_client::{Account, Document, Id, Query, Session};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::backend::Backend;
use crate::config::CollectionsConfig;
use crate::domain::{NewUser, Status, User, UserRecord};
use crate::error::{ServiceError, ServiceResult};

#[derive(Clone)]
pub struct AccountService {
    backend: Arc<dyn Backend>,
    collections: Arc<CollectionsConfig>,
}

impl AccountService {
    pub fn new(backend: Arc<dyn Backend>, collections: Arc<CollectionsConfig>) -> Self {
        Self {
            backend,
            collections,
        }
    }

    /// Register an account and create its profile document
    ///
    /// The profile starts with a generated initials avatar.
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn create_user_account(&self, user: NewUser) -> ServiceResult<Document<User>> {
        if user.email.is_empty() || user.password.is_empty() {
            return Err(ServiceError::InvalidInput(
                "email and password are required".to_string(),
            ));
        }

        let account = self
            .backend
            .create_account(&Id::unique(), &user.email, &user.password, &user.name)
            .await?;

        let avatar_url = self.backend.avatar_initials_url(&user.name)?;

        info!(account_id = %account.id, "Created account");

        self.save_user_to_db(UserRecord {
            accountid: account.id,
            name: account.name,
            email: account.email,
            imageurl: avatar_url.to_string(),
            username: Some(user.username),
        })
        .await
    }

    /// Write a profile document to the users collection
    pub async fn save_user_to_db(&self, user: UserRecord) -> ServiceResult<Document<User>> {
        let data = serde_json::to_value(&user)?;
        let doc = self
            .backend
            .create_document(
                &self.collections.database_id,
                &self.collections.user_collection_id,
                &Id::unique(),
                data,
            )
            .await?;

        info!(user_id = %doc.id, account_id = %user.accountid, "Saved user profile");
        Ok(doc.decode()?)
    }

    pub async fn sign_in_account(&self, email: &str, password: &str) -> ServiceResult<Session> {
        let session = self.backend.create_email_session(email, password).await?;
        info!(user_id = %session.user_id, "Signed in");
        Ok(session)
    }

    /// Account behind the current session
    pub async fn get_account(&self) -> ServiceResult<Account> {
        Ok(self.backend.get_account().await?)
    }

    /// Profile document of the signed-in account
    pub async fn get_current_user(&self) -> ServiceResult<Document<User>> {
        let account = self.get_account().await?;

        let users = self
            .backend
            .list_documents(
                &self.collections.database_id,
                &self.collections.user_collection_id,
                vec![Query::equal("accountid", account.id.as_str())],
            )
            .await?;

        users
            .documents
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::NotFound(format!("profile for account {}", account.id)))?
            .decode()
            .map_err(ServiceError::from)
    }

    pub async fn sign_out_account(&self) -> ServiceResult<Status> {
        self.backend.delete_session("current").await?;
        info!("Signed out");
        Ok(Status::ok())
    }
}
