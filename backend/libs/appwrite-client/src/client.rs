use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::AppwriteConfig;
use crate::error::{ApiErrorBody, AppwriteError, Result};
use crate::models::*;
use crate::query::Query;

/// Response format the models in this crate are written against
const RESPONSE_FORMAT: &str = "1.5.0";

/// Uploads above this size are sent in `Content-Range` chunks
pub const CHUNK_SIZE: usize = 5 * 1024 * 1024;

const PROJECT_HEADER: &str = "x-appwrite-project";
const SESSION_HEADER: &str = "x-appwrite-session";
const UPLOAD_ID_HEADER: &str = "x-appwrite-id";

/// Appwrite REST Client
///
/// Covers the account, databases, storage and avatars endpoints used by the
/// social data layer. Sessions are kept both in the cookie store (browser-style
/// auth) and, when the platform hands out a secret, in the session header.
#[derive(Clone)]
pub struct AppwriteClient {
    config: Arc<AppwriteConfig>,
    base_url: Url,
    session: Arc<RwLock<Option<String>>>,
    http_client: reqwest::Client,
}

impl AppwriteClient {
    /// Create new client
    ///
    /// # Arguments
    /// * `config` - endpoint, project and transport settings
    pub fn new(config: AppwriteConfig) -> Result<Self> {
        let base_url = Url::parse(config.base_url())?;
        if base_url.cannot_be_a_base() {
            return Err(AppwriteError::Config(format!(
                "endpoint is not a base URL: {}",
                config.endpoint
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(PROJECT_HEADER, header_value(&config.project_id)?);
        headers.insert(
            "x-appwrite-response-format",
            HeaderValue::from_static(RESPONSE_FORMAT),
        );
        if let Some(locale) = &config.locale {
            headers.insert("x-appwrite-locale", header_value(locale)?);
        }

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            base_url,
            session: Arc::new(RwLock::new(None)),
            http_client,
        })
    }

    pub fn config(&self) -> &AppwriteConfig {
        &self.config
    }

    /// Use an existing session secret for subsequent calls
    pub fn set_session(&self, secret: Option<String>) {
        if let Ok(mut session) = self.session.write() {
            *session = secret.filter(|s| !s.is_empty());
        }
    }

    pub fn session(&self) -> Option<String> {
        self.session.read().ok().and_then(|s| s.clone())
    }

    // ------------------------------------------------------------------
    // Account
    // ------------------------------------------------------------------

    /// Register a new account
    pub async fn create_account(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<Account> {
        let body = json!({
            "userId": user_id,
            "email": email,
            "password": password,
            "name": name,
        });
        let request = self.request(Method::POST, &["account"])?.json(&body);
        self.send_json(request).await
    }

    /// Log in with email and password
    pub async fn create_email_password_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session> {
        let body = json!({ "email": email, "password": password });
        let request = self
            .request(Method::POST, &["account", "sessions", "email"])?
            .json(&body);
        let session: Session = self.send_json(request).await?;

        if !session.secret.is_empty() {
            self.set_session(Some(session.secret.clone()));
        }

        Ok(session)
    }

    /// Account behind the current session
    pub async fn get_account(&self) -> Result<Account> {
        let request = self.request(Method::GET, &["account"])?;
        self.send_json(request).await
    }

    /// Log out; `"current"` targets the active session
    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        let request = self.request(Method::DELETE, &["account", "sessions", session_id])?;
        self.send_empty(request).await?;

        if session_id == "current" {
            self.set_session(None);
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Databases
    // ------------------------------------------------------------------

    pub async fn create_document<D: Serialize + ?Sized>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &D,
        permissions: Option<&[String]>,
    ) -> Result<Document> {
        let data = serde_json::to_value(data)?;
        let mut body = json!({
            "documentId": document_id,
            "data": data,
        });
        if let Some(permissions) = permissions {
            body["permissions"] = json!(permissions);
        }

        let request = self
            .request(Method::POST, &documents_path(database_id, collection_id))?
            .json(&body);
        self.send_json(request).await
    }

    pub async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<Document> {
        let request = self.request(
            Method::GET,
            &document_path(database_id, collection_id, document_id),
        )?;
        self.send_json(request).await
    }

    /// Partial update: only the attributes present in `data` change
    pub async fn update_document<D: Serialize + ?Sized>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &D,
    ) -> Result<Document> {
        let data = serde_json::to_value(data)?;
        let body = json!({ "data": data });
        let request = self
            .request(
                Method::PATCH,
                &document_path(database_id, collection_id, document_id),
            )?
            .json(&body);
        self.send_json(request).await
    }

    pub async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<()> {
        let request = self.request(
            Method::DELETE,
            &document_path(database_id, collection_id, document_id),
        )?;
        self.send_empty(request).await
    }

    pub async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<DocumentList> {
        let params: Vec<(&str, String)> =
            queries.iter().map(|q| ("queries[]", q.to_string())).collect();
        let request = self
            .request(Method::GET, &documents_path(database_id, collection_id))?
            .query(&params);
        self.send_json(request).await
    }

    // ------------------------------------------------------------------
    // Storage
    // ------------------------------------------------------------------

    /// Upload a file, chunking anything above [`CHUNK_SIZE`]
    pub async fn create_file(
        &self,
        bucket_id: &str,
        file_id: &str,
        file: &InputFile,
    ) -> Result<File> {
        let path = ["storage", "buckets", bucket_id, "files"];
        let total = file.bytes.len();

        if total <= CHUNK_SIZE {
            let form = upload_form(file_id, file, file.bytes.to_vec())?;
            let request = self.request(Method::POST, &path)?.multipart(form);
            return self.send_json(request).await;
        }

        let mut uploaded: Option<File> = None;
        let mut start = 0;
        while start < total {
            let end = (start + CHUNK_SIZE).min(total);
            let chunk = file.bytes.slice(start..end).to_vec();
            let form = upload_form(file_id, file, chunk)?;

            let mut request = self
                .request(Method::POST, &path)?
                .header(
                    reqwest::header::CONTENT_RANGE,
                    format!("bytes {}-{}/{}", start, end - 1, total),
                )
                .multipart(form);
            if let Some(previous) = &uploaded {
                request = request.header(UPLOAD_ID_HEADER, previous.id.as_str());
            }

            debug!(file = %file.name, start, end, total, "Uploading chunk");
            uploaded = Some(self.send_json(request).await?);
            start = end;
        }

        uploaded.ok_or_else(|| AppwriteError::Config("empty upload".to_string()))
    }

    /// Preview URL for an image file; no request is made
    pub fn file_preview_url(
        &self,
        bucket_id: &str,
        file_id: &str,
        options: &PreviewOptions,
    ) -> Result<Url> {
        let mut url = self.endpoint(&["storage", "buckets", bucket_id, "files", file_id, "preview"])?;
        url.query_pairs_mut()
            .append_pair("width", &options.width.to_string())
            .append_pair("height", &options.height.to_string())
            .append_pair("gravity", options.gravity.as_str())
            .append_pair("quality", &options.quality.to_string())
            .append_pair("project", &self.config.project_id);
        Ok(url)
    }

    pub async fn delete_file(&self, bucket_id: &str, file_id: &str) -> Result<()> {
        let request = self.request(
            Method::DELETE,
            &["storage", "buckets", bucket_id, "files", file_id],
        )?;
        self.send_empty(request).await
    }

    // ------------------------------------------------------------------
    // Avatars
    // ------------------------------------------------------------------

    /// Initials avatar URL for a display name; no request is made
    pub fn initials_url(&self, name: &str) -> Result<Url> {
        let mut url = self.endpoint(&["avatars", "initials"])?;
        url.query_pairs_mut()
            .append_pair("name", name)
            .append_pair("project", &self.config.project_id);
        Ok(url)
    }

    // ------------------------------------------------------------------
    // Transport
    // ------------------------------------------------------------------

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppwriteError::Config("endpoint is not a base URL".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        debug!(%method, path = url.path(), "Appwrite request");

        let mut request = self.http_client.request(method, url);
        if let Some(secret) = self.session() {
            request = request.header(SESSION_HEADER, secret);
        }
        Ok(request)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = check_status(request.send().await?).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<()> {
        check_status(request.send().await?).await?;
        Ok(())
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| AppwriteError::Config(format!("invalid header value {:?}: {}", value, e)))
}

fn documents_path<'a>(database_id: &'a str, collection_id: &'a str) -> [&'a str; 5] {
    [
        "databases",
        database_id,
        "collections",
        collection_id,
        "documents",
    ]
}

fn document_path<'a>(
    database_id: &'a str,
    collection_id: &'a str,
    document_id: &'a str,
) -> [&'a str; 6] {
    [
        "databases",
        database_id,
        "collections",
        collection_id,
        "documents",
        document_id,
    ]
}

fn upload_form(file_id: &str, file: &InputFile, chunk: Vec<u8>) -> Result<Form> {
    let part = Part::bytes(chunk)
        .file_name(file.name.clone())
        .mime_str(file.mime.as_ref())?;
    Ok(Form::new()
        .text("fileId", file_id.to_string())
        .part("file", part))
}

/// Turn non-2xx responses into [`AppwriteError::Api`]
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    Err(match serde_json::from_str::<ApiErrorBody>(&text) {
        Ok(body) => AppwriteError::Api {
            code: if body.code == 0 { status.as_u16() } else { body.code },
            kind: body.kind,
            message: body.message,
        },
        Err(_) => AppwriteError::Api {
            code: status.as_u16(),
            kind: status_kind(status).to_string(),
            message: text,
        },
    })
}

fn status_kind(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AppwriteClient {
        AppwriteClient::new(AppwriteConfig::new("https://cloud.appwrite.io/v1", "snap"))
            .unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = client();
        assert_eq!(client.config().project_id, "snap");
        assert!(client.session().is_none());
    }

    #[test]
    fn test_rejects_non_base_endpoint() {
        let result = AppwriteClient::new(AppwriteConfig::new("mailto:someone", "snap"));
        assert!(matches!(result, Err(AppwriteError::Config(_))));
    }

    #[test]
    fn test_file_preview_url() {
        let url = client()
            .file_preview_url("media", "file1", &PreviewOptions::default())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://cloud.appwrite.io/v1/storage/buckets/media/files/file1/preview\
             ?width=2000&height=2000&gravity=top&quality=100&project=snap"
        );
    }

    #[test]
    fn test_initials_url_encodes_name() {
        let url = client().initials_url("Ada Lovelace").unwrap();
        assert_eq!(
            url.as_str(),
            "https://cloud.appwrite.io/v1/avatars/initials?name=Ada+Lovelace&project=snap"
        );
    }

    #[test]
    fn test_set_session_ignores_empty_secret() {
        let client = client();
        client.set_session(Some(String::new()));
        assert!(client.session().is_none());
        client.set_session(Some("secret".to_string()));
        assert_eq!(client.session().as_deref(), Some("secret"));
    }

    #[test]
    fn test_path_segments_are_escaped() {
        let url = client().endpoint(&["databases", "a/b", "collections"]).unwrap();
        assert_eq!(url.path(), "/v1/databases/a%2Fb/collections");
    }
}
