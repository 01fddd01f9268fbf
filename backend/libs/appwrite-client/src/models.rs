use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Schema-less document payload
pub type DocumentData = Map<String, Value>;

/// Document as stored in a collection: platform metadata plus user attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<T = DocumentData> {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$collectionId", default)]
    pub collection_id: String,
    #[serde(rename = "$databaseId", default)]
    pub database_id: String,
    #[serde(rename = "$createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "$updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "$permissions", default)]
    pub permissions: Vec<String>,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Document<T> {
    /// Same metadata, different payload
    pub fn with_data<U>(self, data: U) -> Document<U> {
        Document {
            id: self.id,
            collection_id: self.collection_id,
            database_id: self.database_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            permissions: self.permissions,
            data,
        }
    }
}

impl Document<DocumentData> {
    /// Convert the raw payload into a typed one, keeping the metadata
    pub fn decode<U: DeserializeOwned>(mut self) -> serde_json::Result<Document<U>> {
        let raw = std::mem::take(&mut self.data);
        let data = serde_json::from_value(Value::Object(raw))?;
        Ok(self.with_data(data))
    }
}

/// Page of documents returned by `listDocuments`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentList<T = DocumentData> {
    pub total: u64,
    pub documents: Vec<Document<T>>,
}

impl DocumentList<DocumentData> {
    pub fn decode<U: DeserializeOwned>(self) -> serde_json::Result<DocumentList<U>> {
        let documents = self
            .documents
            .into_iter()
            .map(Document::decode)
            .collect::<serde_json::Result<Vec<_>>>()?;
        Ok(DocumentList {
            total: self.total,
            documents,
        })
    }
}

impl<T> DocumentList<T> {
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn first(&self) -> Option<&Document<T>> {
        self.documents.first()
    }

    pub fn last(&self) -> Option<&Document<T>> {
        self.documents.last()
    }
}

/// Authenticated account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "emailVerification", default)]
    pub email_verification: bool,
    #[serde(default = "default_true")]
    pub status: bool,
    #[serde(rename = "$createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// Login session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Only populated for server-side sessions
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current: bool,
}

/// Stored file metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct File {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "bucketId")]
    pub bucket_id: String,
    pub name: String,
    #[serde(rename = "mimeType", default)]
    pub mime_type: String,
    #[serde(rename = "sizeOriginal", default)]
    pub size_original: u64,
    #[serde(rename = "$createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// File to upload
#[derive(Debug, Clone)]
pub struct InputFile {
    pub name: String,
    pub bytes: Bytes,
    pub mime: mime::Mime,
}

impl InputFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>, mime: mime::Mime) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
            mime,
        }
    }

    /// Guess the content type from the file extension
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let name = name.into();
        let mime = guess_mime(&name);
        Self::new(name, bytes, mime)
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn guess_mime(name: &str) -> mime::Mime {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "png" => mime::IMAGE_PNG,
        "gif" => mime::IMAGE_GIF,
        "svg" => mime::IMAGE_SVG,
        "webp" => "image/webp".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

/// Image gravity for preview crops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gravity {
    Center,
    TopLeft,
    Top,
    TopRight,
    Left,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Gravity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::TopLeft => "top-left",
            Self::Top => "top",
            Self::TopRight => "top-right",
            Self::Left => "left",
            Self::Right => "right",
            Self::BottomLeft => "bottom-left",
            Self::Bottom => "bottom",
            Self::BottomRight => "bottom-right",
        }
    }
}

/// Parameters of a file preview URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewOptions {
    pub width: u32,
    pub height: u32,
    pub gravity: Gravity,
    pub quality: u8,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 2000,
            gravity: Gravity::Top,
            quality: 100,
        }
    }
}
