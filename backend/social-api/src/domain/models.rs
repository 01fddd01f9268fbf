use appwrite_client::{Document, InputFile};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Reference to another document
///
/// The platform returns relationships either as a bare id or as the expanded
/// document, depending on the query. Writes always send the id.
#[derive(Debug, Clone)]
pub enum Related<T> {
    Id(String),
    Document(Box<Document<T>>),
}

impl<T> Related<T> {
    pub fn id(&self) -> &str {
        match self {
            Related::Id(id) => id,
            Related::Document(doc) => &doc.id,
        }
    }

    pub fn document(&self) -> Option<&Document<T>> {
        match self {
            Related::Id(_) => None,
            Related::Document(doc) => Some(doc),
        }
    }
}

impl<T> Serialize for Related<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Related<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::String(id) => Ok(Related::Id(id)),
            other => serde_json::from_value(other)
                .map(|doc| Related::Document(Box::new(doc)))
                .map_err(serde::de::Error::custom),
        }
    }
}

/// User profile document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Id of the auth account this profile belongs to
    pub accountid: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub imageurl: Option<String>,
    /// Storage id of an uploaded avatar; absent for generated initials
    #[serde(default)]
    pub imageid: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Post document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Creator
    #[serde(default)]
    pub users: Option<Related<User>>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(rename = "imageURL", default)]
    pub image_url: Option<String>,
    #[serde(rename = "imageid", default)]
    pub image_id: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub likes: Vec<Related<User>>,
}

impl Post {
    pub fn creator_id(&self) -> Option<&str> {
        self.users.as_ref().map(Related::id)
    }

    pub fn like_ids(&self) -> Vec<String> {
        self.likes.iter().map(|u| u.id().to_string()).collect()
    }
}

/// Join record between a user and a post they saved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPost {
    pub users: Related<User>,
    pub posts: Related<Post>,
}

/// Stored file plus the preview URL derived from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: String,
    pub preview_url: String,
}

/// Result of delete-style operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub status: String,
}

impl Status {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Sign-up form
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Profile edit form
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub user_id: String,
    pub name: String,
    pub bio: Option<String>,
    /// Current avatar storage id, if it is an uploaded file
    pub image_id: Option<String>,
    pub image_url: Option<String>,
    /// Replacement avatar
    pub file: Option<InputFile>,
}

/// New post form
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: String,
    pub caption: String,
    pub file: InputFile,
    pub location: Option<String>,
    /// Comma-separated
    pub tags: Option<String>,
}

/// Post edit form
#[derive(Debug, Clone)]
pub struct UpdatePost {
    pub post_id: String,
    pub caption: String,
    pub image_id: String,
    pub image_url: String,
    /// Replacement image
    pub file: Option<InputFile>,
    pub location: Option<String>,
    /// Comma-separated
    pub tags: Option<String>,
}

// ---------------------------------------------------------------------------
// Write payloads
// ---------------------------------------------------------------------------

/// User document as written on sign-up
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    pub accountid: String,
    pub email: String,
    pub name: String,
    pub imageurl: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct UserChanges {
    pub name: String,
    pub bio: Option<String>,
    pub imageurl: Option<String>,
    pub imageid: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct PostRecord {
    pub users: String,
    pub caption: String,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    #[serde(rename = "imageid")]
    pub image_id: String,
    pub location: Option<String>,
    pub tags: Vec<String>,
}

impl From<PostRecord> for Post {
    fn from(record: PostRecord) -> Self {
        Self {
            users: Some(Related::Id(record.users)),
            caption: Some(record.caption),
            image_url: Some(record.image_url),
            image_id: Some(record.image_id),
            location: record.location,
            tags: record.tags,
            likes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct PostChanges {
    pub caption: String,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    #[serde(rename = "imageid")]
    pub image_id: String,
    pub location: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SaveRecord {
    pub users: String,
    pub posts: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_with_expanded_creator() {
        let post: Post = serde_json::from_value(json!({
            "users": {
                "$id": "u1",
                "accountid": "acc1",
                "name": "Ada",
                "email": "ada@example.com",
                "username": "ada"
            },
            "caption": "hello",
            "imageURL": "https://img",
            "imageid": "f1",
            "location": null,
            "tags": ["sun"],
            "likes": ["u2", "u3"]
        }))
        .unwrap();

        assert_eq!(post.creator_id(), Some("u1"));
        assert_eq!(
            post.users.as_ref().and_then(|u| u.document()).map(|d| d.data.name.as_str()),
            Some("Ada")
        );
        assert_eq!(post.like_ids(), vec!["u2", "u3"]);
        assert_eq!(post.location, None);
    }

    #[test]
    fn test_related_serializes_as_id() {
        let save = SavedPost {
            users: Related::Id("u1".to_string()),
            posts: Related::Id("p1".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&save).unwrap(),
            json!({ "users": "u1", "posts": "p1" })
        );
    }

    #[test]
    fn test_post_record_field_names() {
        let record = PostRecord {
            users: "u1".to_string(),
            caption: "c".to_string(),
            image_url: "https://img".to_string(),
            image_id: "f1".to_string(),
            location: Some("Lisbon".to_string()),
            tags: vec!["a".to_string()],
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["imageURL"], json!("https://img"));
        assert_eq!(value["imageid"], json!("f1"));
    }

    #[test]
    fn test_status_ok() {
        assert!(Status::ok().is_ok());
    }
}
