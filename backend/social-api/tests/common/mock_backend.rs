//! In-memory Backend for workflow tests
//!
//! Keeps documents, files and the session in memory, records every call, and
//! can be told to fail writes to a collection or file deletions.

use appwrite_client::{
    Account, AppwriteError, Document, DocumentData, DocumentList, File, InputFile, PreviewOptions,
    Query, Result, Session,
};
use async_trait::async_trait;
use serde_json::Value;
use social_api::Backend;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use url::Url;

#[derive(Default)]
struct State {
    documents: HashMap<String, Vec<Document>>,
    files: HashMap<String, File>,
    account: Option<(Account, String)>,
    signed_in: bool,
    next_id: u64,
    calls: Vec<String>,
    failing_collections: HashSet<String>,
    fail_file_deletes: bool,
}

impl State {
    fn allocate(&mut self, requested: &str, prefix: &str) -> String {
        if requested == "unique()" {
            self.next_id += 1;
            format!("{}-{}", prefix, self.next_id)
        } else {
            requested.to_string()
        }
    }
}

#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<State>>,
}

fn api_error(code: u16, kind: &str, message: &str) -> AppwriteError {
    AppwriteError::Api {
        code,
        kind: kind.to_string(),
        message: message.to_string(),
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every create/update in `collection_id` fail with a 500
    pub fn fail_writes_to(&self, collection_id: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_collections
            .insert(collection_id.to_string());
    }

    pub fn fail_file_deletes(&self) {
        self.state.lock().unwrap().fail_file_deletes = true;
    }

    /// Seed a document directly, bypassing the call log
    pub fn insert_document(&self, collection_id: &str, id: &str, data: Value) {
        let data = match data {
            Value::Object(map) => map,
            _ => DocumentData::new(),
        };
        self.state
            .lock()
            .unwrap()
            .documents
            .entry(collection_id.to_string())
            .or_default()
            .push(document(collection_id, id, data));
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Calls whose name is `name`, e.g. `"delete_file"`
    pub fn calls_to(&self, name: &str) -> Vec<String> {
        let prefix = format!("{}:", name);
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(&prefix))
            .collect()
    }

    pub fn documents(&self, collection_id: &str) -> Vec<Document> {
        self.state
            .lock()
            .unwrap()
            .documents
            .get(collection_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn file_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.state.lock().unwrap().files.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }
}

fn document(collection_id: &str, id: &str, data: DocumentData) -> Document {
    Document {
        id: id.to_string(),
        collection_id: collection_id.to_string(),
        database_id: "db".to_string(),
        created_at: None,
        updated_at: None,
        permissions: Vec::new(),
        data,
    }
}

fn matches(doc: &Document, query: &Query) -> bool {
    let Some(attribute) = query.attribute() else {
        return true;
    };
    match query.method() {
        "equal" => doc
            .data
            .get(attribute)
            .map(|v| query.values().contains(v))
            .unwrap_or(false),
        "search" => {
            let term = query.values().first().and_then(Value::as_str).unwrap_or("");
            doc.data
                .get(attribute)
                .and_then(Value::as_str)
                .map(|s| s.contains(term))
                .unwrap_or(false)
        }
        _ => true,
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn create_account(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Account> {
        self.record(format!("create_account:{}", email));
        let mut state = self.state.lock().unwrap();
        if state.account.as_ref().map(|(a, _)| a.email == email).unwrap_or(false) {
            return Err(api_error(409, "user_already_exists", "account exists"));
        }
        let id = state.allocate(user_id, "acc");
        let account = Account {
            id,
            name: name.to_string(),
            email: email.to_string(),
            email_verification: false,
            status: true,
            created_at: None,
        };
        state.account = Some((account.clone(), password.to_string()));
        Ok(account)
    }

    async fn create_email_session(&self, email: &str, password: &str) -> Result<Session> {
        self.record(format!("create_email_session:{}", email));
        let mut state = self.state.lock().unwrap();
        let user_id = match &state.account {
            Some((account, pw)) if account.email == email && pw == password => account.id.clone(),
            _ => return Err(api_error(401, "user_invalid_credentials", "invalid credentials")),
        };
        state.signed_in = true;
        Ok(Session {
            id: "sess-1".to_string(),
            user_id,
            secret: String::new(),
            provider: "email".to_string(),
            expire: None,
            current: true,
        })
    }

    async fn get_account(&self) -> Result<Account> {
        self.record("get_account:".to_string());
        let state = self.state.lock().unwrap();
        match (&state.account, state.signed_in) {
            (Some((account, _)), true) => Ok(account.clone()),
            _ => Err(api_error(401, "general_unauthorized_scope", "guest")),
        }
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        self.record(format!("delete_session:{}", session_id));
        let mut state = self.state.lock().unwrap();
        if !state.signed_in {
            return Err(api_error(401, "general_unauthorized_scope", "guest"));
        }
        state.signed_in = false;
        Ok(())
    }

    async fn create_document(
        &self,
        _database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> Result<Document> {
        self.record(format!("create_document:{}", collection_id));
        let mut state = self.state.lock().unwrap();
        if state.failing_collections.contains(collection_id) {
            return Err(api_error(500, "general_unknown", "write failed"));
        }
        let id = state.allocate(document_id, collection_id);
        let data = match data {
            Value::Object(map) => map,
            _ => return Err(api_error(400, "document_invalid_structure", "not an object")),
        };
        let doc = document(collection_id, &id, data);
        state
            .documents
            .entry(collection_id.to_string())
            .or_default()
            .push(doc.clone());
        Ok(doc)
    }

    async fn get_document(
        &self,
        _database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<Document> {
        self.record(format!("get_document:{}/{}", collection_id, document_id));
        let state = self.state.lock().unwrap();
        state
            .documents
            .get(collection_id)
            .and_then(|docs| docs.iter().find(|d| d.id == document_id))
            .cloned()
            .ok_or_else(|| api_error(404, "document_not_found", "Document not found"))
    }

    async fn update_document(
        &self,
        _database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> Result<Document> {
        self.record(format!("update_document:{}/{}", collection_id, document_id));
        let mut state = self.state.lock().unwrap();
        if state.failing_collections.contains(collection_id) {
            return Err(api_error(500, "general_unknown", "write failed"));
        }
        let doc = state
            .documents
            .get_mut(collection_id)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == document_id))
            .ok_or_else(|| api_error(404, "document_not_found", "Document not found"))?;
        if let Value::Object(changes) = data {
            for (key, value) in changes {
                doc.data.insert(key, value);
            }
        }
        Ok(doc.clone())
    }

    async fn delete_document(
        &self,
        _database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<()> {
        self.record(format!("delete_document:{}/{}", collection_id, document_id));
        let mut state = self.state.lock().unwrap();
        let docs = state.documents.entry(collection_id.to_string()).or_default();
        let before = docs.len();
        docs.retain(|d| d.id != document_id);
        if docs.len() == before {
            return Err(api_error(404, "document_not_found", "Document not found"));
        }
        Ok(())
    }

    async fn list_documents(
        &self,
        _database_id: &str,
        collection_id: &str,
        queries: Vec<Query>,
    ) -> Result<DocumentList> {
        self.record(format!("list_documents:{}", collection_id));
        let state = self.state.lock().unwrap();
        let mut docs: Vec<Document> = state
            .documents
            .get(collection_id)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|d| queries.iter().all(|q| matches(d, q)))
            .collect();
        let total = docs.len() as u64;

        if let Some(cursor) = queries
            .iter()
            .find(|q| q.method() == "cursorAfter")
            .and_then(|q| q.values().first())
            .and_then(Value::as_str)
        {
            let position = docs.iter().position(|d| d.id == cursor);
            docs = match position {
                Some(p) => docs.split_off(p + 1),
                None => return Err(api_error(400, "general_cursor_not_found", "cursor")),
            };
        }

        if let Some(limit) = queries
            .iter()
            .find(|q| q.method() == "limit")
            .and_then(|q| q.values().first())
            .and_then(Value::as_u64)
        {
            docs.truncate(limit as usize);
        }

        Ok(DocumentList {
            total,
            documents: docs,
        })
    }

    async fn create_file(&self, bucket_id: &str, file_id: &str, file: InputFile) -> Result<File> {
        self.record(format!("create_file:{}", file.name));
        let mut state = self.state.lock().unwrap();
        let id = state.allocate(file_id, "file");
        let stored = File {
            id: id.clone(),
            bucket_id: bucket_id.to_string(),
            name: file.name.clone(),
            mime_type: file.mime.to_string(),
            size_original: file.bytes.len() as u64,
            created_at: None,
        };
        state.files.insert(id, stored.clone());
        Ok(stored)
    }

    fn file_preview_url(
        &self,
        bucket_id: &str,
        file_id: &str,
        options: &PreviewOptions,
    ) -> Result<Url> {
        Ok(Url::parse(&format!(
            "https://fake.local/storage/buckets/{}/files/{}/preview?width={}&height={}",
            bucket_id, file_id, options.width, options.height
        ))?)
    }

    async fn delete_file(&self, _bucket_id: &str, file_id: &str) -> Result<()> {
        self.record(format!("delete_file:{}", file_id));
        let mut state = self.state.lock().unwrap();
        if state.fail_file_deletes {
            return Err(api_error(503, "general_service_disabled", "storage down"));
        }
        state
            .files
            .remove(file_id)
            .map(|_| ())
            .ok_or_else(|| api_error(404, "storage_file_not_found", "File not found"))
    }

    fn avatar_initials_url(&self, name: &str) -> Result<Url> {
        let mut url = Url::parse("https://fake.local/avatars/initials")?;
        url.query_pairs_mut().append_pair("name", name);
        Ok(url)
    }
}
