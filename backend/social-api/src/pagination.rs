//! Cursor pagination
//!
//! Pages are fetched forward only: the id of the last document of one page is
//! the cursor for the next.

use appwrite_client::{Document, DocumentList, Query};
use serde::{Deserialize, Serialize};

/// One page of documents plus the cursor for the following page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: u64,
    pub documents: Vec<Document<T>>,
    /// `None` once the end has been reached
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn from_list(list: DocumentList<T>, page_size: u32) -> Self {
        let next_cursor = next_cursor(&list, page_size);
        Self {
            total: list.total,
            documents: list.documents,
            next_cursor,
        }
    }

    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// Base queries, plus `cursorAfter` when a cursor is given
pub fn page_queries(base: Vec<Query>, cursor: Option<&str>) -> Vec<Query> {
    let mut queries = base;
    if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
        queries.push(Query::cursor_after(cursor));
    }
    queries
}

/// Cursor for the page after `list`; a short page is the last one
pub fn next_cursor<T>(list: &DocumentList<T>, page_size: u32) -> Option<String> {
    if list.documents.is_empty() || list.documents.len() < page_size as usize {
        return None;
    }
    list.last().map(|doc| doc.id.clone())
}
