//! Query primitives for `listDocuments`
//!
//! Each query serializes to the platform's JSON query form, e.g.
//! `{"method":"equal","attribute":"accountid","values":["abc"]}`, and is sent
//! as one `queries[]` URL parameter.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    attribute: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    values: Vec<Value>,
}

impl Query {
    fn new(method: &'static str, attribute: Option<&str>, values: Vec<Value>) -> Self {
        Self {
            method,
            attribute: attribute.map(str::to_string),
            values,
        }
    }

    pub fn equal<V: Into<Value>>(attribute: &str, value: V) -> Self {
        Self::new("equal", Some(attribute), vec![value.into()])
    }

    /// Attribute equals any of `values`
    pub fn equal_any<V: Into<Value>>(attribute: &str, values: Vec<V>) -> Self {
        Self::new(
            "equal",
            Some(attribute),
            values.into_iter().map(Into::into).collect(),
        )
    }

    pub fn not_equal<V: Into<Value>>(attribute: &str, value: V) -> Self {
        Self::new("notEqual", Some(attribute), vec![value.into()])
    }

    /// Full-text search; the attribute needs a fulltext index
    pub fn search(attribute: &str, term: &str) -> Self {
        Self::new("search", Some(attribute), vec![Value::from(term)])
    }

    pub fn order_asc(attribute: &str) -> Self {
        Self::new("orderAsc", Some(attribute), Vec::new())
    }

    pub fn order_desc(attribute: &str) -> Self {
        Self::new("orderDesc", Some(attribute), Vec::new())
    }

    pub fn limit(limit: u32) -> Self {
        Self::new("limit", None, vec![Value::from(limit)])
    }

    pub fn offset(offset: u32) -> Self {
        Self::new("offset", None, vec![Value::from(offset)])
    }

    pub fn cursor_after(document_id: &str) -> Self {
        Self::new("cursorAfter", None, vec![Value::from(document_id)])
    }

    pub fn cursor_before(document_id: &str) -> Self {
        Self::new("cursorBefore", None, vec![Value::from(document_id)])
    }

    pub fn method(&self) -> &str {
        self.method
    }

    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
