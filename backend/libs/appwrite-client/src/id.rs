use crate::error::{AppwriteError, Result};

const MAX_ID_LEN: usize = 36;

/// Document / file / account identifiers accepted by the platform
pub struct Id;

impl Id {
    /// Ask the platform to allocate a fresh id
    pub fn unique() -> String {
        "unique()".to_string()
    }

    /// Caller-chosen id: 1-36 chars of `[A-Za-z0-9._-]`, starting alphanumeric
    pub fn custom(id: &str) -> Result<String> {
        let valid_chars = id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        let starts_ok = id
            .chars()
            .next()
            .map(|c| c.is_ascii_alphanumeric())
            .unwrap_or(false);

        if id.len() > MAX_ID_LEN || !valid_chars || !starts_ok {
            return Err(AppwriteError::Config(format!("invalid custom id: {:?}", id)));
        }

        Ok(id.to_string())
    }
}
