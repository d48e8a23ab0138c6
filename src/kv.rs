use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::db;

pub const ACCOUNTS_KEY: &str = "assignmate_accounts";
pub const ASSIGNMENTS_KEY: &str = "assignmate_assignments_v1";
pub const SUBMISSIONS_KEY: &str = "assignmate_submissions_v1";

/// String-valued storage for the persisted lists.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

pub struct SqliteKv {
    conn: Connection,
}

impl SqliteKv {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKv {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        db::kv_get(&self.conn, key)
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        db::kv_set(&self.conn, key, value)
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MemoryKv {
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut kv = Self::default();
        kv.entries.insert(key.to_string(), value.to_string());
        kv
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored value is not a JSON array")]
    NotAnArray,
}

/// Parses a stored list. Elements that do not fit `T` are dropped.
pub fn parse_list<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, ParseError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let serde_json::Value::Array(items) = value else {
        return Err(ParseError::NotAnArray);
    };
    let mut out = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<T>(item) {
            Ok(v) => out.push(v),
            Err(e) => tracing::warn!(index = idx, error = %e, "dropping malformed stored row"),
        }
    }
    Ok(out)
}

/// Missing, unreadable or malformed lists all load as empty.
pub fn load_list<T: DeserializeOwned>(kv: &dyn KeyValueStore, key: &str) -> Vec<T> {
    let raw = match kv.get(key) {
        Ok(Some(raw)) if !raw.is_empty() => raw,
        Ok(_) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read stored list");
            return Vec::new();
        }
    };
    parse_list(&raw)
        .map_err(|e| tracing::warn!(key, error = %e, "ignoring unparsable stored list"))
        .unwrap_or_default()
}

/// Best-effort mirror of an in-memory list. Failures are logged and swallowed.
pub fn save_list<T: Serialize>(kv: &mut dyn KeyValueStore, key: &str, items: &[T]) {
    let raw = match serde_json::to_string(items) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to serialize list");
            return;
        }
    };
    if let Err(e) = kv.set(key, &raw) {
        tracing::warn!(key, error = %e, "failed to persist list");
    }
}
