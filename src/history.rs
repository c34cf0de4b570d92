//! Capped, most-recent-first list of past reports.
//!
//! The list lives under a single key of a small key-value store. Read
//! failures are not distinguished from an empty history.

use crate::report::Report;
use crate::{Error, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;

/// Key the history list is stored under.
pub const HISTORY_KEY: &str = "validationHistory";

pub const DEFAULT_CAPACITY: usize = 50;

/// Minimal get/set storage the history is kept in.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}

/// In-process store; contents are lost when dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by one JSON object in a file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_object(&self) -> Result<serde_json::Map<String, Value>> {
        if !self.path.exists() {
            return Ok(serde_json::Map::new());
        }
        let text = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => Ok(map),
            _ => Err(Error::Storage(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_object()?.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        // A malformed file is replaced; IO failures leave it in place
        let mut map = match self.read_object() {
            Ok(map) => map,
            Err(Error::Io(e)) => {
                return Err(Error::Storage(format!("Cannot read {}: {}", self.path.display(), e)))
            }
            Err(e) => {
                warn!("Replacing unreadable {}: {}", self.path.display(), e);
                serde_json::Map::new()
            }
        };
        map.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::Storage(format!("Cannot create {}: {}", parent.display(), e))
                })?;
            }
        }
        let text = serde_json::to_string_pretty(&Value::Object(map))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, text)
            .and_then(|_| std::fs::rename(&tmp, &self.path))
            .map_err(|e| Error::Storage(format!("Cannot write {}: {}", self.path.display(), e)))?;
        debug!("Wrote {} to {}", key, self.path.display());
        Ok(())
    }
}

/// A stored report with the id it was saved under (creation time in ms).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    #[serde(flatten)]
    pub report: Report,
}

pub struct History<S> {
    store: S,
    capacity: usize,
}

impl<S: KeyValueStore> History<S> {
    pub fn new(store: S, capacity: usize) -> Self {
        Self {
            store,
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stored entries, most recent first. Errors read as an empty list.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        let value = match self.store.get(HISTORY_KEY) {
            Ok(Some(v)) => v,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("History unavailable, treating as empty: {}", e);
                return Vec::new();
            }
        };
        serde_json::from_value(value).unwrap_or_else(|e| {
            warn!("History is malformed, treating as empty: {}", e);
            Vec::new()
        })
    }

    /// Prepend `report` under `id`, evicting the oldest entries past capacity.
    pub fn record(&mut self, report: Report, id: i64) -> Result<HistoryEntry> {
        let entry = HistoryEntry { id, report };

        let mut entries = self.entries();
        entries.insert(0, entry.clone());
        entries.truncate(self.capacity);

        let value = serde_json::to_value(&entries)
            .map_err(|e| Error::Storage(format!("Cannot serialize history: {}", e)))?;
        self.store.set(HISTORY_KEY, value)?;
        debug!("Recorded report {} ({} in history)", id, entries.len());
        Ok(entry)
    }

    pub fn find(&self, id: i64) -> Option<HistoryEntry> {
        self.entries().into_iter().find(|e| e.id == id)
    }
}
