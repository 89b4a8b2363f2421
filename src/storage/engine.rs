//! Flat-file table store.
//!
//! Tables are named, ordered vectors of JSON records, held in memory and
//! serialized as one JSON document after every mutation.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

/// One record: a field-name → JSON value mapping.
pub type Record = serde_json::Map<String, Value>;

/// Per-field substring search criteria for `select`.
pub type Filter = HashMap<String, String>;

/// Result type alias using StoreError.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("record not found")]
    RecordNotFound,
}

/// In-memory table set backed by a single JSON file.
pub struct Store {
    path: PathBuf,
    tables: BTreeMap<String, Vec<Record>>,
}

impl Store {
    /// Open a store, loading the data file if it exists.
    ///
    /// A missing file yields empty tables; the file is created on the first
    /// mutation. Parent directories are created eagerly so the first persist
    /// cannot fail on a missing directory.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tables = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self { path, tables })
    }

    /// Return records from `table` in insertion order.
    ///
    /// Without a filter, all records are returned. With a filter, a record
    /// matches when any filtered field's value, rendered as text, contains
    /// that field's term as a case-sensitive substring. `null` and missing
    /// fields never match.
    pub fn select(&self, table: &str, filter: Option<&Filter>) -> Vec<Record> {
        let rows = match self.tables.get(table) {
            Some(rows) => rows,
            None => return Vec::new(),
        };

        match filter {
            None => rows.clone(),
            Some(filter) => rows
                .iter()
                .filter(|row| matches_filter(row, filter))
                .cloned()
                .collect(),
        }
    }

    /// Append a record to `table` and persist.
    pub fn insert(&mut self, table: &str, record: Record) -> Result<()> {
        self.tables.entry(table.to_string()).or_default().push(record);
        self.persist()
    }

    /// Replace the fields present in `patch` on the record whose `id` field
    /// equals `id`, leaving other fields untouched, then persist.
    pub fn update(&mut self, table: &str, id: &str, patch: Record) -> Result<()> {
        let rows = self.tables.get_mut(table).ok_or(StoreError::RecordNotFound)?;
        let row = rows
            .iter_mut()
            .find(|row| row.get("id").and_then(Value::as_str) == Some(id))
            .ok_or(StoreError::RecordNotFound)?;

        for (field, value) in patch {
            row.insert(field, value);
        }
        self.persist()
    }

    /// Remove the record whose `id` field equals `id`, then persist.
    pub fn delete(&mut self, table: &str, id: &str) -> Result<()> {
        let rows = self.tables.get_mut(table).ok_or(StoreError::RecordNotFound)?;
        let position = rows
            .iter()
            .position(|row| row.get("id").and_then(Value::as_str) == Some(id))
            .ok_or(StoreError::RecordNotFound)?;

        rows.remove(position);
        self.persist()
    }

    /// Serialize every table to the data file.
    ///
    /// Writes to a sibling temp file, fsyncs, and renames over the target so
    /// the previous contents survive a failed write.
    fn persist(&self) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&self.tables)?;

        let tmp = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn matches_filter(row: &Record, filter: &Filter) -> bool {
    // Union semantics: one matching field is enough.
    filter.iter().any(|(field, term)| match row.get(field) {
        Some(Value::String(text)) => text.contains(term.as_str()),
        Some(Value::Null) | None => false,
        Some(other) => other.to_string().contains(term.as_str()),
    })
}
