//! File registry: the `fileMap.json` document.
//!
//! Entries are keyed by a caller-chosen `key` (the durable identity). Every write
//! renumbers all entries with a dense, zero-based `id` reflecting their position,
//! so an `id` is only a display rank, valid until the next write.

use super::{Content, Document};
use crate::error::{ApiError, StorageError};
use crate::types::{ContentHash, FileState, FileType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Registry entries in document order, keyed by `FileRecord::key`.
pub type FileMap = IndexMap<String, FileRecord>;

/// One registered file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Durable identity; equals the entry's key in the registry.
    #[serde(default)]
    pub key: String,
    /// Positional rank, recomputed on every registry write.
    #[serde(default)]
    pub id: String,
    pub path: PathBuf,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    pub hash: ContentHash,
    #[serde(default)]
    pub staged: bool,
    #[serde(default)]
    pub deployed: bool,
}

impl FileRecord {
    pub fn new(
        key: impl Into<String>,
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        file_type: FileType,
        hash: ContentHash,
    ) -> Self {
        Self {
            key: key.into(),
            id: String::new(),
            path: path.into(),
            name: name.into(),
            file_type,
            hash,
            staged: false,
            deployed: false,
        }
    }

    /// Map the two stored flags onto a lifecycle state, rejecting deployed-but-unstaged.
    pub fn state(&self) -> Result<FileState, ApiError> {
        match (self.staged, self.deployed) {
            (false, false) => Ok(FileState::Registered),
            (true, false) => Ok(FileState::Staged),
            (true, true) => Ok(FileState::Deployed),
            (false, true) => Err(ApiError::InconsistentState(self.key.clone())),
        }
    }
}

/// The registry document.
#[derive(Debug)]
pub struct Registry {
    document: Document,
}

impl Registry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            document: Document::new(path, json!({})),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn path(&self) -> &Path {
        self.document.path()
    }

    pub fn content(&self) -> Result<Content, StorageError> {
        self.document.content()
    }

    /// Renumber every entry by position, then replace the document.
    pub fn set_content(&mut self, mut content: Content) -> Result<(), StorageError> {
        assign_positional_ids(&mut content);
        self.document.set_content(content)
    }

    /// Parsed entries in document order.
    pub fn entries(&self) -> Result<FileMap, StorageError> {
        let content = self.document.content()?;
        let mut entries = FileMap::with_capacity(content.len());
        for (key, value) in content {
            let mut record: FileRecord =
                serde_json::from_value(value).map_err(|source| StorageError::ParseError {
                    path: self.document.path().to_path_buf(),
                    source,
                })?;
            record.key = key.clone();
            entries.insert(key, record);
        }
        Ok(entries)
    }

    pub fn set_entries(&mut self, entries: FileMap) -> Result<(), StorageError> {
        let mut content = Content::new();
        for (key, mut record) in entries {
            record.key = key.clone();
            let value = serde_json::to_value(&record).map_err(|source| {
                StorageError::SerializeError {
                    path: self.document.path().to_path_buf(),
                    source,
                }
            })?;
            content.insert(key, value);
        }
        self.set_content(content)
    }

    pub fn get(&self, key: &str) -> Result<Option<FileRecord>, StorageError> {
        Ok(self.entries()?.shift_remove(key))
    }

    /// Look up the entry currently holding positional `id`.
    pub fn find_by_id(&self, id: &str) -> Result<Option<FileRecord>, StorageError> {
        Ok(self
            .entries()?
            .into_values()
            .find(|record| record.id == id))
    }
}

/// Set each object entry's `id` to its zero-based position as a string.
pub fn assign_positional_ids(content: &mut Content) {
    for (position, value) in content.values_mut().enumerate() {
        if let Value::Object(entry) = value {
            entry.insert("id".to_string(), Value::String(position.to_string()));
        }
    }
}
