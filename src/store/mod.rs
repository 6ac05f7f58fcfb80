//! Workspace Store
//!
//! JSON-backed documents and plain folders that make up the on-disk state of a
//! workspace. A [`Document`] is loaded lazily, cached for the lifetime of the
//! process, and written through on every update. The [`Registry`] specializes
//! the write path to renumber its entries.

pub mod registry;

pub use registry::{FileMap, FileRecord, Registry};

use crate::error::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// JSON object payload of a document, in file order.
pub type Content = Map<String, Value>;

/// A directory owned by the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    path: PathBuf,
}

impl Folder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }
}

/// A JSON object persisted at `path`, with `default` standing in while the file
/// is absent or empty.
///
/// Once read, the cache is authoritative until the next write from this process.
#[derive(Debug)]
pub struct Document {
    path: PathBuf,
    default: Value,
    cache: RefCell<Option<Content>>,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, default: Value) -> Self {
        Self {
            path: path.into(),
            default,
            cache: RefCell::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn default_payload(&self) -> &Value {
        &self.default
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Current content: cached, else read from disk, else the default payload.
    pub fn content(&self) -> Result<Content, StorageError> {
        let loaded = {
            let mut cache = self.cache.borrow_mut();
            match cache.as_ref() {
                Some(cached) => cached.clone(),
                None => {
                    let read = self.read()?;
                    *cache = Some(read.clone());
                    read
                }
            }
        };

        if loaded.is_empty() {
            return self.default_content();
        }
        Ok(loaded)
    }

    /// Replace the whole document on disk, then refresh the cache.
    pub fn set_content(&mut self, content: Content) -> Result<(), StorageError> {
        let serialized = serde_json::to_string_pretty(&content).map_err(|source| {
            StorageError::SerializeError {
                path: self.path.clone(),
                source,
            }
        })?;
        write_atomic(&self.path, serialized.as_bytes())?;
        debug!(path = %self.path.display(), entries = content.len(), "Document written");
        *self.cache.get_mut() = Some(content);
        Ok(())
    }

    /// Deserialize the current content into `T`.
    pub fn read_as<T: DeserializeOwned>(&self) -> Result<T, StorageError> {
        let content = self.content()?;
        serde_json::from_value(Value::Object(content)).map_err(|source| StorageError::ParseError {
            path: self.path.clone(),
            source,
        })
    }

    /// Serialize `value` and replace the document with it.
    pub fn write_as<T: Serialize>(&mut self, value: &T) -> Result<(), StorageError> {
        match serde_json::to_value(value) {
            Ok(Value::Object(content)) => self.set_content(content),
            Ok(_) => Err(StorageError::NotAnObject(self.path.clone())),
            Err(source) => Err(StorageError::SerializeError {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Write the default payload unless the backing file already exists.
    ///
    /// Returns `true` when the file was created.
    pub fn write_default_if_absent(&self) -> Result<bool, StorageError> {
        if self.exists() {
            return Ok(false);
        }
        let serialized = serde_json::to_string_pretty(&self.default).map_err(|source| {
            StorageError::SerializeError {
                path: self.path.clone(),
                source,
            }
        })?;
        write_atomic(&self.path, serialized.as_bytes())?;
        debug!(path = %self.path.display(), "Document created with default payload");
        Ok(true)
    }

    /// Forget the cached content so the next read goes to disk.
    pub fn invalidate(&mut self) {
        *self.cache.get_mut() = None;
    }

    fn default_content(&self) -> Result<Content, StorageError> {
        match &self.default {
            Value::Object(content) => Ok(content.clone()),
            Value::Null => Ok(Content::new()),
            _ => Err(StorageError::NotAnObject(self.path.clone())),
        }
    }

    fn read(&self) -> Result<Content, StorageError> {
        if !self.exists() {
            return Ok(Content::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Content::new());
        }
        let value: Value = serde_json::from_str(&raw).map_err(|source| StorageError::ParseError {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "Document loaded");
        match value {
            Value::Object(content) => Ok(content),
            Value::Null => Ok(Content::new()),
            _ => Err(StorageError::NotAnObject(self.path.clone())),
        }
    }
}

/// Write through a sibling temp file and rename it over `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let parent = path.parent().ok_or_else(|| {
        StorageError::InvalidPath(format!("{} has no parent directory", path.display()))
    })?;
    let existing = std::fs::metadata(path).ok().map(|meta| meta.permissions());

    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    if existing.is_none() {
        use std::os::unix::fs::PermissionsExt;
        // Same mode a plain create gets; the umask still applies.
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(parent)?;
    if let Some(permissions) = existing {
        tmp.as_file().set_permissions(permissions)?;
    }
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StorageError::IoError(e.error))?;
    Ok(())
}
