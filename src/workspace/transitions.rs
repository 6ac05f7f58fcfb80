//! Per-file state transitions: register from disk, stage, deploy, reverse, drop.
//!
//! Records move `registered -> staged -> deployed`, with `reverse` taking a
//! deployed file back to staged. Every transition rewrites the registry.

use super::Workspace;
use crate::error::{ApiError, StorageError};
use crate::hasher;
use crate::store::FileRecord;
use crate::transform::Transformer;
use crate::types::{FileState, FileType};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

impl Workspace {
    pub fn record(&self, key: &str) -> Result<FileRecord, ApiError> {
        self.topology
            .file_map
            .get(key)?
            .ok_or_else(|| ApiError::NotRegistered(key.to_string()))
    }

    /// Record currently holding positional `id`.
    pub fn record_by_id(&self, id: &str) -> Result<FileRecord, ApiError> {
        self.topology
            .file_map
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotRegistered(id.to_string()))
    }

    /// All records in registry order.
    pub fn records(&self) -> Result<Vec<FileRecord>, ApiError> {
        Ok(self.topology.file_map.entries()?.into_values().collect())
    }

    /// Copy `path` into the source folder and register it under its file name.
    pub fn register_file(&mut self, path: &Path) -> Result<FileRecord, ApiError> {
        self.ensure_valid()?;

        let path = dunce::canonicalize(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ApiError::SourceNotFound(path.to_path_buf())
            } else {
                ApiError::from(e)
            }
        })?;
        let file_type = self
            .settings()?
            .type_for_path(&path)
            .ok_or_else(|| ApiError::UnknownExtension(path.display().to_string()))?;
        let key = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| StorageError::InvalidPath(format!("{} has no file name", path.display())))?
            .to_string();

        if self.topology.file_map.get(&key)?.is_some() {
            return Err(ApiError::DuplicateKey(key));
        }

        let source = self.source_path(&key);
        self.copy(&path, &source)?;
        match self.register(&path, &key, file_type) {
            Ok(record) => Ok(record),
            Err(e) => {
                self.remove_files(&[source])?;
                Err(e)
            }
        }
    }

    /// Compare the stored fingerprint against the current source bytes.
    pub fn verify_hash(&self, key: &str) -> Result<(), ApiError> {
        let record = self.record(key)?;
        let source = self.source_path(key);
        let actual = hasher::compute_file_hash(&source).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ApiError::SourceNotFound(source.clone())
            } else {
                ApiError::from(e)
            }
        })?;
        if actual != record.hash {
            return Err(ApiError::HashMismatch {
                key: key.to_string(),
                expected: record.hash,
                actual,
            });
        }
        Ok(())
    }

    /// Transform the source copy into the staged folder.
    pub fn stage(
        &mut self,
        key: &str,
        transformer: &mut dyn Transformer,
    ) -> Result<FileRecord, ApiError> {
        self.ensure_valid()?;
        let mut record = self.record(key)?;
        if record.state()? == FileState::Deployed {
            return Err(ApiError::FileIsDeployed(key.to_string()));
        }
        if !self.settings()?.values().no_hash {
            self.verify_hash(key)?;
        }

        let source = std::fs::read_to_string(self.source_path(key)).map_err(StorageError::IoError)?;
        let mut selectors = self.selector_map()?;
        let staged = match record.file_type {
            FileType::Css => transformer.transform_stylesheet(&source, &mut selectors)?,
            FileType::Html => transformer
                .rewrite_markup(&source, &selectors)?
                .unwrap_or(source),
            FileType::Js => source,
        };
        self.create_file(&self.staged_path(key), &staged)?;
        self.set_selector_map(&selectors)?;

        record.staged = true;
        info!(key, "File staged");
        self.update_record(record)
    }

    /// Write the staged copy over the target, keeping a backup of the original.
    pub fn deploy(&mut self, key: &str) -> Result<FileRecord, ApiError> {
        self.ensure_valid()?;
        let mut record = self.record(key)?;
        match record.state()? {
            FileState::Registered => return Err(ApiError::FileNotStaged(key.to_string())),
            FileState::Deployed => return Err(ApiError::FileIsDeployed(key.to_string())),
            FileState::Staged => {}
        }

        let staged = self.staged_path(key);
        if !staged.is_file() {
            return Err(ApiError::SourceNotFound(staged));
        }
        if record.path.is_file() {
            self.copy(&record.path, &self.backup_path(key))?;
        }
        self.copy(&staged, &record.path)?;

        record.deployed = true;
        info!(key, target = %record.path.display(), "File deployed");
        self.update_record(record)
    }

    /// Restore the backed-up original and return the record to staged.
    pub fn reverse(&mut self, key: &str) -> Result<FileRecord, ApiError> {
        self.ensure_valid()?;
        let mut record = self.record(key)?;
        if record.state()? != FileState::Deployed {
            return Err(ApiError::FileNotDeployed(key.to_string()));
        }

        let backup = self.backup_path(key);
        if backup.is_file() {
            self.copy(&backup, &record.path)?;
            self.remove_files([&backup])?;
        } else {
            warn!(key, "No backup found; removing deployed file");
            self.remove_files([&record.path])?;
        }

        record.deployed = false;
        info!(key, target = %record.path.display(), "Deployment reversed");
        self.update_record(record)
    }

    /// Remove a record and its workspace copies. Deployed files must be reversed first.
    pub fn drop_file(&mut self, key: &str) -> Result<FileRecord, ApiError> {
        self.ensure_valid()?;
        let mut entries = self.topology.file_map.entries()?;
        let record = entries
            .shift_remove(key)
            .ok_or_else(|| ApiError::NotRegistered(key.to_string()))?;
        if record.deployed {
            return Err(ApiError::FileIsDeployed(key.to_string()));
        }
        self.topology.file_map.set_entries(entries)?;
        self.remove_files([
            self.source_path(key),
            self.staged_path(key),
            self.backup_path(key),
        ])?;
        info!(key, "File dropped from workspace");
        Ok(record)
    }

    pub fn source_path(&self, key: &str) -> PathBuf {
        self.topology.src.path().join(key)
    }

    pub fn staged_path(&self, key: &str) -> PathBuf {
        self.topology.staged.path().join(key)
    }

    pub fn backup_path(&self, key: &str) -> PathBuf {
        self.topology.bak.path().join(key)
    }

    fn update_record(&mut self, record: FileRecord) -> Result<FileRecord, ApiError> {
        let key = record.key.clone();
        let mut entries = self.topology.file_map.entries()?;
        entries.insert(key.clone(), record);
        self.topology.file_map.set_entries(entries)?;
        self.record(&key)
    }
}
