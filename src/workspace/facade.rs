//! Workspace facade: structure creation, registration, and bulk file operations.

use crate::config::LiqConfig;
use crate::error::{ApiError, StorageError};
use crate::hasher;
use crate::settings::Settings;
use crate::store::FileRecord;
use crate::topology::{Topology, DEFAULT_FOLDER_NAME};
use crate::transform::SelectorMap;
use crate::types::FileType;
use crate::workspace::types::WorkspaceStatus;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A workspace rooted at `<base_dir>/<folder_name>`.
///
/// Constructed fresh for each command; holds no state beyond the lazily
/// loaded documents of its topology.
#[derive(Debug)]
pub struct Workspace {
    pub(super) topology: Topology,
}

impl Workspace {
    pub fn new(base_dir: impl Into<PathBuf>, folder_name: impl Into<String>) -> Self {
        Self {
            topology: Topology::new(base_dir, folder_name),
        }
    }

    /// Workspace under `base_dir` using the default `liq` folder.
    pub fn with_default_folder(base_dir: impl Into<PathBuf>) -> Self {
        Self::new(base_dir, DEFAULT_FOLDER_NAME)
    }

    pub fn from_config(base_dir: impl Into<PathBuf>, config: &LiqConfig) -> Self {
        Self::new(base_dir, config.workspace.folder_name.clone())
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn root(&self) -> &Path {
        self.topology.root()
    }

    /// Create every folder and every missing document. Existing state is kept.
    pub fn init(&mut self) -> Result<(), ApiError> {
        for folder in self.topology.folders() {
            std::fs::create_dir_all(folder.path()).map_err(StorageError::IoError)?;
        }
        for document in self.topology.files() {
            if document.write_default_if_absent()? {
                debug!(path = %document.path().display(), "Created workspace document");
            }
        }
        info!(root = %self.root().display(), "Workspace initialized");
        Ok(())
    }

    /// Delete the whole workspace folder and initialize it again.
    pub fn reset(&mut self) -> Result<(), ApiError> {
        let root = self.root().to_path_buf();
        match std::fs::remove_dir_all(&root) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(root = %root.display(), "Workspace folder missing on reset");
            }
            Err(e) => return Err(StorageError::IoError(e).into()),
        }
        for document in self.topology.files_mut() {
            document.invalidate();
        }
        info!(root = %root.display(), "Workspace removed");
        self.init()
    }

    /// True iff every declared folder and document exists.
    pub fn validate(&self) -> bool {
        let folders = self.topology.folders().into_iter().map(|folder| folder.exists());
        let files = self.topology.files().into_iter().map(|document| document.exists());
        folders.chain(files).all(|exists| exists)
    }

    /// Gate for operations that need an initialized workspace.
    pub fn ensure_valid(&self) -> Result<(), ApiError> {
        if self.validate() {
            Ok(())
        } else {
            Err(ApiError::WorkspaceNotFound(self.root().to_path_buf()))
        }
    }

    pub fn settings(&self) -> Result<Settings, ApiError> {
        Ok(Settings::load(&self.topology.settings)?)
    }

    /// Register the file already copied to `<src>/<key>` as the source of `path`.
    pub fn register(
        &mut self,
        path: &Path,
        key: &str,
        file_type: FileType,
    ) -> Result<FileRecord, ApiError> {
        let mut entries = self.topology.file_map.entries()?;
        if entries.contains_key(key) {
            return Err(ApiError::DuplicateKey(key.to_string()));
        }

        let source = self.topology.src.path().join(key);
        let hash = hasher::compute_file_hash(&source).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ApiError::SourceNotFound(source.clone())
            } else {
                ApiError::from(e)
            }
        })?;

        let target = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.topology.base_dir().join(path)
        };
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                StorageError::InvalidPath(format!("{} has no file name", path.display()))
            })?
            .to_string();

        entries.insert(
            key.to_string(),
            FileRecord::new(key, target, name, file_type, hash),
        );
        self.topology.file_map.set_entries(entries)?;
        info!(key, file_type = %file_type, "File registered");
        self.record(key)
    }

    /// Ids of every record currently deployed.
    pub fn files_deployed(&self) -> Result<Vec<String>, ApiError> {
        Ok(self
            .topology
            .file_map
            .entries()?
            .into_values()
            .filter(|record| record.deployed)
            .map(|record| record.id)
            .collect())
    }

    /// Delete each path; paths that are already gone are skipped.
    pub fn remove_files<I, P>(&self, paths: I) -> Result<(), ApiError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for path in paths {
            let path = path.as_ref();
            match std::fs::remove_file(path) {
                Ok(()) => debug!(path = %path.display(), "Removed file"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(StorageError::IoError(e).into()),
            }
        }
        Ok(())
    }

    /// Byte-for-byte copy of `src` onto `trgt`.
    pub fn copy(&self, src: &Path, trgt: &Path) -> Result<u64, ApiError> {
        let bytes = std::fs::copy(src, trgt).map_err(StorageError::IoError)?;
        debug!(src = %src.display(), trgt = %trgt.display(), bytes, "Copied file");
        Ok(bytes)
    }

    pub fn create_file(&self, path: &Path, contents: &str) -> Result<(), ApiError> {
        std::fs::write(path, contents).map_err(StorageError::IoError)?;
        Ok(())
    }

    /// Snapshot of the workspace for reporting; an invalid workspace lists no files.
    pub fn status(&self) -> Result<WorkspaceStatus, ApiError> {
        let valid = self.validate();
        let records = if valid { self.records()? } else { Vec::new() };
        Ok(WorkspaceStatus::new(
            self.root().display().to_string(),
            valid,
            &records,
        ))
    }

    pub fn selector_map(&self) -> Result<SelectorMap, ApiError> {
        Ok(self.topology.selector_map.read_as()?)
    }

    pub fn set_selector_map(&mut self, selectors: &SelectorMap) -> Result<(), ApiError> {
        Ok(self.topology.selector_map.write_as(selectors)?)
    }
}
