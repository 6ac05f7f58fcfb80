//! Workspace topology: the fixed folders and documents a workspace owns.
//!
//! Pure path declaration; no I/O happens here.

use crate::settings::WorkspaceSettings;
use crate::store::{Document, Folder, Registry};
use serde_json::json;
use std::path::{Path, PathBuf};

/// Default name of the workspace folder under the base directory.
pub const DEFAULT_FOLDER_NAME: &str = "liq";

pub const FILE_MAP_NAME: &str = "fileMap.json";
pub const SELECTOR_MAP_NAME: &str = "selectorMap.json";
pub const SETTINGS_NAME: &str = "settings.json";

#[derive(Debug)]
pub struct Topology {
    base_dir: PathBuf,
    folder_name: String,
    pub base: Folder,
    pub src: Folder,
    pub staged: Folder,
    pub bak: Folder,
    pub file_map: Registry,
    pub selector_map: Document,
    pub settings: Document,
}

impl Topology {
    pub fn new(base_dir: impl Into<PathBuf>, folder_name: impl Into<String>) -> Self {
        let base_dir = base_dir.into();
        let folder_name = folder_name.into();
        let root = base_dir.join(&folder_name);
        let files = root.join("files");

        Self {
            base: Folder::new(&root),
            src: Folder::new(files.join("src")),
            staged: Folder::new(files.join("staged")),
            bak: Folder::new(files.join(".bak")),
            file_map: Registry::new(root.join(FILE_MAP_NAME)),
            selector_map: Document::new(root.join(SELECTOR_MAP_NAME), json!({})),
            settings: Document::new(root.join(SETTINGS_NAME), WorkspaceSettings::default_payload()),
            base_dir,
            folder_name,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn folder_name(&self) -> &str {
        &self.folder_name
    }

    /// The workspace folder itself (`<base_dir>/<folder_name>`).
    pub fn root(&self) -> &Path {
        self.base.path()
    }

    pub fn folders(&self) -> [&Folder; 4] {
        [&self.base, &self.src, &self.staged, &self.bak]
    }

    pub fn files(&self) -> [&Document; 3] {
        [self.file_map.document(), &self.selector_map, &self.settings]
    }

    pub fn files_mut(&mut self) -> [&mut Document; 3] {
        [
            self.file_map.document_mut(),
            &mut self.selector_map,
            &mut self.settings,
        ]
    }
}
