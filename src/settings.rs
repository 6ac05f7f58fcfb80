//! Workspace settings: extension lists, behavior flags, and type priority.
//!
//! The persisted form lives in the workspace `settings.json` document and is an
//! explicit, closed set of fields; unknown keys are rejected when loading.

use crate::error::StorageError;
use crate::store::{Document, FileMap};
use crate::types::FileType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;

/// Contents of `settings.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkspaceSettings {
    pub css_ext: Vec<String>,
    pub js_ext: Vec<String>,
    pub html_ext: Vec<String>,
    pub reset: bool,
    pub hard: bool,
    pub over: bool,
    pub no_hash: bool,
    pub all: bool,
    pub reverse: bool,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            css_ext: vec!["css".to_string()],
            js_ext: vec!["js".to_string()],
            html_ext: vec!["html".to_string()],
            reset: false,
            hard: false,
            over: false,
            no_hash: false,
            all: false,
            reverse: false,
        }
    }
}

impl WorkspaceSettings {
    /// Payload written to a freshly created `settings.json`.
    pub fn default_payload() -> Value {
        json!({
            "css_ext": ["css"],
            "js_ext": ["js"],
            "html_ext": ["html"],
            "reset": false,
            "hard": false,
            "over": false,
            "no_hash": false,
            "all": false,
            "reverse": false,
        })
    }
}

/// Resolved settings with the fixed type priority.
#[derive(Debug, Clone)]
pub struct Settings {
    values: WorkspaceSettings,
    type_priority: [FileType; 3],
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(WorkspaceSettings::default())
    }
}

impl Settings {
    pub const TYPE_PRIORITY: [FileType; 3] = [FileType::Css, FileType::Html, FileType::Js];

    pub fn new(values: WorkspaceSettings) -> Self {
        Self {
            values,
            type_priority: Self::TYPE_PRIORITY,
        }
    }

    /// Load from the workspace settings document.
    pub fn load(document: &Document) -> Result<Self, StorageError> {
        Ok(Self::new(document.read_as()?))
    }

    pub fn values(&self) -> &WorkspaceSettings {
        &self.values
    }

    pub fn type_priority(&self) -> &[FileType] {
        &self.type_priority
    }

    /// All `<type>_ext` lists, keyed by their settings name.
    pub fn extensions(&self) -> IndexMap<&'static str, &[String]> {
        let mut extensions = IndexMap::new();
        extensions.insert("css_ext", self.values.css_ext.as_slice());
        extensions.insert("js_ext", self.values.js_ext.as_slice());
        extensions.insert("html_ext", self.values.html_ext.as_slice());
        extensions
    }

    /// Logical type whose extension list contains `ext` (leading dot ignored).
    pub fn get_type(&self, ext: &str) -> Option<FileType> {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        [
            (FileType::Css, &self.values.css_ext),
            (FileType::Js, &self.values.js_ext),
            (FileType::Html, &self.values.html_ext),
        ]
        .into_iter()
        .find(|(_, list)| list.iter().any(|candidate| candidate == ext))
        .map(|(file_type, _)| file_type)
    }

    pub fn type_for_path(&self, path: &Path) -> Option<FileType> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.get_type(ext))
    }

    /// Rank of `file_type` in the priority list.
    pub fn priority_of(&self, file_type: FileType) -> usize {
        self.type_priority
            .iter()
            .position(|candidate| *candidate == file_type)
            .unwrap_or(self.type_priority.len())
    }

    /// Order `ids` by their record's type priority; equal types keep input order.
    /// Ids without a record sort last.
    pub fn sort_by_priority(&self, ids: &[String], file_map: &FileMap) -> Vec<String> {
        let mut sorted = ids.to_vec();
        sorted.sort_by_key(|id| {
            file_map
                .values()
                .find(|record| &record.id == id)
                .map(|record| self.priority_of(record.file_type))
                .unwrap_or(usize::MAX)
        });
        sorted
    }
}
