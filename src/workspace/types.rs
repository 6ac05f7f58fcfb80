//! Status DTOs for workspace reporting.

use crate::store::FileRecord;
use serde::{Deserialize, Serialize};

/// One row of the status table / JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEntry {
    pub id: String,
    pub key: String,
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub hash: String,
    pub staged: bool,
    pub deployed: bool,
}

impl From<&FileRecord> for StatusEntry {
    fn from(record: &FileRecord) -> Self {
        Self {
            id: record.id.clone(),
            key: record.key.clone(),
            name: record.name.clone(),
            path: record.path.display().to_string(),
            file_type: record.file_type.to_string(),
            hash: record.hash.clone(),
            staged: record.staged,
            deployed: record.deployed,
        }
    }
}

/// Workspace status: missing, or present with its registered files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceStatus {
    pub root: String,
    pub valid: bool,
    pub files: Vec<StatusEntry>,
    pub deployed: usize,
}

impl WorkspaceStatus {
    pub fn new(root: String, valid: bool, records: &[FileRecord]) -> Self {
        let files: Vec<StatusEntry> = records.iter().map(StatusEntry::from).collect();
        let deployed = files.iter().filter(|entry| entry.deployed).count();
        Self {
            root,
            valid,
            files,
            deployed,
        }
    }
}
