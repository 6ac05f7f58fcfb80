//! User-facing messages for CLI output.

use crate::error::ApiError;
use crate::store::FileRecord;
use std::path::Path;

pub const WORKSPACE_EXISTS: &str = "\tWorkSpace already exists.";
pub const WORKSPACE_CREATED: &str = "\tWorkSpace created.";
pub const WORKSPACE_RESET: &str = "\tWorkSpace reset.";
pub const WORKSPACE_VALID: &str = "\tWorkSpace is valid.";
pub const NO_WORKSPACE_FOUND: &str = "\tWorkSpace not found.";

pub fn files_are_deployed(ids: &[String]) -> String {
    format!("\tFiles are deployed.\n\t  Ids: {}", ids.join(", "))
}

pub fn file_registered(record: &FileRecord) -> String {
    format!(
        "\tFile registered to WorkSpace.\n\t  ID: {}\n\t  {}",
        record.id,
        record.path.display()
    )
}

pub fn file_staged(record: &FileRecord) -> String {
    format!("\tFile staged:\n\t  ID: {}", record.id)
}

pub fn file_deployed(record: &FileRecord) -> String {
    format!(
        "\tDeployed file.\n\t  ID: {}\n\t  path: {}\n",
        record.id,
        record.path.display()
    )
}

pub fn deploy_reversed(record: &FileRecord) -> String {
    format!(
        "\tReversed deployment of file.\n\t  ID: {}\n\t  path: {}\n",
        record.id,
        record.path.display()
    )
}

/// The record's id is the rank it held before it was dropped.
pub fn file_dropped(record: &FileRecord) -> String {
    format!(
        "\tRemoved file from WorkSpace:\n\t  ID: {}\n\t  path: {}\n",
        record.id,
        record.path.display()
    )
}

pub fn path_already_registered(key: &str) -> String {
    format!("\tFile the path is already registered.\n\t  {}", key)
}

pub fn unknown_extension(path: &str) -> String {
    format!("\tFile with unknown extension.\n\t  {}", path)
}

pub fn file_not_found(path: &Path) -> String {
    format!("\tFile not found at {}.", path.display())
}

pub fn hash_changed(key: &str) -> String {
    format!("\tFile was changed after it was registered.\n\t  {}", key)
}

/// Per-file message for failures that skip one file of a batch.
///
/// Returns `None` for errors that should abort the whole command.
pub fn skipped(err: &ApiError) -> Option<String> {
    match err {
        ApiError::DuplicateKey(key) => Some(path_already_registered(key)),
        ApiError::UnknownExtension(path) => Some(unknown_extension(path)),
        ApiError::SourceNotFound(path) => Some(file_not_found(path)),
        ApiError::HashMismatch { key, .. } => Some(hash_changed(key)),
        ApiError::FileIsDeployed(key) => Some(format!("\tFile is deployed.\n\t  {}", key)),
        ApiError::FileNotDeployed(key) => Some(format!("\tFile is not deployed.\n\t  {}", key)),
        ApiError::FileNotStaged(key) => Some(format!("\tFile is not staged.\n\t  {}", key)),
        _ => None,
    }
}
