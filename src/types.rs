//! Core types shared across the workspace.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hex-encoded BLAKE3 digest of a file's bytes.
pub type ContentHash = String;

/// Logical file type, derived from the extension lists in the workspace settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Css,
    Html,
    Js,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Css => "css",
            FileType::Html => "html",
            FileType::Js => "js",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle position of a registered file.
///
/// Stored as two independent flags (`staged`, `deployed`); only the three
/// combinations below are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    Registered,
    Staged,
    Deployed,
}
