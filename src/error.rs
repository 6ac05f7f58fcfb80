//! Error types for workspace storage and lifecycle operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the on-disk document and folder layer.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Failed to parse document {}: {source}", .path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize document {}: {source}", .path.display())]
    SerializeError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Document {} does not contain a JSON object", .0.display())]
    NotAnObject(PathBuf),
}

/// Errors surfaced by workspace lifecycle operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The workspace is missing or only partially initialized.
    #[error("Workspace not found at {}", .0.display())]
    WorkspaceNotFound(PathBuf),

    #[error("File is already registered: {0}")]
    DuplicateKey(String),

    #[error("File with unknown extension: {0}")]
    UnknownExtension(String),

    #[error("File not found at {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("File {key} was changed after it was registered (expected {expected}, found {actual})")]
    HashMismatch {
        key: String,
        expected: String,
        actual: String,
    },

    #[error("File not registered: {0}")]
    NotRegistered(String),

    #[error("File is deployed: {0}")]
    FileIsDeployed(String),

    #[error("File is not deployed: {0}")]
    FileNotDeployed(String),

    #[error("File is not staged: {0}")]
    FileNotStaged(String),

    /// A record claims to be deployed without having been staged.
    #[error("File {0} is marked deployed but not staged")]
    InconsistentState(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Returned by `Transformer` implementations that cannot process a source.
    #[error("Transform failed: {0}")]
    TransformError(String),

    #[error(transparent)]
    StorageError(#[from] StorageError),
}

impl ApiError {
    /// Structural and registration errors leave the caller free to initialize, skip, or abort.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ApiError::WorkspaceNotFound(_)
                | ApiError::DuplicateKey(_)
                | ApiError::UnknownExtension(_)
                | ApiError::SourceNotFound(_)
        )
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::StorageError(StorageError::IoError(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        assert!(ApiError::WorkspaceNotFound(PathBuf::from("/tmp/liq")).is_recoverable());
        assert!(ApiError::DuplicateKey("a.css".to_string()).is_recoverable());
        assert!(!ApiError::HashMismatch {
            key: "a.css".to_string(),
            expected: "00".to_string(),
            actual: "11".to_string(),
        }
        .is_recoverable());
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!ApiError::from(io).is_recoverable());
    }
}
