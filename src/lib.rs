//! Liquidcss: Persistent Workspace for Selector Renaming
//!
//! Tracks stylesheets, markup, and scripts as they are registered, transformed,
//! staged, and deployed back into a project. All state lives in JSON documents
//! under a workspace folder so that every command invocation starts from disk.

pub mod config;
pub mod error;
pub mod hasher;
pub mod logging;
pub mod settings;
pub mod store;
pub mod tooling;
pub mod topology;
pub mod transform;
pub mod types;
pub mod workspace;

pub use error::{ApiError, StorageError};
pub use settings::{Settings, WorkspaceSettings};
pub use store::{Document, FileMap, FileRecord, Folder, Registry};
pub use topology::Topology;
pub use transform::{Passthrough, SelectorMap, Transformer};
pub use types::{FileState, FileType};
pub use workspace::Workspace;
