//! Workspace domain: on-disk lifecycle, file state transitions, and status formatting.

mod facade;
mod format;
mod pipeline;
mod transitions;
mod types;

pub use facade::*;
pub use format::{format_record_text, format_status_json, format_status_text};
pub use types::{StatusEntry, WorkspaceStatus};
