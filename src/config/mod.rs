//! Tool configuration
//!
//! Settings for the `liq` tool itself, separate from the per-workspace
//! `settings.json` document. Loaded from defaults, an optional `liq.toml`
//! next to the workspace, and `LIQ__*` environment variables.

mod facade;
pub mod sources;

pub use facade::ConfigLoader;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::topology::DEFAULT_FOLDER_NAME;
use serde::{Deserialize, Serialize};

/// Name of the optional tool config file in the base directory.
pub const CONFIG_FILE_NAME: &str = "liq.toml";

fn default_folder_name() -> String {
    DEFAULT_FOLDER_NAME.to_string()
}

/// Where the workspace lives under the base directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    #[serde(default = "default_folder_name")]
    pub folder_name: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            folder_name: default_folder_name(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiqConfig {
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LiqConfig {
    pub fn validate(&self) -> Result<(), ApiError> {
        let name = self.workspace.folder_name.trim();
        if name.is_empty() {
            return Err(ApiError::ConfigError(
                "workspace.folder_name cannot be empty".to_string(),
            ));
        }
        if name.contains(&['/', '\\'][..]) || name == "." || name == ".." {
            return Err(ApiError::ConfigError(format!(
                "workspace.folder_name must be a single directory name, got '{}'",
                name
            )));
        }
        Ok(())
    }
}
