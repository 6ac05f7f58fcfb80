//! ConfigLoader facade composing the config sources.

use super::sources::{environment, workspace_file};
use super::LiqConfig;
use config::{Config, ConfigError, File, FileFormat};
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a base directory.
    /// Precedence: defaults (lowest) -> `<base>/liq.toml` -> environment (highest).
    pub fn load(base_dir: &Path) -> Result<LiqConfig, ConfigError> {
        let builder = Config::builder();
        let builder = workspace_file::add_to_builder(builder, base_dir)?;
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }

    /// Load configuration from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<LiqConfig, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(true));
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }

    /// Create default configuration.
    pub fn default() -> LiqConfig {
        LiqConfig::default()
    }
}
