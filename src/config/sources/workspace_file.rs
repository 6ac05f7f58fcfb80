//! Workspace file source: optional `liq.toml` in the base directory.

use crate::config::CONFIG_FILE_NAME;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use std::path::Path;

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    base_dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = base_dir.join(CONFIG_FILE_NAME);
    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(false)))
}
