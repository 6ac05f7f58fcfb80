//! CLI Tooling
//!
//! Command-line interface over the workspace lifecycle. Commands address files by
//! their current positional id; ids are resolved to durable keys before any
//! state changes so that renumbering mid-command cannot retarget an operation.

use crate::config::{ConfigLoader, LiqConfig};
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::store::FileRecord;
use crate::tooling::messages;
use crate::transform::Passthrough;
use crate::workspace::{format_record_text, format_status_json, format_status_text, Workspace};
use crate::workspace::WorkspaceStatus;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

/// liq - stage and deploy selector-renamed stylesheets from a persistent workspace
#[derive(Parser)]
#[command(name = "liq")]
#[command(about = "Stage and deploy selector-renamed stylesheets from a persistent workspace")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the workspace folder
    #[arg(long, default_value = ".")]
    pub base_dir: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold logging flags over the configured logging section.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create the workspace folder structure
    Init {
        /// Reset an existing workspace instead of keeping it
        #[arg(long)]
        reset: bool,
    },
    /// Delete and recreate the workspace
    Reset {
        /// Reset even while files are deployed
        #[arg(long)]
        hard: bool,
    },
    /// Register files with the workspace
    Register {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Produce transformed copies of registered files
    Stage {
        ids: Vec<String>,
        /// Stage every registered file
        #[arg(long, conflicts_with = "ids")]
        all: bool,
    },
    /// Write staged files over their targets
    Deploy {
        ids: Vec<String>,
        /// Deploy every staged file
        #[arg(long, conflicts_with = "ids")]
        all: bool,
    },
    /// Restore the originals of deployed files
    Reverse {
        ids: Vec<String>,
        /// Reverse every deployed file
        #[arg(long, conflicts_with = "ids")]
        all: bool,
    },
    /// Remove files from the workspace
    Drop {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Show registered files
    Status {
        ids: Vec<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Check that every workspace folder and document exists
    Validate,
}

/// Per-invocation command context.
pub struct CliContext {
    workspace: Workspace,
}

impl CliContext {
    pub fn new(base_dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(&path),
            None => ConfigLoader::load(&base_dir),
        }
        .map_err(|e| ApiError::ConfigError(format!("Failed to load config: {}", e)))?;
        config.validate()?;
        Ok(Self::with_config(base_dir, &config))
    }

    pub fn with_config(base_dir: PathBuf, config: &LiqConfig) -> Self {
        Self {
            workspace: Workspace::from_config(base_dir, config),
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn execute(&mut self, command: &Commands) -> Result<String, ApiError> {
        info!(command = ?command, "Executing command");
        match command {
            Commands::Init { reset } => self.handle_init(*reset),
            Commands::Reset { hard } => self.handle_reset(*hard),
            Commands::Register { paths } => {
                self.workspace.ensure_valid()?;
                let mut out = Vec::with_capacity(paths.len());
                for path in paths {
                    match self.workspace.register_file(path) {
                        Ok(record) => out.push(messages::file_registered(&record)),
                        Err(e) => out.push(skip_or_abort(e)?),
                    }
                }
                Ok(out.join("\n"))
            }
            Commands::Stage { ids, all } => {
                let keys = self.resolve_keys(ids, *all, |record| !record.deployed)?;
                self.for_each_key(keys, |workspace, key| {
                    workspace
                        .stage(key, &mut Passthrough)
                        .map(|record| messages::file_staged(&record))
                })
            }
            Commands::Deploy { ids, all } => {
                let keys =
                    self.resolve_keys(ids, *all, |record| record.staged && !record.deployed)?;
                self.for_each_key(keys, |workspace, key| {
                    workspace
                        .deploy(key)
                        .map(|record| messages::file_deployed(&record))
                })
            }
            Commands::Reverse { ids, all } => {
                let keys = self.resolve_keys(ids, *all, |record| record.deployed)?;
                self.for_each_key(keys, |workspace, key| {
                    workspace
                        .reverse(key)
                        .map(|record| messages::deploy_reversed(&record))
                })
            }
            Commands::Drop { ids } => {
                let keys = self.resolve_keys(ids, false, |_| true)?;
                self.for_each_key(keys, |workspace, key| {
                    workspace
                        .drop_file(key)
                        .map(|record| messages::file_dropped(&record))
                })
            }
            Commands::Status { ids, format } => self.handle_status(ids, format),
            Commands::Validate => {
                self.workspace.ensure_valid()?;
                Ok(messages::WORKSPACE_VALID.to_string())
            }
        }
    }

    fn handle_init(&mut self, reset: bool) -> Result<String, ApiError> {
        if self.workspace.validate() {
            let reset = reset || self.workspace.settings()?.values().reset;
            if !reset {
                return Ok(messages::WORKSPACE_EXISTS.to_string());
            }
            self.workspace.reset()?;
            return Ok(messages::WORKSPACE_RESET.to_string());
        }
        self.workspace.init()?;
        Ok(messages::WORKSPACE_CREATED.to_string())
    }

    fn handle_reset(&mut self, hard: bool) -> Result<String, ApiError> {
        if self.workspace.validate() {
            let hard = hard || self.workspace.settings()?.values().hard;
            let deployed = self.workspace.files_deployed()?;
            if !hard && !deployed.is_empty() {
                return Ok(messages::files_are_deployed(&deployed));
            }
        }
        self.workspace.reset()?;
        Ok(messages::WORKSPACE_RESET.to_string())
    }

    fn handle_status(&self, ids: &[String], format: &str) -> Result<String, ApiError> {
        let mut status = self.workspace.status()?;
        if !status.valid {
            return Ok(messages::NO_WORKSPACE_FOUND.to_string());
        }
        if !ids.is_empty() {
            let records = ids
                .iter()
                .map(|id| self.workspace.record_by_id(id))
                .collect::<Result<Vec<FileRecord>, ApiError>>()?;
            status = WorkspaceStatus::new(status.root, status.valid, &records);
        }

        match format {
            "json" => format_status_json(&status),
            "text" if ids.is_empty() => Ok(format_status_text(&status)),
            "text" => Ok(status
                .files
                .iter()
                .map(format_record_text)
                .collect::<Vec<_>>()
                .join("\n")),
            other => Err(ApiError::ConfigError(format!(
                "Invalid format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }

    /// Resolve ids (or every record passing `filter` when `all`) to keys, in type priority order.
    fn resolve_keys<F>(&self, ids: &[String], all: bool, filter: F) -> Result<Vec<String>, ApiError>
    where
        F: Fn(&FileRecord) -> bool,
    {
        self.workspace.ensure_valid()?;
        let settings = self.workspace.settings()?;
        let entries = self.workspace.topology().file_map.entries()?;

        let all = all || (ids.is_empty() && settings.values().all);
        let selected: Vec<String> = if all {
            entries
                .values()
                .filter(|record| filter(*record))
                .map(|record| record.id.clone())
                .collect()
        } else {
            ids.to_vec()
        };

        settings
            .sort_by_priority(&selected, &entries)
            .into_iter()
            .map(|id| {
                entries
                    .values()
                    .find(|record| record.id == id)
                    .map(|record| record.key.clone())
                    .ok_or(ApiError::NotRegistered(id))
            })
            .collect()
    }

    fn for_each_key<F>(&mut self, keys: Vec<String>, mut op: F) -> Result<String, ApiError>
    where
        F: FnMut(&mut Workspace, &str) -> Result<String, ApiError>,
    {
        if keys.is_empty() {
            return Ok("\tNo files selected.".to_string());
        }
        let mut out = Vec::with_capacity(keys.len());
        for key in &keys {
            match op(&mut self.workspace, key) {
                Ok(line) => out.push(line),
                Err(e) => out.push(skip_or_abort(e)?),
            }
        }
        Ok(out.join("\n"))
    }
}

/// A per-file failure becomes an output line; anything else aborts the batch.
fn skip_or_abort(err: ApiError) -> Result<String, ApiError> {
    match messages::skipped(&err) {
        Some(line) => {
            warn!(error = %err, "Skipping file");
            Ok(line)
        }
        None => Err(err),
    }
}
