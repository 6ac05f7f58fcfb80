//! liq CLI Binary
//!
//! Command-line interface for the liquidcss workspace.

use clap::Parser;
use liquidcss::config::ConfigLoader;
use liquidcss::logging::init_logging;
use liquidcss::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(&cli.base_dir),
    };
    let logging = match &config {
        Ok(config) => cli.logging_config(&config.logging),
        Err(_) => cli.logging_config(&Default::default()),
    };
    if let Err(e) = init_logging(Some(&logging)) {
        eprintln!("Error initializing logging: {}", e);
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error initializing workspace: Failed to load config: {}", e);
            process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("Error initializing workspace: {}", e);
        process::exit(1);
    }
    let mut context = CliContext::with_config(cli.base_dir.clone(), &config);

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
