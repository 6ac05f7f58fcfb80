//! Tooling & Integration Layer
//!
//! Command-line front end over the workspace lifecycle. Each invocation builds a
//! fresh workspace, runs one command, and renders the result as text.

pub mod cli;
pub mod messages;

pub use cli::{Cli, CliContext, Commands};
