//! Integration tests for the liquidcss workspace

mod cli_commands;
mod support;
mod workspace_properties;
