//! Format workspace status and individual records as text or JSON.

use crate::error::ApiError;
use crate::workspace::types::{StatusEntry, WorkspaceStatus};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Format workspace status as human-readable text.
pub fn format_status_text(data: &WorkspaceStatus) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Workspace Status")));
    out.push_str(&format!("  Root: {}\n", data.root));
    if !data.valid {
        out.push_str("  Initialized: no\n");
        return out;
    }
    out.push_str("  Initialized: yes\n\n");

    if data.files.is_empty() {
        out.push_str("No files registered.\n");
        return out;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["ID", "Name", "Type", "Staged", "Deployed", "Hash", "Path"]);
    for row in &data.files {
        table.add_row(vec![
            row.id.clone(),
            row.name.clone(),
            row.file_type.clone(),
            yes_no(row.staged).to_string(),
            yes_no(row.deployed).to_string(),
            row.hash.chars().take(7).collect::<String>(),
            row.path.clone(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!(
        "Total: {} files, {} deployed.\n",
        data.files.len(),
        data.deployed
    ));
    out
}

/// Format a single record as an indented block.
pub fn format_record_text(entry: &StatusEntry) -> String {
    format!(
        "\t[ID: {}]\n\t  name: {}\n\t  path: {}\n\t  type: {}\n\t  hash: {}\n\t  staged: {}\n\t  deployed: {}\n",
        entry.id, entry.name, entry.path, entry.file_type, entry.hash, entry.staged, entry.deployed
    )
}

pub fn format_status_json(data: &WorkspaceStatus) -> Result<String, ApiError> {
    serde_json::to_string_pretty(data)
        .map_err(|e| ApiError::ConfigError(format!("Failed to serialize status: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FileRecord;
    use crate::types::FileType;

    fn status() -> WorkspaceStatus {
        let mut record = FileRecord::new(
            "main.css",
            "/site/main.css",
            "main.css",
            FileType::Css,
            "0123456789abcdef".to_string(),
        );
        record.id = "0".to_string();
        record.staged = true;
        WorkspaceStatus::new("/site/liq".to_string(), true, &[record])
    }

    #[test]
    fn test_status_text_lists_files() {
        let text = format_status_text(&status());
        assert!(text.contains("main.css"));
        assert!(text.contains("0123456"));
        assert!(!text.contains("0123456789"));
        assert!(text.contains("Total: 1 files, 0 deployed."));
    }

    #[test]
    fn test_status_text_truncates_non_ascii_hash() {
        let mut data = status();
        data.files[0].hash = "ééééééééé".to_string();
        let text = format_status_text(&data);
        assert!(text.contains("ééééééé"));
        assert!(!text.contains("éééééééé"));
    }

    #[test]
    fn test_status_text_for_missing_workspace() {
        let data = WorkspaceStatus::new("/nowhere/liq".to_string(), false, &[]);
        assert!(format_status_text(&data).contains("Initialized: no"));
    }

    #[test]
    fn test_status_json_uses_type_field() {
        let json = format_status_json(&status()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["files"][0]["type"], "css");
        assert_eq!(value["files"][0]["staged"], true);
    }

    #[test]
    fn test_record_block() {
        let data = status();
        let block = format_record_text(&data.files[0]);
        assert!(block.starts_with("\t[ID: 0]"));
        assert!(block.contains("staged: true"));
    }
}
