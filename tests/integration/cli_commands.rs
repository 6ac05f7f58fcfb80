use liquidcss::config::LiqConfig;
use liquidcss::tooling::cli::{CliContext, Commands};
use liquidcss::tooling::messages;
use liquidcss::ApiError;
use tempfile::TempDir;

use crate::integration::support::project_file;

fn context(temp: &TempDir) -> CliContext {
    std::fs::create_dir_all(temp.path().join("project")).unwrap();
    CliContext::new(temp.path().to_path_buf(), None).unwrap()
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn init_reports_existing_workspace() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp);

    let first = cli.execute(&Commands::Init { reset: false }).unwrap();
    assert_eq!(first, messages::WORKSPACE_CREATED);
    let second = cli.execute(&Commands::Init { reset: false }).unwrap();
    assert_eq!(second, messages::WORKSPACE_EXISTS);
    let third = cli.execute(&Commands::Init { reset: true }).unwrap();
    assert_eq!(third, messages::WORKSPACE_RESET);
}

#[test]
fn commands_refuse_uninitialized_workspace() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp);

    let err = cli
        .execute(&Commands::Stage {
            ids: ids(&["0"]),
            all: false,
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::WorkspaceNotFound(_)));
    assert!(err.is_recoverable());
    assert!(cli.execute(&Commands::Validate).is_err());

    let status = cli
        .execute(&Commands::Status {
            ids: vec![],
            format: "text".to_string(),
        })
        .unwrap();
    assert_eq!(status, messages::NO_WORKSPACE_FOUND);
}

#[test]
fn stage_all_processes_css_before_html() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp);
    cli.execute(&Commands::Init { reset: false }).unwrap();

    let html = project_file(temp.path(), "index.html", "<p></p>");
    let css = project_file(temp.path(), "main.css", "p {}");
    cli.execute(&Commands::Register {
        paths: vec![html, css],
    })
    .unwrap();

    let out = cli
        .execute(&Commands::Stage {
            ids: vec![],
            all: true,
        })
        .unwrap();
    let css_pos = out.find("ID: 1").unwrap();
    let html_pos = out.find("ID: 0").unwrap();
    assert!(css_pos < html_pos, "css should be staged first:\n{out}");

    let records = cli.workspace().records().unwrap();
    assert!(records.iter().all(|record| record.staged));
}

#[test]
fn reset_refuses_while_deployed_unless_hard() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp);
    cli.execute(&Commands::Init { reset: false }).unwrap();
    let css = project_file(temp.path(), "main.css", ".a {}");
    cli.execute(&Commands::Register { paths: vec![css] }).unwrap();
    cli.execute(&Commands::Stage {
        ids: ids(&["0"]),
        all: false,
    })
    .unwrap();
    cli.execute(&Commands::Deploy {
        ids: vec![],
        all: true,
    })
    .unwrap();

    let refused = cli.execute(&Commands::Reset { hard: false }).unwrap();
    assert_eq!(refused, messages::files_are_deployed(&ids(&["0"])));
    assert_eq!(cli.workspace().records().unwrap().len(), 1);

    let out = cli.execute(&Commands::Reset { hard: true }).unwrap();
    assert_eq!(out, messages::WORKSPACE_RESET);
    assert!(cli.workspace().records().unwrap().is_empty());
}

#[test]
fn drop_resolves_ids_before_renumbering() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp);
    cli.execute(&Commands::Init { reset: false }).unwrap();
    let paths = ["a.css", "b.css", "c.css"]
        .iter()
        .map(|name| project_file(temp.path(), name, name))
        .collect();
    cli.execute(&Commands::Register { paths }).unwrap();

    cli.execute(&Commands::Drop {
        ids: ids(&["0", "1"]),
    })
    .unwrap();

    let remaining = cli.workspace().records().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].key, "c.css");
    assert_eq!(remaining[0].id, "0");
}

#[test]
fn status_json_and_unknown_ids() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp);
    cli.execute(&Commands::Init { reset: false }).unwrap();
    let css = project_file(temp.path(), "main.css", ".a {}");
    cli.execute(&Commands::Register { paths: vec![css] }).unwrap();

    let json = cli
        .execute(&Commands::Status {
            ids: vec![],
            format: "json".to_string(),
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["files"][0]["name"], "main.css");
    assert_eq!(value["deployed"], 0);

    let err = cli
        .execute(&Commands::Status {
            ids: ids(&["9"]),
            format: "text".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::NotRegistered(id) if id == "9"));
}

#[test]
fn custom_folder_name_from_config() {
    let temp = TempDir::new().unwrap();
    let mut config = LiqConfig::default();
    config.workspace.folder_name = ".liquid".to_string();
    let mut cli = CliContext::with_config(temp.path().to_path_buf(), &config);

    cli.execute(&Commands::Init { reset: false }).unwrap();
    assert!(temp.path().join(".liquid/fileMap.json").is_file());
    assert!(!temp.path().join("liq").exists());
}

#[test]
fn register_batch_reports_each_file() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp);
    cli.execute(&Commands::Init { reset: false }).unwrap();
    let css = project_file(temp.path(), "a.css", ".a {}");
    let readme = project_file(temp.path(), "readme.md", "# notes");
    let missing = temp.path().join("project/gone.css");

    let out = cli
        .execute(&Commands::Register {
            paths: vec![css.clone(), readme, missing, css],
        })
        .unwrap();

    assert!(out.contains("File registered to WorkSpace."), "{out}");
    assert!(out.contains("File with unknown extension."), "{out}");
    assert!(out.contains("File not found at"), "{out}");
    assert!(out.contains("File the path is already registered."), "{out}");
    let records = cli.workspace().records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].key, "a.css");
}

#[test]
fn deploy_batch_keeps_going_past_unstaged_file() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp);
    cli.execute(&Commands::Init { reset: false }).unwrap();
    let first = project_file(temp.path(), "a.css", ".a {}");
    let second = project_file(temp.path(), "b.css", ".b {}");
    cli.execute(&Commands::Register {
        paths: vec![first, second],
    })
    .unwrap();
    cli.execute(&Commands::Stage {
        ids: ids(&["1"]),
        all: false,
    })
    .unwrap();

    let out = cli
        .execute(&Commands::Deploy {
            ids: ids(&["0", "1"]),
            all: false,
        })
        .unwrap();

    assert!(out.contains("File is not staged."), "{out}");
    assert!(out.contains("Deployed file."), "{out}");
    assert_eq!(cli.workspace().files_deployed().unwrap(), ids(&["1"]));
}
