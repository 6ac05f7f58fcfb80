use std::collections::HashSet;
use std::path::PathBuf;

use liquidcss::hasher::hash_bytes;
use liquidcss::settings::WorkspaceSettings;
use liquidcss::{ApiError, FileType, Passthrough, StorageError, Workspace};
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::integration::support::{initialized_workspace, project_file, source_copy};

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn init_twice_keeps_default_documents_once() {
    let temp = TempDir::new().unwrap();
    let mut workspace = Workspace::with_default_folder(temp.path());
    workspace.init().unwrap();
    workspace.init().unwrap();

    let topology = workspace.topology();
    assert_eq!(read_json(topology.file_map.path()), json!({}));
    assert_eq!(read_json(topology.selector_map.path()), json!({}));
    assert_eq!(
        read_json(topology.settings.path()),
        WorkspaceSettings::default_payload()
    );
}

#[test]
fn init_never_clobbers_live_state() {
    let (temp, mut workspace) = initialized_workspace();
    source_copy(&workspace, "main.css", ".a {}");
    workspace
        .register(&temp.path().join("project/main.css"), "main.css", FileType::Css)
        .unwrap();

    workspace.init().unwrap();
    let mut fresh = Workspace::with_default_folder(temp.path());
    fresh.init().unwrap();

    assert!(fresh.record("main.css").is_ok());
    assert_eq!(read_json(fresh.topology().file_map.path())["main.css"]["id"], "0");
}

#[test]
fn ids_are_renumbered_after_removal() {
    let (temp, mut workspace) = initialized_workspace();
    for key in ["A.css", "B.css", "C.css"] {
        source_copy(&workspace, key, key);
        workspace
            .register(&temp.path().join("project").join(key), key, FileType::Css)
            .unwrap();
    }
    assert_eq!(workspace.record("C.css").unwrap().id, "2");

    workspace.drop_file("B.css").unwrap();

    assert_eq!(workspace.record("A.css").unwrap().id, "0");
    assert_eq!(workspace.record("C.css").unwrap().id, "1");
    assert!(matches!(
        workspace.record("B.css"),
        Err(ApiError::NotRegistered(_))
    ));

    let reloaded = Workspace::with_default_folder(temp.path());
    assert_eq!(reloaded.record_by_id("1").unwrap().key, "C.css");
}

#[test]
fn modified_source_reports_hash_mismatch() {
    let (temp, mut workspace) = initialized_workspace();
    source_copy(&workspace, "main.css", ".header { color: red; }");
    workspace
        .register(&temp.path().join("project/main.css"), "main.css", FileType::Css)
        .unwrap();
    workspace.verify_hash("main.css").unwrap();

    source_copy(&workspace, "main.css", ".header { color: blue; }");

    match workspace.verify_hash("main.css") {
        Err(ApiError::HashMismatch {
            key,
            expected,
            actual,
        }) => {
            assert_eq!(key, "main.css");
            assert_eq!(expected, hash_bytes(b".header { color: red; }"));
            assert_eq!(actual, hash_bytes(b".header { color: blue; }"));
        }
        other => panic!("expected hash mismatch, got {other:?}"),
    }
    assert_eq!(
        workspace.record("main.css").unwrap().hash,
        hash_bytes(b".header { color: red; }")
    );
}

#[test]
fn validate_fails_when_any_declared_path_is_missing() {
    let temp = TempDir::new().unwrap();
    let mut workspace = Workspace::with_default_folder(temp.path());
    assert!(!workspace.validate());
    workspace.init().unwrap();
    assert!(workspace.validate());

    let folders: Vec<PathBuf> = workspace
        .topology()
        .folders()
        .iter()
        .map(|folder| folder.path().to_path_buf())
        .collect();
    let documents: Vec<PathBuf> = workspace
        .topology()
        .files()
        .iter()
        .map(|document| document.path().to_path_buf())
        .collect();

    for folder in folders {
        workspace.init().unwrap();
        assert!(workspace.validate());
        std::fs::remove_dir_all(&folder).unwrap();
        assert!(!workspace.validate(), "missing {}", folder.display());
    }
    for document in documents {
        workspace.init().unwrap();
        assert!(workspace.validate());
        std::fs::remove_file(&document).unwrap();
        assert!(!workspace.validate(), "missing {}", document.display());
    }
}

#[test]
fn files_deployed_returns_exactly_the_deployed_ids() {
    let (temp, mut workspace) = initialized_workspace();
    for name in ["a.css", "b.css", "c.css"] {
        let path = project_file(temp.path(), name, &format!(".{} {{}}", name));
        workspace.register_file(&path).unwrap();
        workspace.stage(name, &mut Passthrough).unwrap();
    }
    workspace.deploy("a.css").unwrap();
    workspace.deploy("c.css").unwrap();

    let deployed: HashSet<String> = workspace.files_deployed().unwrap().into_iter().collect();
    let expected: HashSet<String> = ["0", "2"].iter().map(|id| id.to_string()).collect();
    assert_eq!(deployed, expected);
}

#[test]
fn reset_discards_registered_files() {
    let (temp, mut workspace) = initialized_workspace();
    let path = project_file(temp.path(), "main.css", ".a {}");
    workspace.register_file(&path).unwrap();

    workspace.reset().unwrap();

    assert!(workspace.validate());
    assert!(workspace.records().unwrap().is_empty());
    assert!(matches!(
        workspace.record("main.css"),
        Err(ApiError::NotRegistered(_))
    ));
    assert_eq!(read_json(workspace.topology().file_map.path()), json!({}));
    assert!(!workspace.source_path("main.css").exists());
}

#[test]
fn malformed_registry_is_a_parse_error() {
    let (_temp, workspace) = initialized_workspace();
    std::fs::write(workspace.topology().file_map.path(), "{\"a\": ").unwrap();

    let err = workspace.records().unwrap_err();
    assert!(matches!(
        err,
        ApiError::StorageError(StorageError::ParseError { .. })
    ));
}

#[test]
fn deploy_without_existing_target_then_reverse_removes_it() {
    let (temp, mut workspace) = initialized_workspace();
    let path = project_file(temp.path(), "fresh.css", ".x {}");
    workspace.register_file(&path).unwrap();
    workspace.stage("fresh.css", &mut Passthrough).unwrap();
    std::fs::remove_file(&path).unwrap();

    workspace.deploy("fresh.css").unwrap();
    assert!(path.exists());
    assert!(!workspace.backup_path("fresh.css").exists());

    workspace.reverse("fresh.css").unwrap();
    assert!(!path.exists());
}
