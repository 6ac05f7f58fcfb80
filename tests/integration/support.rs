use liquidcss::Workspace;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temp base directory with an initialized workspace and a `project/` folder.
pub fn initialized_workspace() -> (TempDir, Workspace) {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("project")).unwrap();
    let mut workspace = Workspace::with_default_folder(temp.path());
    workspace.init().unwrap();
    (temp, workspace)
}

/// Write `contents` to `project/<name>` and return its path.
pub fn project_file(base: &Path, name: &str, contents: &str) -> PathBuf {
    let path = base.join("project").join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Place `contents` at `<src>/<key>`, as a caller would before `register`.
pub fn source_copy(workspace: &Workspace, key: &str, contents: &str) {
    std::fs::write(workspace.topology().src.path().join(key), contents).unwrap();
}
