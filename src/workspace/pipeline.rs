//! Batch selector renaming over css and html files.

use super::Workspace;
use crate::error::{ApiError, StorageError};
use crate::transform::Transformer;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

impl Workspace {
    /// Run every css file through `transformer` into the staged folder, then offer
    /// each html file for rewriting against the resulting selector map.
    ///
    /// Returns the staged paths written. The selector map is persisted once at the end.
    pub fn rename_selectors(
        &mut self,
        transformer: &mut dyn Transformer,
        css_files: &[PathBuf],
        html_files: &[PathBuf],
    ) -> Result<Vec<PathBuf>, ApiError> {
        self.ensure_valid()?;

        let mut selectors = self.selector_map()?;
        let mut written = Vec::with_capacity(css_files.len());

        for path in css_files {
            let source = read_source(path)?;
            let sheet = transformer.transform_stylesheet(&source, &mut selectors)?;
            let staged = self.staged_path(&file_name(path)?);
            self.create_file(&staged, &sheet)?;
            debug!(src = %path.display(), staged = %staged.display(), "Stylesheet staged");
            written.push(staged);
        }

        for path in html_files {
            let source = read_source(path)?;
            match transformer.rewrite_markup(&source, &selectors)? {
                Some(markup) => {
                    let staged = self.staged_path(&file_name(path)?);
                    self.create_file(&staged, &markup)?;
                    written.push(staged);
                }
                None => debug!(src = %path.display(), "Markup left unchanged"),
            }
        }

        self.set_selector_map(&selectors)?;
        info!(
            css = css_files.len(),
            html = html_files.len(),
            selectors = selectors.len(),
            "Selectors renamed"
        );
        Ok(written)
    }
}

fn read_source(path: &Path) -> Result<String, ApiError> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ApiError::SourceNotFound(path.to_path_buf())
        } else {
            ApiError::from(e)
        }
    })
}

fn file_name(path: &Path) -> Result<String, ApiError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            StorageError::InvalidPath(format!("{} has no file name", path.display())).into()
        })
}
