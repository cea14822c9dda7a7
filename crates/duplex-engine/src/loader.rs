use crate::error::TemplateError;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Loads template files from a fixed root directory. Paths are resolved
/// relative to the root; absolute paths and `..` components are rejected
/// so a template name can never escape it.
#[derive(Debug, Clone)]
pub struct SqlLoader {
    root: PathBuf,
}

impl SqlLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        SqlLoader { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<String, TemplateError> {
        let path = path.as_ref();
        let escapes = path.is_absolute()
            || path.components().any(|c| matches!(c, Component::ParentDir));
        if escapes {
            return Err(TemplateError::OutsideRoot(path.to_path_buf()));
        }
        let full = self.root.join(path);
        debug!(path = %full.display(), "loading template file");
        fs::read_to_string(&full).map_err(|source| TemplateError::Io { path: full, source })
    }
}
