//! Selection of the annotation files processed by a run.

use crate::core::errors::{ExtractError, ExtractResult};
use std::path::{Path, PathBuf};

/// The annotation files a run processes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targets {
    /// A single ALTO file.
    Single(PathBuf),
    /// Every `.xml` file directly inside a directory.
    Directory(PathBuf),
}

impl Targets {
    /// Resolves the targets to the ordered list of annotation files.
    ///
    /// Directory entries are filtered to regular files with an `xml`
    /// extension (any case) and sorted by file name, so repeated runs over the
    /// same directory produce the same manifest order.
    ///
    /// # Errors
    ///
    /// * [`ExtractError::ConfigError`] if a single target is not an `.xml` file
    /// * [`ExtractError::PathIo`] if the directory cannot be listed
    pub fn resolve(&self) -> ExtractResult<Vec<PathBuf>> {
        match self {
            Self::Single(path) => {
                if !is_xml(path) {
                    return Err(ExtractError::invalid_field(
                        "xml",
                        "a path ending in .xml",
                        path.display().to_string(),
                    ));
                }
                Ok(vec![path.clone()])
            }
            Self::Directory(dir) => {
                let entries = std::fs::read_dir(dir).map_err(|e| ExtractError::path_io(dir, e))?;
                let mut files = Vec::new();
                for entry in entries {
                    let path = entry.map_err(|e| ExtractError::path_io(dir, e))?.path();
                    if path.is_file() && is_xml(&path) {
                        files.push(path);
                    }
                }
                files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
                Ok(files)
            }
        }
    }
}

fn is_xml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}
