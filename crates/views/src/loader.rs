use std::fs;
use std::path::{Path, PathBuf};

use doc_store::ViewDefinition;

use crate::{Result, ViewLoadError};

/// File name of a view's map function source.
pub const MAP_SOURCE_FILE: &str = "map.js";

/// File name of a view's optional reduce function source.
pub const REDUCE_SOURCE_FILE: &str = "reduce.js";

/// Reads view definitions from a two-level directory tree.
///
/// Top-level directory names are design documents, second-level
/// directory names are views. Non-directory entries at either level
/// are skipped. Results come back sorted by design document name, then
/// view name, so sync order and progress reporting are deterministic.
pub struct ViewLoader {
    root: PathBuf,
}

impl ViewLoader {
    /// Creates a loader rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory this loader reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads every view under the root.
    ///
    /// A view directory without a map source fails the whole load with
    /// [`ViewLoadError::MissingMapSource`]; a missing reduce source
    /// just leaves the reduce component out.
    pub fn read_views(&self) -> Result<Vec<ViewDefinition>> {
        let mut views = Vec::new();

        for design_document in sorted_subdirectories(&self.root)? {
            let design_path = self.root.join(&design_document);
            for view_name in sorted_subdirectories(&design_path)? {
                views.push(self.read_view(&design_document, &view_name)?);
            }
        }

        tracing::debug!(count = views.len(), root = %self.root.display(), "loaded view definitions");
        Ok(views)
    }

    fn read_view(&self, design_document: &str, view_name: &str) -> Result<ViewDefinition> {
        let view_path = self.root.join(design_document).join(view_name);

        let map_path = view_path.join(MAP_SOURCE_FILE);
        let map_source = match fs::read_to_string(&map_path) {
            Ok(source) => source,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                return Err(ViewLoadError::MissingMapSource {
                    design_document: design_document.to_string(),
                    view_name: view_name.to_string(),
                    path: map_path,
                });
            }
            Err(source) => return Err(ViewLoadError::Io { path: map_path, source }),
        };

        let reduce_path = view_path.join(REDUCE_SOURCE_FILE);
        let reduce_source = match fs::read_to_string(&reduce_path) {
            Ok(source) => Some(source),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => None,
            Err(source) => return Err(ViewLoadError::Io { path: reduce_path, source }),
        };

        Ok(ViewDefinition::new(
            design_document,
            view_name,
            map_source,
            reduce_source,
        ))
    }
}

/// Names of the directory's subdirectories, sorted; other entries are
/// skipped.
fn sorted_subdirectories(path: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(path).map_err(|source| ViewLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ViewLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_dir = entry
            .file_type()
            .map_err(|source| ViewLoadError::Io {
                path: entry.path(),
                source,
            })?
            .is_dir();
        if !is_dir {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}
