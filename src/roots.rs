//! Mapping between resource roots and filesystem directories.
//!
//! Each root component ("Packages", "Cache") corresponds to a base
//! directory in the host's installation layout. [`ResourceRoots`] holds
//! that mapping and translates in both directions without touching the
//! filesystem: a resource path may name a file that does not exist, and a
//! file may sit under a root without any resource being loaded from it.

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use thiserror::Error;

use crate::path::{PathError, ResourcePath};

/// Errors raised when translating between resource and file paths.
#[derive(Debug, Error)]
pub enum RootsError {
    /// The path's root has no registered base directory.
    #[error("no filesystem location for root '{root}'")]
    UnknownRoot {
        /// The unregistered root component.
        root: String,
    },
    /// Only absolute file paths can be mapped back to resource paths.
    #[error("cannot convert relative file path '{path}' to a resource path")]
    RelativePath {
        /// The rejected file path.
        path: Utf8PathBuf,
    },
    /// The file path is not beneath any registered base directory.
    #[error("file path '{path}' is not beneath any resource root")]
    OutsideRoots {
        /// The rejected file path.
        path: Utf8PathBuf,
    },
    /// The translated resource path was invalid.
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Insertion-ordered mapping from root component names to base
/// directories.
///
/// When base directories nest, the earlier registration wins during
/// [`resource_path`](Self::resource_path) lookup.
#[derive(Clone, Debug, Default)]
pub struct ResourceRoots {
    bases: IndexMap<String, Utf8PathBuf>,
}

impl ResourceRoots {
    /// An empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `root`, replacing any existing entry of the same name.
    pub fn insert(&mut self, root: impl Into<String>, base: impl Into<Utf8PathBuf>) {
        self.bases.insert(root.into(), base.into());
    }

    /// The registered base directory for `root`, if any.
    #[must_use]
    pub fn base(&self, root: &str) -> Option<&Utf8Path> {
        self.bases.get(root).map(Utf8PathBuf::as_path)
    }

    /// The filesystem location corresponding to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RootsError::UnknownRoot`] when the path's root is not
    /// registered.
    pub fn file_path(&self, path: &ResourcePath) -> Result<Utf8PathBuf, RootsError> {
        let base = self
            .bases
            .get(path.root())
            .ok_or_else(|| RootsError::UnknownRoot {
                root: path.root().to_owned(),
            })?;
        let mut full = base.clone();
        for part in path.parts().iter().skip(1) {
            full.push(part);
        }
        Ok(full)
    }

    /// The resource path corresponding to the given absolute file path.
    ///
    /// # Errors
    ///
    /// Returns [`RootsError::RelativePath`] for a relative input and
    /// [`RootsError::OutsideRoots`] when no registered base directory
    /// contains it.
    pub fn resource_path(&self, file: &Utf8Path) -> Result<ResourcePath, RootsError> {
        if !file.is_absolute() {
            return Err(RootsError::RelativePath {
                path: file.to_owned(),
            });
        }
        for (root, base) in &self.bases {
            if let Ok(rel) = file.strip_prefix(base) {
                tracing::debug!(%file, root = root.as_str(), "mapped file path to resource root");
                let segments = std::iter::once(root.as_str()).chain(rel.iter());
                return Ok(ResourcePath::from_segments(segments)?);
            }
        }
        Err(RootsError::OutsideRoots {
            path: file.to_owned(),
        })
    }
}
