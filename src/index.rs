//! Glob search over a host-supplied resource listing.
//!
//! The host editor owns the set of loaded resources; this crate only sees
//! it through [`ResourceIndex::resource_paths`]. Everything else here is a
//! filter-map over that listing: globbing, recursive globbing, child
//! enumeration, and existence checks. Implementations perform whatever
//! I/O they need inside `resource_paths`; the provided methods perform
//! none.

use itertools::Itertools;

use crate::glob::{self, PatternError};
use crate::path::ResourcePath;

/// A source of resource path strings, typically backed by the host editor.
pub trait ResourceIndex {
    /// Every resource path known to the host, in host order.
    fn resource_paths(&self) -> Vec<String>;

    /// All resources matching `pattern`, in enumeration order.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] when the pattern does not compile.
    fn glob_resources(&self, pattern: &str) -> Result<Vec<ResourcePath>, PatternError> {
        let matcher = glob::compile_glob(pattern)?;
        Ok(self
            .resource_paths()
            .iter()
            .filter(|raw| matcher.matches(raw))
            .filter_map(|raw| ResourcePath::new(raw).ok())
            .collect())
    }

    /// Glob beneath `base`: the pattern is anchored at `base` rather than
    /// matched as a suffix.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] when the pattern does not compile.
    fn glob_in(&self, base: &ResourcePath, pattern: &str) -> Result<Vec<ResourcePath>, PatternError> {
        self.glob_resources(&format!("/{base}/{pattern}"))
    }

    /// Glob beneath `base` at any depth, shorthand for a `**/` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Anchored`] when `pattern` starts with `/`,
    /// and other [`PatternError`] kinds when it does not compile.
    fn rglob_in(
        &self,
        base: &ResourcePath,
        pattern: &str,
    ) -> Result<Vec<ResourcePath>, PatternError> {
        if pattern.starts_with('/') {
            return Err(PatternError::Anchored {
                pattern: pattern.to_owned(),
            });
        }
        self.glob_in(base, &format!("**/{pattern}"))
    }

    /// Direct children of `base` that have at least one resource at or
    /// beneath them, deduplicated in first-occurrence order.
    ///
    /// The host does not track directories, so a child appears here even
    /// when only deeper descendants exist.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] when the traversal pattern does not
    /// compile; in practice this cannot happen for a valid `base`.
    fn children_of(&self, base: &ResourcePath) -> Result<Vec<ResourcePath>, PatternError> {
        let depth = base.parts().len();
        Ok(self
            .glob_in(base, "**")?
            .into_iter()
            .filter_map(|resource| resource.parts().get(depth).cloned())
            .unique()
            .map(|next_part| base.joinpath([next_part]))
            .collect())
    }

    /// Whether a resource exists at exactly `path`.
    ///
    /// Paths with descendants but no resource of their own do not exist in
    /// this sense.
    fn exists(&self, path: &ResourcePath) -> bool {
        let raw = path.to_string();
        self.resource_paths().iter().any(|candidate| *candidate == raw)
    }
}

/// An in-memory index over a fixed listing.
///
/// Useful in tests and for hosts that deliver their resource listing as a
/// snapshot.
#[derive(Clone, Debug, Default)]
pub struct StaticIndex {
    paths: Vec<String>,
}

impl StaticIndex {
    /// Build an index over the given path strings.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl ResourceIndex for StaticIndex {
    fn resource_paths(&self) -> Vec<String> {
        self.paths.clone()
    }
}
