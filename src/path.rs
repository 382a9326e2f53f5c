//! Immutable, pathlib-style virtual resource paths.
//!
//! A [`ResourcePath`] is one or more non-empty, slash-free components,
//! always interpreted as absolute within the host's resource namespace
//! ("Packages/Foo/bar.py"). Unlike filesystem paths, `.` and `..` carry no
//! special meaning and there is no implicit filesystem access anywhere in
//! this module. Values are hashable, compare structurally over their
//! components, and order lexicographically.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::glob::{self, PatternError};

/// Errors raised when constructing or transforming a [`ResourcePath`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Construction produced zero components.
    #[error("empty resource path")]
    Empty,
    /// A replacement name was empty or contained a separator.
    #[error("invalid component name {name:?}")]
    InvalidName {
        /// The rejected replacement name.
        name: String,
    },
    /// `relative_to` was given a path that is not an ancestor.
    #[error("'{path}' is not beneath '{base}'")]
    NotADescendant {
        /// The path being decomposed.
        path: String,
        /// The claimed ancestor.
        base: String,
    },
}

/// A virtual resource path.
///
/// Equality, hashing, and ordering are all defined over the component
/// sequence, so two paths built from differently formatted inputs are
/// interchangeable once normalised. Ordering against any other type is a
/// compile-time error.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourcePath {
    parts: Vec<String>,
}

impl ResourcePath {
    /// Build a path from a single slash-delimited string.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Empty`] when the input contains no components.
    pub fn new(path: impl AsRef<str>) -> Result<Self, PathError> {
        Self::from_segments([path])
    }

    /// Build a path by concatenating the given segments in order.
    ///
    /// Each segment is split on `/` with empty components dropped, so
    /// trailing and doubled slashes are harmless and an empty segment
    /// contributes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Empty`] when no components remain.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parts = Vec::new();
        for segment in segments {
            push_segment(&mut parts, segment.as_ref());
        }
        if parts.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self { parts })
    }

    /// The path's components, always at least one.
    #[must_use]
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// The final component.
    #[must_use]
    pub fn name(&self) -> &str {
        self.parts.last().map_or("", String::as_str)
    }

    /// The first component (usually `"Packages"` or `"Cache"`).
    #[must_use]
    pub fn root(&self) -> &str {
        self.parts.first().map_or("", String::as_str)
    }

    /// The second component, or `None` for a root path.
    #[must_use]
    pub fn package(&self) -> Option<&str> {
        self.parts.get(1).map(String::as_str)
    }

    /// The logical parent. A single-component path is its own parent,
    /// which terminates the ancestor chain.
    #[must_use]
    pub fn parent(&self) -> Self {
        match self.parts.split_last() {
            Some((_, rest)) if !rest.is_empty() => Self {
                parts: rest.to_vec(),
            },
            _ => self.clone(),
        }
    }

    /// Iterator over the strict ancestors, nearest first. Empty for a
    /// root path.
    #[must_use]
    pub fn parents(&self) -> Parents {
        Parents {
            next: self.strict_parent(),
        }
    }

    fn strict_parent(&self) -> Option<Self> {
        (self.parts.len() > 1).then(|| self.parent())
    }

    /// The final component's last extension, including its dot.
    ///
    /// A dot at the very start or very end of the name does not begin a
    /// suffix, so `".profile"` and `"done."` both have an empty suffix.
    #[must_use]
    pub fn suffix(&self) -> &str {
        let name = self.name();
        match interior_dot(name) {
            Some(at) => &name[at..],
            None => "",
        }
    }

    /// The final component with its last extension removed.
    #[must_use]
    pub fn stem(&self) -> &str {
        let name = self.name();
        match interior_dot(name) {
            Some(at) => &name[..at],
            None => name,
        }
    }

    /// All trailing extensions of the final component, in order.
    ///
    /// Leading dots do not delimit extensions and a name ending in a dot
    /// has none, so `"bar.tar.gz"` yields `[".tar", ".gz"]` while
    /// `".hidden"` and `"foo..."` yield nothing.
    #[must_use]
    pub fn suffixes(&self) -> Vec<String> {
        let name = self.name();
        if name.ends_with('.') {
            return Vec::new();
        }
        name.trim_start_matches('.')
            .split('.')
            .skip(1)
            .map(|group| format!(".{group}"))
            .collect()
    }

    /// Test this path against a glob pattern.
    ///
    /// A leading `/` anchors the pattern to the whole path; without it the
    /// pattern may match any suffix beginning at a component boundary.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] when the pattern does not compile.
    pub fn matches(&self, pattern: &str) -> Result<bool, PatternError> {
        Ok(glob::compile_glob(pattern)?.matches(&self.to_string()))
    }

    /// Append the given segments, each normalised like the constructor.
    #[must_use]
    pub fn joinpath<I, S>(&self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parts = self.parts.clone();
        for segment in segments {
            push_segment(&mut parts, segment.as_ref());
        }
        Self { parts }
    }

    /// Replace the final component. Replacing the name of a root path
    /// replaces the root itself.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidName`] when `name` is empty or contains
    /// a `/`.
    pub fn with_name(&self, name: &str) -> Result<Self, PathError> {
        if name.is_empty() || name.contains('/') {
            return Err(PathError::InvalidName {
                name: name.to_owned(),
            });
        }
        let mut parts = self.parts.clone();
        parts.pop();
        parts.push(name.to_owned());
        Ok(Self { parts })
    }

    /// Replace the final component's suffix.
    ///
    /// An empty `suffix` removes the existing one; a non-empty `suffix` on
    /// a name without one is appended.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidName`] when `suffix` contains a `/`.
    pub fn with_suffix(&self, suffix: &str) -> Result<Self, PathError> {
        self.with_name(&format!("{}{suffix}", self.stem()))
    }

    /// The components of this path below `base`. Empty when the paths are
    /// equal.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NotADescendant`] when `base` is not an
    /// ancestor of (or equal to) this path.
    pub fn relative_to(&self, base: &Self) -> Result<&[String], PathError> {
        self.parts
            .strip_prefix(base.parts.as_slice())
            .ok_or_else(|| PathError::NotADescendant {
                path: self.to_string(),
                base: base.to_string(),
            })
    }
}

fn push_segment(parts: &mut Vec<String>, segment: &str) {
    parts.extend(
        segment
            .split('/')
            .filter(|part| !part.is_empty())
            .map(str::to_owned),
    );
}

/// Byte offset of the last dot in `name` that is neither its first nor
/// its last character.
fn interior_dot(name: &str) -> Option<usize> {
    match name.rfind('.') {
        Some(at) if at > 0 && at < name.len() - 1 => Some(at),
        _ => None,
    }
}

/// Iterator over a path's strict ancestors, nearest first.
#[derive(Clone, Debug)]
pub struct Parents {
    next: Option<ResourcePath>,
}

impl Iterator for Parents {
    type Item = ResourcePath;

    fn next(&mut self) -> Option<ResourcePath> {
        let current = self.next.take()?;
        self.next = current.strict_parent();
        Some(current)
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts.join("/"))
    }
}

impl FromStr for ResourcePath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, PathError> {
        Self::new(s)
    }
}

impl TryFrom<&str> for ResourcePath {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self, PathError> {
        Self::new(value)
    }
}

impl Serialize for ResourcePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ResourcePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
