//! Ergonomic virtual resource paths with glob matching.
//!
//! Resource paths are slash-delimited, always-absolute identifiers into a
//! host-managed namespace, such as `Packages/Foo/bar.py`. This library
//! models them as immutable [`ResourcePath`] values, compiles glob
//! patterns into reusable cached matchers, and layers resource
//! enumeration and filesystem root mapping on top without performing any
//! I/O of its own.

pub mod glob;
pub mod index;
pub mod path;
pub mod roots;

pub use glob::{GlobMatcher, PatternError, compile_glob};
pub use index::{ResourceIndex, StaticIndex};
pub use path::{Parents, PathError, ResourcePath};
pub use roots::{ResourceRoots, RootsError};
