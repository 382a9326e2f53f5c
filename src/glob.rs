//! Glob pattern compilation for slash-delimited resource paths.
//!
//! Patterns support `*` (zero or more non-slash characters), `?` (exactly
//! one non-slash character), `[...]` character classes, and `**` matching
//! any number of whole path components. A leading `/` anchors the pattern
//! to the start of the path; without it the pattern may match any suffix
//! of the path that begins at a component boundary. Compiled matchers
//! always test the entire candidate string, never a substring.
//!
//! Callers typically match a handful of patterns against many paths, so
//! compilation results are memoised in a bounded LRU cache keyed by the
//! literal pattern string.

use std::num::NonZeroUsize;
use std::sync::{LazyLock, Mutex, MutexGuard};

use lru::LruCache;
use regex::Regex;
use thiserror::Error;

const CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};

static COMPILED: LazyLock<Mutex<LruCache<String, GlobMatcher>>> =
    LazyLock::new(|| Mutex::new(LruCache::new(CACHE_CAPACITY)));

/// Errors raised while compiling a glob pattern.
///
/// All variants are detected at compile time; a successfully compiled
/// [`GlobMatcher`] never fails at match time.
#[derive(Debug, Clone, Error)]
pub enum PatternError {
    /// `**` appeared inside a component alongside other characters.
    #[error("invalid glob pattern '{pattern}': '**' can only be an entire path component")]
    RecursiveWildcard {
        /// Original pattern string.
        pattern: String,
    },
    /// A `[` character class was never closed.
    #[error("invalid glob pattern '{pattern}': unterminated '[' character class")]
    UnterminatedClass {
        /// Original pattern string.
        pattern: String,
    },
    /// The translated expression was rejected by the regex engine, usually
    /// because of a malformed character class passed through verbatim.
    #[error("invalid glob pattern '{pattern}'")]
    Translation {
        /// Original pattern string.
        pattern: String,
        /// Underlying regex parse failure.
        source: regex::Error,
    },
    /// An operation requiring a relative pattern was given an anchored one.
    #[error("pattern '{pattern}' must not start with '/'")]
    Anchored {
        /// Original pattern string.
        pattern: String,
    },
}

/// A compiled glob pattern, cheap to clone and reusable across many
/// candidate paths.
#[derive(Clone, Debug)]
pub struct GlobMatcher {
    expr: Regex,
}

impl GlobMatcher {
    /// Return `true` when the entire candidate path satisfies the pattern.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.expr.is_match(candidate)
    }
}

/// Compile `pattern` into a [`GlobMatcher`], consulting the pattern cache
/// first.
///
/// # Errors
///
/// Returns a [`PatternError`] for misplaced `**` or malformed character
/// classes.
pub fn compile_glob(pattern: &str) -> Result<GlobMatcher, PatternError> {
    if let Some(hit) = lock_cache().get(pattern) {
        return Ok(hit.clone());
    }
    tracing::debug!(pattern, "compiling glob pattern");
    let matcher = translate(pattern)?;
    lock_cache().put(pattern.to_owned(), matcher.clone());
    Ok(matcher)
}

fn lock_cache() -> MutexGuard<'static, LruCache<String, GlobMatcher>> {
    match COMPILED.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Fragment matching zero or more whole path components, including none.
const ANY_COMPONENTS: &str = r"(?:.*(?:\z|/))?";

fn translate(pattern: &str) -> Result<GlobMatcher, PatternError> {
    let (anchored, body) = match pattern.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, pattern),
    };

    let mut expr = String::from(r"\A");
    if !anchored {
        // An unanchored pattern behaves as if it started with `**/`.
        expr.push_str(ANY_COMPONENTS);
    }
    for component in body.split('/') {
        if component.is_empty() {
            continue;
        }
        if component == "**" {
            expr.push_str(ANY_COMPONENTS);
        } else if component.contains("**") {
            return Err(PatternError::RecursiveWildcard {
                pattern: pattern.to_owned(),
            });
        } else {
            translate_component(pattern, component, &mut expr)?;
            expr.push('/');
        }
    }
    // Components end with a separator; the final one must not.
    if expr.ends_with('/') {
        expr.pop();
    }
    expr.push_str(r"\z");

    let expr = Regex::new(&expr).map_err(|source| PatternError::Translation {
        pattern: pattern.to_owned(),
        source,
    })?;
    Ok(GlobMatcher { expr })
}

/// Translate a single slash-free component, appending to `expr`.
fn translate_component(
    pattern: &str,
    component: &str,
    expr: &mut String,
) -> Result<(), PatternError> {
    let mut rest = component;
    while let Some(at) = rest.find(['*', '?', '[']) {
        expr.push_str(&regex::escape(&rest[..at]));
        let tail = &rest[at..];
        if let Some(remaining) = tail.strip_prefix('*') {
            expr.push_str("[^/]*");
            rest = remaining;
        } else if let Some(remaining) = tail.strip_prefix('?') {
            expr.push_str("[^/]");
            rest = remaining;
        } else {
            // Character classes are copied through verbatim, up to the
            // first `]`.
            let Some(end) = tail.find(']') else {
                return Err(PatternError::UnterminatedClass {
                    pattern: pattern.to_owned(),
                });
            };
            expr.push_str(&tail[..=end]);
            rest = &tail[end + 1..];
        }
    }
    expr.push_str(&regex::escape(rest));
    Ok(())
}
