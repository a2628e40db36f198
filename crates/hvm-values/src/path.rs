//! Key paths for addressing within value trees
//!
//! Provides [`KeyPath`] for hierarchical addressing of entries in nested mappings.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Path within a value tree
///
/// Always held as split segments. The dotted form is only used for display
/// and parsing, so a key such as `app.kubernetes.io/name` built with
/// [`KeyPath::child`] stays a single segment.
///
/// # Examples
/// - `["service", "port"]` → `service.port`
/// - `["ingress", "tls", "secretName"]` → `ingress.tls.secretName`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// Create new path from segments
    ///
    /// # Errors
    /// Returns [`PathError::EmptySegment`] if any segment is empty
    pub fn new(segments: Vec<String>) -> Result<Self, PathError> {
        if segments.iter().any(String::is_empty) {
            return Err(PathError::EmptySegment);
        }
        Ok(Self(segments))
    }

    /// One-segment path for a top-level key
    #[inline]
    #[must_use]
    pub fn single(segment: impl Into<String>) -> Self {
        Self(vec![segment.into()])
    }

    /// Path of the document root, with no segments
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Segments from the outermost key inwards
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Whether this addresses the root
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Innermost key, `None` at the root
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Path one level deeper
    ///
    /// Accepts any mapping key verbatim, including `""` and keys containing
    /// dots. Unlike [`KeyPath::new`] and the textual form, no segment is
    /// rejected.
    #[inline]
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut new = self.clone();
        new.0.push(segment.into());
        new
    }
}

impl Display for KeyPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for KeyPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::root());
        }

        let segments: Vec<String> = s
            .split('.')
            .map(|seg| {
                if seg.is_empty() {
                    Err(PathError::EmptySegment)
                } else {
                    Ok(seg.to_string())
                }
            })
            .collect::<Result<_, _>>()?;

        Ok(Self(segments))
    }
}

impl Default for KeyPath {
    fn default() -> Self {
        Self::root()
    }
}

/// Errors related to key paths
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Empty segment in path
    #[error("path contains empty segment")]
    EmptySegment,

    /// Operation needs at least one segment
    #[error("invalid path: operation requires a non-empty key path")]
    InvalidPath,
}
