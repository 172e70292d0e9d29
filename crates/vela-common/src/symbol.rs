//! Fully qualified symbols: a package plus a path of name segments.

use crate::package::PackageName;
use std::fmt;
use std::sync::Arc;

/// The fully qualified identity of a declared entity: a package plus the
/// segment path leading to it (e.g. `acme/widgets@1.0.0::core::math::Int`).
///
/// Segments are reference-counted so that `child`/`parent` are cheap; two
/// symbols compare equal iff their package and segment list match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Symbol {
    pub package: Arc<PackageName>,
    pub segments: Arc<Vec<String>>,
}

impl Symbol {
    #[must_use]
    pub fn new(package: PackageName, segments: Vec<String>) -> Self {
        Self {
            package: Arc::new(package),
            segments: Arc::new(segments),
        }
    }

    #[must_use]
    pub fn top_level(package: PackageName, name: impl Into<String>) -> Self {
        Self::new(package, vec![name.into()])
    }

    /// A symbol one level deeper, naming `segment` as the final component.
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = (*self.segments).clone();
        segments.push(segment.into());
        Self {
            package: self.package.clone(),
            segments: Arc::new(segments),
        }
    }

    /// The symbol with its last segment removed, or `None` if this symbol
    /// is already top-level (a single segment).
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() <= 1 {
            return None;
        }
        let mut segments = (*self.segments).clone();
        segments.pop();
        Some(Self {
            package: self.package.clone(),
            segments: Arc::new(segments),
        })
    }

    /// The last segment of this symbol's path.
    #[must_use]
    pub fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// True if `self` is a prefix of `other` within the same package,
    /// i.e. `other` is nested under (or equal to) `self`.
    #[must_use]
    pub fn is_parent(&self, other: &Self) -> bool {
        self.package == other.package
            && other.segments.len() >= self.segments.len()
            && self.segments.iter().zip(other.segments.iter()).all(|(a, b)| a == b)
    }

    #[must_use]
    pub fn package(&self) -> &PackageName {
        &self.package
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.package, self.segments.join("::"))
    }
}
