//! Package identity: organization, name and semantic version.

use std::cmp::Ordering;
use std::fmt;

/// A semver triple. Ordered lexicographically by (major, minor, patch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// `(organization, name, version)`. Two packages are equal iff all three
/// components match. For "same assembly" checks (the `internal` access
/// level), equality modulo the `name` field is used instead — see
/// [`PackageName::same_assembly`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PackageName {
    pub organization: String,
    pub name: String,
    pub version: Version,
}

impl PackageName {
    #[must_use]
    pub fn new(organization: impl Into<String>, name: impl Into<String>, version: Version) -> Self {
        Self {
            organization: organization.into(),
            name: name.into(),
            version,
        }
    }

    /// "Same assembly": organization and version match, ignoring the name.
    /// Backs the `internal` access level, which groups packages that are
    /// versioned and built together under one organization even if split
    /// across multiple named artifacts.
    #[must_use]
    pub fn same_assembly(&self, other: &Self) -> bool {
        self.organization == other.organization && self.version == other.version
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.organization, self.name, self.version)
    }
}

impl PartialOrd for PackageName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PackageName {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.organization, &self.name, &self.version).cmp(&(
            &other.organization,
            &other.name,
            &other.version,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_requires_all_three_components() {
        let a = PackageName::new("acme", "widgets", Version::new(1, 0, 0));
        let b = PackageName::new("acme", "widgets", Version::new(1, 0, 1));
        assert_ne!(a, b);
    }

    #[test]
    fn same_assembly_ignores_name() {
        let a = PackageName::new("acme", "widgets", Version::new(1, 0, 0));
        let b = PackageName::new("acme", "gadgets", Version::new(1, 0, 0));
        assert!(a.same_assembly(&b));
        let c = PackageName::new("other-org", "widgets", Version::new(1, 0, 0));
        assert!(!a.same_assembly(&c));
    }
}
