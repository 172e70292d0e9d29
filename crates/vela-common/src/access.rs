//! The five-level access model (§3.2, §4.2). Part of the module interface
//! contract: spellings and predicate semantics are exported verbatim and
//! must stay stable wire vocabulary for downstream tooling.

use crate::symbol::Symbol;

/// Visibility of a declared symbol. Defaults to `Internal` when unmarked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum AccessLevel {
    Private,
    Protected,
    Package,
    Internal,
    Public,
}

impl Default for AccessLevel {
    fn default() -> Self {
        Self::Internal
    }
}

impl AccessLevel {
    /// Applies the access predicate from §4.2: is a reference from module
    /// `from` to a symbol declared at module `to` with this access level
    /// permitted?
    #[must_use]
    pub fn permits(self, from: &Symbol, to: &Symbol) -> bool {
        match self {
            Self::Private => from == to,
            Self::Protected => to.parent().is_some_and(|to_parent| to_parent.is_parent(from)),
            Self::Package => from.package() == to.package(),
            Self::Internal => from.package().same_assembly(to.package()),
            Self::Public => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::{PackageName, Version};

    fn pkg(org: &str) -> PackageName {
        PackageName::new(org, "widgets", Version::new(1, 0, 0))
    }

    #[test]
    fn private_requires_exact_same_module() {
        let to = Symbol::top_level(pkg("acme"), "internal_fn");
        let same = to.clone();
        let other = Symbol::top_level(pkg("acme"), "other_fn");
        assert!(AccessLevel::Private.permits(&same, &to));
        assert!(!AccessLevel::Private.permits(&other, &to));
    }

    #[test]
    fn protected_requires_from_nested_under_tos_parent() {
        let to_parent = Symbol::top_level(pkg("acme"), "shapes");
        let to = to_parent.child("Circle");
        let sibling = to_parent.child("Square");
        let unrelated = Symbol::top_level(pkg("acme"), "other");
        assert!(AccessLevel::Protected.permits(&sibling, &to));
        assert!(!AccessLevel::Protected.permits(&unrelated, &to));
    }

    #[test]
    fn package_requires_same_package_name_and_version() {
        let to = Symbol::top_level(pkg("acme"), "x");
        let same_pkg = Symbol::top_level(pkg("acme"), "y");
        let other_pkg = Symbol::top_level(pkg("other"), "y");
        assert!(AccessLevel::Package.permits(&same_pkg, &to));
        assert!(!AccessLevel::Package.permits(&other_pkg, &to));
    }

    #[test]
    fn internal_ignores_package_name_but_not_organization_or_version() {
        let to = Symbol::top_level(
            PackageName::new("acme", "widgets", Version::new(1, 0, 0)),
            "x",
        );
        let same_assembly = Symbol::top_level(
            PackageName::new("acme", "gadgets", Version::new(1, 0, 0)),
            "y",
        );
        let different_assembly = Symbol::top_level(
            PackageName::new("other-org", "widgets", Version::new(1, 0, 0)),
            "y",
        );
        assert!(AccessLevel::Internal.permits(&same_assembly, &to));
        assert!(!AccessLevel::Internal.permits(&different_assembly, &to));
    }

    #[test]
    fn public_always_permits() {
        let to = Symbol::top_level(pkg("acme"), "x");
        let anyone = Symbol::top_level(pkg("someone-else"), "y");
        assert!(AccessLevel::Public.permits(&anyone, &to));
    }
}
