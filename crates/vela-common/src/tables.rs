//! Package-level tables (§3.5): the name environment threaded through
//! symbol collection, import verification, checking and lowering.
//!
//! Generic over the declared type representation (`Ty`) so this crate does
//! not need to depend on `vela-checked-ir`; that crate re-exports the
//! instantiated aliases with `Ty = vela_checked_ir::TypeExpression`.

use crate::access::AccessLevel;
use crate::collections::PersistentMap;
use crate::package::PackageName;
use crate::symbol::Symbol;

/// One entry of a package's symbol table: the access level a declaration
/// was published with, its fully qualified name, the module (file/directory
/// symbol) it was declared in, and its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRecord<Ty> {
    pub access: AccessLevel,
    pub name: Symbol,
    pub module: Symbol,
    pub ty: Ty,
}

impl<Ty> AccessRecord<Ty> {
    #[must_use]
    pub fn new(access: AccessLevel, name: Symbol, module: Symbol, ty: Ty) -> Self {
        Self {
            access,
            name,
            module,
            ty,
        }
    }
}

/// A single package's `Symbol -> AccessRecord` table, produced once by
/// symbol collection and read-only thereafter.
pub type PackageTable<Ty> = PersistentMap<Symbol, AccessRecord<Ty>>;

/// Every package's table, keyed by `PackageName`. Acyclic by construction:
/// imports are checked for existence against this table, never for cycles,
/// because type references are by symbol rather than by containment (§9).
pub type GlobalTable<Ty> = PersistentMap<PackageName, PackageTable<Ty>>;

/// The short-name -> fully-qualified-symbol map injected into every file's
/// initial scope (e.g. `"Int" -> core::math::Int`).
pub type Preamble = PersistentMap<String, Symbol>;
