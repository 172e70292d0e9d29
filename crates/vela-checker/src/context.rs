//! The checker's read-only environment: the global package table, the
//! core-type handles, and the current file's local scope (§3.5, §4.1). One
//! `Checker` is built per file and lives for the whole of that file's
//! checking pass; it never mutates after construction — only the [`Scope`]
//! chain threaded alongside it does.

use vela_binder::LocalScope;
use vela_checked_ir::{CoreTypes, GlobalTable};
use vela_common::Symbol;

pub struct Checker<'a> {
    /// The module this file belongs to — used to qualify every declaration
    /// this file introduces.
    pub module: &'a Symbol,
    pub global: &'a GlobalTable,
    pub core: &'a CoreTypes,
    pub locals: &'a LocalScope,
}

impl<'a> Checker<'a> {
    #[must_use]
    pub fn new(
        module: &'a Symbol,
        global: &'a GlobalTable,
        core: &'a CoreTypes,
        locals: &'a LocalScope,
    ) -> Self {
        Self {
            module,
            global,
            core,
            locals,
        }
    }

    /// Looks `name` up in the package table of the package owning `symbol`.
    #[must_use]
    pub fn declared_type(&self, symbol: &Symbol) -> Option<&vela_checked_ir::TypeExpression> {
        self.global
            .get(symbol.package())
            .and_then(|table| table.get(symbol))
            .map(|record| &record.ty)
    }
}
