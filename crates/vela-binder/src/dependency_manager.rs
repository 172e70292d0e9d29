//! The interface the binder uses to ask "what does this import refer to?"
//! (§3.6). The actual dependency graph — which packages a package declares
//! on, and where their compiled package tables live — is owned by the CLI
//! driver; the binder only ever sees it through this trait.

use vela_common::Symbol;
use vela_parsed_ir::ImportDecl;

/// Per-package knowledge of declared dependencies.
pub trait DependencyManager {
    /// Flattens an import declaration into the set of fully qualified
    /// symbols it refers to, expanding nested `pkg::{a, b::{c, d}}` groups.
    /// Order follows the declaration's own traversal order so diagnostics
    /// are deterministic.
    fn breakdown_import(&self, import: &ImportDecl) -> Vec<Symbol>;
}
