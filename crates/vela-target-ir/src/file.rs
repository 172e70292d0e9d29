//! A fully lowered file, ready to hand to the host emitter (out of scope
//! here — see §1, "External collaborators").

use crate::decl::HostDeclaration;

/// The fixed set of runtime entry points a lowered file may reference.
/// Lowering only ever imports from this list; which of them actually get
/// used is a function of which reactive constructs the source file had.
pub const RUNTIME_IMPORTS: &[&str] =
    &["get", "set", "singleton", "variable", "flow", "def", "projection"];

#[derive(Debug, Clone, PartialEq)]
pub struct HostFile {
    /// Runtime names this file actually references, in first-use order.
    pub prelude: Vec<String>,
    pub declarations: Vec<HostDeclaration>,
}

impl HostFile {
    #[must_use]
    pub fn new(declarations: Vec<HostDeclaration>) -> Self {
        Self {
            prelude: Vec::new(),
            declarations,
        }
    }
}
