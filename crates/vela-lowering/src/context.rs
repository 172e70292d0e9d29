//! Mutable bookkeeping threaded through a single file's lowering pass
//! (§4.4): the monotonic temporary-name counter used to avoid clashes
//! between generated `flow`/`def` callback parameters, and the set of
//! runtime entry points this file actually ends up referencing (so the
//! emitted prelude only imports what's used).

use std::cell::{Cell, RefCell};

/// Per-file lowering state. One [`LoweringContext`] is built per
/// [`vela_checked_ir::File`] and threaded by reference through every
/// `lower_*` call for that file; it is never shared across files (§5,
/// "Shared-resource policy": lowering, like checking, is single-threaded
/// and file-local).
#[derive(Default)]
pub struct LoweringContext {
    temp_counter: Cell<u32>,
    runtime_uses: RefCell<Vec<String>>,
}

impl LoweringContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh, file-unique temporary identifier (`tmp0`, `tmp1`, ...) for a
    /// generated `flow`/`def` callback parameter or hoisted `let`.
    #[must_use]
    pub fn fresh_temp(&self) -> String {
        let n = self.temp_counter.get();
        self.temp_counter.set(n + 1);
        format!("tmp{n}")
    }

    /// Records that this file's lowering referenced `name` from the
    /// runtime (one of [`vela_target_ir::RUNTIME_IMPORTS`]), in first-use
    /// order, deduplicated.
    pub fn record_runtime_use(&self, name: &'static str) {
        let mut uses = self.runtime_uses.borrow_mut();
        if !uses.iter().any(|u| u == name) {
            uses.push(name.to_string());
        }
    }

    /// The runtime names this file referenced, in first-use order.
    #[must_use]
    pub fn runtime_uses(&self) -> Vec<String> {
        self.runtime_uses.borrow().clone()
    }
}
