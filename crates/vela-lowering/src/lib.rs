//! Reactive lowering (§4.4): rewrites a checked file (C-IR) into a host
//! file (T-IR), reifying `var`/`flow`/`def` as explicit runtime calls
//! (`variable`, `get`, `set`, `singleton`, `flow`, `def`, `projection`).
//! This is the last stage owned by the core; the result is handed to a
//! host-specific emitter (external, §1).
//!
//! The crate is organized the way `vela-checker` is: one module per
//! syntactic layer (`expr`, `statements`, `decl`), each threading the
//! enclosing [`vela_common::phase::FunctionPhase`] down through the
//! recursion, plus `context` for the per-file mutable state and `file` for
//! the top-level driver.

pub mod context;
pub mod decl;
pub mod expr;
pub mod file;
pub mod statements;

pub use context::LoweringContext;
pub use expr::lower_expression;
pub use file::lower_file;
pub use statements::lower_block;
