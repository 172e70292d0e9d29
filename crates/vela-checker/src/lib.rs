//! The checker (§4.3): bidirectional type checking, generic inference,
//! phase discipline and overload resolution over the parsed IR, producing
//! the checked IR consumed by `vela-lowering`.
//!
//! Grounded in the teacher's own checker decomposition — a state object
//! split across many concern-named files rather than one monolith — but
//! built around this language's tree-shaped, structurally compared IR
//! instead of the teacher's arena/`NodeIndex` model.

pub mod assignability;
pub mod context;
pub mod declarations;
pub mod expr;
pub mod file_checker;
pub mod generics;
pub mod merge;
pub mod overloads;
pub mod phase_rules;
pub mod scope;
pub mod statements;

pub use context::Checker;
pub use file_checker::check_file;
pub use scope::{Binding, FunctionScope, Scope};
