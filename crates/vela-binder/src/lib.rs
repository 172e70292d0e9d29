//! Symbol collection, nominal-type qualification and import verification
//! (§4.1, §4.2): the first of the core's four subsystems. This crate turns
//! a `P-IR::File` plus a package's dependency graph into the flat local
//! scope the checker needs, and rejects imports the access model forbids
//! before the checker ever runs.

pub mod collector;
pub mod dependency_manager;
pub mod import_verifier;
pub mod qualifier;

pub use collector::{collect_declarations, resolve_short_name, LocalScope};
pub use dependency_manager::DependencyManager;
pub use import_verifier::verify_import;
pub use qualifier::{check_type_expression, type_parameter_symbol, TypeParamScope};
