//! The parsed intermediate representation (P-IR): the shape the external
//! parser hands to the binder and checker. Every node is tree-shaped,
//! immutable and structurally compared (§3.4); names are unresolved dotted
//! paths and type expressions are exactly as written.

pub mod decl;
pub mod expr;
pub mod file;
pub mod import;
pub mod types;

pub use decl::{ConstDecl, DataDecl, DataShape, Declaration, EnumDecl, FunctionDecl, FunctionParam};
pub use expr::{AssignTarget, Block, Expression, LambdaParam, Literal, Statement};
pub use file::File;
pub use import::{ImportDecl, ImportSpec};
pub use types::{ParsedParam, ParsedType};
