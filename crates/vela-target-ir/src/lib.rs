//! The lowering pass's output shape (T-IR, §4.4): host expressions with
//! reactivity reified as explicit runtime calls. This crate is pure data —
//! the rewriting rules that produce it live in `vela-lowering`.

pub mod decl;
pub mod expr;
pub mod file;

pub use decl::{
    HostConstDecl, HostDataDecl, HostDeclaration, HostEnumDecl, HostEnumVariant,
    HostFunctionDecl,
};
pub use expr::{HostBlock, HostExpr, HostStatement, Lowered};
pub use file::{HostFile, RUNTIME_IMPORTS};
