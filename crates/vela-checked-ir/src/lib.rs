//! The checked intermediate representation (C-IR): the checker's output.
//! Every expression node carries a resolved [`TypeExpression`] and an
//! [`vela_common::ExpressionPhase`] (§3.4). This crate is pure data: the
//! rules that produce well-formed C-IR (assignability, generic inference,
//! phase propagation) live in `vela-checker`.

pub mod core;
pub mod decl;
pub mod expr;
pub mod substitute;
pub mod types;

pub use crate::core::CoreTypes;
pub use decl::{ConstDecl, DataDecl, Declaration, EnumDecl, FunctionDecl, FunctionParam};
pub use expr::{AssignTarget, Block, CheckedLambdaParam, Expression, Literal, Statement, Typed};
pub use substitute::Substitution;
pub use types::{
    AtomType, EnumType, FunctionParamType, FunctionType, ModuleType, NominalType,
    OverloadFunctionType, ParameterizedType, StructType, TupleType, TypeExpression,
    TypeParameterType, VariantShape,
};

/// The package-level symbol table, instantiated for our concrete type
/// representation (§3.5).
pub type AccessRecord = vela_common::tables::AccessRecord<TypeExpression>;
pub type PackageTable = vela_common::tables::PackageTable<TypeExpression>;
pub type GlobalTable = vela_common::tables::GlobalTable<TypeExpression>;

pub mod file;
pub use file::File;
