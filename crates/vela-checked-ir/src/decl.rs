//! Checked top-level declarations (§3.4, §4.3.5 "Function statement").

use crate::expr::Expression;
use crate::types::TypeExpression;
use vela_common::phase::ExpressionPhase;
use vela_common::{AccessLevel, Position, Symbol};

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionParam {
    pub name: String,
    pub phase: Option<ExpressionPhase>,
    pub ty: TypeExpression,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub symbol: Symbol,
    pub access: AccessLevel,
    /// Always `TypeExpression::Function`.
    pub ty: TypeExpression,
    pub params: Vec<FunctionParam>,
    pub body: Expression,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub symbol: Symbol,
    pub access: AccessLevel,
    pub ty: TypeExpression,
    pub value: Expression,
    pub pos: Position,
}

/// A product-type declaration. `shape` is always `Struct`, `Tuple` or
/// `Atom`.
#[derive(Debug, Clone, PartialEq)]
pub struct DataDecl {
    pub symbol: Symbol,
    pub access: AccessLevel,
    pub shape: TypeExpression,
    pub pos: Position,
}

/// A sum-type declaration. `shape` is always `TypeExpression::Enum`.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub symbol: Symbol,
    pub access: AccessLevel,
    pub shape: TypeExpression,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Data(DataDecl),
    Enum(EnumDecl),
    Function(FunctionDecl),
    Const(ConstDecl),
}

impl Declaration {
    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        match self {
            Self::Data(d) => &d.symbol,
            Self::Enum(d) => &d.symbol,
            Self::Function(d) => &d.symbol,
            Self::Const(d) => &d.symbol,
        }
    }
}
