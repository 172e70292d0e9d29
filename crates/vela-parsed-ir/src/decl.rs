//! Top-level and nested declarations (§3.4, §4.1).

use crate::expr::Expression;
use crate::import::ImportDecl;
use crate::types::ParsedType;
use vela_common::phase::{ExpressionPhase, FunctionPhase};
use vela_common::{AccessLevel, Position};

/// The shape of a product type or of one enum variant.
#[derive(Debug, Clone, PartialEq)]
pub enum DataShape {
    Struct(Vec<(String, ParsedType)>),
    Tuple(Vec<ParsedType>),
    Atom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataDecl {
    pub name: String,
    pub access: Option<AccessLevel>,
    pub type_params: Vec<String>,
    pub shape: DataShape,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: String,
    pub access: Option<AccessLevel>,
    pub type_params: Vec<String>,
    pub variants: Vec<(String, DataShape)>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionParam {
    pub name: String,
    pub phase: Option<ExpressionPhase>,
    pub ty: ParsedType,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub access: Option<AccessLevel>,
    pub phase: FunctionPhase,
    pub type_params: Vec<String>,
    pub params: Vec<FunctionParam>,
    pub result: Option<ParsedType>,
    pub body: Expression,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub name: String,
    pub access: Option<AccessLevel>,
    pub ty: Option<ParsedType>,
    pub value: Expression,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Data(DataDecl),
    Enum(EnumDecl),
    Function(FunctionDecl),
    Const(ConstDecl),
    Import(ImportDecl),
}

impl Declaration {
    #[must_use]
    pub fn pos(&self) -> &Position {
        match self {
            Self::Data(d) => &d.pos,
            Self::Enum(d) => &d.pos,
            Self::Function(d) => &d.pos,
            Self::Const(d) => &d.pos,
            Self::Import(d) => &d.pos,
        }
    }

    /// The short name this declaration introduces into file scope, if any
    /// (imports introduce names indirectly via `ImportDecl::breakdown`).
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Data(d) => Some(&d.name),
            Self::Enum(d) => Some(&d.name),
            Self::Function(d) => Some(&d.name),
            Self::Const(d) => Some(&d.name),
            Self::Import(_) => None,
        }
    }
}
