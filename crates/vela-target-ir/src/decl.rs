//! Host-level top-level declarations (§4.4).

use crate::expr::{HostBlock, Lowered};
use vela_common::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct HostFunctionDecl {
    pub name: String,
    pub params: Vec<String>,
    pub body: HostBlock,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HostConstDecl {
    pub name: String,
    pub value: Lowered,
    pub pos: Position,
}

/// A struct or tuple shape's lowering only needs to remember field order;
/// the runtime's data constructor is positional (§4.4, "Data declarations").
#[derive(Debug, Clone, PartialEq)]
pub struct HostDataDecl {
    pub name: String,
    pub fields: Vec<String>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HostEnumVariant {
    pub name: String,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HostEnumDecl {
    pub name: String,
    pub variants: Vec<HostEnumVariant>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostDeclaration {
    Const(HostConstDecl),
    Function(HostFunctionDecl),
    Data(HostDataDecl),
    Enum(HostEnumDecl),
}
