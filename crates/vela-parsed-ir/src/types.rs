//! Unchecked type expressions as the parser writes them down: dotted name
//! paths with optional type arguments, and function type shapes verbatim.
//! The [`vela_binder`](../vela_binder) qualifier resolves these against a
//! file's local scope to produce `vela_checked_ir::TypeExpression`.

use vela_common::phase::{ExpressionPhase, FunctionPhase};
use vela_common::Position;

/// A type expression exactly as written: either a dotted nominal path
/// (optionally parameterized) or a function type shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedType {
    /// `Foo`, `pkg::Foo`, `List<Int>`, `Map<String, Int>`.
    Named {
        path: Vec<String>,
        args: Vec<ParsedType>,
        pos: Position,
    },
    Function {
        phase: FunctionPhase,
        type_params: Vec<String>,
        params: Vec<ParsedParam>,
        result: Box<ParsedType>,
        pos: Position,
    },
}

impl ParsedType {
    #[must_use]
    pub fn pos(&self) -> &Position {
        match self {
            Self::Named { pos, .. } | Self::Function { pos, .. } => pos,
        }
    }
}

/// A function type's formal parameter: an optional declared phase and the
/// parameter's type.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedParam {
    pub phase: Option<ExpressionPhase>,
    pub ty: ParsedType,
}
