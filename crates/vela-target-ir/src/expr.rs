//! Host-level expressions (§4.4). By the time an expression reaches T-IR,
//! reactivity is no longer implicit in a phase annotation: every cell read is
//! a `Get`, every cell write is a statement-level `Set`, and every `var`/
//! `flow`/`def` binding has become an explicit runtime constructor call.

use vela_common::Position;
use vela_parsed_ir::Literal;

#[derive(Debug, Clone, PartialEq)]
pub struct HostBlock {
    pub statements: Vec<HostStatement>,
    pub result: Box<HostExpr>,
}

impl HostBlock {
    #[must_use]
    pub fn just(result: HostExpr) -> Self {
        Self {
            statements: Vec::new(),
            result: Box::new(result),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostStatement {
    /// A host-level `let`, introduced for every C-IR `const`/`val` binding
    /// and for every reactive cell's own backing name.
    Let {
        name: String,
        value: HostExpr,
        pos: Position,
    },
    /// The runtime's `set(cell, value)` call, used for a `var` reassignment.
    Set {
        target: HostExpr,
        value: HostExpr,
        pos: Position,
    },
    Expr(HostExpr),
    Return(Option<HostExpr>, Position),
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostExpr {
    Literal(Literal, Position),
    Ident(String, Position),
    FieldAccess {
        base: Box<HostExpr>,
        field: String,
        pos: Position,
    },
    Construct {
        type_name: String,
        fields: Vec<(String, HostExpr)>,
        pos: Position,
    },
    Call {
        callee: Box<HostExpr>,
        args: Vec<HostExpr>,
        pos: Position,
    },
    Is {
        left: Box<HostExpr>,
        right: Box<HostExpr>,
        pos: Position,
    },
    Not {
        operand: Box<HostExpr>,
        pos: Position,
    },
    And {
        left: Box<HostExpr>,
        right: Box<HostExpr>,
        pos: Position,
    },
    Or {
        left: Box<HostExpr>,
        right: Box<HostExpr>,
        pos: Position,
    },
    If {
        condition: Box<HostExpr>,
        then_branch: Box<HostBlock>,
        else_branch: Option<Box<HostBlock>>,
        pos: Position,
    },
    Lambda {
        params: Vec<String>,
        body: Box<HostBlock>,
        pos: Position,
    },
    ListLiteral(Vec<HostExpr>, Position),
    SetLiteral(Vec<HostExpr>, Position),
    MapLiteral(Vec<(HostExpr, HostExpr)>, Position),

    /// `cell.get()` — reading a reactive cell's current value.
    Get { cell: Box<HostExpr>, pos: Position },
    /// `singleton(value)` — wraps a `const`/`val` initializer that a `flow`
    /// or `def` elsewhere in the file depends on, so it can be read through
    /// the same `Get` interface as a `var`.
    Singleton { value: Box<HostExpr>, pos: Position },
    /// `flow([inputs], (params) => body)` — a derived, push-updated cell.
    Flow {
        inputs: Vec<HostExpr>,
        params: Vec<String>,
        body: Box<HostBlock>,
        pos: Position,
    },
    /// `def([inputs], (params) => body)` — a derived, pull/async cell.
    Def {
        inputs: Vec<HostExpr>,
        params: Vec<String>,
        body: Box<HostBlock>,
        pos: Position,
    },
    /// `projection(base, "field")` — a derived `var` addressing one field of
    /// a containing reactive cell.
    Projection {
        base: Box<HostExpr>,
        field: String,
        pos: Position,
    },
    /// `variable(initial)` — allocates a fresh, independently settable
    /// reactive cell; the lowering of every `var` binding's initializer.
    Variable { initial: Box<HostExpr>, pos: Position },
}

impl HostExpr {
    #[must_use]
    pub fn pos(&self) -> &Position {
        match self {
            Self::Literal(_, pos)
            | Self::Ident(_, pos)
            | Self::FieldAccess { pos, .. }
            | Self::Construct { pos, .. }
            | Self::Call { pos, .. }
            | Self::Is { pos, .. }
            | Self::Not { pos, .. }
            | Self::And { pos, .. }
            | Self::Or { pos, .. }
            | Self::If { pos, .. }
            | Self::Lambda { pos, .. }
            | Self::ListLiteral(_, pos)
            | Self::SetLiteral(_, pos)
            | Self::MapLiteral(_, pos)
            | Self::Get { pos, .. }
            | Self::Singleton { pos, .. }
            | Self::Flow { pos, .. }
            | Self::Def { pos, .. }
            | Self::Projection { pos, .. }
            | Self::Variable { pos, .. } => pos,
        }
    }
}

/// The result of lowering a single C-IR expression: either it lowers
/// directly to a host expression, or it requires hoisted statements (a
/// nested `let`, a `set` call) ahead of its result.
#[derive(Debug, Clone, PartialEq)]
pub enum Lowered {
    Expr(HostExpr),
    Block(HostBlock),
}

impl Lowered {
    /// Flattens into a `HostBlock`, so callers that must hoist statements
    /// into an enclosing block don't need to match on the variant.
    #[must_use]
    pub fn into_block(self) -> HostBlock {
        match self {
            Self::Expr(expr) => HostBlock::just(expr),
            Self::Block(block) => block,
        }
    }

    /// Appends this value's statements (if any) onto `out` and returns the
    /// expression that stands in for it at the use site. This is the
    /// workhorse of lowering: every nested sub-expression goes through it.
    #[must_use]
    pub fn splice_into(self, out: &mut Vec<HostStatement>) -> HostExpr {
        match self {
            Self::Expr(expr) => expr,
            Self::Block(block) => {
                out.extend(block.statements);
                *block.result
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splice_into_flattens_a_block() {
        let pos = Position::synthetic();
        let lowered = Lowered::Block(HostBlock {
            statements: vec![HostStatement::Let {
                name: "tmp0".to_string(),
                value: HostExpr::Literal(Literal::Int(1), pos.clone()),
                pos: pos.clone(),
            }],
            result: Box::new(HostExpr::Ident("tmp0".to_string(), pos.clone())),
        });
        let mut out = Vec::new();
        let result = lowered.splice_into(&mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(result, HostExpr::Ident("tmp0".to_string(), pos));
    }

    #[test]
    fn splice_into_passes_through_a_bare_expr() {
        let pos = Position::synthetic();
        let lowered = Lowered::Expr(HostExpr::Literal(Literal::Bool(true), pos));
        let mut out = Vec::new();
        let result = lowered.splice_into(&mut out);
        assert!(out.is_empty());
        assert!(matches!(result, HostExpr::Literal(Literal::Bool(true), _)));
    }
}
