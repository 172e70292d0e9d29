//! Checked expressions, statements and blocks (§3.4). Every expression node
//! carries `pos`, a resolved `TypeExpression`, and an `ExpressionPhase`
//! (invariant 1 and 2 of §3.4: the phase is always one of `const`, `val`,
//! `flow` — never `var`, since only bindings are `var`).

use crate::types::TypeExpression;
use vela_common::phase::ExpressionPhase;
use vela_common::{Position, Symbol};

pub use vela_parsed_ir::Literal;

#[derive(Debug, Clone, PartialEq)]
pub struct Typed {
    pub ty: TypeExpression,
    pub phase: ExpressionPhase,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckedLambdaParam {
    pub name: String,
    pub ty: TypeExpression,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal {
        value: Literal,
        meta: Typed,
    },
    Identifier {
        symbol: Symbol,
        meta: Typed,
    },
    FieldAccess {
        base: Box<Expression>,
        field: String,
        meta: Typed,
    },
    /// Always `const` phase (§4.3.2).
    StaticAccess {
        target: Symbol,
        meta: Typed,
    },
    Construct {
        fields: Vec<(String, Expression)>,
        meta: Typed,
    },
    Call {
        callee: Box<Expression>,
        args: Vec<Expression>,
        meta: Typed,
    },
    Is {
        left: Box<Expression>,
        right: Box<Expression>,
        meta: Typed,
    },
    Not {
        operand: Box<Expression>,
        meta: Typed,
    },
    And {
        left: Box<Expression>,
        right: Box<Expression>,
        meta: Typed,
    },
    Or {
        left: Box<Expression>,
        right: Box<Expression>,
        meta: Typed,
    },
    If {
        condition: Box<Expression>,
        then_branch: Box<Expression>,
        else_branch: Option<Box<Expression>>,
        meta: Typed,
    },
    Lambda {
        params: Vec<CheckedLambdaParam>,
        body: Box<Expression>,
        meta: Typed,
    },
    Block(Block),
    ListLiteral {
        elements: Vec<Expression>,
        meta: Typed,
    },
    SetLiteral {
        elements: Vec<Expression>,
        meta: Typed,
    },
    MapLiteral {
        entries: Vec<(Expression, Expression)>,
        meta: Typed,
    },
}

impl Expression {
    #[must_use]
    pub fn meta(&self) -> &Typed {
        match self {
            Self::Literal { meta, .. }
            | Self::Identifier { meta, .. }
            | Self::FieldAccess { meta, .. }
            | Self::StaticAccess { meta, .. }
            | Self::Construct { meta, .. }
            | Self::Call { meta, .. }
            | Self::Is { meta, .. }
            | Self::Not { meta, .. }
            | Self::And { meta, .. }
            | Self::Or { meta, .. }
            | Self::If { meta, .. }
            | Self::Lambda { meta, .. }
            | Self::ListLiteral { meta, .. }
            | Self::SetLiteral { meta, .. }
            | Self::MapLiteral { meta, .. } => meta,
            Self::Block(block) => &block.meta,
        }
    }

    #[must_use]
    pub fn ty(&self) -> &TypeExpression {
        &self.meta().ty
    }

    #[must_use]
    pub fn phase(&self) -> ExpressionPhase {
        self.meta().phase
    }

    #[must_use]
    pub fn pos(&self) -> &Position {
        &self.meta().pos
    }
}

/// A field-projection reassignment target: `root` must resolve to a `var`
/// binding (checked separately); `projection` is the dotted path of fields
/// beneath it, which lowering turns into a `projection` runtime call.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignTarget {
    pub root: Symbol,
    pub root_type: TypeExpression,
    pub projection: Vec<String>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let {
        name: Symbol,
        phase: ExpressionPhase,
        ty: TypeExpression,
        value: Expression,
        pos: Position,
    },
    Reassign {
        target: AssignTarget,
        value: Expression,
        pos: Position,
    },
    Expr(Expression),
    NestedFunction(Box<crate::decl::FunctionDecl>),
    Return {
        value: Option<Expression>,
        pos: Position,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub meta: Typed,
}
