//! Statement and block lowering (§4.4). The checker already enforces which
//! statement kinds a given function phase may contain (`vela_checker::phase_rules`);
//! lowering only has to translate the ones that survive checking.

use vela_checked_ir::{AssignTarget, Block as CheckedBlock, Expression as CheckedExpr, Statement as CheckedStatement};
use vela_common::phase::{ExpressionPhase, FunctionPhase};
use vela_common::Position;
use vela_target_ir::{HostBlock, HostExpr, HostStatement, Lowered};

use crate::context::LoweringContext;
use crate::expr::{host_name, lower_expression};

/// A block's trailing expression statement becomes its `result`; anything
/// else it ends in (a `let`, a `return`, nothing) falls back to the unit
/// value, matching `vela_checker::statements::check_block`'s own tail rule.
pub fn lower_block(ctx: &LoweringContext, phase: FunctionPhase, block: &CheckedBlock) -> Lowered {
    let mut out = Vec::new();
    let len = block.statements.len();
    let mut tail = None;

    for (index, statement) in block.statements.iter().enumerate() {
        let is_last = index + 1 == len;
        if is_last {
            if let CheckedStatement::Expr(expr) = statement {
                tail = Some(lower_expression(ctx, phase, expr).splice_into(&mut out));
                continue;
            }
        }
        lower_statement(ctx, phase, statement, &mut out);
    }

    let result = tail.unwrap_or_else(|| unit_value(block.meta.pos.clone()));
    Lowered::Block(HostBlock { statements: out, result: Box::new(result) })
}

fn unit_value(pos: Position) -> HostExpr {
    HostExpr::Construct { type_name: "Unit".to_string(), fields: Vec::new(), pos }
}

fn lower_statement(ctx: &LoweringContext, phase: FunctionPhase, statement: &CheckedStatement, out: &mut Vec<HostStatement>) {
    match statement {
        CheckedStatement::Let { name, phase: bind_phase, ty: _, value, pos } => {
            let initial = lower_expression(ctx, phase, value).splice_into(out);
            let bound = if *bind_phase == ExpressionPhase::Var {
                ctx.record_runtime_use("variable");
                HostExpr::Variable { initial: Box::new(initial), pos: pos.clone() }
            } else {
                initial
            };
            out.push(HostStatement::Let { name: host_name(name), value: bound, pos: pos.clone() });
        }
        CheckedStatement::Reassign { target, value, pos } => {
            let value_host = lower_expression(ctx, phase, value).splice_into(out);
            let target_host = lower_assign_target(ctx, target);
            ctx.record_runtime_use("set");
            out.push(HostStatement::Set { target: target_host, value: value_host, pos: pos.clone() });
        }
        CheckedStatement::Expr(expr) => {
            let value = lower_expression(ctx, phase, expr).splice_into(out);
            out.push(HostStatement::Expr(value));
        }
        CheckedStatement::NestedFunction(decl) => {
            out.push(crate::decl::lower_nested_function(ctx, decl));
        }
        CheckedStatement::Return { value, pos } => {
            let value_host = value.as_ref().map(|expr| lower_return_value(ctx, phase, expr, out, pos));
            out.push(HostStatement::Return(value_host, pos.clone()));
        }
    }
}

/// A `def` body's result always behaves as `flow` at the call site
/// (§3.3); a plain `const`/`val` return value is wrapped in `singleton` so
/// it presents the same `get`-able interface a derived value would.
fn lower_return_value(
    ctx: &LoweringContext,
    phase: FunctionPhase,
    expr: &CheckedExpr,
    out: &mut Vec<HostStatement>,
    pos: &Position,
) -> HostExpr {
    let lowered = lower_expression(ctx, phase, expr).splice_into(out);
    if phase == FunctionPhase::Def && expr.phase() != ExpressionPhase::Flow {
        ctx.record_runtime_use("singleton");
        HostExpr::Singleton { value: Box::new(lowered), pos: pos.clone() }
    } else {
        lowered
    }
}

/// Folds a field-projection reassignment target into nested `projection`
/// calls over the root cell (§4.4; the root itself needs no wrapping, it is
/// already addressable by name).
fn lower_assign_target(ctx: &LoweringContext, target: &AssignTarget) -> HostExpr {
    let mut base = HostExpr::Ident(host_name(&target.root), target.pos.clone());
    for field in &target.projection {
        ctx.record_runtime_use("projection");
        base = HostExpr::Projection { base: Box::new(base), field: field.clone(), pos: target.pos.clone() };
    }
    base
}
