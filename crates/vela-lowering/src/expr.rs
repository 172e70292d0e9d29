//! Expression lowering (§4.4). One function phase, three regimes:
//!
//! - `fun`: no reactive value can reach here (the checker forbids it), so
//!   lowering is a structural copy.
//! - `sig`: a `var`/`flow` identifier read inserts an explicit [`HostExpr::Get`];
//!   everything else is a structural copy of the `get`-threaded tree.
//! - `def`: every sub-expression whose checked phase is `flow` lowers to a
//!   host expression that *denotes a cell* (a bare cell name, or a nested
//!   `flow`/`def`/`projection` call); whenever such a cell-producing
//!   sub-expression is consumed as an operand of a call, collection, boolean
//!   combinator or field access, it is pulled out by name into that
//!   expression's own `flow([...], (names) => ...)` wrapper. This keeps the
//!   rewrite entirely local and compositional: a reactive leaf several
//!   levels deep still only costs one wrapper at each level that actually
//!   consumes it.
//!
//! A parameter declared `var` is the one documented exception (§4.3.4): its
//! argument is never unwrapped at all, only re-addressed with `projection`
//! so the callee can still reach the root cell (`lower_var_argument`).

use vela_checked_ir::types::{FunctionType, TypeExpression};
use vela_checked_ir::{Expression as CheckedExpr, Typed};
use vela_common::phase::{ExpressionPhase, FunctionPhase};
use vela_common::{Position, Symbol};
use vela_target_ir::{HostBlock, HostExpr, HostStatement, Lowered};

use crate::context::LoweringContext;

pub fn lower_expression(ctx: &LoweringContext, phase: FunctionPhase, expr: &CheckedExpr) -> Lowered {
    match expr {
        CheckedExpr::Literal { value, meta } => Lowered::Expr(HostExpr::Literal(value.clone(), meta.pos.clone())),
        CheckedExpr::Identifier { symbol, meta } => lower_identifier(phase, symbol, meta, ctx),
        CheckedExpr::FieldAccess { base, field, meta } => lower_field_access(ctx, phase, base, field, meta),
        CheckedExpr::StaticAccess { target, meta } => {
            Lowered::Expr(HostExpr::Ident(host_name(target), meta.pos.clone()))
        }
        CheckedExpr::Construct { fields, meta } => lower_construct(ctx, phase, fields, meta),
        CheckedExpr::Call { callee, args, meta } => lower_call(ctx, phase, callee, args, meta),
        CheckedExpr::Is { left, right, meta } => lower_binary(ctx, phase, left, right, meta, |l, r, pos| HostExpr::Is {
            left: Box::new(l),
            right: Box::new(r),
            pos,
        }),
        CheckedExpr::Not { operand, meta } => {
            lower_unary(ctx, phase, operand, meta, |o, pos| HostExpr::Not { operand: Box::new(o), pos })
        }
        CheckedExpr::And { left, right, meta } => lower_binary(ctx, phase, left, right, meta, |l, r, pos| HostExpr::And {
            left: Box::new(l),
            right: Box::new(r),
            pos,
        }),
        CheckedExpr::Or { left, right, meta } => lower_binary(ctx, phase, left, right, meta, |l, r, pos| HostExpr::Or {
            left: Box::new(l),
            right: Box::new(r),
            pos,
        }),
        CheckedExpr::If { condition, then_branch, else_branch, meta } => {
            lower_if(ctx, phase, condition, then_branch, else_branch.as_deref(), meta)
        }
        CheckedExpr::Lambda { params, body, meta } => lower_lambda(ctx, params, body, meta),
        CheckedExpr::Block(block) => crate::statements::lower_block(ctx, phase, block),
        CheckedExpr::ListLiteral { elements, meta } => {
            lower_collection(ctx, phase, elements, meta, HostExpr::ListLiteral)
        }
        CheckedExpr::SetLiteral { elements, meta } => {
            lower_collection(ctx, phase, elements, meta, HostExpr::SetLiteral)
        }
        CheckedExpr::MapLiteral { entries, meta } => lower_map(ctx, phase, entries, meta),
    }
}

pub(crate) fn host_name(symbol: &Symbol) -> String {
    symbol.name().to_string()
}

fn lower_identifier(phase: FunctionPhase, symbol: &Symbol, meta: &Typed, ctx: &LoweringContext) -> Lowered {
    let name = host_name(symbol);
    if phase == FunctionPhase::Sig && meta.phase == ExpressionPhase::Flow {
        ctx.record_runtime_use("get");
        Lowered::Expr(HostExpr::Get {
            cell: Box::new(HostExpr::Ident(name, meta.pos.clone())),
            pos: meta.pos.clone(),
        })
    } else {
        Lowered::Expr(HostExpr::Ident(name, meta.pos.clone()))
    }
}

/// Lowers one operand of a multi-operand node. In a `def` frame, an operand
/// whose checked phase is `flow` is pulled out by a fresh name into
/// `reactive_inputs` rather than spliced inline — the caller is responsible
/// for wrapping its own result in `flow`/`def` once all operands are
/// collected. In every other frame this is just a recursive lower.
fn lower_operand(
    ctx: &LoweringContext,
    phase: FunctionPhase,
    operand: &CheckedExpr,
    pre: &mut Vec<HostStatement>,
    reactive_inputs: &mut Vec<(HostExpr, String)>,
) -> HostExpr {
    if phase == FunctionPhase::Def && operand.phase() == ExpressionPhase::Flow {
        let cell = lower_expression(ctx, phase, operand).splice_into(pre);
        let temp = ctx.fresh_temp();
        reactive_inputs.push((cell, temp.clone()));
        HostExpr::Ident(temp, operand.pos().clone())
    } else {
        lower_expression(ctx, phase, operand).splice_into(pre)
    }
}

/// Wraps `inner` in `flow([...], (names) => inner)` when operand extraction
/// collected any reactive inputs; otherwise returns `inner` as-is, hoisting
/// `pre` into an enclosing block either way.
fn finish_combinator(
    ctx: &LoweringContext,
    phase: FunctionPhase,
    pre: Vec<HostStatement>,
    reactive_inputs: Vec<(HostExpr, String)>,
    inner: HostExpr,
    pos: &Position,
) -> Lowered {
    if phase == FunctionPhase::Def && !reactive_inputs.is_empty() {
        ctx.record_runtime_use("flow");
        let wrapped = HostExpr::Flow {
            inputs: reactive_inputs.iter().map(|(cell, _)| cell.clone()).collect(),
            params: reactive_inputs.into_iter().map(|(_, name)| name).collect(),
            body: Box::new(HostBlock::just(inner)),
            pos: pos.clone(),
        };
        return finish_plain(pre, wrapped);
    }
    finish_plain(pre, inner)
}

fn finish_plain(pre: Vec<HostStatement>, result: HostExpr) -> Lowered {
    if pre.is_empty() {
        Lowered::Expr(result)
    } else {
        Lowered::Block(HostBlock { statements: pre, result: Box::new(result) })
    }
}

fn lower_binary(
    ctx: &LoweringContext,
    phase: FunctionPhase,
    left: &CheckedExpr,
    right: &CheckedExpr,
    meta: &Typed,
    ctor: impl FnOnce(HostExpr, HostExpr, Position) -> HostExpr,
) -> Lowered {
    let mut pre = Vec::new();
    let mut reactive_inputs = Vec::new();
    let l = lower_operand(ctx, phase, left, &mut pre, &mut reactive_inputs);
    let r = lower_operand(ctx, phase, right, &mut pre, &mut reactive_inputs);
    let inner = ctor(l, r, meta.pos.clone());
    finish_combinator(ctx, phase, pre, reactive_inputs, inner, &meta.pos)
}

fn lower_unary(
    ctx: &LoweringContext,
    phase: FunctionPhase,
    operand: &CheckedExpr,
    meta: &Typed,
    ctor: impl FnOnce(HostExpr, Position) -> HostExpr,
) -> Lowered {
    let mut pre = Vec::new();
    let mut reactive_inputs = Vec::new();
    let o = lower_operand(ctx, phase, operand, &mut pre, &mut reactive_inputs);
    let inner = ctor(o, meta.pos.clone());
    finish_combinator(ctx, phase, pre, reactive_inputs, inner, &meta.pos)
}

fn lower_field_access(
    ctx: &LoweringContext,
    phase: FunctionPhase,
    base: &CheckedExpr,
    field: &str,
    meta: &Typed,
) -> Lowered {
    let mut pre = Vec::new();
    let mut reactive_inputs = Vec::new();
    let base_host = lower_operand(ctx, phase, base, &mut pre, &mut reactive_inputs);
    let inner = HostExpr::FieldAccess { base: Box::new(base_host), field: field.to_string(), pos: meta.pos.clone() };
    finish_combinator(ctx, phase, pre, reactive_inputs, inner, &meta.pos)
}

fn lower_construct(
    ctx: &LoweringContext,
    phase: FunctionPhase,
    fields: &[(String, CheckedExpr)],
    meta: &Typed,
) -> Lowered {
    let type_name = meta.ty.name().map(|symbol| host_name(symbol)).unwrap_or_default();
    let mut pre = Vec::new();
    let mut reactive_inputs = Vec::new();
    let hosts = fields
        .iter()
        .map(|(name, value)| (name.clone(), lower_operand(ctx, phase, value, &mut pre, &mut reactive_inputs)))
        .collect();
    let inner = HostExpr::Construct { type_name, fields: hosts, pos: meta.pos.clone() };
    finish_combinator(ctx, phase, pre, reactive_inputs, inner, &meta.pos)
}

fn lower_collection(
    ctx: &LoweringContext,
    phase: FunctionPhase,
    elements: &[CheckedExpr],
    meta: &Typed,
    ctor: fn(Vec<HostExpr>, Position) -> HostExpr,
) -> Lowered {
    let mut pre = Vec::new();
    let mut reactive_inputs = Vec::new();
    let hosts = elements
        .iter()
        .map(|element| lower_operand(ctx, phase, element, &mut pre, &mut reactive_inputs))
        .collect();
    let inner = ctor(hosts, meta.pos.clone());
    finish_combinator(ctx, phase, pre, reactive_inputs, inner, &meta.pos)
}

/// Map entries pair a key and a value (§4.4: "maps pair keys and values");
/// each half is extracted independently, the same as any other operand —
/// the *grouping* of a key/value pair into one dependency unit is left to
/// the host emitter, which is out of scope here (§1).
fn lower_map(ctx: &LoweringContext, phase: FunctionPhase, entries: &[(CheckedExpr, CheckedExpr)], meta: &Typed) -> Lowered {
    let mut pre = Vec::new();
    let mut reactive_inputs = Vec::new();
    let hosts = entries
        .iter()
        .map(|(key, value)| {
            let k = lower_operand(ctx, phase, key, &mut pre, &mut reactive_inputs);
            let v = lower_operand(ctx, phase, value, &mut pre, &mut reactive_inputs);
            (k, v)
        })
        .collect();
    let inner = HostExpr::MapLiteral(hosts, meta.pos.clone());
    finish_combinator(ctx, phase, pre, reactive_inputs, inner, &meta.pos)
}

fn lower_if(
    ctx: &LoweringContext,
    phase: FunctionPhase,
    condition: &CheckedExpr,
    then_branch: &CheckedExpr,
    else_branch: Option<&CheckedExpr>,
    meta: &Typed,
) -> Lowered {
    let mut pre = Vec::new();
    if phase == FunctionPhase::Def && condition.phase() == ExpressionPhase::Flow {
        let cond_cell = lower_expression(ctx, phase, condition).splice_into(&mut pre);
        let temp = ctx.fresh_temp();
        let then_host = lower_expression(ctx, phase, then_branch).into_block();
        let else_host = else_branch.map(|e| Box::new(lower_expression(ctx, phase, e).into_block()));
        let if_expr = HostExpr::If {
            condition: Box::new(HostExpr::Ident(temp.clone(), condition.pos().clone())),
            then_branch: Box::new(then_host),
            else_branch: else_host,
            pos: meta.pos.clone(),
        };
        ctx.record_runtime_use("flow");
        let wrapped = HostExpr::Flow {
            inputs: vec![cond_cell],
            params: vec![temp],
            body: Box::new(HostBlock::just(if_expr)),
            pos: meta.pos.clone(),
        };
        return finish_plain(pre, wrapped);
    }

    let cond_host = lower_expression(ctx, phase, condition).splice_into(&mut pre);
    let then_host = lower_expression(ctx, phase, then_branch).into_block();
    let else_host = else_branch.map(|e| Box::new(lower_expression(ctx, phase, e).into_block()));
    let if_expr = HostExpr::If {
        condition: Box::new(cond_host),
        then_branch: Box::new(then_host),
        else_branch: else_host,
        pos: meta.pos.clone(),
    };
    finish_plain(pre, if_expr)
}

/// A lambda's own body is always a `fun` frame (the checker fixes its
/// function phase to `Fun`, §4.3.2 "Lambda") regardless of the phase it
/// lowers within — it is a structural copy one level down.
fn lower_lambda(
    ctx: &LoweringContext,
    params: &[vela_checked_ir::CheckedLambdaParam],
    body: &CheckedExpr,
    meta: &Typed,
) -> Lowered {
    let host_params = params.iter().map(|p| p.name.clone()).collect();
    let body_block = lower_expression(ctx, FunctionPhase::Fun, body).into_block();
    Lowered::Expr(HostExpr::Lambda { params: host_params, body: Box::new(body_block), pos: meta.pos.clone() })
}

/// Recovers the callee's declared shape well enough to answer "what's this
/// parameter's phase and what's this callee's function phase" — the checked
/// `Call` node only keeps the call's own result type, not which overload
/// branch resolved (§3.4 invariant 5 has no such record). For a bare
/// `Function` type this is exact; for an `OverloadFunction`, this picks the
/// first branch whose arity matches, mirroring the checker's own
/// first-match resolution (`crate::overloads::resolve_overload`) closely
/// enough for lowering's purposes, which only needs phases, not full
/// overload resolution.
pub(crate) fn resolve_callee_shape(ty: &TypeExpression, arg_count: usize) -> Option<&FunctionType> {
    match ty {
        TypeExpression::Function(ft) => Some(ft),
        TypeExpression::OverloadFunction(overload) => {
            overload.branches.iter().find(|branch| branch.params.len() == arg_count)
        }
        _ => None,
    }
}

fn lower_var_argument(ctx: &LoweringContext, expr: &CheckedExpr) -> HostExpr {
    match expr {
        CheckedExpr::Identifier { symbol, meta } => HostExpr::Ident(host_name(symbol), meta.pos.clone()),
        CheckedExpr::FieldAccess { base, field, meta } => {
            let base_host = lower_var_argument(ctx, base);
            ctx.record_runtime_use("projection");
            HostExpr::Projection { base: Box::new(base_host), field: field.clone(), pos: meta.pos.clone() }
        }
        other => {
            // The checker guarantees a `var` argument is always an identifier
            // or a field-access chain rooted at one (`check_var_argument`);
            // fall back to an ordinary lower rather than panic if that ever
            // changes underneath us.
            let mut discard = Vec::new();
            lower_expression(ctx, FunctionPhase::Def, other).splice_into(&mut discard)
        }
    }
}

fn lower_call(ctx: &LoweringContext, phase: FunctionPhase, callee: &CheckedExpr, args: &[CheckedExpr], meta: &Typed) -> Lowered {
    let mut pre = Vec::new();
    let mut reactive_inputs = Vec::new();
    let callee_host = lower_expression(ctx, phase, callee).splice_into(&mut pre);
    let shape = resolve_callee_shape(callee.ty(), args.len());
    let callee_phase = shape.map(|ft| ft.phase);

    let host_args: Vec<HostExpr> = args
        .iter()
        .enumerate()
        .map(|(i, arg)| {
            let param_phase = shape.and_then(|ft| ft.params.get(i)).and_then(|p| p.phase);
            if param_phase == Some(ExpressionPhase::Var) {
                return lower_var_argument(ctx, arg);
            }
            let lowered = lower_operand(ctx, phase, arg, &mut pre, &mut reactive_inputs);
            if param_phase == Some(ExpressionPhase::Flow) && arg.phase() != ExpressionPhase::Flow {
                // A non-reactive argument passed where the parameter is
                // declared `flow` (§4.4 "Inside a def", bullet 1): the
                // callee expects a cell it can `get` from, so the plain
                // value is wrapped in `singleton` rather than spliced in bare.
                ctx.record_runtime_use("singleton");
                HostExpr::Singleton { value: Box::new(lowered), pos: meta.pos.clone() }
            } else {
                lowered
            }
        })
        .collect();

    let inner = HostExpr::Call { callee: Box::new(callee_host), args: host_args, pos: meta.pos.clone() };

    if phase == FunctionPhase::Def && callee_phase == Some(FunctionPhase::Def) {
        ctx.record_runtime_use("def");
        let wrapped = HostExpr::Def {
            inputs: reactive_inputs.iter().map(|(cell, _)| cell.clone()).collect(),
            params: reactive_inputs.into_iter().map(|(_, name)| name).collect(),
            body: Box::new(HostBlock::just(inner)),
            pos: meta.pos.clone(),
        };
        return finish_plain(pre, wrapped);
    }

    finish_combinator(ctx, phase, pre, reactive_inputs, inner, &meta.pos)
}
