//! Bidirectional expression checking (§4.3.2): every entry point takes an
//! optional *expected* type, used to drive lambda parameter inference,
//! generic unification, and literal-collection element types.

use std::sync::Arc;
use std::rc::Rc;

use vela_binder::TypeParamScope;
use vela_checked_ir::{
    AssignTarget as CheckedAssignTarget, CheckedLambdaParam, Expression as CheckedExpr,
    FunctionParamType, FunctionType, Literal, Typed, TypeExpression, VariantShape,
};
use vela_common::phase::{adjust_operand_phase, call_result_phase, ExpressionPhase, FunctionPhase};
use vela_common::{Checked, Position, Symbol};
use vela_parsed_ir::{Expression as ParsedExpr, LambdaParam};

use crate::assignability::is_assignable;
use crate::context::Checker;
use crate::generics::{Constraints, ExpectedGenerics};
use crate::merge::merge_types;
use crate::overloads::resolve_overload;
use crate::scope::{Binding, FunctionScope, Scope};

/// Entry point: elaborates `parsed` against the optional `expected` type.
pub fn check_expression(
    checker: &Checker<'_>,
    scope: &Rc<Scope>,
    expected: Option<&TypeExpression>,
    parsed: &ParsedExpr,
) -> Checked<CheckedExpr> {
    match parsed {
        ParsedExpr::Literal { value, pos } => check_literal(checker, value, pos),
        ParsedExpr::Identifier { name, pos } => check_identifier(checker, scope, name, pos),
        ParsedExpr::FieldAccess { base, field, pos } => {
            check_field_access(checker, scope, base, field, pos)
        }
        ParsedExpr::StaticAccess { segments, pos } => check_static_access(checker, segments, pos),
        ParsedExpr::Construct {
            type_path,
            fields,
            pos,
            ..
        } => check_construct(checker, scope, type_path, fields, pos),
        ParsedExpr::Call { callee, args, pos } => check_call(checker, scope, callee, args, pos),
        ParsedExpr::Is { left, right, pos } => {
            check_boolean_binary(checker, scope, left, right, pos, |l, r, ty, phase, pos| {
                CheckedExpr::Is {
                    left: Box::new(l),
                    right: Box::new(r),
                    meta: Typed { ty, phase, pos },
                }
            })
        }
        ParsedExpr::And { left, right, pos } => {
            check_boolean_binary(checker, scope, left, right, pos, |l, r, ty, phase, pos| {
                CheckedExpr::And {
                    left: Box::new(l),
                    right: Box::new(r),
                    meta: Typed { ty, phase, pos },
                }
            })
        }
        ParsedExpr::Or { left, right, pos } => {
            check_boolean_binary(checker, scope, left, right, pos, |l, r, ty, phase, pos| {
                CheckedExpr::Or {
                    left: Box::new(l),
                    right: Box::new(r),
                    meta: Typed { ty, phase, pos },
                }
            })
        }
        ParsedExpr::Not { operand, pos } => check_not(checker, scope, operand, pos),
        ParsedExpr::If {
            condition,
            then_branch,
            else_branch,
            pos,
        } => check_if(checker, scope, expected, condition, then_branch, else_branch.as_deref(), pos),
        ParsedExpr::Lambda { params, body, pos } => {
            check_lambda(checker, scope, expected, params, body, pos)
        }
        ParsedExpr::Block(block) => crate::statements::check_block(checker, scope, expected, block),
        ParsedExpr::ListLiteral { elements, pos } => {
            check_collection(checker, scope, expected, elements, pos, CollectionKind::List)
        }
        ParsedExpr::SetLiteral { elements, pos } => {
            check_collection(checker, scope, expected, elements, pos, CollectionKind::Set)
        }
        ParsedExpr::MapLiteral { entries, pos } => check_map(checker, scope, expected, entries, pos),
    }
}

fn check_literal(checker: &Checker<'_>, value: &Literal, pos: &Position) -> Checked<CheckedExpr> {
    let ty = match value {
        Literal::Int(_) => checker.core.int_type(),
        Literal::Float(_) => checker.core.float_type(),
        Literal::Bool(_) => checker.core.boolean_type(),
        Literal::String(_) => checker.core.string_type(),
    };
    Ok(CheckedExpr::Literal {
        value: value.clone(),
        meta: Typed {
            ty,
            phase: ExpressionPhase::Const,
            pos: pos.clone(),
        },
    })
}

/// An ordinary identifier read never surfaces phase `Var` on the
/// expression node (§3.4 invariant 2): reading a `var` binding outside the
/// one narrow context that wants the raw cell (a `var`-phase call
/// parameter, handled separately by [`check_var_argument`]) widens it to
/// `Flow`, matching the `(unspecified, Var) => Flow` row of the operand
/// table (§4.3.4).
fn check_identifier(
    checker: &Checker<'_>,
    scope: &Rc<Scope>,
    name: &str,
    pos: &Position,
) -> Checked<CheckedExpr> {
    if let Some(binding) = scope.lookup(name) {
        let phase = if binding.phase == ExpressionPhase::Var {
            ExpressionPhase::Flow
        } else {
            binding.phase
        };
        return Ok(CheckedExpr::Identifier {
            symbol: binding.symbol,
            meta: Typed {
                ty: binding.ty,
                phase,
                pos: pos.clone(),
            },
        });
    }
    let symbol = vela_binder::resolve_short_name(checker.locals, name, pos)?;
    let ty = checker
        .declared_type(&symbol)
        .cloned()
        .ok_or_else(|| pos.fail(format!("unknown name `{name}`")))?;
    Ok(CheckedExpr::Identifier {
        symbol,
        meta: Typed {
            ty,
            phase: ExpressionPhase::Const,
            pos: pos.clone(),
        },
    })
}

fn field_type(base_ty: &TypeExpression, field: &str, pos: &Position) -> Checked<TypeExpression> {
    match base_ty {
        TypeExpression::Struct(s) => s
            .fields
            .get(&field.to_string())
            .cloned()
            .ok_or_else(|| pos.fail(format!("no field `{field}` on `{}`", s.name))),
        TypeExpression::Tuple(t) => {
            let index = field
                .strip_prefix('v')
                .and_then(|rest| rest.parse::<usize>().ok())
                .ok_or_else(|| {
                    pos.fail(format!(
                        "`{field}` is not a tuple field (expected v0..v{})",
                        t.fields.len().saturating_sub(1)
                    ))
                })?;
            t.fields
                .get(index)
                .cloned()
                .ok_or_else(|| pos.fail(format!("tuple `{}` has no field `{field}`", t.name)))
        }
        _ => Err(pos.fail(format!("`{field}` is not a field of this type"))),
    }
}

fn check_field_access(
    checker: &Checker<'_>,
    scope: &Rc<Scope>,
    base: &ParsedExpr,
    field: &str,
    pos: &Position,
) -> Checked<CheckedExpr> {
    let checked_base = check_expression(checker, scope, None, base)?;
    let ty = field_type(checked_base.ty(), field, pos)?;
    let phase = checked_base.phase();
    Ok(CheckedExpr::FieldAccess {
        base: Box::new(checked_base),
        field: field.to_string(),
        meta: Typed { ty, phase, pos: pos.clone() },
    })
}

fn check_static_access(
    checker: &Checker<'_>,
    segments: &[String],
    pos: &Position,
) -> Checked<CheckedExpr> {
    let mut iter = segments.iter();
    let head = iter.next().ok_or_else(|| pos.fail("empty static access path"))?;
    let mut symbol = vela_binder::resolve_short_name(checker.locals, head, pos)?;
    let mut ty = checker
        .declared_type(&symbol)
        .cloned()
        .ok_or_else(|| pos.fail(format!("unknown name `{head}`")))?;
    for segment in iter {
        symbol = symbol.child(segment.as_str());
        ty = match &ty {
            TypeExpression::Module(_) => checker
                .declared_type(&symbol)
                .cloned()
                .ok_or_else(|| pos.fail(format!("unknown member `{segment}`")))?,
            TypeExpression::Enum(e) => {
                let variant = e
                    .variants
                    .get(segment)
                    .ok_or_else(|| pos.fail(format!("`{}` has no variant `{segment}`", e.name)))?;
                match variant {
                    VariantShape::Struct(s) => TypeExpression::Struct(s.clone()),
                    VariantShape::Tuple(t) => TypeExpression::Tuple(t.clone()),
                    VariantShape::Atom(a) => TypeExpression::Atom(a.clone()),
                }
            }
            _ => return Err(pos.fail(format!("`{segment}` cannot be accessed on this path"))),
        };
    }
    Ok(CheckedExpr::StaticAccess {
        target: symbol,
        meta: Typed {
            ty,
            phase: ExpressionPhase::Const,
            pos: pos.clone(),
        },
    })
}

fn resolve_type_path(checker: &Checker<'_>, path: &[String], pos: &Position) -> Checked<Symbol> {
    let mut iter = path.iter();
    let head = iter.next().ok_or_else(|| pos.fail("empty type path"))?;
    let mut symbol = vela_binder::resolve_short_name(checker.locals, head, pos)?;
    for segment in iter {
        symbol = symbol.child(segment.as_str());
    }
    Ok(symbol)
}

fn check_construct(
    checker: &Checker<'_>,
    scope: &Rc<Scope>,
    type_path: &[String],
    fields: &[(String, ParsedExpr)],
    pos: &Position,
) -> Checked<CheckedExpr> {
    let symbol = resolve_type_path(checker, type_path, pos)?;
    let declared = checker
        .declared_type(&symbol)
        .cloned()
        .ok_or_else(|| pos.fail(format!("unknown type `{}`", type_path.join("::"))))?;
    let struct_ty = match declared {
        TypeExpression::Struct(s) => s,
        _ => return Err(pos.fail(format!("`{}` is not a struct or struct-shaped variant", symbol))),
    };

    if fields.len() != struct_ty.fields.len()
        || !fields.iter().all(|(name, _)| struct_ty.fields.contains_key(name))
    {
        return Err(pos.fail(format!(
            "field mismatch constructing `{}`: expected exactly {}",
            struct_ty.name,
            struct_ty
                .fields
                .keys()
                .cloned()
                .collect::<Vec<String>>()
                .join(", ")
        )));
    }

    let generics: ExpectedGenerics = struct_ty.type_params.iter().map(|t| t.name.clone()).collect();
    let mut constraints = Constraints::new();
    let mut checked_fields = Vec::with_capacity(fields.len());
    let mut phases = Vec::with_capacity(fields.len());
    for (name, value) in fields {
        let declared_field_ty = struct_ty.fields.get(name).expect("checked above").clone();
        let checked_value = check_expression(checker, scope, Some(&declared_field_ty), value)?;
        constraints.record(&declared_field_ty, checked_value.ty(), &generics);
        phases.push(checked_value.phase());
        checked_fields.push((name.clone(), checked_value));
    }
    let substitution = constraints.reduce(pos, &generics)?;
    for (name, checked_value) in &checked_fields {
        let declared_field_ty = struct_ty.fields.get(name).expect("checked above").substitute(&substitution);
        if !is_assignable(checked_value.ty(), &declared_field_ty) {
            return Err(checked_value
                .pos()
                .fail(format!("field `{name}` is not assignable to its declared type")));
        }
    }

    let instance_ty = if struct_ty.type_params.is_empty() {
        TypeExpression::nominal(symbol)
    } else {
        let args = struct_ty
            .type_params
            .iter()
            .map(|tp| substitution.get(&tp.name).cloned().unwrap_or(TypeExpression::Nothing))
            .collect();
        TypeExpression::parameterized(symbol, args)
    };

    Ok(CheckedExpr::Construct {
        fields: checked_fields,
        meta: Typed {
            ty: instance_ty,
            phase: ExpressionPhase::join_all(phases),
            pos: pos.clone(),
        },
    })
}

fn check_call(
    checker: &Checker<'_>,
    scope: &Rc<Scope>,
    callee: &ParsedExpr,
    args: &[ParsedExpr],
    pos: &Position,
) -> Checked<CheckedExpr> {
    let checked_callee = check_expression(checker, scope, None, callee)?;
    match checked_callee.ty().clone() {
        TypeExpression::Function(fn_ty) => {
            let (checked_args, result_ty, phase) =
                check_function_call(checker, scope, &fn_ty, args, pos)?;
            Ok(CheckedExpr::Call {
                callee: Box::new(checked_callee),
                args: checked_args,
                meta: Typed { ty: result_ty, phase, pos: pos.clone() },
            })
        }
        TypeExpression::OverloadFunction(overload) => {
            let pos_for_branches = pos.clone();
            let (checked_args, result_ty, phase) =
                resolve_overload(pos, &overload.branches, |branch| {
                    check_function_call(checker, scope, branch, args, &pos_for_branches)
                })?;
            Ok(CheckedExpr::Call {
                callee: Box::new(checked_callee),
                args: checked_args,
                meta: Typed { ty: result_ty, phase, pos: pos.clone() },
            })
        }
        TypeExpression::Tuple(t) => check_tuple_construct(checker, scope, &t, args, pos),
        _ => Err(pos.fail("callee is not callable")),
    }
}

/// A call whose callee names an enum tuple variant (or a top-level tuple
/// data declaration) is a constructor call (§4.3.2 "Call" bullet 3): arity
/// is checked against the tuple's field list, each argument against its
/// positional field type, and the result takes the same
/// nominal/parameterized shape `check_construct` gives a struct literal.
/// Produces a `Construct` node with `v0..vN` field names, matching the
/// naming `field_type`'s tuple projection and lowering's `field_names`
/// already use.
fn check_tuple_construct(
    checker: &Checker<'_>,
    scope: &Rc<Scope>,
    t: &vela_checked_ir::types::TupleType,
    args: &[ParsedExpr],
    pos: &Position,
) -> Checked<CheckedExpr> {
    if args.len() != t.fields.len() {
        return Err(pos.fail(format!(
            "`{}` expects {} arguments, found {}",
            t.name,
            t.fields.len(),
            args.len()
        )));
    }

    let generics: ExpectedGenerics = t.type_params.iter().map(|tp| tp.name.clone()).collect();
    let mut constraints = Constraints::new();
    let mut checked_fields = Vec::with_capacity(args.len());
    let mut phases = Vec::with_capacity(args.len());
    for (index, (field_ty, arg)) in t.fields.iter().zip(args).enumerate() {
        let checked_arg = check_expression(checker, scope, Some(field_ty), arg)?;
        constraints.record(field_ty, checked_arg.ty(), &generics);
        phases.push(checked_arg.phase());
        checked_fields.push((format!("v{index}"), checked_arg));
    }
    let substitution = constraints.reduce(pos, &generics)?;
    for (field_ty, (_, checked_arg)) in t.fields.iter().zip(&checked_fields) {
        let expected_ty = field_ty.substitute(&substitution);
        if !is_assignable(checked_arg.ty(), &expected_ty) {
            return Err(checked_arg
                .pos()
                .fail(format!("argument is not assignable to `{}`'s declared field type", t.name)));
        }
    }

    let instance_ty = if t.type_params.is_empty() {
        TypeExpression::nominal(t.name.clone())
    } else {
        let args = t
            .type_params
            .iter()
            .map(|tp| substitution.get(&tp.name).cloned().unwrap_or(TypeExpression::Nothing))
            .collect();
        TypeExpression::parameterized(t.name.clone(), args)
    };

    Ok(CheckedExpr::Construct {
        fields: checked_fields,
        meta: Typed {
            ty: instance_ty,
            phase: ExpressionPhase::join_all(phases),
            pos: pos.clone(),
        },
    })
}

/// Elaborates an argument passed against a `var`-phase parameter (§4.3.4):
/// the source must be an identifier or a field-access chain rooted at a
/// `var` binding — never an arbitrary expression, since there would be no
/// cell for the callee to write through. Bypasses [`check_expression`]
/// entirely so the raw `Var` phase survives onto the node (the one
/// documented exception to invariant 2, consumed only by
/// [`crate::phase::adjust_operand_phase`]'s `var` row and by lowering's
/// `projection` rewrite).
fn check_var_argument(scope: &Rc<Scope>, parsed: &ParsedExpr) -> Checked<CheckedExpr> {
    match parsed {
        ParsedExpr::Identifier { name, pos } => {
            let binding = scope
                .lookup(name)
                .ok_or_else(|| pos.fail(format!("unknown name `{name}`")))?;
            if binding.phase != ExpressionPhase::Var {
                return Err(pos.fail(format!(
                    "`{name}` is not a `var` binding; a `var` parameter requires a `var` argument"
                )));
            }
            Ok(CheckedExpr::Identifier {
                symbol: binding.symbol,
                meta: Typed {
                    ty: binding.ty,
                    phase: ExpressionPhase::Var,
                    pos: pos.clone(),
                },
            })
        }
        ParsedExpr::FieldAccess { base, field, pos } => {
            let checked_base = check_var_argument(scope, base)?;
            let ty = field_type(checked_base.ty(), field, pos)?;
            Ok(CheckedExpr::FieldAccess {
                base: Box::new(checked_base),
                field: field.clone(),
                meta: Typed {
                    ty,
                    phase: ExpressionPhase::Var,
                    pos: pos.clone(),
                },
            })
        }
        other => Err(other
            .pos()
            .fail("a `var` parameter requires an identifier or field-access chain rooted at a `var` binding")),
    }
}

type CallOutcome = (Vec<CheckedExpr>, TypeExpression, ExpressionPhase);

fn check_function_call(
    checker: &Checker<'_>,
    scope: &Rc<Scope>,
    fn_ty: &FunctionType,
    args: &[ParsedExpr],
    pos: &Position,
) -> Checked<CallOutcome> {
    if fn_ty.params.len() != args.len() {
        return Err(pos.fail(format!(
            "expected {} arguments, found {}",
            fn_ty.params.len(),
            args.len()
        )));
    }
    crate::phase_rules::check_call_phase(pos, scope.function.phase, fn_ty.phase)?;

    let generics: ExpectedGenerics = fn_ty.type_params.iter().map(|t| t.name.clone()).collect();
    let mut constraints = Constraints::new();
    let mut checked: Vec<Option<CheckedExpr>> = (0..args.len()).map(|_| None).collect();

    for (i, (param, arg)) in fn_ty.params.iter().zip(args).enumerate() {
        if param.phase == Some(ExpressionPhase::Var) {
            let checked_arg = check_var_argument(scope, arg)?;
            constraints.record(&param.ty, checked_arg.ty(), &generics);
            checked[i] = Some(checked_arg);
            continue;
        }
        if matches!(arg, ParsedExpr::Lambda { .. }) {
            continue;
        }
        let checked_arg = check_expression(checker, scope, Some(&param.ty), arg)?;
        constraints.record(&param.ty, checked_arg.ty(), &generics);
        checked[i] = Some(checked_arg);
    }

    let partial = constraints.snapshot(pos, &generics)?;
    for (i, (param, arg)) in fn_ty.params.iter().zip(args).enumerate() {
        if checked[i].is_some() {
            continue;
        }
        let expected_ty = param.ty.substitute(&partial);
        let checked_arg = check_expression(checker, scope, Some(&expected_ty), arg)?;
        constraints.record(&param.ty, checked_arg.ty(), &generics);
        checked[i] = Some(checked_arg);
    }

    let substitution = constraints.reduce(pos, &generics)?;
    let mut operand_phases = Vec::with_capacity(checked.len());
    let mut final_args = Vec::with_capacity(checked.len());
    for (param, arg) in fn_ty.params.iter().zip(checked.into_iter().map(Option::unwrap)) {
        let expected_ty = param.ty.substitute(&substitution);
        if !is_assignable(arg.ty(), &expected_ty) {
            return Err(arg.pos().fail("argument is not assignable to its parameter type"));
        }
        let contributed = adjust_operand_phase(param.phase, arg.phase())
            .ok_or_else(|| arg.pos().fail("argument phase is not permitted by this parameter"))?;
        operand_phases.push(contributed);
        final_args.push(arg);
    }
    let combined = ExpressionPhase::join_all(operand_phases);
    let result_ty = fn_ty.result.substitute(&substitution);
    let phase = call_result_phase(fn_ty.phase, combined);
    Ok((final_args, result_ty, phase))
}

fn require_boolean(checker: &Checker<'_>, expr: &CheckedExpr) -> Checked<()> {
    if *expr.ty() == checker.core.boolean_type() {
        Ok(())
    } else {
        Err(expr.pos().fail("expected a boolean expression"))
    }
}

fn check_boolean_binary(
    checker: &Checker<'_>,
    scope: &Rc<Scope>,
    left: &ParsedExpr,
    right: &ParsedExpr,
    pos: &Position,
    build: impl FnOnce(CheckedExpr, CheckedExpr, TypeExpression, ExpressionPhase, Position) -> CheckedExpr,
) -> Checked<CheckedExpr> {
    let boolean = checker.core.boolean_type();
    let checked_left = check_expression(checker, scope, Some(&boolean), left)?;
    require_boolean(checker, &checked_left)?;
    let checked_right = check_expression(checker, scope, Some(&boolean), right)?;
    require_boolean(checker, &checked_right)?;
    let phase = checked_left.phase().join(checked_right.phase());
    Ok(build(checked_left, checked_right, boolean, phase, pos.clone()))
}

fn check_not(
    checker: &Checker<'_>,
    scope: &Rc<Scope>,
    operand: &ParsedExpr,
    pos: &Position,
) -> Checked<CheckedExpr> {
    let boolean = checker.core.boolean_type();
    let checked = check_expression(checker, scope, Some(&boolean), operand)?;
    require_boolean(checker, &checked)?;
    let phase = checked.phase();
    Ok(CheckedExpr::Not {
        operand: Box::new(checked),
        meta: Typed { ty: boolean, phase, pos: pos.clone() },
    })
}

#[allow(clippy::too_many_arguments)]
fn check_if(
    checker: &Checker<'_>,
    scope: &Rc<Scope>,
    expected: Option<&TypeExpression>,
    condition: &ParsedExpr,
    then_branch: &ParsedExpr,
    else_branch: Option<&ParsedExpr>,
    pos: &Position,
) -> Checked<CheckedExpr> {
    let boolean = checker.core.boolean_type();
    let checked_condition = check_expression(checker, scope, Some(&boolean), condition)?;
    require_boolean(checker, &checked_condition)?;
    let checked_then = check_expression(checker, scope, expected, then_branch)?;

    let (checked_else, ty, phase) = match else_branch {
        Some(branch) => {
            let checked_branch = check_expression(checker, scope, expected, branch)?;
            let merged = merge_types(pos, checked_then.ty(), checked_branch.ty())?;
            let phase = checked_condition
                .phase()
                .join(checked_then.phase())
                .join(checked_branch.phase());
            (Some(Box::new(checked_branch)), merged, phase)
        }
        None => {
            let ty = checker.core.option_of(checked_then.ty().clone());
            let phase = checked_condition.phase().join(checked_then.phase());
            (None, ty, phase)
        }
    };

    Ok(CheckedExpr::If {
        condition: Box::new(checked_condition),
        then_branch: Box::new(checked_then),
        else_branch: checked_else,
        meta: Typed { ty, phase, pos: pos.clone() },
    })
}

fn check_lambda(
    checker: &Checker<'_>,
    scope: &Rc<Scope>,
    expected: Option<&TypeExpression>,
    params: &[LambdaParam],
    body: &ParsedExpr,
    pos: &Position,
) -> Checked<CheckedExpr> {
    let expected_fn = match expected {
        Some(TypeExpression::Function(f)) => Some(f.as_ref()),
        _ => None,
    };

    let mut checked_params = Vec::with_capacity(params.len());
    for (index, param) in params.iter().enumerate() {
        let ty = match &param.ty {
            Some(parsed_ty) => vela_binder::check_type_expression(
                parsed_ty,
                checker.locals,
                &TypeParamScope::default(),
            )?,
            None => expected_fn
                .and_then(|f| f.params.get(index))
                .map(|p| p.ty.clone())
                .ok_or_else(|| param.pos.fail("lambda parameter needs a type annotation"))?,
        };
        checked_params.push(CheckedLambdaParam {
            name: param.name.clone(),
            ty,
            pos: param.pos.clone(),
        });
    }

    let lambda_symbol = checker
        .module
        .child(format!("$lambda@{}:{}", pos.line, pos.column));
    let function_scope = FunctionScope::new(lambda_symbol.clone(), FunctionPhase::Fun);
    let body_scope = scope.enter_function(function_scope.clone());
    for param in &checked_params {
        body_scope.bind(
            param.name.clone(),
            Binding {
                symbol: lambda_symbol.child(param.name.as_str()),
                ty: param.ty.clone(),
                phase: ExpressionPhase::Const,
            },
        );
    }

    let expected_result = expected_fn.map(|f| f.result.clone());
    let checked_body = check_expression(checker, &body_scope, expected_result.as_ref(), body)?;
    function_scope.widen_result(pos, checked_body.ty().clone())?;
    let result_ty = function_scope.result_type();

    let fn_type = TypeExpression::Function(Arc::new(FunctionType {
        phase: FunctionPhase::Fun,
        type_params: vec![],
        params: checked_params
            .iter()
            .map(|p| FunctionParamType { phase: None, ty: p.ty.clone() })
            .collect(),
        result: result_ty,
    }));

    Ok(CheckedExpr::Lambda {
        params: checked_params,
        body: Box::new(checked_body),
        meta: Typed {
            ty: fn_type,
            phase: ExpressionPhase::Const,
            pos: pos.clone(),
        },
    })
}

enum CollectionKind {
    List,
    Set,
}

fn check_collection(
    checker: &Checker<'_>,
    scope: &Rc<Scope>,
    expected: Option<&TypeExpression>,
    elements: &[ParsedExpr],
    pos: &Position,
    kind: CollectionKind,
) -> Checked<CheckedExpr> {
    let expected_base = match kind {
        CollectionKind::List => &checker.core.list,
        CollectionKind::Set => &checker.core.set,
    };
    let expected_elem = match expected {
        Some(TypeExpression::Parameterized(p)) if &p.base.name == expected_base => p.args.first(),
        _ => None,
    };

    let mut elem_ty = TypeExpression::Nothing;
    let mut phases = Vec::with_capacity(elements.len());
    let mut checked_elements = Vec::with_capacity(elements.len());
    for element in elements {
        let checked = check_expression(checker, scope, expected_elem, element)?;
        elem_ty = merge_types(pos, &elem_ty, checked.ty())?;
        phases.push(checked.phase());
        checked_elements.push(checked);
    }

    let ty = match kind {
        CollectionKind::List => checker.core.list_of(elem_ty),
        CollectionKind::Set => checker.core.set_of(elem_ty),
    };
    let phase = ExpressionPhase::join_all(phases);
    Ok(match kind {
        CollectionKind::List => CheckedExpr::ListLiteral {
            elements: checked_elements,
            meta: Typed { ty, phase, pos: pos.clone() },
        },
        CollectionKind::Set => CheckedExpr::SetLiteral {
            elements: checked_elements,
            meta: Typed { ty, phase, pos: pos.clone() },
        },
    })
}

fn check_map(
    checker: &Checker<'_>,
    scope: &Rc<Scope>,
    expected: Option<&TypeExpression>,
    entries: &[(ParsedExpr, ParsedExpr)],
    pos: &Position,
) -> Checked<CheckedExpr> {
    let (expected_key, expected_value) = match expected {
        Some(TypeExpression::Parameterized(p)) if p.base.name == checker.core.map => {
            (p.args.first(), p.args.get(1))
        }
        _ => (None, None),
    };

    let mut key_ty = TypeExpression::Nothing;
    let mut value_ty = TypeExpression::Nothing;
    let mut phases = Vec::with_capacity(entries.len() * 2);
    let mut checked_entries = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let checked_key = check_expression(checker, scope, expected_key, key)?;
        let checked_value = check_expression(checker, scope, expected_value, value)?;
        key_ty = merge_types(pos, &key_ty, checked_key.ty())?;
        value_ty = merge_types(pos, &value_ty, checked_value.ty())?;
        phases.push(checked_key.phase());
        phases.push(checked_value.phase());
        checked_entries.push((checked_key, checked_value));
    }

    let ty = checker.core.map_of(key_ty, value_ty);
    let phase = ExpressionPhase::join_all(phases);
    Ok(CheckedExpr::MapLiteral {
        entries: checked_entries,
        meta: Typed { ty, phase, pos: pos.clone() },
    })
}

/// Elaborates a reassignment target (§4.3.5): the root must resolve to a
/// `var` binding; any further segments are a field-projection path that
/// lowering turns into a `projection` runtime call.
pub fn check_assign_target(
    checker: &Checker<'_>,
    scope: &Rc<Scope>,
    target: &vela_parsed_ir::AssignTarget,
) -> Checked<CheckedAssignTarget> {
    let binding = scope
        .lookup(&target.root)
        .ok_or_else(|| target.pos.fail(format!("unknown name `{}`", target.root)))?;
    if binding.phase != ExpressionPhase::Var {
        return Err(target
            .pos
            .fail(format!("`{}` is not a `var` binding and cannot be reassigned", target.root)));
    }
    let mut ty = binding.ty.clone();
    for segment in &target.projection {
        ty = field_type(&ty, segment, &target.pos)?;
    }
    Ok(CheckedAssignTarget {
        root: binding.symbol,
        root_type: ty,
        projection: target.projection.clone(),
        pos: target.pos.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_binder::LocalScope;
    use vela_checked_ir::{CoreTypes, GlobalTable};
    use vela_common::phase::FunctionPhase;
    use vela_common::{PackageName, Version};

    fn module() -> Symbol {
        Symbol::top_level(PackageName::new("acme", "widgets", Version::new(1, 0, 0)), "widgets")
    }

    fn core() -> CoreTypes {
        let pkg = PackageName::new("acme", "core", Version::new(1, 0, 0));
        CoreTypes {
            unit: Symbol::top_level(pkg.clone(), "Unit"),
            boolean: Symbol::top_level(pkg.clone(), "Boolean"),
            int: Symbol::top_level(pkg.clone(), "Int"),
            float: Symbol::top_level(pkg.clone(), "Float"),
            string: Symbol::top_level(pkg.clone(), "String"),
            list: Symbol::top_level(pkg.clone(), "List"),
            set: Symbol::top_level(pkg.clone(), "Set"),
            map: Symbol::top_level(pkg.clone(), "Map"),
            option: Symbol::top_level(pkg.clone(), "Option"),
            async_value: Symbol::top_level(pkg, "Async"),
        }
    }

    fn pos() -> Position {
        Position::new("x.vl", 1, 1)
    }

    #[test]
    fn reading_a_var_identifier_widens_to_flow_not_var() {
        let module = module();
        let global = GlobalTable::default();
        let core = core();
        let locals = LocalScope::default();
        let checker = Checker::new(&module, &global, &core, &locals);
        let function = FunctionScope::new(module.child("f"), FunctionPhase::Def);
        let scope = Scope::root(function);
        scope.bind(
            "count",
            Binding {
                symbol: module.child("count"),
                ty: core.int_type(),
                phase: ExpressionPhase::Var,
            },
        );
        let checked = check_identifier(&checker, &scope, "count", &pos()).unwrap();
        assert_eq!(checked.phase(), ExpressionPhase::Flow);
    }

    #[test]
    fn var_argument_accepts_a_bare_var_identifier() {
        let scope = Scope::root(FunctionScope::new(
            Symbol::top_level(PackageName::new("acme", "core", Version::new(1, 0, 0)), "f"),
            FunctionPhase::Def,
        ));
        scope.bind(
            "count",
            Binding {
                symbol: Symbol::top_level(PackageName::new("acme", "core", Version::new(1, 0, 0)), "count"),
                ty: TypeExpression::Nothing,
                phase: ExpressionPhase::Var,
            },
        );
        let parsed = ParsedExpr::Identifier { name: "count".to_string(), pos: pos() };
        let checked = check_var_argument(&scope, &parsed).unwrap();
        assert_eq!(checked.phase(), ExpressionPhase::Var);
    }

    #[test]
    fn var_argument_rejects_a_non_var_binding() {
        let scope = Scope::root(FunctionScope::new(
            Symbol::top_level(PackageName::new("acme", "core", Version::new(1, 0, 0)), "f"),
            FunctionPhase::Def,
        ));
        scope.bind(
            "name",
            Binding {
                symbol: Symbol::top_level(PackageName::new("acme", "core", Version::new(1, 0, 0)), "name"),
                ty: TypeExpression::Nothing,
                phase: ExpressionPhase::Val,
            },
        );
        let parsed = ParsedExpr::Identifier { name: "name".to_string(), pos: pos() };
        assert!(check_var_argument(&scope, &parsed).is_err());
    }

    #[test]
    fn var_argument_rejects_an_arbitrary_expression() {
        let scope = Scope::root(FunctionScope::new(
            Symbol::top_level(PackageName::new("acme", "core", Version::new(1, 0, 0)), "f"),
            FunctionPhase::Def,
        ));
        let parsed = ParsedExpr::Literal { value: Literal::Int(1), pos: pos() };
        assert!(check_var_argument(&scope, &parsed).is_err());
    }
}
