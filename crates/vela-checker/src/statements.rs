//! Statement and block checking (§4.3.5): `let`, reassignment, bare
//! expressions, nested function declarations, and `return` — all threaded
//! through the enclosing [`FunctionScope`](crate::scope::FunctionScope) so
//! phase side-conditions and result-type widening stay centralized there.

use std::rc::Rc;

use vela_checked_ir::{Block as CheckedBlock, Expression as CheckedExpr, Statement as CheckedStatement, Typed, TypeExpression};
use vela_common::Checked;
use vela_parsed_ir::{Block as ParsedBlock, Statement as ParsedStatement};

use crate::context::Checker;
use crate::expr::{check_assign_target, check_expression};
use crate::phase_rules::{check_let_phase, check_reassignment_phase};
use crate::scope::{Binding, Scope};

/// Checks a block's statements in order, threading a fresh nested scope so
/// `let`s introduced inside stay local to it. The block's own type and
/// phase come from its final expression statement, or `Unit`/`const` if the
/// block ends in anything else (§4.3.2, "Block").
pub fn check_block(
    checker: &Checker<'_>,
    scope: &Rc<Scope>,
    expected: Option<&TypeExpression>,
    block: &ParsedBlock,
) -> Checked<CheckedExpr> {
    let inner = scope.child();
    let mut statements = Vec::with_capacity(block.statements.len());
    let mut tail: Option<(TypeExpression, vela_common::ExpressionPhase)> = None;

    for (index, statement) in block.statements.iter().enumerate() {
        let is_last = index + 1 == block.statements.len();
        let (checked, value) = check_statement(
            checker,
            &inner,
            if is_last { expected } else { None },
            statement,
        )?;
        if is_last {
            tail = value;
        }
        statements.push(checked);
    }

    let (ty, phase) = tail.unwrap_or_else(|| (checker.core.unit_type(), vela_common::ExpressionPhase::Const));
    Ok(CheckedExpr::Block(CheckedBlock {
        statements,
        meta: Typed { ty, phase, pos: block.pos.clone() },
    }))
}

type StatementOutcome = (CheckedStatement, Option<(TypeExpression, vela_common::ExpressionPhase)>);

fn check_statement(
    checker: &Checker<'_>,
    scope: &Rc<Scope>,
    expected: Option<&TypeExpression>,
    statement: &ParsedStatement,
) -> Checked<StatementOutcome> {
    match statement {
        ParsedStatement::Let { name, phase, ty, value, pos } => {
            check_let_phase(pos, scope.function.phase, *phase)?;
            let expected_ty = match ty {
                Some(parsed_ty) => Some(vela_binder::check_type_expression(
                    parsed_ty,
                    checker.locals,
                    &vela_binder::TypeParamScope::default(),
                )?),
                None => None,
            };
            let checked_value = check_expression(checker, scope, expected_ty.as_ref(), value)?;
            let declared_ty = expected_ty.unwrap_or_else(|| checked_value.ty().clone());
            let symbol = checker.module.child(name.as_str());
            scope.bind(
                name.clone(),
                Binding { symbol: symbol.clone(), ty: declared_ty.clone(), phase: *phase },
            );
            Ok((
                CheckedStatement::Let {
                    name: symbol,
                    phase: *phase,
                    ty: declared_ty,
                    value: checked_value,
                    pos: pos.clone(),
                },
                None,
            ))
        }
        ParsedStatement::Reassign { target, value, pos } => {
            check_reassignment_phase(pos, scope.function.phase)?;
            let checked_target = check_assign_target(checker, scope, target)?;
            let checked_value = check_expression(checker, scope, Some(&checked_target.root_type), value)?;
            if !crate::assignability::is_assignable(checked_value.ty(), &checked_target.root_type) {
                return Err(pos.fail("reassigned value is not assignable to the target's type"));
            }
            Ok((
                CheckedStatement::Reassign {
                    target: checked_target,
                    value: checked_value,
                    pos: pos.clone(),
                },
                None,
            ))
        }
        ParsedStatement::Expr(expr) => {
            let checked = check_expression(checker, scope, expected, expr)?;
            let tail = Some((checked.ty().clone(), checked.phase()));
            Ok((CheckedStatement::Expr(checked), tail))
        }
        ParsedStatement::NestedFunction(decl) => {
            let checked_decl = crate::declarations::check_function_decl(checker, scope, decl)?;
            scope.bind(
                decl.name.clone(),
                Binding {
                    symbol: checked_decl.symbol.clone(),
                    ty: checked_decl.ty.clone(),
                    phase: vela_common::ExpressionPhase::Const,
                },
            );
            Ok((CheckedStatement::NestedFunction(Box::new(checked_decl)), None))
        }
        ParsedStatement::Return { value, pos } => {
            let checked_value = match value {
                Some(expr) => Some(check_expression(checker, scope, None, expr)?),
                None => None,
            };
            let result_ty = checked_value
                .as_ref()
                .map(|v| v.ty().clone())
                .unwrap_or_else(|| checker.core.unit_type());
            scope.function.widen_result(pos, result_ty)?;
            Ok((
                CheckedStatement::Return { value: checked_value, pos: pos.clone() },
                None,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_binder::LocalScope;
    use vela_checked_ir::{CoreTypes, GlobalTable};
    use vela_common::phase::FunctionPhase;
    use vela_common::{ExpressionPhase, PackageName, Position, Symbol, Version};
    use vela_parsed_ir::{Expression as ParsedExpr, Literal};

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
    fn a_block_ending_in_an_expression_takes_its_type_and_phase() {
        let module = module();
        let global = GlobalTable::default();
        let core = core();
        let locals = LocalScope::default();
        let checker = Checker::new(&module, &global, &core, &locals);
        let function = crate::scope::FunctionScope::new(module.child("f"), FunctionPhase::Fun);
        let scope = Scope::root(function);

        let block = ParsedBlock {
            statements: vec![ParsedStatement::Expr(ParsedExpr::Literal {
                value: Literal::Bool(true),
                pos: pos(),
            })],
            pos: pos(),
        };
        let checked = check_block(&checker, &scope, None, &block).unwrap();
        assert_eq!(*checked.ty(), core.boolean_type());
        assert_eq!(checked.phase(), ExpressionPhase::Const);
    }

    #[test]
    fn an_empty_block_is_unit_and_const() {
        let module = module();
        let global = GlobalTable::default();
        let core = core();
        let locals = LocalScope::default();
        let checker = Checker::new(&module, &global, &core, &locals);
        let function = crate::scope::FunctionScope::new(module.child("f"), FunctionPhase::Fun);
        let scope = Scope::root(function);

        let block = ParsedBlock { statements: vec![], pos: pos() };
        let checked = check_block(&checker, &scope, None, &block).unwrap();
        assert_eq!(*checked.ty(), core.unit_type());
    }

    #[test]
    fn a_fun_body_cannot_declare_a_var() {
        let module = module();
        let global = GlobalTable::default();
        let core = core();
        let locals = LocalScope::default();
        let checker = Checker::new(&module, &global, &core, &locals);
        let function = crate::scope::FunctionScope::new(module.child("f"), FunctionPhase::Fun);
        let scope = Scope::root(function);

        let block = ParsedBlock {
            statements: vec![ParsedStatement::Let {
                name: "counter".to_string(),
                phase: ExpressionPhase::Var,
                ty: None,
                value: ParsedExpr::Literal { value: Literal::Int(0), pos: pos() },
                pos: pos(),
            }],
            pos: pos(),
        };
        assert!(check_block(&checker, &scope, None, &block).is_err());
    }
}
