//! End-to-end scenario coverage (§8, S1-S7). Each scenario hand-builds the
//! `P-IR::File` a real parser would have produced and drives it through the
//! real collector/checker/lowering entry points, asserting the documented
//! outcome.

use vela_binder::collect_declarations;
use vela_checked_ir::{Declaration as CheckedDeclaration, Expression as CheckedExpr, Statement as CheckedStatement};
use vela_checker::check_file;
use vela_common::phase::{ExpressionPhase, FunctionPhase};
use vela_common::{AccessLevel, Position};
use vela_conformance::{app_module, core_types, library, preamble_with_core_names, pos, NoDeps};
use vela_lowering::lower_file;
use vela_parsed_ir::{
    AssignTarget, Block, ConstDecl, Declaration, Expression, File, FunctionDecl, FunctionParam, LambdaParam, Literal,
    ParsedType, Statement,
};

fn named(name: &str) -> ParsedType {
    ParsedType::Named {
        path: vec![name.to_string()],
        args: vec![],
        pos: pos(),
    }
}

fn ident(name: &str) -> Expression {
    Expression::Identifier { name: name.to_string(), pos: pos() }
}

fn int_lit(value: i64) -> Expression {
    Expression::Literal { value: Literal::Int(value), pos: pos() }
}

fn call(callee: Expression, args: Vec<Expression>) -> Expression {
    Expression::Call { callee: Box::new(callee), args, pos: pos() }
}

fn file_with(declarations: Vec<Declaration>) -> File {
    File { module: vec!["app".to_string()], declarations, pos: pos() }
}

#[test]
fn s1_const_from_a_builtin_function_call() {
    let module = app_module();
    let core = core_types();
    let lib = library(&core);

    let decl = Declaration::Const(ConstDecl {
        name: "result".to_string(),
        access: None,
        ty: None,
        value: call(ident("plus"), vec![int_lit(1), int_lit(1)]),
        pos: pos(),
    });
    let file = file_with(vec![decl]);

    let locals = collect_declarations(&module, &file, &NoDeps, &lib.preamble).unwrap();
    let checked = check_file(&module, &file, &locals, &lib.global, &core).unwrap();

    let CheckedDeclaration::Const(result) = &checked.declarations[0] else {
        panic!("expected a const declaration");
    };
    assert_eq!(result.ty, core.int_type());
    assert_eq!(result.value.phase(), ExpressionPhase::Const);
}

#[test]
fn s2_static_access_into_a_generic_function() {
    let module = app_module();
    let core = core_types();
    let lib = library(&core);

    let decl = Declaration::Const(ConstDecl {
        name: "result".to_string(),
        access: None,
        ty: None,
        value: call(
            Expression::StaticAccess {
                segments: vec!["core".to_string(), "list".to_string(), "get".to_string()],
                pos: pos(),
            },
            vec![Expression::ListLiteral { elements: vec![int_lit(1)], pos: pos() }, int_lit(0)],
        ),
        pos: pos(),
    });
    let file = file_with(vec![decl]);

    let locals = collect_declarations(&module, &file, &NoDeps, &lib.preamble).unwrap();
    let checked = check_file(&module, &file, &locals, &lib.global, &core).unwrap();

    let CheckedDeclaration::Const(result) = &checked.declarations[0] else {
        panic!("expected a const declaration");
    };
    assert_eq!(result.ty, core.int_type());
    assert_eq!(result.value.phase(), ExpressionPhase::Const);
}

#[test]
fn s3_lambda_with_an_explicit_param_type() {
    let module = app_module();
    let core = core_types();
    let lib = library(&core);
    let preamble = preamble_with_core_names(&lib, &core);

    let lambda = Expression::Lambda {
        params: vec![LambdaParam { name: "x".to_string(), ty: Some(named("Int")), pos: pos() }],
        body: Box::new(Expression::Block(Block {
            statements: vec![Statement::Return { value: Some(ident("x")), pos: pos() }],
            pos: pos(),
        })),
        pos: pos(),
    };
    let decl = Declaration::Const(ConstDecl {
        name: "result".to_string(),
        access: None,
        ty: None,
        value: lambda,
        pos: pos(),
    });
    let file = file_with(vec![decl]);

    let locals = collect_declarations(&module, &file, &NoDeps, &preamble).unwrap();
    let checked = check_file(&module, &file, &locals, &lib.global, &core).unwrap();

    let CheckedDeclaration::Const(result) = &checked.declarations[0] else {
        panic!("expected a const declaration");
    };
    let CheckedExpr::Lambda { params, body, .. } = &result.value else {
        panic!("expected a lambda expression");
    };
    assert_eq!(params[0].ty, core.int_type());
    assert_eq!(body.ty(), &core.int_type());
}

#[test]
fn s4_generic_inference_across_a_non_lambda_and_a_lambda_argument() {
    let module = app_module();
    let core = core_types();
    let lib = library(&core);

    let list_literal =
        Expression::ListLiteral { elements: vec![int_lit(1), int_lit(2), int_lit(3)], pos: pos() };
    let mapper = Expression::Lambda {
        params: vec![LambdaParam { name: "x".to_string(), ty: None, pos: pos() }],
        body: Box::new(call(ident("toString"), vec![ident("x")])),
        pos: pos(),
    };
    let decl = Declaration::Const(ConstDecl {
        name: "result".to_string(),
        access: None,
        ty: None,
        value: call(
            Expression::StaticAccess {
                segments: vec!["core".to_string(), "list".to_string(), "map".to_string()],
                pos: pos(),
            },
            vec![list_literal, mapper],
        ),
        pos: pos(),
    });
    let file = file_with(vec![decl]);

    let locals = collect_declarations(&module, &file, &NoDeps, &lib.preamble).unwrap();
    let checked = check_file(&module, &file, &locals, &lib.global, &core).unwrap();

    let CheckedDeclaration::Const(result) = &checked.declarations[0] else {
        panic!("expected a const declaration");
    };
    assert_eq!(result.ty, core.list_of(core.string_type()));
    assert_eq!(result.value.phase(), ExpressionPhase::Const);
}

#[test]
fn s5_a_def_s_var_reassigned_by_a_nested_sig_lowers_to_a_reactive_flow() {
    let module = app_module();
    let core = core_types();
    let lib = library(&core);
    let preamble = preamble_with_core_names(&lib, &core);

    let inc = FunctionDecl {
        name: "inc".to_string(),
        access: None,
        phase: FunctionPhase::Sig,
        type_params: vec![],
        params: vec![],
        result: None,
        body: Expression::Block(Block {
            statements: vec![Statement::Reassign {
                target: AssignTarget { root: "count".to_string(), projection: vec![], pos: pos() },
                value: int_lit(1),
                pos: pos(),
            }],
            pos: pos(),
        }),
        pos: pos(),
    };
    let counter = FunctionDecl {
        name: "counter".to_string(),
        access: None,
        phase: FunctionPhase::Def,
        type_params: vec![],
        params: vec![FunctionParam {
            name: "initialCount".to_string(),
            phase: None,
            ty: named("Int"),
            pos: pos(),
        }],
        result: None,
        body: Expression::Block(Block {
            statements: vec![
                Statement::Let {
                    name: "count".to_string(),
                    phase: ExpressionPhase::Var,
                    ty: None,
                    value: ident("initialCount"),
                    pos: pos(),
                },
                Statement::NestedFunction(Box::new(inc)),
                Statement::Expr(call(ident("toString"), vec![ident("count")])),
            ],
            pos: pos(),
        }),
        pos: pos(),
    };
    let file = file_with(vec![Declaration::Function(counter)]);

    let locals = collect_declarations(&module, &file, &NoDeps, &preamble).unwrap();
    let checked = check_file(&module, &file, &locals, &lib.global, &core).unwrap();

    let CheckedDeclaration::Function(counter) = &checked.declarations[0] else {
        panic!("expected a function declaration");
    };
    let CheckedExpr::Block(body) = &counter.body else {
        panic!("expected a block body");
    };
    let tail_phase = body.statements.iter().find_map(|stmt| match stmt {
        CheckedStatement::Expr(expr) => Some(expr.phase()),
        _ => None,
    });
    assert_eq!(tail_phase, Some(ExpressionPhase::Flow));

    let host_file = lower_file(&checked);
    assert!(host_file.prelude.contains(&"flow".to_string()));
    assert!(host_file.prelude.contains(&"variable".to_string()));
    assert!(host_file.prelude.contains(&"set".to_string()));
}

#[test]
fn s6_a_fun_declaring_a_var_binding_is_a_phase_error() {
    let module = app_module();
    let core = core_types();
    let lib = library(&core);
    let preamble = preamble_with_core_names(&lib, &core);

    let decl = FunctionDecl {
        name: "f".to_string(),
        access: None,
        phase: FunctionPhase::Fun,
        type_params: vec![],
        params: vec![],
        result: Some(named("Int")),
        body: Expression::Block(Block {
            statements: vec![
                Statement::Let {
                    name: "x".to_string(),
                    phase: ExpressionPhase::Var,
                    ty: None,
                    value: int_lit(0),
                    pos: pos(),
                },
                Statement::Return { value: Some(ident("x")), pos: pos() },
            ],
            pos: pos(),
        }),
        pos: pos(),
    };
    let file = file_with(vec![Declaration::Function(decl)]);

    let locals = collect_declarations(&module, &file, &NoDeps, &preamble).unwrap();
    let err = check_file(&module, &file, &locals, &lib.global, &core).unwrap_err();
    assert_eq!(err.kind, vela_common::DiagnosticKind::Phase);
}

#[test]
fn s7_importing_a_private_symbol_from_another_module_is_denied() {
    use vela_binder::verify_import;
    use vela_checked_ir::{AccessRecord, GlobalTable, TypeExpression};
    use vela_common::collections::PersistentMap;
    use vela_common::{PackageName, Symbol, Version};
    use vela_parsed_ir::{ImportDecl, ImportSpec};

    let package = PackageName::new("acme", "widgets", Version::new(1, 0, 0));
    let target_module = Symbol::top_level(package.clone(), "widgets");
    let target = target_module.child("Widget");

    let mut package_table = PersistentMap::new();
    package_table.insert(
        target.clone(),
        AccessRecord::new(AccessLevel::Private, target.clone(), target_module, TypeExpression::Nothing),
    );
    let mut global: GlobalTable = PersistentMap::new();
    global.insert(package.clone(), package_table);

    let import = ImportDecl {
        path: vec!["widgets".to_string()],
        specs: vec![ImportSpec::Name("Widget".to_string())],
        pos: Position::new("a.vl", 1, 1),
    };
    let from = Symbol::top_level(package, "consumer");

    // `NoDeps::breakdown_import` always returns empty, so this scenario
    // exercises the access predicate directly the way `vela_binder`'s own
    // import-verifier tests do, against a one-off `DependencyManager` that
    // hands back exactly the one candidate symbol.
    struct OneOf(Symbol);
    impl vela_binder::DependencyManager for OneOf {
        fn breakdown_import(&self, _import: &ImportDecl) -> Vec<Symbol> {
            vec![self.0.clone()]
        }
    }
    let deps = OneOf(target);

    let err = verify_import(&from, &import, &deps, &global).unwrap_err();
    assert!(err.message.contains("private"));
}
