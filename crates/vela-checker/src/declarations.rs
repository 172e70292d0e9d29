//! Top-level and nested declaration checking (§4.1, §4.3.4, §4.3.5). A
//! `fun`/`def`/`sig` declaration opens its own [`FunctionScope`]; `data`/
//! `enum` declarations are mostly shape bookkeeping already resolved by
//! [`vela_binder::check_type_expression`] at the field level.

use std::rc::Rc;
use std::sync::Arc;

use vela_binder::TypeParamScope;
use vela_checked_ir::{
    ConstDecl as CheckedConstDecl, DataDecl as CheckedDataDecl, EnumDecl as CheckedEnumDecl,
    FunctionDecl as CheckedFunctionDecl, FunctionParam as CheckedFunctionParam, FunctionParamType,
    FunctionType, TypeExpression, TypeParameterType,
};
use vela_common::Checked;
use vela_parsed_ir::{ConstDecl, DataDecl, DataShape, EnumDecl, FunctionDecl};

use crate::context::Checker;
use crate::expr::check_expression;
use crate::phase_rules::check_param_phase;
use crate::scope::{Binding, FunctionScope, Scope};

fn type_param_scope(owner: &vela_common::Symbol, names: &[String]) -> (TypeParamScope, Vec<TypeParameterType>) {
    let mut scope = TypeParamScope::default();
    let mut checked = Vec::with_capacity(names.len());
    for name in names {
        let symbol = vela_binder::type_parameter_symbol(owner, name);
        scope.insert(name.clone(), symbol.clone());
        checked.push(TypeParameterType { name: symbol });
    }
    (scope, checked)
}

/// Checks a `fun`/`def`/`sig` declaration, nested or top-level. `outer_scope`
/// is the enclosing lexical scope a nested function closes over; for a
/// top-level declaration this is the file's synthetic module scope (see
/// `file_checker`).
pub fn check_function_decl(
    checker: &Checker<'_>,
    outer_scope: &Rc<Scope>,
    decl: &FunctionDecl,
) -> Checked<CheckedFunctionDecl> {
    let symbol = outer_scope.function.symbol.child(decl.name.as_str());
    let (type_params, checked_type_params) = type_param_scope(&symbol, &decl.type_params);

    let mut checked_params = Vec::with_capacity(decl.params.len());
    for param in &decl.params {
        check_param_phase(&param.pos, decl.phase, param.phase)?;
        let ty = vela_binder::check_type_expression(&param.ty, checker.locals, &type_params)?;
        checked_params.push(CheckedFunctionParam {
            name: param.name.clone(),
            phase: param.phase,
            ty,
            pos: param.pos.clone(),
        });
    }

    let declared_result = match &decl.result {
        Some(parsed_ty) => Some(vela_binder::check_type_expression(parsed_ty, checker.locals, &type_params)?),
        None => None,
    };

    let function_scope = FunctionScope::new(symbol.clone(), decl.phase);
    let body_scope = outer_scope.enter_function(function_scope.clone());
    for param in &checked_params {
        body_scope.bind(
            param.name.clone(),
            Binding {
                symbol: symbol.child(param.name.as_str()),
                ty: param.ty.clone(),
                phase: param.phase.unwrap_or(vela_common::ExpressionPhase::Const),
            },
        );
    }

    let checked_body = check_expression(checker, &body_scope, declared_result.as_ref(), &decl.body)?;
    function_scope.widen_result(&decl.pos, checked_body.ty().clone())?;

    let result = match declared_result {
        Some(declared) => {
            if !crate::assignability::is_assignable(&function_scope.result_type(), &declared) {
                return Err(decl
                    .pos
                    .fail(format!("`{}`'s body does not satisfy its declared result type", decl.name)));
            }
            declared
        }
        None => function_scope.result_type(),
    };

    let fn_type = FunctionType {
        phase: decl.phase,
        type_params: checked_type_params,
        params: checked_params
            .iter()
            .map(|p| FunctionParamType { phase: p.phase, ty: p.ty.clone() })
            .collect(),
        result,
    };

    Ok(CheckedFunctionDecl {
        symbol,
        access: decl.access.unwrap_or_default(),
        ty: TypeExpression::Function(Arc::new(fn_type)),
        params: checked_params,
        body: checked_body,
        pos: decl.pos.clone(),
    })
}

/// Checks a top-level `const` declaration: a `let` without a function
/// context, always at `const`/`val`/`flow` phase per its declared phase,
/// never `var` (§3.4: only local bindings may be `var`... top-level
/// constants follow the same restriction via their absence of a `var`
/// keyword in `ConstDecl` itself).
pub fn check_const_decl(
    checker: &Checker<'_>,
    outer_scope: &Rc<Scope>,
    decl: &ConstDecl,
) -> Checked<CheckedConstDecl> {
    let symbol = outer_scope.function.symbol.child(decl.name.as_str());
    let declared_ty = match &decl.ty {
        Some(parsed_ty) => Some(vela_binder::check_type_expression(
            parsed_ty,
            checker.locals,
            &TypeParamScope::default(),
        )?),
        None => None,
    };
    let checked_value = check_expression(checker, outer_scope, declared_ty.as_ref(), &decl.value)?;
    let ty = declared_ty.unwrap_or_else(|| checked_value.ty().clone());

    Ok(CheckedConstDecl {
        symbol,
        access: decl.access.unwrap_or_default(),
        ty,
        value: checked_value,
        pos: decl.pos.clone(),
    })
}

fn check_data_shape(
    checker: &Checker<'_>,
    symbol: &vela_common::Symbol,
    type_params: &TypeParamScope,
    checked_type_params: Vec<TypeParameterType>,
    shape: &DataShape,
    enum_parent: Option<vela_common::Symbol>,
) -> Checked<TypeExpression> {
    match shape {
        DataShape::Struct(fields) => {
            let mut checked_fields = vela_common::collections::OrderedMap::new();
            for (name, ty) in fields {
                let checked_ty = vela_binder::check_type_expression(ty, checker.locals, type_params)?;
                checked_fields = checked_fields.inserted(name.clone(), checked_ty);
            }
            Ok(TypeExpression::Struct(Arc::new(vela_checked_ir::StructType {
                name: symbol.clone(),
                type_params: checked_type_params,
                fields: checked_fields,
                enum_parent,
            })))
        }
        DataShape::Tuple(fields) => {
            let checked_fields = fields
                .iter()
                .map(|ty| vela_binder::check_type_expression(ty, checker.locals, type_params))
                .collect::<Checked<Vec<_>>>()?;
            Ok(TypeExpression::Tuple(Arc::new(vela_checked_ir::TupleType {
                name: symbol.clone(),
                type_params: checked_type_params,
                fields: checked_fields,
                enum_parent,
            })))
        }
        DataShape::Atom => Ok(TypeExpression::Atom(Arc::new(vela_checked_ir::AtomType {
            name: symbol.clone(),
            type_params: checked_type_params,
            enum_parent,
        }))),
    }
}

/// Checks a top-level `data` declaration (struct/tuple/atom product type).
pub fn check_data_decl(checker: &Checker<'_>, module: &vela_common::Symbol, decl: &DataDecl) -> Checked<CheckedDataDecl> {
    let symbol = module.child(decl.name.as_str());
    let (type_params, checked_type_params) = type_param_scope(&symbol, &decl.type_params);
    let shape = check_data_shape(checker, &symbol, &type_params, checked_type_params, &decl.shape, None)?;
    Ok(CheckedDataDecl {
        symbol,
        access: decl.access.unwrap_or_default(),
        shape,
        pos: decl.pos.clone(),
    })
}

/// Checks a top-level `enum` declaration: each variant gets its own symbol
/// nested under the enum's, and carries `enum_parent` pointing back so
/// [`crate::assignability::is_assignable`] can let a variant stand in for
/// its parent (§4.3.2).
pub fn check_enum_decl(checker: &Checker<'_>, module: &vela_common::Symbol, decl: &EnumDecl) -> Checked<CheckedEnumDecl> {
    let symbol = module.child(decl.name.as_str());
    let (type_params, checked_type_params) = type_param_scope(&symbol, &decl.type_params);

    let mut variants = vela_common::collections::OrderedMap::new();
    for (name, shape) in &decl.variants {
        // Variants share the enum's own generics rather than introducing
        // their own (§4.1): resolve field types against `type_params`, and
        // stamp the same checked list onto the variant's shape.
        let variant_symbol = symbol.child(name.as_str());
        let checked_shape = check_data_shape(
            checker,
            &variant_symbol,
            &type_params,
            checked_type_params.clone(),
            shape,
            Some(symbol.clone()),
        )?;
        let variant_shape = match checked_shape {
            TypeExpression::Struct(s) => vela_checked_ir::VariantShape::Struct(s),
            TypeExpression::Tuple(t) => vela_checked_ir::VariantShape::Tuple(t),
            TypeExpression::Atom(a) => vela_checked_ir::VariantShape::Atom(a),
            _ => unreachable!("check_data_shape only ever returns Struct/Tuple/Atom"),
        };
        variants = variants.inserted(name.clone(), variant_shape);
    }

    Ok(CheckedEnumDecl {
        symbol: symbol.clone(),
        access: decl.access.unwrap_or_default(),
        shape: TypeExpression::Enum(Arc::new(vela_checked_ir::EnumType {
            name: symbol,
            type_params: checked_type_params,
            variants,
        })),
        pos: decl.pos.clone(),
    })
}
