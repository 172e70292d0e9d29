//! Top-level and nested declaration lowering (§4.4). Data and enum shapes
//! carry no behavior to rewrite — only field order survives into the host
//! declaration, mirroring `vela_checker::declarations::check_data_shape`'s
//! own "mostly shape bookkeeping" framing.

use vela_checked_ir::types::{FunctionType, TypeExpression, VariantShape};
use vela_checked_ir::{ConstDecl, DataDecl, EnumDecl, FunctionDecl};
use vela_common::phase::FunctionPhase;
use vela_target_ir::{HostConstDecl, HostDataDecl, HostEnumDecl, HostEnumVariant, HostExpr, HostFunctionDecl, HostStatement};

use crate::context::LoweringContext;
use crate::expr::{host_name, lower_expression};

/// Recovers a declaration's own function phase from its type, which the
/// checker always stamps as `TypeExpression::Function` (§4.3.5).
fn function_phase_of(ty: &TypeExpression) -> FunctionPhase {
    match ty {
        TypeExpression::Function(ft) => ft.phase,
        _ => unreachable!("a FunctionDecl's checked type is always TypeExpression::Function"),
    }
}

pub fn lower_function_decl(ctx: &LoweringContext, decl: &FunctionDecl) -> HostFunctionDecl {
    let phase = function_phase_of(&decl.ty);
    let params = decl.params.iter().map(|p| p.name.clone()).collect();
    let body = lower_expression(ctx, phase, &decl.body).into_block();
    HostFunctionDecl { name: host_name(&decl.symbol), params, body, pos: decl.pos.clone() }
}

/// A nested function statement (§4.3.5, "Function statement") lowers to a
/// `let` binding a host lambda — the host has no named-function-statement
/// form, only bindings and lambdas.
pub fn lower_nested_function(ctx: &LoweringContext, decl: &FunctionDecl) -> HostStatement {
    let phase = function_phase_of(&decl.ty);
    let params = decl.params.iter().map(|p| p.name.clone()).collect();
    let body = lower_expression(ctx, phase, &decl.body).into_block();
    HostStatement::Let {
        name: host_name(&decl.symbol),
        value: HostExpr::Lambda { params, body: Box::new(body), pos: decl.pos.clone() },
        pos: decl.pos.clone(),
    }
}

/// A top-level constant is checked against the module's synthetic `fun`
/// scope (`vela_checker::file_checker::check_file`), so its initializer can
/// never be reactive; lowering it is a plain structural copy.
pub fn lower_const_decl(ctx: &LoweringContext, decl: &ConstDecl) -> HostConstDecl {
    HostConstDecl {
        name: host_name(&decl.symbol),
        value: lower_expression(ctx, FunctionPhase::Fun, &decl.value),
        pos: decl.pos.clone(),
    }
}

fn field_names(shape: &TypeExpression) -> Vec<String> {
    match shape {
        TypeExpression::Struct(s) => s.fields.keys().cloned().collect(),
        TypeExpression::Tuple(t) => (0..t.fields.len()).map(|i| format!("v{i}")).collect(),
        TypeExpression::Atom(_) => Vec::new(),
        _ => unreachable!("a DataDecl's checked shape is always Struct/Tuple/Atom"),
    }
}

pub fn lower_data_decl(decl: &DataDecl) -> HostDataDecl {
    HostDataDecl { name: host_name(&decl.symbol), fields: field_names(&decl.shape), pos: decl.pos.clone() }
}

pub fn lower_enum_decl(decl: &EnumDecl) -> HostEnumDecl {
    let variants = match &decl.shape {
        TypeExpression::Enum(e) => e
            .variants
            .iter()
            .map(|(name, shape)| HostEnumVariant {
                name: name.clone(),
                fields: field_names(&variant_shape_as_type(shape)),
            })
            .collect(),
        _ => unreachable!("an EnumDecl's checked shape is always TypeExpression::Enum"),
    };
    HostEnumDecl { name: host_name(&decl.symbol), variants, pos: decl.pos.clone() }
}

fn variant_shape_as_type(shape: &VariantShape) -> TypeExpression {
    match shape {
        VariantShape::Struct(s) => TypeExpression::Struct(s.clone()),
        VariantShape::Tuple(t) => TypeExpression::Tuple(t.clone()),
        VariantShape::Atom(a) => TypeExpression::Atom(a.clone()),
    }
}
