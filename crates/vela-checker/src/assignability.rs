//! `checkAssignable` (§4.3.2): structural assignability between two checked
//! type expressions.

use vela_checked_ir::TypeExpression;

/// Is a value of type `from` usable wherever `to` is expected?
///
/// - Exact equality always holds.
/// - `Nothing` is bottom: assignable to everything.
/// - A type parameter unifies with anything (bounds are a reserved
///   extension point, §9 open questions).
/// - Function types require equal phase, equal arity, equal parameter
///   phases, covariant parameter types, and contravariant result types —
///   both directions the reverse of standard function subtyping. The
///   source this was distilled from writes both checks backwards, so this
///   follows it verbatim rather than "fixing" it into the usual
///   covariant-result/contravariant-parameter convention.
/// - Parameterized types require the same base and pointwise-assignable
///   arguments.
/// - An enum variant assigns to its parent `EnumType`.
#[must_use]
pub fn is_assignable(from: &TypeExpression, to: &TypeExpression) -> bool {
    if from == to {
        return true;
    }
    match (from, to) {
        (TypeExpression::Nothing, _) => true,
        (_, TypeExpression::TypeParameter(_)) | (TypeExpression::TypeParameter(_), _) => true,
        (TypeExpression::Function(from_fn), TypeExpression::Function(to_fn)) => {
            from_fn.phase == to_fn.phase
                && from_fn.params.len() == to_fn.params.len()
                && is_assignable(&to_fn.result, &from_fn.result)
                && from_fn
                    .params
                    .iter()
                    .zip(&to_fn.params)
                    .all(|(f, t)| f.phase == t.phase && is_assignable(&f.ty, &t.ty))
        }
        (TypeExpression::Parameterized(from_p), TypeExpression::Parameterized(to_p)) => {
            from_p.base == to_p.base
                && from_p.args.len() == to_p.args.len()
                && from_p
                    .args
                    .iter()
                    .zip(&to_p.args)
                    .all(|(f, t)| is_assignable(f, t))
        }
        (TypeExpression::Struct(s), TypeExpression::Enum(_)) => {
            s.enum_parent.as_ref().is_some_and(|parent| to.name() == Some(parent))
        }
        (TypeExpression::Tuple(t), TypeExpression::Enum(_)) => {
            t.enum_parent.as_ref().is_some_and(|parent| to.name() == Some(parent))
        }
        (TypeExpression::Atom(a), TypeExpression::Enum(_)) => {
            a.enum_parent.as_ref().is_some_and(|parent| to.name() == Some(parent))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vela_checked_ir::{AtomType, EnumType, FunctionParamType, FunctionType};
    use vela_common::collections::OrderedMap;
    use vela_common::phase::{ExpressionPhase, FunctionPhase};
    use vela_common::{PackageName, Symbol, Version};

    fn symbol(name: &str) -> Symbol {
        Symbol::top_level(PackageName::new("acme", "core", Version::new(1, 0, 0)), name)
    }

    #[test]
    fn nothing_is_assignable_to_anything() {
        assert!(is_assignable(&TypeExpression::Nothing, &TypeExpression::nominal(symbol("Int"))));
    }

    #[test]
    fn type_parameters_unify_with_anything() {
        let tp = TypeExpression::TypeParameter(vela_checked_ir::TypeParameterType { name: symbol("T") });
        assert!(is_assignable(&tp, &TypeExpression::nominal(symbol("Int"))));
        assert!(is_assignable(&TypeExpression::nominal(symbol("Int")), &tp));
    }

    fn shape_and_circle() -> (TypeExpression, TypeExpression) {
        let parent = symbol("Shape");
        let variant = TypeExpression::Atom(Arc::new(AtomType {
            name: symbol("Circle"),
            type_params: vec![],
            enum_parent: Some(parent.clone()),
        }));
        let enum_ty = TypeExpression::Enum(Arc::new(EnumType {
            name: parent,
            type_params: vec![],
            variants: OrderedMap::new(),
        }));
        (variant, enum_ty)
    }

    #[test]
    fn function_result_assignability_is_contravariant() {
        let (circle, shape) = shape_and_circle();
        // `Circle` assigns to `Shape` but not the reverse, so this pair
        // discriminates the two possible directions instead of passing
        // vacuously for an unrelated pair of nominal types.
        let from = TypeExpression::Function(Arc::new(FunctionType {
            phase: FunctionPhase::Fun,
            type_params: vec![],
            params: vec![],
            result: shape.clone(),
        }));
        let to = TypeExpression::Function(Arc::new(FunctionType {
            phase: FunctionPhase::Fun,
            type_params: vec![],
            params: vec![],
            result: circle.clone(),
        }));
        // Contravariant result (preserved verbatim, §9): `from` assigns to
        // `to` because `to.result` (`Circle`) assigns to `from.result`
        // (`Shape`).
        assert!(is_assignable(&from, &to));
        // The reverse has no such relationship (`Shape` does not assign to
        // `Circle`), so it must fail.
        assert!(!is_assignable(&to, &from));
    }

    #[test]
    fn function_parameter_assignability_is_covariant() {
        let (circle, shape) = shape_and_circle();
        let from = TypeExpression::Function(Arc::new(FunctionType {
            phase: FunctionPhase::Fun,
            type_params: vec![],
            params: vec![FunctionParamType { phase: None, ty: circle }],
            result: TypeExpression::Nothing,
        }));
        let to = TypeExpression::Function(Arc::new(FunctionType {
            phase: FunctionPhase::Fun,
            type_params: vec![],
            params: vec![FunctionParamType { phase: None, ty: shape }],
            result: TypeExpression::Nothing,
        }));
        // Covariant parameters (preserved verbatim, §9): `from` assigns to
        // `to` because `from`'s param (`Circle`) assigns to `to`'s param
        // (`Shape`).
        assert!(is_assignable(&from, &to));
        // The reverse does not hold (`Shape` does not assign to `Circle`).
        assert!(!is_assignable(&to, &from));
    }

    #[test]
    fn variant_assigns_to_its_enum_parent() {
        let parent = symbol("Shape");
        let variant = TypeExpression::Atom(Arc::new(AtomType {
            name: symbol("Circle"),
            type_params: vec![],
            enum_parent: Some(parent.clone()),
        }));
        let enum_ty = TypeExpression::Enum(Arc::new(EnumType {
            name: parent,
            type_params: vec![],
            variants: OrderedMap::new(),
        }));
        assert!(is_assignable(&variant, &enum_ty));
    }
}
