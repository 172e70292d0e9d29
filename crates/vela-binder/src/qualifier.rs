//! `Qualifier.checkTypeExpression` (§4.1): resolves a parser-written type
//! expression against a file's local scope and a declaration's own
//! type-parameter scope, producing a checked [`TypeExpression`].

use crate::collector::LocalScope;
use rustc_hash::FxHashMap;
use vela_checked_ir::{FunctionParamType, FunctionType, TypeExpression, TypeParameterType};
use vela_common::{Checked, Symbol};
use vela_parsed_ir::ParsedType;

/// Maps a generic declaration's own type-parameter names to the symbols
/// that identify them — scoped to that declaration, not the whole file.
pub type TypeParamScope = FxHashMap<String, Symbol>;

/// Synthesizes the symbol identifying a type parameter declared on `owner`.
/// Kept distinct from ordinary child symbols (`#` cannot appear in a source
/// identifier) so a type parameter can never collide with a real member.
#[must_use]
pub fn type_parameter_symbol(owner: &Symbol, name: &str) -> Symbol {
    owner.child(format!("#{name}"))
}

/// Resolves every name in `parsed` against `scope` (ordinary nominal
/// lookups) and `type_params` (this declaration's own generic parameters,
/// which shadow any same-named scope entry). Instantiates parameterized
/// types by qualifying each argument recursively, and preserves function
/// shapes verbatim (just qualifying their parts).
pub fn check_type_expression(
    parsed: &ParsedType,
    scope: &LocalScope,
    type_params: &TypeParamScope,
) -> Checked<TypeExpression> {
    match parsed {
        ParsedType::Named { path, args, pos } => {
            let base = resolve_path(path, scope, type_params, pos)?;
            if let TypeExpression::TypeParameter(param) = &base {
                if !args.is_empty() {
                    return Err(pos.fail(format!(
                        "type parameter `{}` cannot take type arguments",
                        param.name.name()
                    )));
                }
                return Ok(base);
            }
            if args.is_empty() {
                return Ok(base);
            }
            let base_symbol = base
                .name()
                .cloned()
                .ok_or_else(|| pos.fail("only a nominal type can take type arguments"))?;
            let checked_args = args
                .iter()
                .map(|arg| check_type_expression(arg, scope, type_params))
                .collect::<Checked<Vec<_>>>()?;
            Ok(TypeExpression::parameterized(base_symbol, checked_args))
        }
        ParsedType::Function {
            phase,
            type_params: own_params,
            params,
            result,
            pos: _,
        } => {
            // A function type's own `type_params` (if it introduces any,
            // e.g. a generic lambda type) shadow the enclosing scope.
            let mut nested = type_params.clone();
            let mut checked_type_params = Vec::with_capacity(own_params.len());
            for name in own_params {
                // Function-type type parameters aren't owned by a
                // declaration symbol; anchor them to a synthetic local
                // root so each still gets a stable, unique identity.
                let synthetic_owner = scope
                    .values()
                    .next()
                    .cloned()
                    .unwrap_or_else(|| Symbol::top_level(dummy_package(), "$anon"));
                let symbol = type_parameter_symbol(&synthetic_owner, name);
                nested.insert(name.clone(), symbol.clone());
                checked_type_params.push(TypeParameterType { name: symbol });
            }
            let checked_params = params
                .iter()
                .map(|p| {
                    Ok(FunctionParamType {
                        phase: p.phase,
                        ty: check_type_expression(&p.ty, scope, &nested)?,
                    })
                })
                .collect::<Checked<Vec<_>>>()?;
            let checked_result = check_type_expression(result, scope, &nested)?;
            Ok(TypeExpression::Function(std::sync::Arc::new(
                FunctionType {
                    phase: *phase,
                    type_params: checked_type_params,
                    params: checked_params,
                    result: checked_result,
                },
            )))
        }
    }
}

fn resolve_path(
    path: &[String],
    scope: &LocalScope,
    type_params: &TypeParamScope,
    pos: &vela_common::Position,
) -> Checked<TypeExpression> {
    let head = path.first().ok_or_else(|| pos.fail("empty type path"))?;
    if let Some(symbol) = type_params.get(head) {
        if path.len() > 1 {
            return Err(pos.fail(format!(
                "type parameter `{head}` cannot be qualified further"
            )));
        }
        return Ok(TypeExpression::TypeParameter(TypeParameterType {
            name: symbol.clone(),
        }));
    }
    let mut symbol = scope
        .get(head)
        .cloned()
        .ok_or_else(|| pos.fail(format!("unknown type `{head}`")))?;
    for segment in &path[1..] {
        symbol = symbol.child(segment);
    }
    Ok(TypeExpression::nominal(symbol))
}

fn dummy_package() -> vela_common::PackageName {
    vela_common::PackageName::new("vela", "anon", vela_common::Version::new(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_common::{PackageName, Position, Version};

    fn pos() -> Position {
        Position::new("x.vl", 1, 1)
    }

    fn scope_with(name: &str, symbol: Symbol) -> LocalScope {
        let mut scope = LocalScope::default();
        scope.insert(name.to_string(), symbol);
        scope
    }

    #[test]
    fn resolves_a_bare_nominal_name() {
        let package = PackageName::new("acme", "core", Version::new(1, 0, 0));
        let int_symbol = Symbol::top_level(package, "Int");
        let scope = scope_with("Int", int_symbol.clone());
        let parsed = ParsedType::Named {
            path: vec!["Int".to_string()],
            args: vec![],
            pos: pos(),
        };
        let checked = check_type_expression(&parsed, &scope, &TypeParamScope::default()).unwrap();
        assert_eq!(checked, TypeExpression::nominal(int_symbol));
    }

    #[test]
    fn unknown_name_fails() {
        let parsed = ParsedType::Named {
            path: vec!["Missing".to_string()],
            args: vec![],
            pos: pos(),
        };
        let err = check_type_expression(&parsed, &LocalScope::default(), &TypeParamScope::default())
            .unwrap_err();
        assert!(err.message.contains("Missing"));
    }

    #[test]
    fn type_parameter_shadows_scope_and_rejects_arguments() {
        let package = PackageName::new("acme", "core", Version::new(1, 0, 0));
        let owner = Symbol::top_level(package, "map");
        let t_symbol = type_parameter_symbol(&owner, "T");
        let mut type_params = TypeParamScope::default();
        type_params.insert("T".to_string(), t_symbol.clone());

        let parsed = ParsedType::Named {
            path: vec!["T".to_string()],
            args: vec![],
            pos: pos(),
        };
        let checked =
            check_type_expression(&parsed, &LocalScope::default(), &type_params).unwrap();
        assert_eq!(
            checked,
            TypeExpression::TypeParameter(TypeParameterType { name: t_symbol })
        );

        let with_args = ParsedType::Named {
            path: vec!["T".to_string()],
            args: vec![ParsedType::Named {
                path: vec!["Int".to_string()],
                args: vec![],
                pos: pos(),
            }],
            pos: pos(),
        };
        assert!(check_type_expression(&with_args, &LocalScope::default(), &type_params).is_err());
    }

    #[test]
    fn instantiates_a_parameterized_type() {
        let package = PackageName::new("acme", "core", Version::new(1, 0, 0));
        let list_symbol = Symbol::top_level(package.clone(), "List");
        let int_symbol = Symbol::top_level(package, "Int");
        let mut scope = scope_with("List", list_symbol.clone());
        scope.insert("Int".to_string(), int_symbol.clone());

        let parsed = ParsedType::Named {
            path: vec!["List".to_string()],
            args: vec![ParsedType::Named {
                path: vec!["Int".to_string()],
                args: vec![],
                pos: pos(),
            }],
            pos: pos(),
        };
        let checked = check_type_expression(&parsed, &scope, &TypeParamScope::default()).unwrap();
        assert_eq!(
            checked,
            TypeExpression::parameterized(list_symbol, vec![TypeExpression::nominal(int_symbol)])
        );
    }
}
