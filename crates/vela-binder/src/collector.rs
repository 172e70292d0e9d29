//! `collectDeclarations` (§4.1): builds the flat local-scope map from a
//! file's own declarations, its imports, and the preamble.

use crate::dependency_manager::DependencyManager;
use rustc_hash::FxHashMap;
use tracing::debug;
use vela_common::{Checked, Position, Preamble, Symbol};
use vela_parsed_ir::{Declaration, File};

/// The short-name scope produced by symbol collection: what a bare
/// identifier at the top of a file's body resolves to.
pub type LocalScope = FxHashMap<String, Symbol>;

/// Scans every top-level declaration and every import of `file`, producing
/// a flat map from short name to fully qualified [`Symbol`].
///
/// Precedence, low to high: preamble, then imports, then the file's own
/// declarations — an explicit import shadows the preamble, and a locally
/// declared name shadows an import of the same short name (first-class
/// declarations always win in their own file). Calling this twice on the
/// same inputs yields an identical map, since it performs no mutation
/// beyond building the returned map (§8, invariant 2).
pub fn collect_declarations(
    module: &Symbol,
    file: &File,
    deps: &dyn DependencyManager,
    preamble: &Preamble,
) -> Checked<LocalScope> {
    let mut scope: LocalScope = FxHashMap::default();

    for (short_name, symbol) in preamble.iter() {
        scope.insert(short_name.clone(), symbol.clone());
    }

    for decl in &file.declarations {
        if let Declaration::Import(import) = decl {
            for symbol in deps.breakdown_import(import) {
                scope.insert(symbol.name().to_string(), symbol);
            }
        }
    }

    for decl in &file.declarations {
        if let Some(name) = decl.name() {
            scope.insert(name.to_string(), module.child(name));
        }
    }

    debug!(module = %module, bindings = scope.len(), "collected file scope");
    Ok(scope)
}

/// Resolves a short name against a collected scope, failing at `pos` if
/// absent (§4.2, "unknown name").
pub fn resolve_short_name(scope: &LocalScope, name: &str, pos: &Position) -> Checked<Symbol> {
    scope
        .get(name)
        .cloned()
        .ok_or_else(|| pos.fail(format!("unknown name `{name}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_common::{PackageName, Version};
    use vela_parsed_ir::{ConstDecl, Expression, ImportDecl, ImportSpec, Literal};

    struct NoDeps;
    impl DependencyManager for NoDeps {
        fn breakdown_import(&self, _import: &ImportDecl) -> Vec<Symbol> {
            Vec::new()
        }
    }

    struct FlatteningDeps {
        package: PackageName,
    }
    impl DependencyManager for FlatteningDeps {
        fn breakdown_import(&self, import: &ImportDecl) -> Vec<Symbol> {
            import
                .flatten()
                .into_iter()
                .map(|segments| Symbol::new(self.package.clone(), segments))
                .collect()
        }
    }

    fn package() -> PackageName {
        PackageName::new("acme", "widgets", Version::new(1, 0, 0))
    }

    fn pos() -> Position {
        Position::new("x.vl", 1, 1)
    }

    #[test]
    fn own_declarations_are_scoped_by_module_child() {
        let module = Symbol::top_level(package(), "widgets");
        let file = File {
            module: vec!["widgets".to_string()],
            declarations: vec![Declaration::Const(ConstDecl {
                name: "PI".to_string(),
                access: None,
                ty: None,
                value: Expression::Literal {
                    value: Literal::Float(3.14),
                    pos: pos(),
                },
                pos: pos(),
            })],
            pos: pos(),
        };
        let preamble = Preamble::new();
        let scope = collect_declarations(&module, &file, &NoDeps, &preamble).unwrap();
        assert_eq!(scope.get("PI"), Some(&module.child("PI")));
    }

    #[test]
    fn imports_shadow_the_preamble_and_declarations_shadow_imports() {
        let module = Symbol::top_level(package(), "widgets");
        let deps = FlatteningDeps { package: package() };
        let import = ImportDecl {
            path: vec!["other".to_string()],
            specs: vec![ImportSpec::Name("Widget".to_string())],
            pos: pos(),
        };
        let file = File {
            module: vec!["widgets".to_string()],
            declarations: vec![
                Declaration::Import(import),
                Declaration::Const(ConstDecl {
                    name: "Widget".to_string(),
                    access: None,
                    ty: None,
                    value: Expression::Literal {
                        value: Literal::Bool(true),
                        pos: pos(),
                    },
                    pos: pos(),
                }),
            ],
            pos: pos(),
        };
        let mut preamble = Preamble::new();
        preamble.insert(
            "Widget".to_string(),
            Symbol::top_level(package(), "PreambleWidget"),
        );
        let scope = collect_declarations(&module, &file, &deps, &preamble).unwrap();
        assert_eq!(scope.get("Widget"), Some(&module.child("Widget")));
    }

    #[test]
    fn is_idempotent() {
        let module = Symbol::top_level(package(), "widgets");
        let file = File {
            module: vec!["widgets".to_string()],
            declarations: Vec::new(),
            pos: pos(),
        };
        let preamble = Preamble::new();
        let first = collect_declarations(&module, &file, &NoDeps, &preamble).unwrap();
        let second = collect_declarations(&module, &file, &NoDeps, &preamble).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_name_fails_at_position() {
        let scope: LocalScope = FxHashMap::default();
        let err = resolve_short_name(&scope, "Missing", &pos()).unwrap_err();
        assert!(err.message.contains("Missing"));
    }
}
