//! Per-file orchestration (§4.1, §4.3): checks every declaration of a
//! parsed file against its already-collected local scope and the global
//! package table, producing a fully elaborated [`vela_checked_ir::File`].
//!
//! Shape/type declarations (`data`, `enum`) and a function's own signature
//! are assumed already reflected in `global` by a prior symbol-collection
//! pass (`vela-binder`); this pass only re-derives and checks their bodies,
//! so a `fun` may freely call a sibling declared later in the same file.

use std::rc::Rc;

use vela_binder::LocalScope;
use vela_checked_ir::{CoreTypes, Declaration as CheckedDeclaration, File as CheckedFile, GlobalTable};
use vela_common::phase::FunctionPhase;
use vela_common::{Checked, Symbol};
use vela_parsed_ir::{Declaration as ParsedDeclaration, File as ParsedFile};

use crate::context::Checker;
use crate::declarations::{check_const_decl, check_data_decl, check_enum_decl, check_function_decl};
use crate::scope::{FunctionScope, Scope};

/// Checks every declaration in `file`, in source order. `locals` is the
/// flat short-name scope `vela_binder::collect_declarations` already built
/// for this file; `global` is the whole program's package table.
pub fn check_file(
    module: &Symbol,
    file: &ParsedFile,
    locals: &LocalScope,
    global: &GlobalTable,
    core: &CoreTypes,
) -> Checked<CheckedFile> {
    let checker = Checker::new(module, global, core, locals);
    let module_scope: Rc<Scope> = Scope::root(FunctionScope::new(module.clone(), FunctionPhase::Fun));

    let mut declarations = Vec::with_capacity(file.declarations.len());
    for decl in &file.declarations {
        let checked = match decl {
            ParsedDeclaration::Import(_) => continue,
            ParsedDeclaration::Data(data) => {
                CheckedDeclaration::Data(check_data_decl(&checker, module, data)?)
            }
            ParsedDeclaration::Enum(en) => CheckedDeclaration::Enum(check_enum_decl(&checker, module, en)?),
            ParsedDeclaration::Function(fun) => {
                CheckedDeclaration::Function(check_function_decl(&checker, &module_scope, fun)?)
            }
            ParsedDeclaration::Const(constant) => {
                CheckedDeclaration::Const(check_const_decl(&checker, &module_scope, constant)?)
            }
        };
        declarations.push(checked);
    }

    Ok(CheckedFile { module: module.clone(), declarations })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_common::phase::FunctionPhase as ParsedFunctionPhase;
    use vela_common::{PackageName, Position, Version};
    use vela_parsed_ir::{Expression as ParsedExpr, FunctionDecl, Literal};

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
    fn checks_every_non_import_declaration_in_order() {
        let module = module();
        let global = GlobalTable::default();
        let core = core();
        let locals = LocalScope::default();

        let file = ParsedFile {
            module: vec!["widgets".to_string()],
            declarations: vec![
                ParsedDeclaration::Function(FunctionDecl {
                    name: "always_true".to_string(),
                    access: None,
                    phase: ParsedFunctionPhase::Fun,
                    type_params: vec![],
                    params: vec![],
                    result: None,
                    body: ParsedExpr::Literal { value: Literal::Bool(true), pos: pos() },
                    pos: pos(),
                }),
            ],
            pos: pos(),
        };

        let checked = check_file(&module, &file, &locals, &global, &core).unwrap();
        assert_eq!(checked.declarations.len(), 1);
    }
}
