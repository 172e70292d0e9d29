//! Shared fixtures for the end-to-end scenario tests in `tests/scenarios.rs`
//! (§8, S1-S7). Since the lexer/parser/AST are external collaborators
//! (§1), every scenario hand-builds its own `P-IR::File` the way every
//! other crate's own unit tests hand-build their input IRs; this crate only
//! factors out the handful of fixtures every scenario needs in common: a
//! `CoreTypes` instance, a small standard-library `GlobalTable` (`plus`,
//! `toString`, `core::list::get`, `core::list::map`), and a no-op
//! `DependencyManager` for the scenarios that don't exercise imports.

use std::sync::Arc;

use vela_binder::{type_parameter_symbol, DependencyManager};
use vela_checked_ir::types::{FunctionParamType, FunctionType, ModuleType, TypeExpression};
use vela_checked_ir::{AccessRecord, CoreTypes, GlobalTable};
use vela_common::collections::PersistentMap;
use vela_common::phase::FunctionPhase;
use vela_common::{AccessLevel, PackageName, Position, Preamble, Symbol, Version};
use vela_parsed_ir::ImportDecl;

/// No file in this crate's fixtures imports anything; every name a
/// scenario needs is already present in its [`preamble`].
pub struct NoDeps;

impl DependencyManager for NoDeps {
    fn breakdown_import(&self, _import: &ImportDecl) -> Vec<Symbol> {
        Vec::new()
    }
}

#[must_use]
pub fn pos() -> Position {
    Position::new("scenario.vl", 1, 1)
}

#[must_use]
pub fn app_module() -> Symbol {
    Symbol::top_level(PackageName::new("acme", "app", Version::new(1, 0, 0)), "app")
}

fn core_package() -> PackageName {
    PackageName::new("acme", "core", Version::new(1, 0, 0))
}

#[must_use]
pub fn core_types() -> CoreTypes {
    let pkg = core_package();
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

fn stdlib_package() -> PackageName {
    PackageName::new("acme", "stdlib", Version::new(1, 0, 0))
}

/// The fixed handful of library symbols the scenarios in `tests/scenarios.rs`
/// call: `plus`, `toString`, and `core::list::{get,map}` (§8, S1/S2/S4). All
/// four are registered `public`, since none of these scenarios exercises
/// the access predicate (that's S7's job, which builds its own table).
pub struct Library {
    pub plus: Symbol,
    pub to_string: Symbol,
    pub core_module: Symbol,
    pub list_module: Symbol,
    pub list_get: Symbol,
    pub list_map: Symbol,
    pub global: GlobalTable,
    pub preamble: Preamble,
}

#[must_use]
pub fn library(core: &CoreTypes) -> Library {
    let pkg = stdlib_package();
    let module = Symbol::top_level(pkg.clone(), "stdlib");

    let plus = Symbol::top_level(pkg.clone(), "plus");
    let plus_ty = TypeExpression::Function(Arc::new(FunctionType {
        phase: FunctionPhase::Fun,
        type_params: vec![],
        params: vec![
            FunctionParamType { phase: None, ty: core.int_type() },
            FunctionParamType { phase: None, ty: core.int_type() },
        ],
        result: core.int_type(),
    }));

    let to_string = Symbol::top_level(pkg.clone(), "toString");
    let to_string_ty = TypeExpression::Function(Arc::new(FunctionType {
        phase: FunctionPhase::Fun,
        type_params: vec![],
        params: vec![FunctionParamType { phase: None, ty: core.int_type() }],
        result: core.string_type(),
    }));

    let core_module = Symbol::top_level(pkg.clone(), "core");
    let core_module_ty = TypeExpression::Module(ModuleType { name: core_module.clone() });

    let list_module = core_module.child("list");
    let list_module_ty = TypeExpression::Module(ModuleType { name: list_module.clone() });

    let list_get = list_module.child("get");
    let get_t = type_parameter_symbol(&list_get, "T");
    let list_get_ty = TypeExpression::Function(Arc::new(FunctionType {
        phase: FunctionPhase::Fun,
        type_params: vec![vela_checked_ir::TypeParameterType { name: get_t.clone() }],
        params: vec![
            FunctionParamType {
                phase: None,
                ty: core.list_of(TypeExpression::TypeParameter(vela_checked_ir::TypeParameterType {
                    name: get_t.clone(),
                })),
            },
            FunctionParamType { phase: None, ty: core.int_type() },
        ],
        result: TypeExpression::TypeParameter(vela_checked_ir::TypeParameterType { name: get_t }),
    }));

    let list_map = list_module.child("map");
    let map_t = type_parameter_symbol(&list_map, "T");
    let map_u = type_parameter_symbol(&list_map, "U");
    let t_param = TypeExpression::TypeParameter(vela_checked_ir::TypeParameterType { name: map_t.clone() });
    let u_param = TypeExpression::TypeParameter(vela_checked_ir::TypeParameterType { name: map_u.clone() });
    let list_map_ty = TypeExpression::Function(Arc::new(FunctionType {
        phase: FunctionPhase::Fun,
        type_params: vec![
            vela_checked_ir::TypeParameterType { name: map_t },
            vela_checked_ir::TypeParameterType { name: map_u },
        ],
        params: vec![
            FunctionParamType { phase: None, ty: core.list_of(t_param.clone()) },
            FunctionParamType {
                phase: None,
                ty: TypeExpression::Function(Arc::new(FunctionType {
                    phase: FunctionPhase::Fun,
                    type_params: vec![],
                    params: vec![FunctionParamType { phase: None, ty: t_param }],
                    result: u_param.clone(),
                })),
            },
        ],
        result: core.list_of(u_param),
    }));

    let mut package_table = PersistentMap::new();
    for (symbol, ty) in [
        (plus.clone(), plus_ty),
        (to_string.clone(), to_string_ty),
        (core_module.clone(), core_module_ty),
        (list_module.clone(), list_module_ty),
        (list_get.clone(), list_get_ty),
        (list_map.clone(), list_map_ty),
    ] {
        package_table.insert(
            symbol.clone(),
            AccessRecord::new(AccessLevel::Public, symbol, module.clone(), ty),
        );
    }
    let mut global = GlobalTable::new();
    global.insert(pkg, package_table);

    let mut preamble = Preamble::new();
    preamble.insert("plus".to_string(), plus.clone());
    preamble.insert("toString".to_string(), to_string.clone());
    preamble.insert("core".to_string(), core_module.clone());

    Library {
        plus,
        to_string,
        core_module,
        list_module,
        list_get,
        list_map,
        global,
        preamble,
    }
}

/// Extends a [`Library`]'s preamble with this package's own `CoreTypes`
/// names (`Int`, `String`, ...), needed whenever a scenario writes a
/// `ParsedType::Named` (e.g. a declared result type or a lambda parameter
/// annotation) rather than only relying on inferred types.
#[must_use]
pub fn preamble_with_core_names(library: &Library, core: &CoreTypes) -> Preamble {
    let mut preamble = library.preamble.clone();
    preamble.insert("Int".to_string(), core.int.clone());
    preamble.insert("Float".to_string(), core.float.clone());
    preamble.insert("String".to_string(), core.string.clone());
    preamble.insert("Boolean".to_string(), core.boolean.clone());
    preamble.insert("Unit".to_string(), core.unit.clone());
    preamble.insert("List".to_string(), core.list.clone());
    preamble
}
