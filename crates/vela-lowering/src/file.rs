//! File-level lowering (§4.4): drives every declaration in a checked file
//! through the rewrite rules in [`crate::expr`]/[`crate::statements`]/
//! [`crate::decl`], then reads back which runtime entry points got used to
//! build the file's prelude.

use tracing::debug;
use vela_checked_ir::{Declaration as CheckedDeclaration, File as CheckedFile};
use vela_target_ir::{HostDeclaration, HostFile};

use crate::context::LoweringContext;
use crate::decl::{lower_const_decl, lower_data_decl, lower_enum_decl, lower_function_decl};

#[must_use]
pub fn lower_file(file: &CheckedFile) -> HostFile {
    let ctx = LoweringContext::new();
    let declarations = file.declarations.iter().map(|decl| lower_declaration(&ctx, decl)).collect();
    let prelude = ctx.runtime_uses();
    debug!(module = %file.module, declarations = declarations.len(), runtime_uses = prelude.len(), "lowered file");
    HostFile { prelude, declarations }
}

fn lower_declaration(ctx: &LoweringContext, decl: &CheckedDeclaration) -> HostDeclaration {
    match decl {
        CheckedDeclaration::Data(data) => HostDeclaration::Data(lower_data_decl(data)),
        CheckedDeclaration::Enum(en) => HostDeclaration::Enum(lower_enum_decl(en)),
        CheckedDeclaration::Function(fun) => HostDeclaration::Function(lower_function_decl(ctx, fun)),
        CheckedDeclaration::Const(constant) => HostDeclaration::Const(lower_const_decl(ctx, constant)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vela_checked_ir::types::{FunctionType, TypeExpression};
    use vela_checked_ir::{CoreTypes, Expression as CheckedExpr, FunctionDecl, FunctionParam, Typed};
    use vela_common::phase::{ExpressionPhase, FunctionPhase};
    use vela_common::{AccessLevel, PackageName, Position, Symbol, Version};
    use vela_parsed_ir::Literal;

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
    fn lowering_a_file_collects_the_prelude_from_every_declaration() {
        let core = core();
        let fun = FunctionDecl {
            symbol: module().child("id"),
            access: AccessLevel::Public,
            ty: TypeExpression::Function(Arc::new(FunctionType {
                phase: FunctionPhase::Sig,
                type_params: vec![],
                params: vec![FunctionParam {
                    name: "x".to_string(),
                    phase: None,
                    ty: core.int_type(),
                    pos: pos(),
                }],
                result: core.int_type(),
            })),
            params: vec![FunctionParam { name: "x".to_string(), phase: None, ty: core.int_type(), pos: pos() }],
            body: CheckedExpr::Identifier {
                symbol: module().child("id").child("x"),
                meta: Typed { ty: core.int_type(), phase: ExpressionPhase::Flow, pos: pos() },
            },
            pos: pos(),
        };
        let file = CheckedFile {
            module: module(),
            declarations: vec![CheckedDeclaration::Function(fun)],
        };
        let host = lower_file(&file);
        assert_eq!(host.prelude, vec!["get".to_string()]);
        assert_eq!(host.declarations.len(), 1);
    }
}
