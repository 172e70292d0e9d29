//! The import verifier (§4.2): every import must resolve against the
//! global package table, and the access predicate must permit the
//! importing module to see it.

use tracing::trace;
use vela_checked_ir::GlobalTable;
use vela_common::{AccessLevel, Checked, Symbol};
use vela_parsed_ir::ImportDecl;

use crate::dependency_manager::DependencyManager;

/// Verifies one import declaration from module `from`, returning the
/// access records it resolved to (in breakdown order) once every candidate
/// symbol both exists and is visible to `from`.
pub fn verify_import(
    from: &Symbol,
    import: &ImportDecl,
    deps: &dyn DependencyManager,
    global: &GlobalTable,
) -> Checked<Vec<vela_checked_ir::AccessRecord>> {
    deps.breakdown_import(import)
        .into_iter()
        .map(|candidate| verify_symbol(from, &candidate, global, &import.pos))
        .collect()
}

fn verify_symbol(
    from: &Symbol,
    candidate: &Symbol,
    global: &GlobalTable,
    pos: &vela_common::Position,
) -> Checked<vela_checked_ir::AccessRecord> {
    let package_table = global.get(candidate.package()).ok_or_else(|| {
        pos.fail(format!(
            "unknown package `{}` imported by `{from}`",
            candidate.package()
        ))
    })?;
    let record = package_table
        .get(candidate)
        .ok_or_else(|| pos.fail(format!("unknown import `{candidate}`")))?;

    if !record.access.permits(from, &record.module) {
        return Err(pos.fail(format!(
            "`{from}` may not import `{candidate}`: {} access denies it",
            access_name(record.access)
        )));
    }
    trace!(%from, %candidate, access = %access_name(record.access), "import verified");
    Ok(record.clone())
}

fn access_name(access: AccessLevel) -> &'static str {
    match access {
        AccessLevel::Private => "private",
        AccessLevel::Protected => "protected",
        AccessLevel::Package => "package",
        AccessLevel::Internal => "internal",
        AccessLevel::Public => "public",
    }
}
