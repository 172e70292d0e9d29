//! Overload resolution (§4.3.2, "Call"): branches are tried in declaration
//! order and the first one that type-checks wins. Overload branches never
//! carry their own generics (§3.4 invariant 5), so there is no unification
//! step here — just first-match dispatch.

use vela_checked_ir::FunctionType;
use vela_common::{Checked, Position};

/// Tries each branch of an [`OverloadFunctionType`](vela_checked_ir::OverloadFunctionType)
/// in order via `try_branch`, which elaborates the call against that
/// branch's parameter types (each branch gets its own expected types for
/// lambda arguments, per §4.3.2) and either succeeds or reports why that
/// branch doesn't apply. Returns the first success; if every branch fails,
/// reports a generic "no overload matches" diagnostic at `pos` rather than
/// picking one branch's failure to surface (no branch is more "correct"
/// than another to blame).
pub fn resolve_overload<F, T>(pos: &Position, branches: &[FunctionType], mut try_branch: F) -> Checked<T>
where
    F: FnMut(&FunctionType) -> Checked<T>,
{
    for branch in branches {
        if let Ok(result) = try_branch(branch) {
            return Ok(result);
        }
    }
    Err(pos.fail(format!(
        "no overload branch matches the given arguments ({} candidates)",
        branches.len()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_checked_ir::TypeExpression;
    use vela_common::phase::FunctionPhase;

    fn branch(param_count: usize) -> FunctionType {
        FunctionType {
            phase: FunctionPhase::Fun,
            type_params: vec![],
            params: (0..param_count)
                .map(|_| vela_checked_ir::FunctionParamType {
                    phase: None,
                    ty: TypeExpression::Nothing,
                })
                .collect(),
            result: TypeExpression::Nothing,
        }
    }

    #[test]
    fn picks_the_first_branch_whose_arity_matches() {
        let branches = vec![branch(1), branch(2)];
        let pos = Position::new("x.vl", 1, 1);
        let winner = resolve_overload(&pos, &branches, |b| {
            if b.params.len() == 2 {
                Ok(b.params.len())
            } else {
                Err(pos.fail("arity mismatch"))
            }
        })
        .unwrap();
        assert_eq!(winner, 2);
    }

    #[test]
    fn reports_failure_when_no_branch_matches() {
        let branches = vec![branch(1)];
        let pos = Position::new("x.vl", 1, 1);
        let result: Checked<()> = resolve_overload(&pos, &branches, |_| Err(pos.fail("never matches")));
        assert!(result.is_err());
    }
}
