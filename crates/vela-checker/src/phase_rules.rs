//! Function-declaration side-conditions (§4.3.4): the per-phase rules that
//! constrain what a `fun`/`def`/`sig` body may declare, and what phases its
//! parameters may carry. Violating one of these raises a
//! [`DiagnosticKind::Phase`](vela_common::DiagnosticKind::Phase) diagnostic.

use vela_common::phase::{ExpressionPhase, FunctionPhase};
use vela_common::{Checked, Diagnostic, Position};

/// Is a `let` of phase `phase` permitted inside a body whose function phase
/// is `function_phase`?
///
/// - `fun` may not declare `var` or `flow` (pure: no reactive declarations).
/// - `def` may declare anything.
/// - `sig` may not declare `var` or `flow` (it only ever reassigns an
///   existing one).
pub fn check_let_phase(
    pos: &Position,
    function_phase: FunctionPhase,
    phase: ExpressionPhase,
) -> Checked<()> {
    match function_phase {
        FunctionPhase::Fun if phase.is_reactive() => Err(Diagnostic::phase_error(
            pos.clone(),
            format!("a `fun` may not declare a `{phase:?}` binding"),
        )),
        FunctionPhase::Sig if phase.is_reactive() => Err(Diagnostic::phase_error(
            pos.clone(),
            format!("a `sig` may not declare a `{phase:?}` binding, only reassign one"),
        )),
        _ => Ok(()),
    }
}

/// Is a reassignment permitted inside a body whose function phase is
/// `function_phase`? Only `sig` bodies may reassign a `var` (§4.3.5).
pub fn check_reassignment_phase(pos: &Position, function_phase: FunctionPhase) -> Checked<()> {
    if function_phase == FunctionPhase::Sig {
        Ok(())
    } else {
        Err(Diagnostic::phase_error(
            pos.clone(),
            "reassignment is only permitted inside a `sig` function",
        ))
    }
}

/// Is a parameter of declared phase `param_phase` permitted on a function
/// of phase `function_phase`?
///
/// - `fun` parameters must be `const`/`val`.
/// - `sig` parameters may not be `flow` (a `dyn`/`flow` parameter is
///   rejected outright — see §4.3.4).
/// - `def` has no restriction here.
pub fn check_param_phase(
    pos: &Position,
    function_phase: FunctionPhase,
    param_phase: Option<ExpressionPhase>,
) -> Checked<()> {
    match (function_phase, param_phase) {
        (FunctionPhase::Fun, Some(phase)) if phase.is_reactive() => Err(Diagnostic::phase_error(
            pos.clone(),
            format!("a `fun`'s parameters must be `const`/`val`, found `{phase:?}`"),
        )),
        (FunctionPhase::Sig, Some(ExpressionPhase::Flow)) => Err(Diagnostic::phase_error(
            pos.clone(),
            "a `sig` may not accept a `flow` parameter",
        )),
        _ => Ok(()),
    }
}

/// Is a call from a body whose function phase is `caller_phase` permitted
/// to target a callee of function phase `callee_phase` (§3.3)?
///
/// - `fun` may not call `def` or `sig`.
/// - `sig` may only be called from another `sig` (the runtime's own calls
///   into a `sig` never go through this check).
pub fn check_call_phase(
    pos: &Position,
    caller_phase: FunctionPhase,
    callee_phase: FunctionPhase,
) -> Checked<()> {
    if caller_phase == FunctionPhase::Fun && callee_phase != FunctionPhase::Fun {
        return Err(Diagnostic::phase_error(
            pos.clone(),
            format!("a `fun` may not call a `{callee_phase:?}` function"),
        ));
    }
    if callee_phase == FunctionPhase::Sig && caller_phase != FunctionPhase::Sig {
        return Err(Diagnostic::phase_error(
            pos.clone(),
            "a `sig` may only be called from another `sig`",
        ));
    }
    Ok(())
}
