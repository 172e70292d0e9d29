//! The phase discipline (§3.3, §4.3.4): two independent classifiers layered
//! over the type system. [`ExpressionPhase`] classifies bindings and
//! expressions; [`FunctionPhase`] classifies functions and lambdas. The
//! phase algebra is deliberately *not* expressed as subtyping — it is a
//! parallel lattice kept separable from [`vela_checked_ir`](../vela_checked_ir)
//! type assignability.

use std::cmp::Ordering;

/// Reactivity classifier for a binding or expression. Increases in the
/// order `const < val < var < flow`. Only a *binding* may be `var`; every
/// checked expression node's phase is one of `const`, `val`, `flow`
/// (invariant 2, §3.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ExpressionPhase {
    Const,
    Val,
    Var,
    Flow,
}

impl ExpressionPhase {
    fn rank(self) -> u8 {
        match self {
            Self::Const => 0,
            Self::Val => 1,
            Self::Var => 2,
            Self::Flow => 3,
        }
    }

    /// Least upper bound on the `const <= val <= var <= flow` lattice.
    #[must_use]
    pub fn join(self, other: Self) -> Self {
        if self.rank() >= other.rank() {
            self
        } else {
            other
        }
    }

    /// Join over an iterator, defaulting to `const` for an empty sequence
    /// (the bottom of the lattice, matching an operand-less call or an
    /// empty collection literal).
    #[must_use]
    pub fn join_all(phases: impl IntoIterator<Item = Self>) -> Self {
        phases
            .into_iter()
            .fold(Self::Const, ExpressionPhase::join)
    }

    #[must_use]
    pub fn is_reactive(self) -> bool {
        matches!(self, Self::Var | Self::Flow)
    }
}

impl PartialOrd for ExpressionPhase {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.rank().cmp(&other.rank()))
    }
}

impl Ord for ExpressionPhase {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

/// Reactivity classifier for a function or lambda declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FunctionPhase {
    /// Pure: no reactive declarations, may not call `def` or `sig`.
    Fun,
    /// Declares reactive state: may read/create `var`/`flow`, may not
    /// reassign; its result behaves as `flow`.
    Def,
    /// External-event handler: may reassign `var`s; the only context in
    /// which reassignment is permitted; callable only from another `sig`
    /// or the runtime.
    Sig,
}

/// The operand-phase adjustment table (§4.3.4): given the parameter's
/// declared phase (`None` when the parameter leaves it unspecified) and the
/// phase the argument was elaborated with, returns the phase that argument
/// *contributes* to the call's combined operand phase, or `None` if the
/// combination is not permitted (a phase error at the argument's position).
///
/// `actual == Var` only arises for identifier/access-chain arguments passed
/// directly against a `var` parameter (§4.3.4); ordinary expression
/// elaboration never yields phase `Var` on its own (invariant 2, §3.4).
#[must_use]
pub fn adjust_operand_phase(expected: Option<ExpressionPhase>, actual: ExpressionPhase) -> Option<ExpressionPhase> {
    use ExpressionPhase::{Const, Flow, Val, Var};
    match (expected, actual) {
        (Some(Const), Const) => Some(Const),
        (Some(Const), _) => None,

        (Some(Val), Const | Val) => Some(Val),
        (Some(Val), _) => None,

        (Some(Flow), Const) => Some(Const),
        (Some(Flow), Val) => Some(Val),
        (Some(Flow), Var | Flow) => Some(Flow),

        (Some(Var), Var) => Some(Flow),
        (Some(Var), _) => None,

        (None, Const) => Some(Const),
        (None, Val) => Some(Val),
        (None, Var | Flow) => Some(Flow),
    }
}

/// Imposes the callee's function phase over the combined operand phase to
/// produce the phase of the call expression itself (§4.3.4):
/// `fun` passes the operand phase through, `def` always yields `flow`,
/// `sig` always yields `val` regardless of its operands.
#[must_use]
pub fn call_result_phase(function_phase: FunctionPhase, combined_operand_phase: ExpressionPhase) -> ExpressionPhase {
    match function_phase {
        FunctionPhase::Fun => combined_operand_phase,
        FunctionPhase::Def => ExpressionPhase::Flow,
        FunctionPhase::Sig => ExpressionPhase::Val,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ExpressionPhase::{Const, Flow, Val, Var};

    #[test]
    fn join_picks_the_more_reactive_operand() {
        assert_eq!(Const.join(Flow), Flow);
        assert_eq!(Val.join(Const), Val);
        assert_eq!(ExpressionPhase::join_all([Const, Val, Const]), Val);
        assert_eq!(ExpressionPhase::join_all(std::iter::empty()), Const);
    }

    #[test]
    fn unspecified_param_widens_var_to_flow() {
        assert_eq!(adjust_operand_phase(None, Var), Some(Flow));
        assert_eq!(adjust_operand_phase(None, Flow), Some(Flow));
        assert_eq!(adjust_operand_phase(None, Const), Some(Const));
    }

    #[test]
    fn const_param_rejects_anything_but_const() {
        assert_eq!(adjust_operand_phase(Some(Const), Const), Some(Const));
        assert_eq!(adjust_operand_phase(Some(Const), Val), None);
        assert_eq!(adjust_operand_phase(Some(Const), Flow), None);
    }

    #[test]
    fn var_param_demands_a_var_argument_and_yields_flow() {
        assert_eq!(adjust_operand_phase(Some(Var), Var), Some(Flow));
        assert_eq!(adjust_operand_phase(Some(Var), Const), None);
        assert_eq!(adjust_operand_phase(Some(Var), Flow), None);
    }

    #[test]
    fn flow_param_accepts_everything_and_reflects_reactivity() {
        assert_eq!(adjust_operand_phase(Some(Flow), Const), Some(Const));
        assert_eq!(adjust_operand_phase(Some(Flow), Val), Some(Val));
        assert_eq!(adjust_operand_phase(Some(Flow), Var), Some(Flow));
        assert_eq!(adjust_operand_phase(Some(Flow), Flow), Some(Flow));
    }

    #[test]
    fn function_phase_imposes_its_own_result_phase() {
        assert_eq!(call_result_phase(FunctionPhase::Fun, Val), Val);
        assert_eq!(call_result_phase(FunctionPhase::Def, Const), Flow);
        assert_eq!(call_result_phase(FunctionPhase::Sig, Flow), Val);
    }
}
