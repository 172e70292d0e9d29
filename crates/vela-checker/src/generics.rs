//! Generic inference (§4.3.3): recovering type-parameter bindings from the
//! parallel structure of an expected and an actual type, then reducing and
//! defaulting them into a [`Substitution`].

use rustc_hash::{FxHashMap, FxHashSet};
use vela_checked_ir::{Substitution, TypeExpression};
use vela_common::{Checked, Position, Symbol};

/// The set of type-parameter symbols a call site is trying to solve for —
/// typically a function declaration's own `type_params`.
pub type ExpectedGenerics = FxHashSet<Symbol>;

/// Raw, unreduced constraints gathered while walking expected/actual type
/// pairs: each type parameter may be constrained more than once (e.g. once
/// per argument that mentions it).
#[derive(Debug, Default)]
pub struct Constraints {
    by_symbol: FxHashMap<Symbol, Vec<TypeExpression>>,
}

impl Constraints {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks `expected` and `actual` in parallel, recording a constraint
    /// whenever `expected` is a type parameter in `generics` (§4.3.3, step
    /// 1). Struct/tuple fields are not descended into — only the shapes
    /// that appear directly in parameter/argument position (parameterized
    /// types and function types) carry generics in this language.
    pub fn record(&mut self, expected: &TypeExpression, actual: &TypeExpression, generics: &ExpectedGenerics) {
        match expected {
            TypeExpression::TypeParameter(tp) if generics.contains(&tp.name) => {
                self.by_symbol.entry(tp.name.clone()).or_default().push(actual.clone());
            }
            TypeExpression::Parameterized(e) => {
                if let TypeExpression::Parameterized(a) = actual {
                    for (e_arg, a_arg) in e.args.iter().zip(&a.args) {
                        self.record(e_arg, a_arg, generics);
                    }
                }
            }
            TypeExpression::Function(e) => {
                if let TypeExpression::Function(a) = actual {
                    for (ep, ap) in e.params.iter().zip(&a.params) {
                        self.record(&ep.ty, &ap.ty, generics);
                    }
                    self.record(&e.result, &a.result, generics);
                }
            }
            _ => {}
        }
    }

    /// Reduces every symbol's accumulated constraints by the join rule
    /// (§4.3.3, step 2), then defaults every expected generic this pass
    /// never saw to `Nothing` (§4.3.3, step 4; §3.4 invariant, "unresolved
    /// generic is filled with Nothing").
    pub fn reduce(self, pos: &Position, generics: &ExpectedGenerics) -> Checked<Substitution> {
        self.snapshot(pos, generics)
    }

    /// Same reduction as [`Self::reduce`] but non-consuming, for use
    /// mid-call when later arguments (lambdas) still need to record further
    /// constraints against the partial result (§4.3.3, step 3: lambda
    /// arguments are elaborated after their non-lambda siblings, against
    /// whatever generics those siblings already pinned down).
    pub fn snapshot(&self, pos: &Position, generics: &ExpectedGenerics) -> Checked<Substitution> {
        let mut substitution = Substitution::default();
        for (symbol, types) in &self.by_symbol {
            let mut joined = TypeExpression::Nothing;
            for ty in types {
                joined = crate::merge::merge_types(pos, &joined, ty)?;
            }
            substitution.insert(symbol.clone(), joined);
        }
        for symbol in generics {
            substitution.entry(symbol.clone()).or_insert(TypeExpression::Nothing);
        }
        Ok(substitution)
    }
}
