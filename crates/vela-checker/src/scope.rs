//! Lexical scoping for the checker (§4.3.1). A [`Scope`] is a linked stack
//! of binding frames; each frame points at the [`FunctionScope`] of its
//! nearest enclosing function, so a lookup that crosses a function boundary
//! can be recorded as a closure capture and phase-demoted if needed.

use rustc_hash::{FxHashMap, FxHashSet};
use std::cell::RefCell;
use std::rc::Rc;
use vela_checked_ir::TypeExpression;
use vela_common::phase::{ExpressionPhase, FunctionPhase};
use vela_common::Symbol;

/// One resolved name: its fully qualified symbol, declared type, and
/// expression phase at the point it was bound.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub symbol: Symbol,
    pub ty: TypeExpression,
    pub phase: ExpressionPhase,
}

/// Per-function bookkeeping that outlives any single block scope inside
/// that function's body: its declared result type (widened by every
/// `return`, §4.3.2), its function phase, and the set of outer names its
/// body closes over.
#[derive(Debug)]
pub struct FunctionScope {
    pub symbol: Symbol,
    pub phase: FunctionPhase,
    result_type: RefCell<TypeExpression>,
    closure: RefCell<FxHashSet<String>>,
}

impl FunctionScope {
    #[must_use]
    pub fn new(symbol: Symbol, phase: FunctionPhase) -> Rc<Self> {
        Rc::new(Self {
            symbol,
            phase,
            result_type: RefCell::new(TypeExpression::Nothing),
            closure: RefCell::new(FxHashSet::default()),
        })
    }

    #[must_use]
    pub fn result_type(&self) -> TypeExpression {
        self.result_type.borrow().clone()
    }

    /// Widens the declared result type by joining in `ty` — called once per
    /// `return` encountered while checking this function's body. Fails at
    /// `pos` if the two result types cannot be unified (§4.3.2, "Return").
    pub fn widen_result(&self, pos: &vela_common::Position, ty: TypeExpression) -> vela_common::Checked<()> {
        let mut current = self.result_type.borrow_mut();
        *current = crate::merge::merge_types(pos, &current, &ty)?;
        Ok(())
    }

    #[must_use]
    pub fn closure(&self) -> Vec<String> {
        let mut names: Vec<String> = self.closure.borrow().iter().cloned().collect();
        names.sort();
        names
    }

    fn record_capture(&self, name: &str) {
        self.closure.borrow_mut().insert(name.to_string());
    }
}

/// A linked stack of binding frames. Cloning is cheap (`Rc`); `child`
/// starts a nested block inside the same function, `enter_function` starts
/// a nested function (e.g. a lambda or nested `fun`/`def`/`sig`).
pub struct Scope {
    parent: Option<Rc<Scope>>,
    bindings: RefCell<FxHashMap<String, Binding>>,
    pub function: Rc<FunctionScope>,
}

impl Scope {
    #[must_use]
    pub fn root(function: Rc<FunctionScope>) -> Rc<Self> {
        Rc::new(Self {
            parent: None,
            bindings: RefCell::new(FxHashMap::default()),
            function,
        })
    }

    /// A nested block scope within the same function frame (e.g. entering
    /// an `if` branch or a `Block`).
    #[must_use]
    pub fn child(self: &Rc<Self>) -> Rc<Self> {
        Rc::new(Self {
            parent: Some(self.clone()),
            bindings: RefCell::new(FxHashMap::default()),
            function: self.function.clone(),
        })
    }

    /// A nested scope owned by a new function frame (lambda or nested
    /// function declaration); lookups from inside it that resolve to `self`
    /// or further out are closure captures of `function`.
    #[must_use]
    pub fn enter_function(self: &Rc<Self>, function: Rc<FunctionScope>) -> Rc<Self> {
        Rc::new(Self {
            parent: Some(self.clone()),
            bindings: RefCell::new(FxHashMap::default()),
            function,
        })
    }

    pub fn bind(&self, name: impl Into<String>, binding: Binding) {
        self.bindings.borrow_mut().insert(name.into(), binding);
    }

    /// Looks `name` up, walking outward. If found in a frame owned by a
    /// different function than `self`'s, the name is recorded as a closure
    /// capture of the current function, and — if the current function is
    /// `fun` — a captured `var`/`flow` binding is demoted to `val`: a `fun`
    /// only ever sees a reactive value as a snapshot (§4.3.1).
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Binding> {
        let mut frame = self;
        loop {
            if let Some(binding) = frame.bindings.borrow().get(name) {
                let crosses_function = !Rc::ptr_eq(&frame.function, &self.function);
                if crosses_function {
                    self.function.record_capture(name);
                }
                let phase = if crosses_function && self.function.phase == FunctionPhase::Fun {
                    binding.phase.min(ExpressionPhase::Val)
                } else {
                    binding.phase
                };
                return Some(Binding {
                    symbol: binding.symbol.clone(),
                    ty: binding.ty.clone(),
                    phase,
                });
            }
            frame = match &frame.parent {
                Some(parent) => parent,
                None => return None,
            };
        }
    }
}
