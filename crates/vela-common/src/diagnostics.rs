//! Diagnostics raised by the binder, checker and lowering passes.
//!
//! Every diagnostic in this family is fail-fast (§7 of the design notes):
//! there is no recovery, no multi-error accumulation, and no suppression.
//! The first diagnostic raised aborts the enclosing file's compilation.

use crate::position::Position;
use std::fmt;

/// Coarse classification of why a diagnostic was raised. Does not affect
/// propagation (everything aborts the same way); it exists so the CLI-level
/// caller that ultimately reports the diagnostic can group or format by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DiagnosticKind {
    /// Unknown name, unknown import symbol, access denied, unknown field,
    /// unknown generic parameter.
    Resolution,
    /// Mismatch, arity mismatch, wrong number of type arguments,
    /// non-callable, non-constructible, no overload branch matches.
    Type,
    /// Reactive declaration in a `fun`, reassignment outside a `sig`,
    /// reassignment of a non-`var`, passing a non-`var` where `var` is
    /// required, capturing a higher-reactivity binding from a
    /// lower-reactivity context, declared phase disagrees with the body.
    Phase,
    /// Should-never-happen paths: the collector missed a symbol the
    /// checker needed, or similar internal bookkeeping failure.
    Internal,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Resolution => "resolution error",
            Self::Type => "type error",
            Self::Phase => "phase error",
            Self::Internal => "internal error",
        };
        f.write_str(s)
    }
}

/// A single fail-fast diagnostic: a position and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Diagnostic {
    pub position: Position,
    pub message: String,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    #[must_use]
    pub fn new(position: Position, message: String) -> Self {
        Self {
            position,
            message,
            kind: DiagnosticKind::Internal,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: DiagnosticKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn resolution(position: Position, message: impl Into<String>) -> Self {
        Self::new(position, message.into()).with_kind(DiagnosticKind::Resolution)
    }

    #[must_use]
    pub fn type_error(position: Position, message: impl Into<String>) -> Self {
        Self::new(position, message.into()).with_kind(DiagnosticKind::Type)
    }

    #[must_use]
    pub fn phase_error(position: Position, message: impl Into<String>) -> Self {
        Self::new(position, message.into()).with_kind(DiagnosticKind::Phase)
    }

    #[must_use]
    pub fn internal(position: Position, message: impl Into<String>) -> Self {
        Self::new(position, message.into()).with_kind(DiagnosticKind::Internal)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.position, self.message, self.kind)
    }
}

impl std::error::Error for Diagnostic {}

/// Result alias used pervasively across the compiler core: every checking,
/// binding and lowering entry point returns one of these instead of panicking.
pub type Checked<T> = Result<T, Diagnostic>;
