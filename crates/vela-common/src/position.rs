//! Source positions and the fail-fast diagnostic primitive.
//!
//! Every node produced by the external parser carries a [`Position`]; every
//! diagnostic raised by the binder, checker or lowering passes is attributed
//! to one. There is no error recovery in this crate family: [`Position::fail`]
//! is the single choke point through which a compilation aborts.

use std::fmt;

/// A location in a source file: path, 1-indexed line, 1-indexed column.
///
/// Positions are compared and hashed structurally, matching every other
/// record type in the parsed/checked/target IRs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub path: String,
    pub line: u32,
    pub column: u32,
}

impl Position {
    #[must_use]
    pub fn new(path: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            path: path.into(),
            line,
            column,
        }
    }

    /// A position with no useful source attribution, for synthesized nodes
    /// introduced during lowering (e.g. generated temporaries).
    #[must_use]
    pub fn synthetic() -> Self {
        Self {
            path: String::from("<synthetic>"),
            line: 0,
            column: 0,
        }
    }

    /// Abort the current compilation with a positional diagnostic.
    ///
    /// Callers express "fail at this position" as `return Err(pos.fail(...))`
    /// wherever the surrounding function returns `Result<_, Diagnostic>`.
    #[must_use]
    pub fn fail(&self, message: impl Into<String>) -> crate::diagnostics::Diagnostic {
        crate::diagnostics::Diagnostic::new(self.clone(), message.into())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_path_line_column() {
        let pos = Position::new("foo.vl", 3, 7);
        assert_eq!(pos.to_string(), "foo.vl:3:7");
    }

    #[test]
    fn fail_carries_the_position_and_message() {
        let pos = Position::new("foo.vl", 1, 1);
        let diag = pos.fail("unexpected thing");
        assert_eq!(diag.position, pos);
        assert_eq!(diag.message, "unexpected thing");
    }
}
