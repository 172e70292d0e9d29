//! `mergeTypes` (§4.3.2): the join operation used by `if` expressions
//! without an `else`, by list/set/map literal element types, and by a
//! function's accumulated `return` type.

use crate::assignability::is_assignable;
use vela_checked_ir::TypeExpression;
use vela_common::{Checked, Position};

/// Unifies `a` and `b` into their join, or fails at `pos` if neither
/// assigns to the other.
///
/// - Equal types unify to themselves.
/// - `Nothing` is absorbing-left: merging it with anything yields the
///   other type.
/// - If one is assignable to the other, the result is the supertype.
pub fn merge_types(pos: &Position, a: &TypeExpression, b: &TypeExpression) -> Checked<TypeExpression> {
    if a == b {
        return Ok(a.clone());
    }
    if a.is_nothing() {
        return Ok(b.clone());
    }
    if b.is_nothing() {
        return Ok(a.clone());
    }
    if is_assignable(b, a) {
        return Ok(a.clone());
    }
    if is_assignable(a, b) {
        return Ok(b.clone());
    }
    Err(pos.fail(format!(
        "cannot unify `{a:?}` and `{b:?}`: neither is assignable to the other"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_common::{PackageName, Symbol, Version};

    fn symbol(name: &str) -> Symbol {
        Symbol::top_level(PackageName::new("acme", "core", Version::new(1, 0, 0)), name)
    }

    fn pos() -> Position {
        Position::new("x.vl", 1, 1)
    }

    #[test]
    fn nothing_is_absorbed_on_either_side() {
        let int = TypeExpression::nominal(symbol("Int"));
        assert_eq!(merge_types(&pos(), &TypeExpression::Nothing, &int).unwrap(), int);
        assert_eq!(merge_types(&pos(), &int, &TypeExpression::Nothing).unwrap(), int);
    }

    #[test]
    fn equal_types_unify_to_themselves() {
        let int = TypeExpression::nominal(symbol("Int"));
        assert_eq!(merge_types(&pos(), &int, &int).unwrap(), int);
    }

    #[test]
    fn unrelated_types_fail() {
        let int = TypeExpression::nominal(symbol("Int"));
        let string = TypeExpression::nominal(symbol("String"));
        assert!(merge_types(&pos(), &int, &string).is_err());
    }
}
