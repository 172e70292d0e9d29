//! Checked type expressions (§3.4). Every variant is a plain, structurally
//! compared record; recursive occurrences go through `Arc` so equality and
//! cloning stay cheap even for large struct/enum declarations.

use std::sync::Arc;
use vela_common::collections::OrderedMap;
use vela_common::phase::{ExpressionPhase, FunctionPhase};
use vela_common::Symbol;

#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpression {
    /// A reference to a declared nominal type, by symbol only.
    Nominal(NominalType),
    Parameterized(Arc<ParameterizedType>),
    Function(Arc<FunctionType>),
    /// Synthesized from multiple same-name declarations/imports (§3.4
    /// invariant 5): never the declared type of a binding.
    OverloadFunction(Arc<OverloadFunctionType>),
    Module(ModuleType),
    Struct(Arc<StructType>),
    Tuple(Arc<TupleType>),
    Atom(Arc<AtomType>),
    Enum(Arc<EnumType>),
    TypeParameter(TypeParameterType),
    /// The bottom type. Absorbing-left in `mergeTypes`, assignable to
    /// everything, and the default an unresolved generic is filled with
    /// (§4.3.3, §9 open questions).
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NominalType {
    pub name: Symbol,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterizedType {
    pub base: NominalType,
    pub args: Vec<TypeExpression>,
}

/// A function type's formal parameter: an optional declared phase plus type.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionParamType {
    pub phase: Option<ExpressionPhase>,
    pub ty: TypeExpression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub phase: FunctionPhase,
    pub type_params: Vec<TypeParameterType>,
    pub params: Vec<FunctionParamType>,
    pub result: TypeExpression,
}

/// Overload branches never carry their own generics (§3.4 invariant 5,
/// §9 open questions: combining the two is left as future work).
#[derive(Debug, Clone, PartialEq)]
pub struct OverloadFunctionType {
    pub branches: Vec<FunctionType>,
}

/// A package path used in static access, e.g. `core::list`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleType {
    pub name: Symbol,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    pub name: Symbol,
    pub type_params: Vec<TypeParameterType>,
    pub fields: OrderedMap<String, TypeExpression>,
    pub enum_parent: Option<Symbol>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TupleType {
    pub name: Symbol,
    pub type_params: Vec<TypeParameterType>,
    pub fields: Vec<TypeExpression>,
    pub enum_parent: Option<Symbol>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AtomType {
    pub name: Symbol,
    pub type_params: Vec<TypeParameterType>,
    pub enum_parent: Option<Symbol>,
}

/// The shape one variant of an enum takes.
#[derive(Debug, Clone, PartialEq)]
pub enum VariantShape {
    Struct(Arc<StructType>),
    Tuple(Arc<TupleType>),
    Atom(Arc<AtomType>),
}

impl VariantShape {
    #[must_use]
    pub fn name(&self) -> &Symbol {
        match self {
            Self::Struct(s) => &s.name,
            Self::Tuple(t) => &t.name,
            Self::Atom(a) => &a.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    pub name: Symbol,
    pub type_params: Vec<TypeParameterType>,
    pub variants: OrderedMap<String, VariantShape>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeParameterType {
    pub name: Symbol,
}

impl TypeExpression {
    #[must_use]
    pub fn nominal(name: Symbol) -> Self {
        Self::Nominal(NominalType { name })
    }

    #[must_use]
    pub fn parameterized(base: Symbol, args: Vec<TypeExpression>) -> Self {
        Self::Parameterized(Arc::new(ParameterizedType {
            base: NominalType { name: base },
            args,
        }))
    }

    #[must_use]
    pub fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }

    /// The symbol naming this type, when it has a single unambiguous one
    /// (not true of function types, type parameters or `Nothing`).
    #[must_use]
    pub fn name(&self) -> Option<&Symbol> {
        match self {
            Self::Nominal(n) => Some(&n.name),
            Self::Parameterized(p) => Some(&p.base.name),
            Self::Module(m) => Some(&m.name),
            Self::Struct(s) => Some(&s.name),
            Self::Tuple(t) => Some(&t.name),
            Self::Atom(a) => Some(&a.name),
            Self::Enum(e) => Some(&e.name),
            Self::TypeParameter(t) => Some(&t.name),
            Self::Function(_) | Self::OverloadFunction(_) | Self::Nothing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_common::package::{PackageName, Version};

    fn sym(name: &str) -> Symbol {
        Symbol::top_level(PackageName::new("core", "core", Version::new(1, 0, 0)), name)
    }

    #[test]
    fn nothing_has_no_name() {
        assert_eq!(TypeExpression::Nothing.name(), None);
    }

    #[test]
    fn parameterized_type_names_its_base() {
        let list = TypeExpression::parameterized(sym("List"), vec![TypeExpression::nominal(sym("Int"))]);
        assert_eq!(list.name(), Some(&sym("List")));
    }
}
