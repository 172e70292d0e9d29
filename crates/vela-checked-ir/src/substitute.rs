//! Generic substitution: replacing `TypeParameterType` occurrences with
//! concrete bindings. Used by the checker when instantiating a generic
//! struct's field types against a `ParameterizedType`'s arguments (§4.3.2,
//! "Construct") and when applying inferred generic bindings to a callee's
//! result type (§4.3.3).

use crate::types::{
    AtomType, EnumType, FunctionParamType, FunctionType, OverloadFunctionType, ParameterizedType,
    StructType, TupleType, TypeExpression, VariantShape,
};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use vela_common::Symbol;

pub type Substitution = FxHashMap<Symbol, TypeExpression>;

impl TypeExpression {
    /// Recursively replaces every `TypeParameterType { name }` found in
    /// `bindings` with its bound type. Type parameters absent from
    /// `bindings` are left as-is (callers fill unresolved generics with
    /// `Nothing` before substituting, per §4.3.3 step 4).
    #[must_use]
    pub fn substitute(&self, bindings: &Substitution) -> Self {
        match self {
            Self::Nominal(n) => Self::Nominal(n.clone()),
            Self::Module(m) => Self::Module(m.clone()),
            Self::Nothing => Self::Nothing,
            Self::TypeParameter(t) => bindings.get(&t.name).cloned().unwrap_or_else(|| self.clone()),
            Self::Parameterized(p) => Self::Parameterized(Arc::new(ParameterizedType {
                base: p.base.clone(),
                args: p.args.iter().map(|a| a.substitute(bindings)).collect(),
            })),
            Self::Function(f) => Self::Function(Arc::new(substitute_function(f, bindings))),
            Self::OverloadFunction(o) => Self::OverloadFunction(Arc::new(OverloadFunctionType {
                branches: o.branches.iter().map(|b| substitute_function(b, bindings)).collect(),
            })),
            Self::Struct(s) => Self::Struct(Arc::new(StructType {
                name: s.name.clone(),
                type_params: s.type_params.clone(),
                fields: s
                    .fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.substitute(bindings)))
                    .collect(),
                enum_parent: s.enum_parent.clone(),
            })),
            Self::Tuple(t) => Self::Tuple(Arc::new(TupleType {
                name: t.name.clone(),
                type_params: t.type_params.clone(),
                fields: t.fields.iter().map(|f| f.substitute(bindings)).collect(),
                enum_parent: t.enum_parent.clone(),
            })),
            Self::Atom(a) => Self::Atom(Arc::new(AtomType {
                name: a.name.clone(),
                type_params: a.type_params.clone(),
                enum_parent: a.enum_parent.clone(),
            })),
            Self::Enum(e) => Self::Enum(Arc::new(EnumType {
                name: e.name.clone(),
                type_params: e.type_params.clone(),
                variants: e
                    .variants
                    .iter()
                    .map(|(k, v)| (k.clone(), substitute_variant(v, bindings)))
                    .collect(),
            })),
        }
    }

    /// Builds the substitution implied by instantiating `type_params` with
    /// `args` positionally (zips and stops at the shorter of the two).
    #[must_use]
    pub fn zip_bindings(type_params: &[crate::types::TypeParameterType], args: &[Self]) -> Substitution {
        type_params
            .iter()
            .zip(args.iter())
            .map(|(param, arg)| (param.name.clone(), arg.clone()))
            .collect()
    }
}

fn substitute_function(f: &FunctionType, bindings: &Substitution) -> FunctionType {
    FunctionType {
        phase: f.phase,
        type_params: f.type_params.clone(),
        params: f
            .params
            .iter()
            .map(|p| FunctionParamType {
                phase: p.phase,
                ty: p.ty.substitute(bindings),
            })
            .collect(),
        result: f.result.substitute(bindings),
    }
}

fn substitute_variant(v: &VariantShape, bindings: &Substitution) -> VariantShape {
    match v {
        VariantShape::Struct(s) => match TypeExpression::Struct(s.clone()).substitute(bindings) {
            TypeExpression::Struct(s) => VariantShape::Struct(s),
            _ => unreachable!("substituting a Struct type always yields a Struct type"),
        },
        VariantShape::Tuple(t) => match TypeExpression::Tuple(t.clone()).substitute(bindings) {
            TypeExpression::Tuple(t) => VariantShape::Tuple(t),
            _ => unreachable!("substituting a Tuple type always yields a Tuple type"),
        },
        VariantShape::Atom(a) => VariantShape::Atom(a.clone()),
    }
}
