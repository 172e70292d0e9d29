//! Import declarations, including the `pkg::{a, b::{c, d}}` nested-group
//! shorthand (§3.6, §4.1).

use vela_common::Position;

/// One leaf or nested group inside an import's `{ ... }` braces.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportSpec {
    /// A bare name: `a`.
    Name(String),
    /// `name::{ ... }` — descend one level, then expand the nested specs.
    Nested(String, Vec<ImportSpec>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    /// Path segments leading up to the brace group, e.g. `["pkg"]` for
    /// `pkg::{a, b::{c, d}}`, or the whole path when there is no group.
    pub path: Vec<String>,
    pub specs: Vec<ImportSpec>,
    pub pos: Position,
}

impl ImportDecl {
    /// A single, ungrouped import `pkg::name`.
    #[must_use]
    pub fn single(path: Vec<String>, pos: Position) -> Self {
        let mut path = path;
        let name = path.pop().unwrap_or_default();
        Self {
            path,
            specs: vec![ImportSpec::Name(name)],
            pos,
        }
    }

    /// Recursively expands the nested `{a, b::{c, d}}` shorthand into the
    /// flat list of full segment paths it denotes. This is the purely
    /// syntactic half of `DependencyManager::breakdown_import` (§3.6): it
    /// does not resolve anything against declared dependencies or the
    /// global package table, it only flattens the grouping syntax.
    #[must_use]
    pub fn flatten(&self) -> Vec<Vec<String>> {
        let mut out = Vec::new();
        for spec in &self.specs {
            flatten_spec(&self.path, spec, &mut out);
        }
        out
    }
}

fn flatten_spec(prefix: &[String], spec: &ImportSpec, out: &mut Vec<Vec<String>>) {
    match spec {
        ImportSpec::Name(name) => {
            let mut full = prefix.to_vec();
            full.push(name.clone());
            out.push(full);
        }
        ImportSpec::Nested(name, children) => {
            let mut next_prefix = prefix.to_vec();
            next_prefix.push(name.clone());
            for child in children {
                flatten_spec(&next_prefix, child, out);
            }
        }
    }
}
