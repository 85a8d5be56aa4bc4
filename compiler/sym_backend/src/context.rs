//! Scoped evaluation context.

use rustc_hash::FxHashMap;
use sym_ir::{Leaf, Symbol, VarName};

use crate::errors::unsupported_leaf;
use crate::BackendResult;

/// Variable assignments for a scoped, concrete-evaluation request.
///
/// Passing a context to a conversion lets backends concretize symbols from
/// these assignments. Results computed under a context are specific to it,
/// so they are never written into the shared object cache.
#[derive(Clone, Debug, Default)]
pub struct ResultContext {
    assignments: FxHashMap<VarName, Leaf>,
}

impl ResultContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`assign`](Self::assign).
    #[must_use]
    pub fn with(mut self, name: impl Into<VarName>, value: Leaf) -> Self {
        self.assign(name, value);
        self
    }

    /// Bind `name` to `value`, replacing any previous binding.
    pub fn assign(&mut self, name: impl Into<VarName>, value: Leaf) {
        self.assignments.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Leaf> {
        self.assignments.get(name)
    }

    /// Assignment of `sym`, checked against the symbol's sort.
    ///
    /// `Ok(None)` when `sym` is unassigned; an error naming `backend` when
    /// the assigned value has another sort.
    pub fn value_of(&self, backend: &str, sym: &Symbol) -> BackendResult<Option<&Leaf>> {
        let Some(value) = self.get(sym.name()) else {
            return Ok(None);
        };
        if !sym.admits(value) {
            return Err(unsupported_leaf(
                backend,
                format_args!("{}:{} = {value}", sym.name(), sym.sort()),
            ));
        }
        Ok(Some(value))
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
