//! The concrete backend.

use sym_backend::errors::{unbound_variable, unsupported_leaf};
use sym_backend::{Backend, BackendId, BackendResult, OpTable, ResultContext};
use sym_ir::{Leaf, Model, Symbol};

use crate::{named_ops, Value};

/// Evaluates expressions to [`Value`]s.
#[derive(Debug)]
pub struct ConcreteBackend {
    id: BackendId,
    ops: OpTable<Self>,
}

impl ConcreteBackend {
    pub fn new() -> Self {
        let mut ops = OpTable::new();
        named_ops::register(&mut ops);
        ConcreteBackend {
            id: BackendId::fresh(),
            ops,
        }
    }

    /// Value of `sym` under `ctx`, checked against the symbol's sort.
    fn assigned(&self, sym: &Symbol, ctx: Option<&ResultContext>) -> BackendResult<Value> {
        let assigned = match ctx {
            Some(ctx) => ctx.value_of(self.name(), sym)?,
            None => None,
        };
        let leaf = assigned.ok_or_else(|| unbound_variable(self.name(), sym.name()))?;
        let value = Value::from_leaf(leaf).ok_or_else(|| unsupported_leaf(self.name(), leaf))?;
        tracing::trace!(
            backend = self.name(),
            name = %sym.name(),
            %value,
            "symbol resolved from context"
        );
        Ok(value)
    }
}

impl Default for ConcreteBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for ConcreteBackend {
    type Native = Value;

    fn id(&self) -> BackendId {
        self.id
    }

    fn name(&self) -> &'static str {
        "concrete"
    }

    fn ops(&self) -> &OpTable<Self> {
        &self.ops
    }

    fn convert_leaf(&self, leaf: &Leaf, ctx: Option<&ResultContext>) -> BackendResult<Value> {
        match leaf {
            Leaf::Symbol(sym) => self.assigned(sym, ctx),
            _ => Value::from_leaf(leaf).ok_or_else(|| unsupported_leaf(self.name(), leaf)),
        }
    }

    fn abstract_native(&self, native: &Value) -> BackendResult<Model> {
        Ok(Model::Leaf(native.to_leaf()))
    }
}
