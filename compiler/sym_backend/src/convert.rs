//! Conversion of expressions into backend-native values.
//!
//! Resolution order for an expression under one backend:
//! 1. this backend's cached value;
//! 2. a leaf converts through the backend's leaf hook;
//! 3. an operation node first tries to reinterpret a value another backend
//!    already cached for it (salvage), oldest entry first;
//! 4. otherwise the node is dispatched: an expression handler's result is
//!    converted in its place, or operands are converted recursively and the
//!    operator applied.
//!
//! The result is cached unless the conversion runs under a `ResultContext`.

use sym_ir::{Expression, Model, OpNode, Operand};

use crate::stack::ensure_sufficient_stack;
use crate::{Backend, BackendResult, Realizer, ResultContext};

impl<B: Backend> Realizer<'_, B> {
    /// Realize `expr` under this backend.
    ///
    /// Caches the result unless `ctx` is supplied.
    pub fn convert(
        &self,
        expr: &Expression,
        ctx: Option<&ResultContext>,
    ) -> BackendResult<B::Native> {
        self.convert_with(expr, ctx, ctx.is_none())
    }

    /// Realize `expr`, caching the result only if `save` is set.
    ///
    /// A cache hit is returned as-is regardless of `ctx` and `save`.
    pub fn convert_with(
        &self,
        expr: &Expression,
        ctx: Option<&ResultContext>,
        save: bool,
    ) -> BackendResult<B::Native> {
        if let Some(native) = self.cached(expr)? {
            tracing::trace!(backend = self.backend.name(), expr = %expr.id(), "object cache hit");
            return Ok(native);
        }

        let native = match expr.model() {
            Model::Leaf(leaf) => self.backend.convert_leaf(leaf, ctx)?,
            Model::Node(node) => match self.salvage(expr, ctx) {
                Some(native) => native,
                None => ensure_sufficient_stack(|| self.realize_node(node, ctx))?,
            },
        };

        if save {
            self.store(expr, native)
        } else {
            Ok(native)
        }
    }

    /// Realize an operand. Raw operands are converted directly and never
    /// cached.
    pub fn convert_operand(
        &self,
        operand: &Operand,
        ctx: Option<&ResultContext>,
    ) -> BackendResult<B::Native> {
        match operand {
            Operand::Expr(expr) => self.convert(expr, ctx),
            Operand::Raw(leaf) => self.backend.convert_leaf(leaf, ctx),
        }
    }

    /// Realize every operand, in order, stopping at the first failure.
    pub fn convert_all(
        &self,
        operands: &[Operand],
        ctx: Option<&ResultContext>,
    ) -> BackendResult<Vec<B::Native>> {
        operands
            .iter()
            .map(|operand| self.convert_operand(operand, ctx))
            .collect()
    }

    /// Try each value other backends cached for `expr`; failures are
    /// expected and discarded.
    fn salvage(&self, expr: &Expression, ctx: Option<&ResultContext>) -> Option<B::Native> {
        if !self.session.salvage_enabled() {
            return None;
        }
        let candidates = self
            .session
            .cache()
            .foreign_entries(expr.id(), self.backend.id());
        for (source, foreign) in &candidates {
            match self.backend.convert_foreign(foreign.as_ref(), ctx) {
                Ok(native) => {
                    tracing::trace!(
                        backend = self.backend.name(),
                        expr = %expr.id(),
                        %source,
                        "salvaged cached value"
                    );
                    return Some(native);
                }
                Err(err) => {
                    tracing::trace!(
                        backend = self.backend.name(),
                        expr = %expr.id(),
                        %source,
                        %err,
                        "salvage attempt failed"
                    );
                }
            }
        }
        None
    }

    /// Dispatch `node` and convert the outcome.
    ///
    /// A handler that hands back the same node (the structural path) is not
    /// re-entered: its seeded value is used, or the operator applied directly.
    fn realize_node(&self, node: &OpNode, ctx: Option<&ResultContext>) -> BackendResult<B::Native> {
        if let Some(handler) = self.backend.ops().expr_op(node.op()) {
            let rewritten = handler(self, node.operands(), ctx)?;
            if rewritten.as_node() != Some(node) {
                return self.convert(&rewritten, ctx);
            }
            if let Some(native) = self.cached(&rewritten)? {
                return Ok(native);
            }
        }
        let args = self.convert_all(node.operands(), ctx)?;
        self.call_raw(node.op(), &args)
    }
}
