//! Operator dispatch.
//!
//! Two levels:
//! - `call_expr` applies an operator to expressions and yields a new
//!   expression. Backends may take over specific operators at this level
//!   through expression handlers.
//! - `call_raw` applies an operator to native values. A raw handler wins;
//!   otherwise operator-style ops fall back to dual dispatch on the values
//!   themselves (left operand first, then the reflected op on the right
//!   operand).

use sym_ir::{any_symbolic, length_of, union_variables, Expression, Model, Op, OpNode, Operand};

use crate::errors::{no_such_operation, unresolved_operator};
use crate::{Applied, Backend, BackendResult, NativeValue, Realizer, ResultContext};

impl<B: Backend> Realizer<'_, B> {
    /// Apply `op` to `operands`, producing a new expression.
    ///
    /// An expression handler registered for `op` owns the whole result.
    /// Otherwise the result is built structurally; see
    /// [`call_expr_structural`](Self::call_expr_structural).
    #[tracing::instrument(level = "trace", skip_all, fields(backend = self.backend.name(), op = %op))]
    pub fn call_expr(
        &self,
        op: Op,
        operands: &[Operand],
        ctx: Option<&ResultContext>,
    ) -> BackendResult<Expression> {
        tracing::debug!(
            backend = self.backend.name(),
            %op,
            operands = operands.len(),
            "call_expr"
        );
        if let Some(handler) = self.backend.ops().expr_op(op) {
            return handler(self, operands, ctx);
        }
        self.call_expr_structural(op, operands, ctx)
    }

    /// Generic expression-level application, bypassing expression handlers.
    ///
    /// Converts the operands and applies `op` through
    /// [`call_raw`](Self::call_raw). The result's variables are the union of
    /// the operands' variables, it is symbolic if any operand is, and its
    /// length comes from operation metadata.
    ///
    /// Without `ctx` the model is `Node(op, operands)` and the computed
    /// native value is cached for the new expression. Under `ctx` nothing is
    /// cached; a value that concretizes becomes the model as a leaf, anything
    /// else keeps the operation node and must be converted under the same
    /// context again.
    pub fn call_expr_structural(
        &self,
        op: Op,
        operands: &[Operand],
        ctx: Option<&ResultContext>,
    ) -> BackendResult<Expression> {
        let args = self.convert_all(operands, ctx)?;
        let native = self.call_raw(op, &args)?;
        if ctx.is_none() {
            let expr = Expression::node(op, operands.to_vec());
            self.seed(&expr, native);
            return Ok(expr);
        }
        let model = match native.as_leaf() {
            Some(leaf) => Model::Leaf(leaf),
            None => {
                tracing::trace!(
                    backend = self.backend.name(),
                    %op,
                    "context result has no leaf form"
                );
                Model::Node(OpNode::new(op, operands.to_vec()))
            }
        };
        Ok(Expression::from_parts(
            model,
            union_variables(operands),
            any_symbolic(operands),
            length_of(op, operands),
        ))
    }

    /// Apply `op` to native values.
    pub fn call_raw(&self, op: Op, args: &[B::Native]) -> BackendResult<B::Native> {
        call_raw(self.backend, op, args)
    }
}

/// Apply `op` to native values of `backend`.
///
/// Needs no session: raw dispatch neither reads nor writes the object cache.
pub fn call_raw<B: Backend>(backend: &B, op: Op, args: &[B::Native]) -> BackendResult<B::Native> {
    tracing::trace!(backend = backend.name(), %op, ?args, "call_raw");

    if let Some(handler) = backend.ops().raw_op(op) {
        return handler(args);
    }
    if !op.is_operator() {
        tracing::debug!(backend = backend.name(), %op, "backend has no operation");
        return Err(no_such_operation(backend.name(), op));
    }
    resolve_operator(op, args).inspect_err(|_| {
        tracing::debug!(
            backend = backend.name(),
            %op,
            opposite = ?op.opposite(),
            ?args,
            "neither operator nor its reflection applies"
        );
    })
}

/// Resolve an operator-style op through the operands' own methods.
///
/// The first operand is asked first. If it lacks the operator or declines
/// the operands, and there are exactly two operands, the second operand is
/// asked for the opposite operator with the first operand as argument.
pub fn resolve_operator<N: NativeValue>(op: Op, args: &[N]) -> BackendResult<N> {
    let Some((first, rest)) = args.split_first() else {
        return Err(unresolved_operator(op, 0));
    };

    let mut applied = Applied::NotImplemented;
    if first.implements(op) {
        applied = first.apply(op, rest)?;
    }

    if applied.is_not_implemented() {
        if let (Some(opposite), [left, right]) = (op.opposite(), args) {
            if right.implements(opposite) {
                applied = right.apply(opposite, std::slice::from_ref(left))?;
            }
        }
    }

    match applied {
        Applied::Value(value) => Ok(value),
        Applied::NotImplemented => Err(unresolved_operator(op, args.len())),
    }
}
