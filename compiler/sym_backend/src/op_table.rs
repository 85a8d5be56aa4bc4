//! Per-backend operator tables.
//!
//! Each backend owns one `OpTable`, filled at construction and read-only
//! afterwards. Slots are indexed by `Op` discriminant; an empty slot means
//! the backend has no handler at that level.

use std::fmt;

use sym_ir::{Expression, Op, Operand};

use crate::{Backend, BackendResult, Realizer, ResultContext};

/// Operator implementation over native values.
pub type RawOpFn<N> = Box<dyn Fn(&[N]) -> BackendResult<N> + Send + Sync>;

/// Operator implementation over expressions.
///
/// Owns the whole result, including variables, symbolism and length.
pub type ExprOpFn<B> = Box<
    dyn for<'s> Fn(&Realizer<'s, B>, &[Operand], Option<&ResultContext>) -> BackendResult<Expression>
        + Send
        + Sync,
>;

pub struct OpTable<B: Backend> {
    raw: [Option<RawOpFn<B::Native>>; Op::COUNT],
    expr: [Option<ExprOpFn<B>>; Op::COUNT],
}

impl<B: Backend> OpTable<B> {
    pub fn new() -> Self {
        OpTable {
            raw: std::array::from_fn(|_| None),
            expr: std::array::from_fn(|_| None),
        }
    }

    /// Install a raw handler, replacing any previous one for `op`.
    pub fn register_raw<F>(&mut self, op: Op, handler: F)
    where
        F: Fn(&[B::Native]) -> BackendResult<B::Native> + Send + Sync + 'static,
    {
        self.raw[op.index()] = Some(Box::new(handler));
    }

    /// Install raw handlers for a list of ops, building each with `make`.
    pub fn register_raw_each<I, M>(&mut self, ops: I, make: M)
    where
        I: IntoIterator<Item = Op>,
        M: Fn(Op) -> RawOpFn<B::Native>,
    {
        for op in ops {
            self.raw[op.index()] = Some(make(op));
        }
    }

    /// Install an expression-level handler, replacing any previous one.
    pub fn register_expr<F>(&mut self, op: Op, handler: F)
    where
        F: for<'s> Fn(&Realizer<'s, B>, &[Operand], Option<&ResultContext>) -> BackendResult<Expression>
            + Send
            + Sync
            + 'static,
    {
        self.expr[op.index()] = Some(Box::new(handler));
    }

    #[inline]
    pub fn raw_op(&self, op: Op) -> Option<&RawOpFn<B::Native>> {
        self.raw[op.index()].as_ref()
    }

    #[inline]
    pub fn expr_op(&self, op: Op) -> Option<&ExprOpFn<B>> {
        self.expr[op.index()].as_ref()
    }

    /// Ops with a raw handler, in discriminant order.
    pub fn raw_ops(&self) -> impl Iterator<Item = Op> + '_ {
        Op::ALL.into_iter().filter(|op| self.raw[op.index()].is_some())
    }

    /// Ops with an expression-level handler, in discriminant order.
    pub fn expr_ops(&self) -> impl Iterator<Item = Op> + '_ {
        Op::ALL.into_iter().filter(|op| self.expr[op.index()].is_some())
    }
}

impl<B: Backend> Default for OpTable<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> fmt::Debug for OpTable<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpTable")
            .field("raw", &self.raw_ops().collect::<Vec<_>>())
            .field("expr", &self.expr_ops().collect::<Vec<_>>())
            .finish()
    }
}
