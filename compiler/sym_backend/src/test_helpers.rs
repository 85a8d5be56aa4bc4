//! Stub backends for unit tests.
//!
//! - `CountingBackend`: integers, raw handlers for `+ - *` that count calls,
//!   abstraction back to integer leaves (a no-op simplifier).
//! - `ProbeBackend`: opaque values that resolve operators only through dual
//!   dispatch, plus one expression-level handler.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sym_ir::{Expression, Leaf, Model, Op};

use crate::errors::{arity_mismatch, operand_type_mismatch, unbound_variable, unsupported_leaf};
use crate::{Applied, Backend, BackendId, BackendResult, NativeValue, OpTable, ResultContext};

/// Native value of `CountingBackend`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Num(pub i64);

impl NativeValue for Num {
    fn as_leaf(&self) -> Option<Leaf> {
        Some(Leaf::Int(self.0))
    }
}

pub struct CountingBackend {
    id: BackendId,
    ops: OpTable<Self>,
    calls: Arc<AtomicUsize>,
}

impl CountingBackend {
    pub fn new() -> Self {
        crate::init_tracing();
        let calls = Arc::new(AtomicUsize::new(0));
        let mut ops = OpTable::new();
        let arith: [(Op, fn(i64, i64) -> i64); 3] = [
            (Op::Add, i64::wrapping_add),
            (Op::Sub, i64::wrapping_sub),
            (Op::Mul, i64::wrapping_mul),
        ];
        for (op, apply) in arith {
            let calls = Arc::clone(&calls);
            ops.register_raw(op, move |args: &[Num]| {
                calls.fetch_add(1, Ordering::SeqCst);
                match args {
                    [a, b] => Ok(Num(apply(a.0, b.0))),
                    _ => Err(arity_mismatch(op, op.arity(), args.len())),
                }
            });
        }
        CountingBackend {
            id: BackendId::fresh(),
            ops,
            calls,
        }
    }

    /// Raw operator invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Backend for CountingBackend {
    type Native = Num;

    fn id(&self) -> BackendId {
        self.id
    }

    fn name(&self) -> &'static str {
        "counting"
    }

    fn ops(&self) -> &OpTable<Self> {
        &self.ops
    }

    fn convert_leaf(&self, leaf: &Leaf, ctx: Option<&ResultContext>) -> BackendResult<Num> {
        match leaf {
            Leaf::Int(n) => Ok(Num(*n)),
            Leaf::Symbol(sym) => match ctx.and_then(|ctx| ctx.get(sym.name())) {
                Some(Leaf::Int(n)) => Ok(Num(*n)),
                Some(other) => Err(unsupported_leaf(self.name(), other)),
                None => Err(unbound_variable(self.name(), sym.name())),
            },
            other => Err(unsupported_leaf(self.name(), other)),
        }
    }

    fn abstract_native(&self, native: &Num) -> BackendResult<Model> {
        Ok(Model::Leaf(Leaf::Int(native.0)))
    }
}

/// Native value of `ProbeBackend`.
///
/// `Plain` implements no operators. `Left` implements `__add__` (with
/// `Left` partners only) and `__neg__`. `Right` implements `__radd__` and
/// `__gt__` with any integer partner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Probe {
    Plain(i64),
    Left(i64),
    Right(i64),
    Bool(bool),
}

impl Probe {
    fn int(&self) -> Option<i64> {
        match self {
            Probe::Plain(n) | Probe::Left(n) | Probe::Right(n) => Some(*n),
            Probe::Bool(_) => None,
        }
    }
}

impl NativeValue for Probe {
    fn implements(&self, op: Op) -> bool {
        match self {
            Probe::Left(_) => matches!(op, Op::Add | Op::Neg),
            Probe::Right(_) => matches!(op, Op::RAdd | Op::Gt),
            Probe::Plain(_) | Probe::Bool(_) => false,
        }
    }

    fn apply(&self, op: Op, rest: &[Self]) -> BackendResult<Applied<Self>> {
        let applied = match (self, op, rest) {
            (Probe::Left(a), Op::Neg, []) => Probe::Left(-a),
            (Probe::Left(a), Op::Add, [Probe::Left(b)]) => Probe::Left(a + b),
            (Probe::Right(a), Op::RAdd | Op::Gt, [other]) => {
                let b = other
                    .int()
                    .ok_or_else(|| operand_type_mismatch(op, "an integer probe", "bool"))?;
                if op == Op::RAdd {
                    Probe::Right(b + a)
                } else {
                    Probe::Bool(*a > b)
                }
            }
            _ => return Ok(Applied::NotImplemented),
        };
        Ok(Applied::Value(applied))
    }
}

pub struct ProbeBackend {
    id: BackendId,
    ops: OpTable<Self>,
}

impl ProbeBackend {
    pub fn new() -> Self {
        let mut ops = OpTable::new();
        ops.register_expr(Op::Mul, |_, _, _| Ok(Expression::bool_sym("handled")));
        ProbeBackend {
            id: BackendId::fresh(),
            ops,
        }
    }
}

impl Backend for ProbeBackend {
    type Native = Probe;

    fn id(&self) -> BackendId {
        self.id
    }

    fn name(&self) -> &'static str {
        "probe"
    }

    fn ops(&self) -> &OpTable<Self> {
        &self.ops
    }

    fn convert_leaf(&self, leaf: &Leaf, _ctx: Option<&ResultContext>) -> BackendResult<Probe> {
        match leaf {
            Leaf::Int(n) => Ok(Probe::Plain(*n)),
            Leaf::Bool(b) => Ok(Probe::Bool(*b)),
            other => Err(unsupported_leaf(self.name(), other)),
        }
    }
}
