//! Concrete native values.

use std::fmt;

use sym_backend::{Applied, BackendResult, NativeValue};
use sym_ir::{BitVec, Leaf, Op};

use crate::operators::{eval_binary, eval_unary};

/// A concrete value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Bool(bool),
    Int(i64),
    BitVec(BitVec),
}

impl Value {
    /// Concrete value of a leaf; `None` for symbols.
    pub fn from_leaf(leaf: &Leaf) -> Option<Self> {
        match leaf {
            Leaf::Bool(b) => Some(Value::Bool(*b)),
            Leaf::Int(n) => Some(Value::Int(*n)),
            Leaf::BitVec(bv) => Some(Value::BitVec(*bv)),
            Leaf::Symbol(_) => None,
        }
    }

    pub fn to_leaf(self) -> Leaf {
        match self {
            Value::Bool(b) => Leaf::Bool(b),
            Value::Int(n) => Leaf::Int(n),
            Value::BitVec(bv) => Leaf::BitVec(bv),
        }
    }

    pub fn type_name(self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::BitVec(_) => "bitvector",
        }
    }

    #[inline]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_int(self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bitvec(self) -> Option<BitVec> {
        match self {
            Value::BitVec(bv) => Some(bv),
            _ => None,
        }
    }

    /// Bring `partner` to this receiver's type, if the receiver accepts it.
    ///
    /// A bitvector receiver takes integers at its own width. An integer
    /// receiver leaves bitvector partners to the bitvector's reflected
    /// method.
    fn coerce_partner(self, partner: Value) -> Option<Value> {
        match (self, partner) {
            (Value::BitVec(bv), Value::Int(n)) => Some(Value::BitVec(bv.with_signed(n))),
            (Value::Int(_), Value::BitVec(_)) => None,
            _ => Some(partner),
        }
    }
}

impl NativeValue for Value {
    fn implements(&self, op: Op) -> bool {
        match self {
            Value::Bool(_) => matches!(op.forward(), Op::Eq | Op::Ne | Op::And | Op::Or | Op::Xor),
            Value::Int(_) | Value::BitVec(_) => op.is_operator(),
        }
    }

    fn apply(&self, op: Op, rest: &[Self]) -> BackendResult<Applied<Self>> {
        match rest {
            [] => eval_unary(op, *self),
            [partner] => {
                let Some(partner) = self.coerce_partner(*partner) else {
                    return Ok(Applied::NotImplemented);
                };
                if op.is_reflected() {
                    eval_binary(op.forward(), partner, *self)
                } else {
                    eval_binary(op, *self, partner)
                }
            }
            _ => Ok(Applied::NotImplemented),
        }
    }

    fn as_leaf(&self) -> Option<Leaf> {
        Some(self.to_leaf())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::BitVec(bv) => write!(f, "{bv}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<BitVec> for Value {
    fn from(bv: BitVec) -> Self {
        Value::BitVec(bv)
    }
}
