//! Operator vocabulary for expression nodes.
//!
//! The operator set is closed: every backend dispatches over `Op` with a
//! table indexed by discriminant, so an unsupported operator is an empty
//! slot rather than a failed string lookup.
//!
//! Two naming families exist. Operator-style ops (`__add__`, `__radd__`, ...)
//! take part in dual dispatch: when a backend has no raw handler for them,
//! the native operands themselves are asked to resolve the operator, first
//! the left operand, then the right operand through the opposite op.
//! Named ops (`Concat`, `Extract`, ...) must be provided by the backend.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Pre-computed operator properties.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct OpFlags: u8 {
        /// Operator-style name; eligible for dual dispatch.
        const OPERATOR = 1 << 0;
        /// Reflected form (`__radd__`); operands are swapped relative to the forward op.
        const REFLECTED = 1 << 1;
        /// Relational comparison.
        const COMPARISON = 1 << 2;
        /// Result is a boolean rather than a fixed-width value.
        const BOOLEAN = 1 << 3;
    }
}

/// Number of operands an operator accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    #[inline]
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// An expression operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Op {
    // Arithmetic
    Add,
    RAdd,
    Sub,
    RSub,
    Mul,
    RMul,
    Div,
    RDiv,
    Mod,
    RMod,

    // Bitwise
    And,
    RAnd,
    Or,
    ROr,
    Xor,
    RXor,
    Shl,
    RShl,
    Shr,
    RShr,

    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    // Unary
    Neg,
    Invert,

    // Named bitvector ops
    LShR,
    Concat,
    Extract,
    ZeroExt,
    SignExt,
    ULt,
    ULe,
    UGt,
    UGe,

    // Named boolean ops
    BoolAnd,
    BoolOr,
    BoolNot,
    If,
}

impl Op {
    /// Number of operators.
    pub const COUNT: usize = 41;

    /// Every operator, in discriminant order.
    pub const ALL: [Op; Op::COUNT] = [
        Op::Add,
        Op::RAdd,
        Op::Sub,
        Op::RSub,
        Op::Mul,
        Op::RMul,
        Op::Div,
        Op::RDiv,
        Op::Mod,
        Op::RMod,
        Op::And,
        Op::RAnd,
        Op::Or,
        Op::ROr,
        Op::Xor,
        Op::RXor,
        Op::Shl,
        Op::RShl,
        Op::Shr,
        Op::RShr,
        Op::Eq,
        Op::Ne,
        Op::Lt,
        Op::Le,
        Op::Gt,
        Op::Ge,
        Op::Neg,
        Op::Invert,
        Op::LShR,
        Op::Concat,
        Op::Extract,
        Op::ZeroExt,
        Op::SignExt,
        Op::ULt,
        Op::ULe,
        Op::UGt,
        Op::UGe,
        Op::BoolAnd,
        Op::BoolOr,
        Op::BoolNot,
        Op::If,
    ];

    /// Table slot for this operator.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical operator name.
    pub const fn name(self) -> &'static str {
        match self {
            Op::Add => "__add__",
            Op::RAdd => "__radd__",
            Op::Sub => "__sub__",
            Op::RSub => "__rsub__",
            Op::Mul => "__mul__",
            Op::RMul => "__rmul__",
            Op::Div => "__div__",
            Op::RDiv => "__rdiv__",
            Op::Mod => "__mod__",
            Op::RMod => "__rmod__",
            Op::And => "__and__",
            Op::RAnd => "__rand__",
            Op::Or => "__or__",
            Op::ROr => "__ror__",
            Op::Xor => "__xor__",
            Op::RXor => "__rxor__",
            Op::Shl => "__lshift__",
            Op::RShl => "__rlshift__",
            Op::Shr => "__rshift__",
            Op::RShr => "__rrshift__",
            Op::Eq => "__eq__",
            Op::Ne => "__ne__",
            Op::Lt => "__lt__",
            Op::Le => "__le__",
            Op::Gt => "__gt__",
            Op::Ge => "__ge__",
            Op::Neg => "__neg__",
            Op::Invert => "__invert__",
            Op::LShR => "LShR",
            Op::Concat => "Concat",
            Op::Extract => "Extract",
            Op::ZeroExt => "ZeroExt",
            Op::SignExt => "SignExt",
            Op::ULt => "ULT",
            Op::ULe => "ULE",
            Op::UGt => "UGT",
            Op::UGe => "UGE",
            Op::BoolAnd => "And",
            Op::BoolOr => "Or",
            Op::BoolNot => "Not",
            Op::If => "If",
        }
    }

    /// Look up an operator by its canonical name.
    pub fn from_name(name: &str) -> Option<Op> {
        Op::ALL.iter().copied().find(|op| op.name() == name)
    }

    pub const fn flags(self) -> OpFlags {
        match self {
            Op::Add
            | Op::Sub
            | Op::Mul
            | Op::Div
            | Op::Mod
            | Op::And
            | Op::Or
            | Op::Xor
            | Op::Shl
            | Op::Shr
            | Op::Neg
            | Op::Invert => OpFlags::OPERATOR,
            Op::RAdd
            | Op::RSub
            | Op::RMul
            | Op::RDiv
            | Op::RMod
            | Op::RAnd
            | Op::ROr
            | Op::RXor
            | Op::RShl
            | Op::RShr => OpFlags::OPERATOR.union(OpFlags::REFLECTED),
            Op::Eq | Op::Ne | Op::Lt | Op::Le | Op::Gt | Op::Ge => OpFlags::OPERATOR
                .union(OpFlags::COMPARISON)
                .union(OpFlags::BOOLEAN),
            Op::ULt | Op::ULe | Op::UGt | Op::UGe => {
                OpFlags::COMPARISON.union(OpFlags::BOOLEAN)
            }
            Op::BoolAnd | Op::BoolOr | Op::BoolNot => OpFlags::BOOLEAN,
            Op::LShR | Op::Concat | Op::Extract | Op::ZeroExt | Op::SignExt | Op::If => {
                OpFlags::empty()
            }
        }
    }

    /// Whether the name follows the operator-style convention.
    #[inline]
    pub const fn is_operator(self) -> bool {
        self.flags().contains(OpFlags::OPERATOR)
    }

    #[inline]
    pub const fn is_reflected(self) -> bool {
        self.flags().contains(OpFlags::REFLECTED)
    }

    #[inline]
    pub const fn is_boolean(self) -> bool {
        self.flags().contains(OpFlags::BOOLEAN)
    }

    pub const fn arity(self) -> Arity {
        match self {
            Op::Neg | Op::Invert | Op::BoolNot => Arity::Exact(1),
            Op::Extract | Op::If => Arity::Exact(3),
            Op::Concat | Op::BoolAnd | Op::BoolOr => Arity::AtLeast(1),
            _ => Arity::Exact(2),
        }
    }

    /// Forward form of a reflected operator; identity for everything else.
    ///
    /// `a.__radd__(b)` computes `b + a`, so callers evaluating the forward
    /// form must swap the operands.
    pub const fn forward(self) -> Op {
        match self {
            Op::RAdd => Op::Add,
            Op::RSub => Op::Sub,
            Op::RMul => Op::Mul,
            Op::RDiv => Op::Div,
            Op::RMod => Op::Mod,
            Op::RAnd => Op::And,
            Op::ROr => Op::Or,
            Op::RXor => Op::Xor,
            Op::RShl => Op::Shl,
            Op::RShr => Op::Shr,
            other => other,
        }
    }

    /// Operator to try on the right operand when the left one cannot
    /// resolve `self`.
    ///
    /// Arithmetic and bitwise operators pair with their reflected form,
    /// comparisons with their mirror (`<` with `>`). Unary and named
    /// operators have no opposite.
    pub const fn opposite(self) -> Option<Op> {
        let opposite = match self {
            Op::Add => Op::RAdd,
            Op::RAdd => Op::Add,
            Op::Sub => Op::RSub,
            Op::RSub => Op::Sub,
            Op::Mul => Op::RMul,
            Op::RMul => Op::Mul,
            Op::Div => Op::RDiv,
            Op::RDiv => Op::Div,
            Op::Mod => Op::RMod,
            Op::RMod => Op::Mod,
            Op::And => Op::RAnd,
            Op::RAnd => Op::And,
            Op::Or => Op::ROr,
            Op::ROr => Op::Or,
            Op::Xor => Op::RXor,
            Op::RXor => Op::Xor,
            Op::Shl => Op::RShl,
            Op::RShl => Op::Shl,
            Op::Shr => Op::RShr,
            Op::RShr => Op::Shr,
            Op::Eq => Op::Eq,
            Op::Ne => Op::Ne,
            Op::Lt => Op::Gt,
            Op::Gt => Op::Lt,
            Op::Le => Op::Ge,
            Op::Ge => Op::Le,
            _ => return None,
        };
        Some(opposite)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests;
