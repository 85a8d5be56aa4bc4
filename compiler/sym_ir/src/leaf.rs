//! Leaf values: the raw, backend-independent payload of expression leaves.

use std::fmt;
use std::sync::Arc;

use crate::BitVec;

/// Name of a free variable.
pub type VarName = Arc<str>;

/// Sort of a symbolic variable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Sort {
    Bool,
    Int,
    BitVec(u32),
}

impl Sort {
    /// Bit width, defined only for bitvector sorts.
    pub const fn length(self) -> Option<u32> {
        match self {
            Sort::BitVec(bits) => Some(bits),
            Sort::Bool | Sort::Int => None,
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sort::Bool => f.write_str("bool"),
            Sort::Int => f.write_str("int"),
            Sort::BitVec(bits) => write!(f, "bv{bits}"),
        }
    }
}

/// A free variable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    name: VarName,
    sort: Sort,
}

impl Symbol {
    pub fn new(name: impl Into<VarName>, sort: Sort) -> Self {
        Symbol {
            name: name.into(),
            sort,
        }
    }

    pub fn name(&self) -> &VarName {
        &self.name
    }

    pub fn sort(&self) -> Sort {
        self.sort
    }

    /// Whether `value` is a concrete leaf of this symbol's sort.
    pub fn admits(&self, value: &Leaf) -> bool {
        value.is_concrete() && value.sort() == self.sort
    }
}

/// Raw value at the bottom of an expression tree.
///
/// Everything except `Symbol` is concrete.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Leaf {
    Bool(bool),
    Int(i64),
    BitVec(BitVec),
    Symbol(Symbol),
}

impl Leaf {
    #[inline]
    pub fn is_concrete(&self) -> bool {
        !matches!(self, Leaf::Symbol(_))
    }

    /// Bit width of bitvector leaves (concrete or symbolic).
    pub fn length(&self) -> Option<u32> {
        match self {
            Leaf::BitVec(bv) => Some(bv.bits()),
            Leaf::Symbol(sym) => sym.sort().length(),
            Leaf::Bool(_) | Leaf::Int(_) => None,
        }
    }

    pub fn sort(&self) -> Sort {
        match self {
            Leaf::Bool(_) => Sort::Bool,
            Leaf::Int(_) => Sort::Int,
            Leaf::BitVec(bv) => Sort::BitVec(bv.bits()),
            Leaf::Symbol(sym) => sym.sort(),
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Leaf::Symbol(sym) => Some(sym),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Leaf::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Short description of the leaf's kind, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Leaf::Bool(_) => "bool",
            Leaf::Int(_) => "int",
            Leaf::BitVec(_) => "bitvector",
            Leaf::Symbol(_) => "symbol",
        }
    }
}

impl From<bool> for Leaf {
    fn from(value: bool) -> Self {
        Leaf::Bool(value)
    }
}

impl From<i64> for Leaf {
    fn from(value: i64) -> Self {
        Leaf::Int(value)
    }
}

impl From<BitVec> for Leaf {
    fn from(value: BitVec) -> Self {
        Leaf::BitVec(value)
    }
}

impl From<Symbol> for Leaf {
    fn from(value: Symbol) -> Self {
        Leaf::Symbol(value)
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Bool(b) => write!(f, "{b}"),
            Leaf::Int(n) => write!(f, "{n}"),
            Leaf::BitVec(bv) => write!(f, "{bv}"),
            Leaf::Symbol(sym) => write!(f, "{}:{}", sym.name(), sym.sort()),
        }
    }
}
