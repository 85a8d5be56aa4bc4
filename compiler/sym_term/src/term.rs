//! Term trees.

use std::fmt;
use std::sync::Arc;

use sym_backend::NativeValue;
use sym_ir::{Leaf, Op, Sort, Symbol};

/// A symbolic term.
///
/// Reflected ops never appear in `App`; they are stored in forward form
/// with the operands swapped.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Term {
    Const(Leaf),
    Var(Symbol),
    App(Op, Arc<[Term]>),
}

impl Term {
    pub fn app(op: Op, args: Vec<Term>) -> Self {
        Term::App(op, args.into())
    }

    /// The constant leaf, if this is a constant.
    #[inline]
    pub fn constant(&self) -> Option<&Leaf> {
        match self {
            Term::Const(leaf) => Some(leaf),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Term::Const(Leaf::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Sort of the term's value, where it can be read off the term.
    ///
    /// Arithmetic takes the sort its operands share; an `Int` operand beside
    /// a bitvector takes the bitvector's width. Named ops other than
    /// `LShR` and `If` have no inferred sort.
    pub fn sort(&self) -> Option<Sort> {
        match self {
            Term::Const(leaf) => Some(leaf.sort()),
            Term::Var(sym) => Some(sym.sort()),
            Term::App(op, _) if op.is_boolean() => Some(Sort::Bool),
            Term::App(Op::If, args) => match &**args {
                [_, then, otherwise] => then.sort().filter(|sort| otherwise.sort() == Some(*sort)),
                _ => None,
            },
            Term::App(op, args) if op.is_operator() || *op == Op::LShR => {
                args.iter().try_fold(None, |joined, arg| {
                    let sort = arg.sort()?;
                    match (joined, sort) {
                        (None, sort) => Some(Some(sort)),
                        (Some(ours), theirs) if ours == theirs => Some(Some(ours)),
                        (Some(Sort::BitVec(bits)), Sort::Int)
                        | (Some(Sort::Int), Sort::BitVec(bits)) => Some(Some(Sort::BitVec(bits))),
                        _ => None,
                    }
                })?
            }
            Term::App(..) => None,
        }
    }

    /// Integer or bitvector zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Term::Const(Leaf::Int(n)) => *n == 0,
            Term::Const(Leaf::BitVec(bv)) => bv.is_zero(),
            _ => false,
        }
    }

    /// Integer or bitvector one.
    pub fn is_one(&self) -> bool {
        match self {
            Term::Const(Leaf::Int(n)) => *n == 1,
            Term::Const(Leaf::BitVec(bv)) => bv.value() == 1,
            _ => false,
        }
    }
}

impl NativeValue for Term {
    fn as_leaf(&self) -> Option<Leaf> {
        self.constant().cloned()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Const(leaf) => write!(f, "{leaf}"),
            Term::Var(sym) => write!(f, "{}", sym.name()),
            Term::App(op, args) => {
                write!(f, "({op}")?;
                for arg in args.iter() {
                    write!(f, " {arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}
