//! Sym IR - Expression model and operation metadata.
//!
//! This crate provides the backend-independent side of symbolic evaluation:
//! - `Expression`: immutable shared expression handles with derived
//!   variables, symbolism and bit width
//! - `Leaf`, `BitVec`, `Symbol`: raw leaf payloads
//! - `Op`: the closed operator set, with reflected-operator pairing
//! - `metadata`: result-width computation
//!
//! Backends that realize expressions live in `sym_backend` and its
//! implementations; nothing here knows about them.

mod bitvec;
mod expr;
mod leaf;
pub mod metadata;
mod op;

pub use bitvec::BitVec;
pub use expr::{any_symbolic, union_variables, ExprId, Expression, Model, OpNode, Operand, VarSet};
pub use leaf::{Leaf, Sort, Symbol, VarName};
pub use metadata::{length_of, opposite_of};
pub use op::{Arity, Op, OpFlags};
