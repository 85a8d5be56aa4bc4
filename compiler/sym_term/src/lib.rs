//! Sym Term - A symbolic backend whose native values are term trees.
//!
//! Every op builds an application term; nothing is evaluated at conversion
//! time. `simplify` folds ground subterms through the concrete backend and
//! applies algebraic identities, and `abstract` turns terms back into
//! expressions.

mod backend;
mod fold;
mod term;

pub use backend::TermBackend;
pub use term::Term;
