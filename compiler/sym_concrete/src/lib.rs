//! Sym Concrete - A backend that evaluates expressions to concrete values.
//!
//! Native values are booleans, 64-bit integers and bitvectors of up to 64
//! bits. Operator-style ops resolve through the values themselves (see
//! `Value`'s `NativeValue` impl); named ops such as `Extract` or `If` are
//! raw handlers on the backend.
//!
//! Symbols only convert under a `ResultContext` that assigns them.

mod backend;
mod named_ops;
mod operators;
mod value;

pub use backend::ConcreteBackend;
pub use value::Value;
