//! Backend error type and constructors.
//!
//! There is a single error kind. Every conversion and dispatch failure is a
//! `BackendError` carrying a human-readable message; callers recover from it
//! by trying another backend or another conversion path.
//!
//! Construct errors through the factory functions below so messages stay
//! uniform across backends.

use std::fmt;

use sym_ir::{Arity, Op};

/// Result of a backend operation.
pub type BackendResult<T> = Result<T, BackendError>;

/// Conversion or dispatch failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct BackendError {
    message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        BackendError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

// Dispatch errors

/// Named operator without a raw handler.
#[cold]
pub fn no_such_operation(backend: &str, op: Op) -> BackendError {
    BackendError::new(format!("backend {backend} has no operation {op}"))
}

/// Neither operand resolves an operator-style op nor its reflection.
#[cold]
pub fn unresolved_operator(op: Op, arg_count: usize) -> BackendError {
    match op.opposite() {
        Some(opposite) if arg_count == 2 => BackendError::new(format!(
            "unable to apply operation: neither {op} nor {opposite} apply on the provided args"
        )),
        _ => BackendError::new(format!(
            "unable to apply operation: {op} does not apply on the provided args"
        )),
    }
}

#[cold]
pub fn arity_mismatch(op: Op, expected: Arity, got: usize) -> BackendError {
    BackendError::new(format!("{op} expects {expected} operands, got {got}"))
}

#[cold]
pub fn operand_type_mismatch(op: Op, expected: &str, got: impl fmt::Display) -> BackendError {
    BackendError::new(format!("{op} expects {expected}, got {got}"))
}

#[cold]
pub fn width_mismatch(op: Op, left: u32, right: u32) -> BackendError {
    BackendError::new(format!(
        "{op} requires operands of equal width, got {left} and {right} bits"
    ))
}

// Arithmetic errors

#[cold]
pub fn division_by_zero(op: Op) -> BackendError {
    BackendError::new(format!("division by zero in {op}"))
}

#[cold]
pub fn integer_overflow(op: Op) -> BackendError {
    BackendError::new(format!("integer overflow in {op}"))
}

// Conversion errors

/// A backend cannot realize this kind of leaf.
#[cold]
pub fn unsupported_leaf(backend: &str, leaf: impl fmt::Display) -> BackendError {
    BackendError::new(format!("backend {backend} cannot convert {leaf}"))
}

/// A symbol has no assignment in the active result context.
#[cold]
pub fn unbound_variable(backend: &str, name: &str) -> BackendError {
    BackendError::new(format!(
        "backend {backend} cannot convert unassigned variable {name}"
    ))
}

/// A value cached by another backend cannot be reinterpreted.
#[cold]
pub fn salvage_unavailable(backend: &str, foreign_type: &str) -> BackendError {
    BackendError::new(format!(
        "backend {backend} cannot reinterpret a cached {foreign_type}"
    ))
}

/// A cache slot holds a value of a different native type than its backend.
#[cold]
pub fn cache_type_mismatch(backend: &str) -> BackendError {
    BackendError::new(format!(
        "object cache entry for backend {backend} has an unexpected native type"
    ))
}

// Abstraction errors

#[cold]
pub fn abstraction_unsupported(backend: &str) -> BackendError {
    BackendError::new(format!("backend {backend} doesn't implement abstract()"))
}

/// Verify an operand count against an operator's arity.
pub fn check_arity<T>(op: Op, args: &[T]) -> BackendResult<()> {
    let arity = op.arity();
    if arity.accepts(args.len()) {
        Ok(())
    } else {
        Err(arity_mismatch(op, arity, args.len()))
    }
}
