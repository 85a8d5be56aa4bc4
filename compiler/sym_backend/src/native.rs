//! Native value capabilities.
//!
//! A backend's native values declare which operator-style ops they can
//! resolve themselves. Dispatch asks `implements` first and only then calls
//! `apply`, so probing for support never goes through a failure path.

use std::any::Any;
use std::fmt;

use sym_ir::{Leaf, Op};

use crate::BackendResult;

/// Outcome of asking a native value to apply an operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Applied<T> {
    Value(T),
    /// The receiver declined this combination of operands.
    NotImplemented,
}

impl<T> Applied<T> {
    #[inline]
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Applied::NotImplemented)
    }
}

/// A backend-native value.
pub trait NativeValue: Clone + fmt::Debug + Send + Sync + 'static {
    /// Whether `self` has an operator method for `op`.
    ///
    /// Only consulted for operator-style ops without a raw handler.
    fn implements(&self, _op: Op) -> bool {
        false
    }

    /// Apply `op` with `self` as the receiver and `rest` as the remaining
    /// operands. For reflected ops, `rest` holds the original left operand.
    ///
    /// Returning `NotImplemented` lets dispatch try the reflected operator
    /// on the other operand; returning an error aborts dispatch.
    fn apply(&self, _op: Op, _rest: &[Self]) -> BackendResult<Applied<Self>> {
        Ok(Applied::NotImplemented)
    }

    /// Concrete leaf equivalent, if this value is fully concrete.
    ///
    /// Other backends use it to reinterpret a cached value without
    /// rebuilding the operation tree.
    fn as_leaf(&self) -> Option<Leaf> {
        None
    }
}

/// Type-erased native value, as stored in the object cache.
pub trait ErasedNative: Any + Send + Sync + fmt::Debug {
    fn as_any(&self) -> &dyn Any;

    /// Concrete leaf equivalent; see [`NativeValue::as_leaf`].
    fn concretize(&self) -> Option<Leaf>;

    fn native_type_name(&self) -> &'static str;
}

impl<T: NativeValue> ErasedNative for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn concretize(&self) -> Option<Leaf> {
        self.as_leaf()
    }

    fn native_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}
