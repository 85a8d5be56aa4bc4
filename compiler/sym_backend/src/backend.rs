//! The backend interface.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use sym_ir::{Leaf, Model};

use crate::errors::{abstraction_unsupported, salvage_unavailable};
use crate::{BackendResult, ErasedNative, NativeValue, OpTable, ResultContext};

static NEXT_BACKEND_ID: AtomicU32 = AtomicU32::new(0);

/// Identity of a backend instance; keys the object cache.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BackendId(u32);

impl BackendId {
    /// Allocate a fresh identity. Call once per backend instance.
    pub fn fresh() -> Self {
        BackendId(NEXT_BACKEND_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BackendId({})", self.0)
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

/// A converter and executor for expressions.
///
/// Backends are immutable after construction: their operator tables are
/// fixed, and memoized results live in a [`Session`](crate::Session), not
/// on the backend. Conversion, caching and dispatch are driven by a
/// [`Realizer`](crate::Realizer); a backend only supplies the hooks below.
pub trait Backend: Send + Sync + Sized {
    type Native: NativeValue;

    fn id(&self) -> BackendId;

    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    fn ops(&self) -> &OpTable<Self>;

    /// Realize a raw leaf value.
    fn convert_leaf(&self, leaf: &Leaf, ctx: Option<&ResultContext>) -> BackendResult<Self::Native>;

    /// Reinterpret a value cached by another backend.
    ///
    /// The default reuses values of the same native type as-is and
    /// otherwise goes through the value's concrete leaf equivalent.
    fn convert_foreign(
        &self,
        foreign: &dyn ErasedNative,
        ctx: Option<&ResultContext>,
    ) -> BackendResult<Self::Native> {
        if let Some(native) = foreign.as_any().downcast_ref::<Self::Native>() {
            return Ok(native.clone());
        }
        match foreign.concretize() {
            Some(leaf) => self.convert_leaf(&leaf, ctx),
            None => Err(salvage_unavailable(self.name(), foreign.native_type_name())),
        }
    }

    /// Rewrite a native value into a simpler equivalent one.
    fn simplify_raw(&self, native: Self::Native) -> BackendResult<Self::Native> {
        Ok(native)
    }

    /// Turn a native value back into an expression model.
    ///
    /// Backends that support simplification must override this; the default
    /// always fails.
    fn abstract_native(&self, _native: &Self::Native) -> BackendResult<Model> {
        Err(abstraction_unsupported(self.name()))
    }
}
