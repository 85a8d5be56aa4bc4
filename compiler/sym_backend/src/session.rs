//! Evaluation sessions.
//!
//! A `Session` owns the object cache shared by every backend realizing
//! expressions within one evaluation. `Session::realizer` pairs it with a
//! backend; the resulting `Realizer` is what callers convert and dispatch
//! through.

use std::sync::Arc;

use sym_ir::Expression;

use crate::errors::cache_type_mismatch;
use crate::{Backend, BackendResult, ObjectCache};

/// Owner of the object cache for one evaluation.
#[derive(Debug)]
pub struct Session {
    cache: ObjectCache,
    salvage: bool,
}

impl Session {
    /// Session with default options: salvage enabled, unsized cache.
    pub fn new() -> Self {
        SessionBuilder::new().build()
    }

    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    #[inline]
    pub fn cache(&self) -> &ObjectCache {
        &self.cache
    }

    /// Whether conversion may reuse values cached by other backends.
    #[inline]
    pub fn salvage_enabled(&self) -> bool {
        self.salvage
    }

    /// Pair this session with a backend.
    pub fn realizer<'s, B: Backend>(&'s self, backend: &'s B) -> Realizer<'s, B> {
        Realizer {
            session: self,
            backend,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Session`].
#[derive(Clone, Debug)]
pub struct SessionBuilder {
    salvage: bool,
    capacity: usize,
}

impl SessionBuilder {
    pub fn new() -> Self {
        SessionBuilder {
            salvage: true,
            capacity: 0,
        }
    }

    /// Enable or disable cross-backend salvage.
    ///
    /// With salvage disabled, an uncached operation node is always realized
    /// from its operands.
    #[must_use]
    pub fn salvage(mut self, enabled: bool) -> Self {
        self.salvage = enabled;
        self
    }

    /// Pre-size the object cache for roughly `expressions` expressions.
    #[must_use]
    pub fn capacity(mut self, expressions: usize) -> Self {
        self.capacity = expressions;
        self
    }

    pub fn build(self) -> Session {
        Session {
            cache: ObjectCache::with_capacity(self.capacity),
            salvage: self.salvage,
        }
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A backend bound to a session.
///
/// Conversion lives in `convert.rs`, dispatch in `dispatch.rs`, and
/// simplification in `simplify.rs`.
pub struct Realizer<'s, B> {
    pub(crate) session: &'s Session,
    pub(crate) backend: &'s B,
}

impl<B> Clone for Realizer<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for Realizer<'_, B> {}

impl<'s, B: Backend> Realizer<'s, B> {
    #[inline]
    pub fn backend(&self) -> &'s B {
        self.backend
    }

    #[inline]
    pub fn session(&self) -> &'s Session {
        self.session
    }

    /// This backend's cached value for `expr`, if any.
    pub fn cached(&self, expr: &Expression) -> BackendResult<Option<B::Native>> {
        let Some(entry) = self.session.cache().get(expr.id(), self.backend.id()) else {
            return Ok(None);
        };
        entry
            .as_any()
            .downcast_ref::<B::Native>()
            .cloned()
            .map(Some)
            .ok_or_else(|| cache_type_mismatch(self.backend.name()))
    }

    /// Cache `native` for `expr` unless a value is already resident, and
    /// return the resident value.
    pub(crate) fn store(&self, expr: &Expression, native: B::Native) -> BackendResult<B::Native> {
        let resident =
            self.session
                .cache()
                .insert_if_absent(expr.id(), self.backend.id(), Arc::new(native));
        resident
            .as_any()
            .downcast_ref::<B::Native>()
            .cloned()
            .ok_or_else(|| cache_type_mismatch(self.backend.name()))
    }

    /// Cache `native` for `expr`, replacing any resident value.
    pub(crate) fn seed(&self, expr: &Expression, native: B::Native) {
        self.session
            .cache()
            .seed(expr.id(), self.backend.id(), Arc::new(native));
    }
}
