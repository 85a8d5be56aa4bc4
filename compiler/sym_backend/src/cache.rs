//! Object cache: memoized backend realizations of expressions.
//!
//! Maps `(ExprId, BackendId)` to the native value that backend computed for
//! the expression. The cache is a side-table rather than a field on the
//! expression, so expressions stay immutable and the cache's lifetime is
//! the lifetime of its owning `Session`.
//!
//! Invariant: an entry is a valid realization of the expression's model for
//! that backend. Entries are only ever added, or replaced by `seed`; there is
//! no removal of individual entries.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use sym_ir::ExprId;

use crate::{BackendId, ErasedNative};

/// A cached native value of some backend.
pub type CachedNative = Arc<dyn ErasedNative>;

/// Per-expression slots, in insertion order. Most expressions are realized
/// by one or two backends.
pub type CacheSlots = SmallVec<[(BackendId, CachedNative); 2]>;

pub struct ObjectCache {
    entries: DashMap<ExprId, CacheSlots, FxBuildHasher>,
}

impl ObjectCache {
    pub fn new() -> Self {
        ObjectCache {
            entries: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// Pre-size for roughly `expressions` distinct expressions.
    pub fn with_capacity(expressions: usize) -> Self {
        ObjectCache {
            entries: DashMap::with_capacity_and_hasher(expressions, FxBuildHasher),
        }
    }

    pub fn get(&self, expr: ExprId, backend: BackendId) -> Option<CachedNative> {
        let slots = self.entries.get(&expr)?;
        slots
            .iter()
            .find(|(id, _)| *id == backend)
            .map(|(_, native)| Arc::clone(native))
    }

    pub fn contains(&self, expr: ExprId, backend: BackendId) -> bool {
        self.entries
            .get(&expr)
            .is_some_and(|slots| slots.iter().any(|(id, _)| *id == backend))
    }

    /// Snapshot of the entries other backends hold for `expr`, oldest first.
    ///
    /// Returned by value so callers can run backend code without holding a
    /// shard lock.
    pub fn foreign_entries(&self, expr: ExprId, backend: BackendId) -> CacheSlots {
        match self.entries.get(&expr) {
            Some(slots) => slots
                .iter()
                .filter(|(id, _)| *id != backend)
                .cloned()
                .collect(),
            None => CacheSlots::new(),
        }
    }

    /// Store `value` unless an entry already exists, and return the entry
    /// that is resident afterwards.
    ///
    /// Atomic per expression: concurrent conversions of the same expression
    /// under the same backend agree on a single cached value.
    pub fn insert_if_absent(
        &self,
        expr: ExprId,
        backend: BackendId,
        value: CachedNative,
    ) -> CachedNative {
        let mut slots = self.entries.entry(expr).or_default();
        if let Some((_, resident)) = slots.iter().find(|(id, _)| *id == backend) {
            return Arc::clone(resident);
        }
        slots.push((backend, Arc::clone(&value)));
        value
    }

    /// Store `value`, replacing any existing entry.
    pub fn seed(&self, expr: ExprId, backend: BackendId, value: CachedNative) {
        let mut slots = self.entries.entry(expr).or_default();
        if let Some(index) = slots.iter().position(|(id, _)| *id == backend) {
            slots[index].1 = value;
        } else {
            slots.push((backend, value));
        }
    }

    /// Backends holding an entry for `expr`, oldest first.
    pub fn backends_of(&self, expr: ExprId) -> Vec<BackendId> {
        self.entries
            .get(&expr)
            .map(|slots| slots.iter().map(|(id, _)| *id).collect())
            .unwrap_or_default()
    }

    /// Total number of cached values.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|slots| slots.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|slots| slots.is_empty())
    }
}

impl Default for ObjectCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObjectCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectCache")
            .field("expressions", &self.entries.len())
            .field("values", &self.len())
            .finish()
    }
}
