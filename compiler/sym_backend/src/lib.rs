//! Sym Backend - Conversion of symbolic expressions into backend-native
//! values, and operator dispatch over them.
//!
//! # Architecture
//!
//! - `Backend`: the hooks a backend supplies (leaf conversion, operator
//!   tables, optional salvage, simplification and abstraction)
//! - `OpTable`: per-op raw and expression-level handlers
//! - `NativeValue`: capability trait for dual dispatch on native values
//! - `ObjectCache`: `(expression, backend) -> native value` side-table
//! - `Session` / `Realizer`: cache owner, and a backend bound to it; all
//!   conversion, dispatch and simplification entry points live on `Realizer`
//!
//! Every failure is a `BackendError`. Conversion swallows failures of
//! individual salvage attempts; everything else propagates to the caller,
//! which may fall back to another backend.

mod backend;
mod cache;
mod context;
mod convert;
mod dispatch;
pub mod errors;
mod native;
mod op_table;
mod session;
mod simplify;
mod stack;

#[cfg(test)]
mod test_helpers;

pub use backend::{Backend, BackendId};
pub use cache::{CacheSlots, CachedNative, ObjectCache};
pub use context::ResultContext;
pub use dispatch::{call_raw, resolve_operator};
pub use errors::{BackendError, BackendResult};
pub use native::{Applied, ErasedNative, NativeValue};
pub use op_table::{ExprOpFn, OpTable, RawOpFn};
pub use session::{Realizer, Session, SessionBuilder};
pub use stack::ensure_sufficient_stack;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber for debug output.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=sym_backend=trace`.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
