//! Simplification through a backend.

use sym_ir::{Expression, Model};

use crate::{Backend, BackendResult, Realizer};

impl<B: Backend> Realizer<'_, B> {
    /// Simplify `expr` through this backend.
    ///
    /// The native value is rewritten by the backend, then abstracted back
    /// into a model. The result keeps the input's variables, symbolism and
    /// length, and starts with the simplified native value cached for this
    /// backend.
    #[tracing::instrument(level = "debug", skip_all, fields(backend = self.backend.name(), expr = %expr.id()))]
    pub fn simplify(&self, expr: &Expression) -> BackendResult<Expression> {
        let native = self.convert(expr, None)?;
        let simplified = self.backend.simplify_raw(native)?;
        let model = self.backend.abstract_native(&simplified)?;
        let result = Expression::from_parts(
            model,
            expr.variables().clone(),
            expr.symbolic(),
            expr.length(),
        );
        self.seed(&result, simplified);
        Ok(result)
    }

    /// Model of `expr`'s native value under this backend.
    pub fn abstract_expr(&self, expr: &Expression) -> BackendResult<Model> {
        let native = self.convert(expr, None)?;
        self.backend.abstract_native(&native)
    }
}
