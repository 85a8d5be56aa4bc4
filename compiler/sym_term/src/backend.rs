//! The term backend.

use sym_backend::errors::check_arity;
use sym_backend::{
    ensure_sufficient_stack, Backend, BackendId, BackendResult, OpTable, Realizer, ResultContext,
};
use sym_concrete::ConcreteBackend;
use sym_ir::{Expression, Leaf, Model, Op, OpNode, Operand};

use crate::{fold, Term};

/// Builds term trees from expressions.
#[derive(Debug)]
pub struct TermBackend {
    id: BackendId,
    ops: OpTable<Self>,
    concrete: ConcreteBackend,
}

impl TermBackend {
    pub fn new() -> Self {
        let mut ops = OpTable::new();
        ops.register_raw_each(Op::ALL, |op| Box::new(move |args: &[Term]| apply(op, args)));
        ops.register_expr(Op::If, if_then_else);
        TermBackend {
            id: BackendId::fresh(),
            ops,
            concrete: ConcreteBackend::new(),
        }
    }

    fn abstract_operand(&self, op: Op, position: usize, arg: &Term) -> BackendResult<Operand> {
        if is_parameter(op, position) {
            if let Term::Const(leaf @ Leaf::Int(_)) = arg {
                return Ok(Operand::Raw(leaf.clone()));
            }
        }
        let model = ensure_sufficient_stack(|| self.abstract_native(arg))?;
        Ok(Operand::Expr(Expression::new(model)))
    }
}

impl Default for TermBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the application of `op`; reflected ops swap into forward form.
fn apply(op: Op, args: &[Term]) -> BackendResult<Term> {
    check_arity(op, args)?;
    let term = match args {
        [receiver, partner] if op.is_reflected() => {
            Term::app(op.forward(), vec![partner.clone(), receiver.clone()])
        }
        _ => Term::app(op, args.to_vec()),
    };
    Ok(term)
}

/// `If` with a constant condition is the chosen branch itself.
fn if_then_else(
    realizer: &Realizer<'_, TermBackend>,
    operands: &[Operand],
    ctx: Option<&ResultContext>,
) -> BackendResult<Expression> {
    if let [cond, then, otherwise] = operands {
        if let Some(taken) = realizer.convert_operand(cond, ctx)?.as_bool() {
            let branch = if taken { then } else { otherwise };
            if let Operand::Expr(expr) = branch {
                tracing::trace!(taken, branch = %expr.id(), "constant condition");
                return Ok(expr.clone());
            }
        }
    }
    realizer.call_expr_structural(Op::If, operands, ctx)
}

/// Integer parameters of `Extract`, `ZeroExt` and `SignExt`.
fn is_parameter(op: Op, position: usize) -> bool {
    match op {
        Op::Extract => position < 2,
        Op::ZeroExt | Op::SignExt => position == 0,
        _ => false,
    }
}

impl Backend for TermBackend {
    type Native = Term;

    fn id(&self) -> BackendId {
        self.id
    }

    fn name(&self) -> &'static str {
        "term"
    }

    fn ops(&self) -> &OpTable<Self> {
        &self.ops
    }

    /// Symbols assigned in `ctx` become constants; the rest stay variables.
    fn convert_leaf(&self, leaf: &Leaf, ctx: Option<&ResultContext>) -> BackendResult<Term> {
        let Leaf::Symbol(sym) = leaf else {
            return Ok(Term::Const(leaf.clone()));
        };
        let assigned = match ctx {
            Some(ctx) => ctx.value_of(self.name(), sym)?,
            None => None,
        };
        Ok(assigned.map_or_else(|| Term::Var(sym.clone()), |value| Term::Const(value.clone())))
    }

    fn simplify_raw(&self, native: Term) -> BackendResult<Term> {
        Ok(fold::fold(&self.concrete, &native))
    }

    fn abstract_native(&self, native: &Term) -> BackendResult<Model> {
        match native {
            Term::Const(leaf) => Ok(Model::Leaf(leaf.clone())),
            Term::Var(sym) => Ok(Model::Leaf(Leaf::Symbol(sym.clone()))),
            Term::App(op, args) => {
                let operands = args
                    .iter()
                    .enumerate()
                    .map(|(position, arg)| self.abstract_operand(*op, position, arg))
                    .collect::<BackendResult<Vec<_>>>()?;
                Ok(Model::Node(OpNode::new(*op, operands)))
            }
        }
    }
}
