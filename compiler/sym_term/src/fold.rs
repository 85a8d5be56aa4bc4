//! Term simplification.
//!
//! Bottom-up: arguments are folded first, a ground application is evaluated
//! by the concrete backend, anything else goes through the identity rules.
//! Ground applications the concrete backend rejects (division by zero, width
//! mismatches) are kept as they are.

use sym_backend::{call_raw, ensure_sufficient_stack};
use sym_concrete::{ConcreteBackend, Value};
use sym_ir::{Leaf, Op, Sort};

use crate::Term;

/// Simplify `term`.
pub(crate) fn fold(concrete: &ConcreteBackend, term: &Term) -> Term {
    let Term::App(op, args) = term else {
        return term.clone();
    };
    let args: Vec<Term> = args
        .iter()
        .map(|arg| ensure_sufficient_stack(|| fold(concrete, arg)))
        .collect();

    if let Some(value) = evaluate(concrete, *op, &args) {
        return Term::Const(value.to_leaf());
    }
    rewrite(*op, args)
}

/// Evaluate an application whose arguments are all constants.
fn evaluate(concrete: &ConcreteBackend, op: Op, args: &[Term]) -> Option<Value> {
    let values = args
        .iter()
        .map(|arg| arg.constant().and_then(Value::from_leaf))
        .collect::<Option<Vec<_>>>()?;
    match call_raw(concrete, op, &values) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::trace!(%op, %err, "ground application left unfolded");
            None
        }
    }
}

/// Algebraic identities on already-folded arguments.
fn rewrite(op: Op, args: Vec<Term>) -> Term {
    if matches!(op, Op::BoolAnd | Op::BoolOr) {
        return connective(op, args);
    }
    let simplified = match (op, args.as_slice()) {
        (Op::Add | Op::Sub | Op::Or | Op::Xor, [x, zero]) if zero.is_zero() && absorbs(x, zero) => {
            Some(x.clone())
        }
        (Op::Add | Op::Or | Op::Xor, [zero, x]) if zero.is_zero() && absorbs(x, zero) => {
            Some(x.clone())
        }
        (Op::Mul, [x, one]) if one.is_one() && absorbs(x, one) => Some(x.clone()),
        (Op::Mul, [one, x]) if one.is_one() && absorbs(x, one) => Some(x.clone()),
        (Op::And | Op::Or, [x, y]) if x == y => Some(x.clone()),
        (Op::Eq, [x, y]) if x == y => Some(Term::Const(Leaf::Bool(true))),
        (Op::BoolNot, [Term::App(Op::BoolNot, inner)]) => match &**inner {
            [x] => Some(x.clone()),
            _ => None,
        },
        (Op::If, [cond, then, otherwise]) => match cond.as_bool() {
            Some(true) => Some(then.clone()),
            Some(false) => Some(otherwise.clone()),
            None => (then == otherwise).then(|| then.clone()),
        },
        _ => None,
    };
    simplified.unwrap_or_else(|| Term::app(op, args))
}

/// Whether combining `x` with the neutral constant `unit` yields a value of
/// `x`'s own sort. A bitvector takes an `Int` unit at its width; any other
/// mix changes or rejects the result.
fn absorbs(x: &Term, unit: &Term) -> bool {
    match (x.sort(), unit.sort()) {
        (Some(Sort::BitVec(_)), Some(Sort::Int)) => true,
        (Some(ours), Some(theirs)) => ours == theirs,
        _ => false,
    }
}

/// Variadic `And` / `Or` with constant arguments.
fn connective(op: Op, mut args: Vec<Term>) -> Term {
    // `absorbing` decides the result outright; its negation drops out.
    let absorbing = op == Op::BoolOr;
    if args.iter().any(|arg| arg.as_bool() == Some(absorbing)) {
        return Term::Const(Leaf::Bool(absorbing));
    }
    args.retain(|arg| arg.as_bool() != Some(!absorbing));
    match args.len() {
        0 => Term::Const(Leaf::Bool(!absorbing)),
        1 => args.swap_remove(0),
        _ => Term::app(op, args),
    }
}
