//! End-to-end evaluation through a session.

#![allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sym_backend::{call_raw, Backend, NativeValue, ResultContext, Session};
use sym_concrete::{ConcreteBackend, Value};
use sym_ir::{BitVec, Expression, Leaf, Model, Op, Operand};

fn bvv(value: u64, bits: u32) -> Expression {
    Expression::bvv(value, bits).unwrap()
}

fn bits(value: u64, width: u32) -> Value {
    Value::BitVec(BitVec::new(value, width).unwrap())
}

#[test]
fn add_then_add_again() {
    let session = Session::new();
    let backend = ConcreteBackend::new();
    let realizer = session.realizer(&backend);

    let e = Expression::node(Op::Add, vec![bvv(3, 8).into(), bvv(4, 8).into()]);
    assert_eq!(realizer.convert(&e, None).unwrap(), bits(7, 8));
    assert!(session.cache().contains(e.id(), backend.id()));

    let f = realizer
        .call_expr(Op::Add, &[e.into(), bvv(1, 8).into()], None)
        .unwrap();
    assert_eq!(f.length(), Some(8));
    assert!(!f.symbolic());
    assert_eq!(realizer.convert(&f, None).unwrap(), bits(8, 8));
}

#[test]
fn symbolic_sum_under_assignment() {
    let session = Session::new();
    let backend = ConcreteBackend::new();
    let realizer = session.realizer(&backend);
    let x = Expression::bvs("x", 8);
    let ctx = ResultContext::new().with("x", Leaf::BitVec(BitVec::new(0xff, 8).unwrap()));

    let e = realizer
        .call_expr(Op::Add, &[x.into(), 1_i64.into()], Some(&ctx))
        .unwrap();
    assert!(e.symbolic());
    assert_eq!(e.variables().len(), 1);
    assert_eq!(e.length(), Some(8));
    assert!(session.cache().is_empty());

    assert_eq!(e.as_leaf(), Some(&Leaf::BitVec(BitVec::new(0, 8).unwrap())));
    assert_eq!(realizer.convert(&e, None).unwrap(), bits(0, 8));
}

#[test]
fn mixed_width_operands_fail() {
    let session = Session::new();
    let backend = ConcreteBackend::new();
    let e = Expression::node(Op::Add, vec![bvv(1, 8).into(), bvv(1, 16).into()]);
    let err = session.realizer(&backend).convert(&e, None).unwrap_err();
    assert_eq!(err.message(), "__add__ requires operands of equal width, got 8 and 16 bits");
}

#[test]
fn int_plus_bitvec_resolves_on_the_bitvector() {
    let backend = ConcreteBackend::new();
    assert_eq!(
        call_raw(&backend, Op::Add, &[Value::Int(2), bits(0xff, 8)]).unwrap(),
        bits(1, 8)
    );
    assert_eq!(
        call_raw(&backend, Op::Lt, &[Value::Int(-1), bits(0, 8)]).unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn bool_and_int_do_not_mix() {
    let backend = ConcreteBackend::new();
    let err = call_raw(&backend, Op::Add, &[Value::Bool(true), Value::Int(1)]).unwrap_err();
    assert_eq!(
        err.message(),
        "unable to apply operation: neither __add__ nor __radd__ apply on the provided args"
    );
}

#[test]
fn named_ops_over_expressions() {
    let session = Session::new();
    let backend = ConcreteBackend::new();
    let realizer = session.realizer(&backend);

    let wide = Expression::node(Op::Concat, vec![bvv(0xab, 8).into(), bvv(0xcd, 8).into()]);
    let low = Expression::node(
        Op::Extract,
        vec![Operand::Raw(Leaf::Int(7)), Operand::Raw(Leaf::Int(0)), wide.into()],
    );
    assert_eq!(low.length(), Some(8));
    assert_eq!(realizer.convert(&low, None).unwrap(), bits(0xcd, 8));

    let choice = Expression::node(
        Op::If,
        vec![
            Expression::bool_val(false).into(),
            bvv(1, 8).into(),
            bvv(2, 8).into(),
        ],
    );
    assert_eq!(realizer.convert(&choice, None).unwrap(), bits(2, 8));
}

#[test]
fn simplify_evaluates() {
    let session = Session::new();
    let backend = ConcreteBackend::new();
    let realizer = session.realizer(&backend);
    let e = Expression::node(Op::Mul, vec![bvv(6, 8).into(), bvv(7, 8).into()]);

    let simplified = realizer.simplify(&e).unwrap();
    assert_eq!(
        simplified.model(),
        &Model::Leaf(Leaf::BitVec(BitVec::new(42, 8).unwrap()))
    );
    assert_eq!(simplified.length(), Some(8));
}

fn operand() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i32>().prop_map(|n| Value::Int(i64::from(n))),
        any::<u8>().prop_map(|n| bits(u64::from(n), 8)),
    ]
}

fn arithmetic_op() -> impl Strategy<Value = Op> {
    prop::sample::select(vec![
        Op::Add,
        Op::Sub,
        Op::Mul,
        Op::And,
        Op::Or,
        Op::Xor,
        Op::Eq,
        Op::Ne,
        Op::Lt,
        Op::Le,
        Op::Gt,
        Op::Ge,
    ])
}

proptest! {
    #[test]
    fn reflected_method_agrees_with_dispatch(op in arithmetic_op(), x in operand(), y in operand()) {
        let backend = ConcreteBackend::new();
        let dispatched = call_raw(&backend, op, &[x, y]);
        if !x.apply(op, &[y]).unwrap().is_not_implemented() {
            return Ok(());
        }
        let opposite = op.opposite().unwrap();
        let direct = y.apply(opposite, &[x]).unwrap();
        match direct {
            sym_backend::Applied::Value(value) => prop_assert_eq!(dispatched.unwrap(), value),
            sym_backend::Applied::NotImplemented => prop_assert!(dispatched.is_err()),
        }
    }

    #[test]
    fn bitvec_addition_matches_wrapping(a in any::<u8>(), b in any::<u8>()) {
        let backend = ConcreteBackend::new();
        let sum = call_raw(&backend, Op::Add, &[bits(u64::from(a), 8), bits(u64::from(b), 8)]).unwrap();
        prop_assert_eq!(sum, bits(u64::from(a.wrapping_add(b)), 8));
    }
}
