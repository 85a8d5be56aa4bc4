#![allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]

use super::*;
use pretty_assertions::assert_eq;

fn names(vars: &VarSet) -> Vec<&str> {
    vars.iter().map(AsRef::as_ref).collect()
}

#[test]
fn concrete_leaf_properties() {
    let e = Expression::bvv(3, 8).unwrap();
    assert!(e.variables().is_empty());
    assert!(!e.symbolic());
    assert_eq!(e.length(), Some(8));
    assert_eq!(e.op(), None);
}

#[test]
fn symbol_leaf_properties() {
    let x = Expression::bvs("x", 32);
    assert_eq!(names(x.variables()), vec!["x"]);
    assert!(x.symbolic());
    assert_eq!(x.length(), Some(32));

    let flag = Expression::bool_sym("flag");
    assert!(flag.symbolic());
    assert_eq!(flag.length(), None);
}

#[test]
fn node_unions_variables_and_ors_symbolic() {
    let x = Expression::bvs("x", 8);
    let y = Expression::bvs("y", 8);
    let sum = Expression::node(Op::Add, vec![x.into(), y.into()]);
    let nested = Expression::node(Op::Sub, vec![sum.clone().into(), Expression::bvs("x", 8).into()]);

    assert_eq!(names(sum.variables()), vec!["x", "y"]);
    assert_eq!(names(nested.variables()), vec!["x", "y"]);
    assert!(nested.symbolic());
    assert_eq!(nested.length(), Some(8));
}

#[test]
fn raw_operands_contribute_nothing() {
    let low = Expression::node(
        Op::Extract,
        vec![Operand::from(3_i64), Operand::from(0_i64), Expression::bvv(0xab, 8).unwrap().into()],
    );
    assert!(low.variables().is_empty());
    assert!(!low.symbolic());
    assert_eq!(low.length(), Some(4));
}

#[test]
fn identity_equality() {
    let a = Expression::int(1);
    let b = Expression::int(1);
    assert_eq!(a, a.clone());
    assert_ne!(a, b);
    assert_ne!(a.id(), b.id());
}

#[test]
fn new_derives_from_model() {
    let node = OpNode::new(Op::Mul, vec![Expression::bvs("z", 16).into(), Operand::from(2_i64)]);
    let e = Expression::new(Model::Node(node));
    assert_eq!(names(e.variables()), vec!["z"]);
    assert!(e.symbolic());
    assert_eq!(e.length(), Some(16));
}

#[test]
fn display_is_prefix_form() {
    let e = Expression::node(
        Op::Add,
        vec![Expression::bvs("x", 8).into(), Expression::bvv(1, 8).unwrap().into()],
    );
    assert_eq!(e.to_string(), "(__add__ x:bv8 0x1#8)");
}
