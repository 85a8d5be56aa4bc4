#![allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]

use pretty_assertions::assert_eq;
use sym_backend::call_raw;
use sym_ir::{BitVec, Op};

use crate::{ConcreteBackend, Value};

fn bv(value: u64, bits: u32) -> Value {
    Value::BitVec(BitVec::new(value, bits).unwrap())
}

fn run(op: Op, args: &[Value]) -> Value {
    call_raw(&ConcreteBackend::new(), op, args).unwrap()
}

fn fails(op: Op, args: &[Value]) -> String {
    call_raw(&ConcreteBackend::new(), op, args)
        .unwrap_err()
        .message()
        .to_string()
}

#[test]
fn logical_shift_right() {
    assert_eq!(run(Op::LShR, &[bv(0x80, 8), bv(3, 8)]), bv(0x10, 8));
    assert_eq!(run(Op::LShR, &[bv(0x80, 8), bv(8, 8)]), bv(0, 8));
    assert_eq!(run(Op::LShR, &[bv(0x80, 8), Value::Int(7)]), bv(1, 8));
}

#[test]
fn unsigned_comparisons() {
    assert_eq!(run(Op::ULt, &[bv(0x01, 8), bv(0xff, 8)]), Value::Bool(true));
    assert_eq!(run(Op::UGt, &[bv(0x01, 8), bv(0xff, 8)]), Value::Bool(false));
    assert_eq!(run(Op::ULe, &[bv(5, 8), bv(5, 8)]), Value::Bool(true));
    assert_eq!(run(Op::UGe, &[Value::Int(-1), bv(0xff, 8)]), Value::Bool(true));
    assert_eq!(
        fails(Op::ULt, &[bv(1, 8), bv(1, 4)]),
        "ULT requires operands of equal width, got 8 and 4 bits"
    );
}

#[test]
fn concat_joins_most_significant_first() {
    assert_eq!(run(Op::Concat, &[bv(0xab, 8), bv(0xc, 4)]), bv(0xabc, 12));
    assert_eq!(run(Op::Concat, &[bv(0xab, 8)]), bv(0xab, 8));
    assert_eq!(
        run(Op::Concat, &[bv(u64::MAX, 64)]),
        bv(u64::MAX, 64)
    );
    assert_eq!(
        fails(Op::Concat, &[bv(0, 64), bv(0, 1)]),
        "Concat expects at most 64 bits in total, got 65"
    );
    assert_eq!(fails(Op::Concat, &[]), "Concat expects at least 1 operands, got 0");
}

#[test]
fn extract_takes_inclusive_bounds() {
    let x = bv(0xabcd, 16);
    assert_eq!(run(Op::Extract, &[Value::Int(15), Value::Int(8), x]), bv(0xab, 8));
    assert_eq!(run(Op::Extract, &[Value::Int(3), Value::Int(0), x]), bv(0xd, 4));
    assert_eq!(run(Op::Extract, &[Value::Int(0), Value::Int(0), x]), bv(1, 1));
    assert_eq!(
        fails(Op::Extract, &[Value::Int(16), Value::Int(0), x]),
        "Extract expects bounds within a 16-bit value, got [16:0]"
    );
    assert!(call_raw(&ConcreteBackend::new(), Op::Extract, &[Value::Int(2), Value::Int(3), x]).is_err());
}

#[test]
fn extensions() {
    assert_eq!(run(Op::ZeroExt, &[Value::Int(8), bv(0x80, 8)]), bv(0x80, 16));
    assert_eq!(run(Op::SignExt, &[Value::Int(8), bv(0x80, 8)]), bv(0xff80, 16));
    assert_eq!(run(Op::SignExt, &[Value::Int(8), bv(0x7f, 8)]), bv(0x7f, 16));
    assert_eq!(
        fails(Op::ZeroExt, &[Value::Int(60), bv(0, 8)]),
        "ZeroExt expects a result of at most 64 bits, got 68"
    );
    assert_eq!(
        fails(Op::ZeroExt, &[Value::Int(-1), bv(0, 8)]),
        "ZeroExt expects a bit index within 0..=64, got -1"
    );
}

#[test]
fn boolean_connectives() {
    let (t, f) = (Value::Bool(true), Value::Bool(false));
    assert_eq!(run(Op::BoolAnd, &[t, t, t]), t);
    assert_eq!(run(Op::BoolAnd, &[t, f, t]), f);
    assert_eq!(run(Op::BoolOr, &[f, f, t]), t);
    assert_eq!(run(Op::BoolOr, &[f]), f);
    assert_eq!(run(Op::BoolNot, &[f]), t);
    assert_eq!(
        fails(Op::BoolAnd, &[t, Value::Int(1)]),
        "And expects a bool, got int"
    );
}

#[test]
fn if_selects_branch() {
    let (a, b) = (Value::Int(1), Value::Int(2));
    assert_eq!(run(Op::If, &[Value::Bool(true), a, b]), a);
    assert_eq!(run(Op::If, &[Value::Bool(false), a, b]), b);
    assert_eq!(fails(Op::If, &[a, a, b]), "If expects a bool, got int");
    assert_eq!(fails(Op::If, &[a, b]), "If expects 3 operands, got 2");
}

#[test]
fn every_named_op_has_a_handler() {
    let backend = ConcreteBackend::new();
    let named: Vec<Op> = Op::ALL.into_iter().filter(|op| !op.is_operator()).collect();
    let registered: Vec<Op> = sym_backend::Backend::ops(&backend).raw_ops().collect();
    assert_eq!(registered, named);
}
