//! Operator-style ops on concrete values.
//!
//! Operands arrive in source order with the op in forward form. Type pairs
//! the value set doesn't define an operator for answer `NotImplemented`, so
//! dispatch can still try the other operand.

use sym_backend::errors::{
    division_by_zero, integer_overflow, operand_type_mismatch, width_mismatch,
};
use sym_backend::{Applied, BackendResult};
use sym_ir::{BitVec, Op};

use crate::Value;

type OpResult = BackendResult<Applied<Value>>;

#[inline]
fn done(value: impl Into<Value>) -> OpResult {
    Ok(Applied::Value(value.into()))
}

/// Checked integer arithmetic; `None` means the result overflowed.
#[inline]
fn checked_arith(result: Option<i64>, op: Op) -> OpResult {
    result
        .map(|n| Applied::Value(Value::Int(n)))
        .ok_or_else(|| integer_overflow(op))
}

/// Checked integer division with zero guard.
#[inline]
fn checked_div<F>(divisor: i64, op: Op, f: F) -> OpResult
where
    F: FnOnce() -> Option<i64>,
{
    if divisor == 0 {
        Err(division_by_zero(op))
    } else {
        checked_arith(f(), op)
    }
}

/// Quotient rounded toward negative infinity.
fn floor_div(a: i64, b: i64) -> Option<i64> {
    let quotient = a.checked_div(b)?;
    let remainder = a.checked_rem(b)?;
    if remainder != 0 && (remainder < 0) != (b < 0) {
        quotient.checked_sub(1)
    } else {
        Some(quotient)
    }
}

/// Remainder with the sign of the divisor.
fn floor_mod(a: i64, b: i64) -> Option<i64> {
    let remainder = a.checked_rem(b)?;
    if remainder != 0 && (remainder < 0) != (b < 0) {
        remainder.checked_add(b)
    } else {
        Some(remainder)
    }
}

fn shift_amount(op: Op, b: i64) -> BackendResult<u32> {
    u32::try_from(b).map_err(|_| operand_type_mismatch(op, "a non-negative shift amount", b))
}

/// Apply a binary operator to two values.
pub(crate) fn eval_binary(op: Op, left: Value, right: Value) -> OpResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(op, a, b),
        (Value::BitVec(a), Value::BitVec(b)) => eval_bitvec_binary(op, a, b),
        (Value::Bool(a), Value::Bool(b)) => eval_bool_binary(op, a, b),
        _ => Ok(Applied::NotImplemented),
    }
}

/// Integer operators. Arithmetic is checked; division and remainder floor.
fn eval_int_binary(op: Op, a: i64, b: i64) -> OpResult {
    match op {
        Op::Add => checked_arith(a.checked_add(b), op),
        Op::Sub => checked_arith(a.checked_sub(b), op),
        Op::Mul => checked_arith(a.checked_mul(b), op),
        Op::Div => checked_div(b, op, || floor_div(a, b)),
        Op::Mod => checked_div(b, op, || floor_mod(a, b)),
        Op::And => done(a & b),
        Op::Or => done(a | b),
        Op::Xor => done(a ^ b),
        Op::Shl => {
            let shift = shift_amount(op, b)?;
            let shifted = (shift < 64).then(|| a << shift).filter(|r| r >> shift == a);
            checked_arith(shifted, op)
        }
        Op::Shr => {
            let shift = shift_amount(op, b)?;
            done(a >> shift.min(63))
        }
        Op::Eq => done(a == b),
        Op::Ne => done(a != b),
        Op::Lt => done(a < b),
        Op::Le => done(a <= b),
        Op::Gt => done(a > b),
        Op::Ge => done(a >= b),
        _ => Ok(Applied::NotImplemented),
    }
}

/// Bitvector operators. Arithmetic wraps at the operands' width; division
/// and remainder are unsigned, ordering comparisons signed.
fn eval_bitvec_binary(op: Op, a: BitVec, b: BitVec) -> OpResult {
    if a.bits() != b.bits() {
        return Err(width_mismatch(op, a.bits(), b.bits()));
    }
    let (x, y) = (a.value(), b.value());
    let width = u64::from(a.bits());
    let result = match op {
        Op::Add => x.wrapping_add(y),
        Op::Sub => x.wrapping_sub(y),
        Op::Mul => x.wrapping_mul(y),
        Op::Div => x.checked_div(y).ok_or_else(|| division_by_zero(op))?,
        Op::Mod => x.checked_rem(y).ok_or_else(|| division_by_zero(op))?,
        Op::And => x & y,
        Op::Or => x | y,
        Op::Xor => x ^ y,
        Op::Shl => {
            if y >= width {
                0
            } else {
                x << y
            }
        }
        Op::Shr => return done(a.with_signed(a.signed() >> y.min(width - 1))),
        Op::Eq => return done(x == y),
        Op::Ne => return done(x != y),
        Op::Lt => return done(a.signed() < b.signed()),
        Op::Le => return done(a.signed() <= b.signed()),
        Op::Gt => return done(a.signed() > b.signed()),
        Op::Ge => return done(a.signed() >= b.signed()),
        _ => return Ok(Applied::NotImplemented),
    };
    done(a.with_value(result))
}

fn eval_bool_binary(op: Op, a: bool, b: bool) -> OpResult {
    match op {
        Op::Eq => done(a == b),
        Op::Ne => done(a != b),
        Op::And => done(a & b),
        Op::Or => done(a | b),
        Op::Xor => done(a ^ b),
        _ => Ok(Applied::NotImplemented),
    }
}

/// Apply a unary operator to a value.
pub(crate) fn eval_unary(op: Op, value: Value) -> OpResult {
    match (op, value) {
        (Op::Neg, Value::Int(a)) => checked_arith(a.checked_neg(), op),
        (Op::Invert, Value::Int(a)) => done(!a),
        (Op::Neg, Value::BitVec(a)) => done(a.with_value(a.value().wrapping_neg())),
        (Op::Invert, Value::BitVec(a)) => done(a.with_value(!a.value())),
        _ => Ok(Applied::NotImplemented),
    }
}
