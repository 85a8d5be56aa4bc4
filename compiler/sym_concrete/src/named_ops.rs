//! Raw handlers for named ops.
//!
//! Named ops never go through dual dispatch, so every one the backend
//! supports needs a handler here. Handlers check arity and operand types
//! themselves.

use sym_backend::errors::{check_arity, operand_type_mismatch, width_mismatch};
use sym_backend::{BackendResult, OpTable};
use sym_ir::{BitVec, Op};

use crate::{ConcreteBackend, Value};

/// Install every named-op handler.
pub(crate) fn register(ops: &mut OpTable<ConcreteBackend>) {
    ops.register_raw(Op::LShR, lshr);
    ops.register_raw_each([Op::ULt, Op::ULe, Op::UGt, Op::UGe], |op| {
        Box::new(move |args: &[Value]| unsigned_compare(op, args))
    });
    ops.register_raw(Op::Concat, concat);
    ops.register_raw(Op::Extract, extract);
    ops.register_raw_each([Op::ZeroExt, Op::SignExt], |op| {
        Box::new(move |args: &[Value]| extend(op, args))
    });
    ops.register_raw_each([Op::BoolAnd, Op::BoolOr], |op| {
        Box::new(move |args: &[Value]| connective(op, args))
    });
    ops.register_raw(Op::BoolNot, not);
    ops.register_raw(Op::If, if_then_else);
}

fn bool_arg(op: Op, value: Value) -> BackendResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| operand_type_mismatch(op, "a bool", value.type_name()))
}

fn int_arg(op: Op, value: Value) -> BackendResult<i64> {
    value
        .as_int()
        .ok_or_else(|| operand_type_mismatch(op, "an int", value.type_name()))
}

fn bitvec_arg(op: Op, value: Value) -> BackendResult<BitVec> {
    value
        .as_bitvec()
        .ok_or_else(|| operand_type_mismatch(op, "a bitvector", value.type_name()))
}

/// Bit position or width parameter; must fit a 64-bit bitvector.
fn bit_index(op: Op, value: Value) -> BackendResult<u32> {
    let n = int_arg(op, value)?;
    u32::try_from(n)
        .ok()
        .filter(|n| *n <= BitVec::MAX_BITS)
        .ok_or_else(|| operand_type_mismatch(op, "a bit index within 0..=64", n))
}

/// Two bitvector operands of equal width. An integer on either side takes
/// the other side's width.
fn bitvec_pair(op: Op, args: &[Value]) -> BackendResult<(BitVec, BitVec)> {
    check_arity(op, args)?;
    let (a, b) = match (args[0], args[1]) {
        (Value::BitVec(a), Value::Int(n)) => (a, a.with_signed(n)),
        (Value::Int(n), Value::BitVec(b)) => (b.with_signed(n), b),
        (a, b) => (bitvec_arg(op, a)?, bitvec_arg(op, b)?),
    };
    if a.bits() != b.bits() {
        return Err(width_mismatch(op, a.bits(), b.bits()));
    }
    Ok((a, b))
}

fn lshr(args: &[Value]) -> BackendResult<Value> {
    let (a, b) = bitvec_pair(Op::LShR, args)?;
    let result = if b.value() >= u64::from(a.bits()) {
        0
    } else {
        a.value() >> b.value()
    };
    Ok(Value::BitVec(a.with_value(result)))
}

fn unsigned_compare(op: Op, args: &[Value]) -> BackendResult<Value> {
    let (a, b) = bitvec_pair(op, args)?;
    let (x, y) = (a.value(), b.value());
    let result = match op {
        Op::ULt => x < y,
        Op::ULe => x <= y,
        Op::UGt => x > y,
        _ => x >= y,
    };
    Ok(Value::Bool(result))
}

/// Join bitvectors, most significant first.
fn concat(args: &[Value]) -> BackendResult<Value> {
    let op = Op::Concat;
    check_arity(op, args)?;
    let mut value = 0u64;
    let mut bits = 0u32;
    for arg in args {
        let part = bitvec_arg(op, *arg)?;
        bits += part.bits();
        if bits > BitVec::MAX_BITS {
            return Err(operand_type_mismatch(op, "at most 64 bits in total", bits));
        }
        value = value.checked_shl(part.bits()).unwrap_or(0) | part.value();
    }
    BitVec::new(value, bits)
        .map(Value::BitVec)
        .ok_or_else(|| operand_type_mismatch(op, "at least one bit", bits))
}

/// Bits `hi` down to `lo` of `x`, inclusive.
fn extract(args: &[Value]) -> BackendResult<Value> {
    let op = Op::Extract;
    check_arity(op, args)?;
    let hi = bit_index(op, args[0])?;
    let lo = bit_index(op, args[1])?;
    let x = bitvec_arg(op, args[2])?;
    if lo > hi || hi >= x.bits() {
        return Err(operand_type_mismatch(
            op,
            format!("bounds within a {}-bit value", x.bits()).as_str(),
            format_args!("[{hi}:{lo}]"),
        ));
    }
    let bits = hi - lo + 1;
    BitVec::new(x.value() >> lo, bits)
        .map(Value::BitVec)
        .ok_or_else(|| operand_type_mismatch(op, "a valid width", bits))
}

/// Widen `x` by `n` bits, filling with zeros or with the sign bit.
fn extend(op: Op, args: &[Value]) -> BackendResult<Value> {
    check_arity(op, args)?;
    let n = bit_index(op, args[0])?;
    let x = bitvec_arg(op, args[1])?;
    let bits = x.bits() + n;
    let widened = if op == Op::SignExt {
        BitVec::from_i64(x.signed(), bits)
    } else {
        BitVec::new(x.value(), bits)
    };
    widened
        .map(Value::BitVec)
        .ok_or_else(|| operand_type_mismatch(op, "a result of at most 64 bits", bits))
}

/// Variadic boolean `And` / `Or`.
fn connective(op: Op, args: &[Value]) -> BackendResult<Value> {
    check_arity(op, args)?;
    let mut result = op == Op::BoolAnd;
    for arg in args {
        let b = bool_arg(op, *arg)?;
        result = if op == Op::BoolAnd { result && b } else { result || b };
    }
    Ok(Value::Bool(result))
}

fn not(args: &[Value]) -> BackendResult<Value> {
    check_arity(Op::BoolNot, args)?;
    Ok(Value::Bool(!bool_arg(Op::BoolNot, args[0])?))
}

fn if_then_else(args: &[Value]) -> BackendResult<Value> {
    check_arity(Op::If, args)?;
    if bool_arg(Op::If, args[0])? {
        Ok(args[1])
    } else {
        Ok(args[2])
    }
}

#[cfg(test)]
mod tests;
