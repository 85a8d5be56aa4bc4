//! Operation metadata: result widths and reflected-operator pairing.

use crate::{Op, Operand};

/// Bit width of `op` applied to `operands`, or `None` for boolean-valued
/// operations and operands of unknown width.
pub fn length_of(op: Op, operands: &[Operand]) -> Option<u32> {
    if op.is_boolean() {
        return None;
    }
    match op {
        Op::Extract => {
            let [high, low, _] = operands else {
                return None;
            };
            let width = high.as_int()?.checked_sub(low.as_int()?)?.checked_add(1)?;
            u32::try_from(width).ok().filter(|&w| w > 0)
        }
        Op::ZeroExt | Op::SignExt => {
            let [amount, inner] = operands else {
                return None;
            };
            let amount = u32::try_from(amount.as_int()?).ok()?;
            inner.length()?.checked_add(amount)
        }
        Op::Concat => operands
            .iter()
            .try_fold(0u32, |total, operand| total.checked_add(operand.length()?)),
        Op::If => {
            let [_, then_branch, else_branch] = operands else {
                return None;
            };
            then_branch.length().or_else(|| else_branch.length())
        }
        _ => operands.iter().find_map(Operand::length),
    }
}

/// Operator tried on the second operand when the first cannot resolve `op`.
#[inline]
pub fn opposite_of(op: Op) -> Option<Op> {
    op.opposite()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests {
    use super::*;
    use crate::Expression;
    use pretty_assertions::assert_eq;

    fn bv(value: u64, bits: u32) -> Operand {
        Operand::Expr(Expression::bvv(value, bits).unwrap())
    }

    #[test]
    fn arithmetic_keeps_operand_width() {
        assert_eq!(length_of(Op::Add, &[bv(1, 8), bv(2, 8)]), Some(8));
        assert_eq!(length_of(Op::RAdd, &[Operand::from(3_i64), bv(2, 16)]), Some(16));
        assert_eq!(length_of(Op::Neg, &[bv(1, 32)]), Some(32));
    }

    #[test]
    fn comparisons_have_no_length() {
        assert_eq!(length_of(Op::Lt, &[bv(1, 8), bv(2, 8)]), None);
        assert_eq!(length_of(Op::ULe, &[bv(1, 8), bv(2, 8)]), None);
        assert_eq!(length_of(Op::BoolNot, &[Expression::bool_val(true).into()]), None);
    }

    #[test]
    fn extract_width_is_inclusive() {
        let ops = [Operand::from(7_i64), Operand::from(4_i64), bv(0xff, 16)];
        assert_eq!(length_of(Op::Extract, &ops), Some(4));
        let inverted = [Operand::from(3_i64), Operand::from(4_i64), bv(0xff, 16)];
        assert_eq!(length_of(Op::Extract, &inverted), None);
    }

    #[test]
    fn extensions_add_width() {
        assert_eq!(length_of(Op::ZeroExt, &[Operand::from(8_i64), bv(1, 8)]), Some(16));
        assert_eq!(length_of(Op::SignExt, &[Operand::from(-1_i64), bv(1, 8)]), None);
    }

    #[test]
    fn concat_sums_widths() {
        assert_eq!(length_of(Op::Concat, &[bv(1, 8), bv(1, 4), bv(1, 4)]), Some(16));
        let unknown = [bv(1, 8), Expression::int(3).into()];
        assert_eq!(length_of(Op::Concat, &unknown), None);
    }

    #[test]
    fn if_takes_branch_width() {
        let ops = [Expression::bool_sym("c").into(), bv(1, 8), bv(2, 8)];
        assert_eq!(length_of(Op::If, &ops), Some(8));
    }

    #[test]
    fn opposite_of_reflects() {
        assert_eq!(opposite_of(Op::Add), Some(Op::RAdd));
        assert_eq!(opposite_of(Op::Ge), Some(Op::Le));
        assert_eq!(opposite_of(Op::Concat), None);
    }
}
