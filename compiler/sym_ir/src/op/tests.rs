use super::*;
use pretty_assertions::assert_eq;

#[test]
fn all_is_in_discriminant_order() {
    for (index, op) in Op::ALL.iter().enumerate() {
        assert_eq!(op.index(), index, "{op} is out of order");
    }
}

#[test]
fn names_round_trip() {
    for op in Op::ALL {
        assert_eq!(Op::from_name(op.name()), Some(op));
    }
    assert_eq!(Op::from_name("__pow__"), None);
}

#[test]
fn opposite_is_an_involution() {
    for op in Op::ALL {
        if let Some(opposite) = op.opposite() {
            assert_eq!(opposite.opposite(), Some(op), "{op} / {opposite}");
        }
    }
}

#[test]
fn comparisons_mirror() {
    assert_eq!(Op::Lt.opposite(), Some(Op::Gt));
    assert_eq!(Op::Le.opposite(), Some(Op::Ge));
    assert_eq!(Op::Eq.opposite(), Some(Op::Eq));
    assert_eq!(Op::Ne.opposite(), Some(Op::Ne));
}

#[test]
fn unary_and_named_ops_have_no_opposite() {
    for op in [Op::Neg, Op::Invert, Op::Concat, Op::Extract, Op::BoolNot, Op::If] {
        assert_eq!(op.opposite(), None, "{op}");
    }
}

#[test]
fn only_dunder_names_are_operators() {
    for op in Op::ALL {
        assert_eq!(op.is_operator(), op.name().starts_with("__"), "{op}");
    }
}

#[test]
fn reflected_ops_forward_to_their_opposite() {
    for op in Op::ALL.into_iter().filter(|op| op.is_reflected()) {
        assert_eq!(Some(op.forward()), op.opposite());
        assert!(!op.forward().is_reflected());
    }
    assert_eq!(Op::Lt.forward(), Op::Lt);
}

#[test]
fn arity_checks() {
    assert!(Op::Add.arity().accepts(2));
    assert!(!Op::Add.arity().accepts(1));
    assert!(Op::Concat.arity().accepts(5));
    assert!(!Op::Concat.arity().accepts(0));
    assert!(Op::Extract.arity().accepts(3));
    assert_eq!(Op::Concat.arity().to_string(), "at least 1");
}
