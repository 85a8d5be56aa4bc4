//! Immutable expression handles.
//!
//! An `Expression` is a shared, never-mutated node: a model (leaf value or
//! operator application) plus three derived properties: the free variables,
//! whether any leaf underneath is symbolic, and the bit width.
//!
//! Expressions carry no backend state. Backend realizations are memoized in
//! a side-table keyed by `ExprId`, owned by whoever evaluates expressions.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::{metadata, BitVec, Leaf, Op, Sort, Symbol};

/// Set of free-variable names.
pub type VarSet = BTreeSet<crate::VarName>;

static NEXT_EXPR_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of an expression.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(u64);

impl ExprId {
    fn fresh() -> Self {
        ExprId(NEXT_EXPR_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

impl fmt::Display for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Operator applied to ordered operands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpNode {
    op: Op,
    operands: Vec<Operand>,
}

impl OpNode {
    pub fn new(op: Op, operands: Vec<Operand>) -> Self {
        OpNode { op, operands }
    }

    #[inline]
    pub fn op(&self) -> Op {
        self.op
    }

    #[inline]
    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }
}

/// An operator argument: either an expression or a raw leaf value.
///
/// Raw operands carry parameters such as extraction bounds. They have no
/// variables, are never symbolic, and are never cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    Expr(Expression),
    Raw(Leaf),
}

impl Operand {
    pub fn as_expr(&self) -> Option<&Expression> {
        match self {
            Operand::Expr(expr) => Some(expr),
            Operand::Raw(_) => None,
        }
    }

    pub fn symbolic(&self) -> bool {
        match self {
            Operand::Expr(expr) => expr.symbolic(),
            Operand::Raw(_) => false,
        }
    }

    pub fn length(&self) -> Option<u32> {
        match self {
            Operand::Expr(expr) => expr.length(),
            Operand::Raw(leaf) => leaf.length(),
        }
    }

    /// Integer payload of a raw integer or an integer leaf expression.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Operand::Raw(leaf) => leaf.as_int(),
            Operand::Expr(expr) => expr.as_leaf().and_then(Leaf::as_int),
        }
    }
}

impl From<Expression> for Operand {
    fn from(expr: Expression) -> Self {
        Operand::Expr(expr)
    }
}

impl From<&Expression> for Operand {
    fn from(expr: &Expression) -> Self {
        Operand::Expr(expr.clone())
    }
}

impl From<Leaf> for Operand {
    fn from(leaf: Leaf) -> Self {
        Operand::Raw(leaf)
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Raw(Leaf::Int(value))
    }
}

/// Union of the operands' variable sets; raw operands contribute nothing.
pub fn union_variables(operands: &[Operand]) -> VarSet {
    operands
        .iter()
        .filter_map(Operand::as_expr)
        .flat_map(|expr| expr.variables().iter().cloned())
        .collect()
}

/// Whether any operand expression is symbolic.
pub fn any_symbolic(operands: &[Operand]) -> bool {
    operands.iter().any(Operand::symbolic)
}

/// What an expression is made of.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Model {
    Leaf(Leaf),
    Node(OpNode),
}

impl Model {
    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Model::Leaf(leaf) => Some(leaf),
            Model::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&OpNode> {
        match self {
            Model::Node(node) => Some(node),
            Model::Leaf(_) => None,
        }
    }
}

struct ExprData {
    id: ExprId,
    model: Model,
    variables: VarSet,
    symbolic: bool,
    length: Option<u32>,
}

/// Shared handle to an immutable expression node.
///
/// Cloning is cheap. Equality and hashing use identity, not structure.
#[derive(Clone)]
pub struct Expression(Arc<ExprData>);

impl Expression {
    /// Build an expression with explicitly supplied properties.
    ///
    /// The caller is responsible for the properties agreeing with `model`.
    pub fn from_parts(model: Model, variables: VarSet, symbolic: bool, length: Option<u32>) -> Self {
        Expression(Arc::new(ExprData {
            id: ExprId::fresh(),
            model,
            variables,
            symbolic,
            length,
        }))
    }

    /// Build an expression, deriving its properties from the model.
    pub fn new(model: Model) -> Self {
        match model {
            Model::Leaf(leaf) => Self::leaf(leaf),
            Model::Node(node) => Self::node(node.op, node.operands),
        }
    }

    pub fn leaf(leaf: Leaf) -> Self {
        let variables = leaf
            .as_symbol()
            .map(|sym| VarSet::from([sym.name().clone()]))
            .unwrap_or_default();
        let symbolic = !leaf.is_concrete();
        let length = leaf.length();
        Self::from_parts(Model::Leaf(leaf), variables, symbolic, length)
    }

    /// Apply `op` to `operands`.
    ///
    /// Variables are the union over operands, `symbolic` is true if any
    /// operand is symbolic, and the length comes from operation metadata.
    pub fn node(op: Op, operands: Vec<Operand>) -> Self {
        let variables = union_variables(&operands);
        let symbolic = any_symbolic(&operands);
        let length = metadata::length_of(op, &operands);
        Self::from_parts(Model::Node(OpNode::new(op, operands)), variables, symbolic, length)
    }

    /// Concrete bitvector; `None` if the width is outside `1..=64`.
    pub fn bvv(value: u64, bits: u32) -> Option<Self> {
        BitVec::new(value, bits).map(|bv| Self::leaf(Leaf::BitVec(bv)))
    }

    /// Symbolic bitvector variable.
    pub fn bvs(name: &str, bits: u32) -> Self {
        Self::leaf(Leaf::Symbol(Symbol::new(name, Sort::BitVec(bits))))
    }

    pub fn bool_val(value: bool) -> Self {
        Self::leaf(Leaf::Bool(value))
    }

    pub fn bool_sym(name: &str) -> Self {
        Self::leaf(Leaf::Symbol(Symbol::new(name, Sort::Bool)))
    }

    pub fn int(value: i64) -> Self {
        Self::leaf(Leaf::Int(value))
    }

    pub fn int_sym(name: &str) -> Self {
        Self::leaf(Leaf::Symbol(Symbol::new(name, Sort::Int)))
    }

    #[inline]
    pub fn id(&self) -> ExprId {
        self.0.id
    }

    #[inline]
    pub fn model(&self) -> &Model {
        &self.0.model
    }

    #[inline]
    pub fn variables(&self) -> &VarSet {
        &self.0.variables
    }

    #[inline]
    pub fn symbolic(&self) -> bool {
        self.0.symbolic
    }

    #[inline]
    pub fn length(&self) -> Option<u32> {
        self.0.length
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        self.model().as_leaf()
    }

    pub fn as_node(&self) -> Option<&OpNode> {
        self.model().as_node()
    }

    /// Operator of an application node.
    pub fn op(&self) -> Option<Op> {
        self.as_node().map(OpNode::op)
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Expression {}

impl std::hash::Hash for Expression {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expression")
            .field("id", &self.id())
            .field("model", self.model())
            .field("variables", self.variables())
            .field("symbolic", &self.symbolic())
            .field("length", &self.length())
            .finish()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.model() {
            Model::Leaf(leaf) => write!(f, "{leaf}"),
            Model::Node(node) => {
                write!(f, "({}", node.op())?;
                for operand in node.operands() {
                    match operand {
                        Operand::Expr(expr) => write!(f, " {expr}")?,
                        Operand::Raw(leaf) => write!(f, " {leaf}")?,
                    }
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests;
