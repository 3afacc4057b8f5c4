//! Boolean expression trees with parsing, evaluation and operator overloading
//!
//! An [`Expression`] is an immutable, cheaply clonable node of a Boolean formula.
//! Nodes are reference counted, so sub-expressions may be shared freely between
//! several trees (the result is a DAG, never a cycle).
//!
//! # Construction
//!
//! Expressions can be built in three ways:
//!
//! 1. Method API: `a.and(&b).or(&c)`
//! 2. Operator overloading: `&a * &b + &c`
//! 3. The `expr!` macro: `expr!(a * b + c)`
//!
//! or parsed from text with [`Expression::parse`]:
//!
//! ```
//! use qmc_logic::Expression;
//!
//! # fn main() -> Result<(), qmc_logic::ExpressionParseError> {
//! let xnor = Expression::parse("A*B + !A*!B")?;
//! assert_eq!(xnor.to_string(), "A * B + !A * !B");
//! # Ok(())
//! # }
//! ```
//!
//! # Simplifying and raw constructors
//!
//! The regular constructors keep `And`/`Or` operand lists flat (`a * (b * c)`
//! becomes a single three-input `And`), remove double negations and fold
//! constants in `xor`/`not`. The modifier pipeline relies on the raw variants
//! ([`Expression::and_no_merge`], [`Expression::or_no_merge`],
//! [`Expression::not_no_simplify`]) to build structure that must survive
//! as-is, such as fan-in limited gate trees.

mod ast;
mod display;
pub mod error;
mod eval;
mod operators;
mod parser;
mod tokenizer;

pub use ast::ExprNode;
pub use error::{EvalError, ExpressionParseError};
pub use eval::{Context, ContextFiller, MAX_TABLE_VARIABLES};
pub use parser::Parser;
pub use tokenizer::{Token, Tokenizer};

use std::sync::Arc;

/// A Boolean expression
///
/// Uses `Arc` internally, so cloning only bumps a reference count. Equality
/// (`==`) is structural; use [`Expression::equivalent_to`] to compare truth
/// tables.
///
/// # Examples
///
/// ```
/// use qmc_logic::{ExprKind, Expression};
///
/// let a = Expression::variable("a");
/// let b = Expression::variable("b");
/// let c = Expression::variable("c");
///
/// let expr = a.and(&b).and(&c);
/// match expr.kind() {
///     ExprKind::And(operands) => assert_eq!(operands.len(), 3),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Expression {
    inner: Arc<ExprKind>,
}

/// The shape of an expression node
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum ExprKind {
    /// A constant value (true or false)
    Constant(bool),
    /// A named variable
    Variable(Arc<str>),
    /// Logical NOT
    Not(Expression),
    /// Logical AND over an ordered, non-empty operand list
    And(Vec<Expression>),
    /// Logical OR over an ordered, non-empty operand list
    Or(Vec<Expression>),
    /// Exclusive OR of two operands
    Xor(Expression, Expression),
}

impl Expression {
    /// Wrap a node without any simplification
    pub fn new(kind: ExprKind) -> Self {
        Expression {
            inner: Arc::new(kind),
        }
    }

    /// Create a constant expression (true or false)
    pub fn constant(value: bool) -> Self {
        Expression::new(ExprKind::Constant(value))
    }

    /// Create a variable expression with the given name
    pub fn variable(name: &str) -> Self {
        Expression::new(ExprKind::Variable(Arc::from(name)))
    }

    /// The node shape of this expression
    pub fn kind(&self) -> &ExprKind {
        &self.inner
    }

    /// Logical NOT
    ///
    /// Removes a double negation (`!!a` becomes `a`) and folds constants.
    pub fn not(&self) -> Expression {
        match self.kind() {
            ExprKind::Not(inner) => inner.clone(),
            ExprKind::Constant(value) => Expression::constant(!value),
            _ => Expression::new(ExprKind::Not(self.clone())),
        }
    }

    /// Logical NOT that is never folded
    ///
    /// Used to build protected double negations such as the inverter behind a
    /// NAND gate.
    pub fn not_no_simplify(&self) -> Expression {
        Expression::new(ExprKind::Not(self.clone()))
    }

    /// Logical AND of two expressions
    pub fn and(&self, other: &Expression) -> Expression {
        Expression::and_all([self.clone(), other.clone()])
    }

    /// Logical OR of two expressions
    pub fn or(&self, other: &Expression) -> Expression {
        Expression::or_all([self.clone(), other.clone()])
    }

    /// Exclusive OR of two expressions
    ///
    /// Constant operands are folded: `a ^ 1` is `!a` and `a ^ 0` is `a`.
    pub fn xor(&self, other: &Expression) -> Expression {
        match (self.as_constant(), other.as_constant()) {
            (_, Some(true)) => self.not(),
            (_, Some(false)) => self.clone(),
            (Some(true), _) => other.not(),
            (Some(false), _) => other.clone(),
            _ => Expression::new(ExprKind::Xor(self.clone(), other.clone())),
        }
    }

    /// AND over any number of operands, flattening nested ANDs
    ///
    /// Returns the operand itself for a single operand and `1` for none.
    pub fn and_all<I>(operands: I) -> Expression
    where
        I: IntoIterator<Item = Expression>,
    {
        let mut merged = Vec::new();
        for operand in operands {
            match operand.kind() {
                ExprKind::And(inner) => merged.extend(inner.iter().cloned()),
                _ => merged.push(operand),
            }
        }
        Expression::and_no_merge(merged)
    }

    /// OR over any number of operands, flattening nested ORs
    ///
    /// Returns the operand itself for a single operand and `0` for none.
    pub fn or_all<I>(operands: I) -> Expression
    where
        I: IntoIterator<Item = Expression>,
    {
        let mut merged = Vec::new();
        for operand in operands {
            match operand.kind() {
                ExprKind::Or(inner) => merged.extend(inner.iter().cloned()),
                _ => merged.push(operand),
            }
        }
        Expression::or_no_merge(merged)
    }

    /// AND over the operands exactly as given (nested ANDs are kept)
    pub fn and_no_merge(mut operands: Vec<Expression>) -> Expression {
        match operands.len() {
            0 => Expression::constant(true),
            1 => operands.remove(0),
            _ => Expression::new(ExprKind::And(operands)),
        }
    }

    /// OR over the operands exactly as given (nested ORs are kept)
    pub fn or_no_merge(mut operands: Vec<Expression>) -> Expression {
        match operands.len() {
            0 => Expression::constant(false),
            1 => operands.remove(0),
            _ => Expression::new(ExprKind::Or(operands)),
        }
    }

    /// Returns the value if this is a constant
    pub fn as_constant(&self) -> Option<bool> {
        match self.kind() {
            ExprKind::Constant(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the name if this is a variable
    pub fn as_variable(&self) -> Option<&str> {
        match self.kind() {
            ExprKind::Variable(name) => Some(&**name),
            _ => None,
        }
    }

    /// Operands of an `And` or `Or` node
    pub fn operands(&self) -> Option<&[Expression]> {
        match self.kind() {
            ExprKind::And(operands) | ExprKind::Or(operands) => Some(operands.as_slice()),
            _ => None,
        }
    }

    /// True for gate nodes (`And`, `Or`, `Xor`), false for atoms and negations
    pub fn is_composite(&self) -> bool {
        matches!(
            self.kind(),
            ExprKind::And(_) | ExprKind::Or(_) | ExprKind::Xor(_, _)
        )
    }

    /// True if both handles point at the same node
    pub fn ptr_eq(&self, other: &Expression) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Identity of the underlying node, stable while the node is alive
    pub(crate) fn node_id(&self) -> *const ExprKind {
        Arc::as_ptr(&self.inner)
    }

    /// Parse a single boolean expression
    ///
    /// Accepts the syntax described in [`Parser`]. Fails if the input contains
    /// anything other than exactly one expression.
    pub fn parse(input: &str) -> Result<Self, ExpressionParseError> {
        Parser::new(input).parse_single()
    }

    /// Parse a `,`/`;` separated list of expressions
    ///
    /// Reports the first syntax error; use [`Parser::parse_all`] to keep the
    /// members that parsed correctly.
    pub fn parse_list(input: &str) -> Result<Vec<NamedExpression>, ExpressionParseError> {
        Parser::new(input).parse()
    }
}

impl From<bool> for Expression {
    fn from(value: bool) -> Self {
        Expression::constant(value)
    }
}

/// An expression with an optional output name
///
/// Produced by `let name = ...` in the parser and by truth-table minimization,
/// where every output column yields one named expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedExpression {
    /// Output name, if any
    pub name: Option<Arc<str>>,
    /// The expression
    pub expression: Expression,
}

impl NamedExpression {
    /// Create a named expression
    pub fn new(name: &str, expression: Expression) -> Self {
        NamedExpression {
            name: Some(Arc::from(name)),
            expression,
        }
    }

    /// Create an expression without a name
    pub fn unnamed(expression: Expression) -> Self {
        NamedExpression {
            name: None,
            expression,
        }
    }
}
