//! Single gate type normalization

use super::{ExpressionModifier, ModifyError};
use crate::expression::{ExprKind, Expression};

/// Rewrite AND and OR gates into NAND gates
///
/// - `And(xs)` becomes `!!And(xs)`, a NAND followed by an inverter. The
///   double negation is protected so it survives later simplification.
/// - `Or(xs)` becomes `!And(!x for x in xs)` by De Morgan. Negating an
///   operand that already ends in an inverter removes that inverter.
///
/// XOR gates are rejected with [`ModifyError::UnsupportedOperation`].
///
/// # Examples
///
/// ```
/// use qmc_logic::modify::{ExpressionModifier, NAnd};
/// use qmc_logic::Expression;
///
/// let expr = Expression::parse("a*b + c").unwrap();
/// let nand = NAnd.apply(&expr).unwrap();
/// assert_eq!(nand.to_string(), "!(!(a * b) * !c)");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NAnd;

impl ExpressionModifier for NAnd {
    fn modify(&self, node: &Expression) -> Result<Expression, ModifyError> {
        match node.kind() {
            ExprKind::And(_) => Ok(node.not_no_simplify().not_no_simplify()),
            ExprKind::Or(operands) => Ok(Expression::and_no_merge(
                operands.iter().map(Expression::not).collect(),
            )
            .not_no_simplify()),
            ExprKind::Xor(_, _) => Err(ModifyError::UnsupportedOperation {
                modifier: "NAnd",
                operation: "xor",
            }),
            _ => Ok(node.clone()),
        }
    }
}

/// Rewrite AND and OR gates into NOR gates
///
/// The dual of [`NAnd`]: `Or(xs)` becomes `!!Or(xs)` and `And(xs)` becomes
/// `!Or(!x for x in xs)`.
///
/// # Examples
///
/// ```
/// use qmc_logic::modify::{ExpressionModifier, NOr};
/// use qmc_logic::Expression;
///
/// let expr = Expression::parse("a*b + c").unwrap();
/// let nor = NOr.apply(&expr).unwrap();
/// assert_eq!(nor.to_string(), "!!(!(!a + !b) + c)");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NOr;

impl ExpressionModifier for NOr {
    fn modify(&self, node: &Expression) -> Result<Expression, ModifyError> {
        match node.kind() {
            ExprKind::Or(_) => Ok(node.not_no_simplify().not_no_simplify()),
            ExprKind::And(operands) => Ok(Expression::or_no_merge(
                operands.iter().map(Expression::not).collect(),
            )
            .not_no_simplify()),
            ExprKind::Xor(_, _) => Err(ModifyError::UnsupportedOperation {
                modifier: "NOr",
                operation: "xor",
            }),
            _ => Ok(node.clone()),
        }
    }
}

/// Replace `a ^ b` by `a * !b + !a * b`
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpandXor;

impl ExpressionModifier for ExpandXor {
    fn modify(&self, node: &Expression) -> Result<Expression, ModifyError> {
        match node.kind() {
            ExprKind::Xor(a, b) => Ok(Expression::or_no_merge(vec![
                Expression::and_no_merge(vec![a.clone(), b.not()]),
                Expression::and_no_merge(vec![a.not(), b.clone()]),
            ])),
            _ => Ok(node.clone()),
        }
    }
}
