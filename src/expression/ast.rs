//! Tree traversal operations
//!
//! This module contains the fold machinery and the analyses built on it.

use super::{ExprKind, Expression};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Node type for expression tree folding
///
/// Represents the structure of a node with the results of its already folded
/// children. Used with [`Expression::fold`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprNode<'a, T> {
    /// A variable with the given name
    Variable(&'a str),
    /// A constant boolean value
    Constant(bool),
    /// Logical NOT with the result from its operand
    Not(T),
    /// Logical AND with results from all operands
    And(Vec<T>),
    /// Logical OR with results from all operands
    Or(Vec<T>),
    /// Exclusive OR with results from both operands
    Xor(T, T),
}

impl Expression {
    /// Fold the expression tree depth-first from leaves to root
    ///
    /// Calls `f` once per node occurrence; shared sub-expressions are visited
    /// once for every path that reaches them.
    ///
    /// # Examples
    ///
    /// Count the gates of an expression:
    ///
    /// ```
    /// use qmc_logic::{ExprNode, Expression};
    ///
    /// let expr = Expression::parse("a*b + !c").unwrap();
    ///
    /// let gates = expr.fold(|node| match node {
    ///     ExprNode::Variable(_) | ExprNode::Constant(_) => 0,
    ///     ExprNode::Not(inner) => inner + 1,
    ///     ExprNode::And(ops) | ExprNode::Or(ops) => ops.iter().sum::<usize>() + 1,
    ///     ExprNode::Xor(l, r) => l + r + 1,
    /// });
    ///
    /// assert_eq!(gates, 3); // AND, NOT, OR
    /// ```
    pub fn fold<'a, T, F>(&'a self, mut f: F) -> T
    where
        F: FnMut(ExprNode<'a, T>) -> T,
    {
        Self::fold_impl(self, &mut f)
    }

    fn fold_impl<'a, T, F>(expr: &'a Expression, f: &mut F) -> T
    where
        F: FnMut(ExprNode<'a, T>) -> T,
    {
        match expr.kind() {
            ExprKind::Variable(name) => f(ExprNode::Variable(name)),
            ExprKind::Constant(value) => f(ExprNode::Constant(*value)),
            ExprKind::Not(inner) => {
                let inner_result = Self::fold_impl(inner, f);
                f(ExprNode::Not(inner_result))
            }
            ExprKind::And(operands) => {
                let results = operands.iter().map(|e| Self::fold_impl(e, f)).collect();
                f(ExprNode::And(results))
            }
            ExprKind::Or(operands) => {
                let results = operands.iter().map(|e| Self::fold_impl(e, f)).collect();
                f(ExprNode::Or(results))
            }
            ExprKind::Xor(left, right) => {
                let left_result = Self::fold_impl(left, f);
                let right_result = Self::fold_impl(right, f);
                f(ExprNode::Xor(left_result, right_result))
            }
        }
    }

    /// Collect all variables used in this expression, in alphabetical order
    ///
    /// This is the default column order for truth tables and minimization.
    pub fn collect_variables(&self) -> Vec<Arc<str>> {
        let mut vars = BTreeSet::new();
        self.collect_variables_into(&mut vars);
        vars.into_iter().collect()
    }

    fn collect_variables_into(&self, vars: &mut BTreeSet<Arc<str>>) {
        match self.kind() {
            ExprKind::Variable(name) => {
                vars.insert(Arc::clone(name));
            }
            ExprKind::Constant(_) => {}
            ExprKind::Not(inner) => inner.collect_variables_into(vars),
            ExprKind::And(operands) | ExprKind::Or(operands) => {
                for operand in operands {
                    operand.collect_variables_into(vars);
                }
            }
            ExprKind::Xor(left, right) => {
                left.collect_variables_into(vars);
                right.collect_variables_into(vars);
            }
        }
    }

    /// Size measure used to decide whether a rewrite is an improvement
    ///
    /// Every variable occurrence counts one, every gate counts its number of
    /// inputs and every NOT counts one.
    pub fn complexity(&self) -> usize {
        self.fold(|node| match node {
            ExprNode::Variable(_) => 1,
            ExprNode::Constant(_) => 0,
            ExprNode::Not(inner) => inner + 1,
            ExprNode::And(ops) | ExprNode::Or(ops) => ops.iter().sum::<usize>() + ops.len(),
            ExprNode::Xor(l, r) => l + r + 2,
        })
    }

    /// Number of gate levels, NOT included
    pub fn depth(&self) -> usize {
        self.fold(|node| match node {
            ExprNode::Variable(_) | ExprNode::Constant(_) => 0,
            ExprNode::Not(inner) => inner + 1,
            ExprNode::And(ops) | ExprNode::Or(ops) => ops.into_iter().max().unwrap_or(0) + 1,
            ExprNode::Xor(l, r) => l.max(r) + 1,
        })
    }

    /// Largest operand count of any `And`/`Or` node (0 if there is none)
    pub fn max_fan_in(&self) -> usize {
        self.fold(|node| match node {
            ExprNode::Variable(_) | ExprNode::Constant(_) => 0,
            ExprNode::Not(inner) => inner,
            ExprNode::And(ops) | ExprNode::Or(ops) => {
                let width = ops.len();
                ops.into_iter().max().unwrap_or(0).max(width)
            }
            ExprNode::Xor(l, r) => l.max(r),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_variables_sorted_and_unique() {
        let expr = Expression::parse("c*b + a*!c + b").unwrap();
        let vars: Vec<String> = expr
            .collect_variables()
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(vars, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_complexity_counts_not() {
        let plain = Expression::parse("a*b").unwrap();
        let negated = Expression::parse("!a*b").unwrap();
        assert_eq!(plain.complexity(), 4);
        assert_eq!(negated.complexity(), 5);
    }

    #[test]
    fn test_depth_and_fan_in() {
        let expr = Expression::parse("a*b*c*d + e").unwrap();
        assert_eq!(expr.depth(), 2);
        assert_eq!(expr.max_fan_in(), 4);
        assert_eq!(Expression::variable("x").max_fan_in(), 0);
    }

    #[test]
    fn test_fold_sees_every_occurrence() {
        let a = Expression::variable("a");
        let shared = a.and(&Expression::variable("b"));
        let expr = shared.or(&shared.not());
        let leaves = expr.fold(|node| match node {
            ExprNode::Variable(_) => 1,
            ExprNode::Constant(_) => 0,
            ExprNode::Not(inner) => inner,
            ExprNode::And(ops) | ExprNode::Or(ops) => ops.iter().sum(),
            ExprNode::Xor(l, r) => l + r,
        });
        assert_eq!(leaves, 4);
    }
}
