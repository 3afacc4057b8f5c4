//! Fan-in limiting
//!
//! Wide AND/OR gates are split into trees of narrower gates of the same
//! kind. The groups are built with the non-merging constructors so the
//! split structure is not flattened again.

use super::{ExpressionModifier, ModifyError};
use crate::expression::{ExprKind, Expression};

/// Gate kinds a split can rebuild
#[derive(Clone, Copy)]
enum Gate {
    And,
    Or,
}

impl Gate {
    fn of(node: &Expression) -> Option<(Gate, &[Expression])> {
        match node.kind() {
            ExprKind::And(operands) => Some((Gate::And, operands)),
            ExprKind::Or(operands) => Some((Gate::Or, operands)),
            _ => None,
        }
    }

    fn build(self, operands: Vec<Expression>) -> Expression {
        match self {
            Gate::And => Expression::and_no_merge(operands),
            Gate::Or => Expression::or_no_merge(operands),
        }
    }
}

/// Split into a balanced tree of two-input gates
///
/// Operands are halved at the midpoint, giving depth `ceil(log2 n)`.
///
/// # Examples
///
/// ```
/// use qmc_logic::modify::{ExpressionModifier, TwoInputs};
/// use qmc_logic::Expression;
///
/// let expr = Expression::parse("a*b*c*d*e").unwrap();
/// let split = TwoInputs.apply(&expr).unwrap();
/// assert_eq!(split.to_string(), "(a * b) * (c * (d * e))");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoInputs;

impl ExpressionModifier for TwoInputs {
    fn modify(&self, node: &Expression) -> Result<Expression, ModifyError> {
        Ok(match Gate::of(node) {
            Some((gate, operands)) if operands.len() > 2 => split_halves(gate, operands),
            _ => node.clone(),
        })
    }
}

fn split_halves(gate: Gate, operands: &[Expression]) -> Expression {
    if operands.len() == 1 {
        return operands[0].clone();
    }
    let mid = operands.len() / 2;
    gate.build(vec![
        split_halves(gate, &operands[..mid]),
        split_halves(gate, &operands[mid..]),
    ])
}

/// Split into a balanced tree of three-input gates
///
/// Operands are divided into three groups whose sizes differ by at most one,
/// the larger groups first, giving depth `ceil(log3 n)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeInputs;

impl ExpressionModifier for ThreeInputs {
    fn modify(&self, node: &Expression) -> Result<Expression, ModifyError> {
        Ok(match Gate::of(node) {
            Some((gate, operands)) if operands.len() > 3 => split_thirds(gate, operands),
            _ => node.clone(),
        })
    }
}

fn split_thirds(gate: Gate, operands: &[Expression]) -> Expression {
    let n = operands.len();
    if n <= 3 {
        return gate.build(operands.to_vec());
    }
    let (base, extra) = (n / 3, n % 3);
    let mut groups = Vec::with_capacity(3);
    let mut start = 0;
    for group in 0..3 {
        let size = base + usize::from(group < extra);
        groups.push(split_thirds(gate, &operands[start..start + size]));
        start += size;
    }
    gate.build(groups)
}

/// Limit every AND/OR gate to `k` inputs
///
/// Operands are packed into groups of `k`. If `n` is not a multiple of `k`,
/// the remainder is spread over the first two groups, which share `k + n % k`
/// operands between them. The groups are then packed again until they fit a
/// single gate.
///
/// # Examples
///
/// ```
/// use qmc_logic::modify::{ExpressionModifier, NInputs};
/// use qmc_logic::Expression;
///
/// let expr = Expression::parse("a+b+c+d+e+f+g").unwrap();
/// let split = NInputs::new(3).unwrap().apply(&expr).unwrap();
/// assert_eq!(split.to_string(), "(a + b) + (c + d) + (e + f + g)");
/// assert!(NInputs::new(1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NInputs {
    fan_in: usize,
}

impl NInputs {
    /// Create the modifier; `fan_in` must be at least 2
    pub fn new(fan_in: usize) -> Result<Self, ModifyError> {
        if fan_in < 2 {
            return Err(ModifyError::InvalidFanIn { fan_in });
        }
        Ok(NInputs { fan_in })
    }

    /// The input limit
    pub fn fan_in(&self) -> usize {
        self.fan_in
    }

    fn pack(&self, gate: Gate, mut operands: Vec<Expression>) -> Expression {
        let k = self.fan_in;
        while operands.len() > k {
            let n = operands.len();
            let rest = n % k;
            let mut sizes = Vec::with_capacity(n / k + 1);
            if rest != 0 {
                let shared = k + rest;
                sizes.push(shared.div_ceil(2));
                sizes.push(shared / 2);
            }
            while sizes.iter().sum::<usize>() < n {
                sizes.push(k);
            }

            let mut remaining = operands.into_iter();
            operands = sizes
                .into_iter()
                .map(|size| gate.build(remaining.by_ref().take(size).collect()))
                .collect();
        }
        gate.build(operands)
    }
}

impl ExpressionModifier for NInputs {
    fn modify(&self, node: &Expression) -> Result<Expression, ModifyError> {
        Ok(match Gate::of(node) {
            Some((gate, operands)) if operands.len() > self.fan_in => {
                self.pack(gate, operands.to_vec())
            }
            _ => node.clone(),
        })
    }
}
