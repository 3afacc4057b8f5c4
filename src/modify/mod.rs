//! Structural rewriting of expressions
//!
//! An [`ExpressionModifier`] rewrites a single node whose children have
//! already been rewritten. [`modify_expression`] drives it bottom-up over a
//! whole expression. Shared sub-expressions are rewritten once per pass and
//! stay shared in the result, and subtrees a modifier leaves alone come back
//! as the very same nodes.
//!
//! The modifiers shipped here map a sum of products onto a gate technology:
//! [`NAnd`] and [`NOr`] normalize to a single gate type, [`ExpandXor`] removes
//! XOR gates and [`TwoInputs`], [`ThreeInputs`] and [`NInputs`] limit the
//! fan-in.
//!
//! # Examples
//!
//! ```
//! use qmc_logic::modify::{ExpressionModifier, NInputs, NAnd, Pipeline};
//! use qmc_logic::Expression;
//!
//! let expr = Expression::parse("a*b*c*d + e").unwrap();
//! let pipeline = Pipeline::new()
//!     .with(NInputs::new(2).unwrap())
//!     .with(NAnd);
//! let gates = pipeline.apply(&expr).unwrap();
//!
//! assert!(gates.max_fan_in() <= 2);
//! assert_eq!(gates.equivalent_to(&expr), Ok(true));
//! ```

pub mod error;
mod fan_in;
mod nand;

pub use error::ModifyError;
pub use fan_in::{NInputs, ThreeInputs, TwoInputs};
pub use nand::{ExpandXor, NAnd, NOr};

use crate::expression::{ExprKind, Expression};
use std::collections::HashMap;
use std::fmt;

/// Rewrites one expression node
pub trait ExpressionModifier {
    /// Rewrite `node`, whose children are already rewritten
    ///
    /// Returning a clone of `node` leaves it unchanged.
    fn modify(&self, node: &Expression) -> Result<Expression, ModifyError>;

    /// Rewrite a whole expression bottom-up
    fn apply(&self, expr: &Expression) -> Result<Expression, ModifyError> {
        modify_expression(expr, self)
    }
}

impl<M: ExpressionModifier + ?Sized> ExpressionModifier for Box<M> {
    fn modify(&self, node: &Expression) -> Result<Expression, ModifyError> {
        (**self).modify(node)
    }

    fn apply(&self, expr: &Expression) -> Result<Expression, ModifyError> {
        (**self).apply(expr)
    }
}

/// Apply `modifier` to every node of `expr`, children first
pub fn modify_expression<M: ExpressionModifier + ?Sized>(
    expr: &Expression,
    modifier: &M,
) -> Result<Expression, ModifyError> {
    let mut walker = Walker {
        modifier,
        memo: HashMap::new(),
    };
    walker.visit(expr)
}

/// One rewriting pass
///
/// The memo is keyed by node address. Every key belongs to a node of the
/// input expression, which outlives the pass, so addresses cannot be reused.
struct Walker<'m, M: ?Sized> {
    modifier: &'m M,
    memo: HashMap<*const ExprKind, Expression>,
}

impl<M: ExpressionModifier + ?Sized> Walker<'_, M> {
    fn visit(&mut self, expr: &Expression) -> Result<Expression, ModifyError> {
        if let Some(done) = self.memo.get(&expr.node_id()) {
            return Ok(done.clone());
        }

        let rebuilt = match expr.kind() {
            ExprKind::Constant(_) | ExprKind::Variable(_) => expr.clone(),
            ExprKind::Not(inner) => {
                let new_inner = self.visit(inner)?;
                if new_inner.ptr_eq(inner) {
                    expr.clone()
                } else {
                    Expression::new(ExprKind::Not(new_inner))
                }
            }
            ExprKind::And(operands) => match self.visit_all(operands)? {
                Some(new_operands) => Expression::new(ExprKind::And(new_operands)),
                None => expr.clone(),
            },
            ExprKind::Or(operands) => match self.visit_all(operands)? {
                Some(new_operands) => Expression::new(ExprKind::Or(new_operands)),
                None => expr.clone(),
            },
            ExprKind::Xor(left, right) => {
                let new_left = self.visit(left)?;
                let new_right = self.visit(right)?;
                if new_left.ptr_eq(left) && new_right.ptr_eq(right) {
                    expr.clone()
                } else {
                    Expression::new(ExprKind::Xor(new_left, new_right))
                }
            }
        };

        let result = self.modifier.modify(&rebuilt)?;
        self.memo.insert(expr.node_id(), result.clone());
        Ok(result)
    }

    /// Rewritten operands, or `None` if all of them are unchanged
    fn visit_all(&mut self, operands: &[Expression]) -> Result<Option<Vec<Expression>>, ModifyError> {
        let mut rewritten = Vec::with_capacity(operands.len());
        let mut changed = false;
        for operand in operands {
            let new_operand = self.visit(operand)?;
            changed |= !new_operand.ptr_eq(operand);
            rewritten.push(new_operand);
        }
        Ok(changed.then_some(rewritten))
    }
}

/// Leaves every node unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl ExpressionModifier for Identity {
    fn modify(&self, node: &Expression) -> Result<Expression, ModifyError> {
        Ok(node.clone())
    }
}

/// Several modifiers applied one after another
///
/// [`ExpressionModifier::apply`] runs one complete pass per modifier, in the
/// order they were added. Used as a node modifier, the stages are chained on
/// each node.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn ExpressionModifier>>,
}

impl Pipeline {
    /// An empty pipeline, equivalent to [`Identity`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage
    pub fn with<M: ExpressionModifier + 'static>(mut self, modifier: M) -> Self {
        self.push(modifier);
        self
    }

    /// Append a stage in place
    pub fn push<M: ExpressionModifier + 'static>(&mut self, modifier: M) {
        self.stages.push(Box::new(modifier));
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// True if there are no stages
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stages.len())
            .finish()
    }
}

impl ExpressionModifier for Pipeline {
    fn modify(&self, node: &Expression) -> Result<Expression, ModifyError> {
        self.stages
            .iter()
            .try_fold(node.clone(), |node, stage| stage.modify(&node))
    }

    fn apply(&self, expr: &Expression) -> Result<Expression, ModifyError> {
        self.stages
            .iter()
            .try_fold(expr.clone(), |expr, stage| stage.apply(&expr))
    }
}
