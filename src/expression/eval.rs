//! Evaluation and equivalence checking for boolean expressions

use super::error::EvalError;
use super::{ExprKind, Expression};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::BuildHasher;
use std::ops::Range;
use std::sync::Arc;

/// Largest variable count for which full truth tables are enumerated
pub const MAX_TABLE_VARIABLES: usize = 24;

/// A source of variable values for [`Expression::evaluate`]
pub trait Context {
    /// Value of the named variable, `None` if it is not bound
    fn value(&self, name: &str) -> Option<bool>;
}

impl<S: BuildHasher> Context for HashMap<Arc<str>, bool, S> {
    fn value(&self, name: &str) -> Option<bool> {
        self.get(name).copied()
    }
}

impl<S: BuildHasher> Context for HashMap<String, bool, S> {
    fn value(&self, name: &str) -> Option<bool> {
        self.get(name).copied()
    }
}

impl Context for BTreeMap<Arc<str>, bool> {
    fn value(&self, name: &str) -> Option<bool> {
        self.get(name).copied()
    }
}

impl Expression {
    /// Evaluate the expression against a variable assignment
    ///
    /// # Examples
    ///
    /// ```
    /// use qmc_logic::Expression;
    /// use std::collections::HashMap;
    /// use std::sync::Arc;
    ///
    /// let expr = Expression::parse("a * !b").unwrap();
    ///
    /// let mut assignment: HashMap<Arc<str>, bool> = HashMap::new();
    /// assignment.insert(Arc::from("a"), true);
    /// assignment.insert(Arc::from("b"), false);
    /// assert_eq!(expr.evaluate(&assignment), Ok(true));
    ///
    /// assignment.remove("b");
    /// assert!(expr.evaluate(&assignment).is_err());
    /// ```
    pub fn evaluate<C: Context + ?Sized>(&self, context: &C) -> Result<bool, EvalError> {
        match self.kind() {
            ExprKind::Constant(value) => Ok(*value),
            ExprKind::Variable(name) => {
                context
                    .value(name)
                    .ok_or_else(|| EvalError::UnboundVariable {
                        name: Arc::clone(name),
                    })
            }
            ExprKind::Not(inner) => Ok(!inner.evaluate(context)?),
            // Every operand is evaluated so an unbound variable is always reported
            ExprKind::And(operands) => operands.iter().try_fold(true, |acc, operand| {
                Ok::<_, EvalError>(operand.evaluate(context)? && acc)
            }),
            ExprKind::Or(operands) => operands.iter().try_fold(false, |acc, operand| {
                Ok::<_, EvalError>(operand.evaluate(context)? || acc)
            }),
            ExprKind::Xor(left, right) => Ok(left.evaluate(context)? ^ right.evaluate(context)?),
        }
    }

    /// Check if two expressions are logically equivalent
    ///
    /// Compares the truth tables over the union of both variable sets, so the
    /// cost is exponential in the number of variables.
    ///
    /// # Examples
    ///
    /// ```
    /// use qmc_logic::Expression;
    ///
    /// let a = Expression::parse("!(x + y)").unwrap();
    /// let b = Expression::parse("!x * !y").unwrap();
    /// assert_eq!(a.equivalent_to(&b), Ok(true));
    /// ```
    pub fn equivalent_to(&self, other: &Expression) -> Result<bool, EvalError> {
        let mut vars: BTreeSet<Arc<str>> = self.collect_variables().into_iter().collect();
        vars.extend(other.collect_variables());

        let mut filler = ContextFiller::with_variables(vars.into_iter().collect())?;
        for row in filler.rows() {
            filler.set_row(row);
            if self.evaluate(&filler)? != other.evaluate(&filler)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Enumerates all assignments of an ordered variable list
///
/// Row `r` sets variable `i` to bit `n - 1 - i` of `r`, so the first variable
/// is the most significant one. The filler is itself a [`Context`] holding
/// the assignment of the current row.
///
/// # Examples
///
/// ```
/// use qmc_logic::{ContextFiller, Expression};
///
/// let expr = Expression::parse("A*B + !A*!B").unwrap();
/// let mut filler = ContextFiller::new(&expr).unwrap();
/// assert_eq!(filler.evaluate_all(&expr).unwrap(), vec![true, false, false, true]);
/// ```
#[derive(Debug, Clone)]
pub struct ContextFiller {
    variables: Vec<Arc<str>>,
    positions: HashMap<Arc<str>, usize>,
    row: usize,
}

impl ContextFiller {
    /// Create a filler over the variables of `expr` in alphabetical order
    pub fn new(expr: &Expression) -> Result<Self, EvalError> {
        Self::with_variables(expr.collect_variables())
    }

    /// Create a filler over a caller-defined variable order
    pub fn with_variables(variables: Vec<Arc<str>>) -> Result<Self, EvalError> {
        if variables.len() > MAX_TABLE_VARIABLES {
            return Err(EvalError::TooManyVariables {
                count: variables.len(),
                max: MAX_TABLE_VARIABLES,
            });
        }

        let mut positions = HashMap::with_capacity(variables.len());
        for (index, name) in variables.iter().enumerate() {
            if positions.insert(Arc::clone(name), index).is_some() {
                return Err(EvalError::DuplicateVariable {
                    name: Arc::clone(name),
                });
            }
        }

        Ok(ContextFiller {
            variables,
            positions,
            row: 0,
        })
    }

    /// The ordered variable list
    pub fn variables(&self) -> &[Arc<str>] {
        &self.variables
    }

    /// Number of rows (`2^n`)
    pub fn row_count(&self) -> usize {
        1 << self.variables.len()
    }

    /// All row indices
    pub fn rows(&self) -> Range<usize> {
        0..self.row_count()
    }

    /// Select the assignment of the given row
    pub fn set_row(&mut self, row: usize) {
        debug_assert!(row < self.row_count());
        self.row = row;
    }

    /// The currently selected row
    pub fn row(&self) -> usize {
        self.row
    }

    /// Value of variable `index` in the current row
    pub fn bit(&self, index: usize) -> bool {
        let shift = self.variables.len() - 1 - index;
        (self.row >> shift) & 1 == 1
    }

    /// Evaluate `expr` for every row
    pub fn evaluate_all(&mut self, expr: &Expression) -> Result<Vec<bool>, EvalError> {
        let mut values = Vec::with_capacity(self.row_count());
        for row in self.rows() {
            self.set_row(row);
            values.push(expr.evaluate(&*self)?);
        }
        Ok(values)
    }
}

impl Context for ContextFiller {
    fn value(&self, name: &str) -> Option<bool> {
        self.positions.get(name).map(|&index| self.bit(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn vars(names: &[&str]) -> Vec<Arc<str>> {
        names.iter().map(|n| Arc::from(*n)).collect()
    }

    #[test]
    fn test_first_variable_is_most_significant() {
        let mut filler = ContextFiller::with_variables(vars(&["A", "B", "C"])).unwrap();
        filler.set_row(0b100);
        assert_eq!(filler.value("A"), Some(true));
        assert_eq!(filler.value("B"), Some(false));
        assert_eq!(filler.value("C"), Some(false));
        filler.set_row(0b011);
        assert_eq!(filler.value("A"), Some(false));
        assert_eq!(filler.value("C"), Some(true));
        assert_eq!(filler.value("D"), None);
    }

    #[test]
    fn test_unbound_variable() {
        let expr = Expression::parse("a + b").unwrap();
        let filler = ContextFiller::with_variables(vars(&["a"])).unwrap();
        assert!(matches!(
            expr.evaluate(&filler),
            Err(EvalError::UnboundVariable { ref name }) if &**name == "b"
        ));
    }

    #[test]
    fn test_short_circuit_does_not_hide_unbound() {
        let expr = Expression::parse("a + b").unwrap();
        let mut assignment: HashMap<String, bool> = HashMap::new();
        assignment.insert("a".to_string(), true);
        assert_eq!(
            expr.evaluate(&assignment),
            Err(EvalError::UnboundVariable { name: "b".into() })
        );

        let expr = Expression::parse("a * b").unwrap();
        assignment.insert("a".to_string(), false);
        assert_eq!(
            expr.evaluate(&assignment),
            Err(EvalError::UnboundVariable { name: "b".into() })
        );
    }

    #[test]
    fn test_too_many_variables() {
        let names: Vec<Arc<str>> = (0..=MAX_TABLE_VARIABLES)
            .map(|i| Arc::from(format!("v{}", i).as_str()))
            .collect();
        assert!(matches!(
            ContextFiller::with_variables(names),
            Err(EvalError::TooManyVariables { .. })
        ));
    }

    #[test]
    fn test_duplicate_variable() {
        assert!(matches!(
            ContextFiller::with_variables(vars(&["a", "b", "a"])),
            Err(EvalError::DuplicateVariable { .. })
        ));
    }

    #[test]
    fn test_xnor_rows() {
        let expr = Expression::parse("A*B + !A*!B").unwrap();
        let mut filler = ContextFiller::new(&expr).unwrap();
        assert_eq!(
            filler.evaluate_all(&expr).unwrap(),
            vec![true, false, false, true]
        );
    }

    #[test]
    fn test_constant_has_single_row() {
        let expr = Expression::constant(true);
        let mut filler = ContextFiller::new(&expr).unwrap();
        assert_eq!(filler.row_count(), 1);
        assert_eq!(filler.evaluate_all(&expr).unwrap(), vec![true]);
    }

    #[test]
    fn test_equivalence_over_disjoint_variables() {
        let a = Expression::parse("x + !x").unwrap();
        let b = Expression::parse("y + !y").unwrap();
        assert_eq!(a.equivalent_to(&b), Ok(true));
        let c = Expression::parse("x").unwrap();
        assert_eq!(a.equivalent_to(&c), Ok(false));
    }
}
