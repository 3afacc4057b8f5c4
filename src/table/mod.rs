//! Truth tables with don't-care outputs
//!
//! A [`TruthTable`] has an ordered list of input variables and any number of
//! named output columns. Row `r` assigns variable `i` the bit `n - 1 - i` of
//! `r`, so the first variable is the most significant one, matching
//! [`ContextFiller`].

pub mod error;

pub use error::TableError;

use crate::expression::{ContextFiller, Expression};
use std::fmt;
use std::sync::Arc;

/// A three-valued table cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ternary {
    /// The output is 0
    Zero,
    /// The output is 1
    One,
    /// The output may be either value
    DontCare,
}

impl Ternary {
    /// Character used in listings: `0`, `1` or `-`
    pub fn as_char(self) -> char {
        match self {
            Ternary::Zero => '0',
            Ternary::One => '1',
            Ternary::DontCare => '-',
        }
    }
}

impl From<bool> for Ternary {
    fn from(value: bool) -> Self {
        if value {
            Ternary::One
        } else {
            Ternary::Zero
        }
    }
}

/// Numeric cell encoding: `0`, `1` and `2` for don't care
impl TryFrom<u8> for Ternary {
    type Error = TableError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Ternary::Zero),
            1 => Ok(Ternary::One),
            2 => Ok(Ternary::DontCare),
            _ => Err(TableError::InvalidValue { value }),
        }
    }
}

impl fmt::Display for Ternary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One named output column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOutput {
    name: Arc<str>,
    values: Vec<Ternary>,
}

impl TableOutput {
    /// Name of the output
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One value per row
    pub fn values(&self) -> &[Ternary] {
        &self.values
    }

    /// Rows where the output is 1 (the ON set)
    pub fn ones(&self) -> Vec<usize> {
        self.rows_with(Ternary::One)
    }

    /// Rows where the output is don't care (the DC set)
    pub fn dont_cares(&self) -> Vec<usize> {
        self.rows_with(Ternary::DontCare)
    }

    fn rows_with(&self, wanted: Ternary) -> Vec<usize> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, value)| **value == wanted)
            .map(|(row, _)| row)
            .collect()
    }
}

/// A truth table over an ordered variable list
///
/// # Examples
///
/// ```
/// use qmc_logic::{Expression, Ternary, TruthTable};
///
/// let mut table = TruthTable::new(["A", "B"]).unwrap();
/// table.add_expression("Y", &Expression::parse("A ^ B").unwrap()).unwrap();
/// table.add_values("Z", &[1, 2, 0, 1]).unwrap();
///
/// assert_eq!(table.row_count(), 4);
/// let y = table.output("Y").unwrap();
/// assert_eq!(y.ones(), vec![1, 2]);
/// assert_eq!(table.output("Z").unwrap().values()[1], Ternary::DontCare);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    variables: Vec<Arc<str>>,
    outputs: Vec<TableOutput>,
}

impl TruthTable {
    /// Create a table without outputs
    ///
    /// Fails for duplicate variables or more than
    /// [`MAX_TABLE_VARIABLES`](crate::MAX_TABLE_VARIABLES) variables.
    pub fn new<I, S>(variables: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let variables: Vec<Arc<str>> = variables
            .into_iter()
            .map(|name| Arc::from(name.as_ref()))
            .collect();
        // Validates count and uniqueness
        ContextFiller::with_variables(variables.clone())?;
        Ok(TruthTable {
            variables,
            outputs: Vec::new(),
        })
    }

    /// Tabulate a single expression over its variables in alphabetical order
    ///
    /// The output is named `Y`.
    pub fn from_expression(expr: &Expression) -> Result<Self, TableError> {
        let mut table = TruthTable::new(expr.collect_variables())?;
        table.add_expression("Y", expr)?;
        Ok(table)
    }

    /// The input variables, most significant first
    pub fn variables(&self) -> &[Arc<str>] {
        &self.variables
    }

    /// Number of rows (`2^n`)
    pub fn row_count(&self) -> usize {
        1 << self.variables.len()
    }

    /// All output columns in insertion order
    pub fn outputs(&self) -> &[TableOutput] {
        &self.outputs
    }

    /// Look up an output by name
    pub fn output(&self, name: &str) -> Option<&TableOutput> {
        self.outputs.iter().find(|output| &*output.name == name)
    }

    /// Add an output column
    pub fn add_output(&mut self, name: &str, values: Vec<Ternary>) -> Result<(), TableError> {
        if self.output(name).is_some() {
            return Err(TableError::DuplicateOutput {
                name: Arc::from(name),
            });
        }
        if values.len() != self.row_count() {
            return Err(TableError::RowCountMismatch {
                output: Arc::from(name),
                expected: self.row_count(),
                actual: values.len(),
            });
        }
        self.outputs.push(TableOutput {
            name: Arc::from(name),
            values,
        });
        Ok(())
    }

    /// Add an output column from numeric cells (`0`, `1`, `2` for don't care)
    pub fn add_values(&mut self, name: &str, values: &[u8]) -> Result<(), TableError> {
        let values = values
            .iter()
            .map(|&value| Ternary::try_from(value))
            .collect::<Result<Vec<_>, _>>()?;
        self.add_output(name, values)
    }

    /// Add an output column by evaluating `expr` for every row
    ///
    /// Every variable of `expr` must be one of the table's variables.
    pub fn add_expression(&mut self, name: &str, expr: &Expression) -> Result<(), TableError> {
        let mut filler = ContextFiller::with_variables(self.variables.clone())?;
        let values = filler
            .evaluate_all(expr)?
            .into_iter()
            .map(Ternary::from)
            .collect();
        self.add_output(name, values)
    }
}

impl Expression {
    /// Tabulate this expression, see [`TruthTable::from_expression`]
    pub fn truth_table(&self) -> Result<TruthTable, TableError> {
        TruthTable::from_expression(self)
    }
}

/// Renders a header line and one line per row
///
/// ```
/// use qmc_logic::{Expression, TruthTable};
///
/// let table = TruthTable::from_expression(&Expression::parse("A * B").unwrap()).unwrap();
/// assert_eq!(table.to_string(), "A B | Y\n0 0 | 0\n0 1 | 0\n1 0 | 0\n1 1 | 1\n");
/// ```
impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inputs: Vec<&str> = self.variables.iter().map(|v| &**v).collect();
        let outputs: Vec<&str> = self.outputs.iter().map(|o| o.name()).collect();
        writeln!(f, "{} | {}", inputs.join(" "), outputs.join(" "))?;

        let n = self.variables.len();
        for row in 0..self.row_count() {
            let bits: Vec<String> = (0..n)
                .map(|i| ((row >> (n - 1 - i)) & 1).to_string())
                .collect();
            let cells: Vec<String> = self
                .outputs
                .iter()
                .map(|o| o.values[row].to_string())
                .collect();
            writeln!(f, "{} | {}", bits.join(" "), cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::EvalError;

    #[test]
    fn test_row_order_matches_context_filler() {
        let expr = Expression::parse("A * !B + C").unwrap();
        let table = expr.truth_table().unwrap();
        let mut filler = ContextFiller::new(&expr).unwrap();
        let expected: Vec<Ternary> = filler
            .evaluate_all(&expr)
            .unwrap()
            .into_iter()
            .map(Ternary::from)
            .collect();
        assert_eq!(table.outputs()[0].values(), expected.as_slice());
    }

    #[test]
    fn test_row_count_mismatch() {
        let mut table = TruthTable::new(["A", "B"]).unwrap();
        let err = table.add_values("Y", &[0, 1, 1]).unwrap_err();
        assert!(matches!(
            err,
            TableError::RowCountMismatch {
                expected: 4,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_value() {
        let mut table = TruthTable::new(["A"]).unwrap();
        assert_eq!(
            table.add_values("Y", &[0, 3]),
            Err(TableError::InvalidValue { value: 3 })
        );
    }

    #[test]
    fn test_duplicate_output() {
        let mut table = TruthTable::new(["A"]).unwrap();
        table.add_values("Y", &[0, 1]).unwrap();
        assert!(matches!(
            table.add_values("Y", &[1, 0]),
            Err(TableError::DuplicateOutput { .. })
        ));
    }

    #[test]
    fn test_unknown_variable_in_expression() {
        let mut table = TruthTable::new(["A"]).unwrap();
        let expr = Expression::parse("A + B").unwrap();
        // Row 0 has A = 0, so B is looked up
        assert!(matches!(
            table.add_expression("Y", &expr),
            Err(TableError::Eval(EvalError::UnboundVariable { .. }))
        ));
    }

    #[test]
    fn test_duplicate_variable() {
        assert!(matches!(
            TruthTable::new(["A", "A"]),
            Err(TableError::Eval(EvalError::DuplicateVariable { .. }))
        ));
    }

    #[test]
    fn test_on_and_dc_sets() {
        let mut table = TruthTable::new(["A", "B", "C"]).unwrap();
        table.add_values("Y", &[1, 1, 0, 0, 1, 2, 2, 0]).unwrap();
        let y = table.output("Y").unwrap();
        assert_eq!(y.ones(), vec![0, 1, 4]);
        assert_eq!(y.dont_cares(), vec![5, 6]);
    }
}
