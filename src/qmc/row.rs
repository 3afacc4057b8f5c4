//! A single implicant of the reduction table

use super::error::ReduceError;
use super::MAX_VARIABLES;
use crate::expression::{ExprKind, Expression};
use crate::table::Ternary;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// A ternary pattern over up to 64 variables plus the ON rows it covers
///
/// Bit `i` of the masks belongs to variable `i`. Positions marked in
/// `dont_care` are free; all other positions must equal the corresponding
/// bit of `state`. Bits of `state` under the don't-care mask are always
/// zero, so two rows are the same implicant iff both masks are equal.
///
/// The `source` set holds the minterm indices of the ON set this implicant
/// covers. Don't-care minterms are never recorded, so an implicant with an
/// empty source covers don't-cares only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRow {
    cols: usize,
    state: u64,
    dont_care: u64,
    source: BTreeSet<usize>,
}

impl TableRow {
    /// The row for minterm `index` over `cols` variables
    ///
    /// `index` follows the truth table convention: variable `i` is bit
    /// `cols - 1 - i`. A don't-care minterm gets an empty source.
    ///
    /// Fails for more than [`MAX_VARIABLES`] columns or an index outside
    /// `0..2^cols`.
    pub fn from_index(cols: usize, index: usize, dont_care: bool) -> Result<Self, ReduceError> {
        if cols > MAX_VARIABLES {
            return Err(ReduceError::TooManyVariables {
                count: cols,
                max: MAX_VARIABLES,
            });
        }
        if index.checked_shr(cols as u32).unwrap_or(0) != 0 {
            return Err(ReduceError::IndexOutOfRange {
                index,
                variables: cols,
            });
        }
        let mut state = 0u64;
        for i in 0..cols {
            let shift = cols - 1 - i;
            if shift < usize::BITS as usize && (index >> shift) & 1 == 1 {
                state |= 1u64 << i;
            }
        }
        let mut source = BTreeSet::new();
        if !dont_care {
            source.insert(index);
        }
        Ok(TableRow {
            cols,
            state,
            dont_care: 0,
            source,
        })
    }

    /// Number of variables
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value bits (zero under the don't-care mask)
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Mask of free positions
    pub fn dont_care_mask(&self) -> u64 {
        self.dont_care
    }

    /// Value of position `i`
    pub fn get(&self, i: usize) -> Ternary {
        if self.dont_care & (1u64 << i) != 0 {
            Ternary::DontCare
        } else {
            Ternary::from(self.state & (1u64 << i) != 0)
        }
    }

    /// Number of fixed positions, i.e. literals of the product term
    pub fn literal_count(&self) -> usize {
        self.cols - self.dont_care.count_ones() as usize
    }

    /// Number of ones among the fixed positions
    pub fn ones(&self) -> u32 {
        self.state.count_ones()
    }

    /// Covered ON-set indices
    pub fn source(&self) -> &BTreeSet<usize> {
        &self.source
    }

    /// True if this row covers the ON-set index
    pub fn covers(&self, index: usize) -> bool {
        self.source.contains(&index)
    }

    pub(crate) fn key(&self) -> (u64, u64) {
        (self.dont_care, self.state)
    }

    pub(crate) fn add_source(&mut self, source: &BTreeSet<usize>) {
        self.source.extend(source.iter().copied());
    }

    pub(crate) fn retain_source(&mut self, mut keep: impl FnMut(usize) -> bool) {
        self.source.retain(|&index| keep(index));
    }

    /// Merge with a row that differs in exactly one fixed position
    ///
    /// Returns `None` if the rows have different don't-care masks or differ
    /// in more than one position.
    pub fn merge(&self, other: &TableRow) -> Option<TableRow> {
        if self.dont_care != other.dont_care || self.cols != other.cols {
            return None;
        }
        let diff = self.state ^ other.state;
        if diff.count_ones() != 1 {
            return None;
        }
        let mut source = self.source.clone();
        source.extend(other.source.iter().copied());
        Some(TableRow {
            cols: self.cols,
            state: self.state & !diff,
            dont_care: self.dont_care | diff,
            source,
        })
    }

    /// The product term of this row
    ///
    /// Literals appear in variable order; a row without fixed positions is
    /// the constant `1`.
    pub fn to_expression(&self, variables: &[Arc<str>]) -> Expression {
        let literals = variables
            .iter()
            .enumerate()
            .take(self.cols)
            .filter_map(|(i, name)| {
                let var = Expression::new(ExprKind::Variable(Arc::clone(name)));
                match self.get(i) {
                    Ternary::One => Some(var),
                    Ternary::Zero => Some(var.not()),
                    Ternary::DontCare => None,
                }
            });
        Expression::and_all(literals)
    }
}

/// `pattern,index,index...` with the pattern in variable order
///
/// ```
/// use qmc_logic::qmc::TableRow;
///
/// let a = TableRow::from_index(3, 0b101, false).unwrap();
/// let b = TableRow::from_index(3, 0b111, false).unwrap();
/// assert_eq!(a.to_string(), "101,5");
/// assert_eq!(a.merge(&b).unwrap().to_string(), "1-1,5,7");
/// ```
impl fmt::Display for TableRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.cols {
            write!(f, "{}", self.get(i).as_char())?;
        }
        for index in &self.source {
            write!(f, ",{}", index)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_variable_is_most_significant() {
        let row = TableRow::from_index(4, 0b1000, false).unwrap();
        assert_eq!(row.get(0), Ternary::One);
        assert_eq!(row.get(3), Ternary::Zero);
        assert_eq!(row.to_string(), "1000,8");
    }

    #[test]
    fn test_from_index_validates_input() {
        assert_eq!(
            TableRow::from_index(65, 0, false),
            Err(ReduceError::TooManyVariables { count: 65, max: 64 })
        );
        assert_eq!(
            TableRow::from_index(3, 8, false),
            Err(ReduceError::IndexOutOfRange {
                index: 8,
                variables: 3
            })
        );
        let wide = TableRow::from_index(64, usize::MAX, false).unwrap();
        assert_eq!(wide.ones(), 64);
    }

    #[test]
    fn test_merge_requires_single_difference() {
        let a = TableRow::from_index(3, 0b000, false).unwrap();
        let b = TableRow::from_index(3, 0b011, false).unwrap();
        assert!(a.merge(&b).is_none());

        let c = TableRow::from_index(3, 0b001, true).unwrap();
        let merged = a.merge(&c).unwrap();
        assert_eq!(merged.to_string(), "00-,0");
        assert_eq!(merged.literal_count(), 2);

        // different masks never merge
        let d = TableRow::from_index(3, 0b100, false).unwrap();
        assert!(merged.merge(&d).is_none());
    }

    #[test]
    fn test_to_expression() {
        let vars: Vec<Arc<str>> = vec!["A".into(), "B".into(), "C".into()];
        let a = TableRow::from_index(3, 0b100, false).unwrap();
        let b = TableRow::from_index(3, 0b110, false).unwrap();
        let term = a.merge(&b).unwrap().to_expression(&vars);
        assert_eq!(term.to_string(), "A * !C");

        let all = TableRow::from_index(0, 0, false).unwrap();
        assert_eq!(all.to_expression(&[]), Expression::constant(true));
    }
}
