//! Quine–McCluskey reduction
//!
//! [`QuineMcCluskey`] takes the ON set and the don't-care set of a function
//! and computes its prime implicants by repeatedly merging rows that differ
//! in a single position. A [`PrimeSelector`] then picks a covering subset of
//! the primes, which [`QuineMcCluskey::to_expression`] turns back into a
//! sum of products.
//!
//! # Examples
//!
//! ```
//! use qmc_logic::qmc::QuineMcCluskey;
//! use qmc_logic::Expression;
//!
//! let expr = Expression::parse("A*B*C + A*B*!C + !A*B*C").unwrap();
//! let mut qmc = QuineMcCluskey::from_expression(&expr).unwrap();
//! qmc.simplify().unwrap();
//! assert_eq!(qmc.to_expression().to_string(), "B * C + A * B");
//! ```
//!
//! The steps can also be driven one at a time:
//!
//! ```
//! use qmc_logic::qmc::{LargestFirst, QuineMcCluskey};
//!
//! let mut qmc = QuineMcCluskey::new(vec!["A".into(), "B".into()]).unwrap();
//! qmc.add(0, false).unwrap();
//! qmc.add(3, false).unwrap();
//!
//! while !qmc.is_finished() {
//!     qmc.simplify_step();
//! }
//! let primes: Vec<String> = qmc.primes().iter().map(|p| p.to_string()).collect();
//! assert_eq!(primes, vec!["00,0", "11,3"]);
//!
//! qmc.select(&mut LargestFirst::new()).unwrap();
//! assert_eq!(qmc.to_expression().to_string(), "!A * !B + A * B");
//! ```

pub mod error;
mod row;
mod rows;
pub mod selector;

pub use error::{ReduceError, SelectError};
pub use row::TableRow;
pub use rows::TableRows;
pub use selector::{
    BruteForce, BruteForceGetAll, DefaultSelector, LargestFirst, PrimeSelector, SelectorKind,
    DEFAULT_EXACT_THRESHOLD, MAX_BRUTE_FORCE_PRIMES,
};

use crate::expression::{ContextFiller, Expression};
use crate::table::{TableOutput, Ternary};
use log::debug;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

/// Largest number of variables a row pattern can hold
pub const MAX_VARIABLES: usize = 64;

/// Quine–McCluskey reduction state
///
/// Holds the rows of the current level, the primes found so far and the
/// set of ON-set indices a selection has to cover.
#[derive(Debug, Clone)]
pub struct QuineMcCluskey {
    variables: Vec<Arc<str>>,
    rows: TableRows,
    primes: Vec<TableRow>,
    required: BTreeSet<usize>,
}

impl QuineMcCluskey {
    /// Start an empty reduction over `variables`
    pub fn new(variables: Vec<Arc<str>>) -> Result<Self, ReduceError> {
        if variables.len() > MAX_VARIABLES {
            return Err(ReduceError::TooManyVariables {
                count: variables.len(),
                max: MAX_VARIABLES,
            });
        }
        let mut seen = HashSet::with_capacity(variables.len());
        for name in &variables {
            if !seen.insert(name) {
                return Err(ReduceError::DuplicateVariable {
                    name: Arc::clone(name),
                });
            }
        }
        Ok(QuineMcCluskey {
            variables,
            rows: TableRows::new(),
            primes: Vec::new(),
            required: BTreeSet::new(),
        })
    }

    /// Load the ON set of `expr` over its variables in alphabetical order
    pub fn from_expression(expr: &Expression) -> Result<Self, ReduceError> {
        Self::from_expression_with_variables(expr, expr.collect_variables())
    }

    /// Load the ON set of `expr` over a caller-defined variable order
    pub fn from_expression_with_variables(
        expr: &Expression,
        variables: Vec<Arc<str>>,
    ) -> Result<Self, ReduceError> {
        let mut filler = ContextFiller::with_variables(variables.clone())?;
        let mut qmc = QuineMcCluskey::new(variables)?;
        for (index, value) in filler.evaluate_all(expr)?.into_iter().enumerate() {
            if value {
                qmc.add(index, false)?;
            }
        }
        Ok(qmc)
    }

    /// Load one output column of a truth table
    pub fn from_output(variables: &[Arc<str>], output: &TableOutput) -> Result<Self, ReduceError> {
        let mut qmc = QuineMcCluskey::new(variables.to_vec())?;
        qmc.fill(output.values())?;
        Ok(qmc)
    }

    /// Add every `One` and `DontCare` row of a full value list
    pub fn fill(&mut self, values: &[Ternary]) -> Result<&mut Self, ReduceError> {
        let expected = self.row_count();
        if expected != Some(values.len()) {
            return Err(ReduceError::ValueCountMismatch {
                expected: expected.unwrap_or(usize::MAX),
                actual: values.len(),
            });
        }
        for (index, value) in values.iter().enumerate() {
            match value {
                Ternary::One => self.add(index, false)?,
                Ternary::DontCare => self.add(index, true)?,
                Ternary::Zero => {}
            }
        }
        Ok(self)
    }

    /// Add a single ON (or don't-care) row
    pub fn add(&mut self, index: usize, dont_care: bool) -> Result<(), ReduceError> {
        if let Some(count) = self.row_count() {
            if index >= count {
                return Err(ReduceError::IndexOutOfRange {
                    index,
                    variables: self.variables.len(),
                });
            }
        }
        if !dont_care {
            self.required.insert(index);
        }
        self.rows
            .add(TableRow::from_index(self.variables.len(), index, dont_care)?);
        Ok(())
    }

    /// `2^n`, if it fits in `usize`
    fn row_count(&self) -> Option<usize> {
        1usize.checked_shl(self.variables.len() as u32)
    }

    /// The variable order
    pub fn variables(&self) -> &[Arc<str>] {
        &self.variables
    }

    /// Rows of the current level
    pub fn rows(&self) -> &TableRows {
        &self.rows
    }

    /// Primes found so far (the selected ones after [`QuineMcCluskey::select`])
    pub fn primes(&self) -> &[TableRow] {
        &self.primes
    }

    /// ON-set indices a selection must cover
    pub fn required(&self) -> &BTreeSet<usize> {
        &self.required
    }

    /// True once every level has been processed
    pub fn is_finished(&self) -> bool {
        self.rows.is_empty()
    }

    /// Merge the current level into the next one
    ///
    /// Rows that did not take part in any merge become primes, unless they
    /// cover don't-cares only.
    pub fn simplify_step(&mut self) {
        let mut next = TableRows::new();
        let mut merged = HashSet::new();

        for (lower, upper) in self.rows.merge_candidates() {
            for r1 in lower {
                for r2 in upper {
                    if let Some(row) = r1.merge(r2) {
                        merged.insert(r1.key());
                        merged.insert(r2.key());
                        next.add(row);
                    }
                }
            }
        }

        let before = self.primes.len();
        for row in self.rows.iter() {
            if !merged.contains(&row.key()) && !row.source().is_empty() {
                self.primes.push(row.clone());
            }
        }
        debug!(
            "QMC level: {} rows, {} new primes, {} rows in next level",
            self.rows.len(),
            self.primes.len() - before,
            next.len()
        );
        self.rows = next;
    }

    /// Run [`QuineMcCluskey::simplify_step`] until all primes are found
    pub fn reduce(&mut self) -> &mut Self {
        while !self.is_finished() {
            self.simplify_step();
        }
        self
    }

    /// Shrink the cover problem by dominance
    ///
    /// Repeats until nothing changes:
    /// - a prime whose coverage is a subset of another prime's is dropped
    ///   (for equal coverage the one with fewer literals stays);
    /// - if every prime covering index `c1` also covers `c2`, then `c2` is
    ///   covered whenever `c1` is, so `c2` is dropped from the required set.
    pub fn remove_dominated(&mut self) {
        debug!("Initial primes: {}", self.primes.len());
        loop {
            let rows_removed = self.remove_dominated_primes();
            let columns_removed = self.remove_dominated_columns();
            if !rows_removed && !columns_removed {
                break;
            }
        }
        debug!("Residual primes: {}", self.primes.len());
    }

    fn remove_dominated_primes(&mut self) -> bool {
        let count = self.primes.len();
        let mut removed = vec![false; count];
        for i in 0..count {
            if removed[i] {
                continue;
            }
            for j in 0..count {
                if i == j || removed[j] {
                    continue;
                }
                let (keep, other) = (&self.primes[i], &self.primes[j]);
                if !keep.source().is_superset(other.source()) {
                    continue;
                }
                let other_is_smaller = keep.source() == other.source()
                    && other.literal_count() < keep.literal_count();
                if !other_is_smaller {
                    removed[j] = true;
                }
            }
        }

        let any = removed.iter().any(|&r| r);
        let mut flags = removed.into_iter();
        self.primes.retain(|_| !flags.next().unwrap_or(false));
        any
    }

    fn remove_dominated_columns(&mut self) -> bool {
        let columns: Vec<usize> = self.required.iter().copied().collect();
        let words = self.primes.len().div_ceil(64);

        // for every column, the set of primes covering it
        let covering: Vec<Vec<u64>> = columns
            .iter()
            .map(|&column| {
                let mut set = vec![0u64; words];
                for (p, prime) in self.primes.iter().enumerate() {
                    if prime.covers(column) {
                        set[p / 64] |= 1u64 << (p % 64);
                    }
                }
                set
            })
            .collect();

        let mut removed = vec![false; columns.len()];
        for c1 in 0..columns.len() {
            if removed[c1] {
                continue;
            }
            for c2 in 0..columns.len() {
                if c1 != c2 && !removed[c2] && is_subset(&covering[c1], &covering[c2]) {
                    removed[c2] = true;
                }
            }
        }

        let dropped: BTreeSet<usize> = columns
            .iter()
            .zip(&removed)
            .filter(|(_, removed)| **removed)
            .map(|(&c, _)| c)
            .collect();
        if dropped.is_empty() {
            return false;
        }
        for prime in &mut self.primes {
            prime.retain_source(|index| !dropped.contains(&index));
        }
        self.required.retain(|index| !dropped.contains(index));
        true
    }

    /// Replace the primes by the subset chosen by `selector`
    ///
    /// The chosen primes keep their relative order.
    pub fn select<S: PrimeSelector + ?Sized>(&mut self, selector: &mut S) -> Result<(), SelectError> {
        let mut chosen = selector.select(&self.primes, &self.required)?;
        chosen.sort_unstable();
        chosen.dedup();
        let chosen: HashSet<usize> = chosen.into_iter().collect();
        let mut index = 0;
        self.primes.retain(|_| {
            let keep = chosen.contains(&index);
            index += 1;
            keep
        });
        debug!("Final primes: {}", self.primes.len());
        Ok(())
    }

    /// Reduce, remove dominated primes and select with [`DefaultSelector`]
    pub fn simplify(&mut self) -> Result<&mut Self, SelectError> {
        self.simplify_with(&mut DefaultSelector::new())
    }

    /// Reduce, remove dominated primes and select with `selector`
    pub fn simplify_with<S: PrimeSelector + ?Sized>(
        &mut self,
        selector: &mut S,
    ) -> Result<&mut Self, SelectError> {
        self.reduce();
        self.remove_dominated();
        self.select(selector)?;
        Ok(self)
    }

    /// The sum of products of the primes and any rows not yet processed
    ///
    /// Gives `0` if there is nothing to cover.
    pub fn to_expression(&self) -> Expression {
        Expression::or_all(
            self.primes
                .iter()
                .chain(self.rows.iter())
                .map(|row| row.to_expression(&self.variables)),
        )
    }
}

fn is_subset(a: &[u64], b: &[u64]) -> bool {
    a.iter().zip(b).all(|(x, y)| x & !y == 0)
}
