//! Error types for reduction and prime selection

use crate::expression::EvalError;
use std::fmt;
use std::io;
use std::sync::Arc;

/// Errors that can occur while setting up a reduction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReduceError {
    /// More variables than a row pattern can hold, or than the caller allows
    TooManyVariables {
        /// Number of variables requested
        count: usize,
        /// Maximum allowed
        max: usize,
    },
    /// A variable appears twice in the variable list
    DuplicateVariable {
        /// Name of the repeated variable
        name: Arc<str>,
    },
    /// A row index outside `0..2^n`
    IndexOutOfRange {
        /// The rejected index
        index: usize,
        /// Number of variables
        variables: usize,
    },
    /// A value list whose length is not `2^n`
    ValueCountMismatch {
        /// Number of rows (`2^n`)
        expected: usize,
        /// Number of values given
        actual: usize,
    },
    /// Evaluating the source expression failed
    Eval(EvalError),
}

impl fmt::Display for ReduceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReduceError::TooManyVariables { count, max } => write!(
                f,
                "Cannot minimize over {} variables (at most {} are allowed)",
                count, max
            ),
            ReduceError::DuplicateVariable { name } => {
                write!(f, "Variable '{}' appears more than once", name)
            }
            ReduceError::IndexOutOfRange { index, variables } => write!(
                f,
                "Row index {} is out of range for {} variables",
                index, variables
            ),
            ReduceError::ValueCountMismatch { expected, actual } => write!(
                f,
                "{} values are necessary, but {} were given",
                expected, actual
            ),
            ReduceError::Eval(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ReduceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReduceError::Eval(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EvalError> for ReduceError {
    fn from(err: EvalError) -> Self {
        ReduceError::Eval(err)
    }
}

impl From<ReduceError> for io::Error {
    fn from(err: ReduceError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}

/// Errors reported by prime selectors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    /// The exhaustive search cannot handle this many candidates
    ///
    /// Recoverable: fall back to a heuristic selector.
    TooManyPrimes {
        /// Number of candidate primes
        count: usize,
        /// Maximum supported by the selector
        max: usize,
    },
    /// The candidates cannot cover every required index
    ///
    /// Primes produced by the reducer always cover the ON set, so this
    /// indicates a defect in the caller.
    NoCover {
        /// Required indices no candidate covers
        uncovered: Vec<usize>,
    },
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectError::TooManyPrimes { count, max } => write!(
                f,
                "Too many prime implicants for exhaustive selection: {} (at most {})",
                count, max
            ),
            SelectError::NoCover { uncovered } => write!(
                f,
                "No selection covers the required indices {:?}",
                uncovered
            ),
        }
    }
}

impl std::error::Error for SelectError {}

impl From<SelectError> for io::Error {
    fn from(err: SelectError) -> Self {
        io::Error::new(io::ErrorKind::Other, err)
    }
}
