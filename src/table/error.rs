//! Error types for truth tables

use crate::expression::EvalError;
use std::fmt;
use std::io;
use std::sync::Arc;

/// Errors that can occur when building a truth table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Evaluating an expression or enumerating the variables failed
    Eval(EvalError),
    /// An output column does not have one value per row
    RowCountMismatch {
        /// Name of the output
        output: Arc<str>,
        /// Number of rows of the table (`2^n`)
        expected: usize,
        /// Number of values given
        actual: usize,
    },
    /// An output with this name already exists
    DuplicateOutput {
        /// Name of the output
        name: Arc<str>,
    },
    /// A numeric cell value other than 0, 1 or 2 (don't care)
    InvalidValue {
        /// The rejected value
        value: u8,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::Eval(e) => write!(f, "{}", e),
            TableError::RowCountMismatch {
                output,
                expected,
                actual,
            } => write!(
                f,
                "Output '{}' has {} values, but the table has {} rows",
                output, actual, expected
            ),
            TableError::DuplicateOutput { name } => {
                write!(f, "Output '{}' is defined more than once", name)
            }
            TableError::InvalidValue { value } => write!(
                f,
                "Invalid table value {} (expected 0, 1 or 2 for don't care)",
                value
            ),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableError::Eval(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EvalError> for TableError {
    fn from(err: EvalError) -> Self {
        TableError::Eval(err)
    }
}

impl From<TableError> for io::Error {
    fn from(err: TableError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}
