//! Crate-level error type
//!
//! Every module reports its own error enum. [`MinimizeError`] gathers them
//! for the operations that span several stages, such as
//! [`Minimizable::minimize`](crate::Minimizable::minimize), so callers can
//! use `?` across parsing, table building, reduction and gate mapping.

use crate::expression::{EvalError, ExpressionParseError};
use crate::modify::ModifyError;
use crate::qmc::{ReduceError, SelectError};
use crate::table::TableError;
use std::fmt;
use std::io;

/// Errors from the minimization front-end
#[derive(Debug)]
pub enum MinimizeError {
    /// Parsing the input text failed
    Parse(ExpressionParseError),
    /// Evaluating an expression failed
    Eval(EvalError),
    /// Building a truth table failed
    Table(TableError),
    /// Setting up the reduction failed
    Reduce(ReduceError),
    /// Prime selection failed
    Select(SelectError),
    /// Gate mapping failed
    Modify(ModifyError),
    /// The input is outside what the configuration allows
    InvalidInput {
        /// Description of what was invalid
        message: String,
    },
    /// IO error wrapper
    Io(io::Error),
}

impl fmt::Display for MinimizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinimizeError::Parse(e) => write!(f, "{}", e),
            MinimizeError::Eval(e) => write!(f, "Evaluation error: {}", e),
            MinimizeError::Table(e) => write!(f, "Truth table error: {}", e),
            MinimizeError::Reduce(e) => write!(f, "Reduction error: {}", e),
            MinimizeError::Select(e) => write!(f, "Selection error: {}", e),
            MinimizeError::Modify(e) => write!(f, "Gate mapping error: {}", e),
            MinimizeError::InvalidInput { message } => write!(f, "{}", message),
            MinimizeError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for MinimizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MinimizeError::Parse(e) => Some(e),
            MinimizeError::Eval(e) => Some(e),
            MinimizeError::Table(e) => Some(e),
            MinimizeError::Reduce(e) => Some(e),
            MinimizeError::Select(e) => Some(e),
            MinimizeError::Modify(e) => Some(e),
            MinimizeError::InvalidInput { .. } => None,
            MinimizeError::Io(e) => Some(e),
        }
    }
}

impl From<ExpressionParseError> for MinimizeError {
    fn from(err: ExpressionParseError) -> Self {
        MinimizeError::Parse(err)
    }
}

impl From<EvalError> for MinimizeError {
    fn from(err: EvalError) -> Self {
        MinimizeError::Eval(err)
    }
}

impl From<TableError> for MinimizeError {
    fn from(err: TableError) -> Self {
        MinimizeError::Table(err)
    }
}

impl From<ReduceError> for MinimizeError {
    fn from(err: ReduceError) -> Self {
        MinimizeError::Reduce(err)
    }
}

impl From<SelectError> for MinimizeError {
    fn from(err: SelectError) -> Self {
        MinimizeError::Select(err)
    }
}

impl From<ModifyError> for MinimizeError {
    fn from(err: ModifyError) -> Self {
        MinimizeError::Modify(err)
    }
}

impl From<io::Error> for MinimizeError {
    fn from(err: io::Error) -> Self {
        MinimizeError::Io(err)
    }
}

impl From<MinimizeError> for io::Error {
    fn from(err: MinimizeError) -> Self {
        match err {
            MinimizeError::Io(e) => e,
            MinimizeError::Parse(e) => e.into(),
            MinimizeError::Eval(e) => e.into(),
            MinimizeError::Table(e) => e.into(),
            MinimizeError::Reduce(e) => e.into(),
            MinimizeError::Select(e) => e.into(),
            MinimizeError::Modify(e) => e.into(),
            other @ MinimizeError::InvalidInput { .. } => {
                io::Error::new(io::ErrorKind::InvalidInput, other)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_wraps_module_errors() {
        let err: MinimizeError = SelectError::TooManyPrimes { count: 40, max: 31 }.into();
        assert!(err.to_string().starts_with("Selection error: "));
        assert!(err.source().is_some());

        let err: MinimizeError = ModifyError::InvalidFanIn { fan_in: 1 }.into();
        assert!(err.to_string().contains("fan-in 1"));
    }

    #[test]
    fn test_invalid_input() {
        let err = MinimizeError::InvalidInput {
            message: "too many variables".to_string(),
        };
        assert_eq!(err.to_string(), "too many variables");
        assert!(err.source().is_none());
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_io_round_trip() {
        let err: MinimizeError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
    }
}
