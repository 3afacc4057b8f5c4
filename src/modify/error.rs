//! Error types for expression rewriting

use std::fmt;
use std::io;

/// Errors that can occur while rewriting an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModifyError {
    /// The modifier cannot express this node
    ///
    /// For example NAND normalization meeting an XOR gate. Run
    /// [`ExpandXor`](crate::modify::ExpandXor) first to avoid it.
    UnsupportedOperation {
        /// Name of the modifier
        modifier: &'static str,
        /// The node kind it rejected
        operation: &'static str,
    },
    /// A fan-in limit below two
    InvalidFanIn {
        /// The rejected limit
        fan_in: usize,
    },
}

impl fmt::Display for ModifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModifyError::UnsupportedOperation {
                modifier,
                operation,
            } => write!(f, "{} does not support the {} operation", modifier, operation),
            ModifyError::InvalidFanIn { fan_in } => {
                write!(f, "Invalid fan-in {}: gates need at least 2 inputs", fan_in)
            }
        }
    }
}

impl std::error::Error for ModifyError {}

impl From<ModifyError> for io::Error {
    fn from(err: ModifyError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}
