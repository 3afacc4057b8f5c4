//! Error types for boolean expression parsing and evaluation

use std::fmt;
use std::io;
use std::sync::Arc;

/// Errors related to boolean expression parsing
///
/// Every variant carries the original input and the character offset at which
/// the problem was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionParseError {
    /// A token that cannot appear at this point
    UnexpectedToken {
        /// The offending token as written in the input
        token: Arc<str>,
        /// The original input string that failed to parse
        input: Arc<str>,
        /// Character offset of the token
        position: usize,
    },
    /// The input ended while an operand was still expected
    UnexpectedEnd {
        /// The original input string that failed to parse
        input: Arc<str>,
        /// Character offset of the end of input
        position: usize,
    },
    /// A `(` without a matching `)`
    UnclosedParenthesis {
        /// The original input string that failed to parse
        input: Arc<str>,
        /// Character offset of the opening parenthesis
        position: usize,
    },
}

impl ExpressionParseError {
    /// Character offset where the error was detected
    pub fn position(&self) -> usize {
        match self {
            ExpressionParseError::UnexpectedToken { position, .. }
            | ExpressionParseError::UnexpectedEnd { position, .. }
            | ExpressionParseError::UnclosedParenthesis { position, .. } => *position,
        }
    }

    /// The offending token, if the error was caused by one
    pub fn token(&self) -> Option<&str> {
        match self {
            ExpressionParseError::UnexpectedToken { token, .. } => Some(&**token),
            _ => None,
        }
    }

    /// The input that failed to parse
    pub fn input(&self) -> &str {
        match self {
            ExpressionParseError::UnexpectedToken { input, .. }
            | ExpressionParseError::UnexpectedEnd { input, .. }
            | ExpressionParseError::UnclosedParenthesis { input, .. } => input,
        }
    }

    /// Human readable description without position and input
    pub fn message(&self) -> String {
        match self {
            ExpressionParseError::UnexpectedToken { token, .. } => {
                format!("unexpected token '{}'", token)
            }
            ExpressionParseError::UnexpectedEnd { .. } => "unexpected end of input".to_string(),
            ExpressionParseError::UnclosedParenthesis { .. } => {
                "missing closing parenthesis".to_string()
            }
        }
    }
}

impl fmt::Display for ExpressionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to parse boolean expression at position {}: {}. Input: {:?}",
            self.position(),
            self.message(),
            self.input()
        )
    }
}

impl std::error::Error for ExpressionParseError {}

impl From<ExpressionParseError> for io::Error {
    fn from(err: ExpressionParseError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

/// Errors that can occur when evaluating an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The expression references a variable the assignment does not bind
    UnboundVariable {
        /// Name of the missing variable
        name: Arc<str>,
    },
    /// Too many variables to enumerate every assignment
    TooManyVariables {
        /// Number of variables requested
        count: usize,
        /// Maximum supported
        max: usize,
    },
    /// A variable appears twice in a column order
    DuplicateVariable {
        /// Name of the repeated variable
        name: Arc<str>,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UnboundVariable { name } => write!(f, "Unbound variable '{}'", name),
            EvalError::TooManyVariables { count, max } => write!(
                f,
                "Cannot enumerate {} variables (at most {} are supported)",
                count, max
            ),
            EvalError::DuplicateVariable { name } => {
                write!(f, "Variable '{}' appears more than once", name)
            }
        }
    }
}

impl std::error::Error for EvalError {}

impl From<EvalError> for io::Error {
    fn from(err: EvalError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}
