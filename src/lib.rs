//! # QMC Logic
//!
//! Boolean expression parsing, Quine–McCluskey minimization and gate mapping.
//!
//! ## Overview
//!
//! The crate takes a propositional formula or an explicit truth table and
//! produces a minimal (or near-minimal) sum of products for it. It is useful
//! for:
//!
//! - Simplifying hand-written or generated Boolean expressions
//! - Minimizing truth tables with don't-care entries
//! - Mapping the result onto NAND-only or NOR-only logic with a fan-in limit
//! - Printing expressions in the notation of other tools (Java, CUPL, LaTeX...)
//!
//! ## Expressions
//!
//! Parse expressions from strings or build them with the [`expr!`] macro:
//!
//! ```
//! use qmc_logic::{expr, Expression, Minimizable};
//!
//! # fn main() -> std::io::Result<()> {
//! let a = Expression::variable("a");
//! let b = Expression::variable("b");
//! let c = Expression::variable("c");
//!
//! // Build a redundant expression: a*b + a*b*c
//! let redundant = expr!(a * b + a * b * c);
//!
//! let minimized = redundant.minimize()?;
//! assert_eq!(minimized.to_string(), "a * b");
//!
//! // The parser understands several notations
//! let parsed = Expression::parse("(a ∧ b) ∨ (a && b && c)")?;
//! assert_eq!(parsed.equivalent_to(&redundant), Ok(true));
//! # Ok(())
//! # }
//! ```
//!
//! ## Truth tables
//!
//! Every output column of a [`TruthTable`] is minimized separately. Cells are
//! `0`, `1` or `2` (don't care):
//!
//! ```
//! use qmc_logic::{Minimizable, TruthTable};
//!
//! # fn main() -> std::io::Result<()> {
//! let mut table = TruthTable::new(["A", "B", "C"])?;
//! table.add_values("Y", &[1, 1, 0, 0, 1, 2, 2, 0])?;
//!
//! for output in table.minimize()? {
//!     println!("{}", output); // Y = !B
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Gate mapping
//!
//! [`MinimizerConfig`] selects the prime selector, the target gate type and
//! the maximum number of gate inputs:
//!
//! ```
//! use qmc_logic::{Expression, GateForm, Minimizable, MinimizerConfig};
//!
//! # fn main() -> std::io::Result<()> {
//! let config = MinimizerConfig {
//!     gate_form: GateForm::Nand,
//!     fan_in: Some(2),
//!     ..MinimizerConfig::default()
//! };
//! let expr = Expression::parse("a*b*c + !a*!b")?;
//! let gates = expr.minimize_with_config(&config)?;
//!
//! assert!(gates.max_fan_in() <= 2);
//! assert_eq!(gates.equivalent_to(&expr), Ok(true));
//! # Ok(())
//! # }
//! ```
//!
//! ## Step by step
//!
//! The building blocks are public: [`qmc::QuineMcCluskey`] exposes every
//! reduction level and the prime implicants, [`qmc::selector`] the cover
//! strategies, [`modify`] the rewriting passes and [`format`] the output
//! notations.
//!
//! ## Thread Safety
//!
//! Expressions are immutable and share nodes through [`std::sync::Arc`], so
//! they are `Send + Sync` and can be handed between threads freely. All
//! computations are synchronous. Stateful selectors such as
//! [`qmc::DefaultSelector`] take `&mut self`; use one per job.

// Public modules
pub mod error;
pub mod expression;
pub mod format;
pub mod minimize;
pub mod modify;
pub mod qmc;
pub mod table;

// Re-export high-level public API
pub use error::MinimizeError;
pub use expression::{
    Context, ContextFiller, EvalError, ExprKind, ExprNode, Expression, ExpressionParseError,
    NamedExpression, Parser, Token, Tokenizer, MAX_TABLE_VARIABLES,
};
pub use format::{ExpressionFormat, FormatProfile, LatexFormat};
pub use minimize::Minimizable;
pub use modify::{ExpressionModifier, ModifyError};
pub use qmc::{QuineMcCluskey, SelectorKind};
pub use table::{TableError, TableOutput, Ternary, TruthTable};

/// Build an [`Expression`] from Rust-like syntax
///
/// Identifiers refer to `Expression` variables in scope, string literals
/// create variables, `0`/`1` are constants. Operators: `!`/`~` (NOT),
/// `*`/`&` (AND), `+`/`|` (OR), `^` (XOR) and parentheses.
pub use qmc_logic_macros::expr;

use modify::{NAnd, NInputs, NOr, Pipeline};
use std::fmt;
use std::str::FromStr;

/// Gate technology the minimized sum of products is mapped onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GateForm {
    /// AND and OR gates (plain sum of products)
    #[default]
    AndOr,
    /// NAND gates and inverters
    Nand,
    /// NOR gates and inverters
    Nor,
}

impl fmt::Display for GateForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GateForm::AndOr => "and-or",
            GateForm::Nand => "nand",
            GateForm::Nor => "nor",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for GateForm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "and-or" | "andor" | "sop" => Ok(GateForm::AndOr),
            "nand" => Ok(GateForm::Nand),
            "nor" => Ok(GateForm::Nor),
            other => Err(format!(
                "unknown gate form '{}' (expected and-or, nand or nor)",
                other
            )),
        }
    }
}

/// Configuration for minimization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimizerConfig {
    /// Prime selection strategy
    pub selector: SelectorKind,
    /// Prime count below which the default selector searches exhaustively
    pub exact_threshold: usize,
    /// Largest accepted number of input variables
    pub max_variables: usize,
    /// Shrink the cover problem by row and column dominance before selection
    pub remove_dominated: bool,
    /// Target gate type
    pub gate_form: GateForm,
    /// Maximum number of inputs per AND/OR gate, unlimited if `None`
    pub fan_in: Option<usize>,
}

impl Default for MinimizerConfig {
    fn default() -> Self {
        MinimizerConfig {
            selector: SelectorKind::Default,
            exact_threshold: qmc::DEFAULT_EXACT_THRESHOLD,
            max_variables: 20,
            remove_dominated: true,
            gate_form: GateForm::AndOr,
            fan_in: None,
        }
    }
}

impl MinimizerConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// The rewriting passes applied after selection
    ///
    /// The fan-in limit is applied first so the gate normalization sees the
    /// final gate structure.
    pub fn gate_pipeline(&self) -> Result<Pipeline, ModifyError> {
        let mut pipeline = Pipeline::new();
        if let Some(fan_in) = self.fan_in {
            pipeline.push(NInputs::new(fan_in)?);
        }
        match self.gate_form {
            GateForm::AndOr => {}
            GateForm::Nand => pipeline.push(NAnd),
            GateForm::Nor => pipeline.push(NOr),
        }
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MinimizerConfig::new();
        assert_eq!(config.selector, SelectorKind::Default);
        assert_eq!(config.exact_threshold, 16);
        assert!(config.remove_dominated);
        assert!(config.gate_pipeline().unwrap().is_empty());
    }

    #[test]
    fn test_gate_pipeline() {
        let config = MinimizerConfig {
            gate_form: GateForm::Nor,
            fan_in: Some(3),
            ..MinimizerConfig::default()
        };
        assert_eq!(config.gate_pipeline().unwrap().len(), 2);

        let invalid = MinimizerConfig {
            fan_in: Some(0),
            ..MinimizerConfig::default()
        };
        assert_eq!(
            invalid.gate_pipeline().unwrap_err(),
            ModifyError::InvalidFanIn { fan_in: 0 }
        );
    }

    #[test]
    fn test_gate_form_names() {
        for form in [GateForm::AndOr, GateForm::Nand, GateForm::Nor] {
            assert_eq!(form.to_string().parse::<GateForm>(), Ok(form));
        }
        assert_eq!("NAND".parse::<GateForm>(), Ok(GateForm::Nand));
        assert!("xor".parse::<GateForm>().is_err());
    }
}
