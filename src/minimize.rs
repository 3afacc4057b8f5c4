//! Minimization front-end
//!
//! The [`Minimizable`] trait runs the whole flow: tabulate the function,
//! reduce it to prime implicants, select a cover, rebuild a sum of products
//! and map it onto the configured gates.

use crate::error::MinimizeError;
use crate::expression::{Expression, NamedExpression};
use crate::modify::ExpressionModifier;
use crate::qmc::{BruteForceGetAll, PrimeSelector, QuineMcCluskey, ReduceError};
use crate::table::{TableOutput, TruthTable};
use crate::MinimizerConfig;
use log::debug;
use std::sync::Arc;

/// Types that can be minimized with Quine–McCluskey
///
/// All methods take `&self` and return the minimized form, leaving the
/// original untouched. [`Expression`] minimizes to an [`Expression`] over the
/// same variables; [`TruthTable`] yields one [`NamedExpression`] per output
/// column.
///
/// You must import this trait to use its methods:
///
/// ```
/// use qmc_logic::{Expression, Minimizable};
///
/// let expr = Expression::parse("a * b + a * b * c")?;
/// let minimized = expr.minimize()?;
/// assert_eq!(minimized.to_string(), "a * b");
/// # Ok::<(), std::io::Error>(())
/// ```
///
/// Truth tables may contain don't-cares:
///
/// ```
/// use qmc_logic::{Minimizable, TruthTable};
///
/// let mut table = TruthTable::new(["A", "B", "C"])?;
/// table.add_values("Y", &[1, 1, 0, 0, 1, 2, 2, 0])?;
///
/// let result = table.minimize()?;
/// assert_eq!(result[0].to_string(), "Y = !B");
/// # Ok::<(), std::io::Error>(())
/// ```
pub trait Minimizable {
    /// Result of a minimization
    type Output;

    /// Minimize with [`MinimizerConfig::default`]
    fn minimize(&self) -> Result<Self::Output, MinimizeError> {
        self.minimize_with_config(&MinimizerConfig::default())
    }

    /// Minimize with a custom configuration
    ///
    /// This is the primary method that implementations must provide.
    fn minimize_with_config(&self, config: &MinimizerConfig)
        -> Result<Self::Output, MinimizeError>;

    /// Minimize with the exhaustive selector and no heuristic fallback
    ///
    /// The result has the minimum number of product terms, but instances with
    /// more than [`MAX_BRUTE_FORCE_PRIMES`](crate::qmc::MAX_BRUTE_FORCE_PRIMES)
    /// primes after dominance removal fail with
    /// [`SelectError::TooManyPrimes`](crate::qmc::SelectError::TooManyPrimes).
    fn minimize_exact(&self) -> Result<Self::Output, MinimizeError> {
        self.minimize_exact_with_config(&MinimizerConfig::default())
    }

    /// Exhaustive minimization with a custom configuration
    ///
    /// The configured selector is ignored.
    fn minimize_exact_with_config(
        &self,
        config: &MinimizerConfig,
    ) -> Result<Self::Output, MinimizeError>;
}

fn check_variable_count(count: usize, config: &MinimizerConfig) -> Result<(), MinimizeError> {
    if count > config.max_variables {
        return Err(ReduceError::TooManyVariables {
            count,
            max: config.max_variables,
        }
        .into());
    }
    Ok(())
}

/// Reduce, select and map one loaded function
fn finish(
    mut qmc: QuineMcCluskey,
    config: &MinimizerConfig,
    selector: &mut dyn PrimeSelector,
) -> Result<Expression, MinimizeError> {
    qmc.reduce();
    debug!("{} prime implicants", qmc.primes().len());
    if config.remove_dominated {
        qmc.remove_dominated();
    }
    qmc.select(selector)?;

    let sum_of_products = qmc.to_expression();
    let mapped = config.gate_pipeline()?.apply(&sum_of_products)?;
    Ok(mapped)
}

fn selector_for(config: &MinimizerConfig, exact: bool) -> Box<dyn PrimeSelector> {
    if exact {
        Box::new(BruteForceGetAll::new())
    } else {
        config.selector.build(config.exact_threshold)
    }
}

fn minimize_expression(
    expr: &Expression,
    config: &MinimizerConfig,
    exact: bool,
) -> Result<Expression, MinimizeError> {
    let variables = expr.collect_variables();
    check_variable_count(variables.len(), config)?;
    debug!("Minimizing expression over {} variables", variables.len());

    let qmc = QuineMcCluskey::from_expression_with_variables(expr, variables)?;
    finish(qmc, config, selector_for(config, exact).as_mut())
}

fn minimize_output(
    variables: &[Arc<str>],
    output: &TableOutput,
    config: &MinimizerConfig,
    exact: bool,
) -> Result<NamedExpression, MinimizeError> {
    debug!("Minimizing output {}", output.name());
    let qmc = QuineMcCluskey::from_output(variables, output)?;
    let expression = finish(qmc, config, selector_for(config, exact).as_mut())?;
    Ok(NamedExpression::new(output.name(), expression))
}

impl Minimizable for Expression {
    type Output = Expression;

    fn minimize_with_config(&self, config: &MinimizerConfig) -> Result<Expression, MinimizeError> {
        minimize_expression(self, config, false)
    }

    fn minimize_exact_with_config(
        &self,
        config: &MinimizerConfig,
    ) -> Result<Expression, MinimizeError> {
        minimize_expression(self, config, true)
    }
}

impl Minimizable for TruthTable {
    type Output = Vec<NamedExpression>;

    fn minimize_with_config(
        &self,
        config: &MinimizerConfig,
    ) -> Result<Vec<NamedExpression>, MinimizeError> {
        check_variable_count(self.variables().len(), config)?;
        self.outputs()
            .iter()
            .map(|output| minimize_output(self.variables(), output, config, false))
            .collect()
    }

    fn minimize_exact_with_config(
        &self,
        config: &MinimizerConfig,
    ) -> Result<Vec<NamedExpression>, MinimizeError> {
        check_variable_count(self.variables().len(), config)?;
        self.outputs()
            .iter()
            .map(|output| minimize_output(self.variables(), output, config, true))
            .collect()
    }
}

impl Expression {
    /// Minimize, keeping the result only if it is smaller
    ///
    /// Returns the minimized sum of products if its
    /// [`complexity`](Expression::complexity) is lower than this
    /// expression's, and a clone of this expression otherwise.
    ///
    /// ```
    /// use qmc_logic::Expression;
    ///
    /// let redundant = Expression::parse("a*b + a*!b").unwrap();
    /// assert_eq!(redundant.simplify().unwrap().to_string(), "a");
    ///
    /// // a XOR has no shorter sum of products
    /// let xor = Expression::parse("a ^ b").unwrap();
    /// assert_eq!(xor.simplify().unwrap(), xor);
    /// ```
    pub fn simplify(&self) -> Result<Expression, MinimizeError> {
        let minimized = self.minimize_with_config(&MinimizerConfig::default())?;
        if minimized.complexity() < self.complexity() {
            Ok(minimized)
        } else {
            Ok(self.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{ExpressionFormat, FormatProfile};
    use crate::qmc::{SelectError, SelectorKind};
    use crate::GateForm;
    use test_log::test;

    fn parse(input: &str) -> Expression {
        Expression::parse(input).unwrap()
    }

    #[test]
    fn test_minimize_expression() {
        let expr = parse("A*C*D + !C*!D + !B*C");
        let result = expr.minimize().unwrap();
        assert_eq!(
            FormatProfile::JAVA.format(&result),
            "(A && C && D) || (!C && !D) || (!B && C)"
        );
        assert_eq!(result.equivalent_to(&expr), Ok(true));
    }

    #[test]
    fn test_regressions_collapse_to_single_variable() {
        for input in [
            "B*(B+A)*(B+C)*(A+B+C)",
            "B(B+A)(B+C)(A+B+C)",
            "B (B+A) (B+C) (A+B+C)",
        ] {
            assert_eq!(parse(input).minimize().unwrap(), Expression::variable("B"));
        }
    }

    #[test]
    fn test_unicode_input() {
        let expr = parse("(C ∨ B) ∧ (A ∨ C) ∧ (B ∨ ¬C) ∧ (C ∨ ¬A)");
        let result = expr.minimize().unwrap();
        assert_eq!(result.to_string(), "B * C");
    }

    #[test]
    fn test_constants() {
        assert_eq!(parse("a * !a").minimize().unwrap(), Expression::constant(false));
        assert_eq!(parse("a + !a").minimize().unwrap(), Expression::constant(true));
        assert_eq!(parse("1").minimize().unwrap(), Expression::constant(true));
        assert_eq!(parse("0").minimize().unwrap(), Expression::constant(false));
    }

    #[test]
    fn test_variables_that_drop_out() {
        // c does not influence the result but stays a table column
        let result = parse("a*c + a*!c").minimize().unwrap();
        assert_eq!(result, Expression::variable("a"));
    }

    #[test]
    fn test_truth_table_outputs() {
        let mut table = TruthTable::new(["A", "B", "C"]).unwrap();
        table.add_values("X", &[0, 1, 1, 0, 0, 1, 1, 1]).unwrap();
        table.add_values("Y", &[0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        table.add_values("Z", &[1, 1, 1, 1, 1, 1, 1, 2]).unwrap();

        let result = table.minimize().unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].name.as_deref(), Some("X"));
        assert_eq!(result[0].expression.operands().map(|ops| ops.len()), Some(3));
        assert_eq!(result[1].expression, Expression::constant(false));
        assert_eq!(result[2].expression, Expression::constant(true));
    }

    #[test]
    fn test_max_variables() {
        let config = MinimizerConfig {
            max_variables: 2,
            ..MinimizerConfig::default()
        };
        let err = parse("a*b + c").minimize_with_config(&config).unwrap_err();
        assert!(matches!(
            err,
            MinimizeError::Reduce(ReduceError::TooManyVariables { count: 3, max: 2 })
        ));
    }

    #[test]
    fn test_exact_matches_heuristic_on_small_input() {
        let expr = parse("a*b*!c + !a*c + b*c*d + !b*!d");
        let exact = expr.minimize_exact().unwrap();
        let default = expr.minimize().unwrap();
        assert_eq!(exact.equivalent_to(&expr), Ok(true));
        assert_eq!(
            exact.operands().map(|ops| ops.len()),
            default.operands().map(|ops| ops.len())
        );
    }

    #[test]
    fn test_exact_without_dominance_can_overflow() {
        // no two ON rows of a parity function are adjacent, so every ON row
        // is a prime and the exhaustive selector gets more than it takes
        let names: Vec<String> = (0..7).map(|i| format!("x{}", i)).collect();
        let mut table = TruthTable::new(&names).unwrap();
        let values: Vec<u8> = (0..128u32).map(|r| (r.count_ones() % 2) as u8).collect();
        table.add_values("P", &values).unwrap();

        let config = MinimizerConfig {
            remove_dominated: false,
            ..MinimizerConfig::default()
        };
        let err = table.minimize_exact_with_config(&config).unwrap_err();
        assert!(matches!(
            err,
            MinimizeError::Select(SelectError::TooManyPrimes { count: 64, max: 31 })
        ));
        // 64 primes reach the default threshold, so the greedy selector runs directly
        let result = table.minimize_with_config(&config).unwrap();
        assert_eq!(result[0].expression.operands().map(|ops| ops.len()), Some(64));
    }

    #[test]
    fn test_greedy_selector() {
        let config = MinimizerConfig {
            selector: SelectorKind::LargestFirst,
            ..MinimizerConfig::default()
        };
        let expr = parse("A*C*D + !C*!D + !B*C");
        let result = expr.minimize_with_config(&config).unwrap();
        assert_eq!(result.equivalent_to(&expr), Ok(true));
    }

    #[test]
    fn test_gate_mapping() {
        let expr = parse("a*b*c*d + !a*!b + c*!d");
        for gate_form in [GateForm::AndOr, GateForm::Nand, GateForm::Nor] {
            let config = MinimizerConfig {
                gate_form,
                fan_in: Some(2),
                ..MinimizerConfig::default()
            };
            let result = expr.minimize_with_config(&config).unwrap();
            assert!(result.max_fan_in() <= 2, "{}: {}", gate_form, result);
            assert_eq!(result.equivalent_to(&expr), Ok(true));
        }
    }

    #[test]
    fn test_invalid_fan_in() {
        let config = MinimizerConfig {
            fan_in: Some(1),
            ..MinimizerConfig::default()
        };
        assert!(matches!(
            parse("a*b").minimize_with_config(&config),
            Err(MinimizeError::Modify(_))
        ));
    }

    #[test]
    fn test_simplify_keeps_smaller_input() {
        let expr = parse("a*b + a*!b + c");
        let simplified = expr.simplify().unwrap();
        assert_eq!(simplified.complexity(), 4);
        assert_eq!(simplified.equivalent_to(&expr), Ok(true));

        let already_minimal = parse("a*b + c");
        let result = already_minimal.simplify().unwrap();
        assert!(result.ptr_eq(&already_minimal));
    }
}
