//! Rendering expressions in different textual notations
//!
//! [`FormatProfile`] describes a notation by its operator and constant tokens
//! and ships presets for common targets (Java, CUPL, Logisim, ...).
//! [`ExpressionFormat`] turns an [`Expression`] into text; its hooks for
//! identifiers and negation can be overridden, as [`LatexFormat`] does.
//!
//! Unlike `Display`, formatters parenthesize every composite operand of an
//! `And`, `Or` or `Xor`, so the output never relies on operator precedence
//! of the target language.
//!
//! # Examples
//!
//! ```
//! use qmc_logic::format::{ExpressionFormat, FormatProfile};
//! use qmc_logic::Expression;
//!
//! let expr = Expression::parse("A !B + !A B").unwrap();
//! assert_eq!(FormatProfile::JAVA.format(&expr), "(A && !B) || (!A && B)");
//! assert_eq!(FormatProfile::SHORTER.format(&expr), "(A !B) + (!A B)");
//! ```

use crate::expression::{ExprKind, Expression, NamedExpression};
use std::borrow::Cow;

/// Renders expressions to text
///
/// Only [`ExpressionFormat::profile`] is required; the other methods have
/// default implementations driven by the profile's tokens.
pub trait ExpressionFormat {
    /// Operator and constant tokens of this notation
    fn profile(&self) -> &FormatProfile;

    /// Render a variable name
    fn identifier(&self, name: &str) -> String {
        name.to_string()
    }

    /// Render a constant
    fn constant(&self, value: bool) -> String {
        let profile = self.profile();
        if value {
            profile.true_token.to_string()
        } else {
            profile.false_token.to_string()
        }
    }

    /// Render a negation
    ///
    /// The default writes the NOT token as a prefix and parenthesizes a
    /// composite operand.
    fn not(&self, operand: &Expression) -> String {
        let inner = self.format(operand);
        if operand.is_composite() {
            format!("{}({})", self.profile().not, inner)
        } else {
            format!("{}{}", self.profile().not, inner)
        }
    }

    /// Render an expression
    fn format(&self, expr: &Expression) -> String {
        let profile = self.profile();
        match expr.kind() {
            ExprKind::Variable(name) => self.identifier(name),
            ExprKind::Constant(value) => self.constant(*value),
            ExprKind::Not(inner) => self.not(inner),
            ExprKind::And(operands) => self.join(operands, &profile.and),
            ExprKind::Or(operands) => self.join(operands, &profile.or),
            ExprKind::Xor(left, right) => {
                self.join(&[left.clone(), right.clone()], &profile.xor)
            }
        }
    }

    /// Render `name = expression`, or just the expression if it has no name
    fn format_named(&self, named: &NamedExpression) -> String {
        match &named.name {
            Some(name) => format!("{} = {}", self.identifier(name), self.format(&named.expression)),
            None => self.format(&named.expression),
        }
    }

    /// Join operands with an operator token
    ///
    /// An empty token means juxtaposition (operands separated by a space).
    fn join(&self, operands: &[Expression], token: &str) -> String {
        let mut out = String::new();
        for operand in operands {
            if !out.is_empty() {
                out.push(' ');
                if !token.is_empty() {
                    out.push_str(token);
                    out.push(' ');
                }
            }
            if operand.is_composite() {
                out.push('(');
                out.push_str(&self.format(operand));
                out.push(')');
            } else {
                out.push_str(&self.format(operand));
            }
        }
        out
    }
}

/// The tokens of a textual notation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormatProfile {
    /// Name of the notation (used by the command line tool)
    pub name: Cow<'static, str>,
    /// OR operator
    pub or: Cow<'static, str>,
    /// AND operator; empty for juxtaposition
    pub and: Cow<'static, str>,
    /// XOR operator
    pub xor: Cow<'static, str>,
    /// Prefix written before a negated operand
    pub not: Cow<'static, str>,
    /// The constant false
    pub false_token: Cow<'static, str>,
    /// The constant true
    pub true_token: Cow<'static, str>,
}

impl FormatProfile {
    const fn preset(
        name: &'static str,
        or: &'static str,
        and: &'static str,
        xor: &'static str,
        not: &'static str,
        false_token: &'static str,
        true_token: &'static str,
    ) -> Self {
        FormatProfile {
            name: Cow::Borrowed(name),
            or: Cow::Borrowed(or),
            and: Cow::Borrowed(and),
            xor: Cow::Borrowed(xor),
            not: Cow::Borrowed(not),
            false_token: Cow::Borrowed(false_token),
            true_token: Cow::Borrowed(true_token),
        }
    }

    /// Mathematical symbols: `A ∧ ¬B ∨ C`
    pub const UNICODE: FormatProfile =
        FormatProfile::preset("unicode", "∨", "∧", "⊻", "¬", "0", "1");
    /// Mathematical symbols with AND written as juxtaposition
    pub const UNICODE_NOAND: FormatProfile =
        FormatProfile::preset("unicode-noand", "∨", "", "⊻", "¬", "0", "1");
    /// Keyword notation of the Derive algebra system
    pub const DERIVE: FormatProfile =
        FormatProfile::preset("derive", "OR", "AND", "XOR", "NOT ", "false", "true");
    /// Java / C boolean operators
    pub const JAVA: FormatProfile =
        FormatProfile::preset("java", "||", "&&", "^", "!", "false", "true");
    /// CUPL PLD compiler syntax
    pub const CUPL: FormatProfile =
        FormatProfile::preset("cupl", "#", "&", "$", "!", "'b'0", "'b'1");
    /// Logisim expression syntax
    pub const LOGISIM: FormatProfile =
        FormatProfile::preset("logisim", "+", "", "^", "~", "false", "true");
    /// ASCII operators, same tokens as `Display`
    pub const SHORT: FormatProfile = FormatProfile::preset("short", "+", "*", "^", "!", "0", "1");
    /// ASCII operators with AND written as juxtaposition
    pub const SHORTER: FormatProfile =
        FormatProfile::preset("shorter", "+", "", "^", "!", "0", "1");

    /// All presets, in the order they are offered to users
    pub fn presets() -> [FormatProfile; 8] {
        [
            FormatProfile::UNICODE,
            FormatProfile::UNICODE_NOAND,
            FormatProfile::DERIVE,
            FormatProfile::JAVA,
            FormatProfile::CUPL,
            FormatProfile::LOGISIM,
            FormatProfile::SHORT,
            FormatProfile::SHORTER,
        ]
    }

    /// Look up a preset by name (case-insensitive)
    pub fn by_name(name: &str) -> Option<FormatProfile> {
        FormatProfile::presets()
            .into_iter()
            .find(|profile| profile.name.eq_ignore_ascii_case(name))
    }
}

impl Default for FormatProfile {
    fn default() -> Self {
        FormatProfile::UNICODE
    }
}

impl ExpressionFormat for FormatProfile {
    fn profile(&self) -> &FormatProfile {
        self
    }
}

/// LaTeX math-mode notation
///
/// Identifiers keep their first character and put the rest in a subscript
/// (`A_1` and `A1` both become `A_{1}`); negation is drawn with
/// `\overline{...}`.
///
/// ```
/// use qmc_logic::format::{ExpressionFormat, LatexFormat};
/// use qmc_logic::Expression;
///
/// let expr = Expression::parse("!(A1 + B) * C").unwrap();
/// assert_eq!(
///     LatexFormat::new().format(&expr),
///     "\\overline{A_{1} \\lor B} \\land C"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct LatexFormat {
    profile: FormatProfile,
}

impl LatexFormat {
    /// Create the LaTeX formatter
    pub fn new() -> Self {
        LatexFormat {
            profile: FormatProfile::preset(
                "latex", "\\lor", "\\land", "\\oplus", "\\neg ", "0", "1",
            ),
        }
    }
}

impl Default for LatexFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionFormat for LatexFormat {
    fn profile(&self) -> &FormatProfile {
        &self.profile
    }

    fn identifier(&self, name: &str) -> String {
        let mut chars = name.chars();
        let first = match chars.next() {
            Some(first) => first,
            None => return String::new(),
        };
        let rest = chars.as_str().trim_start_matches('_');
        if rest.is_empty() {
            first.to_string()
        } else {
            format!("{}_{{{}}}", first, rest)
        }
    }

    fn not(&self, operand: &Expression) -> String {
        format!("\\overline{{{}}}", self.format(operand))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xor_example() -> Expression {
        // A*!B + !A*B + 0, kept raw so the constant survives
        let a = Expression::variable("A");
        let b = Expression::variable("B");
        Expression::or_no_merge(vec![
            a.and(&b.not()),
            a.not().and(&b),
            Expression::constant(false),
        ])
    }

    #[test]
    fn test_presets() {
        let expr = xor_example();
        assert_eq!(
            FormatProfile::UNICODE.format(&expr),
            "(A ∧ ¬B) ∨ (¬A ∧ B) ∨ 0"
        );
        assert_eq!(
            FormatProfile::UNICODE_NOAND.format(&expr),
            "(A ¬B) ∨ (¬A B) ∨ 0"
        );
        assert_eq!(
            FormatProfile::DERIVE.format(&expr),
            "(A AND NOT B) OR (NOT A AND B) OR false"
        );
        assert_eq!(
            FormatProfile::JAVA.format(&expr),
            "(A && !B) || (!A && B) || false"
        );
        assert_eq!(
            FormatProfile::CUPL.format(&expr),
            "(A & !B) # (!A & B) # 'b'0"
        );
        assert_eq!(
            FormatProfile::LOGISIM.format(&expr),
            "(A ~B) + (~A B) + false"
        );
        assert_eq!(FormatProfile::SHORT.format(&expr), "(A * !B) + (!A * B) + 0");
        assert_eq!(FormatProfile::SHORTER.format(&expr), "(A !B) + (!A B) + 0");
    }

    #[test]
    fn test_not_of_composite_is_parenthesized() {
        let expr = Expression::parse("!(a + b) * !c").unwrap();
        assert_eq!(FormatProfile::SHORT.format(&expr), "!(a + b) * !c");
    }

    #[test]
    fn test_xor_token() {
        let expr = Expression::parse("a ^ b").unwrap();
        assert_eq!(FormatProfile::CUPL.format(&expr), "a $ b");
        assert_eq!(FormatProfile::UNICODE.format(&expr), "a ⊻ b");
    }

    #[test]
    fn test_named() {
        let named = NamedExpression::new("Y", Expression::parse("a b").unwrap());
        assert_eq!(FormatProfile::JAVA.format_named(&named), "Y = a && b");
        let unnamed = NamedExpression::unnamed(Expression::variable("a"));
        assert_eq!(FormatProfile::JAVA.format_named(&unnamed), "a");
    }

    #[test]
    fn test_parseable_profiles_round_trip() {
        let expr = Expression::parse("(a + !b) (c ^ d) + !(a b)").unwrap();
        for profile in [
            FormatProfile::UNICODE,
            FormatProfile::UNICODE_NOAND,
            FormatProfile::SHORT,
            FormatProfile::SHORTER,
        ] {
            let text = profile.format(&expr);
            let reparsed = Expression::parse(&text).unwrap();
            assert_eq!(expr.equivalent_to(&reparsed), Ok(true), "{}", text);
        }
    }

    #[test]
    fn test_latex_identifiers() {
        let latex = LatexFormat::new();
        assert_eq!(latex.identifier("A"), "A");
        assert_eq!(latex.identifier("A_1"), "A_{1}");
        assert_eq!(latex.identifier("Q12"), "Q_{12}");
    }

    #[test]
    fn test_by_name() {
        assert_eq!(FormatProfile::by_name("JAVA"), Some(FormatProfile::JAVA));
        assert_eq!(FormatProfile::by_name("nope"), None);
    }
}
