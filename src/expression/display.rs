//! Display and Debug formatting for boolean expressions

use super::{ExprKind, Expression, NamedExpression};
use std::fmt;

/// Operator context of the operand being printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpContext {
    None, // Top level or inside parentheses
    And,  // Operand of an AND
    Or,   // Operand of an OR or XOR
}

impl Expression {
    /// Format with operator precedence context to minimize parentheses
    fn fmt_with_context(&self, f: &mut fmt::Formatter<'_>, ctx: OpContext) -> fmt::Result {
        let needs_parens = match self.kind() {
            // AND binds tighter than OR/XOR; a raw AND inside an AND keeps its group
            ExprKind::And(_) => ctx == OpContext::And,
            ExprKind::Or(_) | ExprKind::Xor(_, _) => ctx != OpContext::None,
            _ => false,
        };
        if needs_parens {
            write!(f, "(")?;
        }

        match self.kind() {
            ExprKind::Variable(name) => write!(f, "{}", name)?,
            ExprKind::Constant(value) => write!(f, "{}", if *value { "1" } else { "0" })?,
            ExprKind::Not(inner) => {
                write!(f, "!")?;
                if inner.is_composite() {
                    write!(f, "(")?;
                    inner.fmt_with_context(f, OpContext::None)?;
                    write!(f, ")")?;
                } else {
                    inner.fmt_with_context(f, OpContext::None)?;
                }
            }
            ExprKind::And(operands) => write_joined(f, operands, " * ", OpContext::And)?,
            ExprKind::Or(operands) => write_joined(f, operands, " + ", OpContext::Or)?,
            ExprKind::Xor(left, right) => {
                left.fmt_with_context(f, OpContext::Or)?;
                write!(f, " ^ ")?;
                right.fmt_with_context(f, OpContext::Or)?;
            }
        }

        if needs_parens {
            write!(f, ")")?;
        }
        Ok(())
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    operands: &[Expression],
    separator: &str,
    ctx: OpContext,
) -> fmt::Result {
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", separator)?;
        }
        operand.fmt_with_context(f, ctx)?;
    }
    Ok(())
}

/// Functional form: `and(a,not(b))`, `xor(a,b)`, `true`
fn write_functional(kind: &ExprKind, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fn write_list(f: &mut fmt::Formatter<'_>, name: &str, operands: &[Expression]) -> fmt::Result {
        write!(f, "{}(", name)?;
        for (i, operand) in operands.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write_functional(operand.kind(), f)?;
        }
        write!(f, ")")
    }

    match kind {
        ExprKind::Variable(name) => write!(f, "{}", name),
        ExprKind::Constant(value) => write!(f, "{}", value),
        ExprKind::Not(inner) => {
            write!(f, "not(")?;
            write_functional(inner.kind(), f)?;
            write!(f, ")")
        }
        ExprKind::And(operands) => write_list(f, "and", operands),
        ExprKind::Or(operands) => write_list(f, "or", operands),
        ExprKind::Xor(left, right) => {
            write!(f, "xor(")?;
            write_functional(left.kind(), f)?;
            write!(f, ",")?;
            write_functional(right.kind(), f)?;
            write!(f, ")")
        }
    }
}

/// Display formatting for boolean expressions
///
/// Uses `*` for AND, `+` for OR, `^` for XOR and `!` for NOT with minimal
/// parentheses. The output is accepted by [`Expression::parse`].
///
/// # Examples
///
/// ```
/// use qmc_logic::Expression;
///
/// let a = Expression::variable("a");
/// let b = Expression::variable("b");
/// let c = Expression::variable("c");
///
/// assert_eq!(a.and(&b).or(&c).to_string(), "a * b + c");
/// assert_eq!(a.or(&b).and(&c).to_string(), "(a + b) * c");
/// assert_eq!(a.and(&b).not().to_string(), "!(a * b)");
/// ```
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with_context(f, OpContext::None)
    }
}

/// Debug formatting prints the functional form
///
/// ```
/// use qmc_logic::Expression;
///
/// let expr = Expression::parse("a=1 & b=0").unwrap();
/// assert_eq!(format!("{:?}", expr), "and(a,not(b))");
/// ```
impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_functional(self.kind(), f)
    }
}

impl fmt::Debug for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_functional(self, f)
    }
}

impl fmt::Display for NamedExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} = {}", name, self.expression),
            None => write!(f, "{}", self.expression),
        }
    }
}
