//! Operator overloading for boolean expressions

use super::Expression;
use std::ops::{Add, BitXor, Mul, Not};

/// Logical AND operator for references: `&a * &b`
///
/// This is the preferred form as it avoids cloning the operands.
///
/// # Examples
///
/// ```
/// use qmc_logic::Expression;
///
/// let a = Expression::variable("a");
/// let b = Expression::variable("b");
/// assert_eq!(&a * &b, a.and(&b));
/// ```
impl Mul for &Expression {
    type Output = Expression;

    fn mul(self, rhs: &Expression) -> Expression {
        self.and(rhs)
    }
}

/// Logical AND operator: `a * b` (delegates to the reference version)
impl Mul for Expression {
    type Output = Expression;

    fn mul(self, rhs: Expression) -> Expression {
        self.and(&rhs)
    }
}

/// Logical OR operator for references: `&a + &b`
///
/// # Examples
///
/// ```
/// use qmc_logic::Expression;
///
/// let a = Expression::variable("a");
/// let b = Expression::variable("b");
/// let c = Expression::variable("c");
/// assert_eq!((&a + &b + &c).to_string(), "a + b + c");
/// ```
impl Add for &Expression {
    type Output = Expression;

    fn add(self, rhs: &Expression) -> Expression {
        self.or(rhs)
    }
}

/// Logical OR operator: `a + b` (delegates to the reference version)
impl Add for Expression {
    type Output = Expression;

    fn add(self, rhs: Expression) -> Expression {
        self.or(&rhs)
    }
}

impl Add<&Expression> for Expression {
    type Output = Expression;

    fn add(self, rhs: &Expression) -> Expression {
        self.or(rhs)
    }
}

impl Mul<&Expression> for Expression {
    type Output = Expression;

    fn mul(self, rhs: &Expression) -> Expression {
        self.and(rhs)
    }
}

/// Exclusive OR operator for references: `&a ^ &b`
///
/// Constant operands are folded, see [`Expression::xor`].
///
/// ```
/// use qmc_logic::Expression;
///
/// let a = Expression::variable("a");
/// assert_eq!(&a ^ &Expression::constant(true), a.not());
/// ```
impl BitXor for &Expression {
    type Output = Expression;

    fn bitxor(self, rhs: &Expression) -> Expression {
        self.xor(rhs)
    }
}

/// Exclusive OR operator: `a ^ b` (delegates to the reference version)
impl BitXor for Expression {
    type Output = Expression;

    fn bitxor(self, rhs: Expression) -> Expression {
        self.xor(&rhs)
    }
}

/// Logical NOT operator for references: `!&a`
///
/// ```
/// use qmc_logic::Expression;
///
/// let a = Expression::variable("a");
/// assert_eq!(!&!&a, a);
/// ```
impl Not for &Expression {
    type Output = Expression;

    fn not(self) -> Expression {
        Expression::not(self)
    }
}

/// Logical NOT operator: `!a`
impl Not for Expression {
    type Output = Expression;

    fn not(self) -> Expression {
        Expression::not(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operators_match_methods() {
        let a = Expression::variable("a");
        let b = Expression::variable("b");
        let c = Expression::variable("c");

        assert_eq!(&a * &b + &c, a.and(&b).or(&c));
        assert_eq!(a.clone() * b.clone(), a.and(&b));
        assert_eq!(!(&a + &b), a.or(&b).not());
        assert_eq!(&a ^ &b, a.xor(&b));
    }

    #[test]
    fn test_chained_operators_flatten() {
        let a = Expression::variable("a");
        let b = Expression::variable("b");
        let c = Expression::variable("c");
        let expr = &a * &b * &c;
        assert_eq!(expr.operands().map(|ops| ops.len()), Some(3));
    }
}
