//! Recursive descent parser for boolean expressions

use super::error::ExpressionParseError;
use super::tokenizer::{Token, Tokenizer};
use super::{ExprKind, Expression, NamedExpression};
use std::sync::Arc;

/// Parser for the textual expression syntax
///
/// # Syntax
///
/// From lowest to highest precedence:
///
/// - `a + b`, `a | b`, `a || b`, `a # b`, `a ∨ b` - OR
/// - `a ^ b`, `a ⊻ b` - XOR (same level as OR, left associative)
/// - `a * b`, `a & b`, `a && b`, `a ∧ b`, `a b` - AND (juxtaposition is AND)
/// - `a = b` - equality (XNOR), `a != b` - inequality (XOR)
/// - `!a`, `~a`, `¬a` - prefix NOT, `a'` - postfix NOT
/// - `(...)`, identifiers, `0` and `1`
///
/// A list of expressions is separated by `,` or `;`, and each member may bind
/// a name with `let name = expr`.
///
/// # Examples
///
/// ```
/// use qmc_logic::Parser;
///
/// let list = Parser::new("let s = a ^ b; let c = a b").parse().unwrap();
/// assert_eq!(list.len(), 2);
/// assert_eq!(list[0].name.as_deref(), Some("s"));
/// assert_eq!(list[1].expression.to_string(), "a * b");
/// ```
pub struct Parser {
    tokens: Tokenizer,
    input: Arc<str>,
}

impl Parser {
    /// Create a parser for `input`
    pub fn new(input: &str) -> Self {
        Parser {
            tokens: Tokenizer::new(input),
            input: Arc::from(input),
        }
    }

    /// Parse a separated list, stopping at the first syntax error
    pub fn parse(&mut self) -> Result<Vec<NamedExpression>, ExpressionParseError> {
        self.parse_all().into_iter().collect()
    }

    /// Parse a separated list, keeping going after errors
    ///
    /// A syntax error aborts only the member it occurs in; parsing resumes
    /// after the next separator.
    ///
    /// ```
    /// use qmc_logic::Parser;
    ///
    /// let results = Parser::new("a + b, c +, d").parse_all();
    /// assert_eq!(results.len(), 3);
    /// assert!(results[0].is_ok());
    /// assert!(results[1].is_err());
    /// assert!(results[2].is_ok());
    /// ```
    pub fn parse_all(&mut self) -> Vec<Result<NamedExpression, ExpressionParseError>> {
        let mut results = Vec::new();
        loop {
            let item = self.parse_item().and_then(|item| {
                self.expect_item_end()?;
                Ok(item)
            });
            if item.is_err() {
                self.skip_to_separator();
            }
            results.push(item);

            if self.tokens.next() == Token::Eof {
                return results;
            }
        }
    }

    /// Parse exactly one expression
    ///
    /// A `let` binding is accepted and yields its bound expression.
    pub fn parse_single(&mut self) -> Result<Expression, ExpressionParseError> {
        let item = self.parse_item()?;
        match self.tokens.peek() {
            Token::Eof => Ok(item.expression),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_item(&mut self) -> Result<NamedExpression, ExpressionParseError> {
        if let Token::Ident(keyword) = self.tokens.peek() {
            if &*keyword == "let" {
                self.tokens.consume();
                let name = match self.tokens.peek() {
                    Token::Ident(name) => name,
                    _ => return Err(self.unexpected()),
                };
                self.tokens.consume();
                self.expect(Token::Equal)?;
                let expression = self.parse_or()?;
                return Ok(NamedExpression {
                    name: Some(name),
                    expression,
                });
            }
        }
        Ok(NamedExpression::unnamed(self.parse_or()?))
    }

    fn parse_or(&mut self) -> Result<Expression, ExpressionParseError> {
        let mut expr = self.parse_and()?;
        loop {
            match self.tokens.peek() {
                Token::Or => {
                    self.tokens.consume();
                    expr = expr.or(&self.parse_and()?);
                }
                Token::Xor => {
                    self.tokens.consume();
                    expr = expr.xor(&self.parse_and()?);
                }
                _ => return Ok(expr),
            }
        }
    }

    fn parse_and(&mut self) -> Result<Expression, ExpressionParseError> {
        let mut expr = self.parse_equal()?;
        loop {
            let token = self.tokens.peek();
            if token == Token::And {
                self.tokens.consume();
                expr = expr.and(&self.parse_equal()?);
            } else if token.starts_operand() {
                expr = expr.and(&self.parse_equal()?);
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_equal(&mut self) -> Result<Expression, ExpressionParseError> {
        let mut expr = self.parse_simple()?;
        loop {
            match self.tokens.peek() {
                Token::Equal => {
                    self.tokens.consume();
                    expr = expr.xor(&self.parse_simple()?).not();
                }
                Token::NotEqual => {
                    self.tokens.consume();
                    expr = expr.xor(&self.parse_simple()?);
                }
                _ => return Ok(expr),
            }
        }
    }

    /// Operand with optional prefix and postfix negations
    ///
    /// Errors are raised before the offending token is consumed, so list
    /// recovery can still see a separator.
    fn parse_simple(&mut self) -> Result<Expression, ExpressionParseError> {
        let mut expr = match self.tokens.peek() {
            Token::Not => {
                self.tokens.consume();
                self.parse_simple()?.not()
            }
            Token::Open => {
                let open_position = self.tokens.position();
                self.tokens.consume();
                let inner = self.parse_or()?;
                match self.tokens.peek() {
                    Token::Close => self.tokens.consume(),
                    Token::Eof => {
                        return Err(ExpressionParseError::UnclosedParenthesis {
                            input: Arc::clone(&self.input),
                            position: open_position,
                        })
                    }
                    _ => return Err(self.unexpected()),
                }
                inner
            }
            Token::Ident(name) => {
                self.tokens.consume();
                Expression::new(ExprKind::Variable(name))
            }
            Token::One => {
                self.tokens.consume();
                Expression::constant(true)
            }
            Token::Zero => {
                self.tokens.consume();
                Expression::constant(false)
            }
            _ => return Err(self.unexpected()),
        };

        while self.tokens.peek() == Token::PostNot {
            self.tokens.consume();
            expr = expr.not();
        }
        Ok(expr)
    }

    fn expect(&mut self, expected: Token) -> Result<(), ExpressionParseError> {
        if self.tokens.peek() == expected {
            self.tokens.consume();
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn expect_item_end(&mut self) -> Result<(), ExpressionParseError> {
        match self.tokens.peek() {
            Token::Separator | Token::Eof => Ok(()),
            _ => Err(self.unexpected()),
        }
    }

    fn skip_to_separator(&mut self) {
        loop {
            match self.tokens.peek() {
                Token::Separator | Token::Eof => return,
                _ => self.tokens.consume(),
            }
        }
    }

    /// Error for the currently peeked token
    fn unexpected(&mut self) -> ExpressionParseError {
        let token = self.tokens.peek();
        let position = self.tokens.position();
        let input = Arc::clone(&self.input);
        match token {
            Token::Eof => ExpressionParseError::UnexpectedEnd { input, position },
            _ => ExpressionParseError::UnexpectedToken {
                token: Arc::from(self.tokens.lexeme()),
                input,
                position,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_positions() {
        let err = Parser::new("a * )").parse_single().unwrap_err();
        assert_eq!(err.position(), 4);
        assert_eq!(err.token(), Some(")"));

        let err = Parser::new("C+").parse_single().unwrap_err();
        assert!(matches!(err, ExpressionParseError::UnexpectedEnd { position: 2, .. }));

        let err = Parser::new("x * (C").parse_single().unwrap_err();
        assert!(matches!(
            err,
            ExpressionParseError::UnclosedParenthesis { position: 4, .. }
        ));
    }

    #[test]
    fn test_trailing_close_is_rejected() {
        let err = Parser::new("A )").parse().unwrap_err();
        assert_eq!(err.token(), Some(")"));
    }

    #[test]
    fn test_let_requires_equal_sign() {
        let err = Parser::new("let u+a+b").parse().unwrap_err();
        assert_eq!(err.token(), Some("+"));
    }

    #[test]
    fn test_single_rejects_lists() {
        assert!(Parser::new("a, b").parse_single().is_err());
    }

    #[test]
    fn test_recovery_keeps_following_members() {
        let results = Parser::new("*C; a ) b; let x = y").parse_all();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_err());
        assert!(results[1].is_err());
        let last = results[2].as_ref().unwrap();
        assert_eq!(last.name.as_deref(), Some("x"));
        assert_eq!(last.expression, Expression::variable("y"));
    }

    #[test]
    fn test_empty_input() {
        let err = Parser::new("").parse().unwrap_err();
        assert!(matches!(err, ExpressionParseError::UnexpectedEnd { position: 0, .. }));
    }
}
