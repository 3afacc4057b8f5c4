//! Lexer for the textual expression syntax

use std::fmt;
use std::sync::Arc;

/// A lexical token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Identifier (`A`, `a_1`, `A\_1`)
    Ident(Arc<str>),
    /// The literal `0`
    Zero,
    /// The literal `1`
    One,
    /// `*`, `&`, `&&` or `∧`
    And,
    /// `+`, `#`, `|`, `||` or `∨`
    Or,
    /// `^` or `⊻`
    Xor,
    /// Prefix `!`, `~` or `¬`
    Not,
    /// Postfix `'`
    PostNot,
    /// `(`
    Open,
    /// `)`
    Close,
    /// List separator `,` or `;`
    Separator,
    /// `=`
    Equal,
    /// `!=`, `~=` or `¬=`
    NotEqual,
    /// End of input
    Eof,
    /// Any character the lexer does not recognize
    Unknown(char),
}

impl Token {
    /// True if the token can start an operand
    ///
    /// Used by the parser to detect implicit AND by juxtaposition.
    pub fn starts_operand(&self) -> bool {
        matches!(
            self,
            Token::Not | Token::Open | Token::Ident(_) | Token::One | Token::Zero
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "{}", name),
            Token::Zero => write!(f, "0"),
            Token::One => write!(f, "1"),
            Token::And => write!(f, "*"),
            Token::Or => write!(f, "+"),
            Token::Xor => write!(f, "^"),
            Token::Not => write!(f, "!"),
            Token::PostNot => write!(f, "'"),
            Token::Open => write!(f, "("),
            Token::Close => write!(f, ")"),
            Token::Separator => write!(f, ","),
            Token::Equal => write!(f, "="),
            Token::NotEqual => write!(f, "!="),
            Token::Eof => write!(f, "end of input"),
            Token::Unknown(c) => write!(f, "{}", c),
        }
    }
}

/// Splits an input string into [`Token`]s with one token of lookahead
///
/// [`Tokenizer::peek`] reads a token without removing it, [`Tokenizer::consume`]
/// drops the peeked token and [`Tokenizer::next`] does both. Positions are
/// character offsets into the input.
///
/// # Examples
///
/// ```
/// use qmc_logic::{Token, Tokenizer};
///
/// let mut tokens = Tokenizer::new("a && !b");
/// assert_eq!(tokens.next(), Token::Ident("a".into()));
/// assert_eq!(tokens.peek(), Token::And);
/// assert_eq!(tokens.position(), 2);
/// tokens.consume();
/// assert_eq!(tokens.next(), Token::Not);
/// assert_eq!(tokens.next(), Token::Ident("b".into()));
/// assert_eq!(tokens.next(), Token::Eof);
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer {
    chars: Vec<char>,
    offset: usize,
    peeked: Option<(Token, usize, usize)>,
}

impl Tokenizer {
    /// Create a tokenizer over `input`
    pub fn new(input: &str) -> Self {
        Tokenizer {
            chars: input.chars().collect(),
            offset: 0,
            peeked: None,
        }
    }

    /// Return the next token without consuming it
    pub fn peek(&mut self) -> Token {
        if self.peeked.is_none() {
            let start = self.skip_whitespace();
            let token = self.lex();
            self.peeked = Some((token, start, self.offset));
        }
        match &self.peeked {
            Some((token, _, _)) => token.clone(),
            None => Token::Eof,
        }
    }

    /// Return and consume the next token
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Token {
        let token = self.peek();
        self.consume();
        token
    }

    /// Drop the token returned by the last [`Tokenizer::peek`]
    pub fn consume(&mut self) {
        self.peeked = None;
    }

    /// Character offset of the peeked token, or of the next unread character
    pub fn position(&self) -> usize {
        match &self.peeked {
            Some((_, start, _)) => *start,
            None => self.offset,
        }
    }

    /// The source text of the peeked token
    pub fn lexeme(&self) -> String {
        match &self.peeked {
            Some((_, start, end)) => self.chars[*start..*end].iter().collect(),
            None => String::new(),
        }
    }

    fn skip_whitespace(&mut self) -> usize {
        while let Some(c) = self.chars.get(self.offset) {
            if matches!(c, ' ' | '\t' | '\r' | '\n') {
                self.offset += 1;
            } else {
                break;
            }
        }
        self.offset
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.offset).copied()
    }

    /// Advance past `expected` if it is the next character
    fn accept(&mut self, expected: char) -> bool {
        if self.current() == Some(expected) {
            self.offset += 1;
            true
        } else {
            false
        }
    }

    fn lex(&mut self) -> Token {
        let c = match self.current() {
            Some(c) => c,
            None => return Token::Eof,
        };
        self.offset += 1;

        match c {
            '0' => Token::Zero,
            '1' => Token::One,
            '(' => Token::Open,
            ')' => Token::Close,
            '^' | '⊻' => Token::Xor,
            '&' => {
                self.accept('&');
                Token::And
            }
            '*' | '∧' => Token::And,
            '|' => {
                self.accept('|');
                Token::Or
            }
            '+' | '#' | '∨' => Token::Or,
            '!' | '~' | '¬' => {
                if self.accept('=') {
                    Token::NotEqual
                } else {
                    Token::Not
                }
            }
            ',' | ';' => Token::Separator,
            '=' => Token::Equal,
            '\'' => Token::PostNot,
            c if is_ident_start(c) => {
                let start = self.offset - 1;
                while let Some(next) = self.current() {
                    if is_ident_start(next) || next.is_ascii_digit() {
                        self.offset += 1;
                    } else {
                        break;
                    }
                }
                let name: String = self.chars[start..self.offset].iter().collect();
                Token::Ident(Arc::from(name))
            }
            other => Token::Unknown(other),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '\\'
}
