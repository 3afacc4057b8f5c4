//! Compile-time construction of `qmc_logic::Expression` values
//!
//! The grammar follows the runtime parser level for level, and every node is
//! built with the same combinator call the parser uses for it, so
//! `expr!(a b + !c)` and `Expression::parse("a b + !c")` produce identical
//! trees.
//!
//! Postfix `'` is the one runtime spelling that cannot appear here: Rust's
//! lexer reads it as the start of a character literal.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::parse::{Parse, ParseStream, Result};
use syn::{parse_macro_input, token, Ident, LitInt, LitStr, Token};

#[derive(Clone, Copy)]
enum BinaryOp {
    Or,
    Xor,
    And,
    Equal,
    NotEqual,
}

enum Node {
    /// An `Expression` binding from the caller's scope
    Binding(Ident),
    Named(LitStr),
    Constant(bool),
    Not(Box<Node>),
    Binary(BinaryOp, Box<Node>, Box<Node>),
}

impl Node {
    fn binary(op: BinaryOp, lhs: Node, rhs: Node) -> Node {
        Node::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    /// Code for an owned `Expression`
    ///
    /// Bindings are only borrowed inside larger expressions; a bare binding
    /// is cloned so the caller keeps it.
    fn expand(&self) -> TokenStream2 {
        match self {
            Node::Binding(ident) => quote! { Expression::clone(&#ident) },
            _ => self.expand_operand(),
        }
    }

    fn expand_operand(&self) -> TokenStream2 {
        match self {
            Node::Binding(ident) => quote! { #ident },
            Node::Named(name) => quote! { Expression::variable(#name) },
            Node::Constant(value) => quote! { Expression::constant(#value) },
            Node::Not(inner) => {
                let inner = inner.expand_operand();
                quote! { (&(#inner)).not() }
            }
            Node::Binary(op, lhs, rhs) => {
                let lhs = lhs.expand_operand();
                let rhs = rhs.expand_operand();
                match op {
                    BinaryOp::Or => quote! { (&(#lhs)).or(&(#rhs)) },
                    BinaryOp::Xor | BinaryOp::NotEqual => quote! { (&(#lhs)).xor(&(#rhs)) },
                    BinaryOp::And => quote! { (&(#lhs)).and(&(#rhs)) },
                    BinaryOp::Equal => quote! { (&(#lhs)).xor(&(#rhs)).not() },
                }
            }
        }
    }
}

struct Input(Node);

impl Parse for Input {
    fn parse(input: ParseStream) -> Result<Self> {
        disjunction(input).map(Input)
    }
}

/// `+`, `|`, `||`, `#` and `^`, left associative
fn disjunction(input: ParseStream) -> Result<Node> {
    let mut node = conjunction(input)?;
    loop {
        let op = if input.peek(Token![||]) {
            input.parse::<Token![||]>()?;
            BinaryOp::Or
        } else if input.peek(Token![|]) {
            input.parse::<Token![|]>()?;
            BinaryOp::Or
        } else if input.peek(Token![+]) {
            input.parse::<Token![+]>()?;
            BinaryOp::Or
        } else if input.peek(Token![#]) {
            input.parse::<Token![#]>()?;
            BinaryOp::Or
        } else if input.peek(Token![^]) {
            input.parse::<Token![^]>()?;
            BinaryOp::Xor
        } else {
            return Ok(node);
        };
        node = Node::binary(op, node, conjunction(input)?);
    }
}

/// `*`, `&`, `&&`, or two operands side by side
fn conjunction(input: ParseStream) -> Result<Node> {
    let mut node = equality(input)?;
    loop {
        if input.peek(Token![&&]) {
            input.parse::<Token![&&]>()?;
        } else if input.peek(Token![&]) {
            input.parse::<Token![&]>()?;
        } else if input.peek(Token![*]) {
            input.parse::<Token![*]>()?;
        } else if !starts_operand(input) {
            return Ok(node);
        }
        node = Node::binary(BinaryOp::And, node, equality(input)?);
    }
}

/// `=` (or `==`), `!=` and `~=`
fn equality(input: ParseStream) -> Result<Node> {
    let mut node = operand(input)?;
    loop {
        let op = if input.peek(Token![!=]) {
            input.parse::<Token![!=]>()?;
            BinaryOp::NotEqual
        } else if input.peek(Token![~]) && input.peek2(Token![=]) {
            input.parse::<Token![~]>()?;
            input.parse::<Token![=]>()?;
            BinaryOp::NotEqual
        } else if input.peek(Token![==]) {
            input.parse::<Token![==]>()?;
            BinaryOp::Equal
        } else if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            BinaryOp::Equal
        } else {
            return Ok(node);
        };
        node = Node::binary(op, node, operand(input)?);
    }
}

fn starts_operand(input: ParseStream) -> bool {
    input.peek(token::Paren)
        || input.peek(LitStr)
        || input.peek(LitInt)
        || input.peek(Ident)
        || (input.peek(Token![~]) && !input.peek2(Token![=]))
        || (input.peek(Token![!]) && !input.peek(Token![!=]))
}

fn operand(input: ParseStream) -> Result<Node> {
    if input.peek(Token![!]) && !input.peek(Token![!=]) {
        input.parse::<Token![!]>()?;
        return Ok(Node::Not(Box::new(operand(input)?)));
    }
    if input.peek(Token![~]) {
        input.parse::<Token![~]>()?;
        return Ok(Node::Not(Box::new(operand(input)?)));
    }
    if input.peek(token::Paren) {
        let group;
        syn::parenthesized!(group in input);
        return disjunction(&group);
    }
    if input.peek(LitStr) {
        return Ok(Node::Named(input.parse()?));
    }
    if input.peek(LitInt) {
        let lit: LitInt = input.parse()?;
        return match lit.base10_digits() {
            "0" => Ok(Node::Constant(false)),
            "1" => Ok(Node::Constant(true)),
            _ => Err(syn::Error::new(lit.span(), "expected constant 0 or 1")),
        };
    }
    if input.peek(Ident) {
        return Ok(Node::Binding(input.parse()?));
    }
    Err(input.error("expected an identifier, a string literal, 0, 1 or `(`"))
}

/// Builds an `Expression` from boolean syntax checked at compile time
///
/// `Expression` must be in scope at the call site. Identifiers refer to
/// `Expression` values (or references to them) in the caller's scope; string
/// literals create fresh variables.
///
/// From lowest to highest precedence:
///
/// - `a + b`, `a | b`, `a || b`, `a # b` - OR
/// - `a ^ b` - XOR, same level as OR
/// - `a * b`, `a & b`, `a && b`, `a b` - AND
/// - `a = b` or `a == b` - XNOR, `a != b` or `a ~= b` - XOR
/// - `!a`, `~a` - NOT
/// - `(...)`, identifiers, string literals, `0` and `1`
///
/// # Examples
///
/// ```ignore
/// use qmc_logic::{expr, Expression};
///
/// let a = Expression::variable("a");
/// let b = Expression::variable("b");
/// let sum = expr!(a != b);
/// let carry = expr!(a b);
/// assert_eq!(expr!("s" = "t" + 0), Expression::parse("s = t + 0").unwrap());
/// ```
#[proc_macro]
pub fn expr(input: TokenStream) -> TokenStream {
    let Input(node) = parse_macro_input!(input as Input);
    node.expand().into()
}
