//! Infix to postfix translation using the shunting-yard algorithm.
//!
//! Operator precedence, from highest to lowest, is `*`, `.`, `|`. An
//! operator only pops operators with *strictly* higher precedence before
//! being pushed, so operators of equal precedence accumulate on the stack
//! and come out in reverse input order (`a.b.c` becomes `abc..`).

use std::fmt;

use log::{debug, trace};

use crate::{CompileError, CompileResult};

/// A single token of a postfix expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// Matches exactly this character.
    Literal(char),
    /// `.`
    Concat,
    /// `|`
    Alternate,
    /// `*`
    Star,
}

impl Token {
    /// Classifies a character. Anything that isn't one of the three
    /// operators is a literal, parentheses included.
    pub fn from_char(c: char) -> Self {
        match c {
            '.' => Token::Concat,
            '|' => Token::Alternate,
            '*' => Token::Star,
            c => Token::Literal(c),
        }
    }

    /// Returns the character this token is written as.
    pub fn as_char(&self) -> char {
        match self {
            Token::Literal(c) => *c,
            Token::Concat => '.',
            Token::Alternate => '|',
            Token::Star => '*',
        }
    }

    pub fn is_operator(&self) -> bool {
        !matches!(self, Token::Literal(_))
    }

    /// Number of fragments the token consumes when compiled.
    pub fn arity(&self) -> usize {
        match self {
            Token::Literal(_) => 0,
            Token::Star => 1,
            Token::Concat | Token::Alternate => 2,
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Token::Star => 100,
            Token::Concat => 80,
            Token::Alternate => 60,
            Token::Literal(_) => 0,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// An entry in the operator stack. Open parentheses remember where they
/// were found so that an unmatched one can be reported.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Open(usize),
    Operator(Token),
}

/// An expression in postfix (reverse Polish) order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Postfix {
    tokens: Vec<Token>,
}

impl Postfix {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }
}

/// Reads text that is already in postfix order, one token per character.
impl From<&str> for Postfix {
    fn from(postfix: &str) -> Self {
        postfix.chars().map(Token::from_char).collect()
    }
}

impl From<Vec<Token>> for Postfix {
    fn from(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }
}

impl FromIterator<Token> for Postfix {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self { tokens: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Postfix {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

/// Translates an infix expression into postfix order.
///
/// Parentheses group sub-expressions and never appear in the output, every
/// other character becomes exactly one output token. Returns
/// [`CompileError::UnbalancedParen`] when a `)` has no matching `(` or when a
/// `(` is never closed.
pub fn translate(infix: &str) -> CompileResult<Postfix> {
    let mut operators: Vec<Pending> = Vec::new();
    let mut output = Vec::with_capacity(infix.len());

    for (position, c) in infix.chars().enumerate() {
        match c {
            '(' => operators.push(Pending::Open(position)),
            ')' => loop {
                match operators.pop() {
                    Some(Pending::Operator(op)) => output.push(op),
                    Some(Pending::Open(_)) => break,
                    None => {
                        return Err(CompileError::UnbalancedParen { position })
                    }
                }
            },
            c => {
                let token = Token::from_char(c);
                if !token.is_operator() {
                    output.push(token);
                    continue;
                }
                // An open parenthesis on top stops the popping, it has
                // lower precedence than any operator.
                while let Some(&Pending::Operator(top)) = operators.last() {
                    if token.precedence() >= top.precedence() {
                        break;
                    }
                    trace!("`{}` pops `{}` at position {}", token, top, position);
                    output.push(top);
                    operators.pop();
                }
                operators.push(Pending::Operator(token));
            }
        }
    }

    while let Some(pending) = operators.pop() {
        match pending {
            Pending::Operator(op) => output.push(op),
            Pending::Open(position) => {
                return Err(CompileError::UnbalancedParen { position })
            }
        }
    }

    let postfix = Postfix::from(output);
    debug!("translated `{}` into `{}`", infix, postfix);

    Ok(postfix)
}
