//! Thompson NFA Compiler
//!
//! This library turns a small infix regular expression dialect into a
//! Thompson NFA and decides whether the NFA accepts a whole input string.
//! The dialect has single-character literals plus four operators:
//!
//! - `.` concatenation (explicit, `a.b` matches `ab`)
//! - `|` alternation
//! - `*` Kleene star
//! - `(` `)` grouping
//!
//! The pipeline has three stages, each living in its own module:
//!
//! ```text
//! infix ──shunting::translate──> Postfix ──Compiler::compile──> NFA ──Matcher::is_match──> bool
//! ```
//!
//! ```
//! use thompson_nfa_compiler::{translate, Compiler, Matcher};
//!
//! let postfix = translate("(a|b).c*").unwrap();
//! assert_eq!(postfix.to_string(), "ab|c*.");
//!
//! let nfa = Compiler::new().compile(&postfix).unwrap();
//! assert!(Matcher::new(&nfa).is_match("bccc"));
//! assert!(!Matcher::new(&nfa).is_match("abc"));
//! ```

use thiserror::Error;

pub mod compiler;
pub mod matcher;
pub mod nfa;
pub mod shunting;

pub use compiler::{Compiler, Config};
pub use matcher::{accepts, Matcher};
pub use nfa::{Fragment, State, StateId, NFA};
pub use shunting::{translate, Postfix, Token};

/// The result of translating or compiling an expression.
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors that can occur while translating or compiling an expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A `(` without its `)`, or a `)` without its `(`. The position is the
    /// index of the offending character in the infix expression.
    #[error("unbalanced parenthesis at position {position}")]
    UnbalancedParen { position: usize },

    /// The postfix sequence doesn't reduce to exactly one NFA fragment.
    #[error("malformed expression: {0}")]
    MalformedExpression(Malformed),

    /// The NFA would need more states than the configured limit.
    #[error("expression is too complex (more than {limit} states)")]
    TooComplex { limit: usize },
}

/// The ways in which a postfix sequence can be malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Malformed {
    /// An operator found fewer fragments on the stack than it consumes.
    #[error("operator `{operator}` at position {position} is missing an operand")]
    MissingOperand { operator: char, position: usize },

    /// After consuming every token the stack didn't hold exactly one
    /// fragment.
    #[error("expected a single fragment after compilation, found {fragments}")]
    Dangling { fragments: usize },
}

impl From<Malformed> for CompileError {
    fn from(value: Malformed) -> Self {
        CompileError::MalformedExpression(value)
    }
}
