/*!
This crate matches whole strings against a minimal regular expression dialect:
single-character literals, `.` for concatenation, `|` for alternation, `*` for
repetition and parentheses for grouping.

A pattern goes through three stages, provided by the [`thompson_nfa_compiler`]
crate:

1. [`translate`] turns the infix pattern into [`Postfix`] order using the
   shunting-yard algorithm.
2. [`compile`] builds an [`NFA`] from the postfix tokens with Thompson's
   construction.
3. [`accepts`] simulates the NFA over a string, following every possible path
   at once, and reports whether the string is accepted.

[`Regex`] wraps the three stages behind a single value that is compiled once
and can be matched many times.

# Example

```
use thompson_regex::Regex;

let re = Regex::new("a.b|b*").unwrap();
assert!(re.is_match("bbbbbbb"));
assert!(re.is_match("ab"));
assert!(!re.is_match("bbbbbbbx"));
```

The stages can also be used on their own:

```
use thompson_regex::{accepts, compile, translate};

let postfix = translate("a.b").unwrap();
assert_eq!(postfix.to_string(), "ab.");

let nfa = compile(&postfix).unwrap();
assert!(accepts(&nfa, "ab"));
assert!(!accepts(&nfa, "a"));
```

# Errors

Unbalanced parentheses are reported by [`translate`] and expressions whose
operators lack operands by [`compile`]. Both are variants of [`Error`]:

```
use thompson_regex::{Error, Regex};

assert_eq!(
    Regex::new("(a))").unwrap_err(),
    Error::UnbalancedParen { position: 3 },
);
```
*/

use std::fmt;
use std::str::FromStr;

use log::debug;
use thompson_nfa_compiler::{Compiler, Config, Matcher};

pub use thompson_nfa_compiler::{
    accepts, translate, CompileError as Error, Malformed, Postfix, State,
    StateId, Token, NFA,
};

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

/// A compiled regular expression.
///
/// Compiling is done once in [`Regex::new`], after that the same automaton
/// is reused by every call to [`Regex::is_match`].
#[derive(Clone, Debug)]
pub struct Regex {
    pattern: String,
    postfix: Postfix,
    nfa: NFA,
}

impl Regex {
    /// Compiles a regular expression with the default configuration.
    pub fn new(pattern: &str) -> Result<Regex, Error> {
        RegexBuilder::new(pattern).build()
    }

    /// Returns true if the whole of `subject` matches this expression.
    pub fn is_match(&self, subject: &str) -> bool {
        Matcher::new(&self.nfa).is_match(subject)
    }

    /// Returns the original pattern.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Returns the pattern in postfix order.
    pub fn postfix(&self) -> &Postfix {
        &self.postfix
    }

    /// Returns the compiled automaton.
    pub fn nfa(&self) -> &NFA {
        &self.nfa
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

impl FromStr for Regex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Regex, Error> {
        Regex::new(s)
    }
}

/// Configures and builds a [`Regex`].
#[derive(Clone, Debug)]
pub struct RegexBuilder {
    pattern: String,
    config: Config,
}

impl RegexBuilder {
    pub fn new(pattern: &str) -> RegexBuilder {
        RegexBuilder { pattern: pattern.to_string(), config: Config::new() }
    }

    /// Limits the number of states of the compiled automaton. Every literal
    /// and operator except `.` adds two states. When the limit is exceeded
    /// [`RegexBuilder::build`] returns [`Error::TooComplex`].
    pub fn size_limit(&mut self, limit: Option<usize>) -> &mut RegexBuilder {
        self.config = self.config.size_limit(limit);
        self
    }

    pub fn build(&self) -> Result<Regex, Error> {
        let postfix = translate(&self.pattern)?;
        let nfa = Compiler::with_config(self.config).compile(&postfix)?;

        debug!("built `{}` with {} states", self.pattern, nfa.len());

        Ok(Regex { pattern: self.pattern.clone(), postfix, nfa })
    }
}

/// Compiles postfix tokens into an automaton with the default configuration.
pub fn compile(postfix: &Postfix) -> Result<NFA, Error> {
    Compiler::new().compile(postfix)
}

/// Returns true if `pattern` matches the whole of `subject`.
///
/// This compiles the pattern on every call; build a [`Regex`] when the same
/// pattern is used more than once.
pub fn is_match(pattern: &str, subject: &str) -> Result<bool, Error> {
    Ok(Regex::new(pattern)?.is_match(subject))
}
