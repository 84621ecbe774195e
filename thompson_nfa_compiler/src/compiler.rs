use log::{debug, trace};

use crate::nfa::{Fragment, NFA};
use crate::shunting::{Postfix, Token};
use crate::{CompileError, CompileResult, Malformed};

/// Options for the compiler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    size_limit: Option<usize>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of states the NFA may have. Compilation fails
    /// with [`CompileError::TooComplex`] when the limit is exceeded. There's
    /// no limit by default.
    pub fn size_limit(mut self, limit: Option<usize>) -> Self {
        self.size_limit = limit;
        self
    }

    pub fn get_size_limit(&self) -> Option<usize> {
        self.size_limit
    }
}

/// Compiler that converts a postfix expression to a Thompson NFA.
///
/// Each token produces one fragment. Literals push a new fragment, operators
/// pop their operands from the fragment stack, wire them together and push
/// the result. A well-formed expression leaves exactly one fragment behind,
/// which becomes the NFA.
pub struct Compiler {
    config: Config,
    nfa: NFA,
    fragments: Vec<Fragment>,
}

impl Compiler {
    /// Create a new compiler
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self { config, nfa: NFA::new(), fragments: Vec::new() }
    }

    /// Compile a postfix expression into an NFA.
    pub fn compile(mut self, postfix: &Postfix) -> CompileResult<NFA> {
        for (position, token) in postfix.iter().enumerate() {
            let fragment = self.compile_token(*token, position)?;
            trace!(
                "`{}` at {} -> {:?}, {} fragment(s) on stack",
                token,
                position,
                fragment,
                self.fragments.len() + 1
            );
            self.fragments.push(fragment);
            self.check_size()?;
        }

        let fragment = match self.fragments.as_slice() {
            [fragment] => *fragment,
            fragments => {
                return Err(Malformed::Dangling { fragments: fragments.len() }.into())
            }
        };

        self.nfa.set_fragment(fragment);

        debug!(
            "compiled `{}` into {} states (start: {}, accept: {})",
            postfix,
            self.nfa.len(),
            fragment.start,
            fragment.accept
        );

        Ok(self.nfa)
    }

    fn compile_token(
        &mut self,
        token: Token,
        position: usize,
    ) -> CompileResult<Fragment> {
        let operands = self.pop_operands(token, position)?;
        let fragment = match (token, operands.as_slice()) {
            (Token::Literal(c), []) => self.compile_literal(c),
            (Token::Concat, &[first, second]) => self.compile_concat(first, second),
            (Token::Alternate, &[first, second]) => {
                self.compile_alternation(first, second)
            }
            (Token::Star, &[inner]) => self.compile_star(inner),
            _ => unreachable!("`{}` got {} operand(s)", token, operands.len()),
        };
        Ok(fragment)
    }

    /// Pops the [`Token::arity`] topmost fragments, in the order they were
    /// pushed. The most recently pushed fragment is the rightmost operand.
    fn pop_operands(
        &mut self,
        operator: Token,
        position: usize,
    ) -> CompileResult<Vec<Fragment>> {
        let arity = operator.arity();
        if self.fragments.len() < arity {
            return Err(Malformed::MissingOperand {
                operator: operator.as_char(),
                position,
            }
            .into());
        }
        Ok(self.fragments.split_off(self.fragments.len() - arity))
    }

    fn check_size(&self) -> CompileResult<()> {
        match self.config.get_size_limit() {
            Some(limit) if self.nfa.len() > limit => {
                Err(CompileError::TooComplex { limit })
            }
            _ => Ok(()),
        }
    }

    /// `start --c--> accept`
    fn compile_literal(&mut self, c: char) -> Fragment {
        let accept = self.nfa.epsilon();
        let start = self.nfa.labeled(c, accept);
        Fragment { start, accept }
    }

    fn compile_concat(&mut self, first: Fragment, second: Fragment) -> Fragment {
        self.nfa.connect(first.accept, second.start);
        Fragment { start: first.start, accept: second.accept }
    }

    fn compile_alternation(&mut self, first: Fragment, second: Fragment) -> Fragment {
        let accept = self.nfa.epsilon();
        let start = self.nfa.epsilon();

        self.nfa.connect(start, first.start);
        self.nfa.connect(start, second.start);
        self.nfa.connect(first.accept, accept);
        self.nfa.connect(second.accept, accept);

        Fragment { start, accept }
    }

    fn compile_star(&mut self, inner: Fragment) -> Fragment {
        let accept = self.nfa.epsilon();
        let start = self.nfa.epsilon();

        self.nfa.connect(start, inner.start);
        self.nfa.connect(start, accept);
        // Loop back for another repetition, or leave.
        self.nfa.connect(inner.accept, inner.start);
        self.nfa.connect(inner.accept, accept);

        Fragment { start, accept }
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shunting::translate;
    use pretty_assertions::assert_eq;

    fn compile(postfix: &str) -> CompileResult<NFA> {
        Compiler::new().compile(&Postfix::from(postfix))
    }

    #[test]
    fn test_literal() {
        let nfa = compile("a").unwrap();

        assert_eq!(nfa.len(), 2);
        assert_eq!(nfa.start(), 1);
        assert_eq!(nfa.accept(), 0);
        assert_eq!(nfa.state(1).unwrap().label(), Some('a'));
        assert_eq!(nfa.state(1).unwrap().edges(), &[0]);
        assert!(nfa.state(0).unwrap().edges().is_empty());
    }

    #[test]
    fn test_concat_keeps_operand_order() {
        let nfa = compile("ab.").unwrap();

        // a: 1 -> 0, b: 3 -> 2, joined by 0 -> 3
        assert_eq!(nfa.start(), 1);
        assert_eq!(nfa.accept(), 2);
        assert_eq!(nfa.state(1).unwrap().label(), Some('a'));
        assert_eq!(nfa.state(0).unwrap().edges(), &[3]);
        assert_eq!(nfa.state(3).unwrap().label(), Some('b'));
    }

    #[test]
    fn test_alternation() {
        let nfa = compile("ab|").unwrap();

        assert_eq!(nfa.len(), 6);
        assert_eq!(nfa.accept(), 4);
        assert_eq!(nfa.start(), 5);
        assert_eq!(nfa.state(5).unwrap().edges(), &[1, 3]);
        assert_eq!(nfa.state(0).unwrap().edges(), &[4]);
        assert_eq!(nfa.state(2).unwrap().edges(), &[4]);
    }

    #[test]
    fn test_star() {
        let nfa = compile("a*").unwrap();

        assert_eq!(nfa.len(), 4);
        assert_eq!(nfa.start(), 3);
        assert_eq!(nfa.accept(), 2);
        assert_eq!(nfa.state(3).unwrap().edges(), &[1, 2]);
        assert_eq!(nfa.state(0).unwrap().edges(), &[1, 2]);
    }

    #[test]
    fn test_edge_limits() {
        let postfix = translate("((a|b).c*|d*)*.e").unwrap();
        let nfa = Compiler::new().compile(&postfix).unwrap();

        for state in nfa.states() {
            if state.is_epsilon() {
                assert!(state.edges().len() <= 2);
            } else {
                assert_eq!(state.edges().len(), 1);
            }
        }
        assert!(nfa.state(nfa.accept()).unwrap().edges().is_empty());
    }

    #[test]
    fn test_missing_operand() {
        assert_eq!(
            compile("*").unwrap_err(),
            CompileError::MalformedExpression(Malformed::MissingOperand {
                operator: '*',
                position: 0
            })
        );
        assert_eq!(
            compile("a.").unwrap_err(),
            CompileError::MalformedExpression(Malformed::MissingOperand {
                operator: '.',
                position: 1
            })
        );
        assert_eq!(
            compile("ab||").unwrap_err(),
            CompileError::MalformedExpression(Malformed::MissingOperand {
                operator: '|',
                position: 3
            })
        );
    }

    #[test]
    fn test_operands_follow_arity() {
        let mut compiler = Compiler::new();
        let a = compiler.compile_token(Token::Literal('a'), 0).unwrap();
        compiler.fragments.push(a);

        // A binary operator with one operand fails without touching the stack.
        assert!(compiler.compile_token(Token::Alternate, 1).is_err());
        assert_eq!(compiler.fragments, vec![a]);
        assert_eq!(compiler.nfa.len(), 2);

        let star = compiler.compile_token(Token::Star, 1).unwrap();
        assert!(compiler.fragments.is_empty());
        assert_eq!(compiler.nfa.state(star.start).unwrap().edges(), &[a.start, star.accept]);
    }

    #[test]
    fn test_dangling_fragments() {
        assert_eq!(
            compile("").unwrap_err(),
            CompileError::MalformedExpression(Malformed::Dangling { fragments: 0 })
        );
        assert_eq!(
            compile("ab").unwrap_err(),
            CompileError::MalformedExpression(Malformed::Dangling { fragments: 2 })
        );
        // Parentheses are ordinary literals in raw postfix text.
        assert_eq!(
            compile("(a)").unwrap_err(),
            CompileError::MalformedExpression(Malformed::Dangling { fragments: 3 })
        );
    }

    #[test]
    fn test_size_limit() {
        let postfix = Postfix::from("ab.");

        let config = Config::new().size_limit(Some(3));
        assert_eq!(
            Compiler::with_config(config).compile(&postfix).unwrap_err(),
            CompileError::TooComplex { limit: 3 }
        );

        let config = Config::new().size_limit(Some(4));
        assert_eq!(config.get_size_limit(), Some(4));
        assert_eq!(Compiler::with_config(config).compile(&postfix).unwrap().len(), 4);
    }
}
