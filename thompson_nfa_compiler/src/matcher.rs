use std::collections::HashSet;

use log::trace;

use crate::nfa::{StateId, NFA};

/// A matcher that simulates a Thompson NFA against input.
///
/// The simulation keeps the set of active states. Every character moves
/// each active state labeled with that character to the epsilon closure of
/// its target, and states that don't consume the character die. The input
/// matches when the accept state is active once all of it is consumed.
pub struct Matcher<'a> {
    nfa: &'a NFA,
}

impl<'a> Matcher<'a> {
    /// Create a new matcher for the given NFA
    pub fn new(nfa: &'a NFA) -> Self {
        Self { nfa }
    }

    /// Check if the entire input matches
    pub fn is_match(&self, input: &str) -> bool {
        let mut current = HashSet::new();
        self.nfa.epsilon_closure(self.nfa.start(), &mut current);

        for (position, c) in input.chars().enumerate() {
            current = self.step(&current, c);
            trace!("{:?} at {}: {} active state(s)", c, position, current.len());
            if current.is_empty() {
                return false;
            }
        }

        current.contains(&self.nfa.accept())
    }

    fn step(&self, current: &HashSet<StateId>, c: char) -> HashSet<StateId> {
        let mut next = HashSet::new();

        for target in current
            .iter()
            .filter_map(|&id| self.nfa.state(id))
            .filter_map(|state| state.step(c))
        {
            self.nfa.epsilon_closure(target, &mut next);
        }

        next
    }
}

/// Returns `true` if `nfa` accepts the whole of `input`.
pub fn accepts(nfa: &NFA, input: &str) -> bool {
    Matcher::new(nfa).is_match(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::Compiler;
    use crate::nfa::Fragment;
    use crate::shunting::translate;

    fn build(infix: &str) -> NFA {
        Compiler::new().compile(&translate(infix).unwrap()).unwrap()
    }

    #[test]
    fn test_simple_char_match() {
        let mut nfa = NFA::new();

        // Create NFA that matches "a"
        let accept = nfa.epsilon();
        let start = nfa.labeled('a', accept);
        nfa.set_fragment(Fragment { start, accept });

        let matcher = Matcher::new(&nfa);

        assert!(matcher.is_match("a"));
        assert!(!matcher.is_match("b"));
        assert!(!matcher.is_match(""));
        assert!(!matcher.is_match("aa"));
    }

    #[test]
    fn test_empty_nfa_matches_nothing() {
        let nfa = NFA::new();

        assert!(!accepts(&nfa, ""));
        assert!(!accepts(&nfa, "a"));
    }

    #[test]
    fn test_concat() {
        let nfa = build("a.b");

        assert!(accepts(&nfa, "ab"));
        assert!(!accepts(&nfa, "a"));
        assert!(!accepts(&nfa, "ba"));
        assert!(!accepts(&nfa, "abb"));
    }

    #[test]
    fn test_alternation_and_star() {
        let nfa = build("a.b|b*");

        assert!(accepts(&nfa, "bbbbbbb"));
        assert!(accepts(&nfa, "ab"));
        assert!(accepts(&nfa, ""));
        assert!(!accepts(&nfa, "bbbbbbbx"));
        assert!(!accepts(&nfa, "abb"));
    }

    #[test]
    fn test_grouping() {
        let nfa = build("(a|b).c*");

        assert!(accepts(&nfa, "a"));
        assert!(accepts(&nfa, "bc"));
        assert!(accepts(&nfa, "acccc"));
        assert!(!accepts(&nfa, "c"));
        assert!(!accepts(&nfa, "abc"));
    }

    #[test]
    fn test_nested_stars() {
        let nfa = build("(a*)*");

        assert!(accepts(&nfa, ""));
        assert!(accepts(&nfa, "aaaa"));
        assert!(!accepts(&nfa, "ab"));

        let nfa = build("(a*|b*)*.c");
        assert!(accepts(&nfa, "abbac"));
        assert!(!accepts(&nfa, "abba"));
    }

    #[test]
    fn test_non_ascii() {
        let nfa = build("é.(ß|ü)*");

        assert!(accepts(&nfa, "éßüß"));
        assert!(!accepts(&nfa, "e"));
    }
}
