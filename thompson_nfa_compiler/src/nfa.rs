use std::collections::HashSet;
use std::fmt;

/// A state ID in the NFA
pub type StateId = usize;

/// A Thompson NFA state.
///
/// A state either consumes one character, in which case it has a label and
/// exactly one edge, or it is an epsilon state with zero, one or two edges
/// that are followed without consuming input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    /// Character consumed when following the edge. `None` means epsilon.
    label: Option<char>,
    /// Outgoing edges, at most two.
    edges: Vec<StateId>,
}

impl State {
    /// Create an epsilon state without edges
    pub fn epsilon() -> Self {
        Self { label: None, edges: Vec::with_capacity(2) }
    }

    /// Create a state that consumes `c`, its single edge is added later
    pub fn labeled(c: char) -> Self {
        Self { label: Some(c), edges: Vec::with_capacity(1) }
    }

    pub fn label(&self) -> Option<char> {
        self.label
    }

    pub fn edges(&self) -> &[StateId] {
        &self.edges
    }

    pub fn is_epsilon(&self) -> bool {
        self.label.is_none()
    }

    /// Returns the state reached after consuming `c`, if this state
    /// consumes `c` at all.
    pub fn step(&self, c: char) -> Option<StateId> {
        match self.label {
            Some(label) if label == c => self.edges.first().copied(),
            _ => None,
        }
    }
}

/// Fragment of an NFA with start and accept states. The accept state has no
/// outgoing edges until the fragment is joined with something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub start: StateId,
    pub accept: StateId,
}

/// A Thompson NFA.
///
/// States are stored in an arena and refer to each other by [`StateId`], so
/// the cycles introduced by `*` need no shared ownership.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NFA {
    states: Vec<State>,
    start: StateId,
    accept: StateId,
}

impl NFA {
    /// Create a new empty NFA
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new state and return its ID
    pub fn add_state(&mut self, state: State) -> StateId {
        let id = self.states.len();
        self.states.push(state);
        id
    }

    /// Add an epsilon state without edges
    pub fn epsilon(&mut self) -> StateId {
        self.add_state(State::epsilon())
    }

    /// Add a state consuming `c`, with an edge to `target`
    pub fn labeled(&mut self, c: char, target: StateId) -> StateId {
        let id = self.add_state(State::labeled(c));
        self.connect(id, target);
        id
    }

    /// Add an edge from `from` to `to`.
    ///
    /// Both ids must have been returned by this NFA. An unknown `from` is
    /// ignored. Epsilon states take at most two edges and labeled states
    /// one, which is only checked in debug builds.
    pub fn connect(&mut self, from: StateId, to: StateId) {
        let Some(state) = self.states.get_mut(from) else {
            return;
        };
        let max_edges = if state.is_epsilon() { 2 } else { 1 };
        debug_assert!(
            state.edges.len() < max_edges,
            "state {} already has {} edge(s)",
            from,
            state.edges.len()
        );
        state.edges.push(to);
    }

    /// Designate the start and accept states of the whole automaton
    pub fn set_fragment(&mut self, fragment: Fragment) {
        self.start = fragment.start;
        self.accept = fragment.accept;
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accept(&self) -> StateId {
        self.accept
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Adds `state` to `closure` together with every state reachable from
    /// it through epsilon edges.
    ///
    /// States already in `closure` are not expanded again, which is what
    /// makes this terminate on the loops created by `*`.
    pub fn epsilon_closure(&self, state: StateId, closure: &mut HashSet<StateId>) {
        let mut stack = vec![state];

        while let Some(state_id) = stack.pop() {
            // Ids that don't name a state never become active.
            let Some(state) = self.states.get(state_id) else {
                continue;
            };
            if !closure.insert(state_id) {
                continue;
            }
            if state.is_epsilon() {
                stack.extend(state.edges.iter().rev());
            }
        }
    }
}

impl fmt::Display for NFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "start: {}, accept: {}", self.start, self.accept)?;
        for (id, state) in self.states.iter().enumerate() {
            write!(f, "  {}: ", id)?;
            match (state.label, state.edges.as_slice()) {
                (Some(c), edges) => write!(f, "{:?} -> {:?}", c, edges)?,
                (None, []) => write!(f, "ε")?,
                (None, edges) => write!(f, "ε -> {:?}", edges)?,
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
