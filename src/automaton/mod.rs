use tracing::{debug, trace};

use crate::{
    alphabet::{is_epsilon, Alphabet, Symbol, SymbolId},
    ts::{Role, State, StateId, StateSet, Transition, TransitionId, TransitionTable},
    fresh_id, AutomatonError, Set,
};

mod builder;
pub use builder::AutomatonBuilder;

/// A named finite automaton over a finite alphabet. It owns its symbols, states and
/// transitions; transitions refer to the other two by id.
///
/// The automaton is built through the `add_*` operations, which maintain its invariants:
/// symbol values and ids are pairwise distinct, state ids are pairwise distinct,
/// transition ids are pairwise distinct, and a transition only ever refers to states and
/// symbols of the same automaton.
///
/// Whether the automaton is deterministic is a property of its contents, not of its type.
/// It may have any number of initial states and may use ε-transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    name: String,
    alphabet: Alphabet,
    states: Vec<State>,
    transitions: Vec<Transition>,
}

impl Automaton {
    /// Creates an empty automaton with the given name.
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            alphabet: Alphabet::new(),
            states: vec![],
            transitions: vec![],
        }
    }

    /// Assembles an automaton from parts that are known to satisfy the invariants, as is the
    /// case for the output of the algorithms in this crate.
    pub(crate) fn from_parts(
        name: String,
        alphabet: Alphabet,
        states: Vec<State>,
        transitions: Vec<Transition>,
    ) -> Self {
        debug_assert!(transitions.iter().all(|t| {
            alphabet.get(t.symbol).is_some()
                && states.iter().any(|q| q.id == t.source)
                && states.iter().any(|q| q.id == t.destination)
        }));
        Self {
            name,
            alphabet,
            states,
            transitions,
        }
    }

    /// Returns a builder for an automaton with the given name.
    pub fn builder<N: Into<String>>(name: N) -> AutomatonBuilder {
        AutomatonBuilder::new(name)
    }

    /// The name of the automaton.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the automaton.
    pub fn set_name<N: Into<String>>(&mut self, name: N) {
        self.name = name.into();
    }

    /// The symbol registry.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// All states in insertion order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// All transitions in insertion order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Adds a symbol, failing if its value or id is taken.
    pub fn add_symbol(&mut self, symbol: Symbol) -> Result<(), AutomatonError> {
        self.alphabet.insert(symbol)
    }

    /// Adds a state, failing if its id is taken.
    pub fn add_state(&mut self, state: State) -> Result<(), AutomatonError> {
        if self.state(state.id).is_some() {
            return Err(AutomatonError::DuplicateState(state.id));
        }
        self.states.push(state);
        Ok(())
    }

    /// Adds a transition, failing if its id is taken or if it refers to a state or
    /// symbol that is not part of this automaton.
    pub fn add_transition(&mut self, transition: Transition) -> Result<(), AutomatonError> {
        if self.transitions.iter().any(|t| t.id == transition.id) {
            return Err(AutomatonError::DuplicateTransition(transition.id));
        }
        for q in [transition.source, transition.destination] {
            if self.state(q).is_none() {
                return Err(AutomatonError::UnknownState(q));
            }
        }
        if self.symbol(transition.symbol).is_none() {
            return Err(AutomatonError::UnknownSymbol(transition.symbol));
        }
        self.transitions.push(transition);
        Ok(())
    }

    /// Registers `value` under a fresh id and returns that id.
    pub fn new_symbol(&mut self, value: char) -> Result<SymbolId, AutomatonError> {
        let id = self.alphabet.next_id();
        self.add_symbol(Symbol::new(id, value))?;
        Ok(id)
    }

    /// Adds a state with a fresh id and returns that id.
    pub fn new_state<L: Into<String>>(
        &mut self,
        label: L,
        role: Role,
    ) -> Result<StateId, AutomatonError> {
        let id = self.next_state_id();
        self.add_state(State::new(id, label, role))?;
        Ok(id)
    }

    /// Adds a transition with a fresh id from `source` to `destination`, labelled with the
    /// registered symbol whose value is `value`, and returns the new id.
    pub fn new_transition(
        &mut self,
        source: StateId,
        value: char,
        destination: StateId,
    ) -> Result<TransitionId, AutomatonError> {
        let symbol = self
            .alphabet
            .by_value(value)
            .ok_or(AutomatonError::UnknownSymbolValue(value))?
            .id;
        let id = self.next_transition_id();
        self.add_transition(Transition::new(id, source, destination, symbol))?;
        Ok(id)
    }

    /// Changes the role of an existing state.
    pub fn set_role(&mut self, id: StateId, role: Role) -> Result<(), AutomatonError> {
        let state = self
            .states
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(AutomatonError::UnknownState(id))?;
        state.role = role;
        Ok(())
    }

    /// Adds a state under a fresh id. Cannot fail, as the id is unused.
    pub(crate) fn push_state<L: Into<String>>(&mut self, label: L, role: Role) -> StateId {
        let id = self.next_state_id();
        self.states.push(State::new(id, label, role));
        id
    }

    /// Adds a transition under a fresh id between existing states, labelled with an existing
    /// symbol.
    pub(crate) fn push_transition(
        &mut self,
        source: StateId,
        symbol: SymbolId,
        destination: StateId,
    ) -> TransitionId {
        debug_assert!(self.state(source).is_some() && self.state(destination).is_some());
        debug_assert!(self.symbol(symbol).is_some());
        let id = self.next_transition_id();
        self.transitions
            .push(Transition::new(id, source, destination, symbol));
        id
    }

    /// Replaces the role of every state by `f` applied to it.
    pub(crate) fn map_roles<F: Fn(Role) -> Role>(&mut self, f: F) {
        for q in &mut self.states {
            q.role = f(q.role);
        }
    }

    /// Keeps the states for whose id `keep` returns true and drops every transition touching
    /// one of the others.
    pub(crate) fn retain_states<F: Fn(StateId) -> bool>(&mut self, keep: F) {
        self.states.retain(|q| keep(q.id));
        self.transitions
            .retain(|t| keep(t.source) && keep(t.destination));
    }

    /// Looks up a state by id.
    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.iter().find(|q| q.id == id)
    }

    /// Looks up the first state carrying `label`.
    pub fn state_by_label(&self, label: &str) -> Option<&State> {
        self.states.iter().find(|q| q.label == label)
    }

    /// Looks up a symbol by id.
    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.alphabet.get(id)
    }

    /// Looks up a symbol by value.
    pub fn symbol_by_value(&self, value: char) -> Option<&Symbol> {
        self.alphabet.by_value(value)
    }

    /// The label value of a transition.
    pub fn label_of(&self, transition: &Transition) -> Option<char> {
        self.symbol(transition.symbol).map(|s| s.value)
    }

    /// Iterates over the initial states.
    pub fn initial_states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states.iter().filter(|q| q.is_initial())
    }

    /// Iterates over the final states.
    pub fn final_states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states.iter().filter(|q| q.is_final())
    }

    /// The ids of all initial states.
    pub fn initial_ids(&self) -> StateSet {
        self.initial_states().map(|q| q.id).collect()
    }

    /// The ids of all final states.
    pub fn final_ids(&self) -> StateSet {
        self.final_states().map(|q| q.id).collect()
    }

    /// Returns true if the state with the given id exists and is final.
    pub fn is_final(&self, id: StateId) -> bool {
        self.state(id).map_or(false, State::is_final)
    }

    /// The one and only initial state, or an error if there is none or more than one.
    pub fn unique_initial(&self) -> Result<&State, AutomatonError> {
        let mut initials = self.initial_states();
        match (initials.next(), initials.count()) {
            (None, _) => Err(AutomatonError::NoInitialState(self.name.clone())),
            (Some(q), 0) => Ok(q),
            (Some(_), rest) => Err(AutomatonError::AmbiguousInitialState {
                name: self.name.clone(),
                count: rest + 1,
            }),
        }
    }

    /// One more than the largest state id in use, 1 for an automaton without states. If the
    /// largest id is `StateId::MAX`, the smallest unused id is taken.
    pub fn next_state_id(&self) -> StateId {
        fresh_id(self.states.iter().map(|q| q.id))
    }

    /// One more than the largest transition id in use, 1 if there are no transitions. Falls
    /// back to the smallest unused id like [`Automaton::next_state_id`].
    pub fn next_transition_id(&self) -> TransitionId {
        fresh_id(self.transitions.iter().map(|t| t.id))
    }

    /// One more than the largest symbol id in use, 1 for an empty alphabet.
    pub fn next_symbol_id(&self) -> SymbolId {
        self.alphabet.next_id()
    }

    /// Indexes the transition relation by source and symbol value.
    pub fn table(&self) -> TransitionTable {
        TransitionTable::new(&self.alphabet, &self.transitions)
    }

    /// Returns true if the automaton has exactly one initial state, no ε-transitions and
    /// no two transitions leaving the same state on the same symbol.
    pub fn is_deterministic(&self) -> bool {
        if self.initial_states().count() != 1 {
            trace!("{} does not have exactly one initial state", self.name);
            return false;
        }
        let mut seen: Set<(StateId, char)> = Set::default();
        for t in &self.transitions {
            let Some(value) = self.label_of(t) else {
                continue;
            };
            if is_epsilon(value) {
                trace!("{} has an ε-transition from {}", self.name, t.source);
                return false;
            }
            if !seen.insert((t.source, value)) {
                trace!("{} branches on '{}' from {}", self.name, value, t.source);
                return false;
            }
        }
        true
    }

    /// Decides whether `word` is accepted, i.e. whether some run from an initial state that
    /// reads `word` ends in a final state. ε-transitions are followed before the first and
    /// after every symbol. The empty word is accepted iff a final state is ε-reachable from
    /// an initial state. A word containing [`crate::alphabet::EPSILON`] itself is never
    /// accepted, as ε is not a letter.
    pub fn accepts(&self, word: &str) -> bool {
        if word.chars().any(is_epsilon) {
            return false;
        }
        let table = self.table();
        let mut current = table.epsilon_closure(&self.initial_ids());
        for value in word.chars() {
            if current.is_empty() {
                break;
            }
            current = table.advance(&current, value);
        }
        current.iter().any(|q| self.is_final(*q))
    }

    /// Like [`Automaton::accepts`], but first checks that there is something to run:
    /// the automaton must have states, an initial state and a final state.
    pub fn recognize(&self, word: &str) -> Result<bool, AutomatonError> {
        if self.states.is_empty() {
            return Err(AutomatonError::NoStates(self.name.clone()));
        }
        if self.initial_states().next().is_none() {
            return Err(AutomatonError::NoInitialState(self.name.clone()));
        }
        if self.final_states().next().is_none() {
            return Err(AutomatonError::NoFinalState(self.name.clone()));
        }
        let accepted = self.accepts(word);
        debug!(
            "{} {} \"{}\"",
            self.name,
            if accepted { "accepts" } else { "rejects" },
            word
        );
        Ok(accepted)
    }
}
