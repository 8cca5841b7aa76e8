use std::collections::BTreeSet;

use crate::{
    alphabet::{Alphabet, EPSILON},
    Map,
};

use super::{StateId, StateSet, Transition};

/// The transition relation indexed by `(source, symbol value)`. It is derived from an
/// automaton on demand and not kept in sync with later mutations.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    edges: Map<(StateId, char), StateSet>,
}

impl TransitionTable {
    /// Indexes the given transitions, resolving their labels through `alphabet`.
    /// Transitions whose label is not registered are skipped.
    pub fn new<'a, I>(alphabet: &Alphabet, transitions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transition>,
    {
        let mut edges: Map<(StateId, char), StateSet> = Map::default();
        for t in transitions {
            if let Some(symbol) = alphabet.get(t.symbol) {
                edges
                    .entry((t.source, symbol.value))
                    .or_default()
                    .insert(t.destination);
            }
        }
        Self { edges }
    }

    /// All destinations of `state` on `value`.
    pub fn successors(&self, state: StateId, value: char) -> Option<&StateSet> {
        self.edges.get(&(state, value))
    }

    /// The smallest destination of `state` on `value`. For a deterministic automaton
    /// this is the only one.
    pub fn successor(&self, state: StateId, value: char) -> Option<StateId> {
        self.successors(state, value)
            .and_then(|targets| targets.first().copied())
    }

    /// The values labelling at least one edge leaving `state`, ε excluded.
    pub fn symbols_from(&self, state: StateId) -> BTreeSet<char> {
        self.edges
            .keys()
            .filter(|(source, value)| *source == state && *value != EPSILON)
            .map(|(_, value)| *value)
            .collect()
    }

    /// Returns true if some edge is labelled with ε.
    pub fn has_epsilon(&self) -> bool {
        self.edges.keys().any(|(_, value)| *value == EPSILON)
    }

    /// The union of the destinations of all `states` on `value`, without following ε.
    pub fn step(&self, states: &StateSet, value: char) -> StateSet {
        states
            .iter()
            .filter_map(|q| self.successors(*q, value))
            .flatten()
            .copied()
            .collect()
    }

    /// The ε-closure of `states`: every state reachable from one of them using only
    /// ε-edges, the states themselves included.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = states.clone();
        let mut stack: Vec<StateId> = states.iter().copied().collect();

        while let Some(q) = stack.pop() {
            if let Some(targets) = self.successors(q, EPSILON) {
                for p in targets {
                    if closure.insert(*p) {
                        stack.push(*p);
                    }
                }
            }
        }
        closure
    }

    /// [`TransitionTable::step`] followed by [`TransitionTable::epsilon_closure`].
    pub fn advance(&self, states: &StateSet, value: char) -> StateSet {
        self.epsilon_closure(&self.step(states, value))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        alphabet::{Alphabet, Symbol},
        ts::{StateSet, Transition},
    };

    use super::TransitionTable;

    fn table() -> TransitionTable {
        // 1 -a-> 2, 1 -a-> 3, 2 -ε-> 4, 4 -ε-> 1
        let mut alphabet = Alphabet::from_values(['a']).unwrap();
        alphabet.insert(Symbol::epsilon(2)).unwrap();
        let transitions = [
            Transition::new(1, 1, 2, 1),
            Transition::new(2, 1, 3, 1),
            Transition::new(3, 2, 4, 2),
            Transition::new(4, 4, 1, 2),
        ];
        TransitionTable::new(&alphabet, &transitions)
    }

    #[test]
    fn epsilon_closure_reaches_fixed_point() {
        let table = table();
        assert!(table.has_epsilon());
        assert_eq!(
            table.epsilon_closure(&StateSet::from([2])),
            StateSet::from([1, 2, 4])
        );
        assert_eq!(
            table.epsilon_closure(&StateSet::from([3])),
            StateSet::from([3])
        );
    }

    #[test]
    fn step_and_advance() {
        let table = table();
        let start = StateSet::from([1]);
        assert_eq!(table.step(&start, 'a'), StateSet::from([2, 3]));
        assert_eq!(table.advance(&start, 'a'), StateSet::from([1, 2, 3, 4]));
        assert!(table.step(&StateSet::from([3]), 'a').is_empty());
        assert_eq!(table.successor(1, 'a'), Some(2));
        assert_eq!(table.symbols_from(2).len(), 0);
    }
}
