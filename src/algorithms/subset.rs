use std::{borrow::Cow, collections::VecDeque};

use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    ts::{Role, State, StateId, StateSet, Transition, TransitionId},
    Automaton, Map,
};

impl Automaton {
    /// Returns a deterministic automaton accepting the same words. If `self` already is
    /// deterministic it is returned as is, otherwise [`subset_construction`] is applied.
    pub fn determinize(&self) -> Cow<'_, Automaton> {
        if self.is_deterministic() {
            Cow::Borrowed(self)
        } else {
            Cow::Owned(subset_construction(self))
        }
    }
}

/// Converts `aut` into a deterministic automaton using the subset construction.
///
/// Each state of the result stands for the ε-closed set of states of `aut` that can be
/// occupied after reading some word. The initial state is the ε-closure of all initial
/// states and is the only initial state; a state is final iff its set contains a final
/// state. Sets are discovered breadth first, and states and transitions are numbered from 1
/// in discovery order. A set with no successor on a symbol gets no transition on it, so the
/// result may be partial.
///
/// The alphabet of the result is that of `aut` without ε. If `aut` has no initial state,
/// the result consists of a single initial, non-final state standing for the empty set.
pub fn subset_construction(aut: &Automaton) -> Automaton {
    let table = aut.table();
    let alphabet = aut.alphabet().without_epsilon();

    let mut ids: Map<StateSet, StateId> = Map::default();
    let mut states: Vec<State> = vec![];
    let mut transitions: Vec<Transition> = vec![];
    let mut queue: VecDeque<(StateSet, StateId)> = VecDeque::new();

    let initial = table.epsilon_closure(&aut.initial_ids());
    states.push(composite_state(aut, 1, &initial, true));
    ids.insert(initial.clone(), 1);
    queue.push_back((initial, 1));

    while let Some((set, source)) = queue.pop_front() {
        for symbol in alphabet.iter() {
            let next = table.advance(&set, symbol.value);
            if next.is_empty() {
                continue;
            }
            let destination = match ids.get(&next) {
                Some(id) => *id,
                None => {
                    let id = states.len() as StateId + 1;
                    states.push(composite_state(aut, id, &next, false));
                    ids.insert(next.clone(), id);
                    queue.push_back((next, id));
                    id
                }
            };
            let id = transitions.len() as TransitionId + 1;
            transitions.push(Transition::new(id, source, destination, symbol.id));
        }
    }

    debug!(
        "subset construction turned {} states of {} into {}",
        aut.size(),
        aut.name(),
        states.len()
    );
    Automaton::from_parts(
        format!("{}_dfa", aut.name()),
        alphabet,
        states,
        transitions,
    )
}

fn composite_state(aut: &Automaton, id: StateId, set: &StateSet, is_initial: bool) -> State {
    let label = show_subset(aut, set);
    trace!("discovered {label} as state {id}");
    let is_final = set.iter().any(|q| aut.is_final(*q));
    State::new(id, label, Role::new(is_initial, is_final))
}

fn show_subset(aut: &Automaton, set: &StateSet) -> String {
    if set.is_empty() {
        return "∅".to_string();
    }
    format!(
        "{{{}}}",
        set.iter()
            .map(|q| aut.state(*q).map_or_else(|| q.to_string(), |s| s.label.clone()))
            .join(",")
    )
}
