use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::{
    ts::{Role, State, StateId, Transition, TransitionId},
    Automaton, AutomatonError, Map,
};

use super::check_alphabets;

/// A state of a product automaton. `None` stands for the dead state of an operand that had
/// no transition to follow.
type Pair = (Option<StateId>, Option<StateId>);

impl Automaton {
    /// An automaton accepting exactly the words accepted by `self` or by `other`.
    ///
    /// Unlike [`Automaton::union_words`] this is exact: both operands are determinized and
    /// run in lockstep. Fails if the alphabets differ.
    pub fn product_union(&self, other: &Automaton) -> Result<Automaton, AutomatonError> {
        product(self, other, "union", |l, r| l || r)
    }

    /// An automaton accepting exactly the words accepted by both `self` and `other`.
    pub fn product_intersection(&self, other: &Automaton) -> Result<Automaton, AutomatonError> {
        product(self, other, "intersection", |l, r| l && r)
    }

    /// A deterministic, complete automaton accepting exactly the words over the alphabet
    /// that `self` rejects.
    pub fn complement(&self) -> Automaton {
        let mut dfa = self.determinize().into_owned();
        dfa.complete();
        dfa.map_roles(|role| Role::new(role.is_initial, !role.is_final));
        dfa.set_name(format!("{}_complement", self.name()));
        debug!("complemented {} into {} states", self.name(), dfa.size());
        dfa
    }

    /// A shortest word accepted by exactly one of `self` and `other`, or `None` if their
    /// languages coincide. Fails if the alphabets differ.
    pub fn distinguishing_word(&self, other: &Automaton) -> Result<Option<String>, AutomatonError> {
        Ok(product(self, other, "difference", |l, r| l != r)?.shortest_accepted())
    }

    /// Decides whether `self` and `other` accept the same language, over words of any length.
    pub fn language_equivalent(&self, other: &Automaton) -> Result<bool, AutomatonError> {
        Ok(self.distinguishing_word(other)?.is_none())
    }
}

/// Runs the determinized operands in lockstep, exploring reachable pairs breadth first. A
/// pair is final iff `accept` holds for the finality of its components. Pairs in which both
/// components are dead are never created, so the result may be partial.
fn product<F>(
    left: &Automaton,
    right: &Automaton,
    operation: &str,
    accept: F,
) -> Result<Automaton, AutomatonError>
where
    F: Fn(bool, bool) -> bool,
{
    check_alphabets(left, right)?;
    let (left, right) = (left.determinize(), right.determinize());
    let (left_table, right_table) = (left.table(), right.table());
    let alphabet = left.alphabet().without_epsilon();

    let is_final = |(p, q): Pair| {
        accept(
            p.map_or(false, |p| left.is_final(p)),
            q.map_or(false, |q| right.is_final(q)),
        )
    };
    let label = |(p, q): Pair| {
        let show = |aut: &Automaton, id: Option<StateId>| {
            id.and_then(|id| aut.state(id))
                .map_or_else(|| "∅".to_string(), |q| q.label.clone())
        };
        format!("({},{})", show(&*left, p), show(&*right, q))
    };

    let start: Pair = (
        Some(left.unique_initial()?.id),
        Some(right.unique_initial()?.id),
    );
    let mut ids: Map<Pair, StateId> = Map::default();
    let mut states = vec![State::new(1, label(start), Role::new(true, is_final(start)))];
    let mut transitions: Vec<Transition> = vec![];
    ids.insert(start, 1);
    let mut queue = VecDeque::from([(start, 1)]);

    while let Some(((p, q), source)) = queue.pop_front() {
        for symbol in alphabet.iter() {
            let next: Pair = (
                p.and_then(|p| left_table.successor(p, symbol.value)),
                q.and_then(|q| right_table.successor(q, symbol.value)),
            );
            if next == (None, None) {
                continue;
            }
            let destination = match ids.get(&next) {
                Some(id) => *id,
                None => {
                    let id = states.len() as StateId + 1;
                    trace!("discovered {} as state {id}", label(next));
                    states.push(State::new(id, label(next), Role::new(false, is_final(next))));
                    ids.insert(next, id);
                    queue.push_back((next, id));
                    id
                }
            };
            let id = transitions.len() as TransitionId + 1;
            transitions.push(Transition::new(id, source, destination, symbol.id));
        }
    }

    debug!(
        "{operation} of {} and {} has {} states",
        left.name(),
        right.name(),
        states.len()
    );
    Ok(Automaton::from_parts(
        format!("{}_{operation}_{}", left.name(), right.name()),
        alphabet,
        states,
        transitions,
    ))
}
