use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    ts::{Role, State, StateId, Transition, TransitionId},
    Automaton,
};

use super::partition_refinement::moore_partition_refinement;

impl Automaton {
    /// Decides whether `self` is a minimal deterministic automaton, checking in order that
    /// it is deterministic, that every state is reachable from the initial state, and that
    /// Moore's refinement separates all states.
    ///
    /// This is a check only, see [`Automaton::minimize`] for constructing a minimal automaton.
    pub fn is_minimal(&self) -> bool {
        if !self.is_deterministic() {
            trace!("{} is not deterministic", self.name());
            return false;
        }
        let reachable = self.reachable_states();
        if reachable.len() != self.size() {
            trace!(
                "{} has {} unreachable states",
                self.name(),
                self.size() - reachable.len()
            );
            return false;
        }
        let partition = moore_partition_refinement(self);
        if !partition.is_discrete() {
            trace!(
                "{} has {} states but only {} classes",
                self.name(),
                self.size(),
                partition.len()
            );
            return false;
        }
        true
    }

    /// Builds a minimal deterministic automaton accepting the same words as `self`: the input
    /// is determinized and trimmed, then every block of its Moore partition is merged into one
    /// state. States are numbered from 1 in the order of their smallest member, merged states
    /// are labelled with the labels of their members.
    pub fn minimize(&self) -> Automaton {
        let dfa = self.determinize().trim();
        let partition = moore_partition_refinement(&dfa);
        let table = dfa.table();

        let block_id = |q: StateId| partition.block_of(q).map(|i| i as StateId + 1);

        let states = partition
            .blocks()
            .iter()
            .enumerate()
            .map(|(i, block)| {
                let members = block.iter().filter_map(|q| dfa.state(*q)).collect_vec();
                let label = match members.as_slice() {
                    [single] => single.label.clone(),
                    _ => format!("{{{}}}", members.iter().map(|q| &q.label).join(",")),
                };
                let role = Role::new(
                    members.iter().any(|q| q.is_initial()),
                    members.iter().any(|q| q.is_final()),
                );
                State::new(i as StateId + 1, label, role)
            })
            .collect_vec();

        let mut transitions = vec![];
        for (i, block) in partition.blocks().iter().enumerate() {
            let Some(representative) = block.first() else {
                continue;
            };
            for symbol in dfa.alphabet().iter() {
                if let Some(target) = table
                    .successor(*representative, symbol.value)
                    .and_then(block_id)
                {
                    let id = transitions.len() as TransitionId + 1;
                    transitions.push(Transition::new(
                        id,
                        i as StateId + 1,
                        target,
                        symbol.id,
                    ));
                }
            }
        }

        debug!(
            "minimized {} from {} to {} states",
            self.name(),
            self.size(),
            states.len()
        );
        Automaton::from_parts(
            format!("{}_min", self.name()),
            dfa.alphabet().clone(),
            states,
            transitions,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        tests::{ends_with_a, epsilon_nfa, two_way_nfa, wiki_dfa},
        ts::Role,
        Automaton,
    };

    #[test]
    fn dfa_minimization() {
        let dfa = wiki_dfa();
        assert_eq!(dfa.size(), 6);
        assert!(!dfa.is_minimal());

        let min = dfa.minimize();
        assert_eq!(min.size(), 3);
        assert!(min.is_minimal());
        assert_eq!(min.accepted_words(5), dfa.accepted_words(5));
        assert_eq!(min.state(1).map(|q| q.label.as_str()), Some("{a,b}"));
        assert_eq!(min.unique_initial().map(|q| q.id), Ok(1));
    }

    #[test]
    fn minimal_automaton_is_recognized() {
        assert!(ends_with_a().is_minimal());
        assert_eq!(ends_with_a().minimize().size(), 2);
    }

    #[test]
    fn nondeterministic_or_unreachable_is_not_minimal() {
        assert!(!two_way_nfa().is_minimal());

        let two_initials = Automaton::builder("two initials")
            .with_alphabet(['a'])
            .with_states([("p", Role::INITIAL), ("q", Role::INITIAL_FINAL)])
            .with_transitions([("p", 'a', "q"), ("q", 'a', "p")])
            .build()
            .unwrap();
        assert!(!two_initials.is_minimal());

        let unreachable = Automaton::builder("unreachable")
            .with_alphabet(['a'])
            .with_states([("p", Role::INITIAL), ("q", Role::FINAL), ("r", Role::FINAL)])
            .with_transitions([("p", 'a', "q"), ("q", 'a', "p"), ("r", 'a', "p")])
            .build()
            .unwrap();
        assert!(!unreachable.is_minimal());
        assert!(unreachable.minimize().is_minimal());
    }

    #[test]
    fn equivalent_states_are_not_minimal() {
        // q1 and q2 both accept exactly the words in a*
        let aut = Automaton::builder("redundant")
            .with_alphabet(['a'])
            .with_states([
                ("q0", Role::INITIAL),
                ("q1", Role::FINAL),
                ("q2", Role::FINAL),
            ])
            .with_transitions([("q0", 'a', "q1"), ("q1", 'a', "q2"), ("q2", 'a', "q1")])
            .build()
            .unwrap();
        assert!(!aut.is_minimal());
        let min = aut.minimize();
        assert_eq!(min.size(), 2);
        assert!(min.is_minimal());
    }

    #[test]
    fn minimizing_nfas_preserves_language() {
        for nfa in [two_way_nfa(), epsilon_nfa()] {
            let min = nfa.minimize();
            assert!(min.is_minimal());
            assert_eq!(min.accepted_words(5), nfa.accepted_words(5));
        }
    }
}
