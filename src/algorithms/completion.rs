use itertools::Itertools;
use tracing::{debug, warn};

use crate::{ts::Role, Automaton};

/// Label of the state that [`Automaton::complete`] sends missing transitions to.
pub const SINK_LABEL: &str = "sink";

impl Automaton {
    /// Returns true if every state has at least one outgoing transition on every symbol of
    /// the alphabet (ε excluded).
    pub fn is_complete(&self) -> bool {
        let table = self.table();
        self.states().iter().all(|q| {
            self.alphabet()
                .universe()
                .all(|a| table.successors(q.id, a).is_some())
        })
    }

    /// Makes the transition function total. Every missing `(state, symbol)` pair gets a
    /// transition into a sink state, and the sink loops on every symbol it has no transition
    /// for. A state labelled [`SINK_LABEL`] is reused as the sink if present, otherwise a
    /// normal state with that label is added.
    ///
    /// Does nothing if the automaton already is complete, so completing twice changes nothing
    /// beyond the first call.
    pub fn complete(&mut self) {
        if self.is_complete() {
            debug!("{} is complete already", self.name());
            return;
        }

        let sink = match self.state_by_label(SINK_LABEL) {
            Some(q) => {
                warn!("reusing existing state {} of {} as sink", q.id, self.name());
                q.id
            }
            None => self.push_state(SINK_LABEL, Role::NORMAL),
        };

        let table = self.table();
        let symbols = self
            .alphabet()
            .iter()
            .filter(|s| !s.is_epsilon())
            .copied()
            .collect_vec();
        let missing = self
            .states()
            .iter()
            .map(|q| q.id)
            .cartesian_product(symbols.iter())
            .filter(|(q, s)| table.successors(*q, s.value).is_none())
            .collect_vec();

        // the sink loops on whatever it lacks, every other state moves into it
        for (q, s) in &missing {
            self.push_transition(*q, s.id, sink);
        }
        debug!(
            "completed {} with {} transitions into state {sink}",
            self.name(),
            missing.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use crate::{
        tests::{ends_with_a, two_way_nfa},
        ts::Role,
        Automaton,
    };

    use super::SINK_LABEL;

    fn partial() -> Automaton {
        Automaton::builder("partial")
            .with_alphabet(['a', 'b'])
            .with_states([("q0", Role::INITIAL), ("q1", Role::FINAL)])
            .with_transitions([("q0", 'a', "q1")])
            .build()
            .unwrap()
    }

    #[test]
    fn complete_automaton_is_detected() {
        assert!(ends_with_a().is_complete());
        assert!(!partial().is_complete());
        assert!(Automaton::new("empty").is_complete());
    }

    #[test]
    fn completion_adds_sink() {
        let mut aut = partial();
        let words = aut.accepted_words(4);
        aut.complete();

        assert!(aut.is_complete());
        assert!(aut.is_deterministic());
        let sink = aut.state_by_label(SINK_LABEL).unwrap().clone();
        assert_eq!(sink.role, Role::NORMAL);
        assert_eq!(sink.id, 3);
        // q0 -b->, q1 -a->, q1 -b-> and both loops on the sink
        assert_eq!(aut.transitions().len(), 6);
        let table = aut.table();
        assert_eq!(table.successor(sink.id, 'a'), Some(sink.id));
        assert_eq!(table.successor(sink.id, 'b'), Some(sink.id));
        assert_eq!(aut.accepted_words(4), words);
    }

    #[test]
    fn completion_is_idempotent() {
        let mut aut = partial();
        aut.complete();
        let once = aut.clone();
        aut.complete();
        assert_eq!(aut, once);

        let mut complete = ends_with_a();
        complete.complete();
        assert_eq!(complete, ends_with_a());
    }

    #[test]
    #[traced_test]
    fn existing_sink_is_reused() {
        let mut aut = Automaton::builder("with sink")
            .with_alphabet(['a'])
            .with_states([("q0", Role::INITIAL_FINAL), (SINK_LABEL, Role::NORMAL)])
            .with_transitions([("q0", 'a', SINK_LABEL)])
            .build()
            .unwrap();
        aut.complete();
        assert_eq!(aut.size(), 2);
        assert!(aut.is_complete());
        assert_eq!(aut.table().successor(2, 'a'), Some(2));
        assert!(logs_contain("reusing existing state 2"));
    }

    #[test]
    fn completing_an_nfa_keeps_its_language() {
        let mut nfa = two_way_nfa();
        let words = nfa.accepted_words(4);
        nfa.complete();
        assert!(nfa.is_complete());
        assert_eq!(nfa.accepted_words(4), words);
    }
}
