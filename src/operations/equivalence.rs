use std::{collections::VecDeque, fmt::Display};

use tracing::{debug, trace};

use crate::{ts::StateId, Automaton, AutomatonError, Set};

use super::check_alphabets;

/// How a witness word tells two automata apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distinction {
    /// Exactly one of the two automata accepts the witness.
    Acceptance {
        /// Whether the left automaton is the one accepting.
        left_accepts: bool,
    },
    /// Exactly one of the two automata can read the witness to its end.
    MissingTransition {
        /// Whether the left automaton is the one having the transition.
        present_in_left: bool,
    },
}

/// Outcome of a bounded equivalence check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Equivalence {
    /// No difference was found among words up to the given length. Longer words were not
    /// examined, so this is not a proof of language equivalence.
    UpTo(usize),
    /// The automata behave differently on `witness`.
    Distinguished {
        /// A shortest word on which the difference shows.
        witness: String,
        /// What the difference is.
        distinction: Distinction,
    },
}

impl Equivalence {
    /// Returns true if no difference was found within the bound.
    pub fn is_equivalent(&self) -> bool {
        matches!(self, Equivalence::UpTo(_))
    }

    /// The distinguishing word, if any.
    pub fn witness(&self) -> Option<&str> {
        match self {
            Equivalence::UpTo(_) => None,
            Equivalence::Distinguished { witness, .. } => Some(witness),
        }
    }
}

impl Display for Equivalence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Equivalence::UpTo(n) => write!(f, "equivalent up to length {n}"),
            Equivalence::Distinguished {
                witness,
                distinction: Distinction::Acceptance { left_accepts },
            } => write!(
                f,
                "not equivalent: \"{witness}\" is accepted only by the {} automaton",
                if *left_accepts { "first" } else { "second" }
            ),
            Equivalence::Distinguished {
                witness,
                distinction: Distinction::MissingTransition { present_in_left },
            } => write!(
                f,
                "not equivalent: only the {} automaton can read \"{witness}\"",
                if *present_in_left { "first" } else { "second" }
            ),
        }
    }
}

impl Automaton {
    /// Compares `self` and `other` on all words of length at most `max_length`.
    ///
    /// Both automata need the same alphabet and exactly one initial state each, otherwise
    /// an error is returned and nothing is explored. Non-deterministic operands are
    /// determinized. Pairs of states are then explored breadth first from the pair of
    /// initial states, each pair once, extending words up to `max_length`. A pair where
    /// exactly one side is final, or a symbol on which exactly one side has a transition,
    /// yields a [`Equivalence::Distinguished`] with the word leading there.
    pub fn bounded_equivalence(
        &self,
        other: &Automaton,
        max_length: usize,
    ) -> Result<Equivalence, AutomatonError> {
        check_alphabets(self, other)?;
        self.unique_initial()?;
        other.unique_initial()?;

        let left = self.determinize();
        let right = other.determinize();
        let (left_table, right_table) = (left.table(), right.table());
        let start = (left.unique_initial()?.id, right.unique_initial()?.id);
        let universe = left.alphabet().universe_set();

        let mut seen: Set<(StateId, StateId)> = Set::default();
        seen.insert(start);
        let mut queue = VecDeque::from([(start, String::new(), 0usize)]);

        while let Some(((p, q), word, length)) = queue.pop_front() {
            let left_accepts = left.is_final(p);
            if left_accepts != right.is_final(q) {
                debug!("{} and {} differ on \"{word}\"", self.name(), other.name());
                return Ok(Equivalence::Distinguished {
                    witness: word,
                    distinction: Distinction::Acceptance { left_accepts },
                });
            }
            if length >= max_length {
                continue;
            }
            for value in &universe {
                let mut extended = word.clone();
                extended.push(*value);
                match (
                    left_table.successor(p, *value),
                    right_table.successor(q, *value),
                ) {
                    (Some(p_next), Some(q_next)) => {
                        if seen.insert((p_next, q_next)) {
                            trace!("visiting ({p_next}, {q_next}) with \"{extended}\"");
                            queue.push_back(((p_next, q_next), extended, length + 1));
                        }
                    }
                    (None, None) => {}
                    (present, _) => {
                        debug!(
                            "{} and {} differ in reading \"{extended}\"",
                            self.name(),
                            other.name()
                        );
                        return Ok(Equivalence::Distinguished {
                            witness: extended,
                            distinction: Distinction::MissingTransition {
                                present_in_left: present.is_some(),
                            },
                        });
                    }
                }
            }
        }
        Ok(Equivalence::UpTo(max_length))
    }

    /// [`Automaton::bounded_equivalence`] flattened into a verdict and an explanation.
    /// Precondition failures give `false` along with the reason.
    pub fn equivalent(&self, other: &Automaton, max_length: usize) -> (bool, String) {
        match self.bounded_equivalence(other, max_length) {
            Ok(verdict) => (verdict.is_equivalent(), verdict.to_string()),
            Err(e) => (false, e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        tests::{ends_with_a, epsilon_nfa, two_way_nfa, wiki_dfa},
        ts::Role,
        Automaton, AutomatonError,
    };

    use super::{Distinction, Equivalence};

    #[test]
    fn equivalence_is_reflexive() {
        for aut in [ends_with_a(), two_way_nfa(), epsilon_nfa(), wiki_dfa()] {
            for n in 0..5 {
                assert_eq!(aut.bounded_equivalence(&aut, n), Ok(Equivalence::UpTo(n)));
            }
        }
    }

    #[test]
    fn minimized_automaton_is_equivalent() {
        let dfa = wiki_dfa();
        let (equivalent, explanation) = dfa.equivalent(&dfa.minimize(), 6);
        assert!(equivalent);
        assert_eq!(explanation, "equivalent up to length 6");
    }

    #[test]
    fn acceptance_difference_is_witnessed() {
        let ends_with_b = Automaton::builder("ends with b")
            .with_alphabet(['a', 'b'])
            .with_states([("q0", Role::INITIAL), ("q1", Role::FINAL)])
            .with_transitions([
                ("q0", 'b', "q1"),
                ("q0", 'a', "q0"),
                ("q1", 'b', "q1"),
                ("q1", 'a', "q0"),
            ])
            .build()
            .unwrap();
        let verdict = ends_with_a().bounded_equivalence(&ends_with_b, 3).unwrap();
        assert_eq!(
            verdict,
            Equivalence::Distinguished {
                witness: "a".into(),
                distinction: Distinction::Acceptance { left_accepts: true }
            }
        );
        assert_eq!(
            verdict.to_string(),
            "not equivalent: \"a\" is accepted only by the first automaton"
        );
    }

    #[test]
    fn difference_beyond_the_bound_is_not_seen() {
        // accepts every word except "aaa"
        let aut = Automaton::builder("not aaa")
            .with_alphabet(['a'])
            .with_states([
                ("0", Role::INITIAL_FINAL),
                ("1", Role::FINAL),
                ("2", Role::FINAL),
                ("3", Role::NORMAL),
                ("4", Role::FINAL),
            ])
            .with_transitions([
                ("0", 'a', "1"),
                ("1", 'a', "2"),
                ("2", 'a', "3"),
                ("3", 'a', "4"),
                ("4", 'a', "4"),
            ])
            .build()
            .unwrap();
        let all = Automaton::builder("all")
            .with_alphabet(['a'])
            .with_states([("q", Role::INITIAL_FINAL)])
            .with_transitions([("q", 'a', "q")])
            .build()
            .unwrap();
        assert!(aut.bounded_equivalence(&all, 2).unwrap().is_equivalent());
        let verdict = aut.bounded_equivalence(&all, 3).unwrap();
        assert_eq!(verdict.witness(), Some("aaa"));
    }

    #[test]
    fn missing_transition_is_witnessed() {
        let mut complete = ends_with_a();
        let partial = Automaton::builder("partial")
            .with_alphabet(['a', 'b'])
            .with_states([("q0", Role::INITIAL), ("q1", Role::FINAL)])
            .with_transitions([("q0", 'b', "q0"), ("q0", 'a', "q1"), ("q1", 'a', "q1")])
            .build()
            .unwrap();
        complete.set_name("complete");
        let verdict = complete.bounded_equivalence(&partial, 3).unwrap();
        assert_eq!(
            verdict,
            Equivalence::Distinguished {
                witness: "ab".into(),
                distinction: Distinction::MissingTransition {
                    present_in_left: true
                }
            }
        );
    }

    #[test]
    fn preconditions_are_checked() {
        let (equivalent, reason) = ends_with_a().equivalent(&wiki_dfa(), 3);
        assert!(!equivalent);
        assert_eq!(reason, "alphabets differ: {a, b} and {0, 1}");

        let two_initials = Automaton::builder("twice")
            .with_alphabet(['a', 'b'])
            .with_states([("p", Role::INITIAL), ("q", Role::INITIAL)])
            .build()
            .unwrap();
        assert_eq!(
            ends_with_a().bounded_equivalence(&two_initials, 3),
            Err(AutomatonError::AmbiguousInitialState {
                name: "twice".into(),
                count: 2
            })
        );
    }

    #[test]
    fn nondeterministic_operands_are_determinized() {
        let nfa = two_way_nfa();
        let dfa = nfa.determinize().into_owned();
        assert!(nfa.bounded_equivalence(&dfa, 5).unwrap().is_equivalent());
    }
}
