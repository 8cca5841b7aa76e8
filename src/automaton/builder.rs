use crate::{
    ts::{Role, StateId},
    Automaton, AutomatonError,
};

/// Helper for assembling an [`Automaton`] from plain values. States are referred to by label
/// and receive the ids `1, 2, ...` in the order they are given; symbols likewise.
///
/// # Example
///
/// The automaton over `{a, b}` accepting the words that end in `a`:
/// ```
/// use automaflow::prelude::*;
///
/// let aut = Automaton::builder("ends with a")
///     .with_alphabet(['a', 'b'])
///     .with_states([("q0", Role::INITIAL), ("q1", Role::FINAL)])
///     .with_transitions([("q0", 'a', "q1"), ("q0", 'b', "q0"), ("q1", 'a', "q1"), ("q1", 'b', "q0")])
///     .build()
///     .unwrap();
/// assert!(aut.accepts("ba"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AutomatonBuilder {
    name: String,
    alphabet: Vec<char>,
    states: Vec<(String, Role)>,
    transitions: Vec<(String, char, String)>,
}

impl AutomatonBuilder {
    /// Creates a builder for an automaton with the given name.
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Adds symbols to the alphabet.
    pub fn with_alphabet<I: IntoIterator<Item = char>>(mut self, values: I) -> Self {
        self.alphabet.extend(values);
        self
    }

    /// Adds states given as `(label, role)` pairs.
    pub fn with_states<L, I>(mut self, states: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, Role)>,
    {
        self.states
            .extend(states.into_iter().map(|(label, role)| (label.into(), role)));
        self
    }

    /// Adds transitions given as `(source label, symbol, destination label)`. Symbols that
    /// were not given to [`AutomatonBuilder::with_alphabet`] are registered on the fly.
    pub fn with_transitions<L, M, I>(mut self, transitions: I) -> Self
    where
        L: Into<String>,
        M: Into<String>,
        I: IntoIterator<Item = (L, char, M)>,
    {
        self.transitions.extend(
            transitions
                .into_iter()
                .map(|(p, a, q)| (p.into(), a, q.into())),
        );
        self
    }

    /// Assembles the automaton through its `add_*` operations, so the same invariants apply.
    pub fn build(self) -> Result<Automaton, AutomatonError> {
        let mut aut = Automaton::new(self.name);
        for value in self.alphabet {
            aut.new_symbol(value)?;
        }
        for (label, role) in self.states {
            aut.new_state(label, role)?;
        }
        for (p, a, q) in self.transitions {
            let source = lookup(&aut, &p)?;
            let destination = lookup(&aut, &q)?;
            if aut.symbol_by_value(a).is_none() {
                aut.new_symbol(a)?;
            }
            aut.new_transition(source, a, destination)?;
        }
        Ok(aut)
    }
}

fn lookup(aut: &Automaton, label: &str) -> Result<StateId, AutomatonError> {
    aut.state_by_label(label)
        .map(|q| q.id)
        .ok_or_else(|| AutomatonError::UnknownStateLabel(label.to_string()))
}

#[cfg(test)]
mod tests {
    use crate::{ts::Role, Automaton, AutomatonError};

    #[test]
    fn builder_assigns_ids_in_order() {
        let aut = Automaton::builder("ids")
            .with_alphabet(['x'])
            .with_states([("a", Role::INITIAL), ("b", Role::FINAL)])
            .with_transitions([("a", 'x', "b"), ("b", 'y', "a")])
            .build()
            .unwrap();
        assert_eq!(aut.state_by_label("b").map(|q| q.id), Some(2));
        assert_eq!(aut.symbol_by_value('y').map(|s| s.id), Some(2));
        assert_eq!(aut.transitions().len(), 2);
    }

    #[test]
    fn builder_reports_unknown_labels() {
        let result = Automaton::builder("broken")
            .with_states([("a", Role::INITIAL)])
            .with_transitions([("a", 'x', "nowhere")])
            .build();
        assert_eq!(
            result,
            Err(AutomatonError::UnknownStateLabel("nowhere".into()))
        );
    }
}
