use serde::{Deserialize, Serialize};

use crate::{
    alphabet::{Symbol, SymbolId},
    ts::{Role, State, StateId, Transition, TransitionId},
    Automaton, AutomatonError,
};

/// A symbol as it is written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    /// Identifier, as in the automaton.
    pub id: SymbolId,
    /// The symbol as a one character string.
    pub value: String,
}

/// A state as it is written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    /// Identifier, as in the automaton.
    pub id: StateId,
    /// Display label.
    pub label: String,
    /// The role in textual form, see [`Role::parse`].
    #[serde(rename = "type")]
    pub kind: String,
}

/// A transition as it is written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRecord {
    /// Identifier, as in the automaton.
    pub id: TransitionId,
    /// Id of the source state.
    pub source_state_id: StateId,
    /// Id of the destination state.
    pub destination_state_id: StateId,
    /// Id of the labelling symbol.
    pub symbol_id: SymbolId,
}

/// The persisted form of an [`Automaton`]. Converting back replays the `add_*` operations,
/// so a record that violates an invariant is rejected rather than loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonRecord {
    /// Name of the automaton.
    pub name: String,
    /// The symbols, in insertion order.
    pub alphabets: Vec<SymbolRecord>,
    /// The states, in insertion order.
    pub states: Vec<StateRecord>,
    /// The transitions, in insertion order.
    pub transitions: Vec<TransitionRecord>,
}

impl From<&Automaton> for AutomatonRecord {
    fn from(aut: &Automaton) -> Self {
        Self {
            name: aut.name().to_string(),
            alphabets: aut
                .alphabet()
                .iter()
                .map(|s| SymbolRecord {
                    id: s.id,
                    value: s.value.to_string(),
                })
                .collect(),
            states: aut
                .states()
                .iter()
                .map(|q| StateRecord {
                    id: q.id,
                    label: q.label.clone(),
                    kind: q.role.to_string(),
                })
                .collect(),
            transitions: aut
                .transitions()
                .iter()
                .map(|t| TransitionRecord {
                    id: t.id,
                    source_state_id: t.source,
                    destination_state_id: t.destination,
                    symbol_id: t.symbol,
                })
                .collect(),
        }
    }
}

impl TryFrom<AutomatonRecord> for Automaton {
    type Error = AutomatonError;

    fn try_from(record: AutomatonRecord) -> Result<Self, Self::Error> {
        let mut aut = Automaton::new(record.name);
        for symbol in record.alphabets {
            let mut chars = symbol.value.chars();
            let value = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return Err(AutomatonError::InvalidSymbol(symbol.value)),
            };
            aut.add_symbol(Symbol::new(symbol.id, value))?;
        }
        for state in record.states {
            aut.add_state(State::new(state.id, state.label, Role::parse(&state.kind)))?;
        }
        for t in record.transitions {
            aut.add_transition(Transition::new(
                t.id,
                t.source_state_id,
                t.destination_state_id,
                t.symbol_id,
            ))?;
        }
        Ok(aut)
    }
}

impl Automaton {
    /// Serializes the automaton to pretty printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&AutomatonRecord::from(self))
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use pretty_assertions::assert_eq;

    use crate::{
        algorithms::SINK_LABEL,
        tests::{epsilon_nfa, wiki_dfa},
        Automaton, AutomatonError,
    };

    use super::AutomatonRecord;

    #[test]
    fn json_layout() {
        let json = r#"{
            "name": "tiny",
            "alphabets": [{"id": 4, "value": "a"}],
            "states": [
                {"id": 7, "label": "start", "type": "Initial, Final"},
                {"id": 9, "label": "other", "type": "normal"}
            ],
            "transitions": [
                {"id": 2, "sourceStateId": 7, "destinationStateId": 9, "symbolId": 4}
            ]
        }"#;
        let record: AutomatonRecord = serde_json::from_str(json).unwrap();
        let aut = Automaton::try_from(record).unwrap();
        assert_eq!(aut.name(), "tiny");
        assert!(aut.state(7).unwrap().is_initial());
        assert!(aut.state(7).unwrap().is_final());
        assert!(aut.accepts(""));
        assert!(!aut.accepts("a"));
        assert_eq!(aut.next_state_id(), 10);

        let written = serde_json::to_value(AutomatonRecord::from(&aut)).unwrap();
        assert_eq!(written["states"][0]["type"], "initial final");
        assert_eq!(written["transitions"][0]["sourceStateId"], 7);
    }

    #[test]
    fn records_preserve_automata() {
        for aut in [wiki_dfa(), epsilon_nfa()] {
            let json = aut.to_json().unwrap();
            let record: AutomatonRecord = serde_json::from_str(&json).unwrap();
            assert_eq!(Automaton::try_from(record).unwrap(), aut);
        }
    }

    #[test]
    fn duplicates_in_records_fail_like_duplicate_adds() {
        let record = AutomatonRecord::from(&wiki_dfa());

        let mut same_value = record.clone();
        same_value.alphabets[1].value = "0".into();
        assert_eq!(
            Automaton::try_from(same_value),
            Err(AutomatonError::DuplicateSymbol('0'))
        );

        let mut same_symbol_id = record.clone();
        same_symbol_id.alphabets[1].id = same_symbol_id.alphabets[0].id;
        assert_eq!(
            Automaton::try_from(same_symbol_id),
            Err(AutomatonError::DuplicateSymbolId(1))
        );

        let mut same_state_id = record;
        same_state_id.states[2].id = 1;
        assert_eq!(
            Automaton::try_from(same_state_id),
            Err(AutomatonError::DuplicateState(1))
        );
    }

    #[test]
    fn largest_ids_leave_room_for_new_ones() {
        let json = r#"{
            "name": "max",
            "alphabets": [{"id": 1, "value": "a"}, {"id": 2, "value": "b"}],
            "states": [{"id": 4294967295, "label": "q", "type": "initial final"}],
            "transitions": [
                {"id": 4294967295, "sourceStateId": 4294967295,
                 "destinationStateId": 4294967295, "symbolId": 1}
            ]
        }"#;
        let record: AutomatonRecord = serde_json::from_str(json).unwrap();
        let mut aut = Automaton::try_from(record).unwrap();
        let words = aut.accepted_words(3);

        aut.complete();
        assert!(aut.is_complete());
        assert_eq!(aut.state_by_label(SINK_LABEL).map(|q| q.id), Some(1));
        assert_eq!(
            aut.transitions().iter().map(|t| t.id).sorted().collect_vec(),
            vec![1, 2, 3, u32::MAX]
        );
        assert_eq!(aut.accepted_words(3), words);
        assert_eq!(aut.next_state_id(), 2);
    }

    #[test]
    fn invalid_records_are_rejected() {
        let mut record = AutomatonRecord::from(&wiki_dfa());
        record.alphabets[0].value = "01".into();
        assert_eq!(
            Automaton::try_from(record.clone()),
            Err(AutomatonError::InvalidSymbol("01".into()))
        );

        record.alphabets[0].value = "0".into();
        record.transitions[0].destination_state_id = 42;
        assert_eq!(
            Automaton::try_from(record),
            Err(AutomatonError::UnknownState(42))
        );
    }
}
