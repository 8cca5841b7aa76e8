use std::fmt::{Display, Formatter};

use itertools::Itertools;
use owo_colors::OwoColorize;
use tabled::{builder::Builder, settings::Style};

use crate::{alphabet::Symbol, ts::State, Automaton};

impl Automaton {
    fn display_state(&self, state: &State) -> String {
        let mut label = state.label.clone();
        if state.is_initial() {
            label = format!("→{label}");
        }
        if state.is_final() {
            label.push('*');
        }
        label
    }
}

/// Prints the transition relation as a table with one row per state and one column per
/// symbol, ε last. Initial states are marked with `→`, final ones with `*`, and a missing
/// transition shows as `⊥`.
impl Display for Automaton {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut builder = Builder::default();
        let symbols = self
            .alphabet()
            .iter()
            .sorted_by_key(|s| (s.is_epsilon(), s.value))
            .collect_vec();
        let table = self.table();

        builder.set_header(
            vec!["δ".bright_yellow().to_string()]
                .into_iter()
                .chain(symbols.iter().map(|s: &&Symbol| s.purple().to_string())),
        );
        for state in self.states().iter().sorted_by_key(|q| q.id) {
            let mut row = vec![self.display_state(state)];
            for sym in &symbols {
                match table.successors(state.id, sym.value) {
                    Some(targets) => row.push(
                        targets
                            .iter()
                            .filter_map(|q| self.state(*q))
                            .map(|q| q.label.as_str())
                            .join(","),
                    ),
                    None => row.push("⊥".dimmed().to_string()),
                }
            }
            builder.push_record(row);
        }
        let mut transition_table = builder.build();
        transition_table.with(Style::modern());
        write!(f, "{}", transition_table)
    }
}
