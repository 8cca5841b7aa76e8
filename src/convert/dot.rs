use itertools::Itertools;

use crate::{ts::StateId, Automaton, Map};

/// Conversion into the [graphviz](https://graphviz.org/) DOT language.
pub trait ToDot {
    /// The complete DOT document, see the
    /// [graphviz documentation](https://graphviz.org/doc/info/lang.html).
    fn dot_representation(&self) -> String {
        format!("digraph A {{\n{}\n{}\n}}\n", self.header(), self.body(""))
    }

    /// Graph level attributes.
    fn header(&self) -> String;

    /// Nodes and edges, with node names prefixed by `prefix`.
    fn body(&self, prefix: &str) -> String;
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

impl ToDot for Automaton {
    fn header(&self) -> String {
        [
            format!("label=\"{}\"", escape(self.name())),
            "fontname=\"Helvetica,Arial,sans-serif\"\nrankdir=LR".to_string(),
            "node [shape=circle]".into(),
        ]
        .join("\n")
    }

    fn body(&self, prefix: &str) -> String {
        let mut lines = vec![];
        for state in self.states() {
            let shape = if state.is_final() {
                "doublecircle"
            } else {
                "circle"
            };
            lines.push(format!(
                "\"{prefix}{}\" [label=\"{}\", shape={shape}]",
                state.id,
                escape(&state.label)
            ));
            if state.is_initial() {
                lines.push(format!(
                    "\"{prefix}init{}\" [label=\"\", shape=none]",
                    state.id
                ));
                lines.push(format!(
                    "\"{prefix}init{}\" -> \"{prefix}{}\" [style=\"solid\"]",
                    state.id, state.id
                ));
            }
        }

        // parallel transitions share one edge
        let mut edges: Map<(StateId, StateId), Vec<char>> = Map::default();
        for t in self.transitions() {
            if let Some(value) = self.label_of(t) {
                edges.entry((t.source, t.destination)).or_default().push(value);
            }
        }
        for ((source, destination), values) in edges.into_iter().sorted() {
            lines.push(format!(
                "\"{prefix}{source}\" -> \"{prefix}{destination}\" [label = \"{}\"]",
                values.into_iter().sorted().map(|c| escape(&c.to_string())).join(", ")
            ));
        }
        lines.join("\n")
    }
}
