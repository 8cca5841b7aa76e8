use std::collections::VecDeque;

use tracing::trace;

use crate::{ts::StateSet, Automaton};

impl Automaton {
    /// The ids of all states reachable from an initial state by following transitions,
    /// ε-transitions included. Computed breadth first.
    pub fn reachable_states(&self) -> StateSet {
        let mut seen = self.initial_ids();
        let mut queue: VecDeque<_> = seen.iter().copied().collect();

        while let Some(q) = queue.pop_front() {
            for t in self.transitions().iter().filter(|t| t.source == q) {
                if seen.insert(t.destination) {
                    queue.push_back(t.destination);
                }
            }
        }
        seen
    }

    /// Removes all states that are not reachable from an initial state, along with the
    /// transitions leaving them.
    pub fn trim_in_place(&mut self) {
        let reachable = self.reachable_states();
        if reachable.len() == self.size() {
            return;
        }
        trace!(
            "trimming {} unreachable states from {}",
            self.size() - reachable.len(),
            self.name()
        );
        self.retain_states(|q| reachable.contains(&q));
    }

    /// Returns a copy of `self` without unreachable states. See [`Automaton::trim_in_place`].
    pub fn trim(&self) -> Self {
        let mut out = self.clone();
        out.trim_in_place();
        out
    }
}
