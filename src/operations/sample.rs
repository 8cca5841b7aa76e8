use std::collections::{BTreeSet, VecDeque};

use itertools::Itertools;
use tracing::debug;

use crate::{ts::StateSet, Automaton, Set};

impl Automaton {
    /// All accepted words of length at most `max_length`.
    ///
    /// Words are explored breadth first, each carrying the ε-closed set of states it leads to,
    /// starting from the empty word and the closure of the initial states. A word is recorded
    /// when its set contains a final state, and is only extended while it is shorter than
    /// `max_length` and its set is non-empty. The result therefore holds exactly the words
    /// `w` with `|w| <= max_length` for which [`Automaton::accepts`] holds.
    pub fn accepted_words(&self, max_length: usize) -> BTreeSet<String> {
        let table = self.table();
        let universe = self.alphabet().universe().collect_vec();
        let start = table.epsilon_closure(&self.initial_ids());
        let mut words = BTreeSet::new();
        if start.is_empty() {
            return words;
        }

        let mut queue: VecDeque<(String, usize, StateSet)> =
            VecDeque::from([(String::new(), 0, start)]);
        while let Some((word, length, states)) = queue.pop_front() {
            if states.iter().any(|q| self.is_final(*q)) {
                words.insert(word.clone());
            }
            if length >= max_length {
                continue;
            }
            for value in &universe {
                let next = table.advance(&states, *value);
                if !next.is_empty() {
                    let mut extended = word.clone();
                    extended.push(*value);
                    queue.push_back((extended, length + 1, next));
                }
            }
        }
        debug!(
            "{} accepts {} words of length at most {max_length}",
            self.name(),
            words.len()
        );
        words
    }

    /// All words over the alphabet of length at most `max_length` that are not accepted,
    /// including words that cannot be read to the end at all. Together with
    /// [`Automaton::accepted_words`] this covers every word up to that length.
    pub fn rejected_words(&self, max_length: usize) -> BTreeSet<String> {
        let table = self.table();
        let universe = self.alphabet().universe().collect_vec();
        let start = table.epsilon_closure(&self.initial_ids());
        let mut words = BTreeSet::new();

        let mut queue: VecDeque<(String, usize, StateSet)> =
            VecDeque::from([(String::new(), 0, start)]);
        while let Some((word, length, states)) = queue.pop_front() {
            if !states.iter().any(|q| self.is_final(*q)) {
                words.insert(word.clone());
            }
            if length >= max_length {
                continue;
            }
            for value in &universe {
                let mut extended = word.clone();
                extended.push(*value);
                queue.push_back((extended, length + 1, table.advance(&states, *value)));
            }
        }
        debug!(
            "{} rejects {} words of length at most {max_length}",
            self.name(),
            words.len()
        );
        words
    }

    /// A shortest accepted word, the smallest in alphabet order among those, or `None` if
    /// the automaton accepts nothing. Terminates on every automaton as each reachable set
    /// of states is expanded only once.
    pub fn shortest_accepted(&self) -> Option<String> {
        let table = self.table();
        let universe = self.alphabet().universe().sorted().collect_vec();
        let start = table.epsilon_closure(&self.initial_ids());
        if start.is_empty() {
            return None;
        }

        let mut seen: Set<StateSet> = Set::default();
        seen.insert(start.clone());
        let mut queue = VecDeque::from([(String::new(), start)]);
        while let Some((word, states)) = queue.pop_front() {
            if states.iter().any(|q| self.is_final(*q)) {
                return Some(word);
            }
            for value in &universe {
                let next = table.advance(&states, *value);
                if !next.is_empty() && seen.insert(next.clone()) {
                    let mut extended = word.clone();
                    extended.push(*value);
                    queue.push_back((extended, next));
                }
            }
        }
        None
    }
}

/// Every word over `universe` of length at most `max_length`, shortest first and in the
/// order of `universe` within each length.
pub fn all_words(universe: &[char], max_length: usize) -> Vec<String> {
    let mut words = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_length {
        frontier = frontier
            .iter()
            .cartesian_product(universe)
            .map(|(word, value)| {
                let mut extended = word.clone();
                extended.push(*value);
                extended
            })
            .collect();
        words.extend(frontier.iter().cloned());
    }
    words
}
