use std::collections::BTreeSet;

use tracing::debug;

use crate::{Automaton, AutomatonError};

use super::check_alphabets;

impl Automaton {
    /// The words of length at most `max_length` accepted by `self` or by `other`.
    ///
    /// This combines two samples, it does not build an automaton; the result says nothing
    /// about longer words. See [`Automaton::product_union`] for the exact construction.
    /// Fails if the alphabets differ.
    pub fn union_words(
        &self,
        other: &Automaton,
        max_length: usize,
    ) -> Result<BTreeSet<String>, AutomatonError> {
        check_alphabets(self, other)?;
        let mut words = self.accepted_words(max_length);
        words.extend(other.accepted_words(max_length));
        debug!(
            "{} words up to length {max_length} in the union of {} and {}",
            words.len(),
            self.name(),
            other.name()
        );
        Ok(words)
    }

    /// The words of length at most `max_length` accepted by both `self` and `other`.
    ///
    /// Like [`Automaton::union_words`] this is bounded by `max_length`, see
    /// [`Automaton::product_intersection`] for the exact construction. Fails if the
    /// alphabets differ.
    pub fn intersection_words(
        &self,
        other: &Automaton,
        max_length: usize,
    ) -> Result<BTreeSet<String>, AutomatonError> {
        check_alphabets(self, other)?;
        let right = other.accepted_words(max_length);
        let words: BTreeSet<String> = self
            .accepted_words(max_length)
            .into_iter()
            .filter(|w| right.contains(w))
            .collect();
        debug!(
            "{} words up to length {max_length} in the intersection of {} and {}",
            words.len(),
            self.name(),
            other.name()
        );
        Ok(words)
    }
}
