use std::collections::BTreeMap;

use itertools::Itertools;
use tracing::trace;

use crate::{
    ts::{StateId, StateSet},
    Automaton, Map,
};

/// A partition of a set of states into disjoint, non-empty blocks. Blocks are ordered by
/// their smallest element, so two partitions into the same blocks compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partition(Vec<StateSet>);

impl Partition {
    /// Creates a partition from the given blocks, dropping empty ones.
    pub fn new<I, B>(blocks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: IntoIterator<Item = StateId>,
    {
        let mut blocks = blocks
            .into_iter()
            .map(|b| b.into_iter().collect::<StateSet>())
            .filter(|b| !b.is_empty())
            .collect_vec();
        blocks.sort_by_key(|b| b.first().copied());
        Self(blocks)
    }

    /// The blocks, ordered by their smallest element.
    pub fn blocks(&self) -> &[StateSet] {
        &self.0
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no blocks.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Position of the block containing `q`.
    pub fn block_of(&self, q: StateId) -> Option<usize> {
        self.0.iter().position(|b| b.contains(&q))
    }

    /// Returns true if every block is a singleton.
    pub fn is_discrete(&self) -> bool {
        self.0.iter().all(|b| b.len() == 1)
    }
}

/// Computes the coarsest partition of the states of `aut` into blocks of states that cannot
/// be told apart, using Moore's algorithm.
///
/// Refinement starts from the final and the non-final states. In each round two states stay
/// together iff they were together before and, for every symbol, their successors lie in the
/// same block. A missing transition counts as a successor of its own, distinct from every
/// block. Rounds stop once the number of blocks no longer grows.
///
/// Successors are looked up with [`crate::ts::TransitionTable::successor`], which is only
/// meaningful for deterministic automata.
pub fn moore_partition_refinement(aut: &Automaton) -> Partition {
    let table = aut.table();
    let universe = aut.alphabet().universe().collect_vec();
    let (accepting, rejecting): (Vec<_>, Vec<_>) = aut
        .states()
        .iter()
        .map(|q| q.id)
        .partition(|q| aut.is_final(*q));
    let mut partition = Partition::new([accepting, rejecting]);

    let mut round = 0;
    loop {
        let block: Map<StateId, usize> = partition
            .blocks()
            .iter()
            .enumerate()
            .flat_map(|(i, b)| b.iter().map(move |q| (*q, i)))
            .collect();

        let mut split: BTreeMap<(usize, Vec<Option<usize>>), StateSet> = BTreeMap::new();
        for (q, i) in &block {
            let signature = universe
                .iter()
                .map(|a| table.successor(*q, *a).and_then(|p| block.get(&p).copied()))
                .collect_vec();
            split.entry((*i, signature)).or_default().insert(*q);
        }

        let refined = Partition::new(split.into_values());
        round += 1;
        trace!("round {round} of refinement yields {} blocks", refined.len());
        if refined.len() == partition.len() {
            return refined;
        }
        partition = refined;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        tests::{ends_with_a, wiki_dfa},
        ts::Role,
        Automaton,
    };

    use super::{moore_partition_refinement, Partition};

    #[test]
    fn partition_refinement_wiki() {
        let dfa = wiki_dfa();
        let p = moore_partition_refinement(&dfa);
        assert_eq!(p, Partition::new([vec![1, 2], vec![6], vec![3, 4, 5]]));
        assert!(!p.is_discrete());
        assert_eq!(p.block_of(4), Some(1));
    }

    #[test]
    fn minimal_dfa_has_discrete_partition() {
        let p = moore_partition_refinement(&ends_with_a());
        assert!(p.is_discrete());
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn missing_transitions_are_distinguishing() {
        // q1 and q2 are both final and loop on 'a', but q2 has no 'b' transition
        let aut = Automaton::builder("partial")
            .with_alphabet(['a', 'b'])
            .with_states([
                ("q0", Role::INITIAL),
                ("q1", Role::FINAL),
                ("q2", Role::FINAL),
            ])
            .with_transitions([
                ("q0", 'a', "q1"),
                ("q0", 'b', "q2"),
                ("q1", 'a', "q1"),
                ("q1", 'b', "q1"),
                ("q2", 'a', "q2"),
            ])
            .build()
            .unwrap();
        assert!(moore_partition_refinement(&aut).is_discrete());
    }
}
