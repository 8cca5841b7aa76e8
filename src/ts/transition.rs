use crate::alphabet::SymbolId;

use super::StateId;

/// Identifier of a [`Transition`], unique within its automaton.
pub type TransitionId = u32;

/// A labelled edge. Source, destination and label are referenced by id and live in the
/// same automaton as the transition itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Transition {
    /// Identifier, unique within the owning automaton.
    pub id: TransitionId,
    /// Id of the state the edge leaves.
    pub source: StateId,
    /// Id of the state the edge enters.
    pub destination: StateId,
    /// Id of the symbol the edge is labelled with, possibly ε.
    pub symbol: SymbolId,
}

impl Transition {
    /// Creates a new transition.
    pub fn new(
        id: TransitionId,
        source: StateId,
        destination: StateId,
        symbol: SymbolId,
    ) -> Self {
        Self {
            id,
            source,
            destination,
            symbol,
        }
    }
}
