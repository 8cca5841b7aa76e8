use thiserror::Error;

use crate::{alphabet::SymbolId, ts::StateId, ts::TransitionId};

/// Errors raised by mutations of an [`crate::Automaton`] and by operations whose
/// preconditions are not met.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    /// A symbol with the same value is already part of the alphabet.
    #[error("symbol '{0}' already exists")]
    DuplicateSymbol(char),
    /// A symbol with the same id is already part of the alphabet.
    #[error("symbol with id {0} already exists")]
    DuplicateSymbolId(SymbolId),
    /// A state with the same id is already part of the automaton.
    #[error("state with id {0} already exists")]
    DuplicateState(StateId),
    /// A transition with the same id is already part of the automaton.
    #[error("transition with id {0} already exists")]
    DuplicateTransition(TransitionId),
    /// A transition refers to a state that does not exist.
    #[error("no state with id {0}")]
    UnknownState(StateId),
    /// A transition refers to a symbol that does not exist.
    #[error("no symbol with id {0}")]
    UnknownSymbol(SymbolId),
    /// A symbol value was used that is not part of the alphabet.
    #[error("symbol '{0}' is not part of the alphabet")]
    UnknownSymbolValue(char),
    /// A symbol was given as text that is not exactly one character.
    #[error("symbol \"{0}\" must be a single character")]
    InvalidSymbol(String),
    /// A state label was used that no state carries.
    #[error("no state labelled '{0}'")]
    UnknownStateLabel(String),
    /// Two automata were combined whose alphabets differ.
    #[error("alphabets differ: {{{left}}} and {{{right}}}")]
    AlphabetMismatch {
        /// Symbols of the left operand.
        left: String,
        /// Symbols of the right operand.
        right: String,
    },
    /// The automaton has no states at all.
    #[error("automaton '{0}' has no states")]
    NoStates(String),
    /// The automaton has no initial state.
    #[error("automaton '{0}' has no initial state")]
    NoInitialState(String),
    /// The automaton has more than one initial state where exactly one is required.
    #[error("automaton '{name}' has {count} initial states, expected exactly one")]
    AmbiguousInitialState {
        /// Name of the offending automaton.
        name: String,
        /// Number of initial states found.
        count: usize,
    },
    /// The automaton has no final state.
    #[error("automaton '{0}' has no final state")]
    NoFinalState(String),
}
