//! Operations reading one or two automata: bounded word sampling, bounded equivalence,
//! set operations on sampled languages and exact product constructions.

use crate::{Automaton, AutomatonError};

mod algebra;

mod equivalence;
pub use equivalence::{Distinction, Equivalence};

mod product;

mod sample;
pub use sample::all_words;

/// Fails with [`AutomatonError::AlphabetMismatch`] unless both automata range over the same
/// symbol values, ε disregarded.
pub(crate) fn check_alphabets(left: &Automaton, right: &Automaton) -> Result<(), AutomatonError> {
    if left.alphabet().same_universe(right.alphabet()) {
        Ok(())
    } else {
        Err(AutomatonError::AlphabetMismatch {
            left: left.alphabet().show(),
            right: right.alphabet().show(),
        })
    }
}
