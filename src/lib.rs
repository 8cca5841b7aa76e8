//! Library for analyzing and transforming finite automata over finite alphabets.
//!
//! An [`Automaton`] is built up through its `add_*` operations or an [`AutomatonBuilder`]
//! and may be nondeterministic, use ε-transitions and have several initial states. On top
//! of it the crate offers structural checks (determinism, completeness, minimality), the
//! subset construction, completion, minimization, bounded sampling of the accepted
//! language, bounded and exact equivalence checks as well as products. Automata can be
//! printed as a table, exported to DOT and kept in a [`store::Store`] as JSON.
#![warn(missing_docs)]

/// The symbols an automaton reads.
pub mod alphabet;

pub mod ts;

mod automaton;
pub use automaton::{Automaton, AutomatonBuilder};

mod error;
pub use error::AutomatonError;

pub mod algorithms;

pub mod operations;

pub mod convert;

pub mod store;

#[cfg(feature = "ahash")]
pub(crate) type Map<K, V> = ahash::HashMap<K, V>;
#[cfg(not(feature = "ahash"))]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V>;

#[cfg(feature = "ahash")]
pub(crate) type Set<T> = ahash::HashSet<T>;
#[cfg(not(feature = "ahash"))]
pub(crate) type Set<T> = std::collections::HashSet<T>;

/// One more than the largest of `used`, or 1 if there is none. Should that overflow, the
/// smallest unused positive id is returned instead.
pub(crate) fn fresh_id<I: IntoIterator<Item = u32>>(used: I) -> u32 {
    let used: std::collections::BTreeSet<u32> = used.into_iter().collect();
    match used.last() {
        None => 1,
        Some(max) => max
            .checked_add(1)
            .or_else(|| (1..u32::MAX).find(|id| !used.contains(id)))
            .unwrap_or(0),
    }
}

/// The most commonly used items, for glob imports.
pub mod prelude {
    pub use crate::{
        alphabet::{Alphabet, Symbol, SymbolId, EPSILON},
        convert::ToDot,
        operations::{Distinction, Equivalence},
        ts::{Role, State, StateId, StateSet, Transition, TransitionId},
        Automaton, AutomatonBuilder, AutomatonError,
    };
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::{alphabet::EPSILON, ts::Role, Automaton};

    /// Words over `{a, b}` that end in `a`.
    pub fn ends_with_a() -> Automaton {
        Automaton::builder("ends with a")
            .with_alphabet(['a', 'b'])
            .with_states([("q0", Role::INITIAL), ("q1", Role::FINAL)])
            .with_transitions([
                ("q0", 'a', "q1"),
                ("q0", 'b', "q0"),
                ("q1", 'a', "q1"),
                ("q1", 'b', "q0"),
            ])
            .build()
            .unwrap()
    }

    /// Words over `{a, b}` that end in `ab`, guessing where the suffix starts.
    pub fn two_way_nfa() -> Automaton {
        Automaton::builder("two way")
            .with_alphabet(['a', 'b'])
            .with_states([("q0", Role::INITIAL), ("q1", Role::NORMAL), ("q2", Role::FINAL)])
            .with_transitions([
                ("q0", 'a', "q0"),
                ("q0", 'b', "q0"),
                ("q0", 'a', "q1"),
                ("q1", 'b', "q2"),
            ])
            .build()
            .unwrap()
    }

    /// Words over `{a, b}` of the form `(a* b)+`, written with ε-moves.
    pub fn epsilon_nfa() -> Automaton {
        Automaton::builder("epsilon")
            .with_alphabet(['a', 'b', EPSILON])
            .with_states([("p", Role::INITIAL), ("q", Role::NORMAL), ("r", Role::FINAL)])
            .with_transitions([
                ("p", EPSILON, "q"),
                ("q", 'a', "q"),
                ("q", 'b', "r"),
                ("r", EPSILON, "p"),
            ])
            .build()
            .unwrap()
    }

    /// The DFA from the wikipedia article on DFA minimization, which has three classes
    /// `{a, b}`, `{c, d, e}` and `{f}`.
    pub fn wiki_dfa() -> Automaton {
        Automaton::builder("wiki")
            .with_alphabet(['0', '1'])
            .with_states([
                ("a", Role::INITIAL),
                ("b", Role::NORMAL),
                ("c", Role::FINAL),
                ("d", Role::FINAL),
                ("e", Role::FINAL),
                ("f", Role::NORMAL),
            ])
            .with_transitions([
                ("a", '0', "b"),
                ("a", '1', "c"),
                ("b", '0', "a"),
                ("b", '1', "d"),
                ("c", '0', "e"),
                ("c", '1', "f"),
                ("d", '0', "e"),
                ("d", '1', "f"),
                ("e", '0', "e"),
                ("e", '1', "f"),
                ("f", '0', "f"),
                ("f", '1', "f"),
            ])
            .build()
            .unwrap()
    }
}
