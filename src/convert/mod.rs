//! Ways of presenting an automaton: a transition table for terminals, the DOT format of
//! graphviz and a serializable record.

mod dot;
pub use dot::ToDot;

mod fmt;

mod record;
pub use record::{AutomatonRecord, StateRecord, SymbolRecord, TransitionRecord};
