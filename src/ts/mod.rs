//! States, transitions and the indexed transition relation built from them.

mod state;
pub use state::{Role, State, StateId, StateSet};

mod transition;
pub use transition::{Transition, TransitionId};

mod table;
pub use table::TransitionTable;
