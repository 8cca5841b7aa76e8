//! Structural transformations and checks: subset construction, completion, trimming and
//! minimality.

mod completion;
pub use completion::SINK_LABEL;

mod minimization;

mod partition_refinement;
pub use partition_refinement::{moore_partition_refinement, Partition};

mod subset;
pub use subset::subset_construction;

mod trimming;
