//! Risk models.
//!
//! Models are implemented as small, pure functions of a factor set so that the
//! engine, the vascular-age search and the bounds computation can share them.

pub mod euro_score;
pub mod framingham;
pub mod hard_events;
pub mod pooled_cohort;
pub mod scores;

pub use euro_score::*;
pub use framingham::*;
pub use hard_events::*;
pub use pooled_cohort::*;
pub use scores::*;
