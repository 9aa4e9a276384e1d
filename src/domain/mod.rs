//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - input enums and factor sets (`Gender`, `Race`, `RisksFactors`)
//! - scoring outputs (`RisksFactorsScores`, `HardAndFatalEventsRisks`,
//!   `CVDiseasesRisks`, `HealthRisks`)
//! - run configuration derived from CLI flags
//! - plausibility warnings (`validate_factors`)

pub mod types;
pub mod validate;

pub use types::*;
pub use validate::*;
