//! Input/output helpers.
//!
//! - CSV cohort ingest + row validation (`ingest`)
//! - per-subject result export to CSV (`export`)
//! - JSON factor profiles and reports (`profile`)

pub mod export;
pub mod ingest;
pub mod profile;

pub use export::*;
pub use ingest::*;
pub use profile::*;
