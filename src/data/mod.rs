//! Data sources.
//!
//! Cohorts normally come from CSV (`crate::io::ingest`); this module provides
//! the synthetic generator used when no real data is at hand.

pub mod sample;

pub use sample::*;
