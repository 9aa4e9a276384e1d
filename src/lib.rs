//! `cvrisk` library crate.
//!
//! Ten-year cardiovascular risk from a partially known set of risk factors:
//!
//! - Framingham point scores and CVD risks (overall, coronary, stroke, heart
//!   failure, peripheral vascular disease)
//! - Euro-SCORE fatal event risks and Pooled Cohort hard event risk
//! - vascular age and the minimal/maximal achievable risk envelope
//!
//! Unknown inputs stay `None` all the way through: a missing factor makes the
//! dependent outputs absent, never zero. Every scoring function is pure.
//!
//! The binary (`cvrisk`) is a thin wrapper around this library so that the
//! engine is testable and reusable without spawning processes.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod tables;

pub use domain::{
    CVDiseasesRisks, Gender, HardAndFatalEventsRisks, HealthRisks, Race, RiskEnvelope, RisksFactors,
    RisksFactorsScores,
};
pub use engine::{compute_health_risks, get_maximal_risks, get_minimal_risks, risk_envelope, vascular_age};
pub use models::{compute_cvd_risks, compute_cvd_risks_from_scores, compute_hard_and_fatal_events_risks, compute_scores};
pub use tables::reference_risks_factors;
