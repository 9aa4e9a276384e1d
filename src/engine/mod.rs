//! Result aggregation: the engine's public entry points.
//!
//! `compute_health_risks` is the "real main" of the library. It runs every
//! model on one factor set and packages the results:
//!
//! - point scores (always computed; individual scores may be absent)
//! - Framingham CVD risks (absent unless every score is present)
//! - Euro-SCORE / Pooled Cohort event risks (each family independently)
//! - vascular age
//!
//! All entry points are pure; results for equal inputs are bit-identical.

use crate::domain::{CVDiseasesRisks, HealthRisks, RisksFactors};
use crate::models::{compute_cvd_risks_from_scores, compute_hard_and_fatal_events_risks, compute_scores};

pub mod bounds;
pub mod vascular;

pub use bounds::*;
pub use vascular::*;

/// Compute all metrics available from the provided factors.
pub fn compute_health_risks(factors: &RisksFactors) -> HealthRisks {
    let scores = compute_scores(factors);
    let cv_diseases = factors
        .gender
        .map_or_else(CVDiseasesRisks::default, |g| compute_cvd_risks_from_scores(&scores, g));
    let hard_and_fatal_events = compute_hard_and_fatal_events_risks(factors);
    let vascular_age = vascular_age(factors);

    tracing::debug!(
        total_score = ?scores.total_score,
        overall_risk = ?cv_diseases.overall_risk,
        hard_cv_event_risk = ?hard_and_fatal_events.hard_cv_event_risk,
        vascular_age = ?vascular_age,
        "computed health risks"
    );

    HealthRisks {
        hard_and_fatal_events,
        cv_diseases,
        vascular_age,
        scores,
    }
}
