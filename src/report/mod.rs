//! Reporting utilities: cohort rankings, summary statistics and formatted
//! terminal output.

use std::cmp::Ordering;

use crate::domain::{Subject, SubjectRisks};

pub mod format;

pub use format::*;

/// Aggregate figures over a scored cohort.
#[derive(Debug, Clone, PartialEq)]
pub struct CohortSummary {
    pub n_subjects: usize,
    /// Subjects with a complete Framingham profile.
    pub n_with_overall_risk: usize,
    pub mean_overall_risk: Option<f64>,
    pub max_overall_risk: Option<f64>,
    pub n_with_hard_event_risk: usize,
    pub mean_hard_event_risk: Option<f64>,
    /// Mean of (vascular age - age) over subjects that have both.
    pub mean_vascular_age_gap: Option<f64>,
}

/// Summarize a scored cohort; `results[i]` must belong to `subjects[i]`.
pub fn summarize_cohort(subjects: &[Subject], results: &[SubjectRisks]) -> CohortSummary {
    let overall: Vec<f64> = results
        .iter()
        .filter_map(|r| r.risks.cv_diseases.overall_risk.map(f64::from))
        .collect();
    let hard: Vec<f64> = results
        .iter()
        .filter_map(|r| r.risks.hard_and_fatal_events.hard_cv_event_risk.map(f64::from))
        .collect();
    let gaps: Vec<f64> = subjects
        .iter()
        .zip(results)
        .filter_map(|(s, r)| Some(f64::from(r.risks.vascular_age?.saturating_sub(s.factors.age?))))
        .collect();

    CohortSummary {
        n_subjects: results.len(),
        n_with_overall_risk: overall.len(),
        mean_overall_risk: mean(&overall),
        max_overall_risk: overall.iter().copied().reduce(f64::max),
        n_with_hard_event_risk: hard.len(),
        mean_hard_event_risk: mean(&hard),
        mean_vascular_age_gap: mean(&gaps),
    }
}

/// The `top_n` subjects with the highest overall CVD risk.
///
/// Subjects without an overall risk are ranked last, in input order.
pub fn rank_by_overall_risk(results: &[SubjectRisks], top_n: usize) -> Vec<SubjectRisks> {
    let mut sorted = results.to_vec();
    sorted.sort_by(|a, b| {
        match (a.risks.cv_diseases.overall_risk, b.risks.cv_diseases.overall_risk) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    sorted.truncate(top_n);
    sorted
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
