//! Shared scoring pipeline used by the CLI handlers.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! factors -> validation -> risks (+ optional envelope)
//!
//! The handlers can then focus on presentation (printing vs exporting).

use rayon::prelude::*;

use crate::domain::{FactorWarning, HealthRisks, RiskEnvelope, RisksFactors, Subject, SubjectRisks, validate_factors};
use crate::engine::{compute_health_risks, risk_envelope};

/// All computed outputs for one subject.
#[derive(Debug, Clone)]
pub struct Assessment {
    pub factors: RisksFactors,
    pub warnings: Vec<FactorWarning>,
    pub risks: HealthRisks,
    pub envelope: Option<RiskEnvelope>,
}

/// Validate and score one factor set.
pub fn assess(factors: &RisksFactors, include_bounds: bool) -> Assessment {
    let warnings = validate_factors(factors);
    let (risks, envelope) = if include_bounds {
        let env = risk_envelope(factors);
        (env.actual, Some(env))
    } else {
        (compute_health_risks(factors), None)
    };

    Assessment {
        factors: factors.clone(),
        warnings,
        risks,
        envelope,
    }
}

/// Score every subject in parallel; output order matches input order.
pub fn score_cohort(subjects: &[Subject], include_bounds: bool) -> Vec<SubjectRisks> {
    tracing::debug!(subjects = subjects.len(), include_bounds, "scoring cohort");
    subjects
        .par_iter()
        .map(|s| score_subject(s, include_bounds))
        .collect()
}

fn score_subject(subject: &Subject, include_bounds: bool) -> SubjectRisks {
    let (risks, envelope) = if include_bounds {
        let env = risk_envelope(&subject.factors);
        (env.actual, Some(env))
    } else {
        (compute_health_risks(&subject.factors), None)
    };
    SubjectRisks {
        id: subject.id.clone(),
        risks,
        envelope,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generate_cohort;
    use crate::domain::{Gender, SampleConfig};

    #[test]
    fn parallel_scoring_matches_sequential() {
        let subjects = generate_cohort(&SampleConfig {
            sample_count: 64,
            sample_seed: 3,
            age_min: 30,
            age_max: 80,
            missing_rate: 0.1,
            country: "DE".to_string(),
            output: None,
        })
        .unwrap();

        let results = score_cohort(&subjects, true);
        assert_eq!(results.len(), subjects.len());
        for (s, r) in subjects.iter().zip(&results) {
            assert_eq!(s.id, r.id);
            assert_eq!(r.risks, compute_health_risks(&s.factors));
            assert!(r.envelope.is_some());
        }
    }

    #[test]
    fn assess_collects_warnings_without_blocking() {
        let f = RisksFactors::demographic(110, Gender::Male, "", None);
        let a = assess(&f, false);
        assert!(a.warnings.iter().any(|w| w.field == "age"));
        assert!(a.envelope.is_none());
        assert_eq!(a.risks, compute_health_risks(&f));
    }
}
