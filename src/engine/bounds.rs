//! Risk envelope over every modifiable factor.
//!
//! Only age, gender, country and race are held fixed; every other factor,
//! known or not, is replaced by its worst (maximal) or best (minimal) plausible
//! value and the saturated set is run through the normal pipeline.
//!
//! The Pooled Cohort Equations do not rank smoking or treated pressure the
//! same way at every age, so the hard and fatal event risks take the extreme
//! over all four smoking/treatment combinations.

use crate::domain::{HardAndFatalEventsRisks, HealthRisks, RiskEnvelope, RisksFactors};
use crate::engine::compute_health_risks;
use crate::models::compute_hard_and_fatal_events_risks;
use crate::tables::{MAXIMAL_FACTORS, MINIMAL_FACTORS, ModifiableFactors};

pub fn get_maximal_risks(factors: &RisksFactors) -> HealthRisks {
    extreme_risks(&MAXIMAL_FACTORS, factors, f32::max)
}

pub fn get_minimal_risks(factors: &RisksFactors) -> HealthRisks {
    extreme_risks(&MINIMAL_FACTORS, factors, f32::min)
}

fn extreme_risks(extreme: &ModifiableFactors, factors: &RisksFactors, pick: fn(f32, f32) -> f32) -> HealthRisks {
    let mut risks = compute_health_risks(&extreme.apply(factors));
    for (is_smoker, hypertension_treatment) in [(true, true), (true, false), (false, true), (false, false)] {
        let variant = ModifiableFactors {
            is_smoker,
            hypertension_treatment,
            ..*extreme
        };
        let events = compute_hard_and_fatal_events_risks(&variant.apply(factors));
        merge_events(&mut risks.hard_and_fatal_events, &events, pick);
    }
    risks
}

fn merge_events(into: &mut HardAndFatalEventsRisks, other: &HardAndFatalEventsRisks, pick: fn(f32, f32) -> f32) {
    let pairs = [
        (&mut into.coronary_death_event_risk, other.coronary_death_event_risk),
        (&mut into.fatal_stroke_event_risk, other.fatal_stroke_event_risk),
        (&mut into.total_cv_mortality_risk, other.total_cv_mortality_risk),
        (&mut into.hard_cv_event_risk, other.hard_cv_event_risk),
    ];
    for (slot, value) in pairs {
        if let (Some(current), Some(value)) = (slot.as_mut(), value) {
            *current = pick(*current, value);
        }
    }
}

/// Minimal, actual and maximal risks in one value.
pub fn risk_envelope(factors: &RisksFactors) -> RiskEnvelope {
    RiskEnvelope {
        minimal: get_minimal_risks(factors),
        actual: compute_health_risks(factors),
        maximal: get_maximal_risks(factors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, Race};

    #[test]
    fn bounds_only_need_demographics() {
        let f = RisksFactors::demographic(50, Gender::Female, "IT", Some(Race::White));
        let max = get_maximal_risks(&f);
        let min = get_minimal_risks(&f);
        let max_overall = max.cv_diseases.overall_risk.unwrap();
        let min_overall = min.cv_diseases.overall_risk.unwrap();
        assert!(min_overall < max_overall);
        assert!(max.hard_and_fatal_events.hard_cv_event_risk.is_some());
        assert!(min.hard_and_fatal_events.total_cv_mortality_risk.is_some());
    }

    #[test]
    fn envelope_holds_beyond_the_model_clamp_limits() {
        // Heavy smoker far outside the Euro-SCORE and PCE input ranges.
        let f = RisksFactors {
            is_smoker: Some(true),
            hypertension_treatment: Some(false),
            has_diabetes: Some(true),
            ..RisksFactors::demographic(60, Gender::Male, "PL", None)
                .with_cholesterol(420.0)
                .with_cholesterol_hdl(25.0)
                .with_sbp(218.0)
        };
        let env = risk_envelope(&f);
        let (lo, mid, hi) = (
            &env.minimal.hard_and_fatal_events,
            &env.actual.hard_and_fatal_events,
            &env.maximal.hard_and_fatal_events,
        );
        assert!(mid.total_cv_mortality_risk.is_some() && mid.hard_cv_event_risk.is_some());
        assert!(mid.total_cv_mortality_risk <= hi.total_cv_mortality_risk);
        assert!(mid.hard_cv_event_risk <= hi.hard_cv_event_risk);
        assert!(lo.total_cv_mortality_risk <= mid.total_cv_mortality_risk);
        assert!(lo.hard_cv_event_risk <= mid.hard_cv_event_risk);
    }

    #[test]
    fn maximal_hard_risk_covers_old_non_smokers() {
        // PCE gives white men of 79 a slightly higher risk without smoking.
        let f = RisksFactors {
            is_smoker: Some(false),
            hypertension_treatment: Some(false),
            has_diabetes: Some(true),
            ..RisksFactors::demographic(79, Gender::Male, "US", Some(Race::White))
                .with_cholesterol(320.0)
                .with_cholesterol_hdl(20.0)
                .with_sbp(200.0)
        };
        let actual = compute_health_risks(&f).hard_and_fatal_events.hard_cv_event_risk;
        let max = get_maximal_risks(&f).hard_and_fatal_events.hard_cv_event_risk;
        assert!(actual.is_some() && actual <= max, "{actual:?} > {max:?}");
    }

    #[test]
    fn bounds_ignore_the_actual_modifiable_values() {
        let a = RisksFactors::demographic(62, Gender::Male, "PL", None);
        let b = RisksFactors {
            is_smoker: Some(true),
            sbp: Some(170.0),
            ..a.clone()
        };
        assert_eq!(get_maximal_risks(&a), get_maximal_risks(&b));
        assert_eq!(get_minimal_risks(&a), get_minimal_risks(&b));
    }

    #[test]
    fn missing_gender_leaves_bounds_mostly_empty() {
        let f = RisksFactors {
            age: Some(50),
            ..RisksFactors::default()
        };
        let max = get_maximal_risks(&f);
        assert_eq!(max.cv_diseases.overall_risk, None);
        assert_eq!(max.vascular_age, None);
    }

    #[test]
    fn envelope_brackets_actual() {
        let f = RisksFactors {
            is_smoker: Some(false),
            has_diabetes: Some(false),
            ..RisksFactors::demographic(58, Gender::Female, "ES", None)
                .with_cholesterol(215.0)
                .with_cholesterol_hdl(58.0)
                .with_sbp(138.0)
                .with_body(165.0, 70.0)
        };
        let env = risk_envelope(&f);
        let lo = env.minimal.cv_diseases.overall_risk.unwrap();
        let mid = env.actual.cv_diseases.overall_risk.unwrap();
        let hi = env.maximal.cv_diseases.overall_risk.unwrap();
        assert!(lo <= mid && mid <= hi);
    }
}
