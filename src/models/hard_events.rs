//! Hard and fatal cardiovascular event risks.
//!
//! Combines the two independent model families:
//! - Euro-SCORE → coronary death, fatal stroke and their union
//! - Pooled Cohort Equations → hard CV event
//!
//! Either family may be absent while the other is present.

use crate::domain::{HardAndFatalEventsRisks, RisksFactors};
use crate::math::{to_probability, union_probability};
use crate::models::euro_score::euro_score;
use crate::models::pooled_cohort::pooled_cohort_risk;

pub fn compute_hard_and_fatal_events_risks(factors: &RisksFactors) -> HardAndFatalEventsRisks {
    let fatal = euro_score(factors);
    let hard = pooled_cohort_risk(factors);

    HardAndFatalEventsRisks {
        coronary_death_event_risk: fatal.and_then(|r| to_probability(r.coronary_death)),
        fatal_stroke_event_risk: fatal.and_then(|r| to_probability(r.fatal_stroke)),
        total_cv_mortality_risk: fatal
            .and_then(|r| to_probability(union_probability(r.coronary_death, r.fatal_stroke))),
        hard_cv_event_risk: hard.and_then(to_probability),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, Race};

    fn full() -> RisksFactors {
        RisksFactors {
            is_smoker: Some(true),
            hypertension_treatment: Some(false),
            has_diabetes: Some(false),
            ..RisksFactors::demographic(60, Gender::Female, "US", Some(Race::White))
                .with_cholesterol(230.0)
                .with_cholesterol_hdl(55.0)
                .with_sbp(142.0)
        }
    }

    #[test]
    fn total_mortality_is_union_of_components() {
        let r = compute_hard_and_fatal_events_risks(&full());
        let chd = f64::from(r.coronary_death_event_risk.unwrap());
        let stroke = f64::from(r.fatal_stroke_event_risk.unwrap());
        let total = f64::from(r.total_cv_mortality_risk.unwrap());
        assert!((total - (chd + stroke - chd * stroke)).abs() < 1e-6);
        assert!(total <= chd + stroke + 1e-7);
        assert!(total >= chd.max(stroke));
    }

    #[test]
    fn families_are_computed_independently() {
        let r = compute_hard_and_fatal_events_risks(&full());
        assert!(r.hard_cv_event_risk.is_some());

        // HDL only feeds the Pooled Cohort Equations.
        let f = RisksFactors {
            cholesterol_hdl: None,
            ..full()
        };
        let r = compute_hard_and_fatal_events_risks(&f);
        assert!(r.hard_cv_event_risk.is_none());
        assert!(r.coronary_death_event_risk.is_some());
        assert!(r.total_cv_mortality_risk.is_some());
    }

    #[test]
    fn missing_smoking_drops_everything() {
        let f = RisksFactors {
            is_smoker: None,
            ..full()
        };
        assert_eq!(
            compute_hard_and_fatal_events_risks(&f),
            HardAndFatalEventsRisks::default()
        );
    }
}
