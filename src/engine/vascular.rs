//! Vascular age: the age at which a person with all modifiable factors at their
//! reference values would carry the same overall CVD risk.
//!
//! The reference risk is a non-decreasing step function of age (age points are
//! bucketed), so we binary-search the age domain:
//!
//! - target on a plateau → the person's own age clamped into that plateau
//!   (a reference person is therefore their own vascular age)
//! - target between plateaus → the neighbouring age with the nearer risk
//!   (ties go to the older age)
//! - target beyond the domain → the nearest domain boundary

use crate::domain::RisksFactors;
use crate::math::{first_at_least, last_at_most};
use crate::models::overall_risk;
use crate::tables::reference_risks_factors;

/// Inclusive search domain in years.
pub const VASCULAR_AGE_RANGE: (i32, i32) = (20, 100);

pub fn vascular_age(factors: &RisksFactors) -> Option<i32> {
    let target = overall_risk(factors)?;
    let age = factors.age?;
    let reference = reference_risks_factors(factors);

    // The reference set is complete, so every probe has a risk.
    let curve = |a: i32| overall_risk(&reference.with_age(a)).unwrap_or(f64::INFINITY);
    let (lo, hi) = VASCULAR_AGE_RANGE;

    let Some(first) = first_at_least(lo, hi, target, &curve) else {
        return Some(hi);
    };

    let at_first = curve(first);
    if at_first == target {
        let last = last_at_most(first, hi, target, &curve).unwrap_or(first);
        return Some(age.clamp(first, last));
    }
    if first == lo {
        return Some(lo);
    }

    let below = curve(first - 1);
    if target - below < at_first - target {
        Some(first - 1)
    } else {
        Some(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, Race};

    fn male(age: i32) -> RisksFactors {
        RisksFactors {
            is_smoker: Some(false),
            hypertension_treatment: Some(false),
            has_diabetes: Some(false),
            ..RisksFactors::demographic(age, Gender::Male, "US", Some(Race::White))
                .with_cholesterol(200.0)
                .with_cholesterol_hdl(50.0)
                .with_sbp(130.0)
                .with_body(175.0, 80.0)
        }
    }

    #[test]
    fn reference_person_is_their_own_vascular_age() {
        for gender in [Gender::Male, Gender::Female, Gender::Other] {
            let base = RisksFactors::demographic(20, gender, "FR", None);
            let reference = reference_risks_factors(&base);
            for a in VASCULAR_AGE_RANGE.0..=VASCULAR_AGE_RANGE.1 {
                assert_eq!(vascular_age(&reference.with_age(a)), Some(a), "{gender:?} age {a}");
            }
        }
    }

    #[test]
    fn worse_factors_age_the_vessels() {
        // 13 points vs 11 for a 55-year-old reference man → 65-69 plateau.
        assert_eq!(vascular_age(&male(55)), Some(65));
    }

    #[test]
    fn very_high_risk_clamps_to_the_upper_bound() {
        let f = RisksFactors {
            is_smoker: Some(true),
            has_diabetes: Some(true),
            hypertension_treatment: Some(true),
            ..male(70).with_sbp(190.0).with_cholesterol(300.0).with_cholesterol_hdl(30.0)
        };
        assert_eq!(vascular_age(&f), Some(VASCULAR_AGE_RANGE.1));
    }

    #[test]
    fn very_low_risk_clamps_to_the_lower_bound() {
        let f = male(32)
            .with_sbp(100.0)
            .with_cholesterol(140.0)
            .with_cholesterol_hdl(80.0)
            .with_body(180.0, 65.0);
        assert_eq!(vascular_age(&f), Some(VASCULAR_AGE_RANGE.0));
    }

    #[test]
    fn absent_when_overall_risk_is_absent() {
        let f = RisksFactors {
            sbp: None,
            ..male(50)
        };
        assert_eq!(vascular_age(&f), None);
    }
}
