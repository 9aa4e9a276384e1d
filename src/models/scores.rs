//! Per-factor point scores and their total.

use crate::domain::{RisksFactors, RisksFactorsScores};
use crate::tables::{Factor, score};

/// Score every factor; the total is present only when all seven are.
pub fn compute_scores(factors: &RisksFactors) -> RisksFactorsScores {
    let [age, sbp, smoking, diabetes, bmi, cholesterol, hdl] =
        Factor::ALL.map(|factor| score(factor, factors));

    let total_score = [age, sbp, smoking, diabetes, bmi, cholesterol, hdl]
        .into_iter()
        .sum::<Option<i32>>();

    RisksFactorsScores {
        age_score: age,
        sbp_score: sbp,
        smoking_score: smoking,
        diabetes_score: diabetes,
        bmi_score: bmi,
        cholesterol_score: cholesterol,
        cholesterol_hdl_score: hdl,
        total_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, Race};

    fn full_male() -> RisksFactors {
        RisksFactors {
            age: Some(55),
            cholesterol: Some(200.0),
            cholesterol_hdl: Some(50.0),
            sbp: Some(130.0),
            is_smoker: Some(false),
            hypertension_treatment: Some(false),
            has_diabetes: Some(false),
            body_height: Some(175.0),
            body_weight: Some(80.0),
            gender: Some(Gender::Male),
            country: "US".to_string(),
            race: Some(Race::White),
        }
    }

    #[test]
    fn total_is_sum_of_all_scores() {
        let s = compute_scores(&full_male());
        assert_eq!(s.age_score, Some(10));
        assert_eq!(s.sbp_score, Some(1));
        assert_eq!(s.smoking_score, Some(0));
        assert_eq!(s.diabetes_score, Some(0));
        assert_eq!(s.bmi_score, Some(1));
        assert_eq!(s.cholesterol_score, Some(2));
        assert_eq!(s.cholesterol_hdl_score, Some(-1));
        assert_eq!(s.total_score, Some(13));
    }

    #[test]
    fn one_missing_factor_drops_the_total() {
        let f = RisksFactors {
            has_diabetes: None,
            ..full_male()
        };
        let s = compute_scores(&f);
        assert_eq!(s.diabetes_score, None);
        assert_eq!(s.age_score, Some(10));
        assert_eq!(s.total_score, None);
    }

    #[test]
    fn demographics_only_scores_age() {
        let f = RisksFactors {
            age: Some(40),
            gender: Some(Gender::Female),
            ..RisksFactors::default()
        };
        let s = compute_scores(&f);
        assert_eq!(s.age_score, Some(4));
        assert_eq!(
            s,
            RisksFactorsScores {
                age_score: Some(4),
                ..RisksFactorsScores::default()
            }
        );
    }
}
