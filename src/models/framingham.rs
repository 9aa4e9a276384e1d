//! Framingham-style 10-year CVD risks from the total point score.
//!
//! Each outcome uses the same Cox-type transform of the total score:
//!
//! ```text
//! risk = 1 - S0^exp(k * (total - mean))
//! ```
//!
//! - `k` converts points to log-hazard units (one point ≈ 18% hazard for men,
//!   17% for women, matching the published point-to-risk charts)
//! - `mean` is the population mean score, including the BMI term
//! - `S0` is outcome- and gender-specific. Component outcomes use the overall
//!   baseline survival raised to that outcome's share of CVD events.
//!
//! No imputation happens here: an absent total yields absent risks.

use crate::domain::{CVDiseasesRisks, Gender, RisksFactors, RisksFactorsScores};
use crate::math::{risk_from_baseline_survival, to_probability};
use crate::models::scores::compute_scores;

/// CVD outcomes reported by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CvdOutcome {
    Overall,
    CoronaryHeartDisease,
    Stroke,
    HeartFailure,
    PeripheralVascularDisease,
}

impl CvdOutcome {
    pub const ALL: [CvdOutcome; 5] = [
        CvdOutcome::Overall,
        CvdOutcome::CoronaryHeartDisease,
        CvdOutcome::Stroke,
        CvdOutcome::HeartFailure,
        CvdOutcome::PeripheralVascularDisease,
    ];
}

#[derive(Debug, Clone, Copy)]
struct Calibration {
    points_scale: f64,
    mean_score: f64,
    overall_s0: f64,
    /// Share of overall events per outcome, in `CvdOutcome::ALL` order.
    shares: [f64; 5],
}

const MALE: Calibration = Calibration {
    points_scale: 0.1803,
    mean_score: 12.0,
    overall_s0: 0.88936,
    shares: [1.0, 0.65, 0.20, 0.12, 0.06],
};

const FEMALE: Calibration = Calibration {
    points_scale: 0.1663,
    mean_score: 9.7,
    overall_s0: 0.95012,
    shares: [1.0, 0.55, 0.28, 0.12, 0.05],
};

impl Calibration {
    fn baseline_survival(&self, outcome: CvdOutcome) -> f64 {
        let share = match outcome {
            CvdOutcome::Overall => self.shares[0],
            CvdOutcome::CoronaryHeartDisease => self.shares[1],
            CvdOutcome::Stroke => self.shares[2],
            CvdOutcome::HeartFailure => self.shares[3],
            CvdOutcome::PeripheralVascularDisease => self.shares[4],
        };
        self.overall_s0.powf(share)
    }

    fn risk(&self, outcome: CvdOutcome, total_score: i32) -> f64 {
        let lp = self.points_scale * (f64::from(total_score) - self.mean_score);
        risk_from_baseline_survival(self.baseline_survival(outcome), lp)
    }
}

/// 10-year risk of one outcome for a total score.
///
/// `Gender::Other` has no calibration of its own and gets the mean of the male
/// and female risks.
pub fn outcome_risk(outcome: CvdOutcome, total_score: i32, gender: Gender) -> f64 {
    match gender {
        Gender::Male => MALE.risk(outcome, total_score),
        Gender::Female => FEMALE.risk(outcome, total_score),
        Gender::Other => 0.5 * (MALE.risk(outcome, total_score) + FEMALE.risk(outcome, total_score)),
    }
}

/// CVD risks from precomputed scores.
pub fn compute_cvd_risks_from_scores(scores: &RisksFactorsScores, gender: Gender) -> CVDiseasesRisks {
    let Some(total) = scores.total_score else {
        return CVDiseasesRisks::default();
    };
    let [overall, chd, stroke, hf, pvd] =
        CvdOutcome::ALL.map(|outcome| to_probability(outcome_risk(outcome, total, gender)));

    CVDiseasesRisks {
        overall_risk: overall,
        coronary_heart_disease_risk: chd,
        stroke_risk: stroke,
        heart_failure_risk: hf,
        peripheral_vascular_disease_risk: pvd,
    }
}

/// CVD risks straight from a factor set.
pub fn compute_cvd_risks(factors: &RisksFactors) -> CVDiseasesRisks {
    match factors.gender {
        Some(gender) => compute_cvd_risks_from_scores(&compute_scores(factors), gender),
        None => CVDiseasesRisks::default(),
    }
}

/// Overall risk in full precision (used by the vascular-age search).
pub fn overall_risk(factors: &RisksFactors) -> Option<f64> {
    let gender = factors.gender?;
    let total = compute_scores(factors).total_score?;
    Some(outcome_risk(CvdOutcome::Overall, total, gender))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_published_chart_at_anchor_points() {
        // Men, 13 points with the BMI term ≈ 12 points on the lipid chart (13.2%).
        let r = outcome_risk(CvdOutcome::Overall, 13, Gender::Male);
        assert!((r - 0.131).abs() < 0.005, "r={r}");
        // Women at the mean score carry roughly 1 - S0.
        let r = outcome_risk(CvdOutcome::Overall, 10, Gender::Female);
        assert!(r > 0.045 && r < 0.06, "r={r}");
    }

    #[test]
    fn components_are_below_overall() {
        for total in -5..30 {
            for gender in [Gender::Male, Gender::Female, Gender::Other] {
                let overall = outcome_risk(CvdOutcome::Overall, total, gender);
                for outcome in &CvdOutcome::ALL[1..] {
                    assert!(outcome_risk(*outcome, total, gender) <= overall);
                }
            }
        }
    }

    #[test]
    fn other_gender_lies_between_male_and_female() {
        let m = outcome_risk(CvdOutcome::Overall, 12, Gender::Male);
        let f = outcome_risk(CvdOutcome::Overall, 12, Gender::Female);
        let o = outcome_risk(CvdOutcome::Overall, 12, Gender::Other);
        assert!(o >= m.min(f) && o <= m.max(f));
    }

    #[test]
    fn absent_total_gives_absent_risks() {
        let scores = RisksFactorsScores {
            age_score: Some(8),
            ..RisksFactorsScores::default()
        };
        assert_eq!(
            compute_cvd_risks_from_scores(&scores, Gender::Male),
            CVDiseasesRisks::default()
        );
    }
}
