//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - scored in-memory by the engine
//! - read from / written to JSON profiles and CSV cohorts
//! - compared by value (every result is a pure function of its inputs)
//!
//! Every clinical field is an `Option`: `None` means *unknown*, which is not the
//! same as *normal*. Absent values serialize as `null`, never as `0`.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Biological sex used for table stratification.
///
/// `Other` has no dedicated coefficients; models evaluate it as the mean of the
/// male and female results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn display_name(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// Race classification used by the Pooled Cohort Equations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Race {
    White,
    AfricanAmerican,
    Other,
}

impl Race {
    pub fn display_name(self) -> &'static str {
        match self {
            Race::White => "white",
            Race::AfricanAmerican => "african_american",
            Race::Other => "other",
        }
    }
}

/// A person's cardiovascular risk factors.
///
/// Units: lipids in mg/dL, blood pressure in mmHg, height in cm, weight in kg.
/// `country` is an ISO 3166-1 alpha-2 code and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RisksFactors {
    pub age: Option<i32>,
    pub cholesterol: Option<f32>,
    pub cholesterol_hdl: Option<f32>,
    pub sbp: Option<f32>,
    pub is_smoker: Option<bool>,
    pub hypertension_treatment: Option<bool>,
    pub has_diabetes: Option<bool>,
    pub body_height: Option<f32>,
    pub body_weight: Option<f32>,
    pub gender: Option<Gender>,
    pub country: String,
    pub race: Option<Race>,
}

/// Lower/upper clamps applied to height and weight before computing BMI.
const HEIGHT_RANGE_CM: (f64, f64) = (50.0, 250.0);
const WEIGHT_RANGE_KG: (f64, f64) = (20.0, 300.0);

impl RisksFactors {
    /// Factor set with only the demographic fields filled in.
    pub fn demographic(age: i32, gender: Gender, country: impl Into<String>, race: Option<Race>) -> Self {
        Self {
            age: Some(age),
            gender: Some(gender),
            country: country.into(),
            race,
            ..Self::default()
        }
    }

    pub fn with_age(&self, age: i32) -> Self {
        Self {
            age: Some(age),
            ..self.clone()
        }
    }

    pub fn with_cholesterol(&self, cholesterol: f32) -> Self {
        Self {
            cholesterol: Some(cholesterol),
            ..self.clone()
        }
    }

    pub fn with_cholesterol_hdl(&self, hdl: f32) -> Self {
        Self {
            cholesterol_hdl: Some(hdl),
            ..self.clone()
        }
    }

    pub fn with_sbp(&self, sbp: f32) -> Self {
        Self {
            sbp: Some(sbp),
            ..self.clone()
        }
    }

    pub fn with_body(&self, height_cm: f32, weight_kg: f32) -> Self {
        Self {
            body_height: Some(height_cm),
            body_weight: Some(weight_kg),
            ..self.clone()
        }
    }

    /// Total cholesterol in mg/dL, if present and finite.
    pub fn cholesterol_mg_dl(&self) -> Option<f64> {
        finite(self.cholesterol)
    }

    /// HDL cholesterol in mg/dL, if present and finite.
    pub fn hdl_mg_dl(&self) -> Option<f64> {
        finite(self.cholesterol_hdl)
    }

    /// Systolic blood pressure in mmHg, if present and finite.
    pub fn sbp_mmhg(&self) -> Option<f64> {
        finite(self.sbp)
    }

    /// Body-mass index (kg/m²), if both height and weight are known.
    ///
    /// Height and weight are clamped to plausible ranges first so that a zero
    /// or negative input can never yield an infinite index.
    pub fn bmi(&self) -> Option<f64> {
        let height_cm = finite(self.body_height)?.clamp(HEIGHT_RANGE_CM.0, HEIGHT_RANGE_CM.1);
        let weight_kg = finite(self.body_weight)?.clamp(WEIGHT_RANGE_KG.0, WEIGHT_RANGE_KG.1);
        let height_m = height_cm / 100.0;
        Some(weight_kg / (height_m * height_m))
    }
}

fn finite(value: Option<f32>) -> Option<f64> {
    value.map(f64::from).filter(|v| v.is_finite())
}

/// Integer point score per factor (Framingham-style).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RisksFactorsScores {
    pub age_score: Option<i32>,
    pub sbp_score: Option<i32>,
    pub smoking_score: Option<i32>,
    pub diabetes_score: Option<i32>,
    pub bmi_score: Option<i32>,
    pub cholesterol_score: Option<i32>,
    pub cholesterol_hdl_score: Option<i32>,
    pub total_score: Option<i32>,
}

/// 10-year risk of hard or fatal cardiovascular events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HardAndFatalEventsRisks {
    /// Fatal coronary event (Euro-SCORE).
    pub coronary_death_event_risk: Option<f32>,
    /// Fatal non-coronary cardiovascular event, chiefly stroke (Euro-SCORE).
    pub fatal_stroke_event_risk: Option<f32>,
    /// Union of the two fatal components.
    pub total_cv_mortality_risk: Option<f32>,
    /// Coronary death, myocardial infarction or stroke (Pooled Cohort Equations).
    pub hard_cv_event_risk: Option<f32>,
}

/// 10-year risk of atherosclerotic cardiovascular disease (Framingham).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CVDiseasesRisks {
    pub overall_risk: Option<f32>,
    pub coronary_heart_disease_risk: Option<f32>,
    pub stroke_risk: Option<f32>,
    pub heart_failure_risk: Option<f32>,
    pub peripheral_vascular_disease_risk: Option<f32>,
}

/// Everything the engine computes for one factor set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthRisks {
    pub hard_and_fatal_events: HardAndFatalEventsRisks,
    pub cv_diseases: CVDiseasesRisks,
    pub vascular_age: Option<i32>,
    pub scores: RisksFactorsScores,
}

/// An identified factor set (one row of a cohort).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub factors: RisksFactors,
}

/// Scoring output for one subject of a cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRisks {
    pub id: String,
    pub risks: HealthRisks,
    pub envelope: Option<RiskEnvelope>,
}

/// A single subject's risks plus the envelope over unknown factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskEnvelope {
    pub minimal: HealthRisks,
    pub actual: HealthRisks,
    pub maximal: HealthRisks,
}

/// A saved assessment report (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportFile {
    pub tool: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub factors: RisksFactors,
    pub risks: HealthRisks,
    pub minimal: Option<HealthRisks>,
    pub maximal: Option<HealthRisks>,
}

/// Configuration for a single-subject assessment.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct AssessConfig {
    pub factors: RisksFactors,
    pub include_bounds: bool,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub export_json: Option<PathBuf>,
}

/// Configuration for scoring a CSV cohort.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub csv_path: PathBuf,
    pub include_bounds: bool,
    pub export_results: Option<PathBuf>,
    /// Print at most this many rows to the terminal.
    pub top_n: usize,
}

/// Configuration for synthetic cohort generation.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub sample_count: usize,
    pub sample_seed: u64,
    pub age_min: i32,
    pub age_max: i32,
    /// Probability that any single optional clinical field is left absent.
    pub missing_rate: f64,
    pub country: String,
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_requires_both_height_and_weight() {
        let f = RisksFactors {
            body_height: Some(175.0),
            ..RisksFactors::default()
        };
        assert_eq!(f.bmi(), None);

        let f = f.with_body(175.0, 80.0);
        let bmi = f.bmi().unwrap();
        assert!((bmi - 26.122).abs() < 1e-3, "bmi={bmi}");
    }

    #[test]
    fn bmi_is_finite_for_zero_height() {
        let f = RisksFactors::default().with_body(0.0, 70.0);
        let bmi = f.bmi().unwrap();
        assert!(bmi.is_finite());
    }

    #[test]
    fn non_finite_inputs_read_as_absent() {
        let f = RisksFactors {
            sbp: Some(f32::NAN),
            cholesterol: Some(f32::INFINITY),
            ..RisksFactors::default()
        };
        assert_eq!(f.sbp_mmhg(), None);
        assert_eq!(f.cholesterol_mg_dl(), None);
    }

    #[test]
    fn with_methods_leave_source_untouched() {
        let base = RisksFactors::demographic(50, Gender::Female, "FR", None);
        let older = base.with_age(60);
        assert_eq!(base.age, Some(50));
        assert_eq!(older.age, Some(60));
        assert_eq!(older.country, "FR");
    }

    #[test]
    fn absent_fields_serialize_as_null() {
        let json = serde_json::to_value(RisksFactorsScores::default()).unwrap();
        assert!(json["total_score"].is_null());

        let f: RisksFactors = serde_json::from_str(r#"{"age": 40, "gender": "female"}"#).unwrap();
        assert_eq!(f.age, Some(40));
        assert_eq!(f.gender, Some(Gender::Female));
        assert_eq!(f.sbp, None);
        assert_eq!(f.country, "");
    }
}
