//! Reference ("normal") and extreme factor values.
//!
//! A reference factor set keeps the person's age, gender, country and race and
//! replaces every modifiable factor with a population-normal constant. The
//! extreme sets do the same with the clinically worst/best plausible values and
//! are used to bound the risk attainable when only demographics are certain.

use crate::domain::RisksFactors;

pub const REFERENCE_CHOLESTEROL: f32 = 180.0;
pub const REFERENCE_CHOLESTEROL_HDL: f32 = 45.0;
pub const REFERENCE_SBP: f32 = 125.0;
pub const REFERENCE_IS_SMOKER: bool = false;
pub const REFERENCE_HYPERTENSION_TREATMENT: bool = false;
pub const REFERENCE_HAS_DIABETES: bool = false;
pub const REFERENCE_BODY_HEIGHT: f32 = 170.0;
pub const REFERENCE_BODY_WEIGHT: f32 = 65.0;

/// Values substituted for every modifiable factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModifiableFactors {
    pub cholesterol: f32,
    pub cholesterol_hdl: f32,
    pub sbp: f32,
    pub is_smoker: bool,
    pub hypertension_treatment: bool,
    pub has_diabetes: bool,
    pub body_height: f32,
    pub body_weight: f32,
}

impl ModifiableFactors {
    /// Keep the demographics of `factors`, replace everything else.
    pub fn apply(&self, factors: &RisksFactors) -> RisksFactors {
        RisksFactors {
            age: factors.age,
            cholesterol: Some(self.cholesterol),
            cholesterol_hdl: Some(self.cholesterol_hdl),
            sbp: Some(self.sbp),
            is_smoker: Some(self.is_smoker),
            hypertension_treatment: Some(self.hypertension_treatment),
            has_diabetes: Some(self.has_diabetes),
            body_height: Some(self.body_height),
            body_weight: Some(self.body_weight),
            gender: factors.gender,
            country: factors.country.clone(),
            race: factors.race,
        }
    }
}

/// Population-normal values.
pub const REFERENCE_FACTORS: ModifiableFactors = ModifiableFactors {
    cholesterol: REFERENCE_CHOLESTEROL,
    cholesterol_hdl: REFERENCE_CHOLESTEROL_HDL,
    sbp: REFERENCE_SBP,
    is_smoker: REFERENCE_IS_SMOKER,
    hypertension_treatment: REFERENCE_HYPERTENSION_TREATMENT,
    has_diabetes: REFERENCE_HAS_DIABETES,
    body_height: REFERENCE_BODY_HEIGHT,
    body_weight: REFERENCE_BODY_WEIGHT,
};

/// Worst values.
///
/// Cholesterol, HDL and SBP sit at or beyond the clamp limits of every model,
/// so no real input can score worse. Treated hypertension carries a larger
/// point penalty than untreated at the same pressure in every table. Weight
/// gives BMI 40 at the reference height.
pub const MAXIMAL_FACTORS: ModifiableFactors = ModifiableFactors {
    cholesterol: 470.0,
    cholesterol_hdl: 20.0,
    sbp: 220.0,
    is_smoker: true,
    hypertension_treatment: true,
    has_diabetes: true,
    body_height: REFERENCE_BODY_HEIGHT,
    body_weight: 115.6,
};

/// Best values, at or beyond the lower clamp limits of every model. Weight
/// gives BMI 18.5 at the reference height.
pub const MINIMAL_FACTORS: ModifiableFactors = ModifiableFactors {
    cholesterol: 90.0,
    cholesterol_hdl: 100.0,
    sbp: 80.0,
    is_smoker: false,
    hypertension_treatment: false,
    has_diabetes: false,
    body_height: REFERENCE_BODY_HEIGHT,
    body_weight: 53.5,
};

/// Reference counterpart of `factors`: same age, gender, country and race,
/// all other factors at their population-normal values.
pub fn reference_risks_factors(factors: &RisksFactors) -> RisksFactors {
    REFERENCE_FACTORS.apply(factors)
}
