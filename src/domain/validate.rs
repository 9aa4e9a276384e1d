//! Plausibility checks for risk factors.
//!
//! The engine accepts any input (out-of-range values clamp to the nearest table
//! bucket), so these checks only produce warnings for the caller to surface.

use serde::Serialize;

use crate::domain::RisksFactors;

/// One implausible-but-accepted input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorWarning {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for FactorWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check every present field against a plausible clinical range.
pub fn validate_factors(factors: &RisksFactors) -> Vec<FactorWarning> {
    let mut warnings = Vec::new();

    if let Some(age) = factors.age {
        if !(20..=100).contains(&age) {
            warnings.push(FactorWarning {
                field: "age",
                message: format!("{age} outside [20, 100]; scored at the nearest table bucket"),
            });
        }
    }

    check_range(&mut warnings, "cholesterol", factors.cholesterol, 70.0, 500.0, "mg/dL");
    check_range(&mut warnings, "cholesterol_hdl", factors.cholesterol_hdl, 10.0, 150.0, "mg/dL");
    check_range(&mut warnings, "sbp", factors.sbp, 70.0, 250.0, "mmHg");
    check_range(&mut warnings, "body_height", factors.body_height, 100.0, 230.0, "cm");
    check_range(&mut warnings, "body_weight", factors.body_weight, 25.0, 250.0, "kg");

    if let (Some(total), Some(hdl)) = (factors.cholesterol_mg_dl(), factors.hdl_mg_dl()) {
        if hdl >= total {
            warnings.push(FactorWarning {
                field: "cholesterol_hdl",
                message: format!("HDL {hdl:.1} is not below total cholesterol {total:.1}"),
            });
        }
    }

    if factors.country.is_empty() {
        warnings.push(FactorWarning {
            field: "country",
            message: "empty; Euro-SCORE uses the high-risk region".to_string(),
        });
    } else if factors.country.len() != 2 || !factors.country.chars().all(|c| c.is_ascii_alphabetic()) {
        warnings.push(FactorWarning {
            field: "country",
            message: format!("'{}' is not an ISO 3166-1 alpha-2 code", factors.country),
        });
    }

    warnings
}

fn check_range(
    warnings: &mut Vec<FactorWarning>,
    field: &'static str,
    value: Option<f32>,
    min: f32,
    max: f32,
    unit: &str,
) {
    let Some(v) = value else {
        return;
    };
    if !v.is_finite() {
        warnings.push(FactorWarning {
            field,
            message: "not a finite number; treated as absent".to_string(),
        });
    } else if !(min..=max).contains(&v) {
        warnings.push(FactorWarning {
            field,
            message: format!("{v} {unit} outside [{min}, {max}]"),
        });
    }
}
