//! Country → Euro-SCORE risk region.
//!
//! Euro-SCORE ships two calibrations. Countries on the ESC low-risk list use
//! the low-risk coefficients; every other country, including an empty or
//! unrecognised code, falls back to the high-risk set so that an unknown region
//! never understates mortality.

use serde::{Deserialize, Serialize};

/// Euro-SCORE calibration region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreRegion {
    Low,
    High,
}

/// ESC low cardiovascular risk countries (ISO 3166-1 alpha-2).
const LOW_RISK_COUNTRIES: &[&str] = &[
    "AD", "AT", "BE", "CH", "CY", "DE", "DK", "ES", "FI", "FR", "GB", "GR", "IE", "IL", "IS", "IT",
    "LU", "MC", "MT", "NL", "NO", "PT", "SE", "SI", "SM",
];

impl ScoreRegion {
    pub fn from_country(country: &str) -> Self {
        let code = country.trim().to_ascii_uppercase();
        // "UK" is not ISO but is common enough in user input.
        let code = if code == "UK" { "GB".to_string() } else { code };
        if LOW_RISK_COUNTRIES.contains(&code.as_str()) {
            ScoreRegion::Low
        } else {
            ScoreRegion::High
        }
    }
}
