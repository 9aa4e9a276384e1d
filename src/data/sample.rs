//! Synthetic cohort generation.
//!
//! Produces plausible adult factor sets for demos, load tests and smoke tests
//! of the batch pipeline. Distributions are rough population figures, not a
//! calibrated epidemiological model:
//!
//! - lipids and blood pressure drift upwards with age
//! - HDL and body size depend on gender
//! - treatment is far more likely when pressure is high
//!
//! Each optional clinical field is dropped with probability `missing_rate`, so
//! the generated cohort exercises the engine's partial-input paths too.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{Gender, Race, RisksFactors, SampleConfig, Subject};
use crate::error::AppError;

/// Generate `config.sample_count` subjects deterministically from the config.
pub fn generate_cohort(config: &SampleConfig) -> Result<Vec<Subject>, AppError> {
    if config.sample_count == 0 {
        return Err(AppError::input("Sample count must be > 0."));
    }
    if config.age_min > config.age_max {
        return Err(AppError::input(format!(
            "Invalid age range: min {} > max {}.",
            config.age_min, config.age_max
        )));
    }
    if !(config.missing_rate.is_finite() && (0.0..1.0).contains(&config.missing_rate)) {
        return Err(AppError::input("Missing rate must be in [0, 1)."));
    }

    let mut rng = StdRng::seed_from_u64(sample_seed(config));
    let noise = Normal::new(0.0, 1.0).map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;
    let draw = |rng: &mut StdRng, mean: f64, sd: f64, lo: f64, hi: f64| -> f64 {
        (mean + sd * noise.sample(rng)).clamp(lo, hi)
    };

    let country = config.country.trim().to_ascii_uppercase();
    let mut subjects = Vec::with_capacity(config.sample_count);

    for i in 0..config.sample_count {
        let age = rng.gen_range(config.age_min..=config.age_max);
        let years_over_40 = f64::from(age - 40);

        let gender = match rng.gen_range(0..100) {
            0..=48 => Gender::Male,
            49..=97 => Gender::Female,
            _ => Gender::Other,
        };
        let race = match rng.gen_range(0..100) {
            0..=69 => Race::White,
            70..=84 => Race::AfricanAmerican,
            _ => Race::Other,
        };
        let female = gender == Gender::Female;

        let cholesterol = draw(&mut rng, 195.0 + 0.6 * years_over_40, 36.0, 110.0, 380.0).round();
        let hdl = if female {
            draw(&mut rng, 58.0, 14.0, 22.0, 120.0)
        } else {
            draw(&mut rng, 47.0, 11.0, 20.0, 110.0)
        }
        .round();
        let sbp = draw(&mut rng, 118.0 + 0.55 * years_over_40, 15.0, 88.0, 220.0).round();
        let treated = rng.gen_bool(if sbp >= 140.0 { 0.5 } else { 0.08 });
        let smoker = rng.gen_bool(0.18);
        let diabetic = rng.gen_bool((0.04 + 0.002 * years_over_40).clamp(0.01, 0.3));

        let height = if female {
            draw(&mut rng, 163.0, 6.5, 140.0, 195.0)
        } else {
            draw(&mut rng, 176.0, 7.0, 150.0, 210.0)
        };
        let bmi = draw(&mut rng, 26.5, 4.5, 16.0, 50.0);
        let height_m = height / 100.0;
        let weight = bmi * height_m * height_m;

        let mut keep = |v: f64| -> Option<f32> { (!rng.gen_bool(config.missing_rate)).then_some(round1(v)) };
        let cholesterol = keep(cholesterol);
        let cholesterol_hdl = keep(hdl);
        let sbp = keep(sbp);
        let body_height = keep(height);
        let body_weight = keep(weight);

        let mut keep_flag = |v: bool| -> Option<bool> { (!rng.gen_bool(config.missing_rate)).then_some(v) };
        let is_smoker = keep_flag(smoker);
        let hypertension_treatment = keep_flag(treated);
        let has_diabetes = keep_flag(diabetic);

        subjects.push(Subject {
            id: format!("S{:05}", i + 1),
            factors: RisksFactors {
                age: Some(age),
                cholesterol,
                cholesterol_hdl,
                sbp,
                is_smoker,
                hypertension_treatment,
                has_diabetes,
                body_height,
                body_weight,
                gender: Some(gender),
                country: country.clone(),
                race: Some(race),
            },
        });
    }

    tracing::debug!(count = subjects.len(), seed = config.sample_seed, "generated synthetic cohort");
    Ok(subjects)
}

fn round1(v: f64) -> f32 {
    ((v * 10.0).round() / 10.0) as f32
}

/// Seed the generator from every field that shapes the cohort.
fn sample_seed(config: &SampleConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.sample_seed.hash(&mut hasher);
    config.sample_count.hash(&mut hasher);
    config.age_min.hash(&mut hasher);
    config.age_max.hash(&mut hasher);
    config.missing_rate.to_bits().hash(&mut hasher);
    config.country.hash(&mut hasher);
    hasher.finish()
}
