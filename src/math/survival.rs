//! Survival-model helpers shared by every risk function.
//!
//! All three risk models reduce to the same transform:
//!
//! ```text
//! risk = 1 - S0^exp(lp)
//! ```
//!
//! where `S0` is a baseline survival and `lp` a centred linear predictor.
//!
//! Numerical notes:
//! - For small risks, `1 - S0^x` suffers from cancellation; we compute it as
//!   `-expm1(x * ln S0)`.
//! - Every result is clamped into `[0, 1]` and non-finite values are dropped
//!   rather than propagated.

/// `1 - s0^exp(lp)`, computed without cancellation.
pub fn risk_from_baseline_survival(s0: f64, lp: f64) -> f64 {
    let hazard = lp.exp() * s0.ln();
    clamp_probability(-hazard.exp_m1())
}

/// `1 - S(t1)/S(t0)` for two cumulative hazards `h0 <= h1`.
pub fn risk_from_cumulative_hazards(h0: f64, h1: f64) -> f64 {
    clamp_probability(-(h0 - h1).exp_m1())
}

/// Probability that at least one of two independent events occurs.
pub fn union_probability(a: f64, b: f64) -> f64 {
    clamp_probability(a + b - a * b)
}

pub fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() { p } else { p.clamp(0.0, 1.0) }
}

/// Convert an internal probability to the external single-precision form.
///
/// Returns `None` for non-finite values.
pub fn to_probability(p: f64) -> Option<f32> {
    if p.is_finite() {
        Some(clamp_probability(p) as f32)
    } else {
        None
    }
}
