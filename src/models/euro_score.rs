//! Euro-SCORE: 10-year risk of fatal cardiovascular events.
//!
//! The model (Conroy et al. 2003) has two additive components, coronary death
//! and non-coronary cardiovascular death (chiefly fatal stroke). For each:
//!
//! ```text
//! S0(a)  = exp(-exp(α) * (a - 20)^p)          Weibull baseline survival
//! w      = β · (x - x̄)                          x = [chol mmol/L, SBP, smoker]
//! S(a)   = S0(a)^exp(w)
//! risk   = 1 - S(a + 10) / S(a)
//! ```
//!
//! `α, p` depend on gender and on the low/high-risk region calibration; `β` is
//! shared. Smoking enters as an indicator, which is equivalent to selecting a
//! smoker-specific baseline.

use nalgebra::Vector3;

use crate::domain::{Gender, RisksFactors};
use crate::math::risk_from_cumulative_hazards;
use crate::tables::ScoreRegion;

/// mg/dL → mmol/L for cholesterol.
pub const MG_DL_PER_MMOL_L: f64 = 38.67;

const AGE_RANGE: (f64, f64) = (40.0, 70.0);
const SBP_RANGE: (f64, f64) = (80.0, 220.0);
const CHOLESTEROL_MMOL_RANGE: (f64, f64) = (2.5, 12.0);

/// Centring point for `x = [cholesterol, sbp, smoker]`.
const X_MEAN: [f64; 3] = [6.0, 120.0, 0.0];

#[derive(Debug, Clone, Copy)]
struct Weibull {
    alpha: f64,
    p: f64,
}

impl Weibull {
    /// Baseline cumulative hazard at `age`.
    fn cumulative_hazard(&self, age: f64) -> f64 {
        self.alpha.exp() * (age - 20.0).powf(self.p)
    }
}

#[derive(Debug, Clone, Copy)]
struct Component {
    beta: [f64; 3],
    low: [Weibull; 2],
    high: [Weibull; 2],
}

impl Component {
    fn baseline(&self, region: ScoreRegion, gender: Gender) -> Weibull {
        let pair = match region {
            ScoreRegion::Low => &self.low,
            ScoreRegion::High => &self.high,
        };
        match gender {
            Gender::Female => pair[1],
            _ => pair[0],
        }
    }

    fn risk(&self, region: ScoreRegion, gender: Gender, age: f64, x: &Vector3<f64>) -> f64 {
        let baseline = self.baseline(region, gender);
        let w = Vector3::from(self.beta).dot(&(x - Vector3::from(X_MEAN)));
        let scale = w.exp();
        risk_from_cumulative_hazards(
            baseline.cumulative_hazard(age) * scale,
            baseline.cumulative_hazard(age + 10.0) * scale,
        )
    }
}

/// Baselines are `[male, female]`.
const CORONARY: Component = Component {
    beta: [0.24, 0.018, 0.71],
    low: [Weibull { alpha: -22.1, p: 4.71 }, Weibull { alpha: -29.8, p: 6.36 }],
    high: [Weibull { alpha: -21.0, p: 4.62 }, Weibull { alpha: -28.7, p: 6.23 }],
};

const NON_CORONARY: Component = Component {
    beta: [0.02, 0.022, 0.63],
    low: [Weibull { alpha: -26.7, p: 5.64 }, Weibull { alpha: -31.0, p: 6.62 }],
    high: [Weibull { alpha: -25.7, p: 5.47 }, Weibull { alpha: -30.0, p: 6.42 }],
};

/// The two fatal-event components, in full precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EuroScoreRisks {
    pub coronary_death: f64,
    pub fatal_stroke: f64,
}

/// Euro-SCORE risks, or `None` if age, gender, smoking, SBP or total
/// cholesterol is unknown.
pub fn euro_score(factors: &RisksFactors) -> Option<EuroScoreRisks> {
    let age = f64::from(factors.age?).clamp(AGE_RANGE.0, AGE_RANGE.1);
    let gender = factors.gender?;
    let smoker = if factors.is_smoker? { 1.0 } else { 0.0 };
    let sbp = factors.sbp_mmhg()?.clamp(SBP_RANGE.0, SBP_RANGE.1);
    let cholesterol = (factors.cholesterol_mg_dl()? / MG_DL_PER_MMOL_L)
        .clamp(CHOLESTEROL_MMOL_RANGE.0, CHOLESTEROL_MMOL_RANGE.1);

    let region = ScoreRegion::from_country(&factors.country);
    let x = Vector3::new(cholesterol, sbp, smoker);

    let evaluate = |g: Gender| EuroScoreRisks {
        coronary_death: CORONARY.risk(region, g, age, &x),
        fatal_stroke: NON_CORONARY.risk(region, g, age, &x),
    };

    // No dedicated calibration for `Other`: average the two sexes.
    Some(match gender {
        Gender::Other => {
            let m = evaluate(Gender::Male);
            let f = evaluate(Gender::Female);
            EuroScoreRisks {
                coronary_death: 0.5 * (m.coronary_death + f.coronary_death),
                fatal_stroke: 0.5 * (m.fatal_stroke + f.fatal_stroke),
            }
        }
        g => evaluate(g),
    })
}
