//! Pooled Cohort Equations: 10-year risk of a hard ASCVD event.
//!
//! Goff et al. 2013. The linear predictor is a dot product of a 13-term
//! log-transformed feature vector with a coefficient vector chosen by gender
//! and race:
//!
//! ```text
//! x = [ln age, ln² age, ln TC, ln age·ln TC, ln HDL, ln age·ln HDL,
//!      ln SBPt, ln age·ln SBPt, ln SBPu, ln age·ln SBPu,
//!      smoker, ln age·smoker, diabetes]
//! risk = 1 - S0^exp(β·x - mean)
//! ```
//!
//! Exactly one of the treated/untreated SBP slots is non-zero.
//!
//! The age interactions make the published equations non-monotone near the
//! edges of their domain (for white women the cholesterol slope turns negative
//! above about 77, and young female smokers with high cholesterol lose risk as
//! they age). The reported risk is therefore the highest risk of any profile
//! that is nowhere better than the subject's: same or younger age, same or
//! lower total cholesterol and SBP, same or higher HDL. Where the published
//! equation is already monotone this is exactly the published value.

use nalgebra::SVector;

use crate::domain::{Gender, Race, RisksFactors};
use crate::math::risk_from_baseline_survival;
use crate::tables::{REFERENCE_HAS_DIABETES, REFERENCE_HYPERTENSION_TREATMENT};

type Features = SVector<f64, 13>;

const AGE_RANGE: (i32, i32) = (40, 79);
const CHOLESTEROL_RANGE: (f64, f64) = (130.0, 320.0);
const HDL_RANGE: (f64, f64) = (20.0, 100.0);
const SBP_RANGE: (f64, f64) = (90.0, 200.0);

#[derive(Debug, Clone, Copy)]
struct Equation {
    beta: [f64; 13],
    mean: f64,
    s0: f64,
}

/// Clamped inputs of one subject.
#[derive(Debug, Clone, Copy)]
struct Profile {
    age: i32,
    tc: f64,
    hdl: f64,
    sbp: f64,
    treated: bool,
    smoker: bool,
    diabetic: bool,
}

impl Equation {
    fn linear_predictor(&self, x: &Features) -> f64 {
        Features::from(self.beta).dot(x) - self.mean
    }

    /// Published risk of exactly this profile.
    #[cfg(test)]
    fn point_risk(&self, p: &Profile) -> f64 {
        let x = features(f64::from(p.age), p.tc, p.hdl, p.sbp, p.treated, p.smoker, p.diabetic);
        risk_from_baseline_survival(self.s0, self.linear_predictor(&x))
    }

    /// Highest risk over the profiles dominated by `p`.
    ///
    /// For a fixed age the predictor is linear in ln TC, ln HDL and ln SBP, so
    /// each factor's optimum sits at one end of its range; only the ages need
    /// enumerating.
    fn risk(&self, p: &Profile) -> f64 {
        let lp = (AGE_RANGE.0..=p.age)
            .map(|age| {
                let ln_age = f64::from(age).ln();
                let tc_slope = self.beta[2] + self.beta[3] * ln_age;
                let hdl_slope = self.beta[4] + self.beta[5] * ln_age;
                let sbp_slope = if p.treated {
                    self.beta[6] + self.beta[7] * ln_age
                } else {
                    self.beta[8] + self.beta[9] * ln_age
                };

                let tc = if tc_slope >= 0.0 { p.tc } else { CHOLESTEROL_RANGE.0 };
                let hdl = if hdl_slope <= 0.0 { p.hdl } else { HDL_RANGE.1 };
                let sbp = if sbp_slope >= 0.0 { p.sbp } else { SBP_RANGE.0 };
                let x = features(f64::from(age), tc, hdl, sbp, p.treated, p.smoker, p.diabetic);
                self.linear_predictor(&x)
            })
            .fold(f64::NEG_INFINITY, f64::max);
        risk_from_baseline_survival(self.s0, lp)
    }
}

const WHITE_FEMALE: Equation = Equation {
    beta: [-29.799, 4.884, 13.540, -3.114, -13.578, 3.149, 2.019, 0.0, 1.957, 0.0, 7.574, -1.665, 0.661],
    mean: -29.18,
    s0: 0.9665,
};

const AFRICAN_AMERICAN_FEMALE: Equation = Equation {
    beta: [17.114, 0.0, 0.940, 0.0, -18.920, 4.475, 29.291, -6.432, 27.820, -6.087, 0.691, 0.0, 0.874],
    mean: 86.61,
    s0: 0.9533,
};

const WHITE_MALE: Equation = Equation {
    beta: [12.344, 0.0, 11.853, -2.664, -7.990, 1.769, 1.797, 0.0, 1.764, 0.0, 7.837, -1.795, 0.658],
    mean: 61.18,
    s0: 0.9144,
};

const AFRICAN_AMERICAN_MALE: Equation = Equation {
    beta: [2.469, 0.0, 0.302, 0.0, -0.307, 0.0, 1.916, 0.0, 1.809, 0.0, 0.549, 0.0, 0.645],
    mean: 19.54,
    s0: 0.8954,
};

/// Equation for a gender/race pair.
///
/// Races other than African-American (and an unknown race) use the white
/// equations, as the guideline recommends.
fn equation(gender: Gender, race: Option<Race>) -> Option<&'static Equation> {
    let african_american = race == Some(Race::AfricanAmerican);
    match (gender, african_american) {
        (Gender::Male, false) => Some(&WHITE_MALE),
        (Gender::Male, true) => Some(&AFRICAN_AMERICAN_MALE),
        (Gender::Female, false) => Some(&WHITE_FEMALE),
        (Gender::Female, true) => Some(&AFRICAN_AMERICAN_FEMALE),
        (Gender::Other, _) => None,
    }
}

fn features(age: f64, tc: f64, hdl: f64, sbp: f64, treated: bool, smoker: bool, diabetic: bool) -> Features {
    let ln_age = age.ln();
    let ln_tc = tc.ln();
    let ln_hdl = hdl.ln();
    let ln_sbp = sbp.ln();
    let (sbp_t, sbp_u) = if treated { (ln_sbp, 0.0) } else { (0.0, ln_sbp) };
    let smoke = if smoker { 1.0 } else { 0.0 };
    let diab = if diabetic { 1.0 } else { 0.0 };

    Features::from([
        ln_age,
        ln_age * ln_age,
        ln_tc,
        ln_age * ln_tc,
        ln_hdl,
        ln_age * ln_hdl,
        sbp_t,
        ln_age * sbp_t,
        sbp_u,
        ln_age * sbp_u,
        smoke,
        ln_age * smoke,
        diab,
    ])
}

/// Hard ASCVD event risk, or `None` if age, gender, total or HDL cholesterol,
/// SBP or smoking status is unknown.
///
/// Unknown treatment and diabetes status are imputed from the reference
/// factors (untreated, non-diabetic).
pub fn pooled_cohort_risk(factors: &RisksFactors) -> Option<f64> {
    let age = factors.age?.clamp(AGE_RANGE.0, AGE_RANGE.1);
    let gender = factors.gender?;
    let tc = factors.cholesterol_mg_dl()?.clamp(CHOLESTEROL_RANGE.0, CHOLESTEROL_RANGE.1);
    let hdl = factors.hdl_mg_dl()?.clamp(HDL_RANGE.0, HDL_RANGE.1);
    let sbp = factors.sbp_mmhg()?.clamp(SBP_RANGE.0, SBP_RANGE.1);
    let smoker = factors.is_smoker?;
    let treated = factors
        .hypertension_treatment
        .unwrap_or(REFERENCE_HYPERTENSION_TREATMENT);
    let diabetic = factors.has_diabetes.unwrap_or(REFERENCE_HAS_DIABETES);

    let profile = Profile {
        age,
        tc,
        hdl,
        sbp,
        treated,
        smoker,
        diabetic,
    };

    match equation(gender, factors.race) {
        Some(eq) => Some(eq.risk(&profile)),
        // No equation for `Other`: average the male and female equations.
        None => {
            let m = equation(Gender::Male, factors.race)?.risk(&profile);
            let f = equation(Gender::Female, factors.race)?.risk(&profile);
            Some(0.5 * (m + f))
        }
    }
}
