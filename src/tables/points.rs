//! Framingham-style point tables.
//!
//! Each factor maps to an integer point score through a gender-specific bucket
//! table (D'Agostino et al. 2008, general cardiovascular disease; BMI points from
//! the office-based variant of the same study).
//!
//! Lookup rules:
//! - an absent factor (or absent gender) scores as absent, never as zero
//! - numeric values outside the table clamp to the first/last bucket
//! - `Gender::Other` scores as the rounded mean of the male and female points

use crate::domain::{Gender, RisksFactors};
use crate::tables::reference::REFERENCE_HYPERTENSION_TREATMENT;

/// A bucketed point table.
///
/// `bounds[i]` is the exclusive upper bound of bucket `i`; the last bucket is
/// open-ended, so `points.len() == bounds.len() + 1`.
#[derive(Debug, Clone, Copy)]
pub struct PointTable {
    bounds: &'static [f64],
    points: &'static [i32],
}

impl PointTable {
    pub const fn new(bounds: &'static [f64], points: &'static [i32]) -> Self {
        assert!(points.len() == bounds.len() + 1);
        Self { bounds, points }
    }

    pub fn lookup(&self, value: f64) -> i32 {
        let idx = self.bounds.iter().take_while(|&&b| value >= b).count();
        self.points[idx]
    }
}

/// A pair of gender-specific tables.
#[derive(Debug, Clone, Copy)]
pub struct GenderTables {
    pub male: PointTable,
    pub female: PointTable,
}

impl GenderTables {
    pub fn lookup(&self, gender: Gender, value: f64) -> i32 {
        match gender {
            Gender::Male => self.male.lookup(value),
            Gender::Female => self.female.lookup(value),
            Gender::Other => mean_points(self.male.lookup(value), self.female.lookup(value)),
        }
    }
}

fn mean_points(male: i32, female: i32) -> i32 {
    (f64::from(male + female) / 2.0).round() as i32
}

const AGE_BOUNDS: &[f64] = &[35.0, 40.0, 45.0, 50.0, 55.0, 60.0, 65.0, 70.0, 75.0];

pub static AGE_POINTS: GenderTables = GenderTables {
    male: PointTable::new(AGE_BOUNDS, &[0, 2, 5, 6, 8, 10, 11, 12, 14, 15]),
    female: PointTable::new(AGE_BOUNDS, &[0, 2, 4, 5, 7, 8, 9, 10, 11, 12]),
};

const CHOLESTEROL_BOUNDS: &[f64] = &[160.0, 200.0, 240.0, 280.0];

pub static CHOLESTEROL_POINTS: GenderTables = GenderTables {
    male: PointTable::new(CHOLESTEROL_BOUNDS, &[0, 1, 2, 3, 4]),
    female: PointTable::new(CHOLESTEROL_BOUNDS, &[0, 1, 3, 4, 5]),
};

const HDL_BOUNDS: &[f64] = &[35.0, 45.0, 50.0, 60.0];

pub static HDL_POINTS: GenderTables = GenderTables {
    male: PointTable::new(HDL_BOUNDS, &[2, 1, 0, -1, -2]),
    female: PointTable::new(HDL_BOUNDS, &[2, 1, 0, -1, -2]),
};

const SBP_BOUNDS_MALE: &[f64] = &[120.0, 130.0, 140.0, 160.0];
const SBP_BOUNDS_FEMALE: &[f64] = &[120.0, 130.0, 140.0, 150.0, 160.0];

pub static SBP_UNTREATED_POINTS: GenderTables = GenderTables {
    male: PointTable::new(SBP_BOUNDS_MALE, &[-2, 0, 1, 2, 3]),
    female: PointTable::new(SBP_BOUNDS_FEMALE, &[-3, 0, 1, 2, 4, 5]),
};

pub static SBP_TREATED_POINTS: GenderTables = GenderTables {
    male: PointTable::new(SBP_BOUNDS_MALE, &[0, 2, 3, 4, 5]),
    female: PointTable::new(SBP_BOUNDS_FEMALE, &[-1, 2, 3, 5, 6, 7]),
};

const BMI_BOUNDS: &[f64] = &[25.0, 30.0];

pub static BMI_POINTS: GenderTables = GenderTables {
    male: PointTable::new(BMI_BOUNDS, &[0, 1, 2]),
    female: PointTable::new(BMI_BOUNDS, &[0, 1, 2]),
};

/// Points for a positive flag (smoker / diabetic); a negative flag scores 0.
#[derive(Debug, Clone, Copy)]
pub struct FlagPoints {
    pub male: i32,
    pub female: i32,
}

impl FlagPoints {
    pub fn lookup(&self, gender: Gender, flag: bool) -> i32 {
        if !flag {
            return 0;
        }
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
            Gender::Other => mean_points(self.male, self.female),
        }
    }
}

pub static SMOKING_POINTS: FlagPoints = FlagPoints { male: 4, female: 3 };
pub static DIABETES_POINTS: FlagPoints = FlagPoints { male: 3, female: 4 };

/// Scored factor names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Factor {
    Age,
    Sbp,
    Smoking,
    Diabetes,
    Bmi,
    Cholesterol,
    CholesterolHdl,
}

impl Factor {
    pub const ALL: [Factor; 7] = [
        Factor::Age,
        Factor::Sbp,
        Factor::Smoking,
        Factor::Diabetes,
        Factor::Bmi,
        Factor::Cholesterol,
        Factor::CholesterolHdl,
    ];
}

/// Score one factor of a factor set.
///
/// The point tables are stratified by gender only; country and race do not
/// change Framingham points.
pub fn score(factor: Factor, factors: &RisksFactors) -> Option<i32> {
    let gender = factors.gender;
    match factor {
        Factor::Age => score_age(factors.age, gender),
        Factor::Sbp => score_sbp(factors.sbp_mmhg(), factors.hypertension_treatment, gender),
        Factor::Smoking => score_smoking(factors.is_smoker, gender),
        Factor::Diabetes => score_diabetes(factors.has_diabetes, gender),
        Factor::Bmi => score_bmi(factors.bmi(), gender),
        Factor::Cholesterol => score_cholesterol(factors.cholesterol_mg_dl(), gender),
        Factor::CholesterolHdl => score_cholesterol_hdl(factors.hdl_mg_dl(), gender),
    }
}

pub fn score_age(age: Option<i32>, gender: Option<Gender>) -> Option<i32> {
    Some(AGE_POINTS.lookup(gender?, f64::from(age?)))
}

/// SBP points; an unknown treatment status is imputed from the reference
/// (untreated).
pub fn score_sbp(sbp: Option<f64>, treated: Option<bool>, gender: Option<Gender>) -> Option<i32> {
    let (sbp, gender) = (sbp?, gender?);
    let table = if treated.unwrap_or(REFERENCE_HYPERTENSION_TREATMENT) {
        &SBP_TREATED_POINTS
    } else {
        &SBP_UNTREATED_POINTS
    };
    Some(table.lookup(gender, sbp))
}

pub fn score_smoking(is_smoker: Option<bool>, gender: Option<Gender>) -> Option<i32> {
    Some(SMOKING_POINTS.lookup(gender?, is_smoker?))
}

pub fn score_diabetes(has_diabetes: Option<bool>, gender: Option<Gender>) -> Option<i32> {
    Some(DIABETES_POINTS.lookup(gender?, has_diabetes?))
}

pub fn score_bmi(bmi: Option<f64>, gender: Option<Gender>) -> Option<i32> {
    Some(BMI_POINTS.lookup(gender?, bmi?))
}

pub fn score_cholesterol(cholesterol: Option<f64>, gender: Option<Gender>) -> Option<i32> {
    Some(CHOLESTEROL_POINTS.lookup(gender?, cholesterol?))
}

pub fn score_cholesterol_hdl(hdl: Option<f64>, gender: Option<Gender>) -> Option<i32> {
    Some(HDL_POINTS.lookup(gender?, hdl?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_buckets_clamp_at_both_ends() {
        let male = Some(Gender::Male);
        assert_eq!(score_age(Some(-5), male), Some(0));
        assert_eq!(score_age(Some(30), male), Some(0));
        assert_eq!(score_age(Some(55), male), Some(10));
        assert_eq!(score_age(Some(74), male), Some(14));
        assert_eq!(score_age(Some(120), male), Some(15));
    }

    #[test]
    fn treated_sbp_scores_higher_at_same_pressure() {
        let female = Some(Gender::Female);
        for sbp in [100.0, 125.0, 135.0, 145.0, 155.0, 190.0] {
            let untreated = score_sbp(Some(sbp), Some(false), female).unwrap();
            let treated = score_sbp(Some(sbp), Some(true), female).unwrap();
            assert!(treated > untreated, "sbp={sbp}");
        }
    }

    #[test]
    fn unknown_treatment_scores_as_untreated() {
        let male = Some(Gender::Male);
        assert_eq!(
            score_sbp(Some(150.0), None, male),
            score_sbp(Some(150.0), Some(false), male)
        );
    }

    #[test]
    fn absent_inputs_score_absent() {
        assert_eq!(score_smoking(None, Some(Gender::Male)), None);
        assert_eq!(score_smoking(Some(true), None), None);
        assert_eq!(score_bmi(None, Some(Gender::Female)), None);
        assert_eq!(score_cholesterol_hdl(None, Some(Gender::Female)), None);
    }

    #[test]
    fn other_gender_uses_mean_points() {
        // male 4, female 3 -> 3.5 -> 4
        assert_eq!(score_smoking(Some(true), Some(Gender::Other)), Some(4));
        // male 2, female 3 -> 2.5 -> 3
        assert_eq!(score_cholesterol(Some(220.0), Some(Gender::Other)), Some(3));
    }

    #[test]
    fn hdl_points_never_increase_with_hdl() {
        let mut prev = i32::MAX;
        for hdl in (10..120).map(f64::from) {
            let p = score_cholesterol_hdl(Some(hdl), Some(Gender::Male)).unwrap();
            assert!(p <= prev);
            prev = p;
        }
    }
}
