//! Export per-subject results to CSV.
//!
//! One row per subject with every score, risk and the vascular age. Absent
//! values are written as empty cells so spreadsheets never read them as zero.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{HealthRisks, Subject, SubjectRisks};
use crate::error::AppError;
use crate::io::ingest::cohort_columns;

const RISK_COLUMNS: [&str; 9] = [
    "overall_risk",
    "coronary_heart_disease_risk",
    "stroke_risk",
    "heart_failure_risk",
    "peripheral_vascular_disease_risk",
    "coronary_death_event_risk",
    "fatal_stroke_event_risk",
    "total_cv_mortality_risk",
    "hard_cv_event_risk",
];

const SCORE_COLUMNS: [&str; 8] = [
    "age_score",
    "sbp_score",
    "smoking_score",
    "diabetes_score",
    "bmi_score",
    "cholesterol_score",
    "cholesterol_hdl_score",
    "total_score",
];

const BOUND_COLUMNS: [&str; 4] = [
    "min_overall_risk",
    "max_overall_risk",
    "min_hard_cv_event_risk",
    "max_hard_cv_event_risk",
];

/// Write per-subject results to a CSV file.
pub fn write_results_csv(path: &Path, results: &[SubjectRisks]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_results(file, results)?;
    tracing::debug!(path = %path.display(), rows = results.len(), "wrote results csv");
    Ok(())
}

/// Write per-subject results as CSV to any writer.
///
/// Bound columns are included only when at least one subject carries an
/// envelope.
pub fn write_results<W: Write>(output: W, results: &[SubjectRisks]) -> Result<(), AppError> {
    let with_bounds = results.iter().any(|r| r.envelope.is_some());
    let mut writer = csv::Writer::from_writer(output);

    let mut header: Vec<&str> = vec!["id", "vascular_age"];
    header.extend(RISK_COLUMNS);
    header.extend(SCORE_COLUMNS);
    if with_bounds {
        header.extend(BOUND_COLUMNS);
    }
    writer
        .write_record(&header)
        .map_err(|e| AppError::input(format!("Failed to write export CSV header: {e}")))?;

    for r in results {
        let mut row = vec![r.id.clone(), fmt_int(r.risks.vascular_age)];
        row.extend(risk_cells(&r.risks));
        row.extend(score_cells(&r.risks));
        if with_bounds {
            let (min, max) = match &r.envelope {
                Some(env) => (Some(env.minimal), Some(env.maximal)),
                None => (None, None),
            };
            row.push(fmt_prob(min.and_then(|m| m.cv_diseases.overall_risk)));
            row.push(fmt_prob(max.and_then(|m| m.cv_diseases.overall_risk)));
            row.push(fmt_prob(min.and_then(|m| m.hard_and_fatal_events.hard_cv_event_risk)));
            row.push(fmt_prob(max.and_then(|m| m.hard_and_fatal_events.hard_cv_event_risk)));
        }
        writer
            .write_record(&row)
            .map_err(|e| AppError::input(format!("Failed to write export CSV row '{}': {e}", r.id)))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::input(format!("Failed to flush export CSV: {e}")))
}

/// Write a cohort CSV in the schema `load_cohort` reads back.
pub fn write_cohort_csv(path: &Path, subjects: &[Subject]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create cohort CSV '{}': {e}", path.display())))?;
    write_cohort(file, subjects)?;
    tracing::debug!(path = %path.display(), rows = subjects.len(), "wrote cohort csv");
    Ok(())
}

/// Write a cohort as CSV to any writer.
pub fn write_cohort<W: Write>(output: W, subjects: &[Subject]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(output);
    writer
        .write_record(cohort_columns())
        .map_err(|e| AppError::input(format!("Failed to write cohort CSV header: {e}")))?;

    for s in subjects {
        let f = &s.factors;
        let row = [
            s.id.clone(),
            fmt_int(f.age),
            f.gender.map(|g| g.display_name().to_string()).unwrap_or_default(),
            f.race.map(|r| r.display_name().to_string()).unwrap_or_default(),
            f.country.clone(),
            fmt_value(f.cholesterol),
            fmt_value(f.cholesterol_hdl),
            fmt_value(f.sbp),
            fmt_flag(f.is_smoker),
            fmt_flag(f.hypertension_treatment),
            fmt_flag(f.has_diabetes),
            fmt_value(f.body_height),
            fmt_value(f.body_weight),
        ];
        writer
            .write_record(&row)
            .map_err(|e| AppError::input(format!("Failed to write cohort CSV row '{}': {e}", s.id)))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::input(format!("Failed to flush cohort CSV: {e}")))
}

fn risk_cells(risks: &HealthRisks) -> [String; 9] {
    let cvd = &risks.cv_diseases;
    let hard = &risks.hard_and_fatal_events;
    [
        cvd.overall_risk,
        cvd.coronary_heart_disease_risk,
        cvd.stroke_risk,
        cvd.heart_failure_risk,
        cvd.peripheral_vascular_disease_risk,
        hard.coronary_death_event_risk,
        hard.fatal_stroke_event_risk,
        hard.total_cv_mortality_risk,
        hard.hard_cv_event_risk,
    ]
    .map(fmt_prob)
}

fn score_cells(risks: &HealthRisks) -> [String; 8] {
    let s = &risks.scores;
    [
        s.age_score,
        s.sbp_score,
        s.smoking_score,
        s.diabetes_score,
        s.bmi_score,
        s.cholesterol_score,
        s.cholesterol_hdl_score,
        s.total_score,
    ]
    .map(fmt_int)
}

fn fmt_prob(v: Option<f32>) -> String {
    v.map(|v| format!("{v:.6}")).unwrap_or_default()
}

fn fmt_value(v: Option<f32>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

fn fmt_flag(v: Option<bool>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

fn fmt_int(v: Option<i32>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}
