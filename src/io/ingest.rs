//! CSV cohort ingest.
//!
//! Turns a spreadsheet-style CSV (one subject per row) into a list of
//! [`Subject`]s ready for scoring.
//!
//! - Header names are case-insensitive; a few common aliases are accepted
//!   (`hdl`, `smoker`, `diabetes`, `height`, ...).
//! - Empty cells mean *absent*, never zero.
//! - A row with an unparseable value is skipped and reported as a [`RowError`];
//!   the remaining rows are still used.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{Gender, Race, RisksFactors, Subject};
use crate::error::AppError;

/// Recognized columns, in export order, with their accepted aliases.
const COLUMNS: [(&str, &[&str]); 13] = [
    ("id", &["subject", "subject_id"]),
    ("age", &[]),
    ("gender", &["sex"]),
    ("race", &[]),
    ("country", &["country_code"]),
    ("cholesterol", &["total_cholesterol", "tc"]),
    ("cholesterol_hdl", &["hdl"]),
    ("sbp", &["systolic"]),
    ("is_smoker", &["smoker"]),
    ("hypertension_treatment", &["bp_treated", "treated"]),
    ("has_diabetes", &["diabetes", "diabetic"]),
    ("body_height", &["height"]),
    ("body_weight", &["weight"]),
];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub id: Option<String>,
    pub message: String,
}

/// Ingest output: parsed subjects plus everything that was skipped.
#[derive(Debug, Clone)]
pub struct IngestedCohort {
    pub subjects: Vec<Subject>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

impl IngestedCohort {
    pub fn rows_used(&self) -> usize {
        self.subjects.len()
    }
}

/// Load a cohort CSV from disk.
pub fn load_cohort(path: &Path) -> Result<IngestedCohort, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;
    let cohort = read_cohort(file)?;

    tracing::debug!(
        path = %path.display(),
        rows_read = cohort.rows_read,
        rows_used = cohort.rows_used(),
        row_errors = cohort.row_errors.len(),
        "ingested cohort"
    );
    Ok(cohort)
}

/// Parse a cohort CSV from any reader.
pub fn read_cohort<R: Read>(input: R) -> Result<IngestedCohort, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_factor_columns_exist(&header_map)?;

    let mut subjects = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // records() starts on the line after the header; lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    id: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let id = get_optional(&record, &header_map, "id")
            .map(str::to_string)
            .unwrap_or_else(|| format!("row-{line}"));

        match parse_factors(&record, &header_map) {
            Ok(factors) => subjects.push(Subject { id, factors }),
            Err(message) => row_errors.push(RowError {
                line,
                id: Some(id),
                message,
            }),
        }
    }

    if subjects.is_empty() {
        return Err(AppError::new(3, "No valid rows in cohort CSV."));
    }

    Ok(IngestedCohort {
        subjects,
        row_errors,
        rows_read,
    })
}

/// Canonical column names, in the order the export writes them.
pub fn cohort_columns() -> impl Iterator<Item = &'static str> {
    COLUMNS.iter().map(|(name, _)| *name)
}

fn build_header_map(headers: &StringRecord) -> HashMap<&'static str, usize> {
    let mut map = HashMap::new();
    for (idx, raw) in headers.iter().enumerate() {
        let name = normalize_header_name(raw);
        let canonical = COLUMNS
            .iter()
            .find(|(canonical, aliases)| *canonical == name || aliases.contains(&name.as_str()))
            .map(|(canonical, _)| *canonical);
        if let Some(canonical) = canonical {
            // First occurrence wins.
            map.entry(canonical).or_insert(idx);
        }
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Strip the BOM some spreadsheet tools put before the first header.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase().replace([' ', '-'], "_")
}

fn ensure_factor_columns_exist(header_map: &HashMap<&'static str, usize>) -> Result<(), AppError> {
    if header_map.keys().any(|name| *name != "id") {
        return Ok(());
    }
    let expected: Vec<&str> = cohort_columns().skip(1).collect();
    Err(AppError::input(format!(
        "CSV has no recognized factor columns. Expected some of: {}",
        expected.join(", ")
    )))
}

fn parse_factors(record: &StringRecord, header_map: &HashMap<&'static str, usize>) -> Result<RisksFactors, String> {
    let cell = |name: &str| get_optional(record, header_map, name);

    Ok(RisksFactors {
        age: parse_opt(cell("age"), "age", parse_age)?,
        cholesterol: parse_opt(cell("cholesterol"), "cholesterol", parse_f32)?,
        cholesterol_hdl: parse_opt(cell("cholesterol_hdl"), "cholesterol_hdl", parse_f32)?,
        sbp: parse_opt(cell("sbp"), "sbp", parse_f32)?,
        is_smoker: parse_opt(cell("is_smoker"), "is_smoker", parse_bool)?,
        hypertension_treatment: parse_opt(cell("hypertension_treatment"), "hypertension_treatment", parse_bool)?,
        has_diabetes: parse_opt(cell("has_diabetes"), "has_diabetes", parse_bool)?,
        body_height: parse_opt(cell("body_height"), "body_height", parse_f32)?,
        body_weight: parse_opt(cell("body_weight"), "body_weight", parse_f32)?,
        gender: parse_opt(cell("gender"), "gender", parse_gender)?,
        country: cell("country").map(str::to_ascii_uppercase).unwrap_or_default(),
        race: parse_opt(cell("race"), "race", parse_race)?,
    })
}

fn parse_opt<T>(value: Option<&str>, field: &str, parse: fn(&str) -> Option<T>) -> Result<Option<T>, String> {
    match value {
        None => Ok(None),
        Some(s) => parse(s)
            .map(Some)
            .ok_or_else(|| format!("Invalid `{field}` value '{s}'.")),
    }
}

fn parse_age(s: &str) -> Option<i32> {
    s.parse::<i32>()
        .ok()
        .or_else(|| parse_f32(s).filter(|v| v.fract() == 0.0).map(|v| v as i32))
}

fn parse_f32(s: &str) -> Option<f32> {
    let v = s.parse::<f32>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "t" => Some(true),
        "0" | "false" | "no" | "n" | "f" => Some(false),
        _ => None,
    }
}

fn parse_gender(s: &str) -> Option<Gender> {
    match s.to_ascii_lowercase().as_str() {
        "male" | "m" => Some(Gender::Male),
        "female" | "f" => Some(Gender::Female),
        "other" | "o" => Some(Gender::Other),
        _ => None,
    }
}

fn parse_race(s: &str) -> Option<Race> {
    match s.to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
        "white" => Some(Race::White),
        "african_american" | "black" | "aa" => Some(Race::AfricanAmerican),
        "other" => Some(Race::Other),
        _ => None,
    }
}

fn get_optional<'a>(record: &'a StringRecord, header_map: &HashMap<&'static str, usize>, name: &str) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_with_aliases_and_empty_cells() {
        let csv = "\u{feff}ID,Age,Sex,HDL,Cholesterol,SBP,Smoker,Treated,Diabetes,Height,Weight,Country,Race\n\
                   a,55,M,50,200,130,no,0,false,175,80,us,white\n\
                   b,61,female,,,,,,,,,,\n";
        let cohort = read_cohort(csv.as_bytes()).unwrap();
        assert_eq!(cohort.rows_read, 2);
        assert_eq!(cohort.rows_used(), 2);
        assert!(cohort.row_errors.is_empty());

        let a = &cohort.subjects[0];
        assert_eq!(a.id, "a");
        assert_eq!(a.factors.age, Some(55));
        assert_eq!(a.factors.gender, Some(Gender::Male));
        assert_eq!(a.factors.cholesterol_hdl, Some(50.0));
        assert_eq!(a.factors.is_smoker, Some(false));
        assert_eq!(a.factors.country, "US");
        assert_eq!(a.factors.race, Some(Race::White));

        let b = &cohort.subjects[1];
        assert_eq!(b.factors.gender, Some(Gender::Female));
        assert_eq!(b.factors.sbp, None);
        assert_eq!(b.factors.is_smoker, None);
        assert_eq!(b.factors.country, "");
    }

    #[test]
    fn bad_rows_are_reported_and_skipped() {
        let csv = "age,gender,sbp\n50,male,120\nfifty,male,120\n60,robot,130\n";
        let cohort = read_cohort(csv.as_bytes()).unwrap();
        assert_eq!(cohort.rows_used(), 1);
        assert_eq!(cohort.subjects[0].id, "row-2");
        assert_eq!(cohort.row_errors.len(), 2);
        assert_eq!(cohort.row_errors[0].line, 3);
        assert!(cohort.row_errors[0].message.contains("age"));
        assert!(cohort.row_errors[1].message.contains("gender"));
    }

    #[test]
    fn unknown_schema_is_an_input_error() {
        let err = read_cohort("foo,bar\n1,2\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn no_usable_rows_is_exit_code_three() {
        let err = read_cohort("age\nold\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn whole_number_floats_are_accepted_as_ages() {
        assert_eq!(parse_age("47"), Some(47));
        assert_eq!(parse_age("47.0"), Some(47));
        assert_eq!(parse_age("47.5"), None);
    }
}
