//! JSON profile input and report output.
//!
//! A profile is a serialized [`RisksFactors`]; any field may be omitted or
//! `null`. A report bundles the factors with the computed risks and a UTC
//! timestamp.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chrono::Utc;

use crate::domain::{HealthRisks, ReportFile, RiskEnvelope, RisksFactors};
use crate::error::AppError;

/// Read a factor profile from a JSON file.
pub fn read_profile_json(path: &Path) -> Result<RisksFactors, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open profile JSON '{}': {e}", path.display())))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| AppError::input(format!("Failed to parse profile JSON '{}': {e}", path.display())))
}

/// Assemble a report for one assessment.
pub fn build_report(factors: &RisksFactors, risks: HealthRisks, envelope: Option<&RiskEnvelope>) -> ReportFile {
    ReportFile {
        tool: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        generated_at: Utc::now(),
        factors: factors.clone(),
        risks,
        minimal: envelope.map(|e| e.minimal),
        maximal: envelope.map(|e| e.maximal),
    }
}

/// Write a report as pretty-printed JSON.
pub fn write_report_json(path: &Path, report: &ReportFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create report JSON '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)
        .map_err(|e| AppError::new(4, format!("Failed to serialize report JSON: {e}")))?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|e| AppError::input(format!("Failed to write report JSON '{}': {e}", path.display())))?;
    tracing::debug!(path = %path.display(), "wrote report json");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Gender;
    use crate::engine::{compute_health_risks, risk_envelope};

    #[test]
    fn report_round_trips_through_json() {
        let factors = RisksFactors::demographic(52, Gender::Female, "NL", None).with_sbp(128.0);
        let env = risk_envelope(&factors);
        let report = build_report(&factors, env.actual, Some(&env));

        let json = serde_json::to_string(&report).unwrap();
        let back: ReportFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.factors, factors);
        assert_eq!(back.risks, compute_health_risks(&factors));
        assert_eq!(back.maximal, Some(env.maximal));
        assert!(back.tool.starts_with("cvrisk"));
    }

    #[test]
    fn profile_tolerates_missing_and_null_fields() {
        let dir = std::env::temp_dir().join(format!("cvrisk-profile-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("profile.json");
        std::fs::write(&path, r#"{"age": 47, "gender": "male", "sbp": null, "is_smoker": true}"#).unwrap();

        let f = read_profile_json(&path).unwrap();
        assert_eq!(f.age, Some(47));
        assert_eq!(f.sbp, None);
        assert_eq!(f.is_smoker, Some(true));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_profile_is_an_input_error() {
        let err = read_profile_json(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
