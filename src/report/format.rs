//! Formatted terminal output.
//!
//! Formatting lives here so the engine stays free of presentation concerns and
//! output changes stay localized.

use crate::domain::{HealthRisks, RiskEnvelope, RisksFactors, SubjectRisks};
use crate::io::ingest::IngestedCohort;
use crate::report::CohortSummary;

const NA: &str = "n/a";

/// Format a single assessment: inputs, scores, risks and (optionally) the
/// minimal/maximal envelope side by side.
pub fn format_assessment(factors: &RisksFactors, risks: &HealthRisks, envelope: Option<&RiskEnvelope>) -> String {
    let mut out = String::new();

    out.push_str("=== cvrisk - Cardiovascular Risk Assessment ===\n");
    out.push_str(&format_factors(factors));

    out.push_str("\nPoint scores:\n");
    let s = &risks.scores;
    for (label, value) in [
        ("age", s.age_score),
        ("sbp", s.sbp_score),
        ("smoking", s.smoking_score),
        ("diabetes", s.diabetes_score),
        ("bmi", s.bmi_score),
        ("cholesterol", s.cholesterol_score),
        ("hdl", s.cholesterol_hdl_score),
    ] {
        out.push_str(&format!("  {label:<12} {:>4}\n", fmt_int(value)));
    }
    out.push_str(&format!("  {:<12} {:>4}\n", "total", fmt_int(s.total_score)));

    out.push_str("\n10-year risks:\n");
    let header = match envelope {
        Some(_) => format!("  {:<28} {:>8} {:>8} {:>8}", "", "actual", "minimal", "maximal"),
        None => format!("  {:<28} {:>8}", "", "actual"),
    };
    out.push_str(header.trim_end());
    out.push('\n');

    for (label, pick) in RISK_ROWS {
        let line = match envelope {
            Some(env) => format!(
                "  {label:<28} {:>8} {:>8} {:>8}",
                fmt_pct(pick(risks)),
                fmt_pct(pick(&env.minimal)),
                fmt_pct(pick(&env.maximal)),
            ),
            None => format!("  {label:<28} {:>8}", fmt_pct(pick(risks))),
        };
        out.push_str(&line);
        out.push('\n');
    }

    out.push_str(&format!("\nVascular age: {}", fmt_int(risks.vascular_age)));
    if let (Some(vascular), Some(age)) = (risks.vascular_age, factors.age) {
        let gap = vascular.saturating_sub(age);
        if gap != 0 {
            out.push_str(&format!(" ({gap:+} years)"));
        }
    }
    out.push('\n');

    out
}

type RiskPick = fn(&HealthRisks) -> Option<f32>;

const RISK_ROWS: [(&str, RiskPick); 9] = [
    ("overall CVD", |r| r.cv_diseases.overall_risk),
    ("coronary heart disease", |r| r.cv_diseases.coronary_heart_disease_risk),
    ("stroke", |r| r.cv_diseases.stroke_risk),
    ("heart failure", |r| r.cv_diseases.heart_failure_risk),
    ("peripheral vascular disease", |r| r.cv_diseases.peripheral_vascular_disease_risk),
    ("fatal coronary event", |r| r.hard_and_fatal_events.coronary_death_event_risk),
    ("fatal stroke", |r| r.hard_and_fatal_events.fatal_stroke_event_risk),
    ("total CV mortality", |r| r.hard_and_fatal_events.total_cv_mortality_risk),
    ("hard CV event", |r| r.hard_and_fatal_events.hard_cv_event_risk),
];

fn format_factors(f: &RisksFactors) -> String {
    let country = if f.country.is_empty() { NA } else { f.country.as_str() };
    let mut out = String::new();
    out.push_str(&format!(
        "Subject: age={} gender={} race={} country={}\n",
        fmt_int(f.age),
        f.gender.map_or(NA, |g| g.display_name()),
        f.race.map_or(NA, |r| r.display_name()),
        country,
    ));
    out.push_str(&format!(
        "Lipids: total={} hdl={} mg/dL | SBP={} mmHg treated={}\n",
        fmt_value(f.cholesterol),
        fmt_value(f.cholesterol_hdl),
        fmt_value(f.sbp),
        fmt_flag(f.hypertension_treatment),
    ));
    out.push_str(&format!(
        "Smoker={} diabetes={} | height={} cm weight={} kg bmi={}\n",
        fmt_flag(f.is_smoker),
        fmt_flag(f.has_diabetes),
        fmt_value(f.body_height),
        fmt_value(f.body_weight),
        f.bmi().map_or_else(|| NA.to_string(), |b| format!("{b:.1}")),
    ));
    out
}

/// Format the batch header: ingest counts and cohort aggregates.
pub fn format_cohort_summary(cohort: &IngestedCohort, summary: &CohortSummary) -> String {
    let mut out = String::new();

    out.push_str("=== cvrisk - Cohort Scoring ===\n");
    out.push_str(&format!(
        "Rows: read={} used={} skipped={}\n",
        cohort.rows_read,
        cohort.rows_used(),
        cohort.row_errors.len(),
    ));
    for e in cohort.row_errors.iter().take(10) {
        let id = e.id.as_deref().unwrap_or("-");
        out.push_str(&format!("  line {} ({id}): {}\n", e.line, e.message));
    }
    if cohort.row_errors.len() > 10 {
        out.push_str(&format!("  ... {} more\n", cohort.row_errors.len() - 10));
    }

    out.push_str(&format!(
        "Overall CVD risk: n={} mean={} max={}\n",
        summary.n_with_overall_risk,
        fmt_pct_f64(summary.mean_overall_risk),
        fmt_pct_f64(summary.max_overall_risk),
    ));
    out.push_str(&format!(
        "Hard CV event risk: n={} mean={}\n",
        summary.n_with_hard_event_risk,
        fmt_pct_f64(summary.mean_hard_event_risk),
    ));
    out.push_str(&format!(
        "Mean vascular age gap: {}\n",
        summary
            .mean_vascular_age_gap
            .map_or_else(|| NA.to_string(), |g| format!("{g:+.1} years")),
    ));

    out
}

/// Format a ranking table of scored subjects.
pub fn format_ranking(rows: &[SubjectRisks]) -> String {
    let mut out = String::new();
    out.push_str("Highest overall CVD risk:\n");
    out.push_str(
        format!(
            "{:<20} {:>8} {:>8} {:>8} {:>6} {:>6}",
            "id", "overall", "hard", "cv_mort", "score", "v_age"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(&format!("{:-<20} {:-<8} {:-<8} {:-<8} {:-<6} {:-<6}\n", "", "", "", "", "", ""));

    for r in rows {
        out.push_str(
            format!(
                "{:<20} {:>8} {:>8} {:>8} {:>6} {:>6}",
                truncate(&r.id, 20),
                fmt_pct(r.risks.cv_diseases.overall_risk),
                fmt_pct(r.risks.hard_and_fatal_events.hard_cv_event_risk),
                fmt_pct(r.risks.hard_and_fatal_events.total_cv_mortality_risk),
                fmt_int(r.risks.scores.total_score),
                fmt_int(r.risks.vascular_age),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn fmt_pct(v: Option<f32>) -> String {
    fmt_pct_f64(v.map(f64::from))
}

fn fmt_pct_f64(v: Option<f64>) -> String {
    v.map_or_else(|| NA.to_string(), |v| format!("{:.1}%", v * 100.0))
}

fn fmt_int(v: Option<i32>) -> String {
    v.map_or_else(|| NA.to_string(), |v| v.to_string())
}

fn fmt_value(v: Option<f32>) -> String {
    v.map_or_else(|| NA.to_string(), |v| v.to_string())
}

fn fmt_flag(v: Option<bool>) -> &'static str {
    match v {
        Some(true) => "yes",
        Some(false) => "no",
        None => NA,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Gender;
    use crate::engine::{compute_health_risks, risk_envelope};

    #[test]
    fn assessment_shows_absent_values_as_na() {
        let f = RisksFactors::demographic(50, Gender::Male, "", None);
        let out = format_assessment(&f, &compute_health_risks(&f), None);
        assert!(out.contains("overall CVD"));
        assert!(out.contains("Vascular age: n/a"));
        assert!(out.contains("country=n/a"));
        assert!(!out.contains("maximal"));
    }

    #[test]
    fn assessment_with_envelope_has_three_columns() {
        let f = RisksFactors {
            is_smoker: Some(false),
            ..RisksFactors::demographic(60, Gender::Female, "BE", None)
                .with_sbp(150.0)
                .with_cholesterol(240.0)
                .with_cholesterol_hdl(45.0)
        };
        let env = risk_envelope(&f);
        let out = format_assessment(&f, &env.actual, Some(&env));
        let hard = out.lines().find(|l| l.trim_start().starts_with("hard CV event")).unwrap();
        assert_eq!(hard.split_whitespace().filter(|t| t.ends_with('%')).count(), 3);
    }

    #[test]
    fn vascular_gap_saturates_for_absurd_ages() {
        let f = RisksFactors {
            age: Some(i32::MIN),
            ..RisksFactors::default()
        };
        let risks = HealthRisks {
            vascular_age: Some(20),
            ..HealthRisks::default()
        };
        let out = format_assessment(&f, &risks, None);
        assert!(out.contains(&format!("Vascular age: 20 ({:+} years)", i32::MAX)));
    }

    #[test]
    fn percentages_and_truncation() {
        assert_eq!(fmt_pct(Some(0.1234)), "12.3%");
        assert_eq!(fmt_pct(None), "n/a");
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
