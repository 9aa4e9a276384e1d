//! Command-line parsing for the cardiovascular risk calculator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the scoring code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{Gender, Race};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cvrisk", version, about = "Cardiovascular risk scoring (Framingham, Euro-SCORE, Pooled Cohort)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score one subject and print risks, scores and vascular age.
    Assess(AssessArgs),
    /// Print the minimal and maximal achievable risks next to the actual ones.
    ///
    /// Only age, gender, country and race are held fixed; every other factor is
    /// replaced by its best or worst plausible value.
    Bounds(AssessArgs),
    /// Score every row of a cohort CSV.
    Batch(BatchArgs),
    /// Generate a synthetic cohort CSV.
    Sample(SampleArgs),
}

/// Risk factors of one subject.
///
/// Values given as flags override the same fields of `--input`.
#[derive(Debug, Args, Clone, Default)]
pub struct FactorArgs {
    /// JSON profile with any subset of the factor fields.
    #[arg(long, value_name = "JSON")]
    pub input: Option<PathBuf>,

    /// Age in years.
    #[arg(long)]
    pub age: Option<i32>,

    #[arg(long, value_enum)]
    pub gender: Option<Gender>,

    #[arg(long, value_enum)]
    pub race: Option<Race>,

    /// ISO 3166-1 alpha-2 country code (selects the Euro-SCORE region).
    #[arg(long)]
    pub country: Option<String>,

    /// Total cholesterol (mg/dL).
    #[arg(long)]
    pub cholesterol: Option<f32>,

    /// HDL cholesterol (mg/dL).
    #[arg(long)]
    pub hdl: Option<f32>,

    /// Systolic blood pressure (mmHg).
    #[arg(long)]
    pub sbp: Option<f32>,

    #[arg(long, value_name = "BOOL")]
    pub smoker: Option<bool>,

    /// Currently treated for hypertension.
    #[arg(long, value_name = "BOOL")]
    pub treated: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub diabetes: Option<bool>,

    /// Body height (cm).
    #[arg(long = "height-cm")]
    pub height_cm: Option<f32>,

    /// Body weight (kg).
    #[arg(long = "weight-kg")]
    pub weight_kg: Option<f32>,
}

/// Options for single-subject assessment.
#[derive(Debug, Parser, Clone)]
pub struct AssessArgs {
    #[command(flatten)]
    pub factors: FactorArgs,

    /// Also compute the minimal/maximal risk envelope.
    #[arg(long)]
    pub bounds: bool,

    /// Render an ASCII risk-by-age chart.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long = "plot-width", default_value_t = 81)]
    pub plot_width: usize,

    /// Plot height (rows).
    #[arg(long = "plot-height", default_value_t = 20)]
    pub plot_height: usize,

    /// Write the report (factors, risks, bounds) to a JSON file.
    #[arg(long, value_name = "JSON")]
    pub json: Option<PathBuf>,
}

/// Options for cohort scoring.
#[derive(Debug, Parser, Clone)]
pub struct BatchArgs {
    /// Cohort CSV (one subject per row).
    #[arg(long, value_name = "CSV")]
    pub csv: PathBuf,

    /// Also compute min/max bounds per subject.
    #[arg(long)]
    pub bounds: bool,

    /// Export per-subject results to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Show the top-N subjects by overall CVD risk.
    #[arg(long, default_value_t = 20)]
    pub top: usize,
}

/// Options for synthetic cohort generation.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Number of subjects to generate.
    #[arg(short = 'n', long, default_value_t = 100)]
    pub sample_count: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[arg(long = "age-min", default_value_t = 40)]
    pub age_min: i32,

    #[arg(long = "age-max", default_value_t = 79)]
    pub age_max: i32,

    /// Probability of leaving each optional clinical field empty.
    #[arg(long = "missing-rate", default_value_t = 0.0)]
    pub missing_rate: f64,

    /// Country code written on every row.
    #[arg(long, default_value = "")]
    pub country: String,

    /// Output CSV (stdout when omitted).
    #[arg(long, value_name = "CSV")]
    pub out: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_assess_flags() {
        let cli = Cli::try_parse_from([
            "cvrisk", "assess", "--age", "55", "--gender", "male", "--race", "african-american", "--smoker",
            "true", "--sbp", "130", "--height-cm", "175", "--bounds",
        ])
        .unwrap();
        let Command::Assess(args) = cli.command else {
            panic!("expected assess");
        };
        assert_eq!(args.factors.age, Some(55));
        assert_eq!(args.factors.gender, Some(Gender::Male));
        assert_eq!(args.factors.race, Some(Race::AfricanAmerican));
        assert_eq!(args.factors.smoker, Some(true));
        assert_eq!(args.factors.treated, None);
        assert_eq!(args.factors.height_cm, Some(175.0));
        assert!(args.bounds);
        assert!(!args.plot);
    }

    #[test]
    fn batch_requires_csv() {
        assert!(Cli::try_parse_from(["cvrisk", "batch"]).is_err());
        let cli = Cli::try_parse_from(["cvrisk", "batch", "--csv", "c.csv", "--top", "5"]).unwrap();
        assert!(matches!(cli.command, Command::Batch(BatchArgs { top: 5, .. })));
    }
}
