//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - assembles factor sets from flags and JSON profiles
//! - runs single-subject or cohort scoring
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{AssessArgs, BatchArgs, Command, FactorArgs, SampleArgs};
use crate::domain::{AssessConfig, BatchConfig, RisksFactors, SampleConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `cvrisk` binary.
pub fn run() -> Result<(), AppError> {
    // `cvrisk --age 50 ...` behaves like `cvrisk assess --age 50 ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Assess(args) => handle_assess(&args, OutputMode::Assess),
        Command::Bounds(args) => handle_assess(&args, OutputMode::Bounds),
        Command::Batch(args) => handle_batch(&args),
        Command::Sample(args) => handle_sample(&args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Assess,
    Bounds,
}

fn handle_assess(args: &AssessArgs, mode: OutputMode) -> Result<(), AppError> {
    let mut config = assess_config_from_args(args)?;
    if mode == OutputMode::Bounds {
        config.include_bounds = true;
    }

    let run = pipeline::assess(&config.factors, config.include_bounds);
    for w in &run.warnings {
        tracing::warn!(field = w.field, "{}", w.message);
    }

    println!(
        "{}",
        crate::report::format_assessment(&run.factors, &run.risks, run.envelope.as_ref())
    );

    if config.plot {
        let plot = crate::plot::render_risk_by_age(&run.factors, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    if let Some(path) = &config.export_json {
        let report = crate::io::build_report(&run.factors, run.risks, run.envelope.as_ref());
        crate::io::write_report_json(path, &report)?;
    }

    Ok(())
}

fn handle_batch(args: &BatchArgs) -> Result<(), AppError> {
    let config = batch_config_from_args(args);
    let cohort = crate::io::load_cohort(&config.csv_path)?;
    for e in &cohort.row_errors {
        tracing::warn!(line = e.line, id = e.id.as_deref().unwrap_or("-"), "skipped row: {}", e.message);
    }

    let flagged = cohort
        .subjects
        .iter()
        .filter(|s| !crate::domain::validate_factors(&s.factors).is_empty())
        .count();
    if flagged > 0 {
        tracing::warn!(subjects = flagged, "some subjects have implausible factor values");
    }

    let results = pipeline::score_cohort(&cohort.subjects, config.include_bounds);
    let summary = crate::report::summarize_cohort(&cohort.subjects, &results);

    println!("{}", crate::report::format_cohort_summary(&cohort, &summary));
    let top = crate::report::rank_by_overall_risk(&results, config.top_n);
    println!("{}", crate::report::format_ranking(&top));

    if let Some(path) = &config.export_results {
        crate::io::write_results_csv(path, &results)?;
    }

    Ok(())
}

fn handle_sample(args: &SampleArgs) -> Result<(), AppError> {
    let config = sample_config_from_args(args);
    let subjects = crate::data::generate_cohort(&config)?;

    match &config.output {
        Some(path) => crate::io::write_cohort_csv(path, &subjects),
        None => crate::io::write_cohort(std::io::stdout().lock(), &subjects),
    }
}

pub fn assess_config_from_args(args: &AssessArgs) -> Result<AssessConfig, AppError> {
    Ok(AssessConfig {
        factors: factors_from_args(&args.factors)?,
        include_bounds: args.bounds,
        plot: args.plot,
        plot_width: args.plot_width,
        plot_height: args.plot_height,
        export_json: args.json.clone(),
    })
}

pub fn batch_config_from_args(args: &BatchArgs) -> BatchConfig {
    BatchConfig {
        csv_path: args.csv.clone(),
        include_bounds: args.bounds,
        export_results: args.export.clone(),
        top_n: args.top,
    }
}

pub fn sample_config_from_args(args: &SampleArgs) -> SampleConfig {
    SampleConfig {
        sample_count: args.sample_count,
        sample_seed: args.seed,
        age_min: args.age_min,
        age_max: args.age_max,
        missing_rate: args.missing_rate,
        country: args.country.clone(),
        output: args.out.clone(),
    }
}

/// Merge the optional JSON profile with the individual flags (flags win).
pub fn factors_from_args(args: &FactorArgs) -> Result<RisksFactors, AppError> {
    let base = match &args.input {
        Some(path) => crate::io::read_profile_json(path)?,
        None => RisksFactors::default(),
    };

    Ok(RisksFactors {
        age: args.age.or(base.age),
        cholesterol: args.cholesterol.or(base.cholesterol),
        cholesterol_hdl: args.hdl.or(base.cholesterol_hdl),
        sbp: args.sbp.or(base.sbp),
        is_smoker: args.smoker.or(base.is_smoker),
        hypertension_treatment: args.treated.or(base.hypertension_treatment),
        has_diabetes: args.diabetes.or(base.has_diabetes),
        body_height: args.height_cm.or(base.body_height),
        body_weight: args.weight_kg.or(base.body_weight),
        gender: args.gender.or(base.gender),
        country: args
            .country
            .as_deref()
            .map(|c| c.trim().to_ascii_uppercase())
            .unwrap_or(base.country),
        race: args.race.or(base.race),
    })
}

/// Rewrite argv so `cvrisk` defaults to `cvrisk assess`.
///
/// Rules:
/// - `cvrisk`                       -> `cvrisk assess`
/// - `cvrisk --age 50 ...`          -> `cvrisk assess --age 50 ...`
/// - `cvrisk --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("assess".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "assess" | "bounds" | "batch" | "sample");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "assess".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Gender;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rewrite_defaults_to_assess() {
        assert_eq!(rewrite_args(argv(&["cvrisk"])), argv(&["cvrisk", "assess"]));
        assert_eq!(
            rewrite_args(argv(&["cvrisk", "--age", "50"])),
            argv(&["cvrisk", "assess", "--age", "50"])
        );
        assert_eq!(rewrite_args(argv(&["cvrisk", "--help"])), argv(&["cvrisk", "--help"]));
        assert_eq!(
            rewrite_args(argv(&["cvrisk", "batch", "--csv", "x"])),
            argv(&["cvrisk", "batch", "--csv", "x"])
        );
    }

    #[test]
    fn flags_override_profile_fields() {
        let dir = std::env::temp_dir().join(format!("cvrisk-app-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("p.json");
        std::fs::write(&path, r#"{"age": 47, "gender": "female", "sbp": 150, "country": "fr"}"#).unwrap();

        let args = FactorArgs {
            input: Some(path),
            sbp: Some(120.0),
            country: Some(" it ".to_string()),
            ..FactorArgs::default()
        };
        let f = factors_from_args(&args).unwrap();
        assert_eq!(f.age, Some(47));
        assert_eq!(f.gender, Some(Gender::Female));
        assert_eq!(f.sbp, Some(120.0));
        assert_eq!(f.country, "IT");

        std::fs::remove_dir_all(&dir).ok();
    }
}
