//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - resolves model coefficients
//! - dispatches to predict / score / coefficients / tui

use clap::Parser;
use rayon::prelude::*;

use crate::cli::{Cli, Command, PredictArgs, ScoreArgs, TuiArgs};
use crate::domain::SessionConfig;
use crate::error::AppError;
use crate::logging::LogTarget;

pub mod session;

pub use session::Session;

/// Entry point for the `claims` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // `claims` and `claims --export x.csv` behave like `claims tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    let log_target = match (&cli.log_file, &cli.command) {
        (Some(path), _) => LogTarget::File(path),
        (None, Command::Tui(_)) => LogTarget::Discard,
        (None, _) => LogTarget::Stderr,
    };
    crate::logging::init(log_target)?;

    let coefficients = crate::io::resolve_coefficients(cli.coefficients.as_deref())?;

    match cli.command {
        Command::Predict(args) => handle_predict(args, SessionConfig { coefficients, ..Default::default() }),
        Command::Score(args) => handle_score(args, SessionConfig { coefficients, ..Default::default() }),
        Command::Coefficients => handle_coefficients(SessionConfig { coefficients, ..Default::default() }),
        Command::Tui(args) => {
            let config = session_config_from_args(&args, coefficients);
            crate::tui::run(config)
        }
    }
}

fn handle_predict(args: PredictArgs, config: SessionConfig) -> Result<(), AppError> {
    let session = Session::new(&config);
    let prediction = session.predict_input(&args.features.to_input())?;

    if args.json {
        let text = serde_json::to_string_pretty(&prediction)
            .map_err(|e| AppError::new(4, format!("Failed to encode prediction JSON: {e}")))?;
        println!("{text}");
    } else {
        println!("{}", crate::report::format_prediction(&prediction));
    }
    Ok(())
}

fn handle_score(args: ScoreArgs, config: SessionConfig) -> Result<(), AppError> {
    let path = match &args.input {
        Some(path) => crate::cli::picker::check_csv_path(path)?,
        None => crate::cli::picker::prompt_for_input_csv()?,
    };

    let ingested = crate::io::load_feature_records(&path)?;
    let mut session = Session::new(&config);

    // Scoring is pure, so rows can be scored in parallel; the table is still
    // filled sequentially in file order.
    let scorer = *session.scorer();
    let probabilities: Vec<f64> = ingested
        .records
        .par_iter()
        .map(|f| scorer.predict_probability(f))
        .collect();
    for (features, probability) in ingested.records.iter().zip(probabilities) {
        session.add_scored(*features, probability);
    }

    if !args.quiet {
        print!("{}", crate::report::format_ingest_summary(&ingested));
        println!();
        print!("{}", crate::report::format_table(session.records()));
    }

    if let Some(export) = &args.export {
        let rows = session.export_to(export)?;
        println!("Wrote {rows} rows to {}", export.display());
    }

    Ok(())
}

fn handle_coefficients(config: SessionConfig) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(&config.coefficients)
        .map_err(|e| AppError::new(4, format!("Failed to encode coefficients JSON: {e}")))?;
    println!("{text}");
    Ok(())
}

pub fn session_config_from_args(args: &TuiArgs, coefficients: crate::models::ModelCoefficients) -> SessionConfig {
    SessionConfig {
        coefficients,
        export_path: args.export.clone(),
    }
}

/// Rewrite argv so `claims` defaults to `claims tui`.
///
/// Rules:
/// - `claims`                      -> `claims tui`
/// - `claims --export x.csv ...`   -> `claims tui --export x.csv ...`
/// - `claims --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "predict" | "score" | "coefficients" | "tui");
    if is_subcommand {
        return argv;
    }

    // A leading flag is treated as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&["claims"])), argv(&["claims", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["claims", "--export", "x.csv"])),
            argv(&["claims", "tui", "--export", "x.csv"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(rewrite_args(argv(&["claims", "score"])), argv(&["claims", "score"]));
        assert_eq!(rewrite_args(argv(&["claims", "--help"])), argv(&["claims", "--help"]));
    }

    #[test]
    fn tui_config_carries_export_path() {
        let args = TuiArgs {
            export: "out/rows.csv".into(),
        };
        let config = session_config_from_args(&args, Default::default());
        assert_eq!(config.export_path, std::path::PathBuf::from("out/rows.csv"));
    }
}
