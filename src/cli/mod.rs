//! Command-line parsing for the claim-probability tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the scoring/table code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::DEFAULT_EXPORT_FILE;
use crate::io::FeatureInput;

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "claims", version, about = "Insurance claim probability scorer")]
pub struct Cli {
    /// Coefficients JSON overriding the built-in model (missing keys keep their defaults).
    #[arg(long, global = true, value_name = "JSON", env = "CLAIMS_COEFFICIENTS")]
    pub coefficients: Option<PathBuf>,

    /// Append log lines to this file (the TUI logs nowhere else).
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict the claim probability of a single policyholder.
    Predict(PredictArgs),
    /// Score every row of a feature CSV, print the table, and optionally export it.
    Score(ScoreArgs),
    /// Print the active model coefficients as JSON.
    Coefficients,
    /// Launch the interactive form + table TUI.
    Tui(TuiArgs),
}

/// The six policyholder features, taken as raw text and validated before scoring.
#[derive(Debug, Args, Clone)]
pub struct FeatureArgs {
    /// Age in years.
    #[arg(long)]
    pub age: String,

    /// Gender code (0 = F, 1 = M).
    #[arg(long)]
    pub gender: String,

    /// Policy tier code (0 = Basic, 1 = Premium, 2 = Gold).
    #[arg(long)]
    pub policy: String,

    /// Vehicle age in years.
    #[arg(long)]
    pub vehicle_age: String,

    /// Number of previous claims.
    #[arg(long)]
    pub previous_claims: String,

    /// Annual premium (currency units).
    #[arg(long)]
    pub annual_premium: String,
}

impl FeatureArgs {
    pub fn to_input(&self) -> FeatureInput {
        FeatureInput {
            age: self.age.clone(),
            gender: self.gender.clone(),
            policy: self.policy.clone(),
            vehicle_age: self.vehicle_age.clone(),
            previous_claims: self.previous_claims.clone(),
            annual_premium: self.annual_premium.clone(),
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub features: FeatureArgs,

    /// Print the prediction as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ScoreArgs {
    /// Feature CSV (columns: age, gender, policy, vehicle_age, previous_claims, annual_premium).
    /// Prompts for a file under the current directory when omitted.
    #[arg(short = 'i', long, value_name = "CSV")]
    pub input: Option<PathBuf>,

    /// Write the scored table to this CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Do not print the table.
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    /// Where `e` writes the table.
    #[arg(long, value_name = "CSV", default_value = DEFAULT_EXPORT_FILE)]
    pub export: PathBuf,
}
