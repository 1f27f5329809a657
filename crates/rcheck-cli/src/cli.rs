//! CLI argument definitions for rcheck.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rcheck")]
#[command(about = "Ranking criteria checker for key charts", version)]
pub struct Args {
    /// Path to config file
    #[arg(short, long, default_value = "rcheck.toml", env = "RCHECK_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check a chart against its tier's rules
    Check {
        /// Chart file path, or "-" for stdin
        chart: String,
        /// Override the detected tier (Easy, Normal, Hard, Insane, Expert)
        #[arg(long)]
        tier: Option<String>,
        /// Rule catalog JSON replacing the built-in rules
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Only report error-severity violations
        #[arg(long)]
        errors_only: bool,
        /// Run checks on worker threads
        #[arg(long)]
        parallel: bool,
    },
    /// Show a tier's rules scaled to a tempo
    Rules {
        /// Tier name
        #[arg(long)]
        tier: String,
        /// Tempo in beats per minute
        #[arg(long)]
        bpm: f64,
        /// Rule catalog JSON replacing the built-in rules
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show what was read from a chart file
    Info {
        /// Chart file path, or "-" for stdin
        chart: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
