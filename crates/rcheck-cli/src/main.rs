mod cli;
mod cli_utils;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (warn unless RUST_LOG says otherwise)
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rcheck_cli=warn,rcheck_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = config::CliConfig::load_or_default(&args.config);

    match args.command {
        Command::Check {
            chart,
            tier,
            rules,
            json,
            output,
            errors_only,
            parallel,
        } => {
            let options = commands::check::CheckOptions {
                tier: tier.or(config.tier),
                rules: rules.or(config.rules),
                json: json || config.json,
                output,
                errors_only: errors_only || config.errors_only,
                parallel,
            };
            let found_errors = commands::check::run(&chart, &options)?;
            if found_errors {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Rules {
            tier,
            bpm,
            rules,
            json,
        } => commands::rules::run(&tier, bpm, rules.or(config.rules).as_deref(), json),
        Command::Info { chart, json } => commands::info::run(&chart, json),
    }
}
