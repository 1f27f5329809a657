//! CLI argument parsing tests.
//!
//! These tests verify that command-line arguments are parsed correctly
//! without reading any chart files.

use std::path::PathBuf;

use clap::Parser;

// Re-create Args structure for testing since it's not publicly exported
#[derive(Parser)]
#[command(name = "rcheck")]
struct Args {
    #[arg(short, long, default_value = "rcheck.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    Check {
        chart: String,
        #[arg(long)]
        tier: Option<String>,
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,
        #[arg(long)]
        json: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        errors_only: bool,
        #[arg(long)]
        parallel: bool,
    },
    Rules {
        #[arg(long)]
        tier: String,
        #[arg(long)]
        bpm: f64,
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    Info {
        chart: String,
        #[arg(long)]
        json: bool,
    },
}

#[test]
fn test_parse_no_subcommand_fails() {
    assert!(Args::try_parse_from(["rcheck"]).is_err());
}

#[test]
fn test_parse_check_defaults() {
    let args = Args::try_parse_from(["rcheck", "check", "song.osu"]).unwrap();
    assert_eq!(args.config, PathBuf::from("rcheck.toml"));
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
            assert_eq!(chart, "song.osu");
            assert!(tier.is_none());
            assert!(rules.is_none());
            assert!(!json);
            assert!(output.is_none());
            assert!(!errors_only);
            assert!(!parallel);
        }
        _ => panic!("Expected Check command"),
    }
}

#[test]
fn test_parse_check_all_flags() {
    let args = Args::try_parse_from([
        "rcheck",
        "--config",
        "custom.toml",
        "check",
        "-",
        "--tier",
        "insane",
        "--rules",
        "rules.json",
        "--json",
        "-o",
        "report.json",
        "--errors-only",
        "--parallel",
    ])
    .unwrap();
    assert_eq!(args.config, PathBuf::from("custom.toml"));
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
            assert_eq!(chart, "-");
            assert_eq!(tier.as_deref(), Some("insane"));
            assert_eq!(rules, Some(PathBuf::from("rules.json")));
            assert!(json);
            assert_eq!(output, Some(PathBuf::from("report.json")));
            assert!(errors_only);
            assert!(parallel);
        }
        _ => panic!("Expected Check command"),
    }
}

#[test]
fn test_parse_check_requires_chart() {
    assert!(Args::try_parse_from(["rcheck", "check"]).is_err());
}

#[test]
fn test_parse_rules() {
    let args =
        Args::try_parse_from(["rcheck", "rules", "--tier", "Hard", "--bpm", "250.5"]).unwrap();
    match args.command {
        Command::Rules {
            tier,
            bpm,
            rules,
            json,
        } => {
            assert_eq!(tier, "Hard");
            assert!((bpm - 250.5).abs() < f64::EPSILON);
            assert!(rules.is_none());
            assert!(!json);
        }
        _ => panic!("Expected Rules command"),
    }
}

#[test]
fn test_parse_rules_requires_bpm() {
    assert!(Args::try_parse_from(["rcheck", "rules", "--tier", "Hard"]).is_err());
}

#[test]
fn test_parse_rules_invalid_bpm() {
    assert!(Args::try_parse_from(["rcheck", "rules", "--tier", "Hard", "--bpm", "fast"]).is_err());
}

#[test]
fn test_parse_info_json() {
    let args = Args::try_parse_from(["rcheck", "info", "chart.osu", "--json"]).unwrap();
    match args.command {
        Command::Info { chart, json } => {
            assert_eq!(chart, "chart.osu");
            assert!(json);
        }
        _ => panic!("Expected Info command"),
    }
}

#[test]
fn test_parse_unknown_subcommand_fails() {
    assert!(Args::try_parse_from(["rcheck", "export"]).is_err());
}
