use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fieldscore", version, about = "Living field health scores")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score one or more fields
    Score {
        /// Field ids to score (all demo fields when omitted with --demo)
        fields: Vec<String>,

        /// Print JSON instead of a text report
        #[arg(long)]
        json: bool,

        /// Use canned demo data instead of the farm API
        #[arg(long)]
        demo: bool,

        /// Score against the vegetation capture and calendar for this day
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },
    /// Re-run interactive setup
    Init,
    /// Validate config and test connections
    Check,
}

impl Cli {
    /// Log filter directive for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_score_command() {
        let cli = Cli::parse_from([
            "fieldscore",
            "score",
            "north-40",
            "east-paddy",
            "--json",
            "--date",
            "2026-05-10",
            "-vv",
        ]);
        assert_eq!(cli.log_level(), "trace");
        match cli.command {
            Some(Commands::Score {
                fields, json, demo, date,
            }) => {
                assert_eq!(fields, vec!["north-40", "east-paddy"]);
                assert!(json);
                assert!(!demo);
                assert_eq!(date, NaiveDate::from_ymd_opt(2026, 5, 10));
            }
            _ => panic!("expected score command"),
        }
    }

    #[test]
    fn bad_date_is_rejected() {
        assert!(Cli::try_parse_from(["fieldscore", "score", "f", "--date", "10/05/2026"]).is_err());
    }

    #[test]
    fn default_verbosity_is_warn() {
        let cli = Cli::parse_from(["fieldscore", "check"]);
        assert_eq!(cli.log_level(), "warn");
        assert!(matches!(cli.command, Some(Commands::Check)));
    }
}
