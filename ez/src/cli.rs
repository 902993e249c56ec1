//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::itinerary::TravelStyle;

/// Ezora - AI trip planner for Ezora Tours
#[derive(Parser)]
#[command(
    name = "ez",
    about = "Plan multi-day trips with an AI travel architect",
    version = env!("CARGO_PKG_VERSION"),
    after_help = after_help()
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute; the terminal UI when absent
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate an itinerary without the terminal UI
    Plan {
        /// City the trip starts from
        #[arg(long = "from", value_name = "CITY")]
        origin_city: String,

        /// Where to go
        #[arg(long = "to", value_name = "DESTINATION")]
        destination: String,

        /// Total budget, e.g. "2000 USD"
        #[arg(short, long)]
        budget: String,

        /// Trip length in days
        #[arg(short, long, default_value = "5")]
        days: u32,

        /// Number of travelers
        #[arg(short, long, default_value = "2")]
        travelers: u32,

        /// Travel style (budget, moderate, luxury)
        #[arg(short, long, default_value = "moderate")]
        style: TravelStyle,

        /// Interests and preferences
        #[arg(short, long, default_value = "")]
        interests: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List the popular tours
    Tours {
        /// Only tours in this category
        #[arg(long)]
        category: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ezora")
        .join("logs")
        .join("ezora.log")
}

fn after_help() -> String {
    format!("Logs are written to: {}", get_log_path().display())
}

/// Output format for plan/tours commands
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_command() {
        let cli = Cli::parse_from(["ez"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_parse_plan_defaults() {
        let cli = Cli::parse_from(["ez", "plan", "--from", "New York", "--to", "Paris, France", "-b", "2000 USD"]);
        match cli.command {
            Some(Command::Plan {
                origin_city,
                destination,
                budget,
                days,
                travelers,
                style,
                interests,
                format,
            }) => {
                assert_eq!(origin_city, "New York");
                assert_eq!(destination, "Paris, France");
                assert_eq!(budget, "2000 USD");
                assert_eq!(days, 5);
                assert_eq!(travelers, 2);
                assert_eq!(style, TravelStyle::Moderate);
                assert!(interests.is_empty());
                assert_eq!(format, OutputFormat::Text);
            }
            other => panic!("Expected Plan command, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_parse_plan_all_options() {
        let cli = Cli::parse_from([
            "ez",
            "plan",
            "--from",
            "Berlin",
            "--to",
            "Kyoto",
            "--budget",
            "5000 EUR",
            "--days",
            "10",
            "--travelers",
            "1",
            "--style",
            "Luxury",
            "--interests",
            "temples",
            "--format",
            "json",
        ]);
        assert!(matches!(
            cli.command,
            Some(Command::Plan {
                days: 10,
                travelers: 1,
                style: TravelStyle::Luxury,
                format: OutputFormat::Json,
                ..
            })
        ));
    }

    #[test]
    fn test_cli_plan_rejects_unknown_style() {
        let result = Cli::try_parse_from(["ez", "plan", "--from", "A", "--to", "B", "-b", "1", "--style", "lavish"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_tours_with_global_flags() {
        let cli = Cli::parse_from(["ez", "tours", "--category", "culture", "-l", "debug", "-c", "/tmp/ez.yml"]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/ez.yml")));
        assert!(matches!(
            cli.command,
            Some(Command::Tours { category: Some(ref c), format: OutputFormat::Text }) if c == "culture"
        ));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("plain".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("table".parse::<OutputFormat>().is_err());
    }
}
