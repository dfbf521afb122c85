use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "neo",
    about = "Search near-earth object close approaches",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML config file (defaults to ./neo.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// CSV dataset to load, overriding the config
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Search by approach date with optional attribute filters
    Search(SearchArgs),
    /// Show one object and its orbits by name
    Inspect(InspectArgs),
    /// List indexed approach dates with their record counts
    Dates(DatesArgs),
}

#[derive(Args)]
pub struct SearchArgs {
    /// Exact approach date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date, conflicts_with_all = ["start_date", "end_date"])]
    pub date: Option<String>,
    /// First approach date of an inclusive range (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub start_date: Option<String>,
    /// Last approach date of an inclusive range (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub end_date: Option<String>,
    /// Maximum number of results
    #[arg(short = 'n', long)]
    pub number: Option<usize>,
    /// Filters as field:operator:value, e.g. distance:>=:40000
    #[arg(long, num_args = 1..)]
    pub filter: Vec<String>,
    /// NEO or Path
    #[arg(long, default_value = "NEO")]
    pub return_object: String,
    /// display or csv_file
    #[arg(long, default_value = "display")]
    pub output: String,
    /// CSV output target, overriding the config
    #[arg(long)]
    pub output_path: Option<PathBuf>,
}

#[derive(Args)]
pub struct InspectArgs {
    pub name: String,
}

#[derive(Args)]
pub struct DatesArgs {
    #[arg(long, value_parser = parse_date)]
    pub start_date: Option<String>,
    #[arg(long, value_parser = parse_date)]
    pub end_date: Option<String>,
}

/// Accept `YYYY-MM-DD` only, normalized to the index's key form.
fn parse_date(s: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|e| format!("invalid date {s:?} (expected YYYY-MM-DD): {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_search_on_date() {
        let cli = Cli::try_parse_from(["neo", "search", "--date", "2020-01-01"]).unwrap();
        if let Command::Search(args) = cli.command {
            assert_eq!(args.date, Some("2020-01-01".into()));
            assert_eq!(args.return_object, "NEO");
            assert_eq!(args.output, "display");
            assert!(args.number.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_search_range_with_filters() {
        let cli = Cli::try_parse_from([
            "neo", "search",
            "--start-date", "2020-01-01", "--end-date", "2020-01-31",
            "-n", "5",
            "--filter", "distance:>=:40000", "is_hazardous:=:True",
            "--return-object", "Path",
        ]).unwrap();
        if let Command::Search(args) = cli.command {
            assert_eq!(args.start_date, Some("2020-01-01".into()));
            assert_eq!(args.end_date, Some("2020-01-31".into()));
            assert_eq!(args.number, Some(5));
            assert_eq!(args.filter, vec!["distance:>=:40000", "is_hazardous:=:True"]);
            assert_eq!(args.return_object, "Path");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn date_conflicts_with_range() {
        assert!(Cli::try_parse_from([
            "neo", "search", "--date", "2020-01-01", "--start-date", "2020-01-01",
        ]).is_err());
    }

    #[test]
    fn invalid_date_rejected() {
        assert!(Cli::try_parse_from(["neo", "search", "--date", "2020-13-01"]).is_err());
        assert!(Cli::try_parse_from(["neo", "search", "--date", "01/01/2020"]).is_err());
    }

    #[test]
    fn parse_inspect() {
        let cli = Cli::try_parse_from(["neo", "inspect", "433 Eros"]).unwrap();
        if let Command::Inspect(args) = cli.command {
            assert_eq!(args.name, "433 Eros");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from([
            "neo", "--verbose", "-f", "neos.csv", "--config", "neo.toml", "dates",
        ]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.file, Some(PathBuf::from("neos.csv")));
        assert_eq!(cli.config, Some(PathBuf::from("neo.toml")));
        assert!(matches!(cli.command, Command::Dates(_)));
    }
}
