//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Discover business leads and verify candidate email addresses
#[derive(Parser, Debug)]
#[command(name = "prospector")]
#[command(about = "Discover business leads and verify candidate email addresses", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Search query
    #[arg(short, long, default_value = "tech startups")]
    pub query: String,

    /// Business location appended to the query as "in <location>"
    #[arg(short, long, default_value = "San Francisco")]
    pub location: String,

    /// Number of search results to turn into leads (1-50)
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub results: Option<u32>,

    /// Path to a TOML config file (defaults to the platform config dir)
    #[arg(short, long, env = "PROSPECTOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON export path used when no sheets token is configured
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["prospector"]).unwrap();
        assert_eq!(cli.query, "tech startups");
        assert_eq!(cli.location, "San Francisco");
        assert_eq!(cli.results, None);
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_explicit_arguments() {
        let cli = Cli::try_parse_from([
            "prospector",
            "--query",
            "bakeries",
            "--location",
            "Lyon",
            "--results",
            "12",
            "--output",
            "out/leads.json",
        ])
        .unwrap();
        assert_eq!(cli.query, "bakeries");
        assert_eq!(cli.location, "Lyon");
        assert_eq!(cli.results, Some(12));
        assert_eq!(cli.output, Some(PathBuf::from("out/leads.json")));
    }

    #[test]
    fn test_results_are_bounded() {
        assert!(Cli::try_parse_from(["prospector", "--results", "0"]).is_err());
        assert!(Cli::try_parse_from(["prospector", "--results", "51"]).is_err());
        assert!(Cli::try_parse_from(["prospector", "--results", "50"]).is_ok());
    }
}
