use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, PartialEq)]
#[command(name = "rollcall")]
#[command(about = "Rollcall - manage students, course enrollment and grades from the terminal")]
pub struct CliArgs {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Start with empty rosters instead of the configured seed data
    #[arg(long)]
    pub no_seed: bool,

    /// Write logs to this file (default: platform data dir, rollcall.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let args = CliArgs::parse_from(["rollcall"]);
        assert_eq!(args.config, None);
        assert!(!args.no_seed);
    }

    #[test]
    fn test_cli_parse_with_config() {
        let args = CliArgs::parse_from(["rollcall", "--config", "/custom/rollcall.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/rollcall.toml")));
    }

    #[test]
    fn test_cli_parse_no_seed() {
        let args = CliArgs::parse_from(["rollcall", "--no-seed"]);
        assert!(args.no_seed);
    }

    #[test]
    fn test_cli_parse_log_file() {
        let args = CliArgs::parse_from(["rollcall", "--log-file", "/tmp/rollcall.log"]);
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/rollcall.log")));
        assert_eq!(CliArgs::parse_from(["rollcall"]).log_file, None);
    }
}
