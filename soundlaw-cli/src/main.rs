//! `soundlaw` command-line entry point

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use soundlaw_cli::commands::{Commands, GlobalOptions};
use soundlaw_cli::config::CliConfig;

/// Compile and apply historical sound-change rules
#[derive(Debug, Parser)]
#[command(name = "soundlaw", version, about, long_about = None)]
struct Cli {
    /// Phonology tables: embedded code (e.g. eldarin) or TOML file
    #[arg(long, global = true, value_name = "CODE|FILE", env = "SOUNDLAW_PHONOLOGY")]
    phonology: Option<String>,

    /// CLI configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Suppress progress output and logging
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.init_logging();
    log::debug!("Arguments: {:?}", cli);

    let global = GlobalOptions {
        phonology: cli.phonology.clone(),
        config: CliConfig::load(cli.config.as_deref())?,
        quiet: cli.quiet,
    };
    cli.command.execute(&global)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "soundlaw",
            "syllabify",
            "talan",
            "--phonology",
            "telerin",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.phonology.as_deref(), Some("telerin"));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Syllabify(_)));
    }

    #[test]
    fn test_apply_needs_rules() {
        assert!(Cli::try_parse_from(["soundlaw", "apply", "olna"]).is_err());
        assert!(Cli::try_parse_from(["soundlaw", "apply", "-r", "[ln] > [ll]", "olna"]).is_ok());
        assert!(Cli::try_parse_from(["soundlaw", "apply", "--rules", "r.toml", "olna"]).is_ok());
    }
}
