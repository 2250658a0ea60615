//! Command-line interface for gsmdomain.
//!
//! This module provides the CLI structure for the `gsmdomain` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, IdentityCommand, ListCommand, LookupCommand, MethodArg, RuleArgs,
};

use crate::config::Config;
use crate::logging::Verbosity;
use crate::rules::DomainRules;

/// gsmdomain - GSM home network domain rules
///
/// Maps SIM country and network codes to a home network domain and builds
/// the EAP-SIM/AKA permanent identity that uses it.
#[derive(Debug, Parser)]
#[command(name = "gsmdomain")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List domain rules in match order
    List(ListCommand),

    /// Find the home domain for a country and network code
    Lookup(LookupCommand),

    /// Build the permanent identity for an IMSI
    Identity(IdentityCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

impl RuleArgs {
    /// Configured rules followed by the command-line ones.
    #[must_use]
    pub fn merged_with(&self, config: &Config) -> DomainRules {
        let mut rules = config.rules();
        rules.extend(self.rules.iter().cloned());
        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    use crate::rule::DomainRule;

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "gsmdomain");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["gsmdomain", "-q", "-v", "list"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);

        let cli = Cli::try_parse_from(["gsmdomain", "-vv", "list"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_lookup() {
        let cli = Cli::try_parse_from(["gsmdomain", "lookup", "310", "410"]).unwrap();
        let Command::Lookup(cmd) = cli.command else {
            panic!("expected lookup");
        };
        assert_eq!((cmd.mcc, cmd.mnc), (310, 410));
        assert!(cmd.extra.rules.is_empty());
    }

    #[test]
    fn test_parse_lookup_rejects_out_of_range() {
        assert!(Cli::try_parse_from(["gsmdomain", "lookup", "1000", "1"]).is_err());
    }

    #[test]
    fn test_parse_identity_with_rules() {
        let cli = Cli::try_parse_from([
            "gsmdomain",
            "identity",
            "310410123456789",
            "--method",
            "aka-prime",
            "--mnc-len",
            "3",
            "-r",
            "310,410,example.net",
            "--rule",
            "244,91,example.fi",
        ])
        .unwrap();
        let Command::Identity(cmd) = cli.command else {
            panic!("expected identity");
        };
        assert_eq!(cmd.method, Some(MethodArg::AkaPrime));
        assert_eq!(cmd.mnc_len, Some(3));
        assert_eq!(cmd.extra.rules.len(), 2);
        assert_eq!(cmd.extra.rules[1], DomainRule::new(244, 91, "example.fi"));
    }

    #[test]
    fn test_parse_identity_rejects_bad_rule() {
        let result = Cli::try_parse_from([
            "gsmdomain",
            "identity",
            "310410123456789",
            "--rule",
            "310,410,",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_identity_rejects_bad_mnc_len() {
        let result = Cli::try_parse_from([
            "gsmdomain",
            "identity",
            "310410123456789",
            "--mnc-len",
            "4",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_with_config() {
        let cli = Cli::try_parse_from(["gsmdomain", "-c", "/custom/config.toml", "list"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_config_validate() {
        let cli =
            Cli::try_parse_from(["gsmdomain", "config", "validate", "-f", "/tmp/x.toml"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }

    #[test]
    fn test_merged_rules_come_after_config() {
        let mut config = Config::default();
        config.domains = vec![DomainRule::new(310, 410, "configured.example")];
        let extra = RuleArgs {
            rules: vec![
                DomainRule::new(310, 410, "cli.example"),
                DomainRule::new(244, 91, "fi.example"),
            ],
        };

        let rules = extra.merged_with(&config);
        assert_eq!(rules.len(), 3);
        assert_eq!(rules.domain_for(310, 410), Some("configured.example"));
        assert_eq!(rules.domain_for(244, 91), Some("fi.example"));
    }
}
