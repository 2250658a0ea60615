//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::identity::EapMethod;
use crate::imsi::MncLength;
use crate::rule::DomainRule;

/// Extra rules given on the command line.
///
/// They are appended after the configured rules, so a configured rule for
/// the same codes still wins.
#[derive(Debug, Clone, Default, Args)]
pub struct RuleArgs {
    /// Additional rule, written as MCC,MNC,DOMAIN (repeatable)
    #[arg(short = 'r', long = "rule", value_name = "MCC,MNC,DOMAIN", value_parser = parse_rule)]
    pub rules: Vec<DomainRule>,
}

fn parse_rule(s: &str) -> Result<DomainRule, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Rules appended after the configured ones
    #[command(flatten)]
    pub extra: RuleArgs,
}

/// Lookup command arguments.
#[derive(Debug, Args)]
pub struct LookupCommand {
    /// Mobile country code
    #[arg(value_parser = clap::value_parser!(u16).range(0..=999))]
    pub mcc: u16,

    /// Mobile network code
    #[arg(value_parser = clap::value_parser!(u16).range(0..=999))]
    pub mnc: u16,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Rules appended after the configured ones
    #[command(flatten)]
    pub extra: RuleArgs,
}

/// Identity command arguments.
#[derive(Debug, Args)]
pub struct IdentityCommand {
    /// IMSI read from the SIM card
    pub imsi: String,

    /// EAP method (defaults to the configured method)
    #[arg(short, long, value_enum)]
    pub method: Option<MethodArg>,

    /// Number of MNC digits, when the SIM reports it
    #[arg(long, value_parser = clap::value_parser!(u8).range(2..=3))]
    pub mnc_len: Option<u8>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Rules appended after the configured ones
    #[command(flatten)]
    pub extra: RuleArgs,
}

impl IdentityCommand {
    /// MNC length requested on the command line, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the length is not 2 or 3; clap already enforces
    /// this for parsed arguments.
    pub fn mnc_length(&self) -> crate::Result<Option<MncLength>> {
        self.mnc_len.map(MncLength::try_from).transpose()
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// EAP method argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    /// EAP-SIM
    Sim,
    /// EAP-AKA
    Aka,
    /// EAP-AKA'
    AkaPrime,
}

impl From<MethodArg> for EapMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Sim => Self::Sim,
            MethodArg::Aka => Self::Aka,
            MethodArg::AkaPrime => Self::AkaPrime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_arg_conversion() {
        assert_eq!(EapMethod::from(MethodArg::Sim), EapMethod::Sim);
        assert_eq!(EapMethod::from(MethodArg::Aka), EapMethod::Aka);
        assert_eq!(EapMethod::from(MethodArg::AkaPrime), EapMethod::AkaPrime);
    }

    #[test]
    fn test_parse_rule_arg() {
        assert_eq!(
            parse_rule("310,410,example.net").unwrap(),
            DomainRule::new(310, 410, "example.net")
        );
        let err = parse_rule("310,example.net").unwrap_err();
        assert!(err.contains("expected MCC,MNC,DOMAIN"));
    }

    #[test]
    fn test_identity_mnc_length() {
        let mut cmd = IdentityCommand {
            imsi: "310410123456789".to_string(),
            method: None,
            mnc_len: None,
            json: false,
            extra: RuleArgs::default(),
        };
        assert_eq!(cmd.mnc_length().unwrap(), None);

        cmd.mnc_len = Some(2);
        assert_eq!(cmd.mnc_length().unwrap(), Some(MncLength::Two));

        cmd.mnc_len = Some(7);
        let err = cmd.mnc_length().unwrap_err();
        assert!(matches!(err, crate::Error::InvalidMncLength { length: 7 }));
        assert!(!err.to_string().contains("configuration"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
