//! `gsmdomain` - CLI for GSM home network domain rules
//!
//! This binary lists configured rules, looks up the home domain for a
//! country and network code, and builds SIM permanent identities.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use gsmdomain::cli::{Cli, Command, ConfigCommand, IdentityCommand, ListCommand, LookupCommand};
use gsmdomain::identity::permanent_identity_for;
use gsmdomain::{init_logging, Config, EapMethod, Error};

/// Exit status when a lookup finds no rule.
const EXIT_NO_MATCH: u8 = 2;

/// Exit status for every other failure.
const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(exit_status(&*e))
        }
    }
}

fn exit_status(err: &(dyn std::error::Error + 'static)) -> u8 {
    match err.downcast_ref::<Error>() {
        Some(e) if e.is_no_match() => EXIT_NO_MATCH,
        _ => EXIT_FAILURE,
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // The global config may be the broken file being validated; don't load it first.
    if let Command::Config(ConfigCommand::Validate { file }) = cli.command {
        return handle_validate(file.or(cli.config));
    }

    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::List(list_cmd) => handle_list(&config, &list_cmd),
        Command::Lookup(lookup_cmd) => handle_lookup(&config, &lookup_cmd),
        Command::Identity(identity_cmd) => handle_identity(&config, &identity_cmd),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn handle_list(config: &Config, cmd: &ListCommand) -> Result<(), Box<dyn std::error::Error>> {
    let rules = cmd.extra.merged_with(config);

    if cmd.json {
        let list: Vec<_> = rules.iter().collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    if rules.is_empty() {
        println!("No domain rules configured.");
        return Ok(());
    }
    println!("{:<5} {:<5} DOMAIN", "MCC", "MNC");
    for rule in &rules {
        println!("{:<5} {:<5} {}", rule.mcc, rule.mnc, rule.domain);
    }
    for plmn in rules.duplicates() {
        println!("note: {plmn} appears more than once; only the first rule is used");
    }
    Ok(())
}

fn handle_lookup(config: &Config, cmd: &LookupCommand) -> Result<(), Box<dyn std::error::Error>> {
    let rules = cmd.extra.merged_with(config);
    let rule = rules.lookup(cmd.mcc, cmd.mnc).ok_or(Error::NoMatch {
        mcc: cmd.mcc,
        mnc: cmd.mnc,
    })?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(rule)?);
    } else {
        println!("{}", rule.domain);
    }
    Ok(())
}

fn handle_identity(
    config: &Config,
    cmd: &IdentityCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let rules = cmd.extra.merged_with(config);
    let method = cmd
        .method
        .map_or(config.identity.method, EapMethod::from);

    let identity = permanent_identity_for(
        &cmd.imsi,
        cmd.mnc_length()?,
        &config.identity.three_digit_mnc_mccs,
        method,
        &rules,
    )?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&identity)?);
    } else {
        println!("{identity}");
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Identity]");
                println!("  Method:               {}", config.identity.method);
                println!(
                    "  3-digit MNC countries: {}",
                    config.identity.three_digit_mnc_mccs.len()
                );
                println!();
                println!("[Domains]");
                if config.domains.is_empty() {
                    println!("  (none)");
                }
                for rule in &config.domains {
                    println!("  {} -> {}", rule.plmn(), rule.domain);
                }
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => return handle_validate(file),
    }
    Ok(())
}

fn handle_validate(file: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let path = file.unwrap_or_else(Config::default_config_path);
    println!("Validating configuration: {}", path.display());
    let loaded = Config::load_from(Some(path))?;
    println!(
        "Configuration is valid ({} domain rules).",
        loaded.domains.len()
    );
    Ok(())
}
