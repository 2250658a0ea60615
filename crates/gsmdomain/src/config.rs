//! Configuration management for gsmdomain.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::identity::EapMethod;
use crate::imsi::DEFAULT_THREE_DIGIT_MNC_MCCS;
use crate::rule::{DomainRule, MAX_CODE};
use crate::rules::DomainRules;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "gsmdomain";

/// Prefix of environment variables that override the file.
const ENV_PREFIX: &str = "GSMDOMAIN_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `GSMDOMAIN_`)
/// 2. TOML config file at `~/.config/gsmdomain/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Home network domain rules, in match order.
    pub domains: Vec<DomainRule>,
    /// Identity construction settings.
    pub identity: IdentityConfig,
}

/// Identity-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// EAP method used when none is given on the command line.
    pub method: EapMethod,
    /// Country codes whose network codes are three digits long.
    pub three_digit_mnc_mccs: Vec<u16>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            method: EapMethod::default(),
            three_digit_mnc_mccs: DEFAULT_THREE_DIGIT_MNC_MCCS.to_vec(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `GSMDOMAIN_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        debug!(path = %config_file.display(), "Loading configuration");

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        debug!(rules = config.domains.len(), "Configuration loaded");
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// Duplicate country and network code pairs are allowed; the later
    /// entries never match and are reported as warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        for (index, rule) in self.domains.iter().enumerate() {
            rule.validate().map_err(|e| Error::ConfigValidation {
                message: format!("domains[{index}]: {e}"),
            })?;
        }

        if let Some(mcc) = self
            .identity
            .three_digit_mnc_mccs
            .iter()
            .find(|mcc| **mcc > MAX_CODE)
        {
            return Err(Error::ConfigValidation {
                message: format!("three_digit_mnc_mccs entry {mcc} is greater than {MAX_CODE}"),
            });
        }

        for plmn in self.rules().duplicates() {
            warn!(%plmn, "Duplicate domain rule; only the first one is used");
        }

        Ok(())
    }

    /// Build the ordered rule set.
    #[must_use]
    pub fn rules(&self) -> DomainRules {
        DomainRules::from_rules(self.domains.iter().cloned())
    }
}
