//! Core domain rule types for gsmdomain.
//!
//! A [`DomainRule`] maps a mobile country code and mobile network code pair
//! (a [`Plmn`]) to the home network domain that replaces the realm of a SIM
//! permanent identity when the SIM reports those codes.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest value a three digit MCC or MNC can take.
pub const MAX_CODE: u16 = 999;

/// Maximum length of a domain name in octets.
const MAX_DOMAIN_LEN: usize = 253;

fn label_regex() -> &'static Regex {
    static LABEL: OnceLock<Regex> = OnceLock::new();
    LABEL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$")
            .expect("label pattern is valid")
    })
}

/// A public land mobile network identifier: country code plus network code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Plmn {
    /// Mobile country code.
    pub mcc: u16,
    /// Mobile network code.
    pub mnc: u16,
}

impl Plmn {
    /// Create a new PLMN identifier.
    #[must_use]
    pub fn new(mcc: u16, mnc: u16) -> Self {
        Self { mcc, mnc }
    }
}

impl fmt::Display for Plmn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}-{:02}", self.mcc, self.mnc)
    }
}

/// A GSM home network domain rule.
///
/// When the MCC and MNC read from the SIM card equal `mcc` and `mnc`, the
/// domain part of the permanent identity is replaced with `domain`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DomainRule {
    /// Mobile country code.
    pub mcc: u16,
    /// Mobile network code.
    pub mnc: u16,
    /// Home network domain for this country and network code.
    pub domain: String,
}

impl DomainRule {
    /// Create a new rule. The rule is not validated.
    #[must_use]
    pub fn new(mcc: u16, mnc: u16, domain: impl Into<String>) -> Self {
        Self {
            mcc,
            mnc,
            domain: domain.into(),
        }
    }

    /// The PLMN this rule applies to.
    #[must_use]
    pub fn plmn(&self) -> Plmn {
        Plmn::new(self.mcc, self.mnc)
    }

    /// Check whether this rule applies to the given codes.
    #[must_use]
    pub fn matches(&self, mcc: u16, mnc: u16) -> bool {
        self.mcc == mcc && self.mnc == mnc
    }

    /// Validate code ranges and the domain syntax.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRule`] if either code exceeds 999 or the
    /// domain is not a well-formed host name.
    pub fn validate(&self) -> Result<()> {
        if self.mcc > MAX_CODE {
            return Err(Error::invalid_rule(
                self.to_string(),
                format!("MCC {} is greater than {MAX_CODE}", self.mcc),
            ));
        }
        if self.mnc > MAX_CODE {
            return Err(Error::invalid_rule(
                self.to_string(),
                format!("MNC {} is greater than {MAX_CODE}", self.mnc),
            ));
        }
        validate_domain(&self.domain)
            .map_err(|message| Error::invalid_rule(self.to_string(), message))
    }
}

impl fmt::Display for DomainRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.mcc, self.mnc, self.domain)
    }
}

impl FromStr for DomainRule {
    type Err = Error;

    /// Parse a rule written as `MCC,MNC,DOMAIN`.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, ',').map(str::trim);
        let (Some(mcc), Some(mnc), Some(domain)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::invalid_rule(s, "expected MCC,MNC,DOMAIN"));
        };

        let mcc = parse_code(s, "MCC", mcc)?;
        let mnc = parse_code(s, "MNC", mnc)?;
        let rule = Self::new(mcc, mnc, domain);
        rule.validate()?;
        Ok(rule)
    }
}

fn parse_code(rule: &str, what: &str, value: &str) -> Result<u16> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_rule(
            rule,
            format!("{what} '{value}' is not a decimal number"),
        ));
    }
    value
        .parse()
        .map_err(|_| Error::invalid_rule(rule, format!("{what} '{value}' is out of range")))
}

/// Check that `domain` is a syntactically valid host name.
fn validate_domain(domain: &str) -> std::result::Result<(), String> {
    if domain.is_empty() {
        return Err("domain is empty".to_string());
    }
    if domain.len() > MAX_DOMAIN_LEN {
        return Err(format!("domain is longer than {MAX_DOMAIN_LEN} characters"));
    }
    for label in domain.split('.') {
        if !label_regex().is_match(label) {
            return Err(format!("domain label '{label}' is not a valid host name label"));
        }
    }
    Ok(())
}
