//! SIM permanent identities.
//!
//! EAP-SIM and EAP-AKA peers identify themselves with a network access
//! identifier built from the IMSI, following 3GPP TS 23.003:
//!
//! ```text
//! <method prefix><IMSI>@wlan.mnc<MNC>.mcc<MCC>.3gppnetwork.org
//! ```
//!
//! When a [`DomainRule`](crate::DomainRule) matches the SIM's MCC and MNC,
//! the realm is replaced by the rule's domain.
//!
//! # Example
//!
//! ```
//! use gsmdomain::identity::{permanent_identity, EapMethod};
//! use gsmdomain::{DomainRule, DomainRules, Imsi};
//!
//! let rules = DomainRules::from_rules([DomainRule::new(310, 410, "example.net")]);
//! let imsi = Imsi::parse("310410123456789", None).unwrap();
//!
//! let identity = permanent_identity(&imsi, EapMethod::Sim, &rules);
//! assert_eq!(identity.to_string(), "1310410123456789@example.net");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::imsi::{Imsi, MncLength};
use crate::rule::Plmn;
use crate::rules::DomainRules;

/// Suffix of every realm derived from the home PLMN.
const THREE_GPP_REALM_SUFFIX: &str = "3gppnetwork.org";

/// EAP method the identity is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EapMethod {
    /// EAP-SIM (RFC 4186).
    #[default]
    Sim,
    /// EAP-AKA (RFC 4187).
    Aka,
    /// EAP-AKA' (RFC 5448).
    AkaPrime,
}

impl EapMethod {
    /// Leading character of a permanent identity for this method.
    #[must_use]
    pub fn permanent_prefix(self) -> char {
        match self {
            Self::Sim => '1',
            Self::Aka => '0',
            Self::AkaPrime => '6',
        }
    }
}

impl fmt::Display for EapMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sim => write!(f, "sim"),
            Self::Aka => write!(f, "aka"),
            Self::AkaPrime => write!(f, "aka-prime"),
        }
    }
}

/// A network access identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User part, before the `@`.
    pub user: String,
    /// Realm, after the `@`.
    pub realm: String,
    /// Whether the realm came from a domain rule.
    pub from_rule: bool,
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user, self.realm)
    }
}

/// Realm derived from the home PLMN.
///
/// The MNC is always written with three digits, padding two digit codes
/// with a leading zero.
#[must_use]
pub fn default_realm(plmn: Plmn) -> String {
    format!(
        "wlan.mnc{:03}.mcc{:03}.{THREE_GPP_REALM_SUFFIX}",
        plmn.mnc, plmn.mcc
    )
}

/// Build the permanent identity for `imsi`, substituting the realm from the
/// first matching rule.
#[must_use]
pub fn permanent_identity(imsi: &Imsi, method: EapMethod, rules: &DomainRules) -> Identity {
    let user = format!("{}{}", method.permanent_prefix(), imsi.as_str());
    let identity = match rules.domain_for(imsi.mcc(), imsi.mnc()) {
        Some(domain) => Identity {
            user,
            realm: domain.to_string(),
            from_rule: true,
        },
        None => Identity {
            user,
            realm: default_realm(imsi.plmn()),
            from_rule: false,
        },
    };
    debug!(
        plmn = %imsi.plmn(),
        mnc_len = %imsi.mnc_len(),
        from_rule = identity.from_rule,
        "Built permanent identity"
    );
    identity
}

/// Replace the domain part of an existing identity.
///
/// Everything after the last `@` is replaced by `domain`.
///
/// # Errors
///
/// Returns [`Error::InvalidIdentity`] if `identity` has no `@` or an empty
/// user part.
pub fn replace_domain(identity: &str, domain: &str) -> Result<String> {
    let Some((user, _)) = identity.rsplit_once('@') else {
        return Err(Error::invalid_identity(identity, "missing '@'"));
    };
    if user.is_empty() {
        return Err(Error::invalid_identity(identity, "empty user part"));
    }
    Ok(format!("{user}@{domain}"))
}

/// Parse `imsi` and build its permanent identity.
///
/// # Errors
///
/// Returns [`Error::InvalidImsi`] if `imsi` does not parse.
pub fn permanent_identity_for(
    imsi: &str,
    mnc_len: Option<MncLength>,
    three_digit_mccs: &[u16],
    method: EapMethod,
    rules: &DomainRules,
) -> Result<Identity> {
    let imsi = Imsi::parse_with(imsi, mnc_len, three_digit_mccs)?;
    Ok(permanent_identity(&imsi, method, rules))
}
