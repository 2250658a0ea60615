//! `gsmdomain` - GSM home network domain rules
//!
//! This library maps the mobile country and network codes read from a SIM
//! card to a home network domain, and uses that domain as the realm of the
//! EAP-SIM/AKA permanent identity.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod identity;
pub mod imsi;
pub mod logging;
pub mod rule;
pub mod rules;

pub use config::Config;
pub use error::{Error, Result};
pub use identity::{permanent_identity, EapMethod, Identity};
pub use imsi::{Imsi, MncLength};
pub use logging::init_logging;
pub use rule::{DomainRule, Plmn};
pub use rules::DomainRules;
