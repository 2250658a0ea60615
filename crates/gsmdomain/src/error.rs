//! Error types for gsmdomain.
//!
//! This module defines all error types used throughout the gsmdomain crate,
//! providing detailed context for debugging and user-friendly error messages.

use thiserror::Error;

/// The main error type for gsmdomain operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Rule Errors ===
    /// A domain rule is malformed or out of range.
    #[error("invalid domain rule '{rule}': {message}")]
    InvalidRule {
        /// The rule as written by the user.
        rule: String,
        /// Description of what is wrong with it.
        message: String,
    },

    /// No rule matched the given country and network codes.
    #[error("no domain rule for MCC {mcc} MNC {mnc}")]
    NoMatch {
        /// Mobile country code that was looked up.
        mcc: u16,
        /// Mobile network code that was looked up.
        mnc: u16,
    },

    // === Identity Errors ===
    /// An IMSI could not be parsed.
    #[error("invalid IMSI '{imsi}': {message}")]
    InvalidImsi {
        /// The offending input.
        imsi: String,
        /// Description of what is wrong with it.
        message: String,
    },

    /// An MNC length other than two or three digits was requested.
    #[error("invalid MNC length {length}: must be 2 or 3")]
    InvalidMncLength {
        /// The requested number of digits.
        length: u8,
    },

    /// A network access identifier could not be rewritten.
    #[error("invalid identity '{identity}': {message}")]
    InvalidIdentity {
        /// The offending identity.
        identity: String,
        /// Description of what is wrong with it.
        message: String,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for gsmdomain operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid rule error.
    #[must_use]
    pub fn invalid_rule(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRule {
            rule: rule.into(),
            message: message.into(),
        }
    }

    /// Create an invalid IMSI error.
    #[must_use]
    pub fn invalid_imsi(imsi: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidImsi {
            imsi: imsi.into(),
            message: message.into(),
        }
    }

    /// Create an invalid identity error.
    #[must_use]
    pub fn invalid_identity(identity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidIdentity {
            identity: identity.into(),
            message: message.into(),
        }
    }

    /// Check if this error is a lookup miss rather than a real failure.
    #[must_use]
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_rule_display() {
        let err = Error::invalid_rule("310,abc,example.net", "MNC is not a number");
        let msg = err.to_string();
        assert!(msg.contains("310,abc,example.net"));
        assert!(msg.contains("MNC is not a number"));
    }

    #[test]
    fn test_no_match_display() {
        let err = Error::NoMatch { mcc: 244, mnc: 91 };
        assert_eq!(err.to_string(), "no domain rule for MCC 244 MNC 91");
    }

    #[test]
    fn test_is_no_match() {
        assert!(Error::NoMatch { mcc: 1, mnc: 1 }.is_no_match());
        assert!(!Error::invalid_imsi("12", "too short").is_no_match());
    }

    #[test]
    fn test_invalid_imsi_display() {
        let err = Error::invalid_imsi("31041x", "contains a non-digit");
        assert_eq!(
            err.to_string(),
            "invalid IMSI '31041x': contains a non-digit"
        );
    }

    #[test]
    fn test_invalid_identity_display() {
        let err = Error::invalid_identity("nouser", "missing '@'");
        assert!(err.to_string().contains("missing '@'"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "rule 2 has an empty domain".to_string(),
        };
        assert!(err.to_string().contains("rule 2 has an empty domain"));
    }

    #[test]
    fn test_invalid_mnc_length_display() {
        let err = Error::InvalidMncLength { length: 4 };
        assert_eq!(err.to_string(), "invalid MNC length 4: must be 2 or 3");
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }
}
