//! IMSI parsing.
//!
//! An IMSI is up to 15 decimal digits: a three digit MCC, a two or three
//! digit MNC and the subscriber number (MSIN). The IMSI itself does not say
//! how long the MNC is. The SIM normally reports it; when it does not, the
//! length is guessed from the country, since only a handful of countries
//! allocate three digit network codes.

use std::fmt;

use crate::error::{Error, Result};
use crate::rule::Plmn;

/// Longest IMSI allowed by 3GPP TS 23.003.
const MAX_IMSI_LEN: usize = 15;

/// Shortest IMSI accepted: MCC, two digit MNC and one MSIN digit.
const MIN_IMSI_LEN: usize = 6;

/// Country codes whose operators use three digit MNCs.
pub const DEFAULT_THREE_DIGIT_MNC_MCCS: &[u16] = &[
    302, 310, 311, 312, 313, 314, 315, 316, 334, 338, 342, 344, 346, 348, 354, 356, 358, 360,
    365, 366, 376, 405, 708, 722, 732,
];

/// Number of digits in a mobile network code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MncLength {
    /// Two digit MNC (most of the world).
    Two,
    /// Three digit MNC (North America, parts of the Caribbean and Latin America).
    Three,
}

impl MncLength {
    /// Number of digits.
    #[must_use]
    pub fn digits(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Guess the MNC length for a country code.
    #[must_use]
    pub fn for_mcc(mcc: u16, three_digit_mccs: &[u16]) -> Self {
        if three_digit_mccs.contains(&mcc) {
            Self::Three
        } else {
            Self::Two
        }
    }
}

impl TryFrom<u8> for MncLength {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            length => Err(Error::InvalidMncLength { length }),
        }
    }
}

impl fmt::Display for MncLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digits())
    }
}

/// A parsed IMSI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Imsi {
    digits: String,
    mcc: u16,
    mnc: u16,
    mnc_len: MncLength,
}

impl Imsi {
    /// Parse an IMSI, guessing the MNC length from the built-in country list
    /// unless `mnc_len` is given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidImsi`] if the input is not 6 to 15 decimal digits.
    pub fn parse(text: &str, mnc_len: Option<MncLength>) -> Result<Self> {
        Self::parse_with(text, mnc_len, DEFAULT_THREE_DIGIT_MNC_MCCS)
    }

    /// Parse an IMSI using a custom list of three digit MNC countries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidImsi`] if the input is not 6 to 15 decimal
    /// digits, or leaves no subscriber digits after the MNC.
    pub fn parse_with(
        text: &str,
        mnc_len: Option<MncLength>,
        three_digit_mccs: &[u16],
    ) -> Result<Self> {
        let digits = text.trim();
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_imsi(text, "contains a non-digit"));
        }
        if digits.len() < MIN_IMSI_LEN || digits.len() > MAX_IMSI_LEN {
            return Err(Error::invalid_imsi(
                text,
                format!("must be {MIN_IMSI_LEN} to {MAX_IMSI_LEN} digits"),
            ));
        }

        let mcc = parse_digits(&digits[..3]);
        let mnc_len = mnc_len.unwrap_or_else(|| MncLength::for_mcc(mcc, three_digit_mccs));
        let mnc_end = 3 + mnc_len.digits();
        if digits.len() <= mnc_end {
            return Err(Error::invalid_imsi(
                text,
                format!("no subscriber digits after a {mnc_len} digit MNC"),
            ));
        }
        let mnc = parse_digits(&digits[3..mnc_end]);

        Ok(Self {
            digits: digits.to_string(),
            mcc,
            mnc,
            mnc_len,
        })
    }

    /// Mobile country code.
    #[must_use]
    pub fn mcc(&self) -> u16 {
        self.mcc
    }

    /// Mobile network code.
    #[must_use]
    pub fn mnc(&self) -> u16 {
        self.mnc
    }

    /// Length of the MNC used when splitting the IMSI.
    #[must_use]
    pub fn mnc_len(&self) -> MncLength {
        self.mnc_len
    }

    /// Mobile subscriber identification number.
    #[must_use]
    pub fn msin(&self) -> &str {
        &self.digits[3 + self.mnc_len.digits()..]
    }

    /// Home PLMN of the subscriber.
    #[must_use]
    pub fn plmn(&self) -> Plmn {
        Plmn::new(self.mcc, self.mnc)
    }

    /// The IMSI digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.digits
    }
}

impl fmt::Display for Imsi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

/// Fold a short run of ASCII digits into a number. Callers check the input.
fn parse_digits(digits: &str) -> u16 {
    digits
        .bytes()
        .fold(0, |acc, b| acc * 10 + u16::from(b - b'0'))
}
