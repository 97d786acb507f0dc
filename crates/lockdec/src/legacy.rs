//! The external legacy fixed-point decimal and the bounded ledger integer.
//!
//! [`LegacyDec`] is the lower-precision decimal representation the rest of
//! the ledger persists: a signed fixed-point number with exactly 18
//! fractional digits, stored as a scaled arbitrary-precision mantissa
//! (value = mantissa / 10^18). [`LedgerInt`] is the 256-bit-bounded integer
//! type that truncating conversions bridge into.

use crate::{context, error::DecError};
use derive_more::{Deref, Display};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{fmt, str, str::FromStr};

///
/// LegacyDec
///
/// Fixed-point with 18 fractional digits. Stores numbers as a scaled
/// mantissa (e.g. `1.25` → `1_250_000_000_000_000_000`); the text form
/// always prints all 18 fractional digits, and the wire form is the
/// decimal string of the raw mantissa.
///

#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct LegacyDec(BigInt);

impl LegacyDec {
    /// Fractional digits carried by every value.
    pub const DECIMAL_PLACES: u32 = 18;

    /// Bit-length ceiling on the scaled mantissa.
    pub const MAX_MANTISSA_BITS: u64 = 316;

    ///
    /// CONSTRUCTORS
    ///

    /// Construct from a raw scaled mantissa (no scaling applied).
    pub fn from_atomic(mantissa: BigInt) -> Result<Self, DecError> {
        if mantissa.magnitude().bits() > Self::MAX_MANTISSA_BITS {
            return Err(DecError::out_of_range(format!(
                "legacy decimal mantissa exceeds {} bits: {mantissa}",
                Self::MAX_MANTISSA_BITS
            )));
        }

        Ok(Self(mantissa))
    }

    /// Construct from whole units, scaling by 10^18.
    pub fn from_units(units: i64) -> Result<Self, DecError> {
        Self::from_atomic(BigInt::from(units) * scale_int())
    }

    ///
    /// ACCESSORS
    ///

    #[must_use]
    pub const fn mantissa(&self) -> &BigInt {
        &self.0
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    ///
    /// WIRE FORM
    ///

    /// Wire encoding: the decimal string of the raw scaled mantissa.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_string().into_bytes()
    }

    /// Decode the wire encoding. Empty input yields the zero value.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, DecError> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }

        let text = str::from_utf8(bytes)
            .map_err(|_| DecError::invalid_string(String::from_utf8_lossy(bytes)))?;
        let mantissa = text
            .parse::<BigInt>()
            .map_err(|_| DecError::invalid_string(text))?;

        Self::from_atomic(mantissa)
    }
}

/// Text form: sign, integer part, then all 18 fractional digits.
impl fmt::Display for LegacyDec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }

        let magnitude = self.0.magnitude();
        let scale = scale_uint();
        let int_part = magnitude / &scale;
        let frac_part = magnitude % &scale;

        let frac_digits = frac_part.to_str_radix(10);
        let leading_zeros = Self::DECIMAL_PLACES as usize - frac_digits.len();
        write!(f, "{int_part}.{}{frac_digits}", "0".repeat(leading_zeros))
    }
}

/// Parse fixed-point text with at most 18 fractional digits.
impl FromStr for LegacyDec {
    type Err = DecError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (neg, rest) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        if rest.is_empty() {
            return Err(DecError::invalid_string(text));
        }

        let (int_text, frac_text) = match rest.find('.') {
            Some(idx) => (&rest[..idx], &rest[idx + 1..]),
            None => (rest, ""),
        };
        if int_text.is_empty() && frac_text.is_empty() {
            return Err(DecError::invalid_string(text));
        }
        if !int_text.chars().all(|ch| ch.is_ascii_digit())
            || !frac_text.chars().all(|ch| ch.is_ascii_digit())
        {
            return Err(DecError::invalid_string(text));
        }

        let places = u32::try_from(frac_text.len()).unwrap_or(u32::MAX);
        if places > Self::DECIMAL_PLACES {
            return Err(DecError::out_of_range(format!(
                "legacy decimal accepts at most {} decimal places: {text}",
                Self::DECIMAL_PLACES
            )));
        }

        let int_part = if int_text.is_empty() {
            BigUint::zero()
        } else {
            int_text
                .parse::<BigUint>()
                .map_err(|_| DecError::invalid_string(text))?
        };
        let frac_part = if frac_text.is_empty() {
            BigUint::zero()
        } else {
            frac_text
                .parse::<BigUint>()
                .map_err(|_| DecError::invalid_string(text))?
        };

        let magnitude = int_part * scale_uint()
            + frac_part * context::pow10(u64::from(Self::DECIMAL_PLACES - places));
        let mantissa = if neg {
            -BigInt::from(magnitude)
        } else {
            BigInt::from(magnitude)
        };

        Self::from_atomic(mantissa)
    }
}

/// Serde surface: the 18-digit text form as a string, for every format.
impl Serialize for LegacyDec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for LegacyDec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;

        text.parse().map_err(de::Error::custom)
    }
}

///
/// LedgerInt
///
/// Arbitrary-precision signed integer bounded to a 256-bit magnitude; the
/// bridge target for truncating decimal-to-integer conversions.
///

#[derive(Clone, Debug, Default, Deref, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct LedgerInt(BigInt);

impl LedgerInt {
    /// Bit-length ceiling on the magnitude.
    pub const MAX_BITS: u64 = 256;

    /// Construct with the 256-bit magnitude bound enforced.
    pub fn try_new(value: BigInt) -> Result<Self, DecError> {
        if value.magnitude().bits() > Self::MAX_BITS {
            return Err(DecError::overflow(format!(
                "ledger integer exceeds {} bits: {value}",
                Self::MAX_BITS
            )));
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn into_inner(self) -> BigInt {
        self.0
    }
}

fn scale_uint() -> BigUint {
    context::pow10(u64::from(LegacyDec::DECIMAL_PLACES))
}

fn scale_int() -> BigInt {
    BigInt::from(scale_uint())
}

///
/// TESTS
///
