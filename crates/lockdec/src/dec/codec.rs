//! Wire and JSON serialization of [`Dec`].
//!
//! The canonical text form (plain fixed-point, `NaN` for the poison value)
//! is the storage format: the "binary" encoding is its UTF-8 bytes, and the
//! JSON encoding wraps it in a JSON string. Both decode paths special-case
//! the literal `"NaN"` before falling through to ordinary parsing; the
//! string parser itself does not (its grammar happens to accept the
//! literal). That asymmetry mirrors the reference behavior and is kept
//! deliberately.

use super::Dec;
use crate::error::DecError;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::str;

impl Dec {
    /// Canonical binary encoding: the UTF-8 bytes of the text form.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Decode the canonical binary encoding. Empty input is a no-op
    /// yielding the zero value; the exact bytes `NaN` reconstruct the
    /// poison tag.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecError> {
        if bytes.is_empty() {
            return Ok(Self::zero());
        }

        let text = str::from_utf8(bytes)
            .map_err(|_| DecError::invalid_string(String::from_utf8_lossy(bytes)))?;
        if text == "NaN" {
            return Ok(Self::nan());
        }

        Self::from_string(text)
    }

    /// JSON encoding: the canonical text wrapped in a JSON string.
    pub fn encode_json(&self) -> Result<Vec<u8>, DecError> {
        serde_json::to_vec(self).map_err(|err| DecError::invalid_string(err.to_string()))
    }

    /// Decode the JSON encoding, special-casing the literal `"NaN"` string
    /// before ordinary parsing.
    pub fn decode_json(bytes: &[u8]) -> Result<Self, DecError> {
        let text: String = serde_json::from_slice(bytes)
            .map_err(|err| DecError::invalid_string(err.to_string()))?;
        if text == "NaN" {
            return Ok(Self::nan());
        }

        Self::from_string(&text)
    }

    /// Byte length of the binary-encoded form, for callers pre-sizing a
    /// buffer.
    #[must_use]
    pub fn size(&self) -> usize {
        self.encode().len()
    }
}

/// Serde surface: always the canonical decimal string, for every format.
/// The wire format of this type is text by specification, so there is no
/// separate compact binary shape.
impl Serialize for Dec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        if text == "NaN" {
            return Ok(Self::nan());
        }

        Self::from_string(&text).map_err(de::Error::custom)
    }
}
