//! Persistence codec adapters.
//!
//! The capability interface an external ordered key-value store consumes to
//! persist values without knowing their internal representation. The
//! adapters are pure pass-through wrappers over the serialization layer;
//! they perform no validation of their own.

use crate::{dec::Dec, error::DecError, legacy::LegacyDec};

///
/// ValueCodec
///
/// Narrow store-facing capability: byte and JSON encodings, a display
/// form, and a fixed human-readable type tag the store surfaces for
/// debugging and introspection.
///

pub trait ValueCodec {
    type Value;

    fn encode(&self, value: &Self::Value) -> Result<Vec<u8>, DecError>;
    fn decode(&self, bytes: &[u8]) -> Result<Self::Value, DecError>;
    fn encode_json(&self, value: &Self::Value) -> Result<Vec<u8>, DecError>;
    fn decode_json(&self, bytes: &[u8]) -> Result<Self::Value, DecError>;
    fn stringify(&self, value: &Self::Value) -> String;
    fn value_type(&self) -> &'static str;
}

///
/// DecCodec
///
/// Adapter for the native decimal value: canonical text bytes and the
/// JSON string wrapping.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct DecCodec;

impl ValueCodec for DecCodec {
    type Value = Dec;

    fn encode(&self, value: &Self::Value) -> Result<Vec<u8>, DecError> {
        Ok(value.encode())
    }

    fn decode(&self, bytes: &[u8]) -> Result<Self::Value, DecError> {
        Dec::decode(bytes)
    }

    fn encode_json(&self, value: &Self::Value) -> Result<Vec<u8>, DecError> {
        value.encode_json()
    }

    fn decode_json(&self, bytes: &[u8]) -> Result<Self::Value, DecError> {
        Dec::decode_json(bytes)
    }

    fn stringify(&self, value: &Self::Value) -> String {
        value.to_string()
    }

    fn value_type(&self) -> &'static str {
        "Dec"
    }
}

///
/// LegacyDecCodec
///
/// Adapter for the legacy fixed-point decimal: raw-mantissa wire bytes
/// and the 18-digit text form inside JSON.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct LegacyDecCodec;

impl ValueCodec for LegacyDecCodec {
    type Value = LegacyDec;

    fn encode(&self, value: &Self::Value) -> Result<Vec<u8>, DecError> {
        Ok(value.to_bytes())
    }

    fn decode(&self, bytes: &[u8]) -> Result<Self::Value, DecError> {
        LegacyDec::try_from_bytes(bytes)
    }

    fn encode_json(&self, value: &Self::Value) -> Result<Vec<u8>, DecError> {
        serde_json::to_vec(value).map_err(|err| DecError::invalid_string(err.to_string()))
    }

    fn decode_json(&self, bytes: &[u8]) -> Result<Self::Value, DecError> {
        serde_json::from_slice(bytes).map_err(|err| DecError::invalid_string(err.to_string()))
    }

    fn stringify(&self, value: &Self::Value) -> String {
        value.to_string()
    }

    fn value_type(&self) -> &'static str {
        "LegacyDec"
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dec_codec_round_trips_text_bytes() {
        let codec = DecCodec;
        let value = Dec::must_from_string("123.456");

        let bytes = codec.encode(&value).unwrap();
        assert_eq!(bytes, b"123.456".to_vec());
        assert_eq!(codec.decode(&bytes).unwrap(), value);
        assert_eq!(codec.stringify(&value), "123.456");
        assert_eq!(codec.value_type(), "Dec");
    }

    #[test]
    fn dec_codec_json_wraps_canonical_text() {
        let codec = DecCodec;
        let value = Dec::must_from_string("-0.75");

        let json = codec.encode_json(&value).unwrap();
        assert_eq!(json, b"\"-0.75\"".to_vec());
        assert_eq!(codec.decode_json(&json).unwrap(), value);
    }

    #[test]
    fn dec_codec_decodes_nan_and_empty() {
        let codec = DecCodec;

        assert!(!codec.decode(b"NaN").unwrap().is_finite());
        assert_eq!(codec.decode(b"").unwrap(), Dec::zero());
        assert!(!codec.decode_json(b"\"NaN\"").unwrap().is_finite());
    }

    #[test]
    fn legacy_codec_wire_is_raw_mantissa() {
        let codec = LegacyDecCodec;
        let value: LegacyDec = "1.25".parse().unwrap();

        let bytes = codec.encode(&value).unwrap();
        assert_eq!(bytes, b"1250000000000000000".to_vec());
        assert_eq!(codec.decode(&bytes).unwrap(), value);
        assert_eq!(codec.stringify(&value), "1.250000000000000000");
        assert_eq!(codec.value_type(), "LegacyDec");
    }

    #[test]
    fn legacy_codec_json_round_trip() {
        let codec = LegacyDecCodec;
        let value: LegacyDec = "-2.5".parse().unwrap();

        let json = codec.encode_json(&value).unwrap();
        assert_eq!(json, b"\"-2.500000000000000000\"".to_vec());
        assert_eq!(codec.decode_json(&json).unwrap(), value);
    }
}
