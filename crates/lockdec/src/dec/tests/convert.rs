use crate::{dec::Dec, error::DecError};
use num_bigint::BigInt;

fn dec(text: &str) -> Dec {
    Dec::must_from_string(text)
}

#[test]
fn to_i64_requires_exact_representability() {
    assert_eq!(dec("5.000").to_i64().unwrap(), 5);
    assert_eq!(dec("-42").to_i64().unwrap(), -42);
    assert_eq!(
        dec("9223372036854775807").to_i64().unwrap(),
        i64::MAX
    );

    assert!(matches!(
        dec("5.001").to_i64(),
        Err(DecError::NonIntegral { .. })
    ));
    assert!(matches!(
        dec("9223372036854775808").to_i64(),
        Err(DecError::Overflow { .. })
    ));
    assert!(matches!(Dec::nan().to_i64(), Err(DecError::NaN { .. })));
}

#[test]
fn to_u64_additionally_rejects_negatives() {
    assert_eq!(dec("18446744073709551615").to_u64().unwrap(), u64::MAX);
    assert_eq!(dec("0.000").to_u64().unwrap(), 0);

    assert!(matches!(dec("-1").to_u64(), Err(DecError::Overflow { .. })));
    assert!(matches!(
        dec("18446744073709551616").to_u64(),
        Err(DecError::Overflow { .. })
    ));
    assert!(matches!(
        dec("1.5").to_u64(),
        Err(DecError::NonIntegral { .. })
    ));
}

#[test]
fn to_big_int_reduces_first() {
    assert_eq!(dec("5.000").to_big_int().unwrap(), BigInt::from(5));
    assert_eq!(dec("1.23e3").to_big_int().unwrap(), BigInt::from(1230));
    assert_eq!(dec("-7").to_big_int().unwrap(), BigInt::from(-7));

    assert!(matches!(
        dec("1.3").to_big_int(),
        Err(DecError::NonIntegral { .. })
    ));
    // 1.30000 reduces to 1.3 and is still fractional.
    assert!(matches!(
        dec("1.30000").to_big_int(),
        Err(DecError::NonIntegral { .. })
    ));
}

#[test]
fn coeff_folds_the_exponent_into_the_significand() {
    assert_eq!(dec("1.25").coeff().unwrap().to_string(), "1");
    assert_eq!(dec("120.00").coeff().unwrap().to_string(), "120");
    assert_eq!(dec("1.2e3").coeff().unwrap().to_string(), "1200");

    // Sign travels separately from the magnitude.
    let negative = dec("-3.75");
    assert_eq!(negative.coeff().unwrap().to_string(), "3");
    assert!(negative.is_negative());
}

#[test]
fn to_ledger_int_truncates_toward_zero_with_a_256_bit_ceiling() {
    assert_eq!(dec("123.456").to_ledger_int().unwrap().to_string(), "123");
    assert_eq!(dec("-123.456").to_ledger_int().unwrap().to_string(), "-123");

    assert!(matches!(
        dec("1.2e77").to_ledger_int(),
        Err(DecError::Overflow { .. })
    ));
    assert!(matches!(
        Dec::nan().to_ledger_int(),
        Err(DecError::NaN { .. })
    ));
}

#[test]
fn to_legacy_round_trips_through_text() {
    let legacy = dec("1.25").to_legacy().unwrap();
    assert_eq!(legacy.to_string(), "1.250000000000000000");

    let back = Dec::from_legacy(&legacy).unwrap();
    assert_eq!(back, dec("1.25"));

    // The legacy representation's own precision bound applies.
    assert!(matches!(
        dec("0.1234567890123456789").to_legacy(),
        Err(DecError::OutOfRange { .. })
    ));
    assert!(Dec::nan().to_legacy().is_err());
}

#[test]
fn binary_encoding_is_utf8_text() {
    assert_eq!(dec("123.456").encode(), b"123.456".to_vec());
    assert_eq!(Dec::nan().encode(), b"NaN".to_vec());

    assert_eq!(Dec::decode(b"123.456").unwrap(), dec("123.456"));
    assert_eq!(Dec::decode(b"").unwrap(), Dec::zero());
    assert!(!Dec::decode(b"NaN").unwrap().is_finite());
    assert!(Dec::decode(b"bogus").is_err());
}

#[test]
fn json_encoding_wraps_the_canonical_text() {
    assert_eq!(dec("123.456").encode_json().unwrap(), b"\"123.456\"".to_vec());
    assert_eq!(Dec::nan().encode_json().unwrap(), b"\"NaN\"".to_vec());

    assert_eq!(Dec::decode_json(b"\"123.456\"").unwrap(), dec("123.456"));
    assert!(!Dec::decode_json(b"\"NaN\"").unwrap().is_finite());
    assert!(Dec::decode_json(b"123.456").is_err());
}

#[test]
fn size_is_the_encoded_byte_length() {
    assert_eq!(dec("123.456").size(), 7);
    assert_eq!(dec("-0.5").size(), 4);
    assert_eq!(Dec::nan().size(), 3);
}

#[test]
fn serde_round_trip_via_json() {
    for text in ["0", "1.2500", "-987.654", "NaN"] {
        let value = Dec::decode(text.as_bytes()).unwrap();
        let json = serde_json::to_string(&value).unwrap();
        let back: Dec = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_string(), value.to_string(), "serde round trip for {text}");
    }
}
