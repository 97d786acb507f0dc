use crate::{dec::Dec, error::DecError};

#[test]
fn empty_string_parses_as_zero() {
    let value = Dec::from_string("").unwrap();
    assert!(value.is_zero());
    assert_eq!(value.to_string(), "0");
}

#[test]
fn plain_fixed_point_round_trips() {
    for text in [
        "0",
        "1",
        "-1",
        "1.25",
        "-0.900000000000000000",
        "123.456",
        "0.00000001",
        "1000000000000000000000000.000000000000000000000001",
    ] {
        let value = Dec::from_string(text).unwrap();
        assert_eq!(value.to_string(), text, "round trip for {text}");
    }
}

#[test]
fn trailing_zeros_are_preserved() {
    let value = Dec::from_string("1.2500").unwrap();
    assert_eq!(value.to_string(), "1.2500");
    assert_eq!(value.num_decimal_places(), 4);

    // Equal in value to the short form, different in representation.
    assert_eq!(value, Dec::from_string("1.25").unwrap());
}

#[test]
fn explicit_plus_sign_and_bare_point_forms() {
    assert_eq!(Dec::from_string("+3").unwrap().to_string(), "3");
    assert_eq!(Dec::from_string(".5").unwrap().to_string(), "0.5");
    assert_eq!(Dec::from_string("5.").unwrap().to_string(), "5");
}

#[test]
fn scientific_notation_is_accepted_on_input_never_emitted() {
    let value = Dec::from_string("1.2e3").unwrap();
    assert_eq!(value.to_string(), "1200");

    let small = Dec::from_string("1.2E-3").unwrap();
    assert_eq!(small.to_string(), "0.0012");

    let large = Dec::from_string("1.2e77").unwrap();
    assert_eq!(large.to_string().len(), 78);
    assert!(large.to_string().starts_with("12"));
    assert!(!large.to_string().contains(['e', 'E']));
}

#[test]
fn unparseable_text_is_invalid() {
    for text in ["abc", "1.2.3", "1e", "--5", "1,5", ".", "e5", "5e+"] {
        assert!(
            matches!(
                Dec::from_string(text),
                Err(DecError::InvalidDecString { .. })
            ),
            "expected invalid for {text}"
        );
    }
}

#[test]
fn infinity_literals_fail_with_dedicated_error() {
    for text in ["Inf", "-Inf", "Infinity", "-infinity", "+INF"] {
        assert!(
            matches!(Dec::from_string(text), Err(DecError::InfiniteString { .. })),
            "expected infinite-string error for {text}"
        );
    }
}

#[test]
fn nan_literal_is_admitted_by_the_grammar() {
    // The parser has no special case for NaN; the numeral grammar accepts
    // the literal and yields the poison value. The decode paths keep their
    // own explicit pre-checks.
    for text in ["NaN", "nan", "-NaN"] {
        let value = Dec::from_string(text).unwrap();
        assert!(!value.is_finite(), "expected poison value for {text}");
        assert_eq!(value.to_string(), "NaN");
    }
}

#[test]
fn oversized_exponents_are_invalid_not_infinite() {
    assert!(matches!(
        Dec::from_string("1e3000000000"),
        Err(DecError::InvalidDecString { .. })
    ));
}

#[test]
fn zero_keeps_its_fractional_exponent_in_text() {
    assert_eq!(Dec::from_string("0.000").unwrap().to_string(), "0.000");
}

#[test]
fn num_decimal_places_counts_negative_exponent_only() {
    assert_eq!(Dec::from_string("1.25").unwrap().num_decimal_places(), 2);
    assert_eq!(Dec::from_string("5").unwrap().num_decimal_places(), 0);
    assert_eq!(Dec::from_string("1e3").unwrap().num_decimal_places(), 0);
    assert_eq!(Dec::nan().num_decimal_places(), 0);
}

#[test]
fn predicates_are_false_for_nan() {
    let nan = Dec::nan();
    assert!(!nan.is_zero());
    assert!(!nan.is_negative());
    assert!(!nan.is_positive());
    assert!(!nan.is_finite());
}

#[test]
fn guarded_constructors_compose_parse_with_predicates() {
    assert!(Dec::non_negative_from_string("0").is_ok());
    assert!(Dec::non_negative_from_string("1.5").is_ok());
    assert!(matches!(
        Dec::non_negative_from_string("-0.1"),
        Err(DecError::OutOfRange { .. })
    ));

    assert!(Dec::positive_from_string("0.1").is_ok());
    assert!(matches!(
        Dec::positive_from_string("0"),
        Err(DecError::OutOfRange { .. })
    ));
    assert!(matches!(
        Dec::positive_from_string("-3"),
        Err(DecError::OutOfRange { .. })
    ));

    assert!(Dec::non_negative_fixed_from_string("1.25", 2).is_ok());
    assert!(matches!(
        Dec::non_negative_fixed_from_string("1.253", 2),
        Err(DecError::OutOfRange { .. })
    ));
    assert!(Dec::positive_fixed_from_string("1.2", 4).is_ok());
    assert!(matches!(
        Dec::positive_fixed_from_string("1.25000", 4),
        Err(DecError::OutOfRange { .. })
    ));
}

#[test]
fn integer_constructors() {
    assert_eq!(Dec::from_i64(-42).to_string(), "-42");
    assert_eq!(Dec::from_i64(i64::MIN).to_string(), "-9223372036854775808");
    assert_eq!(Dec::from_u64(u64::MAX).unwrap().to_string(), "18446744073709551615");
    assert_eq!(Dec::from_finite(125, -2).to_string(), "1.25");
    assert_eq!(Dec::from_finite(-4, 3).to_string(), "-4000");
}

#[test]
#[should_panic(expected = "must_from_string")]
fn must_from_string_panics_on_invalid_input() {
    let _ = Dec::must_from_string("not-a-decimal");
}
