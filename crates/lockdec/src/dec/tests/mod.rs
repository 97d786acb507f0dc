mod convert;
mod parse;
mod property;

use crate::dec::Dec;

/// Assert a result lies within `tolerance` of `expected`, comparing
/// through the decimal type itself so the check is exact.
pub(super) fn assert_close(actual: &Dec, expected: &str, tolerance: &str) {
    let expected = Dec::must_from_string(expected);
    let tolerance = Dec::must_from_string(tolerance);
    let difference = actual.sub(&expected).unwrap().abs().unwrap();

    assert!(
        difference.lte(&tolerance),
        "expected {expected} within {tolerance}, got {actual}"
    );
}
