mod arith;
mod codec;
mod convert;
mod transcendental;

#[cfg(test)]
mod tests;

use crate::{error::DecError, legacy::LegacyDec};
use num_bigint::BigUint;
use num_traits::Zero;
use std::{cmp::Ordering, fmt, str::FromStr};

///
/// Dec
///
/// Arbitrary-precision decimal value: `(-1)^neg * coeff * 10^exp`, or the
/// explicit not-a-number poison tag.
///
/// Values are immutable. Every operation that "changes" a value produces a
/// new, independently-owned one; no two values ever share the backing
/// storage of their coefficient. Rust's move semantics make the historical
/// shared-handle corruption bug unrepresentable here, but the discipline is
/// still part of the type's contract: operations take `&self` and allocate
/// fresh coefficients for their results.
///
/// Coefficients are not auto-normalized: `1.2500` and `1.25` are equal in
/// value, compare equal, and serialize differently. Use [`Dec::reduce`] to
/// strip trailing coefficient zeros explicitly.
///

#[derive(Clone, Debug)]
pub struct Dec {
    repr: Repr,
}

#[derive(Clone, Debug)]
enum Repr {
    Finite { neg: bool, coeff: BigUint, exp: i64 },
    /// Poison marker. Carries no coefficient semantics; the fields of the
    /// finite variant must never be read through this tag.
    NaN,
}

impl Dec {
    ///
    /// CONSTRUCTORS
    ///

    #[must_use]
    pub fn zero() -> Self {
        Self::from_parts(false, BigUint::zero(), 0)
    }

    #[must_use]
    pub fn one() -> Self {
        Self::from_parts(false, BigUint::from(1u32), 0)
    }

    /// The explicit poison value.
    #[must_use]
    pub const fn nan() -> Self {
        Self { repr: Repr::NaN }
    }

    /// Parse a decimal string.
    ///
    /// The empty string parses as `"0"`. Scientific notation is accepted on
    /// input (never emitted on output). `Infinity`/`Inf` in any case fails
    /// with [`DecError::InfiniteString`]; any other unparseable text fails
    /// with [`DecError::InvalidDecString`]. The literal `NaN` is not
    /// special-cased here — the numeral grammar itself accepts it and
    /// yields the poison value.
    pub fn from_string(text: &str) -> Result<Self, DecError> {
        parse_text(text)
    }

    /// Panicking variant of [`Dec::from_string`] for static initialization
    /// and test fixtures only; unsafe for runtime inputs.
    #[must_use]
    pub fn must_from_string(text: &str) -> Self {
        match Self::from_string(text) {
            Ok(value) => value,
            Err(err) => panic!("must_from_string({text:?}): {err}"),
        }
    }

    #[must_use]
    pub fn from_i64(value: i64) -> Self {
        Self::from_parts(value < 0, BigUint::from(value.unsigned_abs()), 0)
    }

    /// `coeff * 10^exp` from native integers.
    #[must_use]
    pub fn from_finite(coeff: i64, exp: i32) -> Self {
        Self::from_parts(coeff < 0, BigUint::from(coeff.unsigned_abs()), i64::from(exp))
    }

    /// Construct from an unsigned integer via a decimal-string round-trip.
    ///
    /// Fails only if the generated string is unparseable, which cannot
    /// occur for a valid integer; the `Result` mirrors the parse boundary
    /// it rides through.
    pub fn from_u64(value: u64) -> Result<Self, DecError> {
        Self::from_string(&value.to_string())
    }

    /// Round-trip an external legacy fixed-point decimal via its text form.
    pub fn from_legacy(value: &LegacyDec) -> Result<Self, DecError> {
        Self::from_string(&value.to_string())
    }

    /// Parse, then require the value to be non-negative.
    ///
    /// A post-hoc predicate over [`Dec::from_string`]; parse semantics are
    /// untouched.
    pub fn non_negative_from_string(text: &str) -> Result<Self, DecError> {
        let value = Self::from_string(text)?;
        if value.is_negative() {
            return Err(DecError::out_of_range(format!(
                "expected non-negative decimal: {text}"
            )));
        }

        Ok(value)
    }

    /// Parse, then require the value to be strictly positive.
    pub fn positive_from_string(text: &str) -> Result<Self, DecError> {
        let value = Self::from_string(text)?;
        if !value.is_positive() {
            return Err(DecError::out_of_range(format!(
                "expected positive decimal: {text}"
            )));
        }

        Ok(value)
    }

    /// [`Dec::non_negative_from_string`] with a bound on fractional digits.
    pub fn non_negative_fixed_from_string(
        text: &str,
        max_decimal_places: u32,
    ) -> Result<Self, DecError> {
        let value = Self::non_negative_from_string(text)?;
        check_decimal_places(&value, text, max_decimal_places)?;

        Ok(value)
    }

    /// [`Dec::positive_from_string`] with a bound on fractional digits.
    pub fn positive_fixed_from_string(
        text: &str,
        max_decimal_places: u32,
    ) -> Result<Self, DecError> {
        let value = Self::positive_from_string(text)?;
        check_decimal_places(&value, text, max_decimal_places)?;

        Ok(value)
    }

    ///
    /// PREDICATES
    ///

    /// True iff the value is the finite variant.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        matches!(self.repr, Repr::Finite { .. })
    }

    /// False for the poison value: NaN is neither zero, negative, nor
    /// positive.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match &self.repr {
            Repr::Finite { coeff, .. } => coeff.is_zero(),
            Repr::NaN => false,
        }
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        match &self.repr {
            Repr::Finite { neg, coeff, .. } => *neg && !coeff.is_zero(),
            Repr::NaN => false,
        }
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        match &self.repr {
            Repr::Finite { neg, coeff, .. } => !*neg && !coeff.is_zero(),
            Repr::NaN => false,
        }
    }

    /// Count of fractional digits: `0` when the exponent is non-negative,
    /// `-exponent` otherwise.
    #[must_use]
    pub fn num_decimal_places(&self) -> u32 {
        match &self.repr {
            Repr::Finite { exp, .. } if *exp < 0 => {
                u32::try_from(exp.unsigned_abs()).unwrap_or(u32::MAX)
            }
            _ => 0,
        }
    }

    ///
    /// NORMALIZATION
    ///

    /// Strip trailing coefficient zeros into the exponent.
    ///
    /// Returns the reduced value and the count of zeros stripped. The
    /// reduced value is numerically unchanged. Conversions to integer
    /// types reduce first, so `1.30000` becomes `1.3` before it is
    /// rejected as non-integral.
    #[must_use]
    pub fn reduce(&self) -> (Self, usize) {
        match &self.repr {
            Repr::NaN => (Self::nan(), 0),
            Repr::Finite { neg, coeff, exp } => {
                if coeff.is_zero() {
                    return (Self::zero(), 0);
                }

                let ten = BigUint::from(10u32);
                let mut coeff = coeff.clone();
                let mut exp = *exp;
                let mut stripped = 0usize;
                while (&coeff % &ten).is_zero() {
                    coeff /= &ten;
                    exp += 1;
                    stripped += 1;
                }

                (Self::from_parts(*neg, coeff, exp), stripped)
            }
        }
    }

    ///
    /// INTERNALS
    ///

    /// Build a finite value, normalizing the sign of zero.
    pub(crate) fn from_parts(neg: bool, coeff: BigUint, exp: i64) -> Self {
        let neg = neg && !coeff.is_zero();

        Self {
            repr: Repr::Finite { neg, coeff, exp },
        }
    }

    /// Finite decomposition; `None` for the poison value.
    pub(crate) fn parts(&self) -> Option<(bool, &BigUint, i64)> {
        match &self.repr {
            Repr::Finite { neg, coeff, exp } => Some((*neg, coeff, *exp)),
            Repr::NaN => None,
        }
    }
}

impl Default for Dec {
    fn default() -> Self {
        Self::zero()
    }
}

/// Canonical text form: plain fixed-point decimal, never scientific
/// notation; the poison value prints as `NaN`. This is both the wire and
/// the storage format.
impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((neg, coeff, exp)) = self.parts() else {
            return f.write_str("NaN");
        };

        if neg {
            f.write_str("-")?;
        }

        let digits = coeff.to_str_radix(10);
        if exp >= 0 {
            if coeff.is_zero() {
                return f.write_str("0");
            }
            f.write_str(&digits)?;
            for _ in 0..exp {
                f.write_str("0")?;
            }
            return Ok(());
        }

        let point = digits.len() as i64 + exp;
        if point > 0 {
            let (int_part, frac_part) = digits.split_at(usize::try_from(point).unwrap_or(0));
            f.write_str(int_part)?;
            f.write_str(".")?;
            f.write_str(frac_part)
        } else {
            f.write_str("0.")?;
            for _ in 0..-point {
                f.write_str("0")?;
            }
            f.write_str(&digits)
        }
    }
}

impl FromStr for Dec {
    type Err = DecError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::from_string(text)
    }
}

/// Value equality: numerically equal values compare equal regardless of
/// coefficient/exponent representation. The poison value equals only
/// itself. See the `Ord` note on NaN ordering.
impl PartialEq for Dec {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Dec {}

impl PartialOrd for Dec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Total order over values.
///
/// Ordering against the poison value is deliberately non-erroring and its
/// meaning is unspecified for callers: NaN sorts before every finite value
/// and equal to itself, which keeps the order lawful for sorting, but
/// consensus-relevant code must never compare against NaN.
impl Ord for Dec {
    fn cmp(&self, other: &Self) -> Ordering {
        arith::cmp_values(self, other)
    }
}

/// Bound check used by the fixed-decimal-place guarded constructors.
fn check_decimal_places(value: &Dec, text: &str, max: u32) -> Result<(), DecError> {
    if value.num_decimal_places() > max {
        return Err(DecError::out_of_range(format!(
            "expected at most {max} decimal places: {text}"
        )));
    }

    Ok(())
}

/// Decimal numeral grammar.
///
/// Sign, optional integral and fractional digit runs around one optional
/// point, optional `e`/`E` exponent. The grammar also admits the `NaN` and
/// `Infinity` literals; infinity is rejected at this boundary with a
/// dedicated error because no finite value can represent it.
fn parse_text(text: &str) -> Result<Dec, DecError> {
    if text.is_empty() {
        return Ok(Dec::zero());
    }

    let (neg, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    if rest.eq_ignore_ascii_case("inf") || rest.eq_ignore_ascii_case("infinity") {
        return Err(DecError::infinite_string(text));
    }
    if rest.eq_ignore_ascii_case("nan") {
        return Ok(Dec::nan());
    }

    let (mantissa, exp_text) = match rest.find(['e', 'E']) {
        Some(idx) => (&rest[..idx], Some(&rest[idx + 1..])),
        None => (rest, None),
    };

    let mut exp: i64 = 0;
    if let Some(exp_text) = exp_text {
        exp = exp_text
            .parse::<i64>()
            .map_err(|_| DecError::invalid_string(text))?;
    }

    let mut digits = String::with_capacity(mantissa.len());
    let mut frac_len: i64 = 0;
    let mut seen_point = false;
    for ch in mantissa.chars() {
        if ch == '.' {
            if seen_point {
                return Err(DecError::invalid_string(text));
            }
            seen_point = true;
            continue;
        }
        if !ch.is_ascii_digit() {
            return Err(DecError::invalid_string(text));
        }
        digits.push(ch);
        if seen_point {
            frac_len += 1;
        }
    }
    if digits.is_empty() {
        return Err(DecError::invalid_string(text));
    }

    let exp = exp
        .checked_sub(frac_len)
        .ok_or_else(|| DecError::invalid_string(text))?;
    // Exponents beyond the i32 range are not representable inputs; the
    // window checks of the wide context bound computed results separately.
    if i32::try_from(exp).is_err() {
        return Err(DecError::invalid_string(text));
    }
    let coeff = digits
        .parse::<BigUint>()
        .map_err(|_| DecError::invalid_string(text))?;

    Ok(Dec::from_parts(neg, coeff, exp))
}
