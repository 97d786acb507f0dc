//! Transcendental operations over [`Dec`].
//!
//! Everything here runs over scaled `BigInt` working values — plain decimal
//! fixed-point at 50 digits (34 wide-context digits plus 16 guard digits)
//! with truncating division throughout, then rounds into the wide context.
//! The series are fixed-shape (terms accumulate until they truncate to
//! zero at the working scale), so results are bit-identical on every
//! platform. No floating point is used anywhere: platform libm results are
//! not byte-identical across nodes and would fork the state machine.

use super::{
    Dec,
    arith::{finish_wide, finite1, finite2, op_context, split_signed, unsigned},
};
use crate::{context, error::DecError};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, ToPrimitive, Zero};

/// Working scale: every fixed-point working value is an integer scaled by
/// `10^WORK_DIGITS`.
const WORK_DIGITS: i64 = 50;

/// Arguments at or beyond this magnitude make `exp` leave the wide
/// context's exponent window (`ln(10^100_000)` is just under 230_259).
const EXP_ARG_LIMIT: i64 = 230_259;

///
/// OPERATIONS
///

pub(super) fn sqrt(x: &Dec) -> Result<Dec, DecError> {
    let (neg, coeff, exp) = finite1("sqrt", x)?;
    if coeff.is_zero() {
        return Ok(Dec::zero());
    }
    if neg {
        return Err(DecError::nan_result(format!(
            "square root of negative value: {}",
            op_context("sqrt", x, None)
        )));
    }

    let (reduced, reduced_exp) = reduced_parts(coeff, exp);
    let ideal = exp.div_euclid(2);

    // Exact perfect squares keep their exact root, re-expressed toward the
    // ideal exponent floor(exp/2): sqrt(4.00) is 2.0, sqrt(400) is 20.
    if reduced_exp.rem_euclid(2) == 0 {
        let root = isqrt(&reduced);
        if &root * &root == reduced {
            let ten = BigUint::from(10u32);
            let mut root = root;
            let mut root_exp = reduced_exp / 2;
            while root_exp > ideal && context::digit_count(&root) < 34 {
                root *= &ten;
                root_exp -= 1;
            }
            return finish_wide("sqrt", x, None, false, root, root_exp).map(|(value, _)| value);
        }
    }

    // General case: x = w * 10^(2t) with w = reduced or reduced*10, then
    // sqrt(x) = isqrt(w * 10^(2*WORK_DIGITS)) * 10^(t - WORK_DIGITS).
    // Truncation composes with the integer square root, so the final
    // round-toward-zero stays correct.
    let t = reduced_exp.div_euclid(2);
    let w = if reduced_exp - 2 * t == 1 {
        &reduced * &BigUint::from(10u32)
    } else {
        reduced
    };
    let root = isqrt(&(w * context::pow10(unsigned(2 * WORK_DIGITS))));

    finish_wide("sqrt", x, None, false, root, t - WORK_DIGITS).map(|(value, _)| value)
}

pub(super) fn ln(x: &Dec) -> Result<Dec, DecError> {
    let (neg, coeff, exp) = finite1("ln", x)?;
    if neg || coeff.is_zero() {
        return Err(DecError::nan_result(format!(
            "logarithm of non-positive value: {}",
            op_context("ln", x, None)
        )));
    }

    let value = ln_parts(coeff, exp);
    fixed_to_dec("ln", x, None, value, 0)
}

pub(super) fn log10(x: &Dec) -> Result<Dec, DecError> {
    let (neg, coeff, exp) = finite1("log10", x)?;
    if neg || coeff.is_zero() {
        return Err(DecError::nan_result(format!(
            "logarithm of non-positive value: {}",
            op_context("log10", x, None)
        )));
    }

    // Powers of ten have an exact integral logarithm.
    let (reduced, reduced_exp) = reduced_parts(coeff, exp);
    if reduced.is_one() {
        return Ok(Dec::from_i64(reduced_exp));
    }

    let value = fdiv(&ln_parts(coeff, exp), &ln10_fixed());
    fixed_to_dec("log10", x, None, value, 0)
}

pub(super) fn exp(x: &Dec) -> Result<Dec, DecError> {
    let (_, coeff, _) = finite1("exp", x)?;
    if coeff.is_zero() {
        return Ok(Dec::one());
    }

    if x.gte(&Dec::from_i64(EXP_ARG_LIMIT)) {
        return Err(DecError::overflow(op_context("exp", x, None)));
    }
    if x.lte(&Dec::from_i64(-EXP_ARG_LIMIT)) {
        // Underflows the exponent window: flushes to zero.
        return Ok(Dec::zero());
    }

    let (mantissa, pow) = exp_fixed(&dec_to_fixed(x));
    fixed_to_dec("exp", x, None, mantissa, pow)
}

/// `pow(10, x)` — the base-10 exponential is this identity, not an
/// independent algorithm.
pub(super) fn exp10(x: &Dec) -> Result<Dec, DecError> {
    pow(&Dec::from_i64(10), x)
}

pub(super) fn pow(base: &Dec, exponent: &Dec) -> Result<Dec, DecError> {
    let ((neg_base, cb, eb), (_, ce, ee)) = finite2("pow", base, exponent)?;

    if ce.is_zero() {
        if cb.is_zero() {
            return Err(DecError::nan_result(format!(
                "zero to the power of zero: {}",
                op_context("pow", base, Some(exponent))
            )));
        }
        return Ok(Dec::one());
    }
    if cb.is_zero() {
        if exponent.is_negative() {
            return Err(DecError::nan_result(format!(
                "division by zero: {}",
                op_context("pow", base, Some(exponent))
            )));
        }
        return Ok(Dec::zero());
    }

    // Integral exponents go through binary exponentiation; everything else
    // through exp(exponent * ln(base)).
    let (re, ree) = reduced_parts(ce, ee);
    if ree >= 0
        && let Some(n) = integral_to_i64(&re, ree, exponent.is_negative())
    {
        return pow_integer(base, exponent, neg_base, cb, eb, n);
    }

    if neg_base {
        return Err(DecError::nan_result(format!(
            "negative base with fractional exponent: {}",
            op_context("pow", base, Some(exponent))
        )));
    }

    let t = fmul(&dec_to_fixed(exponent), &ln_parts(cb, eb));
    let limit = BigInt::from(EXP_ARG_LIMIT) * unit();
    if t >= limit {
        return Err(DecError::overflow(op_context("pow", base, Some(exponent))));
    }
    if t <= -limit {
        return Ok(Dec::zero());
    }

    let (mantissa, pow) = exp_fixed(&t);
    fixed_to_dec("pow", base, Some(exponent), mantissa, pow)
}

///
/// INTEGRAL POWERS
///

/// Exact-computation gate: below these bounds the full integer power is
/// cheap and the result keeps its ideal exponent (`pow(2, 10)` is `1024`,
/// not a 34-digit mantissa).
const EXACT_POW_MAX_N: u64 = 512;
const EXACT_POW_MAX_DIGITS: u64 = 1000;

/// Integral exponents: exact power for small magnitudes, square-and-
/// multiply over normalized (mantissa, power-of-ten) pairs beyond.
fn pow_integer(
    base: &Dec,
    exponent: &Dec,
    neg_base: bool,
    coeff: &BigUint,
    exp: i64,
    n: i64,
) -> Result<Dec, DecError> {
    let magnitude = n.unsigned_abs();
    let digits = context::digit_count(coeff);
    if magnitude <= EXACT_POW_MAX_N && digits.saturating_mul(magnitude) <= EXACT_POW_MAX_DIGITS {
        return pow_integer_exact(base, exponent, neg_base, coeff, exp, n);
    }

    pow_integer_scaled(base, exponent, neg_base, coeff, exp, n)
}

/// Full-precision integer power, rounded once at the end; negative
/// exponents take the reciprocal through the correctly-rounded divide.
fn pow_integer_exact(
    base: &Dec,
    exponent: &Dec,
    neg_base: bool,
    coeff: &BigUint,
    exp: i64,
    n: i64,
) -> Result<Dec, DecError> {
    let neg_result = neg_base && n % 2 != 0;
    let magnitude = u32::try_from(n.unsigned_abs()).unwrap_or(u32::MAX);
    let powered = coeff.pow(magnitude);
    let powered_exp = exp
        .checked_mul(i64::from(magnitude))
        .ok_or_else(|| DecError::overflow(op_context("pow", base, Some(exponent))))?;

    if n >= 0 {
        return finish_wide("pow", base, Some(exponent), neg_result, powered, powered_exp)
            .map(|(value, _)| value);
    }

    let denominator = Dec::from_parts(neg_result, powered, powered_exp);
    Dec::one().quo(&denominator)
}

/// Square-and-multiply over normalized (mantissa, power-of-ten) pairs.
fn pow_integer_scaled(
    base: &Dec,
    exponent: &Dec,
    neg_base: bool,
    coeff: &BigUint,
    exp: i64,
    n: i64,
) -> Result<Dec, DecError> {
    let neg_result = neg_base && n % 2 != 0;
    let overflow = || DecError::overflow(op_context("pow", base, Some(exponent)));

    let mut acc = (unit(), 0i64);
    let mut square = mantissa_fixed(coeff, exp);
    let mut k = n.unsigned_abs();
    while k > 0 {
        if k & 1 == 1 {
            acc = pair_mul(&acc, &square).ok_or_else(overflow)?;
        }
        k >>= 1;
        if k > 0 {
            square = pair_mul(&square, &square).ok_or_else(overflow)?;
        }
    }

    let (mut mantissa, mut pow) = acc;
    if n < 0 {
        // Reciprocal of m*10^p: (10/m) * 10^(-p-1), with 10/m in (1, 10].
        mantissa = fdiv(&ten_fixed(), &mantissa);
        pow = pow.checked_neg().and_then(|p| p.checked_sub(1)).ok_or_else(overflow)?;
        if mantissa >= ten_fixed() {
            mantissa = unit();
            pow += 1;
        }
    }

    fixed_to_dec("pow", base, Some(exponent), set_sign(mantissa, neg_result), pow)
}

/// `coeff * 10^exp` as an i64 when it fits; exponent magnitudes that fit
/// come through here, everything else falls back to the exp/ln path.
fn integral_to_i64(coeff: &BigUint, exp: i64, negative: bool) -> Option<i64> {
    if exp > 18 {
        return None;
    }

    let scaled = coeff.to_u128()?.checked_mul(10u128.checked_pow(u32::try_from(exp).ok()?)?)?;
    let magnitude = i64::try_from(scaled).ok()?;
    if negative { magnitude.checked_neg() } else { Some(magnitude) }
}

/// Multiply two normalized pairs, renormalizing the mantissa into [1, 10).
/// `None` on power-of-ten bookkeeping overflow.
fn pair_mul(a: &(BigInt, i64), b: &(BigInt, i64)) -> Option<(BigInt, i64)> {
    let mut mantissa = fmul(&a.0, &b.0);
    let mut pow = a.1.checked_add(b.1)?;
    if mantissa >= ten_fixed() {
        mantissa /= BigInt::from(10);
        pow = pow.checked_add(1)?;
    }

    Some((mantissa, pow))
}

///
/// FIXED-POINT KERNEL
///

/// `10^WORK_DIGITS`: the working value of 1.
fn unit() -> BigInt {
    BigInt::from(context::pow10(unsigned(WORK_DIGITS)))
}

fn ten_fixed() -> BigInt {
    unit() * BigInt::from(10)
}

/// Truncating fixed-point multiply.
fn fmul(a: &BigInt, b: &BigInt) -> BigInt {
    (a * b) / unit()
}

/// Truncating fixed-point divide.
fn fdiv(a: &BigInt, b: &BigInt) -> BigInt {
    (a * unit()) / b
}

/// Fixed-point square root via the integer Newton iteration.
fn fsqrt(a: &BigInt) -> BigInt {
    let (_, magnitude) = split_signed(a * unit());
    BigInt::from(isqrt(&magnitude))
}

/// Floor integer square root (Newton, monotone from above).
fn isqrt(n: &BigUint) -> BigUint {
    if n.is_zero() {
        return BigUint::zero();
    }

    let mut x = BigUint::one() << usize::try_from(n.bits().div_ceil(2)).unwrap_or(usize::MAX);
    loop {
        let y = (&x + n / &x) >> 1u32;
        if y >= x {
            return x;
        }
        x = y;
    }
}

/// `exp` of a small working value (|s| < 0.1) by the Taylor series; terms
/// accumulate until they truncate to zero at the working scale.
fn exp_series(s: &BigInt) -> BigInt {
    let mut term = unit();
    let mut sum = unit();
    let mut j = 1u32;
    loop {
        term = fmul(&term, s) / BigInt::from(j);
        if term.is_zero() {
            return sum;
        }
        sum += &term;
        j += 1;
    }
}

/// `ln` of a working value near 1 by the atanh series.
fn ln_series(z: &BigInt) -> BigInt {
    let u = fdiv(&(z - unit()), &(z + unit()));
    let u_squared = fmul(&u, &u);

    let mut term = u.clone();
    let mut sum = u;
    let mut k = 1u32;
    loop {
        term = fmul(&term, &u_squared);
        if term.is_zero() {
            return sum * BigInt::from(2);
        }
        sum += &term / BigInt::from(2 * k + 1);
        k += 1;
    }
}

/// `ln` of a positive working value: repeated square roots pull the
/// argument into the series' convergence band around 1, each halving the
/// logarithm.
fn ln_fixed(x: &BigInt) -> BigInt {
    let upper = unit() * BigInt::from(11) / BigInt::from(10);
    let lower = unit() * BigInt::from(9) / BigInt::from(10);

    let mut z = x.clone();
    let mut halvings = 0u32;
    while z > upper || z < lower {
        z = fsqrt(&z);
        halvings += 1;
    }

    ln_series(&z) << halvings
}

fn ln10_fixed() -> BigInt {
    ln_fixed(&ten_fixed())
}

/// `ln(coeff * 10^exp)` for a positive finite value, split as
/// `ln(mantissa) + adjusted * ln(10)`.
fn ln_parts(coeff: &BigUint, exp: i64) -> BigInt {
    let (mantissa, adjusted) = mantissa_fixed(coeff, exp);
    let mut result = ln_fixed(&mantissa);
    if adjusted != 0 {
        result += BigInt::from(adjusted) * ln10_fixed();
    }

    result
}

/// `exp` of a working value, as a normalized mantissa in [1, 10) and a
/// power of ten: 10^q is peeled off with q = floor(x / ln 10), the residue
/// is halved five times into the series' range, then squared back.
fn exp_fixed(x: &BigInt) -> (BigInt, i64) {
    let ln10 = ln10_fixed();

    let mut q = x / &ln10;
    let mut r = x - &q * &ln10;
    if r.sign() == Sign::Minus {
        q -= 1;
        r += &ln10;
    }

    let s = &r / BigInt::from(32);
    let mut mantissa = exp_series(&s);
    for _ in 0..5 {
        mantissa = fmul(&mantissa, &mantissa);
    }

    // Renormalization is value-preserving (mantissa and power move
    // together); truncation drift can leave the mantissa a hair outside
    // [1, 10).
    let mut pow = q.to_i64().unwrap_or(i64::MAX);
    let ten = ten_fixed();
    while mantissa >= ten {
        mantissa /= BigInt::from(10);
        pow += 1;
    }
    while !mantissa.is_zero() && mantissa < unit() {
        mantissa *= BigInt::from(10);
        pow -= 1;
    }

    (mantissa, pow)
}

///
/// CONVERSIONS
///

/// A finite [`Dec`] as a working value, truncating digits below the
/// working scale.
fn dec_to_fixed(x: &Dec) -> BigInt {
    let Some((neg, coeff, exp)) = x.parts() else {
        return BigInt::zero();
    };

    let shift = exp + WORK_DIGITS;
    let magnitude = if shift >= 0 {
        coeff * context::pow10(unsigned(shift))
    } else {
        coeff / context::pow10(unsigned(-shift))
    };

    set_sign(BigInt::from(magnitude), neg)
}

/// Round a working value times `10^extra_pow10` into the wide context.
fn fixed_to_dec(
    op: &'static str,
    x: &Dec,
    y: Option<&Dec>,
    value: BigInt,
    extra_pow10: i64,
) -> Result<Dec, DecError> {
    if value.is_zero() {
        // Canonical zero, not 0E-50.
        return Ok(Dec::zero());
    }
    let (neg, magnitude) = split_signed(value);

    finish_wide(op, x, y, neg, magnitude, extra_pow10 - WORK_DIGITS).map(|(value, _)| value)
}

/// Coefficient scaled to a working mantissa in [1, 10), with the adjusted
/// exponent. Coefficients wider than the working scale are truncated; the
/// guard digits absorb the error.
fn mantissa_fixed(coeff: &BigUint, exp: i64) -> (BigInt, i64) {
    let digits = i64::try_from(context::digit_count(coeff)).unwrap_or(i64::MAX);
    let adjusted = exp + digits - 1;

    let mantissa = if WORK_DIGITS >= digits - 1 {
        coeff * context::pow10(unsigned(WORK_DIGITS - (digits - 1)))
    } else {
        coeff / context::pow10(unsigned(digits - 1 - WORK_DIGITS))
    };

    (BigInt::from(mantissa), adjusted)
}

/// Trailing-zero-stripped copy of a coefficient with the exponent folded
/// forward; the raw-parts sibling of [`Dec::reduce`].
fn reduced_parts(coeff: &BigUint, exp: i64) -> (BigUint, i64) {
    let ten = BigUint::from(10u32);
    let mut coeff = coeff.clone();
    let mut exp = exp;
    while !coeff.is_zero() && (&coeff % &ten).is_zero() {
        coeff /= &ten;
        exp += 1;
    }

    (coeff, exp)
}

fn set_sign(value: BigInt, neg: bool) -> BigInt {
    if neg { -value } else { value }
}
