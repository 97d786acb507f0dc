//! Arithmetic and comparison over [`Dec`].
//!
//! Every operation checks its operands for the poison tag before computing
//! and fails with a [`DecError::NaN`] naming the operation and operand
//! texts. Addition and subtraction run under the exact context and never
//! round; everything else runs under the wide 34-digit context with
//! round-toward-zero. Results are always freshly allocated — no operation
//! mutates its receiver or arguments.

use super::{Dec, transcendental};
use crate::{
    context::{self, WIDE},
    error::DecError,
};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;
use std::cmp::Ordering;

/// Wide-context precision as a signed quantity for exponent bookkeeping.
const WIDE_DIGITS: i64 = 34;

impl Dec {
    ///
    /// EXACT-CONTEXT OPERATIONS
    ///

    /// Exact addition; never rounds.
    pub fn add(&self, other: &Self) -> Result<Self, DecError> {
        let (a, b) = finite2("add", self, other)?;
        let (lhs, rhs, exp) = align(a, b);

        let (neg, coeff) = split_signed(lhs + rhs);
        Ok(Self::from_parts(neg, coeff, exp))
    }

    /// Exact subtraction; never rounds.
    pub fn sub(&self, other: &Self) -> Result<Self, DecError> {
        let (a, b) = finite2("sub", self, other)?;
        let (lhs, rhs, exp) = align(a, b);

        let (neg, coeff) = split_signed(lhs - rhs);
        Ok(Self::from_parts(neg, coeff, exp))
    }

    /// Sign flip under the wide context.
    ///
    /// Rounds only when the coefficient exceeds 34 digits; that rounding is
    /// part of the same error surface as [`Dec::mul`].
    pub fn neg(&self) -> Result<Self, DecError> {
        let (neg, coeff, exp) = finite1("neg", self)?;

        finish_wide("neg", self, None, !neg, coeff.clone(), exp).map(|(value, _)| value)
    }

    /// Direct sign clear; exact, never rounds.
    pub fn abs(&self) -> Result<Self, DecError> {
        let (_, coeff, exp) = finite1("abs", self)?;

        Ok(Self::from_parts(false, coeff.clone(), exp))
    }

    ///
    /// WIDE-CONTEXT OPERATIONS
    ///

    pub fn mul(&self, other: &Self) -> Result<Self, DecError> {
        self.mul_rounded("mul", other).map(|(value, _)| value)
    }

    /// Multiply, failing with [`DecError::UnexpectedRounding`] if the wide
    /// context had to discard nonzero digits. Used where callers require
    /// bit-exact fixed-point shifting (e.g. scaling by `10^n`) and must
    /// detect precision loss rather than silently accept it.
    pub fn mul_exact(&self, other: &Self) -> Result<Self, DecError> {
        let (value, inexact) = self.mul_rounded("mul_exact", other)?;
        if inexact {
            return Err(DecError::unexpected_rounding(op_context(
                "mul_exact",
                self,
                Some(other),
            )));
        }

        Ok(value)
    }

    /// Divide to at most 34 significant digits of quotient.
    pub fn quo(&self, other: &Self) -> Result<Self, DecError> {
        self.quo_rounded("quo", other).map(|(value, _)| value)
    }

    /// Divide, failing with [`DecError::UnexpectedRounding`] on any
    /// precision loss.
    pub fn quo_exact(&self, other: &Self) -> Result<Self, DecError> {
        let (value, inexact) = self.quo_rounded("quo_exact", other)?;
        if inexact {
            return Err(DecError::unexpected_rounding(op_context(
                "quo_exact",
                self,
                Some(other),
            )));
        }

        Ok(value)
    }

    /// Integer part of the quotient, with exponent zero.
    pub fn quo_integer(&self, other: &Self) -> Result<Self, DecError> {
        let (quotient, _, neg, _) = self.integer_div_rem("quo_integer", other)?;

        Ok(Self::from_parts(neg, quotient, 0))
    }

    /// Remainder consistent with [`Dec::quo_integer`]:
    /// `quo_integer(x,y)*y + rem(x,y) == x` for exact inputs. The sign
    /// follows the dividend.
    pub fn rem(&self, other: &Self) -> Result<Self, DecError> {
        let (_, remainder, _, exp) = self.integer_div_rem("rem", other)?;
        let neg = self.is_negative();

        finish_wide("rem", self, Some(other), neg, remainder, exp).map(|(value, _)| value)
    }

    /// Round to the nearest integer toward negative infinity.
    pub fn floor(&self) -> Result<Self, DecError> {
        self.round_integral("floor", true)
    }

    /// Round to the nearest integer away from negative infinity.
    pub fn ceil(&self) -> Result<Self, DecError> {
        self.round_integral("ceil", false)
    }

    ///
    /// TRANSCENDENTALS
    ///

    /// `self^exponent` under the wide context.
    pub fn pow(&self, exponent: &Self) -> Result<Self, DecError> {
        transcendental::pow(self, exponent)
    }

    /// Natural exponential under the wide context.
    pub fn exp(&self) -> Result<Self, DecError> {
        transcendental::exp(self)
    }

    /// Base-10 exponential. Implemented as `pow(10, self)`, not as an
    /// independent algorithm; callers depending on exact parity with
    /// [`Dec::pow`] rely on this identity.
    pub fn exp10(&self) -> Result<Self, DecError> {
        transcendental::exp10(self)
    }

    /// Natural logarithm under the wide context.
    pub fn ln(&self) -> Result<Self, DecError> {
        transcendental::ln(self)
    }

    /// Base-10 logarithm under the wide context.
    pub fn log10(&self) -> Result<Self, DecError> {
        transcendental::log10(self)
    }

    /// Square root under the wide context.
    pub fn sqrt(&self) -> Result<Self, DecError> {
        transcendental::sqrt(self)
    }

    ///
    /// COMPARISON
    ///

    /// Select the larger operand, unchanged: no arithmetic, no rounding.
    /// Fails on a poison operand, unlike `Ord::max` (hence the checked
    /// name).
    pub fn checked_max(&self, other: &Self) -> Result<Self, DecError> {
        finite2("max", self, other)?;

        Ok(if cmp_values(self, other) == Ordering::Less {
            other.clone()
        } else {
            self.clone()
        })
    }

    /// Select the smaller operand, unchanged. Fails on a poison operand.
    pub fn checked_min(&self, other: &Self) -> Result<Self, DecError> {
        finite2("min", self, other)?;

        Ok(if cmp_values(self, other) == Ordering::Greater {
            other.clone()
        } else {
            self.clone()
        })
    }

    #[must_use]
    pub fn gt(&self, other: &Self) -> bool {
        cmp_values(self, other) == Ordering::Greater
    }

    #[must_use]
    pub fn gte(&self, other: &Self) -> bool {
        cmp_values(self, other) != Ordering::Less
    }

    #[must_use]
    pub fn lt(&self, other: &Self) -> bool {
        cmp_values(self, other) == Ordering::Less
    }

    #[must_use]
    pub fn lte(&self, other: &Self) -> bool {
        cmp_values(self, other) != Ordering::Greater
    }

    /// Value equality; representation (trailing zeros) is ignored.
    #[must_use]
    pub fn equal(&self, other: &Self) -> bool {
        cmp_values(self, other) == Ordering::Equal
    }

    ///
    /// SHARED KERNELS
    ///

    fn mul_rounded(&self, op: &'static str, other: &Self) -> Result<(Self, bool), DecError> {
        let ((na, ca, ea), (nb, cb, eb)) = finite2(op, self, other)?;
        let exp = ea
            .checked_add(eb)
            .ok_or_else(|| DecError::overflow(op_context(op, self, Some(other))))?;

        finish_wide(op, self, Some(other), na ^ nb, ca * cb, exp)
    }

    /// Correctly truncated division of the coefficient ratio under the wide
    /// digit budget, with the inexact flag and GDA preferred-exponent
    /// re-expression of exact quotients.
    fn quo_rounded(&self, op: &'static str, other: &Self) -> Result<(Self, bool), DecError> {
        let ((na, ca, ea), (nb, cb, eb)) = finite2(op, self, other)?;
        if cb.is_zero() {
            return Err(DecError::nan_result(format!(
                "division by zero: {}",
                op_context(op, self, Some(other))
            )));
        }

        let ideal = ea
            .checked_sub(eb)
            .ok_or_else(|| DecError::overflow(op_context(op, self, Some(other))))?;
        if ca.is_zero() {
            return Ok((Self::from_parts(false, BigUint::zero(), ideal.min(0)), false));
        }

        // Adjusted exponent k of the ratio: 10^k <= ca/cb < 10^(k+1).
        let digits_a = i64::try_from(context::digit_count(ca)).unwrap_or(i64::MAX);
        let digits_b = i64::try_from(context::digit_count(cb)).unwrap_or(i64::MAX);
        let mut k = digits_a - digits_b;
        while cmp_ratio_pow10(ca, cb, k) == Ordering::Less {
            k -= 1;
        }
        while cmp_ratio_pow10(ca, cb, k + 1) != Ordering::Less {
            k += 1;
        }

        let shift = WIDE_DIGITS - 1 - k;
        let (num, den) = if shift >= 0 {
            (ca * context::pow10(unsigned(shift)), cb.clone())
        } else {
            (ca.clone(), cb * context::pow10(unsigned(-shift)))
        };

        let mut quotient = &num / &den;
        let inexact = !(&num % &den).is_zero();
        let mut exp = k - (WIDE_DIGITS - 1) + ideal;

        if !inexact {
            // Exact quotient: move toward the preferred exponent ea - eb by
            // stripping or padding trailing zeros within the digit budget,
            // so 2.0/2 stays "1.0" and 4/2 stays "2".
            let ten = BigUint::from(10u32);
            while exp < ideal && (&quotient % &ten).is_zero() {
                quotient /= &ten;
                exp += 1;
            }
            while exp > ideal && context::digit_count(&quotient) < unsigned(WIDE_DIGITS) {
                quotient *= &ten;
                exp -= 1;
            }
        }

        let (value, rounded_inexact) = finish_wide(op, self, Some(other), na ^ nb, quotient, exp)?;
        Ok((value, inexact || rounded_inexact))
    }

    /// One aligned truncated division feeding both `quo_integer` and `rem`,
    /// so the two stay mutually consistent. Returns
    /// `(quotient, remainder, quotient_sign, remainder_exponent)`.
    fn integer_div_rem(
        &self,
        op: &'static str,
        other: &Self,
    ) -> Result<(BigUint, BigUint, bool, i64), DecError> {
        let ((na, ca, ea), (nb, cb, eb)) = finite2(op, self, other)?;
        if cb.is_zero() {
            return Err(DecError::nan_result(format!(
                "division by zero: {}",
                op_context(op, self, Some(other))
            )));
        }

        let exp = ea.min(eb);
        let lhs = ca * context::pow10(unsigned(ea - exp));
        let rhs = cb * context::pow10(unsigned(eb - exp));
        let quotient = &lhs / &rhs;
        let remainder = lhs - &quotient * &rhs;

        // An integer part wider than the digit budget cannot be represented
        // by the wide context (division impossible).
        if context::digit_count(&quotient) > unsigned(WIDE_DIGITS) {
            return Err(DecError::out_of_range(format!(
                "integer quotient exceeds {WIDE_DIGITS} digits: {}",
                op_context(op, self, Some(other))
            )));
        }

        Ok((quotient, remainder, na ^ nb, exp))
    }

    fn round_integral(&self, op: &'static str, toward_neg_inf: bool) -> Result<Self, DecError> {
        let (neg, coeff, exp) = finite1(op, self)?;
        if exp >= 0 {
            return finish_wide(op, self, None, neg, coeff.clone(), exp).map(|(value, _)| value);
        }

        let scale = context::pow10(unsigned(-exp));
        let fraction = coeff % &scale;
        let mut integral = coeff / &scale;

        // floor moves a negative value down, ceil moves a positive value up.
        if !fraction.is_zero() && (toward_neg_inf == neg) {
            integral += 1u32;
        }

        finish_wide(op, self, None, neg, integral, 0).map(|(value, _)| value)
    }
}

/// Total comparison backing `Ord` and the boolean comparison helpers.
///
/// NaN ordering is unspecified for callers (see the `Ord` impl note): the
/// poison value sorts before every finite value and equal to itself.
pub(super) fn cmp_values(x: &Dec, y: &Dec) -> Ordering {
    match (x.parts(), y.parts()) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => cmp_finite(a, b),
    }
}

pub(super) type Parts<'a> = (bool, &'a BigUint, i64);

fn cmp_finite(a: Parts<'_>, b: Parts<'_>) -> Ordering {
    let (na, ca, ea) = a;
    let (nb, cb, eb) = b;

    match (ca.is_zero(), cb.is_zero()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return if nb { Ordering::Greater } else { Ordering::Less },
        (false, true) => return if na { Ordering::Less } else { Ordering::Greater },
        (false, false) => {}
    }

    if na != nb {
        return if na { Ordering::Less } else { Ordering::Greater };
    }

    // Same sign, both nonzero: adjusted exponents decide unless they tie,
    // in which case the aligned coefficients do. Alignment after an
    // adjusted-exponent tie shifts by at most the digit-count difference.
    let aa = context::adjusted_exponent(ca, ea);
    let ab = context::adjusted_exponent(cb, eb);
    let magnitude = if aa == ab {
        let exp = ea.min(eb);
        let lhs = ca * context::pow10(unsigned(ea - exp));
        let rhs = cb * context::pow10(unsigned(eb - exp));
        lhs.cmp(&rhs)
    } else {
        aa.cmp(&ab)
    };

    if na { magnitude.reverse() } else { magnitude }
}

/// Finite decomposition or the NaN-operand error for a unary operation.
pub(super) fn finite1<'a>(op: &'static str, x: &'a Dec) -> Result<Parts<'a>, DecError> {
    x.parts().ok_or_else(|| DecError::nan_operand(op, x))
}

/// Finite decompositions or the NaN-operand error naming both operands.
pub(super) fn finite2<'a>(
    op: &'static str,
    x: &'a Dec,
    y: &'a Dec,
) -> Result<(Parts<'a>, Parts<'a>), DecError> {
    match (x.parts(), y.parts()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(DecError::nan_operand2(op, x, y)),
    }
}

/// Align two finite decompositions to their smaller exponent, as signed
/// arbitrary-precision integers.
fn align(a: Parts<'_>, b: Parts<'_>) -> (BigInt, BigInt, i64) {
    let (na, ca, ea) = a;
    let (nb, cb, eb) = b;
    let exp = ea.min(eb);

    let lhs = signed(na, ca * context::pow10(unsigned(ea - exp)));
    let rhs = signed(nb, cb * context::pow10(unsigned(eb - exp)));
    (lhs, rhs, exp)
}

fn signed(neg: bool, coeff: BigUint) -> BigInt {
    let sign = if neg { Sign::Minus } else { Sign::Plus };
    BigInt::from_biguint(sign, coeff)
}

pub(super) fn split_signed(value: BigInt) -> (bool, BigUint) {
    let (sign, magnitude) = value.into_parts();
    (sign == Sign::Minus, magnitude)
}

/// Round into the wide context, enforce the exponent window, and build the
/// result value. Returns the value plus whether rounding lost digits.
pub(super) fn finish_wide(
    op: &'static str,
    x: &Dec,
    y: Option<&Dec>,
    neg: bool,
    coeff: BigUint,
    exp: i64,
) -> Result<(Dec, bool), DecError> {
    let rounded = WIDE.apply(neg, coeff, exp);

    if context::overflows_window(&rounded.coeff, rounded.exp) {
        return Err(DecError::overflow(op_context(op, x, y)));
    }
    if context::underflows_window(&rounded.coeff, rounded.exp) {
        // Below the exponent window the result flushes to zero.
        return Ok((Dec::zero(), true));
    }

    Ok((
        Dec::from_parts(rounded.neg, rounded.coeff, rounded.exp),
        rounded.inexact,
    ))
}

pub(super) fn op_context(op: &'static str, x: &Dec, y: Option<&Dec>) -> String {
    match y {
        Some(y) => format!("{op}: {x}, {y}"),
        None => format!("{op}: {x}"),
    }
}

/// `10^k`-scaled ratio comparison: `num <=> den * 10^k`.
fn cmp_ratio_pow10(num: &BigUint, den: &BigUint, k: i64) -> Ordering {
    if k >= 0 {
        num.cmp(&(den * context::pow10(unsigned(k))))
    } else {
        (num * context::pow10(unsigned(-k))).cmp(den)
    }
}

/// Non-negative-by-construction i64 -> u64 shift widths.
pub(super) fn unsigned(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}
