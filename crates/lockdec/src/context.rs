use num_bigint::BigUint;
use num_traits::{One, Zero};

///
/// Rounding
///
/// The only rounding mode the fixed contexts use. Kept as an explicit enum
/// so the context constants read as full arithmetic environments rather
/// than a bare digit count.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rounding {
    /// Truncate toward zero.
    Down,
}

///
/// Context
///
/// A fixed arithmetic environment: an optional significant-digit budget and
/// a rounding mode. The two process-wide constants below are the only
/// contexts in the library; they are immutable configuration, never state.
///
/// Which context an operation computes under is load-bearing: moving an
/// operation between contexts changes results and breaks cross-node
/// determinism.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Context {
    precision: Option<u32>,
    rounding: Rounding,
}

/// Unbounded precision; addition, subtraction and negation never round here.
pub const EXACT: Context = Context {
    precision: None,
    rounding: Rounding::Down,
};

/// 34 significant decimal digits, round toward zero. Used by multiply,
/// divide, remainder, powers, roots, logarithms, exponentials and the
/// integral rounding operations.
pub const WIDE: Context = Context {
    precision: Some(34),
    rounding: Rounding::Down,
};

/// Exponent window for wide-context results. A result whose adjusted
/// exponent leaves this window is an overflow (above) or flushes to zero
/// (below).
pub(crate) const MAX_EXPONENT: i64 = 100_000;
pub(crate) const MIN_EXPONENT: i64 = -100_000;

///
/// Rounded
///
/// Outcome of applying a context to a raw (sign, coefficient, exponent)
/// triple: the possibly-truncated triple plus whether nonzero digits were
/// discarded. The flag is what the exact-operation variants inspect.
///

pub(crate) struct Rounded {
    pub neg: bool,
    pub coeff: BigUint,
    pub exp: i64,
    pub inexact: bool,
}

impl Context {
    #[must_use]
    pub const fn precision(&self) -> Option<u32> {
        self.precision
    }

    #[must_use]
    pub const fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Round a raw result into this context's digit budget.
    ///
    /// Truncates the coefficient toward zero, folding dropped digits into
    /// the exponent and reporting whether any of them were nonzero.
    pub(crate) fn apply(&self, neg: bool, coeff: BigUint, exp: i64) -> Rounded {
        let Some(precision) = self.precision else {
            return Rounded {
                neg,
                coeff,
                exp,
                inexact: false,
            };
        };

        let digits = digit_count(&coeff);
        if coeff.is_zero() || digits <= u64::from(precision) {
            return Rounded {
                neg,
                coeff,
                exp,
                inexact: false,
            };
        }

        let drop = digits - u64::from(precision);
        let divisor = pow10(drop);
        let rem = &coeff % &divisor;
        let quotient = coeff / divisor;
        let inexact = !rem.is_zero();

        // Rounding::Down: the truncated quotient is already the result.
        Rounded {
            neg,
            coeff: quotient,
            exp: exp + i64::try_from(drop).unwrap_or(i64::MAX),
            inexact,
        }
    }
}

/// Number of decimal digits in a coefficient; zero counts as one digit.
pub(crate) fn digit_count(coeff: &BigUint) -> u64 {
    if coeff.is_zero() {
        return 1;
    }

    coeff.to_str_radix(10).len() as u64
}

/// 10^n as an arbitrary-precision unsigned integer.
pub(crate) fn pow10(n: u64) -> BigUint {
    let ten = BigUint::from(10u32);
    let mut out = BigUint::one();
    let mut base = ten;
    let mut n = n;

    // Square-and-multiply keeps this cheap for the large shifts that
    // exponent alignment of far-apart operands can require.
    while n > 0 {
        if n & 1 == 1 {
            out *= &base;
        }
        n >>= 1;
        if n > 0 {
            base = &base * &base;
        }
    }

    out
}

/// Adjusted exponent (exponent of the most significant digit) of a triple.
pub(crate) fn adjusted_exponent(coeff: &BigUint, exp: i64) -> i64 {
    if coeff.is_zero() {
        return exp;
    }

    exp + i64::try_from(digit_count(coeff)).unwrap_or(i64::MAX) - 1
}

/// True when a nonzero result's magnitude exceeds the exponent window.
pub(crate) fn overflows_window(coeff: &BigUint, exp: i64) -> bool {
    !coeff.is_zero() && adjusted_exponent(coeff, exp) > MAX_EXPONENT
}

/// True when a nonzero result is too small for the exponent window and
/// must flush to zero.
pub(crate) fn underflows_window(coeff: &BigUint, exp: i64) -> bool {
    !coeff.is_zero() && adjusted_exponent(coeff, exp) < MIN_EXPONENT
}

///
/// TESTS
///
