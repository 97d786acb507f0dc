//! Checked and lossy conversions out of [`Dec`] toward the surrounding
//! ledger: fixed-width integers, the 256-bit-bounded ledger integer, the
//! big-integer form, and the legacy fixed-point decimal.
//!
//! Integer conversions reduce first, so `5.000` converts while `5.001` is
//! rejected as non-integral.

use super::Dec;
use crate::{
    context,
    error::DecError,
    legacy::{LedgerInt, LegacyDec},
};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;

impl Dec {
    /// Exact conversion to `i64`; the value must be integral after
    /// reduction and in range.
    pub fn to_i64(&self) -> Result<i64, DecError> {
        let magnitude = self.integral_magnitude("to_i64")?;
        let neg = self.is_negative();

        let signed = sign_magnitude(neg, magnitude);
        i64::try_from(&signed).map_err(|_| DecError::overflow(format!("to_i64: {self}")))
    }

    /// Exact conversion to `u64`; additionally rejects negative values
    /// with [`DecError::Overflow`].
    pub fn to_u64(&self) -> Result<u64, DecError> {
        if self.is_negative() {
            return Err(DecError::overflow(format!("to_u64: {self}")));
        }

        let magnitude = self.integral_magnitude("to_u64")?;
        u64::try_from(&magnitude).map_err(|_| DecError::overflow(format!("to_u64: {self}")))
    }

    /// Exact conversion to an arbitrary-precision integer; fails with
    /// [`DecError::NonIntegral`] if the reduced value still carries a
    /// fractional part.
    pub fn to_big_int(&self) -> Result<BigInt, DecError> {
        let magnitude = self.integral_magnitude("to_big_int")?;

        Ok(sign_magnitude(self.is_negative(), magnitude))
    }

    /// The integer significand scaled to the value's actual magnitude:
    /// reduced, then the exponent folded into the coefficient by a
    /// power-of-ten multiply or (truncating) divide. The sign is not
    /// carried here; apply it separately via [`Dec::is_negative`].
    pub fn coeff(&self) -> Result<BigUint, DecError> {
        let (reduced, _) = self.reduce();
        let Some((_, coeff, exp)) = reduced.parts() else {
            return Err(DecError::nan_operand("coeff", self));
        };

        let folded = if exp >= 0 {
            coeff * context::pow10(super::arith::unsigned(exp))
        } else {
            coeff / context::pow10(super::arith::unsigned(-exp))
        };

        Ok(folded)
    }

    /// Truncate toward zero to an integer and bridge into the 256-bit
    /// ledger integer type; [`DecError::Overflow`] beyond its ceiling.
    pub fn to_ledger_int(&self) -> Result<LedgerInt, DecError> {
        let Some((neg, coeff, exp)) = self.parts() else {
            return Err(DecError::nan_operand("to_ledger_int", self));
        };

        let truncated = if exp >= 0 {
            coeff * context::pow10(super::arith::unsigned(exp))
        } else {
            coeff / context::pow10(super::arith::unsigned(-exp))
        };

        LedgerInt::try_new(sign_magnitude(neg, truncated))
            .map_err(|_| DecError::overflow(format!("to_ledger_int: {self}")))
    }

    /// Convert into the legacy fixed-point representation by re-emitting
    /// the canonical text and re-parsing it there. Fails if the legacy
    /// representation's own range or precision is exceeded.
    pub fn to_legacy(&self) -> Result<LegacyDec, DecError> {
        self.to_string().parse()
    }

    /// Reduced integral magnitude shared by the exact integer conversions.
    fn integral_magnitude(&self, op: &'static str) -> Result<BigUint, DecError> {
        let (reduced, _) = self.reduce();
        let Some((_, coeff, exp)) = reduced.parts() else {
            return Err(DecError::nan_operand(op, self));
        };

        if exp < 0 {
            return Err(DecError::non_integral(self.to_string()));
        }

        Ok(coeff * context::pow10(super::arith::unsigned(exp)))
    }
}

fn sign_magnitude(neg: bool, magnitude: BigUint) -> BigInt {
    let sign = if neg {
        Sign::Minus
    } else if magnitude.is_zero() {
        Sign::NoSign
    } else {
        Sign::Plus
    };

    BigInt::from_biguint(sign, magnitude)
}
