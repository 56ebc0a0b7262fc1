//! Working-precision decimal helpers shared by the exact and continuous models.
//!
//! `BigDecimal` multiplication and addition are exact; only division can
//! produce a non-terminating result. [`div_to_precision`] computes a quotient
//! to an explicit number of significant digits instead of relying on the
//! library's implicit default, so the working precision is always the one the
//! model was built with.

use accrual_core::constants::RAY_DECIMALS;
use accrual_core::error::ArithmeticError;
use accrual_core::types::{ExactValue, Precision};
use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

/// Extra quotient digits computed beyond the working precision before rounding.
const QUOTIENT_GUARD_DIGITS: u64 = 2;

/// `10^exp` as an integer.
pub fn pow10(exp: u64) -> BigUint {
    let exp = u32::try_from(exp).unwrap_or(u32::MAX);
    BigUint::from(10u32).pow(exp)
}

/// Round to the working precision.
pub fn round(value: ExactValue, precision: Precision) -> ExactValue {
    value.with_prec(precision.digits())
}

/// `num / den` to `precision` significant digits.
///
/// The integer quotient is taken with enough extra digits that the final
/// rounding step, not the integer division, determines the last digit.
pub fn div_to_precision(
    num: &ExactValue,
    den: &ExactValue,
    precision: Precision,
) -> Result<ExactValue, ArithmeticError> {
    if den.is_zero() {
        return Err(ArithmeticError::DivisionByZero);
    }
    if num.is_zero() {
        return Ok(BigDecimal::zero());
    }

    let (n, n_scale) = num.as_bigint_and_exponent();
    let (d, d_scale) = den.as_bigint_and_exponent();

    // digits(q) >= digits(n) + shift - digits(d) >= precision + guard
    let shift = precision.digits() + den.digits() + QUOTIENT_GUARD_DIGITS;
    let q = n * BigInt::from(pow10(shift)) / d;
    let scale = n_scale - d_scale + shift as i64;

    Ok(round(BigDecimal::new(q, scale), precision))
}

/// `value / RAY`, exact (RAY is a power of ten).
pub fn shift_down_ray(value: ExactValue) -> ExactValue {
    let (mantissa, scale) = value.into_bigint_and_exponent();
    BigDecimal::new(mantissa, scale + i64::from(RAY_DECIMALS))
}
