//! Precision-loss metrics in basis points of principal.
//!
//! `basis_points = (a - b) / unit_scale * 10000`. In [`LossMode::Absolute`]
//! the difference is `|a - b|`; in [`LossMode::Signed`] it is `a - b`, so a
//! negative value means `a` under-counts interest relative to `b`. Callers
//! pass the value under test as `a` and the reference as `b`.

use accrual_core::constants::{BPS_PRECISION, RAY_DECIMALS};
use accrual_core::error::ArithmeticError;
use accrual_core::types::{ExactValue, LossMode, Precision, PrecisionLoss, ray_to_unit};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::decimal::div_to_precision;

/// Decimal places between ray units and basis points (`RAY / 10000`).
const RAY_TO_BPS_SHIFT: i64 = RAY_DECIMALS as i64 - 4;

/// Loss between two values measured against an arbitrary unit scale.
pub fn precision_loss(
    a: &ExactValue,
    b: &ExactValue,
    unit_scale: &ExactValue,
    mode: LossMode,
    precision: Precision,
) -> Result<PrecisionLoss, ArithmeticError> {
    let difference = difference(a, b, mode);
    let scaled = &difference * BigDecimal::from(BPS_PRECISION);
    let basis_points = div_to_precision(&scaled, unit_scale, precision)?;
    Ok(PrecisionLoss {
        difference,
        basis_points,
        mode,
    })
}

/// Loss between two ray-unit values, relative to one RAY of principal.
///
/// Exact: dividing by RAY only moves the decimal point.
pub fn ray_loss(a: &ExactValue, b: &ExactValue, mode: LossMode) -> PrecisionLoss {
    let difference = difference(a, b, mode);
    let basis_points = ray_units_to_bps(&difference);
    PrecisionLoss {
        difference,
        basis_points,
        mode,
    }
}

/// Absolute loss in basis points between two ray-unit values.
///
/// # Examples
///
/// ```
/// use accrual_engine::evaluator::precision_loss_bps;
/// use bigdecimal::BigDecimal;
///
/// let fixed: BigDecimal = "1000000003170979198376458650".parse().unwrap();
/// let exact: BigDecimal = "1000000003170979198376458650.4312531709791983764586504312532".parse().unwrap();
/// let bps = precision_loss_bps(&fixed, &exact);
/// assert!(bps > BigDecimal::from(0));
/// assert!(bps < "1e-23".parse::<BigDecimal>().unwrap());
/// ```
pub fn precision_loss_bps(a: &ExactValue, b: &ExactValue) -> ExactValue {
    ray_loss(a, b, LossMode::Absolute).basis_points
}

/// Upper bound, in bps, on how far the fixed-point index can fall below the
/// exact index after `steps` updates of `interval_seconds`.
///
/// The per-second rate loses less than one ray unit, so each factor loses
/// less than `interval_seconds` units; each index update floors away less
/// than one more. Carried forward through growth `G = exact_index / RAY`,
/// the gap stays below `(steps * (interval + 1) + 1) * G` ray units.
pub fn truncation_bound_bps(steps: u64, interval_seconds: u64, exact_index: &ExactValue) -> ExactValue {
    let truncations = u128::from(steps) * (u128::from(interval_seconds) + 1) + 1;
    let growth = ray_to_unit(exact_index);
    ray_units_to_bps(&(BigDecimal::from(BigInt::from(truncations)) * growth))
}

fn difference(a: &ExactValue, b: &ExactValue, mode: LossMode) -> ExactValue {
    let diff = a - b;
    match mode {
        LossMode::Absolute => diff.abs(),
        LossMode::Signed => diff,
    }
}

fn ray_units_to_bps(value: &ExactValue) -> ExactValue {
    let (mantissa, scale) = value.as_bigint_and_exponent();
    BigDecimal::new(mantissa, scale + RAY_TO_BPS_SHIFT)
}
