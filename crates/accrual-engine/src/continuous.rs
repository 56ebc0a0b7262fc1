//! Continuous-compounding reference: `e^(rate * time)` at working precision.
//!
//! The exponent `bps * elapsed / (10000 * SECONDS_PER_YEAR)` is kept as an
//! exact integer ratio. It is halved until below `1/256`, summed as a Taylor
//! series in scaled-integer arithmetic, then squared back up. Guard digits
//! grow with the number of squarings, since each squaring doubles the
//! relative error carried into it.
//!
//! [`continuous_growth_factor_f64`] is a double-precision bridge for
//! comparing against legacy float tables. It is never used as a reference;
//! its error is bounded separately by [`f64_relative_error_bound`].

use accrual_core::config::ModelConfig;
use accrual_core::constants::{BPS_PRECISION, MAX_RATE_BPS, SECONDS_PER_YEAR};
use accrual_core::error::{AccrualError, ArithmeticError, ConfigError};
use accrual_core::types::{ExactValue, Precision, RateSpec, unit_to_ray};
use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use crate::decimal::{pow10, round};

/// Series digits carried beyond the working precision.
pub const EXP_GUARD_DIGITS: u64 = 12;

/// Largest accepted exponent: `e^115 * RAY` still fits a `uint256` word,
/// `e^116 * RAY` does not.
pub const MAX_EXPONENT: u32 = 115;

/// The reduced argument is below `1 / REDUCTION_DIVISOR`.
const REDUCTION_DIVISOR: u32 = 256;

/// `e^(annual rate * elapsed / year)` at a fixed working precision.
#[derive(Debug, Clone)]
pub struct ContinuousModel {
    precision: Precision,
    max_rate_bps: u64,
}

impl ContinuousModel {
    pub fn new(precision: Precision, max_rate_bps: u64) -> Self {
        Self {
            precision,
            max_rate_bps,
        }
    }

    pub fn from_config(config: &ModelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.precision()?, config.max_rate_bps))
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Continuous growth factor in ray units.
    ///
    /// Exactly `RAY` when either the rate or the elapsed time is zero.
    pub fn continuous_growth_factor(
        &self,
        annual_rate_bps: u64,
        elapsed_seconds: u64,
    ) -> Result<ExactValue, AccrualError> {
        RateSpec::new(annual_rate_bps, elapsed_seconds).validate(self.max_rate_bps)?;

        let numer = BigUint::from(annual_rate_bps) * BigUint::from(elapsed_seconds);
        let denom = BigUint::from(BPS_PRECISION) * BigUint::from(SECONDS_PER_YEAR);
        let factor = exp_ratio(&numer, &denom, self.precision)?;
        Ok(round(unit_to_ray(&factor), self.precision))
    }

    pub fn factor_for(&self, spec: &RateSpec) -> Result<ExactValue, AccrualError> {
        self.continuous_growth_factor(spec.annual_rate_bps, spec.time_seconds)
    }
}

impl Default for ContinuousModel {
    fn default() -> Self {
        Self::new(Precision::default(), MAX_RATE_BPS)
    }
}

/// `e^(numer / denom)` to `precision` significant digits.
///
/// Exponents above [`MAX_EXPONENT`] are rejected before any series work.
pub fn exp_ratio(
    numer: &BigUint,
    denom: &BigUint,
    precision: Precision,
) -> Result<ExactValue, ArithmeticError> {
    if denom.is_zero() {
        return Err(ArithmeticError::DivisionByZero);
    }
    if numer > &(denom * MAX_EXPONENT) {
        return Err(ArithmeticError::ExponentOutOfRange {
            exponent: format!("{numer}/{denom}"),
            limit: MAX_EXPONENT,
        });
    }

    // Smallest k with numer / (denom * 2^k) < 1 / REDUCTION_DIVISOR.
    let target = numer * REDUCTION_DIVISOR;
    let mut halvings: u32 = 0;
    while (denom << halvings) <= target {
        halvings += 1;
    }

    let work_digits = precision.digits() + EXP_GUARD_DIGITS + u64::from(halvings) / 3 + 1;
    let scale = pow10(work_digits);

    // y = x / 2^k, scaled by 10^work_digits
    let y = (numer * &scale) / (denom << halvings);

    let mut sum = scale.clone();
    let mut term = scale.clone();
    let mut n: u32 = 1;
    loop {
        term = term * &y / (&scale * n);
        if term.is_zero() {
            break;
        }
        sum += &term;
        n += 1;
    }

    for _ in 0..halvings {
        sum = &sum * &sum / &scale;
    }

    let value = BigDecimal::new(BigInt::from(sum), work_digits as i64);
    Ok(round(value, precision))
}

/// Double-precision continuous factor in units of principal.
///
/// Mirrors the legacy float computation. Use only for comparison with
/// float-derived tables; the error is bounded by
/// [`f64_relative_error_bound`], not by the working precision.
pub fn continuous_growth_factor_f64(annual_rate_bps: u64, elapsed_seconds: u64) -> f64 {
    f64_exponent(annual_rate_bps, elapsed_seconds).exp()
}

/// Relative error bound of [`continuous_growth_factor_f64`].
///
/// The exponent picks up at most 1.5 ulp from its three rounded operations,
/// which `exp` amplifies by the exponent itself; `exp` adds at most 1 ulp.
/// `4 * EPSILON * (1 + x)` covers both with margin for converting the result.
pub fn f64_relative_error_bound(annual_rate_bps: u64, elapsed_seconds: u64) -> f64 {
    4.0 * f64::EPSILON * (1.0 + f64_exponent(annual_rate_bps, elapsed_seconds))
}

fn f64_exponent(annual_rate_bps: u64, elapsed_seconds: u64) -> f64 {
    annual_rate_bps as f64 / BPS_PRECISION as f64 * elapsed_seconds as f64
        / SECONDS_PER_YEAR as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use accrual_core::error::RateSpecError;
    use accrual_core::types::{ray_exact, ray_to_unit};
    use num_traits::ToPrimitive;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn model() -> ContinuousModel {
        ContinuousModel::default()
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn p50() -> Precision {
        Precision::default()
    }

    #[test]
    fn exp_of_zero_is_one() {
        let e = exp_ratio(&BigUint::zero(), &BigUint::from(7u32), p50()).unwrap();
        assert_eq!(e, BigDecimal::from(1));
    }

    #[test]
    fn exp_of_one_matches_e() {
        let e = exp_ratio(&BigUint::from(1u32), &BigUint::from(1u32), p50()).unwrap();
        let expected = dec("2.7182818284590452353602874713526624977572470937000");
        assert!((e - expected).abs() < dec("1e-48"));
    }

    #[test]
    fn exp_of_large_argument() {
        // e^10 = 22026.465794806716516957900645284244366353512618556781...
        let e = exp_ratio(&BigUint::from(10u32), &BigUint::from(1u32), p50()).unwrap();
        let expected = dec("22026.465794806716516957900645284244366353512618557");
        assert!((e - expected).abs() < dec("1e-43"));
    }

    #[test]
    fn exp_zero_denominator_rejected() {
        assert_eq!(
            exp_ratio(&BigUint::from(1u32), &BigUint::zero(), p50()),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn exponent_limit_fits_uint256() {
        let e = exp_ratio(&BigUint::from(MAX_EXPONENT), &BigUint::from(1u32), p50()).unwrap();
        let scaled = unit_to_ray(&e).with_scale(0);
        let word = BigDecimal::from(BigInt::from(BigUint::from(1u32) << 256u32));
        assert!(scaled < word);
        // one more and e^x * RAY no longer fits
        let next = unit_to_ray(&(&e * dec("2.718281828459045"))).with_scale(0);
        assert!(next > word);
    }

    #[test]
    fn exponent_above_limit_rejected() {
        let err = exp_ratio(&BigUint::from(MAX_EXPONENT * 2 + 1), &BigUint::from(2u32), p50()).unwrap_err();
        assert_eq!(
            err,
            ArithmeticError::ExponentOutOfRange { exponent: "231/2".into(), limit: MAX_EXPONENT }
        );
    }

    #[test]
    fn unbounded_time_rejected_not_computed() {
        let err = model().continuous_growth_factor(5000, u64::MAX).unwrap_err();
        assert!(
            matches!(err, AccrualError::Arithmetic(ArithmeticError::ExponentOutOfRange { .. })),
            "{err:?}"
        );
    }

    #[test]
    fn longest_accepted_horizon_at_cap() {
        // 5000 bps: x = 115 at 115 * 2 years
        let limit_secs = u64::from(MAX_EXPONENT) * 2 * SECONDS_PER_YEAR;
        assert!(model().continuous_growth_factor(5000, limit_secs).is_ok());
        assert!(model().continuous_growth_factor(5000, limit_secs + 1).is_err());
    }

    #[test]
    fn zero_time_is_exactly_ray() {
        let m = model();
        assert_eq!(m.continuous_growth_factor(5000, 0).unwrap(), ray_exact());
        assert_eq!(m.continuous_growth_factor(0, 2_592_000).unwrap(), ray_exact());
    }

    #[test]
    fn thirty_days_at_ten_percent() {
        let factor = model().continuous_growth_factor(1000, 2_592_000).unwrap();
        let expected = dec("1.0082530482577737433280144833681780440159600399253");
        let diff = (ray_to_unit(&factor) - expected).abs();
        assert!(diff < dec("1e-45"), "diff = {diff}");
    }

    #[test]
    fn one_day_at_ten_percent() {
        let factor = model().continuous_growth_factor(1000, 86_400).unwrap();
        let expected = dec("1000274010136660929117592652.46481926249070066828537");
        assert!((factor - expected).abs() < dec("1e-20"));
    }

    #[test]
    fn rate_above_cap_rejected() {
        assert_eq!(
            model().continuous_growth_factor(5001, 1).unwrap_err(),
            AccrualError::RateSpec(RateSpecError::RateAboveCap { rate_bps: 5001, cap_bps: 5000 })
        );
    }

    #[test]
    fn higher_precision_is_consistent() {
        let wide = ContinuousModel::new(Precision::new(100).unwrap(), MAX_RATE_BPS);
        let a = model().continuous_growth_factor(5000, 31_536_000 * 3).unwrap();
        let b = wide.continuous_growth_factor(5000, 31_536_000 * 3).unwrap();
        // e^1.5 * RAY, 50 vs 100 digits
        assert!((a - b).abs() < dec("1e-20"));
    }

    #[test]
    fn f64_bridge_within_documented_bound() {
        for &(bps, secs) in &[(1000u64, 1u64), (1000, 86_400), (5000, 2_592_000), (5000, 31_536_000)] {
            let precise = ray_to_unit(&model().continuous_growth_factor(bps, secs).unwrap())
                .to_f64()
                .unwrap();
            let bridge = continuous_growth_factor_f64(bps, secs);
            let rel = ((bridge - precise) / precise).abs();
            assert!(
                rel <= f64_relative_error_bound(bps, secs),
                "({bps}, {secs}): relative error {rel:e}"
            );
        }
    }

    proptest! {
        #[test]
        fn continuous_monotonic_in_time(bps in 1u64..=5000, a in 0u64..31_536_000, b in 0u64..31_536_000) {
            let m = model();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let f_lo = m.continuous_growth_factor(bps, lo).unwrap();
            let f_hi = m.continuous_growth_factor(bps, hi).unwrap();
            if lo < hi {
                prop_assert!(f_lo < f_hi);
            } else {
                prop_assert_eq!(f_lo, f_hi);
            }
        }

        #[test]
        fn continuous_at_least_linear(bps in 0u64..=5000, secs in 0u64..100_000_000) {
            // e^x >= 1 + x
            let m = model();
            let factor = ray_to_unit(&m.continuous_growth_factor(bps, secs).unwrap());
            let x = dec(&bps.to_string()) * dec(&secs.to_string())
                / dec(&(BPS_PRECISION * SECONDS_PER_YEAR).to_string());
            prop_assert!(factor >= BigDecimal::from(1) + x - dec("1e-40"));
        }
    }
}
