//! Fixed-point model replaying the contract's integer arithmetic.
//!
//! Every division truncates, in the same order the contract performs it:
//!
//! ```text
//! annualRateRay   = uint256(rate) * RAY / 10000
//! ratePerSecond   = (annualRateRay / 365 days).toUint96()
//! growthFactor    = RAY + ratePerSecond * elapsed
//! nextIndex       = index * growthFactor / RAY
//! ```
//!
//! Values are arbitrary-width integers so nothing wraps silently; the
//! contract's `uint96` storage slot and `uint256` word are checked
//! explicitly and surface as errors where the chain would revert.

use accrual_core::constants::{
    BPS_PRECISION, MAX_RATE_BPS, RAY, SECONDS_PER_YEAR, UINT256_BITS, UINT96_BITS,
};
use accrual_core::config::ModelConfig;
use accrual_core::error::{AccrualError, ArithmeticError, ConfigError};
use accrual_core::traits::AccrualModel;
use accrual_core::types::{ExactValue, FixedPoint, RateSpec};
use num_bigint::BigUint;
use num_traits::Zero;

/// Truncating integer model of the on-chain accrual.
#[derive(Debug, Clone)]
pub struct FixedPointModel {
    max_rate_bps: u64,
    ray: BigUint,
}

impl FixedPointModel {
    pub fn new(max_rate_bps: u64) -> Self {
        Self {
            max_rate_bps,
            ray: BigUint::from(RAY),
        }
    }

    pub fn from_config(config: &ModelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.max_rate_bps))
    }

    pub fn max_rate_bps(&self) -> u64 {
        self.max_rate_bps
    }

    /// `rate * RAY / 10000`, the contract's annual rate in ray units.
    pub fn annual_rate_ray(&self, annual_rate_bps: u64) -> Result<FixedPoint, AccrualError> {
        RateSpec::new(annual_rate_bps, 0).validate(self.max_rate_bps)?;
        let annual = mul_div_down(
            &BigUint::from(annual_rate_bps),
            &self.ray,
            &BigUint::from(BPS_PRECISION),
        )?;
        Ok(FixedPoint::from_raw(annual))
    }
}

impl Default for FixedPointModel {
    fn default() -> Self {
        Self::new(MAX_RATE_BPS)
    }
}

/// `floor(a * b / d)`, multiplying first as the contract does.
pub fn mul_div_down(a: &BigUint, b: &BigUint, d: &BigUint) -> Result<BigUint, ArithmeticError> {
    if d.is_zero() {
        return Err(ArithmeticError::DivisionByZero);
    }
    let product = a * b;
    check_word(&product)?;
    Ok(product / d)
}

fn check_word(value: &BigUint) -> Result<(), ArithmeticError> {
    let bits = value.bits();
    if bits > UINT256_BITS {
        return Err(ArithmeticError::Uint256Overflow { bits });
    }
    Ok(())
}

impl AccrualModel for FixedPointModel {
    type Value = FixedPoint;

    fn name(&self) -> &'static str {
        "fixed"
    }

    fn unit(&self) -> FixedPoint {
        FixedPoint::ray()
    }

    fn rate_per_second(&self, annual_rate_bps: u64) -> Result<FixedPoint, AccrualError> {
        let annual = self.annual_rate_ray(annual_rate_bps)?;
        let rate = annual.into_raw() / BigUint::from(SECONDS_PER_YEAR);

        // toUint96()
        if rate.bits() > UINT96_BITS {
            return Err(ArithmeticError::Uint96Overflow(rate.to_string()).into());
        }
        Ok(FixedPoint::from_raw(rate))
    }

    fn growth_factor(
        &self,
        rate_per_second: &FixedPoint,
        elapsed_seconds: u64,
    ) -> Result<FixedPoint, AccrualError> {
        let accumulated = rate_per_second.as_raw() * BigUint::from(elapsed_seconds);
        check_word(&accumulated)?;
        let factor = &self.ray + accumulated;
        check_word(&factor)?;
        Ok(FixedPoint::from_raw(factor))
    }

    fn apply_growth_factor(
        &self,
        index: &FixedPoint,
        growth_factor: &FixedPoint,
    ) -> Result<FixedPoint, AccrualError> {
        let next = mul_div_down(index.as_raw(), growth_factor.as_raw(), &self.ray)?;
        Ok(FixedPoint::from_raw(next))
    }

    fn to_exact(&self, value: &FixedPoint) -> ExactValue {
        value.to_exact()
    }
}
