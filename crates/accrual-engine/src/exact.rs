//! Exact model: the fixed-point formulas without any truncation.
//!
//! Each operation is carried at the model's working precision. The only
//! non-terminating step is the division by the number of seconds in a year,
//! so `fixed - exact` isolates what integer truncation costs.

use accrual_core::config::ModelConfig;
use accrual_core::constants::{BPS_PRECISION, MAX_RATE_BPS, SECONDS_PER_YEAR};
use accrual_core::error::{AccrualError, ConfigError};
use accrual_core::traits::AccrualModel;
use accrual_core::types::{ExactValue, Precision, RateSpec, ray_exact};
use bigdecimal::BigDecimal;

use crate::decimal::{div_to_precision, round, shift_down_ray};

/// Full-precision decimal model of the on-chain accrual formulas.
#[derive(Debug, Clone)]
pub struct ExactModel {
    precision: Precision,
    max_rate_bps: u64,
    ray: ExactValue,
}

impl ExactModel {
    pub fn new(precision: Precision, max_rate_bps: u64) -> Self {
        Self {
            precision,
            max_rate_bps,
            ray: ray_exact(),
        }
    }

    pub fn from_config(config: &ModelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.precision()?, config.max_rate_bps))
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }
}

impl Default for ExactModel {
    fn default() -> Self {
        Self::new(Precision::default(), MAX_RATE_BPS)
    }
}

impl AccrualModel for ExactModel {
    type Value = ExactValue;

    fn name(&self) -> &'static str {
        "exact"
    }

    fn unit(&self) -> ExactValue {
        self.ray.clone()
    }

    fn rate_per_second(&self, annual_rate_bps: u64) -> Result<ExactValue, AccrualError> {
        RateSpec::new(annual_rate_bps, 0).validate(self.max_rate_bps)?;
        let annual = div_to_precision(
            &(BigDecimal::from(annual_rate_bps) * &self.ray),
            &BigDecimal::from(BPS_PRECISION),
            self.precision,
        )?;
        Ok(div_to_precision(
            &annual,
            &BigDecimal::from(SECONDS_PER_YEAR),
            self.precision,
        )?)
    }

    fn growth_factor(
        &self,
        rate_per_second: &ExactValue,
        elapsed_seconds: u64,
    ) -> Result<ExactValue, AccrualError> {
        let accumulated = rate_per_second * BigDecimal::from(elapsed_seconds);
        Ok(round(&self.ray + accumulated, self.precision))
    }

    fn apply_growth_factor(
        &self,
        index: &ExactValue,
        growth_factor: &ExactValue,
    ) -> Result<ExactValue, AccrualError> {
        Ok(round(shift_down_ray(index * growth_factor), self.precision))
    }

    fn to_exact(&self, value: &ExactValue) -> ExactValue {
        value.clone()
    }
}
