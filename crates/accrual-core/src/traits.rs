//! Trait interface between the scenario runner and the arithmetic models.
//!
//! [`AccrualModel`] is implemented by the fixed-point model (truncating
//! integer arithmetic) and the exact model (full-precision decimals) in
//! accrual-engine. Both compute the same linear accrual formulas; only the
//! arithmetic differs.

use std::fmt::Debug;

use crate::error::AccrualError;
use crate::types::{ExactValue, RateSpec};

/// The linear per-update accrual scheme of the modeled contract.
///
/// All values are in ray units. Implementations are pure: every method maps
/// its inputs to a value with no shared state, so one model can serve many
/// scenarios concurrently.
pub trait AccrualModel: Send + Sync {
    type Value: Clone + Debug + PartialEq;

    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// The "no growth" baseline: one unit of principal.
    fn unit(&self) -> Self::Value;

    /// Rate accrued per second for an annual rate in basis points.
    ///
    /// Rejects rates above the model's cap before any arithmetic.
    fn rate_per_second(&self, annual_rate_bps: u64) -> Result<Self::Value, AccrualError>;

    /// Linear growth factor `RAY + rate_per_second * elapsed_seconds`.
    fn growth_factor(
        &self,
        rate_per_second: &Self::Value,
        elapsed_seconds: u64,
    ) -> Result<Self::Value, AccrualError>;

    /// Next index after one update: `index * growth_factor / RAY`.
    fn apply_growth_factor(
        &self,
        index: &Self::Value,
        growth_factor: &Self::Value,
    ) -> Result<Self::Value, AccrualError>;

    /// Lossless conversion to an exact decimal in ray units.
    fn to_exact(&self, value: &Self::Value) -> ExactValue;

    /// Growth factor for a single update spanning `spec.time_seconds`.
    ///
    /// Default implementation: `growth_factor(rate_per_second(rate), time)`.
    fn single_step_factor(&self, spec: &RateSpec) -> Result<Self::Value, AccrualError> {
        let rate = self.rate_per_second(spec.annual_rate_bps)?;
        self.growth_factor(&rate, spec.time_seconds)
    }

    /// Index after `steps` sequential updates of `interval_seconds` each,
    /// starting from [`unit`](Self::unit).
    ///
    /// The rate per second and the per-update factor are derived once, the
    /// way the contract stores its rate and reuses it on every update.
    fn accrue(
        &self,
        annual_rate_bps: u64,
        interval_seconds: u64,
        steps: u64,
    ) -> Result<Self::Value, AccrualError> {
        let rate = self.rate_per_second(annual_rate_bps)?;
        let factor = self.growth_factor(&rate, interval_seconds)?;
        let mut index = self.unit();
        for _ in 0..steps {
            index = self.apply_growth_factor(&index, &factor)?;
        }
        Ok(index)
    }
}
