//! Scenario runner: drives the three models over one parameter set and
//! compares their outputs.
//!
//! A cumulative run applies `floor(total / interval)` updates. Any remainder
//! shorter than one interval is dropped, since the modeled contract only
//! accrues when an update happens; the dropped seconds are reported.

use accrual_core::config::ModelConfig;
use accrual_core::error::{AccrualError, ConfigError, ScenarioError};
use accrual_core::traits::AccrualModel;
use accrual_core::types::{ExactValue, FixedPoint, LossMode, PrecisionLoss, RateSpec};
use serde::Serialize;
use tracing::{debug, trace};

use crate::continuous::ContinuousModel;
use crate::evaluator::{ray_loss, truncation_bound_bps};
use crate::exact::ExactModel;
use crate::fixed_point::FixedPointModel;

/// Outcome of applying a single `RateSpec` to every model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleStepReport {
    pub spec: RateSpec,
    pub fixed_rate_per_second: FixedPoint,
    pub exact_rate_per_second: ExactValue,
    /// Fixed vs exact rate per second, in bps of RAY.
    pub rate_per_second_loss: PrecisionLoss,
    pub fixed_factor: FixedPoint,
    pub exact_factor: ExactValue,
    pub continuous_factor: ExactValue,
    pub fixed_vs_exact: PrecisionLoss,
    pub fixed_vs_continuous: PrecisionLoss,
    pub exact_vs_continuous: PrecisionLoss,
    pub truncation_bound_bps: ExactValue,
}

/// Outcome of repeated updates at a fixed cadence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CumulativeReport {
    pub annual_rate_bps: u64,
    pub total_seconds: u64,
    pub update_interval_seconds: u64,
    pub step_count: u64,
    pub dropped_remainder_seconds: u64,
    pub fixed_index: FixedPoint,
    pub exact_index: ExactValue,
    /// Continuous factor over the full `total_seconds`.
    pub continuous_factor: ExactValue,
    pub fixed_vs_exact: PrecisionLoss,
    pub fixed_vs_continuous: PrecisionLoss,
    pub exact_vs_continuous: PrecisionLoss,
    pub truncation_bound_bps: ExactValue,
}

/// Runs single-step and cumulative scenarios against the fixed-point, exact
/// and continuous models.
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    fixed: FixedPointModel,
    exact: ExactModel,
    continuous: ContinuousModel,
    loss_mode: LossMode,
}

impl ScenarioRunner {
    pub fn new(config: &ModelConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            fixed: FixedPointModel::from_config(config)?,
            exact: ExactModel::from_config(config)?,
            continuous: ContinuousModel::from_config(config)?,
            loss_mode: config.loss_mode,
        })
    }

    /// Same runner with every pairwise metric in `mode`.
    pub fn with_loss_mode(mut self, mode: LossMode) -> Self {
        self.loss_mode = mode;
        self
    }

    pub fn fixed(&self) -> &FixedPointModel {
        &self.fixed
    }

    pub fn exact(&self) -> &ExactModel {
        &self.exact
    }

    pub fn continuous(&self) -> &ContinuousModel {
        &self.continuous
    }

    pub fn loss_mode(&self) -> LossMode {
        self.loss_mode
    }

    /// Apply one update spanning `spec.time_seconds` to each model.
    pub fn run_single_step(&self, spec: RateSpec) -> Result<SingleStepReport, AccrualError> {
        spec.validate(self.fixed.max_rate_bps())?;
        debug!(
            rate_bps = spec.annual_rate_bps,
            time_seconds = spec.time_seconds,
            "scenario: single step"
        );

        let continuous_factor = self.continuous.factor_for(&spec)?;
        let fixed_rate = self.fixed.rate_per_second(spec.annual_rate_bps)?;
        let exact_rate = self.exact.rate_per_second(spec.annual_rate_bps)?;
        let fixed_factor = self.fixed.growth_factor(&fixed_rate, spec.time_seconds)?;
        let exact_factor = self.exact.growth_factor(&exact_rate, spec.time_seconds)?;

        let fixed_exact = fixed_factor.to_exact();
        let report = SingleStepReport {
            spec,
            rate_per_second_loss: self.loss(&fixed_rate.to_exact(), &exact_rate),
            fixed_vs_exact: self.loss(&fixed_exact, &exact_factor),
            fixed_vs_continuous: self.loss(&fixed_exact, &continuous_factor),
            exact_vs_continuous: self.loss(&exact_factor, &continuous_factor),
            truncation_bound_bps: truncation_bound_bps(1, spec.time_seconds, &exact_factor),
            fixed_rate_per_second: fixed_rate,
            exact_rate_per_second: exact_rate,
            fixed_factor,
            exact_factor,
            continuous_factor,
        };

        trace!(
            model = self.fixed.name(),
            factor = %report.fixed_factor,
            "scenario: model factor"
        );
        trace!(
            model = self.exact.name(),
            factor = %report.exact_factor,
            "scenario: model factor"
        );
        trace!(
            fixed_vs_exact = %report.fixed_vs_exact.basis_points,
            exact_vs_continuous = %report.exact_vs_continuous.basis_points,
            "scenario: single step done"
        );
        Ok(report)
    }

    /// Accrue for `total_seconds` with an update every `update_interval_seconds`.
    pub fn run_cumulative(
        &self,
        annual_rate_bps: u64,
        total_seconds: u64,
        update_interval_seconds: u64,
    ) -> Result<CumulativeReport, AccrualError> {
        RateSpec::new(annual_rate_bps, total_seconds).validate(self.fixed.max_rate_bps())?;
        if update_interval_seconds == 0 {
            return Err(ScenarioError::ZeroUpdateInterval.into());
        }

        // range-checks the horizon before any per-step work
        let continuous_factor = self
            .continuous
            .continuous_growth_factor(annual_rate_bps, total_seconds)?;

        let step_count = total_seconds / update_interval_seconds;
        let dropped_remainder_seconds = total_seconds % update_interval_seconds;
        debug!(
            rate_bps = annual_rate_bps,
            total_seconds,
            interval = update_interval_seconds,
            steps = step_count,
            "scenario: cumulative run"
        );
        if dropped_remainder_seconds > 0 {
            debug!(
                dropped = dropped_remainder_seconds,
                interval = update_interval_seconds,
                "scenario: remainder shorter than one interval dropped"
            );
        }

        let fixed_index = self
            .fixed
            .accrue(annual_rate_bps, update_interval_seconds, step_count)?;
        trace!(model = self.fixed.name(), index = %fixed_index, "scenario: model index");
        let exact_index = self
            .exact
            .accrue(annual_rate_bps, update_interval_seconds, step_count)?;
        trace!(model = self.exact.name(), index = %exact_index, "scenario: model index");

        let fixed_exact = fixed_index.to_exact();
        let report = CumulativeReport {
            annual_rate_bps,
            total_seconds,
            update_interval_seconds,
            step_count,
            dropped_remainder_seconds,
            fixed_vs_exact: self.loss(&fixed_exact, &exact_index),
            fixed_vs_continuous: self.loss(&fixed_exact, &continuous_factor),
            exact_vs_continuous: self.loss(&exact_index, &continuous_factor),
            truncation_bound_bps: truncation_bound_bps(
                step_count,
                update_interval_seconds,
                &exact_index,
            ),
            fixed_index,
            exact_index,
            continuous_factor,
        };

        trace!(
            fixed_vs_exact = %report.fixed_vs_exact.basis_points,
            bound = %report.truncation_bound_bps,
            "scenario: cumulative run done"
        );
        Ok(report)
    }

    fn loss(&self, a: &ExactValue, b: &ExactValue) -> PrecisionLoss {
        ray_loss(a, b, self.loss_mode)
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self {
            fixed: FixedPointModel::default(),
            exact: ExactModel::default(),
            continuous: ContinuousModel::default(),
            loss_mode: LossMode::default(),
        }
    }
}
