//! Growth factors recorded from the modeled contract's own test run.
//!
//! The fixed-point model must reproduce each of these bit-for-bit; the
//! exact model shows how far each recorded value sits from the untruncated
//! formula.

use accrual_core::error::AccrualError;
use accrual_core::traits::AccrualModel;
use accrual_core::types::{ExactValue, FixedPoint, RateSpec};
use bigdecimal::BigDecimal;
use num_traits::Zero;
use serde::Serialize;

use crate::decimal::div_to_precision;
use crate::evaluator::precision_loss_bps;
use crate::exact::ExactModel;
use crate::fixed_point::FixedPointModel;

/// One `(rate, period) -> growth factor` observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordedFactor {
    pub annual_rate_bps: u64,
    pub period_seconds: u64,
    pub growth_factor: u128,
}

const fn rec(annual_rate_bps: u64, period_seconds: u64, growth_factor: u128) -> RecordedFactor {
    RecordedFactor {
        annual_rate_bps,
        period_seconds,
        growth_factor,
    }
}

/// 10%, 25% and 50% APR over one second, minute, hour, day, week and 30 days.
pub const RECORDED_GROWTH_FACTORS: [RecordedFactor; 18] = [
    rec(1000, 1, 1_000_000_003_170_979_198_376_458_650),
    rec(1000, 60, 1_000_000_190_258_751_902_587_519_000),
    rec(1000, 3_600, 1_000_011_415_525_114_155_251_140_000),
    rec(1000, 86_400, 1_000_273_972_602_739_726_027_360_000),
    rec(1000, 604_800, 1_001_917_808_219_178_082_191_520_000),
    rec(1000, 2_592_000, 1_008_219_178_082_191_780_820_800_000),
    rec(2500, 1, 1_000_000_007_927_447_995_941_146_626),
    rec(2500, 60, 1_000_000_475_646_879_756_468_797_560),
    rec(2500, 3_600, 1_000_028_538_812_785_388_127_853_600),
    rec(2500, 86_400, 1_000_684_931_506_849_315_068_486_400),
    rec(2500, 604_800, 1_004_794_520_547_945_205_479_404_800),
    rec(2500, 2_592_000, 1_020_547_945_205_479_452_054_592_000),
    rec(5000, 1, 1_000_000_015_854_895_991_882_293_252),
    rec(5000, 60, 1_000_000_951_293_759_512_937_595_120),
    rec(5000, 3_600, 1_000_057_077_625_570_776_255_707_200),
    rec(5000, 86_400, 1_001_369_863_013_698_630_136_972_800),
    rec(5000, 604_800, 1_009_589_041_095_890_410_958_809_600),
    rec(5000, 2_592_000, 1_041_095_890_410_958_904_109_184_000),
];

/// Comparison of one recorded factor against both models.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedCheck {
    pub recorded: RecordedFactor,
    pub fixed_factor: FixedPoint,
    pub exact_factor: ExactValue,
    /// Recorded vs exact, absolute bps.
    pub difference_bps: ExactValue,
}

impl RecordedCheck {
    pub fn fixed_matches(&self) -> bool {
        self.fixed_factor == FixedPoint::from(self.recorded.growth_factor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedSummary {
    pub checks: Vec<RecordedCheck>,
    pub max_difference_bps: ExactValue,
    pub mean_difference_bps: ExactValue,
    /// Rows the fixed-point model failed to reproduce.
    pub mismatches: usize,
}

impl RecordedSummary {
    pub fn all_match(&self) -> bool {
        self.mismatches == 0
    }
}

/// Recompute every entry of [`RECORDED_GROWTH_FACTORS`] with both models.
pub fn verify_recorded_factors(
    fixed: &FixedPointModel,
    exact: &ExactModel,
) -> Result<RecordedSummary, AccrualError> {
    verify_factors(&RECORDED_GROWTH_FACTORS, fixed, exact)
}

/// Recompute an arbitrary table of recorded factors.
pub fn verify_factors(
    table: &[RecordedFactor],
    fixed: &FixedPointModel,
    exact: &ExactModel,
) -> Result<RecordedSummary, AccrualError> {
    let mut checks = Vec::with_capacity(table.len());
    let mut max = BigDecimal::zero();
    let mut total = BigDecimal::zero();

    for recorded in table {
        let spec = RateSpec::new(recorded.annual_rate_bps, recorded.period_seconds);
        let fixed_factor = fixed.single_step_factor(&spec)?;
        let exact_factor = exact.single_step_factor(&spec)?;
        let difference_bps =
            precision_loss_bps(&FixedPoint::from(recorded.growth_factor).to_exact(), &exact_factor);

        if difference_bps > max {
            max = difference_bps.clone();
        }
        total += &difference_bps;
        checks.push(RecordedCheck {
            recorded: *recorded,
            fixed_factor,
            exact_factor,
            difference_bps,
        });
    }

    let mean = if checks.is_empty() {
        BigDecimal::zero()
    } else {
        div_to_precision(&total, &BigDecimal::from(checks.len() as u64), exact.precision())?
    };
    let mismatches = checks.iter().filter(|c| !c.fixed_matches()).count();

    Ok(RecordedSummary {
        checks,
        max_difference_bps: max,
        mean_difference_bps: mean,
        mismatches,
    })
}
