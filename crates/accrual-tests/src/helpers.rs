//! Shared helpers for the integration tests.

use std::str::FromStr;

use accrual_core::config::ModelConfig;
use accrual_core::types::{ExactValue, LossMode};
use accrual_engine::scenario::ScenarioRunner;
use bigdecimal::BigDecimal;
use tracing_subscriber::EnvFilter;

pub const ONE_MINUTE: u64 = 60;
pub const ONE_HOUR: u64 = 3_600;
pub const ONE_DAY: u64 = 86_400;
pub const ONE_WEEK: u64 = 604_800;
pub const THIRTY_DAYS: u64 = 2_592_000;

/// Install a test-writer subscriber filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Runner with the default configuration (50 digits, 5000 bps cap, absolute).
pub fn default_runner() -> ScenarioRunner {
    ScenarioRunner::default()
}

/// Runner reporting signed losses.
pub fn signed_runner() -> ScenarioRunner {
    ScenarioRunner::default().with_loss_mode(LossMode::Signed)
}

/// Runner at a custom working precision.
pub fn runner_with_precision(digits: u64) -> ScenarioRunner {
    let config = ModelConfig {
        precision_digits: digits,
        ..ModelConfig::default()
    };
    ScenarioRunner::new(&config).unwrap()
}

/// Parse a decimal literal.
pub fn dec(s: &str) -> ExactValue {
    BigDecimal::from_str(s).unwrap()
}

/// `|a - b| <= tolerance`.
pub fn approx_eq(a: &ExactValue, b: &ExactValue, tolerance: &str) -> bool {
    (a - b).abs() <= dec(tolerance)
}
