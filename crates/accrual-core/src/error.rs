//! Error types for the accrual models.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RateSpecError {
    #[error("negative annual rate: {0} bps")] NegativeRate(i64),
    #[error("negative time span: {0} seconds")] NegativeTime(i64),
    #[error("annual rate {rate_bps} bps exceeds cap of {cap_bps} bps")] RateAboveCap { rate_bps: u64, cap_bps: u64 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("working precision of {digits} digits is below the {minimum}-digit floor")] PrecisionBelowFloor { digits: u64, minimum: u64 },
    #[error("rate cap must be positive")] ZeroRateCap,
    #[error("config source: {0}")] Source(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        Self::Source(err.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("division by zero")] DivisionByZero,
    #[error("rate per second {0} does not fit in uint96")] Uint96Overflow(String),
    #[error("intermediate value of {bits} bits exceeds uint256")] Uint256Overflow { bits: u64 },
    #[error("exponent {exponent} exceeds the limit of {limit}")] ExponentOutOfRange { exponent: String, limit: u32 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("update interval must be non-zero")] ZeroUpdateInterval,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccrualError {
    #[error(transparent)] RateSpec(#[from] RateSpecError),
    #[error(transparent)] Config(#[from] ConfigError),
    #[error(transparent)] Arithmetic(#[from] ArithmeticError),
    #[error(transparent)] Scenario(#[from] ScenarioError),
}
