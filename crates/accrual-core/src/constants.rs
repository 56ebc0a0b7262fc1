//! Model constants. Fixed-point quantities are scaled by [`RAY`] (10^27).

/// One unit of principal in the modeled contract's fixed-point representation.
///
/// # Examples
///
/// ```
/// use accrual_core::constants::{RAY, RAY_DECIMALS};
/// assert_eq!(RAY, 10u128.pow(RAY_DECIMALS));
/// ```
pub const RAY: u128 = 1_000_000_000_000_000_000_000_000_000;

/// Number of decimal places encoded by [`RAY`].
pub const RAY_DECIMALS: u32 = 27;

/// Basis points per unit (100% = 10_000 bps).
pub const BPS_PRECISION: u64 = 10_000;

pub const SECONDS_PER_DAY: u64 = 86_400;

pub const DAYS_PER_YEAR: u64 = 365;

/// Seconds in the modeled contract's year (`365 days`, no leap handling).
///
/// # Examples
///
/// ```
/// use accrual_core::constants::SECONDS_PER_YEAR;
/// assert_eq!(SECONDS_PER_YEAR, 31_536_000);
/// ```
pub const SECONDS_PER_YEAR: u64 = DAYS_PER_YEAR * SECONDS_PER_DAY;

/// Default cap on the annual rate (50% APR), the modeled contract's `MAX_SAFE_RATE`.
pub const MAX_RATE_BPS: u64 = 5_000;

/// Floor on the exact models' working precision, in significant digits.
pub const MIN_PRECISION_DIGITS: u64 = 50;

/// Working precision used when no configuration overrides it.
pub const DEFAULT_PRECISION_DIGITS: u64 = MIN_PRECISION_DIGITS;

/// Width of the storage slot holding the contract's rate per second (`uint96`).
pub const UINT96_BITS: u64 = 96;

/// Width of the contract's arithmetic word (`uint256`).
pub const UINT256_BITS: u64 = 256;

/// Prefix for environment variables read by [`crate::config::ModelConfig::from_env`].
pub const ENV_PREFIX: &str = "ACCRUAL";
