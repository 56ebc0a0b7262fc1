//! Value types shared by the accrual models.
//!
//! Growth factors and yield indices are expressed in ray units everywhere:
//! one unit of principal is [`RAY`](crate::constants::RAY), whether the value
//! is a truncated [`FixedPoint`] or a full-precision [`ExactValue`]. This keeps
//! every pair of model outputs directly comparable.

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint, ParseBigIntError};
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{MIN_PRECISION_DIGITS, RAY, RAY_DECIMALS};
use crate::error::{ConfigError, RateSpecError};

/// Arbitrary-precision decimal used by the exact and continuous models.
pub type ExactValue = BigDecimal;

/// An annual rate applied over a time span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RateSpec {
    /// Annual rate in basis points (1000 = 10% APR).
    pub annual_rate_bps: u64,
    /// Elapsed time in seconds.
    pub time_seconds: u64,
}

impl RateSpec {
    pub fn new(annual_rate_bps: u64, time_seconds: u64) -> Self {
        Self {
            annual_rate_bps,
            time_seconds,
        }
    }

    /// Build a spec from signed inputs, rejecting negative rates and times.
    ///
    /// # Examples
    ///
    /// ```
    /// use accrual_core::error::RateSpecError;
    /// use accrual_core::types::RateSpec;
    ///
    /// assert_eq!(RateSpec::try_from_signed(1000, 60).unwrap(), RateSpec::new(1000, 60));
    /// assert_eq!(
    ///     RateSpec::try_from_signed(-1, 60),
    ///     Err(RateSpecError::NegativeRate(-1))
    /// );
    /// ```
    pub fn try_from_signed(annual_rate_bps: i64, time_seconds: i64) -> Result<Self, RateSpecError> {
        let rate = u64::try_from(annual_rate_bps)
            .map_err(|_| RateSpecError::NegativeRate(annual_rate_bps))?;
        let time =
            u64::try_from(time_seconds).map_err(|_| RateSpecError::NegativeTime(time_seconds))?;
        Ok(Self::new(rate, time))
    }

    /// Check the rate against a cap in basis points.
    pub fn validate(&self, cap_bps: u64) -> Result<(), RateSpecError> {
        if self.annual_rate_bps > cap_bps {
            return Err(RateSpecError::RateAboveCap {
                rate_bps: self.annual_rate_bps,
                cap_bps,
            });
        }
        Ok(())
    }
}

/// Working precision of the exact models, in significant decimal digits.
///
/// Fixed at model construction. Never lower than
/// [`MIN_PRECISION_DIGITS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Precision(u64);

impl Precision {
    pub fn new(digits: u64) -> Result<Self, ConfigError> {
        if digits < MIN_PRECISION_DIGITS {
            return Err(ConfigError::PrecisionBelowFloor {
                digits,
                minimum: MIN_PRECISION_DIGITS,
            });
        }
        Ok(Self(digits))
    }

    pub const fn digits(self) -> u64 {
        self.0
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self(MIN_PRECISION_DIGITS)
    }
}

impl TryFrom<u64> for Precision {
    type Error = ConfigError;

    fn try_from(digits: u64) -> Result<Self, Self::Error> {
        Self::new(digits)
    }
}

/// A non-negative integer scaled by RAY, as the modeled contract stores it.
///
/// Backed by an arbitrary-width integer so that no intermediate product can
/// wrap. Width limits of the contract's storage are checked explicitly by the
/// fixed-point model instead.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FixedPoint(BigUint);

impl FixedPoint {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// One unit of principal (`RAY`).
    pub fn ray() -> Self {
        Self(BigUint::from(RAY))
    }

    pub fn from_raw(raw: BigUint) -> Self {
        Self(raw)
    }

    pub fn as_raw(&self) -> &BigUint {
        &self.0
    }

    pub fn into_raw(self) -> BigUint {
        self.0
    }

    pub fn bits(&self) -> u64 {
        self.0.bits()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// The same quantity as an exact decimal in ray units (lossless).
    pub fn to_exact(&self) -> ExactValue {
        BigDecimal::new(BigInt::from(self.0.clone()), 0)
    }

    /// The quantity in units of principal (`raw / RAY`, lossless).
    ///
    /// # Examples
    ///
    /// ```
    /// use accrual_core::types::FixedPoint;
    /// use bigdecimal::BigDecimal;
    ///
    /// assert_eq!(FixedPoint::ray().to_unit(), BigDecimal::from(1));
    /// ```
    pub fn to_unit(&self) -> ExactValue {
        BigDecimal::new(BigInt::from(self.0.clone()), i64::from(RAY_DECIMALS))
    }
}

impl From<u128> for FixedPoint {
    fn from(raw: u128) -> Self {
        Self(BigUint::from(raw))
    }
}

impl From<u64> for FixedPoint {
    fn from(raw: u64) -> Self {
        Self(BigUint::from(raw))
    }
}

impl From<BigUint> for FixedPoint {
    fn from(raw: BigUint) -> Self {
        Self(raw)
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for FixedPoint {
    type Err = ParseBigIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigUint::from_str(s).map(Self)
    }
}

// Decimal strings keep 10^27-scale values readable in JSON reports.
impl Serialize for FixedPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for FixedPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One unit of principal as an exact decimal in ray units.
pub fn ray_exact() -> ExactValue {
    BigDecimal::new(BigInt::from(RAY), 0)
}

/// Convert a ray-unit value to units of principal (divide by RAY, lossless).
pub fn ray_to_unit(value: &ExactValue) -> ExactValue {
    let (mantissa, scale) = value.as_bigint_and_exponent();
    BigDecimal::new(mantissa, scale + i64::from(RAY_DECIMALS))
}

/// Convert a value in units of principal to ray units (multiply by RAY, lossless).
pub fn unit_to_ray(value: &ExactValue) -> ExactValue {
    let (mantissa, scale) = value.as_bigint_and_exponent();
    BigDecimal::new(mantissa, scale - i64::from(RAY_DECIMALS))
}

/// Whether a precision-loss metric keeps the sign of the difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LossMode {
    /// `|a - b|`, never negative.
    #[default]
    Absolute,
    /// `a - b`; positive when `a` over-counts interest relative to `b`.
    Signed,
}

/// Divergence between two values, relative to one unit of principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrecisionLoss {
    /// Difference in the inputs' own units (ray units for model outputs).
    pub difference: ExactValue,
    /// Difference in basis points of principal.
    pub basis_points: ExactValue,
    pub mode: LossMode,
}

impl PrecisionLoss {
    pub fn is_zero(&self) -> bool {
        self.basis_points.is_zero()
    }
}
