//! Model configuration.
//!
//! Provides [`ModelConfig`] with the working precision, the annual-rate cap and
//! the loss sign convention. Values are layered defaults → optional config
//! file → `ACCRUAL_*` environment variables, and validated before any model
//! is built from them.

use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PRECISION_DIGITS, ENV_PREFIX, MAX_RATE_BPS};
use crate::error::ConfigError;
use crate::types::{LossMode, Precision};

/// Configuration shared by every model of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Significant digits carried by the exact and continuous models.
    pub precision_digits: u64,
    /// Highest accepted annual rate, in basis points.
    pub max_rate_bps: u64,
    /// Sign convention for every pairwise loss a runner reports.
    pub loss_mode: LossMode,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            precision_digits: DEFAULT_PRECISION_DIGITS,
            max_rate_bps: MAX_RATE_BPS,
            loss_mode: LossMode::Absolute,
        }
    }
}

impl ModelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        Precision::new(self.precision_digits)?;
        if self.max_rate_bps == 0 {
            return Err(ConfigError::ZeroRateCap);
        }
        Ok(())
    }

    /// The validated working precision.
    pub fn precision(&self) -> Result<Precision, ConfigError> {
        Precision::new(self.precision_digits)
    }

    /// Defaults overridden by `ACCRUAL_PRECISION_DIGITS`, `ACCRUAL_MAX_RATE_BPS`
    /// and `ACCRUAL_LOSS_MODE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Defaults, then `path` (any format the `config` crate infers from the
    /// extension), then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_layers(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_layers(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("precision_digits", defaults.precision_digits as i64)?
            .set_default("max_rate_bps", defaults.max_rate_bps as i64)?
            .set_default("loss_mode", "absolute")?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let cfg: Self = builder
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }
}
