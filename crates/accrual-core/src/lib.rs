//! # accrual-core
//! Foundation types, constants, configuration and traits for measuring the
//! precision loss of fixed-point RAY interest accrual.

pub mod config;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

pub use config::ModelConfig;
pub use error::AccrualError;
pub use traits::AccrualModel;
pub use types::{ExactValue, FixedPoint, LossMode, Precision, PrecisionLoss, RateSpec};
