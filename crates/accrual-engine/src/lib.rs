//! # accrual-engine
//!
//! Measures how much precision a fixed-point RAY (`10^27`) interest accrual
//! loses against exact and continuous references:
//! - **Fixed-point model**: replays the contract's truncating integer
//!   arithmetic, including its `uint96` and `uint256` limits.
//! - **Exact model**: the same linear formulas at an explicit decimal
//!   working precision.
//! - **Continuous model**: `e^(rate * time)` as the compounding reference.
//! - **Evaluator**: pairwise differences in basis points of principal, plus
//!   an analytic bound on truncation drift.
//! - **Scenario runner**: single-step and cumulative comparisons.

pub mod continuous;
pub mod decimal;
pub mod evaluator;
pub mod exact;
pub mod fixed_point;
pub mod recorded;
pub mod scenario;

pub use continuous::ContinuousModel;
pub use evaluator::{precision_loss, precision_loss_bps, truncation_bound_bps};
pub use exact::ExactModel;
pub use fixed_point::FixedPointModel;
pub use recorded::{RECORDED_GROWTH_FACTORS, verify_recorded_factors};
pub use scenario::{CumulativeReport, ScenarioRunner, SingleStepReport};
