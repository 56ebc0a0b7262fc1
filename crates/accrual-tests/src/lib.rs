//! End-to-end precision test suite for the accrual engine.
//!
//! Integration tests drive the scenario runner across rates, horizons and
//! update cadences and check the loss properties that must hold for any
//! valid input: zero loss at zero time, truncation drift within its analytic
//! bound, and monotonic growth.

pub mod helpers;
