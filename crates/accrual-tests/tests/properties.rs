//! Property-based precision suite.
//!
//! Properties checked for arbitrary valid inputs:
//! - Zero elapsed time yields exactly one unit in every model, zero loss
//! - Fixed-vs-exact loss never exceeds the analytic truncation bound
//! - The fixed model never over-counts relative to the exact model
//! - One update spanning the whole horizon equals the single-step factor
//! - Linear and continuous factors grow strictly with time
//! - Linear-vs-continuous loss grows strictly with time
//! - Signed and absolute runners agree in magnitude

use accrual_core::constants::{MAX_RATE_BPS, RAY};
use accrual_core::types::{FixedPoint, RateSpec, ray_exact};
use accrual_tests::helpers::*;
use bigdecimal::BigDecimal;
use num_bigint::BigUint;
use proptest::prelude::*;

const ONE_YEAR: u64 = 31_536_000;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn zero_time_is_one_unit(bps in 0u64..=MAX_RATE_BPS) {
        let r = default_runner().run_single_step(RateSpec::new(bps, 0)).unwrap();
        prop_assert_eq!(&r.fixed_factor, &FixedPoint::ray());
        prop_assert_eq!(&r.exact_factor, &ray_exact());
        prop_assert_eq!(&r.continuous_factor, &ray_exact());
        prop_assert!(r.fixed_vs_exact.is_zero());
        prop_assert!(r.fixed_vs_continuous.is_zero());
        prop_assert!(r.exact_vs_continuous.is_zero());
    }

    #[test]
    fn single_step_loss_within_bound(bps in 0u64..=MAX_RATE_BPS, secs in 0u64..=ONE_YEAR) {
        let r = default_runner().run_single_step(RateSpec::new(bps, secs)).unwrap();
        prop_assert!(r.fixed_vs_exact.basis_points <= r.truncation_bound_bps);
    }

    #[test]
    fn fixed_never_exceeds_exact(bps in 0u64..=MAX_RATE_BPS, secs in 0u64..=ONE_YEAR) {
        let r = signed_runner().run_single_step(RateSpec::new(bps, secs)).unwrap();
        prop_assert!(r.fixed_vs_exact.basis_points <= BigDecimal::from(0));
        prop_assert!(r.rate_per_second_loss.basis_points <= BigDecimal::from(0));
    }

    #[test]
    fn linear_factors_monotonic(bps in 1u64..=MAX_RATE_BPS, a in 0u64..=ONE_YEAR, b in 0u64..=ONE_YEAR) {
        prop_assume!(a != b);
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let runner = default_runner();
        let r_lo = runner.run_single_step(RateSpec::new(bps, lo)).unwrap();
        let r_hi = runner.run_single_step(RateSpec::new(bps, hi)).unwrap();
        prop_assert!(r_lo.fixed_factor < r_hi.fixed_factor);
        prop_assert!(r_lo.exact_factor < r_hi.exact_factor);
        prop_assert!(r_lo.continuous_factor < r_hi.continuous_factor);
    }

    #[test]
    fn linear_vs_continuous_loss_grows(bps in 1u64..=MAX_RATE_BPS, a in 1u64..=ONE_YEAR, b in 1u64..=ONE_YEAR) {
        prop_assume!(a != b);
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let runner = default_runner();
        let r_lo = runner.run_single_step(RateSpec::new(bps, lo)).unwrap();
        let r_hi = runner.run_single_step(RateSpec::new(bps, hi)).unwrap();
        prop_assert!(r_lo.exact_vs_continuous.basis_points < r_hi.exact_vs_continuous.basis_points);
    }

    #[test]
    fn signed_and_absolute_agree(bps in 0u64..=MAX_RATE_BPS, secs in 0u64..=ONE_YEAR) {
        let spec = RateSpec::new(bps, secs);
        let abs = default_runner().run_single_step(spec).unwrap();
        let signed = signed_runner().run_single_step(spec).unwrap();
        prop_assert_eq!(signed.exact_vs_continuous.basis_points.abs(), abs.exact_vs_continuous.basis_points);
        prop_assert_eq!(signed.fixed_vs_exact.basis_points.abs(), abs.fixed_vs_exact.basis_points);
    }
}

proptest! {
    // Exact-model steps are comparatively slow; keep horizons short.
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn cumulative_loss_within_bound(
        bps in 0u64..=MAX_RATE_BPS,
        interval in 1u64..=ONE_WEEK,
        steps in 0u64..=64,
        remainder in 0u64..ONE_MINUTE,
    ) {
        prop_assume!(remainder < interval);
        let total = interval * steps + remainder;
        let r = default_runner().run_cumulative(bps, total, interval).unwrap();
        prop_assert_eq!(r.step_count, steps);
        prop_assert_eq!(r.dropped_remainder_seconds, remainder);
        prop_assert!(r.fixed_vs_exact.basis_points <= r.truncation_bound_bps);
        prop_assert!(r.fixed_index.as_raw() >= &BigUint::from(RAY));
    }

    #[test]
    fn whole_horizon_interval_matches_single_step(bps in 0u64..=MAX_RATE_BPS, total in 1u64..=ONE_YEAR) {
        let runner = default_runner();
        let cumulative = runner.run_cumulative(bps, total, total).unwrap();
        let single = runner.run_single_step(RateSpec::new(bps, total)).unwrap();
        prop_assert_eq!(cumulative.step_count, 1);
        prop_assert_eq!(&cumulative.fixed_index, &single.fixed_factor);
        prop_assert_eq!(&cumulative.continuous_factor, &single.continuous_factor);
    }

    #[test]
    fn compounding_never_loses_to_single_step(bps in 1u64..=MAX_RATE_BPS, interval in 1u64..=ONE_DAY, steps in 2u64..=32) {
        let total = interval * steps;
        let runner = default_runner();
        let cumulative = runner.run_cumulative(bps, total, interval).unwrap();
        let single = runner.run_single_step(RateSpec::new(bps, total)).unwrap();
        prop_assert!(cumulative.exact_index > single.exact_factor);
        prop_assert!(cumulative.exact_index < single.continuous_factor);
    }
}
