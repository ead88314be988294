//! Property-based tests for forecast-bench
//!
//! - Test splitter invariants (ordering, no look-ahead)
//! - Test scorer and summary invariants
//! - Run with ProptestConfig::with_cases(100)

use forecast_bench::forecaster::ForecastingHorizon;
use forecast_bench::results::{mean, sample_std};
use forecast_bench::scorer::{
    MeanAbsoluteError, MeanAbsolutePercentageError, MeanSquaredError,
    MeanSquaredPercentageError, Scorer,
};
use forecast_bench::splitter::{ExpandingWindowSplitter, SlidingWindowSplitter, Splitter};
use proptest::prelude::*;

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

/// Generate a pair of equal-length series
fn arb_series_pair(max_len: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (1..=max_len).prop_flat_map(|n| {
        (
            proptest::collection::vec(-1000.0f64..1000.0, n),
            proptest::collection::vec(-1000.0f64..1000.0, n),
        )
    })
}

/// Generate a forecasting horizon of 1..=4 distinct steps up to 6
fn arb_horizon() -> impl Strategy<Value = ForecastingHorizon> {
    proptest::collection::btree_set(1usize..=6, 1..=4)
        .prop_map(|steps| ForecastingHorizon::new(steps.into_iter().collect::<Vec<_>>()).unwrap())
}

fn all_scorers() -> Vec<Box<dyn Scorer>> {
    vec![
        Box::new(MeanAbsoluteError),
        Box::new(MeanSquaredError),
        Box::new(MeanAbsolutePercentageError),
        Box::new(MeanSquaredPercentageError),
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ========================================================================
    // Splitter Properties
    // ========================================================================

    /// Property: expanding folds start at 0 and test strictly after training
    #[test]
    fn prop_expanding_no_look_ahead(
        n in 0usize..60,
        window in 1usize..10,
        step in 1usize..4,
        fh in arb_horizon()
    ) {
        let splitter = ExpandingWindowSplitter::new(window, step, fh.clone()).unwrap();
        let folds = splitter.split(n).unwrap();
        for fold in &folds {
            prop_assert_eq!(fold.train().start, 0);
            prop_assert!(fold.train().len() >= window);
            prop_assert_eq!(fold.test().len(), fh.len());
            for &t in fold.test() {
                prop_assert!(t >= fold.train().end);
                prop_assert!(t < n);
            }
        }
    }

    /// Property: expanding fold count matches the number of cutoffs
    #[test]
    fn prop_expanding_fold_count(
        n in 0usize..60,
        window in 1usize..10,
        step in 1usize..4,
        fh in arb_horizon()
    ) {
        let splitter = ExpandingWindowSplitter::new(window, step, fh.clone()).unwrap();
        let folds = splitter.split(n).unwrap();
        let last_end = (n + 1).saturating_sub(fh.max_step());
        let expected = if last_end > window { (last_end - window).div_ceil(step) } else { 0 };
        prop_assert_eq!(folds.len(), expected);
    }

    /// Property: sliding windows keep a fixed length and advance by step
    #[test]
    fn prop_sliding_fixed_window(
        n in 0usize..60,
        window in 1usize..10,
        step in 1usize..4,
        fh in arb_horizon()
    ) {
        let splitter = SlidingWindowSplitter::new(window, step, fh).unwrap();
        let folds = splitter.split(n).unwrap();
        for pair in folds.windows(2) {
            prop_assert_eq!(pair[1].train().start - pair[0].train().start, step);
        }
        for fold in &folds {
            prop_assert_eq!(fold.train().len(), window);
        }
    }

    // ========================================================================
    // Scorer Properties
    // ========================================================================

    /// Property: every scorer is non-negative and zero on a perfect forecast
    #[test]
    fn prop_scores_non_negative((y_true, y_pred) in arb_series_pair(30)) {
        for scorer in all_scorers() {
            let score = scorer.score(&y_true, &y_pred).unwrap();
            prop_assert!(score >= 0.0, "{} negative: {}", scorer.name(), score);
            prop_assert_eq!(scorer.score(&y_true, &y_true).unwrap(), 0.0);
        }
    }

    /// Property: MAE is bounded by the largest absolute error
    #[test]
    fn prop_mae_bounded_by_max_error((y_true, y_pred) in arb_series_pair(30)) {
        let mae = MeanAbsoluteError.score(&y_true, &y_pred).unwrap();
        let max_err = y_true
            .iter()
            .zip(&y_pred)
            .map(|(t, p)| (t - p).abs())
            .fold(0.0f64, f64::max);
        prop_assert!(mae <= max_err + 1e-9);
    }

    // ========================================================================
    // Summary Properties
    // ========================================================================

    /// Property: mean lies within the fold values, std is non-negative
    #[test]
    fn prop_summary_bounds(values in proptest::collection::vec(-1e6f64..1e6, 2..20)) {
        let m = mean(&values);
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(m >= lo - 1e-6 && m <= hi + 1e-6);
        prop_assert!(sample_std(&values) >= 0.0);
    }
}
