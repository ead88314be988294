//! Forecasting estimators
//!
//! An estimator is anything that can be fitted on a training window and then
//! forecast a set of relative steps past the end of that window. The
//! benchmark only talks to estimators through [`Forecaster`], so models from
//! other crates plug in by implementing the trait.
//!
//! Two reference models ship with the crate:
//! - [`NaiveForecaster`]: last value, window mean, or drift
//! - [`TrendForecaster`]: least-squares line on the time index

mod naive;
mod trend;

pub use naive::{NaiveForecaster, NaiveStrategy};
pub use trend::TrendForecaster;

use crate::{Error, Result};
use std::fmt;

/// Relative steps to forecast past the training cutoff.
///
/// Steps are strictly positive, sorted and de-duplicated; `[1]` means
/// "the next observation".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastingHorizon {
    steps: Vec<usize>,
}

impl ForecastingHorizon {
    /// Build a horizon from relative steps.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `steps` is empty or contains 0
    pub fn new(steps: impl Into<Vec<usize>>) -> Result<Self> {
        let mut steps = steps.into();
        if steps.is_empty() {
            return Err(Error::InvalidInput(
                "forecasting horizon must contain at least one step".into(),
            ));
        }
        if steps.contains(&0) {
            return Err(Error::InvalidInput(
                "forecasting horizon steps must be strictly positive".into(),
            ));
        }
        steps.sort_unstable();
        steps.dedup();
        Ok(Self { steps })
    }

    /// Horizon covering steps `1..=n`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `n` is 0
    pub fn up_to(n: usize) -> Result<Self> {
        Self::new((1..=n).collect::<Vec<_>>())
    }

    /// Relative steps in ascending order.
    #[must_use]
    pub fn steps(&self) -> &[usize] {
        &self.steps
    }

    /// Furthest step ahead.
    #[must_use]
    pub fn max_step(&self) -> usize {
        // Non-empty by construction
        self.steps.last().copied().unwrap_or(1)
    }

    /// Number of forecast points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// A model that can be benchmarked.
///
/// Implementations must be cheap to clone: the benchmark fits a fresh clone
/// of the registered estimator on every fold so state never leaks between
/// folds.
pub trait Forecaster: fmt::Debug {
    /// Type name, used as the default registry id (e.g. `"NaiveForecaster"`).
    fn name(&self) -> &str;

    /// Hyper-parameters as a JSON object.
    ///
    /// Two estimators with the same name and params are considered equal.
    fn params(&self) -> serde_json::Value;

    /// Fit the model on a training window.
    ///
    /// # Errors
    ///
    /// Returns error if the window is unusable for this model
    fn fit(&mut self, y: &[f64]) -> Result<()>;

    /// Forecast the horizon, relative to the end of the training window.
    ///
    /// Returns one value per horizon step, in step order.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` if called before [`fit`](Self::fit)
    fn predict(&self, fh: &ForecastingHorizon) -> Result<Vec<f64>>;

    /// Clone into a fresh trait object.
    fn clone_box(&self) -> Box<dyn Forecaster>;
}

impl Clone for Box<dyn Forecaster> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizon_sorts_and_dedups() {
        let fh = ForecastingHorizon::new(vec![3, 1, 3, 2]).unwrap();
        assert_eq!(fh.steps(), &[1, 2, 3]);
        assert_eq!(fh.max_step(), 3);
        assert_eq!(fh.len(), 3);
    }

    #[test]
    fn test_horizon_rejects_zero_and_empty() {
        assert!(ForecastingHorizon::new([0]).is_err());
        assert!(ForecastingHorizon::new(Vec::<usize>::new()).is_err());
        assert!(ForecastingHorizon::up_to(0).is_err());
    }

    #[test]
    fn test_boxed_clone_is_independent() {
        let mut original: Box<dyn Forecaster> = Box::new(NaiveForecaster::default());
        let copy = original.clone();
        original.fit(&[1.0, 2.0]).unwrap();
        let fh = ForecastingHorizon::new([1]).unwrap();
        assert!(original.predict(&fh).is_ok());
        assert!(copy.predict(&fh).is_err());
    }
}
