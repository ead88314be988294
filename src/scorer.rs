//! Forecast error metrics
//!
//! A [`Scorer`] turns one fold's forecast and ground truth into a scalar.
//! The scorer's name doubles as the prefix of its result columns
//! (`{name}_fold_{i}_test`, `{name}_mean`, `{name}_std`) and of its artefact
//! files, so names must be unique within a task.

use crate::{Error, Result};
use std::fmt;

/// Floor for percentage-error denominators (machine epsilon for `f64`).
pub const PERCENTAGE_EPS: f64 = f64::EPSILON;

/// A forecast error metric.
pub trait Scorer: fmt::Debug {
    /// Metric name (e.g. `"MeanAbsoluteError"`).
    fn name(&self) -> &str;

    /// Score a forecast against ground truth.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the series are empty or differ in length
    fn score(&self, y_true: &[f64], y_pred: &[f64]) -> Result<f64>;
}

fn check_lengths(y_true: &[f64], y_pred: &[f64]) -> Result<()> {
    if y_true.is_empty() {
        return Err(Error::InvalidInput("cannot score an empty series".into()));
    }
    if y_true.len() != y_pred.len() {
        return Err(Error::InvalidInput(format!(
            "y_true has {} points but y_pred has {}",
            y_true.len(),
            y_pred.len()
        )));
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn mean_of(y_true: &[f64], y_pred: &[f64], err: impl Fn(f64, f64) -> f64) -> Result<f64> {
    check_lengths(y_true, y_pred)?;
    let total: f64 = y_true.iter().zip(y_pred).map(|(&t, &p)| err(t, p)).sum();
    Ok(total / y_true.len() as f64)
}

fn percentage_error(t: f64, p: f64) -> f64 {
    (t - p).abs() / t.abs().max(PERCENTAGE_EPS)
}

macro_rules! scorer {
    ($(#[$doc:meta])* $ty:ident, $err:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $ty;

        impl Scorer for $ty {
            fn name(&self) -> &str {
                stringify!($ty)
            }

            fn score(&self, y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
                mean_of(y_true, y_pred, $err)
            }
        }
    };
}

scorer!(
    /// Mean of `|y - ŷ|`.
    MeanAbsoluteError,
    |t, p| (t - p).abs()
);

scorer!(
    /// Mean of `(y - ŷ)²`.
    MeanSquaredError,
    |t, p| (t - p).powi(2)
);

scorer!(
    /// Mean of `|y - ŷ| / |y|`, as a fraction (not multiplied by 100).
    MeanAbsolutePercentageError,
    percentage_error
);

scorer!(
    /// Mean of `(|y - ŷ| / |y|)²`.
    MeanSquaredPercentageError,
    |t, p| percentage_error(t, p).powi(2)
);
