//! Naive baseline forecaster

use super::{ForecastingHorizon, Forecaster};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// How [`NaiveForecaster`] extrapolates the training window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NaiveStrategy {
    /// Repeat the last observed value.
    #[default]
    Last,
    /// Repeat the mean of the (optionally windowed) training data.
    Mean,
    /// Extend the line through the first and last points of the window.
    Drift,
}

/// Baseline forecaster.
///
/// ```rust
/// use forecast_bench::forecaster::{Forecaster, ForecastingHorizon, NaiveForecaster};
///
/// let mut model = NaiveForecaster::default();
/// model.fit(&[2.0, 2.0, 3.0])?;
/// let fh = ForecastingHorizon::new([1, 2])?;
/// assert_eq!(model.predict(&fh)?, vec![3.0, 3.0]);
/// # Ok::<(), forecast_bench::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NaiveForecaster {
    strategy: NaiveStrategy,
    window_length: Option<usize>,
    fitted: Option<Fitted>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Fitted {
    level: f64,
    slope: f64,
}

impl NaiveForecaster {
    /// Create a forecaster with the given strategy over the full window.
    #[must_use]
    pub fn new(strategy: NaiveStrategy) -> Self {
        Self {
            strategy,
            window_length: None,
            fitted: None,
        }
    }

    /// Only use the last `window_length` observations when fitting.
    #[must_use]
    pub const fn with_window_length(mut self, window_length: usize) -> Self {
        self.window_length = Some(window_length);
        self
    }

    /// Configured strategy.
    #[must_use]
    pub const fn strategy(&self) -> NaiveStrategy {
        self.strategy
    }
}

#[allow(clippy::cast_precision_loss)]
impl Forecaster for NaiveForecaster {
    fn name(&self) -> &str {
        "NaiveForecaster"
    }

    fn params(&self) -> serde_json::Value {
        serde_json::json!({
            "strategy": self.strategy,
            "window_length": self.window_length,
        })
    }

    fn fit(&mut self, y: &[f64]) -> Result<()> {
        if let Some(0) = self.window_length {
            return Err(Error::InvalidInput("window_length must be positive".into()));
        }
        let window = match self.window_length {
            Some(w) if w < y.len() => &y[y.len() - w..],
            _ => y,
        };
        let Some(&last) = window.last() else {
            return Err(Error::InsufficientData { required: 1, got: 0 });
        };

        let fitted = match self.strategy {
            NaiveStrategy::Last => Fitted { level: last, slope: 0.0 },
            NaiveStrategy::Mean => Fitted {
                level: window.iter().sum::<f64>() / window.len() as f64,
                slope: 0.0,
            },
            NaiveStrategy::Drift => {
                if window.len() < 2 {
                    return Err(Error::InsufficientData {
                        required: 2,
                        got: window.len(),
                    });
                }
                Fitted {
                    level: last,
                    slope: (last - window[0]) / (window.len() - 1) as f64,
                }
            }
        };
        self.fitted = Some(fitted);
        Ok(())
    }

    fn predict(&self, fh: &ForecastingHorizon) -> Result<Vec<f64>> {
        let fitted = self.fitted.ok_or_else(|| Error::NotFitted {
            estimator: self.name().to_string(),
        })?;
        Ok(fh
            .steps()
            .iter()
            .map(|&h| fitted.slope.mul_add(h as f64, fitted.level))
            .collect())
    }

    fn clone_box(&self) -> Box<dyn Forecaster> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fh(steps: &[usize]) -> ForecastingHorizon {
        ForecastingHorizon::new(steps.to_vec()).unwrap()
    }

    #[test]
    fn test_last_strategy() {
        let mut model = NaiveForecaster::default();
        model.fit(&[1.0, 5.0, 2.0]).unwrap();
        assert_eq!(model.predict(&fh(&[1, 3])).unwrap(), vec![2.0, 2.0]);
    }

    #[test]
    fn test_mean_strategy_with_window() {
        let mut model = NaiveForecaster::new(NaiveStrategy::Mean).with_window_length(2);
        model.fit(&[100.0, 1.0, 3.0]).unwrap();
        assert_eq!(model.predict(&fh(&[1])).unwrap(), vec![2.0]);
    }

    #[test]
    fn test_drift_strategy() {
        let mut model = NaiveForecaster::new(NaiveStrategy::Drift);
        model.fit(&[1.0, 2.0, 3.0]).unwrap();
        let pred = model.predict(&fh(&[1, 2])).unwrap();
        assert!((pred[0] - 4.0).abs() < 1e-12);
        assert!((pred[1] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_drift_needs_two_points() {
        let mut model = NaiveForecaster::new(NaiveStrategy::Drift);
        assert!(matches!(
            model.fit(&[1.0]),
            Err(Error::InsufficientData { required: 2, got: 1 })
        ));
    }

    #[test]
    fn test_predict_before_fit() {
        let model = NaiveForecaster::default();
        assert!(matches!(model.predict(&fh(&[1])), Err(Error::NotFitted { .. })));
    }

    #[test]
    fn test_params_serialize_strategy() {
        let model = NaiveForecaster::new(NaiveStrategy::Mean);
        assert_eq!(model.params()["strategy"], "mean");
        assert!(model.params()["window_length"].is_null());
    }
}
