//! Linear trend forecaster

use super::{ForecastingHorizon, Forecaster};
use crate::{Error, Result};

/// Least-squares line fitted on the time index `0..n`, extrapolated forward.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrendForecaster {
    fitted: Option<Line>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Line {
    intercept: f64,
    slope: f64,
    // Time index of the last training observation
    cutoff: f64,
}

impl TrendForecaster {
    /// Create an unfitted trend forecaster.
    #[must_use]
    pub const fn new() -> Self {
        Self { fitted: None }
    }
}

#[allow(clippy::cast_precision_loss)]
impl Forecaster for TrendForecaster {
    fn name(&self) -> &str {
        "TrendForecaster"
    }

    fn params(&self) -> serde_json::Value {
        serde_json::json!({})
    }

    fn fit(&mut self, y: &[f64]) -> Result<()> {
        if y.is_empty() {
            return Err(Error::InsufficientData { required: 1, got: 0 });
        }
        let n = y.len() as f64;
        let t_mean = (n - 1.0) / 2.0;
        let y_mean = y.iter().sum::<f64>() / n;

        let (mut sxy, mut sxx) = (0.0, 0.0);
        for (t, &v) in y.iter().enumerate() {
            let dt = t as f64 - t_mean;
            sxy += dt * (v - y_mean);
            sxx += dt * dt;
        }
        // A single point has no slope
        let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };

        self.fitted = Some(Line {
            intercept: slope.mul_add(-t_mean, y_mean),
            slope,
            cutoff: n - 1.0,
        });
        Ok(())
    }

    fn predict(&self, fh: &ForecastingHorizon) -> Result<Vec<f64>> {
        let line = self.fitted.ok_or_else(|| Error::NotFitted {
            estimator: self.name().to_string(),
        })?;
        Ok(fh
            .steps()
            .iter()
            .map(|&h| line.slope.mul_add(line.cutoff + h as f64, line.intercept))
            .collect())
    }

    fn clone_box(&self) -> Box<dyn Forecaster> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_line_is_recovered() {
        let mut model = TrendForecaster::new();
        model.fit(&[1.0, 3.0, 5.0, 7.0]).unwrap();
        let fh = ForecastingHorizon::new([1, 2]).unwrap();
        let pred = model.predict(&fh).unwrap();
        assert!((pred[0] - 9.0).abs() < 1e-9);
        assert!((pred[1] - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_point_is_flat() {
        let mut model = TrendForecaster::new();
        model.fit(&[4.0]).unwrap();
        let fh = ForecastingHorizon::new([5]).unwrap();
        assert_eq!(model.predict(&fh).unwrap(), vec![4.0]);
    }

    #[test]
    fn test_empty_window_rejected() {
        let mut model = TrendForecaster::new();
        assert!(model.fit(&[]).is_err());
    }
}
