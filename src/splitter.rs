//! Temporal cross-validation splitters
//!
//! A splitter turns a series length into an ordered list of [`Fold`]s. Each
//! fold trains on a contiguous window ending at its *cutoff* and tests on
//! `cutoff + h` for every step `h` of the forecasting horizon, so test points
//! always lie strictly after the training window.
//!
//! ```text
//! expanding (initial_window=2, step_length=1, fh=[1]) over 5 points
//!
//!   fold 0: [* *] o . .
//!   fold 1: [* * *] o .
//!   fold 2: [* * * *] o
//! ```

use crate::forecaster::ForecastingHorizon;
use crate::{Error, Result};
use std::fmt;
use std::ops::Range;

/// One train/test split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    train: Range<usize>,
    test: Vec<usize>,
}

impl Fold {
    /// Create a fold for a custom splitter.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the training window or the test list is
    /// empty, or a test position does not lie after the training window
    pub fn new(train: Range<usize>, test: Vec<usize>) -> Result<Self> {
        if train.is_empty() {
            return Err(Error::InvalidInput(format!(
                "empty training window {train:?}"
            )));
        }
        if test.is_empty() {
            return Err(Error::InvalidInput("fold has no test positions".into()));
        }
        if let Some(t) = test.iter().find(|&&t| t < train.end) {
            return Err(Error::InvalidInput(format!(
                "test position {t} is not after training window {train:?}"
            )));
        }
        Ok(Self { train, test })
    }

    /// Training window (absolute positions).
    #[must_use]
    pub fn train(&self) -> Range<usize> {
        self.train.clone()
    }

    /// Test positions, one per horizon step.
    #[must_use]
    pub fn test(&self) -> &[usize] {
        &self.test
    }

    /// Position of the last training observation.
    #[must_use]
    pub const fn cutoff(&self) -> usize {
        self.train.end - 1
    }
}

/// Produces folds over a series.
///
/// Implementations outside this crate build their folds with [`Fold::new`].
pub trait Splitter: fmt::Debug {
    /// Type name, used in validation ids (e.g. `"ExpandingWindowSplitter"`).
    fn name(&self) -> &str;

    /// Horizon every fold is tested on.
    fn fh(&self) -> &ForecastingHorizon;

    /// Split a series of length `n` into folds, in evaluation order.
    ///
    /// A series too short for even one fold yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the splitter is misconfigured
    fn split(&self, n: usize) -> Result<Vec<Fold>>;
}

fn validate(initial_window: usize, step_length: usize) -> Result<()> {
    if initial_window == 0 {
        return Err(Error::InvalidInput("window length must be positive".into()));
    }
    if step_length == 0 {
        return Err(Error::InvalidInput("step_length must be positive".into()));
    }
    Ok(())
}

// Shared walk over split points: training windows end (exclusively) at
// `window, window + step, ...` while the furthest horizon step stays in range.
fn windows(
    n: usize,
    window: usize,
    step: usize,
    fh: &ForecastingHorizon,
    train_start: impl Fn(usize) -> usize,
) -> Vec<Fold> {
    let Some(last_end) = (n + 1).checked_sub(fh.max_step()) else {
        return Vec::new();
    };
    (window..last_end)
        .step_by(step)
        .map(|end| Fold {
            train: train_start(end)..end,
            test: fh.steps().iter().map(|h| end - 1 + h).collect(),
        })
        .collect()
}

/// Training window grows from the start of the series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandingWindowSplitter {
    initial_window: usize,
    step_length: usize,
    fh: ForecastingHorizon,
}

impl ExpandingWindowSplitter {
    /// Create an expanding-window splitter.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `initial_window` or `step_length` is 0
    pub fn new(initial_window: usize, step_length: usize, fh: ForecastingHorizon) -> Result<Self> {
        validate(initial_window, step_length)?;
        Ok(Self {
            initial_window,
            step_length,
            fh,
        })
    }
}

impl Splitter for ExpandingWindowSplitter {
    fn name(&self) -> &str {
        "ExpandingWindowSplitter"
    }

    fn fh(&self) -> &ForecastingHorizon {
        &self.fh
    }

    fn split(&self, n: usize) -> Result<Vec<Fold>> {
        Ok(windows(n, self.initial_window, self.step_length, &self.fh, |_| 0))
    }
}

/// Fixed-length training window slides along the series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidingWindowSplitter {
    window_length: usize,
    step_length: usize,
    fh: ForecastingHorizon,
}

impl SlidingWindowSplitter {
    /// Create a sliding-window splitter.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `window_length` or `step_length` is 0
    pub fn new(window_length: usize, step_length: usize, fh: ForecastingHorizon) -> Result<Self> {
        validate(window_length, step_length)?;
        Ok(Self {
            window_length,
            step_length,
            fh,
        })
    }
}

impl Splitter for SlidingWindowSplitter {
    fn name(&self) -> &str {
        "SlidingWindowSplitter"
    }

    fn fh(&self) -> &ForecastingHorizon {
        &self.fh
    }

    fn split(&self, n: usize) -> Result<Vec<Fold>> {
        let w = self.window_length;
        Ok(windows(n, w, self.step_length, &self.fh, |end| end - w))
    }
}
