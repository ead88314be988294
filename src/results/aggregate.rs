//! Per-fold scores and their summary statistics

use serde::{Deserialize, Serialize};

/// One scorer's value on one fold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldScore {
    scorer: String,
    fold: usize,
    value: f64,
}

impl FoldScore {
    /// Create a fold score.
    #[must_use]
    pub fn new(scorer: impl Into<String>, fold: usize, value: f64) -> Self {
        Self {
            scorer: scorer.into(),
            fold,
            value,
        }
    }

    /// Scorer name.
    #[must_use]
    pub fn scorer(&self) -> &str {
        &self.scorer
    }

    /// Zero-based fold index.
    #[must_use]
    pub const fn fold(&self) -> usize {
        self.fold
    }

    /// Score value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }
}

/// Fold scores of one estimator x task evaluation.
#[derive(Debug, Default, Clone)]
pub struct FoldScores {
    scores: Vec<FoldScore>,
}

impl FoldScores {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a score.
    pub fn add(&mut self, score: FoldScore) {
        self.scores.push(score);
    }

    /// Number of recorded scores.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Check if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Scores of one scorer, ordered by fold.
    #[must_use]
    pub fn for_scorer(&self, scorer: &str) -> Vec<&FoldScore> {
        let mut scores: Vec<&FoldScore> =
            self.scores.iter().filter(|s| s.scorer() == scorer).collect();
        scores.sort_by_key(|s| s.fold());
        scores
    }

    /// Summary statistics of one scorer across folds.
    #[must_use]
    pub fn summary(&self, scorer: &str) -> Summary {
        let values: Vec<f64> = self.for_scorer(scorer).iter().map(|s| s.value()).collect();
        Summary::of(&values)
    }
}

/// Mean and sample standard deviation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Arithmetic mean, `NaN` for no values
    pub mean: f64,
    /// Sample standard deviation (ddof = 1), `NaN` for fewer than two values
    pub std: f64,
}

impl Summary {
    /// Summarize `values`.
    #[must_use]
    pub fn of(values: &[f64]) -> Self {
        Self {
            mean: mean(values),
            std: sample_std(values),
        }
    }
}

/// Arithmetic mean; `NaN` for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (ddof = 1); `NaN` for fewer than two values.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}
