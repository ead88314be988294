//! Wide result rows and their builder

use super::aggregate::FoldScores;
use serde::{Deserialize, Serialize};

/// Name of the validation id column.
pub const VALIDATION_ID: &str = "validation_id";
/// Name of the model id column.
pub const MODEL_ID: &str = "model_id";
/// Name of the runtime column.
pub const RUNTIME_SECS: &str = "runtime_secs";

/// Column holding a scorer's value on fold `fold`.
#[must_use]
pub fn fold_column(scorer: &str, fold: usize) -> String {
    format!("{scorer}_fold_{fold}_test")
}

/// Column holding a scorer's mean across folds.
#[must_use]
pub fn mean_column(scorer: &str) -> String {
    format!("{scorer}_mean")
}

/// Column holding a scorer's sample standard deviation across folds.
#[must_use]
pub fn std_column(scorer: &str) -> String {
    format!("{scorer}_std")
}

/// Result of one estimator x task evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    validation_id: String,
    model_id: String,
    runtime_secs: f64,
    metrics: Vec<(String, f64)>,
}

impl ResultRow {
    /// Create a builder for a row.
    #[must_use]
    pub fn builder(
        validation_id: impl Into<String>,
        model_id: impl Into<String>,
    ) -> ResultRowBuilder {
        ResultRowBuilder::new(validation_id, model_id)
    }

    /// Task id.
    #[must_use]
    pub fn validation_id(&self) -> &str {
        &self.validation_id
    }

    /// Estimator id.
    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Wall-clock seconds spent on the evaluation.
    #[must_use]
    pub const fn runtime_secs(&self) -> f64 {
        self.runtime_secs
    }

    /// Metric columns in order.
    #[must_use]
    pub fn metrics(&self) -> &[(String, f64)] {
        &self.metrics
    }

    /// Value of a metric column (`runtime_secs` included).
    #[must_use]
    pub fn metric(&self, column: &str) -> Option<f64> {
        if column == RUNTIME_SECS {
            return Some(self.runtime_secs);
        }
        self.metrics
            .iter()
            .find(|(name, _)| name == column)
            .map(|&(_, v)| v)
    }
}

/// Builder for `ResultRow`.
///
/// Columns are kept in insertion order; setting a column twice keeps the
/// first position and the last value.
#[derive(Debug)]
pub struct ResultRowBuilder {
    validation_id: String,
    model_id: String,
    runtime_secs: f64,
    metrics: Vec<(String, f64)>,
}

impl ResultRowBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(validation_id: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            validation_id: validation_id.into(),
            model_id: model_id.into(),
            runtime_secs: 0.0,
            metrics: Vec::new(),
        }
    }

    /// Set the runtime.
    #[must_use]
    pub const fn runtime_secs(mut self, secs: f64) -> Self {
        self.runtime_secs = secs;
        self
    }

    /// Set a metric column.
    #[must_use]
    pub fn column(mut self, name: impl Into<String>, value: f64) -> Self {
        let name = name.into();
        match self.metrics.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.metrics.push((name, value)),
        }
        self
    }

    /// Add a scorer's fold columns followed by its mean and std.
    #[must_use]
    pub fn scorer(mut self, scorer: &str, scores: &FoldScores) -> Self {
        for score in scores.for_scorer(scorer) {
            self = self.column(fold_column(scorer, score.fold()), score.value());
        }
        let summary = scores.summary(scorer);
        self.column(mean_column(scorer), summary.mean)
            .column(std_column(scorer), summary.std)
    }

    /// Build the `ResultRow`.
    #[must_use]
    pub fn build(self) -> ResultRow {
        ResultRow {
            validation_id: self.validation_id,
            model_id: self.model_id,
            runtime_secs: self.runtime_secs,
            metrics: self.metrics,
        }
    }
}
