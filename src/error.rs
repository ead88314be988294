//! Error types for forecast-bench
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People)

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// forecast-bench error types
#[derive(Error, Debug)]
pub enum Error {
    /// Two estimators in a list coerce to the same identifier
    #[error("Duplicate estimator id '{id}'\nPass a mapping of id -> estimator to register several estimators of the same type")]
    DuplicateIdentifier {
        /// Colliding identifier
        id: String,
    },

    /// A task with the same validation id is already registered
    #[error("Duplicate task id '{id}'\nPass an explicit task id to register the same dataset/splitter pairing twice")]
    DuplicateTask {
        /// Colliding validation id
        id: String,
    },

    /// Fit, predict or scoring failed while evaluating a task
    #[error("Benchmark failed for task '{validation_id}', model '{model_id}'{}: {source}", fold_suffix(.fold))]
    BenchmarkExecution {
        /// Task being evaluated
        validation_id: String,
        /// Estimator being evaluated
        model_id: String,
        /// Fold index, `None` when the failure happened before splitting
        fold: Option<usize>,
        /// Originating error
        #[source]
        source: Box<Error>,
    },

    /// `predict` called before `fit`
    #[error("Estimator '{estimator}' must be fitted before predicting")]
    NotFitted {
        /// Estimator type name
        estimator: String,
    },

    /// Series too short for the requested operation
    #[error("Insufficient data: need at least {required} points, got {got}")]
    InsufficientData {
        /// Minimum number of observations
        required: usize,
        /// Observations available
        got: usize,
    },

    /// Malformed argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage error (Parquet)
    #[error("Storage error: {0}")]
    StorageError(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited file error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// JSON (config) error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn fold_suffix(fold: &Option<usize>) -> String {
    fold.map_or_else(String::new, |i| format!(", fold {i}"))
}

impl Error {
    /// Wrap `self` with the identity of the evaluation that produced it.
    #[must_use]
    pub fn in_evaluation(
        self,
        validation_id: impl Into<String>,
        model_id: impl Into<String>,
        fold: Option<usize>,
    ) -> Self {
        Self::BenchmarkExecution {
            validation_id: validation_id.into(),
            model_id: model_id.into(),
            fold,
            source: Box::new(self),
        }
    }
}
