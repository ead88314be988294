//! Artefact Record - metadata for one persisted fold series

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which side of a fold an artefact holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtefactKind {
    /// Forecast produced by the estimator.
    #[serde(rename = "y_pred")]
    Prediction,
    /// Ground truth at the test positions.
    #[serde(rename = "y_test")]
    GroundTruth,
}

impl ArtefactKind {
    /// Directory name under the model directory.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Prediction => "y_pred",
            Self::GroundTruth => "y_test",
        }
    }
}

/// Artefact Record describes one file written by the artefact store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtefactRecord {
    validation_id: String,
    model_id: String,
    kind: ArtefactKind,
    scorer: String,
    fold: usize,
    path: PathBuf,
    size_bytes: u64,
    created_at: DateTime<Utc>,
}

impl ArtefactRecord {
    /// Create a new artefact record.
    ///
    /// # Arguments
    ///
    /// * `validation_id` - Task the fold belongs to
    /// * `model_id` - Estimator that produced the forecast
    /// * `kind` - Prediction or ground truth
    /// * `scorer` - Scorer the file was written for
    /// * `fold` - Zero-based fold index
    /// * `path` - Location of the file
    /// * `size_bytes` - Size of the file in bytes
    ///
    /// # Returns
    ///
    /// A new `ArtefactRecord` with the current timestamp.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        validation_id: impl Into<String>,
        model_id: impl Into<String>,
        kind: ArtefactKind,
        scorer: impl Into<String>,
        fold: usize,
        path: impl Into<PathBuf>,
        size_bytes: u64,
    ) -> Self {
        Self {
            validation_id: validation_id.into(),
            model_id: model_id.into(),
            kind,
            scorer: scorer.into(),
            fold,
            path: path.into(),
            size_bytes,
            created_at: Utc::now(),
        }
    }

    /// Get the validation ID.
    #[must_use]
    pub fn validation_id(&self) -> &str {
        &self.validation_id
    }

    /// Get the model ID.
    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Get the artefact kind.
    #[must_use]
    pub const fn kind(&self) -> ArtefactKind {
        self.kind
    }

    /// Get the scorer name.
    #[must_use]
    pub fn scorer(&self) -> &str {
        &self.scorer
    }

    /// Get the fold index.
    #[must_use]
    pub const fn fold(&self) -> usize {
        self.fold
    }

    /// Get the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file size in bytes.
    #[must_use]
    pub const fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
