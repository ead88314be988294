//! Benchmark configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Runtime knobs for [`ForecastingBenchmark`](crate::ForecastingBenchmark).
///
/// Deserializes from JSON; missing fields take their defaults:
///
/// ```rust
/// use forecast_bench::BenchmarkConfig;
///
/// let config: BenchmarkConfig = serde_json::from_str(r#"{"delimiter": 59}"#)?;
/// assert_eq!(config.delimiter(), b';');
/// assert!(config.store_artefacts());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    delimiter: u8,
    store_artefacts: bool,
    fail_on_empty_folds: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            store_artefacts: true,
            fail_on_empty_folds: true,
        }
    }
}

impl BenchmarkConfig {
    /// Create a builder starting from the defaults.
    #[must_use]
    pub fn builder() -> BenchmarkConfigBuilder {
        BenchmarkConfigBuilder::default()
    }

    /// Load from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed, or the config is invalid
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Field delimiter of the results file (CSV output only).
    #[must_use]
    pub const fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Whether per-fold `y_pred`/`y_test` files are written.
    #[must_use]
    pub const fn store_artefacts(&self) -> bool {
        self.store_artefacts
    }

    /// Whether a task whose splitter yields no folds aborts the run.
    ///
    /// When false such a task produces rows with no fold columns and `NaN`
    /// summaries.
    #[must_use]
    pub const fn fail_on_empty_folds(&self) -> bool {
        self.fail_on_empty_folds
    }

    fn validate(&self) -> Result<()> {
        if matches!(self.delimiter, b'"' | b'\n' | b'\r') {
            return Err(Error::InvalidInput(format!(
                "delimiter {:?} cannot be used in a delimited file",
                char::from(self.delimiter)
            )));
        }
        Ok(())
    }
}

/// Builder for `BenchmarkConfig`.
#[derive(Debug, Default)]
pub struct BenchmarkConfigBuilder {
    config: BenchmarkConfig,
}

impl BenchmarkConfigBuilder {
    /// Set the results file delimiter.
    #[must_use]
    pub const fn delimiter(mut self, delimiter: u8) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// Enable or disable artefact files.
    #[must_use]
    pub const fn store_artefacts(mut self, store: bool) -> Self {
        self.config.store_artefacts = store;
        self
    }

    /// Abort (true) or continue (false) on tasks without folds.
    #[must_use]
    pub const fn fail_on_empty_folds(mut self, fail: bool) -> Self {
        self.config.fail_on_empty_folds = fail;
        self
    }

    /// Build the `BenchmarkConfig`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the delimiter is a quote or line break
    pub fn build(self) -> Result<BenchmarkConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
