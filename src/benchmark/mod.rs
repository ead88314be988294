//! Forecasting benchmark: estimators x tasks
//!
//! ## Execution order
//!
//! ```text
//! for task in tasks            (registration order, dataset loaded once)
//!   for estimator in estimators  (registration order, one result row each)
//!     for fold in splitter folds
//!       fresh clone -> fit(train) -> predict(fh)
//!       for scorer in task scorers -> score, write y_pred / y_test
//! ```
//!
//! Execution is single-threaded and synchronous. Any estimator or scorer
//! failure aborts the whole run with [`Error::BenchmarkExecution`]; rows
//! computed before the failure are discarded and the results file is not
//! written.

mod runner;

use crate::artefact::{check_path_component, ArtefactStore};
use crate::config::BenchmarkConfig;
use crate::forecaster::Forecaster;
use crate::registry::{coerce_estimator_and_id, EstimatorInput, Registry};
use crate::results::ResultsTable;
use crate::scorer::Scorer;
use crate::splitter::{Fold, Splitter};
use crate::task::{DatasetLoader, Task};
use crate::{Error, Result};
use runner::TaskContext;
use std::path::Path;

/// Cross-validated benchmark of forecasting estimators.
///
/// ```rust,no_run
/// use forecast_bench::forecaster::{ForecastingHorizon, NaiveForecaster};
/// use forecast_bench::scorer::{MeanAbsoluteError, Scorer};
/// use forecast_bench::splitter::ExpandingWindowSplitter;
/// use forecast_bench::task::DatasetLoader;
/// use forecast_bench::{EstimatorInput, ForecastingBenchmark};
///
/// let mut benchmark = ForecastingBenchmark::new();
/// benchmark.add_estimator(EstimatorInput::one(NaiveForecaster::default()), None)?;
///
/// let cv = ExpandingWindowSplitter::new(1, 1, ForecastingHorizon::new([1])?)?;
/// let scorers: Vec<Box<dyn Scorer>> = vec![Box::new(MeanAbsoluteError)];
/// benchmark.add_task(DatasetLoader::from_values("simple", vec![2.0, 2.0, 3.0]), cv, scorers, None)?;
///
/// let results = benchmark.run("results.csv", "artefacts")?;
/// assert_eq!(results.len(), 1);
/// # Ok::<(), forecast_bench::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct ForecastingBenchmark {
    config: BenchmarkConfig,
    estimators: Registry<Box<dyn Forecaster>>,
    tasks: Registry<Task>,
}

impl ForecastingBenchmark {
    /// Create an empty benchmark with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty benchmark with `config`.
    #[must_use]
    pub fn with_config(config: BenchmarkConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Registered estimators.
    #[must_use]
    pub const fn estimators(&self) -> &Registry<Box<dyn Forecaster>> {
        &self.estimators
    }

    /// Registered tasks, keyed by validation id.
    #[must_use]
    pub const fn tasks(&self) -> &Registry<Task> {
        &self.tasks
    }

    /// Register one or more estimators.
    ///
    /// Ids are resolved by [`coerce_estimator_and_id`]. Registering an id
    /// that already exists replaces the earlier estimator.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateIdentifier` if a list holds two estimators with the
    /// same name, or `InvalidInput` if `estimator_id` is given for several
    /// estimators
    pub fn add_estimator(
        &mut self,
        estimator: EstimatorInput,
        estimator_id: Option<&str>,
    ) -> Result<()> {
        for spec in coerce_estimator_and_id(estimator, estimator_id)? {
            let (id, estimator) = spec.into_parts();
            if self.estimators.upsert(id.clone(), estimator) {
                tracing::warn!(model_id = %id, "replaced registered estimator");
            } else {
                tracing::debug!(model_id = %id, "registered estimator");
            }
        }
        Ok(())
    }

    /// Register a validation task and return its id.
    ///
    /// The id is `task_id` if given, else
    /// `[dataset=<loader name>]_[cv_splitter=<splitter name>]`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateTask` if the id is taken, or `InvalidInput` if
    /// `scorers` is empty or repeats a scorer, or the id or a scorer name
    /// contains a path separator
    pub fn add_task(
        &mut self,
        loader: DatasetLoader,
        splitter: impl Splitter + 'static,
        scorers: Vec<Box<dyn Scorer>>,
        task_id: Option<&str>,
    ) -> Result<String> {
        let task = Task::new(loader, Box::new(splitter), scorers)?;
        let id = task_id.map_or_else(|| task.default_id(), str::to_string);
        check_path_component("task id", &id)?;
        self.tasks
            .insert_unique(id.clone(), task, |id| Error::DuplicateTask { id })?;
        tracing::debug!(validation_id = %id, "registered task");
        Ok(id)
    }

    /// Run every estimator on every task.
    ///
    /// Writes artefacts under `artefacts_dir` (unless disabled in the
    /// config), writes the results table to `results_path` (replacing it),
    /// and returns the table together with the records of every artefact
    /// written.
    ///
    /// # Errors
    ///
    /// Returns `BenchmarkExecution` if loading, splitting, fitting,
    /// predicting or scoring fails, and IO errors from writing outputs
    pub fn run(
        &self,
        results_path: impl AsRef<Path>,
        artefacts_dir: impl AsRef<Path>,
    ) -> Result<ResultsTable> {
        let store = ArtefactStore::new(artefacts_dir.as_ref());
        let store = self.config.store_artefacts().then_some(&store);
        let mut table = ResultsTable::new();

        tracing::info!(
            tasks = self.tasks.len(),
            estimators = self.estimators.len(),
            "starting benchmark"
        );

        for (validation_id, task) in self.tasks.entity_specs() {
            let _span = tracing::info_span!("task", validation_id).entered();
            let (y, folds) = self.prepare(validation_id, task)?;
            tracing::info!(points = y.len(), folds = folds.len(), "loaded dataset");

            let ctx = TaskContext {
                validation_id,
                task,
                y: &y,
                folds: &folds,
                store,
            };
            for (model_id, estimator) in self.estimators.entity_specs() {
                let (row, artefacts) = runner::evaluate(&ctx, model_id, estimator.as_ref())?;
                tracing::info!(
                    model_id,
                    runtime_secs = row.runtime_secs(),
                    artefacts = artefacts.len(),
                    "evaluated"
                );
                table.push(row);
                table.push_artefacts(artefacts);
            }
        }

        table.write(results_path.as_ref(), self.config.delimiter())?;
        tracing::info!(
            rows = table.len(),
            path = %results_path.as_ref().display(),
            "wrote results"
        );
        Ok(table)
    }

    fn prepare(&self, validation_id: &str, task: &Task) -> Result<(Vec<f64>, Vec<Fold>)> {
        // Failures here are not tied to one estimator
        let wrap = |e: Error| e.in_evaluation(validation_id, "*", None);

        let y = task.loader().load().map_err(wrap)?;
        let folds = task.splitter().split(y.len()).map_err(wrap)?;
        if folds.is_empty() && self.config.fail_on_empty_folds() {
            return Err(wrap(Error::InvalidInput(format!(
                "{} produced no folds for {} points",
                task.splitter().name(),
                y.len()
            ))));
        }
        Ok((y, folds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecaster::{ForecastingHorizon, NaiveForecaster, TrendForecaster};
    use crate::scorer::MeanAbsoluteError;
    use crate::splitter::ExpandingWindowSplitter;

    fn cv() -> ExpandingWindowSplitter {
        ExpandingWindowSplitter::new(1, 1, ForecastingHorizon::new([1]).unwrap()).unwrap()
    }

    fn mae() -> Vec<Box<dyn Scorer>> {
        vec![Box::new(MeanAbsoluteError)]
    }

    #[test]
    fn test_reregistering_estimator_overwrites() {
        let mut benchmark = ForecastingBenchmark::new();
        benchmark
            .add_estimator(EstimatorInput::one(NaiveForecaster::default()), None)
            .unwrap();
        benchmark
            .add_estimator(EstimatorInput::one(TrendForecaster::new()), Some("NaiveForecaster"))
            .unwrap();
        assert_eq!(benchmark.estimators().len(), 1);
        let registered = benchmark.estimators().get("NaiveForecaster").unwrap();
        assert_eq!(registered.name(), "TrendForecaster");
    }

    #[test]
    fn test_duplicate_task_rejected_unless_renamed() {
        let mut benchmark = ForecastingBenchmark::new();
        let loader = || DatasetLoader::from_values("d", vec![1.0, 2.0]);
        let id = benchmark.add_task(loader(), cv(), mae(), None).unwrap();
        assert_eq!(id, "[dataset=d]_[cv_splitter=ExpandingWindowSplitter]");

        let err = benchmark.add_task(loader(), cv(), mae(), None).unwrap_err();
        assert!(matches!(err, Error::DuplicateTask { .. }));

        benchmark.add_task(loader(), cv(), mae(), Some("again")).unwrap();
        assert_eq!(benchmark.tasks().len(), 2);
    }

    #[test]
    fn test_path_like_task_ids_rejected() {
        let mut benchmark = ForecastingBenchmark::new();
        let err = benchmark
            .add_task(DatasetLoader::from_values("d", vec![1.0]), cv(), mae(), Some("../up"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = benchmark
            .add_task(DatasetLoader::from_values("a/b", vec![1.0]), cv(), mae(), None)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(benchmark.tasks().is_empty());
    }

    #[test]
    fn test_empty_folds_fail_by_default() {
        let mut benchmark = ForecastingBenchmark::new();
        benchmark
            .add_estimator(EstimatorInput::one(NaiveForecaster::default()), None)
            .unwrap();
        benchmark
            .add_task(DatasetLoader::from_values("tiny", vec![1.0]), cv(), mae(), None)
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let err = benchmark
            .run(dir.path().join("r.csv"), dir.path().join("a"))
            .unwrap_err();
        assert!(matches!(err, Error::BenchmarkExecution { fold: None, .. }));
        assert!(!dir.path().join("r.csv").exists());
    }

    #[test]
    fn test_empty_folds_tolerated_when_configured() {
        let config = BenchmarkConfig::builder()
            .fail_on_empty_folds(false)
            .build()
            .unwrap();
        let mut benchmark = ForecastingBenchmark::with_config(config);
        benchmark
            .add_estimator(EstimatorInput::one(NaiveForecaster::default()), None)
            .unwrap();
        benchmark
            .add_task(DatasetLoader::from_values("tiny", vec![1.0]), cv(), mae(), None)
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let table = benchmark
            .run(dir.path().join("r.csv"), dir.path().join("a"))
            .unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.rows()[0].metric("MeanAbsoluteError_mean").unwrap().is_nan());
        assert!(!dir.path().join("a").exists());
    }
}
