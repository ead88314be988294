//! # forecast-bench: Cross-Validated Forecasting Benchmarks
//!
//! **Version**: 0.1.0
//!
//! forecast-bench evaluates time-series forecasting estimators against
//! validation tasks. A task binds a dataset, a temporal cross-validation
//! splitter and a set of error metrics; every registered estimator is run on
//! every task, fold by fold, and the per-fold scores are summarized into one
//! result row per estimator x task.
//!
//! ## Design Principles (Toyota Way Aligned)
//!
//! - **Genchi Genbutsu**: every fold's forecast and ground truth is kept on
//!   disk so a surprising score can be inspected directly
//! - **Poka-Yoke safety**: each fold fits a fresh clone of the estimator, so
//!   no state leaks between folds
//! - **Jidoka**: a failing fold stops the run with the task, model and fold
//!   that failed
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use forecast_bench::forecaster::{ForecastingHorizon, NaiveForecaster, TrendForecaster};
//! use forecast_bench::scorer::{MeanAbsoluteError, MeanAbsolutePercentageError, Scorer};
//! use forecast_bench::splitter::ExpandingWindowSplitter;
//! use forecast_bench::task::DatasetLoader;
//! use forecast_bench::{EstimatorInput, ForecastingBenchmark, Forecaster};
//!
//! let mut benchmark = ForecastingBenchmark::new();
//! let models: Vec<Box<dyn Forecaster>> = vec![
//!     Box::new(NaiveForecaster::default()),
//!     Box::new(TrendForecaster::new()),
//! ];
//! benchmark.add_estimator(EstimatorInput::many(models), None)?;
//!
//! let cv = ExpandingWindowSplitter::new(12, 1, ForecastingHorizon::up_to(3)?)?;
//! let scorers: Vec<Box<dyn Scorer>> = vec![
//!     Box::new(MeanAbsolutePercentageError),
//!     Box::new(MeanAbsoluteError),
//! ];
//! benchmark.add_task(DatasetLoader::from_csv("data/airline.csv", Some("passengers"))?, cv, scorers, None)?;
//!
//! // One row per estimator x task; artefacts under ./artefacts/<task>/<model>/
//! let results = benchmark.run("results.csv", "artefacts")?;
//! for row in results.rows() {
//!     println!("{}: {:?}", row.model_id(), row.metric("MeanAbsoluteError_mean"));
//! }
//! # Ok::<(), forecast_bench::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod artefact;
pub mod benchmark;
pub mod config;
pub mod error;
pub mod forecaster;
pub mod registry;
pub mod results;
pub mod scorer;
pub mod splitter;
pub mod task;

pub use benchmark::ForecastingBenchmark;
pub use config::{BenchmarkConfig, BenchmarkConfigBuilder};
pub use error::{Error, Result};
pub use forecaster::{Forecaster, ForecastingHorizon};
pub use registry::{coerce_estimator_and_id, EstimatorInput, EstimatorSpec};
pub use results::{ResultRow, ResultsTable};
pub use scorer::Scorer;
pub use splitter::Splitter;
