//! Benchmark a naive and a trend forecaster on a short series
//!
//! Run with: `RUST_LOG=forecast_bench=debug cargo run --example naive_benchmark`

use forecast_bench::forecaster::{ForecastingHorizon, NaiveForecaster, TrendForecaster};
use forecast_bench::scorer::{MeanAbsoluteError, MeanAbsolutePercentageError, Scorer};
use forecast_bench::splitter::ExpandingWindowSplitter;
use forecast_bench::task::DatasetLoader;
use forecast_bench::{EstimatorInput, Forecaster, ForecastingBenchmark};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("forecast-bench: naive vs trend");
    println!("==============================\n");

    let mut benchmark = ForecastingBenchmark::new();
    let models: Vec<Box<dyn Forecaster>> = vec![
        Box::new(NaiveForecaster::default()),
        Box::new(TrendForecaster::new()),
    ];
    benchmark.add_estimator(EstimatorInput::many(models), None)?;

    let series = vec![2.0, 2.0, 3.0, 4.0, 4.5, 6.0, 7.0, 7.5];
    let cv = ExpandingWindowSplitter::new(3, 1, ForecastingHorizon::up_to(2)?)?;
    let scorers: Vec<Box<dyn Scorer>> = vec![
        Box::new(MeanAbsolutePercentageError),
        Box::new(MeanAbsoluteError),
    ];
    let task = benchmark.add_task(DatasetLoader::from_values("demo", series), cv, scorers, None)?;
    println!("Task: {task}\n");

    let out = std::env::temp_dir().join("forecast-bench-demo");
    let results = benchmark.run(out.join("results.csv"), out.join("artefacts"))?;

    for row in results.rows() {
        println!(
            "{:<16} MAE {:.3} (std {:.3})  MAPE {:.3}  [{:.4}s]",
            row.model_id(),
            row.metric("MeanAbsoluteError_mean").unwrap_or(f64::NAN),
            row.metric("MeanAbsoluteError_std").unwrap_or(f64::NAN),
            row.metric("MeanAbsolutePercentageError_mean").unwrap_or(f64::NAN),
            row.runtime_secs(),
        );
    }
    println!("\nResults and artefacts written under {}", out.display());
    Ok(())
}
