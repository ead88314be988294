//! Tests for error types

use forecast_bench::Error;
use std::error::Error as _;

#[test]
fn test_duplicate_identifier_error() {
    let error = Error::DuplicateIdentifier {
        id: "NaiveForecaster".to_string(),
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("Duplicate estimator id 'NaiveForecaster'"));
    assert!(error_str.contains("Pass a mapping"));
}

#[test]
fn test_duplicate_task_error() {
    let error = Error::DuplicateTask {
        id: "[dataset=d]_[cv_splitter=ExpandingWindowSplitter]".to_string(),
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("Duplicate task id"));
    assert!(error_str.contains("[dataset=d]"));
}

#[test]
fn test_benchmark_execution_error_chain() {
    let error = Error::NotFitted {
        estimator: "TrendForecaster".to_string(),
    }
    .in_evaluation("task", "trend", Some(0));
    let error_str = format!("{error}");
    assert!(error_str.contains("Benchmark failed for task 'task', model 'trend', fold 0"));
    assert!(error_str.contains("must be fitted before predicting"));

    let source = error.source().unwrap();
    assert!(source.to_string().contains("TrendForecaster"));
}

#[test]
fn test_insufficient_data_error() {
    let error = Error::InsufficientData {
        required: 3,
        got: 1,
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("need at least 3 points, got 1"));
}

#[test]
fn test_invalid_input_error() {
    let error = Error::InvalidInput("step_length must be positive".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Invalid input"));
    assert!(error_str.contains("step_length must be positive"));
}

#[test]
fn test_storage_error() {
    let error = Error::StorageError("file not found".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Storage error"));
    assert!(error_str.contains("file not found"));
}

#[test]
fn test_io_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let error: Error = io_error.into();
    assert!(format!("{error}").contains("IO error"));
}

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: Error = json_error.into();
    assert!(format!("{error}").contains("JSON error"));
}
