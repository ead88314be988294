//! Validation tasks: dataset x splitter x scorers

use crate::artefact::check_path_component;
use crate::scorer::Scorer;
use crate::splitter::Splitter;
use crate::{Error, Result};
use std::fmt;
use std::path::Path;

/// Format the validation id of a dataset/splitter pairing.
///
/// ```rust
/// assert_eq!(
///     forecast_bench::task::validation_id("data_loader_simple", "ExpandingWindowSplitter"),
///     "[dataset=data_loader_simple]_[cv_splitter=ExpandingWindowSplitter]"
/// );
/// ```
#[must_use]
pub fn validation_id(dataset: &str, splitter: &str) -> String {
    format!("[dataset={dataset}]_[cv_splitter={splitter}]")
}

type LoadFn = dyn Fn() -> Result<Vec<f64>>;

/// Named, zero-argument source of a univariate series.
pub struct DatasetLoader {
    name: String,
    load: Box<LoadFn>,
}

impl DatasetLoader {
    /// Wrap a closure under `name`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        load: impl Fn() -> Result<Vec<f64>> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            load: Box::new(load),
        }
    }

    /// Serve a fixed series.
    #[must_use]
    pub fn from_values(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, move || Ok(values.clone()))
    }

    /// Read one numeric column of a CSV file with a header row.
    ///
    /// The loader is named after the file stem. `column` selects a header by
    /// name; `None` takes the first column. The file is read on every
    /// [`load`](Self::load), not here.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the path has no file stem
    pub fn from_csv(path: impl AsRef<Path>, column: Option<&str>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::InvalidInput(format!("no file stem in {}", path.display())))?
            .to_string();
        let column = column.map(str::to_string);
        Ok(Self::new(name, move || read_csv_column(&path, column.as_deref())))
    }

    /// Loader name, the `dataset` part of the validation id.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Produce the series.
    ///
    /// # Errors
    ///
    /// Propagates the loader's error
    pub fn load(&self) -> Result<Vec<f64>> {
        (self.load)()
    }
}

impl fmt::Debug for DatasetLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetLoader")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn read_csv_column(path: &Path, column: Option<&str>) -> Result<Vec<f64>> {
    let mut reader = csv::Reader::from_path(path)?;
    let idx = match column {
        None => 0,
        Some(name) => reader
            .headers()?
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| {
                Error::InvalidInput(format!("column '{name}' not found in {}", path.display()))
            })?,
    };

    let mut values = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let field = record.get(idx).unwrap_or("").trim();
        let value = field.parse::<f64>().map_err(|e| {
            Error::InvalidInput(format!(
                "row {row} of {}: cannot parse '{field}' as a number: {e}",
                path.display()
            ))
        })?;
        values.push(value);
    }
    Ok(values)
}

/// A registered validation task.
#[derive(Debug)]
pub struct Task {
    loader: DatasetLoader,
    splitter: Box<dyn Splitter>,
    scorers: Vec<Box<dyn Scorer>>,
}

impl Task {
    /// Bind a loader, splitter and scorers.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `scorers` is empty, two scorers share a
    /// name, or a scorer name contains a path separator
    pub fn new(
        loader: DatasetLoader,
        splitter: Box<dyn Splitter>,
        scorers: Vec<Box<dyn Scorer>>,
    ) -> Result<Self> {
        if scorers.is_empty() {
            return Err(Error::InvalidInput("a task needs at least one scorer".into()));
        }
        for (i, scorer) in scorers.iter().enumerate() {
            check_path_component("scorer name", scorer.name())?;
            if scorers[..i].iter().any(|s| s.name() == scorer.name()) {
                return Err(Error::InvalidInput(format!(
                    "scorer '{}' listed twice",
                    scorer.name()
                )));
            }
        }
        Ok(Self {
            loader,
            splitter,
            scorers,
        })
    }

    /// Id derived from loader name and splitter name.
    #[must_use]
    pub fn default_id(&self) -> String {
        validation_id(self.loader.name(), self.splitter.name())
    }

    /// Dataset loader.
    #[must_use]
    pub const fn loader(&self) -> &DatasetLoader {
        &self.loader
    }

    /// Cross-validation splitter.
    #[must_use]
    pub fn splitter(&self) -> &dyn Splitter {
        self.splitter.as_ref()
    }

    /// Scorers, in column order.
    #[must_use]
    pub fn scorers(&self) -> &[Box<dyn Scorer>] {
        &self.scorers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecaster::ForecastingHorizon;
    use crate::scorer::{MeanAbsoluteError, MeanSquaredError};
    use crate::splitter::ExpandingWindowSplitter;
    use std::io::Write;

    fn splitter() -> Box<dyn Splitter> {
        let fh = ForecastingHorizon::new([1]).unwrap();
        Box::new(ExpandingWindowSplitter::new(1, 1, fh).unwrap())
    }

    #[test]
    fn test_default_id_format() {
        let loader = DatasetLoader::from_values("airline", vec![1.0]);
        let task = Task::new(loader, splitter(), vec![Box::new(MeanAbsoluteError)]).unwrap();
        assert_eq!(
            task.default_id(),
            "[dataset=airline]_[cv_splitter=ExpandingWindowSplitter]"
        );
    }

    #[test]
    fn test_task_requires_scorers() {
        let loader = DatasetLoader::from_values("d", vec![1.0]);
        assert!(Task::new(loader, splitter(), Vec::new()).is_err());
    }

    #[test]
    fn test_task_rejects_repeated_scorer() {
        let loader = DatasetLoader::from_values("d", vec![1.0]);
        let scorers: Vec<Box<dyn Scorer>> = vec![
            Box::new(MeanSquaredError),
            Box::new(MeanAbsoluteError),
            Box::new(MeanSquaredError),
        ];
        assert!(Task::new(loader, splitter(), scorers).is_err());
    }

    /// Scorer whose name would escape the artefact directory.
    #[derive(Debug)]
    struct Escaping;

    impl Scorer for Escaping {
        fn name(&self) -> &str {
            "../escape"
        }
        fn score(&self, _y_true: &[f64], _y_pred: &[f64]) -> Result<f64> {
            Ok(0.0)
        }
    }

    #[test]
    fn test_task_rejects_path_like_scorer_name() {
        let loader = DatasetLoader::from_values("d", vec![1.0]);
        let err = Task::new(loader, splitter(), vec![Box::new(Escaping)]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_csv_loader_by_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "day,units").unwrap();
        writeln!(file, "1,2.5").unwrap();
        writeln!(file, "2, 4").unwrap();
        drop(file);

        let loader = DatasetLoader::from_csv(&path, Some("units")).unwrap();
        assert_eq!(loader.name(), "sales");
        assert_eq!(loader.load().unwrap(), vec![2.5, 4.0]);

        let first = DatasetLoader::from_csv(&path, None).unwrap();
        assert_eq!(first.load().unwrap(), vec![1.0, 2.0]);

        let missing = DatasetLoader::from_csv(&path, Some("price")).unwrap();
        assert!(matches!(missing.load(), Err(Error::InvalidInput(_))));
    }
}
