//! Benchmark results
//!
//! One [`ResultRow`] per estimator x task, each carrying the per-fold scores
//! and mean/std summaries of every scorer of the task. The column set of a
//! [`ResultsTable`] is the ordered union of its rows' columns; rows from
//! tasks with different scorers or fold counts leave the foreign columns
//! empty (CSV) or null (Arrow/Parquet).
//!
//! ```text
//! validation_id | model_id | runtime_secs | MAE_fold_0_test | MAE_fold_1_test | MAE_mean | MAE_std
//! ```

mod aggregate;
mod row;

pub use aggregate::{mean, sample_std, FoldScore, FoldScores, Summary};
pub use row::{
    fold_column, mean_column, std_column, ResultRow, ResultRowBuilder, MODEL_ID, RUNTIME_SECS,
    VALIDATION_ID,
};

use crate::artefact::ArtefactRecord;
use crate::{Error, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use std::path::Path;
use std::sync::Arc;

/// A single cell of the results table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    /// `validation_id` or `model_id`
    Text(&'a str),
    /// Runtime or metric value
    Number(f64),
}

/// Summary table returned by a benchmark run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsTable {
    rows: Vec<ResultRow>,
    artefacts: Vec<ArtefactRecord>,
}

impl ResultsTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row.
    pub fn push(&mut self, row: ResultRow) {
        self.rows.push(row);
    }

    /// Record artefacts written while producing the rows.
    pub fn push_artefacts(&mut self, records: impl IntoIterator<Item = ArtefactRecord>) {
        self.artefacts.extend(records);
    }

    /// Artefacts written by the run that produced this table, in write
    /// order. Empty for a table read back from disk.
    #[must_use]
    pub fn artefacts(&self) -> &[ArtefactRecord] {
        &self.artefacts
    }

    /// Rows in evaluation order.
    #[must_use]
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find the row of an estimator on a task.
    #[must_use]
    pub fn row(&self, validation_id: &str, model_id: &str) -> Option<&ResultRow> {
        self.rows
            .iter()
            .find(|r| r.validation_id() == validation_id && r.model_id() == model_id)
    }

    /// Column names: the fixed id/runtime columns, then metric columns in
    /// first-seen order.
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = [VALIDATION_ID, MODEL_ID, RUNTIME_SECS]
            .iter()
            .map(|c| (*c).to_string())
            .collect();
        for row in &self.rows {
            for (name, _) in row.metrics() {
                if !columns.contains(name) {
                    columns.push(name.clone());
                }
            }
        }
        columns
    }

    /// Cell at `row` / `column`; `None` if either is absent.
    #[must_use]
    pub fn value(&self, row: usize, column: &str) -> Option<Cell<'_>> {
        let row = self.rows.get(row)?;
        match column {
            VALIDATION_ID => Some(Cell::Text(row.validation_id())),
            MODEL_ID => Some(Cell::Text(row.model_id())),
            _ => row.metric(column).map(Cell::Number),
        }
    }

    /// Materialize as an Arrow batch.
    ///
    /// Id columns are non-null `Utf8`, `runtime_secs` is non-null `Float64`,
    /// metric columns are nullable `Float64`.
    ///
    /// # Errors
    ///
    /// Returns error if Arrow rejects the batch
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let columns = self.columns();
        let mut fields = Vec::with_capacity(columns.len());
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(columns.len());

        for name in &columns {
            match name.as_str() {
                VALIDATION_ID | MODEL_ID => {
                    let values: Vec<&str> = self
                        .rows
                        .iter()
                        .map(|r| {
                            if name == VALIDATION_ID {
                                r.validation_id()
                            } else {
                                r.model_id()
                            }
                        })
                        .collect();
                    fields.push(Field::new(name, DataType::Utf8, false));
                    arrays.push(Arc::new(StringArray::from(values)));
                }
                RUNTIME_SECS => {
                    let values: Vec<f64> = self.rows.iter().map(ResultRow::runtime_secs).collect();
                    fields.push(Field::new(name, DataType::Float64, false));
                    arrays.push(Arc::new(Float64Array::from(values)));
                }
                _ => {
                    let values: Vec<Option<f64>> =
                        self.rows.iter().map(|r| r.metric(name)).collect();
                    fields.push(Field::new(name, DataType::Float64, true));
                    arrays.push(Arc::new(Float64Array::from(values)));
                }
            }
        }

        Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
    }

    /// Write the table, replacing any existing file.
    ///
    /// A `.parquet` extension selects Parquet; anything else is written as
    /// delimited text using `delimiter`.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written
    pub fn write(&self, path: impl AsRef<Path>, delimiter: u8) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let is_parquet = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("parquet"));

        if is_parquet {
            self.write_parquet(path)
        } else {
            self.write_csv(path, delimiter)
        }
    }

    fn write_csv(&self, path: &Path, delimiter: u8) -> Result<()> {
        let columns = self.columns();
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(std::fs::File::create(path)?);
        writer.write_record(&columns)?;

        for row in &self.rows {
            let record = columns.iter().map(|c| match c.as_str() {
                VALIDATION_ID => row.validation_id().to_string(),
                MODEL_ID => row.model_id().to_string(),
                _ => row.metric(c).map(|v| v.to_string()).unwrap_or_default(),
            });
            writer.write_record(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_parquet(&self, path: &Path) -> Result<()> {
        use parquet::arrow::ArrowWriter;

        let batch = self.to_record_batch()?;
        let file = std::fs::File::create(path)?;
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).map_err(|e| {
            Error::StorageError(format!("Failed to create Parquet writer: {e}"))
        })?;
        writer
            .write(&batch)
            .map_err(|e| Error::StorageError(format!("Failed to write record batch: {e}")))?;
        writer
            .close()
            .map_err(|e| Error::StorageError(format!("Failed to finalize Parquet file: {e}")))?;
        Ok(())
    }

    /// Read a delimited results file written by [`write`](Self::write).
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, the fixed columns are
    /// missing, or a metric cell is not a number
    pub fn read_csv(path: impl AsRef<Path>, delimiter: u8) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .from_path(path)?;
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.len() < 3 || headers[..3] != [VALIDATION_ID, MODEL_ID, RUNTIME_SECS] {
            return Err(Error::InvalidInput(format!(
                "{} does not start with {VALIDATION_ID},{MODEL_ID},{RUNTIME_SECS}",
                path.display()
            )));
        }

        let parse = |field: &str, column: &str| {
            field.parse::<f64>().map_err(|e| {
                Error::InvalidInput(format!("column '{column}': cannot parse '{field}': {e}"))
            })
        };

        let mut table = Self::new();
        for record in reader.records() {
            let record = record?;
            let field = |i: usize| record.get(i).unwrap_or("");
            let mut builder = ResultRow::builder(field(0), field(1))
                .runtime_secs(parse(field(2), RUNTIME_SECS)?);
            for (i, column) in headers.iter().enumerate().skip(3) {
                let cell = field(i);
                if !cell.is_empty() {
                    builder = builder.column(column.as_str(), parse(cell, column.as_str())?);
                }
            }
            table.push(builder.build());
        }
        Ok(table)
    }
}
