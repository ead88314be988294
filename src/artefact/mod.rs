//! Artefact store: per-fold forecasts and ground truth on disk
//!
//! ## Layout
//!
//! ```text
//! <root>/<validation_id>/<model_id>/y_pred/<scorer>_fold_<i>.csv
//! <root>/<validation_id>/<model_id>/y_test/<scorer>_fold_<i>.csv
//! ```
//!
//! One pair is written per scorer per fold. The pairs for different scorers
//! of the same fold hold identical values, so each scorer's artefacts can be
//! inspected on their own. Existing files are replaced without warning.

mod record;

pub use record::{ArtefactKind, ArtefactRecord};

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Check that `id` names exactly one directory or file under its parent.
///
/// Task ids, estimator ids and scorer names all become path components of
/// the artefact layout.
///
/// # Errors
///
/// Returns `InvalidInput` if `id` is empty, `.` or `..`, or contains a path
/// separator
pub fn check_path_component(what: &str, id: &str) -> Result<()> {
    if id.is_empty() || id == "." || id == ".." || id.contains(['/', '\\']) {
        return Err(Error::InvalidInput(format!(
            "{what} '{id}' cannot be used as an artefact path component"
        )));
    }
    Ok(())
}

/// Writes fold series under a root directory.
#[derive(Debug, Clone)]
pub struct ArtefactStore {
    root: PathBuf,
}

/// Identity of one fold evaluation.
#[derive(Debug, Clone, Copy)]
pub struct FoldKey<'a> {
    /// Task id
    pub validation_id: &'a str,
    /// Estimator id
    pub model_id: &'a str,
    /// Scorer name
    pub scorer: &'a str,
    /// Zero-based fold index
    pub fold: usize,
}

impl ArtefactStore {
    /// Create a store rooted at `root`. Nothing is created until a write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of one artefact file.
    #[must_use]
    pub fn path_for(&self, key: &FoldKey<'_>, kind: ArtefactKind) -> PathBuf {
        self.root
            .join(key.validation_id)
            .join(key.model_id)
            .join(kind.dir_name())
            .join(format!("{}_fold_{}.csv", key.scorer, key.fold))
    }

    /// Write the forecast and ground truth of one fold.
    ///
    /// `index` holds the absolute time positions of the horizon steps;
    /// `y_pred` and `y_test` hold one value per position.
    ///
    /// # Errors
    ///
    /// Returns error if a directory or file cannot be written
    pub fn write_fold(
        &self,
        key: &FoldKey<'_>,
        index: &[usize],
        y_pred: &[f64],
        y_test: &[f64],
    ) -> Result<[ArtefactRecord; 2]> {
        Ok([
            self.write_series(key, ArtefactKind::Prediction, index, y_pred)?,
            self.write_series(key, ArtefactKind::GroundTruth, index, y_test)?,
        ])
    }

    fn write_series(
        &self,
        key: &FoldKey<'_>,
        kind: ArtefactKind,
        index: &[usize],
        values: &[f64],
    ) -> Result<ArtefactRecord> {
        let path = self.path_for(key, kind);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_writer(std::fs::File::create(&path)?);
        writer.write_record(["index", "value"])?;
        for (t, v) in index.iter().zip(values) {
            writer.write_record([t.to_string(), v.to_string()])?;
        }
        writer.flush()?;
        drop(writer);

        let size_bytes = std::fs::metadata(&path)?.len();
        tracing::debug!(path = %path.display(), size_bytes, "wrote artefact");

        Ok(ArtefactRecord::new(
            key.validation_id,
            key.model_id,
            kind,
            key.scorer,
            key.fold,
            path,
            size_bytes,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_component_rejects_traversal() {
        for id in ["", ".", "..", "../x", "a/b", "a\\b"] {
            assert!(
                matches!(check_path_component("model id", id), Err(Error::InvalidInput(_))),
                "accepted {id:?}"
            );
        }
        check_path_component("model id", "NaiveForecaster").unwrap();
        check_path_component("task id", "[dataset=d]_[cv_splitter=S]").unwrap();
        check_path_component("model id", "v1..2").unwrap();
    }

    fn key(fold: usize) -> FoldKey<'static> {
        FoldKey {
            validation_id: "[dataset=d]_[cv_splitter=S]",
            model_id: "NaiveForecaster",
            scorer: "MeanAbsoluteError",
            fold,
        }
    }

    #[test]
    fn test_path_layout() {
        let store = ArtefactStore::new("/root");
        let path = store.path_for(&key(1), ArtefactKind::GroundTruth);
        assert_eq!(
            path,
            Path::new("/root/[dataset=d]_[cv_splitter=S]/NaiveForecaster/y_test/MeanAbsoluteError_fold_1.csv")
        );
    }

    #[test]
    fn test_write_fold_creates_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtefactStore::new(dir.path().join("artefacts"));

        let [pred, test] = store.write_fold(&key(0), &[3], &[2.0], &[2.5]).unwrap();

        assert!(pred.path().exists());
        assert!(test.path().exists());
        assert_eq!(pred.kind(), ArtefactKind::Prediction);
        assert_eq!(test.fold(), 0);
        let content = std::fs::read_to_string(test.path()).unwrap();
        assert_eq!(content, "index,value\n3,2.5\n");
        assert_eq!(test.size_bytes(), content.len() as u64);
    }

    #[test]
    fn test_rewrite_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtefactStore::new(dir.path());
        store.write_fold(&key(0), &[1, 2], &[1.0, 1.0], &[1.0, 1.0]).unwrap();
        let [pred, _] = store.write_fold(&key(0), &[1], &[7.0], &[1.0]).unwrap();
        let content = std::fs::read_to_string(pred.path()).unwrap();
        assert_eq!(content, "index,value\n1,7\n");
    }
}
