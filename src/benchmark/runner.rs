//! Evaluation of one estimator on one task

use crate::artefact::{ArtefactRecord, ArtefactStore, FoldKey};
use crate::forecaster::Forecaster;
use crate::results::{FoldScore, FoldScores, ResultRow};
use crate::splitter::Fold;
use crate::task::Task;
use crate::{Error, Result};
use std::time::Instant;

/// Everything an evaluation needs besides the estimator.
pub(super) struct TaskContext<'a> {
    pub validation_id: &'a str,
    pub task: &'a Task,
    pub y: &'a [f64],
    pub folds: &'a [Fold],
    pub store: Option<&'a ArtefactStore>,
}

/// Cross-validate `estimator` over the task's folds and build its row.
///
/// Also returns the records of the artefacts written, in write order.
///
/// Estimator and scorer failures are wrapped in `BenchmarkExecution`;
/// artefact write failures propagate as-is.
pub(super) fn evaluate(
    ctx: &TaskContext<'_>,
    model_id: &str,
    estimator: &dyn Forecaster,
) -> Result<(ResultRow, Vec<ArtefactRecord>)> {
    let started = Instant::now();
    let fh = ctx.task.splitter().fh();
    let mut scores = FoldScores::new();
    let mut artefacts = Vec::new();

    for (i, fold) in ctx.folds.iter().enumerate() {
        let wrap = |e: Error| e.in_evaluation(ctx.validation_id, model_id, Some(i));

        let (train, y_test) = fold_values(ctx.y, fold).map_err(wrap)?;

        let mut model = estimator.clone_box();
        model.fit(train).map_err(wrap)?;
        let y_pred = model.predict(fh).map_err(wrap)?;
        if y_pred.len() != y_test.len() {
            return Err(wrap(Error::InvalidInput(format!(
                "forecast has {} points but the fold tests {}",
                y_pred.len(),
                y_test.len()
            ))));
        }

        for scorer in ctx.task.scorers() {
            let value = scorer.score(&y_test, &y_pred).map_err(wrap)?;
            tracing::debug!(
                validation_id = ctx.validation_id,
                model_id,
                fold = i,
                scorer = scorer.name(),
                value,
                "scored fold"
            );
            scores.add(FoldScore::new(scorer.name(), i, value));

            if let Some(store) = ctx.store {
                let key = FoldKey {
                    validation_id: ctx.validation_id,
                    model_id,
                    scorer: scorer.name(),
                    fold: i,
                };
                artefacts.extend(store.write_fold(&key, fold.test(), &y_pred, &y_test)?);
            }
        }
    }

    let mut row = ResultRow::builder(ctx.validation_id, model_id);
    for scorer in ctx.task.scorers() {
        row = row.scorer(scorer.name(), &scores);
    }
    let runtime_secs = started.elapsed().as_secs_f64();
    Ok((row.runtime_secs(runtime_secs).build(), artefacts))
}

// Positions from custom splitters may lie past the end of the series.
fn fold_values<'y>(y: &'y [f64], fold: &Fold) -> Result<(&'y [f64], Vec<f64>)> {
    let out_of_range = || {
        Error::InvalidInput(format!(
            "fold {:?} -> {:?} exceeds series of {} points",
            fold.train(),
            fold.test(),
            y.len()
        ))
    };
    let train = y.get(fold.train()).ok_or_else(out_of_range)?;
    let test = fold
        .test()
        .iter()
        .map(|&t| y.get(t).copied())
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(out_of_range)?;
    Ok((train, test))
}
