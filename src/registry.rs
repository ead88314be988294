//! Ordered id -> entity registries
//!
//! Both estimators and tasks live in a [`Registry`]: insertion-ordered
//! storage with O(1) lookup by id. Evaluation order (and therefore result
//! row order) follows registration order.
//!
//! Estimator inputs arrive in several shapes (one model, a list, an explicit
//! mapping); [`EstimatorInput`] names those shapes and
//! [`coerce_estimator_and_id`] resolves them to `(id, estimator)` pairs once,
//! at registration time.

use crate::artefact::check_path_component;
use crate::forecaster::Forecaster;
use crate::{Error, Result};
use rustc_hash::FxHashMap;

/// Insertion-ordered map from id to entity.
#[derive(Debug)]
pub struct Registry<T> {
    entries: Vec<(String, T)>,
    index: FxHashMap<String, usize>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

impl<T> Registry<T> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Get an entity by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&i| &self.entries[i].1)
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    /// `(id, entity)` pairs in registration order.
    pub fn entity_specs(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(id, entity)| (id.as_str(), entity))
    }

    /// Insert, replacing any entity already registered under `id`.
    ///
    /// A replaced entity keeps its original position. Returns `true` if an
    /// entity was replaced.
    pub fn upsert(&mut self, id: impl Into<String>, entity: T) -> bool {
        let id = id.into();
        if let Some(&i) = self.index.get(&id) {
            self.entries[i].1 = entity;
            return true;
        }
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push((id, entity));
        false
    }

    /// Insert a new entity; `on_duplicate` builds the error if `id` is taken.
    ///
    /// # Errors
    ///
    /// Returns the error from `on_duplicate` if `id` is already registered
    pub fn insert_unique(
        &mut self,
        id: impl Into<String>,
        entity: T,
        on_duplicate: impl FnOnce(String) -> Error,
    ) -> Result<()> {
        let id = id.into();
        if self.contains(&id) {
            return Err(on_duplicate(id));
        }
        self.upsert(id, entity);
        Ok(())
    }
}

/// The shapes in which estimators can be registered.
#[derive(Debug)]
pub enum EstimatorInput {
    /// One estimator, keyed by its name unless an explicit id is given.
    One(Box<dyn Forecaster>),
    /// Several estimators, each keyed by its name.
    Many(Vec<Box<dyn Forecaster>>),
    /// Explicit ids, used as-is.
    Mapping(Vec<(String, Box<dyn Forecaster>)>),
}

impl EstimatorInput {
    /// Wrap a single estimator.
    #[must_use]
    pub fn one(estimator: impl Forecaster + 'static) -> Self {
        Self::One(Box::new(estimator))
    }

    /// Wrap a list of estimators.
    #[must_use]
    pub fn many(estimators: Vec<Box<dyn Forecaster>>) -> Self {
        Self::Many(estimators)
    }

    /// Wrap `(id, estimator)` pairs.
    pub fn mapping<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Box<dyn Forecaster>)>,
        S: Into<String>,
    {
        Self::Mapping(pairs.into_iter().map(|(id, e)| (id.into(), e)).collect())
    }

    /// Number of estimators in the input.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(estimators) => estimators.len(),
            Self::Mapping(pairs) => pairs.len(),
        }
    }

    /// Check if the input holds no estimators.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Box<dyn Forecaster>> for EstimatorInput {
    fn from(estimator: Box<dyn Forecaster>) -> Self {
        Self::One(estimator)
    }
}

impl From<Vec<Box<dyn Forecaster>>> for EstimatorInput {
    fn from(estimators: Vec<Box<dyn Forecaster>>) -> Self {
        Self::Many(estimators)
    }
}

impl From<Vec<(String, Box<dyn Forecaster>)>> for EstimatorInput {
    fn from(pairs: Vec<(String, Box<dyn Forecaster>)>) -> Self {
        Self::Mapping(pairs)
    }
}

/// A registered estimator and its id.
#[derive(Debug, Clone)]
pub struct EstimatorSpec {
    id: String,
    estimator: Box<dyn Forecaster>,
}

impl EstimatorSpec {
    /// Pair an id with an estimator.
    #[must_use]
    pub fn new(id: impl Into<String>, estimator: Box<dyn Forecaster>) -> Self {
        Self {
            id: id.into(),
            estimator,
        }
    }

    /// Registry id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The estimator.
    #[must_use]
    pub fn estimator(&self) -> &dyn Forecaster {
        self.estimator.as_ref()
    }

    /// Split into id and estimator.
    #[must_use]
    pub fn into_parts(self) -> (String, Box<dyn Forecaster>) {
        (self.id, self.estimator)
    }
}

impl PartialEq for EstimatorSpec {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.estimator.name() == other.estimator.name()
            && self.estimator.params() == other.estimator.params()
    }
}

/// Resolve an estimator input to `(id, estimator)` specs.
///
/// - one estimator: keyed by `estimator_id`, or by its name if `None`
/// - many estimators: keyed by name; names must be distinct
/// - mapping: returned unchanged; ids must be distinct
///
/// Every id must be usable as an artefact directory name.
///
/// # Errors
///
/// Returns `DuplicateIdentifier` if two listed estimators share a name or a
/// mapping repeats an id, or `InvalidInput` if an explicit id is combined
/// with several estimators or an id contains a path separator
pub fn coerce_estimator_and_id(
    estimator: EstimatorInput,
    estimator_id: Option<&str>,
) -> Result<Vec<EstimatorSpec>> {
    let pairs: Vec<(String, Box<dyn Forecaster>)> = match (estimator, estimator_id) {
        (EstimatorInput::One(e), id) => {
            let id = id.map_or_else(|| e.name().to_string(), str::to_string);
            vec![(id, e)]
        }
        (EstimatorInput::Many(_) | EstimatorInput::Mapping(_), Some(id)) => {
            return Err(Error::InvalidInput(format!(
                "estimator id '{id}' can only be given for a single estimator"
            )))
        }
        (EstimatorInput::Many(estimators), None) => estimators
            .into_iter()
            .map(|e| (e.name().to_string(), e))
            .collect(),
        (EstimatorInput::Mapping(pairs), None) => pairs,
    };

    let mut seen = rustc_hash::FxHashSet::default();
    pairs
        .into_iter()
        .map(|(id, e)| {
            check_path_component("estimator id", &id)?;
            if !seen.insert(id.clone()) {
                return Err(Error::DuplicateIdentifier { id });
            }
            Ok(EstimatorSpec::new(id, e))
        })
        .collect()
}
