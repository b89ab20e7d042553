//! Caller-owned cache of fitted models.
//!
//! A [`ModelCache`] maps a key (for example a sampling mode or a store id) to
//! the model of one training run. A lookup hits only when the caller asks for
//! the run that produced the cached model, so retraining invalidates stale
//! entries without any global state. The cache does no locking; wrap it in a
//! `Mutex` or `RwLock` if it is shared.
use crate::ingarch::models::fitted::FittedModel;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, hash::Hash, sync::Arc};
use tracing::debug;

/// Identifier of one training run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrainingRunId(String);

impl TrainingRunId {
    pub fn new(id: impl Into<String>) -> Self {
        TrainingRunId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrainingRunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct ModelCache<K> {
    entries: HashMap<K, (TrainingRunId, Arc<FittedModel>)>,
}

impl<K: Eq + Hash + fmt::Debug> ModelCache<K> {
    pub fn new() -> Self {
        ModelCache { entries: HashMap::new() }
    }

    /// Store `model` for `key`, replacing any previous run. Returns the
    /// shared handle.
    pub fn insert(&mut self, key: K, run_id: TrainingRunId, model: FittedModel) -> Arc<FittedModel> {
        let model = Arc::new(model);
        debug!(?key, run_id = %run_id, "caching fitted model");
        self.entries.insert(key, (run_id, Arc::clone(&model)));
        model
    }

    /// Cached model for `key`, only if it came from `run_id`.
    pub fn get(&self, key: &K, run_id: &TrainingRunId) -> Option<Arc<FittedModel>> {
        match self.entries.get(key) {
            Some((cached, model)) if cached == run_id => Some(Arc::clone(model)),
            _ => None,
        }
    }

    /// Run id currently cached for `key`.
    pub fn run_id(&self, key: &K) -> Option<&TrainingRunId> {
        self.entries.get(key).map(|(run_id, _)| run_id)
    }

    pub fn remove(&mut self, key: &K) -> Option<Arc<FittedModel>> {
        self.entries.remove(key).map(|(_, model)| model)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash + fmt::Debug> Default for ModelCache<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingarch::{
        core::shape::ModelSpec,
        models::fallback::{FallbackFit, FallbackReason},
    };

    fn fallback(intercept: f64) -> FittedModel {
        FittedModel::Fallback(FallbackFit {
            spec: ModelSpec::default(),
            phi: 0.5,
            intercept,
            reason: FallbackReason::ShortSeries,
        })
    }

    #[test]
    // Purpose
    // -------
    // Lookups hit only for the cached run id; a newer run replaces the entry.
    //
    // Given
    // -----
    // - Key "fast" stored under run "r1", then under run "r2".
    //
    // Expect
    // ------
    // - `get("fast", r1)` hits before the replacement and misses after it.
    // - `get("fast", r2)` returns the newer model; the length stays 1.
    fn get_requires_matching_run_id() {
        let mut cache = ModelCache::new();
        let (r1, r2) = (TrainingRunId::new("r1"), TrainingRunId::new("r2"));

        cache.insert("fast", r1.clone(), fallback(1.0));
        let hit = cache.get(&"fast", &r1);
        cache.insert("fast", r2.clone(), fallback(2.0));

        assert_eq!(hit.as_deref(), Some(&fallback(1.0)));
        assert!(cache.get(&"fast", &r1).is_none());
        assert_eq!(cache.get(&"fast", &r2).as_deref(), Some(&fallback(2.0)));
        assert_eq!(cache.run_id(&"fast"), Some(&r2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    // Purpose
    // -------
    // Cached models are shared, not copied, and can be removed.
    //
    // Given
    // -----
    // - One inserted model.
    //
    // Expect
    // ------
    // - The handle from `insert` and from `get` point to the same allocation;
    //   `remove` empties the cache.
    fn handles_are_shared() {
        let mut cache = ModelCache::new();
        let run = TrainingRunId::new("run-7");

        let inserted = cache.insert(1u8, run.clone(), fallback(3.0));
        let fetched = cache.get(&1, &run).expect("cached");

        assert!(Arc::ptr_eq(&inserted, &fetched));
        assert!(cache.remove(&1).is_some());
        assert!(cache.is_empty());
    }
}
