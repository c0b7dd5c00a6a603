//! Memoization of analytics snapshots.
//!
//! The cache holds at most one snapshot, keyed on a fingerprint of the
//! `(exams, fields)` pair it was computed from. Any change to either
//! collection changes the fingerprint, so the next lookup recomputes.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::analytics::{compute_analytics, AnalyticsSnapshot};
use crate::model::{ExamRecord, Field};

/// Fingerprint of an analytics input pair.
pub fn input_fingerprint(exams: &[ExamRecord], fields: &[Field]) -> u64 {
    let mut hasher = DefaultHasher::new();
    exams.hash(&mut hasher);
    fields.hash(&mut hasher);
    hasher.finish()
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Single-entry snapshot cache.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    entry: Option<(u64, Arc<AnalyticsSnapshot>)>,
    stats: CacheStats,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached snapshot for these inputs, computing it on a miss.
    pub fn get_or_compute(
        &mut self,
        exams: &[ExamRecord],
        fields: &[Field],
    ) -> Arc<AnalyticsSnapshot> {
        let key = input_fingerprint(exams, fields);

        if let Some((cached_key, snapshot)) = &self.entry {
            if *cached_key == key {
                self.stats.hits += 1;
                tracing::debug!(key, "analytics cache hit");
                return Arc::clone(snapshot);
            }
        }

        self.stats.misses += 1;
        tracing::debug!(
            key,
            exams = exams.len(),
            fields = fields.len(),
            "analytics cache miss, recomputing"
        );
        let snapshot = Arc::new(compute_analytics(exams, fields));
        self.entry = Some((key, Arc::clone(&snapshot)));
        snapshot
    }

    /// The most recently computed snapshot, if any.
    pub fn current(&self) -> Option<Arc<AnalyticsSnapshot>> {
        self.entry.as_ref().map(|(_, s)| Arc::clone(s))
    }

    /// Drop the cached snapshot.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
