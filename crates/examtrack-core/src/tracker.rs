//! Progress tracker: loads a learner's data and serves analytics.
//!
//! Coordinates the store reads (exams and fields come from a single
//! `load_all`) with the snapshot cache, so repeated requests over unchanged data reuse
//! the previous snapshot.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::analytics::AnalyticsSnapshot;
use crate::cache::{CacheStats, SnapshotCache};
use crate::error::StoreError;
use crate::model::{ExamData, FieldId};
use crate::recommend::{build_recommendations, Recommendation};
use crate::report::AnalyticsReport;
use crate::traits::DataStore;
use crate::trend::{classify_trend, Trend};

/// Serves analytics for the data held in a store.
pub struct ProgressTracker {
    store: Arc<dyn DataStore>,
    cache: Mutex<SnapshotCache>,
}

impl ProgressTracker {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self {
            store,
            cache: Mutex::new(SnapshotCache::new()),
        }
    }

    /// Read exams and fields from the store in one load.
    pub async fn load(&self) -> Result<ExamData, StoreError> {
        let data = self.store.load_all().await.inspect_err(|e| {
            tracing::warn!(
                store = self.store.name(),
                permanent = e.is_permanent(),
                "failed to load exam data: {e}"
            );
        })?;
        tracing::debug!(
            store = self.store.name(),
            exams = data.exams.len(),
            fields = data.fields.len(),
            "loaded exam data"
        );
        Ok(data)
    }

    /// Current analytics, recomputed only when the stored data changed.
    pub async fn analytics(&self) -> Result<Arc<AnalyticsSnapshot>, StoreError> {
        let data = self.load().await?;
        let snapshot = self.cache().get_or_compute(&data.exams, &data.fields);
        Ok(snapshot)
    }

    /// A full report over the current data.
    pub async fn report(&self) -> Result<AnalyticsReport, StoreError> {
        let snapshot = self.analytics().await?;
        Ok(AnalyticsReport::new((*snapshot).clone()))
    }

    /// Trend of a field in the last computed snapshot.
    pub fn field_trend(&self, field_id: FieldId) -> Trend {
        let snapshot = self.cache().current();
        classify_trend(snapshot.as_deref(), field_id)
    }

    /// Recommendations for the last computed snapshot.
    pub fn recommendations(&self) -> Vec<Recommendation> {
        let snapshot = self.cache().current();
        build_recommendations(snapshot.as_deref())
    }

    /// Forget the cached snapshot so the next request recomputes.
    pub fn invalidate(&self) {
        self.cache().invalidate();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache().stats()
    }

    fn cache(&self) -> MutexGuard<'_, SnapshotCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
