//! In-memory store, for tests and for embedding examtrack in other tools.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use examtrack_core::error::StoreError;
use examtrack_core::model::{ExamData, ExamId, ExamRecord, Field, FieldId};
use examtrack_core::traits::{DataStore, ExamStore, FieldStore};

/// A store that keeps exams and fields in memory.
///
/// Mutations take `&self` so the store can be shared behind an `Arc` with
/// a `ProgressTracker` while the caller keeps editing it.
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<ExamData>,
    /// Number of reads served.
    reads: AtomicU32,
}

impl MemoryStore {
    /// Create a store holding `data`.
    pub fn new(data: ExamData) -> Self {
        Self {
            data: Mutex::new(data),
            reads: AtomicU32::new(0),
        }
    }

    /// Add or replace an exam, matched by id.
    pub fn upsert_exam(&self, exam: ExamRecord) {
        let mut data = self.data();
        match data.exams.iter_mut().find(|e| e.id == exam.id) {
            Some(existing) => *existing = exam,
            None => data.exams.push(exam),
        }
    }

    /// Remove an exam. Returns `false` if no exam had that id.
    pub fn remove_exam(&self, id: ExamId) -> bool {
        let mut data = self.data();
        let before = data.exams.len();
        data.exams.retain(|e| e.id != id);
        data.exams.len() != before
    }

    /// Add or replace a field, matched by id.
    pub fn upsert_field(&self, field: Field) {
        let mut data = self.data();
        match data.fields.iter_mut().find(|f| f.id == field.id) {
            Some(existing) => *existing = field,
            None => data.fields.push(field),
        }
    }

    /// Remove a field. Scores that reference it are kept and become orphaned.
    pub fn remove_field(&self, id: FieldId) -> bool {
        let mut data = self.data();
        let before = data.fields.len();
        data.fields.retain(|f| f.id != id);
        data.fields.len() != before
    }

    /// Number of list or load calls made against this store.
    pub fn read_count(&self) -> u32 {
        self.reads.load(Ordering::Relaxed)
    }

    fn data(&self) -> MutexGuard<'_, ExamData> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ExamStore for MemoryStore {
    async fn list_exams(&self) -> Result<Vec<ExamRecord>, StoreError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        Ok(self.data().exams.clone())
    }
}

#[async_trait]
impl FieldStore for MemoryStore {
    async fn list_fields(&self) -> Result<Vec<Field>, StoreError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        Ok(self.data().fields.clone())
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn load_all(&self) -> Result<ExamData, StoreError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        Ok(self.data().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::{NaiveDate, TimeZone, Utc};
    use examtrack_core::model::FieldScore;
    use examtrack_core::tracker::ProgressTracker;
    use examtrack_core::trend::Trend;

    fn field(id: i64, name: &str) -> Field {
        Field {
            id: FieldId(id),
            name: name.into(),
            description: None,
            color: None,
        }
    }

    fn exam(id: i64, day: u32, total: u32, tech_score: u32) -> ExamRecord {
        ExamRecord {
            id: ExamId(id),
            name: format!("exam-{id}"),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            passed: total >= 60,
            total_score: Some(total),
            max_total_score: Some(100),
            field_scores: vec![FieldScore {
                field_id: FieldId(1),
                score: tech_score,
                max_score: 25,
                created_at: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
            }],
            notes: None,
        }
    }

    #[tokio::test]
    async fn lists_what_was_stored() {
        let store = MemoryStore::default();
        store.upsert_field(field(1, "Technology"));
        store.upsert_exam(exam(1, 1, 55, 15));

        assert_eq!(store.list_exams().await.unwrap().len(), 1);
        assert_eq!(store.list_fields().await.unwrap()[0].name, "Technology");
        assert_eq!(store.read_count(), 2);
    }

    #[tokio::test]
    async fn upsert_replaces_by_id() {
        let store = MemoryStore::default();
        store.upsert_exam(exam(1, 1, 55, 15));
        store.upsert_exam(exam(1, 1, 65, 15));
        let exams = store.list_exams().await.unwrap();
        assert_eq!(exams.len(), 1);
        assert_eq!(exams[0].total_score, Some(65));

        store.upsert_field(field(1, "Technology"));
        store.upsert_field(field(1, "Tech"));
        assert_eq!(store.list_fields().await.unwrap()[0].name, "Tech");
    }

    #[tokio::test]
    async fn remove_reports_whether_anything_changed() {
        let store = MemoryStore::new(ExamData {
            fields: vec![field(1, "Technology")],
            exams: vec![exam(1, 1, 55, 15)],
        });
        assert!(store.remove_exam(ExamId(1)));
        assert!(!store.remove_exam(ExamId(1)));
        assert!(store.remove_field(FieldId(1)));
        assert!(!store.remove_field(FieldId(1)));
    }

    #[tokio::test]
    async fn tracker_sees_edits() {
        let store = Arc::new(MemoryStore::new(ExamData {
            fields: vec![field(1, "Technology")],
            exams: vec![exam(1, 1, 55, 15)],
        }));
        let tracker = ProgressTracker::new(store.clone());

        let before = tracker.analytics().await.unwrap();
        assert_eq!(before.field_stats[0].improvement, 0);

        store.upsert_exam(exam(2, 15, 75, 20));
        let after = tracker.analytics().await.unwrap();
        assert_eq!(after.field_stats[0].improvement, 20);
        assert_eq!(tracker.field_trend(FieldId(1)), Trend::Improving);

        // deleting the field orphans its scores
        store.remove_field(FieldId(1));
        let orphaned = tracker.analytics().await.unwrap();
        assert!(orphaned.field_stats.is_empty());
        assert_eq!(orphaned.weakest_field, None);
        assert_eq!(tracker.cache_stats().misses, 3);
        assert_eq!(store.read_count(), 3);
    }
}
