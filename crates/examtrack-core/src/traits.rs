//! Store trait definitions.
//!
//! The analytics engine only ever reads: these traits expose the listing
//! half of the exam and field stores. Implementations live in the
//! `examtrack-store` crate.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{ExamData, ExamRecord, Field};

/// Source of a learner's exam records.
#[async_trait]
pub trait ExamStore: Send + Sync {
    /// All exam records, in store order.
    async fn list_exams(&self) -> Result<Vec<ExamRecord>, StoreError>;
}

/// Source of the defined subject areas.
#[async_trait]
pub trait FieldStore: Send + Sync {
    /// All fields, in store order.
    async fn list_fields(&self) -> Result<Vec<Field>, StoreError>;
}

/// A store that serves both exams and fields.
#[async_trait]
pub trait DataStore: ExamStore + FieldStore {
    /// Human-readable store name (e.g. "json").
    fn name(&self) -> &str;

    /// Exams and fields read together.
    ///
    /// The default runs both list calls concurrently. Stores that can read
    /// both collections from one consistent state should override it.
    async fn load_all(&self) -> Result<ExamData, StoreError> {
        let (exams, fields) = futures::try_join!(self.list_exams(), self.list_fields())?;
        Ok(ExamData { fields, exams })
    }
}
