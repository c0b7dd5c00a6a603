//! JSON data file store.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use examtrack_core::error::StoreError;
use examtrack_core::model::{ExamData, ExamRecord, Field};
use examtrack_core::traits::{DataStore, ExamStore, FieldStore};

/// A store backed by a single JSON data file.
///
/// The file is re-read on every load, so edits made by other tools are
/// picked up on the next request. `load_all` parses the file once, so exams
/// and fields always come from the same version of it.
pub struct JsonFileStore {
    path: PathBuf,
    reads: AtomicU32,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            reads: AtomicU32::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of times the data file has been read.
    pub fn read_count(&self) -> u32 {
        self.reads.load(Ordering::Relaxed)
    }

    async fn read(&self) -> Result<ExamData, StoreError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.display().to_string()));
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        serde_json::from_str(&content)
            .map_err(|e| StoreError::Parse(format!("{}: {e}", self.path.display())))
    }
}

#[async_trait]
impl ExamStore for JsonFileStore {
    async fn list_exams(&self) -> Result<Vec<ExamRecord>, StoreError> {
        Ok(self.read().await?.exams)
    }
}

#[async_trait]
impl FieldStore for JsonFileStore {
    async fn list_fields(&self) -> Result<Vec<Field>, StoreError> {
        Ok(self.read().await?.fields)
    }
}

#[async_trait]
impl DataStore for JsonFileStore {
    fn name(&self) -> &str {
        "json"
    }

    async fn load_all(&self) -> Result<ExamData, StoreError> {
        self.read().await
    }
}
