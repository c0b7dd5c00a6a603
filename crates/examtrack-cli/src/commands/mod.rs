pub mod analyze;
pub mod compare;
pub mod init;
pub mod list;
pub mod recommend;
pub mod show;
pub mod trend;
pub mod validate;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use examtrack_core::tracker::ProgressTracker;
use examtrack_core::traits::DataStore;
use examtrack_store::{create_store, load_config_from, ExamtrackConfig, JsonFileStore};

/// Build a tracker over `--data` if given, otherwise over the configured store.
pub fn open_tracker(
    data: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<(ProgressTracker, ExamtrackConfig)> {
    let config = load_config_from(config_path.as_deref())?;
    let store: Arc<dyn DataStore> = match data {
        Some(path) => Arc::new(JsonFileStore::new(path)),
        None => create_store(&config.store),
    };
    tracing::debug!(store = store.name(), "opened store");
    Ok((ProgressTracker::new(store), config))
}
