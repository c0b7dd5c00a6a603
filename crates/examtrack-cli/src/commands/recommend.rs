//! The `examtrack recommend` command.

use std::path::PathBuf;

use anyhow::Result;

use super::open_tracker;

pub async fn execute(data: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let (tracker, _) = open_tracker(data, config_path)?;
    tracker.analytics().await?;

    let recommendations = tracker.recommendations();
    if recommendations.is_empty() {
        println!("No recommendations.");
    }
    for r in &recommendations {
        println!("{r}");
    }

    Ok(())
}
