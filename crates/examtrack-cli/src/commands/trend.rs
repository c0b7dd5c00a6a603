//! The `examtrack trend` command.

use std::path::PathBuf;

use anyhow::Result;

use examtrack_core::model::FieldId;

use super::open_tracker;

pub async fn execute(
    field: i64,
    data: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (tracker, _) = open_tracker(data, config_path)?;
    let snapshot = tracker.analytics().await?;
    let field_id = FieldId(field);

    match snapshot.field_stat(field_id) {
        Some(stat) => println!(
            "{} ({}): {} ({:+} over {} scores)",
            stat.field_name,
            field_id,
            tracker.field_trend(field_id),
            stat.improvement,
            stat.exam_count
        ),
        None => {
            tracing::warn!("field {field_id} not found");
            println!("field {field_id}: {}", tracker.field_trend(field_id));
        }
    }

    Ok(())
}
