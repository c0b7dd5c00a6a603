//! The `examtrack list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use examtrack_core::model::search_exams;

use super::open_tracker;

pub async fn execute(
    data: Option<PathBuf>,
    config_path: Option<PathBuf>,
    search: Option<String>,
) -> Result<()> {
    let (tracker, _) = open_tracker(data, config_path)?;
    let data = tracker.load().await?;
    let exams = search_exams(&data.exams, search.as_deref().unwrap_or(""));

    if exams.is_empty() {
        println!("No exams found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Exam", "Date", "Result", "Score"]);
    for exam in &exams {
        let score = match (exam.total_score, exam.max_total_score) {
            (Some(total), Some(max)) => match exam.percentage() {
                Some(pct) => format!("{total}/{max} ({pct}%)"),
                None => format!("{total}/{max}"),
            },
            (Some(total), None) => total.to_string(),
            _ => "-".to_string(),
        };
        table.add_row(vec![
            Cell::new(exam.id),
            Cell::new(&exam.name),
            Cell::new(exam.date),
            Cell::new(if exam.passed { "PASS" } else { "FAIL" }),
            Cell::new(score),
        ]);
    }

    println!("{table}");
    println!("{} exam(s)", exams.len());

    Ok(())
}
