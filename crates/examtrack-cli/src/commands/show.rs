//! The `examtrack show` command.

use std::path::PathBuf;

use anyhow::Result;

use examtrack_core::model::ExamId;

use super::open_tracker;

pub async fn execute(
    exam_id: i64,
    data: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (tracker, _) = open_tracker(data, config_path)?;
    let data = tracker.load().await?;

    let Some(exam) = data.exams.iter().find(|e| e.id == ExamId(exam_id)) else {
        anyhow::bail!("exam {exam_id} not found");
    };

    println!("{} ({})", exam.name, exam.date);
    println!("Result: {}", if exam.passed { "PASS" } else { "FAIL" });
    match (exam.total_score, exam.max_total_score, exam.percentage()) {
        (Some(total), Some(max), Some(pct)) => println!("Score: {total}/{max} ({pct}%)"),
        (Some(total), Some(max), None) => println!("Score: {total}/{max}"),
        (Some(total), None, _) => println!("Score: {total}"),
        _ => println!("Score: not recorded"),
    }
    if let Some(notes) = &exam.notes {
        println!("Notes: {notes}");
    }

    let lines = exam.field_breakdown(&data.fields);
    if !lines.is_empty() {
        println!("\nField scores:");
        for line in &lines {
            let name = line
                .field_name
                .clone()
                .unwrap_or_else(|| format!("unknown field {}", line.field_id));
            println!(
                "  {name}: {}/{} ({}%)",
                line.score, line.max_score, line.percentage
            );
        }
    }

    Ok(())
}
