//! The `examtrack validate` command.

use std::path::PathBuf;

use anyhow::Result;

use examtrack_core::parser::{parse_data_file, validate_data};

pub fn execute(data_path: PathBuf) -> Result<()> {
    let data = parse_data_file(&data_path)?;

    println!(
        "Data file: {} ({} exams, {} fields)",
        data_path.display(),
        data.exams.len(),
        data.fields.len()
    );

    let warnings = validate_data(&data);
    for w in &warnings {
        let prefix = w
            .exam_id
            .map(|id| format!("  [exam {id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Data file valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
