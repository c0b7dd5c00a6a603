//! JSON data file parser.
//!
//! Loads a learner's exams and fields from a data file, and checks the
//! contents for values the analytics engine cannot give meaningful results
//! for.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{ExamData, ExamId};

/// Parse a data file into `ExamData`.
pub fn parse_data_file(path: &Path) -> Result<ExamData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read data file: {}", path.display()))?;

    parse_data_str(&content, path)
}

/// Parse a JSON string into `ExamData` (useful for testing).
pub fn parse_data_str(content: &str, source_path: &Path) -> Result<ExamData> {
    serde_json::from_str(content)
        .with_context(|| format!("failed to parse JSON: {}", source_path.display()))
}

/// Write `ExamData` to a file as pretty JSON.
pub fn write_data_file(path: &Path, data: &ExamData) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("failed to serialize exam data")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write data file: {}", path.display()))?;
    Ok(())
}

/// A warning from data validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The exam the warning is about (if applicable).
    pub exam_id: Option<ExamId>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn exam(id: ExamId, message: String) -> Self {
        Self {
            exam_id: Some(id),
            message,
        }
    }
}

/// Validate exam data for common issues.
pub fn validate_data(data: &ExamData) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_fields = HashSet::new();
    for field in &data.fields {
        if !seen_fields.insert(field.id) {
            warnings.push(ValidationWarning {
                exam_id: None,
                message: format!("duplicate field ID: {}", field.id),
            });
        }
    }

    let mut seen_exams = HashSet::new();
    for exam in &data.exams {
        if !seen_exams.insert(exam.id) {
            warnings.push(ValidationWarning::exam(
                exam.id,
                format!("duplicate exam ID: {}", exam.id),
            ));
        }
    }

    for exam in &data.exams {
        match (exam.total_score, exam.max_total_score) {
            (_, Some(0)) => warnings.push(ValidationWarning::exam(
                exam.id,
                "max_total_score is 0".into(),
            )),
            (Some(total), Some(max)) if total > max => {
                warnings.push(ValidationWarning::exam(
                    exam.id,
                    format!("total_score {total} exceeds max_total_score {max}"),
                ))
            }
            _ => {}
        }

        for score in &exam.field_scores {
            if !seen_fields.contains(&score.field_id) {
                warnings.push(ValidationWarning::exam(
                    exam.id,
                    format!(
                        "score references unknown field {} and will be ignored",
                        score.field_id
                    ),
                ));
            }
            if score.max_score == 0 {
                warnings.push(ValidationWarning::exam(
                    exam.id,
                    format!("max_score is 0 for field {}", score.field_id),
                ));
            } else if score.score > score.max_score {
                warnings.push(ValidationWarning::exam(
                    exam.id,
                    format!(
                        "score {} exceeds max_score {} for field {}",
                        score.score, score.max_score, score.field_id
                    ),
                ));
            }
        }
    }

    warnings
}
