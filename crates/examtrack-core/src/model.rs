//! Core data model types for examtrack.
//!
//! These are the records the stores hand to the analytics engine: exams,
//! the per-field scores recorded for each exam, and the subject areas
//! (fields) those scores are categorized by.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of an exam record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExamId(pub i64);

/// Identifier of a subject area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(pub i64);

impl fmt::Display for ExamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single recorded exam attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExamRecord {
    /// Unique identifier for this exam.
    pub id: ExamId,
    /// Display name (e.g. the certification title).
    pub name: String,
    /// Calendar date the exam was taken.
    #[serde(rename = "exam_date", alias = "date")]
    pub date: NaiveDate,
    /// Whether the exam was passed.
    pub passed: bool,
    /// Total points scored, if recorded.
    #[serde(default)]
    pub total_score: Option<u32>,
    /// Points available, if recorded.
    #[serde(default)]
    pub max_total_score: Option<u32>,
    /// Per-field scores, in recorded order.
    #[serde(default, rename = "scores")]
    pub field_scores: Vec<FieldScore>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// One exam's score within a single field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldScore {
    /// The field this score belongs to. Not guaranteed to exist.
    pub field_id: FieldId,
    /// Points scored.
    pub score: u32,
    /// Points available.
    pub max_score: u32,
    /// When the score was recorded; orders scores for improvement tracking.
    pub created_at: DateTime<Utc>,
}

/// A subject area exam scores are categorized by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    /// Unique identifier for this field.
    pub id: FieldId,
    /// Display name.
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Display color, e.g. "#3B82F6".
    #[serde(default)]
    pub color: Option<String>,
}

/// Everything known about one learner: the contents of a data file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamData {
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub exams: Vec<ExamRecord>,
}

/// `score / max * 100`, or 0 when `max` is 0.
pub(crate) fn percent_of(score: u32, max: u32) -> f64 {
    if max == 0 {
        return 0.0;
    }
    f64::from(score) / f64::from(max) * 100.0
}

impl FieldScore {
    /// Unrounded percentage of the available points.
    pub fn percentage(&self) -> f64 {
        percent_of(self.score, self.max_score)
    }
}

impl ExamRecord {
    /// Rounded total percentage, when both totals are recorded.
    pub fn percentage(&self) -> Option<u32> {
        match (self.total_score, self.max_total_score) {
            (Some(total), Some(max)) if max > 0 => Some(percent_of(total, max).round() as u32),
            _ => None,
        }
    }

    /// Each field score of this exam paired with its field's name.
    pub fn field_breakdown(&self, fields: &[Field]) -> Vec<FieldScoreLine> {
        self.field_scores
            .iter()
            .map(|s| FieldScoreLine {
                field_id: s.field_id,
                field_name: fields
                    .iter()
                    .find(|f| f.id == s.field_id)
                    .map(|f| f.name.clone()),
                score: s.score,
                max_score: s.max_score,
                percentage: s.percentage().round() as u32,
            })
            .collect()
    }
}

/// A field score resolved against the field list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldScoreLine {
    pub field_id: FieldId,
    /// `None` when the score references a field that no longer exists.
    pub field_name: Option<String>,
    pub score: u32,
    pub max_score: u32,
    pub percentage: u32,
}

/// Exams whose name contains `term`, ignoring case. Order is preserved.
pub fn search_exams<'a>(exams: &'a [ExamRecord], term: &str) -> Vec<&'a ExamRecord> {
    let needle = term.to_lowercase();
    exams
        .iter()
        .filter(|e| e.name.to_lowercase().contains(&needle))
        .collect()
}
