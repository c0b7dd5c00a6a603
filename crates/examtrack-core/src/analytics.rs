//! Analytics aggregation over a learner's exam history.
//!
//! [`compute_analytics`] is a pure function of the exam and field lists:
//! identical inputs always produce an identical [`AnalyticsSnapshot`].
//! Every ratio is guarded against empty inputs, and scores that reference
//! an unknown field are ignored rather than treated as errors.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{ExamRecord, Field, FieldId, FieldScore};
use crate::recommend::{build_recommendations, Recommendation};
use crate::trend::Trend;

/// Derived progress statistics for one learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub total_exams: usize,
    pub passed_exams: usize,
    /// Percentage of exams passed, rounded.
    pub pass_rate: u32,
    /// Mean total score over all exams, counting unrecorded totals as 0.
    pub average_score: u32,
    /// Exams with a recorded total, oldest first.
    pub progress_data: Vec<ProgressPoint>,
    /// One entry per field, in field order.
    pub field_stats: Vec<FieldStat>,
    /// Name of the scored field with the lowest average percentage.
    pub weakest_field: Option<String>,
    /// Name of the scored field with the highest average percentage.
    pub strongest_field: Option<String>,
}

/// One exam on the score timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPoint {
    pub date: NaiveDate,
    pub score: u32,
    pub exam_name: String,
    pub passed: bool,
}

/// Aggregated scores for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldStat {
    pub field_id: FieldId,
    pub field_name: String,
    /// Number of scores recorded for this field.
    pub exam_count: usize,
    /// Mean of the raw scores, rounded.
    pub average_score: u32,
    /// Mean of the per-score percentages, rounded.
    pub average_percentage: u32,
    /// Rounded percentage of the newest score minus that of the oldest.
    pub improvement: i32,
}

/// Compute the analytics snapshot for a set of exams and fields.
pub fn compute_analytics(exams: &[ExamRecord], fields: &[Field]) -> AnalyticsSnapshot {
    let total_exams = exams.len();
    let passed_exams = exams.iter().filter(|e| e.passed).count();
    let pass_rate = if total_exams > 0 {
        (passed_exams as f64 / total_exams as f64 * 100.0).round() as u32
    } else {
        0
    };

    let score_sum: f64 = exams
        .iter()
        .map(|e| f64::from(e.total_score.unwrap_or(0)))
        .sum();
    let average_score = rounded_mean(score_sum, total_exams);

    let grouped = group_scores_by_field(exams);
    let field_stats: Vec<FieldStat> = fields
        .iter()
        .map(|field| {
            let scores = grouped.get(&field.id).map(Vec::as_slice).unwrap_or(&[]);
            field_stat(field, scores)
        })
        .collect();

    let (weakest_field, strongest_field) = weakest_and_strongest(&field_stats);

    AnalyticsSnapshot {
        total_exams,
        passed_exams,
        pass_rate,
        average_score,
        progress_data: progress_series(exams),
        field_stats,
        weakest_field,
        strongest_field,
    }
}

/// Exams with a recorded total score, sorted by date.
///
/// The sort is stable, so exams on the same date keep their input order.
pub fn progress_series(exams: &[ExamRecord]) -> Vec<ProgressPoint> {
    let mut points: Vec<ProgressPoint> = exams
        .iter()
        .filter_map(|e| {
            e.total_score.map(|score| ProgressPoint {
                date: e.date,
                score,
                exam_name: e.name.clone(),
                passed: e.passed,
            })
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

/// Group every field score across all exams by field id, in exam order.
fn group_scores_by_field(exams: &[ExamRecord]) -> HashMap<FieldId, Vec<&FieldScore>> {
    let mut grouped: HashMap<FieldId, Vec<&FieldScore>> = HashMap::new();
    for score in exams.iter().flat_map(|e| e.field_scores.iter()) {
        grouped.entry(score.field_id).or_default().push(score);
    }
    grouped
}

fn field_stat(field: &Field, scores: &[&FieldScore]) -> FieldStat {
    let exam_count = scores.len();
    let raw_sum: f64 = scores.iter().map(|s| f64::from(s.score)).sum();
    let percentage_sum: f64 = scores.iter().map(|s| s.percentage()).sum();

    FieldStat {
        field_id: field.id,
        field_name: field.name.clone(),
        exam_count,
        average_score: rounded_mean(raw_sum, exam_count),
        average_percentage: rounded_mean(percentage_sum, exam_count),
        improvement: improvement(scores),
    }
}

/// Only the chronologically first and last scores matter.
fn improvement(scores: &[&FieldScore]) -> i32 {
    if scores.len() < 2 {
        return 0;
    }
    let mut chronological = scores.to_vec();
    chronological.sort_by_key(|s| s.created_at);

    match (chronological.first(), chronological.last()) {
        (Some(first), Some(last)) => {
            last.percentage().round() as i32 - first.percentage().round() as i32
        }
        _ => 0,
    }
}

/// Lowest and highest average percentage among fields that have scores.
/// Ties go to the field listed first.
fn weakest_and_strongest(stats: &[FieldStat]) -> (Option<String>, Option<String>) {
    let mut weakest: Option<&FieldStat> = None;
    let mut strongest: Option<&FieldStat> = None;

    for stat in stats.iter().filter(|s| s.exam_count > 0) {
        if weakest.map_or(true, |w| stat.average_percentage < w.average_percentage) {
            weakest = Some(stat);
        }
        if strongest.map_or(true, |s| stat.average_percentage > s.average_percentage) {
            strongest = Some(stat);
        }
    }

    (
        weakest.map(|s| s.field_name.clone()),
        strongest.map(|s| s.field_name.clone()),
    )
}

fn rounded_mean(sum: f64, count: usize) -> u32 {
    if count == 0 {
        return 0;
    }
    (sum / count as f64).round() as u32
}

impl AnalyticsSnapshot {
    /// Statistics for one field, if the field was part of the input.
    pub fn field_stat(&self, field_id: FieldId) -> Option<&FieldStat> {
        self.field_stats.iter().find(|s| s.field_id == field_id)
    }

    /// Trend label for one field; unknown fields are stable.
    pub fn field_trend(&self, field_id: FieldId) -> Trend {
        self.field_stat(field_id)
            .map(|s| Trend::from_improvement(s.improvement))
            .unwrap_or(Trend::Stable)
    }

    /// Study recommendations derived from this snapshot.
    pub fn recommendations(&self) -> Vec<Recommendation> {
        build_recommendations(Some(self))
    }
}

/// Headline figures of the score timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub best_score: Option<u32>,
    pub lowest_score: Option<u32>,
    /// Newest score minus oldest score; needs at least two points.
    pub overall_change: Option<i64>,
    pub latest_exam: Option<String>,
}

impl ProgressSummary {
    pub fn from_progress(progress: &[ProgressPoint]) -> Self {
        let overall_change = match progress {
            [first, .., last] => Some(i64::from(last.score) - i64::from(first.score)),
            _ => None,
        };
        Self {
            best_score: progress.iter().map(|p| p.score).max(),
            lowest_score: progress.iter().map(|p| p.score).min(),
            overall_change,
            latest_exam: progress.last().map(|p| p.exam_name.clone()),
        }
    }
}
