//! Analytics report types with JSON persistence and report comparison.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analytics::{AnalyticsSnapshot, ProgressSummary};
use crate::model::FieldId;
use crate::recommend::{build_recommendations, Recommendation};
use crate::trend::{field_trends, FieldTrend};

/// A complete analytics report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// The computed analytics.
    pub snapshot: AnalyticsSnapshot,
    /// Headline figures of the score timeline.
    pub summary: ProgressSummary,
    /// Trend classification for every field.
    pub trends: Vec<FieldTrend>,
    /// Study recommendations, in display order.
    pub recommendations: Vec<Recommendation>,
}

impl AnalyticsReport {
    /// Build a report around a snapshot.
    pub fn new(snapshot: AnalyticsSnapshot) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            summary: ProgressSummary::from_progress(&snapshot.progress_data),
            trends: field_trends(&snapshot),
            recommendations: build_recommendations(Some(&snapshot)),
            snapshot,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AnalyticsReport = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse report from {}", path.display()))?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let s = &self.snapshot;
        let mut md = String::new();

        md.push_str("## Exam progress\n\n");
        md.push_str(&format!(
            "**Exams:** {} ({} passed, {}% pass rate) | **Average score:** {}\n\n",
            s.total_exams, s.passed_exams, s.pass_rate, s.average_score
        ));

        if let (Some(best), Some(lowest)) = (self.summary.best_score, self.summary.lowest_score) {
            md.push_str(&format!("**Best:** {best} | **Lowest:** {lowest}"));
            if let Some(change) = self.summary.overall_change {
                md.push_str(&format!(" | **Overall change:** {change:+}"));
            }
            md.push_str("\n\n");
        }

        if !s.field_stats.is_empty() {
            md.push_str("### Fields\n\n");
            md.push_str("| Field | Scores | Avg score | Avg % | Improvement | Trend |\n");
            md.push_str("|-------|--------|-----------|-------|-------------|-------|\n");
            for (stat, trend) in s.field_stats.iter().zip(&self.trends) {
                md.push_str(&format!(
                    "| {} | {} | {} | {}% | {:+} | {} |\n",
                    stat.field_name,
                    stat.exam_count,
                    stat.average_score,
                    stat.average_percentage,
                    stat.improvement,
                    trend.trend
                ));
            }
            md.push('\n');
        }

        if let Some(weakest) = &s.weakest_field {
            md.push_str(&format!("**Weakest field:** {weakest}\n\n"));
        }
        if let Some(strongest) = &s.strongest_field {
            md.push_str(&format!("**Strongest field:** {strongest}\n\n"));
        }

        if !self.recommendations.is_empty() {
            md.push_str("### Recommendations\n\n");
            for r in &self.recommendations {
                md.push_str(&format!("- {r}\n"));
            }
        }

        md
    }

    /// Compare this report against a baseline.
    ///
    /// Only fields with at least one score in a report take part. A field's
    /// average percentage must move by more than `threshold` points to count
    /// as a regression or improvement.
    pub fn compare(&self, baseline: &AnalyticsReport, threshold: u32) -> ComparisonReport {
        let scored = |report: &AnalyticsReport| -> HashMap<FieldId, (String, u32)> {
            report
                .snapshot
                .field_stats
                .iter()
                .filter(|s| s.exam_count > 0)
                .map(|s| (s.field_id, (s.field_name.clone(), s.average_percentage)))
                .collect()
        };

        let baseline_fields = scored(baseline);
        let current_fields = scored(self);
        let threshold = i64::from(threshold);

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut new_fields = 0usize;

        // Walk current fields in report order so output is stable.
        for stat in self.snapshot.field_stats.iter().filter(|s| s.exam_count > 0) {
            let Some((_, baseline_pct)) = baseline_fields.get(&stat.field_id) else {
                new_fields += 1;
                continue;
            };
            let delta = i64::from(stat.average_percentage) - i64::from(*baseline_pct);
            let change = FieldChange {
                field_id: stat.field_id,
                field_name: stat.field_name.clone(),
                baseline_percentage: *baseline_pct,
                current_percentage: stat.average_percentage,
                delta,
            };
            if delta < -threshold {
                regressions.push(change);
            } else if delta > threshold {
                improvements.push(change);
            } else {
                unchanged += 1;
            }
        }

        let removed_fields = baseline_fields
            .keys()
            .filter(|k| !current_fields.contains_key(k))
            .count();

        ComparisonReport {
            pass_rate_delta: i64::from(self.snapshot.pass_rate)
                - i64::from(baseline.snapshot.pass_rate),
            average_score_delta: i64::from(self.snapshot.average_score)
                - i64::from(baseline.snapshot.average_score),
            regressions,
            improvements,
            unchanged,
            new_fields,
            removed_fields,
        }
    }
}

/// Result of comparing two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Change in pass rate, in percentage points.
    pub pass_rate_delta: i64,
    /// Change in average total score.
    pub average_score_delta: i64,
    /// Fields whose average percentage went down.
    pub regressions: Vec<FieldChange>,
    /// Fields whose average percentage went up.
    pub improvements: Vec<FieldChange>,
    /// Fields with no significant change.
    pub unchanged: usize,
    /// Fields scored in current but not baseline.
    pub new_fields: usize,
    /// Fields scored in baseline but not current.
    pub removed_fields: usize,
}

/// A field whose average percentage moved between two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldChange {
    pub field_id: FieldId,
    pub field_name: String,
    pub baseline_percentage: u32,
    pub current_percentage: u32,
    pub delta: i64,
}

impl ComparisonReport {
    /// Format the comparison as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} regressions, {} improvements, {} unchanged \
             (pass rate {:+}, average score {:+})\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged,
            self.pass_rate_delta,
            self.average_score_delta
        ));

        for (title, changes) in [
            ("Regressions", &self.regressions),
            ("Improvements", &self.improvements),
        ] {
            if changes.is_empty() {
                continue;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Field | Baseline | Current | Delta |\n");
            md.push_str("|-------|----------|---------|-------|\n");
            for c in changes {
                md.push_str(&format!(
                    "| {} | {}% | {}% | {:+} |\n",
                    c.field_name, c.baseline_percentage, c.current_percentage, c.delta
                ));
            }
            md.push('\n');
        }

        md
    }

    /// Returns true if any field regressed.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{FieldStat, ProgressPoint};
    use chrono::NaiveDate;

    fn stat(id: i64, name: &str, count: usize, pct: u32) -> FieldStat {
        FieldStat {
            field_id: FieldId(id),
            field_name: name.into(),
            exam_count: count,
            average_score: pct / 4,
            average_percentage: pct,
            improvement: 0,
        }
    }

    fn make_report(pass_rate: u32, stats: Vec<FieldStat>) -> AnalyticsReport {
        let weakest = stats
            .iter()
            .filter(|s| s.exam_count > 0)
            .min_by_key(|s| s.average_percentage)
            .map(|s| s.field_name.clone());
        AnalyticsReport::new(AnalyticsSnapshot {
            total_exams: 2,
            passed_exams: 1,
            pass_rate,
            average_score: 65,
            progress_data: vec![
                ProgressPoint {
                    date: NaiveDate::from_ymd_opt(2024, 4, 21).unwrap(),
                    score: 55,
                    exam_name: "Applied".into(),
                    passed: false,
                },
                ProgressPoint {
                    date: NaiveDate::from_ymd_opt(2024, 10, 20).unwrap(),
                    score: 75,
                    exam_name: "Fundamental".into(),
                    passed: true,
                },
            ],
            field_stats: stats,
            weakest_field: weakest.clone(),
            strongest_field: weakest,
        })
    }

    #[test]
    fn new_report_derives_everything() {
        let report = make_report(45, vec![stat(1, "Strategy", 1, 53)]);
        assert_eq!(report.summary.overall_change, Some(20));
        assert_eq!(report.trends.len(), 1);
        assert_eq!(
            report.recommendations,
            vec![
                Recommendation::LowPassRate,
                Recommendation::FocusOnField {
                    field: "Strategy".into()
                },
                Recommendation::ScoreImproved,
            ]
        );
    }

    #[test]
    fn compare_identical_reports() {
        let stats = vec![stat(1, "Technology", 2, 66), stat(2, "Management", 1, 80)];
        let baseline = make_report(50, stats.clone());
        let current = make_report(50, stats);

        let cmp = current.compare(&baseline, 5);
        assert!(cmp.regressions.is_empty());
        assert!(cmp.improvements.is_empty());
        assert_eq!(cmp.unchanged, 2);
        assert_eq!(cmp.pass_rate_delta, 0);
    }

    #[test]
    fn compare_with_regression_and_improvement() {
        let baseline = make_report(
            50,
            vec![stat(1, "Technology", 2, 66), stat(2, "Management", 1, 80)],
        );
        let current = make_report(
            80,
            vec![stat(1, "Technology", 3, 50), stat(2, "Management", 2, 90)],
        );

        let cmp = current.compare(&baseline, 5);
        assert_eq!(cmp.regressions.len(), 1);
        assert_eq!(cmp.regressions[0].field_name, "Technology");
        assert_eq!(cmp.regressions[0].delta, -16);
        assert_eq!(cmp.improvements.len(), 1);
        assert_eq!(cmp.improvements[0].delta, 10);
        assert_eq!(cmp.pass_rate_delta, 30);
        assert!(cmp.has_regressions());
    }

    #[test]
    fn compare_within_threshold_is_unchanged() {
        let baseline = make_report(50, vec![stat(1, "Technology", 2, 66)]);
        let current = make_report(50, vec![stat(1, "Technology", 2, 61)]);
        let cmp = current.compare(&baseline, 5);
        assert_eq!(cmp.unchanged, 1);
        assert!(!cmp.has_regressions());
    }

    #[test]
    fn compare_with_new_and_removed() {
        let baseline = make_report(
            50,
            vec![stat(1, "Technology", 1, 60), stat(2, "Management", 0, 0)],
        );
        let current = make_report(
            50,
            vec![stat(1, "Technology", 0, 0), stat(2, "Management", 1, 70)],
        );

        let cmp = current.compare(&baseline, 5);
        assert_eq!(cmp.new_fields, 1);
        assert_eq!(cmp.removed_fields, 1);
        assert_eq!(cmp.unchanged, 0);
    }

    #[test]
    fn json_roundtrip() {
        let report = make_report(67, vec![stat(1, "Technology", 2, 66)]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");

        report.save_json(&path).unwrap();
        let loaded = AnalyticsReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.snapshot, report.snapshot);
        assert_eq!(loaded.recommendations, report.recommendations);
    }

    #[test]
    fn load_missing_file_fails_with_path() {
        let err = AnalyticsReport::load_json(Path::new("/nonexistent/report.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/report.json"));
    }

    #[test]
    fn markdown_output() {
        let report = make_report(45, vec![stat(1, "Strategy", 1, 53)]);
        let md = report.to_markdown();
        assert!(md.contains("45% pass rate"));
        assert!(md.contains("| Strategy | 1 | 13 | 53% | +0 | stable |"));
        assert!(md.contains("**Overall change:** +20"));
        assert!(md.contains("### Recommendations"));

        let baseline = make_report(50, vec![stat(1, "Strategy", 1, 70)]);
        let cmp_md = report.compare(&baseline, 5).to_markdown();
        assert!(cmp_md.contains("Regressions"));
        assert!(cmp_md.contains("| Strategy | 70% | 53% | -17 |"));
    }
}
