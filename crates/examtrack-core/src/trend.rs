//! Per-field trend classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analytics::AnalyticsSnapshot;
use crate::model::FieldId;

/// Improvement (in percentage points) a field must exceed to leave `Stable`.
pub const TREND_THRESHOLD: i32 = 5;

/// Direction a field's scores are moving in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl Trend {
    pub fn from_improvement(improvement: i32) -> Self {
        if improvement > TREND_THRESHOLD {
            Trend::Improving
        } else if improvement < -TREND_THRESHOLD {
            Trend::Declining
        } else {
            Trend::Stable
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Improving => write!(f, "improving"),
            Trend::Declining => write!(f, "declining"),
            Trend::Stable => write!(f, "stable"),
        }
    }
}

impl FromStr for Trend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "improving" => Ok(Trend::Improving),
            "declining" => Ok(Trend::Declining),
            "stable" => Ok(Trend::Stable),
            other => Err(format!("unknown trend: {other}")),
        }
    }
}

/// Classify a field's trend in a previously computed snapshot.
///
/// Without a snapshot, or for a field the snapshot doesn't know, the
/// trend is `Stable`.
pub fn classify_trend(snapshot: Option<&AnalyticsSnapshot>, field_id: FieldId) -> Trend {
    snapshot
        .map(|s| s.field_trend(field_id))
        .unwrap_or(Trend::Stable)
}

/// A field's improvement and its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTrend {
    pub field_id: FieldId,
    pub field_name: String,
    pub improvement: i32,
    pub trend: Trend,
}

/// Trends for every field in the snapshot, in field order.
pub fn field_trends(snapshot: &AnalyticsSnapshot) -> Vec<FieldTrend> {
    snapshot
        .field_stats
        .iter()
        .map(|s| FieldTrend {
            field_id: s.field_id,
            field_name: s.field_name.clone(),
            improvement: s.improvement,
            trend: Trend::from_improvement(s.improvement),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::FieldStat;

    fn snapshot_with(improvements: &[i32]) -> AnalyticsSnapshot {
        AnalyticsSnapshot {
            total_exams: 0,
            passed_exams: 0,
            pass_rate: 0,
            average_score: 0,
            progress_data: vec![],
            field_stats: improvements
                .iter()
                .enumerate()
                .map(|(i, &improvement)| FieldStat {
                    field_id: FieldId(i as i64 + 1),
                    field_name: format!("field-{}", i + 1),
                    exam_count: 2,
                    average_score: 0,
                    average_percentage: 0,
                    improvement,
                })
                .collect(),
            weakest_field: None,
            strongest_field: None,
        }
    }

    #[test]
    fn thresholds_are_exclusive() {
        assert_eq!(Trend::from_improvement(6), Trend::Improving);
        assert_eq!(Trend::from_improvement(5), Trend::Stable);
        assert_eq!(Trend::from_improvement(0), Trend::Stable);
        assert_eq!(Trend::from_improvement(-5), Trend::Stable);
        assert_eq!(Trend::from_improvement(-6), Trend::Declining);
    }

    #[test]
    fn classify_known_and_unknown_fields() {
        let snap = snapshot_with(&[20, -12, 3]);
        assert_eq!(classify_trend(Some(&snap), FieldId(1)), Trend::Improving);
        assert_eq!(classify_trend(Some(&snap), FieldId(2)), Trend::Declining);
        assert_eq!(classify_trend(Some(&snap), FieldId(3)), Trend::Stable);
        assert_eq!(classify_trend(Some(&snap), FieldId(99)), Trend::Stable);
    }

    #[test]
    fn missing_snapshot_is_stable() {
        assert_eq!(classify_trend(None, FieldId(1)), Trend::Stable);
    }

    #[test]
    fn field_trends_follow_field_order() {
        let trends = field_trends(&snapshot_with(&[-7, 7]));
        assert_eq!(trends.len(), 2);
        assert_eq!(trends[0].trend, Trend::Declining);
        assert_eq!(trends[1].field_name, "field-2");
        assert_eq!(trends[1].trend, Trend::Improving);
    }

    #[test]
    fn trend_display_and_parse() {
        assert_eq!(Trend::Improving.to_string(), "improving");
        assert_eq!("Declining".parse::<Trend>().unwrap(), Trend::Declining);
        assert!("sideways".parse::<Trend>().is_err());
    }
}
