//! Study recommendations derived from an analytics snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analytics::AnalyticsSnapshot;

/// Pass rates below this are flagged.
pub const LOW_PASS_RATE: u32 = 50;
/// Pass rates at or above this are praised.
pub const HIGH_PASS_RATE: u32 = 80;

/// A single piece of study advice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recommendation {
    LowPassRate,
    HighPassRate,
    FocusOnField { field: String },
    ScoreImproved,
    ScoreDeclined,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::LowPassRate => write!(
                f,
                "Your pass rate is on the low side. Focus on reviewing the fundamentals."
            ),
            Recommendation::HighPassRate => write!(
                f,
                "You are keeping a high pass rate. Keep studying at this pace."
            ),
            Recommendation::FocusOnField { field } => write!(
                f,
                "Your score rate in {field} is low. Concentrating your study on this field is recommended."
            ),
            Recommendation::ScoreImproved => {
                write!(f, "Your scores are improving! Keep up the good work.")
            }
            Recommendation::ScoreDeclined => write!(
                f,
                "Your score dropped since the previous exam. Consider revisiting how you study."
            ),
        }
    }
}

/// Build the recommendation list for a snapshot.
///
/// Entries always appear in this order, each only when its condition holds:
/// pass-rate advice, the weakest field, then the direction of the two most
/// recent scores. No snapshot means no recommendations.
pub fn build_recommendations(snapshot: Option<&AnalyticsSnapshot>) -> Vec<Recommendation> {
    let Some(snapshot) = snapshot else {
        return Vec::new();
    };

    let mut recommendations = Vec::new();

    if snapshot.pass_rate < LOW_PASS_RATE {
        recommendations.push(Recommendation::LowPassRate);
    } else if snapshot.pass_rate >= HIGH_PASS_RATE {
        recommendations.push(Recommendation::HighPassRate);
    }

    if let Some(field) = &snapshot.weakest_field {
        recommendations.push(Recommendation::FocusOnField {
            field: field.clone(),
        });
    }

    if let [.., previous, latest] = snapshot.progress_data.as_slice() {
        if latest.score > previous.score {
            recommendations.push(Recommendation::ScoreImproved);
        } else if latest.score < previous.score {
            recommendations.push(Recommendation::ScoreDeclined);
        }
    }

    recommendations
}
