//! examtrack-core: exam data model, analytics aggregation, and reports.
//!
//! This crate defines the exam and field records, the pure analytics
//! engine that turns them into progress statistics, and the derived
//! trend and recommendation queries the rest of examtrack builds on.

pub mod analytics;
pub mod cache;
pub mod error;
pub mod model;
pub mod parser;
pub mod recommend;
pub mod report;
pub mod tracker;
pub mod traits;
pub mod trend;

pub use analytics::{compute_analytics, AnalyticsSnapshot, FieldStat, ProgressPoint};
pub use error::StoreError;
pub use recommend::{build_recommendations, Recommendation};
pub use trend::{classify_trend, Trend};
