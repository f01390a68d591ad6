//! Reputation scoring engine for repwatch.
//!
//! Turns a product's classified mentions into a bounded reputation score,
//! a period-over-period trend, an alert level, ranked recommendations and
//! a response plan.
//! Everything here is pure and synchronous: no I/O, no wall clock, no shared
//! state, so separate products can be analyzed concurrently by the caller.

pub mod alert;
pub mod breakdown;
pub mod error;
pub mod insights;
pub mod pipeline;
pub mod response;
pub mod scorer;
pub mod trend;
pub mod types;
pub mod window;

pub use alert::classify_alert;
pub use breakdown::{breakdown, daily_sentiment};
pub use error::EngineError;
pub use insights::{generate_insights, rank_topics, topic_trends};
pub use pipeline::{analyze, analyze_batch, validate_mentions, AnalysisRequest};
pub use response::{assess_health, response_policy};
pub use scorer::{compute_score, interpret_score};
pub use trend::compute_trend;
pub use types::{
    AlertLevel, Breakdown, DailySentiment, HealthAssessment, HealthStatus, Insights, IntentCount,
    PlatformShare, PriorityCount, PriorityIssue, Recommendation, ReputationSnapshot, ScoreBand,
    ScoreInterpretation, ScoreOutcome, SentimentDistribution, Team, TopicTrend, Trend,
    TrendDirection,
};
pub use window::{AnalysisWindow, PeriodSplit};

/// Round to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `part / total` as a percentage rounded to one decimal; `0.0` when `total` is zero.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        round1(part as f64 / total as f64 * 100.0)
    }
}
