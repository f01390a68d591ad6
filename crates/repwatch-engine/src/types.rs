use chrono::{DateTime, NaiveDate, Utc};
use repwatch_core::{Intent, Platform, Priority, ResponsePolicy};
use serde::{Deserialize, Serialize};

/// Share of classified mentions per sentiment, in percent (one decimal).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl SentimentDistribution {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.positive + self.negative + self.neutral
    }
}

/// Result of scoring one set of mentions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    /// Reputation score in `[0.0, 100.0]`.
    pub overall_score: f64,
    /// `(positive - negative) / classified`, in `[-1.0, 1.0]`.
    pub sentiment_score: f64,
    pub sentiment_distribution: SentimentDistribution,
    pub classified_count: usize,
    /// Mentions skipped because the classifier has not processed them yet.
    pub unprocessed_count: usize,
    pub critical_count: usize,
    pub high_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Up => write!(f, "up"),
            TrendDirection::Down => write!(f, "down"),
            TrendDirection::Flat => write!(f, "flat"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    /// Signed percent change, rounded to one decimal and capped.
    pub percent: f64,
    pub capped_at_limit: bool,
}

impl Trend {
    /// The "no prior data" trend.
    #[must_use]
    pub fn flat() -> Self {
        Self {
            direction: TrendDirection::Flat,
            percent: 0.0,
            capped_at_limit: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Critical,
    Warning,
    Good,
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertLevel::Critical => write!(f, "critical"),
            AlertLevel::Warning => write!(f, "warning"),
            AlertLevel::Good => write!(f, "good"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    Product,
    Support,
    #[serde(rename = "PR")]
    Pr,
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::Product => write!(f, "Product"),
            Team::Support => write!(f, "Support"),
            Team::Pr => write!(f, "PR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub team: Team,
    pub action: String,
}

/// A topic with its mention count and the most severe priority seen for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityIssue {
    pub topic: String,
    pub count: usize,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub priority_issue_counts: Vec<PriorityIssue>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Excellent,
    Good,
    Concerning,
    Critical,
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreBand::Excellent => write!(f, "excellent"),
            ScoreBand::Good => write!(f, "good"),
            ScoreBand::Concerning => write!(f, "concerning"),
            ScoreBand::Critical => write!(f, "critical"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreInterpretation {
    pub status: ScoreBand,
    pub description: String,
    pub action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Critical,
    Healthy,
    Stable,
    AtRisk,
    Damaged,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Critical => write!(f, "critical"),
            HealthStatus::Healthy => write!(f, "healthy"),
            HealthStatus::Stable => write!(f, "stable"),
            HealthStatus::AtRisk => write!(f, "at risk"),
            HealthStatus::Damaged => write!(f, "damaged"),
        }
    }
}

/// Overall health from the score and the crisis level together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthAssessment {
    pub status: HealthStatus,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformShare {
    pub platform: Platform,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCount {
    pub priority: Priority,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentCount {
    pub intent: Intent,
    pub count: usize,
}

/// Volume breakdowns for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    /// Over all mentions, classified or not; largest share first.
    pub platforms: Vec<PlatformShare>,
    /// All four priorities, most severe first.
    pub priorities: Vec<PriorityCount>,
    pub intents: Vec<IntentCount>,
    /// Most frequent intent; `None` when nothing is classified.
    pub dominant_intent: Option<Intent>,
    /// Complaints over classified mentions; `0.0` when none are classified.
    pub complaint_ratio: f64,
    pub high_priority_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySentiment {
    pub date: NaiveDate,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicTrend {
    pub topic: String,
    pub current_count: usize,
    pub previous_count: usize,
    pub trend: Trend,
}

/// One immutable analysis run for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReputationSnapshot {
    pub product_id: String,
    pub generated_at: DateTime<Utc>,
    pub overall_score: f64,
    pub sentiment_score: f64,
    pub sentiment_distribution: SentimentDistribution,
    pub priority_issue_counts: Vec<PriorityIssue>,
    /// Score the trend was measured against, if any.
    pub previous_score: Option<f64>,
    pub trend: Trend,
    pub alert_level: AlertLevel,
    pub recommendations: Vec<Recommendation>,
    pub interpretation: ScoreInterpretation,
    pub health: HealthAssessment,
    /// Escalation timeline, notifications and review cadence for `alert_level`.
    pub response: ResponsePolicy,
    pub breakdown: Breakdown,
    pub daily_sentiment: Vec<DailySentiment>,
    pub topic_trends: Vec<TopicTrend>,
    pub classified_count: usize,
    pub unprocessed_count: usize,
}
