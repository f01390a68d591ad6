use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Lowercase, trim, and fold spaces/hyphens to underscores so that
/// `"App Store"`, `"app-store"` and `"app_store"` compare equal.
fn normalize_token(s: &str) -> String {
    s.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Search,
    AppStore,
    GooglePlay,
    Reddit,
    Trustpilot,
    Other,
}

impl Platform {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Search => "search",
            Platform::AppStore => "app_store",
            Platform::GooglePlay => "google_play",
            Platform::Reddit => "reddit",
            Platform::Trustpilot => "trustpilot",
            Platform::Other => "other",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "search" | "serp" | "google_serp" => Ok(Platform::Search),
            "app_store" | "appstore" => Ok(Platform::AppStore),
            "google_play" | "play_store" => Ok(Platform::GooglePlay),
            "reddit" => Ok(Platform::Reddit),
            "trustpilot" => Ok(Platform::Trustpilot),
            "other" => Ok(Platform::Other),
            _ => Err(CoreError::UnknownVariant {
                field: "platform",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            _ => Err(CoreError::UnknownVariant {
                field: "sentiment",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Complaint,
    Question,
    Recommendation,
    Neutral,
}

impl Intent {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Complaint => "complaint",
            Intent::Question => "question",
            Intent::Recommendation => "recommendation",
            Intent::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "complaint" => Ok(Intent::Complaint),
            "question" => Ok(Intent::Question),
            "recommendation" => Ok(Intent::Recommendation),
            // Older classifier exports label the neutral intent `neutral_mention`.
            "neutral" | "neutral_mention" => Ok(Intent::Neutral),
            _ => Err(CoreError::UnknownVariant {
                field: "intent",
                value: s.to_string(),
            }),
        }
    }
}

/// Mention priority. Variants are declared least to most severe, so the
/// derived `Ord` ranks `Critical` highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// All priorities, most severe first.
    pub const ALL: [Priority; 4] = [
        Priority::Critical,
        Priority::High,
        Priority::Medium,
        Priority::Low,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "critical" => Ok(Priority::Critical),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(CoreError::UnknownVariant {
                field: "priority",
                value: s.to_string(),
            }),
        }
    }
}

/// Output of the external classifier for one mention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub sentiment: Sentiment,
    pub intent: Intent,
    pub priority: Priority,
    /// Classifier confidence in `[0.0, 1.0]`.
    pub confidence: f64,
}

/// A validated mention. Owned by the mention store; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    pub id: String,
    pub product_id: String,
    pub platform: Platform,
    /// `None` until the classifier has processed the mention.
    pub classification: Option<Classification>,
    /// Trimmed, lowercased, deduplicated topic labels.
    pub topics: BTreeSet<String>,
    pub timestamp: DateTime<Utc>,
}

impl Mention {
    #[must_use]
    pub fn is_classified(&self) -> bool {
        self.classification.is_some()
    }
}

/// Canonical form of a topic label: trimmed and lowercased.
#[must_use]
pub fn normalize_topic(topic: &str) -> String {
    topic.trim().to_lowercase()
}

/// A mention as exported by the mention store, before validation.
///
/// Classification fields are loose strings so that unrecognized values can be
/// reported instead of failing the whole file at deserialization time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMention {
    pub id: String,
    pub product_id: String,
    pub platform: String,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default, alias = "confidence_score")]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(alias = "original_date")]
    pub timestamp: DateTime<Utc>,
}

impl TryFrom<RawMention> for Mention {
    type Error = CoreError;

    fn try_from(raw: RawMention) -> Result<Self, Self::Error> {
        if raw.id.trim().is_empty() {
            return Err(CoreError::MissingId);
        }

        let platform = raw.platform.parse::<Platform>()?;
        let classification = parse_classification(
            raw.sentiment.as_deref(),
            raw.intent.as_deref(),
            raw.priority.as_deref(),
            raw.confidence,
        )?;

        let topics = raw
            .topics
            .iter()
            .map(|t| normalize_topic(t))
            .filter(|t| !t.is_empty())
            .collect();

        Ok(Mention {
            id: raw.id,
            product_id: raw.product_id,
            platform,
            classification,
            topics,
            timestamp: raw.timestamp,
        })
    }
}

fn parse_classification(
    sentiment: Option<&str>,
    intent: Option<&str>,
    priority: Option<&str>,
    confidence: Option<f64>,
) -> Result<Option<Classification>, CoreError> {
    match (sentiment, intent, priority, confidence) {
        (None, None, None, None) => Ok(None),
        (Some(sentiment), Some(intent), Some(priority), Some(confidence)) => {
            if !(0.0..=1.0).contains(&confidence) {
                return Err(CoreError::ConfidenceOutOfRange(confidence));
            }
            Ok(Some(Classification {
                sentiment: sentiment.parse()?,
                intent: intent.parse()?,
                priority: priority.parse()?,
                confidence,
            }))
        }
        _ => {
            let missing: Vec<&str> = [
                ("sentiment", sentiment.is_none()),
                ("intent", intent.is_none()),
                ("priority", priority.is_none()),
                ("confidence", confidence.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, absent)| absent.then_some(name))
            .collect();
            Err(CoreError::PartialClassification(missing.join(", ")))
        }
    }
}
