//! Tunable constants for the scoring engine.
//!
//! Every weight, cap and threshold the engine uses lives here with a default.
//! A YAML file may override any subset of them; omitted keys keep defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::mentions::Priority;
use crate::ConfigError;

/// Signed per-mention contribution to the reputation score, by priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PriorityWeights {
    pub critical: f64,
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            critical: -10.0,
            high: -5.0,
            medium: -2.0,
            low: 1.0,
        }
    }
}

impl PriorityWeights {
    #[must_use]
    pub fn weight(&self, priority: Priority) -> f64 {
        match priority {
            Priority::Critical => self.critical,
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlertThresholds {
    /// Scores strictly below this are critical.
    pub critical_score: f64,
    /// This many critical mentions or more is critical regardless of score.
    pub critical_count: usize,
    /// Scores strictly below this are a warning.
    pub warning_score: f64,
    /// This many high-priority mentions or more is a warning.
    pub high_count: usize,
    /// Minimum score for the good level.
    pub good_score: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            critical_score: 30.0,
            critical_count: 5,
            warning_score: 50.0,
            high_count: 10,
            good_score: 70.0,
        }
    }
}

/// What the team does while a product sits at one alert level.
///
/// All three fields are required when a level is overridden in YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponsePolicy {
    /// How quickly the situation must be escalated.
    pub escalation_timeline: String,
    /// Roles that must be notified, most senior first.
    pub notify: Vec<String>,
    /// How often the analysis should be re-run.
    pub next_review: String,
}

impl ResponsePolicy {
    fn new(escalation_timeline: &str, notify: &[&str], next_review: &str) -> Self {
        Self {
            escalation_timeline: escalation_timeline.to_string(),
            notify: notify.iter().map(|s| (*s).to_string()).collect(),
            next_review: next_review.to_string(),
        }
    }
}

/// Response policy per alert level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResponsePolicies {
    pub critical: ResponsePolicy,
    pub warning: ResponsePolicy,
    pub good: ResponsePolicy,
}

impl Default for ResponsePolicies {
    fn default() -> Self {
        Self {
            critical: ResponsePolicy::new(
                "Immediate (within 1 hour)",
                &["CEO", "PR Director", "Crisis Management Team", "Legal Team"],
                "Every 30 minutes",
            ),
            warning: ResponsePolicy::new(
                "Standard (within 24 hours)",
                &["Customer Success Manager", "Support Team Lead"],
                "Daily",
            ),
            good: ResponsePolicy::new("No escalation needed", &[], "Monthly"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// Starting score before any mention is applied.
    pub baseline: f64,
    pub weights: PriorityWeights,
    /// Extra factor applied to a complaint's negative contribution.
    pub complaint_multiplier: f64,
    /// Previous scores with an absolute value below this get the tighter cap.
    pub small_previous_threshold: f64,
    /// Trend cap (percent) when the previous score is small.
    pub small_previous_cap: f64,
    /// Absolute trend cap (percent) otherwise.
    pub trend_cap: f64,
    pub alerts: AlertThresholds,
    /// Number of ranked topics turned into product actions.
    pub top_topics: usize,
    pub escalation_action: String,
    pub support_actions: Vec<String>,
    pub response: ResponsePolicies,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            baseline: 100.0,
            weights: PriorityWeights::default(),
            complaint_multiplier: 2.0,
            small_previous_threshold: 10.0,
            small_previous_cap: 300.0,
            trend_cap: 500.0,
            alerts: AlertThresholds::default(),
            top_topics: 5,
            escalation_action:
                "Escalate to crisis management and prepare a public statement".to_string(),
            support_actions: vec![
                "Respond to open complaints within 24 hours".to_string(),
                "Publish troubleshooting guidance for the most reported issues".to_string(),
                "Follow up with customers whose issues were resolved".to_string(),
            ],
            response: ResponsePolicies::default(),
        }
    }
}

impl ScoringConfig {
    /// Check that the configured values are internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Validation(msg));

        if !(0.0..=100.0).contains(&self.baseline) {
            return invalid(format!("baseline {} must be within [0, 100]", self.baseline));
        }
        let w = &self.weights;
        if [w.critical, w.high, w.medium, w.low]
            .iter()
            .any(|v| !v.is_finite())
        {
            return invalid("priority weights must be finite".to_string());
        }
        if !(w.critical <= w.high && w.high <= w.medium && w.medium <= w.low) {
            return invalid(
                "priority weights must not increase with severity (critical <= high <= medium <= low)"
                    .to_string(),
            );
        }
        if !(self.complaint_multiplier.is_finite() && self.complaint_multiplier >= 1.0) {
            return invalid(format!(
                "complaint_multiplier {} must be >= 1",
                self.complaint_multiplier
            ));
        }
        if !(self.small_previous_threshold.is_finite() && self.small_previous_threshold >= 0.0) {
            return invalid("small_previous_threshold must be >= 0".to_string());
        }
        if !(self.small_previous_cap > 0.0 && self.trend_cap > 0.0) {
            return invalid("trend caps must be positive".to_string());
        }

        let a = &self.alerts;
        if !(a.critical_score <= a.warning_score && a.warning_score <= a.good_score) {
            return invalid(
                "alert scores must satisfy critical_score <= warning_score <= good_score"
                    .to_string(),
            );
        }
        if a.critical_count == 0 || a.high_count == 0 {
            return invalid("alert counts must be at least 1".to_string());
        }

        if self.escalation_action.trim().is_empty() {
            return invalid("escalation_action must be non-empty".to_string());
        }
        if self.support_actions.iter().any(|s| s.trim().is_empty()) {
            return invalid("support_actions must not contain empty entries".to_string());
        }

        let r = &self.response;
        let levels = [
            ("critical", &r.critical),
            ("warning", &r.warning),
            ("good", &r.good),
        ];
        for (level, policy) in levels {
            if policy.escalation_timeline.trim().is_empty() || policy.next_review.trim().is_empty()
            {
                return invalid(format!(
                    "response.{level} needs a non-empty escalation_timeline and next_review"
                ));
            }
            if policy.notify.iter().any(|s| s.trim().is_empty()) {
                return invalid(format!(
                    "response.{level}.notify must not contain empty entries"
                ));
            }
        }

        Ok(())
    }
}

/// Load and validate a scoring configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_scoring_config(path: &Path) -> Result<ScoringConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ScoringFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: ScoringConfig = serde_yaml::from_str(&content)?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
#[path = "scoring_test.rs"]
mod tests;
