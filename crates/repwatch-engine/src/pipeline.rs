//! Reputation analysis orchestration.

use chrono::{DateTime, Utc};
use repwatch_core::{normalize_topic, CoreError, Mention, RawMention, ScoringConfig};

use crate::alert::classify_alert;
use crate::breakdown::{breakdown, daily_sentiment};
use crate::error::EngineError;
use crate::insights::{generate_insights, topic_trends};
use crate::response::{assess_health, response_policy};
use crate::scorer::{compute_score, interpret_score};
use crate::trend::compute_trend;
use crate::types::{AlertLevel, ReputationSnapshot, Trend};
use crate::window::AnalysisWindow;

/// Everything needed to analyze one product.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub product_id: String,
    pub mentions: Vec<Mention>,
    /// Stamped on the snapshot as-is; the engine never reads the clock.
    pub generated_at: DateTime<Utc>,
    /// When set, only mentions inside the window are scored and the previous
    /// period supplies the trend baseline.
    pub window: Option<AnalysisWindow>,
    /// Explicit prior score. Takes precedence over one derived from the window.
    pub previous_score: Option<f64>,
}

/// Validate raw mention-store records into typed mentions.
///
/// # Errors
///
/// Returns [`EngineError::InvalidMention`] for the first record with an
/// out-of-range confidence, an unrecognized enum value, or a partially
/// populated classification.
pub fn validate_mentions(raw: Vec<RawMention>) -> Result<Vec<Mention>, EngineError> {
    raw.into_iter()
        .map(|r| {
            let mention_id = r.id.clone();
            Mention::try_from(r).map_err(|source| EngineError::InvalidMention { mention_id, source })
        })
        .collect()
}

/// Re-check invariants on already-typed mentions. `Mention` fields are
/// public, so a caller can build one that never went through validation.
/// Topics must already be in [`normalize_topic`] form.
fn check_mentions(product_id: &str, mentions: &[Mention]) -> Result<(), EngineError> {
    for mention in mentions {
        if mention.product_id != product_id {
            return Err(EngineError::ProductMismatch {
                mention_id: mention.id.clone(),
                expected: product_id.to_string(),
                found: mention.product_id.clone(),
            });
        }
        if let Some(c) = &mention.classification {
            if !(0.0..=1.0).contains(&c.confidence) {
                return Err(EngineError::InvalidMention {
                    mention_id: mention.id.clone(),
                    source: CoreError::ConfidenceOutOfRange(c.confidence),
                });
            }
        }
        if let Some(topic) = mention
            .topics
            .iter()
            .find(|t| t.is_empty() || normalize_topic(t) != **t)
        {
            return Err(EngineError::InvalidMention {
                mention_id: mention.id.clone(),
                source: CoreError::InvalidTopic(topic.clone()),
            });
        }
    }
    Ok(())
}

/// Run the full scoring pipeline for one product.
///
/// 1. Check every mention belongs to the product and is well-formed.
/// 2. Split mentions into current and previous periods (if a window is set).
/// 3. Score the current period, and the previous one for the trend baseline.
/// 4. Compute trend and alert level.
/// 5. Rank topics, build recommendations and volume breakdowns.
///
/// With no classified mentions in the current period the snapshot is the
/// zero-state: baseline score, sentiment `0.0`, flat trend, `good` alert.
///
/// # Errors
///
/// Returns [`EngineError`] on invalid input. Empty input is not an error.
pub fn analyze(
    request: &AnalysisRequest,
    config: &ScoringConfig,
) -> Result<ReputationSnapshot, EngineError> {
    let product = request.product_id.as_str();
    check_mentions(product, &request.mentions)?;

    if let Some(prev) = request.previous_score {
        if !prev.is_finite() {
            return Err(EngineError::InvalidInput(format!(
                "previous score {prev} is not a finite number"
            )));
        }
    }

    let (current, previous) = match &request.window {
        Some(window) => {
            let split = window.split(&request.mentions);
            if split.outside > 0 {
                tracing::debug!(
                    product,
                    outside = split.outside,
                    "mentions outside the analysis window were ignored"
                );
            }
            (split.current, split.previous)
        }
        None => (request.mentions.iter().collect(), Vec::new()),
    };

    let score = compute_score(current.iter().copied(), config);

    if score.unprocessed_count > 0 {
        tracing::warn!(
            product,
            unprocessed = score.unprocessed_count,
            "unclassified mentions excluded from scoring"
        );
    }

    let previous_score = request.previous_score.or_else(|| {
        let prior = compute_score(previous.iter().copied(), config);
        (prior.classified_count > 0).then_some(prior.overall_score)
    });

    let (trend, alert_level) = if score.classified_count == 0 {
        tracing::info!(product, "no classified mentions; returning zero-state snapshot");
        (Trend::flat(), AlertLevel::Good)
    } else {
        (
            compute_trend(score.overall_score, previous_score, config),
            classify_alert(
                score.overall_score,
                score.critical_count,
                score.high_count,
                &config.alerts,
            ),
        )
    };

    let insights = generate_insights(current.iter().copied(), alert_level, config);

    tracing::info!(
        product,
        score = score.overall_score,
        sentiment = score.sentiment_score,
        classified = score.classified_count,
        trend = %trend.direction,
        trend_percent = trend.percent,
        alert = %alert_level,
        "reputation snapshot computed"
    );

    Ok(ReputationSnapshot {
        product_id: request.product_id.clone(),
        generated_at: request.generated_at,
        overall_score: score.overall_score,
        sentiment_score: score.sentiment_score,
        sentiment_distribution: score.sentiment_distribution,
        priority_issue_counts: insights.priority_issue_counts,
        previous_score,
        trend,
        alert_level,
        recommendations: insights.recommendations,
        interpretation: interpret_score(score.overall_score),
        health: assess_health(score.overall_score, alert_level),
        response: response_policy(alert_level, &config.response).clone(),
        breakdown: breakdown(current.iter().copied()),
        daily_sentiment: daily_sentiment(current.iter().copied()),
        topic_trends: topic_trends(&current, &previous, config),
        classified_count: score.classified_count,
        unprocessed_count: score.unprocessed_count,
    })
}

/// Analyze several products independently.
///
/// One product's invalid input does not affect the others; each result is
/// returned in request order.
#[must_use]
pub fn analyze_batch(
    requests: &[AnalysisRequest],
    config: &ScoringConfig,
) -> Vec<Result<ReputationSnapshot, EngineError>> {
    requests
        .iter()
        .map(|request| {
            let result = analyze(request, config);
            if let Err(e) = &result {
                tracing::error!(product = %request.product_id, error = %e, "analysis failed");
            }
            result
        })
        .collect()
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
