//! Reputation score calculation from classified mentions.

use repwatch_core::{Classification, Intent, Mention, Priority, ScoringConfig, Sentiment};

use crate::percentage;
use crate::types::{ScoreBand, ScoreInterpretation, ScoreOutcome, SentimentDistribution};

/// Signed contribution of one classified mention to the score.
///
/// The priority weight is scaled by confidence. Complaints amplify a negative
/// pull by the configured multiplier; positive contributions are never
/// amplified.
#[must_use]
pub(crate) fn contribution(c: &Classification, config: &ScoringConfig) -> f64 {
    let weighted = config.weights.weight(c.priority) * c.confidence;
    if c.intent == Intent::Complaint && weighted < 0.0 {
        weighted * config.complaint_multiplier
    } else {
        weighted
    }
}

/// Score a set of mentions for one product and period.
///
/// Starts from `config.baseline`, adds every classified mention's
/// [`contribution`], and clamps to `[0.0, 100.0]`. Contributions are summed in
/// ascending order so the result does not depend on the order mentions arrive
/// in. Unclassified mentions are counted in `unprocessed_count` and otherwise
/// ignored.
///
/// With no classified mentions the score is the baseline, the sentiment score
/// is `0.0` and every distribution bucket is `0.0`.
#[must_use]
pub fn compute_score<'a, I>(mentions: I, config: &ScoringConfig) -> ScoreOutcome
where
    I: IntoIterator<Item = &'a Mention>,
{
    let mut contributions: Vec<f64> = Vec::new();
    let mut classified = 0_usize;
    let mut unprocessed = 0_usize;
    let (mut positive, mut negative, mut neutral) = (0_usize, 0_usize, 0_usize);
    let (mut critical_count, mut high_count) = (0_usize, 0_usize);

    for mention in mentions {
        let Some(c) = &mention.classification else {
            unprocessed += 1;
            continue;
        };

        classified += 1;
        contributions.push(contribution(c, config));

        match c.sentiment {
            Sentiment::Positive => positive += 1,
            Sentiment::Negative => negative += 1,
            Sentiment::Neutral => neutral += 1,
        }
        match c.priority {
            Priority::Critical => critical_count += 1,
            Priority::High => high_count += 1,
            Priority::Medium | Priority::Low => {}
        }
    }

    contributions.sort_by(f64::total_cmp);
    let sum: f64 = contributions.iter().sum();
    let overall_score = (config.baseline + sum).clamp(0.0, 100.0);

    let sentiment_score = if classified == 0 {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let raw = (positive as f64 - negative as f64) / classified as f64;
        raw.clamp(-1.0, 1.0)
    };

    ScoreOutcome {
        overall_score,
        sentiment_score,
        sentiment_distribution: SentimentDistribution {
            positive: percentage(positive, classified),
            negative: percentage(negative, classified),
            neutral: percentage(neutral, classified),
        },
        classified_count: classified,
        unprocessed_count: unprocessed,
        critical_count,
        high_count,
    }
}

/// Describe what a score means for the people reading the report.
#[must_use]
pub fn interpret_score(score: f64) -> ScoreInterpretation {
    let (status, description, action) = if score >= 80.0 {
        (
            ScoreBand::Excellent,
            "Strong positive reputation",
            "Maintain current practices",
        )
    } else if score >= 60.0 {
        (
            ScoreBand::Good,
            "Generally positive with improvement opportunities",
            "Address moderate issues",
        )
    } else if score >= 40.0 {
        (
            ScoreBand::Concerning,
            "Mixed reputation with notable issues",
            "Immediate improvement plan needed",
        )
    } else {
        (
            ScoreBand::Critical,
            "Significant reputation damage",
            "Urgent intervention required",
        )
    };

    ScoreInterpretation {
        status,
        description: description.to_string(),
        action: action.to_string(),
    }
}
