//! Volume breakdowns by platform, priority, intent and day.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use repwatch_core::{Intent, Mention, Platform, Priority, Sentiment};

use crate::types::{Breakdown, DailySentiment, IntentCount, PlatformShare, PriorityCount};
use crate::percentage;

const INTENTS: [Intent; 4] = [
    Intent::Complaint,
    Intent::Question,
    Intent::Recommendation,
    Intent::Neutral,
];

/// Count mentions per platform, priority and intent.
///
/// Platform shares include unclassified mentions; priority and intent counts
/// only cover classified ones. The dominant intent is the most frequent one,
/// ties going to the first in complaint, question, recommendation, neutral
/// order.
#[must_use]
pub fn breakdown<'a, I>(mentions: I) -> Breakdown
where
    I: IntoIterator<Item = &'a Mention>,
{
    let mut platforms: BTreeMap<Platform, usize> = BTreeMap::new();
    let mut priorities: BTreeMap<Priority, usize> = BTreeMap::new();
    let mut intents: BTreeMap<Intent, usize> = BTreeMap::new();
    let mut total = 0_usize;
    let mut classified = 0_usize;

    for mention in mentions {
        total += 1;
        *platforms.entry(mention.platform).or_default() += 1;

        if let Some(c) = &mention.classification {
            classified += 1;
            *priorities.entry(c.priority).or_default() += 1;
            *intents.entry(c.intent).or_default() += 1;
        }
    }

    let mut platform_shares: Vec<PlatformShare> = platforms
        .into_iter()
        .map(|(platform, count)| PlatformShare {
            platform,
            count,
            percentage: percentage(count, total),
        })
        .collect();
    // Stable sort keeps the BTreeMap's platform order among equal counts.
    platform_shares.sort_by(|a, b| b.count.cmp(&a.count));

    let priority_counts: Vec<PriorityCount> = Priority::ALL
        .iter()
        .map(|&priority| PriorityCount {
            priority,
            count: priorities.get(&priority).copied().unwrap_or(0),
        })
        .collect();

    let intent_counts: Vec<IntentCount> = INTENTS
        .iter()
        .map(|&intent| IntentCount {
            intent,
            count: intents.get(&intent).copied().unwrap_or(0),
        })
        .collect();

    let complaints = intents.get(&Intent::Complaint).copied().unwrap_or(0);
    let complaint_ratio = if classified == 0 {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let ratio = complaints as f64 / classified as f64;
        (ratio * 1000.0).round() / 1000.0
    };

    let high_priority_count = priorities.get(&Priority::Critical).copied().unwrap_or(0)
        + priorities.get(&Priority::High).copied().unwrap_or(0);

    // Reversed so that `max_by_key` keeps the earliest intent on a tie.
    let dominant_intent = intent_counts
        .iter()
        .rev()
        .filter(|c| c.count > 0)
        .max_by_key(|c| c.count)
        .map(|c| c.intent);

    Breakdown {
        platforms: platform_shares,
        priorities: priority_counts,
        intents: intent_counts,
        dominant_intent,
        complaint_ratio,
        high_priority_count,
    }
}

/// Per-day sentiment counts over classified mentions, oldest day first.
///
/// Days are UTC calendar days. Only days with at least one classified mention
/// appear.
#[must_use]
pub fn daily_sentiment<'a, I>(mentions: I) -> Vec<DailySentiment>
where
    I: IntoIterator<Item = &'a Mention>,
{
    let mut days: BTreeMap<NaiveDate, (usize, usize, usize)> = BTreeMap::new();

    for mention in mentions {
        let Some(c) = &mention.classification else {
            continue;
        };
        let entry = days.entry(mention.timestamp.date_naive()).or_default();
        match c.sentiment {
            Sentiment::Positive => entry.0 += 1,
            Sentiment::Negative => entry.1 += 1,
            Sentiment::Neutral => entry.2 += 1,
        }
    }

    days.into_iter()
        .map(|(date, (positive, negative, neutral))| DailySentiment {
            date,
            positive,
            negative,
            neutral,
            total: positive + negative + neutral,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::{DateTime, TimeZone, Utc};
    use repwatch_core::Classification;

    use super::*;

    fn mention(
        platform: Platform,
        classified: Option<(Sentiment, Intent, Priority)>,
        at: DateTime<Utc>,
    ) -> Mention {
        Mention {
            id: "m".to_string(),
            product_id: "acme".to_string(),
            platform,
            classification: classified.map(|(sentiment, intent, priority)| Classification {
                sentiment,
                intent,
                priority,
                confidence: 1.0,
            }),
            topics: BTreeSet::new(),
            timestamp: at,
        }
    }

    fn day(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, d, h, 0, 0).unwrap()
    }

    #[test]
    fn platform_shares_include_unclassified() {
        let m = [
            mention(Platform::Reddit, None, day(1, 0)),
            mention(
                Platform::Reddit,
                Some((Sentiment::Negative, Intent::Complaint, Priority::High)),
                day(1, 0),
            ),
            mention(
                Platform::AppStore,
                Some((Sentiment::Positive, Intent::Recommendation, Priority::Low)),
                day(1, 0),
            ),
            mention(Platform::Trustpilot, None, day(1, 0)),
        ];
        let b = breakdown(&m);
        assert_eq!(b.platforms[0].platform, Platform::Reddit);
        assert_eq!(b.platforms[0].count, 2);
        assert_eq!(b.platforms[0].percentage, 50.0);
        // Ties keep platform order: app_store before trustpilot.
        assert_eq!(b.platforms[1].platform, Platform::AppStore);
        assert_eq!(b.platforms[2].platform, Platform::Trustpilot);
        assert_eq!(b.complaint_ratio, 0.5);
        assert_eq!(b.high_priority_count, 1);
    }

    #[test]
    fn priorities_cover_all_levels_in_severity_order() {
        let m = [mention(
            Platform::Search,
            Some((Sentiment::Neutral, Intent::Question, Priority::Medium)),
            day(1, 0),
        )];
        let b = breakdown(&m);
        let levels: Vec<Priority> = b.priorities.iter().map(|p| p.priority).collect();
        assert_eq!(levels, Priority::ALL.to_vec());
        assert_eq!(b.priorities[2].count, 1);
        assert_eq!(b.intents[1].intent, Intent::Question);
        assert_eq!(b.intents[1].count, 1);
    }

    #[test]
    fn dominant_intent_is_most_frequent() {
        let m = [
            mention(
                Platform::Reddit,
                Some((Sentiment::Neutral, Intent::Question, Priority::Low)),
                day(1, 0),
            ),
            mention(
                Platform::Reddit,
                Some((Sentiment::Neutral, Intent::Question, Priority::Low)),
                day(1, 0),
            ),
            mention(
                Platform::Reddit,
                Some((Sentiment::Negative, Intent::Complaint, Priority::High)),
                day(1, 0),
            ),
            mention(Platform::Reddit, None, day(1, 0)),
        ];
        assert_eq!(breakdown(&m).dominant_intent, Some(Intent::Question));
    }

    #[test]
    fn dominant_intent_tie_prefers_complaint() {
        let m = [
            mention(
                Platform::Reddit,
                Some((Sentiment::Positive, Intent::Recommendation, Priority::Low)),
                day(1, 0),
            ),
            mention(
                Platform::Reddit,
                Some((Sentiment::Negative, Intent::Complaint, Priority::High)),
                day(1, 0),
            ),
        ];
        assert_eq!(breakdown(&m).dominant_intent, Some(Intent::Complaint));
    }

    #[test]
    fn empty_breakdown_has_zero_ratio() {
        let none: Vec<Mention> = Vec::new();
        let b = breakdown(&none);
        assert!(b.platforms.is_empty());
        assert_eq!(b.dominant_intent, None);
        assert_eq!(b.complaint_ratio, 0.0);
        assert_eq!(b.high_priority_count, 0);
    }

    #[test]
    fn daily_sentiment_groups_by_utc_day() {
        let m = [
            mention(
                Platform::Reddit,
                Some((Sentiment::Negative, Intent::Complaint, Priority::High)),
                day(2, 23),
            ),
            mention(
                Platform::Reddit,
                Some((Sentiment::Positive, Intent::Neutral, Priority::Low)),
                day(1, 1),
            ),
            mention(
                Platform::Reddit,
                Some((Sentiment::Neutral, Intent::Neutral, Priority::Low)),
                day(2, 5),
            ),
            mention(Platform::Reddit, None, day(3, 5)),
        ];
        let days = daily_sentiment(&m);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(days[0].positive, 1);
        assert_eq!(days[1].negative, 1);
        assert_eq!(days[1].neutral, 1);
        assert_eq!(days[1].total, 2);
    }
}
