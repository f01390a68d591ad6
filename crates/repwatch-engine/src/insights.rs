//! Topic ranking and rule-based recommendations.

use std::collections::BTreeMap;

use repwatch_core::{Mention, Priority, ScoringConfig};

use crate::trend::compute_trend;
use crate::types::{AlertLevel, Insights, PriorityIssue, Recommendation, Team, TopicTrend};

/// Rank topics across classified mentions.
///
/// Each topic is counted once per mention and keeps the most severe priority
/// seen among its mentions. Ordering is count descending, then severity
/// descending, then topic name ascending, so equal inputs always produce the
/// same sequence.
#[must_use]
pub fn rank_topics<'a, I>(mentions: I) -> Vec<PriorityIssue>
where
    I: IntoIterator<Item = &'a Mention>,
{
    let mut by_topic: BTreeMap<&'a str, (usize, Priority)> = BTreeMap::new();

    for mention in mentions {
        let Some(c) = &mention.classification else {
            continue;
        };
        for topic in &mention.topics {
            by_topic
                .entry(topic.as_str())
                .and_modify(|(count, worst)| {
                    *count += 1;
                    *worst = (*worst).max(c.priority);
                })
                .or_insert((1, c.priority));
        }
    }

    let mut issues: Vec<PriorityIssue> = by_topic
        .into_iter()
        .map(|(topic, (count, priority))| PriorityIssue {
            topic: topic.to_string(),
            count,
            priority,
        })
        .collect();

    issues.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| b.priority.cmp(&a.priority))
            .then_with(|| a.topic.cmp(&b.topic))
    });
    issues
}

fn product_action(topic: &str, count: usize) -> String {
    let times = if count == 1 { "time" } else { "times" };
    format!("Address {topic}, mentioned {count} {times}")
}

/// Rank topics and derive team-tagged actions from them.
///
/// A critical alert puts the PR escalation first. Each of the top
/// `config.top_topics` topics becomes one Product action, and the configured
/// Support actions always close the list.
#[must_use]
pub fn generate_insights<'a, I>(
    mentions: I,
    alert_level: AlertLevel,
    config: &ScoringConfig,
) -> Insights
where
    I: IntoIterator<Item = &'a Mention>,
{
    let priority_issue_counts = rank_topics(mentions);

    let mut recommendations = Vec::new();

    if alert_level == AlertLevel::Critical {
        recommendations.push(Recommendation {
            team: Team::Pr,
            action: config.escalation_action.clone(),
        });
    }

    recommendations.extend(priority_issue_counts.iter().take(config.top_topics).map(
        |issue| Recommendation {
            team: Team::Product,
            action: product_action(&issue.topic, issue.count),
        },
    ));

    recommendations.extend(config.support_actions.iter().map(|action| Recommendation {
        team: Team::Support,
        action: action.clone(),
    }));

    Insights {
        priority_issue_counts,
        recommendations,
    }
}

/// Compare each current-period topic's volume against the previous period.
///
/// Topics absent from the previous period get a flat trend. Output follows
/// the same order as [`rank_topics`] on the current period.
#[must_use]
pub fn topic_trends(
    current: &[&Mention],
    previous: &[&Mention],
    config: &ScoringConfig,
) -> Vec<TopicTrend> {
    let previous_counts: BTreeMap<String, usize> = rank_topics(previous.iter().copied())
        .into_iter()
        .map(|issue| (issue.topic, issue.count))
        .collect();

    rank_topics(current.iter().copied())
        .into_iter()
        .map(|issue| {
            let previous_count = previous_counts.get(&issue.topic).copied().unwrap_or(0);
            #[allow(clippy::cast_precision_loss)]
            let trend = compute_trend(
                issue.count as f64,
                Some(previous_count as f64),
                config,
            );
            TopicTrend {
                topic: issue.topic,
                current_count: issue.count,
                previous_count,
                trend,
            }
        })
        .collect()
}
