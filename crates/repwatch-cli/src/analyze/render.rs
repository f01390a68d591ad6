//! Table, markdown and JSON output for reputation snapshots.

use repwatch_engine::{ReputationSnapshot, Trend, TrendDirection};

/// `up +12.5%`, `down -300.0% (capped)` or `flat`.
pub(crate) fn format_trend(trend: &Trend) -> String {
    match trend.direction {
        TrendDirection::Flat => "flat".to_string(),
        direction => format!(
            "{direction} {:+.1}%{}",
            trend.percent,
            if trend.capped_at_limit { " (capped)" } else { "" }
        ),
    }
}

pub(crate) fn render_table(snapshots: &[ReputationSnapshot]) -> String {
    let mut lines = vec![format!(
        "{:<20}{:<8}{:<11}{:<22}{:<10}MENTIONS",
        "PRODUCT", "SCORE", "SENTIMENT", "TREND", "ALERT"
    )];
    for snap in snapshots {
        lines.push(format!(
            "{:<20}{:<8.1}{:<11.2}{:<22}{:<10}{}",
            snap.product_id,
            snap.overall_score,
            snap.sentiment_score,
            format_trend(&snap.trend),
            snap.alert_level,
            snap.classified_count
        ));
    }

    for snap in snapshots {
        lines.push(String::new());
        lines.push(format!(
            "{} ({}): {}",
            snap.product_id, snap.interpretation.status, snap.interpretation.description
        ));
        lines.push(format!("  Health: {}", snap.health.summary));
        lines.push(format!(
            "  Escalation: {}; next review: {}",
            snap.response.escalation_timeline, snap.response.next_review
        ));
        if !snap.response.notify.is_empty() {
            lines.push(format!("  Notify: {}", snap.response.notify.join(", ")));
        }
        if snap.unprocessed_count > 0 {
            lines.push(format!(
                "  {} mentions awaiting classification",
                snap.unprocessed_count
            ));
        }
        for rec in &snap.recommendations {
            lines.push(format!("  [{}] {}", rec.team, rec.action));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub(crate) fn render_markdown(snapshots: &[ReputationSnapshot]) -> String {
    let mut lines = vec!["# Reputation Report".to_string(), String::new()];
    if let Some(first) = snapshots.first() {
        lines.push(format!(
            "**Generated**: {}",
            first.generated_at.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    lines.push(format!("**Products**: {}", snapshots.len()));

    for snap in snapshots {
        lines.extend([
            String::new(),
            "---".to_string(),
            String::new(),
            format!("## {}", snap.product_id),
            String::new(),
            "| Metric | Value |".to_string(),
            "|--------|-------|".to_string(),
            format!(
                "| Score | {:.1} ({}) |",
                snap.overall_score, snap.interpretation.status
            ),
            format!("| Sentiment | {:.2} |", snap.sentiment_score),
            format!("| Trend | {} |", format_trend(&snap.trend)),
            format!("| Alert | {} |", snap.alert_level),
            format!("| Health | {} |", snap.health.summary),
            format!(
                "| Mentions | {} classified, {} unprocessed |",
                snap.classified_count, snap.unprocessed_count
            ),
            format!(
                "| Complaint ratio | {:.1}% |",
                snap.breakdown.complaint_ratio * 100.0
            ),
        ]);

        if !snap.priority_issue_counts.is_empty() {
            lines.extend([
                String::new(),
                "### Top issues".to_string(),
                String::new(),
                "| Topic | Mentions | Priority |".to_string(),
                "|-------|----------|----------|".to_string(),
            ]);
            for issue in &snap.priority_issue_counts {
                lines.push(format!(
                    "| {} | {} | {} |",
                    issue.topic, issue.count, issue.priority
                ));
            }
        }

        lines.extend([
            String::new(),
            "### Response".to_string(),
            String::new(),
            format!("- **Escalation**: {}", snap.response.escalation_timeline),
            format!("- **Next review**: {}", snap.response.next_review),
        ]);
        if !snap.response.notify.is_empty() {
            lines.push(format!("- **Notify**: {}", snap.response.notify.join(", ")));
        }

        lines.extend([String::new(), "### Recommendations".to_string(), String::new()]);
        for rec in &snap.recommendations {
            lines.push(format!("- **{}**: {}", rec.team, rec.action));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// # Errors
///
/// Returns an error if serialization fails.
pub(crate) fn render_json(snapshots: &[ReputationSnapshot]) -> anyhow::Result<String> {
    let mut out = serde_json::to_string_pretty(snapshots)?;
    out.push('\n');
    Ok(out)
}
