//! `analyze` command: read a mention export, score each product, print the snapshots.

mod render;

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use repwatch_core::{Mention, RawMention, ScoringConfig};
use repwatch_engine::{AnalysisRequest, AnalysisWindow, ReputationSnapshot};
use serde::Deserialize;

pub(crate) use render::format_trend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Markdown,
    Json,
}

#[derive(Debug)]
pub(crate) struct AnalyzeOptions {
    pub input: PathBuf,
    pub product: Option<String>,
    pub previous_score: Option<f64>,
    pub window: Option<AnalysisWindow>,
    pub format: OutputFormat,
    pub generated_at: DateTime<Utc>,
}

/// Accepted shapes of a mention export.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MentionFile {
    List(Vec<RawMention>),
    Wrapped { mentions: Vec<RawMention> },
}

pub(crate) fn parse_mentions(content: &str) -> anyhow::Result<Vec<RawMention>> {
    let file: MentionFile = serde_json::from_str(content).context(
        "mention file must be a JSON array of mentions or an object with a `mentions` array",
    )?;
    Ok(match file {
        MentionFile::List(mentions) | MentionFile::Wrapped { mentions } => mentions,
    })
}

/// A window is only used when the caller asks for one, either by giving its
/// length or its end. The missing half comes from config or the clock.
///
/// # Errors
///
/// Returns an error if the resolved window is empty or out of range.
pub(crate) fn resolve_window(
    window_days: Option<u32>,
    as_of: Option<DateTime<Utc>>,
    default_days: u32,
    now: DateTime<Utc>,
) -> anyhow::Result<Option<AnalysisWindow>> {
    if window_days.is_none() && as_of.is_none() {
        return Ok(None);
    }
    let days = window_days.unwrap_or(default_days);
    let end = as_of.unwrap_or(now);
    Ok(Some(AnalysisWindow::new(end, days)?))
}

/// Group mentions into one request per product, in product-id order.
///
/// With a product filter, mentions for other products are dropped and the
/// filtered product always gets a request, even if it has no mentions.
pub(crate) fn build_requests(mentions: Vec<Mention>, opts: &AnalyzeOptions) -> Vec<AnalysisRequest> {
    let mut by_product: BTreeMap<String, Vec<Mention>> = BTreeMap::new();
    if let Some(product) = &opts.product {
        by_product.insert(product.clone(), Vec::new());
    }

    for mention in mentions {
        if opts
            .product
            .as_deref()
            .is_some_and(|p| p != mention.product_id)
        {
            continue;
        }
        by_product
            .entry(mention.product_id.clone())
            .or_default()
            .push(mention);
    }

    by_product
        .into_iter()
        .map(|(product_id, mentions)| AnalysisRequest {
            product_id,
            mentions,
            generated_at: opts.generated_at,
            window: opts.window,
            previous_score: opts.previous_score,
        })
        .collect()
}

/// Run the `analyze` command end to end.
///
/// Products that fail analysis are logged and skipped; the command only
/// fails when every product fails.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, any mention is
/// invalid, or no product could be analyzed.
pub(crate) async fn run_analyze(
    opts: &AnalyzeOptions,
    config: &ScoringConfig,
) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(&opts.input)
        .await
        .with_context(|| format!("failed to read mention file {}", opts.input.display()))?;
    let raw = parse_mentions(&content)?;
    let mentions = repwatch_engine::validate_mentions(raw)?;
    tracing::info!(
        path = %opts.input.display(),
        mentions = mentions.len(),
        "mention file loaded"
    );

    let requests = build_requests(mentions, opts);
    if requests.is_empty() {
        println!(
            "no mentions found in {}; nothing to analyze",
            opts.input.display()
        );
        return Ok(());
    }

    let results = repwatch_engine::analyze_batch(&requests, config);
    let total = results.len();
    let snapshots: Vec<ReputationSnapshot> = results.into_iter().filter_map(Result::ok).collect();
    let failed = total - snapshots.len();

    if failed > 0 {
        tracing::warn!(failed, total, "some products failed analysis");
    }
    if snapshots.is_empty() {
        anyhow::bail!("all {failed} products failed analysis");
    }

    let output = match opts.format {
        OutputFormat::Table => render::render_table(&snapshots),
        OutputFormat::Markdown => render::render_markdown(&snapshots),
        OutputFormat::Json => render::render_json(&snapshots)?,
    };
    print!("{output}");
    Ok(())
}

#[cfg(test)]
#[path = "analyze_test.rs"]
mod tests;
