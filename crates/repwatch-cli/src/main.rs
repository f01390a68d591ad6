mod analyze;

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use repwatch_core::{AppConfig, ScoringConfig};
use tracing_subscriber::EnvFilter;

use crate::analyze::{AnalyzeOptions, OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "repwatch")]
#[command(about = "Brand mention reputation scoring")]
struct Cli {
    /// Scoring configuration YAML (overrides `REPWATCH_SCORING_PATH`)
    #[arg(long, global = true)]
    scoring: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Score a mention export and print one snapshot per product
    Analyze {
        /// Mention export (JSON); defaults to `REPWATCH_MENTIONS_PATH`
        #[arg(long)]
        input: Option<PathBuf>,

        /// Restrict analysis to a single product
        #[arg(long)]
        product: Option<String>,

        /// Prior score to measure the trend against
        #[arg(long, requires = "product", allow_negative_numbers = true)]
        previous_score: Option<f64>,

        /// Split mentions into current and previous periods of this many days
        #[arg(long)]
        window_days: Option<u32>,

        /// End of the analysis window (RFC 3339); defaults to now
        #[arg(long)]
        as_of: Option<DateTime<Utc>>,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Percent change between two scores
    Trend {
        #[arg(allow_negative_numbers = true)]
        current: f64,
        #[arg(allow_negative_numbers = true)]
        previous: f64,
    },
    /// Print the effective scoring configuration as YAML
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = repwatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let scoring = load_scoring(cli.scoring.as_deref(), &config)?;

    match cli.command {
        Some(Commands::Analyze {
            input,
            product,
            previous_score,
            window_days,
            as_of,
            format,
        }) => {
            let input = input
                .or_else(|| config.mentions_path.clone())
                .ok_or_else(|| {
                    anyhow::anyhow!("no mention file given; pass --input or set REPWATCH_MENTIONS_PATH")
                })?;
            let now = Utc::now();
            let window = analyze::resolve_window(window_days, as_of, config.window_days, now)?;
            let options = AnalyzeOptions {
                input,
                product,
                previous_score,
                window,
                format,
                generated_at: now,
            };
            analyze::run_analyze(&options, &scoring).await?;
        }
        Some(Commands::Trend { current, previous }) => {
            if !(current.is_finite() && previous.is_finite()) {
                anyhow::bail!("scores must be finite numbers");
            }
            let trend = repwatch_engine::compute_trend(current, Some(previous), &scoring);
            println!("{}", analyze::format_trend(&trend));
        }
        Some(Commands::Config) => print!("{}", serde_yaml::to_string(&scoring)?),
        None => println!("repwatch: run `repwatch --help` for usage"),
    }

    Ok(())
}

/// Resolve the scoring configuration: `--scoring` first, then
/// `REPWATCH_SCORING_PATH`, then built-in defaults.
fn load_scoring(override_path: Option<&Path>, config: &AppConfig) -> anyhow::Result<ScoringConfig> {
    let Some(path) = override_path.or(config.scoring_path.as_deref()) else {
        return Ok(ScoringConfig::default());
    };

    let scoring = repwatch_core::load_scoring_config(path)
        .with_context(|| format!("loading scoring config from {}", path.display()))?;
    tracing::debug!(path = %path.display(), "scoring config loaded");
    Ok(scoring)
}
