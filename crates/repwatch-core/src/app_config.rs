use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-level settings for the repwatch binaries.
///
/// Scoring constants are not here; they live in
/// [`ScoringConfig`](crate::ScoringConfig), optionally loaded from
/// `scoring_path`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// YAML file overriding scoring defaults. `None` uses built-in defaults.
    pub scoring_path: Option<PathBuf>,
    /// Default mention export read when no `--input` is given.
    pub mentions_path: Option<PathBuf>,
    /// Length of one analysis period in days.
    pub window_days: u32,
}
