use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional_path = |var: &str| -> Option<PathBuf> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    };

    let env = parse_environment(&or_default("REPWATCH_ENV", "development"))?;
    let log_level = or_default("REPWATCH_LOG_LEVEL", "info");
    let scoring_path = optional_path("REPWATCH_SCORING_PATH");
    let mentions_path = optional_path("REPWATCH_MENTIONS_PATH");

    let raw_window = or_default("REPWATCH_WINDOW_DAYS", "30");
    let window_days = raw_window
        .parse::<u32>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "REPWATCH_WINDOW_DAYS".to_string(),
            reason: e.to_string(),
        })?;
    if window_days == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "REPWATCH_WINDOW_DAYS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        scoring_path,
        mentions_path,
        window_days,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "REPWATCH_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
