use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "REPWATCH_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.scoring_path.is_none());
    assert!(cfg.mentions_path.is_none());
    assert_eq!(cfg.window_days, 30);
}

#[test]
fn build_app_config_reads_paths() {
    let mut map = HashMap::new();
    map.insert("REPWATCH_SCORING_PATH", "./config/scoring.yaml");
    map.insert("REPWATCH_MENTIONS_PATH", "./data/mentions.json");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.scoring_path,
        Some(PathBuf::from("./config/scoring.yaml"))
    );
    assert_eq!(
        cfg.mentions_path,
        Some(PathBuf::from("./data/mentions.json"))
    );
}

#[test]
fn blank_scoring_path_is_treated_as_unset() {
    let mut map = HashMap::new();
    map.insert("REPWATCH_SCORING_PATH", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.scoring_path.is_none());
}

#[test]
fn window_days_override() {
    let mut map = HashMap::new();
    map.insert("REPWATCH_WINDOW_DAYS", "7");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.window_days, 7);
}

#[test]
fn window_days_invalid() {
    let mut map = HashMap::new();
    map.insert("REPWATCH_WINDOW_DAYS", "a week");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REPWATCH_WINDOW_DAYS"),
        "expected InvalidEnvVar(REPWATCH_WINDOW_DAYS), got: {result:?}"
    );
}

#[test]
fn window_days_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("REPWATCH_WINDOW_DAYS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref reason, .. }) if reason.contains("at least 1")),
        "expected InvalidEnvVar, got: {result:?}"
    );
}
