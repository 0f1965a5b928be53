use std::collections::HashMap;
use std::env::VarError;

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
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "CREATORMAP_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert!((cfg.edge_threshold - 0.1).abs() < f64::EPSILON);
    assert!(!cfg.renormalize_similarity);
    assert_eq!(cfg.parallel_min_candidates, 64);
    assert!(cfg.metrics_deadline_ms.is_none());
    assert_eq!(cfg.top_n, 20);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("CREATORMAP_ENV", "test");
    map.insert("CREATORMAP_LOG_LEVEL", "debug");
    map.insert("CREATORMAP_EDGE_THRESHOLD", "0.25");
    map.insert("CREATORMAP_RENORMALIZE_SIMILARITY", "true");
    map.insert("CREATORMAP_PARALLEL_MIN_CANDIDATES", "8");
    map.insert("CREATORMAP_METRICS_DEADLINE_MS", "1500");
    map.insert("CREATORMAP_TOP_N", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Test);
    assert_eq!(cfg.log_level, "debug");
    assert!((cfg.edge_threshold - 0.25).abs() < f64::EPSILON);
    assert!(cfg.renormalize_similarity);
    assert_eq!(cfg.parallel_min_candidates, 8);
    assert_eq!(cfg.metrics_deadline_ms, Some(1500));
    assert_eq!(cfg.top_n, 5);
}

#[test]
fn build_app_config_rejects_threshold_out_of_range() {
    let mut map = HashMap::new();
    map.insert("CREATORMAP_EDGE_THRESHOLD", "1.5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CREATORMAP_EDGE_THRESHOLD"),
        "expected InvalidEnvVar(CREATORMAP_EDGE_THRESHOLD), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_numeric_threshold() {
    let mut map = HashMap::new();
    map.insert("CREATORMAP_EDGE_THRESHOLD", "high");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CREATORMAP_EDGE_THRESHOLD"),
        "expected InvalidEnvVar(CREATORMAP_EDGE_THRESHOLD), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_bad_boolean() {
    let mut map = HashMap::new();
    map.insert("CREATORMAP_RENORMALIZE_SIMILARITY", "maybe");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CREATORMAP_RENORMALIZE_SIMILARITY"),
        "expected InvalidEnvVar(CREATORMAP_RENORMALIZE_SIMILARITY), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_invalid_deadline() {
    let mut map = HashMap::new();
    map.insert("CREATORMAP_METRICS_DEADLINE_MS", "-3");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CREATORMAP_METRICS_DEADLINE_MS"),
        "expected InvalidEnvVar(CREATORMAP_METRICS_DEADLINE_MS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_top_n() {
    let mut map = HashMap::new();
    map.insert("CREATORMAP_TOP_N", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CREATORMAP_TOP_N"),
        "expected InvalidEnvVar(CREATORMAP_TOP_N), got: {result:?}"
    );
}
