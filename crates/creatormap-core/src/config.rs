use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so this only fails on unparsable or
/// out-of-range values.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        match or_default(var, default).to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(invalid(var, format!("expected a boolean, got '{other}'"))),
        }
    };

    let env = parse_environment(&or_default("CREATORMAP_ENV", "development"))?;
    let log_level = or_default("CREATORMAP_LOG_LEVEL", "info");

    let edge_threshold = or_default("CREATORMAP_EDGE_THRESHOLD", "0.1")
        .parse::<f64>()
        .map_err(|e| invalid("CREATORMAP_EDGE_THRESHOLD", e.to_string()))?;
    if !(0.0..=1.0).contains(&edge_threshold) {
        return Err(invalid(
            "CREATORMAP_EDGE_THRESHOLD",
            format!("{edge_threshold} is outside [0, 1]"),
        ));
    }

    let renormalize_similarity = parse_bool("CREATORMAP_RENORMALIZE_SIMILARITY", "false")?;
    let parallel_min_candidates = parse_usize("CREATORMAP_PARALLEL_MIN_CANDIDATES", "64")?;

    let metrics_deadline_ms = match lookup("CREATORMAP_METRICS_DEADLINE_MS") {
        Ok(raw) => Some(
            raw.parse::<u64>()
                .map_err(|e| invalid("CREATORMAP_METRICS_DEADLINE_MS", e.to_string()))?,
        ),
        Err(_) => None,
    };

    let top_n = parse_usize("CREATORMAP_TOP_N", "20")?;
    if top_n == 0 {
        return Err(invalid("CREATORMAP_TOP_N", "must be at least 1".to_string()));
    }

    Ok(AppConfig {
        env,
        log_level,
        edge_threshold,
        renormalize_similarity,
        parallel_min_candidates,
        metrics_deadline_ms,
        top_n,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CREATORMAP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
