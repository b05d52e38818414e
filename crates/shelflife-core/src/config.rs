use crate::app_config::{EngineConfig, Environment};
use crate::ConfigError;

/// Load engine configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_engine_config() -> Result<EngineConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_engine_config_from_env()
}

/// Load engine configuration from environment variables already in the process.
///
/// Unlike [`load_engine_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_engine_config_from_env() -> Result<EngineConfig, ConfigError> {
    build_engine_config(|key| std::env::var(key))
}

/// Build engine configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can pass a `HashMap` lookup.
fn build_engine_config<F>(lookup: F) -> Result<EngineConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        match or_default(var, default).trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(invalid(var, format!("expected a boolean, got '{other}'"))),
        }
    };

    let env = parse_environment(&or_default("SHELFLIFE_ENV", "development"))?;
    let log_level = or_default("SHELFLIFE_LOG_LEVEL", "info");
    let tables_path = lookup("SHELFLIFE_TABLES_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let product_lookup_enabled = parse_bool("SHELFLIFE_PRODUCT_LOOKUP_ENABLED", "true")?;
    let off_base_url = or_default("SHELFLIFE_OFF_BASE_URL", "https://world.openfoodfacts.org");
    let off_user_agent = or_default(
        "SHELFLIFE_OFF_USER_AGENT",
        "shelflife/0.1 (expiry-estimation)",
    );
    let lookup_timeout_secs = parse_u64("SHELFLIFE_LOOKUP_TIMEOUT_SECS", "4")?;
    if lookup_timeout_secs == 0 {
        return Err(invalid(
            "SHELFLIFE_LOOKUP_TIMEOUT_SECS",
            "timeout must be at least 1 second".to_string(),
        ));
    }
    let search_page_size = parse_u32("SHELFLIFE_SEARCH_PAGE_SIZE", "5")?;

    let review_threshold = or_default("SHELFLIFE_REVIEW_THRESHOLD", "0.5")
        .parse::<f64>()
        .map_err(|e| invalid("SHELFLIFE_REVIEW_THRESHOLD", e.to_string()))?;
    if !(0.0..=1.0).contains(&review_threshold) {
        return Err(invalid(
            "SHELFLIFE_REVIEW_THRESHOLD",
            format!("{review_threshold} is outside [0, 1]"),
        ));
    }

    Ok(EngineConfig {
        env,
        log_level,
        tables_path,
        product_lookup_enabled,
        off_base_url,
        off_user_agent,
        lookup_timeout_secs,
        search_page_size,
        review_threshold,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHELFLIFE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
