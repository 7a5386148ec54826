use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(ConfigError::MissingEnvVar(var.to_string())),
        }
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_base_url = require("DRYCLEAN_API_BASE_URL")?;
    if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "DRYCLEAN_API_BASE_URL".to_string(),
            reason: format!("'{api_base_url}' must start with http:// or https://"),
        });
    }

    let env = parse_environment(&or_default("DRYCLEAN_ENV", "development"))?;
    let log_level = or_default("DRYCLEAN_LOG_LEVEL", "info");
    let maps_api_key = lookup("DRYCLEAN_MAPS_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());
    let maps_base_url = or_default("DRYCLEAN_MAPS_BASE_URL", "https://maps.googleapis.com/");

    let request_timeout_secs = parse_u64("DRYCLEAN_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "DRYCLEAN_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let user_agent = or_default("DRYCLEAN_USER_AGENT", "dryclean/0.1 (customer-client)");
    let session_path = PathBuf::from(or_default(
        "DRYCLEAN_SESSION_PATH",
        "./.dryclean/session.json",
    ));
    let states_path = PathBuf::from(or_default("DRYCLEAN_STATES_PATH", "./config/states.yaml"));

    Ok(AppConfig {
        api_base_url,
        env,
        log_level,
        maps_api_key,
        maps_base_url,
        request_timeout_secs,
        user_agent,
        session_path,
        states_path,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "DRYCLEAN_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
