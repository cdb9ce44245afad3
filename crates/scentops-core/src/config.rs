use crate::app_config::{AppConfig, RefreshFailurePolicy};
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
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
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

    let api_base_url = require("SCENTOPS_API_BASE_URL")?;
    let auth_base_url = or_default("SCENTOPS_AUTH_BASE_URL", &api_base_url);
    let request_timeout_secs = parse_u64("SCENTOPS_REQUEST_TIMEOUT_SECS", "30")?;
    let log_level = or_default("SCENTOPS_LOG_LEVEL", "info");
    let refresh_failure_policy =
        parse_refresh_policy(&or_default("SCENTOPS_REFRESH_FAILURE_POLICY", "keep-stale"));

    Ok(AppConfig {
        api_base_url,
        auth_base_url,
        request_timeout_secs,
        log_level,
        refresh_failure_policy,
    })
}

/// Parse a string into a `RefreshFailurePolicy`.
///
/// Unrecognized values default to `KeepStale`, matching the backend's
/// historical behavior.
fn parse_refresh_policy(s: &str) -> RefreshFailurePolicy {
    match s {
        "force-logout" => RefreshFailurePolicy::ForceLogout,
        _ => RefreshFailurePolicy::KeepStale,
    }
}
