use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_API_BASE_URL: &str =
    "https://rest.arbeitsagentur.de/infosysbub/absuche/pc/v1/ausbildungsangebot";
pub const DEFAULT_API_KEY: &str = "infosysbub-absuche";
pub const DEFAULT_USER_AGENT: &str = "Ausbildungssuche/1.0 (de.arbeitsagentur.ausbildungssuche)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
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
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; the defaults reproduce the public search
/// client's behaviour.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
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

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            other => Err(invalid(var, format!("\"{other}\" is not a boolean"))),
        }
    };

    let log_level = or_default("OFFERSCAN_LOG_LEVEL", "info");
    let api_base_url = or_default("OFFERSCAN_API_BASE_URL", DEFAULT_API_BASE_URL);
    let api_key = or_default("OFFERSCAN_API_KEY", DEFAULT_API_KEY);
    let user_agent = or_default("OFFERSCAN_USER_AGENT", DEFAULT_USER_AGENT);

    let request_timeout_secs = parse_u64("OFFERSCAN_REQUEST_TIMEOUT_SECS", "30")?;

    let max_concurrent_pages = parse_usize("OFFERSCAN_MAX_CONCURRENT_PAGES", "6")?;
    if max_concurrent_pages == 0 {
        return Err(invalid(
            "OFFERSCAN_MAX_CONCURRENT_PAGES",
            "must be at least 1".to_string(),
        ));
    }

    let fetch_deadline_secs = match parse_u64("OFFERSCAN_FETCH_DEADLINE_SECS", "300")? {
        0 => None,
        secs => Some(secs),
    };
    let run_pause_ms = parse_u64("OFFERSCAN_RUN_PAUSE_MS", "2000")?;
    let export_dir = PathBuf::from(or_default("OFFERSCAN_EXPORT_DIR", "."));
    let accept_invalid_certs = parse_bool("OFFERSCAN_ACCEPT_INVALID_CERTS", "false")?;

    Ok(AppConfig {
        log_level,
        api_base_url,
        api_key,
        user_agent,
        request_timeout_secs,
        max_concurrent_pages,
        fetch_deadline_secs,
        run_pause_ms,
        export_dir,
        accept_invalid_certs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
