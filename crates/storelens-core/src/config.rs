use crate::app_config::AppConfig;
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
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_secs = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        let secs = raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if secs == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(secs)
    };

    let api_base_url = or_default("STORELENS_API_BASE_URL", "http://localhost:8000");
    if api_base_url.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "STORELENS_API_BASE_URL".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let api_token = lookup("STORELENS_API_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty());
    let request_timeout_secs = parse_secs("STORELENS_REQUEST_TIMEOUT_SECS", "120")?;
    let connect_timeout_secs = parse_secs("STORELENS_CONNECT_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("STORELENS_USER_AGENT", "storelens/0.1 (store-insights)");
    let log_level = or_default("STORELENS_LOG_LEVEL", "info");

    Ok(AppConfig {
        api_base_url,
        api_token,
        request_timeout_secs,
        connect_timeout_secs,
        user_agent,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
