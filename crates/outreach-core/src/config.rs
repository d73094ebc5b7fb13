use crate::app_config::{AppConfig, Environment, StoreConfig};
use crate::ConfigError;

/// Hard per-request record limit of the record store.
pub const STORE_MAX_CHUNK_SIZE: usize = 10;

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
/// Decoupled from the real environment so it can be tested with a pure
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let enrich_api_key = require("OUTREACH_ENRICH_API_KEY")?;
    let llm_api_key = require("OUTREACH_LLM_API_KEY")?;

    let env = parse_environment(&or_default("OUTREACH_ENV", "development"))?;
    let log_level = or_default("OUTREACH_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("OUTREACH_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("OUTREACH_USER_AGENT", "outreach/0.1 (prospect-enrichment)");

    let enrich_base_url = or_default(
        "OUTREACH_ENRICH_BASE_URL",
        "https://nubela.co/proxycurl/api/v2/linkedin",
    );
    let llm_base_url = or_default("OUTREACH_LLM_BASE_URL", "https://api.openai.com/v1");
    let llm_model = or_default("OUTREACH_LLM_MODEL", "gpt-4o-mini");

    let store = match lookup("OUTREACH_STORE_API_KEY") {
        Ok(api_key) if !api_key.trim().is_empty() => Some(StoreConfig {
            api_key,
            base_id: require("OUTREACH_STORE_BASE_ID")?,
            base_url: or_default("OUTREACH_STORE_BASE_URL", "https://api.airtable.com/v0"),
            table: or_default("OUTREACH_STORE_TABLE", "Prospects"),
        }),
        _ => None,
    };

    let inter_item_delay_ms = parse_u64("OUTREACH_INTER_ITEM_DELAY_MS", "3000")?;
    let chunk_size = parse_usize("OUTREACH_CHUNK_SIZE", "10")?;
    if chunk_size == 0 || chunk_size > STORE_MAX_CHUNK_SIZE {
        return Err(ConfigError::InvalidEnvVar {
            var: "OUTREACH_CHUNK_SIZE".to_string(),
            reason: format!("must be between 1 and {STORE_MAX_CHUNK_SIZE}, got {chunk_size}"),
        });
    }
    let inter_chunk_delay_ms = parse_u64("OUTREACH_INTER_CHUNK_DELAY_MS", "200")?;

    Ok(AppConfig {
        env,
        log_level,
        request_timeout_secs,
        user_agent,
        enrich_api_key,
        enrich_base_url,
        llm_api_key,
        llm_base_url,
        llm_model,
        store,
        inter_item_delay_ms,
        chunk_size,
        inter_chunk_delay_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "OUTREACH_ENV".to_string(),
            reason: format!("expected development, test, or production, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
