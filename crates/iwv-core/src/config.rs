use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::app_config::{AppConfig, Environment, LocalConfig, SourceConfig};
use crate::ConfigError;

pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
pub const DEFAULT_CONTACT_URL: &str = "https://wa.me/+6587680491";

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

/// Load only the settings that do not depend on the product source.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_local_config() -> Result<LocalConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_local_config(&|key: &str| std::env::var(key))
}

/// Build the source-independent settings. Nothing here is required.
fn build_local_config<F>(lookup: &F) -> Result<LocalConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("IWV_ENV", "development"))?;
    let log_level = or_default("IWV_LOG_LEVEL", "info");
    let store_path = PathBuf::from(or_default("IWV_STORE_PATH", "./.iwv/local_storage.json"));
    let cache_ttl_secs = or_default("IWV_CACHE_TTL_SECS", "21600")
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "IWV_CACHE_TTL_SECS".to_string(),
            reason: e.to_string(),
        })?;
    let contact_url = or_default("IWV_CONTACT_URL", DEFAULT_CONTACT_URL);

    Ok(LocalConfig {
        env,
        log_level,
        store_path,
        cache_ttl_secs,
        contact_url,
    })
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can use a plain map.
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

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_money = |var: &str, default: &str| -> Result<Decimal, ConfigError> {
        let raw = or_default(var, default);
        let value = Decimal::from_str(raw.trim()).map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if value.is_sign_negative() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must not be negative".to_string(),
            });
        }
        Ok(value)
    };

    let local = build_local_config(&lookup)?;

    let source = match or_default("IWV_SOURCE", "sheet").as_str() {
        "sheet" => SourceConfig::Sheet {
            spreadsheet_id: require("IWV_SHEET_ID")?,
            api_key: require("IWV_SHEET_API_KEY")?,
            sheet_name: or_default("IWV_SHEET_NAME", "fruits"),
            base_url: or_default("IWV_SHEETS_BASE_URL", DEFAULT_SHEETS_BASE_URL),
        },
        "json" => SourceConfig::Json {
            location: or_default("IWV_PRODUCTS_URL", "./products.json"),
        },
        other => {
            return Err(ConfigError::InvalidEnvVar {
                var: "IWV_SOURCE".to_string(),
                reason: format!("expected 'sheet' or 'json', got '{other}'"),
            })
        }
    };

    let request_timeout_secs = parse_u64("IWV_REQUEST_TIMEOUT_SECS", "10")?;
    let max_attempts = parse_u32("IWV_MAX_ATTEMPTS", "3")?;
    if max_attempts == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "IWV_MAX_ATTEMPTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let retry_backoff_ms = parse_u64("IWV_RETRY_BACKOFF_MS", "1000")?;

    let shipping_fee = parse_money("IWV_SHIPPING_FEE", "8")?;
    let free_shipping_threshold = parse_money("IWV_FREE_SHIPPING_THRESHOLD", "80")?;

    Ok(AppConfig {
        local,
        source,
        request_timeout_secs,
        max_attempts,
        retry_backoff_ms,
        shipping_fee,
        free_shipping_threshold,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "IWV_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
