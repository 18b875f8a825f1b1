use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
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
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so parsing can be tested against a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    use rust_decimal::Decimal;

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

    let parse_price = |var: &str, default: &str| -> Result<Decimal, ConfigError> {
        let raw = or_default(var, default);
        let price = raw
            .parse::<Decimal>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if price.is_sign_negative() {
            return Err(invalid(var, "must not be negative".to_string()));
        }
        Ok(price)
    };

    let env = parse_environment(&or_default("KAT_ENV", "development"));
    let log_level = or_default("KAT_LOG_LEVEL", env.default_log_level());
    let products_path = PathBuf::from(or_default("KAT_PRODUCTS_PATH", "./data/products.json"));
    let showcase_path = PathBuf::from(or_default("KAT_SHOWCASE_PATH", "./config/showcase.yaml"));

    let whatsapp_phone = or_default("KAT_WHATSAPP_PHONE", crate::message::DEFAULT_WHATSAPP_PHONE);
    if whatsapp_phone.is_empty() || !whatsapp_phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid(
            "KAT_WHATSAPP_PHONE",
            "expected digits only, with country code and no '+'".to_string(),
        ));
    }

    let business_name = or_default("KAT_BUSINESS_NAME", crate::message::DEFAULT_BUSINESS_NAME);
    let partner_code = lookup("KAT_PARTNER_CODE")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let max_price_limit = parse_price("KAT_MAX_PRICE_LIMIT", "2000")?;
    let loading_delay_ms = parse_u64("KAT_LOADING_DELAY_MS", "400")?;

    Ok(AppConfig {
        env,
        log_level,
        products_path,
        showcase_path,
        whatsapp_phone,
        business_name,
        partner_code,
        max_price_limit,
        loading_delay_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
