use std::path::PathBuf;

use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    /// Log filter used when `KAT_LOG_LEVEL` is unset.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Environment::Development => "debug",
            Environment::Test | Environment::Production => "info",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub products_path: PathBuf,
    pub showcase_path: PathBuf,
    /// International number without `+`, e.g. `"919479714198"`.
    pub whatsapp_phone: String,
    pub business_name: String,
    /// Shared code that unlocks partner pricing. `None` disables partner mode.
    pub partner_code: Option<String>,
    /// Upper bound of the price filter and its default ceiling.
    pub max_price_limit: Decimal,
    /// Placeholder duration shown while filter results are recomputed.
    pub loading_delay_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("products_path", &self.products_path)
            .field("showcase_path", &self.showcase_path)
            .field("whatsapp_phone", &self.whatsapp_phone)
            .field("business_name", &self.business_name)
            .field(
                "partner_code",
                &self.partner_code.as_ref().map(|_| "[redacted]"),
            )
            .field("max_price_limit", &self.max_price_limit)
            .field("loading_delay_ms", &self.loading_delay_ms)
            .finish()
    }
}
