use std::path::PathBuf;

use rust_decimal::Decimal;

use crate::summary::PricingPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
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

/// Where the product list comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum SourceConfig {
    /// Spreadsheet values API: rows of `[name, unit, price, indent]`.
    Sheet {
        spreadsheet_id: String,
        api_key: String,
        sheet_name: String,
        base_url: String,
    },
    /// A JSON array of products at an `http(s)` URL or a local path.
    Json { location: String },
}

impl SourceConfig {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            SourceConfig::Sheet { .. } => "sheet",
            SourceConfig::Json { .. } => "json",
        }
    }
}

impl std::fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceConfig::Sheet {
                spreadsheet_id,
                sheet_name,
                base_url,
                ..
            } => f
                .debug_struct("Sheet")
                .field("spreadsheet_id", spreadsheet_id)
                .field("api_key", &"[redacted]")
                .field("sheet_name", sheet_name)
                .field("base_url", base_url)
                .finish(),
            SourceConfig::Json { location } => {
                f.debug_struct("Json").field("location", location).finish()
            }
        }
    }
}

/// Settings that never touch the product source, so commands working only on
/// local state can run without source credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalConfig {
    pub env: Environment,
    pub log_level: String,
    pub store_path: PathBuf,
    pub cache_ttl_secs: u64,
    pub contact_url: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub local: LocalConfig,
    pub source: SourceConfig,
    pub request_timeout_secs: u64,
    pub max_attempts: u32,
    pub retry_backoff_ms: u64,
    pub shipping_fee: Decimal,
    pub free_shipping_threshold: Decimal,
}

impl AppConfig {
    #[must_use]
    pub fn pricing_policy(&self) -> PricingPolicy {
        PricingPolicy {
            shipping_fee: self.shipping_fee,
            free_shipping_threshold: self.free_shipping_threshold,
        }
    }
}
