//! # Configuration Module
//!
//! Application settings: query building, purchase quantity policy, storefront
//! selection and fallback, session mode, and search recovery.
//!
//! Defaults come from the constants below. [`AppConfig::from_env`] loads a
//! `.env` file if present and applies `RECIPE_CART_*` overrides.

use crate::conversions::QuantityPolicy;
use crate::error::ShopError;
use crate::search_query::QueryOptions;
use std::str::FromStr;

// Constants for application configuration
pub const DEFAULT_TOP_N: usize = 3;
pub const DEFAULT_STOREFRONT: &str = "fresh";
pub const DEFAULT_FALLBACK_STOREFRONTS: &[&str] = &["fresh", "wholefoods", "amazon"];
pub const DEFAULT_HEADLESS: bool = false;

/// Prefix of every environment variable read by [`AppConfig::from_env`]
pub const ENV_PREFIX: &str = "RECIPE_CART_";

/// Recovery configuration for search failures
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryConfig {
    /// Retries after the first failed search attempt
    pub max_retries: u32,
    /// Base delay between retries in milliseconds
    pub base_retry_delay_ms: u64,
    /// Maximum delay between retries in milliseconds
    pub max_retry_delay_ms: u64,
    /// Consecutive failures before the circuit breaker opens
    pub circuit_breaker_threshold: u32,
    /// Seconds the circuit stays open before allowing a new attempt
    pub circuit_breaker_reset_secs: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_retry_delay_ms: 500,  // 0.5 seconds
            max_retry_delay_ms: 5000,  // 5 seconds
            circuit_breaker_threshold: 5,
            circuit_breaker_reset_secs: 60, // 1 minute
        }
    }
}

/// Log output format of the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" | "plain" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Search query options (fresh-produce mode)
    pub query: QueryOptions,
    /// How purchase quantities are recommended
    pub quantity_policy: QuantityPolicy,
    /// Number of ranked products presented per ingredient
    pub top_n: usize,
    /// Storefront searched first when a request names none
    pub default_storefront: String,
    /// Storefronts tried in order when a search returns nothing
    pub fallback_storefronts: Vec<String>,
    /// Whether the shopper session runs without a visible window
    pub headless: bool,
    pub log_format: LogFormat,
    pub recovery: RecoveryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            query: QueryOptions::default(),
            quantity_policy: QuantityPolicy::default(),
            top_n: DEFAULT_TOP_N,
            default_storefront: DEFAULT_STOREFRONT.to_string(),
            fallback_storefronts: DEFAULT_FALLBACK_STOREFRONTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            headless: DEFAULT_HEADLESS,
            log_format: LogFormat::default(),
            recovery: RecoveryConfig::default(),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ShopError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ShopError::Config(format!("{key}: expected a boolean, got '{value}'"))),
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ShopError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ShopError::Config(format!("{key}: {e}")))
}

impl AppConfig {
    /// Load `.env` (if any) and apply `RECIPE_CART_*` environment overrides
    pub fn from_env() -> Result<Self, ShopError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any variable source; `lookup` receives full variable names
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ShopError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| {
            let key = format!("{ENV_PREFIX}{suffix}");
            lookup(&key).map(|value| (key, value))
        };

        let mut config = Self::default();

        if let Some((key, value)) = var("FRESH_PRODUCE") {
            config.query.fresh_produce = parse_bool(&key, &value)?;
        }
        if let Some((key, value)) = var("TOP_N") {
            config.top_n = parse_value(&key, &value)?;
        }
        if let Some((_, value)) = var("STOREFRONT") {
            config.default_storefront = value.trim().to_lowercase();
        }
        if let Some((_, value)) = var("FALLBACKS") {
            config.fallback_storefronts = value
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some((key, value)) = var("HEADLESS") {
            config.headless = parse_bool(&key, &value)?;
        }
        if let Some((key, value)) = var("MAX_RETRIES") {
            config.recovery.max_retries = parse_value(&key, &value)?;
        }
        if let Some((key, value)) = var("QUANTITY_POLICY") {
            config.quantity_policy = parse_value(&key, &value)?;
        }
        if let Some((key, value)) = var("LOG_FORMAT") {
            config.log_format = parse_value(&key, &value)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> Result<(), ShopError> {
        if self.top_n == 0 {
            return Err(ShopError::Config("top_n must be at least 1".to_string()));
        }
        if self.default_storefront.is_empty() {
            return Err(ShopError::Config("default storefront must not be empty".to_string()));
        }
        if self.recovery.base_retry_delay_ms > self.recovery.max_retry_delay_ms {
            return Err(ShopError::Config(
                "base retry delay exceeds maximum retry delay".to_string(),
            ));
        }
        if self.recovery.circuit_breaker_threshold == 0 {
            return Err(ShopError::Config(
                "circuit breaker threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Storefronts to try after `primary` came back empty, in configured order
    pub fn fallbacks_after(&self, primary: &str) -> Vec<String> {
        self.fallback_storefronts
            .iter()
            .filter(|storefront| storefront.as_str() != primary)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.top_n, 3);
        assert_eq!(config.default_storefront, "fresh");
        assert_eq!(config.fallback_storefronts, vec!["fresh", "wholefoods", "amazon"]);
        assert!(!config.headless);
        assert!(!config.query.fresh_produce);
        assert_eq!(config.quantity_policy, QuantityPolicy::NeededRange);
        assert_eq!(config.recovery.max_retries, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("RECIPE_CART_FRESH_PRODUCE", "true"),
            ("RECIPE_CART_TOP_N", "4"),
            ("RECIPE_CART_STOREFRONT", "Amazon"),
            ("RECIPE_CART_FALLBACKS", "amazon, fresh,,"),
            ("RECIPE_CART_HEADLESS", "yes"),
            ("RECIPE_CART_MAX_RETRIES", "0"),
            ("RECIPE_CART_QUANTITY_POLICY", "conservative"),
            ("RECIPE_CART_LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert!(config.query.fresh_produce);
        assert_eq!(config.top_n, 4);
        assert_eq!(config.default_storefront, "amazon");
        assert_eq!(config.fallback_storefronts, vec!["amazon", "fresh"]);
        assert!(config.headless);
        assert_eq!(config.recovery.max_retries, 0);
        assert_eq!(config.quantity_policy, QuantityPolicy::Conservative);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        for (key, value) in [
            ("RECIPE_CART_TOP_N", "many"),
            ("RECIPE_CART_TOP_N", "0"),
            ("RECIPE_CART_HEADLESS", "maybe"),
            ("RECIPE_CART_QUANTITY_POLICY", "greedy"),
            ("RECIPE_CART_LOG_FORMAT", "xml"),
        ] {
            match AppConfig::from_lookup(lookup(&[(key, value)])) {
                Err(ShopError::Config(msg)) => assert!(!msg.is_empty()),
                other => panic!("{key}={value}: expected config error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_fallbacks_skip_primary() {
        let config = AppConfig::default();
        assert_eq!(config.fallbacks_after("fresh"), vec!["wholefoods", "amazon"]);
        assert_eq!(config.fallbacks_after("other"), vec!["fresh", "wholefoods", "amazon"]);
    }
}
