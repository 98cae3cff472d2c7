use crate::constants::{DEFAULT_MEAL_COUNT, DEFAULT_MEAL_TABLE};
use crate::error::{MealError, Result};
use std::env;

/// Catalog-side settings shared by every entry point
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Table holding the meal catalog
    pub meal_table: String,
    /// Meals drawn per shopping list
    pub meal_count: usize,
}

/// Twilio credentials and addresses for the outbound SMS path
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_phone: String,
    pub customer_phone: String,
}

/// Process configuration, resolved once per invocation from the environment
/// and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub delivery: DeliveryConfig,
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self> {
        let meal_count = match env::var("MEAL_COUNT") {
            Ok(raw) => {
                let count: usize = raw.parse().map_err(|_| {
                    MealError::Config(format!(
                        "MEAL_COUNT must be a positive integer, got '{raw}'"
                    ))
                })?;
                if count == 0 {
                    return Err(MealError::Config(
                        "MEAL_COUNT must be at least 1".to_string(),
                    ));
                }
                count
            }
            Err(_) => DEFAULT_MEAL_COUNT,
        };

        Ok(Self {
            meal_table: env::var("MEAL_TABLE")
                .unwrap_or_else(|_| DEFAULT_MEAL_TABLE.to_string()),
            meal_count,
        })
    }
}

impl DeliveryConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            account_sid: require("TWILIO_ACCOUNT_SID")?,
            auth_token: require("TWILIO_AUTH_TOKEN")?,
            from_phone: require("TWILIO_PHONE")?,
            customer_phone: require("CUSTOMER_PHONE")?,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            catalog: CatalogConfig::from_env()?,
            delivery: DeliveryConfig::from_env()?,
        })
    }
}

fn require(key: &str) -> Result<String> {
    env::var(key).map_err(|_| MealError::Config(format!("{key} environment variable not set")))
}
