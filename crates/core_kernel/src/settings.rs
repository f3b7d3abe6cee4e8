//! Engine settings
//!
//! The tunable business-rule parameters, loadable from the environment with
//! the `BROKER_` prefix. Defaults match the platform's launch rules.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::money::Rate;

/// Business-rule configuration for the lifecycle engine
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// Days after purchase during which a policy may be cancelled
    pub cancellation_window_days: u32,
    /// Term applied when neither the request nor the product carries one
    pub default_term_months: u32,
    /// Agent commission, percent of summed assigned premiums (display only)
    pub commission_rate_percent: Decimal,
    /// Trailing window for revenue and activity rollups, in days
    pub trailing_window_days: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            cancellation_window_days: 15,
            default_term_months: 12,
            commission_rate_percent: dec!(5),
            trailing_window_days: 30,
        }
    }
}

impl EngineSettings {
    /// Loads settings from the environment (`BROKER_CANCELLATION_WINDOW_DAYS`, ...)
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("BROKER"))
            .build()?
            .try_deserialize()
    }

    /// The commission rate as a `Rate`
    pub fn commission_rate(&self) -> Rate {
        Rate::from_percentage(self.commission_rate_percent)
    }
}
