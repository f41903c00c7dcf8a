use anyhow::{Context, Result};
use compute::format::{decimal_from_f64, format_currency};
use compute::generator::TextGenerator;
use compute::valuation::{ValuationCalculator, ValuationConfig};
use config::{Config, Environment, File};
use moka::future::Cache;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::generator::build_generator;
use crate::schemas::AppState;

/// Prefix of environment variables overriding settings, e.g.
/// `STARVEST__VALUATION__ROI_MULTIPLIER=1.5`.
pub const ENV_PREFIX: &str = "STARVEST";

/// Application settings, layered from defaults, an optional file and the
/// environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub bind_address: String,
    /// ISO 4217 code used for every currency display string.
    pub currency_code: String,
    pub valuation: ValuationSettings,
    pub advisor: AdvisorSettings,
}

/// Multipliers as written in configuration files; converted to decimals
/// before use.
#[derive(Debug, Clone, Deserialize)]
pub struct ValuationSettings {
    pub market_cap_multiplier: f64,
    pub volume_multiplier: f64,
    pub roi_multiplier: f64,
    pub min_investment: u64,
    pub max_investment: u64,
    pub investment_step: u64,
}

impl ValuationSettings {
    pub fn to_config(&self) -> compute::error::Result<ValuationConfig> {
        Ok(ValuationConfig {
            market_cap_multiplier: decimal_from_f64(self.market_cap_multiplier)?,
            volume_multiplier: decimal_from_f64(self.volume_multiplier)?,
            roi_multiplier: decimal_from_f64(self.roi_multiplier)?,
            min_investment: self.min_investment,
            max_investment: self.max_investment,
            investment_step: self.investment_step,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdvisorSettings {
    /// Text generation proxy tried first.
    #[serde(default)]
    pub primary_url: Option<String>,
    /// Proxy used when the primary fails.
    #[serde(default)]
    pub fallback_url: Option<String>,
    pub timeout_secs: u64,
    pub cache_ttl_secs: u64,
    pub cache_capacity: u64,
}

/// Load settings.
///
/// `path` names a configuration file (TOML, YAML or JSON, chosen by
/// extension). Without it a `starvest.*` file in the working directory is
/// used when present.
pub fn load_settings(path: Option<&str>) -> Result<Settings> {
    dotenvy::dotenv().ok();

    let defaults = ValuationConfig::default();
    let mut builder = Config::builder()
        .set_default("bind_address", "0.0.0.0:3000")?
        .set_default("currency_code", "USD")?
        .set_default("valuation.market_cap_multiplier", decimal_default(defaults.market_cap_multiplier))?
        .set_default("valuation.volume_multiplier", decimal_default(defaults.volume_multiplier))?
        .set_default("valuation.roi_multiplier", decimal_default(defaults.roi_multiplier))?
        .set_default("valuation.min_investment", defaults.min_investment as i64)?
        .set_default("valuation.max_investment", defaults.max_investment as i64)?
        .set_default("valuation.investment_step", defaults.investment_step as i64)?
        .set_default("advisor.timeout_secs", 5_i64)?
        .set_default("advisor.cache_ttl_secs", 300_i64)?
        .set_default("advisor.cache_capacity", 1000_i64)?;

    builder = match path {
        Some(path) => {
            debug!("Loading settings from {}", path);
            builder.add_source(File::with_name(path))
        }
        None => builder.add_source(File::with_name("starvest").required(false)),
    };

    let settings = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to read settings")?
        .try_deserialize::<Settings>()
        .context("Invalid settings")?;

    Ok(settings)
}

fn decimal_default(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Builds the calculator configured by `settings`.
pub fn build_calculator(settings: &Settings) -> Result<ValuationCalculator> {
    let config = settings.valuation.to_config()?;
    Ok(ValuationCalculator::new(config)?)
}

/// Initialize application state
pub fn initialize_app_state(settings: &Settings) -> Result<AppState> {
    let calculator = build_calculator(settings)?;
    format_currency(Decimal::ZERO, &settings.currency_code)
        .context("Unsupported currency_code")?;

    let generator = build_generator(&settings.advisor)?;
    info!("Advisor provider: {}", generator.name());

    // Initialize cache
    let cache = Cache::builder()
        .max_capacity(settings.advisor.cache_capacity)
        .time_to_live(Duration::from_secs(settings.advisor.cache_ttl_secs))
        .build();

    Ok(AppState::new(
        calculator,
        settings.currency_code.clone(),
        generator,
        cache,
    ))
}
