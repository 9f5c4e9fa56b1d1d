use crate::datamodel::period::Period;
use anyhow::Error;
use confique::Config;
use std::{
    str::FromStr,
    sync::{Arc, Mutex, OnceLock},
};

#[derive(Debug, Config)]
pub struct AtlasMeasureConfig {
    /// Period given to measurements decoded without an explicit one
    #[config(env = "ATLASMEASURE_DEFAULT_PERIOD", default = "P1D")]
    pub default_period: String,

    /// Used when RUST_LOG is not set
    #[config(env = "ATLASMEASURE_LOG_FILTER", default = "info")]
    pub log_filter: String,

    /// Reject metric names that are not in the registry
    #[config(env = "ATLASMEASURE_STRICT_REGISTRY", default = false)]
    pub strict_registry: bool,
}

impl AtlasMeasureConfig {
    pub fn load() -> Result<AtlasMeasureConfig, Error> {
        let c = AtlasMeasureConfig::builder()
            .env()
            .file("settings.toml")
            .load()?;

        Ok(c)
    }

    pub fn parse_default_period(&self) -> Result<Period, Error> {
        Ok(Period::from_str(&self.default_period)?)
    }
}

static ATLASMEASURE_CONFIG: OnceLock<Arc<AtlasMeasureConfig>> = OnceLock::new();

pub fn get() -> Result<Arc<AtlasMeasureConfig>, Error> {
    ATLASMEASURE_CONFIG.get().cloned().ok_or_else(|| {
        Error::msg(
            "Configuration not loaded. Please call load_configuration() before using the configuration",
        )
    })
}

pub fn load_configuration() -> Result<(), Error> {
    if ATLASMEASURE_CONFIG.get().is_some() {
        return Ok(());
    }

    let config = AtlasMeasureConfig::load()?;
    ATLASMEASURE_CONFIG.get_or_init(|| Arc::new(config));

    Ok(())
}

static TEST_CONFIG_INIT: Mutex<()> = Mutex::new(());

/// Loads the configuration exactly once for the whole test run.
pub fn load_configuration_for_tests() -> Result<(), Error> {
    let _guard = TEST_CONFIG_INIT
        .lock()
        .map_err(|e| Error::msg(format!("Test configuration lock poisoned: {}", e)))?;

    if ATLASMEASURE_CONFIG.get().is_some() {
        return Ok(());
    }

    let config = AtlasMeasureConfig::load()?;
    ATLASMEASURE_CONFIG.get_or_init(|| Arc::new(config));

    Ok(())
}
