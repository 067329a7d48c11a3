//! Configuration management

use crate::core::{ApplianceProfile, ApplianceState, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default = "default_appliances")]
    pub appliances: Vec<ApplianceConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            pricing: PricingConfig::default(),
            simulation: SimulationConfig::default(),
            appliances: default_appliances(),
        }
    }
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            Error::Configuration("Could not determine config directory".to_string())
        })?;

        let app_config_dir = config_dir.join("appliance-monitor");

        if !app_config_dir.exists() {
            fs::create_dir_all(&app_config_dir)?;
        }

        Ok(app_config_dir.join("config.toml"))
    }

    /// Load configuration from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            let config = Self::default();
            config.save_to(&path)?;
            return Ok(config);
        }

        Self::load_from(&path)
    }

    /// Load and validate configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| Error::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        self.pricing.validate()?;
        self.simulation.validate()?;

        if self.appliances.is_empty() {
            return Err(Error::Configuration("No appliances configured".to_string()));
        }

        let mut seen = HashSet::new();
        for appliance in &self.appliances {
            if !seen.insert(appliance.id.as_str()) {
                return Err(Error::Configuration(format!(
                    "Duplicate appliance id \"{}\"",
                    appliance.id
                )));
            }
        }

        Ok(())
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Language: "auto", "en", "zh-TW"
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String { "auto".to_string() }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

/// Flat-rate pricing and the usage assumptions behind the daily estimate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Rate per kWh
    #[serde(default = "default_price_per_kwh")]
    pub price_per_kwh: f64,
    /// Hours per day the current load is assumed to last
    #[serde(default = "default_assumed_daily_hours")]
    pub assumed_daily_hours: f64,
    /// Currency code
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Currency symbol
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_price_per_kwh() -> f64 { 6.0 }
fn default_assumed_daily_hours() -> f64 { 16.5 }
fn default_currency() -> String { "TWD".to_string() }
fn default_currency_symbol() -> String { "NT$".to_string() }

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            price_per_kwh: default_price_per_kwh(),
            assumed_daily_hours: default_assumed_daily_hours(),
            currency: default_currency(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl PricingConfig {
    fn validate(&self) -> Result<()> {
        if !(self.price_per_kwh.is_finite() && self.price_per_kwh >= 0.0) {
            return Err(Error::Configuration(format!(
                "price_per_kwh must be a non-negative number, got {}",
                self.price_per_kwh
            )));
        }
        if !(self.assumed_daily_hours > 0.0 && self.assumed_daily_hours <= 24.0) {
            return Err(Error::Configuration(format!(
                "assumed_daily_hours must be within (0, 24], got {}",
                self.assumed_daily_hours
            )));
        }
        Ok(())
    }
}

/// Timing and randomness of the simulators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Telemetry refresh period in milliseconds
    #[serde(default = "default_telemetry_interval")]
    pub telemetry_interval_ms: u64,
    /// Relative half-width of the reading band around baseline
    #[serde(default = "default_power_variation")]
    pub power_variation: f64,
    /// Cycle-completion check period in milliseconds
    #[serde(default = "default_transition_interval")]
    pub transition_interval_ms: u64,
    /// Chance per check that an eligible appliance is picked
    #[serde(default = "default_transition_probability")]
    pub transition_probability: f64,
    /// Fixed seed for reproducible runs (random when absent)
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_telemetry_interval() -> u64 { 5000 }
fn default_power_variation() -> f64 { 0.05 }
fn default_transition_interval() -> u64 { 30_000 }
fn default_transition_probability() -> f64 { 0.1 }

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            telemetry_interval_ms: default_telemetry_interval(),
            power_variation: default_power_variation(),
            transition_interval_ms: default_transition_interval(),
            transition_probability: default_transition_probability(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Configured seed, or a fresh random one when none is set
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    fn validate(&self) -> Result<()> {
        if self.telemetry_interval_ms == 0 || self.transition_interval_ms == 0 {
            return Err(Error::Configuration(
                "Simulation intervals must be greater than zero".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.power_variation) {
            return Err(Error::Configuration(format!(
                "power_variation must be within [0, 1), got {}",
                self.power_variation
            )));
        }
        if !(0.0..=1.0).contains(&self.transition_probability) {
            return Err(Error::Configuration(format!(
                "transition_probability must be within [0, 1], got {}",
                self.transition_probability
            )));
        }
        Ok(())
    }
}

/// One appliance entry: its profile plus the state it starts in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplianceConfig {
    pub id: String,
    pub name: String,
    pub baseline_watts: u32,
    #[serde(default)]
    pub icon: String,
    /// Whether the appliance is running at startup
    #[serde(default)]
    pub active: bool,
    /// Initial reading (defaults to baseline once activated)
    #[serde(default)]
    pub power_watts: Option<u32>,
    /// Eligible for automatic cycle completion
    #[serde(default)]
    pub completes_cycle: bool,
}

impl ApplianceConfig {
    pub fn new(id: &str, name: &str, baseline_watts: u32, icon: &str, active: bool) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            baseline_watts,
            icon: icon.to_string(),
            active,
            power_watts: Some(baseline_watts),
            completes_cycle: false,
        }
    }

    pub fn with_cycle(mut self) -> Self {
        self.completes_cycle = true;
        self
    }

    pub fn profile(&self) -> ApplianceProfile {
        ApplianceProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            baseline_watts: self.baseline_watts,
            icon: self.icon.clone(),
            completes_cycle: self.completes_cycle,
        }
    }

    pub fn initial_state(&self) -> ApplianceState {
        ApplianceState::new(self.active, self.power_watts)
    }
}

fn default_appliances() -> Vec<ApplianceConfig> {
    vec![
        ApplianceConfig::new("aircon", "Air conditioner", 850, "\u{2744}\u{FE0F}", true),
        ApplianceConfig::new("light", "Lights", 120, "\u{1F4A1}", true),
        ApplianceConfig::new("tv", "Television", 200, "\u{1F4FA}", false),
        ApplianceConfig::new("fridge", "Refrigerator", 300, "\u{1F9CA}", true),
        ApplianceConfig::new("washing", "Washing machine", 450, "\u{1F9FA}", false).with_cycle(),
        ApplianceConfig::new("dishwasher", "Dishwasher", 600, "\u{1F37D}\u{FE0F}", false)
            .with_cycle(),
    ]
}
