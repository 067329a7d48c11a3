//! Pricing engine for daily usage and cost estimation
//!
//! Uses a flat rate per kWh and assumes the current load lasts for a
//! configurable number of hours per day.

use crate::core::PricingConfig;

/// Pricing engine that turns an instantaneous load into daily estimates
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    /// Create a new pricing engine with the given configuration
    pub fn new(config: &PricingConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Update the pricing configuration
    pub fn update_config(&mut self, config: &PricingConfig) {
        self.config = config.clone();
    }

    pub fn rate_per_kwh(&self) -> f64 {
        self.config.price_per_kwh
    }

    /// Calculate cost for a given energy consumption in kWh
    pub fn calculate_cost(&self, kwh: f64) -> f64 {
        kwh * self.config.price_per_kwh
    }

    /// Estimated daily usage at the given load, rounded to one decimal
    pub fn estimate_daily_usage_kwh(&self, watts: u64) -> f64 {
        let kwh = watts as f64 * self.config.assumed_daily_hours / 1000.0;
        (kwh * 10.0).round() / 10.0
    }

    /// Estimated daily cost at the given load, in whole currency units.
    ///
    /// Priced from the rounded usage figure so the two displayed numbers agree.
    pub fn estimate_daily_cost(&self, watts: u64) -> f64 {
        self.calculate_cost(self.estimate_daily_usage_kwh(watts)).round()
    }

    /// Get the currency symbol
    pub fn currency_symbol(&self) -> &str {
        &self.config.currency_symbol
    }
}
