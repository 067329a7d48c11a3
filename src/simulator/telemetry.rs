//! Telemetry simulator
//!
//! Each tick redraws the reading of every running appliance from its
//! baseline, so readings stay in a fixed band instead of drifting.

use crate::core::{Error, Result};
use crate::engine::Engine;
use crate::simulator::Simulator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Random power readings within `baseline * (1 ± variation)`
pub struct TelemetrySimulator {
    variation: f64,
    period: Duration,
    rng: StdRng,
}

impl TelemetrySimulator {
    /// `variation` is the relative half-width of the band, e.g. 0.05 for ±5%
    pub fn new(variation: f64, period: Duration, seed: u64) -> Result<Self> {
        if !(0.0..1.0).contains(&variation) {
            return Err(Error::Configuration(format!(
                "power variation must be within [0, 1), got {}",
                variation
            )));
        }

        Ok(Self {
            variation,
            period,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Draw one reading for an appliance with the given baseline
    pub fn sample(&mut self, baseline_watts: u32) -> i64 {
        let perturbation = self.rng.random_range(-self.variation..=self.variation);
        (f64::from(baseline_watts) * (1.0 + perturbation)).round() as i64
    }
}

impl Simulator for TelemetrySimulator {
    fn name(&self) -> &str {
        "telemetry"
    }

    fn period(&self) -> Duration {
        self.period
    }

    fn tick(&mut self, engine: &mut Engine) -> Result<()> {
        let snapshot = engine.snapshot();
        let readings: Vec<(String, i64)> = snapshot
            .active()
            .map(|a| (a.profile.id.clone(), self.sample(a.profile.baseline_watts)))
            .collect();

        if let Some(metrics) = engine
            .record_readings(&readings)
            .map_err(|e| e.into_invariant(self.name()))?
        {
            log::debug!(
                "Telemetry updated {} appliances, total {} W",
                readings.len(),
                metrics.total_active_power_watts
            );
        }

        Ok(())
    }
}
