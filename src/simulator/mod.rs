//! Periodic simulators that mutate appliance state
//!
//! - Telemetry: perturbs the readings of running appliances around baseline
//! - Transition: occasionally finishes the cycle of a cyclic appliance

mod telemetry;
mod transition;

pub use telemetry::TelemetrySimulator;
pub use transition::AutonomousTransitionSimulator;

use crate::core::{Config, Result};
use crate::engine::Engine;
use std::time::Duration;

/// Seed offset for the transition simulator RNG to avoid correlation with telemetry
pub const TRANSITION_SEED_OFFSET: u64 = 57;

/// A task the runtime fires on a fixed period
pub trait Simulator {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Time between two ticks
    fn period(&self) -> Duration;

    /// Run one tick against the engine. Runs to completion; an error is an
    /// invariant violation and stops the task.
    fn tick(&mut self, engine: &mut Engine) -> Result<()>;
}

/// Build both simulators from configuration.
///
/// The eligible set for cycle completion is every appliance flagged
/// `completes_cycle`, in configuration order.
pub fn from_config(config: &Config, seed: u64) -> Result<Vec<Box<dyn Simulator + Send>>> {
    let sim = &config.simulation;

    let telemetry = TelemetrySimulator::new(
        sim.power_variation,
        Duration::from_millis(sim.telemetry_interval_ms),
        seed,
    )?;

    let eligible = config
        .appliances
        .iter()
        .filter(|a| a.completes_cycle)
        .map(|a| a.id.clone())
        .collect();
    let transition = AutonomousTransitionSimulator::new(
        eligible,
        sim.transition_probability,
        Duration::from_millis(sim.transition_interval_ms),
        seed.wrapping_add(TRANSITION_SEED_OFFSET),
    )?;

    let simulators: Vec<Box<dyn Simulator + Send>> = vec![Box::new(telemetry), Box::new(transition)];
    Ok(simulators)
}
