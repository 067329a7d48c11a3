//! Autonomous transition simulator
//!
//! Simulates appliances such as washers finishing their cycle: every tick
//! there is a small chance that one eligible appliance is picked, and if it
//! is running it gets switched off.

use crate::core::{Error, Result};
use crate::engine::Engine;
use crate::simulator::Simulator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Random cycle completion over a fixed set of eligible appliances
pub struct AutonomousTransitionSimulator {
    eligible: Vec<String>,
    probability: f64,
    period: Duration,
    rng: StdRng,
}

impl AutonomousTransitionSimulator {
    pub fn new(eligible: Vec<String>, probability: f64, period: Duration, seed: u64) -> Result<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(Error::Configuration(format!(
                "transition probability must be within [0, 1], got {}",
                probability
            )));
        }

        Ok(Self {
            eligible,
            probability,
            period,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn eligible(&self) -> &[String] {
        &self.eligible
    }

    /// Run one tick and return the id of the appliance switched off, if any
    pub fn step(&mut self, engine: &mut Engine) -> Result<Option<String>> {
        if self.eligible.is_empty() || !self.rng.random_bool(self.probability) {
            return Ok(None);
        }

        let id = &self.eligible[self.rng.random_range(0..self.eligible.len())];
        let running = engine
            .is_active(id)
            .map_err(|e| e.into_invariant("cycle-completion"))?;
        if !running {
            return Ok(None);
        }

        engine
            .complete_cycle(id)
            .map_err(|e| e.into_invariant("cycle-completion"))?;
        Ok(Some(id.clone()))
    }
}

impl Simulator for AutonomousTransitionSimulator {
    fn name(&self) -> &str {
        "cycle-completion"
    }

    fn period(&self) -> Duration {
        self.period
    }

    fn tick(&mut self, engine: &mut Engine) -> Result<()> {
        self.step(engine).map(|_| ())
    }
}
