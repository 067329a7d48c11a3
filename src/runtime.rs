//! Scheduler for the periodic simulators
//!
//! Each simulator gets its own tokio task driven by an interval. A tick
//! holds the engine lock for its whole duration, so observers and other
//! callers only ever see fully applied mutations.

use crate::core::{Error, Result};
use crate::engine::Engine;
use crate::simulator::Simulator;
use std::future::{poll_fn, Future};
use std::pin::Pin;
use std::sync::Arc;
use std::task::Poll;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Engine shared between the simulators and external callers
pub type SharedEngine = Arc<Mutex<Engine>>;

/// Running simulator tasks
pub struct SimulationRuntime {
    tasks: Vec<(String, JoinHandle<Result<()>>)>,
}

impl SimulationRuntime {
    /// Spawn one task per simulator. Must be called inside a tokio runtime.
    pub fn start(engine: SharedEngine, simulators: Vec<Box<dyn Simulator + Send>>) -> Self {
        let tasks = simulators
            .into_iter()
            .map(|simulator| {
                let name = simulator.name().to_string();
                let handle = tokio::spawn(run_simulator(Arc::clone(&engine), simulator));
                (name, handle)
            })
            .collect();

        Self { tasks }
    }

    /// Number of tasks still running
    pub fn running(&self) -> usize {
        self.tasks.iter().filter(|(_, h)| !h.is_finished()).count()
    }

    /// Wait until a task ends on its own and return why.
    ///
    /// Simulators only stop on a fatal error, so this stays pending while
    /// the simulation is healthy. The failed task is removed; the rest keep
    /// running until `shutdown`.
    pub async fn failed(&mut self) -> Error {
        loop {
            if self.tasks.is_empty() {
                return std::future::pending().await;
            }

            let (index, outcome) = poll_fn(|cx| {
                for (index, (_, handle)) in self.tasks.iter_mut().enumerate() {
                    if let Poll::Ready(outcome) = Pin::new(handle).poll(cx) {
                        return Poll::Ready((index, outcome));
                    }
                }
                Poll::Pending
            })
            .await;

            let (name, _) = self.tasks.remove(index);
            match outcome {
                Ok(Ok(())) => log::debug!("Simulator {} finished", name),
                Ok(Err(e)) => return e,
                Err(e) => {
                    return Error::Invariant(format!("simulator {} ended abnormally: {}", name, e))
                }
            }
        }
    }

    /// Stop every task and wait for it to end.
    ///
    /// Returns the first error a task failed with before being stopped.
    pub async fn shutdown(mut self) -> Result<()> {
        let tasks = std::mem::take(&mut self.tasks);
        for (_, handle) in &tasks {
            handle.abort();
        }

        let mut first_error = None;
        for (name, handle) in tasks {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    log::error!("Simulator {} had failed: {}", name, e);
                    first_error.get_or_insert(e);
                }
                Err(e) if e.is_cancelled() => log::debug!("Simulator {} stopped", name),
                Err(e) => {
                    first_error.get_or_insert(Error::Invariant(format!(
                        "simulator {} panicked: {}",
                        name, e
                    )));
                }
            }
        }

        log::info!("Simulation runtime stopped");
        first_error.map_or(Ok(()), Err)
    }
}

impl Drop for SimulationRuntime {
    fn drop(&mut self) {
        for (_, handle) in &self.tasks {
            handle.abort();
        }
    }
}

async fn run_simulator(engine: SharedEngine, mut simulator: Box<dyn Simulator + Send>) -> Result<()> {
    let period = simulator.period();
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // The first tick completes immediately; simulators fire one period in
    ticker.tick().await;

    log::info!("Simulator {} started with {}ms period", simulator.name(), period.as_millis());

    loop {
        ticker.tick().await;

        let mut engine = engine.lock().await;
        if let Err(e) = simulator.tick(&mut engine) {
            log::error!("Simulator {} stopped: {}", simulator.name(), e);
            return Err(e);
        }
    }
}
