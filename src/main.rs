//! Appliance Monitor - Main entry point
//!
//! Runs the appliance simulation headless and emits every engine
//! notification as a JSON line on stdout for a presentation layer to render.
//! An optional first argument points at a config file; otherwise the
//! per-user config is loaded (and created with defaults on first run).

use appliance_monitor_lib::core::{Config, Error};
use appliance_monitor_lib::engine::Engine;
use appliance_monitor_lib::runtime::SimulationRuntime;
use appliance_monitor_lib::simulator;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Write one event line for the frontend
fn emit<T: Serialize>(event: &str, payload: &T) {
    match serde_json::to_string(&serde_json::json!({ "event": event, "payload": payload })) {
        Ok(line) => println!("{}", line),
        Err(e) => log::warn!("Failed to serialize {} event: {}", event, e),
    }
}

fn load_config() -> Config {
    if let Some(path) = std::env::args().nth(1) {
        return Config::load_from(Path::new(&path)).unwrap_or_else(|e| {
            log::error!("Failed to load config from {}: {}", path, e);
            std::process::exit(1);
        });
    }

    match Config::load() {
        Ok(config) => config,
        Err(e @ Error::Configuration(_)) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
        Err(e) => {
            log::warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Appliance Monitor v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config();
    let seed = config.simulation.resolve_seed();
    log::info!("Simulation seed: {}", seed);

    let mut engine = Engine::new(&config, seed).unwrap_or_else(|e| {
        log::error!("Failed to initialize engine: {}", e);
        std::process::exit(1);
    });

    let simulators = simulator::from_config(&config, seed).unwrap_or_else(|e| {
        log::error!("Failed to initialize simulators: {}", e);
        std::process::exit(1);
    });

    engine.on_state_changed(|change| emit("state-changed", change));
    engine.on_series_changed(|series| emit("series-changed", series));
    engine.on_peak_info(|peak| emit("peak-info", peak));

    // Initial render
    emit("state-changed", &engine.current_state());
    emit("series-changed", engine.series());

    let engine = Arc::new(Mutex::new(engine));
    let mut runtime = SimulationRuntime::start(Arc::clone(&engine), simulators);

    // A simulator failure is fatal; stop as soon as one is seen
    let failure = tokio::select! {
        e = runtime.failed() => Some(e),
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                log::error!("Failed to listen for shutdown signal: {}", e);
            }
            None
        }
    };

    log::info!("Shutting down");
    let stopped = runtime.shutdown().await;
    if let Some(e) = failure {
        log::error!("Simulation failed: {}", e);
        std::process::exit(1);
    }
    if let Err(e) = stopped {
        log::error!("Simulation ended with error: {}", e);
        std::process::exit(1);
    }
}
