//! Appliance Monitor - Demo CLI
//!
//! Deterministic walkthrough of the engine: drives the simulators by hand
//! with a fixed seed instead of waiting on timers.

use anyhow::{Context, Result};
use appliance_monitor_lib::core::{AggregatedMetrics, Config, Period};
use appliance_monitor_lib::engine::Engine;
use appliance_monitor_lib::simulator::{AutonomousTransitionSimulator, Simulator, TelemetrySimulator};
use std::time::Duration;

const DEMO_SEED: u64 = 20_240_601;

fn print_metrics(engine: &Engine, metrics: &AggregatedMetrics) {
    let i18n = engine.i18n();
    let symbol = engine.pricing().currency_symbol();
    let watts = i18n.get("unit.watts");
    let kwh = i18n.get("unit.kilowatt_hours");

    let top = match &metrics.top_consumer {
        Some(top) => format!("{} ({}{})", top.name, top.power_watts, watts),
        None => i18n.get("status.none_running"),
    };

    println!("      {:<16} {}{}", i18n.get("dashboard.current_power"), metrics.total_active_power_watts, watts);
    println!("      {:<16} {}", i18n.get("dashboard.top_consumer"), top);
    println!("      {:<16} {:.1} {}", i18n.get("dashboard.today_usage"), metrics.estimated_daily_usage_kwh, kwh);
    println!("      {:<16} {} {}", i18n.get("dashboard.estimated_cost"), symbol, metrics.estimated_daily_cost);
    println!(
        "      {}: {}  {}: {}  {}: {}",
        i18n.get("dashboard.online"),
        metrics.online_count,
        i18n.get("dashboard.offline"),
        metrics.offline_count,
        i18n.get("dashboard.total"),
        metrics.appliance_count()
    );
}

fn print_appliances(engine: &Engine) {
    let i18n = engine.i18n();
    let watts = i18n.get("unit.watts");
    for appliance in engine.appliance_views() {
        let status = if appliance.is_active {
            i18n.get("status.running")
        } else {
            i18n.get("status.off")
        };
        let power = appliance
            .power_watts
            .map(|w| format!("{}{}", w, watts))
            .unwrap_or_else(|| "-".to_string());
        println!("      {} {:<16} {:<8} {:>6}", appliance.icon, appliance.name, status, power);
    }
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = Config::default();
    config.simulation.seed = Some(DEMO_SEED);
    let mut engine = Engine::new(&config, DEMO_SEED).context("failed to build engine")?;

    println!("==============================================");
    println!("   {} - Demo CLI", engine.i18n().get("app.title"));
    println!("==============================================\n");

    // 1. Build the engine from the default household
    println!("[1/5] Initialized engine (seed {})...", DEMO_SEED);
    print_appliances(&engine);
    println!();
    print_metrics(&engine, &engine.metrics());
    println!();

    // 2. User toggles
    println!("[2/5] Switching on the TV and the washing machine...");
    engine.toggle_appliance("tv", true).context("toggle tv")?;
    let metrics = engine.toggle_appliance("washing", true).context("toggle washing")?;
    print_metrics(&engine, &metrics);
    println!();

    // 3. Telemetry ticks
    println!("[3/5] Running 6 telemetry ticks...\n");
    let mut telemetry = TelemetrySimulator::new(
        config.simulation.power_variation,
        Duration::from_millis(config.simulation.telemetry_interval_ms),
        DEMO_SEED,
    )?;
    println!("----------------------------------------------");
    println!("  Tick  |  Total (W)  |  Usage (kWh)  |  Cost");
    println!("----------------------------------------------");
    for i in 0..6 {
        telemetry.tick(&mut engine).context("telemetry tick")?;
        let metrics = engine.metrics();
        println!(
            "  {:>4}  | {:>10} | {:>12.1} | {:>5}",
            i + 1,
            metrics.total_active_power_watts,
            metrics.estimated_daily_usage_kwh,
            metrics.estimated_daily_cost
        );
    }
    println!("----------------------------------------------\n");

    // 4. Cycle completion
    println!("[4/5] Waiting for cyclic appliances to finish...");
    let eligible = config
        .appliances
        .iter()
        .filter(|a| a.completes_cycle)
        .map(|a| a.id.clone())
        .collect();
    let mut transitions = AutonomousTransitionSimulator::new(
        eligible,
        config.simulation.transition_probability,
        Duration::from_millis(config.simulation.transition_interval_ms),
        DEMO_SEED,
    )?;
    let mut ticks = 0;
    while ticks < 200 {
        ticks += 1;
        if let Some(id) = transitions.step(&mut engine).context("transition tick")? {
            println!("      {} finished after {} checks", id, ticks);
            break;
        }
    }
    print_appliances(&engine);
    println!();

    // 5. History and peak
    println!("[5/5] Usage history...");
    for period in [Period::Week, Period::Month] {
        let series = engine.select_period(period).clone();
        let total: f64 = series.points.iter().map(|p| p.usage_kwh).sum();
        let i18n = engine.i18n();
        let first = series.labels.first().cloned().unwrap_or_default();
        let last = series.labels.last().cloned().unwrap_or_default();
        println!(
            "      {:?}: {} points ({} .. {}), {} {:.1} {}",
            period,
            series.points.len(),
            first,
            last,
            i18n.get("series.usage"),
            total,
            i18n.get("unit.kilowatt_hours")
        );
    }
    if let Some(peak) = engine.peak_info() {
        println!(
            "      {}: {} ({:.1} {})",
            engine.i18n().get("peak.title"),
            peak.hour_range_label(engine.i18n()),
            peak.consumption_kwh,
            engine.i18n().get("unit.kilowatt_hours")
        );
    }

    println!("\n==============================================");
    println!("   Demo complete");
    println!("==============================================\n");

    Ok(())
}
