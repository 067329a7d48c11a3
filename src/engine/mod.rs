//! Engine: owns the registry and dispatches change notifications
//!
//! Every mutation, whether it comes from a user toggle or from a simulator,
//! goes through the engine, which applies it to the registry, recomputes the
//! metrics from a settled snapshot and notifies the observers before
//! returning.

use crate::aggregation::aggregate;
use crate::core::{
    AggregatedMetrics, ApplianceView, ChangeCause, Config, Error, PeakInfo, Period, Result,
    Series, StateChange,
};
use crate::history::SeriesGenerator;
use crate::i18n::I18n;
use crate::pricing::PricingEngine;
use crate::registry::{Registry, Snapshot};

/// Seed offset for the history generator so it does not mirror the simulators
pub const HISTORY_SEED_OFFSET: u64 = 101;

type StateObserver = Box<dyn FnMut(&StateChange) + Send>;
type SeriesObserver = Box<dyn FnMut(&Series) + Send>;

/// Appliance state engine
pub struct Engine {
    registry: Registry,
    pricing: PricingEngine,
    history: SeriesGenerator,
    i18n: I18n,
    period: Period,
    series: Series,
    peak: Option<PeakInfo>,
    state_observers: Vec<StateObserver>,
    series_observers: Vec<SeriesObserver>,
}

impl Engine {
    /// Build an engine from configuration.
    ///
    /// `seed` drives the history generator; the startup hourly profile and
    /// the initial weekly series are drawn here.
    pub fn new(config: &Config, seed: u64) -> Result<Self> {
        config.validate()?;

        let registry = Registry::new(
            config
                .appliances
                .iter()
                .map(|a| (a.profile(), a.initial_state()))
                .collect(),
        )?;

        let i18n = I18n::new(&config.general.language);
        let mut history = SeriesGenerator::new(seed.wrapping_add(HISTORY_SEED_OFFSET));
        let peak = PeakInfo::from_hourly(history.hourly_profile());
        let period = Period::default();
        let series = history.generate_series(period, &i18n);

        log::info!("Engine initialized with {} appliances", registry.len());

        Ok(Self {
            registry,
            pricing: PricingEngine::new(&config.pricing),
            history,
            i18n,
            period,
            series,
            peak,
            state_observers: Vec::new(),
            series_observers: Vec::new(),
        })
    }

    /// Subscribe to state changes, called after every registry mutation
    pub fn on_state_changed<F>(&mut self, callback: F)
    where
        F: FnMut(&StateChange) + Send + 'static,
    {
        self.state_observers.push(Box::new(callback));
    }

    /// Subscribe to history series replacements
    pub fn on_series_changed<F>(&mut self, callback: F)
    where
        F: FnMut(&Series) + Send + 'static,
    {
        self.series_observers.push(Box::new(callback));
    }

    /// Subscribe to the peak hour. The profile is drawn once at startup, so
    /// the callback fires immediately and is not kept.
    pub fn on_peak_info<F>(&self, callback: F)
    where
        F: FnOnce(&PeakInfo),
    {
        if let Some(peak) = &self.peak {
            callback(peak);
        }
    }

    /// Switch an appliance on or off on behalf of the user
    pub fn toggle_appliance(&mut self, id: &str, active: bool) -> Result<AggregatedMetrics> {
        self.set_active(id, active, ChangeCause::Toggle)
    }

    /// Switch off an appliance whose cycle finished on its own.
    ///
    /// Uses the same path as a user toggle-off.
    pub fn complete_cycle(&mut self, id: &str) -> Result<AggregatedMetrics> {
        let metrics = self.set_active(id, false, ChangeCause::CycleCompleted)?;
        log::info!("{} finished its cycle", self.display_name(id));
        Ok(metrics)
    }

    fn set_active(&mut self, id: &str, active: bool, cause: ChangeCause) -> Result<AggregatedMetrics> {
        self.registry.set_active(id, active)?;
        log::debug!(
            "{} switched {} ({:?})",
            self.display_name(id),
            if active { "on" } else { "off" },
            cause
        );
        Ok(self.notify_state(cause))
    }

    /// Apply a batch of power readings, then notify once.
    ///
    /// The batch is checked up front so a bad entry leaves every reading
    /// untouched.
    pub fn record_readings(&mut self, readings: &[(String, i64)]) -> Result<Option<AggregatedMetrics>> {
        if readings.is_empty() {
            return Ok(None);
        }

        for (id, watts) in readings {
            if !self.registry.contains(id) {
                return Err(Error::NotFound(id.clone()));
            }
            if u32::try_from(*watts).is_err() {
                return Err(Error::InvalidValue(format!(
                    "power reading {} W for \"{}\" is out of range",
                    watts, id
                )));
            }
        }
        for (id, watts) in readings {
            self.registry.set_power(id, *watts)?;
        }

        Ok(Some(self.notify_state(ChangeCause::Telemetry)))
    }

    /// Change the reporting period and replace the history series
    pub fn select_period(&mut self, period: Period) -> &Series {
        self.period = period;
        log::info!("Reporting period set to {:?}", period);
        self.refresh_series()
    }

    /// Redraw the series for the current period
    pub fn refresh_series(&mut self) -> &Series {
        self.series = self.history.generate_series(self.period, &self.i18n);
        for observer in &mut self.series_observers {
            observer(&self.series);
        }
        &self.series
    }

    /// Full state as a notification payload, for the first render
    pub fn current_state(&self) -> StateChange {
        self.state_change(ChangeCause::Initial)
    }

    fn state_change(&self, cause: ChangeCause) -> StateChange {
        let snapshot = self.registry.snapshot();
        StateChange {
            cause,
            metrics: aggregate(&snapshot, &self.pricing),
            appliances: snapshot.views(),
        }
    }

    fn notify_state(&mut self, cause: ChangeCause) -> AggregatedMetrics {
        let change = self.state_change(cause);
        for observer in &mut self.state_observers {
            observer(&change);
        }
        change.metrics
    }

    fn display_name(&self, id: &str) -> String {
        self.registry
            .get(id)
            .map(|a| a.profile.name.clone())
            .unwrap_or_else(|_| id.to_string())
    }

    /// Metrics for the current state
    pub fn metrics(&self) -> AggregatedMetrics {
        aggregate(&self.registry.snapshot(), &self.pricing)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.registry.snapshot()
    }

    pub fn appliance_views(&self) -> Vec<ApplianceView> {
        self.registry.snapshot().views()
    }

    pub fn is_active(&self, id: &str) -> Result<bool> {
        self.registry.is_active(id)
    }

    pub fn current_period(&self) -> Period {
        self.period
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn peak_info(&self) -> Option<&PeakInfo> {
        self.peak.as_ref()
    }

    pub fn pricing(&self) -> &PricingEngine {
        &self.pricing
    }

    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ApplianceConfig;
    use std::sync::{Arc, Mutex};

    fn scenario_config() -> Config {
        Config {
            appliances: vec![
                ApplianceConfig::new("A", "Aircon", 850, "", true),
                ApplianceConfig::new("B", "Light", 120, "", true),
                ApplianceConfig::new("C", "TV", 200, "", false),
            ],
            ..Config::default()
        }
    }

    fn create_test_engine() -> Engine {
        let mut config = scenario_config();
        config.general.language = "en".to_string();
        Engine::new(&config, 7).unwrap()
    }

    #[test]
    fn test_rejects_bad_configuration() {
        let mut config = scenario_config();
        config.appliances.push(ApplianceConfig::new("A", "Again", 10, "", false));
        assert!(matches!(Engine::new(&config, 0), Err(Error::Configuration(_))));

        let mut config = scenario_config();
        config.appliances[0].baseline_watts = 0;
        assert!(matches!(Engine::new(&config, 0), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_toggle_notifies_with_fresh_metrics() {
        let mut engine = create_test_engine();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        engine.on_state_changed(move |change| sink.lock().unwrap().push(change.clone()));

        let metrics = engine.toggle_appliance("C", true).unwrap();
        assert_eq!(metrics.total_active_power_watts, 1170);
        assert_eq!(metrics.top_consumer.as_ref().unwrap().id, "A");
        assert_eq!(metrics.online_count, 3);
        assert_eq!(metrics.offline_count, 0);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].cause, ChangeCause::Toggle);
        assert_eq!(seen[0].metrics, metrics);
        let tv = seen[0].appliances.iter().find(|a| a.id == "C").unwrap();
        assert!(tv.is_active);
        assert_eq!(tv.power_watts, Some(200));
    }

    #[test]
    fn test_unknown_toggle_changes_nothing() {
        let mut engine = create_test_engine();
        let count = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&count);
        engine.on_state_changed(move |_| *sink.lock().unwrap() += 1);

        let before = engine.snapshot();
        assert!(matches!(engine.toggle_appliance("oven", true), Err(Error::NotFound(_))));
        assert_eq!(engine.snapshot(), before);
        assert_eq!(*count.lock().unwrap(), 0);
    }

    #[test]
    fn test_readings_apply_as_one_batch() {
        let mut engine = create_test_engine();
        let count = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&count);
        engine.on_state_changed(move |_| *sink.lock().unwrap() += 1);

        let metrics = engine
            .record_readings(&[("A".to_string(), 900), ("B".to_string(), 110)])
            .unwrap()
            .unwrap();
        assert_eq!(metrics.total_active_power_watts, 1010);
        assert_eq!(*count.lock().unwrap(), 1);

        let before = engine.snapshot();
        let bad = engine.record_readings(&[("A".to_string(), 800), ("B".to_string(), -5)]);
        assert!(matches!(bad, Err(Error::InvalidValue(_))));
        assert_eq!(engine.snapshot(), before);
        assert_eq!(*count.lock().unwrap(), 1);

        assert!(engine.record_readings(&[]).unwrap().is_none());
    }

    #[test]
    fn test_complete_cycle_matches_toggle_off() {
        let mut by_toggle = create_test_engine();
        let mut by_cycle = create_test_engine();
        let causes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&causes);
        by_cycle.on_state_changed(move |change| sink.lock().unwrap().push(change.cause));

        let toggled = by_toggle.toggle_appliance("A", false).unwrap();
        let completed = by_cycle.complete_cycle("A").unwrap();

        assert_eq!(toggled, completed);
        assert_eq!(by_toggle.appliance_views(), by_cycle.appliance_views());
        assert_eq!(*causes.lock().unwrap(), vec![ChangeCause::CycleCompleted]);
    }

    #[test]
    fn test_select_period_replaces_series() {
        let mut engine = create_test_engine();
        assert_eq!(engine.current_period(), Period::Week);
        assert_eq!(engine.series().points.len(), 7);

        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        engine.on_series_changed(move |series| sink.lock().unwrap().push(series.clone()));

        let month = engine.select_period(Period::Month).clone();
        assert_eq!(month.period, Period::Month);
        assert_eq!(month.points.len(), 30);
        assert_eq!(month.labels.len(), 30);
        assert_eq!(engine.current_period(), Period::Month);

        let week = engine.select_period(Period::Week).clone();
        assert_eq!(week.points.len(), 7);
        assert_eq!(week.labels[0], "Mon");

        let refreshed = engine.refresh_series().clone();
        assert_eq!(refreshed.period, Period::Week);
        assert_ne!(refreshed.points, week.points);

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 3);
        assert_eq!(received[0], month);
        assert_eq!(received[2], refreshed);
    }

    #[test]
    fn test_peak_info_delivered_on_subscribe() {
        let mut engine = create_test_engine();
        let received = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&received);
        engine.on_peak_info(move |peak| *sink.lock().unwrap() = Some(peak.clone()));

        let peak = received.lock().unwrap().clone().unwrap();
        assert_eq!(peak.hourly_kwh.len(), 24);
        assert!(peak.hour < 24);
        assert_eq!(Some(&peak), engine.peak_info());

        // Peak stays fixed across period switches
        engine.select_period(Period::Month);
        assert_eq!(Some(&peak), engine.peak_info());

        let mut again = None;
        engine.on_peak_info(|p| again = Some(p.hour));
        assert_eq!(again, Some(peak.hour));
    }

    #[test]
    fn test_current_state_matches_notifications() {
        let mut engine = create_test_engine();
        let initial = engine.current_state();
        assert_eq!(initial.cause, ChangeCause::Initial);
        assert_eq!(initial.metrics, engine.metrics());
        assert_eq!(initial.appliances, engine.appliance_views());

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        engine.on_state_changed(move |change| sink.lock().unwrap().push(change.clone()));
        engine.toggle_appliance("C", true).unwrap();

        // Same payload shape as every later notification
        let line = serde_json::to_string(&initial).unwrap();
        let parsed: StateChange = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, initial);
        let later = &seen.lock().unwrap()[0];
        assert_eq!(later.appliances.len(), initial.appliances.len());
        assert_ne!(later.metrics, initial.metrics);
    }

    #[test]
    fn test_activation_always_draws_power() {
        let mut engine = create_test_engine();
        engine.record_readings(&[("C".to_string(), 0)]).unwrap();

        let metrics = engine.toggle_appliance("C", true).unwrap();
        let tv = engine.appliance_views().into_iter().find(|a| a.id == "C").unwrap();
        assert!(tv.power_watts.unwrap() > 0);
        assert_eq!(metrics.online_count, 3);
    }
}
