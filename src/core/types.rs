//! Common types used across the engine

use serde::{Deserialize, Serialize};

/// Static description of an appliance, fixed for the process lifetime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplianceProfile {
    /// Unique key (e.g. "aircon")
    pub id: String,
    /// Display name
    pub name: String,
    /// Nominal draw in watts, always positive
    pub baseline_watts: u32,
    /// Opaque icon label for the presentation layer
    pub icon: String,
    /// Whether the appliance runs finite cycles the simulator may auto-complete
    #[serde(default)]
    pub completes_cycle: bool,
}

/// Mutable on/off state and last reading of an appliance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplianceState {
    pub is_active: bool,
    /// Last instantaneous reading in watts, `None` until one has been set
    pub power_watts: Option<u32>,
}

impl ApplianceState {
    pub fn new(is_active: bool, power_watts: Option<u32>) -> Self {
        Self { is_active, power_watts }
    }

    /// Reading that counts toward totals. Inactive appliances report nothing
    /// even when a stale value is retained.
    pub fn reading(&self) -> Option<u32> {
        if self.is_active {
            self.power_watts
        } else {
            None
        }
    }
}

/// Per-appliance display state handed to observers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplianceView {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub is_active: bool,
    /// Current draw, only present while active
    pub power_watts: Option<u32>,
}

/// The active appliance drawing the most power
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopConsumer {
    pub id: String,
    pub name: String,
    pub power_watts: u32,
}

/// Metrics derived from a registry snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedMetrics {
    /// Sum of the readings of active appliances
    pub total_active_power_watts: u64,
    /// `None` when nothing is running
    pub top_consumer: Option<TopConsumer>,
    pub online_count: usize,
    pub offline_count: usize,
    /// Daily usage at the current load, one decimal place
    pub estimated_daily_usage_kwh: f64,
    /// Daily cost at the current load, whole currency units
    pub estimated_daily_cost: f64,
}

impl AggregatedMetrics {
    pub fn appliance_count(&self) -> usize {
        self.online_count + self.offline_count
    }
}

/// Reporting granularity for the history chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Week,
    Month,
}

impl Period {
    /// Number of points a series for this period holds
    pub fn point_count(self) -> usize {
        match self {
            Period::Week => 7,
            Period::Month => 30,
        }
    }
}

/// One synthetic history sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub usage_kwh: f64,
    pub cost: f64,
}

/// History series for a period, with one category label per point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub period: Period,
    pub labels: Vec<String>,
    pub points: Vec<SeriesPoint>,
}

/// Peak hour of the synthetic hourly load profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakInfo {
    /// Hour of day (0-23) with the highest load
    pub hour: u32,
    /// Load during that hour in kWh
    pub consumption_kwh: f64,
    /// The full 24-point profile the peak was taken from
    pub hourly_kwh: Vec<f64>,
}

/// What triggered a state notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeCause {
    /// Full state sent before any mutation
    Initial,
    /// Explicit user toggle
    Toggle,
    /// Periodic power reading update
    Telemetry,
    /// Appliance finished its cycle on its own
    CycleCompleted,
}

/// Payload delivered to state observers after every mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateChange {
    pub cause: ChangeCause,
    pub metrics: AggregatedMetrics,
    pub appliances: Vec<ApplianceView>,
}
