//! Core module - Configuration, errors and the shared data model

mod config;
mod error;
mod types;

pub use config::{ApplianceConfig, Config, GeneralConfig, PricingConfig, SimulationConfig};
pub use error::{Error, Result};
pub use types::{
    AggregatedMetrics, ApplianceProfile, ApplianceState, ApplianceView, ChangeCause, PeakInfo,
    Period, Series, SeriesPoint, StateChange, TopConsumer,
};
