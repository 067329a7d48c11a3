//! Appliance Monitor library
//!
//! Simulated household appliances: on/off state and power readings,
//! aggregated load and cost metrics, periodic telemetry and cycle
//! completion, and synthetic usage history for reporting views.

pub mod aggregation;
pub mod core;
pub mod engine;
pub mod history;
pub mod i18n;
pub mod pricing;
pub mod registry;
pub mod runtime;
pub mod simulator;
