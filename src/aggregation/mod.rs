//! Aggregation of a registry snapshot into dashboard metrics

use crate::core::{AggregatedMetrics, TopConsumer};
use crate::pricing::PricingEngine;
use crate::registry::Snapshot;

/// Compute metrics from a snapshot.
///
/// Pure: no caching, no side effects. Only active appliances contribute to
/// the total and the top consumer; on equal readings the appliance
/// registered first wins.
pub fn aggregate(snapshot: &Snapshot, pricing: &PricingEngine) -> AggregatedMetrics {
    let mut total_watts: u64 = 0;
    let mut online_count = 0;
    let mut top: Option<TopConsumer> = None;

    for appliance in snapshot.active() {
        online_count += 1;
        let watts = appliance.state.reading().unwrap_or(0);
        total_watts += u64::from(watts);

        let beats_current = top.as_ref().map_or(true, |t| watts > t.power_watts);
        if beats_current {
            top = Some(TopConsumer {
                id: appliance.profile.id.clone(),
                name: appliance.profile.name.clone(),
                power_watts: watts,
            });
        }
    }

    AggregatedMetrics {
        total_active_power_watts: total_watts,
        top_consumer: top,
        online_count,
        offline_count: snapshot.len() - online_count,
        estimated_daily_usage_kwh: pricing.estimate_daily_usage_kwh(total_watts),
        estimated_daily_cost: pricing.estimate_daily_cost(total_watts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ApplianceProfile, ApplianceState, PricingConfig};
    use crate::registry::Registry;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn profile(id: &str, baseline_watts: u32) -> ApplianceProfile {
        ApplianceProfile {
            id: id.to_string(),
            name: id.to_string(),
            baseline_watts,
            icon: String::new(),
            completes_cycle: false,
        }
    }

    fn scenario_registry() -> Registry {
        Registry::new(vec![
            (profile("A", 850), ApplianceState::new(true, Some(850))),
            (profile("B", 120), ApplianceState::new(true, Some(120))),
            (profile("C", 200), ApplianceState::new(false, Some(200))),
        ])
        .unwrap()
    }

    fn pricing() -> PricingEngine {
        PricingEngine::new(&PricingConfig::default())
    }

    #[test]
    fn test_reference_household() {
        let metrics = aggregate(&scenario_registry().snapshot(), &pricing());

        assert_eq!(metrics.total_active_power_watts, 970);
        let top = metrics.top_consumer.unwrap();
        assert_eq!(top.id, "A");
        assert_eq!(top.power_watts, 850);
        assert_eq!(metrics.online_count, 2);
        assert_eq!(metrics.offline_count, 1);
    }

    #[test]
    fn test_switching_on_third_appliance() {
        let mut registry = scenario_registry();
        registry.set_active("C", true).unwrap();
        let metrics = aggregate(&registry.snapshot(), &pricing());

        assert_eq!(metrics.total_active_power_watts, 1170);
        assert_eq!(metrics.top_consumer.unwrap().id, "A");
        assert_eq!(metrics.online_count, 3);
        assert_eq!(metrics.offline_count, 0);
    }

    #[test]
    fn test_daily_estimate_at_one_kilowatt() {
        let registry = Registry::new(vec![(
            profile("heater", 1000),
            ApplianceState::new(true, Some(1000)),
        )])
        .unwrap();
        let metrics = aggregate(&registry.snapshot(), &pricing());

        assert!((metrics.estimated_daily_usage_kwh - 16.5).abs() < 1e-9);
        assert_eq!(metrics.estimated_daily_cost, 99.0);
    }

    #[test]
    fn test_nothing_running() {
        let mut registry = scenario_registry();
        registry.set_active("A", false).unwrap();
        registry.set_active("B", false).unwrap();
        let metrics = aggregate(&registry.snapshot(), &pricing());

        assert_eq!(metrics.total_active_power_watts, 0);
        assert!(metrics.top_consumer.is_none());
        assert_eq!(metrics.online_count, 0);
        assert_eq!(metrics.offline_count, 3);
        assert_eq!(metrics.estimated_daily_cost, 0.0);
    }

    #[test]
    fn test_inactive_reading_is_ignored() {
        let mut registry = scenario_registry();
        registry.set_power("C", 5000).unwrap();
        let metrics = aggregate(&registry.snapshot(), &pricing());

        assert_eq!(metrics.total_active_power_watts, 970);
        assert_eq!(metrics.top_consumer.unwrap().id, "A");
    }

    #[test]
    fn test_tie_keeps_first_registered() {
        let registry = Registry::new(vec![
            (profile("first", 500), ApplianceState::new(true, Some(500))),
            (profile("second", 500), ApplianceState::new(true, Some(500))),
        ])
        .unwrap();
        let metrics = aggregate(&registry.snapshot(), &pricing());

        assert_eq!(metrics.top_consumer.unwrap().id, "first");
    }

    #[test]
    fn test_counts_partition_random_states() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut registry = Registry::new(
            (0..8)
                .map(|i| {
                    let p = profile(&format!("dev{}", i), 50 + i * 100);
                    (p, ApplianceState::default())
                })
                .collect(),
        )
        .unwrap();
        let ids: Vec<String> = registry.ids().map(str::to_string).collect();

        for _ in 0..200 {
            for id in &ids {
                registry.set_active(id, rng.random_bool(0.5)).unwrap();
            }
            let metrics = aggregate(&registry.snapshot(), &pricing());

            assert_eq!(metrics.online_count + metrics.offline_count, registry.len());
            assert_eq!(metrics.total_active_power_watts == 0, metrics.online_count == 0);
        }
    }
}
