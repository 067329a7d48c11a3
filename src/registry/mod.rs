//! Appliance registry
//!
//! Single source of truth for appliance profiles and their mutable state.
//! Appliances keep their insertion order, which is also the tie-break order
//! used when ranking consumers.

use crate::core::{ApplianceProfile, ApplianceState, ApplianceView, Error, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// A registered appliance: shared immutable profile plus its current state
#[derive(Debug, Clone, PartialEq)]
pub struct Appliance {
    pub profile: Arc<ApplianceProfile>,
    pub state: ApplianceState,
}

impl Appliance {
    pub fn id(&self) -> &str {
        &self.profile.id
    }

    pub fn view(&self) -> ApplianceView {
        ApplianceView {
            id: self.profile.id.clone(),
            name: self.profile.name.clone(),
            icon: self.profile.icon.clone(),
            is_active: self.state.is_active,
            power_watts: self.state.reading(),
        }
    }
}

/// Point-in-time copy of every appliance, unaffected by later mutations
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    appliances: Vec<Appliance>,
}

impl Snapshot {
    pub fn new(appliances: Vec<Appliance>) -> Self {
        Self { appliances }
    }

    /// Appliances in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Appliance> {
        self.appliances.iter()
    }

    pub fn active(&self) -> impl Iterator<Item = &Appliance> {
        self.appliances.iter().filter(|a| a.state.is_active)
    }

    pub fn get(&self, id: &str) -> Option<&Appliance> {
        self.appliances.iter().find(|a| a.id() == id)
    }

    pub fn len(&self) -> usize {
        self.appliances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appliances.is_empty()
    }

    pub fn views(&self) -> Vec<ApplianceView> {
        self.appliances.iter().map(Appliance::view).collect()
    }
}

/// Owner of all appliance state
pub struct Registry {
    appliances: Vec<Appliance>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Seed the registry with a fixed set of appliances and their initial state.
    ///
    /// Fails with a configuration error on an empty set, an empty or duplicate
    /// id, or a zero baseline.
    pub fn new(entries: Vec<(ApplianceProfile, ApplianceState)>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::Configuration(
                "Registry needs at least one appliance".to_string(),
            ));
        }

        let mut appliances = Vec::with_capacity(entries.len());
        let mut index = HashMap::with_capacity(entries.len());

        for (profile, mut state) in entries {
            if profile.id.is_empty() {
                return Err(Error::Configuration("Appliance id must not be empty".to_string()));
            }
            if profile.baseline_watts == 0 {
                return Err(Error::Configuration(format!(
                    "Appliance \"{}\" must have a positive baseline power",
                    profile.id
                )));
            }
            if index.contains_key(&profile.id) {
                return Err(Error::Configuration(format!(
                    "Duplicate appliance id \"{}\"",
                    profile.id
                )));
            }

            if state.is_active && matches!(state.power_watts, None | Some(0)) {
                state.power_watts = Some(profile.baseline_watts);
            }

            index.insert(profile.id.clone(), appliances.len());
            appliances.push(Appliance {
                profile: Arc::new(profile),
                state,
            });
        }

        Ok(Self { appliances, index })
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Switch an appliance on or off.
    ///
    /// Switching on an appliance that has no usable reading seeds it with
    /// the baseline, so a running appliance always draws power.
    pub fn set_active(&mut self, id: &str, active: bool) -> Result<()> {
        let pos = self.position(id)?;
        let appliance = &mut self.appliances[pos];

        appliance.state.is_active = active;
        if active && matches!(appliance.state.power_watts, None | Some(0)) {
            appliance.state.power_watts = Some(appliance.profile.baseline_watts);
        }

        Ok(())
    }

    /// Store an instantaneous reading. Negative or oversized values are rejected.
    pub fn set_power(&mut self, id: &str, watts: i64) -> Result<()> {
        let pos = self.position(id)?;
        let watts = u32::try_from(watts).map_err(|_| {
            Error::InvalidValue(format!("power reading {} W for \"{}\" is out of range", watts, id))
        })?;

        self.appliances[pos].state.power_watts = Some(watts);
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.appliances.clone())
    }

    pub fn get(&self, id: &str) -> Result<&Appliance> {
        let pos = self.position(id)?;
        Ok(&self.appliances[pos])
    }

    pub fn is_active(&self, id: &str) -> Result<bool> {
        self.get(id).map(|a| a.state.is_active)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Registered ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.appliances.iter().map(Appliance::id)
    }

    pub fn len(&self) -> usize {
        self.appliances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appliances.is_empty()
    }
}
