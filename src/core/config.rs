//! Simulation configuration with documented constants
//!
//! All tunable numbers live here. The fixed lifecycle constants (hunger per
//! tick, thirst penalty tiers, drink durations) are part of the creature
//! state machine and live next to it in `entity`.

use crate::core::error::{Result, SimError};
use crate::core::types::Species;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-species constants copied into every creature at spawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesProfile {
    /// Upper bound for health
    pub max_health: i32,
    /// Health a newly spawned or newborn creature starts with
    pub starting_health: i32,
    /// Age (in ticks) at which the creature dies of old age
    pub lifespan: u32,
    /// Thirst gained per tick
    pub thirst_increase_rate: i32,
    /// Thirst above this value makes the creature thirsty
    pub thirst_threshold: i32,
    /// Maximum cells moved per tick while wandering
    pub speed: i32,
    /// Market value; carried as data only
    pub price: u32,
    /// Damage dealt per hunt (carnivores only, 0 for grazers)
    pub attack_power: i32,
    /// Minimum age before reproducing
    pub maturity_age: u32,
    /// Chance per tick that an eligible adult produces offspring
    pub reproduction_chance: f64,
}

impl SpeciesProfile {
    pub fn rabbit() -> Self {
        Self {
            max_health: 60,
            starting_health: 60,
            lifespan: 300,
            thirst_increase_rate: 3,
            thirst_threshold: 40,
            speed: 2,
            price: 15,
            attack_power: 0,
            maturity_age: 40,
            reproduction_chance: 0.02,
        }
    }

    pub fn deer() -> Self {
        Self {
            max_health: 100,
            starting_health: 100,
            lifespan: 500,
            thirst_increase_rate: 2,
            thirst_threshold: 40,
            speed: 1,
            price: 50,
            attack_power: 0,
            maturity_age: 80,
            reproduction_chance: 0.01,
        }
    }

    pub fn wolf() -> Self {
        Self {
            max_health: 120,
            starting_health: 100,
            lifespan: 450,
            thirst_increase_rate: 2,
            thirst_threshold: 50,
            speed: 2,
            price: 120,
            attack_power: 20,
            maturity_age: 100,
            reproduction_chance: 0.006,
        }
    }

    pub fn fox() -> Self {
        Self {
            max_health: 80,
            starting_health: 70,
            lifespan: 350,
            thirst_increase_rate: 3,
            thirst_threshold: 45,
            speed: 2,
            price: 60,
            attack_power: 12,
            maturity_age: 60,
            reproduction_chance: 0.01,
        }
    }

    fn validate(&self, species: Species) -> Result<()> {
        if self.max_health <= 0 {
            return Err(SimError::InvalidConfig(format!(
                "{species}: max_health must be positive"
            )));
        }
        if self.starting_health <= 0 || self.starting_health > self.max_health {
            return Err(SimError::InvalidConfig(format!(
                "{species}: starting_health ({}) must be in 1..={}",
                self.starting_health, self.max_health
            )));
        }
        if self.lifespan == 0 {
            return Err(SimError::InvalidConfig(format!(
                "{species}: lifespan must be positive"
            )));
        }
        if !(0..=100).contains(&self.thirst_threshold) {
            return Err(SimError::InvalidConfig(format!(
                "{species}: thirst_threshold ({}) must be within 0..=100",
                self.thirst_threshold
            )));
        }
        if self.thirst_increase_rate < 0 || self.speed < 0 || self.attack_power < 0 {
            return Err(SimError::InvalidConfig(format!(
                "{species}: rates, speed and attack_power must not be negative"
            )));
        }
        if !(0.0..=1.0).contains(&self.reproduction_chance) {
            return Err(SimError::InvalidConfig(format!(
                "{species}: reproduction_chance must be a probability"
            )));
        }
        Ok(())
    }
}

/// Configuration for the simulation systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the world rng (ids, wandering, reproduction rolls)
    pub seed: u64,

    // === BEHAVIOR ===
    /// Hunger above this makes a creature look for food
    ///
    /// Hunger grows by 5 per tick and starts hurting above 80, so the
    /// default leaves about 8 ticks to find a meal before it costs health.
    pub hunger_threshold: i32,

    // === WATER ===
    /// Water sources refill once every this many ticks (they evaporate every tick)
    pub water_refill_interval: u64,
    /// Capacity of a water source when the layout is loaded
    pub water_initial_capacity: f64,
    /// Ceiling for water source capacity
    pub water_max_capacity: f64,

    // === POPULATION ===
    /// No births once the master list holds this many creatures
    pub max_population: usize,

    // === SPECIES ===
    pub rabbit: SpeciesProfile,
    pub deer: SpeciesProfile,
    pub wolf: SpeciesProfile,
    pub fox: SpeciesProfile,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            hunger_threshold: 40,
            water_refill_interval: 3,
            water_initial_capacity: 100.0,
            water_max_capacity: 200.0,
            max_population: 500,
            rabbit: SpeciesProfile::rabbit(),
            deer: SpeciesProfile::deer(),
            wolf: SpeciesProfile::wolf(),
            fox: SpeciesProfile::fox(),
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seed override
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn profile(&self, species: Species) -> &SpeciesProfile {
        match species {
            Species::Rabbit => &self.rabbit,
            Species::Deer => &self.deer,
            Species::Wolf => &self.wolf,
            Species::Fox => &self.fox,
        }
    }

    /// Parse a TOML document; missing keys fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(0..=100).contains(&self.hunger_threshold) {
            return Err(SimError::InvalidConfig(format!(
                "hunger_threshold ({}) must be within 0..=100",
                self.hunger_threshold
            )));
        }

        if self.water_refill_interval == 0 {
            return Err(SimError::InvalidConfig(
                "water_refill_interval must be at least 1".into(),
            ));
        }

        if !self.water_max_capacity.is_finite() || self.water_max_capacity < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "water_max_capacity ({}) must be a finite, non-negative number",
                self.water_max_capacity
            )));
        }

        if !self.water_initial_capacity.is_finite()
            || self.water_initial_capacity < 0.0
            || self.water_initial_capacity > self.water_max_capacity
        {
            return Err(SimError::InvalidConfig(format!(
                "water_initial_capacity ({}) must be within 0..={}",
                self.water_initial_capacity, self.water_max_capacity
            )));
        }

        for species in Species::ALL {
            self.profile(species).validate(species)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_profile_lookup() {
        let config = SimulationConfig::default();
        assert_eq!(config.profile(Species::Wolf).attack_power, 20);
        assert_eq!(config.profile(Species::Deer).attack_power, 0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimulationConfig::from_toml_str("seed = 99\nhunger_threshold = 30\n").unwrap();
        assert_eq!(config.seed, 99);
        assert_eq!(config.hunger_threshold, 30);
        assert_eq!(config.deer, SpeciesProfile::deer());
    }

    #[test]
    fn test_invalid_toml_values_rejected() {
        let err = SimulationConfig::from_toml_str("water_refill_interval = 0\n").unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));

        for bad in [
            "water_max_capacity = nan\n",
            "water_max_capacity = -1.0\n",
            "water_max_capacity = inf\n",
            "water_initial_capacity = nan\n",
        ] {
            let err = SimulationConfig::from_toml_str(bad).unwrap_err();
            assert!(matches!(err, SimError::InvalidConfig(_)), "{}", bad);
        }

        let err = SimulationConfig::from_toml_str("seed = \"abc\"\n").unwrap_err();
        assert!(matches!(err, SimError::TomlError(_)));
    }

    #[test]
    fn test_bad_species_profile_rejected() {
        let mut config = SimulationConfig::default();
        config.fox.starting_health = config.fox.max_health + 1;
        assert!(config.validate().is_err());
    }
}
