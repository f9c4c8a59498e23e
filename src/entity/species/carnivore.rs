//! Hunters: predators that feed by attacking grazers

use crate::core::types::EntityId;
use crate::ecs::world::WorldQuery;
use crate::entity::creature::Creature;
use crate::entity::events::CreatureEvent;
use crate::entity::species::CreatureKind;
use crate::spatial::terrain::TerrainQuery;
use serde::{Deserialize, Serialize};

/// Length of the hunting animation
pub const HUNTING_TICKS: i32 = 3;
/// Cap on the health a hunt restores before the kill bonus
pub const MAX_HUNT_GAIN: i32 = 15;
/// Extra health for finishing the prey off
pub const KILL_BONUS: i32 = 10;

/// Health a hunter earns from one attack
pub fn hunt_gain(attack_power: i32, killed: bool) -> i32 {
    let base = (attack_power / 2).min(MAX_HUNT_GAIN);
    if killed {
        base + KILL_BONUS
    } else {
        base
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarnivoreState {
    pub is_hunting: bool,
    pub hunting_duration: i32,
    pub attack_power: i32,
    /// Gain earned by the latest hunt, even if it could not be applied
    pub last_health_gain: i32,
    /// Recomputed after every health change
    pub at_max_health: bool,
}

impl CarnivoreState {
    pub fn new(attack_power: i32) -> Self {
        Self {
            is_hunting: false,
            hunting_duration: 0,
            attack_power,
            last_health_gain: 0,
            at_max_health: false,
        }
    }

    pub(crate) fn tick_hunting(&mut self) {
        if self.hunting_duration > 0 {
            self.hunting_duration -= 1;
            if self.hunting_duration == 0 {
                self.is_hunting = false;
            }
        }
    }
}

/// Result of one `Creature::hunt` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HuntOutcome {
    pub prey: EntityId,
    /// Health the prey actually lost
    pub damage: i32,
    pub killed: bool,
    /// Gain earned, whether or not it was applied
    pub health_gain: i32,
    /// Gain actually added to the hunter's health
    pub applied_gain: i32,
    /// The hunter went from below max to max with this hunt
    pub reached_max_health: bool,
}

impl Creature {
    /// Attack `prey`
    ///
    /// Hunting always counts as a meal for the hunter. Returns `None` with no
    /// changes when the hunter is not a live carnivore or the target is not a
    /// live grazer.
    pub fn hunt(&mut self, prey: &mut Creature) -> Option<HuntOutcome> {
        let attack_power = match &self.kind {
            CreatureKind::Carnivore(c) => c.attack_power,
            CreatureKind::Herbivore(_) => return None,
        };
        if !self.is_alive() || !prey.is_alive() || !prey.species.is_prey() || prey.id == self.id {
            return None;
        }

        self.satisfy_hunger();
        self.refresh_health_flags();
        let was_at_max = self.health() >= self.max_health();
        if let CreatureKind::Carnivore(c) = &mut self.kind {
            c.is_hunting = true;
            c.hunting_duration = HUNTING_TICKS;
        }

        let prey_before = prey.health();
        let killed = prey.take_damage(attack_power);
        let damage = prey_before - prey.health();

        let gain = hunt_gain(attack_power, killed);
        let applied_gain = if was_at_max { 0 } else { self.heal(gain) };
        if let CreatureKind::Carnivore(c) = &mut self.kind {
            c.last_health_gain = gain;
        }
        self.refresh_health_flags();
        let reached_max_health = !was_at_max && self.health() >= self.max_health();

        self.emit(CreatureEvent::Hunted {
            hunter: self.id,
            prey: prey.id,
            damage,
            killed,
            health_gain: applied_gain,
        });
        if reached_max_health {
            self.emit(CreatureEvent::ReachedMaxHealth { entity: self.id });
        }

        Some(HuntOutcome {
            prey: prey.id,
            damage,
            killed,
            health_gain: gain,
            applied_gain,
            reached_max_health,
        })
    }

    /// First live grazer on one of the 8 surrounding cells
    ///
    /// Neighbors are scanned in fixed order; for each one whose code names a
    /// prey species the creature list is scanned for a live grazer standing
    /// exactly there. First match wins.
    pub fn find_nearby_herbivore<T, W>(&self, terrain: &T, world: &W) -> Option<EntityId>
    where
        T: TerrainQuery + ?Sized,
        W: WorldQuery + ?Sized,
    {
        if self.carnivore().is_none() {
            return None;
        }
        for cell in terrain.neighbors(self.position()) {
            let names_prey = terrain
                .cell_code_at(cell)
                .map(|code| code.is_prey())
                .unwrap_or(false);
            if !names_prey {
                continue;
            }
            let found = world
                .all_creatures()
                .iter()
                .find(|c| c.position() == cell && c.species.is_prey() && c.is_alive());
            if let Some(prey) = found {
                return Some(prey.id);
            }
        }
        None
    }
}
