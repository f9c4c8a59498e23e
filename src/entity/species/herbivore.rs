//! Grazers: prey that eat vegetation and can be wounded or killed

use crate::entity::creature::Creature;
use crate::entity::events::{CreatureEvent, DeathCause, Food};
use crate::entity::species::CreatureKind;
use crate::spatial::terrain::{Terrain, Vegetation};
use serde::{Deserialize, Serialize};

/// Length of the eating animation
pub const EATING_TICKS: i32 = 3;
/// Ticks of drinking needed to shake off an injury
pub const INJURY_TICKS: i32 = 5;
/// Plain grass fills the stomach but heals nothing
pub const GRASS_HEALTH_GAIN: i32 = 0;

/// Health restored by one meal of the given vegetation
pub fn vegetation_health_gain(vegetation: Vegetation) -> i32 {
    match vegetation {
        Vegetation::Plant => 15,
        Vegetation::Bush => 20,
        Vegetation::Shrub => 25,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HerbivoreState {
    pub is_eating: bool,
    pub is_eating_plant: bool,
    pub eating_duration: i32,
    pub is_injured: bool,
    /// Only counts down while drinking
    pub injury_timer: i32,
    /// Sticky: never cleared once set, even if health is raised again
    pub is_dead: bool,
}

impl HerbivoreState {
    pub(crate) fn tick_injury(&mut self) {
        if !self.is_injured {
            return;
        }
        self.injury_timer -= 1;
        if self.injury_timer <= 0 {
            self.injury_timer = 0;
            self.is_injured = false;
        }
    }

    pub(crate) fn tick_eating(&mut self) {
        if self.eating_duration > 0 {
            self.eating_duration -= 1;
            if self.eating_duration == 0 {
                self.is_eating = false;
                self.is_eating_plant = false;
            }
        }
    }

    fn start_eating(&mut self, plant: bool) {
        self.is_eating = true;
        self.is_eating_plant = plant;
        self.eating_duration = EATING_TICKS;
    }
}

impl Creature {
    /// Subtract `amount` from health; returns true if this call killed
    ///
    /// Grazers that survive are marked injured. Damage to a dead creature
    /// does nothing.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.is_alive() {
            return false;
        }
        let from = self.health();
        let to = self.apply_health(from - amount.max(0));
        self.emit(CreatureEvent::Injured {
            entity: self.id,
            damage: from - to,
            health: to,
        });

        if to == 0 {
            self.record_death(DeathCause::Predation);
            return true;
        }

        if let CreatureKind::Herbivore(h) = &mut self.kind {
            h.is_injured = true;
            h.injury_timer = INJURY_TICKS;
        }
        false
    }

    /// Graze plain grass: hunger is reset, health is untouched
    ///
    /// Returns false for hunters and dead creatures.
    pub fn graze_grass(&mut self) -> bool {
        if !self.is_alive() {
            return false;
        }
        match &mut self.kind {
            CreatureKind::Herbivore(h) => h.start_eating(false),
            CreatureKind::Carnivore(_) => return false,
        }
        self.satisfy_hunger();
        let gain = self.heal(GRASS_HEALTH_GAIN);
        self.emit(CreatureEvent::Ate {
            entity: self.id,
            food: Food::Grass,
            health_gain: gain,
        });
        true
    }

    /// Eat one serving of `vegetation`; no health gain when already at max
    pub fn graze_specific_vegetation(&mut self, vegetation: Vegetation) -> bool {
        if !self.is_alive() {
            return false;
        }
        match &mut self.kind {
            CreatureKind::Herbivore(h) => h.start_eating(true),
            CreatureKind::Carnivore(_) => return false,
        }
        self.satisfy_hunger();
        let gain = if self.health() >= self.max_health() {
            0
        } else {
            self.heal(vegetation_health_gain(vegetation))
        };
        self.emit(CreatureEvent::Ate {
            entity: self.id,
            food: Food::Vegetation(vegetation),
            health_gain: gain,
        });
        true
    }

    /// Eat whatever vegetation `terrain` holds; false with no effect otherwise
    pub fn can_eat_at(&mut self, terrain: Terrain) -> bool {
        match terrain.vegetation() {
            Some(vegetation) => self.graze_specific_vegetation(vegetation),
            None => false,
        }
    }
}
