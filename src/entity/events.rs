//! Structured notifications emitted by creature state changes
//!
//! Creatures never print; every observable change lands in the creature's
//! outbox and the world drains it into the tick's event list.

use crate::core::types::{Coord, EntityId, Species};
use crate::spatial::terrain::Vegetation;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeathCause {
    OldAge,
    Dehydration,
    Starvation,
    /// Killed by a hunter
    Predation,
    /// Health driven to zero by any other mutation
    Injuries,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DrinkMode {
    /// Thirst zeroed at once
    Direct,
    /// Gradual drinking at a remembered source
    Continuous,
    /// Gulp then gradual drinking at a source
    FromSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Food {
    Grass,
    Vegetation(Vegetation),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CreatureEvent {
    HealthChanged {
        entity: EntityId,
        from: i32,
        to: i32,
    },
    ReachedMaxHealth {
        entity: EntityId,
    },
    DrinkStarted {
        entity: EntityId,
        mode: DrinkMode,
        source: Option<Coord>,
    },
    DrinkStopped {
        entity: EntityId,
    },
    Ate {
        entity: EntityId,
        food: Food,
        health_gain: i32,
    },
    Injured {
        entity: EntityId,
        damage: i32,
        health: i32,
    },
    Hunted {
        hunter: EntityId,
        prey: EntityId,
        damage: i32,
        killed: bool,
        health_gain: i32,
    },
    Died {
        entity: EntityId,
        species: Species,
        cause: DeathCause,
    },
}

impl CreatureEvent {
    /// The creature whose outbox produced this event
    pub fn subject(&self) -> EntityId {
        match self {
            CreatureEvent::HealthChanged { entity, .. }
            | CreatureEvent::ReachedMaxHealth { entity }
            | CreatureEvent::DrinkStarted { entity, .. }
            | CreatureEvent::DrinkStopped { entity }
            | CreatureEvent::Ate { entity, .. }
            | CreatureEvent::Injured { entity, .. }
            | CreatureEvent::Died { entity, .. } => *entity,
            CreatureEvent::Hunted { hunter, .. } => *hunter,
        }
    }
}
