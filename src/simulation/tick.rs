//! Tick system - orchestrates simulation updates
//!
//! update + act per creature -> purge the dead -> water -> births -> advance
//!
//! Each tick processes every creature once in master-list order.

use crate::core::types::{Coord, EntityId, Species};
use crate::ecs::world::World;
use crate::entity::events::CreatureEvent;
use crate::simulation::behavior;
use crate::simulation::population::{try_population_growth, Birth};
use ahash::AHashSet;
use serde::Serialize;

/// Events generated during a simulation tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SimulationEvent {
    /// Forwarded from a creature's outbox
    Creature(CreatureEvent),
    /// A dead creature was purged from the world
    Removed {
        entity: EntityId,
        species: Species,
        position: Coord,
        tick: u64,
    },
    Born {
        parent: EntityId,
        child: EntityId,
        species: Species,
        position: Coord,
        tick: u64,
    },
    WaterRefilled {
        position: Coord,
        capacity: f64,
    },
}

/// Run a single simulation tick
pub fn run_simulation_tick(world: &mut World) -> Vec<SimulationEvent> {
    let mut events = Vec::new();

    update_creatures(world, &mut events);
    purge_dead(world, &mut events);
    cycle_water(world, &mut events);

    let tick = world.current_tick;
    for Birth {
        parent,
        child,
        species,
        position,
    } in try_population_growth(world)
    {
        events.push(SimulationEvent::Born {
            parent,
            child,
            species,
            position,
            tick,
        });
    }

    world.tick();
    events
}

/// Update then act, creature by creature; later creatures see earlier effects
fn update_creatures(world: &mut World, events: &mut Vec<SimulationEvent>) {
    let count = world.entity_count();
    for idx in 0..count {
        let Some(creature) = world.creature_at_mut(idx) else {
            break;
        };
        if !creature.is_alive() {
            continue;
        }
        creature.update();

        let action = behavior::act(world, idx);
        tracing::trace!("creature {} -> {:?}", idx, action);

        drain(world, idx, events);
        if let behavior::Action::Hunted { prey } = action {
            if let Some(prey_idx) = world.index_of(prey) {
                drain(world, prey_idx, events);
            }
        }
    }
}

fn drain(world: &mut World, idx: usize, events: &mut Vec<SimulationEvent>) {
    if let Some(creature) = world.creature_at_mut(idx) {
        events.extend(creature.drain_events().into_iter().map(SimulationEvent::Creature));
    }
}

/// Remove every dead creature in the same tick it died
fn purge_dead(world: &mut World, events: &mut Vec<SimulationEvent>) {
    let dead: AHashSet<EntityId> = world
        .creatures()
        .iter()
        .filter(|c| c.is_dead())
        .map(|c| c.id)
        .collect();
    if dead.is_empty() {
        return;
    }

    let tick = world.current_tick;
    for mut creature in world.remove_creatures(&dead) {
        events.extend(creature.drain_events().into_iter().map(SimulationEvent::Creature));
        tracing::debug!(
            "{} {} removed at {} (cause: {:?})",
            creature.species,
            creature.id,
            creature.position(),
            creature.death_cause()
        );
        events.push(SimulationEvent::Removed {
            entity: creature.id,
            species: creature.species,
            position: creature.position(),
            tick,
        });
    }
}

/// Evaporate every tick, refill on the configured interval
fn cycle_water(world: &mut World, events: &mut Vec<SimulationEvent>) {
    let interval = world.config.water_refill_interval.max(1);
    let refill = (world.current_tick + 1) % interval == 0;
    for source in &mut world.water_sources {
        source.evaporate();
        if refill {
            source.refill();
            events.push(SimulationEvent::WaterRefilled {
                position: source.position,
                capacity: source.capacity,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::entity::events::DeathCause;
    use crate::world::water::{EVAPORATION_AMOUNT, REFILL_AMOUNT};

    #[test]
    fn test_tick_advances() {
        let mut world = World::from_layout(",,,\n,D,\n,,,", SimulationConfig::default()).unwrap();
        run_simulation_tick(&mut world);
        assert_eq!(world.current_tick, 1);
        assert_eq!(world.creatures()[0].age(), 1);
    }

    #[test]
    fn test_dead_are_purged_in_the_same_tick() {
        let mut world = World::from_layout(",,,\n,D,\n,,,", SimulationConfig::default()).unwrap();
        let id = world.creatures()[0].id;
        world.creature_mut(id).unwrap().set_health(1);
        world.creature_mut(id).unwrap().set_thirst(100);

        let events = run_simulation_tick(&mut world);
        assert_eq!(world.entity_count(), 0);
        assert_eq!(world.terrain.occupant(Coord::new(1, 1)), None);
        assert!(!world.grouping("deer").unwrap().contains(id));
        assert!(events.iter().any(|e| matches!(
            e,
            SimulationEvent::Creature(CreatureEvent::Died {
                cause: DeathCause::Dehydration,
                ..
            })
        )));
        assert!(events
            .iter()
            .any(|e| matches!(e, SimulationEvent::Removed { entity, .. } if *entity == id)));
    }

    #[test]
    fn test_kill_is_purged_with_prey_events() {
        let mut world = World::from_layout("WD,", SimulationConfig::default()).unwrap();
        let wolf = world.creatures()[0].id;
        let deer = world.creatures()[1].id;
        world.creature_mut(wolf).unwrap().set_hunger(50);
        world.creature_mut(deer).unwrap().set_health(15);

        let events = run_simulation_tick(&mut world);
        assert!(world.creature(deer).is_none());
        assert_eq!(world.entity_count(), 1);

        let hunted = events
            .iter()
            .position(|e| matches!(e, SimulationEvent::Creature(CreatureEvent::Hunted { killed: true, .. })))
            .unwrap();
        let died = events
            .iter()
            .position(|e| matches!(
                e,
                SimulationEvent::Creature(CreatureEvent::Died {
                    cause: DeathCause::Predation,
                    ..
                })
            ))
            .unwrap();
        assert!(hunted < died);
    }

    #[test]
    fn test_water_cycle() {
        let mut config = SimulationConfig::default();
        config.water_refill_interval = 3;
        let mut world = World::from_layout("~,,", config).unwrap();
        let start = world.water_sources[0].capacity;

        let mut refills = 0;
        for _ in 0..3 {
            refills += run_simulation_tick(&mut world)
                .iter()
                .filter(|e| matches!(e, SimulationEvent::WaterRefilled { .. }))
                .count();
        }
        assert_eq!(refills, 1);
        let expected = start - 3.0 * EVAPORATION_AMOUNT + REFILL_AMOUNT;
        assert!((world.water_sources[0].capacity - expected).abs() < 1e-9);
    }

    #[test]
    fn test_consistency_holds_over_many_ticks() {
        let layout = ",,,,,,,,,\n,R,,,D,,,\n,,~~,,,W,\n,,~~,,,,,\n,F,,,R,,,\n,,,,,,,,,";
        let mut world = World::from_layout(layout, SimulationConfig::default()).unwrap();
        for _ in 0..150 {
            run_simulation_tick(&mut world);
            assert!(world.is_consistent());
            assert!(world.creatures().iter().all(|c| c.is_alive()));
        }
    }
}
