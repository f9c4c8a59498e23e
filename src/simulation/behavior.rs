//! Per-creature decisions made after the lifecycle update
//!
//! Priority: keep drinking, drink from an adjacent source, walk to water,
//! feed when hungry, otherwise wander. Every target is looked up in the
//! current world state, so effects of earlier creatures are visible.

use crate::core::types::{Coord, Diet, EntityId};
use crate::ecs::world::World;
use crate::spatial::terrain::{Terrain, TerrainQuery};
use rand::Rng;

/// What a creature did with its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Dead, or nothing to do and nowhere to go
    Idle,
    /// Still drinking from an earlier start
    Drinking,
    /// Started drinking at an adjacent source
    Drank,
    /// Walked next to remembered water
    SoughtWater { to: Coord },
    /// Attacked a grazer
    Hunted { prey: EntityId },
    /// Ate what it stood on
    Grazed,
    /// Moved to a random nearby cell
    Wandered { to: Coord },
}

/// Let the creature at master-list `idx` act
pub fn act(world: &mut World, idx: usize) -> Action {
    let Some(creature) = world.creatures().get(idx) else {
        return Action::Idle;
    };
    if !creature.is_alive() {
        return Action::Idle;
    }
    if creature.drinking().is_drinking {
        return Action::Drinking;
    }
    let id = creature.id;
    let pos = creature.position();
    let thirsty = creature.is_thirsty();
    let seeks_water = creature.should_seek_water();

    if thirsty {
        let adjacent = world
            .water_sources
            .iter()
            .find(|source| source.within_reach(pos))
            .cloned();
        if let Some(source) = adjacent {
            if let Some(creature) = world.creature_at_mut(idx) {
                creature.drink_from_source(&source);
            }
            tracing::trace!("{} drinks at {}", id, source.position);
            return Action::Drank;
        }
    }

    if seeks_water {
        if let Some(action) = seek_water(world, idx) {
            return action;
        }
    }

    let hungry = world
        .creatures()
        .get(idx)
        .map(|c| c.hunger() > world.config.hunger_threshold)
        .unwrap_or(false);
    if hungry {
        if let Some(action) = feed(world, idx) {
            return action;
        }
    }

    wander(world, idx)
}

/// Walk to the first free cell beside the remembered (or nearest) water
fn seek_water(world: &mut World, idx: usize) -> Option<Action> {
    let creature = world.creatures().get(idx)?;
    let id = creature.id;

    if creature.drinking().last_known_water.is_none() {
        let nearest = creature
            .find_nearest_water_source(&*world)
            .map(|source| source.position);
        if let (Some(location), Some(creature)) = (nearest, world.creature_at_mut(idx)) {
            creature.remember_water_source(location);
        }
    }

    let creature = world.creature_at_mut(idx)?;
    if !creature.move_toward_known_water_source() {
        return None;
    }
    let target = creature.drinking().last_known_water?;

    let free = world
        .terrain
        .neighbors(target)
        .into_iter()
        .find(|&cell| world.terrain.is_free(cell));
    let Some(cell) = free else {
        if let Some(creature) = world.creature_at_mut(idx) {
            creature.cancel_water_seeking();
        }
        tracing::trace!("{} found no room beside water at {}", id, target);
        return Some(Action::Idle);
    };

    if world.move_creature(id, cell).is_err() {
        if let Some(creature) = world.creature_at_mut(idx) {
            creature.cancel_water_seeking();
        }
        return Some(Action::Idle);
    }

    let source = world
        .water_sources
        .iter()
        .find(|source| source.within_reach(cell))
        .cloned();
    if let Some(creature) = world.creature_at_mut(idx) {
        match source {
            Some(source) => creature.start_continuous_drinking(&source),
            None => creature.forget_water_source(),
        }
    }
    tracing::trace!("{} walks to water at {}", id, cell);
    Some(Action::SoughtWater { to: cell })
}

fn feed(world: &mut World, idx: usize) -> Option<Action> {
    let creature = world.creatures().get(idx)?;
    match creature.diet() {
        Diet::Carnivore => {
            let prey = creature.find_nearby_herbivore(&world.terrain, &*world)?;
            let prey_idx = world.index_of(prey)?;
            let (hunter, target) = world.pair_mut(idx, prey_idx)?;
            let outcome = hunter.hunt(target)?;
            tracing::trace!(
                "{} hunts {} for {} damage (killed: {})",
                hunter.id,
                prey,
                outcome.damage,
                outcome.killed
            );
            Some(Action::Hunted { prey })
        }
        Diet::Herbivore => {
            let ground = world.terrain.cell(creature.position())?.terrain;
            let creature = world.creature_at_mut(idx)?;
            let ate = if ground.vegetation().is_some() {
                creature.can_eat_at(ground)
            } else if ground == Terrain::Grass {
                creature.graze_grass()
            } else {
                false
            };
            ate.then_some(Action::Grazed)
        }
    }
}

fn near_carnivore(world: &World, pos: Coord) -> bool {
    world
        .creatures()
        .iter()
        .any(|c| c.diet() == Diet::Carnivore && c.is_alive() && c.position().is_adjacent(&pos))
}

/// Random free cell within the creature's speed; grazers steer clear of hunters
fn wander(world: &mut World, idx: usize) -> Action {
    let Some(creature) = world.creatures().get(idx) else {
        return Action::Idle;
    };
    let id = creature.id;
    let pos = creature.position();
    let speed = creature.profile().speed.max(0);

    let mut candidates = world.terrain.free_cells_within(pos, speed);
    if creature.diet() == Diet::Herbivore && near_carnivore(world, pos) {
        let safe: Vec<Coord> = candidates
            .iter()
            .copied()
            .filter(|&cell| !near_carnivore(world, cell))
            .collect();
        if !safe.is_empty() {
            candidates = safe;
        }
    }
    if candidates.is_empty() {
        return Action::Idle;
    }

    let to = candidates[world.rng.gen_range(0..candidates.len())];
    match world.move_creature(id, to) {
        Ok(()) => Action::Wandered { to },
        Err(_) => Action::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::Species;
    use crate::entity::drinking::{CONTINUOUS_DRINK_TICKS, SOURCE_DRINK_TICKS};

    fn world(layout: &str) -> World {
        World::from_layout(layout, SimulationConfig::default()).unwrap()
    }

    fn creature_idx(world: &World, species: Species) -> usize {
        world
            .creatures()
            .iter()
            .position(|c| c.species == species)
            .unwrap()
    }

    #[test]
    fn test_drinking_creature_does_nothing_else() {
        let mut w = world(",,,\n,D,\n,,,");
        w.creature_at_mut(0).unwrap().drink_directly();
        assert_eq!(act(&mut w, 0), Action::Drinking);
        assert_eq!(w.creatures()[0].position(), Coord::new(1, 1));
    }

    #[test]
    fn test_thirsty_beside_water_drinks_from_source() {
        let mut w = world("~D,,");
        w.creature_at_mut(0).unwrap().set_thirst(60);
        assert_eq!(act(&mut w, 0), Action::Drank);
        let deer = &w.creatures()[0];
        assert_eq!(deer.thirst(), 45);
        assert_eq!(deer.drinking().duration, SOURCE_DRINK_TICKS);
        assert_eq!(deer.drinking().last_known_water, Some(Coord::new(0, 0)));
    }

    #[test]
    fn test_thirsty_walks_to_water_and_drinks() {
        let mut w = world("~,,,,D");
        w.creature_at_mut(0).unwrap().set_thirst(60);
        assert_eq!(act(&mut w, 0), Action::SoughtWater { to: Coord::new(1, 0) });

        let deer = &w.creatures()[0];
        assert_eq!(deer.position(), Coord::new(1, 0));
        assert!(deer.drinking().is_drinking);
        assert!(!deer.drinking().is_moving_to_water);
        assert_eq!(deer.drinking().duration, CONTINUOUS_DRINK_TICKS);
        assert_eq!(w.terrain.occupant(Coord::new(1, 0)), Some(deer.id));
        assert_eq!(w.terrain.occupant(Coord::new(5, 0)), None);
    }

    #[test]
    fn test_blocked_water_cancels_seeking() {
        let mut w = world("~#,\n##,\n,D,");
        w.creature_at_mut(0).unwrap().set_thirst(60);
        assert_eq!(act(&mut w, 0), Action::Idle);
        let deer = &w.creatures()[0];
        assert_eq!(deer.position(), Coord::new(1, 2));
        assert!(!deer.drinking().is_moving_to_water);
        assert_eq!(deer.drinking().last_known_water, Some(Coord::new(0, 0)));
    }

    #[test]
    fn test_hungry_hunter_attacks_neighbor() {
        let mut w = world("WD,");
        let wolf = creature_idx(&w, Species::Wolf);
        let deer_id = w.creatures()[creature_idx(&w, Species::Deer)].id;
        w.creature_at_mut(wolf).unwrap().set_hunger(50);

        assert_eq!(act(&mut w, wolf), Action::Hunted { prey: deer_id });
        assert_eq!(w.creature(deer_id).unwrap().health(), 80);
        assert_eq!(w.creatures()[wolf].hunger(), 0);
    }

    #[test]
    fn test_sated_hunter_leaves_prey_alone() {
        let mut w = world("WD,\n,,,");
        let wolf = creature_idx(&w, Species::Wolf);
        let deer_id = w.creatures()[creature_idx(&w, Species::Deer)].id;
        assert!(matches!(act(&mut w, wolf), Action::Wandered { .. }));
        assert_eq!(w.creature(deer_id).unwrap().health(), 100);
    }

    #[test]
    fn test_hungry_grazer_eats_vegetation_underfoot() {
        let mut w = world(",R,");
        w.terrain.set_terrain(Coord::new(1, 0), Terrain::Bush);
        {
            let rabbit = w.creature_at_mut(0).unwrap();
            rabbit.set_hunger(50);
            rabbit.set_health(30);
        }
        assert_eq!(act(&mut w, 0), Action::Grazed);
        assert_eq!(w.creatures()[0].health(), 50);
        assert_eq!(w.creatures()[0].hunger(), 0);
    }

    #[test]
    fn test_hungry_grazer_on_grass() {
        let mut w = world(",R,");
        w.creature_at_mut(0).unwrap().set_hunger(50);
        assert_eq!(act(&mut w, 0), Action::Grazed);
        assert_eq!(w.creatures()[0].hunger(), 0);
    }

    #[test]
    fn test_wander_stays_within_speed() {
        let mut w = world(",,,,,,,\n,,,,,,,\n,,,,,,,\n,,,D,,,\n,,,,,,,\n,,,,,,,\n,,,,,,,");
        let start = Coord::new(3, 3);
        let speed = w.creatures()[0].profile().speed;
        match act(&mut w, 0) {
            Action::Wandered { to } => {
                assert!(to.chebyshev(&start) <= speed);
                assert_ne!(to, start);
            }
            other => panic!("expected wandering, got {:?}", other),
        }
        assert!(w.is_consistent());
    }

    #[test]
    fn test_grazer_flees_from_hunter() {
        for seed in 0..20 {
            let config = SimulationConfig::default().with_seed(seed);
            let mut w = World::from_layout(",,,,,,\nWR,,,,\n,,,,,,", config).unwrap();
            let rabbit = creature_idx(&w, Species::Rabbit);
            act(&mut w, rabbit);
            let pos = w.creatures()[rabbit].position();
            assert!(!pos.is_adjacent(&Coord::new(0, 1)), "seed {} ended at {}", seed, pos);
        }
    }

    #[test]
    fn test_dead_creature_is_idle() {
        let mut w = world(",D,");
        w.creature_at_mut(0).unwrap().set_health(0);
        assert_eq!(act(&mut w, 0), Action::Idle);
        assert_eq!(act(&mut w, 7), Action::Idle);
    }
}
