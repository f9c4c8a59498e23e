//! Population growth system
//!
//! Mature, healthy creatures occasionally produce a newborn on a free cell
//! next to them. Growth stops at the configured population cap.

use crate::core::types::{Coord, EntityId, Species};
use crate::ecs::world::World;
use crate::spatial::terrain::TerrainQuery;
use rand::Rng;

/// One successful birth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Birth {
    pub parent: EntityId,
    pub child: EntityId,
    pub species: Species,
    pub position: Coord,
}

/// Give every eligible creature one chance to reproduce
///
/// Parents are visited in master-list order; newborns join the end of the
/// list and their species grouping, and do not reproduce this tick.
pub fn try_population_growth(world: &mut World) -> Vec<Birth> {
    let mut births = Vec::new();
    let parents = world.entity_count();

    for idx in 0..parents {
        if world.entity_count() >= world.config.max_population {
            break;
        }
        let Some(parent) = world.creatures().get(idx) else {
            break;
        };
        if !parent.can_reproduce() {
            continue;
        }
        let chance = parent.profile().reproduction_chance.clamp(0.0, 1.0);
        let parent_id = parent.id;
        let spot = world
            .terrain
            .neighbors(parent.position())
            .into_iter()
            .find(|&cell| world.terrain.is_free(cell));
        let Some(spot) = spot else {
            continue;
        };
        if !world.rng.gen_bool(chance) {
            continue;
        }

        let child_id = world.next_id();
        let Some(parent) = world.creatures().get(idx) else {
            break;
        };
        let mut child = parent.reproduce(child_id);
        let species = child.species;
        child.set_position(spot);

        match world.insert_creature(child) {
            Ok(_) => {
                tracing::debug!("{} {} born at {} to {}", species, child_id, spot, parent_id);
                births.push(Birth {
                    parent: parent_id,
                    child: child_id,
                    species,
                    position: spot,
                });
            }
            Err(e) => tracing::warn!("Birth at {} failed: {}", spot, e),
        }
    }

    births
}
