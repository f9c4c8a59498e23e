//! World - owns every creature and landscape feature

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{Coord, EntityId, Species, Tick};
use crate::ecs::grouping::Grouping;
use crate::entity::creature::Creature;
use crate::spatial::terrain::TerrainGrid;
use crate::world::loader::{Landscape, LandscapeLoader};
use std::path::Path;
use crate::world::water::WaterSource;
use ahash::{AHashMap, AHashSet};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Read access to everything placed in the world
pub trait WorldQuery {
    fn all_creatures(&self) -> &[Creature];
    fn all_water_sources(&self) -> &[WaterSource];
}

/// The game world containing all entities
pub struct World {
    pub current_tick: Tick,
    pub config: SimulationConfig,
    pub terrain: TerrainGrid,
    pub water_sources: Vec<WaterSource>,
    /// Master list in creation order; update order follows it
    creatures: Vec<Creature>,
    groupings: Vec<Grouping>,
    pub(crate) rng: ChaCha8Rng,
}

impl World {
    pub fn new(terrain: TerrainGrid, config: SimulationConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            current_tick: 0,
            config,
            terrain,
            water_sources: Vec::new(),
            creatures: Vec::new(),
            groupings: Vec::new(),
            rng,
        }
    }

    /// Build a world from a text layout
    pub fn from_layout(layout: &str, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let landscape = LandscapeLoader::new().parse(layout)?;
        Self::from_landscape(landscape, config)
    }

    /// Build a world from a layout file
    pub fn load(path: &Path, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let landscape = LandscapeLoader::new().load_from_file(path)?;
        Self::from_landscape(landscape, config)
    }

    fn from_landscape(landscape: Landscape, config: SimulationConfig) -> Result<Self> {
        let mut world = World::new(landscape.terrain, config);
        for pos in landscape.water {
            world.add_water_source(pos);
        }
        for (species, pos) in landscape.spawns {
            world.spawn(species, pos)?;
        }
        tracing::info!(
            "Loaded {}x{} landscape: {} creatures, {} water sources",
            world.terrain.width(),
            world.terrain.height(),
            world.creatures.len(),
            world.water_sources.len()
        );
        Ok(world)
    }

    pub(crate) fn next_id(&mut self) -> EntityId {
        EntityId::from_rng(&mut self.rng)
    }

    /// Place a new creature with default vitals
    pub fn spawn(&mut self, species: Species, pos: Coord) -> Result<EntityId> {
        let id = self.next_id();
        let creature = Creature::new(id, species, pos, self.config.profile(species));
        self.insert_creature(creature)
    }

    /// Append a creature to the master list, its cell and its species grouping
    pub(crate) fn insert_creature(&mut self, creature: Creature) -> Result<EntityId> {
        let id = creature.id;
        let species = creature.species;
        self.terrain.occupy(creature.position(), id, species)?;
        self.creatures.push(creature);

        let tag = species.tag();
        match self
            .groupings
            .iter_mut()
            .find(|g| g.name == tag && g.species == species)
        {
            Some(group) => {
                group.add(id);
            }
            None => {
                let mut group = Grouping::new(tag, species);
                group.add(id);
                self.groupings.push(group);
            }
        }
        Ok(id)
    }

    pub fn add_water_source(&mut self, pos: Coord) -> usize {
        self.water_sources.push(WaterSource::new(
            pos,
            self.config.water_initial_capacity,
            self.config.water_max_capacity,
        ));
        self.water_sources.len() - 1
    }

    // === LOOKUPS ===

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn entity_count(&self) -> usize {
        self.creatures.len()
    }

    pub fn count_species(&self, species: Species) -> usize {
        self.creatures.iter().filter(|c| c.species == species).count()
    }

    /// Head count per species, for summaries
    pub fn census(&self) -> AHashMap<Species, usize> {
        let mut counts = AHashMap::new();
        for creature in &self.creatures {
            *counts.entry(creature.species).or_insert(0) += 1;
        }
        counts
    }

    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.creatures.iter().position(|c| c.id == id)
    }

    pub fn creature(&self, id: EntityId) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id == id)
    }

    pub fn creature_mut(&mut self, id: EntityId) -> Option<&mut Creature> {
        self.creatures.iter_mut().find(|c| c.id == id)
    }

    pub(crate) fn creature_at_mut(&mut self, idx: usize) -> Option<&mut Creature> {
        self.creatures.get_mut(idx)
    }

    /// Two distinct creatures mutably at once
    pub(crate) fn pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut Creature, &mut Creature)> {
        if a == b || a >= self.creatures.len() || b >= self.creatures.len() {
            return None;
        }
        if a < b {
            let (left, right) = self.creatures.split_at_mut(b);
            Some((&mut left[a], &mut right[0]))
        } else {
            let (left, right) = self.creatures.split_at_mut(a);
            Some((&mut right[0], &mut left[b]))
        }
    }

    // === MOVEMENT ===

    /// Teleport a creature to a free cell
    pub fn move_creature(&mut self, id: EntityId, to: Coord) -> Result<()> {
        let idx = self.index_of(id).ok_or(SimError::EntityNotFound(id))?;
        let creature = &self.creatures[idx];
        if creature.position() == to {
            return Ok(());
        }
        self.terrain
            .relocate(creature.position(), to, id, creature.species)?;
        self.creatures[idx].set_position(to);
        Ok(())
    }

    // === GROUPINGS ===

    pub fn groupings(&self) -> &[Grouping] {
        &self.groupings
    }

    pub fn grouping(&self, name: &str) -> Option<&Grouping> {
        self.groupings.iter().find(|g| g.name == name)
    }

    /// Species tags are reserved for the default grouping of that species
    pub fn create_grouping(&mut self, name: &str, species: Species) -> Result<()> {
        if self.grouping(name).is_some() {
            return Err(SimError::DuplicateGrouping(name.to_string()));
        }
        if let Some(owner) = Species::ALL.into_iter().find(|s| s.tag() == name) {
            if owner != species {
                return Err(SimError::SpeciesMismatch {
                    grouping: name.to_string(),
                    expected: owner,
                    found: species,
                });
            }
        }
        self.groupings.push(Grouping::new(name, species));
        Ok(())
    }

    /// List an existing creature in a named grouping of its species
    pub fn add_to_grouping(&mut self, name: &str, id: EntityId) -> Result<()> {
        let species = self
            .creature(id)
            .map(|c| c.species)
            .ok_or(SimError::EntityNotFound(id))?;
        let group = self
            .groupings
            .iter_mut()
            .find(|g| g.name == name)
            .ok_or_else(|| SimError::GroupingNotFound(name.to_string()))?;
        if group.species != species {
            return Err(SimError::SpeciesMismatch {
                grouping: name.to_string(),
                expected: group.species,
                found: species,
            });
        }
        group.add(id);
        Ok(())
    }

    // === REMOVAL ===

    /// Drop creatures from the master list, every grouping and the grid
    ///
    /// Returns the removed creatures in master-list order.
    pub fn remove_creatures(&mut self, ids: &AHashSet<EntityId>) -> Vec<Creature> {
        if ids.is_empty() {
            return Vec::new();
        }

        let (removed, kept): (Vec<Creature>, Vec<Creature>) = std::mem::take(&mut self.creatures)
            .into_iter()
            .partition(|c| ids.contains(&c.id));
        self.creatures = kept;

        for group in &mut self.groupings {
            group.retain(|id| !ids.contains(&id));
        }
        for creature in &removed {
            self.terrain.vacate(creature.position(), creature.id);
        }
        removed
    }

    /// Every grouping member is in the master list and every creature
    /// occupies its own cell
    pub fn is_consistent(&self) -> bool {
        let live: AHashMap<EntityId, Species> =
            self.creatures.iter().map(|c| (c.id, c.species)).collect();
        let groupings_ok = self.groupings.iter().all(|g| {
            g.members()
                .iter()
                .all(|id| live.get(id) == Some(&g.species))
        });
        let cells_ok = self
            .creatures
            .iter()
            .all(|c| self.terrain.occupant(c.position()) == Some(c.id));
        let occupied = self
            .terrain
            .iter()
            .filter(|(_, cell)| cell.occupant.is_some())
            .count();
        groupings_ok && cells_ok && occupied == self.creatures.len()
    }

    pub fn tick(&mut self) {
        self.current_tick += 1;
    }

    /// Text map with creatures drawn over terrain
    pub fn render(&self) -> String {
        self.terrain.render()
    }
}

impl WorldQuery for World {
    fn all_creatures(&self) -> &[Creature] {
        &self.creatures
    }

    fn all_water_sources(&self) -> &[WaterSource] {
        &self.water_sources
    }
}
