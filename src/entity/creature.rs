//! Creature: the shared lifecycle state machine
//!
//! Every creature ages, gets hungry and thirsty, drinks, and dies of old age
//! or lost health. Diet-specific behavior lives in `entity::species` and
//! dispatches on `CreatureKind`.

use crate::core::config::SpeciesProfile;
use crate::core::types::{Coord, Diet, EntityId, Species};
use crate::ecs::world::WorldQuery;
use crate::entity::drinking::{
    DrinkingState, CONTINUOUS_DRINK_TICKS, DIRECT_DRINK_TICKS, DRINKING_ANIMATION_TICKS,
    DRINK_HEALTH_PER_TICK, DRINK_THIRST_PER_TICK, SOURCE_DRINK_TICKS, SOURCE_GULP,
};
use crate::entity::events::{CreatureEvent, DeathCause, DrinkMode};
use crate::entity::needs::{Vitals, HUNGER_PER_TICK, STARVATION_THRESHOLD};
use crate::entity::species::{CarnivoreState, CreatureKind, HerbivoreState};
use crate::world::water::WaterSource;
use ordered_float::OrderedFloat;

#[derive(Debug, Clone)]
pub struct Creature {
    pub id: EntityId,
    pub species: Species,
    position: Coord,
    vitals: Vitals,
    drinking: DrinkingState,
    profile: SpeciesProfile,
    pub(crate) kind: CreatureKind,
    death_cause: Option<DeathCause>,
    outbox: Vec<CreatureEvent>,
}

impl Creature {
    /// A fresh creature with default vitals taken from its profile
    pub fn new(id: EntityId, species: Species, position: Coord, profile: &SpeciesProfile) -> Self {
        let kind = match species.diet() {
            Diet::Herbivore => CreatureKind::Herbivore(HerbivoreState::default()),
            Diet::Carnivore => CreatureKind::Carnivore(CarnivoreState::new(profile.attack_power)),
        };
        let mut creature = Self {
            id,
            species,
            position,
            vitals: Vitals::new(profile.starting_health.clamp(0, profile.max_health)),
            drinking: DrinkingState::default(),
            profile: profile.clone(),
            kind,
            death_cause: None,
            outbox: Vec::new(),
        };
        creature.refresh_health_flags();
        creature
    }

    // === ACCESSORS ===

    pub fn position(&self) -> Coord {
        self.position
    }

    /// Replace the position wholesale; grid occupancy is the caller's job
    pub(crate) fn set_position(&mut self, position: Coord) {
        self.position = position;
    }

    pub fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    pub fn age(&self) -> u32 {
        self.vitals.age
    }

    pub fn health(&self) -> i32 {
        self.vitals.health
    }

    pub fn hunger(&self) -> i32 {
        self.vitals.hunger
    }

    pub fn thirst(&self) -> i32 {
        self.vitals.thirst
    }

    pub fn max_health(&self) -> i32 {
        self.profile.max_health
    }

    pub fn profile(&self) -> &SpeciesProfile {
        &self.profile
    }

    pub fn drinking(&self) -> &DrinkingState {
        &self.drinking
    }

    pub fn kind(&self) -> &CreatureKind {
        &self.kind
    }

    pub fn herbivore(&self) -> Option<&HerbivoreState> {
        self.kind.as_herbivore()
    }

    pub fn carnivore(&self) -> Option<&CarnivoreState> {
        self.kind.as_carnivore()
    }

    pub fn diet(&self) -> Diet {
        self.species.diet()
    }

    pub fn death_cause(&self) -> Option<DeathCause> {
        self.death_cause
    }

    /// Take every pending event, oldest first
    pub fn drain_events(&mut self) -> Vec<CreatureEvent> {
        std::mem::take(&mut self.outbox)
    }

    pub fn pending_events(&self) -> &[CreatureEvent] {
        &self.outbox
    }

    pub(crate) fn emit(&mut self, event: CreatureEvent) {
        self.outbox.push(event);
    }

    // === LIFE AND DEATH ===

    /// Alive while young enough and healthy; grazers also honor sticky death
    pub fn is_alive(&self) -> bool {
        let base = self.vitals.age < self.profile.lifespan && self.vitals.health > 0;
        match &self.kind {
            CreatureKind::Herbivore(h) => base && !h.is_dead,
            CreatureKind::Carnivore(_) => base,
        }
    }

    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    /// Clamp and store health, then refresh every flag derived from it
    ///
    /// Emits nothing; callers decide which event describes the change.
    pub(crate) fn apply_health(&mut self, value: i32) -> i32 {
        self.vitals.health = value.clamp(0, self.profile.max_health);
        self.refresh_health_flags();
        self.vitals.health
    }

    pub(crate) fn refresh_health_flags(&mut self) {
        let health = self.vitals.health;
        let max = self.profile.max_health;
        match &mut self.kind {
            CreatureKind::Herbivore(h) => {
                if health <= 0 {
                    h.is_dead = true;
                }
            }
            CreatureKind::Carnivore(c) => c.at_max_health = health >= max,
        }
    }

    /// Set health directly (healing, scripted damage); no-op once dead
    pub fn set_health(&mut self, value: i32) {
        if !self.is_alive() {
            return;
        }
        let from = self.vitals.health;
        let to = self.apply_health(value);
        if from != to {
            self.emit(CreatureEvent::HealthChanged {
                entity: self.id,
                from,
                to,
            });
        }
        self.record_death(DeathCause::Injuries);
    }

    /// Raise health by `amount` up to the maximum; returns the gain applied
    pub(crate) fn heal(&mut self, amount: i32) -> i32 {
        let from = self.vitals.health;
        let to = self.apply_health(from.saturating_add(amount.max(0)));
        if to != from {
            self.emit(CreatureEvent::HealthChanged {
                entity: self.id,
                from,
                to,
            });
        }
        to - from
    }

    /// Overwrite thirst (clamped); no-op once dead
    pub fn set_thirst(&mut self, value: i32) {
        if self.is_alive() {
            self.vitals.set_thirst(value);
        }
    }

    /// Overwrite hunger (never below 0); no-op once dead
    pub fn set_hunger(&mut self, value: i32) {
        if self.is_alive() {
            self.vitals.hunger = value.max(0);
        }
    }

    /// Eating of any kind resets hunger
    pub(crate) fn satisfy_hunger(&mut self) {
        self.vitals.hunger = 0;
    }

    /// Emit `Died` the first time the creature is observed dead
    pub(crate) fn record_death(&mut self, fallback: DeathCause) {
        if self.death_cause.is_some() || self.is_alive() {
            return;
        }
        let cause = if self.vitals.age >= self.profile.lifespan {
            DeathCause::OldAge
        } else {
            fallback
        };
        self.death_cause = Some(cause);
        self.emit(CreatureEvent::Died {
            entity: self.id,
            species: self.species,
            cause,
        });
    }

    // === PER-TICK UPDATE ===

    /// Advance this creature by one tick
    pub fn update(&mut self) {
        if !self.is_alive() {
            return;
        }

        let health_before = self.vitals.health;

        self.vitals.age += 1;
        self.vitals.hunger = self.vitals.hunger.saturating_add(HUNGER_PER_TICK);
        self.vitals.add_thirst(self.profile.thirst_increase_rate);

        if self.drinking.is_drinking {
            self.vitals.reduce_thirst(DRINK_THIRST_PER_TICK);
            self.apply_health(self.vitals.health + DRINK_HEALTH_PER_TICK);
            self.drinking.duration -= 1;
            self.drinking.animation_counter = DRINKING_ANIMATION_TICKS;
            if let CreatureKind::Herbivore(h) = &mut self.kind {
                h.tick_injury();
            }
            if self.vitals.thirst <= 0 || self.drinking.duration <= 0 {
                self.drinking.stop();
                self.emit(CreatureEvent::DrinkStopped { entity: self.id });
            }
        } else if self.drinking.animation_counter > 0 {
            self.drinking.animation_counter -= 1;
        }

        let thirst_penalty = self.vitals.thirst_penalty();
        let hunger_penalty = self.vitals.hunger_penalty();
        self.apply_health(self.vitals.health - thirst_penalty - hunger_penalty);

        match &mut self.kind {
            CreatureKind::Herbivore(h) => h.tick_eating(),
            CreatureKind::Carnivore(c) => c.tick_hunting(),
        }

        if self.vitals.health != health_before {
            self.emit(CreatureEvent::HealthChanged {
                entity: self.id,
                from: health_before,
                to: self.vitals.health,
            });
        }

        let cause = if thirst_penalty >= hunger_penalty {
            DeathCause::Dehydration
        } else {
            DeathCause::Starvation
        };
        self.record_death(cause);
    }

    // === DRINKING ===

    /// Drink without a source: thirst is gone immediately
    pub fn drink_directly(&mut self) {
        if !self.is_alive() {
            return;
        }
        self.vitals.set_thirst(0);
        self.drinking.begin(DIRECT_DRINK_TICKS);
        self.emit(CreatureEvent::DrinkStarted {
            entity: self.id,
            mode: DrinkMode::Direct,
            source: None,
        });
    }

    /// Start gradual drinking at `source`, remembering where it is
    pub fn start_continuous_drinking(&mut self, source: &WaterSource) {
        if !self.is_alive() {
            return;
        }
        self.drinking.begin(CONTINUOUS_DRINK_TICKS);
        self.drinking.remember(source.position);
        self.emit(CreatureEvent::DrinkStarted {
            entity: self.id,
            mode: DrinkMode::Continuous,
            source: Some(source.position),
        });
    }

    /// Gulp from `source` then keep drinking for a while
    pub fn drink_from_source(&mut self, source: &WaterSource) {
        if !self.is_alive() {
            return;
        }
        self.drinking.begin(SOURCE_DRINK_TICKS);
        self.vitals.reduce_thirst(SOURCE_GULP);
        self.drinking.remember(source.position);
        self.emit(CreatureEvent::DrinkStarted {
            entity: self.id,
            mode: DrinkMode::FromSource,
            source: Some(source.position),
        });
    }

    // === WATER SEEKING ===

    pub fn is_thirsty(&self) -> bool {
        self.vitals.thirst > self.profile.thirst_threshold
    }

    pub fn should_seek_water(&self) -> bool {
        self.is_thirsty() && !self.drinking.is_drinking && !self.drinking.is_moving_to_water
    }

    /// Commit to walking to the remembered water location
    ///
    /// Returns false with no change when nothing is remembered or the
    /// creature is already drinking. The move itself is done by the caller.
    pub fn move_toward_known_water_source(&mut self) -> bool {
        if !self.is_alive() || self.drinking.is_drinking {
            return false;
        }
        if self.drinking.last_known_water.is_none() {
            return false;
        }
        self.drinking.is_moving_to_water = true;
        true
    }

    pub fn cancel_water_seeking(&mut self) {
        self.drinking.is_moving_to_water = false;
    }

    pub fn remember_water_source(&mut self, location: Coord) {
        self.drinking.remember(location);
    }

    /// Forget a remembered location that turned out to be stale
    pub fn forget_water_source(&mut self) {
        self.drinking.last_known_water = None;
        self.drinking.is_moving_to_water = false;
    }

    /// Closest water source by straight-line distance; ties keep the first
    pub fn find_nearest_water_source<'w, W>(&self, world: &'w W) -> Option<&'w WaterSource>
    where
        W: WorldQuery + ?Sized,
    {
        world
            .all_water_sources()
            .iter()
            .min_by_key(|source| OrderedFloat(self.position.distance(&source.position)))
    }

    // === REPRODUCTION ===

    /// A newborn of the same species at this creature's position
    ///
    /// The child starts from the profile defaults, not from a copy of the
    /// parent's current state.
    pub fn reproduce(&self, child_id: EntityId) -> Creature {
        Creature::new(child_id, self.species, self.position, &self.profile)
    }

    /// Old enough, healthy and not in need
    pub fn can_reproduce(&self) -> bool {
        self.is_alive()
            && self.vitals.age >= self.profile.maturity_age
            && self.vitals.health * 2 >= self.profile.max_health
            && !self.is_thirsty()
            && self.vitals.hunger <= STARVATION_THRESHOLD / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;

    fn deer() -> Creature {
        let config = SimulationConfig::default();
        Creature::new(EntityId::new(), Species::Deer, Coord::new(2, 2), config.profile(Species::Deer))
    }

    fn wolf() -> Creature {
        let config = SimulationConfig::default();
        Creature::new(EntityId::new(), Species::Wolf, Coord::new(0, 0), config.profile(Species::Wolf))
    }

    #[test]
    fn test_new_creature_defaults() {
        let d = deer();
        assert_eq!(d.age(), 0);
        assert_eq!(d.health(), 100);
        assert_eq!(d.hunger(), 0);
        assert_eq!(d.thirst(), 0);
        assert!(d.is_alive());
        assert!(!d.drinking().is_drinking);
        assert!(d.drinking().last_known_water.is_none());
    }

    #[test]
    fn test_update_saturates_extreme_hunger() {
        let mut w = wolf();
        w.set_hunger(i32::MAX - 1);
        w.update();
        assert_eq!(w.hunger(), i32::MAX);
        assert_eq!(w.age(), 1);
        w.update();
        assert_eq!(w.hunger(), i32::MAX);
    }

    #[test]
    fn test_update_ages_and_accumulates_needs() {
        let mut d = deer();
        d.update();
        assert_eq!(d.age(), 1);
        assert_eq!(d.hunger(), HUNGER_PER_TICK);
        assert_eq!(d.thirst(), d.profile().thirst_increase_rate);
        assert_eq!(d.health(), 100);
    }

    #[test]
    fn test_severe_thirst_costs_ten() {
        let mut d = deer();
        d.set_thirst(95);
        d.update();
        assert_eq!(d.health(), 90);
    }

    #[test]
    fn test_thirst_and_hunger_penalties_stack() {
        let mut d = deer();
        d.set_thirst(95);
        d.set_hunger(80);
        d.update();
        // hunger is 85 after the tick, so both apply
        assert_eq!(d.health(), 85);
    }

    #[test]
    fn test_moderate_and_mild_thirst() {
        let mut d = deer();
        d.set_thirst(70);
        d.update();
        assert_eq!(d.health(), 97);

        let mut d = deer();
        d.set_thirst(50);
        d.update();
        assert_eq!(d.health(), 99);
    }

    #[test]
    fn test_drinking_tick() {
        let mut d = deer();
        d.set_health(50);
        d.set_thirst(40);
        let pond = WaterSource::new(Coord::new(3, 2), 50.0, 100.0);
        d.start_continuous_drinking(&pond);
        d.update();
        // +2 thirst, -5 drinking
        assert_eq!(d.thirst(), 37);
        assert_eq!(d.health(), 51);
        assert_eq!(d.drinking().duration, CONTINUOUS_DRINK_TICKS - 1);
        assert_eq!(d.drinking().animation_counter, DRINKING_ANIMATION_TICKS);
    }

    #[test]
    fn test_drinking_stops_when_duration_runs_out() {
        let mut d = deer();
        d.set_thirst(100);
        let pond = WaterSource::new(Coord::new(3, 2), 50.0, 100.0);
        d.start_continuous_drinking(&pond);
        for _ in 0..CONTINUOUS_DRINK_TICKS {
            d.update();
        }
        assert!(!d.drinking().is_drinking);
        assert_eq!(d.drinking().duration, 0);
        assert!(d
            .pending_events()
            .iter()
            .any(|e| matches!(e, CreatureEvent::DrinkStopped { .. })));
    }

    #[test]
    fn test_drinking_stops_when_thirst_quenched() {
        let mut d = deer();
        d.set_thirst(3);
        let pond = WaterSource::new(Coord::new(3, 2), 50.0, 100.0);
        d.start_continuous_drinking(&pond);
        d.update();
        assert_eq!(d.thirst(), 0);
        assert!(!d.drinking().is_drinking);
    }

    #[test]
    fn test_animation_tail_counts_down_after_drinking() {
        let mut d = deer();
        d.drink_directly();
        d.update(); // thirst 0 after drinking, stops
        assert!(!d.drinking().is_drinking);
        assert_eq!(d.drinking().animation_counter, DRINKING_ANIMATION_TICKS);
        d.update();
        assert_eq!(d.drinking().animation_counter, DRINKING_ANIMATION_TICKS - 1);
    }

    #[test]
    fn test_drink_directly() {
        let mut d = deer();
        d.set_thirst(88);
        d.drink_directly();
        assert_eq!(d.thirst(), 0);
        assert!(d.drinking().is_drinking);
        assert_eq!(d.drinking().duration, DIRECT_DRINK_TICKS);
    }

    #[test]
    fn test_drink_from_source_gulps() {
        let mut d = deer();
        d.set_thirst(60);
        let pond = WaterSource::new(Coord::new(7, 7), 50.0, 100.0);
        d.drink_from_source(&pond);
        assert_eq!(d.thirst(), 45);
        assert_eq!(d.drinking().duration, SOURCE_DRINK_TICKS);
        assert_eq!(d.drinking().last_known_water, Some(Coord::new(7, 7)));

        d.set_thirst(5);
        d.drink_from_source(&pond);
        assert_eq!(d.thirst(), 0);
    }

    #[test]
    fn test_last_drinking_call_wins() {
        let mut d = deer();
        let pond = WaterSource::new(Coord::new(7, 7), 50.0, 100.0);
        d.drink_from_source(&pond);
        d.start_continuous_drinking(&pond);
        assert_eq!(d.drinking().duration, CONTINUOUS_DRINK_TICKS);
        d.drink_directly();
        assert_eq!(d.drinking().duration, DIRECT_DRINK_TICKS);
    }

    #[test]
    fn test_should_seek_water_transitions() {
        let mut d = deer();
        d.set_thirst(41);
        assert!(d.should_seek_water());

        d.remember_water_source(Coord::new(9, 9));
        assert!(d.move_toward_known_water_source());
        assert!(!d.should_seek_water());

        d.cancel_water_seeking();
        assert!(d.should_seek_water());

        d.drink_directly();
        assert!(!d.should_seek_water());
        assert!(!d.drinking().is_moving_to_water);
    }

    #[test]
    fn test_move_toward_without_memory() {
        let mut d = deer();
        d.set_thirst(41);
        assert!(d.should_seek_water());
        assert!(!d.move_toward_known_water_source());
        assert!(!d.drinking().is_moving_to_water);
    }

    #[test]
    fn test_drinking_never_overlaps_moving() {
        let mut d = deer();
        d.remember_water_source(Coord::new(1, 1));
        assert!(d.move_toward_known_water_source());
        let pond = WaterSource::new(Coord::new(1, 1), 50.0, 100.0);
        d.drink_from_source(&pond);
        assert!(d.drinking().is_drinking);
        assert!(!d.drinking().is_moving_to_water);
        assert!(!d.move_toward_known_water_source());
        assert!(!d.drinking().is_moving_to_water);
    }

    #[test]
    fn test_death_by_old_age() {
        let mut d = deer();
        let lifespan = d.profile().lifespan;
        for _ in 0..lifespan {
            d.drink_directly();
            d.set_hunger(0);
            d.update();
        }
        assert!(!d.is_alive());
        assert_eq!(d.death_cause(), Some(DeathCause::OldAge));
    }

    #[test]
    fn test_dead_creature_is_frozen() {
        let mut w = wolf();
        w.set_health(0);
        assert!(!w.is_alive());
        let before = *w.vitals();
        w.update();
        w.drink_directly();
        w.set_thirst(50);
        assert_eq!(*w.vitals(), before);
    }

    #[test]
    fn test_health_clamped_to_max() {
        let mut w = wolf();
        w.set_health(10_000);
        assert_eq!(w.health(), w.max_health());
        w.set_health(-5);
        assert_eq!(w.health(), 0);
    }

    #[test]
    fn test_died_event_emitted_once() {
        let mut w = wolf();
        w.set_health(3);
        w.set_thirst(100);
        w.update();
        w.update();
        let deaths = w
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, CreatureEvent::Died { .. }))
            .count();
        assert_eq!(deaths, 1);
        assert_eq!(w.death_cause(), Some(DeathCause::Dehydration));
    }

    #[test]
    fn test_starvation_cause() {
        let mut w = wolf();
        w.set_health(5);
        w.set_hunger(200);
        w.update();
        assert_eq!(w.death_cause(), Some(DeathCause::Starvation));
    }

    #[test]
    fn test_find_nearest_water_source_first_minimum_wins() {
        struct Ponds(Vec<WaterSource>, Vec<Creature>);
        impl WorldQuery for Ponds {
            fn all_creatures(&self) -> &[Creature] {
                &self.1
            }
            fn all_water_sources(&self) -> &[WaterSource] {
                &self.0
            }
        }

        let d = deer(); // at (2, 2)
        let ponds = Ponds(vec![
            WaterSource::new(Coord::new(9, 9), 10.0, 10.0),
            WaterSource::new(Coord::new(4, 2), 10.0, 10.0),
            WaterSource::new(Coord::new(0, 2), 10.0, 10.0),
        ], Vec::new());
        let nearest = d.find_nearest_water_source(&ponds).unwrap();
        assert_eq!(nearest.position, Coord::new(4, 2));

        let empty = Ponds(Vec::new(), Vec::new());
        assert!(d.find_nearest_water_source(&empty).is_none());
    }

    #[test]
    fn test_reproduce_gives_fresh_same_species() {
        let mut parent = deer();
        for _ in 0..10 {
            parent.update();
        }
        let child = parent.reproduce(EntityId::new());
        assert_eq!(child.species, Species::Deer);
        assert_eq!(child.position(), parent.position());
        assert_eq!(child.age(), 0);
        assert_eq!(child.hunger(), 0);
        assert_eq!(child.thirst(), 0);
        assert_eq!(child.health(), parent.profile().starting_health);
        assert!(matches!(child.kind(), CreatureKind::Herbivore(_)));

        let cub = wolf().reproduce(EntityId::new());
        assert!(matches!(cub.kind(), CreatureKind::Carnivore(_)));
    }
}
