//! Drinking and water-seeking sub-state

use crate::core::types::Coord;
use serde::{Deserialize, Serialize};

/// Thirst removed per tick while drinking
pub const DRINK_THIRST_PER_TICK: i32 = 5;
/// Health restored per tick while drinking
pub const DRINK_HEALTH_PER_TICK: i32 = 1;
/// Length of the drinking animation tail, refreshed every drinking tick
pub const DRINKING_ANIMATION_TICKS: i32 = 3;

pub const DIRECT_DRINK_TICKS: i32 = 5;
pub const CONTINUOUS_DRINK_TICKS: i32 = 10;
pub const SOURCE_DRINK_TICKS: i32 = 15;
/// Immediate thirst relief when drinking from a source
pub const SOURCE_GULP: i32 = 15;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkingState {
    pub is_drinking: bool,
    /// Ticks of drinking left
    pub duration: i32,
    /// Cosmetic countdown, independent of the drinking logic
    pub animation_counter: i32,
    /// Remembered location only; the source may have changed since
    pub last_known_water: Option<Coord>,
    pub is_moving_to_water: bool,
}

impl DrinkingState {
    /// Enter the drinking state; always drops any water-seeking intent
    pub fn begin(&mut self, duration: i32) {
        self.is_drinking = true;
        self.duration = duration;
        self.is_moving_to_water = false;
    }

    pub fn stop(&mut self) {
        self.is_drinking = false;
        self.duration = 0;
    }

    pub fn remember(&mut self, location: Coord) {
        self.last_known_water = Some(location);
    }
}
