//! Water sources creatures drink from
//!
//! A source slowly evaporates every tick and refills on a fixed interval.
//! Capacity is informational: drinking neither checks nor depletes it.

use crate::core::types::Coord;
use serde::{Deserialize, Serialize};

/// Capacity gained per refill
pub const REFILL_AMOUNT: f64 = 10.0;
/// Capacity lost per evaporation
pub const EVAPORATION_AMOUNT: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterSource {
    pub position: Coord,
    pub capacity: f64,
    pub max_capacity: f64,
}

impl WaterSource {
    pub fn new(position: Coord, capacity: f64, max_capacity: f64) -> Self {
        Self {
            position,
            capacity: capacity.max(0.0).min(max_capacity),
            max_capacity,
        }
    }

    pub fn refill(&mut self) {
        self.capacity = (self.capacity + REFILL_AMOUNT).min(self.max_capacity);
    }

    pub fn evaporate(&mut self) {
        self.capacity = (self.capacity - EVAPORATION_AMOUNT).max(0.0);
    }

    pub fn is_dry(&self) -> bool {
        self.capacity <= 0.0
    }

    /// Creature standing at `pos` can reach this source
    pub fn within_reach(&self, pos: Coord) -> bool {
        self.position.chebyshev(&pos) <= 1
    }
}
