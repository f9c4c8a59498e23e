//! Vitals: the numeric needs that drive the lifecycle

use serde::{Deserialize, Serialize};

/// Hunger gained every tick
pub const HUNGER_PER_TICK: i32 = 5;
/// Hunger above this costs health every tick
pub const STARVATION_THRESHOLD: i32 = 80;
pub const STARVATION_DAMAGE: i32 = 5;
/// Thirst is kept within 0..=MAX_THIRST
pub const MAX_THIRST: i32 = 100;

/// Age, health, hunger and thirst of one creature
///
/// Health bounds depend on the creature's profile, so health is clamped by
/// the owner; thirst bounds are universal and clamped here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    pub age: u32,
    pub health: i32,
    /// Grows without bound, reset by eating
    pub hunger: i32,
    pub thirst: i32,
}

impl Vitals {
    pub fn new(health: i32) -> Self {
        Self {
            age: 0,
            health,
            hunger: 0,
            thirst: 0,
        }
    }

    pub fn add_thirst(&mut self, amount: i32) {
        self.thirst = self.thirst.saturating_add(amount).clamp(0, MAX_THIRST);
    }

    pub fn reduce_thirst(&mut self, amount: i32) {
        self.add_thirst(amount.saturating_neg());
    }

    pub fn set_thirst(&mut self, value: i32) {
        self.thirst = value.clamp(0, MAX_THIRST);
    }

    /// Health lost this tick from thirst; tiers do not stack with each other
    pub fn thirst_penalty(&self) -> i32 {
        if self.thirst > 90 {
            10
        } else if self.thirst > 70 {
            3
        } else if self.thirst > 50 {
            1
        } else {
            0
        }
    }

    /// Health lost this tick from hunger; stacks with the thirst penalty
    pub fn hunger_penalty(&self) -> i32 {
        if self.hunger > STARVATION_THRESHOLD {
            STARVATION_DAMAGE
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirst_clamped() {
        let mut v = Vitals::new(10);
        v.add_thirst(250);
        assert_eq!(v.thirst, MAX_THIRST);
        v.reduce_thirst(500);
        assert_eq!(v.thirst, 0);
        v.set_thirst(-3);
        assert_eq!(v.thirst, 0);
    }

    #[test]
    fn test_huge_thirst_increase_saturates() {
        let mut v = Vitals::new(10);
        v.set_thirst(MAX_THIRST);
        v.add_thirst(i32::MAX);
        assert_eq!(v.thirst, MAX_THIRST);
        v.add_thirst(i32::MIN);
        assert_eq!(v.thirst, 0);
    }

    #[test]
    fn test_thirst_penalty_tiers() {
        let mut v = Vitals::new(10);
        for (thirst, penalty) in [(50, 0), (51, 1), (70, 1), (71, 3), (90, 3), (91, 10), (100, 10)] {
            v.set_thirst(thirst);
            assert_eq!(v.thirst_penalty(), penalty, "thirst {}", thirst);
        }
    }

    #[test]
    fn test_hunger_penalty() {
        let mut v = Vitals::new(10);
        v.hunger = 80;
        assert_eq!(v.hunger_penalty(), 0);
        v.hunger = 81;
        assert_eq!(v.hunger_penalty(), STARVATION_DAMAGE);
    }
}
