//! Diet-specific creature state
//!
//! A creature is either a grazer (prey) or a hunter (predator). The extra
//! state each one carries lives in its variant; behavior dispatches on it.

pub mod carnivore;
pub mod herbivore;

pub use carnivore::{CarnivoreState, HuntOutcome};
pub use herbivore::HerbivoreState;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreatureKind {
    Herbivore(HerbivoreState),
    Carnivore(CarnivoreState),
}

impl CreatureKind {
    pub fn as_herbivore(&self) -> Option<&HerbivoreState> {
        match self {
            CreatureKind::Herbivore(h) => Some(h),
            CreatureKind::Carnivore(_) => None,
        }
    }

    pub fn as_carnivore(&self) -> Option<&CarnivoreState> {
        match self {
            CreatureKind::Carnivore(c) => Some(c),
            CreatureKind::Herbivore(_) => None,
        }
    }
}
