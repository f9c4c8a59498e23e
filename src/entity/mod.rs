pub mod creature;
pub mod drinking;
pub mod events;
pub mod needs;
pub mod species;

pub use creature::Creature;
pub use events::{CreatureEvent, DeathCause, DrinkMode, Food};
pub use species::{CarnivoreState, CreatureKind, HerbivoreState, HuntOutcome};
