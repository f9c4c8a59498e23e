pub mod config;
pub mod error;
pub mod types;

pub use config::{SimulationConfig, SpeciesProfile};
pub use error::{Result, SimError};
