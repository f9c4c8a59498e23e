pub mod behavior;
pub mod population;
pub mod tick;

pub use behavior::{act, Action};
pub use population::{try_population_growth, Birth};
pub use tick::{run_simulation_tick, SimulationEvent};
