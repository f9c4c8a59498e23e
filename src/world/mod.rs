//! Landscape features and text layout loading

pub mod loader;
pub mod water;

pub use loader::{Landscape, LandscapeLoader, LoadError};
pub use water::WaterSource;
