//! World storage: the master creature list and named groupings

pub mod grouping;
pub mod world;

pub use grouping::Grouping;
pub use world::{World, WorldQuery};
