//! Wildgrid - grid ecosystem of grazers and hunters

pub mod core;
pub mod ecs;
pub mod entity;
pub mod simulation;
pub mod spatial;
pub mod world;
