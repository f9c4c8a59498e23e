use crate::core::types::{Coord, EntityId, Species};
use crate::world::loader::LoadError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Entity not found: {0}")]
    EntityNotFound(EntityId),

    #[error("Grouping not found: {0}")]
    GroupingNotFound(String),

    #[error("Grouping already exists: {0}")]
    DuplicateGrouping(String),

    #[error("Grouping '{grouping}' holds {expected} but entity is {found}")]
    SpeciesMismatch {
        grouping: String,
        expected: Species,
        found: Species,
    },

    #[error("Position out of bounds: {0}")]
    OutOfBounds(Coord),

    #[error("Cell is blocked or occupied: {0}")]
    CellBlocked(Coord),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Layout error: {0}")]
    LayoutError(#[from] LoadError),
}

pub type Result<T> = std::result::Result<T, SimError>;
