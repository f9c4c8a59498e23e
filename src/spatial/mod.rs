pub mod grid;
pub mod terrain;

pub use grid::Grid;
pub use terrain::{Cell, CellCode, Terrain, TerrainGrid, TerrainQuery, Vegetation};
