//! Static terrain plus cell occupancy

use crate::core::error::{Result, SimError};
use crate::core::types::{Coord, Diet, EntityId, Species};
use crate::spatial::grid::Grid;
use serde::{Deserialize, Serialize};

/// Ground type of a cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Dirt,
    Grass,
    Plant,
    Bush,
    Shrub,
    Water,
    Rock,
}

/// Edible vegetation a grazer can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vegetation {
    Plant,
    Bush,
    Shrub,
}

impl Terrain {
    pub fn symbol(&self) -> char {
        match self {
            Terrain::Dirt => '.',
            Terrain::Grass => ',',
            Terrain::Plant => 'p',
            Terrain::Bush => 'b',
            Terrain::Shrub => 's',
            Terrain::Water => '~',
            Terrain::Rock => '#',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Terrain::Dirt),
            ',' => Some(Terrain::Grass),
            'p' => Some(Terrain::Plant),
            'b' => Some(Terrain::Bush),
            's' => Some(Terrain::Shrub),
            '~' => Some(Terrain::Water),
            '#' => Some(Terrain::Rock),
            _ => None,
        }
    }

    /// Creatures can stand here
    pub fn is_passable(&self) -> bool {
        !matches!(self, Terrain::Water | Terrain::Rock)
    }

    pub fn vegetation(&self) -> Option<Vegetation> {
        match self {
            Terrain::Plant => Some(Vegetation::Plant),
            Terrain::Bush => Some(Vegetation::Bush),
            Terrain::Shrub => Some(Vegetation::Shrub),
            _ => None,
        }
    }
}

/// What a cell reports when queried: the occupant if any, else the ground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellCode {
    Terrain(Terrain),
    Occupied(Species),
}

impl CellCode {
    /// True when the code names a prey species
    pub fn is_prey(&self) -> bool {
        matches!(self, CellCode::Occupied(s) if s.diet() == Diet::Herbivore)
    }

    pub fn symbol(&self) -> char {
        match self {
            CellCode::Terrain(t) => t.symbol(),
            CellCode::Occupied(s) => s.symbol(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub terrain: Terrain,
    pub occupant: Option<(EntityId, Species)>,
}

impl Cell {
    pub fn code(&self) -> CellCode {
        match self.occupant {
            Some((_, species)) => CellCode::Occupied(species),
            None => CellCode::Terrain(self.terrain),
        }
    }

    /// Passable and empty
    pub fn is_free(&self) -> bool {
        self.terrain.is_passable() && self.occupant.is_none()
    }
}

/// Read-only terrain lookups used by behavior decisions
///
/// Out-of-bounds positions yield `None` rather than an error.
pub trait TerrainQuery {
    fn cell_code_at(&self, pos: Coord) -> Option<CellCode>;
    fn terrain_at(&self, pos: Coord) -> Option<Terrain>;
    fn neighbors(&self, pos: Coord) -> Vec<Coord>;
}

/// The world's terrain layer with one occupant slot per cell
#[derive(Debug, Clone)]
pub struct TerrainGrid {
    cells: Grid<Cell>,
}

impl TerrainGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Grid::new(width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.cells.width
    }

    pub fn height(&self) -> usize {
        self.cells.height
    }

    pub fn in_bounds(&self, pos: Coord) -> bool {
        self.cells.in_bounds(pos)
    }

    pub fn cell(&self, pos: Coord) -> Option<&Cell> {
        self.cells.get(pos)
    }

    pub fn set_terrain(&mut self, pos: Coord, terrain: Terrain) {
        if let Some(cell) = self.cells.get_mut(pos) {
            cell.terrain = terrain;
        }
    }

    pub fn is_free(&self, pos: Coord) -> bool {
        self.cells.get(pos).map(Cell::is_free).unwrap_or(false)
    }

    pub fn occupant(&self, pos: Coord) -> Option<EntityId> {
        self.cells.get(pos).and_then(|c| c.occupant.map(|(id, _)| id))
    }

    /// Mark a free cell as occupied
    pub fn occupy(&mut self, pos: Coord, id: EntityId, species: Species) -> Result<()> {
        let cell = self.cells.get_mut(pos).ok_or(SimError::OutOfBounds(pos))?;
        if !cell.is_free() {
            return Err(SimError::CellBlocked(pos));
        }
        cell.occupant = Some((id, species));
        Ok(())
    }

    /// Clear the occupant slot if it holds `id`
    pub fn vacate(&mut self, pos: Coord, id: EntityId) {
        if let Some(cell) = self.cells.get_mut(pos) {
            if matches!(cell.occupant, Some((occupant, _)) if occupant == id) {
                cell.occupant = None;
            }
        }
    }

    /// Move an occupant; fails without changes if the destination is not free
    pub fn relocate(&mut self, from: Coord, to: Coord, id: EntityId, species: Species) -> Result<()> {
        if !self.is_free(to) {
            return Err(SimError::CellBlocked(to));
        }
        self.vacate(from, id);
        self.occupy(to, id, species)
    }

    /// Free passable cells within Chebyshev `radius`, row-major
    pub fn free_cells_within(&self, pos: Coord, radius: i32) -> Vec<Coord> {
        self.cells
            .within(pos, radius)
            .into_iter()
            .filter(|&p| self.is_free(p))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> + '_ {
        self.cells.iter()
    }

    /// One line per row using cell symbols
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width() + 1) * self.height());
        for (pos, cell) in self.iter() {
            out.push(cell.code().symbol());
            if pos.x as usize == self.width() - 1 {
                out.push('\n');
            }
        }
        out
    }
}

impl TerrainQuery for TerrainGrid {
    fn cell_code_at(&self, pos: Coord) -> Option<CellCode> {
        self.cells.get(pos).map(Cell::code)
    }

    fn terrain_at(&self, pos: Coord) -> Option<Terrain> {
        self.cells.get(pos).map(|c| c.terrain)
    }

    fn neighbors(&self, pos: Coord) -> Vec<Coord> {
        self.cells.neighbors(pos)
    }
}
