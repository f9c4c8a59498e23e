//! Load landscapes from text layouts
//!
//! One row per line, every row the same width. Terrain symbols map through
//! `Terrain::from_symbol`; a species symbol places that creature on grass.
//! Blank lines may surround the layout but not split it. Rows in errors are
//! 0-based line numbers of the source text.

use crate::core::types::{Coord, Species};
use crate::spatial::terrain::{Terrain, TerrainGrid};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a layout
#[derive(Debug, Error)]
pub enum LoadError {
    /// No non-blank rows
    #[error("layout is empty")]
    Empty,
    /// A blank line between two rows of the layout
    #[error("blank line {row} inside the layout")]
    BlankRow { row: usize },
    /// A row's width differs from the first row
    #[error("line {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Symbol is neither terrain nor a species
    #[error("unknown symbol '{symbol}' at line {row}, column {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },
    /// File I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Parsed layout, ready to populate a world
#[derive(Debug, Clone)]
pub struct Landscape {
    pub terrain: TerrainGrid,
    /// Creatures to spawn, in reading order
    pub spawns: Vec<(Species, Coord)>,
    /// Every water cell, in reading order
    pub water: Vec<Coord>,
}

#[derive(Debug, Default)]
pub struct LandscapeLoader;

impl LandscapeLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn load_from_file(&self, path: &Path) -> Result<Landscape, LoadError> {
        let content = std::fs::read_to_string(path)?;
        self.parse(&content)
    }

    pub fn parse(&self, layout: &str) -> Result<Landscape, LoadError> {
        let lines: Vec<(usize, &str)> = layout
            .lines()
            .map(str::trim_end)
            .enumerate()
            .skip_while(|(_, line)| line.is_empty())
            .collect();
        let end = lines
            .iter()
            .rposition(|(_, line)| !line.is_empty())
            .ok_or(LoadError::Empty)?;
        let lines = &lines[..=end];

        if let Some(&(row, _)) = lines.iter().find(|(_, line)| line.is_empty()) {
            return Err(LoadError::BlankRow { row });
        }

        let rows: Vec<(usize, Vec<char>)> = lines
            .iter()
            .map(|&(line_no, line)| (line_no, line.chars().collect()))
            .collect();

        let width = rows[0].1.len();
        if let Some((row, found)) = rows
            .iter()
            .map(|(line_no, r)| (*line_no, r.len()))
            .find(|&(_, len)| len != width)
        {
            return Err(LoadError::RaggedRow {
                row,
                expected: width,
                found,
            });
        }

        let mut terrain = TerrainGrid::new(width, rows.len());
        let mut spawns = Vec::new();
        let mut water = Vec::new();

        for (y, (line_no, row)) in rows.iter().enumerate() {
            for (x, &symbol) in row.iter().enumerate() {
                let pos = Coord::new(x as i32, y as i32);
                if let Some(species) = Species::from_symbol(symbol) {
                    terrain.set_terrain(pos, Terrain::Grass);
                    spawns.push((species, pos));
                    continue;
                }
                let ground = Terrain::from_symbol(symbol).ok_or(LoadError::UnknownSymbol {
                    symbol,
                    row: *line_no,
                    col: x,
                })?;
                terrain.set_terrain(pos, ground);
                if ground == Terrain::Water {
                    water.push(pos);
                }
            }
        }

        Ok(Landscape {
            terrain,
            spawns,
            water,
        })
    }
}
