//! Generic grid for spatial data

use crate::core::types::{Coord, NEIGHBOR_OFFSETS};

/// Generic 2D grid stored row-major
#[derive(Debug, Clone)]
pub struct Grid<T: Clone + Default> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }

    #[inline]
    pub fn in_bounds(&self, pos: Coord) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    #[inline]
    fn index(&self, pos: Coord) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.width + pos.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, pos: Coord) -> Option<&T> {
        self.index(pos).map(|i| &self.data[i])
    }

    #[inline]
    pub fn get_mut(&mut self, pos: Coord) -> Option<&mut T> {
        self.index(pos).map(move |i| &mut self.data[i])
    }

    /// In-bounds 8-neighbors of `pos`, in `NEIGHBOR_OFFSETS` order
    pub fn neighbors(&self, pos: Coord) -> Vec<Coord> {
        NEIGHBOR_OFFSETS
            .iter()
            .map(|&(dx, dy)| pos.offset(dx, dy))
            .filter(|&p| self.in_bounds(p))
            .collect()
    }

    /// All in-bounds cells within Chebyshev `radius` of `pos`, excluding `pos`
    pub fn within(&self, pos: Coord, radius: i32) -> Vec<Coord> {
        let mut cells = Vec::new();
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let p = pos.offset(dx, dy);
                if self.in_bounds(p) {
                    cells.push(p);
                }
            }
        }
        cells
    }

    /// Iterate all coordinates with their values, row-major
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> + '_ {
        self.data.iter().enumerate().map(move |(i, v)| {
            (
                Coord::new((i % self.width) as i32, (i / self.width) as i32),
                v,
            )
        })
    }
}
