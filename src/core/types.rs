//! Core type definitions used throughout the codebase

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Draw an id from a caller-owned rng so seeded runs stay reproducible
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(uuid::Builder::from_random_bytes(rng.gen()).into_uuid())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First block of the uuid is plenty for logs
        let s = self.0.simple().to_string();
        write!(f, "{}", &s[..8])
    }
}

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Integer grid position
///
/// Positions are values: moving an entity replaces its `Coord`, it never
/// mutates one in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// A new coordinate shifted by the given delta
    pub const fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Euclidean distance
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// King-move distance (8-connected)
    pub fn chebyshev(&self, other: &Self) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// True for the 8 surrounding cells, false for self
    pub fn is_adjacent(&self, other: &Self) -> bool {
        self.chebyshev(other) == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// What a species eats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diet {
    /// Grazers; valid prey for carnivores
    Herbivore,
    /// Hunters
    Carnivore,
}

/// Species enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Rabbit,
    Deer,
    Wolf,
    Fox,
}

impl Species {
    pub const ALL: [Species; 4] = [Species::Rabbit, Species::Deer, Species::Wolf, Species::Fox];

    pub fn diet(&self) -> Diet {
        match self {
            Species::Rabbit | Species::Deer => Diet::Herbivore,
            Species::Wolf | Species::Fox => Diet::Carnivore,
        }
    }

    pub fn is_prey(&self) -> bool {
        self.diet() == Diet::Herbivore
    }

    /// Lowercase tag, also the name of the species' default grouping
    pub fn tag(&self) -> &'static str {
        match self {
            Species::Rabbit => "rabbit",
            Species::Deer => "deer",
            Species::Wolf => "wolf",
            Species::Fox => "fox",
        }
    }

    /// Single-character symbol used in layout files
    pub fn symbol(&self) -> char {
        match self {
            Species::Rabbit => 'R',
            Species::Deer => 'D',
            Species::Wolf => 'W',
            Species::Fox => 'F',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.symbol() == symbol)
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Neighbor offsets in scan order: row by row, left to right
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];
