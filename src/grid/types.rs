//! Grid data structures shared by the game engine and every agent.
//!
//! Coordinates follow screen convention: `x` grows to the right and `y` grows
//! downward, so `(0, -1)` is "up".

use crate::constants::{GRID_SIZE, MAX_GRID_SIZE, MIN_GRID_SIZE};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// A position on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighboring cell one step in `direction` (may be out of bounds).
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Manhattan distance: |dx| + |dy|.
    pub fn manhattan(self, other: Cell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Cardinal direction for snake movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Down,
    Right,
    Up,
    Left,
}

impl Direction {
    /// Canonical enumeration order: (0,1), (1,0), (0,-1), (-1,0).
    ///
    /// Every search expands neighbors in this order, which makes it the
    /// tie-break between equal-priority frontier entries.
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Right,
        Direction::Up,
        Direction::Left,
    ];

    /// Returns the (dx, dy) delta for this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Down => (0, 1),
            Self::Right => (1, 0),
            Self::Up => (0, -1),
            Self::Left => (-1, 0),
        }
    }

    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, 1) => Some(Self::Down),
            (1, 0) => Some(Self::Right),
            (0, -1) => Some(Self::Up),
            (-1, 0) => Some(Self::Left),
            _ => None,
        }
    }

    /// Direction of the single step from `from` to `to`, if they are adjacent.
    pub fn between(from: Cell, to: Cell) -> Option<Self> {
        Self::from_delta(to.x - from.x, to.y - from.y)
    }

    /// Returns the opposite direction.
    pub fn opposite(self) -> Self {
        match self {
            Self::Down => Self::Up,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Left => Self::Right,
        }
    }

    /// Clockwise quarter turn (the heading's right-hand side).
    pub fn turn_right(self) -> Self {
        match self {
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
            Self::Up => Self::Right,
        }
    }

    /// Counter-clockwise quarter turn (the heading's left-hand side).
    pub fn turn_left(self) -> Self {
        self.turn_right().opposite()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Right => "right",
            Self::Up => "up",
            Self::Left => "left",
        }
    }
}

/// Unit vector for a move; the `None` sentinel maps to `(0, 0)`.
pub fn as_vector(mv: Option<Direction>) -> (i32, i32) {
    mv.map(Direction::delta).unwrap_or((0, 0))
}

/// A fixed-size square grid with 4-connected movement.
///
/// Serializes as its side length; deserializing rejects unsupported sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Grid {
    size: i32,
}

impl Default for Grid {
    fn default() -> Self {
        Self { size: GRID_SIZE }
    }
}

impl TryFrom<i32> for Grid {
    type Error = ConfigError;

    fn try_from(size: i32) -> Result<Self, Self::Error> {
        Self::try_new(size)
    }
}

impl From<Grid> for i32 {
    fn from(grid: Grid) -> Self {
        grid.size
    }
}

impl Grid {
    /// Grid with side length `size`, or `ConfigError::GridSize` when it is
    /// outside `MIN_GRID_SIZE..=MAX_GRID_SIZE`.
    pub fn try_new(size: i32) -> Result<Self, ConfigError> {
        if (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            Ok(Self { size })
        } else {
            Err(ConfigError::GridSize(size, MIN_GRID_SIZE, MAX_GRID_SIZE))
        }
    }

    /// Grid with a side length known to be supported.
    ///
    /// # Panics
    ///
    /// Panics when `size` is outside `MIN_GRID_SIZE..=MAX_GRID_SIZE`; use
    /// [`Grid::try_new`] for sizes that come from configuration.
    pub fn new(size: i32) -> Self {
        match Self::try_new(size) {
            Ok(grid) => grid,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    /// Total number of cells.
    pub fn area(&self) -> usize {
        (self.size * self.size) as usize
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.size && cell.y >= 0 && cell.y < self.size
    }

    /// Row-major index of an in-bounds cell.
    pub fn index(&self, cell: Cell) -> Option<usize> {
        if self.contains(cell) {
            Some((cell.y * self.size + cell.x) as usize)
        } else {
            None
        }
    }

    pub fn cell_at(&self, index: usize) -> Cell {
        let i = index as i32;
        Cell::new(i % self.size, i / self.size)
    }

    /// Center cell (the snake's spawn point).
    pub fn center(&self) -> Cell {
        Cell::new(self.size / 2, self.size / 2)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.area()).map(move |i| self.cell_at(i))
    }

    /// In-bounds neighbors in canonical direction order.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = (Direction, Cell)> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |d| (d, cell.step(d)))
            .filter(move |(_, c)| self.contains(*c))
    }

    /// Steps to the nearest grid edge (0 for a border cell).
    pub fn wall_distance(&self, cell: Cell) -> i32 {
        cell.x
            .min(cell.y)
            .min(self.size - 1 - cell.x)
            .min(self.size - 1 - cell.y)
    }
}
