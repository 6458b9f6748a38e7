//! Outcome and limit types for headless games.

use crate::constants::{DEFAULT_MAX_MOVES, STARVATION_MOVES_PER_CELL};
use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Head left the grid.
    Wall,
    /// Head ran into the body.
    SelfCollision,
    /// The agent reported that no legal move exists.
    NoMove,
    /// Too many moves since the last food.
    Starved,
    /// Total move cap reached.
    MoveLimit,
    /// The snake fills the grid.
    Won,
}

impl EndReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wall => "wall",
            Self::SelfCollision => "self_collision",
            Self::NoMove => "no_move",
            Self::Starved => "starved",
            Self::MoveLimit => "move_limit",
            Self::Won => "won",
        }
    }

    pub fn is_death(self) -> bool {
        matches!(self, Self::Wall | Self::SelfCollision | Self::NoMove)
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of applying a single move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    Moved,
    Ate,
    Ended(EndReason),
}

/// Caps that keep a game from running forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLimits {
    pub max_moves: u64,
    /// Moves allowed without eating before the game is called.
    pub starvation_moves: u64,
}

impl GameLimits {
    pub fn for_grid(grid: Grid) -> Self {
        Self::with_max_moves(grid, DEFAULT_MAX_MOVES)
    }

    pub fn with_max_moves(grid: Grid, max_moves: u64) -> Self {
        Self {
            max_moves,
            starvation_moves: grid.area() as u64 * STARVATION_MOVES_PER_CELL,
        }
    }
}

impl Default for GameLimits {
    fn default() -> Self {
        Self::for_grid(Grid::default())
    }
}

/// Summary of one finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Food eaten.
    pub score: u32,
    pub moves: u64,
    pub length: usize,
    pub end: EndReason,
}

impl GameOutcome {
    pub fn won(&self) -> bool {
        self.end == EndReason::Won
    }
}
