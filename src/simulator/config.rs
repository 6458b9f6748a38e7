//! Simulation configuration.

use crate::constants::{DEFAULT_MAX_MOVES, GRID_SIZE};
use crate::error::{ConfigError, PersistenceError};
use crate::game::GameLimits;
use crate::genetic::Weights;
use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for a batch of headless games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Registry id of the agent to play.
    pub agent: String,

    pub grid_size: i32,

    /// Number of games to play
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Move cap per game
    pub max_moves: u64,

    /// Moves without food before a game is called; None = derived from the grid
    pub starvation_moves: Option<u64>,

    /// Trained weights for the `genetic` agent
    pub weights: Option<Weights>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per game)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            agent: "astar".to_string(),
            grid_size: GRID_SIZE,
            num_runs: 100,
            seed: None,
            max_moves: DEFAULT_MAX_MOVES,
            starvation_moves: None,
            weights: None,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// A handful of seeded games on a small grid.
    pub fn quick(agent: &str) -> Self {
        Self {
            agent: agent.to_string(),
            grid_size: 10,
            num_runs: 10,
            seed: Some(42),
            max_moves: 5_000,
            ..Default::default()
        }
    }

    /// Many seeded games on the standard grid.
    pub fn benchmark(agent: &str) -> Self {
        Self {
            agent: agent.to_string(),
            num_runs: 500,
            seed: Some(42),
            verbosity: 0,
            ..Default::default()
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self, PersistenceError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Grid::try_new(self.grid_size)
    }

    /// Move and starvation caps for games on `grid`.
    pub fn limits(&self, grid: Grid) -> GameLimits {
        let mut limits = GameLimits::with_max_moves(grid, self.max_moves);
        if let Some(starvation) = self.starvation_moves {
            limits.starvation_moves = starvation;
        }
        limits
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid()?;
        if self.num_runs == 0 {
            return Err(ConfigError::Zero("num_runs"));
        }
        if self.max_moves == 0 {
            return Err(ConfigError::Zero("max_moves"));
        }
        if self.starvation_moves == Some(0) {
            return Err(ConfigError::Zero("starvation_moves"));
        }
        Ok(())
    }
}
