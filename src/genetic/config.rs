//! Training configuration.

use crate::constants::{
    DEFAULT_POPULATION_SIZE, GRID_SIZE, MIN_ELITE_SIZE, MUTATION_MAGNITUDE, MUTATION_RATE,
    TOURNAMENT_SIZE,
};
use crate::error::{ConfigError, PersistenceError};
use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Knobs for a genetic training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    pub population_size: usize,
    pub generations: u32,
    /// Games each individual plays per generation; fitness is their mean.
    pub games_per_individual: u32,
    pub tournament_size: usize,
    pub mutation_rate: f64,
    pub mutation_magnitude: f64,
    /// Share of the population carried over unchanged, at least two.
    pub elite_fraction: f64,
    pub grid_size: i32,
    /// Move cap per training game.
    pub max_moves: u64,
    pub seed: u64,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            generations: 20,
            games_per_individual: 3,
            tournament_size: TOURNAMENT_SIZE,
            mutation_rate: MUTATION_RATE,
            mutation_magnitude: MUTATION_MAGNITUDE,
            elite_fraction: 0.2,
            grid_size: GRID_SIZE,
            max_moves: 5_000,
            seed: 42,
        }
    }
}

impl GeneticConfig {
    /// Small and fast, for smoke runs.
    pub fn quick() -> Self {
        Self {
            population_size: 10,
            generations: 3,
            games_per_individual: 1,
            grid_size: 10,
            max_moves: 1_000,
            ..Default::default()
        }
    }

    /// Larger population and more games per individual.
    pub fn thorough() -> Self {
        Self {
            population_size: 100,
            generations: 50,
            games_per_individual: 5,
            ..Default::default()
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self, PersistenceError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Number of individuals copied unchanged into the next generation.
    pub fn elite_size(&self) -> usize {
        let share = (self.population_size as f64 * self.elite_fraction).ceil() as usize;
        share.max(MIN_ELITE_SIZE).min(self.population_size)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Grid::try_new(self.grid_size)?;
        let min = self.tournament_size.max(MIN_ELITE_SIZE + 1);
        if self.population_size < min {
            return Err(ConfigError::PopulationSize {
                min,
                got: self.population_size,
            });
        }
        if self.generations == 0 {
            return Err(ConfigError::Zero("generations"));
        }
        if self.games_per_individual == 0 {
            return Err(ConfigError::Zero("games_per_individual"));
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::Zero("tournament_size"));
        }
        if self.max_moves == 0 {
            return Err(ConfigError::Zero("max_moves"));
        }
        for (name, value) in [
            ("mutation_rate", self.mutation_rate),
            ("mutation_magnitude", self.mutation_magnitude),
            ("elite_fraction", self.elite_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Fraction { name, value });
            }
        }
        Ok(())
    }
}
