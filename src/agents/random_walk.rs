//! Baseline agent: eats adjacent food, otherwise wanders.

use super::Agent;
use crate::grid::{Cell, Direction, Grid, Occupancy};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[derive(Debug, Clone)]
pub struct RandomWalkAgent {
    grid: Grid,
    rng: StdRng,
    last: Vec<Cell>,
}

impl RandomWalkAgent {
    pub fn new(grid: Grid) -> Self {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    /// Deterministic walk for tests and reproducible simulations.
    pub fn seeded(grid: Grid, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: Grid, rng: StdRng) -> Self {
        Self {
            grid,
            rng,
            last: Vec::new(),
        }
    }
}

impl Agent for RandomWalkAgent {
    fn id(&self) -> &'static str {
        "random"
    }

    fn name(&self) -> &'static str {
        "Random Walk"
    }

    fn description(&self) -> &'static str {
        "Moves randomly, eating food only when it is adjacent"
    }

    fn reset(&mut self) {
        self.last.clear();
    }

    fn get_next_move(&mut self, head: Cell, food: Cell, body: &[Cell]) -> Option<Direction> {
        let occupancy = Occupancy::from_body(self.grid, body);
        let moves: Vec<(Direction, Cell)> = occupancy.free_moves(head).collect();
        let chosen = moves
            .iter()
            .find(|(_, cell)| *cell == food)
            .or_else(|| moves.choose(&mut self.rng))
            .copied();
        self.last = chosen.map(|(_, cell)| vec![cell]).unwrap_or_default();
        chosen.map(|(direction, _)| direction)
    }

    fn current_path(&self) -> &[Cell] {
        &self.last
    }
}
