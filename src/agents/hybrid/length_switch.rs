//! A* while the snake is short, a cycle follower once it fills half the grid.

use super::Strategy;
use crate::agents::{AStarAgent, AdvancedHamiltonianAgent, Agent, HamiltonianAgent};
use crate::constants::HYBRID_LENGTH_THRESHOLD;
use crate::grid::{Cell, Direction, Grid};
use tracing::debug;

fn is_long(grid: Grid, len: usize) -> bool {
    len as f64 >= grid.area() as f64 * HYBRID_LENGTH_THRESHOLD
}

/// Pairs A* with the advanced cycle follower.
#[derive(Debug, Clone)]
pub struct HybridAgent {
    grid: Grid,
    astar: AStarAgent,
    cycle: AdvancedHamiltonianAgent,
    strategy: Strategy,
}

impl HybridAgent {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            astar: AStarAgent::new(grid),
            cycle: AdvancedHamiltonianAgent::new(grid),
            strategy: Strategy::AStar,
        }
    }
}

impl Agent for HybridAgent {
    fn id(&self) -> &'static str {
        "hybrid"
    }

    fn name(&self) -> &'static str {
        "Hybrid"
    }

    fn description(&self) -> &'static str {
        "A* while short, advanced Hamiltonian cycle once half the grid is filled"
    }

    fn reset(&mut self) {
        self.astar.reset();
        self.cycle.reset();
        self.strategy = Strategy::AStar;
    }

    fn get_next_move(&mut self, head: Cell, food: Cell, body: &[Cell]) -> Option<Direction> {
        let strategy = if is_long(self.grid, body.len()) {
            Strategy::Hamiltonian
        } else {
            Strategy::AStar
        };
        if strategy != self.strategy {
            debug!(from = %self.strategy, to = %strategy, len = body.len(), "hybrid switch");
            self.strategy = strategy;
        }
        match strategy {
            Strategy::Hamiltonian => self.cycle.get_next_move(head, food, body),
            _ => self.astar.get_next_move(head, food, body),
        }
    }

    fn current_path(&self) -> &[Cell] {
        match self.strategy {
            Strategy::Hamiltonian => self.cycle.current_path(),
            _ => self.astar.current_path(),
        }
    }

    fn current_strategy(&self) -> Option<Strategy> {
        Some(self.strategy)
    }
}

/// Pairs A* with the shortcutting cycle follower.
#[derive(Debug, Clone)]
pub struct PerfectAgent {
    grid: Grid,
    astar: AStarAgent,
    cycle: HamiltonianAgent,
    strategy: Strategy,
}

impl PerfectAgent {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            astar: AStarAgent::new(grid),
            cycle: HamiltonianAgent::new(grid),
            strategy: Strategy::AStar,
        }
    }
}

impl Agent for PerfectAgent {
    fn id(&self) -> &'static str {
        "perfect"
    }

    fn name(&self) -> &'static str {
        "Perfect AI"
    }

    fn description(&self) -> &'static str {
        "Combines A* with a Hamiltonian cycle and safe shortcuts"
    }

    fn reset(&mut self) {
        self.astar.reset();
        self.cycle.reset();
        self.strategy = Strategy::AStar;
    }

    fn get_next_move(&mut self, head: Cell, food: Cell, body: &[Cell]) -> Option<Direction> {
        let strategy = if is_long(self.grid, body.len()) {
            Strategy::Hamiltonian
        } else {
            Strategy::AStar
        };
        if strategy != self.strategy {
            debug!(from = %self.strategy, to = %strategy, len = body.len(), "perfect switch");
            self.strategy = strategy;
        }
        match strategy {
            Strategy::Hamiltonian => self.cycle.get_next_move(head, food, body),
            _ => self.astar.get_next_move(head, food, body),
        }
    }

    fn current_path(&self) -> &[Cell] {
        match self.strategy {
            Strategy::Hamiltonian => self.cycle.current_path(),
            _ => self.astar.current_path(),
        }
    }

    fn current_strategy(&self) -> Option<Strategy> {
        Some(self.strategy)
    }
}
