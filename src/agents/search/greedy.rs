//! Greedy best-first search on Manhattan distance alone.

use super::{follow_plan, reconstruct};
use crate::agents::fallback::closest_move;
use crate::agents::{Agent, PlannedPath};
use crate::grid::{Cell, Direction, Grid, Occupancy};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Fast but not necessarily shortest route to `goal`.
pub fn find_path(occupancy: &Occupancy, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
    let grid = occupancy.grid();
    let start_index = grid.index(start)?;
    let mut parents = vec![None; grid.area()];
    let mut seen = vec![false; grid.area()];
    let mut frontier = BinaryHeap::new();
    let mut seq = 0u64;
    seen[start_index] = true;
    frontier.push(Reverse((start.manhattan(goal), seq, start_index)));

    while let Some(Reverse((_, _, index))) = frontier.pop() {
        let current = grid.cell_at(index);
        if current == goal {
            return reconstruct(grid, &parents, start, goal);
        }
        for next in occupancy.free_neighbors(current) {
            let Some(next_index) = grid.index(next) else { continue };
            if seen[next_index] {
                continue;
            }
            seen[next_index] = true;
            parents[next_index] = Some(index);
            seq += 1;
            frontier.push(Reverse((next.manhattan(goal), seq, next_index)));
        }
    }
    None
}

#[derive(Debug, Clone)]
pub struct GreedyAgent {
    grid: Grid,
    plan: PlannedPath,
}

impl GreedyAgent {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            plan: PlannedPath::new(),
        }
    }
}

impl Agent for GreedyAgent {
    fn id(&self) -> &'static str {
        "greedy"
    }

    fn name(&self) -> &'static str {
        "Greedy Best-First"
    }

    fn description(&self) -> &'static str {
        "Always expands the cell closest to the food"
    }

    fn reset(&mut self) {
        self.plan.clear();
    }

    fn get_next_move(&mut self, head: Cell, food: Cell, body: &[Cell]) -> Option<Direction> {
        let occupancy = Occupancy::from_body(self.grid, body);
        follow_plan(&mut self.plan, &occupancy, head, food, true, find_path)
            .or_else(|| closest_move(&occupancy, head, food))
    }

    fn current_path(&self) -> &[Cell] {
        self.plan.remaining()
    }
}
