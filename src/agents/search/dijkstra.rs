//! Uniform-cost search.

use super::{follow_plan, reconstruct};
use crate::agents::fallback::first_valid_move;
use crate::agents::{Agent, PlannedPath};
use crate::grid::{Cell, Direction, Grid, Occupancy};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Cheapest route with unit step costs; equal costs pop in insertion order.
pub fn find_path(occupancy: &Occupancy, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
    let grid = occupancy.grid();
    let start_index = grid.index(start)?;
    let mut cost = vec![u32::MAX; grid.area()];
    let mut parents = vec![None; grid.area()];
    let mut done = vec![false; grid.area()];
    let mut frontier = BinaryHeap::new();
    let mut seq = 0u64;
    cost[start_index] = 0;
    frontier.push(Reverse((0u32, seq, start_index)));

    while let Some(Reverse((current_cost, _, index))) = frontier.pop() {
        if done[index] {
            continue;
        }
        done[index] = true;
        let current = grid.cell_at(index);
        if current == goal {
            return reconstruct(grid, &parents, start, goal);
        }
        for next in occupancy.free_neighbors(current) {
            let Some(next_index) = grid.index(next) else { continue };
            let next_cost = current_cost + 1;
            if !done[next_index] && next_cost < cost[next_index] {
                cost[next_index] = next_cost;
                parents[next_index] = Some(index);
                seq += 1;
                frontier.push(Reverse((next_cost, seq, next_index)));
            }
        }
    }
    None
}

/// Re-plans every tick; the plan is kept for display.
#[derive(Debug, Clone)]
pub struct DijkstraAgent {
    grid: Grid,
    plan: PlannedPath,
}

impl DijkstraAgent {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            plan: PlannedPath::new(),
        }
    }
}

impl Agent for DijkstraAgent {
    fn id(&self) -> &'static str {
        "dijkstra"
    }

    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn description(&self) -> &'static str {
        "Uniform-cost search recomputed every move"
    }

    fn reset(&mut self) {
        self.plan.clear();
    }

    fn get_next_move(&mut self, head: Cell, food: Cell, body: &[Cell]) -> Option<Direction> {
        let occupancy = Occupancy::from_body(self.grid, body);
        follow_plan(&mut self.plan, &occupancy, head, food, true, find_path)
            .or_else(|| first_valid_move(&occupancy, head))
    }

    fn current_path(&self) -> &[Cell] {
        self.plan.remaining()
    }
}
