//! A* search, plain and body-aware.

use super::{follow_plan, reconstruct};
use crate::agents::fallback::closest_move;
use crate::agents::{Agent, PlannedPath};
use crate::constants::{ASTAR_BODY_PROXIMITY_PENALTY, ASTAR_STEP_COST};
use crate::grid::{Cell, Direction, Grid, Occupancy};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

// === Plain A* ===

/// Shortest route using `f = g + manhattan`; equal `f` pops in insertion order.
pub fn find_path(occupancy: &Occupancy, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
    let grid = occupancy.grid();
    let start_index = grid.index(start)?;
    let mut g_score = vec![u32::MAX; grid.area()];
    let mut parents = vec![None; grid.area()];
    let mut closed = vec![false; grid.area()];
    let mut open = BinaryHeap::new();
    let mut seq = 0u64;
    g_score[start_index] = 0;
    open.push(Reverse((start.manhattan(goal) as u32, seq, start_index)));

    while let Some(Reverse((_, _, index))) = open.pop() {
        if closed[index] {
            continue;
        }
        closed[index] = true;
        let current = grid.cell_at(index);
        if current == goal {
            return reconstruct(grid, &parents, start, goal);
        }
        let g = g_score[index];
        for next in occupancy.free_neighbors(current) {
            let Some(next_index) = grid.index(next) else { continue };
            let tentative = g + 1;
            if closed[next_index] || tentative >= g_score[next_index] {
                continue;
            }
            g_score[next_index] = tentative;
            parents[next_index] = Some(index);
            seq += 1;
            let f = tentative + next.manhattan(goal) as u32;
            open.push(Reverse((f, seq, next_index)));
        }
    }
    None
}

// === Body-aware A* ===

/// A* that models the body sliding away and prefers cells away from it.
///
/// Body segment `i` of an `L`-long body is vacated after `L - i` moves, so a
/// cell is enterable at step `t` once `t >= L - i`. Each step costs
/// `ASTAR_STEP_COST` plus `ASTAR_BODY_PROXIMITY_PENALTY` for every neighbor
/// still covered by the body on arrival.
pub fn find_path_body_aware(grid: Grid, body: &[Cell], goal: Cell) -> Option<Vec<Cell>> {
    let start = *body.first()?;
    let start_index = grid.index(start)?;
    let len = body.len();
    let mut vacate_at = vec![0usize; grid.area()];
    for (i, &cell) in body.iter().enumerate() {
        if let Some(idx) = grid.index(cell) {
            vacate_at[idx] = vacate_at[idx].max(len - i);
        }
    }
    let occupied = |idx: usize, step: usize| step < vacate_at[idx];

    let mut g_score = vec![u32::MAX; grid.area()];
    let mut steps = vec![0usize; grid.area()];
    let mut parents = vec![None; grid.area()];
    let mut closed = vec![false; grid.area()];
    let mut open = BinaryHeap::new();
    let mut seq = 0u64;
    let heuristic = |cell: Cell| cell.manhattan(goal) as u32 * ASTAR_STEP_COST;
    g_score[start_index] = 0;
    open.push(Reverse((heuristic(start), seq, start_index)));

    while let Some(Reverse((_, _, index))) = open.pop() {
        if closed[index] {
            continue;
        }
        closed[index] = true;
        let current = grid.cell_at(index);
        if current == goal {
            return reconstruct(grid, &parents, start, goal);
        }
        let arrival = steps[index] + 1;
        for (_, next) in grid.neighbors(current) {
            let Some(next_index) = grid.index(next) else { continue };
            if closed[next_index] || occupied(next_index, arrival) {
                continue;
            }
            let crowding = grid
                .neighbors(next)
                .filter_map(|(_, n)| grid.index(n))
                .filter(|&n| n != index && occupied(n, arrival))
                .count() as u32;
            let tentative =
                g_score[index] + ASTAR_STEP_COST + crowding * ASTAR_BODY_PROXIMITY_PENALTY;
            if tentative >= g_score[next_index] {
                continue;
            }
            g_score[next_index] = tentative;
            steps[next_index] = arrival;
            parents[next_index] = Some(index);
            seq += 1;
            open.push(Reverse((tentative + heuristic(next), seq, next_index)));
        }
    }
    None
}

// === Agents ===

/// Plain A* with a cached plan.
#[derive(Debug, Clone)]
pub struct AStarAgent {
    grid: Grid,
    plan: PlannedPath,
}

impl AStarAgent {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            plan: PlannedPath::new(),
        }
    }

    /// Drop the cached plan so the next call searches from scratch.
    pub fn invalidate(&mut self) {
        self.plan.clear();
    }
}

impl Agent for AStarAgent {
    fn id(&self) -> &'static str {
        "astar"
    }

    fn name(&self) -> &'static str {
        "A*"
    }

    fn description(&self) -> &'static str {
        "A* search with a Manhattan-distance heuristic"
    }

    fn reset(&mut self) {
        self.plan.clear();
    }

    fn get_next_move(&mut self, head: Cell, food: Cell, body: &[Cell]) -> Option<Direction> {
        let occupancy = Occupancy::from_body(self.grid, body);
        follow_plan(&mut self.plan, &occupancy, head, food, false, find_path)
            .or_else(|| closest_move(&occupancy, head, food))
    }

    fn current_path(&self) -> &[Cell] {
        self.plan.remaining()
    }
}

/// A* that keeps its distance from the body; re-plans every tick.
#[derive(Debug, Clone)]
pub struct BodyAwareAStarAgent {
    grid: Grid,
    plan: PlannedPath,
}

impl BodyAwareAStarAgent {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            plan: PlannedPath::new(),
        }
    }
}

impl Agent for BodyAwareAStarAgent {
    fn id(&self) -> &'static str {
        "body_aware_astar"
    }

    fn name(&self) -> &'static str {
        "Body-Aware A*"
    }

    fn description(&self) -> &'static str {
        "A* that penalizes hugging the body and models the tail moving away"
    }

    fn reset(&mut self) {
        self.plan.clear();
    }

    fn get_next_move(&mut self, head: Cell, food: Cell, body: &[Cell]) -> Option<Direction> {
        let occupancy = Occupancy::from_body(self.grid, body);
        let grid = self.grid;
        follow_plan(&mut self.plan, &occupancy, head, food, true, |_, _, goal| {
            find_path_body_aware(grid, body, goal)
        })
        .or_else(|| closest_move(&occupancy, head, food))
    }

    fn current_path(&self) -> &[Cell] {
        self.plan.remaining()
    }
}
