//! Depth-limited depth-first search biased toward the goal.

use super::follow_plan;
use crate::agents::fallback::closest_move;
use crate::agents::{Agent, PlannedPath};
use crate::constants::DFS_MAX_DEPTH;
use crate::grid::{Cell, Direction, Grid, Occupancy};

/// Any route of at most `max_depth` steps, trying goal-ward neighbors first.
///
/// A cell is entered again only with more depth to spare than any earlier
/// visit had, so every reachable goal within the bound is found and each cell
/// is expanded at most `max_depth` times.
pub fn find_path(
    occupancy: &Occupancy,
    start: Cell,
    goal: Cell,
    max_depth: usize,
) -> Option<Vec<Cell>> {
    let grid = occupancy.grid();
    let start_index = grid.index(start)?;
    let mut best_left = vec![None; grid.area()];
    best_left[start_index] = Some(max_depth);
    let mut path = Vec::new();
    if descend(occupancy, start, goal, max_depth, &mut best_left, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn descend(
    occupancy: &Occupancy,
    current: Cell,
    goal: Cell,
    depth_left: usize,
    best_left: &mut [Option<usize>],
    path: &mut Vec<Cell>,
) -> bool {
    if current == goal {
        return true;
    }
    if depth_left == 0 {
        return false;
    }
    let grid = occupancy.grid();
    let mut candidates: Vec<Cell> = occupancy.free_neighbors(current).collect();
    candidates.sort_by_key(|c| c.manhattan(goal));

    for next in candidates {
        let Some(i) = grid.index(next) else { continue };
        if best_left[i].is_some_and(|seen| seen >= depth_left - 1) {
            continue;
        }
        best_left[i] = Some(depth_left - 1);
        path.push(next);
        if descend(occupancy, next, goal, depth_left - 1, best_left, path) {
            return true;
        }
        path.pop();
    }
    false
}

#[derive(Debug, Clone)]
pub struct DfsAgent {
    grid: Grid,
    plan: PlannedPath,
    max_depth: usize,
}

impl DfsAgent {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            plan: PlannedPath::new(),
            max_depth: DFS_MAX_DEPTH,
        }
    }
}

impl Agent for DfsAgent {
    fn id(&self) -> &'static str {
        "dfs"
    }

    fn name(&self) -> &'static str {
        "DFS"
    }

    fn description(&self) -> &'static str {
        "Depth-first search that explores toward the food first"
    }

    fn reset(&mut self) {
        self.plan.clear();
    }

    fn get_next_move(&mut self, head: Cell, food: Cell, body: &[Cell]) -> Option<Direction> {
        let occupancy = Occupancy::from_body(self.grid, body);
        let max_depth = self.max_depth;
        follow_plan(&mut self.plan, &occupancy, head, food, false, |occ, s, g| {
            find_path(occ, s, g, max_depth)
        })
        .or_else(|| closest_move(&occupancy, head, food))
    }

    fn current_path(&self) -> &[Cell] {
        self.plan.remaining()
    }
}
