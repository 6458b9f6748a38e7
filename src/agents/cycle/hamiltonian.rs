//! Cycle follower that cuts corners toward food while the snake is short.

use super::{
    detour_move, ensure_consistent, max_skip, plan_toward, rejoin_move, skipped_cells_clear,
    target_index, HamiltonianCycle,
};
use crate::agents::fallback::first_valid_move;
use crate::agents::Agent;
use crate::constants::HYBRID_LENGTH_THRESHOLD;
use crate::grid::{Cell, Direction, Grid, Occupancy};

#[derive(Debug, Clone)]
pub struct HamiltonianAgent {
    grid: Grid,
    cycle: HamiltonianCycle,
    shortcuts: bool,
    path: Vec<Cell>,
}

impl HamiltonianAgent {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            cycle: HamiltonianCycle::build(grid),
            shortcuts: true,
            path: Vec::new(),
        }
    }

    /// Never leave the cycle.
    pub fn without_shortcuts(grid: Grid) -> Self {
        Self {
            shortcuts: false,
            ..Self::new(grid)
        }
    }

    pub fn cycle(&self) -> &HamiltonianCycle {
        &self.cycle
    }

    /// Whether shortcuts are allowed for a body of `len` cells.
    pub fn shortcuts_allowed(&self, len: usize) -> bool {
        self.shortcuts && (len as f64) <= self.grid.area() as f64 * HYBRID_LENGTH_THRESHOLD
    }

    /// Farthest forward neighbor that does not pass the target or skip body cells.
    fn shortcut(
        &self,
        occupancy: &Occupancy,
        body: &Occupancy,
        head: Cell,
        head_index: usize,
        target: usize,
    ) -> Option<Cell> {
        let to_food = self.cycle.forward_distance(head_index, target);
        let limit = max_skip(self.grid);
        let mut best: Option<(usize, Cell)> = None;
        for next in occupancy.free_neighbors(head) {
            let Some(next_index) = self.cycle.index_of(next) else { continue };
            let distance = self.cycle.forward_distance(head_index, next_index);
            if distance == 0 || distance > to_food || distance - 1 > limit {
                continue;
            }
            if !skipped_cells_clear(&self.cycle, body, head_index, distance) {
                continue;
            }
            if best.map_or(true, |(d, _)| distance > d) {
                best = Some((distance, next));
            }
        }
        best.map(|(_, cell)| cell)
    }
}

impl Agent for HamiltonianAgent {
    fn id(&self) -> &'static str {
        "hamiltonian"
    }

    fn name(&self) -> &'static str {
        "Hamiltonian"
    }

    fn description(&self) -> &'static str {
        "Follows a space-filling cycle, shortcutting toward food while short"
    }

    fn reset(&mut self) {
        self.path.clear();
    }

    fn get_next_move(&mut self, head: Cell, food: Cell, body: &[Cell]) -> Option<Direction> {
        let occupancy = Occupancy::from_body(self.grid, body);
        ensure_consistent(&mut self.cycle, self.grid, head, food);

        let Some(head_index) = self.cycle.index_of(head) else {
            self.path.clear();
            return rejoin_move(&self.cycle, &occupancy, head, body);
        };
        if let Some(cell) = detour_move(&self.cycle, &occupancy, head_index, food) {
            self.path = vec![cell];
            return Direction::between(head, cell);
        }
        let target = target_index(&self.cycle, head_index, food);

        let mut chosen = None;
        if self.shortcuts_allowed(body.len()) {
            let body_cells = Occupancy::from_cells(self.grid, body);
            chosen = self.shortcut(&occupancy, &body_cells, head, head_index, target);
        }
        if chosen.is_none() {
            let next = self.cycle.cell_at(head_index + 1);
            if occupancy.is_free(next) {
                chosen = Some(next);
            }
        }

        match chosen {
            Some(cell) => {
                self.path = plan_toward(&self.cycle, cell, target, food);
                Direction::between(head, cell)
            }
            None => {
                self.path.clear();
                first_valid_move(&occupancy, head)
            }
        }
    }

    fn current_path(&self) -> &[Cell] {
        &self.path
    }
}
