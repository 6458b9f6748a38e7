//! Cycle follower that picks whichever in-bound neighbor is closest to the
//! food along the cycle.

use super::{
    detour_move, ensure_consistent, max_skip, plan_toward, rejoin_move, skipped_cells_clear,
    target_index, HamiltonianCycle,
};
use crate::agents::fallback::first_valid_move;
use crate::agents::Agent;
use crate::grid::{Cell, Direction, Grid, Occupancy};

#[derive(Debug, Clone)]
pub struct AdvancedHamiltonianAgent {
    grid: Grid,
    cycle: HamiltonianCycle,
    path: Vec<Cell>,
}

impl AdvancedHamiltonianAgent {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            cycle: HamiltonianCycle::build(grid),
            path: Vec::new(),
        }
    }

    pub fn cycle(&self) -> &HamiltonianCycle {
        &self.cycle
    }
}

impl Agent for AdvancedHamiltonianAgent {
    fn id(&self) -> &'static str {
        "advanced_hamiltonian"
    }

    fn name(&self) -> &'static str {
        "Advanced Hamiltonian"
    }

    fn description(&self) -> &'static str {
        "Hamiltonian cycle with bounded skips toward the food"
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

        let limit = max_skip(self.grid);
        let body_cells = Occupancy::from_cells(self.grid, body);
        let mut best: Option<(usize, Cell)> = None;
        for next in occupancy.free_neighbors(head) {
            let Some(next_index) = self.cycle.index_of(next) else { continue };
            let ahead = self.cycle.forward_distance(head_index, next_index);
            if ahead == 0 || ahead - 1 > limit {
                continue;
            }
            if !skipped_cells_clear(&self.cycle, &body_cells, head_index, ahead) {
                continue;
            }
            let remaining = self.cycle.forward_distance(next_index, target);
            if best.map_or(true, |(r, _)| remaining < r) {
                best = Some((remaining, next));
            }
        }

        let chosen = best.map(|(_, cell)| cell).or_else(|| {
            let next = self.cycle.cell_at(head_index + 1);
            occupancy.is_free(next).then_some(next)
        });
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
