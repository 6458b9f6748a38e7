//! Cached multi-step plans consumed one cell per tick.

use crate::grid::{Cell, Direction, Occupancy};
use tracing::debug;

/// A planned route toward the food; never includes the head it started from.
#[derive(Debug, Clone, Default)]
pub struct PlannedPath {
    cells: Vec<Cell>,
    cursor: usize,
}

impl PlannedPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, cells: Vec<Cell>) {
        self.cells = cells;
        self.cursor = 0;
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.cursor = 0;
    }

    /// Cells not yet consumed.
    pub fn remaining(&self) -> &[Cell] {
        &self.cells[self.cursor..]
    }

    pub fn is_empty(&self) -> bool {
        self.remaining().is_empty()
    }

    /// Pop the next step if the plan is still valid for the current state.
    ///
    /// A plan is valid when its next cell is adjacent to `head` and free, and
    /// its last cell is still the food. Invalid plans are discarded.
    pub fn advance(&mut self, head: Cell, food: Cell, occupancy: &Occupancy) -> Option<Direction> {
        let remaining = self.remaining();
        let (next, last) = match (remaining.first(), remaining.last()) {
            (Some(&next), Some(&last)) => (next, last),
            _ => return None,
        };
        let valid = last == food && occupancy.is_free(next);
        match Direction::between(head, next) {
            Some(direction) if valid => {
                self.cursor += 1;
                Some(direction)
            }
            _ => {
                debug!(?head, ?next, "discarding stale path");
                self.clear();
                None
            }
        }
    }
}
