//! Cell occupancy and the shared neighbor-validity rule.
//!
//! A cell is blocked when it is out of bounds or covered by `body[..len-1]`.
//! The tail cell is passable because it vacates on the next move; food never
//! spawns on the body, so the tail can never be the cell that makes the snake
//! grow. Agents, searches and the game engine all apply this same rule.

use super::types::{Cell, Direction, Grid};

/// Dense blocked-cell map for one grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    grid: Grid,
    blocked: Vec<bool>,
}

impl Occupancy {
    /// Nothing blocked.
    pub fn empty(grid: Grid) -> Self {
        Self {
            grid,
            blocked: vec![false; grid.area()],
        }
    }

    /// Obstacles for the snake's next move: every segment except the tail.
    pub fn from_body(grid: Grid, body: &[Cell]) -> Self {
        let keep = body.len().saturating_sub(1);
        Self::from_cells(grid, &body[..keep])
    }

    /// Block every listed cell.
    pub fn from_cells(grid: Grid, cells: &[Cell]) -> Self {
        let mut occupancy = Self::empty(grid);
        for &cell in cells {
            occupancy.block(cell);
        }
        occupancy
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// In bounds and not occupied.
    pub fn is_free(&self, cell: Cell) -> bool {
        match self.grid.index(cell) {
            Some(i) => !self.blocked[i],
            None => false,
        }
    }

    pub fn is_blocked(&self, cell: Cell) -> bool {
        !self.is_free(cell)
    }

    pub fn block(&mut self, cell: Cell) {
        if let Some(i) = self.grid.index(cell) {
            self.blocked[i] = true;
        }
    }

    pub fn unblock(&mut self, cell: Cell) {
        if let Some(i) = self.grid.index(cell) {
            self.blocked[i] = false;
        }
    }

    /// Number of blocked in-bounds cells.
    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    /// Free neighbors of `cell` in canonical direction order.
    pub fn free_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |d| cell.step(d))
            .filter(move |c| self.is_free(*c))
    }

    /// Free neighbor moves of `cell` in canonical direction order.
    pub fn free_moves(&self, cell: Cell) -> impl Iterator<Item = (Direction, Cell)> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |d| (d, cell.step(d)))
            .filter(move |(_, c)| self.is_free(*c))
    }

    pub fn free_neighbor_count(&self, cell: Cell) -> usize {
        self.free_neighbors(cell).count()
    }

    /// True when `other` blocks at least every cell this map blocks.
    pub fn is_subset_of(&self, other: &Occupancy) -> bool {
        self.blocked
            .iter()
            .zip(&other.blocked)
            .all(|(&mine, &theirs)| !mine || theirs)
    }
}

/// Valid neighboring cells of `cell` given the snake `body`.
pub fn valid_neighbors(grid: Grid, cell: Cell, body: &[Cell]) -> Vec<Cell> {
    Occupancy::from_body(grid, body).free_neighbors(cell).collect()
}

/// The body after the head moves to `next`; the tail is kept only when growing.
pub fn body_after_move(body: &[Cell], next: Cell, grows: bool) -> Vec<Cell> {
    let keep = if grows {
        body.len()
    } else {
        body.len().saturating_sub(1)
    };
    let mut moved = Vec::with_capacity(keep + 1);
    moved.push(next);
    moved.extend_from_slice(&body[..keep]);
    moved
}
