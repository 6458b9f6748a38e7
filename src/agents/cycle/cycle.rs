//! Space-filling cycle over the grid.
//!
//! Column 0 is the return lane; the remaining columns are covered row by row
//! in a serpentine. An odd-sized grid has no Hamiltonian cycle (it has an odd
//! number of cells and is bipartite), so there the last two rows are covered
//! column by column and cell `(1, N-2)` is left out.
//!
//! The left-out cell is still reachable without leaving cycle order: where
//! the cycle turns a corner `a -> x -> b` of a unit square whose fourth corner
//! is the left-out cell, the snake may go `a -> left-out -> b` instead. Such a
//! detour has the same number of moves as the cycle segment it replaces.

use crate::grid::{Cell, Grid};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HamiltonianCycle {
    grid: Grid,
    cells: Vec<Cell>,
    index: Vec<Option<usize>>,
    left_out: Option<Cell>,
    detours: Vec<usize>,
}

impl HamiltonianCycle {
    pub fn build(grid: Grid) -> Self {
        let cells = if grid.size() % 2 == 0 {
            even_cycle(grid.size())
        } else {
            odd_cycle(grid.size())
        };
        let mut index = vec![None; grid.area()];
        for (i, &cell) in cells.iter().enumerate() {
            if let Some(slot) = grid.index(cell) {
                index[slot] = Some(i);
            }
        }
        let left_out = grid
            .cells()
            .find(|c| grid.index(*c).is_some_and(|slot| index[slot].is_none()));
        let detours = match left_out {
            Some(missing) => (0..cells.len())
                .filter(|&i| {
                    cells[i].is_adjacent(missing)
                        && cells[(i + 2) % cells.len()].is_adjacent(missing)
                })
                .collect(),
            None => Vec::new(),
        };
        Self {
            grid,
            cells,
            index,
            left_out,
            detours,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Position of `cell` along the cycle.
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        self.grid.index(cell).and_then(|i| self.index[i])
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.index_of(cell).is_some()
    }

    /// The one cell an odd grid's cycle cannot visit.
    pub fn left_out(&self) -> Option<Cell> {
        self.left_out
    }

    /// On the cycle, or the cell it leaves out.
    pub fn covers(&self, cell: Cell) -> bool {
        self.contains(cell) || self.left_out == Some(cell)
    }

    /// Cycle indices `i` from which `i -> left-out -> i + 2` is a legal detour.
    pub fn detour_entries(&self) -> &[usize] {
        &self.detours
    }

    pub fn is_detour_entry(&self, i: usize) -> bool {
        self.detours.contains(&(i % self.cells.len().max(1)))
    }

    /// Cell at cycle position `i` (wrapping).
    pub fn cell_at(&self, i: usize) -> Cell {
        self.cells[i % self.cells.len()]
    }

    /// Successor of `cell` along the cycle.
    pub fn next(&self, cell: Cell) -> Option<Cell> {
        self.index_of(cell).map(|i| self.cell_at(i + 1))
    }

    /// Steps needed to walk forward from index `from` to index `to`.
    pub fn forward_distance(&self, from: usize, to: usize) -> usize {
        let len = self.cells.len();
        (to + len - from % len) % len
    }

    /// Cells strictly after `from` and up to and including `to`, walking forward.
    pub fn walk(&self, from: usize, to: usize) -> Vec<Cell> {
        (1..=self.forward_distance(from, to))
            .map(|k| self.cell_at(from + k))
            .collect()
    }
}

/// Serpentine over columns `1..n` for rows `0..rows`, starting left-to-right.
fn serpentine_rows(n: i32, rows: i32, cells: &mut Vec<Cell>) {
    for y in 0..rows {
        if y % 2 == 0 {
            cells.extend((1..n).map(|x| Cell::new(x, y)));
        } else {
            cells.extend((1..n).rev().map(|x| Cell::new(x, y)));
        }
    }
}

fn even_cycle(n: i32) -> Vec<Cell> {
    let mut cells = vec![Cell::new(0, 0)];
    serpentine_rows(n, n, &mut cells);
    cells.extend((1..n).rev().map(|y| Cell::new(0, y)));
    cells
}

fn odd_cycle(n: i32) -> Vec<Cell> {
    let mut cells = vec![Cell::new(0, 0)];
    serpentine_rows(n, n - 2, &mut cells);
    // Last two rows: column pairs from the right edge down to column 2.
    for x in (2..n).rev() {
        if (n - 1 - x) % 2 == 0 {
            cells.push(Cell::new(x, n - 2));
            cells.push(Cell::new(x, n - 1));
        } else {
            cells.push(Cell::new(x, n - 1));
            cells.push(Cell::new(x, n - 2));
        }
    }
    cells.push(Cell::new(1, n - 1));
    cells.extend((1..n).rev().map(|y| Cell::new(0, y)));
    cells
}
