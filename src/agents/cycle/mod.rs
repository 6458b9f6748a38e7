//! Agents that walk a precomputed space-filling cycle.

pub mod advanced;
pub mod cycle;
pub mod hamiltonian;

pub use advanced::AdvancedHamiltonianAgent;
pub use cycle::HamiltonianCycle;
pub use hamiltonian::HamiltonianAgent;

use super::fallback::first_valid_move;
use crate::constants::MAX_SHORTCUT_SKIP;
use crate::grid::{Cell, Direction, Grid, Occupancy};
use tracing::debug;

/// Largest number of cycle cells a shortcut may jump over.
pub fn max_skip(grid: Grid) -> usize {
    (grid.size() / 2).min(MAX_SHORTCUT_SKIP) as usize
}

/// Rebuild `cycle` if it was built for another grid or cannot place
/// `head`/`food`. Returns whether it was rebuilt.
///
/// The left-out cell of an odd grid counts as placed.
pub(crate) fn ensure_consistent(
    cycle: &mut HamiltonianCycle,
    grid: Grid,
    head: Cell,
    food: Cell,
) -> bool {
    if cycle.grid() == grid && cycle.covers(head) && cycle.covers(food) {
        return false;
    }
    debug!(?head, ?food, "rebuilding hamiltonian cycle");
    *cycle = HamiltonianCycle::build(grid);
    true
}

/// True when none of the `distance - 1` cells after `from` holds a body segment.
pub(crate) fn skipped_cells_clear(
    cycle: &HamiltonianCycle,
    body: &Occupancy,
    from: usize,
    distance: usize,
) -> bool {
    (1..distance).all(|k| body.is_free(cycle.cell_at(from + k)))
}

/// Cycle index the follower steers for: the food's own index, or the nearest
/// detour entry strictly ahead when the food sits on the left-out cell.
pub(crate) fn target_index(cycle: &HamiltonianCycle, head_index: usize, food: Cell) -> usize {
    if let Some(i) = cycle.index_of(food) {
        return i;
    }
    cycle
        .detour_entries()
        .iter()
        .copied()
        .min_by_key(|&entry| cycle.forward_distance(head_index + 1, entry))
        .unwrap_or(head_index)
}

/// The left-out cell, when it holds the food and the head is at a detour
/// entry whose skipped cycle cell is passable.
pub(crate) fn detour_move(
    cycle: &HamiltonianCycle,
    occupancy: &Occupancy,
    head_index: usize,
    food: Cell,
) -> Option<Cell> {
    let missing = cycle.left_out()?;
    if food != missing || !cycle.is_detour_entry(head_index) {
        return None;
    }
    let skipped = cycle.cell_at(head_index + 1);
    (occupancy.is_free(missing) && occupancy.is_free(skipped)).then_some(missing)
}

/// Way back onto the cycle from the left-out cell.
///
/// The exit of the detour entered from the neck comes first, then any free
/// cycle neighbor, then any free neighbor at all.
pub(crate) fn rejoin_move(
    cycle: &HamiltonianCycle,
    occupancy: &Occupancy,
    head: Cell,
    body: &[Cell],
) -> Option<Direction> {
    let exit = body
        .get(1)
        .and_then(|&neck| cycle.index_of(neck))
        .filter(|&i| cycle.is_detour_entry(i))
        .map(|i| cycle.cell_at(i + 2))
        .filter(|&cell| cell.is_adjacent(head) && occupancy.is_free(cell));
    match exit.or_else(|| occupancy.free_neighbors(head).find(|c| cycle.contains(*c))) {
        Some(cell) => Direction::between(head, cell),
        None => first_valid_move(occupancy, head),
    }
}

/// The chosen cell followed by the cycle walk from it to `target`, ending on
/// the food when the food is off the cycle.
pub(crate) fn plan_toward(
    cycle: &HamiltonianCycle,
    chosen: Cell,
    target: usize,
    food: Cell,
) -> Vec<Cell> {
    let mut path = vec![chosen];
    if let Some(from) = cycle.index_of(chosen) {
        path.extend(cycle.walk(from, target));
    }
    if !cycle.contains(food) && path.last() != Some(&food) {
        path.push(food);
    }
    path
}
