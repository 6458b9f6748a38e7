//! Graph-search agents.
//!
//! Every `find_path` treats the occupancy as a static obstacle set, expands
//! each cell at most once, and returns the route excluding `start` and
//! including `goal`.

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;
pub mod greedy;
pub mod reverse_astar;

pub use astar::{AStarAgent, BodyAwareAStarAgent};
pub use bfs::BfsAgent;
pub use dfs::DfsAgent;
pub use dijkstra::DijkstraAgent;
pub use greedy::GreedyAgent;
pub use reverse_astar::ReverseAStarAgent;

use super::path::PlannedPath;
use crate::grid::{Cell, Direction, Grid, Occupancy};

/// Walk the parent links back from `goal` to `start`.
pub(crate) fn reconstruct(
    grid: Grid,
    parents: &[Option<usize>],
    start: Cell,
    goal: Cell,
) -> Option<Vec<Cell>> {
    let start_index = grid.index(start)?;
    let mut index = grid.index(goal)?;
    let mut path = Vec::new();
    while index != start_index {
        path.push(grid.cell_at(index));
        index = parents[index]?;
    }
    path.reverse();
    Some(path)
}

/// Step along the cached plan, re-planning with `plan_fn` when it is stale.
///
/// With `replan_every_tick` the cache is dropped first, so the plan is only
/// kept for inspection.
pub(crate) fn follow_plan<F>(
    plan: &mut PlannedPath,
    occupancy: &Occupancy,
    head: Cell,
    food: Cell,
    replan_every_tick: bool,
    plan_fn: F,
) -> Option<Direction>
where
    F: FnOnce(&Occupancy, Cell, Cell) -> Option<Vec<Cell>>,
{
    if replan_every_tick {
        plan.clear();
    } else if let Some(direction) = plan.advance(head, food, occupancy) {
        return Some(direction);
    }
    let cells = plan_fn(occupancy, head, food)?;
    plan.set(cells);
    plan.advance(head, food, occupancy)
}
