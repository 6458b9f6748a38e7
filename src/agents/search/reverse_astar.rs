//! Longest-path search for stalling until the body clears.
//!
//! The frontier is a max-heap on path length, preferring cells farther from
//! the goal on ties. Every cell is expanded once, so the result is a long
//! simple path rather than the longest one; a detour pass then widens it.

use super::follow_plan;
use crate::agents::fallback::farthest_move;
use crate::agents::{Agent, PlannedPath};
use crate::grid::{Cell, Direction, Grid, Occupancy};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

struct Node {
    cell: Cell,
    parent: Option<usize>,
}

fn chain(arena: &[Node], mut node: usize) -> Vec<Cell> {
    let mut cells = vec![arena[node].cell];
    while let Some(parent) = arena[node].parent {
        cells.push(arena[parent].cell);
        node = parent;
    }
    cells.reverse();
    cells
}

/// A long simple route from `start` to `goal` (excluding `start`).
pub fn find_path(occupancy: &Occupancy, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
    let grid = occupancy.grid();
    grid.index(start)?;
    if start == goal || !occupancy.is_free(goal) {
        return None;
    }
    let mut closed = vec![false; grid.area()];
    let mut arena = vec![Node {
        cell: start,
        parent: None,
    }];
    let mut open = BinaryHeap::new();
    let mut seq = 0u64;
    open.push((0usize, start.manhattan(goal), Reverse(seq), 0usize));
    let mut best: Option<(usize, usize)> = None;

    while let Some((length, _, _, node)) = open.pop() {
        let current = arena[node].cell;
        let Some(index) = grid.index(current) else { continue };
        if closed[index] {
            continue;
        }
        closed[index] = true;
        for next in occupancy.free_neighbors(current) {
            if next == goal {
                if best.map_or(true, |(len, _)| length + 1 > len) {
                    best = Some((length + 1, node));
                }
                continue;
            }
            let Some(next_index) = grid.index(next) else { continue };
            if closed[next_index] {
                continue;
            }
            arena.push(Node {
                cell: next,
                parent: Some(node),
            });
            seq += 1;
            open.push((length + 1, next.manhattan(goal), Reverse(seq), arena.len() - 1));
        }
    }

    let (_, last) = best?;
    let mut route = chain(&arena, last);
    route.push(goal);
    extend_with_detours(occupancy, &mut route);
    route.remove(0);
    Some(route)
}

/// Lengthen `route` in place: wherever a step `a -> b` has free, unused cells
/// `a'`, `b'` beside it on the same side, replace it with `a -> a' -> b' -> b`.
pub fn extend_with_detours(occupancy: &Occupancy, route: &mut Vec<Cell>) {
    let grid = occupancy.grid();
    let mut used = vec![false; grid.area()];
    for &cell in route.iter() {
        if let Some(i) = grid.index(cell) {
            used[i] = true;
        }
    }
    let usable = |cell: Cell, used: &[bool]| {
        occupancy.is_free(cell) && grid.index(cell).map_or(false, |i| !used[i])
    };

    let mut i = 0;
    while i + 1 < route.len() {
        let (a, b) = (route[i], route[i + 1]);
        let Some(heading) = Direction::between(a, b) else {
            i += 1;
            continue;
        };
        let detour = [heading.turn_right(), heading.turn_left()]
            .into_iter()
            .map(|side| (a.step(side), b.step(side)))
            .find(|&(a2, b2)| usable(a2, &used) && usable(b2, &used));
        match detour {
            Some((a2, b2)) => {
                for cell in [a2, b2] {
                    if let Some(idx) = grid.index(cell) {
                        used[idx] = true;
                    }
                }
                route.insert(i + 1, b2);
                route.insert(i + 1, a2);
            }
            None => i += 1,
        }
    }
}

/// Follows the longest path it can find, keeping the plan until it breaks.
#[derive(Debug, Clone)]
pub struct ReverseAStarAgent {
    grid: Grid,
    plan: PlannedPath,
}

impl ReverseAStarAgent {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            plan: PlannedPath::new(),
        }
    }
}

impl Agent for ReverseAStarAgent {
    fn id(&self) -> &'static str {
        "reverse_astar"
    }

    fn name(&self) -> &'static str {
        "Reverse A*"
    }

    fn description(&self) -> &'static str {
        "Takes the longest route it can find to the food"
    }

    fn reset(&mut self) {
        self.plan.clear();
    }

    fn get_next_move(&mut self, head: Cell, food: Cell, body: &[Cell]) -> Option<Direction> {
        let occupancy = Occupancy::from_body(self.grid, body);
        follow_plan(&mut self.plan, &occupancy, head, food, false, find_path)
            .or_else(|| farthest_move(&occupancy, head, food))
    }

    fn current_path(&self) -> &[Cell] {
        self.plan.remaining()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::search::astar;
    use crate::agents::search::test_support::assert_valid_path;

    #[test]
    fn test_longer_than_shortest_on_empty_grid() {
        let grid = Grid::new(10);
        let occ = Occupancy::empty(grid);
        let start = Cell::new(0, 0);
        let goal = Cell::new(9, 9);
        let path = find_path(&occ, start, goal).expect("reachable");
        assert_valid_path(start, goal, &path);
        assert!(path.len() > 18, "got {}", path.len());
        assert!(path.len() <= 98);
    }

    #[test]
    fn test_never_shorter_than_astar() {
        let grid = Grid::new(8);
        let blocks: Vec<Cell> = (0..6).map(|y| Cell::new(3, y)).collect();
        let occ = Occupancy::from_cells(grid, &blocks);
        let start = Cell::new(1, 1);
        let goal = Cell::new(6, 1);
        let longest = find_path(&occ, start, goal).expect("reachable");
        let shortest = astar::find_path(&occ, start, goal).expect("reachable");
        assert_valid_path(start, goal, &longest);
        assert!(longest.len() >= shortest.len());
        for cell in &longest {
            assert!(occ.is_free(*cell));
        }
    }

    #[test]
    fn test_detours_only_use_free_cells() {
        let grid = Grid::new(4);
        let occ = Occupancy::from_cells(grid, &[Cell::new(0, 1)]);
        let mut route = vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)];
        extend_with_detours(&occ, &mut route);
        assert_valid_path(Cell::new(0, 0), Cell::new(2, 0), &route[1..]);
        assert!(!route.contains(&Cell::new(0, 1)));
        assert!(route.len() > 3);
    }

    #[test]
    fn test_unreachable_goal() {
        let grid = Grid::new(5);
        let wall: Vec<Cell> = (0..5).map(|y| Cell::new(2, y)).collect();
        let occ = Occupancy::from_cells(grid, &wall);
        assert!(find_path(&occ, Cell::new(0, 0), Cell::new(4, 4)).is_none());
    }

    #[test]
    fn test_agent_replans_after_invalidation() {
        let grid = Grid::new(8);
        let mut agent = ReverseAStarAgent::new(grid);
        let body = [Cell::new(3, 3)];
        let food = Cell::new(5, 5);
        assert!(agent.get_next_move(body[0], food, &body).is_some());
        let planned = agent.current_path().len();
        assert!(planned > 4);
        // New food: the stale plan is dropped and a fresh one ends at the food.
        let food = Cell::new(0, 7);
        assert!(agent.get_next_move(body[0], food, &body).is_some());
        assert_eq!(agent.current_path().last(), Some(&food));
    }

    #[test]
    fn test_agent_falls_back_away_from_food() {
        let grid = Grid::new(5);
        let mut agent = ReverseAStarAgent::new(grid);
        let body: Vec<Cell> = [(2, 0), (3, 0), (3, 1), (3, 2), (3, 3), (3, 4), (2, 4)]
            .into_iter()
            .map(Cell::from)
            .collect();
        // Food beyond the wall is unreachable; Left moves farthest from it.
        assert_eq!(
            agent.get_next_move(body[0], Cell::new(4, 2), &body),
            Some(Direction::Left)
        );
    }
}
