//! Breadth-first search: shortest path in steps.

use super::{follow_plan, reconstruct};
use crate::agents::fallback::first_valid_move;
use crate::agents::{Agent, PlannedPath};
use crate::grid::{Cell, Direction, Grid, Occupancy};
use std::collections::VecDeque;

/// Shortest route from `start` to `goal`; ties follow direction order.
pub fn find_path(occupancy: &Occupancy, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
    let grid = occupancy.grid();
    let start_index = grid.index(start)?;
    if start == goal {
        return Some(Vec::new());
    }
    let mut parents = vec![None; grid.area()];
    let mut visited = vec![false; grid.area()];
    visited[start_index] = true;
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        let Some(current_index) = grid.index(current) else { continue };
        for next in occupancy.free_neighbors(current) {
            let Some(next_index) = grid.index(next) else { continue };
            if visited[next_index] {
                continue;
            }
            visited[next_index] = true;
            parents[next_index] = Some(current_index);
            if next == goal {
                return reconstruct(grid, &parents, start, goal);
            }
            queue.push_back(next);
        }
    }
    None
}

/// Follows a cached BFS path, re-planning when it runs out or goes stale.
#[derive(Debug, Clone)]
pub struct BfsAgent {
    grid: Grid,
    plan: PlannedPath,
}

impl BfsAgent {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            plan: PlannedPath::new(),
        }
    }
}

impl Agent for BfsAgent {
    fn id(&self) -> &'static str {
        "bfs"
    }

    fn name(&self) -> &'static str {
        "BFS"
    }

    fn description(&self) -> &'static str {
        "Breadth-first search for the shortest path to food"
    }

    fn reset(&mut self) {
        self.plan.clear();
    }

    fn get_next_move(&mut self, head: Cell, food: Cell, body: &[Cell]) -> Option<Direction> {
        let occupancy = Occupancy::from_body(self.grid, body);
        follow_plan(&mut self.plan, &occupancy, head, food, false, find_path)
            .or_else(|| first_valid_move(&occupancy, head))
    }

    fn current_path(&self) -> &[Cell] {
        self.plan.remaining()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::search::test_support::assert_valid_path;

    #[test]
    fn test_shortest_on_empty_grid() {
        let grid = Grid::new(10);
        let occ = Occupancy::empty(grid);
        let start = Cell::new(0, 0);
        let goal = Cell::new(9, 9);
        let path = find_path(&occ, start, goal).expect("reachable");
        assert_eq!(path.len(), 18);
        assert_valid_path(start, goal, &path);
    }

    #[test]
    fn test_routes_around_wall() {
        let grid = Grid::new(5);
        let wall: Vec<Cell> = (0..4).map(|y| Cell::new(2, y)).collect();
        let occ = Occupancy::from_cells(grid, &wall);
        let path = find_path(&occ, Cell::new(0, 0), Cell::new(4, 0)).expect("gap at bottom");
        assert_eq!(path.len(), 12);
        assert!(path.contains(&Cell::new(2, 4)));
    }

    #[test]
    fn test_unreachable_goal() {
        let grid = Grid::new(5);
        let wall: Vec<Cell> = (0..5).map(|y| Cell::new(2, y)).collect();
        let occ = Occupancy::from_cells(grid, &wall);
        assert!(find_path(&occ, Cell::new(0, 0), Cell::new(4, 4)).is_none());
    }

    #[test]
    fn test_agent_consumes_cached_path() {
        let grid = Grid::new(10);
        let mut agent = BfsAgent::new(grid);
        let food = Cell::new(3, 0);
        let mut body = vec![Cell::new(0, 0)];
        assert_eq!(agent.get_next_move(body[0], food, &body), Some(Direction::Right));
        assert_eq!(agent.current_path().len(), 2);
        body = vec![Cell::new(1, 0)];
        assert_eq!(agent.get_next_move(body[0], food, &body), Some(Direction::Right));
        assert_eq!(agent.current_path(), &[Cell::new(3, 0)]);
        agent.reset();
        assert!(agent.current_path().is_empty());
    }

    #[test]
    fn test_agent_falls_back_when_food_unreachable() {
        let grid = Grid::new(5);
        let mut agent = BfsAgent::new(grid);
        // The body seals the head into the top of the left column.
        let body: Vec<Cell> = [(0, 2), (0, 3), (1, 3), (1, 2), (1, 1), (1, 0), (2, 0)]
            .into_iter()
            .map(Cell::from)
            .collect();
        let mv = agent.get_next_move(body[0], Cell::new(4, 4), &body);
        assert_eq!(mv, Some(Direction::Up));
        assert!(agent.current_path().is_empty());
    }
}
