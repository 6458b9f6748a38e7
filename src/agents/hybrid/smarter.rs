//! A* guarded by move safety, with loop detection and a longest-path escape.

use super::Strategy;
use crate::agents::fallback::first_valid_move;
use crate::agents::search::astar;
use crate::agents::{Agent, ReverseAStarAgent};
use crate::constants::{LOOP_REPEAT_LIMIT, LOOP_STUCK_LIMIT, LOOP_WINDOW, SAFETY_MARGIN};
use crate::grid::{body_after_move, Cell, Direction, Grid, Occupancy};
use crate::safety::{escape_routes, is_move_safe, reachable_count};
use std::collections::VecDeque;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SmarterHybridAgent {
    grid: Grid,
    reverse: ReverseAStarAgent,
    recent_heads: VecDeque<Cell>,
    stuck_count: u32,
    strategy: Strategy,
    path: Vec<Cell>,
}

impl SmarterHybridAgent {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            reverse: ReverseAStarAgent::new(grid),
            recent_heads: VecDeque::with_capacity(LOOP_WINDOW),
            stuck_count: 0,
            strategy: Strategy::AStar,
            path: Vec::new(),
        }
    }

    pub fn stuck_count(&self) -> u32 {
        self.stuck_count
    }

    fn remember(&mut self, head: Cell) {
        if self.recent_heads.len() == LOOP_WINDOW {
            self.recent_heads.pop_front();
        }
        self.recent_heads.push_back(head);
    }

    /// Some head position repeats often within the recent window.
    fn is_looping(&self) -> bool {
        self.recent_heads.iter().any(|cell| {
            self.recent_heads.iter().filter(|other| *other == cell).count() >= LOOP_REPEAT_LIMIT
        })
    }

    fn is_safe(&self, head: Cell, direction: Direction, body: &[Cell]) -> bool {
        let next = head.step(direction);
        is_move_safe(self.grid, next, body, SAFETY_MARGIN)
            && escape_routes(self.grid, next, body) >= 1
    }

    fn set_strategy(&mut self, strategy: Strategy, len: usize) {
        if strategy != self.strategy {
            debug!(from = %self.strategy, to = %strategy, len, "smarter hybrid switch");
            self.strategy = strategy;
        }
    }

    /// Safe move with the most reachable room once the body has moved, first
    /// in canonical order on ties.
    fn roomiest_safe_move(&self, head: Cell, food: Cell, body: &[Cell]) -> Option<Direction> {
        let mut best: Option<(usize, Direction)> = None;
        for direction in Direction::ALL {
            let next = head.step(direction);
            if !is_move_safe(self.grid, next, body, SAFETY_MARGIN) {
                continue;
            }
            let moved = body_after_move(body, next, next == food);
            let mut occupancy = Occupancy::from_body(self.grid, &moved);
            occupancy.unblock(next);
            let room = reachable_count(&occupancy, next);
            if best.map_or(true, |(r, _)| room > r) {
                best = Some((room, direction));
            }
        }
        best.map(|(_, d)| d)
    }
}

impl Agent for SmarterHybridAgent {
    fn id(&self) -> &'static str {
        "smarter_hybrid"
    }

    fn name(&self) -> &'static str {
        "Smarter Hybrid"
    }

    fn description(&self) -> &'static str {
        "Safe A* with loop detection and a longest-path escape"
    }

    fn reset(&mut self) {
        self.reverse.reset();
        self.recent_heads.clear();
        self.stuck_count = 0;
        self.strategy = Strategy::AStar;
        self.path.clear();
    }

    fn get_next_move(&mut self, head: Cell, food: Cell, body: &[Cell]) -> Option<Direction> {
        self.remember(head);
        self.path.clear();
        let occupancy = Occupancy::from_body(self.grid, body);

        let planned = astar::find_path(&occupancy, head, food);
        if let Some(path) = &planned {
            if let Some(direction) = path.first().and_then(|&next| Direction::between(head, next)) {
                if self.is_safe(head, direction, body) {
                    self.stuck_count = 0;
                    self.set_strategy(Strategy::AStar, body.len());
                    self.path = path.clone();
                    return Some(direction);
                }
            }
        }

        if planned.is_none() || self.is_looping() {
            self.stuck_count += 1;
        }

        if self.stuck_count > LOOP_STUCK_LIMIT {
            self.set_strategy(Strategy::Reverse, body.len());
            if let Some(direction) = self.reverse.get_next_move(head, food, body) {
                if is_move_safe(self.grid, head.step(direction), body, SAFETY_MARGIN) {
                    self.stuck_count = 0;
                    self.path = self.reverse.current_path().to_vec();
                    return Some(direction);
                }
            }
        }

        let direction = self
            .roomiest_safe_move(head, food, body)
            .or_else(|| {
                Direction::ALL.into_iter().find(|&d| {
                    let next = head.step(d);
                    occupancy.is_free(next) && escape_routes(self.grid, next, body) >= 1
                })
            })
            .or_else(|| first_valid_move(&occupancy, head))?;
        self.set_strategy(Strategy::Survival, body.len());
        self.path = vec![head.step(direction)];
        Some(direction)
    }

    fn current_path(&self) -> &[Cell] {
        &self.path
    }

    fn current_strategy(&self) -> Option<Strategy> {
        Some(self.strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(coords: &[(i32, i32)]) -> Vec<Cell> {
        coords.iter().copied().map(Cell::from).collect()
    }

    #[test]
    fn test_takes_safe_astar_step() {
        let grid = Grid::new(10);
        let mut agent = SmarterHybridAgent::new(grid);
        let body = cells(&[(2, 2), (1, 2), (0, 2)]);
        assert_eq!(
            agent.get_next_move(body[0], Cell::new(6, 2), &body),
            Some(Direction::Right)
        );
        assert_eq!(agent.current_strategy(), Some(Strategy::AStar));
        assert_eq!(agent.current_path().last(), Some(&Cell::new(6, 2)));
        assert_eq!(agent.stuck_count(), 0);
    }

    #[test]
    fn test_loop_detection_counts_repeats() {
        let grid = Grid::new(10);
        let mut agent = SmarterHybridAgent::new(grid);
        let a = Cell::new(1, 1);
        let b = Cell::new(2, 1);
        for cell in [a, b, a, b] {
            agent.remember(cell);
        }
        assert!(!agent.is_looping());
        agent.remember(a);
        assert!(agent.is_looping());
    }

    #[test]
    fn test_window_forgets_old_heads() {
        let grid = Grid::new(10);
        let mut agent = SmarterHybridAgent::new(grid);
        let a = Cell::new(1, 1);
        agent.remember(a);
        agent.remember(a);
        for x in 2..7 {
            agent.remember(Cell::new(x, 5));
        }
        agent.remember(a);
        assert!(!agent.is_looping());
    }

    #[test]
    fn test_unreachable_food_prefers_roomy_move() {
        let grid = Grid::new(8);
        // Food sealed in the corner by a wall of blocked cells.
        let body = cells(&[(4, 4), (1, 0), (1, 1), (0, 1), (4, 5), (4, 6)]);
        let food = Cell::new(0, 0);
        let mut agent = SmarterHybridAgent::new(grid);
        let mv = agent.get_next_move(body[0], food, &body).expect("open board");
        let next = body[0].step(mv);
        assert!(Occupancy::from_body(grid, &body).is_free(next));
        assert_eq!(agent.stuck_count(), 1);
        assert_eq!(agent.current_path(), &[next]);
        assert_eq!(agent.current_strategy(), Some(Strategy::Survival));
    }

    #[test]
    fn test_room_is_counted_after_the_move() {
        let grid = Grid::new(6);
        let agent = SmarterHybridAgent::new(grid);
        // Once the body moves, (5,3) opens and joins the bottom rows to the top.
        let body = cells(&[(0, 2), (1, 2), (1, 3), (2, 3), (3, 3), (4, 3), (5, 3), (5, 2)]);
        let mv = agent.roomiest_safe_move(body[0], Cell::new(5, 5), &body);
        assert_eq!(mv, Some(Direction::Down));
    }

    #[test]
    fn test_dead_end_food_is_still_eaten() {
        let grid = Grid::new(5);
        let body = cells(&[
            (0, 1),
            (1, 1),
            (1, 0),
            (2, 0),
            (2, 1),
            (2, 2),
            (1, 2),
            (0, 2),
            (0, 3),
        ]);
        let mut agent = SmarterHybridAgent::new(grid);
        let mv = agent.get_next_move(body[0], Cell::new(0, 0), &body);
        assert_eq!(mv, Some(Direction::Up));
        assert_eq!(agent.current_strategy(), Some(Strategy::Survival));
        assert_eq!(agent.current_path(), &[Cell::new(0, 0)]);
    }

    #[test]
    fn test_none_when_boxed_in() {
        let grid = Grid::new(5);
        let body = cells(&[(0, 0), (1, 0), (1, 1), (0, 1), (0, 2)]);
        let mut agent = SmarterHybridAgent::new(grid);
        assert_eq!(agent.get_next_move(body[0], Cell::new(4, 4), &body), None);
    }

    #[test]
    fn test_reset_clears_history() {
        let grid = Grid::new(10);
        let mut agent = SmarterHybridAgent::new(grid);
        for _ in 0..3 {
            agent.remember(Cell::new(3, 3));
        }
        agent.stuck_count = 4;
        agent.reset();
        assert!(!agent.is_looping());
        assert_eq!(agent.stuck_count(), 0);
        assert!(agent.current_path().is_empty());
    }
}
