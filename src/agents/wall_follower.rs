//! Keeps a wall (grid edge or body) on one side and hugs it.

use super::fallback::first_valid_move;
use super::Agent;
use crate::constants::WALL_FOLLOWER_LOOKAHEAD;
use crate::grid::{body_after_move, Cell, Direction, Grid, Occupancy};
use serde::{Deserialize, Serialize};

/// Which hand stays on the wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Right,
    Left,
}

/// Order the nearest-wall scan checks directions in.
const SCAN_ORDER: [Direction; 4] = [
    Direction::Right,
    Direction::Down,
    Direction::Left,
    Direction::Up,
];

#[derive(Debug, Clone)]
pub struct WallFollowerAgent {
    grid: Grid,
    heading: Direction,
    side: Side,
    path: Vec<Cell>,
}

impl WallFollowerAgent {
    pub fn new(grid: Grid) -> Self {
        Self::with_side(grid, Side::Right)
    }

    pub fn with_side(grid: Grid, side: Side) -> Self {
        Self {
            grid,
            heading: Direction::Right,
            side,
            path: Vec::new(),
        }
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    fn side_of(&self, heading: Direction) -> Direction {
        match self.side {
            Side::Right => heading.turn_right(),
            Side::Left => heading.turn_left(),
        }
    }

    /// Direction whose straight-line run hits a wall soonest.
    fn nearest_wall(occupancy: &Occupancy, pos: Cell) -> Direction {
        let mut best = (SCAN_ORDER[0], i32::MAX);
        for direction in SCAN_ORDER {
            let mut distance = 0;
            let mut current = pos.step(direction);
            while occupancy.is_free(current) {
                distance += 1;
                current = current.step(direction);
            }
            if distance < best.1 {
                best = (direction, distance);
            }
        }
        best.0
    }

    /// Heading for the next step from `pos` given the current `heading`.
    fn choose_heading(&self, occupancy: &Occupancy, pos: Cell, heading: Direction) -> Direction {
        let wall_on_side = occupancy.is_blocked(pos.step(self.side_of(heading)));

        if !wall_on_side {
            let toward = Self::nearest_wall(occupancy, pos);
            if toward != heading {
                return toward;
            }
        } else if occupancy.is_free(pos.step(heading)) {
            return heading;
        }

        let turns = match self.side {
            Side::Right => [heading.turn_left(), heading.turn_right(), heading.opposite()],
            Side::Left => [heading.turn_right(), heading.turn_left(), heading.opposite()],
        };
        turns
            .into_iter()
            .find(|d| occupancy.is_free(pos.step(*d)))
            .unwrap_or(heading)
    }

    /// Simulate the follower a few steps ahead for display.
    fn look_ahead(&self, start: Cell, heading: Direction, body: &[Cell]) -> Vec<Cell> {
        let mut path = Vec::new();
        let mut body = body.to_vec();
        let mut pos = start;
        let mut heading = heading;
        for _ in 0..WALL_FOLLOWER_LOOKAHEAD {
            let occupancy = Occupancy::from_body(self.grid, &body);
            let next = pos.step(heading);
            if !occupancy.is_free(next) {
                break;
            }
            path.push(next);
            body = body_after_move(&body, next, false);
            pos = next;
            let occupancy = Occupancy::from_body(self.grid, &body);
            heading = self.choose_heading(&occupancy, pos, heading);
        }
        path
    }
}

impl Agent for WallFollowerAgent {
    fn id(&self) -> &'static str {
        "wall_follower"
    }

    fn name(&self) -> &'static str {
        "Wall Follower"
    }

    fn description(&self) -> &'static str {
        "Follows walls and edges of the grid"
    }

    fn reset(&mut self) {
        self.heading = Direction::Right;
        self.path.clear();
    }

    fn get_next_move(&mut self, head: Cell, food: Cell, body: &[Cell]) -> Option<Direction> {
        let occupancy = Occupancy::from_body(self.grid, body);

        if head.is_adjacent(food) && occupancy.is_free(food) {
            self.path = vec![food];
            return Direction::between(head, food);
        }

        let mut heading = self.choose_heading(&occupancy, head, self.heading);
        if !occupancy.is_free(head.step(heading)) {
            heading = first_valid_move(&occupancy, head)?;
        }
        self.heading = heading;
        self.path = self.look_ahead(head, heading, body);
        Some(heading)
    }

    fn current_path(&self) -> &[Cell] {
        &self.path
    }
}
