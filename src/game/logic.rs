//! Snake movement, food spawning and the agent-driven game loop.

use super::types::{EndReason, GameLimits, GameOutcome, StepResult};
use crate::agents::Agent;
use crate::constants::FOOD_MIN_SPAWN_DISTANCE;
use crate::grid::{body_after_move, Cell, Direction, Grid, Occupancy};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// A single snake on a square grid.
#[derive(Debug, Clone)]
pub struct SnakeGame {
    grid: Grid,
    body: Vec<Cell>,
    food: Cell,
    score: u32,
    moves: u64,
    moves_since_food: u64,
    ended: Option<EndReason>,
}

impl SnakeGame {
    /// One-cell snake in the center with food placed away from it.
    pub fn new<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> Self {
        let center = grid.center();
        let mut game = Self {
            grid,
            body: vec![center],
            food: center,
            score: 0,
            moves: 0,
            moves_since_food: 0,
            ended: None,
        };
        if !game.spawn_food(rng) {
            game.ended = Some(EndReason::Won);
        }
        game
    }

    /// Start from an explicit body and food, for tests and replays.
    pub fn from_parts(grid: Grid, body: Vec<Cell>, food: Cell) -> Self {
        Self {
            grid,
            body,
            food,
            score: 0,
            moves: 0,
            moves_since_food: 0,
            ended: None,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves(&self) -> u64 {
        self.moves
    }

    pub fn moves_since_food(&self) -> u64 {
        self.moves_since_food
    }

    pub fn ended(&self) -> Option<EndReason> {
        self.ended
    }

    /// Place food on a free cell, preferring cells more than
    /// `FOOD_MIN_SPAWN_DISTANCE` steps from the head. Returns `false` when
    /// the body covers the whole grid.
    pub fn spawn_food<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let occupied = Occupancy::from_cells(self.grid, &self.body);
        let free: Vec<Cell> = self.grid.cells().filter(|c| occupied.is_free(*c)).collect();
        let head = self.head();
        let far: Vec<Cell> = free
            .iter()
            .copied()
            .filter(|c| c.manhattan(head) > FOOD_MIN_SPAWN_DISTANCE)
            .collect();
        let pool = if far.is_empty() { &free } else { &far };
        match pool.choose(rng) {
            Some(&cell) => {
                self.food = cell;
                true
            }
            None => false,
        }
    }

    /// Apply one move. A finished game ignores further moves.
    pub fn step<R: Rng + ?Sized>(&mut self, direction: Direction, rng: &mut R) -> StepResult {
        if let Some(end) = self.ended {
            return StepResult::Ended(end);
        }
        let next = self.head().step(direction);
        self.moves += 1;
        self.moves_since_food += 1;

        if !self.grid.contains(next) {
            return self.finish(EndReason::Wall);
        }
        if Occupancy::from_body(self.grid, &self.body).is_blocked(next) {
            return self.finish(EndReason::SelfCollision);
        }

        let grows = next == self.food;
        self.body = body_after_move(&self.body, next, grows);
        if !grows {
            return StepResult::Moved;
        }

        self.score += 1;
        self.moves_since_food = 0;
        if self.body.len() >= self.grid.area() || !self.spawn_food(rng) {
            return self.finish(EndReason::Won);
        }
        StepResult::Ate
    }

    fn finish(&mut self, end: EndReason) -> StepResult {
        self.ended = Some(end);
        StepResult::Ended(end)
    }

    fn outcome(&self, end: EndReason) -> GameOutcome {
        GameOutcome {
            score: self.score,
            moves: self.moves,
            length: self.body.len(),
            end,
        }
    }

    /// Let `agent` drive this game until it ends or hits a limit.
    pub fn play<R: Rng + ?Sized>(
        &mut self,
        agent: &mut dyn Agent,
        limits: GameLimits,
        rng: &mut R,
    ) -> GameOutcome {
        loop {
            if let Some(end) = self.ended {
                return self.outcome(end);
            }
            if self.moves >= limits.max_moves {
                self.ended = Some(EndReason::MoveLimit);
                continue;
            }
            if self.moves_since_food >= limits.starvation_moves {
                self.ended = Some(EndReason::Starved);
                continue;
            }
            match agent.get_next_move(self.head(), self.food, &self.body) {
                Some(direction) => {
                    self.step(direction, rng);
                }
                None => {
                    self.ended = Some(EndReason::NoMove);
                }
            }
        }
    }
}

/// Play one fresh game with `agent` and report how it went.
pub fn play_game<R: Rng + ?Sized>(
    agent: &mut dyn Agent,
    grid: Grid,
    limits: GameLimits,
    rng: &mut R,
) -> GameOutcome {
    agent.reset();
    let mut game = SnakeGame::new(grid, rng);
    let outcome = game.play(agent, limits, rng);
    debug!(
        agent = agent.id(),
        score = outcome.score,
        moves = outcome.moves,
        end = %outcome.end,
        "game finished"
    );
    outcome
}
