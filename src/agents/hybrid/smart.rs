//! Safety-validated switching between A*, the cycle and wall following.
//!
//! Per tick:
//! 1. Past `LATE_GAME_THRESHOLD` of the grid the cycle follower is forced.
//! 2. Otherwise a fresh A* path is taken if its first steps validate.
//! 3. Otherwise a stuck detector picks wall following, else the cycle.
//!
//! Whatever was chosen, a move that fails the flood-fill safety check is
//! replaced by the safe move closest to the food, when one exists.

use super::Strategy;
use crate::agents::search::astar;
use crate::agents::{Agent, HamiltonianAgent, PlannedPath, WallFollowerAgent};
use crate::constants::{
    LATE_GAME_THRESHOLD, SAFETY_MARGIN, SPACE_CACHE_CAPACITY, SPACE_SCORE_DEPTH, STUCK_TICK_LIMIT,
};
use crate::grid::{Cell, Direction, Grid, Occupancy};
use crate::safety::{is_move_safe, space_score, validate_path_with, LruCache};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::debug;

fn body_fingerprint(body: &[Cell]) -> u64 {
    let mut hasher = DefaultHasher::new();
    body.hash(&mut hasher);
    hasher.finish()
}

#[derive(Debug, Clone)]
pub struct SmartHybridAgent {
    grid: Grid,
    astar_plan: PlannedPath,
    wall_follower: WallFollowerAgent,
    hamiltonian: HamiltonianAgent,
    strategy: Strategy,
    last_food_distance: i32,
    stuck_ticks: u32,
    space_cache: LruCache<(Cell, u64), f64>,
    override_path: Vec<Cell>,
}

impl SmartHybridAgent {
    pub fn new(grid: Grid) -> Self {
        Self::with_cache_capacity(grid, SPACE_CACHE_CAPACITY)
    }

    pub fn with_cache_capacity(grid: Grid, capacity: usize) -> Self {
        Self {
            grid,
            astar_plan: PlannedPath::new(),
            wall_follower: WallFollowerAgent::new(grid),
            hamiltonian: HamiltonianAgent::new(grid),
            strategy: Strategy::AStar,
            last_food_distance: 0,
            stuck_ticks: 0,
            space_cache: LruCache::new(capacity),
            override_path: Vec::new(),
        }
    }

    pub fn stuck_ticks(&self) -> u32 {
        self.stuck_ticks
    }

    pub fn cached_scores(&self) -> usize {
        self.space_cache.len()
    }

    /// Distance to food failed to shrink for more than the allowed ticks.
    fn detect_stuck(&mut self, head: Cell, food: Cell) -> bool {
        let distance = head.manhattan(food);
        if distance >= self.last_food_distance {
            self.stuck_ticks += 1;
        } else {
            self.stuck_ticks = 0;
        }
        self.last_food_distance = distance;
        self.stuck_ticks > STUCK_TICK_LIMIT
    }

    fn path_is_safe(&mut self, path: &[Cell], body: &[Cell]) -> bool {
        let cache = &mut self.space_cache;
        validate_path_with(self.grid, path, body, |occupancy, pos, moved| {
            cache.get_or_insert_with((pos, body_fingerprint(moved)), || {
                space_score(occupancy, pos, SPACE_SCORE_DEPTH)
            })
        })
    }

    fn choose_strategy(&mut self, head: Cell, food: Cell, body: &[Cell]) -> Strategy {
        if body.len() as f64 > self.grid.area() as f64 * LATE_GAME_THRESHOLD {
            return Strategy::Hamiltonian;
        }
        let occupancy = Occupancy::from_body(self.grid, body);
        if let Some(path) = astar::find_path(&occupancy, head, food) {
            if self.path_is_safe(&path, body) {
                self.stuck_ticks = 0;
                self.astar_plan.set(path);
                return Strategy::AStar;
            }
        }
        if self.detect_stuck(head, food) {
            Strategy::WallFollower
        } else {
            Strategy::Hamiltonian
        }
    }

    /// Safe direction nearest the food, first in canonical order on ties.
    fn safest_toward_food(&self, head: Cell, food: Cell, body: &[Cell]) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| is_move_safe(self.grid, head.step(*d), body, SAFETY_MARGIN))
            .min_by_key(|d| head.step(*d).manhattan(food))
    }
}

impl Agent for SmartHybridAgent {
    fn id(&self) -> &'static str {
        "smart_hybrid"
    }

    fn name(&self) -> &'static str {
        "Smart Hybrid"
    }

    fn description(&self) -> &'static str {
        "Validated A* with cycle and wall-following fallbacks"
    }

    fn reset(&mut self) {
        self.astar_plan.clear();
        self.wall_follower.reset();
        self.hamiltonian.reset();
        self.strategy = Strategy::AStar;
        self.last_food_distance = 0;
        self.stuck_ticks = 0;
        self.space_cache.clear();
        self.override_path.clear();
    }

    fn get_next_move(&mut self, head: Cell, food: Cell, body: &[Cell]) -> Option<Direction> {
        self.override_path.clear();
        let strategy = self.choose_strategy(head, food, body);
        if strategy != self.strategy {
            debug!(from = %self.strategy, to = %strategy, len = body.len(), "smart hybrid switch");
            self.strategy = strategy;
        }

        let chosen = match strategy {
            Strategy::AStar => {
                let occupancy = Occupancy::from_body(self.grid, body);
                self.astar_plan.advance(head, food, &occupancy)
            }
            Strategy::WallFollower => self.wall_follower.get_next_move(head, food, body),
            _ => self.hamiltonian.get_next_move(head, food, body),
        };

        let safe = chosen.map_or(false, |d| {
            is_move_safe(self.grid, head.step(d), body, SAFETY_MARGIN)
        });
        if !safe {
            if let Some(direction) = self.safest_toward_food(head, food, body) {
                self.override_path = vec![head.step(direction)];
                return Some(direction);
            }
        }
        chosen
    }

    fn current_path(&self) -> &[Cell] {
        if !self.override_path.is_empty() {
            return &self.override_path;
        }
        match self.strategy {
            Strategy::AStar => self.astar_plan.remaining(),
            Strategy::WallFollower => self.wall_follower.current_path(),
            _ => self.hamiltonian.current_path(),
        }
    }

    fn current_strategy(&self) -> Option<Strategy> {
        Some(self.strategy)
    }
}
