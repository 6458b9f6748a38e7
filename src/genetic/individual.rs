//! Weighted-feature agent and the genetic operators on its weights.

use crate::agents::Agent;
use crate::constants::FOOD_REWARD;
use crate::grid::{Cell, Direction, Grid, Occupancy};
use rand::Rng;
use serde::{Deserialize, Serialize};

// === Weights ===

/// Features scored for every candidate move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    FoodDistance,
    WallDistance,
    TailDistance,
    SpaceFreedom,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::FoodDistance,
        Feature::WallDistance,
        Feature::TailDistance,
        Feature::SpaceFreedom,
    ];
}

/// One weight per feature, each in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub food_distance: f64,
    pub wall_distance: f64,
    pub tail_distance: f64,
    pub space_freedom: f64,
}

impl Default for Weights {
    /// Hand-picked starting point: chase food, keep room to move.
    fn default() -> Self {
        Self {
            food_distance: 1.0,
            wall_distance: 0.1,
            tail_distance: 0.2,
            space_freedom: 0.6,
        }
    }
}

impl Weights {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            food_distance: rng.gen_range(-1.0..=1.0),
            wall_distance: rng.gen_range(-1.0..=1.0),
            tail_distance: rng.gen_range(-1.0..=1.0),
            space_freedom: rng.gen_range(-1.0..=1.0),
        }
    }

    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::FoodDistance => self.food_distance,
            Feature::WallDistance => self.wall_distance,
            Feature::TailDistance => self.tail_distance,
            Feature::SpaceFreedom => self.space_freedom,
        }
    }

    pub fn get_mut(&mut self, feature: Feature) -> &mut f64 {
        match feature {
            Feature::FoodDistance => &mut self.food_distance,
            Feature::WallDistance => &mut self.wall_distance,
            Feature::TailDistance => &mut self.tail_distance,
            Feature::SpaceFreedom => &mut self.space_freedom,
        }
    }

    /// Clamp every weight back into `[-1, 1]`.
    pub fn clamped(mut self) -> Self {
        for feature in Feature::ALL {
            let w = self.get_mut(feature);
            *w = w.clamp(-1.0, 1.0);
        }
        self
    }
}

/// Per-feature coin flip between the two parents.
pub fn crossover<R: Rng + ?Sized>(a: &Weights, b: &Weights, rng: &mut R) -> Weights {
    let mut child = *a;
    for feature in Feature::ALL {
        if rng.gen_bool(0.5) {
            *child.get_mut(feature) = b.get(feature);
        }
    }
    child
}

/// With probability `rate` per feature, add uniform noise in
/// `[-magnitude, magnitude]`, then clamp.
pub fn mutate<R: Rng + ?Sized>(weights: &mut Weights, rate: f64, magnitude: f64, rng: &mut R) {
    for feature in Feature::ALL {
        if rng.gen_bool(rate.clamp(0.0, 1.0)) {
            let w = weights.get_mut(feature);
            *w = (*w + rng.gen_range(-magnitude..=magnitude)).clamp(-1.0, 1.0);
        }
    }
}

/// `max(0, score * 100 - moves)`: eating matters most, wandering costs.
pub fn fitness_for(score: u32, moves: u64) -> f64 {
    (score as f64 * FOOD_REWARD - moves as f64).max(0.0)
}

// === Agent ===

/// Greedy one-step agent scoring neighbors by a weighted feature sum.
#[derive(Debug, Clone)]
pub struct GeneticAgent {
    grid: Grid,
    weights: Weights,
    fitness: f64,
    path: Vec<Cell>,
}

impl GeneticAgent {
    pub fn new(grid: Grid) -> Self {
        Self::with_weights(grid, Weights::default())
    }

    pub fn with_weights(grid: Grid, weights: Weights) -> Self {
        Self {
            grid,
            weights,
            fitness: 0.0,
            path: Vec::new(),
        }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn update_fitness(&mut self, score: u32, moves: u64) {
        self.fitness = fitness_for(score, moves);
    }

    /// Weighted feature sum for moving the head onto `pos`.
    pub fn score_move(&self, occupancy: &Occupancy, pos: Cell, food: Cell, body: &[Cell]) -> f64 {
        let n = self.grid.size() as f64;
        let food_score = -(pos.manhattan(food) as f64) / (2.0 * n);
        let wall_score = self.grid.wall_distance(pos) as f64 / n;
        let tail_score = body
            .iter()
            .skip(1)
            .map(|c| pos.manhattan(*c))
            .min()
            .map_or(1.0, |d| d as f64 / (2.0 * n));
        let space_score = occupancy.free_neighbor_count(pos) as f64 / 4.0;

        self.weights.food_distance * food_score
            + self.weights.wall_distance * wall_score
            + self.weights.tail_distance * tail_score
            + self.weights.space_freedom * space_score
    }
}

impl Agent for GeneticAgent {
    fn id(&self) -> &'static str {
        "genetic"
    }

    fn name(&self) -> &'static str {
        "Genetic"
    }

    fn description(&self) -> &'static str {
        "Scores moves with evolved feature weights"
    }

    fn reset(&mut self) {
        self.path.clear();
    }

    fn get_next_move(&mut self, head: Cell, food: Cell, body: &[Cell]) -> Option<Direction> {
        let occupancy = Occupancy::from_body(self.grid, body);
        let mut best: Option<(f64, Direction, Cell)> = None;
        for (direction, next) in occupancy.free_moves(head) {
            let score = self.score_move(&occupancy, next, food, body);
            if best.map_or(true, |(s, _, _)| score > s) {
                best = Some((score, direction, next));
            }
        }
        self.path.clear();
        let (_, direction, next) = best?;
        self.path.push(next);
        Some(direction)
    }

    fn current_path(&self) -> &[Cell] {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn only(feature: Feature) -> Weights {
        let mut w = Weights {
            food_distance: 0.0,
            wall_distance: 0.0,
            tail_distance: 0.0,
            space_freedom: 0.0,
        };
        *w.get_mut(feature) = 1.0;
        w
    }

    #[test]
    fn test_food_weight_heads_for_food() {
        let grid = Grid::new(10);
        let mut agent = GeneticAgent::with_weights(grid, only(Feature::FoodDistance));
        let head = Cell::new(5, 5);
        assert_eq!(
            agent.get_next_move(head, Cell::new(5, 0), &[head]),
            Some(Direction::Up)
        );
        assert_eq!(agent.current_path(), &[Cell::new(5, 4)]);
    }

    #[test]
    fn test_wall_weight_moves_inward() {
        let grid = Grid::new(10);
        let mut agent = GeneticAgent::with_weights(grid, only(Feature::WallDistance));
        let head = Cell::new(0, 5);
        assert_eq!(
            agent.get_next_move(head, Cell::new(9, 9), &[head]),
            Some(Direction::Right)
        );
    }

    #[test]
    fn test_ties_go_to_first_direction() {
        let grid = Grid::new(10);
        let zero = Weights {
            food_distance: 0.0,
            wall_distance: 0.0,
            tail_distance: 0.0,
            space_freedom: 0.0,
        };
        let mut agent = GeneticAgent::with_weights(grid, zero);
        let head = Cell::new(5, 5);
        assert_eq!(
            agent.get_next_move(head, Cell::new(0, 0), &[head]),
            Some(Direction::Down)
        );
    }

    #[test]
    fn test_no_move_when_trapped() {
        let grid = Grid::new(5);
        let body = [
            Cell::new(0, 0),
            Cell::new(1, 0),
            Cell::new(1, 1),
            Cell::new(0, 1),
            Cell::new(0, 2),
        ];
        let mut agent = GeneticAgent::new(grid);
        assert_eq!(agent.get_next_move(body[0], Cell::new(4, 4), &body), None);
        assert!(agent.current_path().is_empty());
    }

    #[test]
    fn test_fitness_penalizes_moves_and_clamps() {
        assert_eq!(fitness_for(3, 50), 250.0);
        assert_eq!(fitness_for(0, 50), 0.0);
        let mut agent = GeneticAgent::new(Grid::default());
        agent.update_fitness(2, 10);
        assert_eq!(agent.fitness(), 190.0);
    }

    #[test]
    fn test_crossover_takes_each_weight_from_a_parent() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let a = Weights::random(&mut rng);
        let b = Weights::random(&mut rng);
        for _ in 0..50 {
            let child = crossover(&a, &b, &mut rng);
            for feature in Feature::ALL {
                let w = child.get(feature);
                assert!(w == a.get(feature) || w == b.get(feature));
            }
        }
    }

    #[test]
    fn test_mutation_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let mut w = Weights {
            food_distance: 1.0,
            wall_distance: -1.0,
            tail_distance: 0.95,
            space_freedom: -0.95,
        };
        for _ in 0..200 {
            mutate(&mut w, 1.0, 0.2, &mut rng);
            for feature in Feature::ALL {
                assert!((-1.0..=1.0).contains(&w.get(feature)));
            }
        }
    }

    #[test]
    fn test_partial_weights_are_rejected() {
        let json = r#"{"food_distance": 0.5, "wall_distance": 0.1}"#;
        assert!(serde_json::from_str::<Weights>(json).is_err());
    }
}
