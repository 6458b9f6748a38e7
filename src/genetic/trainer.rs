//! Generation loop: score every individual with seeded games, then evolve.

use super::config::GeneticConfig;
use super::individual::{fitness_for, GeneticAgent, Weights};
use super::population::{GenerationStats, Individual, Population};
use crate::error::ConfigError;
use crate::game::{derive_seed, play_game, GameLimits};
use crate::grid::Grid;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

/// Result of a finished training run.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub generations: u32,
    pub stats: Vec<GenerationStats>,
    pub best: Individual,
}

/// Mean fitness of `weights` over the configured number of games.
///
/// Each game gets its own RNG derived from (seed, generation, individual,
/// game), so the result does not depend on thread scheduling.
pub fn evaluate(
    config: &GeneticConfig,
    weights: &Weights,
    generation: u32,
    index: usize,
) -> Result<f64, ConfigError> {
    let grid = Grid::try_new(config.grid_size)?;
    let limits = GameLimits::with_max_moves(grid, config.max_moves);
    let total: f64 = (0..config.games_per_individual)
        .map(|game| {
            let seed = derive_seed(
                config.seed,
                &[generation as u64, index as u64, game as u64],
            );
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut agent = GeneticAgent::with_weights(grid, *weights);
            let outcome = play_game(&mut agent, grid, limits, &mut rng);
            fitness_for(outcome.score, outcome.moves)
        })
        .sum();
    Ok(total / config.games_per_individual as f64)
}

/// Run `config.generations` rounds of evaluation and evolution.
pub fn train(config: &GeneticConfig) -> Result<TrainingReport, ConfigError> {
    train_with_progress(config, |_| {})
}

/// Like [`train`], calling `on_generation` after each evolution step.
pub fn train_with_progress<F>(
    config: &GeneticConfig,
    mut on_generation: F,
) -> Result<TrainingReport, ConfigError>
where
    F: FnMut(&GenerationStats),
{
    config.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut population = Population::new(config, &mut rng);

    for generation in 0..config.generations {
        let fitness: Vec<f64> = population
            .individuals()
            .par_iter()
            .enumerate()
            .map(|(index, individual)| evaluate(config, &individual.weights, generation, index))
            .collect::<Result<Vec<f64>, ConfigError>>()?;
        population.assign_fitness(&fitness);
        population.evolve(&mut rng);

        if let Some(stats) = population.stats().last() {
            info!(
                generation = stats.generation,
                best = stats.best_fitness,
                mean = stats.mean_fitness,
                "generation evaluated"
            );
            on_generation(stats);
        }
    }

    let best = population
        .best()
        .copied()
        .unwrap_or_else(|| Individual::new(Weights::default()));
    debug!(fitness = best.fitness, "training finished");
    Ok(TrainingReport {
        generations: population.generation(),
        stats: population.stats().to_vec(),
        best,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> GeneticConfig {
        GeneticConfig {
            population_size: 6,
            generations: 2,
            games_per_individual: 2,
            grid_size: 6,
            max_moves: 200,
            seed: 99,
            ..Default::default()
        }
    }

    #[test]
    fn test_training_is_reproducible() {
        let a = train(&tiny()).expect("valid config");
        let b = train(&tiny()).expect("valid config");
        assert_eq!(a.stats, b.stats);
        assert_eq!(a.best, b.best);
        assert_eq!(a.generations, 2);
        assert_eq!(a.stats.len(), 2);
    }

    #[test]
    fn test_progress_called_per_generation() {
        let mut seen = Vec::new();
        train_with_progress(&tiny(), |stats| seen.push(stats.generation)).expect("valid config");
        assert_eq!(seen, vec![0, 1]);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GeneticConfig {
            generations: 0,
            ..tiny()
        };
        assert_eq!(
            train(&config).unwrap_err(),
            ConfigError::Zero("generations")
        );
    }

    #[test]
    fn test_food_chasing_weights_score() {
        let config = tiny();
        let greedy = Weights {
            food_distance: 1.0,
            wall_distance: 0.0,
            tail_distance: 0.0,
            space_freedom: 0.0,
        };
        let fitness = evaluate(&config, &greedy, 0, 0).expect("valid config");
        assert!(fitness > 0.0);
    }
}
