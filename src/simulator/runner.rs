//! Batch runner: many independent headless games, one agent per game.

use super::config::SimConfig;
use super::report::SimReport;
use crate::agents::{create_agent, Agent};
use crate::error::{RegistryError, SimError};
use crate::game::{derive_seed, play_game, GameOutcome};
use crate::genetic::GeneticAgent;
use crate::grid::Grid;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::info;

/// Build the configured agent; `genetic` picks up saved weights when given.
pub fn build_agent(config: &SimConfig, grid: Grid) -> Result<Box<dyn Agent>, RegistryError> {
    match (&config.weights, config.agent.as_str()) {
        (Some(weights), "genetic") => Ok(Box::new(GeneticAgent::with_weights(grid, *weights))),
        _ => create_agent(&config.agent, grid),
    }
}

/// Play a single game with its own RNG stream.
pub fn simulate_single_run(config: &SimConfig, run_idx: u32) -> Result<GameOutcome, SimError> {
    let grid = config.grid()?;
    let mut agent = build_agent(config, grid)?;
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(derive_seed(seed, &[run_idx as u64])),
        None => ChaCha8Rng::from_entropy(),
    };
    Ok(play_game(agent.as_mut(), grid, config.limits(grid), &mut rng))
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport, SimError> {
    config.validate()?;
    build_agent(config, config.grid()?)?;

    let outcomes = (0..config.num_runs)
        .into_par_iter()
        .map(|run_idx| {
            let outcome = simulate_single_run(config, run_idx)?;
            if config.verbosity >= 2 {
                println!(
                    "Run {}/{} - score {}, moves {}, length {}, end {}",
                    run_idx + 1,
                    config.num_runs,
                    outcome.score,
                    outcome.moves,
                    outcome.length,
                    outcome.end
                );
            }
            Ok(outcome)
        })
        .collect::<Result<Vec<_>, SimError>>()?;

    let report = SimReport::from_outcomes(&config.agent, config.grid_size, outcomes);
    info!(
        agent = %config.agent,
        runs = report.num_runs,
        avg_score = report.avg_score,
        wins = report.wins,
        "simulation finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::genetic::Weights;

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = SimConfig {
            num_runs: 4,
            ..SimConfig::quick("bfs")
        };
        let a = run_simulation(&config).expect("valid config");
        let b = run_simulation(&config).expect("valid config");
        assert_eq!(a.outcomes, b.outcomes);
        assert_eq!(a.num_runs, 4);
    }

    #[test]
    fn test_unknown_agent_fails_before_running() {
        let config = SimConfig::quick("teleporter");
        assert!(matches!(
            run_simulation(&config),
            Err(SimError::Registry(RegistryError::UnknownAgent(_)))
        ));
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let config = SimConfig {
            num_runs: 0,
            ..SimConfig::quick("astar")
        };
        assert!(matches!(
            run_simulation(&config),
            Err(SimError::Config(ConfigError::Zero("num_runs")))
        ));
    }

    #[test]
    fn test_genetic_uses_supplied_weights() {
        let weights = Weights {
            food_distance: 0.3,
            wall_distance: 0.0,
            tail_distance: -0.4,
            space_freedom: 0.9,
        };
        let config = SimConfig {
            agent: "genetic".to_string(),
            weights: Some(weights),
            ..SimConfig::quick("genetic")
        };
        let grid = config.grid().expect("valid size");
        let agent = build_agent(&config, grid).expect("registered");
        assert_eq!(agent.id(), "genetic");
    }

    #[test]
    fn test_unsupported_grid_is_rejected() {
        let config = SimConfig {
            grid_size: 2,
            ..SimConfig::quick("astar")
        };
        assert!(matches!(
            run_simulation(&config),
            Err(SimError::Config(ConfigError::GridSize(2, _, _)))
        ));
        assert!(matches!(
            simulate_single_run(&config, 0),
            Err(SimError::Config(ConfigError::GridSize(2, _, _)))
        ));
    }

    #[test]
    fn test_first_run_outcome_is_stable() {
        let config = SimConfig::quick("hamiltonian");
        let first = simulate_single_run(&config, 0).expect("valid config");
        let again = simulate_single_run(&config, 0).expect("valid config");
        assert_eq!(first, again);
    }
}
