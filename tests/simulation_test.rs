//! Integration test: batch simulation
//!
//! Seeded batches through the public simulator API, the JSON config path and
//! the shape of the generated reports.

use snake_agents::agents::AGENTS;
use snake_agents::game::EndReason;
use snake_agents::simulator::{run_simulation, simulate_single_run, SimConfig};

fn small(agent: &str, runs: u32) -> SimConfig {
    SimConfig {
        grid_size: 6,
        num_runs: runs,
        max_moves: 3_000,
        verbosity: 0,
        ..SimConfig::quick(agent)
    }
}

// =============================================================================
// Batches
// =============================================================================

#[test]
fn test_every_registered_agent_completes_a_batch() {
    for info in AGENTS {
        let report = run_simulation(&small(info.id, 2)).expect("valid config");
        assert_eq!(report.num_runs, 2, "{}", info.id);
        assert_eq!(report.outcomes.len(), 2);
        let counted: u32 = report.end_reasons.values().sum();
        assert_eq!(counted, 2);
        for outcome in &report.outcomes {
            assert!(outcome.moves <= 3_000);
            assert!(outcome.length >= 1);
        }
    }
}

#[test]
fn test_hamiltonian_wins_every_small_game() {
    let report = run_simulation(&small("hamiltonian", 4)).expect("valid config");
    assert_eq!(report.wins, 4);
    assert_eq!(report.end_reasons.get(&EndReason::Won), Some(&4));
    for outcome in &report.outcomes {
        assert_eq!(outcome.length, 36);
    }
}

#[test]
fn test_batch_matches_single_runs() {
    let config = small("bfs", 3);
    let report = run_simulation(&config).expect("valid config");
    for (run_idx, outcome) in report.outcomes.iter().enumerate() {
        let single = simulate_single_run(&config, run_idx as u32).expect("valid config");
        assert_eq!(&single, outcome);
    }
}

#[test]
fn test_different_seeds_give_different_games() {
    let a = run_simulation(&SimConfig {
        seed: Some(1),
        ..small("random", 5)
    })
    .expect("valid config");
    let b = run_simulation(&SimConfig {
        seed: Some(2),
        ..small("random", 5)
    })
    .expect("valid config");
    assert_ne!(a.outcomes, b.outcomes);
}

// =============================================================================
// Config and reports
// =============================================================================

#[test]
fn test_config_file_fills_missing_fields_with_defaults() {
    let path = std::env::temp_dir().join(format!("snake_sim_{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "agent": "greedy", "grid_size": 8, "num_runs": 3 }"#)
        .expect("writable temp dir");
    let config = SimConfig::from_json_file(&path).expect("valid json");
    assert_eq!(config.agent, "greedy");
    assert_eq!(config.grid_size, 8);
    assert_eq!(config.max_moves, SimConfig::default().max_moves);
    assert_eq!(config.seed, None);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_report_renders_text_and_json() {
    let report = run_simulation(&small("astar", 3)).expect("valid config");
    let text = report.to_text();
    assert!(text.contains("SIMULATION REPORT"));
    assert!(text.contains("astar"));
    let json: serde_json::Value = serde_json::from_str(&report.to_json()).expect("valid json");
    assert_eq!(json["num_runs"], 3);
    assert_eq!(json["outcomes"].as_array().map(Vec::len), Some(3));
}
