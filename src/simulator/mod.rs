//! Batch simulator for comparing agents.
//!
//! Plays many seeded headless games per agent and aggregates:
//! - Average, minimum, median and maximum score
//! - Move efficiency (moves per food)
//! - How games ended (collisions, starvation, move cap, wins)
//!
//! Games run in parallel with rayon; each one owns its agent and RNG.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{build_agent, run_simulation, simulate_single_run};
