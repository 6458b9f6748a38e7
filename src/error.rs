//! Error types for the fallible edges of the crate.
//!
//! Agent decisions never fail; these cover lookup, configuration, persistence
//! and batch simulation.

use thiserror::Error;

/// Registry lookup failure.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown agent id `{0}`")]
    UnknownAgent(String),
}

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid size {0} is outside the supported range {1}..={2}")]
    GridSize(i32, i32, i32),
    #[error("population size must be at least {min}, got {got}")]
    PopulationSize { min: usize, got: usize },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("{name} must be within [0, 1], got {value}")]
    Fraction { name: &'static str, value: f64 },
}

/// Saving or loading a model or config file failed.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not determine home directory")]
    NoHomeDir,
}

/// A batch simulation could not start.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
