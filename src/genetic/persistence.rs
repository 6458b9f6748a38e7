//! JSON save files for trained weights under ~/.snake_agents/.

use super::individual::Weights;
use super::population::Individual;
use crate::error::PersistenceError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL_FILE: &str = "genetic_model.json";

/// On-disk shape of a trained model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedModel {
    pub weights: Weights,
    pub fitness: f64,
    pub generation: u32,
}

impl SavedModel {
    pub fn from_best(best: &Individual, generation: u32) -> Self {
        Self {
            weights: best.weights,
            fitness: best.fitness,
            generation,
        }
    }
}

/// The ~/.snake_agents/ directory, created if needed.
pub fn data_dir() -> Result<PathBuf, PersistenceError> {
    let dir = dirs::home_dir()
        .ok_or(PersistenceError::NoHomeDir)?
        .join(".snake_agents");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn default_model_path() -> Result<PathBuf, PersistenceError> {
    Ok(data_dir()?.join(DEFAULT_MODEL_FILE))
}

/// Write `model` as pretty-printed JSON, creating parent directories.
pub fn save_model(path: &Path, model: &SavedModel) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(model)?;
    fs::write(path, json)?;
    Ok(())
}

/// Read a model back. Missing weights are an error, not a default.
pub fn load_model(path: &Path) -> Result<SavedModel, PersistenceError> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
