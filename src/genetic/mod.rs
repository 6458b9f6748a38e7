//! Linear-feature agent and the evolutionary loop that tunes its weights.

pub mod config;
pub mod individual;
pub mod persistence;
pub mod population;
pub mod trainer;

pub use config::GeneticConfig;
pub use individual::{crossover, fitness_for, mutate, Feature, GeneticAgent, Weights};
pub use persistence::{default_model_path, load_model, save_model, SavedModel};
pub use population::{GenerationStats, Individual, Population};
pub use trainer::{evaluate, train, train_with_progress, TrainingReport};
