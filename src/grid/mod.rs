//! Grid and neighbor model: cells, directions, bounds and occupancy.

pub mod occupancy;
pub mod types;

pub use occupancy::{body_after_move, valid_neighbors, Occupancy};
pub use types::*;
