//! Snake Agents - pathfinding and decision agents for grid snake
//!
//! This crate exposes the agent library, the headless game used to score
//! agents, genetic weight tuning and a batch simulator.

pub mod agents;
pub mod constants;
pub mod error;
pub mod game;
pub mod genetic;
pub mod grid;
pub mod safety;
pub mod simulator;

pub use agents::{create_agent, Agent};
pub use grid::{Cell, Direction, Grid};
