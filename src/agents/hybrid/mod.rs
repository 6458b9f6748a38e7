//! Composite agents that switch between sub-strategies.

pub mod length_switch;
pub mod smart;
pub mod smarter;

pub use length_switch::{HybridAgent, PerfectAgent};
pub use smart::SmartHybridAgent;
pub use smarter::SmarterHybridAgent;

use std::fmt;

/// Sub-strategy a composite agent is currently using.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    AStar,
    Hamiltonian,
    WallFollower,
    Reverse,
    /// Any move that keeps the game going, with the most room first.
    Survival,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AStar => "astar",
            Self::Hamiltonian => "hamiltonian",
            Self::WallFollower => "wall_follower",
            Self::Reverse => "reverse",
            Self::Survival => "survival",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
