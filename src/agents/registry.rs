//! Static table of every agent the crate ships, keyed by id.

use super::{
    AStarAgent, AdvancedHamiltonianAgent, Agent, BfsAgent, BodyAwareAStarAgent, DfsAgent,
    DijkstraAgent, GreedyAgent, HamiltonianAgent, HybridAgent, PerfectAgent, RandomWalkAgent,
    ReverseAStarAgent, SmartHybridAgent, SmarterHybridAgent, WallFollowerAgent,
};
use crate::error::RegistryError;
use crate::genetic::GeneticAgent;
use crate::grid::Grid;

/// One registry row.
#[derive(Debug, Clone, Copy)]
pub struct AgentInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub build: fn(Grid) -> Box<dyn Agent>,
}

macro_rules! entry {
    ($id:literal, $name:literal, $ty:ty) => {
        AgentInfo {
            id: $id,
            name: $name,
            build: |grid| -> Box<dyn Agent> { Box::new(<$ty>::new(grid)) },
        }
    };
}

pub static AGENTS: &[AgentInfo] = &[
    entry!("astar", "A*", AStarAgent),
    entry!("body_aware_astar", "Body-Aware A*", BodyAwareAStarAgent),
    entry!("bfs", "BFS", BfsAgent),
    entry!("dfs", "DFS", DfsAgent),
    entry!("dijkstra", "Dijkstra", DijkstraAgent),
    entry!("greedy", "Greedy Best-First", GreedyAgent),
    entry!("reverse_astar", "Reverse A*", ReverseAStarAgent),
    entry!("random", "Random Walk", RandomWalkAgent),
    entry!("hamiltonian", "Hamiltonian", HamiltonianAgent),
    entry!("advanced_hamiltonian", "Advanced Hamiltonian", AdvancedHamiltonianAgent),
    entry!("wall_follower", "Wall Follower", WallFollowerAgent),
    entry!("hybrid", "Hybrid", HybridAgent),
    entry!("perfect", "Perfect AI", PerfectAgent),
    entry!("smart_hybrid", "Smart Hybrid", SmartHybridAgent),
    entry!("smarter_hybrid", "Smarter Hybrid", SmarterHybridAgent),
    entry!("genetic", "Genetic", GeneticAgent),
];

/// Build a fresh agent by id.
pub fn create_agent(id: &str, grid: Grid) -> Result<Box<dyn Agent>, RegistryError> {
    AGENTS
        .iter()
        .find(|info| info.id == id)
        .map(|info| (info.build)(grid))
        .ok_or_else(|| RegistryError::UnknownAgent(id.to_string()))
}

pub fn agent_ids() -> impl Iterator<Item = &'static str> {
    AGENTS.iter().map(|info| info.id)
}
