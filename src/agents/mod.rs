//! Decision agents and the contract they share.
//!
//! A driver calls [`Agent::get_next_move`] once per tick with the snake head,
//! the food cell and the full body (head first). `None` means every direction
//! is blocked and the game is lost.

pub mod cycle;
pub mod fallback;
pub mod hybrid;
pub mod path;
pub mod random_walk;
pub mod registry;
pub mod search;
pub mod wall_follower;

pub use cycle::{AdvancedHamiltonianAgent, HamiltonianAgent, HamiltonianCycle};
pub use hybrid::{HybridAgent, PerfectAgent, SmartHybridAgent, SmarterHybridAgent, Strategy};
pub use path::PlannedPath;
pub use random_walk::RandomWalkAgent;
pub use registry::{agent_ids, create_agent, AgentInfo, AGENTS};
pub use search::{
    AStarAgent, BfsAgent, BodyAwareAStarAgent, DfsAgent, DijkstraAgent, GreedyAgent,
    ReverseAStarAgent,
};
pub use wall_follower::{Side, WallFollowerAgent};

use crate::grid::{Cell, Direction};

/// Per-tick move source for one game.
pub trait Agent: Send {
    /// Registry id, e.g. `"astar"`.
    fn id(&self) -> &'static str;

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Clear per-episode memory (path caches, loop detectors, counters).
    fn reset(&mut self);

    /// Pick the next direction, or `None` when no legal move exists.
    fn get_next_move(&mut self, head: Cell, food: Cell, body: &[Cell]) -> Option<Direction>;

    /// Remaining planned cells, for inspection only.
    fn current_path(&self) -> &[Cell];

    /// Active sub-strategy for composite agents.
    fn current_strategy(&self) -> Option<Strategy> {
        None
    }
}
