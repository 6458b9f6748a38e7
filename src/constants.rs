// Grid
pub const GRID_SIZE: i32 = 20;
pub const MIN_GRID_SIZE: i32 = 4;
pub const MAX_GRID_SIZE: i32 = 64;

// Search
pub const DFS_MAX_DEPTH: usize = 30;
pub const PLAN_LOOKAHEAD_STEPS: usize = 5;
pub const WALL_FOLLOWER_LOOKAHEAD: usize = 10;

// Body-aware A* costs are scaled so that penalties stay integral
pub const ASTAR_STEP_COST: u32 = 10;
pub const ASTAR_BODY_PROXIMITY_PENALTY: u32 = 3;

// Cycle shortcuts
pub const MAX_SHORTCUT_SKIP: i32 = 10;

// Safety checks
pub const SAFETY_MARGIN: usize = 2;
pub const SPACE_SCORE_DEPTH: usize = 4;
pub const PATH_VALIDATION_STEPS: usize = 3;
pub const MIN_ESCAPE_ROUTES: usize = 2;
pub const MIN_SPACE_SCORE: f64 = 3.0;
pub const SPACE_CACHE_CAPACITY: usize = 1024;

// Hybrid strategy switching
pub const HYBRID_LENGTH_THRESHOLD: f64 = 0.5;
pub const LATE_GAME_THRESHOLD: f64 = 0.6;
pub const STUCK_TICK_LIMIT: u32 = 5;
pub const LOOP_WINDOW: usize = 6;
pub const LOOP_REPEAT_LIMIT: usize = 3;
pub const LOOP_STUCK_LIMIT: u32 = 2;

// Genetic algorithm
pub const FOOD_REWARD: f64 = 100.0;
pub const DEFAULT_POPULATION_SIZE: usize = 50;
pub const TOURNAMENT_SIZE: usize = 3;
pub const MUTATION_RATE: f64 = 0.1;
pub const MUTATION_MAGNITUDE: f64 = 0.2;
pub const MIN_ELITE_SIZE: usize = 2;

// Headless games
pub const FOOD_MIN_SPAWN_DISTANCE: i32 = 3;
pub const DEFAULT_MAX_MOVES: u64 = 20_000;
/// Moves without eating, per grid cell, before a game is declared starved.
pub const STARVATION_MOVES_PER_CELL: u64 = 2;
