//! Integration test: graph search
//!
//! Path optimality, longest-path bounds and obstacle handling across the
//! search functions behind the search agents.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use snake_agents::agents::search::{astar, bfs, dfs, dijkstra, greedy, reverse_astar};
use snake_agents::constants::DFS_MAX_DEPTH;
use snake_agents::grid::{Cell, Grid, Occupancy};

/// Unit steps from `start` to `goal`, no repeats, every cell free.
fn assert_route(occupancy: &Occupancy, start: Cell, goal: Cell, path: &[Cell]) {
    assert_eq!(path.last(), Some(&goal));
    let mut prev = start;
    let mut seen = std::collections::HashSet::new();
    for &cell in path {
        assert!(prev.is_adjacent(cell), "{prev:?} -> {cell:?} is not a step");
        assert!(occupancy.is_free(cell), "{cell:?} is blocked");
        assert!(seen.insert(cell), "{cell:?} repeats");
        prev = cell;
    }
}

// =============================================================================
// Optimality
// =============================================================================

#[test]
fn test_shortest_path_searches_agree_on_empty_grid() {
    let grid = Grid::new(10);
    let occ = Occupancy::empty(grid);
    let start = Cell::new(0, 0);
    let goal = Cell::new(9, 9);
    for path in [
        bfs::find_path(&occ, start, goal),
        astar::find_path(&occ, start, goal),
        dijkstra::find_path(&occ, start, goal),
    ] {
        let path = path.expect("reachable");
        assert_eq!(path.len(), 18);
        assert_route(&occ, start, goal, &path);
    }
}

#[test]
fn test_shortest_paths_detour_around_wall() {
    let grid = Grid::new(10);
    // Vertical wall at x=5 with a gap at the bottom.
    let wall: Vec<Cell> = (0..9).map(|y| Cell::new(5, y)).collect();
    let occ = Occupancy::from_cells(grid, &wall);
    let start = Cell::new(2, 0);
    let goal = Cell::new(8, 0);
    let bfs_path = bfs::find_path(&occ, start, goal).expect("reachable");
    let astar_path = astar::find_path(&occ, start, goal).expect("reachable");
    assert_eq!(bfs_path.len(), astar_path.len());
    assert_eq!(bfs_path.len(), 24);
    assert_route(&occ, start, goal, &astar_path);
}

#[test]
fn test_unreachable_goal_yields_none() {
    let grid = Grid::new(8);
    let walls = [Cell::new(1, 0), Cell::new(1, 1), Cell::new(0, 1)];
    let occ = Occupancy::from_cells(grid, &walls);
    let start = Cell::new(5, 5);
    let goal = Cell::new(0, 0);
    assert!(bfs::find_path(&occ, start, goal).is_none());
    assert!(astar::find_path(&occ, start, goal).is_none());
    assert!(dijkstra::find_path(&occ, start, goal).is_none());
    assert!(greedy::find_path(&occ, start, goal).is_none());
    assert!(reverse_astar::find_path(&occ, start, goal).is_none());
    assert!(dfs::find_path(&occ, start, goal, DFS_MAX_DEPTH).is_none());
}

// =============================================================================
// Heuristic and bounded searches
// =============================================================================

#[test]
fn test_greedy_and_dfs_find_valid_routes() {
    let grid = Grid::new(10);
    let blocks: Vec<Cell> = (2..8).map(|x| Cell::new(x, 4)).collect();
    let occ = Occupancy::from_cells(grid, &blocks);
    let start = Cell::new(4, 1);
    let goal = Cell::new(4, 8);
    let greedy_path = greedy::find_path(&occ, start, goal).expect("reachable");
    assert_route(&occ, start, goal, &greedy_path);
    let dfs_path = dfs::find_path(&occ, start, goal, DFS_MAX_DEPTH).expect("reachable");
    assert_route(&occ, start, goal, &dfs_path);
    assert!(dfs_path.len() <= DFS_MAX_DEPTH);
}

#[test]
fn test_dfs_finds_every_route_within_its_bound() {
    let grid = Grid::new(8);
    let start = Cell::new(0, 0);
    let goal = Cell::new(7, 7);
    for seed in 0..40 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let blocks: Vec<Cell> = grid
            .cells()
            .filter(|c| *c != start && *c != goal)
            .filter(|_| rng.gen_bool(0.25))
            .collect();
        let occ = Occupancy::from_cells(grid, &blocks);
        let Some(shortest) = bfs::find_path(&occ, start, goal) else { continue };
        let path = dfs::find_path(&occ, start, goal, shortest.len())
            .unwrap_or_else(|| panic!("seed {seed}: missed a {}-step route", shortest.len()));
        assert_route(&occ, start, goal, &path);
        assert!(path.len() <= shortest.len());
    }
}

#[test]
fn test_reverse_astar_bounds() {
    let grid = Grid::new(10);
    let occ = Occupancy::empty(grid);
    let start = Cell::new(0, 0);
    let goal = Cell::new(9, 9);
    let longest = reverse_astar::find_path(&occ, start, goal).expect("reachable");
    assert_route(&occ, start, goal, &longest);
    assert!(longest.len() > 18, "got {}", longest.len());
    assert!(longest.len() <= 98, "got {}", longest.len());
}

#[test]
fn test_reverse_astar_lengths_on_empty_board() {
    let grid = Grid::new(10);
    let occ = Occupancy::empty(grid);
    let start = Cell::new(0, 0);
    for (goal, expected) in [(Cell::new(9, 9), 98), (Cell::new(9, 0), 99)] {
        let longest = reverse_astar::find_path(&occ, start, goal).expect("reachable");
        assert_route(&occ, start, goal, &longest);
        assert_eq!(longest.len(), expected, "to {goal:?}");
    }
}

#[test]
fn test_reverse_astar_never_shorter_than_astar() {
    let grid = Grid::new(9);
    let blocks = [
        Cell::new(4, 2),
        Cell::new(4, 3),
        Cell::new(4, 4),
        Cell::new(4, 5),
        Cell::new(2, 6),
        Cell::new(6, 1),
    ];
    let occ = Occupancy::from_cells(grid, &blocks);
    for (start, goal) in [
        (Cell::new(0, 0), Cell::new(8, 8)),
        (Cell::new(3, 3), Cell::new(5, 3)),
        (Cell::new(8, 0), Cell::new(0, 8)),
    ] {
        let longest = reverse_astar::find_path(&occ, start, goal).expect("reachable");
        let shortest = astar::find_path(&occ, start, goal).expect("reachable");
        assert_route(&occ, start, goal, &longest);
        assert!(longest.len() >= shortest.len());
    }
}
