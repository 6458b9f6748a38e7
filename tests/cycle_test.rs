//! Integration test: Hamiltonian cycles
//!
//! Structural validity of the cycle for even and odd grid sizes, and the
//! cycle followers' behavior on it.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snake_agents::agents::{AdvancedHamiltonianAgent, Agent, HamiltonianAgent, HamiltonianCycle};
use snake_agents::game::{play_game, EndReason, GameLimits};
use snake_agents::grid::{Cell, Grid};
use std::collections::HashSet;

fn assert_closed_and_distinct(cycle: &HamiltonianCycle) {
    let cells = cycle.cells();
    let distinct: HashSet<Cell> = cells.iter().copied().collect();
    assert_eq!(distinct.len(), cells.len(), "cycle repeats a cell");
    for pair in cells.windows(2) {
        assert!(pair[0].is_adjacent(pair[1]), "{:?} -> {:?}", pair[0], pair[1]);
    }
    let first = cells[0];
    let last = cells[cells.len() - 1];
    assert!(last.is_adjacent(first), "cycle is not closed");
}

// =============================================================================
// Structure
// =============================================================================

#[test]
fn test_even_cycles_cover_every_cell() {
    for size in [4, 6, 8, 10, 20] {
        let grid = Grid::new(size);
        let cycle = HamiltonianCycle::build(grid);
        assert_eq!(cycle.len(), grid.area(), "size {size}");
        assert_closed_and_distinct(&cycle);
    }
}

#[test]
fn test_odd_cycles_miss_exactly_one_cell() {
    for size in [5, 7, 9, 11] {
        let grid = Grid::new(size);
        let cycle = HamiltonianCycle::build(grid);
        assert_eq!(cycle.len(), grid.area() - 1, "size {size}");
        assert_closed_and_distinct(&cycle);
        let missing: Vec<Cell> = grid.cells().filter(|c| !cycle.contains(*c)).collect();
        assert_eq!(missing, vec![Cell::new(1, size - 2)]);
    }
}

#[test]
fn test_index_lookup_matches_position() {
    let grid = Grid::new(8);
    let cycle = HamiltonianCycle::build(grid);
    for (i, cell) in cycle.cells().iter().enumerate() {
        assert_eq!(cycle.index_of(*cell), Some(i));
        assert_eq!(cycle.next(*cell), Some(cycle.cell_at(i + 1)));
    }
}

// =============================================================================
// Followers
// =============================================================================

#[test]
fn test_follower_without_shortcuts_stays_on_cycle() {
    let grid = Grid::new(6);
    let cycle = HamiltonianCycle::build(grid);
    let mut agent = HamiltonianAgent::without_shortcuts(grid);
    let mut head = cycle.cell_at(0);
    let food = cycle.cell_at(20);
    for i in 1..=20 {
        let direction = agent.get_next_move(head, food, &[head]).expect("open");
        head = head.step(direction);
        assert_eq!(head, cycle.cell_at(i));
    }
}

#[test]
fn test_odd_grid_follower_reaches_off_cycle_food() {
    let grid = Grid::new(7);
    let mut agent = HamiltonianAgent::new(grid);
    let food = Cell::new(1, 5);
    let head = Cell::new(2, 5);
    let direction = agent.get_next_move(head, food, &[head]).expect("open");
    assert_eq!(head.step(direction), food);
}

// =============================================================================
// Odd grids
// =============================================================================

/// A body of `len` cells trailing backward along the cycle from `head`.
fn body_behind(cycle: &HamiltonianCycle, head: Cell, len: usize) -> Vec<Cell> {
    let at = cycle.index_of(head).expect("head on cycle");
    (0..len).map(|k| cycle.cell_at(at + cycle.len() - k)).collect()
}

#[test]
fn test_long_snake_keeps_cycle_order_near_left_out_food() {
    let grid = Grid::new(7);
    let cycle = HamiltonianCycle::build(grid);
    let head = Cell::new(5, 4);
    let body = body_behind(&cycle, head, 30);
    let food = Cell::new(1, 5);
    let expected = cycle.next(head);

    let mut agents: Vec<Box<dyn Agent>> = vec![
        Box::new(HamiltonianAgent::new(grid)),
        Box::new(HamiltonianAgent::without_shortcuts(grid)),
        Box::new(AdvancedHamiltonianAgent::new(grid)),
    ];
    for agent in agents.iter_mut() {
        let direction = agent.get_next_move(head, food, &body).expect("open");
        assert_eq!(Some(head.step(direction)), expected, "{}", agent.id());
    }
}

#[test]
fn test_long_snake_detours_onto_left_out_food() {
    let grid = Grid::new(7);
    let cycle = HamiltonianCycle::build(grid);
    let head = Cell::new(2, 5);
    let body = body_behind(&cycle, head, 40);
    let food = Cell::new(1, 5);
    let mut agent = HamiltonianAgent::new(grid);
    let direction = agent.get_next_move(head, food, &body).expect("open");
    assert_eq!(head.step(direction), food);
}

#[test]
fn test_cycle_followers_fill_odd_grids() {
    for size in [5, 7] {
        let grid = Grid::new(size);
        for seed in 0..4 {
            let mut agents: Vec<Box<dyn Agent>> = vec![
                Box::new(HamiltonianAgent::new(grid)),
                Box::new(AdvancedHamiltonianAgent::new(grid)),
            ];
            for agent in agents.iter_mut() {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let limits = GameLimits::for_grid(grid);
                let outcome = play_game(agent.as_mut(), grid, limits, &mut rng);
                assert_ne!(outcome.end, EndReason::NoMove, "{} on {size}", agent.id());
                assert_eq!(
                    outcome.end,
                    EndReason::Won,
                    "{} on {size} seed {seed}: {outcome:?}",
                    agent.id()
                );
                assert_eq!(outcome.length, grid.area());
            }
        }
    }
}
