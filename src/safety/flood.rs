//! Flood-fill measures of how much room the snake has left.

use crate::constants::{
    MIN_ESCAPE_ROUTES, MIN_SPACE_SCORE, PATH_VALIDATION_STEPS, SPACE_SCORE_DEPTH,
};
use crate::grid::{body_after_move, Cell, Grid, Occupancy};
use std::collections::VecDeque;

/// Free cells reachable from `start`, counting `start` itself when free.
pub fn reachable_count(occupancy: &Occupancy, start: Cell) -> usize {
    reachable_count_bounded(occupancy, start, usize::MAX)
}

/// Like [`reachable_count`] but stops once `limit` cells have been found.
pub fn reachable_count_bounded(occupancy: &Occupancy, start: Cell, limit: usize) -> usize {
    if !occupancy.is_free(start) || limit == 0 {
        return 0;
    }
    let grid = occupancy.grid();
    let mut visited = vec![false; grid.area()];
    let mut queue = VecDeque::new();
    if let Some(i) = grid.index(start) {
        visited[i] = true;
    }
    queue.push_back(start);
    let mut count = 1;
    if count >= limit {
        return count;
    }

    while let Some(current) = queue.pop_front() {
        for next in occupancy.free_neighbors(current) {
            let Some(i) = grid.index(next) else { continue };
            if visited[i] {
                continue;
            }
            visited[i] = true;
            count += 1;
            if count >= limit {
                return count;
            }
            queue.push_back(next);
        }
    }
    count
}

/// Depth-bounded openness score: each newly discovered cell at BFS depth
/// `d` (1..=depth) contributes `1/d`.
pub fn space_score(occupancy: &Occupancy, pos: Cell, depth: usize) -> f64 {
    let grid = occupancy.grid();
    let Some(start) = grid.index(pos) else {
        return 0.0;
    };
    let mut visited = vec![false; grid.area()];
    visited[start] = true;
    let mut frontier = vec![pos];
    let mut score = 0.0;

    for level in 1..=depth {
        let mut next_frontier = Vec::new();
        for &cell in &frontier {
            for next in occupancy.free_neighbors(cell) {
                let Some(i) = grid.index(next) else { continue };
                if !visited[i] {
                    visited[i] = true;
                    next_frontier.push(next);
                }
            }
        }
        if next_frontier.is_empty() {
            break;
        }
        score += next_frontier.len() as f64 / level as f64;
        frontier = next_frontier;
    }
    score
}

/// Whether moving the head onto `next` keeps at least `len(body) + margin`
/// cells reachable.
pub fn is_move_safe(grid: Grid, next: Cell, body: &[Cell], margin: usize) -> bool {
    let occupancy = Occupancy::from_body(grid, body);
    if !occupancy.is_free(next) {
        return false;
    }
    let needed = body.len() + margin;
    reachable_count_bounded(&occupancy, next, needed) >= needed
}

/// Free neighbors left around `next` once the head has moved there.
pub fn escape_routes(grid: Grid, next: Cell, body: &[Cell]) -> usize {
    let moved = body_after_move(body, next, false);
    Occupancy::from_body(grid, &moved).free_neighbor_count(next)
}

/// Check the first few steps of `path` for escape routes and open space.
///
/// The body is advanced along the path; it grows on the final cell, which is
/// the food. `score` computes the space score for a post-move occupancy so
/// callers can memoize it.
pub fn validate_path_with<F>(grid: Grid, path: &[Cell], body: &[Cell], mut score: F) -> bool
where
    F: FnMut(&Occupancy, Cell, &[Cell]) -> f64,
{
    if path.is_empty() {
        return false;
    }
    let mut current = body.to_vec();
    for (step, &pos) in path.iter().take(PATH_VALIDATION_STEPS).enumerate() {
        if !Occupancy::from_body(grid, &current).is_free(pos) {
            return false;
        }
        let grows = step + 1 == path.len();
        current = body_after_move(&current, pos, grows);
        let after = Occupancy::from_body(grid, &current);
        if after.free_neighbor_count(pos) < MIN_ESCAPE_ROUTES {
            return false;
        }
        if score(&after, pos, &current) < MIN_SPACE_SCORE {
            return false;
        }
    }
    true
}

/// [`validate_path_with`] using an unmemoized space score.
pub fn validate_path(grid: Grid, path: &[Cell], body: &[Cell]) -> bool {
    validate_path_with(grid, path, body, |occ, pos, _| {
        space_score(occ, pos, SPACE_SCORE_DEPTH)
    })
}
