//! Local move heuristics used when a strategy has nothing better to offer.

use crate::grid::{Cell, Direction, Occupancy};

/// First free direction in canonical order.
pub fn first_valid_move(occupancy: &Occupancy, head: Cell) -> Option<Direction> {
    occupancy.free_moves(head).map(|(d, _)| d).next()
}

/// Free direction whose target is nearest to `target` (first wins ties).
pub fn closest_move(occupancy: &Occupancy, head: Cell, target: Cell) -> Option<Direction> {
    occupancy
        .free_moves(head)
        .min_by_key(|(_, c)| c.manhattan(target))
        .map(|(d, _)| d)
}

/// Free direction whose target is farthest from `target` (first wins ties).
pub fn farthest_move(occupancy: &Occupancy, head: Cell, target: Cell) -> Option<Direction> {
    let mut best: Option<(Direction, i32)> = None;
    for (direction, cell) in occupancy.free_moves(head) {
        let distance = cell.manhattan(target);
        if best.map_or(true, |(_, d)| distance > d) {
            best = Some((direction, distance));
        }
    }
    best.map(|(d, _)| d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    #[test]
    fn test_first_valid_skips_blocked() {
        let grid = Grid::new(6);
        // Down is blocked by the neck.
        let body = [Cell::new(2, 2), Cell::new(2, 3), Cell::new(2, 4)];
        let occ = Occupancy::from_body(grid, &body);
        assert_eq!(first_valid_move(&occ, body[0]), Some(Direction::Right));
    }

    #[test]
    fn test_no_move_when_boxed_in() {
        let grid = Grid::new(4);
        let occ = Occupancy::from_cells(grid, &[Cell::new(0, 1), Cell::new(1, 0)]);
        assert_eq!(first_valid_move(&occ, Cell::new(0, 0)), None);
        assert_eq!(closest_move(&occ, Cell::new(0, 0), Cell::new(3, 3)), None);
        assert_eq!(farthest_move(&occ, Cell::new(0, 0), Cell::new(3, 3)), None);
    }

    #[test]
    fn test_closest_and_farthest() {
        let grid = Grid::new(8);
        let occ = Occupancy::empty(grid);
        let head = Cell::new(3, 3);
        let food = Cell::new(6, 3);
        assert_eq!(closest_move(&occ, head, food), Some(Direction::Right));
        assert_eq!(farthest_move(&occ, head, food), Some(Direction::Left));
    }

    #[test]
    fn test_ties_prefer_enumeration_order() {
        let grid = Grid::new(8);
        let occ = Occupancy::empty(grid);
        // Down and Right both reduce the distance to (5,5) by one.
        assert_eq!(
            closest_move(&occ, Cell::new(3, 3), Cell::new(5, 5)),
            Some(Direction::Down)
        );
    }
}
