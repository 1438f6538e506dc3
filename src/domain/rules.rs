/// Movement rules: the single gate for both player and enemy moves.
///
/// Pure functions operating on a grid snapshot, no side effects.
///
/// ### Enterable cell
/// ┌──────────────────────────────┬─────────┐
/// │ Condition                     │ Allow?  │
/// ├──────────────────────────────┼─────────┤
/// │ on or outside the frame       │ DENY    │
/// │ cell is Wall                  │ DENY    │
/// │ cell is Enemy                 │ DENY    │
/// │ Otherwise                     │ ALLOW   │
/// └──────────────────────────────┴─────────┘
///
/// Border cells are denied even when they are not Wall.

use super::coord::Coordinate;
use super::grid::Grid;

/// Is `at` strictly inside the frame and not blocked?
pub fn is_valid_coordinate(grid: &Grid, at: Coordinate) -> bool {
    let cols = grid.column_count() as i32;
    let rows = grid.row_count() as i32;
    0 < at.x && at.x < cols - 1
        && 0 < at.y && at.y < rows - 1
        && grid.lookup(at).is_some_and(|s| !s.blocks_entry())
}

/// `current + delta` if enterable, otherwise `current` (bump into wall).
/// A delta that overflows the coordinate range is never enterable.
pub fn move_character(grid: &Grid, current: Coordinate, delta: Coordinate) -> Coordinate {
    match current.checked_add(delta) {
        Some(target) if is_valid_coordinate(grid, target) => target,
        _ => current,
    }
}
