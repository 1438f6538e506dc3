/// Enemy AI: greedy one-step pursuit.
///
/// Each enemy tries one axis-aligned step toward the target:
///   1. closer on x than on y → prefer the vertical step
///   2. otherwise            → prefer the horizontal step
///   3. fall back to the other axis, then stay put
///
/// A step is enterable when the movement rules allow it AND no enemy
/// stood there before this step. All enemies read the same pre-step
/// snapshot, so the result does not depend on iteration order.
///
/// No pathfinding: an enemy behind a wall can stall there forever.

use super::coord::Coordinate;
use super::grid::Grid;
use super::rules::is_valid_coordinate;

/// Advance every enemy one step toward `target`. Output keeps input order.
pub fn move_enemy(grid: &Grid, target: Coordinate, enemies: &[Coordinate]) -> Vec<Coordinate> {
    enemies.iter()
        .map(|&enemy| pursue(grid, target, enemies, enemy))
        .collect()
}

fn pursue(grid: &Grid, target: Coordinate, snapshot: &[Coordinate], enemy: Coordinate) -> Coordinate {
    let diff = target.saturating_sub(enemy);
    let dist = diff.abs();
    let step = diff.signum();

    let vertical = enemy.checked_add(Coordinate::new(0, step.y));
    let horizontal = enemy.checked_add(Coordinate::new(step.x, 0));

    let enterable = |cand: Option<Coordinate>| {
        cand.filter(|&at| is_valid_coordinate(grid, at) && !snapshot.contains(&at))
    };

    let preferred = if dist.x < dist.y {
        enterable(vertical)
    } else {
        enterable(horizontal)
    };

    preferred
        .or_else(|| enterable(horizontal))
        .or_else(|| enterable(vertical))
        .unwrap_or(enemy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::grid_from;

    fn c(x: i32, y: i32) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn horizontal_when_same_row() {
        let g = grid_from(&[
            "XXXXX",
            "Xu eX",
            "X   X",
            "XXXXX",
        ]);
        assert_eq!(move_enemy(&g, c(1, 1), &[c(3, 1)]), vec![c(2, 1)]);
    }

    #[test]
    fn vertical_when_farther_on_y() {
        let g = grid_from(&[
            "XXXXX",
            "X   X",
            "X   X",
            "X   X",
            "XXXXX",
        ]);
        // diff = (1, 2): vertical preferred
        assert_eq!(move_enemy(&g, c(2, 3), &[c(1, 1)]), vec![c(1, 2)]);
    }

    #[test]
    fn tie_prefers_horizontal() {
        let g = grid_from(&[
            "XXXXX",
            "X   X",
            "X   X",
            "X   X",
            "XXXXX",
        ]);
        assert_eq!(move_enemy(&g, c(3, 3), &[c(1, 1)]), vec![c(2, 1)]);
    }

    #[test]
    fn wall_forces_other_axis() {
        let g = grid_from(&[
            "XXXXXX",
            "X X  X",
            "X    X",
            "XXXXXX",
        ]);
        // horizontal preferred but (2,1) is wall; fall back to vertical
        assert_eq!(move_enemy(&g, c(4, 2), &[c(1, 1)]), vec![c(1, 2)]);
    }

    #[test]
    fn blocked_in_corridor_stays() {
        let g = grid_from(&[
            "XXXXX",
            "X XuX",
            "XXXXX",
        ]);
        assert_eq!(move_enemy(&g, c(3, 1), &[c(1, 1)]), vec![c(1, 1)]);
    }

    #[test]
    fn enemies_avoid_pre_step_positions() {
        let g = grid_from(&[
            "XXXXXXX",
            "X     X",
            "X     X",
            "X     X",
            "XXXXXXX",
        ]);
        let enemies = [c(2, 2), c(3, 2)];
        let moved = move_enemy(&g, c(5, 2), &enemies);
        // first cannot take (3,2); vertical candidate is itself, so it stays
        assert_eq!(moved, vec![c(2, 2), c(4, 2)]);
        assert_ne!(moved[0], enemies[1]);
        assert_ne!(moved[1], enemies[0]);
    }

    #[test]
    fn order_independent() {
        let g = grid_from(&[
            "XXXXXXX",
            "X     X",
            "X     X",
            "X     X",
            "XXXXXXX",
        ]);
        let a = [c(1, 1), c(5, 3), c(3, 1)];
        let b = [c(3, 1), c(1, 1), c(5, 3)];
        let target = c(3, 2);
        let ma = move_enemy(&g, target, &a);
        let mb = move_enemy(&g, target, &b);
        assert_eq!(ma[0], mb[1]);
        assert_eq!(ma[1], mb[2]);
        assert_eq!(ma[2], mb[0]);
    }

    #[test]
    fn enemy_on_target_stays() {
        let g = grid_from(&[
            "XXXX",
            "X  X",
            "XXXX",
        ]);
        assert_eq!(move_enemy(&g, c(1, 1), &[c(1, 1)]), vec![c(1, 1)]);
    }

    #[test]
    fn extreme_target_still_steps_toward_it() {
        let g = grid_from(&[
            "XXXXX",
            "X   X",
            "XXXXX",
        ]);
        assert_eq!(move_enemy(&g, c(i32::MIN, 1), &[c(2, 1)]), vec![c(1, 1)]);
        assert_eq!(move_enemy(&g, c(i32::MAX, 1), &[c(2, 1)]), vec![c(3, 1)]);
    }

    #[test]
    fn empty_list() {
        let g = grid_from(&["XXX", "X X", "XXX"]);
        assert!(move_enemy(&g, c(1, 1), &[]).is_empty());
    }
}
