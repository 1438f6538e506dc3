/// Stage definitions and stage setup.
///
/// ## Built-in stages
///   amateur       5 rows ×  5 columns, 1 enemy, 1 reward
///   normal        9 rows ×  7 columns, 2 enemies, 2 rewards
///   professional 11 rows × 19 columns, 3 enemies, 5 rewards
///
/// All start the player at (1, 1). More stages can be declared in
/// `config.toml` (see `config.rs`).
///
/// ## Setup order
///   1. generate a Blank grid of the stage size
///   2. paint the Wall frame
///   3. mark the player's start so nothing spawns on it
///   4. check there are enough blanks left
///   5. draw `enemies + rewards` blank cells; enemies take the first draws

use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::domain::coord::Coordinate;
use crate::domain::grid::{Grid, TableSize};
use crate::domain::symbol::Symbol;
use super::random::pick_n;

/// Smallest side that still leaves one interior cell inside the frame.
pub const MIN_SIDE: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StageError {
    #[error("stage '{name}': table {rows}x{columns} is too small (minimum 3x3)")]
    InvalidSize { name: String, rows: usize, columns: usize },
    #[error("stage '{name}': start {start} is not inside the frame")]
    InvalidStart { name: String, start: Coordinate },
    #[error("stage '{name}': needs {needed} blank cells but only {available} are free")]
    NotEnoughBlank { name: String, needed: usize, available: usize },
    #[error("stage '{name}': needs at least one reward")]
    NoRewards { name: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stage {
    pub name: String,
    pub table_size: TableSize,
    pub initial: Coordinate,
    pub enemy_count: usize,
    pub reward_count: usize,
}

impl Stage {
    /// Validated stage. Rejects tables under 3x3, a start on or outside the
    /// frame, stages without rewards, and spawn counts the interior can't hold.
    pub fn new(
        name: &str,
        rows: usize,
        columns: usize,
        initial: Coordinate,
        enemy_count: usize,
        reward_count: usize,
    ) -> Result<Self, StageError> {
        let table_size = TableSize::new(rows, columns)
            .filter(|_| rows >= MIN_SIDE && columns >= MIN_SIDE)
            .ok_or_else(|| StageError::InvalidSize { name: name.to_string(), rows, columns })?;
        let inside = 0 < initial.x && (initial.x as usize) < columns - 1
            && 0 < initial.y && (initial.y as usize) < rows - 1;
        if !inside {
            return Err(StageError::InvalidStart { name: name.to_string(), start: initial });
        }
        if reward_count == 0 {
            return Err(StageError::NoRewards { name: name.to_string() });
        }
        // interior minus the player's start
        let available = (rows - 2) * (columns - 2) - 1;
        let needed = enemy_count.saturating_add(reward_count);
        if needed > available {
            return Err(StageError::NotEnoughBlank { name: name.to_string(), needed, available });
        }
        Ok(Stage {
            name: name.to_string(),
            table_size,
            initial,
            enemy_count,
            reward_count,
        })
    }

    pub fn spawn_count(&self) -> usize {
        self.enemy_count.saturating_add(self.reward_count)
    }
}

/// Built-in stages in play order.
pub fn builtin_stages() -> Vec<Stage> {
    let start = Coordinate::new(1, 1);
    [
        ("amateur", 5, 5, 1, 1),
        ("normal", 9, 7, 2, 2),
        ("professional", 11, 19, 3, 5),
    ]
    .into_iter()
    .filter_map(|(name, rows, cols, enemies, rewards)| {
        Stage::new(name, rows, cols, start, enemies, rewards).ok()
    })
    .collect()
}

/// Are there at least `enemies + rewards` Blank cells in `grid`?
pub fn has_enough_blank(stage: &Stage, grid: &Grid) -> bool {
    grid.count_blanks() >= stage.spawn_count()
}

/// Result of stage setup: the empty framed field plus where everyone starts.
#[derive(Clone, Debug)]
pub struct Layout {
    pub base: Grid,
    pub player: Coordinate,
    pub enemies: Vec<Coordinate>,
    pub rewards: Vec<Coordinate>,
}

pub fn setup<R: Rng + ?Sized>(stage: &Stage, rng: &mut R) -> Result<Layout, StageError> {
    let base = Grid::generate(stage.table_size, Symbol::Blank).add_frame(Symbol::Wall);
    let occupied = base.update_at(stage.initial, Symbol::MainCharacter);

    if !has_enough_blank(stage, &occupied) {
        return Err(StageError::NotEnoughBlank {
            name: stage.name.clone(),
            needed: stage.spawn_count(),
            available: occupied.count_blanks(),
        });
    }

    let mut picks = pick_n(rng, stage.spawn_count(), &occupied.find_blanks());
    let rewards = picks.split_off(stage.enemy_count);
    let enemies = picks;

    debug!(stage = %stage.name, ?enemies, ?rewards, "stage spawned");

    Ok(Layout {
        base,
        player: stage.initial,
        enemies,
        rewards,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn builtins_are_valid() {
        let names: Vec<String> = builtin_stages().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["amateur", "normal", "professional"]);
    }

    /// Bypasses `Stage::new` validation.
    fn unchecked(name: &str, rows: usize, columns: usize, enemy_count: usize, reward_count: usize) -> Stage {
        Stage {
            name: name.to_string(),
            table_size: TableSize::new(rows, columns).unwrap(),
            initial: Coordinate::new(1, 1),
            enemy_count,
            reward_count,
        }
    }

    #[test]
    fn too_small_rejected() {
        let err = Stage::new("tiny", 2, 5, Coordinate::new(1, 1), 0, 1).unwrap_err();
        assert!(matches!(err, StageError::InvalidSize { rows: 2, columns: 5, .. }));
    }

    #[test]
    fn start_on_frame_rejected() {
        let err = Stage::new("edge", 5, 5, Coordinate::new(0, 2), 1, 1).unwrap_err();
        assert!(matches!(err, StageError::InvalidStart { .. }));
    }

    #[test]
    fn enough_blank_boundary() {
        // 5x5 framed → 9 interior blanks
        let grid = Grid::generate(TableSize::new(5, 5).unwrap(), Symbol::Blank).add_frame(Symbol::Wall);
        let fits = unchecked("s", 5, 5, 4, 5);
        let over = unchecked("s", 5, 5, 5, 5);
        assert!(has_enough_blank(&fits, &grid));
        assert!(!has_enough_blank(&over, &grid));
    }

    #[test]
    fn overfull_stage_rejected() {
        // 3x3: the only interior cell is the player's
        let err = Stage::new("cramped", 3, 3, Coordinate::new(1, 1), 1, 1).unwrap_err();
        assert_eq!(
            err,
            StageError::NotEnoughBlank { name: "cramped".into(), needed: 2, available: 0 }
        );
        // 5x5: 9 interior cells, 8 after the player
        assert!(Stage::new("full", 5, 5, Coordinate::new(2, 2), 3, 5).is_ok());
        assert!(Stage::new("over", 5, 5, Coordinate::new(2, 2), 4, 5).is_err());
    }

    #[test]
    fn stage_without_rewards_rejected() {
        let err = Stage::new("bare", 7, 7, Coordinate::new(1, 1), 2, 0).unwrap_err();
        assert_eq!(err, StageError::NoRewards { name: "bare".into() });
    }

    #[test]
    fn setup_places_distinct_spawns_off_player() {
        let stage = &builtin_stages()[2];
        let layout = setup(stage, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(layout.enemies.len(), 3);
        assert_eq!(layout.rewards.len(), 5);
        let mut all: Vec<Coordinate> = layout.enemies.iter().chain(&layout.rewards).copied().collect();
        all.push(layout.player);
        let n = all.len();
        all.sort_by_key(|c| (c.y, c.x));
        all.dedup();
        assert_eq!(all.len(), n);
        for c in layout.enemies.iter().chain(&layout.rewards) {
            assert_eq!(layout.base.lookup(*c), Some(Symbol::Blank));
        }
    }

    #[test]
    fn setup_is_reproducible() {
        let stage = &builtin_stages()[1];
        let a = setup(stage, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = setup(stage, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a.enemies, b.enemies);
        assert_eq!(a.rewards, b.rewards);
    }

    #[test]
    fn setup_refuses_crowded_stage() {
        // 3x3 has a single interior cell, taken by the player
        let stage = unchecked("cramped", 3, 3, 1, 0);
        let err = setup(&stage, &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert_eq!(
            err,
            StageError::NotEnoughBlank { name: "cramped".into(), needed: 1, available: 0 }
        );
    }
}
