/// WorldState: the complete snapshot of a running game.
///
/// ## Grid Layers
///
/// The field is composed at query time, never stored pre-painted:
///   - `base`    : framed blank grid built at stage setup. **Never mutated.**
///   - `rewards` : written first
///   - `enemies` : written over rewards
///   - `player`  : written last
///
/// `compose()` produces the grid the movement rules and the renderer see.
/// Restarting a stage rebuilds everything from the `Stage` definition.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::domain::coord::Coordinate;
use crate::domain::grid::Grid;
use crate::domain::symbol::Symbol;
use super::stage::{self, Stage, StageError};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Playing,
    Cleared,
    Caught,
}

pub struct WorldState {
    // ── Stages ──
    pub stages: Vec<Stage>,
    pub current_stage: usize,

    // ── Field ──
    /// Framed blank grid. Never mutated after `load_stage`.
    pub base: Grid,

    // ── Entities ──
    pub player: Coordinate,
    /// Index is the enemy's identity across a pursuit step.
    pub enemies: Vec<Coordinate>,
    pub rewards: Vec<Coordinate>,

    // ── Meta ──
    pub phase: Phase,
    pub moves: u32,
    pub tick: u64,
    pub message: String,

    rng: StdRng,
}

// ── Construction / stage flow ──

impl WorldState {
    /// Build a world on `stages[start]`. `seed` makes spawns reproducible.
    /// An empty stage list falls back to the built-in stages.
    pub fn new(stages: Vec<Stage>, start: usize, seed: Option<u64>) -> Result<Self, StageError> {
        let stages = if stages.is_empty() { stage::builtin_stages() } else { stages };
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let current_stage = start % stages.len();
        let layout = stage::setup(&stages[current_stage], &mut rng)?;
        let mut world = WorldState {
            stages,
            current_stage,
            base: layout.base,
            player: layout.player,
            enemies: layout.enemies,
            rewards: layout.rewards,
            phase: Phase::Playing,
            moves: 0,
            tick: 0,
            message: String::new(),
            rng,
        };
        world.announce_stage();
        Ok(world)
    }

    /// Set up `stages[idx]` from scratch: fresh frame, fresh spawns.
    pub fn load_stage(&mut self, idx: usize) -> Result<(), StageError> {
        let idx = idx % self.stages.len();
        let layout = stage::setup(&self.stages[idx], &mut self.rng)?;

        self.current_stage = idx;
        self.base = layout.base;
        self.player = layout.player;
        self.enemies = layout.enemies;
        self.rewards = layout.rewards;
        self.phase = Phase::Playing;
        self.moves = 0;
        self.tick = 0;
        self.announce_stage();
        Ok(())
    }

    fn announce_stage(&mut self) {
        self.message = format!("Stage: {}", self.stage().name);
        info!(
            stage = %self.stage().name,
            enemies = self.enemies.len(),
            rewards = self.rewards.len(),
            "stage loaded"
        );
    }

    pub fn restart_stage(&mut self) -> Result<(), StageError> {
        self.load_stage(self.current_stage)
    }

    /// Advance to the next stage, wrapping after the last one.
    pub fn next_stage(&mut self) -> Result<(), StageError> {
        self.load_stage(self.current_stage + 1)
    }

    pub fn stage(&self) -> &Stage {
        &self.stages[self.current_stage]
    }
}

// ── Queries ──

impl WorldState {
    /// Current field: base, then rewards, then enemies, then the player.
    pub fn compose(&self) -> Grid {
        self.base
            .update_by_array(&self.rewards, Symbol::Reward)
            .update_by_array(&self.enemies, Symbol::Enemy)
            .update_at(self.player, Symbol::MainCharacter)
    }

    pub fn render(&self) -> String {
        self.compose().render()
    }

    /// Index of the first enemy standing on the player, if any.
    pub fn catcher(&self) -> Option<usize> {
        self.enemies.iter().position(|&e| e == self.player)
    }

    pub fn set_message(&mut self, msg: &str) {
        self.message = msg.to_string();
    }
}
