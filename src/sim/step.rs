/// The step functions: advance the world by one input or one timer tick.
///
/// Processing order for a player move (`step`):
///   1. Player movement (`rules::move_character` on the composed field)
///   2. Reward pickup
///   3. Win check (last reward → Cleared, enemies do not move)
///   4. Enemy pursuit (`ai::move_enemy` toward the new player position)
///   5. Catch check
///
/// `tick_enemies` runs only steps 4 and 5, for timed enemy movement.
/// Both are no-ops outside `Phase::Playing`.

use tracing::debug;

use crate::domain::ai;
use crate::domain::coord::Coordinate;
use crate::domain::rules;
use super::event::GameEvent;
use super::world::{Phase, WorldState};

// ══════════════════════════════════════════════════════════════
// Main entry points
// ══════════════════════════════════════════════════════════════

pub fn step(world: &mut WorldState, delta: Coordinate) -> Vec<GameEvent> {
    if world.phase != Phase::Playing { return vec![]; }

    let mut events = Vec::new();
    world.moves += 1;

    resolve_player_movement(world, delta, &mut events);
    resolve_reward_pickup(world, &mut events);
    if resolve_win(world, &mut events) { return events; }
    resolve_enemy_movement(world);
    resolve_catch(world, &mut events);

    events
}

pub fn tick_enemies(world: &mut WorldState) -> Vec<GameEvent> {
    if world.phase != Phase::Playing { return vec![]; }

    let mut events = Vec::new();
    world.tick += 1;

    resolve_enemy_movement(world);
    resolve_catch(world, &mut events);

    events
}

// ══════════════════════════════════════════════════════════════
// Resolution phases
// ══════════════════════════════════════════════════════════════

fn resolve_player_movement(world: &mut WorldState, delta: Coordinate, events: &mut Vec<GameEvent>) {
    let field = world.compose();
    let next = rules::move_character(&field, world.player, delta);
    if next == world.player && delta != Coordinate::ZERO {
        events.push(GameEvent::Bumped { at: world.player });
    }
    world.player = next;
}

fn resolve_reward_pickup(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    let player = world.player;
    let before = world.rewards.len();
    world.rewards.retain(|&r| r != player);
    if world.rewards.len() < before {
        debug!(at = %player, left = world.rewards.len(), "reward collected");
        events.push(GameEvent::RewardCollected { at: player });
    }
}

/// Returns true when the stage was cleared this step.
fn resolve_win(world: &mut WorldState, events: &mut Vec<GameEvent>) -> bool {
    if !world.rewards.is_empty() { return false; }
    world.phase = Phase::Cleared;
    world.set_message("STAGE CLEAR! Press enter for the next stage");
    events.push(GameEvent::StageCleared);
    true
}

fn resolve_enemy_movement(world: &mut WorldState) {
    let field = world.compose();
    world.enemies = ai::move_enemy(&field, world.player, &world.enemies);
}

fn resolve_catch(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    if let Some(enemy) = world.catcher() {
        world.phase = Phase::Caught;
        world.set_message("CAUGHT! Press enter to retry");
        events.push(GameEvent::PlayerCaught { enemy, at: world.player });
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
