/// Entry point and game loop.

mod logging;
mod ui;

use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use gridchase::config::{GameConfig, KeyConfig};
use gridchase::sim::event::GameEvent;
use gridchase::sim::stage::StageError;
use gridchase::sim::step;
use gridchase::sim::world::{Phase, WorldState};
use ui::input::InputState;
use ui::renderer::Renderer;

/// How long to wait for input when enemies are not on a timer.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() {
    let config = GameConfig::load();

    if let Err(e) = logging::init(&config.log) {
        eprintln!("Warning: logging disabled: {e}");
    }
    for w in &config.warnings {
        warn!("{w}");
    }

    let mut world = match WorldState::new(config.stages.clone(), config.start_stage, config.seed) {
        Ok(w) => w,
        Err(e) => {
            error!("stage setup failed: {e}");
            eprintln!("Stage setup failed: {e}");
            return;
        }
    };

    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = game_loop(&mut world, &mut renderer, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        error!("game error: {e}");
        eprintln!("Game error: {e}");
    }

    info!(stage = %world.stage().name, moves = world.moves, "session ended");
    println!();
    println!("Thanks for playing Grid Chase!");
    println!("Last stage: {}", world.stage().name);
}

fn game_loop(
    world: &mut WorldState,
    renderer: &mut Renderer,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut input = InputState::new();
    let enemy_tick = (config.speed.enemy_tick_ms > 0)
        .then(|| Duration::from_millis(config.speed.enemy_tick_ms));
    let mut last_tick = Instant::now();

    loop {
        renderer.render(world, &config.keys)?;

        let timeout = match enemy_tick {
            Some(t) => t.saturating_sub(last_tick.elapsed()),
            None => IDLE_POLL,
        };
        input.drain_events(timeout)?;

        if input.quit_requested() {
            break;
        }

        for key in &input.keys {
            handle_key(world, &config.keys, key);
        }

        if let Some(t) = enemy_tick {
            if last_tick.elapsed() >= t {
                let events = step::tick_enemies(world);
                log_events(&events);
                last_tick = Instant::now();
            }
        }
    }

    Ok(())
}

/// Apply one key identifier. A stage that fails to load leaves the
/// current stage in place and is reported on the status line.
fn handle_key(world: &mut WorldState, keys: &KeyConfig, key: &str) {
    if let Err(e) = apply_key(world, keys, key) {
        error!("stage load failed: {e}");
        world.set_message(&format!("Could not load stage: {e}"));
    }
}

/// Reset, enter, or a move.
fn apply_key(world: &mut WorldState, keys: &KeyConfig, key: &str) -> Result<(), StageError> {
    if key == keys.reset {
        info!(stage = %world.stage().name, "stage reset");
        return world.restart_stage();
    }

    if key == keys.enter {
        return match world.phase {
            Phase::Cleared => world.next_stage(),
            Phase::Caught => world.restart_stage(),
            Phase::Playing => Ok(()),
        };
    }

    if let Some(delta) = keys.displacement(key) {
        let events = step::step(world, delta);
        log_events(&events);
    }
    Ok(())
}

fn log_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::Bumped { at } => debug!(%at, "bumped"),
            GameEvent::RewardCollected { at } => info!(%at, "reward collected"),
            GameEvent::StageCleared => info!("stage cleared"),
            GameEvent::PlayerCaught { enemy, at } => info!(enemy, %at, "player caught"),
        }
    }
}
