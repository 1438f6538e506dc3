/// Input reader.
///
/// Drains pending terminal events and turns key presses into key
/// identifiers matching the `KeyConfig` vocabulary:
///   arrows          → "ArrowUp", "Shift+ArrowUp", ...
///   letters         → "k", uppercase as "Shift+K"
///   Enter / Escape  → "Enter", "Escape"
///
/// Release and Repeat events are ignored: one press is one move.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub struct InputState {
    /// Key identifiers pressed since the last drain, in arrival order.
    pub keys: Vec<String>,
    quit: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState { keys: Vec::with_capacity(8), quit: false }
    }

    /// Wait up to `timeout` for the first event, then drain everything pending.
    pub fn drain_events(&mut self, timeout: Duration) -> std::io::Result<()> {
        self.keys.clear();

        let mut wait = timeout;
        while poll(wait)? {
            wait = Duration::ZERO;
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press { continue; }
                if is_quit(&key) {
                    self.quit = true;
                } else if let Some(id) = key_identifier(&key) {
                    self.keys.push(id);
                }
            }
        }
        Ok(())
    }

    /// Ctrl+C or Escape seen?
    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C')))
}

pub fn key_identifier(key: &KeyEvent) -> Option<String> {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let arrow = match key.code {
        KeyCode::Up => Some("ArrowUp"),
        KeyCode::Down => Some("ArrowDown"),
        KeyCode::Left => Some("ArrowLeft"),
        KeyCode::Right => Some("ArrowRight"),
        _ => None,
    };
    if let Some(name) = arrow {
        return Some(if shift { format!("Shift+{name}") } else { name.to_string() });
    }

    match key.code {
        KeyCode::Enter => Some("Enter".to_string()),
        KeyCode::Esc => Some("Escape".to_string()),
        KeyCode::Char(c) if c.is_ascii_uppercase() => Some(format!("Shift+{c}")),
        KeyCode::Char(c) => Some(c.to_string()),
        _ => None,
    }
}
