/// Presentation layer: line-diffed terminal renderer.
///
/// How it works:
///   1. Build the next frame as a list of styled lines
///   2. Compare each line with the previous frame
///   3. Only emit terminal commands for lines that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///
/// The field itself comes straight from `Grid::render`; each symbol
/// character is colored, nothing else is changed.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use gridchase::config::KeyConfig;
use gridchase::domain::symbol::Symbol;
use gridchase::sim::world::{Phase, WorldState};

/// One run of same-colored text.
type Span = (Color, String);
type Line = Vec<Span>;

pub struct Renderer {
    out: BufWriter<Stdout>,
    back: Vec<Line>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer { out: BufWriter::new(io::stdout()), back: vec![] }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.out, terminal::EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(self.out, ResetColor, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, world: &WorldState, keys: &KeyConfig) -> io::Result<()> {
        let front = build_frame(world, keys);

        // Shape changed (new stage): wipe and redraw everything
        if front.len() != self.back.len() {
            queue!(self.out, Clear(ClearType::All))?;
            self.back.clear();
        }

        for (y, line) in front.iter().enumerate() {
            if self.back.get(y) == Some(line) { continue; }
            queue!(self.out, MoveTo(0, y as u16), Clear(ClearType::CurrentLine))?;
            for (color, text) in line {
                queue!(self.out, SetForegroundColor(*color), Print(text))?;
            }
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()?;

        self.back = front;
        Ok(())
    }
}

fn symbol_color(s: Symbol) -> Color {
    match s {
        Symbol::Wall => Color::DarkGrey,
        Symbol::Blank => Color::Reset,
        Symbol::Fence => Color::DarkYellow,
        Symbol::MainCharacter => Color::Cyan,
        Symbol::Enemy => Color::Red,
        Symbol::Reward => Color::Yellow,
    }
}

fn plain(color: Color, text: impl Into<String>) -> Line {
    vec![(color, text.into())]
}

/// Color one rendered grid row, merging neighbours of the same color.
fn field_line(row: &str) -> Line {
    let mut line: Line = vec![];
    for ch in row.chars() {
        let color = Symbol::from_char(ch).map_or(Color::Reset, symbol_color);
        match line.last_mut() {
            Some((c, text)) if *c == color => text.push(ch),
            _ => line.push((color, ch.to_string())),
        }
    }
    line
}

fn build_frame(world: &WorldState, keys: &KeyConfig) -> Vec<Line> {
    let stage = world.stage();
    let mut frame = vec![
        plain(Color::White, format!(
            " GRID CHASE  stage {}/{}: {}",
            world.current_stage + 1, world.stages.len(), stage.name
        )),
        plain(Color::Reset, ""),
    ];

    let field = world.render();
    frame.extend(field.lines().map(field_line));

    frame.push(plain(Color::Reset, ""));
    frame.push(plain(Color::White, format!(
        " rewards left: {}   moves: {}",
        world.rewards.len(), world.moves
    )));

    let status_color = match world.phase {
        Phase::Playing => Color::Grey,
        Phase::Cleared => Color::Green,
        Phase::Caught => Color::Red,
    };
    frame.push(plain(status_color, format!(" {}", world.message)));
    frame.push(plain(Color::DarkGrey, format!(
        " move: {} {} {} {}   jump: {} {} {} {}   enter: {}   reset: {}   quit: Esc",
        keys.go_up, keys.go_down, keys.go_left, keys.go_right,
        keys.jump_up, keys.jump_down, keys.jump_left, keys.jump_right,
        keys.enter, keys.reset
    )));
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_line_groups_colors() {
        let line = field_line("XX u*");
        assert_eq!(line, vec![
            (Color::DarkGrey, "XX".to_string()),
            (Color::Reset, " ".to_string()),
            (Color::Cyan, "u".to_string()),
            (Color::Yellow, "*".to_string()),
        ]);
    }

    #[test]
    fn frame_contains_field_rows() {
        let world = WorldState::new(gridchase::sim::stage::builtin_stages(), 0, Some(3)).unwrap();
        let frame = build_frame(&world, &KeyConfig::arrow());
        let text: Vec<String> = frame.iter()
            .map(|l| l.iter().map(|(_, t)| t.as_str()).collect())
            .collect();
        assert!(text.contains(&"XXXXX".to_string()));
        assert_eq!(text.len(), 2 + 5 + 4);
    }
}
