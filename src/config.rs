/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.
///
/// ```toml
/// [general]
/// stage = "amateur"        # stage to start on
/// seed = 42                # optional: reproducible spawns
///
/// [keys]
/// preset = "arrow"         # or "hjkl"; any intent below overrides the preset
/// go_up = "w"
///
/// [speed]
/// enemy_tick_ms = 0        # 0 = enemies only move when the player does
///
/// [log]
/// level = "info"
/// file = "gridchase.log"
///
/// [stages.huge]
/// rows = 15
/// columns = 31
/// enemies = 6
/// rewards = 8
/// ```
///
/// Problems found while loading are collected in `warnings`; the logger is
/// not up yet at that point, so the caller reports them afterwards.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::coord::Coordinate;
use crate::sim::stage::{builtin_stages, Stage};

// ── Public Config Structs ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub stages: Vec<Stage>,
    /// Index into `stages` to start on.
    pub start_stage: usize,
    pub seed: Option<u64>,
    pub keys: KeyConfig,
    pub speed: SpeedConfig,
    pub log: LogConfig,
    pub warnings: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct SpeedConfig {
    pub enemy_tick_ms: u64,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    pub level: String,
    pub file: PathBuf,
}

/// Logical intents mapped to key identifiers
/// (`"ArrowUp"`, `"Shift+ArrowUp"`, `"k"`, `"Shift+K"`, `"Enter"`, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyConfig {
    pub go_up: String,
    pub go_down: String,
    pub go_left: String,
    pub go_right: String,
    pub jump_up: String,
    pub jump_down: String,
    pub jump_left: String,
    pub jump_right: String,
    pub enter: String,
    pub reset: String,
}

// ── Key presets / classification ──

impl KeyConfig {
    pub fn arrow() -> Self {
        KeyConfig {
            go_up: "ArrowUp".into(),
            go_down: "ArrowDown".into(),
            go_left: "ArrowLeft".into(),
            go_right: "ArrowRight".into(),
            jump_up: "Shift+ArrowUp".into(),
            jump_down: "Shift+ArrowDown".into(),
            jump_left: "Shift+ArrowLeft".into(),
            jump_right: "Shift+ArrowRight".into(),
            enter: "Enter".into(),
            reset: "r".into(),
        }
    }

    pub fn hjkl() -> Self {
        KeyConfig {
            go_up: "k".into(),
            go_down: "j".into(),
            go_left: "h".into(),
            go_right: "l".into(),
            jump_up: "Shift+K".into(),
            jump_down: "Shift+J".into(),
            jump_left: "Shift+H".into(),
            jump_right: "Shift+L".into(),
            enter: ";".into(),
            reset: "r".into(),
        }
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "arrow" => Some(Self::arrow()),
            "hjkl" => Some(Self::hjkl()),
            _ => None,
        }
    }

    fn going(&self) -> [(&str, Coordinate); 4] {
        [
            (self.go_up.as_str(), Coordinate::UP),
            (self.go_down.as_str(), Coordinate::DOWN),
            (self.go_left.as_str(), Coordinate::LEFT),
            (self.go_right.as_str(), Coordinate::RIGHT),
        ]
    }

    fn jumping(&self) -> [(&str, Coordinate); 4] {
        [
            (self.jump_up.as_str(), Coordinate::UP),
            (self.jump_down.as_str(), Coordinate::DOWN),
            (self.jump_left.as_str(), Coordinate::LEFT),
            (self.jump_right.as_str(), Coordinate::RIGHT),
        ]
    }

    pub fn is_going_key(&self, key: &str) -> bool {
        self.going().iter().any(|(k, _)| *k == key)
    }

    pub fn is_jumping_key(&self, key: &str) -> bool {
        self.jumping().iter().any(|(k, _)| *k == key)
    }

    pub fn is_moving_key(&self, key: &str) -> bool {
        self.is_going_key(key) || self.is_jumping_key(key)
    }

    /// Displacement for a moving key: one cell for going, two for jumping.
    pub fn displacement(&self, key: &str) -> Option<Coordinate> {
        let go = self.going().into_iter().find(|(k, _)| *k == key).map(|(_, d)| d);
        let jump = self.jumping().into_iter().find(|(k, _)| *k == key).map(|(_, d)| d.scaled(2));
        go.or(jump)
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    keys: TomlKeys,
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    log: TomlLog,
    #[serde(default)]
    stages: BTreeMap<String, TomlStage>,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_stage")]
    stage: String,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Deserialize, Debug)]
struct TomlKeys {
    #[serde(default = "default_preset")]
    preset: String,
    go_up: Option<String>,
    go_down: Option<String>,
    go_left: Option<String>,
    go_right: Option<String>,
    jump_up: Option<String>,
    jump_down: Option<String>,
    jump_left: Option<String>,
    jump_right: Option<String>,
    enter: Option<String>,
    reset: Option<String>,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default)]
    enemy_tick_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlLog {
    #[serde(default = "default_log_level")]
    level: String,
    #[serde(default = "default_log_file")]
    file: String,
}

#[derive(Deserialize, Debug)]
struct TomlStage {
    rows: usize,
    columns: usize,
    #[serde(default = "default_start")]
    start_x: i32,
    #[serde(default = "default_start")]
    start_y: i32,
    #[serde(default = "default_count")]
    enemies: usize,
    #[serde(default = "default_count")]
    rewards: usize,
}

// ── Defaults ──

fn default_stage() -> String { "amateur".into() }
fn default_preset() -> String { "arrow".into() }
fn default_log_level() -> String { "info".into() }
fn default_log_file() -> String { "gridchase.log".into() }
fn default_start() -> i32 { 1 }
fn default_count() -> usize { 1 }

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral { stage: default_stage(), seed: None }
    }
}

impl Default for TomlKeys {
    fn default() -> Self {
        TomlKeys {
            preset: default_preset(),
            go_up: None,
            go_down: None,
            go_left: None,
            go_right: None,
            jump_up: None,
            jump_down: None,
            jump_left: None,
            jump_right: None,
            enter: None,
            reset: None,
        }
    }
}

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed { enemy_tick_ms: 0 }
    }
}

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog { level: default_log_level(), file: default_log_file() }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let mut warnings = vec![];
        let toml_cfg = load_toml(&candidate_dirs(), &mut warnings);
        Self::resolve(toml_cfg, warnings)
    }

    /// Parse config text directly (no file search).
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let toml_cfg = toml::from_str::<TomlConfig>(text)?;
        Ok(Self::resolve(toml_cfg, vec![]))
    }

    fn resolve(cfg: TomlConfig, mut warnings: Vec<String>) -> Self {
        // Stages: built-ins first, custom ones replace same-named or append
        let mut stages = builtin_stages();
        for (name, s) in &cfg.stages {
            let start = Coordinate::new(s.start_x, s.start_y);
            match Stage::new(name, s.rows, s.columns, start, s.enemies, s.rewards) {
                Ok(stage) => match stages.iter().position(|b| b.name == stage.name) {
                    Some(i) => stages[i] = stage,
                    None => stages.push(stage),
                },
                Err(e) => warnings.push(format!("skipping custom stage: {e}")),
            }
        }

        let start_stage = match stages.iter().position(|s| s.name == cfg.general.stage) {
            Some(i) => i,
            None => {
                warnings.push(format!("unknown stage '{}', starting on '{}'", cfg.general.stage, stages[0].name));
                0
            }
        };

        let keys = resolve_keys(&cfg.keys, &mut warnings);

        GameConfig {
            stages,
            start_stage,
            seed: cfg.general.seed,
            keys,
            speed: SpeedConfig { enemy_tick_ms: cfg.speed.enemy_tick_ms },
            log: LogConfig { level: cfg.log.level, file: PathBuf::from(cfg.log.file) },
            warnings,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::resolve(TomlConfig::default(), vec![])
    }
}

fn resolve_keys(keys: &TomlKeys, warnings: &mut Vec<String>) -> KeyConfig {
    let mut out = KeyConfig::preset(&keys.preset).unwrap_or_else(|| {
        warnings.push(format!("unknown key preset '{}', using 'arrow'", keys.preset));
        KeyConfig::arrow()
    });
    let overrides = [
        (&keys.go_up, &mut out.go_up),
        (&keys.go_down, &mut out.go_down),
        (&keys.go_left, &mut out.go_left),
        (&keys.go_right, &mut out.go_right),
        (&keys.jump_up, &mut out.jump_up),
        (&keys.jump_down, &mut out.jump_down),
        (&keys.jump_left, &mut out.jump_left),
        (&keys.jump_right, &mut out.jump_right),
        (&keys.enter, &mut out.enter),
        (&keys.reset, &mut out.reset),
    ];
    for (src, dst) in overrides {
        if let Some(k) = src {
            *dst = k.clone();
        }
    }
    out
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf], warnings: &mut Vec<String>) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        warnings.push(format!("config.toml parse error, using defaults: {e}"));
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    warnings.push(format!("could not read {}: {e}", path.display()));
                }
            }
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let cfg = GameConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.stages.len(), 3);
        assert_eq!(cfg.start_stage, 0);
        assert_eq!(cfg.keys, KeyConfig::arrow());
        assert_eq!(cfg.speed.enemy_tick_ms, 0);
        assert_eq!(cfg.log.level, "info");
        assert!(cfg.warnings.is_empty());
    }

    #[test]
    fn custom_stage_appended_and_selected() {
        let cfg = GameConfig::from_toml_str(
            "[general]\nstage = \"huge\"\nseed = 7\n\n[stages.huge]\nrows = 15\ncolumns = 31\nenemies = 6\nrewards = 8\n",
        ).unwrap();
        assert_eq!(cfg.stages.len(), 4);
        assert_eq!(cfg.start_stage, 3);
        assert_eq!(cfg.stages[3].enemy_count, 6);
        assert_eq!(cfg.seed, Some(7));
    }

    #[test]
    fn custom_stage_replaces_builtin() {
        let cfg = GameConfig::from_toml_str("[stages.normal]\nrows = 6\ncolumns = 6\n").unwrap();
        assert_eq!(cfg.stages.len(), 3);
        assert_eq!(cfg.stages[1].table_size.row(), 6);
    }

    #[test]
    fn invalid_stage_skipped_with_warning() {
        let cfg = GameConfig::from_toml_str("[stages.tiny]\nrows = 2\ncolumns = 9\n").unwrap();
        assert_eq!(cfg.stages.len(), 3);
        assert_eq!(cfg.warnings.len(), 1);
    }

    #[test]
    fn overfull_custom_stage_skipped() {
        // 3x3 leaves no room beside the player for the default enemy and reward
        let cfg = GameConfig::from_toml_str(
            "[general]\nstage = \"cramped\"\n\n[stages.cramped]\nrows = 3\ncolumns = 3\n",
        ).unwrap();
        assert_eq!(cfg.stages.len(), 3);
        assert_eq!(cfg.start_stage, 0);
        assert_eq!(cfg.warnings.len(), 2);
        assert!(cfg.warnings[0].starts_with("skipping custom stage: stage 'cramped'"));
        assert!(cfg.warnings[1].contains("unknown stage 'cramped'"));
    }

    #[test]
    fn rewardless_custom_stage_skipped() {
        let cfg = GameConfig::from_toml_str("[stages.bare]\nrows = 7\ncolumns = 7\nrewards = 0\n").unwrap();
        assert_eq!(cfg.stages.len(), 3);
        assert_eq!(cfg.warnings.len(), 1);
    }

    #[test]
    fn unknown_stage_falls_back() {
        let cfg = GameConfig::from_toml_str("[general]\nstage = \"legendary\"\n").unwrap();
        assert_eq!(cfg.start_stage, 0);
        assert_eq!(cfg.warnings.len(), 1);
    }

    #[test]
    fn key_preset_and_override() {
        let cfg = GameConfig::from_toml_str("[keys]\npreset = \"hjkl\"\nreset = \"R\"\n").unwrap();
        assert_eq!(cfg.keys.go_left, "h");
        assert_eq!(cfg.keys.reset, "R");
    }

    #[test]
    fn key_classification() {
        let keys = KeyConfig::arrow();
        assert!(keys.is_going_key("ArrowUp"));
        assert!(!keys.is_jumping_key("ArrowUp"));
        assert!(keys.is_jumping_key("Shift+ArrowLeft"));
        assert!(keys.is_moving_key("Shift+ArrowLeft"));
        assert!(!keys.is_moving_key("Enter"));
        assert!(!keys.is_moving_key("r"));
    }

    #[test]
    fn displacements() {
        let keys = KeyConfig::hjkl();
        assert_eq!(keys.displacement("h"), Some(Coordinate::new(-1, 0)));
        assert_eq!(keys.displacement("Shift+J"), Some(Coordinate::new(0, 2)));
        assert_eq!(keys.displacement(";"), None);
    }

    #[test]
    fn malformed_toml_is_error() {
        assert!(GameConfig::from_toml_str("[general\nstage=").is_err());
    }

    #[test]
    fn load_without_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut warnings = vec![];
        let cfg = load_toml(&[dir.path().to_path_buf()], &mut warnings);
        assert!(warnings.is_empty());
        assert_eq!(cfg.general.stage, "amateur");
        assert!(cfg.stages.is_empty());
    }

    #[test]
    fn load_reads_first_dir_with_file() {
        let empty = tempfile::tempdir().unwrap();
        let found = tempfile::tempdir().unwrap();
        std::fs::write(found.path().join("config.toml"), "[general]\nstage = \"normal\"\n").unwrap();
        let mut warnings = vec![];
        let cfg = load_toml(&[empty.path().to_path_buf(), found.path().to_path_buf()], &mut warnings);
        assert!(warnings.is_empty());
        assert_eq!(cfg.general.stage, "normal");
    }

    #[test]
    fn load_falls_back_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "[general\nstage = \"normal\"\n").unwrap();
        let mut warnings = vec![];
        let cfg = load_toml(&[dir.path().to_path_buf()], &mut warnings);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("config.toml parse error, using defaults"));
        assert_eq!(cfg.general.stage, "amateur");

        let resolved = GameConfig::resolve(cfg, warnings);
        assert_eq!(resolved.stages.len(), 3);
        assert_eq!(resolved.start_stage, 0);
        assert_eq!(resolved.warnings.len(), 1);
    }
}
