//! Grid Chase: the playing-field engine.
//!
//!   - `domain`: symbols, coordinates, the grid, movement rules, enemy pursuit
//!   - `sim`   : stages, spawning, world state and the step functions
//!   - `config`: `config.toml` loading, key presets
//!
//! The terminal front end (`ui`) lives in the binary.

pub mod config;
pub mod domain;
pub mod sim;
