pub mod ai;
pub mod coord;
pub mod grid;
pub mod rules;
pub mod symbol;
