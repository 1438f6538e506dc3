pub mod event;
pub mod random;
pub mod stage;
pub mod step;
pub mod world;
