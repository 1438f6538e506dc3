/// Events emitted during a simulation step.
/// The presentation layer consumes these for status messages and logging.

use crate::domain::coord::Coordinate;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// Requested move was refused; player stayed put.
    Bumped { at: Coordinate },
    RewardCollected { at: Coordinate },
    StageCleared,
    PlayerCaught { enemy: usize, at: Coordinate },
}
