//! The seam to the host simulation.

use crate::{error::ChoreoResult, packet::GameState};

/// Accepts one-shot game-state overrides.
///
/// Overrides are fire-and-forget: the runner logs a failed call and moves on.
pub trait GameInterface {
    fn set_game_state(&mut self, state: &GameState) -> ChoreoResult<()>;
}
