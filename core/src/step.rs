//! Step trait and the generic step shapes.
//!
//! RULE: A step never mutates drones. It returns the controls it wants and,
//! at most once, a game-state override. The runner applies both.

use crate::{
    drone::{Controls, Drone},
    packet::{GamePacket, GameState},
};

/// What a step produced for one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepResult {
    pub finished:   bool,
    /// One entry per drone, roster order. `None` leaves controls untouched.
    pub controls:   Option<Vec<Controls>>,
    /// Override to forward to the host this tick.
    pub game_state: Option<GameState>,
}

impl StepResult {
    /// One-shot world mutation: override now, done immediately.
    pub fn one_shot(state: GameState) -> Self {
        Self { finished: true, controls: None, game_state: Some(state) }
    }

    pub fn with_controls(controls: Vec<Controls>, finished: bool) -> Self {
        Self { finished, controls: Some(controls), game_state: None }
    }
}

/// The contract every choreography step fulfills.
pub trait Step: Send {
    /// Stable name, used in logs and the run log.
    fn name(&self) -> &'static str;

    /// Called once per tick while this step is active.
    ///
    /// - `packet`:     this tick's world snapshot
    /// - `drones`:     the full roster, roster order
    /// - `start_time`: `packet.seconds_elapsed` of the tick this step became active
    fn perform(&mut self, packet: &GamePacket, drones: &[Drone], start_time: f32) -> StepResult;
}

/// Seconds since the step became active.
pub fn elapsed(packet: &GamePacket, start_time: f32) -> f32 {
    packet.seconds_elapsed - start_time
}

/// Applies the same controls to every drone for a fixed duration.
pub struct BlindStep {
    controls: Controls,
    duration: f32,
}

impl BlindStep {
    pub fn new(controls: Controls, duration: f32) -> Self {
        Self { controls, duration }
    }
}

impl Step for BlindStep {
    fn name(&self) -> &'static str { "blind" }

    fn perform(&mut self, packet: &GamePacket, drones: &[Drone], start_time: f32) -> StepResult {
        let controls = vec![self.controls; drones.len()];
        StepResult::with_controls(controls, elapsed(packet, start_time) > self.duration)
    }
}
