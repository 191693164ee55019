//! Crossing Squares: two 4×4 squares of cars drive at each other and
//! alternate jumps so the rows pass through one another. Needs 32 bots.
//!
//! SEQUENCE (fixed):
//!   1. HideBall      one-shot, ball parked above the arena
//!   2. MakeSquares   one-shot, both squares placed facing each other
//!   3. DelayedStart  rows start driving 0.9 s apart
//!   4. Interweave    even/odd drones jump in alternating slots
//!   5. BlindStep     neutral pause

use crate::{
    choreography::Choreography,
    config::{
        ChoreoConfig, DelayedStartConfig, GovernorConfig, HideBallConfig, InterweaveConfig,
        LineUpConfig, SquaresConfig,
    },
    drone::{governed_throttle, Controls, Drone},
    packet::{BallState, CarState, GamePacket, GameState, Physics},
    roster::{column_in_square, row_in_square, split_squares, Square, SQUARE_SIDE},
    step::{elapsed, BlindStep, Step, StepResult},
    types::{DroneIndex, Rotator, Vec3},
};
use std::collections::BTreeMap;

pub const NUM_BOTS: usize = 32;

pub struct CrossingSquares {
    config:   ChoreoConfig,
    sequence: Vec<Box<dyn Step>>,
}

impl CrossingSquares {
    pub fn new(config: ChoreoConfig) -> Self {
        Self { config, sequence: Vec::new() }
    }

    pub fn config(&self) -> &ChoreoConfig {
        &self.config
    }
}

impl Default for CrossingSquares {
    fn default() -> Self { Self::new(ChoreoConfig::default()) }
}

impl Choreography for CrossingSquares {
    fn name(&self) -> &'static str { "crossing_squares" }

    fn num_bots(&self) -> usize { NUM_BOTS }

    fn generate_sequence(&mut self) {
        self.sequence.clear();

        let cfg = &self.config;
        self.sequence.push(Box::new(HideBall::new(cfg.hide_ball.clone())));
        self.sequence.push(Box::new(MakeSquares::new(cfg.squares.clone())));
        self.sequence.push(Box::new(DelayedStart::new(
            cfg.delayed_start.clone(),
            cfg.governor.clone(),
        )));
        self.sequence.push(Box::new(Interweave::new(
            cfg.interweave.clone(),
            cfg.governor.clone(),
        )));
        self.sequence.push(Box::new(BlindStep::new(Controls::neutral(), cfg.pause_time)));
    }

    fn sequence(&self) -> &[Box<dyn Step>] {
        &self.sequence
    }

    fn sequence_mut(&mut self) -> &mut [Box<dyn Step>] {
        &mut self.sequence
    }
}

// ── One-shot steps ─────────────────────────────────────────────────

/// Parks the ball above the roof so it stays out of the way.
pub struct HideBall {
    config: HideBallConfig,
}

impl HideBall {
    pub fn new(config: HideBallConfig) -> Self {
        Self { config }
    }

    pub fn game_state(&self) -> GameState {
        GameState::with_ball(BallState {
            physics: Physics {
                location:         Some(self.config.location),
                velocity:         Some(Vec3::ZERO),
                angular_velocity: Some(Vec3::ZERO),
                rotation:         None,
            },
        })
    }
}

impl Step for HideBall {
    fn name(&self) -> &'static str { "hide_ball" }

    fn perform(&mut self, _packet: &GamePacket, _drones: &[Drone], _start_time: f32) -> StepResult {
        StepResult::one_shot(self.game_state())
    }
}

/// Puts every car in one tidy line along y, centred on the roster.
/// Not part of the main sequence.
pub struct LineUp {
    config: LineUpConfig,
}

impl LineUp {
    pub fn new(config: LineUpConfig) -> Self {
        Self { config }
    }

    pub fn game_state(&self, drones: &[Drone]) -> GameState {
        let c = &self.config;
        let start_y = -(drones.len() as f32) * c.y_increment / 2.0;
        let cars = drones
            .iter()
            .map(|drone| {
                let location = Vec3::new(
                    c.start_x,
                    start_y + drone.index as f32 * c.y_increment,
                    c.start_z,
                );
                (drone.index, CarState { physics: Physics::at_rest(location, Rotator::default()) })
            })
            .collect();
        GameState::with_cars(cars)
    }
}

impl Step for LineUp {
    fn name(&self) -> &'static str { "line_up" }

    fn perform(&mut self, _packet: &GamePacket, drones: &[Drone], _start_time: f32) -> StepResult {
        StepResult::one_shot(self.game_state(drones))
    }
}

/// Splits the roster in two squares facing each other across midfield.
pub struct MakeSquares {
    config: SquaresConfig,
}

impl MakeSquares {
    pub fn new(config: SquaresConfig) -> Self {
        Self { config }
    }

    pub fn game_state(&self, drones: &[Drone]) -> GameState {
        let c = &self.config;
        let x_offset = c.x_offset();
        let (square_a, square_b) = split_squares(drones);

        let mut cars: BTreeMap<DroneIndex, CarState> = BTreeMap::new();
        for (square, members) in [(Square::A, square_a), (Square::B, square_b)] {
            let s = square.sign();
            let rotation = Rotator::new(0.0, square.yaw(), 0.0);
            for (i, drone) in members.iter().enumerate() {
                // A: columns toward -x, rows toward -y. B is the point mirror.
                let location = Vec3::new(
                    s * (x_offset - c.spacing * column_in_square(i) as f32),
                    -s * (c.y_offset + c.spacing * (i / SQUARE_SIDE) as f32),
                    c.height,
                );
                cars.insert(drone.index, CarState { physics: Physics::at_rest(location, rotation) });
            }
        }
        GameState::with_cars(cars)
    }
}

impl Step for MakeSquares {
    fn name(&self) -> &'static str { "make_squares" }

    fn perform(&mut self, _packet: &GamePacket, drones: &[Drone], _start_time: f32) -> StepResult {
        StepResult::one_shot(self.game_state(drones))
    }
}

// ── Timed per-drone steps ──────────────────────────────────────────

/// Spreads the squares out by starting each row later than the one before.
pub struct DelayedStart {
    config:   DelayedStartConfig,
    governor: GovernorConfig,
}

impl DelayedStart {
    pub fn new(config: DelayedStartConfig, governor: GovernorConfig) -> Self {
        Self { config, governor }
    }

    /// Seconds after step start at which `index` may begin driving.
    pub fn throttle_start(&self, index: DroneIndex) -> f32 {
        row_in_square(index) as f32 * self.config.row_delay
    }

    pub fn controls_for(&self, drone: &Drone, elapsed: f32) -> Controls {
        let mut ctrl = Controls::neutral();
        if self.throttle_start(drone.index) < elapsed {
            ctrl.throttle = governed_throttle(drone, &self.governor);
        }
        ctrl
    }
}

impl Step for DelayedStart {
    fn name(&self) -> &'static str { "delayed_start" }

    fn perform(&mut self, packet: &GamePacket, drones: &[Drone], start_time: f32) -> StepResult {
        let elapsed = elapsed(packet, start_time);
        let controls = drones.iter().map(|d| self.controls_for(d, elapsed)).collect();
        StepResult::with_controls(controls, elapsed > self.config.duration)
    }
}

/// Makes the drones jump in alternating slots so they hop over each other.
pub struct Interweave {
    config:   InterweaveConfig,
    governor: GovernorConfig,
}

impl Interweave {
    pub fn new(config: InterweaveConfig, governor: GovernorConfig) -> Self {
        Self { config, governor }
    }

    /// Even drones own slots 0, 2, 4, ..., odd drones 1, 3, 5, ...
    /// Both window edges are exclusive.
    pub fn jumping(&self, index: DroneIndex, elapsed: f32) -> bool {
        let c = &self.config;
        (0..c.slots)
            .filter(|slot| *slot as usize % 2 == index % 2)
            .any(|slot| {
                let open = c.start + slot as f32 * c.buffer;
                open < elapsed && elapsed < open + c.hold
            })
    }

    pub fn duration(&self) -> f32 {
        self.config.start + self.config.end_slots as f32 * self.config.buffer
    }

    pub fn controls_for(&self, drone: &Drone, elapsed: f32) -> Controls {
        Controls {
            throttle: governed_throttle(drone, &self.governor),
            jump: self.jumping(drone.index, elapsed),
            ..Controls::neutral()
        }
    }
}

impl Step for Interweave {
    fn name(&self) -> &'static str { "interweave" }

    fn perform(&mut self, packet: &GamePacket, drones: &[Drone], start_time: f32) -> StepResult {
        let elapsed = elapsed(packet, start_time);
        let controls = drones.iter().map(|d| self.controls_for(d, elapsed)).collect();
        StepResult::with_controls(controls, elapsed > self.duration())
    }
}
