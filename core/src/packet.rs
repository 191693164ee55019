//! Per-tick world snapshot supplied by the host, and the game-state
//! override description sent back to it.

use crate::types::{DroneIndex, Rotator, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Physics of a car or the ball as reported in a packet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysicsInfo {
    pub location:         Vec3,
    pub velocity:         Vec3,
    pub angular_velocity: Vec3,
    pub rotation:         Rotator,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CarInfo {
    pub physics: PhysicsInfo,
}

/// Read-only world state for one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GamePacket {
    /// Seconds since match start. Monotonic.
    pub seconds_elapsed: f32,
    /// Indexed by drone index.
    pub cars: Vec<CarInfo>,
    pub ball: PhysicsInfo,
}

// ── Game-state override ────────────────────────────────────────────

/// Desired physics. `None` fields are left as the host has them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Physics {
    pub location:         Option<Vec3>,
    pub velocity:         Option<Vec3>,
    pub angular_velocity: Option<Vec3>,
    pub rotation:         Option<Rotator>,
}

impl Physics {
    /// Placed at `location`, facing `rotation`, fully at rest.
    pub fn at_rest(location: Vec3, rotation: Rotator) -> Self {
        Self {
            location:         Some(location),
            velocity:         Some(Vec3::ZERO),
            angular_velocity: None,
            rotation:         Some(rotation),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CarState {
    pub physics: Physics,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub physics: Physics,
}

/// One atomic override, applied by the host before the next tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub ball: Option<BallState>,
    pub cars: BTreeMap<DroneIndex, CarState>,
}

impl GameState {
    pub fn with_ball(ball: BallState) -> Self {
        Self { ball: Some(ball), cars: BTreeMap::new() }
    }

    pub fn with_cars(cars: BTreeMap<DroneIndex, CarState>) -> Self {
        Self { ball: None, cars }
    }
}
