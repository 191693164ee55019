//! Shared primitive types used across the choreography.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// A runner tick. One tick = one packet from the host.
pub type Tick = u64;

/// Stable roster position of a drone (0..N-1, assignment order).
pub type DroneIndex = usize;

/// The canonical run identifier.
pub type RunId = String;

/// Unreal-style world vector. Z is up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Length of the ground-plane projection (z ignored).
    pub fn horizontal_norm(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Orientation in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw:   f32,
    pub roll:  f32,
}

impl Rotator {
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }
}
