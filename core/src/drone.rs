//! Drones and the controls written to them each tick.

use crate::{
    config::GovernorConfig,
    packet::CarInfo,
    types::{DroneIndex, Vec3},
};
use serde::{Deserialize, Serialize};

/// One tick of controller output. `Default` is neutral: no input at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Controls {
    pub throttle:  f32,
    pub steer:     f32,
    pub pitch:     f32,
    pub yaw:       f32,
    pub roll:      f32,
    pub jump:      bool,
    pub boost:     bool,
    pub handbrake: bool,
}

impl Controls {
    pub fn neutral() -> Self {
        Self::default()
    }
}

/// One controllable car, as the runner sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct Drone {
    pub index:    DroneIndex,
    pub velocity: Vec3,
    pub controls: Controls,
}

impl Drone {
    pub fn new(index: DroneIndex) -> Self {
        Self {
            index,
            velocity: Vec3::ZERO,
            controls: Controls::neutral(),
        }
    }

    pub fn update(&mut self, car: &CarInfo) {
        self.velocity = car.physics.velocity;
    }

    pub fn horizontal_speed(&self) -> f32 {
        self.velocity.horizontal_norm()
    }
}

/// Bang-bang speed controller: full configured throttle at or below the cap,
/// nothing above it. Never brakes.
pub fn governed_throttle(drone: &Drone, governor: &GovernorConfig) -> f32 {
    if drone.horizontal_speed() > governor.speed_cap {
        0.0
    } else {
        governor.throttle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn governor() -> GovernorConfig {
        GovernorConfig::default()
    }

    fn moving(velocity: Vec3) -> Drone {
        Drone { velocity, ..Drone::new(0) }
    }

    #[test]
    fn throttle_cut_above_cap() {
        assert_eq!(governed_throttle(&moving(Vec3::new(700.0, 0.0, 0.0)), &governor()), 0.0);
    }

    #[test]
    fn throttle_applied_below_cap() {
        assert_eq!(governed_throttle(&moving(Vec3::new(300.0, 0.0, 0.0)), &governor()), 0.7);
    }

    #[test]
    fn exactly_at_cap_still_drives() {
        assert_eq!(governed_throttle(&moving(Vec3::new(0.0, -650.0, 0.0)), &governor()), 0.7);
    }

    #[test]
    fn vertical_speed_is_ignored() {
        // 3-4-5 triangle in the ground plane, big vertical component.
        let d = moving(Vec3::new(300.0, 400.0, 2000.0));
        assert_eq!(d.horizontal_speed(), 500.0);
        assert_eq!(governed_throttle(&d, &governor()), 0.7);
        let d = moving(Vec3::new(420.0, 560.0, 0.0)); // 700
        assert_eq!(governed_throttle(&d, &governor()), 0.0);
    }

    #[test]
    fn update_reads_velocity_from_packet() {
        let mut d = Drone::new(3);
        let mut car = CarInfo::default();
        car.physics.velocity = Vec3::new(0.0, 640.0, 10.0);
        d.update(&car);
        assert_eq!(d.velocity, Vec3::new(0.0, 640.0, 10.0));
    }

    #[test]
    fn new_drone_is_neutral_and_at_rest() {
        let d = Drone::new(7);
        assert_eq!(d.index, 7);
        assert_eq!(d.controls, Controls::neutral());
        assert_eq!(d.horizontal_speed(), 0.0);
    }
}
