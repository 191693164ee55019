//! Headless stand-in for the host simulation.
//!
//! Produces packets at a fixed rate and applies overrides. There are no
//! forces: a car keeps whatever velocity it was last given and drifts along
//! it. Good enough to dry-run a choreography's timing without a game.

use crate::{
    clock::MatchClock,
    error::ChoreoResult,
    host::GameInterface,
    packet::{CarInfo, GamePacket, GameState, Physics, PhysicsInfo},
    types::{DroneIndex, Vec3},
};

pub struct HeadlessArena {
    pub clock: MatchClock,
    cars:      Vec<PhysicsInfo>,
    ball:      PhysicsInfo,
    overrides: Vec<GameState>,
}

impl HeadlessArena {
    pub fn new(num_cars: usize, ticks_per_second: u32) -> Self {
        Self {
            clock:     MatchClock::new(ticks_per_second),
            cars:      vec![PhysicsInfo::default(); num_cars],
            ball:      PhysicsInfo::default(),
            overrides: Vec::new(),
        }
    }

    pub fn packet(&self) -> GamePacket {
        GamePacket {
            seconds_elapsed: self.clock.seconds_elapsed(),
            cars: self.cars.iter().map(|p| CarInfo { physics: *p }).collect(),
            ball: self.ball,
        }
    }

    /// Step the clock and drift every body along its velocity.
    pub fn advance(&mut self) {
        self.clock.advance();
        let dt = self.clock.dt();
        for body in self.cars.iter_mut().chain(std::iter::once(&mut self.ball)) {
            body.location = body.location + body.velocity * dt;
        }
    }

    pub fn set_car_velocity(&mut self, index: DroneIndex, velocity: Vec3) {
        if let Some(car) = self.cars.get_mut(index) {
            car.velocity = velocity;
        }
    }

    pub fn car(&self, index: DroneIndex) -> Option<&PhysicsInfo> {
        self.cars.get(index)
    }

    pub fn ball(&self) -> &PhysicsInfo {
        &self.ball
    }

    /// Every override received, in order.
    pub fn overrides(&self) -> &[GameState] {
        &self.overrides
    }
}

fn merge(target: &mut PhysicsInfo, desired: &Physics) {
    if let Some(v) = desired.location         { target.location = v; }
    if let Some(v) = desired.velocity         { target.velocity = v; }
    if let Some(v) = desired.angular_velocity { target.angular_velocity = v; }
    if let Some(v) = desired.rotation         { target.rotation = v; }
}

impl GameInterface for HeadlessArena {
    fn set_game_state(&mut self, state: &GameState) -> ChoreoResult<()> {
        if let Some(ball) = &state.ball {
            merge(&mut self.ball, &ball.physics);
        }
        for (index, car) in &state.cars {
            match self.cars.get_mut(*index) {
                Some(target) => merge(target, &car.physics),
                None => log::warn!("override for unknown car {index} ignored"),
            }
        }
        self.overrides.push(state.clone());
        Ok(())
    }
}
