//! The sequence runner. Drives one choreography tick by tick.
//!
//! RULES:
//!   - Exactly one step is active at a time; steps run in list order.
//!   - A step's start time is the `seconds_elapsed` of its first tick.
//!   - A finished step hands over on the next tick, never the same one.
//!   - Controls returned by a step overwrite the roster's controls wholesale.
//!   - Every transition is recorded in the run log.

use crate::{
    arena::HeadlessArena,
    choreography::Choreography,
    drone::{Controls, Drone},
    error::{ChoreoError, ChoreoResult},
    event::{ChoreoEvent, EventLogEntry},
    host::GameInterface,
    packet::GamePacket,
    store::ChoreoStore,
    types::{RunId, Tick},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerStatus {
    Running,
    Finished,
}

pub struct ChoreoRunner {
    pub run_id:   RunId,
    choreography: Box<dyn Choreography>,
    drones:       Vec<Drone>,
    step_index:   usize,
    step_start:   Option<f32>,
    current_tick: Tick,
    status:       RunnerStatus,
    store:        ChoreoStore,
}

impl ChoreoRunner {
    /// Build a runner with the roster size the choreography asks for.
    pub fn new(
        run_id: RunId,
        choreography: Box<dyn Choreography>,
        store: ChoreoStore,
    ) -> ChoreoResult<Self> {
        let num_drones = choreography.num_bots();
        Self::with_roster(run_id, choreography, num_drones, store)
    }

    /// Build a runner with an explicit roster size. A size the choreography
    /// was not written for is allowed but logged.
    pub fn with_roster(
        run_id: RunId,
        mut choreography: Box<dyn Choreography>,
        num_drones: usize,
        store: ChoreoStore,
    ) -> ChoreoResult<Self> {
        store.insert_run(
            &run_id,
            choreography.name(),
            num_drones,
            env!("CARGO_PKG_VERSION"),
        )?;
        choreography.generate_sequence();

        let runner = Self {
            drones: (0..num_drones).map(Drone::new).collect(),
            step_index: 0,
            step_start: None,
            current_tick: 0,
            status: RunnerStatus::Running,
            choreography,
            store,
            run_id,
        };

        if let Err(e) = runner.check_roster() {
            log::warn!("{e}");
        }

        runner.record("engine", ChoreoEvent::RunInitialized {
            run_id:       runner.run_id.clone(),
            choreography: runner.choreography.name().to_string(),
            num_bots:     num_drones,
        })?;
        runner.record_sequence()?;
        Ok(runner)
    }

    pub fn check_roster(&self) -> ChoreoResult<()> {
        let expected = self.choreography.num_bots();
        if self.drones.len() != expected {
            return Err(ChoreoError::RosterMismatch { expected, actual: self.drones.len() });
        }
        Ok(())
    }

    /// Regenerate the sequence and rewind to its first step.
    pub fn reset(&mut self) -> ChoreoResult<()> {
        self.choreography.generate_sequence();
        self.step_index = 0;
        self.step_start = None;
        self.status = RunnerStatus::Running;
        for drone in &mut self.drones {
            drone.controls = Controls::neutral();
        }
        self.record_sequence()
    }

    /// Evaluate the active step against this tick's packet.
    pub fn tick(
        &mut self,
        packet: &GamePacket,
        host: &mut dyn GameInterface,
    ) -> ChoreoResult<RunnerStatus> {
        self.current_tick += 1;

        for drone in &mut self.drones {
            if let Some(car) = packet.cars.get(drone.index) {
                drone.update(car);
            }
        }

        if self.status == RunnerStatus::Finished {
            return Ok(self.status);
        }
        if self.step_index >= self.choreography.sequence().len() {
            self.finish(packet)?;
            return Ok(self.status);
        }

        let start_time = match self.step_start {
            Some(t) => t,
            None => {
                let t = packet.seconds_elapsed;
                self.step_start = Some(t);
                let step = self.choreography.sequence()[self.step_index].name();
                log::debug!("tick={} step {} '{step}' started at {t:.3}s", self.current_tick, self.step_index);
                self.record(step, ChoreoEvent::StepStarted {
                    tick:       self.current_tick,
                    step_index: self.step_index,
                    step:       step.to_string(),
                    start_time: t,
                })?;
                t
            }
        };

        let step = &mut self.choreography.sequence_mut()[self.step_index];
        let name = step.name();
        let result = step.perform(packet, &self.drones, start_time);

        if let Some(state) = result.game_state {
            if let Err(e) = host.set_game_state(&state) {
                log::warn!("tick={} step '{name}': host override failed: {e}", self.current_tick);
            }
            log::debug!(
                "tick={} step '{name}' overrode {} cars, ball={}",
                self.current_tick,
                state.cars.len(),
                state.ball.is_some()
            );
            self.record(name, ChoreoEvent::GameStateOverridden {
                tick: self.current_tick,
                step: name.to_string(),
                cars: state.cars.len(),
                ball: state.ball.is_some(),
            })?;
        }

        if let Some(controls) = result.controls {
            for (drone, ctrl) in self.drones.iter_mut().zip(controls) {
                drone.controls = ctrl;
            }
        }

        if result.finished {
            let elapsed = packet.seconds_elapsed - start_time;
            log::debug!("tick={} step '{name}' finished after {elapsed:.3}s", self.current_tick);
            self.record(name, ChoreoEvent::StepFinished {
                tick:       self.current_tick,
                step_index: self.step_index,
                step:       name.to_string(),
                elapsed,
            })?;
            self.step_index += 1;
            self.step_start = None;
            if self.step_index >= self.choreography.sequence().len() {
                self.finish(packet)?;
            }
        }

        Ok(self.status)
    }

    /// Drive against a headless arena until the sequence finishes or
    /// `max_ticks` packets have been consumed. Returns the ticks used.
    pub fn drive(&mut self, arena: &mut HeadlessArena, max_ticks: Tick) -> ChoreoResult<Tick> {
        let mut used = 0;
        while used < max_ticks {
            let packet = arena.packet();
            used += 1;
            if self.tick(&packet, arena)? == RunnerStatus::Finished {
                break;
            }
            arena.advance();
        }
        Ok(used)
    }

    fn finish(&mut self, packet: &GamePacket) -> ChoreoResult<()> {
        self.status = RunnerStatus::Finished;
        log::info!(
            "choreography '{}' finished at tick {} ({:.2}s)",
            self.choreography.name(),
            self.current_tick,
            packet.seconds_elapsed
        );
        self.record("engine", ChoreoEvent::SequenceFinished {
            tick:            self.current_tick,
            seconds_elapsed: packet.seconds_elapsed,
        })
    }

    fn record_sequence(&self) -> ChoreoResult<()> {
        let steps = self.choreography.step_names().into_iter().map(String::from).collect();
        self.record("engine", ChoreoEvent::SequenceGenerated { tick: self.current_tick, steps })
    }

    fn record(&self, step: &str, event: ChoreoEvent) -> ChoreoResult<()> {
        let entry = EventLogEntry {
            id:         None,
            run_id:     self.run_id.clone(),
            tick:       self.current_tick,
            step:       step.to_string(),
            event_type: event.type_name().to_string(),
            payload:    serde_json::to_string(&event)?,
        };
        self.store.append_event(&entry)
    }

    // ── Accessors ──────────────────────────────────────────────

    pub fn drones(&self) -> &[Drone] {
        &self.drones
    }

    pub fn status(&self) -> RunnerStatus {
        self.status
    }

    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Name of the step that will run on the next tick, if any.
    pub fn active_step(&self) -> Option<&'static str> {
        self.choreography.sequence().get(self.step_index).map(|s| s.name())
    }

    pub fn choreography(&self) -> &dyn Choreography {
        self.choreography.as_ref()
    }

    pub fn store(&self) -> &ChoreoStore {
        &self.store
    }
}
