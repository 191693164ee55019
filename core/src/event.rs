//! Runner events, persisted to the run log.
//!
//! Variants are appended only; the tag is the `event_type` column.

use crate::types::{RunId, Tick};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChoreoEvent {
    RunInitialized {
        run_id:       RunId,
        choreography: String,
        num_bots:     usize,
    },
    SequenceGenerated {
        tick:  Tick,
        steps: Vec<String>,
    },
    StepStarted {
        tick:       Tick,
        step_index: usize,
        step:       String,
        start_time: f32,
    },
    GameStateOverridden {
        tick:     Tick,
        step:     String,
        cars:     usize,
        ball:     bool,
    },
    StepFinished {
        tick:       Tick,
        step_index: usize,
        step:       String,
        elapsed:    f32,
    },
    SequenceFinished {
        tick:            Tick,
        seconds_elapsed: f32,
    },
}

impl ChoreoEvent {
    /// Stable name, matches the serde tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::RunInitialized { .. }      => "run_initialized",
            Self::SequenceGenerated { .. }   => "sequence_generated",
            Self::StepStarted { .. }         => "step_started",
            Self::GameStateOverridden { .. } => "game_state_overridden",
            Self::StepFinished { .. }        => "step_finished",
            Self::SequenceFinished { .. }    => "sequence_finished",
        }
    }
}

/// The event log entry as persisted to SQLite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id:         Option<i64>,
    pub run_id:     RunId,
    pub tick:       Tick,
    pub step:       String,
    pub event_type: String,
    pub payload:    String, // JSON-serialized ChoreoEvent
}

impl EventLogEntry {
    pub fn event(&self) -> serde_json::Result<ChoreoEvent> {
        serde_json::from_str(&self.payload)
    }
}
