//! Choreography tuning, loaded from `data/crossing_squares.json`.
//!
//! Every section falls back to its default, so a partial file only
//! overrides what it names. Tests use `ChoreoConfig::default()`.

use crate::types::Vec3;
use serde::{Deserialize, Serialize};

// ── Formation ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquaresConfig {
    pub spacing:  f32,
    pub y_offset: f32,
    pub height:   f32,
}

impl SquaresConfig {
    /// Horizontal offset of a square's first column: 1.5 cells.
    pub fn x_offset(&self) -> f32 {
        3.0 * self.spacing / 2.0
    }
}

impl Default for SquaresConfig {
    fn default() -> Self {
        Self { spacing: 250.0, y_offset: 2550.0, height: 20.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineUpConfig {
    pub start_x:     f32,
    pub y_increment: f32,
    pub start_z:     f32,
}

impl Default for LineUpConfig {
    fn default() -> Self {
        Self { start_x: -2000.0, y_increment: 100.0, start_z: 40.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HideBallConfig {
    pub location: Vec3,
}

impl Default for HideBallConfig {
    fn default() -> Self {
        Self { location: Vec3::new(0.0, 0.0, 3000.0) }
    }
}

// ── Motion ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GovernorConfig {
    /// Horizontal speed (uu/s) above which throttle is cut.
    pub speed_cap: f32,
    pub throttle:  f32,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self { speed_cap: 650.0, throttle: 0.7 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayedStartConfig {
    /// Seconds between consecutive rows starting to drive.
    pub row_delay: f32,
    pub duration:  f32,
}

impl Default for DelayedStartConfig {
    fn default() -> Self {
        Self { row_delay: 0.9, duration: 3.6 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterweaveConfig {
    pub start:  f32,
    /// Jump pulse width.
    pub hold:   f32,
    /// Slot length; even drones own even slots, odd drones odd slots.
    pub buffer: f32,
    /// Number of jump slots (0..slots).
    pub slots:     u32,
    /// Step ends once elapsed passes `start + end_slots * buffer`.
    pub end_slots: u32,
}

impl Default for InterweaveConfig {
    fn default() -> Self {
        Self { start: 0.0, hold: 0.05, buffer: 0.65, slots: 7, end_slots: 8 }
    }
}

// ── Root ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoreoConfig {
    pub squares:       SquaresConfig,
    pub line_up:       LineUpConfig,
    pub hide_ball:     HideBallConfig,
    pub governor:      GovernorConfig,
    pub delayed_start: DelayedStartConfig,
    pub interweave:    InterweaveConfig,
    /// Length of the closing neutral pause.
    pub pause_time:       f32,
    /// Packet rate of the headless arena.
    pub ticks_per_second: u32,
}

impl Default for ChoreoConfig {
    fn default() -> Self {
        Self {
            squares:          SquaresConfig::default(),
            line_up:          LineUpConfig::default(),
            hide_ball:        HideBallConfig::default(),
            governor:         GovernorConfig::default(),
            delayed_start:    DelayedStartConfig::default(),
            interweave:       InterweaveConfig::default(),
            pause_time:       1.0,
            ticks_per_second: 120,
        }
    }
}

impl ChoreoConfig {
    /// Load from a JSON file and validate it.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config = Self::from_json(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate().map_err(|e| anyhow::anyhow!("Invalid config {path}: {e}"))?;
        Ok(config)
    }

    /// Reject values the runner cannot start with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.ticks_per_second == 0 {
            anyhow::bail!("ticks_per_second must be > 0");
        }
        Ok(())
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }
}
