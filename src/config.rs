//! Wheel and physics configuration
//!
//! Plain immutable structs handed to the engine and segment map at
//! construction. There is no module-level shared state; variants of the
//! wheel differ only in the config value they pass in. Everything is
//! validated once up front so the simulation never has to defend itself.

use serde::{Deserialize, Serialize};

use crate::consts::POINTER_TOP;

/// Physics policy for a spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpinMode {
    /// Velocity starts at its drawn value and decays every tick. The
    /// reference policy.
    #[default]
    FrictionOnly,
    /// Velocity ramps up by `acceleration_rate` per tick to a drawn peak,
    /// then decays. Visually a wind-up before the slowdown.
    AccelerateThenDecay,
}

/// Spin physics tuning. Velocities are radians per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinPhysics {
    pub mode: SpinMode,
    /// Per-tick velocity multiplier in (0, 1)
    pub friction: f32,
    /// Initial velocity drawn uniformly from [min, max)
    pub initial_velocity_min: f32,
    pub initial_velocity_max: f32,
    /// Peak velocity drawn uniformly from [min, max) (`AccelerateThenDecay` only)
    pub peak_velocity_min: f32,
    pub peak_velocity_max: f32,
    /// Velocity gained per tick while accelerating
    pub acceleration_rate: f32,
    /// Spin may stop once |velocity| drops below this
    pub velocity_floor: f32,
    /// ... and the remaining planned distance is at most this (radians)
    pub distance_floor: f32,
    /// Extra full turns drawn uniformly from [min, max); equal values pin
    /// the count
    pub min_turns: u32,
    pub max_turns: u32,
    /// Hard per-spin tick ceiling. The dual stop condition cannot
    /// terminate when the velocity floor is unreachable, so the ceiling
    /// forces completion.
    pub max_ticks: u32,
}

impl Default for SpinPhysics {
    fn default() -> Self {
        Self {
            mode: SpinMode::FrictionOnly,
            friction: 0.96,
            initial_velocity_min: 2.0,
            initial_velocity_max: 5.0,
            peak_velocity_min: 15.0,
            peak_velocity_max: 25.0,
            acceleration_rate: 0.1,
            velocity_floor: 0.01,
            distance_floor: 0.001,
            min_turns: 3,
            max_turns: 6,
            max_ticks: 10_000,
        }
    }
}

impl SpinPhysics {
    /// Check every tunable before the engine accepts the config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(ConfigError::Friction(self.friction));
        }
        if self.initial_velocity_min <= 0.0 || self.initial_velocity_max < self.initial_velocity_min
        {
            return Err(ConfigError::Range("initial velocity"));
        }
        if self.peak_velocity_min <= 0.0 || self.peak_velocity_max < self.peak_velocity_min {
            return Err(ConfigError::Range("peak velocity"));
        }
        if self.acceleration_rate <= 0.0 {
            return Err(ConfigError::Range("acceleration rate"));
        }
        if self.max_turns < self.min_turns {
            return Err(ConfigError::Range("extra turns"));
        }
        if self.velocity_floor <= 0.0 {
            return Err(ConfigError::Threshold("velocity floor"));
        }
        if self.distance_floor < 0.0 {
            return Err(ConfigError::Threshold("distance floor"));
        }
        if self.max_ticks == 0 {
            return Err(ConfigError::Threshold("tick ceiling"));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// One labeled wheel slice. Label and color travel together so their
/// counts cannot drift apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentConfig {
    pub label: String,
    /// 0xRRGGBB
    pub color: u32,
}

impl SegmentConfig {
    pub fn new(label: impl Into<String>, color: u32) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }
}

/// Wheel layout: the ordered segments plus the fixed pointer angle the
/// outcome is read against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelConfig {
    pub segments: Vec<SegmentConfig>,
    /// Radians; normalized into [0, 2π) when the segment map is built
    pub pointer_angle: f32,
}

impl Default for WheelConfig {
    fn default() -> Self {
        let colors = [
            0xFF6B6B, 0x4ECDC4, 0x45B7D1, 0xFFA07A, 0x98D8C8, 0xF7DC6F, 0xBB8FCE, 0x85C1E2,
        ];
        let segments = colors
            .iter()
            .enumerate()
            .map(|(i, &color)| SegmentConfig::new(format!("Prize {}", i + 1), color))
            .collect();
        Self {
            segments,
            pointer_angle: POINTER_TOP,
        }
    }
}

impl WheelConfig {
    pub fn new(segments: Vec<SegmentConfig>) -> Self {
        Self {
            segments,
            pointer_angle: POINTER_TOP,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.segments.is_empty() {
            return Err(ConfigError::NoSegments);
        }
        for (index, segment) in self.segments.iter().enumerate() {
            if segment.label.trim().is_empty() {
                return Err(ConfigError::EmptyLabel(index));
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A wheel needs at least one segment
    NoSegments,
    /// Segment label at this index is empty
    EmptyLabel(usize),
    /// Friction multiplier must be in (0, 1)
    Friction(f32),
    /// Named range is inverted or non-positive
    Range(&'static str),
    /// Named threshold must be positive
    Threshold(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoSegments => write!(f, "wheel has no segments"),
            ConfigError::EmptyLabel(index) => {
                write!(f, "segment {index} has an empty label")
            }
            ConfigError::Friction(value) => {
                write!(f, "friction must be in (0, 1), got {value}")
            }
            ConfigError::Range(name) => {
                write!(f, "{name} range is inverted or non-positive")
            }
            ConfigError::Threshold(name) => write!(f, "{name} must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}
