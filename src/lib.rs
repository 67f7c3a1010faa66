//! Carnival Wheel - a fair prize-wheel spin engine
//!
//! Core modules:
//! - `sim`: Spin physics state machine and segment resolution
//! - `rng`: Random source abstraction (OS crypto, seeded, scripted)
//! - `config`: Immutable physics and wheel configuration
//! - `history`: Capped record of past outcomes
//!
//! The crate owns rotation state and outcome resolution only. Rendering,
//! particles, audio and DOM wiring are external collaborators that drive
//! [`sim::SpinEngine::update`] once per frame and read the results.

pub mod config;
pub mod history;
pub mod rng;
pub mod sim;

pub use config::{SegmentConfig, SpinMode, SpinPhysics, WheelConfig};
pub use history::SpinHistory;
pub use rng::{OsRandom, RandomSource, ScriptedRandom, SeededRandom};
pub use sim::{SegmentHit, SegmentMap, SpinEngine};

use glam::Vec2;

/// Shared wheel conventions
pub mod consts {
    /// Pointer at 12 o'clock. Angle 0 is at 3 o'clock, increasing
    /// counter-clockwise, so the top of the wheel sits at -π/2.
    pub const POINTER_TOP: f32 = -std::f32::consts::FRAC_PI_2;

    /// Frame rate the default physics constants are tuned for. The engine
    /// itself is frame-unit based; this only matters to drivers pacing
    /// their loop in wall time.
    pub const TICKS_PER_SECOND: u32 = 60;
}

/// Normalize an angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let wrapped = angle % TAU;
    if wrapped < 0.0 { wrapped + TAU } else { wrapped }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
