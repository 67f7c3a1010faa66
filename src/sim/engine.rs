//! Spin physics state machine
//!
//! The engine owns rotation state and advances it one tick at a time under
//! an external driver (the host's per-frame callback). A spin is planned
//! entirely up front: the resting angle is drawn from the injected random
//! source, the total forward distance to reach it is fixed, and the
//! physics then plays the plan out until both the distance and the
//! velocity stop conditions hold. Settling snaps to the precomputed
//! target, so integration drift never moves the outcome.

use std::f32::consts::TAU;

use crate::config::{ConfigError, SpinMode, SpinPhysics};
use crate::normalize_angle;
use crate::rng::RandomSource;

/// Completion callback, invoked once with the final angle in degrees,
/// normalized to [0°, 360°).
pub type SpinCallback = Box<dyn FnOnce(f32)>;

/// Wheel rotation state machine. At most one spin is in flight; a second
/// `start_spin` while spinning is rejected, never queued.
pub struct SpinEngine<R: RandomSource> {
    physics: SpinPhysics,
    rng: R,

    /// Unbounded accumulator (radians); wrapped only when read for
    /// resolution or reported
    current_angle: f32,
    /// Radians per tick, non-negative (the wheel spins one direction)
    angular_velocity: f32,
    spinning: bool,

    rotation_accumulated: f32,
    total_rotation_needed: f32,
    /// Exact absolute angle the spin snaps to on completion
    target_angle_absolute: f32,

    peak_velocity: f32,
    accelerating: bool,
    ticks_elapsed: u32,

    on_complete: Option<SpinCallback>,
}

impl<R: RandomSource> SpinEngine<R> {
    /// Build an idle engine at angle zero. The config is validated here so
    /// a constructed engine can never observe an invalid tuning.
    pub fn new(physics: SpinPhysics, rng: R) -> Result<Self, ConfigError> {
        physics.validate()?;
        Ok(Self {
            physics,
            rng,
            current_angle: 0.0,
            angular_velocity: 0.0,
            spinning: false,
            rotation_accumulated: 0.0,
            total_rotation_needed: 0.0,
            target_angle_absolute: 0.0,
            peak_velocity: 0.0,
            accelerating: false,
            ticks_elapsed: 0,
            on_complete: None,
        })
    }

    /// Current rotation in radians (unbounded accumulator).
    pub fn current_angle(&self) -> f32 {
        self.current_angle
    }

    /// Current velocity in radians per tick. Cosmetic consumers (camera
    /// shake, LED chase speed) read this freely.
    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    /// Start a spin toward a freshly drawn random resting angle.
    ///
    /// Returns `false` without touching any state while a spin is already
    /// in flight - single-flight semantics, the caller re-issues if it
    /// wants another spin. Otherwise plans the spin and returns `true`;
    /// `on_complete`, if given, fires exactly once when the wheel settles.
    pub fn start_spin(&mut self, on_complete: Option<SpinCallback>) -> bool {
        if self.spinning {
            return false;
        }

        let final_angle_deg = self.rng.next_float() * 360.0;
        let final_angle_rad = final_angle_deg.to_radians();
        let initial_velocity = self.rng.next_range(
            self.physics.initial_velocity_min,
            self.physics.initial_velocity_max,
        );

        // Forward delta in (0, 2π] from the normalized current angle - the
        // wheel always travels forward to reach the target.
        let current_normalized = normalize_angle(self.current_angle);
        let mut delta_to_target = final_angle_rad - current_normalized;
        while delta_to_target <= 0.0 {
            delta_to_target += TAU;
        }

        let extra_turns = self
            .rng
            .next_turns(self.physics.min_turns, self.physics.max_turns);
        self.total_rotation_needed = delta_to_target + extra_turns as f32 * TAU;
        self.target_angle_absolute = self.current_angle + self.total_rotation_needed;

        self.rotation_accumulated = 0.0;
        self.angular_velocity = initial_velocity;
        match self.physics.mode {
            SpinMode::FrictionOnly => {
                self.peak_velocity = initial_velocity;
                self.accelerating = false;
            }
            SpinMode::AccelerateThenDecay => {
                self.peak_velocity = self.rng.next_range(
                    self.physics.peak_velocity_min,
                    self.physics.peak_velocity_max,
                );
                self.accelerating = true;
            }
        }
        self.ticks_elapsed = 0;
        self.spinning = true;
        self.on_complete = on_complete;

        log::debug!(
            "spin started: target {:.2}°, {} extra turns, v0 {:.2} rad/tick",
            final_angle_deg,
            extra_turns,
            initial_velocity
        );
        true
    }

    /// Advance one tick and return the current angle.
    ///
    /// A cheap idempotent read when idle. While spinning: one physics step
    /// (ramp toward the peak, or friction decay), integration, then the
    /// stop check. The spin ends only when the planned distance is spent
    /// AND velocity has decayed under the floor - a wheel that covers the
    /// distance early keeps turning until it is also slow, which is what
    /// prevents a visible stop-pop.
    pub fn update(&mut self) -> f32 {
        if !self.spinning {
            return self.current_angle;
        }

        if self.accelerating && self.angular_velocity < self.peak_velocity {
            self.angular_velocity += self.physics.acceleration_rate;
            if self.angular_velocity >= self.peak_velocity {
                self.accelerating = false;
            }
        } else {
            self.angular_velocity *= self.physics.friction;
        }

        self.current_angle += self.angular_velocity;
        self.rotation_accumulated += self.angular_velocity;
        self.ticks_elapsed += 1;

        let remaining = self.total_rotation_needed - self.rotation_accumulated;
        let distance_spent = remaining <= self.physics.distance_floor;
        let velocity_low = self.angular_velocity.abs() < self.physics.velocity_floor;

        if distance_spent && velocity_low {
            self.settle();
        } else if self.ticks_elapsed >= self.physics.max_ticks {
            // The dual condition cannot fire when the tuning makes the
            // velocity floor unreachable; the ceiling guarantees the spin
            // still terminates through the normal completion path.
            log::warn!(
                "spin forced to settle at the {}-tick ceiling (velocity {:.4}, remaining {:.4})",
                self.physics.max_ticks,
                self.angular_velocity,
                remaining
            );
            self.settle();
        }

        self.current_angle
    }

    /// Abort an in-flight spin in place: the wheel keeps its current
    /// angle and the pending callback is dropped without firing. Returns
    /// whether there was a spin to cancel.
    pub fn cancel_spin(&mut self) -> bool {
        if !self.spinning {
            return false;
        }
        self.spinning = false;
        self.angular_velocity = 0.0;
        self.on_complete = None;
        log::debug!("spin cancelled at {:.3} rad", self.current_angle);
        true
    }

    fn settle(&mut self) {
        // Snap to the precomputed target; integration error never reaches
        // the reported outcome.
        self.current_angle = self.target_angle_absolute;
        self.angular_velocity = 0.0;
        self.spinning = false;
        self.rotation_accumulated = self.total_rotation_needed;

        let mut final_angle_deg = normalize_angle(self.current_angle).to_degrees();
        // An angle a half-ulp under 2π can round to exactly 360 in degree
        // space; the reported value must stay inside [0°, 360°).
        if final_angle_deg >= 360.0 {
            final_angle_deg -= 360.0;
        }
        log::debug!(
            "spin settled at {:.2}° after {} ticks",
            final_angle_deg,
            self.ticks_elapsed
        );
        if let Some(callback) = self.on_complete.take() {
            callback(final_angle_deg);
        }
    }
}
