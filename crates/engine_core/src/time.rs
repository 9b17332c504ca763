//! Frame clock for the scene loop.
//!
//! Frames are stepped by a known duration ([`Time::advance`]); simulation
//! updates are drained from the accumulated time at a fixed rate.

use std::time::Duration;

/// Frame timing: delta, elapsed time, frame count and a fixed-step accumulator.
#[derive(Debug)]
pub struct Time {
    /// Duration of the last frame.
    delta: Duration,
    /// Total simulated time.
    elapsed: Duration,
    /// Frames advanced so far.
    frame_count: u64,
    /// Fixed timestep for simulation updates (default 60 Hz).
    fixed_timestep: Duration,
    /// Accumulated time not yet consumed by fixed updates.
    accumulator: Duration,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    pub fn new() -> Self {
        Self {
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            fixed_timestep: Duration::from_secs_f64(1.0 / 60.0),
            accumulator: Duration::ZERO,
        }
    }

    /// Start a new frame that lasted exactly `delta`.
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
        self.accumulator += delta;
    }

    /// Delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn fixed_timestep_seconds(&self) -> f32 {
        self.fixed_timestep.as_secs_f32()
    }

    /// Set the step consumed by each fixed update. Zero is ignored.
    pub fn set_fixed_timestep(&mut self, step: Duration) {
        if !step.is_zero() {
            self.fixed_timestep = step;
        }
    }

    /// Check if a fixed update should run and consume the time.
    pub fn should_fixed_update(&mut self) -> bool {
        if self.accumulator >= self.fixed_timestep {
            self.accumulator -= self.fixed_timestep;
            true
        } else {
            false
        }
    }
}
