//! Scripted launch of the lander: a short vertical burn, a coast that
//! bleeds off climb rate, and a steady forward push that tips the nose
//! over along the direction of travel.

use engine_core::{make_rotation_x, make_translation, Mat44, Vec3};

/// Launch pad the lander starts on.
pub const LAUNCH_PAD: Vec3 = Vec3::new(3.0, 0.0, -5.0);

/// Constants of the launch profile.
#[derive(Debug, Clone)]
pub struct FlightProfile {
    /// Upward acceleration while the engine burns.
    pub thrust_accel: f32,
    /// Seconds of vertical burn.
    pub thrust_time: f32,
    /// Deceleration of the climb after the burn.
    pub gravity: f32,
    /// Forward (+Z) acceleration for the whole flight.
    pub forward_accel: f32,
}

impl Default for FlightProfile {
    fn default() -> Self {
        Self {
            thrust_accel: 2.0,
            thrust_time: 2.0,
            gravity: 2.5,
            forward_accel: 1.5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VehicleFlight {
    pub profile: FlightProfile,
    pub origin: Vec3,
    position: Vec3,
    velocity: Vec3,
    /// Seconds since launch, paused while not launched.
    time: f32,
    /// Pitch about +X toward the direction of travel.
    theta: f32,
    launched: bool,
}

impl Default for VehicleFlight {
    fn default() -> Self {
        Self::new(LAUNCH_PAD)
    }
}

impl VehicleFlight {
    pub fn new(origin: Vec3) -> Self {
        Self {
            profile: FlightProfile::default(),
            origin,
            position: origin,
            velocity: Vec3::ZERO,
            time: 0.0,
            theta: 0.0,
            launched: false,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn is_launched(&self) -> bool {
        self.launched
    }

    /// Start the flight, or pause it mid-air.
    pub fn toggle_launch(&mut self) {
        self.launched = !self.launched;
        log::info!("vehicle launch {}", if self.launched { "engaged" } else { "paused" });
    }

    /// Back on the pad, engine off.
    pub fn reset(&mut self) {
        self.launched = false;
        self.position = self.origin;
        self.velocity = Vec3::ZERO;
        self.time = 0.0;
        self.theta = 0.0;
    }

    /// Whether the engine is still in its vertical burn.
    pub fn is_burning(&self) -> bool {
        self.launched && self.time <= self.profile.thrust_time
    }

    /// Advance the flight by `dt` seconds. Does nothing until launched.
    pub fn update(&mut self, dt: f32) {
        if !self.launched {
            return;
        }
        let p = &self.profile;
        self.time += dt;

        let vy = if self.time <= p.thrust_time {
            p.thrust_accel * self.time
        } else {
            let coast = self.time - p.thrust_time;
            (p.thrust_accel * p.thrust_time - p.gravity * coast).max(0.0)
        };
        let vz = p.forward_accel * self.time;

        self.velocity = Vec3::new(0.0, vy, vz);
        self.position.y += vy * dt;
        self.position.z += vz * dt;
        self.theta = vz.atan2(vy);
    }

    /// `T(position) * Rx(theta)`.
    pub fn model_matrix(&self) -> Mat44 {
        make_translation(self.position) * make_rotation_x(self.theta)
    }
}
