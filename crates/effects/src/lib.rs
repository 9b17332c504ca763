//! Particle effects: a fixed-pool emitter with depth ordering, and the
//! camera basis used to turn each particle into a facing quad.

pub mod billboard;
pub mod particle;

pub use billboard::*;
pub use particle::*;
