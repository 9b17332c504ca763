//! Core math and timing for landingsite.
//!
//! This crate provides the foundational types used across all scene systems:
//! - Vec2/Vec3/Vec4 and row-major Mat33/Mat44 algebra
//! - Transform builders (rotation, translation, scale, shear, projection, look-at)
//! - Frame timing

pub mod mat33;
pub mod mat44;
pub mod time;
pub mod transform;
pub mod vec;

pub use mat33::*;
pub use mat44::*;
pub use time::*;
pub use transform::*;
pub use vec::*;
