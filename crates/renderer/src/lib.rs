//! CPU side of rendering for landingsite: the fly camera, per-draw uniform
//! blocks and the interleaved vertex format. Everything here produces
//! `bytemuck::Pod` data ready to hand to a graphics API.

pub mod camera;
pub mod uniforms;
pub mod vertex;

pub use camera::*;
pub use uniforms::*;
pub use vertex::*;
