//! Procedural geometry: parametric primitives, mesh merging and the lander model.

pub mod mesh;
pub mod shapes;
pub mod vehicle;

pub use mesh::*;
pub use shapes::*;
pub use vehicle::*;
