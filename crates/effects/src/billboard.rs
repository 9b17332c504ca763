//! Camera-facing quads for particles.

use bytemuck::{Pod, Zeroable};
use engine_core::{Mat44, Vec3};

/// Camera right and up axes in world space.
#[derive(Debug, Clone, Copy)]
pub struct CameraBasis {
    pub right: Vec3,
    pub up: Vec3,
}

impl CameraBasis {
    /// Extract the basis from a row-major world-to-camera matrix.
    ///
    /// The rotation block of a view matrix holds the camera axes as its
    /// ROWS; reading columns gives the inverse rotation and tilts the
    /// quads whenever the camera is not axis-aligned.
    pub fn from_view(view: &Mat44) -> Self {
        Self {
            right: view.row(0).xyz().normalize(),
            up: view.row(1).xyz().normalize(),
        }
    }

    /// World-space corners of a `size`-wide quad centred on `center`:
    /// bottom-left, bottom-right, top-right, top-left.
    pub fn quad_corners(&self, center: Vec3, size: f32) -> [Vec3; 4] {
        CORNERS.map(|[x, y]| center + self.right * (x * size) + self.up * (y * size))
    }
}

const CORNERS: [[f32; 2]; 4] = [[-0.5, -0.5], [0.5, -0.5], [0.5, 0.5], [-0.5, 0.5]];

/// One vertex of the shared billboard quad, in the quad's own plane.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

/// The unit quad uploaded once and instanced per particle, as two
/// counter-clockwise triangles.
pub fn unit_quad() -> [QuadVertex; 6] {
    let v = |i: usize| {
        let [x, y] = CORNERS[i];
        QuadVertex {
            position: [x, y],
            uv: [x + 0.5, y + 0.5],
        }
    };
    [v(0), v(1), v(2), v(2), v(3), v(0)]
}
