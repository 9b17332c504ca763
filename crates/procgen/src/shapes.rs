//! Parametric primitives: cone, cylinder and cube.
//!
//! Each generator emits unit geometry in a canonical local frame, then bakes
//! `pre_transform` into it. Positions go through the full homogeneous
//! transform (with the `w` divide); normals go through the normal matrix of
//! `pre_transform` and are renormalized.
//!
//! Local frames:
//! - cone: base circle of radius 1 in the `x = 0` plane, apex at `(1, 0, 0)`
//! - cylinder: circles of radius 1 at `x = 0` and `x = 1`
//! - cube: edge length 1, centred at the origin
//!
//! All triangles are counter-clockwise when seen from outside.

use crate::mesh::{Material, SimpleMeshData};
use engine_core::{Mat33, Mat44, Vec3};
use std::f32::consts::TAU;

/// Collects untransformed vertices, then bakes the pre-transform on finish.
struct ShapeWriter {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    normal_matrix: Mat33,
}

impl ShapeWriter {
    fn new(pre_transform: &Mat44, capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            normals: Vec::with_capacity(capacity),
            normal_matrix: Mat33::normal_matrix(pre_transform),
        }
    }

    fn push(&mut self, position: Vec3, normal: Vec3) {
        self.positions.push(position);
        self.normals.push((self.normal_matrix * normal).normalize());
    }

    fn triangle(&mut self, corners: [(Vec3, Vec3); 3]) {
        for (p, n) in corners {
            self.push(p, n);
        }
    }

    fn finish(mut self, pre_transform: &Mat44, material: Material) -> SimpleMeshData {
        for p in &mut self.positions {
            *p = pre_transform.transform_point(*p);
        }
        SimpleMeshData::single_material(self.positions, self.normals, material)
    }
}

/// Unit circle samples `(0, cos, sin)` at `2π·k/subdivs`, with index
/// `subdivs` wrapping back to exactly angle 0.
fn ring(subdivs: usize) -> Vec<Vec3> {
    (0..=subdivs)
        .map(|k| {
            let angle = TAU * (k % subdivs) as f32 / subdivs as f32;
            let (s, c) = angle.sin_cos();
            Vec3::new(0.0, c, s)
        })
        .collect()
}

/// Cone with its base at `x = 0` and apex at `x = 1`.
///
/// `subdivs` is the number of angular segments; zero yields an empty mesh.
/// When `capped`, the base disk is closed with a fan facing `-x`.
pub fn make_cone(capped: bool, subdivs: usize, material: Material, pre_transform: Mat44) -> SimpleMeshData {
    let per_segment = if capped { 6 } else { 3 };
    let mut w = ShapeWriter::new(&pre_transform, subdivs * per_segment);
    if subdivs == 0 {
        return w.finish(&pre_transform, material);
    }

    let apex = Vec3::X;
    let samples = ring(subdivs);

    for seg in samples.windows(2) {
        let (prev, cur) = (seg[0], seg[1]);

        w.triangle([(prev, prev), (cur, cur), (apex, Vec3::X)]);

        if capped {
            w.triangle([(cur, -Vec3::X), (prev, -Vec3::X), (Vec3::ZERO, -Vec3::X)]);
        }
    }

    log::debug!("cone: {} segments, capped={}, {} vertices", subdivs, capped, w.positions.len());
    w.finish(&pre_transform, material)
}

/// Cylinder of radius 1 spanning `x = 0..1`.
///
/// Two side triangles per segment. When `capped`, the `x = 1` end is closed
/// with a fan facing `+x` and the `x = 0` end with a fan facing `-x`.
pub fn make_cylinder(capped: bool, subdivs: usize, material: Material, pre_transform: Mat44) -> SimpleMeshData {
    let per_segment = if capped { 12 } else { 6 };
    let mut w = ShapeWriter::new(&pre_transform, subdivs * per_segment);
    if subdivs == 0 {
        return w.finish(&pre_transform, material);
    }

    let samples = ring(subdivs);

    for seg in samples.windows(2) {
        let (n0, n1) = (seg[0], seg[1]);
        let (near0, near1) = (n0, n1);
        let (far0, far1) = (n0 + Vec3::X, n1 + Vec3::X);

        w.triangle([(near0, n0), (near1, n1), (far0, n0)]);
        w.triangle([(near1, n1), (far1, n1), (far0, n0)]);

        if capped {
            w.triangle([(Vec3::X, Vec3::X), (far0, Vec3::X), (far1, Vec3::X)]);
            w.triangle([(Vec3::ZERO, -Vec3::X), (near1, -Vec3::X), (near0, -Vec3::X)]);
        }
    }

    log::debug!("cylinder: {} segments, capped={}, {} vertices", subdivs, capped, w.positions.len());
    w.finish(&pre_transform, material)
}

const CUBE_CORNERS: [Vec3; 8] = [
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new(0.5, -0.5, -0.5),
    Vec3::new(0.5, 0.5, -0.5),
    Vec3::new(-0.5, 0.5, -0.5),
    Vec3::new(-0.5, -0.5, 0.5),
    Vec3::new(0.5, -0.5, 0.5),
    Vec3::new(0.5, 0.5, 0.5),
    Vec3::new(-0.5, 0.5, 0.5),
];

/// Face normal and two triangles (corner indices) per face.
const CUBE_FACES: [(Vec3, [usize; 6]); 6] = [
    (Vec3::new(0.0, 0.0, -1.0), [0, 3, 2, 2, 1, 0]),
    (Vec3::new(0.0, 0.0, 1.0), [5, 6, 7, 7, 4, 5]),
    (Vec3::new(0.0, -1.0, 0.0), [0, 1, 5, 5, 4, 0]),
    (Vec3::new(0.0, 1.0, 0.0), [3, 7, 6, 6, 2, 3]),
    (Vec3::new(-1.0, 0.0, 0.0), [4, 7, 3, 3, 0, 4]),
    (Vec3::new(1.0, 0.0, 0.0), [1, 2, 6, 6, 5, 1]),
];

/// Axis-aligned unit cube centred at the origin, flat-shaded.
pub fn make_cube(material: Material, pre_transform: Mat44) -> SimpleMeshData {
    let mut w = ShapeWriter::new(&pre_transform, 36);
    for (normal, indices) in CUBE_FACES {
        for i in indices {
            w.push(CUBE_CORNERS[i], normal);
        }
    }
    w.finish(&pre_transform, material)
}
