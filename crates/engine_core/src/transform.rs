//! Transform builders: rotations, translation, scaling, shear, projection and
//! view matrices. All right-handed, all producing row-major [`Mat44`].

use crate::mat44::Mat44;
use crate::vec::Vec3;

/// Rotation about +X by `angle` radians.
pub fn make_rotation_x(angle: f32) -> Mat44 {
    let (s, c) = angle.sin_cos();
    #[rustfmt::skip]
    let m = Mat44::from_row_major([
        1.0, 0.0, 0.0, 0.0,
        0.0,   c,  -s, 0.0,
        0.0,   s,   c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);
    m
}

/// Rotation about +Y by `angle` radians.
pub fn make_rotation_y(angle: f32) -> Mat44 {
    let (s, c) = angle.sin_cos();
    #[rustfmt::skip]
    let m = Mat44::from_row_major([
          c, 0.0,   s, 0.0,
        0.0, 1.0, 0.0, 0.0,
         -s, 0.0,   c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);
    m
}

/// Rotation about +Z by `angle` radians.
pub fn make_rotation_z(angle: f32) -> Mat44 {
    let (s, c) = angle.sin_cos();
    #[rustfmt::skip]
    let m = Mat44::from_row_major([
          c,  -s, 0.0, 0.0,
          s,   c, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);
    m
}

/// Identity with the translation column set to `t`.
pub fn make_translation(t: Vec3) -> Mat44 {
    #[rustfmt::skip]
    let m = Mat44::from_row_major([
        1.0, 0.0, 0.0, t.x,
        0.0, 1.0, 0.0, t.y,
        0.0, 0.0, 1.0, t.z,
        0.0, 0.0, 0.0, 1.0,
    ]);
    m
}

/// Non-uniform scale along the three axes.
pub fn make_scaling(sx: f32, sy: f32, sz: f32) -> Mat44 {
    #[rustfmt::skip]
    let m = Mat44::from_row_major([
         sx, 0.0, 0.0, 0.0,
        0.0,  sy, 0.0, 0.0,
        0.0, 0.0,  sz, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);
    m
}

/// Shear. `xy` is how much x moves per unit of y, and so on:
///
/// ```text
/// x' = x + xy*y + xz*z
/// y' = y + yx*x + yz*z
/// z' = z + zx*x + zy*y
/// ```
pub fn make_shearing(xy: f32, xz: f32, yx: f32, yz: f32, zx: f32, zy: f32) -> Mat44 {
    #[rustfmt::skip]
    let m = Mat44::from_row_major([
        1.0,  xy,  xz, 0.0,
         yx, 1.0,  yz, 0.0,
         zx,  zy, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);
    m
}

/// Symmetric-frustum perspective projection (OpenGL clip conventions).
///
/// `fov_y` is the full vertical field of view in radians, `aspect` is
/// width / height. Row 3 is `(0, 0, -1, 0)` so clip `w` is view-space `-z`.
pub fn make_perspective_projection(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat44 {
    let s = 1.0 / (fov_y / 2.0).tan();
    let sx = s / aspect;
    let a = -(far + near) / (far - near);
    let b = -2.0 * (far * near) / (far - near);
    #[rustfmt::skip]
    let m = Mat44::from_row_major([
         sx, 0.0,  0.0, 0.0,
        0.0,   s,  0.0, 0.0,
        0.0, 0.0,    a,   b,
        0.0, 0.0, -1.0, 0.0,
    ]);
    m
}

/// World-to-camera matrix for a camera at `eye` looking at `target`.
///
/// Rows 0..3 hold the camera right, up and backward axes, so this is the
/// inverse rotation times the inverse translation of the camera's world
/// transform. `up` need not be orthogonal to the view direction but must not
/// be parallel to it.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat44 {
    let forward = (target - eye).normalize();
    let right = forward.cross(up).normalize();
    let cam_up = right.cross(forward);

    #[rustfmt::skip]
    let m = Mat44::from_row_major([
         right.x,    right.y,    right.z,   -right.dot(eye),
         cam_up.x,   cam_up.y,   cam_up.z,  -cam_up.dot(eye),
        -forward.x, -forward.y, -forward.z,  forward.dot(eye),
         0.0,        0.0,        0.0,        1.0,
    ]);
    m
}

/// Cubic Hermite ease between `edge0` and `edge1`, clamped to `[0, 1]`.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
