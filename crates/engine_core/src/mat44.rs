//! 4x4 homogeneous transform matrix, row-major.
//!
//! Element `(i, j)` lives at `v[i * 4 + j]`:
//!
//! ```text
//!   | 0,0  0,1  0,2  0,3 |
//!   | 1,0  1,1  1,2  1,3 |
//!   | 2,0  2,1  2,2  2,3 |
//!   | 3,0  3,1  3,2  3,3 |
//! ```
//!
//! The translation lives in column 3. Anything that hands a matrix to a
//! column-major consumer (GPU uniforms, glam) must transpose; use
//! [`Mat44::to_cols_array_2d`] or the `glam::Mat4` conversions.

use crate::mat33::Mat33;
use crate::vec::{Vec3, Vec4};
use bytemuck::{Pod, Zeroable};
use std::ops::{Index, IndexMut, Mul};

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Mat44 {
    pub v: [f32; 16],
}

impl Default for Mat44 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat44 {
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self { v: [
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ] };

    pub const ZERO: Self = Self { v: [0.0; 16] };

    /// Build from a row-major array.
    pub const fn from_row_major(v: [f32; 16]) -> Self {
        Self { v }
    }

    /// Build from four rows.
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        let mut v = [0.0; 16];
        for (i, row) in rows.iter().enumerate() {
            v[i * 4..i * 4 + 4].copy_from_slice(row);
        }
        Self { v }
    }

    /// Row `i` as a vector.
    pub fn row(&self, i: usize) -> Vec4 {
        Vec4::new(self[(i, 0)], self[(i, 1)], self[(i, 2)], self[(i, 3)])
    }

    /// Column `j` as a vector.
    pub fn col(&self, j: usize) -> Vec4 {
        Vec4::new(self[(0, j)], self[(1, j)], self[(2, j)], self[(3, j)])
    }

    pub fn transpose(&self) -> Self {
        let mut out = Self::ZERO;
        for i in 0..4 {
            for j in 0..4 {
                out.v[j * 4 + i] = self.v[i * 4 + j];
            }
        }
        out
    }

    /// General inverse by cofactor expansion.
    ///
    /// No determinant check: a singular matrix produces non-finite entries.
    pub fn invert(&self) -> Self {
        let m = &self.v;
        let mut inv = [0.0f32; 16];

        inv[0] = m[5] * m[10] * m[15] - m[5] * m[11] * m[14] - m[9] * m[6] * m[15]
            + m[9] * m[7] * m[14]
            + m[13] * m[6] * m[11]
            - m[13] * m[7] * m[10];
        inv[4] = -m[4] * m[10] * m[15] + m[4] * m[11] * m[14] + m[8] * m[6] * m[15]
            - m[8] * m[7] * m[14]
            - m[12] * m[6] * m[11]
            + m[12] * m[7] * m[10];
        inv[8] = m[4] * m[9] * m[15] - m[4] * m[11] * m[13] - m[8] * m[5] * m[15]
            + m[8] * m[7] * m[13]
            + m[12] * m[5] * m[11]
            - m[12] * m[7] * m[9];
        inv[12] = -m[4] * m[9] * m[14] + m[4] * m[10] * m[13] + m[8] * m[5] * m[14]
            - m[8] * m[6] * m[13]
            - m[12] * m[5] * m[10]
            + m[12] * m[6] * m[9];
        inv[1] = -m[1] * m[10] * m[15] + m[1] * m[11] * m[14] + m[9] * m[2] * m[15]
            - m[9] * m[3] * m[14]
            - m[13] * m[2] * m[11]
            + m[13] * m[3] * m[10];
        inv[5] = m[0] * m[10] * m[15] - m[0] * m[11] * m[14] - m[8] * m[2] * m[15]
            + m[8] * m[3] * m[14]
            + m[12] * m[2] * m[11]
            - m[12] * m[3] * m[10];
        inv[9] = -m[0] * m[9] * m[15] + m[0] * m[11] * m[13] + m[8] * m[1] * m[15]
            - m[8] * m[3] * m[13]
            - m[12] * m[1] * m[11]
            + m[12] * m[3] * m[9];
        inv[13] = m[0] * m[9] * m[14] - m[0] * m[10] * m[13] - m[8] * m[1] * m[14]
            + m[8] * m[2] * m[13]
            + m[12] * m[1] * m[10]
            - m[12] * m[2] * m[9];
        inv[2] = m[1] * m[6] * m[15] - m[1] * m[7] * m[14] - m[5] * m[2] * m[15]
            + m[5] * m[3] * m[14]
            + m[13] * m[2] * m[7]
            - m[13] * m[3] * m[6];
        inv[6] = -m[0] * m[6] * m[15] + m[0] * m[7] * m[14] + m[4] * m[2] * m[15]
            - m[4] * m[3] * m[14]
            - m[12] * m[2] * m[7]
            + m[12] * m[3] * m[6];
        inv[10] = m[0] * m[5] * m[15] - m[0] * m[7] * m[13] - m[4] * m[1] * m[15]
            + m[4] * m[3] * m[13]
            + m[12] * m[1] * m[7]
            - m[12] * m[3] * m[5];
        inv[14] = -m[0] * m[5] * m[14] + m[0] * m[6] * m[13] + m[4] * m[1] * m[14]
            - m[4] * m[2] * m[13]
            - m[12] * m[1] * m[6]
            + m[12] * m[2] * m[5];
        inv[3] = -m[1] * m[6] * m[11] + m[1] * m[7] * m[10] + m[5] * m[2] * m[11]
            - m[5] * m[3] * m[10]
            - m[9] * m[2] * m[7]
            + m[9] * m[3] * m[6];
        inv[7] = m[0] * m[6] * m[11] - m[0] * m[7] * m[10] - m[4] * m[2] * m[11]
            + m[4] * m[3] * m[10]
            + m[8] * m[2] * m[7]
            - m[8] * m[3] * m[6];
        inv[11] = -m[0] * m[5] * m[11] + m[0] * m[7] * m[9] + m[4] * m[1] * m[11]
            - m[4] * m[3] * m[9]
            - m[8] * m[1] * m[7]
            + m[8] * m[3] * m[5];
        inv[15] = m[0] * m[5] * m[10] - m[0] * m[6] * m[9] - m[4] * m[1] * m[10]
            + m[4] * m[2] * m[9]
            + m[8] * m[1] * m[6]
            - m[8] * m[2] * m[5];

        let det = m[0] * inv[0] + m[1] * inv[4] + m[2] * inv[8] + m[3] * inv[12];
        let inv_det = 1.0 / det;
        for e in inv.iter_mut() {
            *e *= inv_det;
        }
        Self { v: inv }
    }

    /// Upper-left 3x3 linear part; translation and projection row are dropped.
    pub fn to_mat33(&self) -> Mat33 {
        let m = &self.v;
        #[rustfmt::skip]
        let v = [
            m[0], m[1], m[2],
            m[4], m[5], m[6],
            m[8], m[9], m[10],
        ];
        Mat33 { v }
    }

    /// Transform `p` as a homogeneous point `(p, 1)` and divide by `w`.
    ///
    /// For affine matrices `w` stays 1 and the divide is a no-op.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let t = *self * p.extend(1.0);
        (t / t.w).xyz()
    }

    /// Transform `d` as a direction `(d, 0)`; translation is ignored.
    pub fn transform_vector(&self, d: Vec3) -> Vec3 {
        (*self * d.extend(0.0)).xyz()
    }

    /// Column-major nested arrays, the layout GPU uniform buffers expect.
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        let t = self.transpose();
        [
            [t.v[0], t.v[1], t.v[2], t.v[3]],
            [t.v[4], t.v[5], t.v[6], t.v[7]],
            [t.v[8], t.v[9], t.v[10], t.v[11]],
            [t.v[12], t.v[13], t.v[14], t.v[15]],
        ]
    }

    /// Component-wise comparison within `tolerance`.
    pub fn abs_diff_eq(&self, other: &Self, tolerance: f32) -> bool {
        self.v
            .iter()
            .zip(other.v.iter())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl Index<(usize, usize)> for Mat44 {
    type Output = f32;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f32 {
        debug_assert!(i < 4 && j < 4);
        &self.v[i * 4 + j]
    }
}

impl IndexMut<(usize, usize)> for Mat44 {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f32 {
        debug_assert!(i < 4 && j < 4);
        &mut self.v[i * 4 + j]
    }
}

impl Mul for Mat44 {
    type Output = Mat44;

    fn mul(self, rhs: Mat44) -> Mat44 {
        let mut out = Mat44::ZERO;
        for row in 0..4 {
            for col in 0..4 {
                out.v[row * 4 + col] = (0..4)
                    .map(|k| self.v[row * 4 + k] * rhs.v[k * 4 + col])
                    .sum();
            }
        }
        out
    }
}

impl Mul<Vec4> for Mat44 {
    type Output = Vec4;

    fn mul(self, rhs: Vec4) -> Vec4 {
        Vec4::new(
            self.row(0).dot(rhs),
            self.row(1).dot(rhs),
            self.row(2).dot(rhs),
            self.row(3).dot(rhs),
        )
    }
}

impl From<glam::Mat4> for Mat44 {
    fn from(m: glam::Mat4) -> Self {
        // glam stores columns; reading them as rows yields the transpose.
        Self { v: m.to_cols_array() }.transpose()
    }
}

impl From<Mat44> for glam::Mat4 {
    fn from(m: Mat44) -> Self {
        glam::Mat4::from_cols_array_2d(&m.to_cols_array_2d())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::*;

    const TOLERANCE: f32 = 1e-6;

    #[rustfmt::skip]
    fn counting() -> Mat44 {
        Mat44::from_row_major([
             1.0,  2.0,  3.0,  4.0,
             5.0,  6.0,  7.0,  8.0,
             9.0, 10.0, 11.0, 12.0,
            13.0, 14.0, 15.0, 16.0,
        ])
    }

    #[rustfmt::skip]
    fn small_a() -> Mat44 {
        Mat44::from_row_major([
            0.5, -1.0,  0.25, 2.0,
            1.5,  0.0, -0.5,  1.0,
            0.0,  0.75, 1.0, -1.0,
            0.25, 0.5,  0.0,  1.0,
        ])
    }

    #[rustfmt::skip]
    fn small_b() -> Mat44 {
        Mat44::from_row_major([
            1.0,  0.0, 0.5, -0.5,
            0.25, 1.0, 0.0,  0.75,
           -1.0,  0.5, 1.0,  0.0,
            0.0,  0.0, 0.5,  1.0,
        ])
    }

    #[test]
    fn known_product() {
        #[rustfmt::skip]
        let rhs = Mat44::from_row_major([
            17.0, 18.0, 19.0, 20.0,
            21.0, 22.0, 23.0, 24.0,
            25.0, 26.0, 27.0, 28.0,
            29.0, 30.0, 31.0, 32.0,
        ]);
        #[rustfmt::skip]
        let expected = Mat44::from_row_major([
             250.0,  260.0,  270.0,  280.0,
             618.0,  644.0,  670.0,  696.0,
             986.0, 1028.0, 1070.0, 1112.0,
            1354.0, 1412.0, 1470.0, 1528.0,
        ]);
        assert!((counting() * rhs).abs_diff_eq(&expected, TOLERANCE));
    }

    #[test]
    fn identity_laws() {
        let m = counting();
        assert!((m * Mat44::IDENTITY).abs_diff_eq(&m, TOLERANCE));
        assert!((Mat44::IDENTITY * m).abs_diff_eq(&m, TOLERANCE));
    }

    #[test]
    fn zero_laws() {
        let m = counting();
        assert!((m * Mat44::ZERO).abs_diff_eq(&Mat44::ZERO, TOLERANCE));
        assert!((Mat44::ZERO * m).abs_diff_eq(&Mat44::ZERO, TOLERANCE));
    }

    #[test]
    fn multiplication_is_associative() {
        let (a, b, c) = (small_a(), small_b(), make_rotation_y(0.3));
        assert!(((a * b) * c).abs_diff_eq(&(a * (b * c)), TOLERANCE));
    }

    #[test]
    fn multiplication_is_not_commutative() {
        let (a, b) = (small_a(), small_b());
        assert!(!(a * b).abs_diff_eq(&(b * a), TOLERANCE));
    }

    #[test]
    fn matrix_vector_treats_vector_as_column() {
        let v = Vec4::new(1.0, 0.0, -1.0, 2.0);
        let r = counting() * v;
        assert_eq!(r.to_array(), [6.0, 14.0, 22.0, 30.0]);
    }

    #[test]
    fn invert_recovers_identity() {
        let m = make_translation(Vec3::new(1.0, -2.0, 3.0))
            * make_rotation_x(0.4)
            * make_scaling(2.0, 0.5, 3.0)
            * make_shearing(0.3, 0.0, 0.0, 0.0, 0.1, 0.0);
        assert!((m.invert() * m).abs_diff_eq(&Mat44::IDENTITY, 1e-5));
        assert!((m * m.invert()).abs_diff_eq(&Mat44::IDENTITY, 1e-5));
    }

    #[test]
    fn invert_matches_glam() {
        let m = small_a();
        let ours = m.invert();
        let theirs = Mat44::from(glam::Mat4::from(m).inverse());
        assert!(ours.abs_diff_eq(&theirs, 1e-4));
    }

    #[test]
    fn glam_roundtrip_keeps_translation_column() {
        let t = make_translation(Vec3::new(1.0, 2.0, 3.0));
        let g: glam::Mat4 = t.into();
        assert_eq!(g.w_axis, glam::Vec4::new(1.0, 2.0, 3.0, 1.0));
        assert!(Mat44::from(g).abs_diff_eq(&t, 0.0));
    }

    #[test]
    fn to_mat33_drops_translation() {
        let m = make_translation(Vec3::new(5.0, 6.0, 7.0)) * make_scaling(2.0, 3.0, 4.0);
        let n = m.to_mat33();
        assert_eq!(n.v, [2.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 4.0]);
    }

    #[test]
    fn transform_point_divides_by_w() {
        let mut m = Mat44::IDENTITY;
        m[(3, 3)] = 2.0;
        let p = m.transform_point(Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(p.to_array(), [1.0, 2.0, 3.0]);
    }
}
