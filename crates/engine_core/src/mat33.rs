//! 3x3 linear transform matrix, row-major. Used for normals.

use crate::mat44::Mat44;
use crate::vec::Vec3;
use bytemuck::{Pod, Zeroable};
use std::ops::{Index, IndexMut, Mul};

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Mat33 {
    pub v: [f32; 9],
}

impl Default for Mat33 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat33 {
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self { v: [
        1.0, 0.0, 0.0,
        0.0, 1.0, 0.0,
        0.0, 0.0, 1.0,
    ] };

    pub const ZERO: Self = Self { v: [0.0; 9] };

    pub fn transpose(&self) -> Self {
        let mut out = Self::ZERO;
        for i in 0..3 {
            for j in 0..3 {
                out.v[j * 3 + i] = self.v[i * 3 + j];
            }
        }
        out
    }

    pub fn determinant(&self) -> f32 {
        let m = &self.v;
        m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
            + m[2] * (m[3] * m[7] - m[4] * m[6])
    }

    /// Inverse via the adjugate. Singular input gives non-finite entries.
    pub fn invert(&self) -> Self {
        let m = &self.v;
        let inv_det = 1.0 / self.determinant();
        #[rustfmt::skip]
        let v = [
            (m[4] * m[8] - m[5] * m[7]) * inv_det,
            (m[2] * m[7] - m[1] * m[8]) * inv_det,
            (m[1] * m[5] - m[2] * m[4]) * inv_det,
            (m[5] * m[6] - m[3] * m[8]) * inv_det,
            (m[0] * m[8] - m[2] * m[6]) * inv_det,
            (m[2] * m[3] - m[0] * m[5]) * inv_det,
            (m[3] * m[7] - m[4] * m[6]) * inv_det,
            (m[1] * m[6] - m[0] * m[7]) * inv_det,
            (m[0] * m[4] - m[1] * m[3]) * inv_det,
        ];
        Self { v }
    }

    /// Normal matrix of a model transform: `transpose(invert(upper3x3(m)))`.
    ///
    /// Normals multiplied by this stay perpendicular to transformed surfaces
    /// under non-uniform scaling and shear. Renormalize after multiplying.
    pub fn normal_matrix(model: &Mat44) -> Self {
        model.to_mat33().invert().transpose()
    }

    /// Padded to three vec4 columns, the std140 layout of a `mat3` uniform.
    pub fn to_cols_array_padded(&self) -> [[f32; 4]; 3] {
        let m = &self.v;
        [
            [m[0], m[3], m[6], 0.0],
            [m[1], m[4], m[7], 0.0],
            [m[2], m[5], m[8], 0.0],
        ]
    }

    pub fn abs_diff_eq(&self, other: &Self, tolerance: f32) -> bool {
        self.v
            .iter()
            .zip(other.v.iter())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl Index<(usize, usize)> for Mat33 {
    type Output = f32;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f32 {
        debug_assert!(i < 3 && j < 3);
        &self.v[i * 3 + j]
    }
}

impl IndexMut<(usize, usize)> for Mat33 {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f32 {
        debug_assert!(i < 3 && j < 3);
        &mut self.v[i * 3 + j]
    }
}

impl Mul for Mat33 {
    type Output = Mat33;

    fn mul(self, rhs: Mat33) -> Mat33 {
        let mut out = Mat33::ZERO;
        for row in 0..3 {
            for col in 0..3 {
                out.v[row * 3 + col] = (0..3)
                    .map(|k| self.v[row * 3 + k] * rhs.v[k * 3 + col])
                    .sum();
            }
        }
        out
    }
}

impl Mul<Vec3> for Mat33 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Vec3 {
        let m = &self.v;
        Vec3::new(
            m[0] * rhs.x + m[1] * rhs.y + m[2] * rhs.z,
            m[3] * rhs.x + m[4] * rhs.y + m[5] * rhs.z,
            m[6] * rhs.x + m[7] * rhs.y + m[8] * rhs.z,
        )
    }
}
