//! Fixed-size float vectors used by every transform in the scene.
//!
//! These are plain value types: `Copy`, no equality, component-wise arithmetic
//! through `std::ops`. They are `#[repr(C)]` + `Pod` so slices of them can be
//! handed to a GPU upload step with `bytemuck::cast_slice`.

use bytemuck::{Pod, Zeroable};
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

/// Two-component vector (texture coordinates).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// Three-component vector (positions, directions, colors).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Four-component vector (homogeneous points, rgba colors).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

macro_rules! count {
    () => { 0usize };
    ($head:tt $($tail:tt)*) => { 1usize + count!($($tail)*) };
}

/// Component-wise operators shared by all three vector types.
macro_rules! impl_vec_ops {
    ($ty:ident { $($f:ident),+ }) => {
        impl Add for $ty {
            type Output = $ty;
            fn add(self, rhs: $ty) -> $ty {
                $ty { $($f: self.$f + rhs.$f),+ }
            }
        }

        impl Sub for $ty {
            type Output = $ty;
            fn sub(self, rhs: $ty) -> $ty {
                $ty { $($f: self.$f - rhs.$f),+ }
            }
        }

        impl Neg for $ty {
            type Output = $ty;
            fn neg(self) -> $ty {
                $ty { $($f: -self.$f),+ }
            }
        }

        impl Mul<f32> for $ty {
            type Output = $ty;
            fn mul(self, rhs: f32) -> $ty {
                $ty { $($f: self.$f * rhs),+ }
            }
        }

        impl Mul<$ty> for f32 {
            type Output = $ty;
            fn mul(self, rhs: $ty) -> $ty {
                rhs * self
            }
        }

        impl Div<f32> for $ty {
            type Output = $ty;
            fn div(self, rhs: f32) -> $ty {
                $ty { $($f: self.$f / rhs),+ }
            }
        }

        impl AddAssign for $ty {
            fn add_assign(&mut self, rhs: $ty) {
                $(self.$f += rhs.$f;)+
            }
        }

        impl SubAssign for $ty {
            fn sub_assign(&mut self, rhs: $ty) {
                $(self.$f -= rhs.$f;)+
            }
        }

        impl MulAssign<f32> for $ty {
            fn mul_assign(&mut self, rhs: f32) {
                $(self.$f *= rhs;)+
            }
        }

        impl DivAssign<f32> for $ty {
            fn div_assign(&mut self, rhs: f32) {
                $(self.$f /= rhs;)+
            }
        }

        impl $ty {
            /// Dot product.
            #[inline]
            pub fn dot(self, rhs: $ty) -> f32 {
                0.0 $(+ self.$f * rhs.$f)+
            }

            /// Euclidean length, `sqrt(dot(v, v))`.
            #[inline]
            pub fn length(self) -> f32 {
                self.dot(self).sqrt()
            }

            /// Unit vector in the same direction.
            ///
            /// The input must have non-zero length; a zero vector yields
            /// non-finite components.
            #[inline]
            pub fn normalize(self) -> $ty {
                self / self.length()
            }

            /// Components as an array, in declaration order.
            #[inline]
            pub fn to_array(self) -> [f32; count!($($f)+)] {
                [$(self.$f),+]
            }
        }
    };
}

impl_vec_ops!(Vec2 { x, y });
impl_vec_ops!(Vec3 { x, y, z });
impl_vec_ops!(Vec4 { x, y, z, w });

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Right-handed cross product.
    #[inline]
    pub fn cross(self, rhs: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * rhs.z - self.z * rhs.y,
            y: -(self.x * rhs.z - self.z * rhs.x),
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    /// Homogeneous extension with the given `w`.
    #[inline]
    pub fn extend(self, w: f32) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }
}

impl Vec4 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Drops `w`.
    #[inline]
    pub fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

impl Index<usize> for Vec3 {
    type Output = f32;

    fn index(&self, i: usize) -> &f32 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vec3 index {} out of range", i),
        }
    }
}

impl IndexMut<usize> for Vec3 {
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vec3 index {} out of range", i),
        }
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}

impl From<Vec2> for [f32; 2] {
    fn from(v: Vec2) -> Self {
        v.to_array()
    }
}

impl From<Vec4> for [f32; 4] {
    fn from(v: Vec4) -> Self {
        v.to_array()
    }
}

// glam interop (for callers that already speak glam)

impl From<glam::Vec3> for Vec3 {
    fn from(v: glam::Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vec3> for glam::Vec3 {
    fn from(v: Vec3) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

impl From<glam::Vec4> for Vec4 {
    fn from(v: glam::Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vec4> for glam::Vec4 {
    fn from(v: Vec4) -> Self {
        glam::Vec4::new(v.x, v.y, v.z, v.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn cross_follows_right_hand_rule() {
        assert!(close(Vec3::X.cross(Vec3::Y), Vec3::Z));
        assert!(close(Vec3::Y.cross(Vec3::Z), Vec3::X));
        assert!(close(Vec3::Z.cross(Vec3::X), Vec3::Y));
        assert!(close(Vec3::Y.cross(Vec3::X), -Vec3::Z));
    }

    #[test]
    fn cross_is_perpendicular_to_inputs() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-4.0, 0.5, 2.0);
        let c = a.cross(b);
        assert!(c.dot(a).abs() < 1e-5);
        assert!(c.dot(b).abs() < 1e-5);
    }

    #[test]
    fn normalize_gives_unit_length() {
        let v = Vec3::new(3.0, -4.0, 12.0);
        assert!((v.length() - 13.0).abs() < EPS);
        assert!((v.normalize().length() - 1.0).abs() < EPS);
        assert!(close(v.normalize() * 13.0, v));
    }

    #[test]
    fn normalize_zero_is_not_finite() {
        let n = Vec3::ZERO.normalize();
        assert!(!n.x.is_finite());
    }

    #[test]
    fn scalar_ops_commute() {
        let v = Vec3::new(1.0, -2.0, 0.5);
        assert!(close(v * 2.0, 2.0 * v));
        let mut w = v;
        w *= 2.0;
        w /= 4.0;
        assert!(close(w, v / 2.0));
    }

    #[test]
    fn vec4_dot_and_xyz() {
        let a = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert!((a.dot(Vec4::ONE) - 10.0).abs() < EPS);
        assert!(close(a.xyz(), Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(Vec3::new(1.0, 2.0, 3.0).extend(1.0).to_array(), [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn index_matches_fields() {
        let mut v = Vec3::new(7.0, 8.0, 9.0);
        assert_eq!(v[2], 9.0);
        v[0] = 1.0;
        assert_eq!(v.x, 1.0);
    }
}
