//! Per-draw uniform blocks. Matrices are stored column-major for upload.

use bytemuck::{Pod, Zeroable};
use effects::CameraBasis;
use engine_core::{Mat33, Mat44, Vec3};

/// Transforms for one object draw.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ObjectUniforms {
    /// `projection * view * model`.
    pub proj_camera_world: [[f32; 4]; 4],
    /// Inverse-transpose of the model's 3x3 block, each column padded to vec4.
    pub normal_matrix: [[f32; 4]; 3],
}

impl ObjectUniforms {
    pub fn new(projection: &Mat44, view: &Mat44, model: &Mat44) -> Self {
        let proj_camera_world = *projection * *view * *model;
        Self {
            proj_camera_world: proj_camera_world.to_cols_array_2d(),
            normal_matrix: Mat33::normal_matrix(model).to_cols_array_padded(),
        }
    }
}

/// Point light placed in world space.
#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub position: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub ambient: Vec3,
}

/// A point light ready for the shader, position in view space.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LightUniform {
    pub position_view: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub ambient: [f32; 4],
}

impl Light {
    /// Move the light into view space for this frame's camera.
    pub fn to_uniform(&self, view: &Mat44) -> LightUniform {
        let p = view.transform_point(self.position);
        LightUniform {
            position_view: [p.x, p.y, p.z, 1.0],
            diffuse: self.diffuse.extend(0.0).into(),
            specular: self.specular.extend(0.0).into(),
            ambient: self.ambient.extend(0.0).into(),
        }
    }
}

/// Sun-style light that only has a direction.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct DirectionalLight {
    /// Unit vector toward the light.
    pub direction: [f32; 4],
    pub diffuse: [f32; 4],
    pub ambient: [f32; 4],
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.0, 1.0, -1.0).normalize().extend(0.0).into(),
            diffuse: [0.5, 0.5, 0.0, 0.0],
            ambient: [0.1, 0.1, 0.1, 0.0],
        }
    }
}

/// Shared state for the particle billboard draw.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ParticleUniforms {
    /// `projection * view`; particles are already in world space.
    pub proj_camera_world: [[f32; 4]; 4],
    pub camera_right: [f32; 4],
    pub camera_up: [f32; 4],
}

impl ParticleUniforms {
    pub fn new(projection: &Mat44, view: &Mat44) -> Self {
        let basis = CameraBasis::from_view(view);
        Self {
            proj_camera_world: (*projection * *view).to_cols_array_2d(),
            camera_right: basis.right.extend(0.0).into(),
            camera_up: basis.up.extend(0.0).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn object_uniforms_are_column_major() {
        let model = make_translation(Vec3::new(3.0, 0.0, -5.0));
        let u = ObjectUniforms::new(&Mat44::IDENTITY, &Mat44::IDENTITY, &model);
        // Translation ends up in the fourth column.
        assert_eq!(u.proj_camera_world[3], [3.0, 0.0, -5.0, 1.0]);
        assert_eq!(u.normal_matrix[0], [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn object_uniforms_match_glam_product() {
        let projection = make_perspective_projection(1.0, 16.0 / 9.0, 0.1, 100.0);
        let view = look_at(Vec3::new(0.0, 3.0, 3.0), Vec3::new(3.0, 0.0, -5.0), Vec3::Y);
        let model = make_translation(Vec3::new(3.0, 1.0, -5.0)) * make_rotation_x(0.4);
        let u = ObjectUniforms::new(&projection, &view, &model);

        let expected = glam::Mat4::from(projection) * glam::Mat4::from(view) * glam::Mat4::from(model);
        let cols = expected.to_cols_array_2d();
        for (ours, theirs) in u.proj_camera_world.iter().flatten().zip(cols.iter().flatten()) {
            assert!((ours - theirs).abs() < 1e-4);
        }
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let model = make_scaling(2.0, 1.0, 1.0);
        let u = ObjectUniforms::new(&Mat44::IDENTITY, &Mat44::IDENTITY, &model);
        assert!((u.normal_matrix[0][0] - 0.5).abs() < EPS);
        assert!((u.normal_matrix[1][1] - 1.0).abs() < EPS);
    }

    #[test]
    fn light_moves_into_view_space() {
        let light = Light {
            position: Vec3::new(2.9, 0.27, -4.75),
            diffuse: Vec3::ONE,
            specular: Vec3::new(1.5, 1.5, 1.5),
            ambient: Vec3::new(0.3, 0.3, 0.3),
        };
        let view = make_translation(Vec3::new(0.0, -3.0, -3.0));
        let u = light.to_uniform(&view);
        assert!((u.position_view[0] - 2.9).abs() < EPS);
        assert!((u.position_view[1] + 2.73).abs() < EPS);
        assert!((u.position_view[2] + 7.75).abs() < EPS);
        assert_eq!(u.diffuse, [1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn directional_light_default_is_unit() {
        let d = DirectionalLight::default().direction;
        let len = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
        assert!((len - 1.0).abs() < EPS);
    }

    #[test]
    fn particle_uniforms_carry_camera_axes() {
        let view = look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let u = ParticleUniforms::new(&Mat44::IDENTITY, &view);
        assert!((u.camera_right[0] - 1.0).abs() < EPS);
        assert!((u.camera_up[1] - 1.0).abs() < EPS);
    }
}
