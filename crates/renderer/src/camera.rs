//! Free-fly camera with mouse look, plus split-screen viewports.

use engine_core::{look_at, make_perspective_projection, Mat44, Vec3};
use std::f32::consts::FRAC_PI_2;

/// Highest pitch magnitude mouse look can reach, 89 degrees.
const MAX_PITCH: f32 = 89.0 * std::f32::consts::PI / 180.0;

const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 3.0, 3.0);
const DEFAULT_FRONT: Vec3 = Vec3::new(0.0, 0.0, -1.0);

const TOP_DOWN_POSITION: Vec3 = Vec3::new(0.0, 20.0, 0.0);
const TOP_DOWN_FRONT: Vec3 = Vec3::new(0.0, -1.0, 0.0);

/// Movement requested for one frame. Axis values are in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveInput {
    /// +1 forward along the view direction, -1 backward.
    pub forward: f32,
    /// +1 strafe right, -1 left.
    pub right: f32,
    /// +1 rise along world +Y, -1 sink.
    pub up: f32,
    /// Double speed.
    pub fast: bool,
    /// Half speed. Ignored while `fast` is held.
    pub slow: bool,
}

impl MoveInput {
    pub fn speed_modifier(&self) -> f32 {
        if self.fast {
            2.0
        } else if self.slow {
            0.5
        } else {
            1.0
        }
    }
}

/// Free-fly camera driven by yaw/pitch mouse look.
#[derive(Debug, Clone)]
pub struct FlyCamera {
    pub position: Vec3,
    /// Unit view direction.
    pub front: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Radians per pixel per second of mouse travel.
    pub sensitivity: f32,
    /// Units per second at normal speed.
    pub speed: f32,
    yaw: f32,
    pitch: f32,
    top_down: bool,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            position: DEFAULT_POSITION,
            front: DEFAULT_FRONT,
            up: Vec3::Y,
            fov_degrees: 60.0,
            near: 0.1,
            far: 100.0,
            sensitivity: 0.05,
            speed: 3.0,
            yaw: -FRAC_PI_2,
            pitch: 0.0,
            top_down: false,
        }
    }
}

impl FlyCamera {
    pub fn new(fov_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            fov_degrees,
            near,
            far,
            ..Default::default()
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn is_top_down(&self) -> bool {
        self.top_down
    }

    /// Mouse look from the cursor's offset to the window centre.
    ///
    /// Moving the mouse down (`delta_y > 0`) looks down. Pitch is clamped
    /// to +/-89 degrees. Ignored in the top-down view, whose `up` is +Z.
    pub fn process_mouse(&mut self, delta_x: f32, delta_y: f32, dt: f32) {
        if self.top_down {
            return;
        }
        self.yaw += delta_x * self.sensitivity * dt;
        self.pitch = (self.pitch + delta_y * self.sensitivity * dt).clamp(-MAX_PITCH, MAX_PITCH);

        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.front = Vec3::new(cos_yaw * cos_pitch, -sin_pitch, sin_yaw * cos_pitch).normalize();
    }

    /// Fly along the view direction, strafe along `front x up` and rise
    /// along world Y.
    pub fn process_movement(&mut self, input: &MoveInput, dt: f32) {
        let step = self.speed * dt * input.speed_modifier();
        let right = self.front.cross(self.up).normalize();

        self.position += self.front * (input.forward * step);
        self.position += right * (input.right * step);
        self.position.y += input.up * step;
    }

    /// Switch between the overhead view and the default ground view.
    ///
    /// Both switches snap to a fixed pose; free-fly movement is not
    /// remembered.
    pub fn toggle_top_down(&mut self) {
        self.top_down = !self.top_down;
        if self.top_down {
            self.position = TOP_DOWN_POSITION;
            self.front = TOP_DOWN_FRONT;
            self.up = Vec3::Z;
        } else {
            self.position = DEFAULT_POSITION;
            self.front = DEFAULT_FRONT;
            self.up = Vec3::Y;
        }
        log::debug!("camera top-down: {}", self.top_down);
    }

    /// World-to-camera matrix.
    pub fn view_matrix(&self) -> Mat44 {
        look_at(self.position, self.position + self.front, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat44 {
        make_perspective_projection(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self, aspect: f32) -> Mat44 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

/// A pixel rectangle of the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Width over height; a zero height counts as 1.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// The whole framebuffer, or its left and right halves when `split`.
    pub fn split(width: u32, height: u32, split: bool) -> Vec<Viewport> {
        if !split {
            return vec![Viewport { x: 0, y: 0, width, height }];
        }
        let left = width / 2;
        vec![
            Viewport { x: 0, y: 0, width: left, height },
            Viewport { x: left, y: 0, width: width - left, height },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn default_camera_looks_down_negative_z() {
        let mut camera = FlyCamera::default();
        // Zero mouse travel rebuilds the front vector from yaw/pitch.
        camera.process_mouse(0.0, 0.0, 0.016);
        assert!((camera.front - Vec3::new(0.0, 0.0, -1.0)).length() < EPS);
    }

    #[test]
    fn view_matrix_matches_glam() {
        let mut camera = FlyCamera::default();
        camera.process_mouse(120.0, -40.0, 0.1);
        let ours = camera.view_matrix();
        let eye: glam::Vec3 = camera.position.into();
        let target: glam::Vec3 = (camera.position + camera.front).into();
        let theirs = glam::Mat4::look_at_rh(eye, target, glam::Vec3::Y);
        assert!(ours.abs_diff_eq(&Mat44::from(theirs), 1e-5));
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = FlyCamera::default();
        camera.process_mouse(0.0, 1.0e6, 1.0);
        assert!((camera.pitch() - MAX_PITCH).abs() < EPS);
        // Looking almost straight down.
        assert!(camera.front.y < -0.99);
        camera.process_mouse(0.0, -1.0e7, 1.0);
        assert!((camera.pitch() + MAX_PITCH).abs() < EPS);
    }

    #[test]
    fn movement_speed_modifiers() {
        let input = MoveInput {
            forward: 1.0,
            ..Default::default()
        };
        let mut camera = FlyCamera::default();
        camera.process_movement(&input, 1.0);
        assert!((camera.position.z - 0.0).abs() < EPS);

        let mut fast = FlyCamera::default();
        fast.process_movement(&MoveInput { fast: true, slow: true, ..input }, 1.0);
        assert!((fast.position.z + 3.0).abs() < EPS);

        let mut slow = FlyCamera::default();
        slow.process_movement(&MoveInput { slow: true, ..input }, 1.0);
        assert!((slow.position.z - 1.5).abs() < EPS);
    }

    #[test]
    fn strafe_and_rise() {
        let mut camera = FlyCamera::default();
        let input = MoveInput {
            right: 1.0,
            up: 1.0,
            ..Default::default()
        };
        camera.process_movement(&input, 0.5);
        assert!((camera.position.x - 1.5).abs() < EPS);
        assert!((camera.position.y - 4.5).abs() < EPS);
    }

    #[test]
    fn top_down_toggle_round_trips() {
        let mut camera = FlyCamera::default();
        camera.position = Vec3::new(9.0, 9.0, 9.0);
        camera.toggle_top_down();
        assert!(camera.is_top_down());
        assert_eq!(camera.position.to_array(), [0.0, 20.0, 0.0]);
        let eye = camera.view_matrix().transform_point(Vec3::ZERO);
        // The origin is straight ahead, 20 units away.
        assert!((eye - Vec3::new(0.0, 0.0, -20.0)).length() < 1e-4);

        camera.toggle_top_down();
        assert!(!camera.is_top_down());
        assert_eq!(camera.position.to_array(), [0.0, 3.0, 3.0]);
        assert_eq!(camera.up.to_array(), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn mouse_look_is_ignored_from_above() {
        let mut camera = FlyCamera::default();
        camera.toggle_top_down();
        let view = camera.view_matrix();
        let yaw = camera.yaw();

        camera.process_mouse(30.0, -12.0, 0.1);
        assert_eq!(camera.front.to_array(), [0.0, -1.0, 0.0]);
        assert_eq!(camera.yaw(), yaw);
        assert!(camera.view_matrix().abs_diff_eq(&view, 0.0));
        // Not rolled: world X stays on the camera's horizontal axis.
        let x_axis = camera.view_matrix().transform_point(Vec3::X)
            - camera.view_matrix().transform_point(Vec3::ZERO);
        assert!((x_axis - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn split_viewports_cover_the_framebuffer() {
        let whole = Viewport::split(1281, 720, false);
        assert_eq!(whole.len(), 1);
        assert!((whole[0].aspect() - 1281.0 / 720.0).abs() < EPS);

        let halves = Viewport::split(1281, 720, true);
        assert_eq!(halves.len(), 2);
        assert_eq!(halves[0].width + halves[1].width, 1281);
        assert_eq!(halves[1].x, halves[0].width);
    }

    #[test]
    fn zero_height_viewport_has_finite_aspect() {
        let v = Viewport { x: 0, y: 0, width: 800, height: 0 };
        assert_eq!(v.aspect(), 800.0);
    }
}
