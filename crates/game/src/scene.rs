//! The landing site: terrain, two pads, the lander and its exhaust, with
//! the lights and cameras that look at them.

use crate::config::SceneConfig;
use crate::flight::{VehicleFlight, LAUNCH_PAD};
use anyhow::Context;
use effects::{CameraBasis, ParticleConfig, ParticleInstance, ParticleSystem};
use engine_core::*;
use procgen::{
    concatenate, make_cube, make_cylinder, make_vehicle, Material, MeshSource, SimpleMeshData, VehicleConfig,
};
use renderer::{
    pack_mesh, DirectionalLight, FlyCamera, Light, LightUniform, MoveInput, ObjectUniforms, ParticleUniforms, Vertex,
    Viewport,
};

/// Second landing pad, the lander's destination.
pub const FAR_PAD: Vec3 = Vec3::new(-7.0, 0.0, 7.0);

/// Nozzle exit in the lander's local frame.
const NOZZLE: Vec3 = Vec3::new(0.0, 0.12, 0.0);

/// Where the split-screen ground camera stands.
const GROUND_CAMERA: Vec3 = Vec3::new(0.0, 1.5, -1.0);

const GROUND: Material = Material::new(
    Vec3::new(0.15, 0.13, 0.12),
    Vec3::new(0.45, 0.4, 0.35),
    Vec3::new(0.05, 0.05, 0.05),
    4.0,
    Vec3::ZERO,
    1.0,
);

const PAD_CONCRETE: Material = Material::new(
    Vec3::new(0.2, 0.2, 0.2),
    Vec3::new(0.55, 0.55, 0.55),
    Vec3::new(0.2, 0.2, 0.2),
    10.0,
    Vec3::ZERO,
    1.0,
);

const PAD_MARKING: Material = Material::new(
    Vec3::new(0.3, 0.3, 0.0),
    Vec3::new(0.9, 0.8, 0.1),
    Vec3::new(0.3, 0.3, 0.3),
    10.0,
    Vec3::ZERO,
    1.0,
);

/// Flat slab standing in for the terrain model.
pub struct TerrainSource {
    pub half_extent: f32,
}

impl MeshSource for TerrainSource {
    fn name(&self) -> &str {
        "terrain"
    }

    fn load_mesh(&self) -> anyhow::Result<SimpleMeshData> {
        let e = self.half_extent;
        Ok(make_cube(
            GROUND,
            make_translation(Vec3::new(0.0, -0.05, 0.0)) * make_scaling(e, 0.05, e),
        ))
    }
}

/// Procedural landing pad: a low disc with a marker block in the middle.
pub struct PadSource {
    pub subdivs: usize,
}

impl MeshSource for PadSource {
    fn name(&self) -> &str {
        "landing pad"
    }

    fn load_mesh(&self) -> anyhow::Result<SimpleMeshData> {
        let disc = make_cylinder(
            true,
            self.subdivs,
            PAD_CONCRETE,
            make_scaling(0.6, 0.02, 0.6) * make_rotation_z(0.5 * std::f32::consts::PI),
        );
        let marker = make_cube(
            PAD_MARKING,
            make_translation(Vec3::new(0.0, 0.02, 0.0)) * make_scaling(0.15, 0.005, 0.15),
        );
        Ok(concatenate(disc, &marker))
    }
}

pub struct VehicleSource {
    pub config: VehicleConfig,
}

impl MeshSource for VehicleSource {
    fn name(&self) -> &str {
        "vehicle"
    }

    fn load_mesh(&self) -> anyhow::Result<SimpleMeshData> {
        Ok(make_vehicle(&self.config))
    }
}

/// A packed mesh placed in the world.
pub struct SceneObject {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub model: Mat44,
}

/// Discrete requests for one frame, as keys and mouse would produce them.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Cursor offset from the window centre, only applied while `mouse_look`.
    pub mouse_delta: (f32, f32),
    pub mouse_look: bool,
    pub movement: MoveInput,
    pub toggle_launch: bool,
    pub reset_vehicle: bool,
    pub toggle_top_down: bool,
    pub toggle_split_screen: bool,
}

/// Everything an external draw step needs for one viewport.
pub struct ViewFrame {
    pub viewport: Viewport,
    /// One entry per scene object, same order as [`Scene::objects`].
    pub objects: Vec<ObjectUniforms>,
    pub lights: Vec<LightUniform>,
    pub sun: DirectionalLight,
    pub particles: ParticleUniforms,
    /// Live particles, farthest first for this viewport's camera.
    pub particle_instances: Vec<ParticleInstance>,
}

pub struct Scene {
    pub objects: Vec<SceneObject>,
    vehicle_index: usize,
    pub flight: VehicleFlight,
    pub camera: FlyCamera,
    pub exhaust: ParticleSystem,
    pub lights: Vec<Light>,
    pub sun: DirectionalLight,
    width: u32,
    height: u32,
    split_screen: bool,
    particles_per_frame: usize,
}

/// Load a mesh through its source and pack it for upload.
fn load_object(source: &dyn MeshSource, model: Mat44) -> anyhow::Result<SceneObject> {
    let mesh = source
        .load_mesh()
        .with_context(|| format!("loading {}", source.name()))?;
    let vertices = pack_mesh(&mesh).with_context(|| format!("packing {}", source.name()))?;
    log::info!(
        "{}: {} triangles, {} materials",
        source.name(),
        mesh.triangle_count(),
        mesh.materials.len()
    );
    Ok(SceneObject {
        name: source.name().to_string(),
        vertices,
        model,
    })
}

/// The three coloured point lights clustered around the launch pad.
pub fn pad_lights() -> Vec<Light> {
    vec![
        Light {
            position: Vec3::new(2.9, 0.27, -4.75),
            diffuse: Vec3::new(1.0, 1.0, 1.0),
            specular: Vec3::new(1.5, 1.5, 1.5),
            ambient: Vec3::new(0.3, 0.3, 0.3),
        },
        Light {
            position: Vec3::new(2.7, 0.27, -5.0),
            diffuse: Vec3::new(0.0, 1.0, 0.0),
            specular: Vec3::new(1.5, 1.0, 0.5),
            ambient: Vec3::new(0.2, 0.2, 0.2),
        },
        Light {
            position: Vec3::new(2.99, 0.27, -5.26),
            diffuse: Vec3::new(0.0, 0.0, 1.0),
            specular: Vec3::new(1.5, 0.5, 1.5),
            ambient: Vec3::new(0.2, 0.2, 0.3),
        },
    ]
}

impl Scene {
    pub fn build(config: &SceneConfig) -> anyhow::Result<Self> {
        let vehicle_config = VehicleConfig::default();
        let objects = vec![
            load_object(&TerrainSource { half_extent: 20.0 }, Mat44::IDENTITY)?,
            load_object(&PadSource { subdivs: 32 }, make_translation(LAUNCH_PAD))?,
            load_object(&PadSource { subdivs: 32 }, make_translation(FAR_PAD))?,
            load_object(&VehicleSource { config: vehicle_config }, make_translation(LAUNCH_PAD))?,
        ];
        let vehicle_index = objects.len() - 1;

        let exhaust_config = ParticleConfig::exhaust();
        let exhaust = match config.seed {
            Some(seed) => ParticleSystem::with_seed(config.particle_capacity, exhaust_config, seed),
            None => ParticleSystem::new(config.particle_capacity, exhaust_config),
        };

        Ok(Self {
            objects,
            vehicle_index,
            flight: VehicleFlight::new(LAUNCH_PAD),
            camera: FlyCamera::new(config.fov_degrees, config.near, config.far),
            exhaust,
            lights: pad_lights(),
            sun: DirectionalLight::default(),
            width: config.window_width,
            height: config.window_height,
            split_screen: config.split_screen,
            particles_per_frame: config.particles_per_frame,
        })
    }

    pub fn vehicle(&self) -> &SceneObject {
        &self.objects[self.vehicle_index]
    }

    pub fn is_split_screen(&self) -> bool {
        self.split_screen
    }

    /// Apply input and advance the simulation by `dt` seconds.
    pub fn update(&mut self, dt: f32, input: &FrameInput) {
        if input.toggle_top_down {
            self.camera.toggle_top_down();
        }
        if input.toggle_split_screen {
            self.split_screen = !self.split_screen;
        }
        if input.toggle_launch {
            self.flight.toggle_launch();
        }
        if input.reset_vehicle {
            self.flight.reset();
            self.exhaust.reset(self.flight.position());
        }

        if input.mouse_look {
            let (dx, dy) = input.mouse_delta;
            self.camera.process_mouse(dx, dy, dt);
        }
        self.camera.process_movement(&input.movement, dt);

        self.flight.update(dt);
        let model = self.flight.model_matrix();
        self.objects[self.vehicle_index].model = model;

        let spawn = if self.flight.is_launched() {
            self.particles_per_frame
        } else {
            0
        };
        let nozzle = model.transform_point(NOZZLE);
        self.exhaust.update(dt, nozzle, -self.flight.velocity(), spawn);
    }

    /// Per-viewport draw data. The exhaust pool is re-sorted for each view.
    pub fn render(&mut self) -> Vec<ViewFrame> {
        let viewports = Viewport::split(self.width, self.height, self.split_screen);
        let mut frames = Vec::with_capacity(viewports.len());
        for (i, viewport) in viewports.into_iter().enumerate() {
            let view = if i == 0 {
                self.camera.view_matrix()
            } else {
                look_at(GROUND_CAMERA, self.flight.position(), Vec3::Y)
            };
            let projection = self.camera.projection_matrix(viewport.aspect());
            frames.push(self.render_view(viewport, &projection, &view));
        }
        frames
    }

    fn render_view(&mut self, viewport: Viewport, projection: &Mat44, view: &Mat44) -> ViewFrame {
        self.exhaust.order_particles(&(*projection * *view));
        let basis = CameraBasis::from_view(view);

        ViewFrame {
            viewport,
            objects: self
                .objects
                .iter()
                .map(|o| ObjectUniforms::new(projection, view, &o.model))
                .collect(),
            lights: self.lights.iter().map(|l| l.to_uniform(view)).collect(),
            sun: self.sun,
            particles: ParticleUniforms::new(projection, view),
            particle_instances: self.exhaust.instances(&basis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn scene() -> Scene {
        let config = SceneConfig {
            seed: Some(11),
            particle_capacity: 64,
            ..Default::default()
        };
        Scene::build(&config).expect("procedural scene builds")
    }

    fn launch() -> FrameInput {
        FrameInput {
            toggle_launch: true,
            ..Default::default()
        }
    }

    #[test]
    fn builds_terrain_pads_and_vehicle() {
        let scene = scene();
        let names: Vec<&str> = scene.objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["terrain", "landing pad", "landing pad", "vehicle"]);
        assert!(scene.objects.iter().all(|o| !o.vertices.is_empty()));
        assert_eq!(scene.objects[2].model.transform_point(Vec3::ZERO).to_array(), FAR_PAD.to_array());
    }

    #[test]
    fn pad_mesh_is_valid() {
        let mesh = PadSource { subdivs: 8 }.load_mesh().expect("pad builds");
        assert_eq!(mesh.validate(), Ok(()));
        assert_eq!(mesh.materials.len(), 2);
    }

    #[test]
    fn idle_scene_emits_nothing() {
        let mut scene = scene();
        for _ in 0..30 {
            scene.update(DT, &FrameInput::default());
        }
        assert_eq!(scene.exhaust.alive_count(), 0);
        assert_eq!(scene.flight.position().to_array(), LAUNCH_PAD.to_array());
    }

    #[test]
    fn launch_lifts_vehicle_and_emits_exhaust() {
        let mut scene = scene();
        scene.update(DT, &launch());
        for _ in 0..60 {
            scene.update(DT, &FrameInput::default());
        }
        assert!(scene.flight.position().y > 0.5);
        assert!(scene.exhaust.alive_count() > 0);
        assert!(scene.exhaust.alive_count() <= 64);

        let vehicle_origin = scene.vehicle().model.transform_point(Vec3::ZERO);
        assert!((vehicle_origin - scene.flight.position()).length() < 1e-5);
    }

    #[test]
    fn reset_parks_vehicle_and_exhaust() {
        let mut scene = scene();
        scene.update(DT, &launch());
        for _ in 0..30 {
            scene.update(DT, &FrameInput::default());
        }
        scene.update(
            DT,
            &FrameInput {
                reset_vehicle: true,
                ..Default::default()
            },
        );
        assert!(!scene.flight.is_launched());
        assert_eq!(scene.flight.position().to_array(), LAUNCH_PAD.to_array());
        for p in scene.exhaust.particles().iter().filter(|p| p.is_alive()) {
            let offset = p.position - LAUNCH_PAD;
            // Snapped to the pad, then one frame of motion at zero velocity.
            assert!(offset.length() < 1e-5);
        }
    }

    #[test]
    fn render_produces_one_entry_per_object_and_light() {
        let mut scene = scene();
        let frames = scene.render();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].objects.len(), 4);
        assert_eq!(frames[0].lights.len(), 3);
        assert_eq!(frames[0].viewport.width, 1280);
    }

    #[test]
    fn split_screen_renders_two_views() {
        let mut scene = scene();
        scene.update(
            DT,
            &FrameInput {
                toggle_split_screen: true,
                ..Default::default()
            },
        );
        let frames = scene.render();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].viewport.width + frames[1].viewport.width, 1280);
    }

    #[test]
    fn rendered_particles_are_farthest_first() {
        let mut scene = scene();
        scene.update(DT, &launch());
        for _ in 0..40 {
            scene.update(DT, &FrameInput::default());
        }
        let view = scene.camera.view_matrix();
        let projection = scene.camera.projection_matrix(1280.0 / 720.0);
        let frames = scene.render();
        let depths: Vec<f32> = frames[0]
            .particle_instances
            .iter()
            .map(|inst| {
                let clip = projection * view * Vec3::from(inst.center).extend(1.0);
                clip.z / clip.w
            })
            .collect();
        assert!(!depths.is_empty());
        for pair in depths.windows(2) {
            assert!(pair[0] >= pair[1] - 1e-5);
        }
    }
}
