//! The lander: a beacon, a nose cone, a body cylinder, four booster
//! nozzles and four splayed legs, merged into one mesh.
//!
//! Built standing on its feet around the local origin with +Y up, so the
//! model matrix only has to place and tilt it.

use crate::mesh::{concatenate_all, Material, SimpleMeshData};
use crate::shapes::{make_cone, make_cube, make_cylinder};
use engine_core::*;
use std::f32::consts::PI;

pub const HULL_RED: Material = Material::new(
    Vec3::new(0.5, 0.0, 0.0),
    Vec3::new(0.9, 0.1, 0.1),
    Vec3::new(0.8, 0.3, 0.3),
    50.0,
    Vec3::new(0.2, 0.0, 0.0),
    1.0,
);

pub const NOZZLE_GREY: Material = Material::new(
    Vec3::new(0.2, 0.2, 0.2),
    Vec3::new(0.4, 0.4, 0.4),
    Vec3::new(0.1, 0.1, 0.1),
    5.0,
    Vec3::ZERO,
    1.0,
);

pub const BODY_LIGHT_GREY: Material = Material::new(
    Vec3::new(0.4, 0.4, 0.4),
    Vec3::new(0.4, 0.4, 0.4),
    Vec3::new(0.3, 0.3, 0.3),
    50.0,
    Vec3::ZERO,
    1.0,
);

pub const BEACON: Material = Material::new(
    Vec3::new(0.2, 0.2, 0.2),
    Vec3::new(0.8, 0.8, 0.0),
    Vec3::new(1.0, 1.0, 1.0),
    32.0,
    Vec3::new(1.0, 1.0, 0.0),
    1.0,
);

/// Configuration for the lander model.
#[derive(Debug, Clone)]
pub struct VehicleConfig {
    /// Angular segments for every cone and cylinder.
    pub subdivs: usize,
    /// Close the legs' ends.
    pub capped_legs: bool,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            subdivs: 16,
            capped_legs: true,
        }
    }
}

/// Number of material slots in the merged lander mesh.
pub const VEHICLE_MATERIAL_COUNT: usize = 11;

/// Canonical shapes run along +X; this stands them up along +Y.
fn upright() -> Mat44 {
    make_rotation_z(0.5 * PI)
}

fn booster(config: &VehicleConfig, x: f32, z: f32) -> SimpleMeshData {
    make_cone(
        false,
        config.subdivs,
        NOZZLE_GREY,
        make_translation(Vec3::new(x, 0.17, z)) * make_scaling(0.04, 0.06, 0.04) * upright(),
    )
}

/// One leg: a flattened, sheared cylinder splayed outward at `yaw`.
fn leg(config: &VehicleConfig, x: f32, z: f32, yaw: f32) -> SimpleMeshData {
    make_cylinder(
        config.capped_legs,
        config.subdivs,
        HULL_RED,
        make_translation(Vec3::new(x, 0.05, z))
            * make_rotation_y(yaw)
            * make_rotation_x(0.15 * PI)
            * make_shearing(0.0, 0.0, 0.0, 1.0, 0.0, 0.0)
            * make_scaling(0.01, 0.25, 0.05)
            * upright(),
    )
}

/// Build the lander mesh.
pub fn make_vehicle(config: &VehicleConfig) -> SimpleMeshData {
    let beacon = make_cube(
        BEACON,
        make_translation(Vec3::new(0.0, 0.7, 0.0)) * make_scaling(0.025, 0.025, 0.025),
    );

    let nose = make_cone(
        true,
        config.subdivs,
        HULL_RED,
        make_translation(Vec3::new(0.0, 0.5, 0.0)) * make_scaling(0.1, 0.2, 0.1) * upright(),
    );

    let body = make_cylinder(
        true,
        config.subdivs,
        BODY_LIGHT_GREY,
        make_translation(Vec3::new(0.0, 0.2, 0.0)) * make_scaling(0.1, 0.3, 0.1) * upright(),
    );

    let legs = [
        leg(config, 0.15, 0.15, -0.75 * PI),
        leg(config, -0.15, -0.15, 0.25 * PI),
        leg(config, -0.15, 0.15, 0.75 * PI),
        leg(config, 0.15, -0.15, -0.25 * PI),
    ];

    let boosters = [
        booster(config, 0.04, 0.04),
        booster(config, 0.04, -0.04),
        booster(config, -0.04, 0.04),
        booster(config, -0.04, -0.04),
    ];

    let mesh = concatenate_all(
        [beacon, nose, body]
            .into_iter()
            .chain(legs)
            .chain(boosters),
    );

    log::debug!(
        "vehicle: {} triangles, {} materials",
        mesh.triangle_count(),
        mesh.materials.len()
    );
    mesh
}
