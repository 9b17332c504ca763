//! Interleaved vertex format and mesh packing for upload.

use bytemuck::{Pod, Zeroable};
use procgen::{Material, MeshError, SimpleMeshData};
use std::mem::{offset_of, size_of};

/// One vertex with its material expanded inline, so a whole mesh draws
/// with a single call regardless of how many materials it has.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
    pub emissive: [f32; 3],
    pub illum: f32,
}

/// Float components and byte offset of one shader input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: u32,
    pub components: u32,
    pub offset: usize,
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2], material: &Material) -> Self {
        Self {
            position,
            normal,
            tex_coords,
            ambient: material.ambient.into(),
            diffuse: material.diffuse.into(),
            specular: material.specular.into(),
            shininess: material.shininess,
            emissive: material.emissive.into(),
            illum: material.illum,
        }
    }

    pub const STRIDE: usize = size_of::<Vertex>();

    /// Shader locations 0..=8: position, normal, texcoord, then the
    /// material's ambient, diffuse, specular, shininess, emissive, illum.
    pub const ATTRIBUTES: [VertexAttribute; 9] = [
        VertexAttribute { location: 0, components: 3, offset: offset_of!(Vertex, position) },
        VertexAttribute { location: 1, components: 3, offset: offset_of!(Vertex, normal) },
        VertexAttribute { location: 2, components: 2, offset: offset_of!(Vertex, tex_coords) },
        VertexAttribute { location: 3, components: 3, offset: offset_of!(Vertex, ambient) },
        VertexAttribute { location: 4, components: 3, offset: offset_of!(Vertex, diffuse) },
        VertexAttribute { location: 5, components: 3, offset: offset_of!(Vertex, specular) },
        VertexAttribute { location: 6, components: 1, offset: offset_of!(Vertex, shininess) },
        VertexAttribute { location: 7, components: 3, offset: offset_of!(Vertex, emissive) },
        VertexAttribute { location: 8, components: 1, offset: offset_of!(Vertex, illum) },
    ];
}

/// Flatten a mesh into upload-ready vertices.
///
/// Missing texcoords become zero and a mesh without materials gets the
/// default material, so only structurally broken meshes are rejected.
pub fn pack_mesh(mesh: &SimpleMeshData) -> Result<Vec<Vertex>, MeshError> {
    let mesh = mesh.clone().with_defaults();
    mesh.validate()?;

    let vertices: Vec<Vertex> = (0..mesh.vertex_count())
        .map(|i| {
            let material = &mesh.materials[mesh.material_ids[i] as usize];
            Vertex::new(
                mesh.positions[i].into(),
                mesh.normals[i].into(),
                mesh.texcoords[i].into(),
                material,
            )
        })
        .collect();

    log::debug!(
        "packed {} vertices ({} bytes)",
        vertices.len(),
        vertices.len() * Vertex::STRIDE
    );
    Ok(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::*;
    use procgen::{concatenate, make_cube, make_vehicle, VehicleConfig};

    #[test]
    fn attributes_are_packed_back_to_back() {
        let mut end = 0;
        for attr in Vertex::ATTRIBUTES {
            assert_eq!(attr.offset, end, "gap before location {}", attr.location);
            end = attr.offset + attr.components as usize * size_of::<f32>();
        }
        assert_eq!(end, Vertex::STRIDE);
        assert_eq!(Vertex::STRIDE, 22 * 4);
    }

    #[test]
    fn pack_expands_materials_per_vertex() {
        let red = Material {
            diffuse: Vec3::new(0.9, 0.1, 0.1),
            ..Material::default()
        };
        let mesh = concatenate(
            make_cube(Material::default(), Mat44::IDENTITY),
            &make_cube(red, make_translation(Vec3::X)),
        );
        let vertices = pack_mesh(&mesh).expect("cubes are valid");
        assert_eq!(vertices.len(), 72);
        assert_eq!(vertices[0].diffuse, [0.8, 0.8, 0.8]);
        assert_eq!(vertices[36].diffuse, [0.9, 0.1, 0.1]);
        assert_eq!(vertices[71].tex_coords, [0.0, 0.0]);
    }

    #[test]
    fn pack_fills_in_default_material() {
        let mesh = SimpleMeshData {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            normals: vec![Vec3::Z; 3],
            ..Default::default()
        };
        let vertices = pack_mesh(&mesh).expect("defaults make it valid");
        assert_eq!(vertices[2].shininess, 15.0);
        assert_eq!(vertices[2].ambient, [0.1, 0.1, 0.1]);
    }

    #[test]
    fn pack_rejects_broken_mesh() {
        let mut mesh = make_vehicle(&VehicleConfig::default());
        mesh.normals.truncate(10);
        assert!(matches!(pack_mesh(&mesh), Err(MeshError::LengthMismatch { .. })));
    }

    #[test]
    fn packed_bytes_match_stride() {
        let vertices = pack_mesh(&make_vehicle(&VehicleConfig::default())).expect("vehicle is valid");
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), vertices.len() * Vertex::STRIDE);
    }
}
