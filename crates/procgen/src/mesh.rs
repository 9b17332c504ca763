//! Parallel-array triangle meshes and their materials.

use bytemuck::{Pod, Zeroable};
use engine_core::{Vec2, Vec3};
use thiserror::Error;

/// Phong-style surface description, one per material slot of a mesh.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Material {
    /// Ka
    pub ambient: Vec3,
    /// Kd
    pub diffuse: Vec3,
    /// Ks
    pub specular: Vec3,
    /// Ns
    pub shininess: f32,
    /// Ke
    pub emissive: Vec3,
    /// Illumination model.
    pub illum: f32,
}

impl Material {
    pub const fn new(ambient: Vec3, diffuse: Vec3, specular: Vec3, shininess: f32, emissive: Vec3, illum: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
            emissive,
            illum,
        }
    }
}

impl Default for Material {
    /// Neutral grey used for meshes that arrive without materials.
    fn default() -> Self {
        Self::new(
            Vec3::new(0.1, 0.1, 0.1),
            Vec3::new(0.8, 0.8, 0.8),
            Vec3::new(0.5, 0.5, 0.5),
            15.0,
            Vec3::ZERO,
            1.0,
        )
    }
}

/// Problems found by [`SimpleMeshData::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("attribute length mismatch: {positions} positions, {normals} normals, {material_ids} material ids")]
    LengthMismatch {
        positions: usize,
        normals: usize,
        material_ids: usize,
    },
    #[error("{texcoords} texcoords for {positions} positions")]
    TexcoordMismatch { positions: usize, texcoords: usize },
    #[error("vertex count {0} is not a whole number of triangles")]
    PartialTriangle(usize),
    #[error("vertex {vertex} references material {id} but only {count} materials exist")]
    MaterialOutOfRange { vertex: usize, id: u32, count: usize },
}

/// Triangle soup as index-aligned attribute arrays (three vertices per triangle).
///
/// `positions`, `normals` and `material_ids` always have the same length;
/// `texcoords` is either empty or the same length. Every `material_ids[i]`
/// indexes `materials`.
#[derive(Debug, Clone, Default)]
pub struct SimpleMeshData {
    pub positions: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub material_ids: Vec<u32>,
    pub materials: Vec<Material>,
}

impl SimpleMeshData {
    /// Single-material mesh from positions and normals, as the generators emit.
    pub fn single_material(positions: Vec<Vec3>, normals: Vec<Vec3>, material: Material) -> Self {
        let material_ids = vec![0; positions.len()];
        Self {
            positions,
            texcoords: Vec::new(),
            normals,
            material_ids,
            materials: vec![material],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Material applied to vertex `i`.
    pub fn material_for(&self, i: usize) -> Option<&Material> {
        self.material_ids
            .get(i)
            .and_then(|&id| self.materials.get(id as usize))
    }

    /// Check the array-length and material-index invariants.
    pub fn validate(&self) -> Result<(), MeshError> {
        let positions = self.positions.len();
        if self.normals.len() != positions || self.material_ids.len() != positions {
            return Err(MeshError::LengthMismatch {
                positions,
                normals: self.normals.len(),
                material_ids: self.material_ids.len(),
            });
        }
        if !self.texcoords.is_empty() && self.texcoords.len() != positions {
            return Err(MeshError::TexcoordMismatch {
                positions,
                texcoords: self.texcoords.len(),
            });
        }
        if positions % 3 != 0 {
            return Err(MeshError::PartialTriangle(positions));
        }
        let count = self.materials.len();
        if let Some((vertex, &id)) = self
            .material_ids
            .iter()
            .enumerate()
            .find(|&(_, &id)| id as usize >= count)
        {
            return Err(MeshError::MaterialOutOfRange { vertex, id, count });
        }
        Ok(())
    }

    /// Fill in what the upload step needs but a loader may omit: zero
    /// texcoords for every vertex, and the default material when no
    /// materials (or no ids) are present.
    pub fn with_defaults(mut self) -> Self {
        if self.texcoords.is_empty() {
            self.texcoords = vec![Vec2::ZERO; self.positions.len()];
        }
        if self.material_ids.is_empty() || self.materials.is_empty() {
            self.material_ids = vec![0; self.positions.len()];
            self.materials = vec![Material::default()];
        }
        self
    }
}

/// Append `b` to `a`, re-basing `b`'s material ids past `a`'s materials.
///
/// Texcoords are padded with zeros when only one side has them, so the
/// result keeps the "empty or full" texcoord invariant.
pub fn concatenate(mut a: SimpleMeshData, b: &SimpleMeshData) -> SimpleMeshData {
    let offset = a.materials.len() as u32;

    if a.texcoords.is_empty() != b.texcoords.is_empty() {
        if a.texcoords.is_empty() {
            a.texcoords = vec![Vec2::ZERO; a.positions.len()];
            a.texcoords.extend_from_slice(&b.texcoords);
        } else {
            a.texcoords.extend(std::iter::repeat(Vec2::ZERO).take(b.positions.len()));
        }
    } else {
        a.texcoords.extend_from_slice(&b.texcoords);
    }

    a.positions.extend_from_slice(&b.positions);
    a.normals.extend_from_slice(&b.normals);
    a.material_ids
        .extend(b.material_ids.iter().map(|&id| id + offset));
    a.materials.extend_from_slice(&b.materials);
    a
}

/// Concatenate any number of meshes left to right.
pub fn concatenate_all<I>(meshes: I) -> SimpleMeshData
where
    I: IntoIterator<Item = SimpleMeshData>,
{
    meshes
        .into_iter()
        .fold(SimpleMeshData::default(), |acc, m| concatenate(acc, &m))
}

/// Something that can produce a mesh at load time (an OBJ loader, a
/// procedural placeholder, ...).
pub trait MeshSource {
    /// Short label for logs.
    fn name(&self) -> &str;

    fn load_mesh(&self) -> anyhow::Result<SimpleMeshData>;
}
