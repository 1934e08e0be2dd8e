//! Quad-sphere mesh construction and buffer access.

use std::ops::Range;

use glam::DVec3;
use tracing::debug;

use crate::{CubeFace, MeshError, fix_uv_seams};

/// A cube projected onto a sphere, plus a scalar height per vertex.
///
/// Positions, normals, UVs and indices are fixed at construction; only the
/// height buffer can change afterwards. The visible surface of vertex `i` is
/// `position[i] + normal[i] * height[i]`.
///
/// Faces are not stitched: every face owns `(segments + 1)²` vertices, so the
/// vertex count is exactly `6 · (segments + 1)²`.
#[derive(Clone, Debug, PartialEq)]
pub struct QuadSphereMesh {
    radius: f64,
    segments: u32,
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    indices: Vec<u32>,
    heights: Vec<f32>,
}

impl QuadSphereMesh {
    /// Build a quad-sphere of the given radius with `segments × segments`
    /// quads per cube face. Heights start at zero.
    pub fn new(radius: f64, segments: u32) -> Result<Self, MeshError> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(MeshError::InvalidRadius(radius));
        }
        if segments == 0 {
            return Err(MeshError::ZeroSegments);
        }
        let side = segments as u64 + 1;
        if 6 * side * side > u32::MAX as u64 {
            return Err(MeshError::TooManyVertices { segments });
        }

        let side = side as usize;
        let per_face = side * side;
        let vertex_count = 6 * per_face;
        let s = segments as usize;

        let mut positions = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);
        let mut indices = Vec::with_capacity(6 * s * s * 6);

        let mut offset = 0u32;
        for face in CubeFace::ALL {
            for y in 0..=s {
                for x in 0..=s {
                    let u = x as f64 / segments as f64;
                    let v = y as f64 / segments as f64;
                    let dir = face.cube_point(u, v).normalize();
                    let p = dir * radius;

                    positions.push([p.x as f32, p.y as f32, p.z as f32]);
                    normals.push([dir.x as f32, dir.y as f32, dir.z as f32]);
                    uvs.push([u as f32, v as f32]);

                    if x < s && y < s {
                        let i = offset + (y * side + x) as u32;
                        let row = side as u32;
                        indices.extend_from_slice(&[i, i + 1, i + row]);
                        indices.extend_from_slice(&[i + 1, i + row + 1, i + row]);
                    }
                }
            }
            offset += per_face as u32;
        }

        fix_uv_seams(&mut uvs, &indices);

        debug!(
            radius,
            segments,
            vertices = vertex_count,
            triangles = indices.len() / 3,
            "built quad-sphere mesh"
        );

        Ok(Self {
            radius,
            segments,
            positions,
            normals,
            uvs,
            indices,
            heights: vec![0.0; vertex_count],
        })
    }

    /// Assemble a mesh from raw buffers without checking them.
    ///
    /// Call [`QuadSphereMesh::validate`] before traversing a mesh built this
    /// way; raycasting and sculpting do so themselves.
    pub fn from_buffers(
        radius: f64,
        positions: Vec<[f32; 3]>,
        normals: Vec<[f32; 3]>,
        uvs: Vec<[f32; 2]>,
        indices: Vec<u32>,
        heights: Vec<f32>,
    ) -> Self {
        Self {
            radius,
            segments: 0,
            positions,
            normals,
            uvs,
            indices,
            heights,
        }
    }

    /// Check that every buffer is present, index-aligned and in range.
    pub fn validate(&self) -> Result<(), MeshError> {
        let expected = self.positions.len();
        for (buffer, actual) in [
            ("normal", self.normals.len()),
            ("uv", self.uvs.len()),
            ("height", self.heights.len()),
        ] {
            if actual != expected {
                return Err(MeshError::LengthMismatch {
                    buffer,
                    expected,
                    actual,
                });
            }
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::PartialTriangle(self.indices.len()));
        }
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= expected) {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count: expected,
            });
        }
        Ok(())
    }

    /// Base sphere radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Subdivisions per face edge (0 for meshes built from raw buffers).
    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex index range owned by `face`.
    ///
    /// Only meaningful for meshes built with [`QuadSphereMesh::new`].
    pub fn face_vertices(&self, face: CubeFace) -> Range<usize> {
        let side = self.segments as usize + 1;
        let per_face = side * side;
        let start = face.index() * per_face;
        start..start + per_face
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Mutable access to the height buffer. Topology stays fixed.
    pub fn heights_mut(&mut self) -> &mut [f32] {
        &mut self.heights
    }

    /// Base (undisplaced) position of vertex `i`.
    #[inline]
    pub fn position(&self, i: usize) -> DVec3 {
        to_dvec3(self.positions[i])
    }

    /// Unit normal of vertex `i`.
    #[inline]
    pub fn normal(&self, i: usize) -> DVec3 {
        to_dvec3(self.normals[i])
    }

    /// Visible position of vertex `i`: base position pushed along its normal.
    #[inline]
    pub fn displaced_position(&self, i: usize) -> DVec3 {
        self.position(i) + self.normal(i) * self.heights[i] as f64
    }

    /// Position buffer as bytes for GPU upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normal buffer as bytes for GPU upload.
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// UV buffer as bytes for GPU upload.
    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }

    /// Index buffer as bytes for GPU upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Height buffer as bytes; re-upload whenever a sculpt reports a change.
    pub fn height_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.heights)
    }
}

#[inline]
fn to_dvec3(v: [f32; 3]) -> DVec3 {
    DVec3::new(v[0] as f64, v[1] as f64, v[2] as f64)
}
