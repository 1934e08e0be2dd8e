//! Quad-sphere geometry: a subdivided cube projected onto a sphere, with
//! seam-corrected texture coordinates and a per-vertex height buffer.

mod cube_face;
mod error;
mod mesh;
mod seam;

pub use cube_face::CubeFace;
pub use error::MeshError;
pub use mesh::QuadSphereMesh;
pub use seam::fix_uv_seams;
