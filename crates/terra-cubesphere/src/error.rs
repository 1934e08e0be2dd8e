//! Mesh construction and validation errors.

/// Reasons a quad-sphere mesh cannot be built or is not safe to traverse.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// Radius must be positive and finite.
    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    /// At least one subdivision per face is required.
    #[error("segments must be at least 1")]
    ZeroSegments,

    /// The vertex count would not fit in a `u32` index buffer.
    #[error("{segments} segments per face needs more vertices than u32 indices can address")]
    TooManyVertices {
        /// Requested subdivisions per face.
        segments: u32,
    },

    /// A per-vertex buffer disagrees with the position buffer length.
    #[error("{buffer} buffer has {actual} entries, expected {expected}")]
    LengthMismatch {
        /// Which buffer is wrong.
        buffer: &'static str,
        /// Number of positions.
        expected: usize,
        /// Entries actually present.
        actual: usize,
    },

    /// Index buffer length is not a multiple of three.
    #[error("index buffer length {0} is not a multiple of 3")]
    PartialTriangle(usize),

    /// An index points past the end of the vertex buffers.
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending index value.
        index: u32,
        /// Number of vertices.
        vertex_count: usize,
    },
}
