//! The six faces of the quad-sphere and their sampling axes.

use glam::DVec3;

/// A face of the unit cube, named by its outward axis. The discriminant is
/// the face's slot in the vertex buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CubeFace {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

impl CubeFace {
    /// All six faces in mesh construction order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    /// Position of this face in [`CubeFace::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Outward-pointing unit normal for this face.
    #[must_use]
    pub fn normal(self) -> DVec3 {
        match self {
            CubeFace::PosX => DVec3::X,
            CubeFace::NegX => DVec3::NEG_X,
            CubeFace::PosY => DVec3::Y,
            CubeFace::NegY => DVec3::NEG_Y,
            CubeFace::PosZ => DVec3::Z,
            CubeFace::NegZ => DVec3::NEG_Z,
        }
    }

    /// First sampling axis: the normal's components rotated `(y, z, x)`.
    #[must_use]
    pub fn axis_a(self) -> DVec3 {
        let n = self.normal();
        DVec3::new(n.y, n.z, n.x)
    }

    /// Second sampling axis: `normal × axis_a`.
    #[must_use]
    pub fn axis_b(self) -> DVec3 {
        self.normal().cross(self.axis_a())
    }

    /// Point on the `[-1, 1]` cube for face parameters `(u, v)` in `[0, 1]`.
    ///
    /// `(0.5, 0.5)` maps to the face normal.
    #[inline]
    #[must_use]
    pub fn cube_point(self, u: f64, v: f64) -> DVec3 {
        self.normal() + self.axis_a() * ((u - 0.5) * 2.0) + self.axis_b() * ((v - 0.5) * 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_index_matches_buffer_order() {
        assert_eq!(CubeFace::ALL.len(), 6);
        for (i, face) in CubeFace::ALL.iter().enumerate() {
            assert_eq!(face.index(), i);
        }
    }

    #[test]
    fn test_axes_are_orthonormal() {
        for face in CubeFace::ALL {
            let a = face.axis_a();
            let b = face.axis_b();
            let n = face.normal();
            assert!((a.length() - 1.0).abs() < 1e-12, "axis_a not unit for {face:?}");
            assert!((b.length() - 1.0).abs() < 1e-12, "axis_b not unit for {face:?}");
            assert!(a.dot(n).abs() < 1e-12, "axis_a not perpendicular for {face:?}");
            assert!(b.dot(n).abs() < 1e-12, "axis_b not perpendicular for {face:?}");
            assert!(a.dot(b).abs() < 1e-12, "axes not perpendicular for {face:?}");
        }
    }

    #[test]
    fn test_axis_a_cross_axis_b_equals_normal() {
        // Guarantees counter-clockwise winding seen from outside.
        for face in CubeFace::ALL {
            let cross = face.axis_a().cross(face.axis_b());
            assert!(
                (cross - face.normal()).length() < 1e-12,
                "axis_a x axis_b != normal for {face:?}: got {cross:?}"
            );
        }
    }

    #[test]
    fn test_cube_point_face_center_is_normal() {
        for face in CubeFace::ALL {
            assert_eq!(face.cube_point(0.5, 0.5), face.normal());
        }
    }

    #[test]
    fn test_cube_point_corners_on_cube_surface() {
        for face in CubeFace::ALL {
            for (u, v) in [(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)] {
                let p = face.cube_point(u, v);
                assert!((p.abs().max_element() - 1.0).abs() < 1e-12);
                assert!((p.length() - 3.0_f64.sqrt()).abs() < 1e-12);
            }
        }
    }
}
