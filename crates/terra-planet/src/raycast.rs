//! Ray intersection against the displaced surface.
//!
//! The visible surface is `position + normal * height`, which changes with
//! every edit, so intersection displaces each triangle on the fly instead of
//! testing the static base positions. The scan is brute force over every
//! triangle and is the reference behaviour for picking.

use glam::{DAffine3, DVec2, DVec3};
use terra_cubesphere::QuadSphereMesh;
use tracing::trace;

/// Below this, a ray is treated as parallel to a triangle's plane.
const PARALLEL_EPSILON: f64 = 1e-12;

/// Barycentric slack so rays through shared edges do not fall between triangles.
const BARY_EPSILON: f64 = 1e-10;

/// A world-space ray with a unit direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Create a ray; `direction` is normalized (a zero vector stays zero and
    /// never hits anything).
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Ray from `origin` through `target`.
    pub fn towards(origin: DVec3, target: DVec3) -> Self {
        Self::new(origin, target - origin)
    }

    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Closest hit on the displaced surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplacedIntersection {
    /// Hit point in world space.
    pub point: DVec3,
    /// World-space distance from the ray origin.
    pub distance: f64,
    /// Texture coordinates interpolated across the hit triangle. May exceed 1
    /// on seam-corrected triangles; see [`wrap_uv`].
    pub uv: DVec2,
    /// Index of the hit triangle (position in the index buffer / 3).
    pub triangle: usize,
}

/// Intersect `ray` (world space) with the displaced surface of `mesh`, whose
/// local space maps to world space through `transform`.
///
/// Returns the closest hit. When two triangles are hit at exactly the same
/// distance (a ray through a shared edge or vertex), the one earlier in the
/// index buffer is kept; callers should not rely on which. Returns `None` for
/// a miss, a degenerate ray, a singular transform, or a malformed mesh.
pub fn intersect_displaced(
    ray: &Ray,
    mesh: &QuadSphereMesh,
    transform: &DAffine3,
) -> Option<DisplacedIntersection> {
    if let Err(err) = mesh.validate() {
        trace!(%err, "raycast skipped");
        return None;
    }
    if ray.direction == DVec3::ZERO || !ray.origin.is_finite() {
        return None;
    }
    let inverse = transform.inverse();
    if !inverse.is_finite() {
        return None;
    }

    let local_origin = inverse.transform_point3(ray.origin);
    let local_dir = inverse.transform_vector3(ray.direction);

    let uvs = mesh.uvs();
    let mut closest: Option<DisplacedIntersection> = None;

    for (triangle, tri) in mesh.indices().chunks_exact(3).enumerate() {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let va = mesh.displaced_position(a);
        let vb = mesh.displaced_position(b);
        let vc = mesh.displaced_position(c);

        let Some((t, u, v)) = intersect_triangle(local_origin, local_dir, va, vb, vc) else {
            continue;
        };

        let local_hit = local_origin + local_dir * t;
        let world_hit = transform.transform_point3(local_hit);
        let distance = world_hit.distance(ray.origin);

        if closest.is_some_and(|best| distance >= best.distance) {
            continue;
        }

        let w = 1.0 - u - v;
        let uv = to_dvec2(uvs[a]) * w + to_dvec2(uvs[b]) * u + to_dvec2(uvs[c]) * v;
        closest = Some(DisplacedIntersection {
            point: world_hit,
            distance,
            uv,
            triangle,
        });
    }

    closest
}

/// Two-sided Möller–Trumbore test.
///
/// Returns `(t, u, v)` where the hit is `origin + dir * t` and
/// `(1 - u - v, u, v)` are the barycentric weights of `(a, b, c)`.
fn intersect_triangle(
    origin: DVec3,
    dir: DVec3,
    a: DVec3,
    b: DVec3,
    c: DVec3,
) -> Option<(f64, f64, f64)> {
    let e1 = b - a;
    let e2 = c - a;
    let p = dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let s = origin - a;
    let u = s.dot(p) * inv_det;
    if !(-BARY_EPSILON..=1.0 + BARY_EPSILON).contains(&u) {
        return None;
    }

    let q = s.cross(e1);
    let v = dir.dot(q) * inv_det;
    if v < -BARY_EPSILON || u + v > 1.0 + BARY_EPSILON {
        return None;
    }

    let t = e2.dot(q) * inv_det;
    if t < 0.0 {
        return None;
    }
    Some((t, u, v))
}

/// Wrap texture coordinates into `[0, 1)` (Euclidean modulo) for cursor
/// feedback in texture space.
pub fn wrap_uv(uv: DVec2) -> DVec2 {
    DVec2::new(uv.x.rem_euclid(1.0), uv.y.rem_euclid(1.0))
}

#[inline]
fn to_dvec2(v: [f32; 2]) -> DVec2 {
    DVec2::new(v[0] as f64, v[1] as f64)
}
