//! Radial brush edits on the height field.

use glam::{DAffine3, DVec3};
use terra_cubesphere::QuadSphereMesh;
use terra_terrain::HeightRange;
use tracing::trace;

/// Whether a stroke raises or lowers terrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SculptDirection {
    Raise,
    Lower,
}

impl SculptDirection {
    /// `+1.0` for [`Raise`](Self::Raise), `-1.0` for [`Lower`](Self::Lower).
    pub fn sign(self) -> f32 {
        match self {
            SculptDirection::Raise => 1.0,
            SculptDirection::Lower => -1.0,
        }
    }

    /// Map a scalar direction to a variant: non-negative raises.
    pub fn from_scalar(value: f32) -> Self {
        if value < 0.0 {
            SculptDirection::Lower
        } else {
            SculptDirection::Raise
        }
    }
}

/// Brush shape and per-stroke height change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SculptSettings {
    /// World units, measured between base (undisplaced) positions.
    pub radius: f64,
    /// Height change at the brush center for one stroke.
    pub strength: f64,
}

impl Default for SculptSettings {
    fn default() -> Self {
        Self {
            radius: 3.0,
            strength: 0.25,
        }
    }
}

/// A brush placed on the base sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brush {
    pub center: DVec3,
    pub radius: f64,
}

impl Brush {
    /// Place a brush at the base-sphere projection of `local_point`.
    ///
    /// Returns `None` for the origin or a non-finite point, which have no
    /// projection.
    pub fn project(local_point: DVec3, base_radius: f64, radius: f64) -> Option<Self> {
        let dir = local_point.try_normalize()?;
        Some(Self {
            center: dir * base_radius,
            radius,
        })
    }

    /// Linear falloff weight for a base position, or `None` outside the brush.
    ///
    /// The weight is `1` at the center and tends to `0` at the rim; the rim
    /// itself is excluded.
    pub fn weight(&self, base_position: DVec3) -> Option<f64> {
        let dist2 = base_position.distance_squared(self.center);
        if dist2 < self.radius * self.radius {
            Some(1.0 - dist2.sqrt() / self.radius)
        } else {
            None
        }
    }
}

/// Apply one stroke at `world_point` to the heights of `mesh`.
///
/// The point is mapped into mesh-local space through the inverse of
/// `transform` and projected onto the base sphere. Every vertex whose base
/// position lies strictly within `settings.radius` of the projection moves by
/// `sign * strength * falloff`, clamped to `range`. Vertices are written only
/// when their value changes.
///
/// Returns `true` if any height changed. A malformed mesh, a degenerate
/// point, or a non-positive radius is a no-op.
pub fn sculpt(
    mesh: &mut QuadSphereMesh,
    transform: &DAffine3,
    world_point: DVec3,
    direction: SculptDirection,
    settings: &SculptSettings,
    range: HeightRange,
) -> bool {
    if let Err(err) = mesh.validate() {
        trace!(%err, "sculpt skipped");
        return false;
    }
    if settings.radius.is_nan() || settings.radius <= 0.0 {
        return false;
    }
    let inverse = transform.inverse();
    if !inverse.is_finite() {
        return false;
    }
    let local = inverse.transform_point3(world_point);
    let Some(brush) = Brush::project(local, mesh.radius(), settings.radius) else {
        return false;
    };

    let delta = direction.sign() as f64 * settings.strength;
    let mut changed = 0usize;
    for i in 0..mesh.vertex_count() {
        let Some(falloff) = brush.weight(mesh.position(i)) else {
            continue;
        };
        let old = mesh.heights()[i];
        let new = range.clamp_f64(old as f64 + delta * falloff);
        if new != old {
            mesh.heights_mut()[i] = new;
            changed += 1;
        }
    }

    trace!(changed, ?direction, "sculpt stroke");
    changed > 0
}
