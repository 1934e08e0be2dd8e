//! The planet: mesh, terrain, transform and edit notifications in one place.

use glam::{DAffine3, DVec3};
use terra_cubesphere::{MeshError, QuadSphereMesh};
use terra_terrain::{HeightRange, TerrainGenerator};
use tracing::{debug, info};

use crate::listeners::{HeightListeners, ListenerId};
use crate::raycast::{DisplacedIntersection, Ray, intersect_displaced};
use crate::sculpt::{SculptDirection, SculptSettings, sculpt};

/// Construction parameters for a [`Planet`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanetParams {
    pub radius: f64,
    pub segments: u32,
    pub range: HeightRange,
    pub sculpt: SculptSettings,
}

impl Default for PlanetParams {
    fn default() -> Self {
        Self {
            radius: 60.0,
            segments: 64,
            range: HeightRange::default(),
            sculpt: SculptSettings::default(),
        }
    }
}

/// A sculptable displaced quad-sphere.
///
/// The planet is the single owner of its height buffer. Every mutation goes
/// through [`sculpt_at`](Self::sculpt_at) or [`set_heights`](Self::set_heights),
/// which keep heights inside the configured range and notify registered
/// listeners when something actually changed.
#[derive(Debug)]
pub struct Planet {
    mesh: QuadSphereMesh,
    transform: DAffine3,
    range: HeightRange,
    sculpt: SculptSettings,
    listeners: HeightListeners,
}

impl Planet {
    /// Build the mesh and fill it with procedural terrain.
    pub fn new(params: PlanetParams) -> Result<Self, MeshError> {
        let mut mesh = QuadSphereMesh::new(params.radius, params.segments)?;
        TerrainGenerator::default().generate(&mut mesh, params.range);
        info!(
            radius = params.radius,
            segments = params.segments,
            vertices = mesh.vertex_count(),
            "planet ready"
        );
        Ok(Self::from_mesh(mesh, params.range, params.sculpt))
    }

    /// Wrap an existing mesh without generating terrain.
    pub fn from_mesh(mesh: QuadSphereMesh, range: HeightRange, sculpt: SculptSettings) -> Self {
        Self {
            mesh,
            transform: DAffine3::IDENTITY,
            range,
            sculpt,
            listeners: HeightListeners::new(),
        }
    }

    pub fn mesh(&self) -> &QuadSphereMesh {
        &self.mesh
    }

    pub fn range(&self) -> HeightRange {
        self.range
    }

    pub fn sculpt_settings(&self) -> SculptSettings {
        self.sculpt
    }

    pub fn set_sculpt_settings(&mut self, settings: SculptSettings) {
        self.sculpt = settings;
    }

    /// Local-to-world transform.
    pub fn transform(&self) -> DAffine3 {
        self.transform
    }

    pub fn set_transform(&mut self, transform: DAffine3) {
        self.transform = transform;
    }

    /// Closest hit of a world-space ray on the displaced surface.
    pub fn intersect(&self, ray: &Ray) -> Option<DisplacedIntersection> {
        intersect_displaced(ray, &self.mesh, &self.transform)
    }

    /// Apply one brush stroke centered near `world_point`.
    ///
    /// Returns `true` and notifies listeners if any height changed.
    pub fn sculpt_at(&mut self, world_point: DVec3, direction: SculptDirection) -> bool {
        let changed = sculpt(
            &mut self.mesh,
            &self.transform,
            world_point,
            direction,
            &self.sculpt,
            self.range,
        );
        if changed {
            self.listeners.notify();
        }
        changed
    }

    /// Current heights, one per vertex.
    pub fn heights(&self) -> &[f32] {
        self.mesh.heights()
    }

    /// Replace every height at once, clamping each value into range.
    ///
    /// Input of the wrong length or containing non-finite values is rejected
    /// and leaves the planet untouched. Returns `true` and notifies listeners
    /// only if at least one stored height changed, so writing back the
    /// current heights is silent.
    pub fn set_heights(&mut self, heights: &[f32]) -> bool {
        let expected = self.mesh.vertex_count();
        if heights.len() != expected {
            debug!(expected, actual = heights.len(), "rejected height buffer");
            return false;
        }
        if heights.iter().any(|h| !h.is_finite()) {
            debug!("rejected height buffer with non-finite values");
            return false;
        }

        let range = self.range;
        let mut changed = 0usize;
        for (slot, &h) in self.mesh.heights_mut().iter_mut().zip(heights) {
            let h = range.clamp(h);
            if *slot != h {
                *slot = h;
                changed += 1;
            }
        }

        debug!(changed, "replaced heights");
        if changed > 0 {
            self.listeners.notify();
        }
        changed > 0
    }

    /// Register a callback that runs after every height change.
    pub fn on_heights_changed(&mut self, callback: impl FnMut() + 'static) -> ListenerId {
        self.listeners.add(Box::new(callback))
    }

    /// Unregister a callback. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}
