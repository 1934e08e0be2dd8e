//! The set of bodies updated together each frame.

use glam::DVec3;
use tracing::debug;

use crate::body::{BodyKind, CelestialBody};

/// All orbiting bodies, updated in a fixed order.
#[derive(Clone, Debug, PartialEq)]
pub struct CelestialSystem {
    bodies: Vec<CelestialBody>,
}

impl CelestialSystem {
    /// Sun, Saturn, Mars and Moon with their stock parameters.
    pub fn new() -> Self {
        let bodies: Vec<CelestialBody> = BodyKind::ALL.into_iter().map(CelestialBody::new).collect();
        debug!(count = bodies.len(), "celestial system created");
        Self { bodies }
    }

    pub fn from_bodies(bodies: Vec<CelestialBody>) -> Self {
        Self { bodies }
    }

    /// Advance every body by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        for body in &mut self.bodies {
            body.update(dt);
        }
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn get(&self, kind: BodyKind) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.kind == kind)
    }

    /// Unit direction from the planet center toward the sun, used for lighting.
    pub fn sun_direction(&self) -> Option<DVec3> {
        self.get(BodyKind::Sun)?.position().try_normalize()
    }
}

impl Default for CelestialSystem {
    fn default() -> Self {
        Self::new()
    }
}
