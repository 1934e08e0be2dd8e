//! The sculptable planet: owns the displaced quad-sphere, answers ray queries
//! against the visible (displaced) surface, and applies brush edits to the
//! height field.

mod listeners;
mod planet;
pub mod raycast;
pub mod sculpt;

pub use listeners::{HeightListeners, HeightsChangedFn, ListenerId};
pub use planet::{Planet, PlanetParams};
pub use raycast::{DisplacedIntersection, Ray, intersect_displaced, wrap_uv};
pub use sculpt::{Brush, SculptDirection, SculptSettings, sculpt};

pub use terra_cubesphere::{MeshError, QuadSphereMesh};
pub use terra_terrain::HeightRange;
