//! Bodies orbiting the planet and the star shell behind them.
//!
//! Orbits are ellipses in a tilted plane whose angular speed falls off with
//! the inverse square of the current radius. It reads well on screen and is
//! not meant to be physically accurate.

mod body;
mod starfield;
mod system;

pub use body::{BodyKind, CelestialBody, OrbitalParams};
pub use starfield::{Starfield, StarfieldParams};
pub use system::CelestialSystem;
