//! Deterministic 3D gradient noise for terrain synthesis.
//!
//! Reference Perlin noise over a fixed permutation table plus a fractal
//! Brownian motion helper. Everything here is a pure function of its inputs.

mod fbm;
mod perlin;

pub use fbm::{fbm3, fbm3_with};
pub use perlin::{Perlin3, noise3};
