//! Procedural terrain for the quad-sphere: layered fBm, ridges, and a
//! masked detail band, written into the mesh height buffer.

mod generator;
mod range;

pub use generator::{TerrainGenerator, TerrainParams, generate};
pub use range::HeightRange;
