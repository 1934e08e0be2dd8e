//! Layered-noise terrain written into a quad-sphere height buffer.
//!
//! Each vertex is sampled by its unit normal, so the field is continuous
//! across cube faces and reproducible for a given radius and segment count.

use glam::DVec3;
use noise::NoiseFn;
use terra_cubesphere::QuadSphereMesh;
use terra_noise::{Perlin3, fbm3_with};
use tracing::debug;

use crate::HeightRange;

/// Frequencies and amplitudes of the terrain layers.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainParams {
    /// Continental base layer frequency. Default: 0.8.
    pub base_frequency: f64,
    /// Continental base layer amplitude. Default: 3.2.
    pub base_amplitude: f64,
    /// Regional variation frequency. Default: 2.6.
    pub regional_frequency: f64,
    /// Regional variation amplitude. Default: 1.8.
    pub regional_amplitude: f64,
    /// Fine detail frequency. Default: 6.0.
    pub detail_frequency: f64,
    /// Fine detail amplitude. Default: 0.75.
    pub detail_amplitude: f64,
    /// Ridge layer frequency. Default: 3.0.
    pub ridge_frequency: f64,
    /// Ridge layer amplitude. Default: 0.9.
    pub ridge_amplitude: f64,
    /// Frequency of the field that gates the extra detail band. Default: 0.45.
    pub mask_frequency: f64,
    /// Mask value (remapped to `[0, 1]`) where extra detail starts. Default: 0.55.
    pub mask_edge0: f64,
    /// Mask value where extra detail reaches full strength. Default: 0.72.
    pub mask_edge1: f64,
    /// Extra detail frequency. Default: 8.0.
    pub extra_frequency: f64,
    /// Extra detail amplitude before the squared mask. Default: 0.6.
    pub extra_amplitude: f64,
    /// Exponent of the signed power curve applied last. Default: 1.15.
    pub contrast: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            base_frequency: 0.8,
            base_amplitude: 3.2,
            regional_frequency: 2.6,
            regional_amplitude: 1.8,
            detail_frequency: 6.0,
            detail_amplitude: 0.75,
            ridge_frequency: 3.0,
            ridge_amplitude: 0.9,
            mask_frequency: 0.45,
            mask_edge0: 0.55,
            mask_edge1: 0.72,
            extra_frequency: 8.0,
            extra_amplitude: 0.6,
            contrast: 1.15,
        }
    }
}

/// Samples terrain heights from a 3D noise source.
///
/// The default source is the reference [`Perlin3`]; any [`NoiseFn`] (for
/// example a seeded [`noise::Perlin`]) can be substituted.
pub struct TerrainGenerator<S = Perlin3> {
    source: S,
    params: TerrainParams,
}

impl TerrainGenerator<Perlin3> {
    /// Create a generator over the reference Perlin source.
    pub fn new(params: TerrainParams) -> Self {
        Self {
            source: Perlin3,
            params,
        }
    }
}

impl Default for TerrainGenerator<Perlin3> {
    fn default() -> Self {
        Self::new(TerrainParams::default())
    }
}

impl<S: NoiseFn<f64, 3>> TerrainGenerator<S> {
    /// Create a generator over a custom noise source.
    pub fn with_source(source: S, params: TerrainParams) -> Self {
        Self { source, params }
    }

    /// Unclamped height for a unit-sphere normal.
    pub fn sample_height(&self, n: DVec3) -> f64 {
        let p = &self.params;
        let fbm = |freq: f64, offset: f64, octaves: u32| {
            fbm3_with(
                &self.source,
                n.x * freq + offset,
                n.y * freq + offset,
                n.z * freq + offset,
                octaves,
            )
        };

        let n1 = fbm(p.base_frequency, 0.0, 3);
        let n2 = fbm(p.regional_frequency, 100.0, 3);
        let n3 = fbm(p.detail_frequency, 200.0, 2);
        let r0 = fbm(p.ridge_frequency, 300.0, 2);
        let ridged = 1.0 - r0.abs() - 0.5;

        let mut h = n1 * p.base_amplitude
            + n2 * p.regional_amplitude
            + n3 * p.detail_amplitude
            + ridged * (p.ridge_amplitude * 2.0 * 0.5);

        let m01 = 0.5 * (fbm(p.mask_frequency, 400.0, 2) + 1.0);
        let t = ((m01 - p.mask_edge0) / (p.mask_edge1 - p.mask_edge0)).clamp(0.0, 1.0);
        let mask = t * t * (3.0 - 2.0 * t);
        if mask > 0.0 {
            h += fbm(p.extra_frequency, 500.0, 3) * (p.extra_amplitude * mask * mask);
        }

        let sign = if h < 0.0 { -1.0 } else { 1.0 };
        sign * h.abs().powf(p.contrast)
    }

    /// Fill every height of `mesh` from its vertex normal, clamped to `range`.
    ///
    /// A malformed mesh is left untouched.
    pub fn generate(&self, mesh: &mut QuadSphereMesh, range: HeightRange) {
        if let Err(err) = mesh.validate() {
            debug!(%err, "skipping terrain generation");
            return;
        }
        let count = mesh.vertex_count();
        let mut lowest = f32::MAX;
        let mut highest = f32::MIN;
        for i in 0..count {
            let h = range.clamp_f64(self.sample_height(mesh.normal(i)));
            mesh.heights_mut()[i] = h;
            lowest = lowest.min(h);
            highest = highest.max(h);
        }
        debug!(vertices = count, lowest, highest, "generated terrain");
    }

    /// The parameters in use.
    pub fn params(&self) -> &TerrainParams {
        &self.params
    }
}

/// Fill `mesh` with the default terrain, clamped to `range`.
pub fn generate(mesh: &mut QuadSphereMesh, range: HeightRange) {
    TerrainGenerator::default().generate(mesh, range);
}
