//! Fractal Brownian motion over 3D noise sources.

use noise::NoiseFn;

use crate::perlin::Perlin3;

/// Sum `octaves` layers of reference Perlin noise.
///
/// The first layer has amplitude 0.5 and frequency 1.0; each following layer
/// doubles the frequency and halves the amplitude. Zero octaves yields 0.
pub fn fbm3(x: f64, y: f64, z: f64, octaves: u32) -> f64 {
    fbm3_with(&Perlin3, x, y, z, octaves)
}

/// [`fbm3`] over an arbitrary [`NoiseFn`] source, e.g. a seeded
/// [`noise::Perlin`].
pub fn fbm3_with<S>(source: &S, x: f64, y: f64, z: f64, octaves: u32) -> f64
where
    S: NoiseFn<f64, 3> + ?Sized,
{
    let mut value = 0.0;
    let mut amplitude = 0.5;
    let mut frequency = 1.0;
    for _ in 0..octaves {
        value += amplitude * source.get([x * frequency, y * frequency, z * frequency]);
        frequency *= 2.0;
        amplitude *= 0.5;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise3;

    #[test]
    fn test_zero_octaves_is_zero() {
        assert_eq!(fbm3(1.3, 2.7, -0.4, 0), 0.0);
    }

    #[test]
    fn test_single_octave_is_half_noise() {
        let (x, y, z) = (0.37, 1.91, -4.2);
        assert!((fbm3(x, y, z, 1) - 0.5 * noise3(x, y, z)).abs() < 1e-15);
    }

    #[test]
    fn test_octaves_accumulate() {
        let (x, y, z) = (2.2, -0.8, 5.05);
        let expected = 0.5 * noise3(x, y, z)
            + 0.25 * noise3(x * 2.0, y * 2.0, z * 2.0)
            + 0.125 * noise3(x * 4.0, y * 4.0, z * 4.0);
        assert!((fbm3(x, y, z, 3) - expected).abs() < 1e-15);
    }

    #[test]
    fn test_bounded_by_amplitude_sum() {
        for i in 0..2000 {
            let t = i as f64 * 0.093;
            let v = fbm3(t, -t * 0.4, t * 1.7 + 2.0, 4);
            assert!(v.abs() <= 0.9375 + 1e-12, "fbm {v} exceeds bound at {i}");
        }
    }

    #[test]
    fn test_custom_source_is_used() {
        struct Constant;
        impl NoiseFn<f64, 3> for Constant {
            fn get(&self, _point: [f64; 3]) -> f64 {
                1.0
            }
        }
        assert!((fbm3_with(&Constant, 0.0, 0.0, 0.0, 3) - 0.875).abs() < 1e-15);
    }

    #[test]
    fn test_seeded_source_differs_from_reference() {
        let seeded = noise::Perlin::new(7);
        let a = fbm3(0.3, 1.7, -2.1, 3);
        let b = fbm3_with(&seeded, 0.3, 1.7, -2.1, 3);
        assert!((a - b).abs() > 1e-9);
    }

    #[test]
    fn test_more_octaves_adds_detail() {
        let step = 0.01;
        let mut rough_1 = 0.0;
        let mut rough_5 = 0.0;
        for i in 0..1000 {
            let x = i as f64 * step + 0.123;
            rough_1 += (fbm3(x + step, 0.5, 0.25, 1) - fbm3(x, 0.5, 0.25, 1)).abs();
            rough_5 += (fbm3(x + step, 0.5, 0.25, 5) - fbm3(x, 0.5, 0.25, 5)).abs();
        }
        assert!(
            rough_5 > rough_1,
            "five octaves should be rougher: {rough_5} vs {rough_1}"
        );
    }
}
