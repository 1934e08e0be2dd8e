//! Background stars scattered through a spherical shell around the scene.

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Shell bounds and star count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarfieldParams {
    pub count: usize,
    /// Inner radius, outside the widest orbit.
    pub min_distance: f64,
    pub max_distance: f64,
    pub seed: u64,
}

impl Default for StarfieldParams {
    fn default() -> Self {
        Self {
            count: 5000,
            min_distance: 600.0,
            max_distance: 1500.0,
            seed: 0,
        }
    }
}

/// Star positions, deterministic for a given seed.
#[derive(Clone, Debug, PartialEq)]
pub struct Starfield {
    pub stars: Vec<DVec3>,
}

impl Starfield {
    /// Rejection-sample points uniformly in the cube and keep those inside
    /// the shell. An empty or inverted shell yields no stars.
    pub fn generate(params: &StarfieldParams) -> Self {
        let (min, max) = (params.min_distance, params.max_distance);
        if !(min.is_finite() && max.is_finite() && min >= 0.0 && min < max) {
            return Self { stars: Vec::new() };
        }

        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        let mut stars = Vec::with_capacity(params.count);
        while stars.len() < params.count {
            let p = DVec3::new(
                rng.random_range(-max..max),
                rng.random_range(-max..max),
                rng.random_range(-max..max),
            );
            let d = p.length();
            if d >= min && d <= max {
                stars.push(p);
            }
        }
        Self { stars }
    }

    /// Positions narrowed to `f32` for vertex upload.
    pub fn positions_f32(&self) -> Vec<[f32; 3]> {
        self.stars.iter().map(|p| p.as_vec3().to_array()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars_lie_in_shell() {
        let field = Starfield::generate(&StarfieldParams {
            count: 500,
            ..StarfieldParams::default()
        });
        assert_eq!(field.stars.len(), 500);
        assert!(
            field
                .stars
                .iter()
                .all(|p| p.length() >= 600.0 && p.length() <= 1500.0)
        );
    }

    #[test]
    fn test_same_seed_same_sky() {
        let params = StarfieldParams {
            count: 64,
            seed: 42,
            ..StarfieldParams::default()
        };
        assert_eq!(Starfield::generate(&params), Starfield::generate(&params));
        let other = StarfieldParams { seed: 43, ..params };
        assert_ne!(Starfield::generate(&params), Starfield::generate(&other));
    }

    #[test]
    fn test_inverted_shell_is_empty() {
        let field = Starfield::generate(&StarfieldParams {
            min_distance: 10.0,
            max_distance: 5.0,
            ..StarfieldParams::default()
        });
        assert!(field.stars.is_empty());
    }

    #[test]
    fn test_f32_positions_match() {
        let field = Starfield::generate(&StarfieldParams {
            count: 3,
            ..StarfieldParams::default()
        });
        let narrow = field.positions_f32();
        assert_eq!(narrow.len(), 3);
        assert!((narrow[0][0] as f64 - field.stars[0].x).abs() < 1e-3);
    }
}
