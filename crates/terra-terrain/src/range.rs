//! Inclusive height bounds shared by generation and sculpting.

/// Inclusive `[min, max]` bounds for every vertex height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightRange {
    /// Lowest allowed height (below the base radius when negative).
    pub min: f32,
    /// Highest allowed height.
    pub max: f32,
}

impl HeightRange {
    /// Create a range.
    ///
    /// # Panics
    ///
    /// Panics if either bound is not finite or `min > max`.
    pub fn new(min: f32, max: f32) -> Self {
        assert!(
            min.is_finite() && max.is_finite(),
            "height bounds must be finite, got [{min}, {max}]"
        );
        assert!(min <= max, "min height {min} exceeds max height {max}");
        Self { min, max }
    }

    /// Clamp `h` into the range.
    #[inline]
    pub fn clamp(&self, h: f32) -> f32 {
        h.clamp(self.min, self.max)
    }

    /// Clamp a double-precision height and narrow it to `f32`.
    ///
    /// Both bounds are `f32` values, so narrowing after the clamp cannot
    /// leave the range.
    #[inline]
    pub fn clamp_f64(&self, h: f64) -> f32 {
        h.clamp(self.min as f64, self.max as f64) as f32
    }

    /// Whether `h` lies within the bounds (inclusive).
    #[inline]
    pub fn contains(&self, h: f32) -> bool {
        (self.min..=self.max).contains(&h)
    }
}

impl Default for HeightRange {
    fn default() -> Self {
        Self {
            min: -3.75,
            max: 3.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_is_inclusive() {
        let r = HeightRange::new(-1.0, 2.0);
        assert_eq!(r.clamp(-1.0), -1.0);
        assert_eq!(r.clamp(2.0), 2.0);
        assert_eq!(r.clamp(5.0), 2.0);
        assert_eq!(r.clamp(-9.0), -1.0);
        assert!(r.contains(-1.0) && r.contains(2.0));
        assert!(!r.contains(2.0001));
    }

    #[test]
    fn test_clamp_f64_stays_in_range() {
        let r = HeightRange::default();
        for h in [-3.750_000_1_f64, 3.000_000_000_1, 2.999_999_99, -100.0, 100.0] {
            assert!(r.contains(r.clamp_f64(h)), "{h} escaped the range");
        }
    }

    #[test]
    #[should_panic(expected = "exceeds max height")]
    fn test_inverted_range_panics() {
        HeightRange::new(1.0, -1.0);
    }
}
