//! Stroke cadence while a sculpt gesture is held.

/// Lets a stroke through when strictly more than `1 / rate_hz` seconds have
/// passed since the last one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SculptLimiter {
    interval: f64,
    last: f64,
}

impl SculptLimiter {
    /// A non-positive or non-finite rate never throttles.
    pub fn new(rate_hz: f64) -> Self {
        let interval = if rate_hz.is_finite() && rate_hz > 0.0 {
            1.0 / rate_hz
        } else {
            0.0
        };
        Self {
            interval,
            last: f64::NEG_INFINITY,
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Whether a stroke may be applied at `now`.
    pub fn ready(&self, now: f64) -> bool {
        now - self.last > self.interval
    }

    /// Record a stroke (or the start of a gesture) at `now`.
    pub fn mark(&mut self, now: f64) {
        self.last = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_stroke_is_ready() {
        let limiter = SculptLimiter::new(30.0);
        assert!(limiter.ready(0.0));
    }

    #[test]
    fn test_waits_strictly_longer_than_interval() {
        // At 8 Hz the interval and these times are exact in binary.
        let mut limiter = SculptLimiter::new(8.0);
        limiter.mark(1.0);
        assert!(!limiter.ready(1.0625));
        assert!(!limiter.ready(1.125));
        assert!(limiter.ready(1.1251));
    }

    #[test]
    fn test_rate_bounds_strokes_per_second() {
        let mut limiter = SculptLimiter::new(30.0);
        let mut strokes = 0;
        for frame in 0..120 {
            let now = frame as f64 / 120.0;
            if limiter.ready(now) {
                limiter.mark(now);
                strokes += 1;
            }
        }
        assert!(strokes <= 31 && strokes >= 20, "{strokes} strokes in one second");
    }

    #[test]
    fn test_zero_rate_never_throttles() {
        let mut limiter = SculptLimiter::new(0.0);
        limiter.mark(5.0);
        assert!(limiter.ready(5.000_001));
    }
}
