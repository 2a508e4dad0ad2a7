//! Frame clock driven by host-supplied deltas
//!
//! The host's render loop hands in a delta per frame; the clock never reads
//! wall time itself, which keeps the whole simulation replayable from a
//! scripted sequence of ticks.

/// Tracks elapsed simulation time across host-driven ticks
pub struct FrameClock {
    /// Total elapsed simulation time in seconds
    elapsed: f64,
    /// Sanitized delta of the most recent tick, in seconds
    delta: f32,
    /// Number of ticks since construction or reset
    frame: u64,
}

/// Cap on a single frame delta; anything longer is a stall, not animation time
const MAX_DELTA: f32 = 0.25;

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            delta: 0.0,
            frame: 0,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame. NaN, negative, and stall-length deltas are
    /// sanitized so they cannot poison downstream kinematics.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() && dt > 0.0 {
            dt.min(MAX_DELTA)
        } else {
            0.0
        };
        self.delta = dt;
        self.elapsed += dt as f64;
        self.frame += 1;
    }

    /// Elapsed simulation time in seconds (f32 is plenty for a session)
    pub fn time(&self) -> f32 {
        self.elapsed as f32
    }

    pub fn time_ms(&self) -> f32 {
        (self.elapsed * 1000.0) as f32
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_deltas() {
        let mut clock = FrameClock::new();
        for _ in 0..10 {
            clock.tick(0.1);
        }
        assert!((clock.time() - 1.0).abs() < 1e-5);
        assert_eq!(clock.frame(), 10);
        assert!((clock.time_ms() - 1000.0).abs() < 1e-2);
    }

    #[test]
    fn sanitizes_bad_deltas() {
        let mut clock = FrameClock::new();
        clock.tick(f32::NAN);
        assert_eq!(clock.delta(), 0.0);
        clock.tick(-1.0);
        assert_eq!(clock.delta(), 0.0);
        clock.tick(10.0);
        assert_eq!(clock.delta(), MAX_DELTA);
        assert!(clock.time().is_finite());
    }

    #[test]
    fn reset_returns_to_zero() {
        let mut clock = FrameClock::new();
        clock.tick(0.016);
        clock.reset();
        assert_eq!(clock.time(), 0.0);
        assert_eq!(clock.frame(), 0);
    }
}
