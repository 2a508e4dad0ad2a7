//! Lightweight xorshift32 PRNG — no external crate needed
//!
//! Everything procedural in the engine (particle jitter, burst velocities,
//! wander seeds) draws from this stream, so the same seed reproduces the
//! same layout across sessions and tests.

use crate::types::Vec3;
use std::f32::consts::TAU;

pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // Take the top 24 bits so the result stays strictly below 1.0
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns a float in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Returns a uniformly distributed point on the unit sphere.
    ///
    /// Inverse-CDF form: `theta = u·2π`, `phi = acos(2v − 1)`, which is the
    /// same distribution burst velocities are defined in.
    pub fn sphere_point(&mut self) -> Vec3 {
        let theta = self.next_f32() * TAU;
        let phi = (2.0 * self.next_f32() - 1.0).acos();
        let sin_phi = phi.sin();
        Vec3::new(sin_phi * theta.cos(), phi.cos(), sin_phi * theta.sin())
    }
}
