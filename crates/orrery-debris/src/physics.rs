//! Burst physics: semi-implicit Euler with lifetime fade and shrink
//!
//! DRAG and angular damping are flat per-frame multipliers, not
//! time-normalized decay. That is deliberate: the reference look is
//! frame-rate-dependent, and normalizing would change it (see DESIGN.md).

use crate::fragment::{Fragment, FragmentPool};
use orrery_core::{SeededRng, Vec3};

pub const GRAVITY: f32 = -12.0;
pub const DRAG: f32 = 0.97;
pub const ANGULAR_DAMPING: f32 = 0.99;
pub const MAX_ANGULAR_VELOCITY: f32 = 12.0;
pub const MIN_BURST_FORCE: f32 = 4.0;
pub const MAX_BURST_FORCE: f32 = 10.0;

/// Fraction of the lifetime after which opacity fades out
const FADE_START: f32 = 0.7;

/// Integrate one fragment by `dt` seconds. Returns false once the fragment's
/// lifetime has elapsed and the slot should go back to the pool.
pub fn step(fragment: &mut Fragment, dt: f32) -> bool {
    fragment.velocity.y += GRAVITY * dt;
    fragment.velocity *= DRAG;
    fragment.position += fragment.velocity * dt;
    fragment.rotation += fragment.angular_velocity * dt;
    fragment.angular_velocity *= ANGULAR_DAMPING;
    fragment.elapsed_ms += dt * 1000.0;

    let progress = fragment.age_ratio();
    fragment.opacity = if progress > FADE_START {
        1.0 - (progress - FADE_START) / (1.0 - FADE_START)
    } else {
        1.0
    };
    fragment.scale = (fragment.scale * (1.0 - dt * 0.3)).max(0.1);

    fragment.elapsed_ms < fragment.lifetime_ms
}

/// Integrate every active fragment; returns the slots that expired this
/// frame so the caller can release them. The result Vec is the one bounded
/// per-frame allocation in the debris path.
pub fn step_all(pool: &mut FragmentPool, dt: f32) -> Vec<usize> {
    let mut expired = Vec::new();
    for (idx, fragment) in pool.slots_mut().iter_mut().enumerate() {
        if fragment.active && !step(fragment, dt) {
            expired.push(idx);
        }
    }
    expired
}

/// Seed a fragment's kinematic state for an explosion at `origin`:
/// a uniform spherical burst direction, a force in [4, 10], an upward bias
/// so the burst pops before it falls, and independent per-axis tumble.
pub fn init_burst_velocity(fragment: &mut Fragment, origin: Vec3, rng: &mut SeededRng) {
    let dir = rng.sphere_point();
    let force = rng.range(MIN_BURST_FORCE, MAX_BURST_FORCE);
    let mut velocity = dir * force;
    velocity.y = velocity.y * 0.8 + 3.0;

    fragment.position = origin;
    fragment.velocity = velocity;
    fragment.rotation = Vec3::new(
        rng.range(0.0, std::f32::consts::TAU),
        rng.range(0.0, std::f32::consts::TAU),
        rng.range(0.0, std::f32::consts::TAU),
    );
    fragment.angular_velocity = clamp_length(
        Vec3::new(
            rng.range(-6.0, 6.0),
            rng.range(-6.0, 6.0),
            rng.range(-6.0, 6.0),
        ),
        MAX_ANGULAR_VELOCITY,
    );
}

fn clamp_length(v: Vec3, max: f32) -> Vec3 {
    let len = v.length();
    if len > max {
        v * (max / len)
    } else {
        v
    }
}
