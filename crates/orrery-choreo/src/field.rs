//! Particle field: one immutable record per particle
//!
//! Built exactly once from a ring table and a seed. The particle `id` is
//! dense (0..total) and doubles as the instanced-buffer slot, so the flat
//! Vec here is the arena and the index is the identity.

use crate::ring::{self, Ring};
use orrery_core::{Result, SeededRng, Vec3};

/// Per-particle state, immutable for the session
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleState {
    /// Dense index; also the instanced transform buffer slot
    pub id: u32,
    pub ring_index: usize,
    /// Initial angular position on the ring, evenly spaced
    pub angle_on_ring: f32,
    /// Reference position for the Scattered phase
    pub scattered_pos: Vec3,
    /// Reference position for the Dissolving/Drifting phases
    pub dispersed_pos: Vec3,
    /// Per-particle stagger in [0, 0.3)
    pub phase_offset: f32,
    /// Base render scale in [0.6, 1.2)
    pub scale: f32,
    /// Small per-axis self-spin, rad/s
    pub rotation_speed: Vec3,
    /// Seed for the drifting-phase wander bands
    pub seed: u32,
}

/// The full particle arena plus the ring table it was built from
pub struct ParticleField {
    particles: Vec<ParticleState>,
    rings: Vec<Ring>,
}

impl ParticleField {
    /// Build every particle record from the ring table and seed.
    /// Deterministic: the same `(rings, seed)` pair reproduces the field
    /// exactly.
    pub fn new(rings: Vec<Ring>, seed: u32) -> Result<Self> {
        if rings.is_empty() {
            return Err(orrery_core::OrreryError::EmptyRingTable);
        }
        for ring in &rings {
            ring.validate()?;
        }

        let total: usize = rings.iter().map(|r| r.particle_count).sum();
        let mut particles = Vec::with_capacity(total);
        let mut rng = SeededRng::new(seed);
        let mut id: u32 = 0;

        for (ring_index, ring) in rings.iter().enumerate() {
            for slot in 0..ring.particle_count {
                let angle = ring::slot_angle(slot, ring.particle_count);
                let home = ring::position_on_ring(ring, angle);

                // Scattered: a wide jittered cloud loosely around the home
                // point so the pre-formation drift already aims somewhere
                // sensible.
                let scattered_pos = home
                    + Vec3::new(
                        rng.range(-9.0, 9.0),
                        rng.range(-5.0, 5.0),
                        rng.range(-9.0, 9.0),
                    );

                // Dispersed: pushed outward from center with a tighter jitter
                let dispersed_pos = home * rng.range(1.6, 2.4)
                    + Vec3::new(
                        rng.range(-2.0, 2.0),
                        rng.range(-1.5, 1.5),
                        rng.range(-2.0, 2.0),
                    );

                particles.push(ParticleState {
                    id,
                    ring_index,
                    angle_on_ring: angle,
                    scattered_pos,
                    dispersed_pos,
                    phase_offset: rng.range(0.0, 0.3),
                    scale: rng.range(0.6, 1.2),
                    rotation_speed: Vec3::new(
                        rng.range(-0.8, 0.8),
                        rng.range(-0.8, 0.8),
                        rng.range(-0.8, 0.8),
                    ),
                    seed: id.wrapping_mul(0x9E37_79B9).wrapping_add(seed),
                });
                id += 1;
            }
        }

        Ok(Self { particles, rings })
    }

    pub fn particles(&self) -> &[ParticleState] {
        &self.particles
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Live assembled-formation position at `time`.
    ///
    /// Self-spin on the ring, then the ring tumbling as a rigid body with
    /// sequential X, Y, Z rotations (this exact order is what the formation's
    /// look depends on; the rotations do not commute), then the orbital
    /// offset of the ring center.
    pub fn assembled_position(&self, particle: &ParticleState, time: f32) -> Vec3 {
        let ring = &self.rings[particle.ring_index];
        let angle = particle.angle_on_ring + time * ring.rotation_speed * 0.5;
        ring::position_on_ring(ring, angle)
            .rotated_x(time * ring.rotation_speed * 0.3)
            .rotated_y(time * ring.rotation_speed * 0.5)
            .rotated_z(time * ring.rotation_speed * 0.2 * ring.orbital_direction)
            + ring::orbital_offset(ring, time)
    }
}
