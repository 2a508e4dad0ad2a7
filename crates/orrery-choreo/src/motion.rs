//! Per-particle position interpolator — the body of the phase state machine
//!
//! Pure function of (particle, phase, phase progress, time). Each phase
//! blends between the particle's reference points and its live assembled
//! position, with a per-particle stagger so transitions cascade instead of
//! snapping in unison, and an ambient float layered on top in every phase.
//!
//! Small position offsets at phase boundaries are intentional (staggering);
//! only gross jumps are defects, and the tests guard against those.

use crate::field::{ParticleField, ParticleState};
use crate::phase::Phase;
use orrery_core::{ease_out_cubic, lerp, Vec3};

/// Per-particle-delayed renormalization of phase progress. Particles with a
/// larger `phase_offset` start their transition later.
pub fn staggered_progress(phase_progress: f32, phase_offset: f32) -> f32 {
    let p = if phase_progress.is_nan() {
        0.0
    } else {
        phase_progress.clamp(0.0, 1.0)
    };
    let delay = phase_offset * 0.2;
    ((p - delay) / (1.0 - delay)).clamp(0.0, 1.0)
}

/// Ambient floating sinusoid, continuous across every phase; only its
/// amplitude changes phase to phase.
fn ambient_float(particle: &ParticleState, time: f32, amplitude: f32) -> Vec3 {
    let ph = particle.id as f32 * 0.37 + particle.phase_offset * 10.0;
    Vec3::new(
        (time * 0.8 + ph).sin(),
        (time * 0.6 + ph * 1.3).cos() * 0.8,
        (time * 0.7 + ph * 0.7).sin(),
    ) * amplitude
}

/// Moving wander target for the Drifting phase: three frequency bands per
/// axis, phase-shifted by the particle's seed and id so no two particles
/// trace the same path.
fn wander_target(particle: &ParticleState, time: f32) -> Vec3 {
    let s = (particle.seed % 1000) as f32 * 0.01;
    let i = particle.id as f32;
    particle.dispersed_pos
        + Vec3::new(
            (time * 0.32 + s).sin() * 1.8
                + (time * 0.74 + i * 0.13).sin() * 0.7
                + (time * 1.31 + s * 2.0).cos() * 0.3,
            (time * 0.27 + s * 1.7).cos() * 1.5
                + (time * 0.69 + i * 0.21).sin() * 0.6
                + (time * 1.13 + s).sin() * 0.25,
            (time * 0.35 + s * 0.9).sin() * 1.8
                + (time * 0.66 + i * 0.17).cos() * 0.7
                + (time * 1.22 + s * 1.4).sin() * 0.3,
        )
}

/// How far the Scattered phase pre-drifts toward formation
const SCATTERED_PULL: f32 = 0.1;
/// Outward push magnitude at full Dissolving progress
const DISSOLVE_PUSH: f32 = 0.6;

/// Compute one particle's position for the current frame.
pub fn particle_position(
    field: &ParticleField,
    particle: &ParticleState,
    phase: Phase,
    phase_progress: f32,
    time: f32,
) -> Vec3 {
    let sp = staggered_progress(phase_progress, particle.phase_offset);
    let assembled = field.assembled_position(particle, time);

    match phase {
        Phase::Scattered => {
            // Already drifting slightly toward formation before Forming begins
            let pos = particle
                .scattered_pos
                .lerp(&assembled, sp * SCATTERED_PULL);
            pos + ambient_float(particle, time, 0.3)
        }
        Phase::Forming => {
            // Pick up where Scattered left off (at SCATTERED_PULL of the way)
            // and ease the rest; the float fades as the particle locks in.
            let t = lerp(SCATTERED_PULL, 1.0, ease_out_cubic(sp));
            let pos = particle.scattered_pos.lerp(&assembled, t);
            pos + ambient_float(particle, time, 0.3 * (1.0 - sp))
        }
        Phase::Assembled => assembled + ambient_float(particle, time, 0.08),
        Phase::Dissolving => {
            let t = ease_out_cubic(sp);
            let mut pos = assembled.lerp(&particle.dispersed_pos, t);
            // Extra outward push beyond the precomputed dispersed target
            pos += pos.normalized() * (t * DISSOLVE_PUSH);
            pos + ambient_float(particle, time, 0.1 + 0.3 * t)
        }
        Phase::Drifting => {
            let target = wander_target(particle, time) + particle.dispersed_pos.normalized() * DISSOLVE_PUSH;
            let pos = particle
                .dispersed_pos
                .lerp(&target, ease_out_cubic(sp));
            pos + ambient_float(particle, time, 0.4)
        }
    }
}
