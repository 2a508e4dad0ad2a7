//! Per-frame render driver: choreography positions → instanced transforms
//!
//! Owns the shared instance buffer for the rock batch. Each tick computes
//! phase and formation center once, runs the interpolator per particle,
//! and marks the buffer dirty exactly once after the loop so the upload
//! side sees at most one dirty transition per frame.

use crate::field::ParticleField;
use crate::motion;
use crate::phase::{calculate_phase, sphere_center, Phase};
use bytemuck::{Pod, Zeroable};
use orrery_core::{RenderProfile, Vec3};

/// GPU instance data for one rock — two vec4 rows, 32 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct RockInstance {
    /// xyz = world position, w = uniform scale
    pub pos_scale: [f32; 4],
    /// xyz = euler rotation, w unused (pads the row to a vec4)
    pub rotation: [f32; 4],
}

impl RockInstance {
    fn hidden() -> Self {
        Self {
            pos_scale: [0.0; 4],
            rotation: [0.0; 4],
        }
    }
}

/// Pulse amplitude of the render scale per phase
fn pulse_amplitude(phase: Phase) -> f32 {
    match phase {
        Phase::Assembled => 0.12,
        Phase::Dissolving => 0.08,
        _ => 0.05,
    }
}

pub struct ChoreoDriver {
    instances: Vec<RockInstance>,
    /// Continuously accumulated per-particle rotation
    rotations: Vec<Vec3>,
    /// World positions of the last computed frame, for hit testing
    positions: Vec<Vec3>,
    frame: u64,
    dirty: bool,
    frame_skip: bool,
}

impl ChoreoDriver {
    pub fn new(profile: &RenderProfile, particle_count: usize) -> Self {
        Self {
            instances: vec![RockInstance::hidden(); particle_count],
            rotations: vec![Vec3::ZERO; particle_count],
            positions: vec![Vec3::ZERO; particle_count],
            frame: 0,
            dirty: false,
            frame_skip: profile.frame_skip,
        }
    }

    /// Advance one frame. `destroyed` is a read-only mask indexed by particle
    /// id; destroyed slots render at scale zero without running the
    /// interpolator. On the low-power tier every other call is skipped and
    /// leaves the buffer untouched.
    pub fn tick(
        &mut self,
        field: &ParticleField,
        destroyed: &[bool],
        scroll_progress: f32,
        time: f32,
        dt: f32,
    ) {
        self.frame += 1;
        if self.frame_skip && self.frame % 2 == 0 {
            return;
        }

        // Phase and center are per-frame, not per-particle: every particle
        // in this frame sees the same values.
        let (phase, phase_progress) = calculate_phase(scroll_progress);
        let mut center = sphere_center(scroll_progress);
        if phase == Phase::Drifting {
            // Blend the global offset out over the first half of Drifting
            center *= 1.0 - (phase_progress * 2.0).min(1.0);
        }
        let pulse = pulse_amplitude(phase);

        for particle in field.particles() {
            let idx = particle.id as usize;
            if destroyed.get(idx).copied().unwrap_or(false) {
                self.instances[idx] = RockInstance::hidden();
                continue;
            }

            let pos = motion::particle_position(field, particle, phase, phase_progress, time)
                + center;
            let rot = self.rotations[idx] + particle.rotation_speed * dt;
            self.rotations[idx] = rot;
            self.positions[idx] = pos;

            let scale =
                particle.scale * (1.0 + pulse * (time * 2.0 + particle.id as f32 * 0.5).sin());
            self.instances[idx] = RockInstance {
                pos_scale: [pos.x, pos.y, pos.z, scale],
                rotation: [rot.x, rot.y, rot.z, 0.0],
            };
        }

        // Single dirty transition per frame
        self.dirty = true;
    }

    /// The packed instance batch for the rock draw call
    pub fn instances(&self) -> &[RockInstance] {
        &self.instances
    }

    /// World positions from the last computed frame, indexed by particle id
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Render scale of one slot (zero while destroyed)
    pub fn scale_of(&self, id: u32) -> f32 {
        self.instances
            .get(id as usize)
            .map(|i| i.pos_scale[3])
            .unwrap_or(0.0)
    }

    /// Consume the dirty flag; true means the buffer changed since the last
    /// take and needs re-upload.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Clear transforms and counters for teardown or a tier rebuild
    pub fn reset(&mut self) {
        for inst in &mut self.instances {
            *inst = RockInstance::hidden();
        }
        for rot in &mut self.rotations {
            *rot = Vec3::ZERO;
        }
        for pos in &mut self.positions {
            *pos = Vec3::ZERO;
        }
        self.frame = 0;
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::Ring;
    use orrery_core::RenderProfile;

    fn small_field() -> ParticleField {
        ParticleField::new(
            vec![Ring {
                radius: 2.0,
                particle_count: 6,
                ..Ring::default()
            }],
            42,
        )
        .unwrap()
    }

    #[test]
    fn instance_layout() {
        assert_eq!(std::mem::size_of::<RockInstance>(), 32);
        assert_eq!(std::mem::align_of::<RockInstance>(), 4);
    }

    #[test]
    fn tick_fills_buffer_and_sets_dirty_once() {
        let field = small_field();
        let profile = RenderProfile::from_viewport(false);
        let mut driver = ChoreoDriver::new(&profile, field.len());
        assert!(!driver.take_dirty());

        driver.tick(&field, &vec![false; field.len()], 0.4, 1.0, 0.016);
        assert!(driver.take_dirty());
        assert!(!driver.take_dirty());
        for inst in driver.instances() {
            assert!(inst.pos_scale[3] > 0.0);
        }
    }

    #[test]
    fn destroyed_slots_render_at_zero_scale() {
        let field = small_field();
        let profile = RenderProfile::from_viewport(false);
        let mut driver = ChoreoDriver::new(&profile, field.len());
        let mut destroyed = vec![false; field.len()];
        destroyed[2] = true;

        driver.tick(&field, &destroyed, 0.4, 1.0, 0.016);
        assert_eq!(driver.scale_of(2), 0.0);
        assert!(driver.scale_of(1) > 0.0);
        // Stays suppressed on every subsequent frame
        driver.tick(&field, &destroyed, 0.5, 2.0, 0.016);
        assert_eq!(driver.scale_of(2), 0.0);
    }

    #[test]
    fn mobile_tier_skips_every_other_frame() {
        let field = small_field();
        let profile = RenderProfile::from_viewport(true);
        let mut driver = ChoreoDriver::new(&profile, field.len());
        let none = vec![false; field.len()];

        driver.tick(&field, &none, 0.4, 1.0, 0.016);
        assert!(driver.take_dirty());
        driver.tick(&field, &none, 0.4, 1.016, 0.016);
        assert!(!driver.take_dirty());
        driver.tick(&field, &none, 0.4, 1.032, 0.016);
        assert!(driver.take_dirty());
    }

    #[test]
    fn rotation_accumulates_across_frames() {
        let field = small_field();
        let profile = RenderProfile::from_viewport(false);
        let mut driver = ChoreoDriver::new(&profile, field.len());
        let none = vec![false; field.len()];

        driver.tick(&field, &none, 0.4, 0.0, 0.1);
        let first = driver.instances()[0].rotation;
        driver.tick(&field, &none, 0.4, 0.1, 0.1);
        let second = driver.instances()[0].rotation;
        let spin = field.particles()[0].rotation_speed;
        assert!((second[0] - first[0] - spin.x * 0.1).abs() < 1e-5);
    }

    #[test]
    fn reset_clears_everything() {
        let field = small_field();
        let profile = RenderProfile::from_viewport(false);
        let mut driver = ChoreoDriver::new(&profile, field.len());
        driver.tick(&field, &vec![false; field.len()], 0.4, 1.0, 0.016);
        driver.reset();
        assert_eq!(driver.frame(), 0);
        assert!(!driver.take_dirty());
        assert_eq!(driver.scale_of(0), 0.0);
    }
}
