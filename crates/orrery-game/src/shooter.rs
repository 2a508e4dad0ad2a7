//! Shooting controller: the Alive → Destroyed state machine
//!
//! Owns the destroyed-set and the burst manager; the render driver only
//! ever sees a read-only mask. Destruction is one-way for the session,
//! re-hitting a destroyed rock is a no-op, and a shot that hits nothing
//! changes no state at all.

use crate::camera::Camera;
use crate::picking::{self, Ray};
use orrery_choreo::ChoreoDriver;
use orrery_core::{RenderProfile, Vec3};
use orrery_debris::{BurstManager, FragmentPool};
use std::collections::HashSet;

/// Unscaled collision radius of one rock; the per-instance render scale
/// multiplies this.
const HIT_RADIUS: f32 = 0.35;

/// Result of a shot that destroyed a rock
#[derive(Debug, Clone, Copy)]
pub struct ShotHit {
    /// Particle id of the destroyed rock
    pub id: u32,
    /// World-space impact point, where the burst spawns
    pub point: Vec3,
    /// Fragments actually animated (may be under the tuned count)
    pub fragments: usize,
}

pub struct Shooter {
    destroyed: HashSet<u32>,
    /// Dense mirror of the destroyed-set for the per-frame hot path
    mask: Vec<bool>,
    bursts: BurstManager,
    /// Session-unique shot counter, mixed into burst seeds
    shots: u32,
}

impl Shooter {
    pub fn new(profile: &RenderProfile, particle_count: usize) -> Self {
        Self {
            destroyed: HashSet::new(),
            mask: vec![false; particle_count],
            bursts: BurstManager::new(profile),
            shots: 0,
        }
    }

    /// Process a pointer shot. Returns the hit when a live rock was
    /// destroyed; a miss, an unmounted scene, or an already-destroyed
    /// target all return None without touching any state.
    pub fn handle_shot(
        &mut self,
        screen_x: f32,
        screen_y: f32,
        viewport_width: f32,
        viewport_height: f32,
        camera: &Camera,
        driver: &ChoreoDriver,
        pool: &mut FragmentPool,
    ) -> Option<ShotHit> {
        let positions = driver.positions();
        if positions.is_empty() || viewport_width <= 0.0 || viewport_height <= 0.0 {
            return None;
        }

        let ray = Ray::from_screen(screen_x, screen_y, viewport_width, viewport_height, camera);
        let hit = picking::pick_nearest(
            &ray,
            positions,
            |id| driver.scale_of(id) * HIT_RADIUS,
            |id| self.is_destroyed(id),
        )?;

        self.destroyed.insert(hit.id);
        if let Some(slot) = self.mask.get_mut(hit.id as usize) {
            *slot = true;
        }

        self.shots = self.shots.wrapping_add(1);
        let seed = self
            .shots
            .wrapping_mul(0x9E37_79B9)
            .wrapping_add(hit.id);
        let fragments = self.bursts.spawn(pool, hit.point, seed);

        Some(ShotHit {
            id: hit.id,
            point: hit.point,
            fragments,
        })
    }

    /// Per-frame debris update: physics, individual expiry, group sweep
    pub fn update(&mut self, pool: &mut FragmentPool, dt: f32) {
        self.bursts.update(pool, dt);
    }

    pub fn is_destroyed(&self, id: u32) -> bool {
        self.destroyed.contains(&id)
    }

    /// Read-only dense mask for the render driver
    pub fn destroyed_mask(&self) -> &[bool] {
        &self.mask
    }

    /// Snapshot of destroyed particle ids for the presentation layer
    pub fn destroyed(&self) -> &HashSet<u32> {
        &self.destroyed
    }

    pub fn destroyed_count(&self) -> usize {
        self.destroyed.len()
    }

    pub fn active_bursts(&self) -> usize {
        self.bursts.active_count()
    }

    /// Teardown: forget all session state and release every burst slot.
    /// Only valid when the whole scene is being rebuilt; destruction is
    /// otherwise one-way.
    pub fn reset(&mut self, pool: &mut FragmentPool) {
        self.destroyed.clear();
        self.mask.iter_mut().for_each(|m| *m = false);
        self.bursts.clear(pool);
        self.shots = 0;
    }
}
