//! The composed scene: everything the host render loop talks to
//!
//! Construction resolves the device tier once and builds the particle
//! field, driver, pool and shooter from it. Per frame the host calls
//! `tick(dt, scroll_progress)` and reads the two instance batches; pointer
//! input goes through `pointer_down`. Teardown and rebuild are idempotent.

use crate::camera::Camera;
use crate::shooter::{Shooter, ShotHit};
use orrery_choreo::ring::{desktop_rings, mobile_rings};
use orrery_choreo::{ChoreoDriver, ParticleField, Ring, RockInstance};
use orrery_core::{FrameClock, RenderProfile, Result};
use orrery_debris::{FragmentInstance, FragmentPool};

pub struct OrreryScene {
    profile: RenderProfile,
    field: ParticleField,
    driver: ChoreoDriver,
    pool: FragmentPool,
    shooter: Shooter,
    clock: FrameClock,
    pub camera: Camera,
}

impl OrreryScene {
    /// Build a scene with the built-in ring table for the viewport tier.
    pub fn new(is_mobile: bool, seed: u32) -> Result<Self> {
        let profile = RenderProfile::from_viewport(is_mobile);
        let rings = if is_mobile {
            mobile_rings()
        } else {
            desktop_rings()
        };
        Self::with_rings(profile, rings, seed)
    }

    /// Build a scene from an explicit ring table (e.g. parsed from TOML).
    pub fn with_rings(profile: RenderProfile, rings: Vec<Ring>, seed: u32) -> Result<Self> {
        let field = ParticleField::new(rings, seed)?;
        let driver = ChoreoDriver::new(&profile, field.len());
        let pool = FragmentPool::new(profile.fragment_pool_size);
        let shooter = Shooter::new(&profile, field.len());
        println!(
            "[scene] {} particles across {} rings ({:?} tier)",
            field.len(),
            field.rings().len(),
            profile.tier
        );
        Ok(Self {
            profile,
            field,
            driver,
            pool,
            shooter,
            clock: FrameClock::new(),
            camera: Camera::new(),
        })
    }

    /// Advance one frame. Choreography first (phase and center fixed for
    /// the whole frame, buffer fully written before its dirty flag), then
    /// the debris overlay.
    pub fn tick(&mut self, dt: f32, scroll_progress: f32) {
        self.clock.tick(dt);
        let dt = self.clock.delta();
        self.driver.tick(
            &self.field,
            self.shooter.destroyed_mask(),
            scroll_progress,
            self.clock.time(),
            dt,
        );
        self.shooter.update(&mut self.pool, dt);
    }

    /// Pointer shot in screen pixels. A spawned burst is visible in the
    /// next frame's fragment batch; a destroyed rock disappears from the
    /// next choreography frame that reads the mask.
    pub fn pointer_down(
        &mut self,
        screen_x: f32,
        screen_y: f32,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Option<ShotHit> {
        self.camera.set_viewport(viewport_width, viewport_height);
        self.shooter.handle_shot(
            screen_x,
            screen_y,
            viewport_width,
            viewport_height,
            &self.camera,
            &self.driver,
            &mut self.pool,
        )
    }

    /// Instance batch for the rock draw call
    pub fn rock_instances(&self) -> &[RockInstance] {
        self.driver.instances()
    }

    /// True when the rock batch changed since the last take
    pub fn take_rocks_dirty(&mut self) -> bool {
        self.driver.take_dirty()
    }

    /// Instance batch for the fragment draw call, packed on demand
    pub fn fragment_instances(&mut self) -> &[FragmentInstance] {
        self.pool.pack_instances()
    }

    pub fn profile(&self) -> &RenderProfile {
        &self.profile
    }

    pub fn shooter(&self) -> &Shooter {
        &self.shooter
    }

    pub fn particle_count(&self) -> usize {
        self.field.len()
    }

    /// Tear down session state so the host can rebuild cleanly (e.g. after
    /// a breakpoint crossing). Safe to call repeatedly.
    pub fn reset(&mut self) {
        self.driver.reset();
        self.shooter.reset(&mut self.pool);
        self.pool.release_all();
        self.clock.reset();
        println!("[scene] reset");
    }
}
