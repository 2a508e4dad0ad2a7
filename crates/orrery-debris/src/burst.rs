//! Burst bookkeeping: concurrent-explosion cap and group sweeping
//!
//! A burst is a transient record referencing pool slots, not separately
//! owned memory. The manager enforces the device-tier concurrency cap by
//! evicting the oldest burst (its fragments vanish early) rather than
//! dropping the newest user action.

use crate::fragment::FragmentPool;
use crate::physics;
use orrery_core::{ExplosionTuning, RenderProfile, SeededRng, Vec3};
use std::collections::VecDeque;

/// One active explosion
#[derive(Debug, Clone)]
pub struct Burst {
    pub id: u64,
    pub origin: Vec3,
    /// Pool slots this burst acquired (possibly fewer than tuned for)
    pub slots: Vec<usize>,
    /// Manager time at spawn, milliseconds
    pub start_ms: f32,
    /// Group lifetime: the longest any member fragment can live
    pub lifetime_ms: f32,
}

pub struct BurstManager {
    bursts: VecDeque<Burst>,
    max_concurrent: usize,
    tuning: ExplosionTuning,
    elapsed_ms: f32,
    next_id: u64,
}

impl BurstManager {
    pub fn new(profile: &RenderProfile) -> Self {
        Self {
            bursts: VecDeque::new(),
            max_concurrent: profile.max_explosions,
            tuning: profile.explosion,
            elapsed_ms: 0.0,
            next_id: 0,
        }
    }

    /// Spawn an explosion at `origin`, drawing fragments from `pool`.
    /// Returns the number of fragments actually animated; fewer than tuned
    /// means the pool was under pressure, which is fine.
    pub fn spawn(&mut self, pool: &mut FragmentPool, origin: Vec3, seed: u32) -> usize {
        if self.bursts.len() >= self.max_concurrent {
            if let Some(oldest) = self.bursts.pop_front() {
                for idx in oldest.slots {
                    pool.release(idx);
                }
            }
        }

        let slots = pool.acquire(self.tuning.fragment_count);
        let mut rng = SeededRng::new(seed);
        let half_variance = self.tuning.lifetime_variance_ms / 2.0;

        for &idx in &slots {
            if let Some(fragment) = pool.get_mut(idx) {
                fragment.lifetime_ms =
                    self.tuning.lifetime_ms + rng.range(-half_variance, half_variance);
                physics::init_burst_velocity(fragment, origin, &mut rng);
            }
        }

        let spawned = slots.len();
        self.bursts.push_back(Burst {
            id: self.next_id,
            origin,
            slots,
            start_ms: self.elapsed_ms,
            lifetime_ms: self.tuning.lifetime_ms + half_variance,
        });
        self.next_id += 1;
        spawned
    }

    /// Per-frame update: integrate physics, release fragments that expired
    /// individually, then sweep bursts whose group lifetime has elapsed
    /// (covers slots whose fragments already self-expired).
    pub fn update(&mut self, pool: &mut FragmentPool, dt: f32) {
        self.elapsed_ms += dt * 1000.0;

        for idx in physics::step_all(pool, dt) {
            pool.release(idx);
        }

        let now = self.elapsed_ms;
        self.bursts.retain(|burst| {
            if now - burst.start_ms >= burst.lifetime_ms {
                for &idx in &burst.slots {
                    pool.release(idx);
                }
                false
            } else {
                true
            }
        });
    }

    pub fn active_count(&self) -> usize {
        self.bursts.len()
    }

    pub fn bursts(&self) -> impl Iterator<Item = &Burst> {
        self.bursts.iter()
    }

    /// Release every burst's slots and forget them (teardown)
    pub fn clear(&mut self, pool: &mut FragmentPool) {
        for burst in self.bursts.drain(..) {
            for idx in burst.slots {
                pool.release(idx);
            }
        }
        self.elapsed_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::DeviceTier;

    fn manager_and_pool() -> (BurstManager, FragmentPool) {
        let profile = RenderProfile::resolve(DeviceTier::Mobile); // 8 frags, cap 3
        (
            BurstManager::new(&profile),
            FragmentPool::new(profile.fragment_pool_size),
        )
    }

    #[test]
    fn spawn_acquires_tuned_fragment_count() {
        let (mut mgr, mut pool) = manager_and_pool();
        let n = mgr.spawn(&mut pool, Vec3::ZERO, 1);
        assert_eq!(n, 8);
        assert_eq!(pool.active_count(), 8);
        assert_eq!(mgr.active_count(), 1);
    }

    #[test]
    fn lifetime_variance_stays_in_band() {
        let (mut mgr, mut pool) = manager_and_pool();
        mgr.spawn(&mut pool, Vec3::ZERO, 5);
        let burst = mgr.bursts().next().unwrap().clone();
        for &idx in &burst.slots {
            let lt = pool.get(idx).unwrap().lifetime_ms;
            assert!((1350.0..1650.0).contains(&lt), "lifetime {lt} out of band");
        }
        assert_eq!(burst.lifetime_ms, 1650.0);
    }

    #[test]
    fn fifo_eviction_at_capacity() {
        let (mut mgr, mut pool) = manager_and_pool();
        for seed in 0..3 {
            mgr.spawn(&mut pool, Vec3::ZERO, seed);
        }
        assert_eq!(mgr.active_count(), 3);
        assert_eq!(pool.active_count(), 24);
        let oldest_id = mgr.bursts().next().unwrap().id;

        // Fourth spawn evicts exactly the oldest; its slots are free for
        // the new burst's acquire
        mgr.spawn(&mut pool, Vec3::ZERO, 99);
        assert_eq!(mgr.active_count(), 3);
        assert_eq!(pool.active_count(), 24);
        assert!(mgr.bursts().all(|b| b.id != oldest_id));
    }

    #[test]
    fn partial_spawn_under_pool_pressure() {
        let profile = RenderProfile::resolve(DeviceTier::Mobile);
        let mut mgr = BurstManager::new(&profile);
        let mut pool = FragmentPool::new(10);
        assert_eq!(mgr.spawn(&mut pool, Vec3::ZERO, 1), 8);
        // Only 2 slots left; the spawn degrades instead of failing
        assert_eq!(mgr.spawn(&mut pool, Vec3::ZERO, 2), 2);
        assert_eq!(mgr.active_count(), 2);
    }

    #[test]
    fn group_sweep_releases_all_slots() {
        let (mut mgr, mut pool) = manager_and_pool();
        mgr.spawn(&mut pool, Vec3::ZERO, 3);
        // Run past the group lifetime (1650 ms)
        for _ in 0..120 {
            mgr.update(&mut pool, 0.016);
        }
        assert_eq!(mgr.active_count(), 0);
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn fragments_expire_individually_before_group_sweep() {
        let (mut mgr, mut pool) = manager_and_pool();
        mgr.spawn(&mut pool, Vec3::ZERO, 3);
        // Individual lifetimes land in [1350, 1650); at 1632 ms nearly all
        // fragments have self-expired but the group record is still alive
        for _ in 0..102 {
            mgr.update(&mut pool, 0.016); // 1632 ms
        }
        assert!(pool.active_count() < 8);
        assert_eq!(mgr.active_count(), 1);
    }

    #[test]
    fn clear_releases_everything() {
        let (mut mgr, mut pool) = manager_and_pool();
        mgr.spawn(&mut pool, Vec3::ZERO, 1);
        mgr.spawn(&mut pool, Vec3::ZERO, 2);
        mgr.clear(&mut pool);
        assert_eq!(mgr.active_count(), 0);
        assert_eq!(pool.active_count(), 0);
    }
}
