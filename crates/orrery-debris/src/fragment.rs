//! Fragment pool: fixed-capacity, index-stable slots
//!
//! Slots are allocated once; the slot index doubles as the instanced-buffer
//! slot for the fragment mesh, so slots never move (no swap-remove here,
//! unlike a pool whose indices are private). Inactive slots pack a zero
//! scale so they are invisible without a separate visibility list.

use bytemuck::{Pod, Zeroable};
use orrery_core::Vec3;

/// One pool slot
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub active: bool,
    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Vec3,
    pub angular_velocity: Vec3,
    pub scale: f32,
    pub opacity: f32,
    pub lifetime_ms: f32,
    pub elapsed_ms: f32,
}

impl Fragment {
    fn inactive() -> Self {
        Self {
            active: false,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            rotation: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            scale: 0.0,
            opacity: 0.0,
            lifetime_ms: 0.0,
            elapsed_ms: 0.0,
        }
    }

    /// Lifetime progress in [0, 1]
    pub fn age_ratio(&self) -> f32 {
        if self.lifetime_ms <= 0.0 {
            1.0
        } else {
            (self.elapsed_ms / self.lifetime_ms).min(1.0)
        }
    }
}

/// GPU instance data for one fragment — 32 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct FragmentInstance {
    /// xyz = world position, w = scale (0 while inactive)
    pub pos_scale: [f32; 4],
    /// xyz = euler rotation, w = opacity
    pub rotation_opacity: [f32; 4],
}

/// Fixed-capacity fragment pool
pub struct FragmentPool {
    slots: Vec<Fragment>,
    instances: Vec<FragmentInstance>,
    active_count: usize,
}

impl FragmentPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Fragment::inactive(); capacity],
            instances: vec![FragmentInstance::zeroed(); capacity],
            active_count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn free_count(&self) -> usize {
        self.slots.len() - self.active_count
    }

    /// Acquire up to `count` slots: linear scan for inactive slots, reset
    /// their fields, mark active. Returns fewer than requested when the pool
    /// runs dry; callers animate fewer fragments, nothing blocks or errors.
    pub fn acquire(&mut self, count: usize) -> Vec<usize> {
        let mut taken = Vec::with_capacity(count);
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if taken.len() == count {
                break;
            }
            if !slot.active {
                *slot = Fragment {
                    active: true,
                    scale: 1.0,
                    opacity: 1.0,
                    ..Fragment::inactive()
                };
                taken.push(idx);
            }
        }
        self.active_count += taken.len();
        taken
    }

    /// Release a slot. Idempotent: releasing an inactive slot is a no-op.
    pub fn release(&mut self, idx: usize) {
        if let Some(slot) = self.slots.get_mut(idx) {
            if slot.active {
                slot.active = false;
                self.active_count -= 1;
            }
        }
    }

    /// Bulk release, used on teardown
    pub fn release_all(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
        }
        self.active_count = 0;
    }

    pub fn get(&self, idx: usize) -> Option<&Fragment> {
        self.slots.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Fragment> {
        self.slots.get_mut(idx)
    }

    pub fn slots(&self) -> &[Fragment] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Fragment] {
        &mut self.slots
    }

    /// Pack the instance batch for the fragment draw call. Inactive slots
    /// pack scale 0 so they never show.
    pub fn pack_instances(&mut self) -> &[FragmentInstance] {
        for (slot, inst) in self.slots.iter().zip(self.instances.iter_mut()) {
            *inst = if slot.active {
                FragmentInstance {
                    pos_scale: [slot.position.x, slot.position.y, slot.position.z, slot.scale],
                    rotation_opacity: [
                        slot.rotation.x,
                        slot.rotation.y,
                        slot.rotation.z,
                        slot.opacity,
                    ],
                }
            } else {
                FragmentInstance::zeroed()
            };
        }
        &self.instances
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conservation_invariant() {
        let mut pool = FragmentPool::new(10);
        assert_eq!(pool.active_count() + pool.free_count(), 10);
        let taken = pool.acquire(4);
        assert_eq!(taken.len(), 4);
        assert_eq!(pool.active_count() + pool.free_count(), 10);
        pool.release(taken[0]);
        assert_eq!(pool.active_count() + pool.free_count(), 10);
    }

    #[test]
    fn partial_acquire_when_exhausted() {
        let mut pool = FragmentPool::new(5);
        assert_eq!(pool.acquire(3).len(), 3);
        // Second call only finds the 2 remaining slots
        assert_eq!(pool.acquire(3).len(), 2);
        assert_eq!(pool.active_count(), 5);
        assert!(pool.acquire(1).is_empty());
    }

    #[test]
    fn acquire_never_returns_active_slots() {
        let mut pool = FragmentPool::new(8);
        let first = pool.acquire(4);
        let second = pool.acquire(4);
        for idx in &second {
            assert!(!first.contains(idx));
        }
    }

    #[test]
    fn acquire_resets_slot_state() {
        let mut pool = FragmentPool::new(2);
        let idx = pool.acquire(1)[0];
        {
            let f = pool.get_mut(idx).unwrap();
            f.position = Vec3::new(5.0, 5.0, 5.0);
            f.opacity = 0.2;
            f.elapsed_ms = 900.0;
        }
        pool.release(idx);
        let idx2 = pool.acquire(1)[0];
        assert_eq!(idx, idx2);
        let f = pool.get(idx2).unwrap();
        assert_eq!(f.position, Vec3::ZERO);
        assert_eq!(f.opacity, 1.0);
        assert_eq!(f.scale, 1.0);
        assert_eq!(f.elapsed_ms, 0.0);
    }

    #[test]
    fn release_is_idempotent() {
        let mut pool = FragmentPool::new(3);
        let idx = pool.acquire(1)[0];
        pool.release(idx);
        pool.release(idx);
        pool.release(999); // out of range is also a no-op
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.free_count(), 3);
    }

    #[test]
    fn inactive_slots_pack_invisible() {
        let mut pool = FragmentPool::new(4);
        let idx = pool.acquire(1)[0];
        pool.get_mut(idx).unwrap().position = Vec3::new(1.0, 2.0, 3.0);
        let instances = pool.pack_instances();
        assert_eq!(instances.len(), 4);
        assert_eq!(instances[idx].pos_scale, [1.0, 2.0, 3.0, 1.0]);
        for (i, inst) in instances.iter().enumerate() {
            if i != idx {
                assert_eq!(inst.pos_scale[3], 0.0);
            }
        }
    }

    #[test]
    fn release_all_empties_the_pool() {
        let mut pool = FragmentPool::new(6);
        pool.acquire(6);
        pool.release_all();
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.acquire(6).len(), 6);
    }
}
