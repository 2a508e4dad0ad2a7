//! Orrery Debris - pooled explosion fragments
//!
//! Provides the destruction overlay:
//! - Fixed-capacity fragment pool (slot index = instanced-buffer slot)
//! - Semi-implicit Euler burst physics with lifetime fade/shrink
//! - Burst manager enforcing a concurrent-explosion cap with FIFO eviction

pub mod burst;
pub mod fragment;
pub mod physics;

pub use burst::{Burst, BurstManager};
pub use fragment::{Fragment, FragmentInstance, FragmentPool};
