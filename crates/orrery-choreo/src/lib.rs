//! Orrery Choreo - scroll-driven particle choreography
//!
//! Provides the armillary formation pipeline:
//! - Ring geometry (tilted, rotating, orbiting circular formations)
//! - Particle field built once from a seeded RNG
//! - Five-phase scroll choreographer with a formation-center curve
//! - Pure per-particle position interpolator
//! - Per-frame render driver packing an instanced transform batch

pub mod driver;
pub mod field;
pub mod motion;
pub mod phase;
pub mod ring;

pub use driver::{ChoreoDriver, RockInstance};
pub use field::{ParticleField, ParticleState};
pub use phase::{calculate_phase, sphere_center, Phase};
pub use ring::Ring;
