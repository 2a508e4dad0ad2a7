//! Orrery Game - the interactive shooting overlay
//!
//! Provides:
//! - A perspective camera with analytic screen-space unprojection
//! - Ray picking against the instanced rock batch
//! - The shooting controller (one-way Alive → Destroyed state machine,
//!   burst spawning, destroyed-set query surface)
//! - `OrreryScene`, the composed per-frame entry point for the host

pub mod camera;
pub mod picking;
pub mod scene;
pub mod shooter;

pub use camera::Camera;
pub use picking::Ray;
pub use scene::OrreryScene;
pub use shooter::{Shooter, ShotHit};
