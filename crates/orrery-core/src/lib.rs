//! Orrery Core - Foundational types for the Orrery choreography engine
//!
//! This crate provides the types every other Orrery crate depends on:
//! - `Vec3` - Spatial math
//! - `SeededRng` - Deterministic pseudo-random stream
//! - `RenderProfile` - Device-tier configuration resolved once at startup
//! - `FrameClock` - Host-driven frame timing
//! - Easing curves, error types and Result alias

mod clock;
mod easing;
mod error;
mod profile;
mod rng;
mod types;

pub use clock::FrameClock;
pub use easing::{ease_in_out_quad, ease_out_cubic, ease_out_quad, lerp};
pub use error::{OrreryError, Result};
pub use profile::{DeviceTier, ExplosionTuning, RenderProfile};
pub use rng::SeededRng;
pub use types::Vec3;
