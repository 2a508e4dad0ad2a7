//! Device-tier render profile
//!
//! All tier-dependent tuning is resolved exactly once at construction into
//! an immutable `RenderProfile`, then threaded through constructors. Nothing
//! downstream re-queries the viewport.

use serde::{Deserialize, Serialize};

/// Coarse device capability tier, decided by the host from the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeviceTier {
    #[default]
    Desktop,
    Mobile,
}

/// Tuning for one explosion burst
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionTuning {
    /// Fragments acquired per burst (fewer if the pool runs dry)
    pub fragment_count: usize,
    /// Base fragment lifetime in milliseconds
    pub lifetime_ms: f32,
    /// Total variance band; per-fragment lifetime is base ± variance/2
    pub lifetime_variance_ms: f32,
}

/// Immutable bundle of device-tier-dependent configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderProfile {
    pub tier: DeviceTier,
    /// Fixed fragment pool capacity
    pub fragment_pool_size: usize,
    /// Update the choreography every other frame only
    pub frame_skip: bool,
    /// Concurrent explosion cap; oldest is evicted beyond this
    pub max_explosions: usize,
    pub explosion: ExplosionTuning,
}

impl RenderProfile {
    pub fn resolve(tier: DeviceTier) -> Self {
        match tier {
            DeviceTier::Desktop => Self {
                tier,
                fragment_pool_size: 200,
                frame_skip: false,
                max_explosions: 5,
                explosion: ExplosionTuning {
                    fragment_count: 15,
                    lifetime_ms: 2000.0,
                    lifetime_variance_ms: 500.0,
                },
            },
            DeviceTier::Mobile => Self {
                tier,
                fragment_pool_size: 100,
                frame_skip: true,
                max_explosions: 3,
                explosion: ExplosionTuning {
                    fragment_count: 8,
                    lifetime_ms: 1500.0,
                    lifetime_variance_ms: 300.0,
                },
            },
        }
    }

    /// Resolve from the viewport descriptor the host hands over at mount
    pub fn from_viewport(is_mobile: bool) -> Self {
        Self::resolve(if is_mobile {
            DeviceTier::Mobile
        } else {
            DeviceTier::Desktop
        })
    }
}
