//! Scroll-indexed phase choreographer
//!
//! The current phase is a pure function of scroll progress, not of history:
//! five half-open ranges partition [0, 1] with the final range closed at 1.
//! A separate piecewise curve drifts the whole formation center from high
//! and back at scroll start down toward the contact section at the end.

use orrery_core::{ease_in_out_quad, ease_out_quad, Vec3};

/// The five choreography phases, in scroll order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Scattered,
    Forming,
    Assembled,
    Dissolving,
    Drifting,
}

/// Phase boundary table over scroll progress: [start, end) per phase,
/// the last interval closed at 1.0.
pub const PHASE_BOUNDS: [(Phase, f32, f32); 5] = [
    (Phase::Scattered, 0.0, 0.15),
    (Phase::Forming, 0.15, 0.30),
    (Phase::Assembled, 0.30, 0.55),
    (Phase::Dissolving, 0.55, 0.70),
    (Phase::Drifting, 0.70, 1.0),
];

fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// Map global scroll progress to `(phase, progress within that phase)`.
/// Out-of-range and NaN inputs clamp instead of propagating.
pub fn calculate_phase(progress: f32) -> (Phase, f32) {
    let p = clamp_progress(progress);
    for &(phase, start, end) in &PHASE_BOUNDS[..4] {
        if p < end {
            return (phase, (p - start) / (end - start));
        }
    }
    let (phase, start, end) = PHASE_BOUNDS[4];
    (phase, ((p - start) / (end - start)).min(1.0))
}

/// Global formation-center offset applied to every particle, aligned to the
/// same boundary table: high and back while scattered, centered while
/// assembled, sinking toward the contact anchor by scroll end.
pub fn sphere_center(progress: f32) -> Vec3 {
    const HIGH: Vec3 = Vec3::new(0.0, 2.5, -2.0);
    const APPROACH: Vec3 = Vec3::new(0.0, 1.0, -0.5);
    const SETTLED: Vec3 = Vec3::ZERO;
    const SINKING: Vec3 = Vec3::new(0.0, -1.5, 0.5);
    const CONTACT: Vec3 = Vec3::new(0.0, -4.0, 1.0);

    let (phase, t) = calculate_phase(progress);
    match phase {
        Phase::Scattered => HIGH.lerp(&APPROACH, ease_out_quad(t)),
        Phase::Forming => APPROACH.lerp(&SETTLED, ease_in_out_quad(t)),
        Phase::Assembled => SETTLED,
        Phase::Dissolving => SETTLED.lerp(&SINKING, ease_in_out_quad(t)),
        Phase::Drifting => SINKING.lerp(&CONTACT, ease_out_quad(t)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        assert_eq!(calculate_phase(0.0), (Phase::Scattered, 0.0));
        let (phase, t) = calculate_phase(1.0);
        assert_eq!(phase, Phase::Drifting);
        assert!((t - 1.0).abs() < 1e-6);
    }

    #[test]
    fn boundaries_resolve_to_the_later_phase() {
        assert_eq!(calculate_phase(0.15).0, Phase::Forming);
        assert!(calculate_phase(0.15).1.abs() < 1e-6);
        assert_eq!(calculate_phase(0.30).0, Phase::Assembled);
        assert_eq!(calculate_phase(0.55).0, Phase::Dissolving);
        assert_eq!(calculate_phase(0.70).0, Phase::Drifting);
    }

    #[test]
    fn partition_covers_unit_interval() {
        let mut last_phase = Phase::Scattered;
        for i in 0..=10_000 {
            let p = i as f32 / 10_000.0;
            let (phase, t) = calculate_phase(p);
            assert!((0.0..=1.0).contains(&t), "t={t} at p={p}");
            // Phases only move forward as progress increases
            let order = |ph: Phase| {
                PHASE_BOUNDS.iter().position(|&(q, _, _)| q == ph).unwrap()
            };
            assert!(order(phase) >= order(last_phase));
            last_phase = phase;
        }
    }

    #[test]
    fn worked_example_099() {
        let (phase, t) = calculate_phase(0.99);
        assert_eq!(phase, Phase::Drifting);
        assert!((t - 0.9666).abs() < 1e-3);
    }

    #[test]
    fn defensive_clamping() {
        assert_eq!(calculate_phase(-0.5), (Phase::Scattered, 0.0));
        assert_eq!(calculate_phase(1.5).0, Phase::Drifting);
        assert_eq!(calculate_phase(f32::NAN), (Phase::Scattered, 0.0));
        assert!(sphere_center(f32::NAN).is_finite());
    }

    #[test]
    fn center_curve_tracks_the_scroll() {
        // High and back at the top of the page
        let start = sphere_center(0.0);
        assert!(start.y > 2.0 && start.z < 0.0);
        // Centered while assembled
        assert_eq!(sphere_center(0.4), Vec3::ZERO);
        // Down toward contact at the end
        let end = sphere_center(1.0);
        assert!(end.y < -3.5);
        // No gross jumps across the whole range
        let mut prev = sphere_center(0.0);
        for i in 1..=1000 {
            let c = sphere_center(i as f32 / 1000.0);
            assert!(prev.distance(&c) < 0.1);
            prev = c;
        }
    }
}
