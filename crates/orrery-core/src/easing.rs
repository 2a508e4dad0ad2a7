//! Polynomial easing curves for phase transitions
//!
//! All curves clamp their input into [0, 1] first, so out-of-range or NaN
//! scroll glitches never reach the transform buffer.

/// Sanitize `t` into [0, 1]; NaN collapses to 0.
#[inline]
pub(crate) fn clamp01(t: f32) -> f32 {
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

/// Linear interpolation between two floats
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Fast start, slow settle
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = clamp01(t);
    1.0 - (1.0 - t).powi(3)
}

/// Gentler variant of `ease_out_cubic`
#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = clamp01(t);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Slow start and end
#[inline]
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = clamp01(t);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eases_hit_endpoints() {
        for f in [ease_out_cubic, ease_out_quad, ease_in_out_quad] {
            assert!((f(0.0) - 0.0).abs() < 1e-6);
            assert!((f(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn eases_clamp_bad_input() {
        assert_eq!(ease_out_cubic(-2.0), 0.0);
        assert_eq!(ease_out_cubic(3.0), 1.0);
        assert_eq!(ease_out_cubic(f32::NAN), 0.0);
        assert_eq!(ease_in_out_quad(f32::NAN), 0.0);
    }

    #[test]
    fn ease_out_cubic_is_monotone() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let v = ease_out_cubic(i as f32 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }
}
