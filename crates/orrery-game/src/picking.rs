//! Ray picking against the instanced rock batch
//!
//! Unprojects pointer coordinates through the camera and tests the ray
//! against a sphere per live instance. Rocks are round, so a scaled sphere
//! is the whole collision story.

use crate::camera::Camera;
use orrery_core::Vec3;

/// A ray in 3D space
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray from screen coordinates in physical pixels.
    pub fn from_screen(
        screen_x: f32,
        screen_y: f32,
        viewport_width: f32,
        viewport_height: f32,
        camera: &Camera,
    ) -> Self {
        // Convert to NDC [-1, 1], Y flipped
        let ndc_x = 2.0 * screen_x / viewport_width - 1.0;
        let ndc_y = 1.0 - 2.0 * screen_y / viewport_height;

        let origin = camera.unproject(ndc_x, ndc_y, -1.0);
        let far_pt = camera.unproject(ndc_x, ndc_y, 1.0);
        let direction = (far_pt - origin).normalized();
        let direction = if direction == Vec3::ZERO {
            Vec3::new(0.0, 0.0, -1.0)
        } else {
            direction
        };
        Self { origin, direction }
    }

    /// Distance along the ray to a sphere, or None if it misses.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(&self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let t = -b - sqrt_disc;
        if t >= 0.0 {
            return Some(t);
        }
        // Ray starts inside the sphere
        let t = -b + sqrt_disc;
        (t >= 0.0).then_some(t)
    }

    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// A successful pick against the instance batch
#[derive(Debug, Clone, Copy)]
pub struct PickHit {
    /// Instance index (= particle id)
    pub id: u32,
    /// Distance along the ray
    pub distance: f32,
    /// World-space intersection point
    pub point: Vec3,
}

/// Scan every instance and return the nearest sphere hit. Instances for
/// which `skip` returns true (destroyed or hidden) are not candidates.
pub fn pick_nearest<F>(
    ray: &Ray,
    positions: &[Vec3],
    radius_of: F,
    skip: impl Fn(u32) -> bool,
) -> Option<PickHit>
where
    F: Fn(u32) -> f32,
{
    let mut nearest: Option<PickHit> = None;
    for (idx, &center) in positions.iter().enumerate() {
        let id = idx as u32;
        if skip(id) {
            continue;
        }
        let radius = radius_of(id);
        if radius <= 0.0 {
            continue;
        }
        if let Some(distance) = ray.intersect_sphere(center, radius) {
            if nearest.map_or(true, |hit| distance < hit.distance) {
                nearest = Some(PickHit {
                    id,
                    distance,
                    point: ray.point_at(distance),
                });
            }
        }
    }
    nearest
}
