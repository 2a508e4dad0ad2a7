//! Perspective camera with analytic unprojection
//!
//! Picking only needs to map screen points back into the world, so instead
//! of inverting a general 4x4 view-projection matrix the camera unprojects
//! analytically: the view transform is rigid (orthonormal basis + origin)
//! and the perspective projection inverts in closed form.

use orrery_core::Vec3;

pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Width / height
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::UP,
            fov: 45.0,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Orthonormal view basis: (right, up, forward)
    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.position).normalized();
        let right = forward.cross(&self.up).normalized();
        let up = right.cross(&forward);
        (right, up, forward)
    }

    /// Map an NDC point back to world space. `ndc_z` is -1 at the near
    /// plane and +1 at the far plane (GL-style clip range).
    pub fn unproject(&self, ndc_x: f32, ndc_y: f32, ndc_z: f32) -> Vec3 {
        let f = 1.0 / (self.fov.to_radians() / 2.0).tan();
        let depth = self.far - self.near;
        // Projection rows: z_clip = a·z_view + b, w_clip = -z_view
        let a = -(self.far + self.near) / depth;
        let b = -(2.0 * self.far * self.near) / depth;

        // ndc_z = (a·z + b) / (-z)  =>  z = -b / (a + ndc_z)
        let z_view = -b / (a + ndc_z);
        let w_clip = -z_view;
        let x_view = ndc_x * w_clip * self.aspect / f;
        let y_view = ndc_y * w_clip / f;

        let (right, up, forward) = self.basis();
        // View z looks down -forward
        self.position + right * x_view + up * y_view + forward * -z_view
    }
}
